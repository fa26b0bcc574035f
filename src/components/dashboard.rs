use leptos::prelude::*;

use crate::analysis::{AnalysisResult, Artifact, Summary};
use crate::download::download_or_log;

fn or_dash(value: Option<&str>) -> String {
	value.unwrap_or("-").to_string()
}

/// Ring and suspicious-account tables, summary cards and JSON downloads.
#[component]
pub fn Dashboard(#[prop(into)] analysis: Signal<Option<AnalysisResult>>) -> impl IntoView {
	let download = move |artifact: Artifact| {
		analysis.with_untracked(|a| {
			if let Some(result) = a {
				download_or_log(result, artifact);
			}
		})
	};

	move || {
		if analysis.with(Option::is_none) {
			return view! { <p class="empty">"Upload a CSV file to view results."</p> }.into_any();
		}

		let (rings, accounts, summary) = analysis.with(|a| {
			a.as_ref()
				.map(|r| (r.fraud_rings.clone(), r.suspicious_accounts.clone(), r.summary.clone()))
				.unwrap_or_default()
		});

		view! {
			<div class="dashboard-view">
				<section class="card">
					<header>
						<h2>"Fraud Rings (" {rings.len()} ")"</h2>
						<button on:click=move |_| download(Artifact::FraudRings)>"Download JSON"</button>
					</header>
					<table>
						<thead>
							<tr>
								<th>"Ring ID"</th>
								<th>"Pattern"</th>
								<th>"Members"</th>
								<th>"Risk Score"</th>
							</tr>
						</thead>
						<tbody>
							{rings
								.into_iter()
								.map(|ring| {
									view! {
										<tr>
											<td class="mono">{or_dash(ring.ring_id.as_deref())}</td>
											<td>{ring.pattern_type}</td>
											<td>{ring.member_accounts.len()}</td>
											<td>{ring.risk_score.map(|s| s.to_string()).unwrap_or_else(|| "-".into())}</td>
										</tr>
									}
								})
								.collect_view()}
						</tbody>
					</table>
				</section>

				<section class="card">
					<header>
						<h2>"Suspicious Accounts (" {accounts.len()} ")"</h2>
						<button on:click=move |_| download(Artifact::SuspiciousAccounts)>"Download JSON"</button>
					</header>
					<table>
						<thead>
							<tr>
								<th>"Account ID"</th>
								<th>"Risk Score"</th>
								<th>"Ring"</th>
								<th>"Patterns"</th>
							</tr>
						</thead>
						<tbody>
							{accounts
								.into_iter()
								.map(|acc| {
									view! {
										<tr title=acc.explanation.clone().unwrap_or_default()>
											<td class="mono">{acc.account_id}</td>
											<td class="score">{acc.risk_score}</td>
											<td>{or_dash(acc.ring_id.as_deref())}</td>
											<td>{acc.detected_patterns.join(", ")}</td>
										</tr>
									}
								})
								.collect_view()}
						</tbody>
					</table>
				</section>

				<SummaryCards summary=summary />

				<button class="download-all" on:click=move |_| download(Artifact::FullResponse)>
					"Download full analysis"
				</button>
			</div>
		}
		.into_any()
	}
}

#[component]
fn SummaryCards(summary: Summary) -> impl IntoView {
	let cards = [
		("Total Accounts", summary.total_accounts_analyzed),
		("Suspicious Accounts", summary.suspicious_accounts_flagged),
		("Fraud Rings", summary.fraud_rings_detected),
		("Processing Time (s)", summary.processing_time_seconds),
	];

	view! {
		<div class="stat-cards">
			{cards
				.into_iter()
				.map(|(label, value)| {
					view! {
						<div class="stat-card">
							<p class="stat-label">{label}</p>
							<p class="stat-value">{value.unwrap_or(0.0)}</p>
						</div>
					}
				})
				.collect_view()}
		</div>
	}
}

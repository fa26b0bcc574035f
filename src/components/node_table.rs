use leptos::prelude::*;

use crate::analysis::AccountGraph;

/// One row per account in the graph.
#[component]
pub fn NodeTable(#[prop(into)] graph: Signal<AccountGraph>) -> impl IntoView {
	view! {
		<div class="table-view">
			<table>
				<thead>
					<tr>
						<th>"Account ID"</th>
						<th>"Suspicious"</th>
						<th>"Ring"</th>
						<th>"Risk Score"</th>
					</tr>
				</thead>
				<tbody>
					{move || {
						graph.with(|g| {
							g.nodes
								.iter()
								.map(|node| {
									view! {
										<tr class:suspicious=node.suspicious>
											<td>{node.id.clone()}</td>
											<td>{if node.suspicious { "YES" } else { "NO" }}</td>
											<td>{node.ring.clone().unwrap_or_else(|| "-".into())}</td>
											<td>{node.risk_score.unwrap_or(0.0)}</td>
										</tr>
									}
								})
								.collect_view()
						})
					}}
				</tbody>
			</table>
		</div>
	}
}

use leptos::prelude::*;
use log::info;

use crate::analysis::{AccountGraph, AnalysisResult};
use crate::components::dashboard::Dashboard;
use crate::components::force_graph::ForceGraphCanvas;
use crate::components::info_panel::InfoPanel;
use crate::components::node_table::NodeTable;
use crate::components::upload::UploadPanel;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum View {
	Graph,
	Table,
	Dashboard,
}

impl View {
	const ALL: [View; 3] = [View::Graph, View::Table, View::Dashboard];

	fn label(self) -> &'static str {
		match self {
			View::Graph => "Graph",
			View::Table => "Table",
			View::Dashboard => "Dashboard",
		}
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let analysis = RwSignal::new(None::<AnalysisResult>);
	let graph = Memo::new(move |_| {
		analysis.with(|a| a.as_ref().map(AccountGraph::from_analysis).unwrap_or_default())
	});
	let view_mode = RwSignal::new(View::Graph);
	let selected = RwSignal::new(None::<String>);
	let hovered = RwSignal::new(None::<String>);

	let on_analysis = Callback::new(move |result: AnalysisResult| {
		info!("rendering analysis with {} transactions", result.transactions.len());
		selected.set(None);
		hovered.set(None);
		analysis.set(Some(result));
	});

	// Views stay mounted so the canvas keeps its simulation when hidden.
	let display = move |v: View| move || if view_mode.get() == v { "block" } else { "none" };

	view! {
		<div class="app">
			<header class="app-header">
				<h1>"Money Muling Detection Network"</h1>
				<p class="subtitle">"Directed edges represent sender → receiver money flow"</p>
			</header>

			<UploadPanel on_analysis=on_analysis />

			<nav class="view-toggle">
				{View::ALL
					.into_iter()
					.map(|v| {
						view! {
							<button
								class:active=move || view_mode.get() == v
								on:click=move |_| view_mode.set(v)
							>
								{v.label()}
							</button>
						}
					})
					.collect_view()}
			</nav>

			<section class="graph-view" style:display=display(View::Graph)>
				<ForceGraphCanvas
					data=graph
					height=Some(700.0)
					on_hover=Callback::new(move |id: Option<String>| hovered.set(id))
					on_select=Callback::new(move |id: Option<String>| selected.set(id))
				/>
				<InfoPanel graph=graph selected=selected hovered=hovered />
			</section>

			<section style:display=display(View::Table)>
				<NodeTable graph=graph />
			</section>

			<section style:display=display(View::Dashboard)>
				<Dashboard analysis=analysis />
			</section>
		</div>
	}
}

use leptos::prelude::*;

use crate::analysis::AccountGraph;

/// Details of the selected account, or the hovered one when nothing is
/// selected.
#[component]
pub fn InfoPanel(
	#[prop(into)] graph: Signal<AccountGraph>,
	#[prop(into)] selected: Signal<Option<String>>,
	#[prop(into)] hovered: Signal<Option<String>>,
) -> impl IntoView {
	let node = move || {
		let id = selected.get().or_else(|| hovered.get())?;
		graph.with(|g| g.node(&id).cloned())
	};

	move || {
		node().map(|node| {
			view! {
				<div class="info-panel">
					<p class="info-title">{node.id.clone()}</p>
					<p>"Suspicious: " {if node.suspicious { "YES" } else { "NO" }}</p>
					<p>"Ring: " {node.ring.clone().unwrap_or_else(|| "None".into())}</p>
					<p>"Risk Score: " {node.risk_score.unwrap_or(0.0)}</p>
				</div>
			}
		})
	}
}

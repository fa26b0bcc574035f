use leptos::prelude::*;
use leptos::task::spawn_local;
use log::error;

use crate::analysis::AnalysisResult;
use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::error::AnalysisError;

/// File picker and upload button.
///
/// Each click sends one request. Nothing stops a second click while the first
/// is in flight; whichever response lands last is what `on_analysis` sees
/// last. Failures only touch the status line.
#[component]
pub fn UploadPanel(on_analysis: Callback<AnalysisResult>) -> impl IntoView {
	let config = use_context::<AppConfig>().unwrap_or_default();
	let client = ApiClient::new(&config.api_base_url);
	let file_ref = NodeRef::<leptos::html::Input>::new();
	let (status, set_status) = signal(None::<String>);
	let (pending, set_pending) = signal(0usize);

	let on_upload = move |_| {
		let file = file_ref
			.get()
			.and_then(|input| input.files())
			.and_then(|files| files.get(0));
		let Some(file) = file else {
			set_status.set(Some(AnalysisError::NoFile.to_string()));
			return;
		};

		set_status.set(None);
		set_pending.update(|n| *n += 1);
		let client = client.clone();
		spawn_local(async move {
			match client.upload_csv(&file).await {
				Ok(result) => on_analysis.run(result),
				Err(e) => {
					error!("{e}");
					set_status.set(Some(e.to_string()));
				}
			}
			set_pending.update(|n| *n = n.saturating_sub(1));
		});
	};

	view! {
		<div class="upload-panel">
			<input node_ref=file_ref type="file" accept=".csv" />
			<button class="upload-button" on:click=on_upload>
				{move || if pending.get() > 0 { "Analyzing..." } else { "Upload CSV" }}
			</button>
			<Show when=move || status.with(Option::is_some)>
				<p class="status-error">{move || status.get().unwrap_or_default()}</p>
			</Show>
		</div>
	}
}

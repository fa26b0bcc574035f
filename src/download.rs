//! Saves an export artifact through a temporary object URL.

use log::{error, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url, Window};

use crate::analysis::{AnalysisResult, Artifact};
use crate::error::AnalysisError;

/// How long an object URL outlives its click. Revoking sooner can abort the
/// download in some browsers.
const REVOKE_DELAY_MS: i32 = 40_000;

/// Renders `artifact` and hands it to the browser as a file download.
pub fn download_artifact(result: &AnalysisResult, artifact: Artifact) -> Result<(), AnalysisError> {
	let text = artifact.render(result)?;
	save_json(&text, artifact.file_name())?;
	info!("downloaded {} ({} bytes)", artifact.file_name(), text.len());
	Ok(())
}

/// Same as [`download_artifact`], logging instead of returning the error.
pub fn download_or_log(result: &AnalysisResult, artifact: Artifact) {
	if let Err(e) = download_artifact(result, artifact) {
		error!("{e}");
	}
}

fn save_json(text: &str, file_name: &str) -> Result<(), AnalysisError> {
	let parts = js_sys::Array::of1(&JsValue::from_str(text));
	let bag = BlobPropertyBag::new();
	bag.set_type("application/json");
	let blob = Blob::new_with_str_sequence_and_options(&parts, &bag).map_err(AnalysisError::browser)?;
	let url = Url::create_object_url_with_blob(&blob).map_err(AnalysisError::browser)?;

	let window = web_sys::window().ok_or_else(|| AnalysisError::Browser("no window".into()))?;
	let document = window
		.document()
		.ok_or_else(|| AnalysisError::Browser("no document".into()))?;
	let anchor: HtmlAnchorElement = document
		.create_element("a")
		.map_err(AnalysisError::browser)?
		.dyn_into()
		.map_err(AnalysisError::browser)?;
	anchor.set_href(&url);
	anchor.set_download(file_name);
	anchor.click();

	revoke_later(&window, url)
}

fn revoke_later(window: &Window, url: String) -> Result<(), AnalysisError> {
	let revoke = Closure::once_into_js(move || {
		if let Err(e) = Url::revoke_object_url(&url) {
			warn!("could not revoke {url}: {e:?}");
		}
	});
	window
		.set_timeout_with_callback_and_timeout_and_arguments_0(revoke.unchecked_ref(), REVOKE_DELAY_MS)
		.map(drop)
		.map_err(AnalysisError::browser)
}

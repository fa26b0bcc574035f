//! Client for the analysis service.
//!
//! Uses web-sys fetch. One request per call; no retries.

use log::info;
use serde_json::Value;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, RequestMode, Response};

use crate::analysis::AnalysisResult;
use crate::error::AnalysisError;

/// Path the service accepts CSV uploads on.
pub const UPLOAD_PATH: &str = "/upload";

/// Handle on the analysis service at one origin.
#[derive(Clone, Debug)]
pub struct ApiClient {
	base_url: String,
}

impl ApiClient {
	/// Client for the service at `base_url`, e.g. [`AppConfig::api_base_url`].
	/// The base should carry no trailing slash.
	///
	/// [`AppConfig::api_base_url`]: crate::config::AppConfig::api_base_url
	pub fn new(base_url: &str) -> Self {
		Self {
			base_url: base_url.to_string(),
		}
	}

	/// Posts the CSV as multipart field `file` and normalizes the reply.
	pub async fn upload_csv(&self, file: &File) -> Result<AnalysisResult, AnalysisError> {
		let url = format!("{}{}", self.base_url, UPLOAD_PATH);
		info!("uploading {} ({} bytes) to {url}", file.name(), file.size());

		let form = FormData::new().map_err(AnalysisError::browser)?;
		form.append_with_blob_and_filename("file", file, &file.name())
			.map_err(AnalysisError::browser)?;

		let opts = RequestInit::new();
		opts.set_method("POST");
		opts.set_mode(RequestMode::Cors);
		opts.set_body(&form.into());

		let request = Request::new_with_str_and_init(&url, &opts)
			.map_err(|e| AnalysisError::Network(format!("request error: {e:?}")))?;

		let window = web_sys::window().ok_or_else(|| AnalysisError::Browser("no window".into()))?;
		let resp_value = JsFuture::from(window.fetch_with_request(&request))
			.await
			.map_err(|e| AnalysisError::Network(format!("fetch error: {e:?}")))?;

		let resp: Response = resp_value
			.dyn_into()
			.map_err(|_| AnalysisError::Browser("response is not a Response".into()))?;

		let body = JsFuture::from(resp.text().map_err(AnalysisError::browser)?)
			.await
			.map_err(|e| AnalysisError::Network(format!("body error: {e:?}")))?
			.as_string()
			.unwrap_or_default();

		if !resp.ok() {
			return Err(AnalysisError::Rejected {
				status: resp.status(),
				detail: rejection_detail(&body).unwrap_or_else(|| resp.status_text()),
			});
		}

		let result = AnalysisResult::from_json_str(&body)?;
		info!(
			"analysis received: {} transactions, {} suspicious accounts, {} rings",
			result.transactions.len(),
			result.suspicious_accounts.len(),
			result.fraud_rings.len()
		);
		Ok(result)
	}
}

/// Pulls the reason out of a FastAPI error body (`{"detail": ...}`).
pub fn rejection_detail(body: &str) -> Option<String> {
	let value: Value = serde_json::from_str(body).ok()?;
	match value.get("detail")? {
		Value::String(s) if !s.is_empty() => Some(s.clone()),
		Value::Null => None,
		other => Some(other.to_string()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn detail_from_fastapi_body() {
		assert_eq!(
			rejection_detail(r#"{"detail": "Missing column: timestamp"}"#).as_deref(),
			Some("Missing column: timestamp")
		);
	}

	#[test]
	fn structured_detail_is_stringified() {
		assert_eq!(
			rejection_detail(r#"{"detail": [{"loc": ["body", "file"]}]}"#).as_deref(),
			Some(r#"[{"loc":["body","file"]}]"#)
		);
	}

	#[test]
	fn no_detail() {
		assert_eq!(rejection_detail("Internal Server Error"), None);
		assert_eq!(rejection_detail(r#"{"error": "x"}"#), None);
		assert_eq!(rejection_detail(r#"{"detail": ""}"#), None);
	}
}

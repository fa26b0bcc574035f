//! Failures of a single upload/download action.
//!
//! None of these are fatal to the app: each is reported once in the status
//! line and the previously rendered analysis stays on screen.

use thiserror::Error;

/// Why an upload, parse or download did not complete.
#[derive(Debug, Error)]
pub enum AnalysisError {
	/// Upload button pressed with no file chosen.
	#[error("Please select a CSV file")]
	NoFile,

	/// Response body was not JSON at all.
	#[error("analysis response is not valid JSON: {0}")]
	InvalidJson(#[from] serde_json::Error),

	/// Response was JSON but not an object at the top level.
	#[error("analysis response is a JSON {found}, expected an object")]
	NotAnObject {
		/// JSON type that was received instead.
		found: &'static str,
	},

	/// The request never produced a response.
	#[error("upload failed: {0}")]
	Network(String),

	/// The service answered with a non-success status.
	#[error("analysis service rejected the upload ({status}): {detail}")]
	Rejected {
		/// HTTP status code.
		status: u16,
		/// Reason given by the service, or the status text.
		detail: String,
	},

	/// Serializing a download artifact failed.
	#[error("could not export {artifact}: {source}")]
	Export {
		/// Artifact file name.
		artifact: &'static str,
		/// Underlying serializer error.
		source: serde_json::Error,
	},

	/// A DOM call needed for the action failed.
	#[error("browser error: {0}")]
	Browser(String),
}

impl AnalysisError {
	/// Wraps a rejected JS promise or DOM exception.
	pub fn browser(err: impl std::fmt::Debug) -> Self {
		Self::Browser(format!("{err:?}"))
	}
}

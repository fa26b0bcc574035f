//! Build-time settings.

/// Analysis service used when `MULE_API_URL` is not set at build time.
pub const DEFAULT_API_URL: &str = "https://money-muling-detection-6.onrender.com";

/// Settings shared through Leptos context.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
	/// Analysis service origin, without a trailing slash.
	pub api_base_url: String,
	/// Transfers above this amount are drawn as high-value edges.
	pub high_value_amount: f64,
	/// Account labels appear once the zoom factor exceeds this.
	pub label_zoom_threshold: f64,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self::with_api_url(DEFAULT_API_URL)
	}
}

impl AppConfig {
	/// Reads `MULE_API_URL` as captured by the compiler.
	pub fn from_env() -> Self {
		option_env!("MULE_API_URL")
			.filter(|url| !url.trim().is_empty())
			.map(Self::with_api_url)
			.unwrap_or_default()
	}

	fn with_api_url(url: &str) -> Self {
		Self {
			api_base_url: url.trim().trim_end_matches('/').to_string(),
			high_value_amount: 100_000.0,
			label_zoom_threshold: 2.5,
		}
	}
}

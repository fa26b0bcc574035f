//! Normalizes the analysis service response.
//!
//! The response shape is not under our control, so it is validated exactly
//! once here. Missing keys become empty collections, malformed entries are
//! dropped with a warning, and the untouched document is kept for export.

use log::warn;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::model::{FraudRing, SuspiciousAccount, Summary, Transaction};
use crate::error::AnalysisError;

/// Response of one analysis run, normalized.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnalysisResult {
	/// Uploaded transactions echoed back by the service.
	pub transactions: Vec<Transaction>,
	/// Individually flagged accounts.
	pub suspicious_accounts: Vec<SuspiciousAccount>,
	/// Detected rings, in the order the service listed them.
	pub fraud_rings: Vec<FraudRing>,
	/// Headline numbers.
	pub summary: Summary,
	/// The response exactly as received.
	pub raw: Value,
}

impl AnalysisResult {
	/// Parses a response body.
	pub fn from_json_str(body: &str) -> Result<Self, AnalysisError> {
		Self::from_value(serde_json::from_str(body)?)
	}

	/// Normalizes an already parsed response. Only a non-object top level is
	/// rejected; every key is optional.
	pub fn from_value(raw: Value) -> Result<Self, AnalysisError> {
		let Value::Object(root) = &raw else {
			return Err(AnalysisError::NotAnObject {
				found: json_type(&raw),
			});
		};

		Ok(Self {
			transactions: records(root, "transactions"),
			suspicious_accounts: records(root, "suspicious_accounts"),
			fraud_rings: records(root, "fraud_rings"),
			summary: summary(root),
			raw,
		})
	}

	/// True when the service returned nothing to show.
	pub fn is_empty(&self) -> bool {
		self.transactions.is_empty()
			&& self.suspicious_accounts.is_empty()
			&& self.fraud_rings.is_empty()
	}
}

fn records<T: DeserializeOwned>(root: &Map<String, Value>, key: &str) -> Vec<T> {
	match root.get(key) {
		None | Some(Value::Null) => Vec::new(),
		Some(Value::Array(items)) => items
			.iter()
			.enumerate()
			.filter_map(|(i, item)| {
				if !item.is_object() {
					warn!("{key}[{i}] is a JSON {}, skipping", json_type(item));
					return None;
				}
				serde_json::from_value(item.clone())
					.map_err(|e| warn!("{key}[{i}] skipped: {e}"))
					.ok()
			})
			.collect(),
		Some(other) => {
			warn!("`{key}` is a JSON {}, treating as empty", json_type(other));
			Vec::new()
		}
	}
}

fn summary(root: &Map<String, Value>) -> Summary {
	match root.get("summary") {
		Some(value @ Value::Object(_)) => serde_json::from_value(value.clone())
			.map_err(|e| warn!("`summary` ignored: {e}"))
			.unwrap_or_default(),
		None | Some(Value::Null) => Summary::default(),
		Some(other) => {
			warn!("`summary` is a JSON {}, ignoring", json_type(other));
			Summary::default()
		}
	}
}

fn json_type(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}

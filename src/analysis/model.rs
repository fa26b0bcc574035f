//! Records returned by the analysis service.
//!
//! Every field is defaulted on its own so a partially shaped record still
//! deserializes. Ids and amounts are coerced from the handful of JSON shapes
//! the backend is known to emit.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One money transfer between two accounts.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transaction {
	/// Sending account.
	#[serde(deserialize_with = "account_id")]
	pub sender_id: String,
	/// Receiving account.
	#[serde(deserialize_with = "account_id")]
	pub receiver_id: String,
	/// Transferred amount.
	#[serde(deserialize_with = "amount")]
	pub amount: f64,
	/// Row identifier from the uploaded CSV, when echoed back.
	#[serde(deserialize_with = "optional_text", skip_serializing_if = "Option::is_none")]
	pub transaction_id: Option<String>,
	/// Timestamp column as the backend rendered it.
	#[serde(deserialize_with = "optional_text", skip_serializing_if = "Option::is_none")]
	pub timestamp: Option<String>,
}

impl Transaction {
	/// Shorthand for a transfer without the optional CSV columns.
	pub fn new(sender_id: impl Into<String>, receiver_id: impl Into<String>, amount: f64) -> Self {
		Self {
			sender_id: sender_id.into(),
			receiver_id: receiver_id.into(),
			amount,
			..Self::default()
		}
	}
}

/// An account flagged individually by the detector.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "SuspiciousAccountRecord")]
pub struct SuspiciousAccount {
	/// Flagged account.
	pub account_id: String,
	/// Risk score, 0-100. Read from `risk_score`, else from the backend's
	/// `suspicion_score`.
	pub risk_score: f64,
	/// Ring the detector associated with this account, if any.
	pub ring_id: Option<String>,
	/// Pattern names that contributed to the score.
	pub detected_patterns: Vec<String>,
	/// Human readable reason for the flag.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub explanation: Option<String>,
}

/// Wire shape of a suspicious account. Both score keys may be present.
#[derive(Default, Deserialize)]
#[serde(default)]
struct SuspiciousAccountRecord {
	#[serde(deserialize_with = "account_id")]
	account_id: String,
	#[serde(deserialize_with = "optional_amount")]
	risk_score: Option<f64>,
	#[serde(deserialize_with = "optional_amount")]
	suspicion_score: Option<f64>,
	#[serde(deserialize_with = "optional_text")]
	ring_id: Option<String>,
	#[serde(deserialize_with = "text_list")]
	detected_patterns: Vec<String>,
	#[serde(deserialize_with = "optional_text")]
	explanation: Option<String>,
}

impl From<SuspiciousAccountRecord> for SuspiciousAccount {
	fn from(record: SuspiciousAccountRecord) -> Self {
		Self {
			account_id: record.account_id,
			risk_score: record.risk_score.or(record.suspicion_score).unwrap_or(0.0),
			ring_id: record.ring_id,
			detected_patterns: record.detected_patterns,
			explanation: record.explanation,
		}
	}
}

/// A group of accounts flagged together.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FraudRing {
	/// Ring identifier, e.g. `RING_001`. Missing and empty ids are `None`.
	#[serde(deserialize_with = "optional_text")]
	pub ring_id: Option<String>,
	/// Detector pattern that produced the ring (`cycle`, `smurfing`, ...).
	#[serde(deserialize_with = "account_id")]
	pub pattern_type: String,
	/// Accounts belonging to the ring.
	#[serde(deserialize_with = "text_list")]
	pub member_accounts: Vec<String>,
	/// Mean member score, when the backend computed one.
	#[serde(deserialize_with = "optional_amount", skip_serializing_if = "Option::is_none")]
	pub risk_score: Option<f64>,
}

impl FraudRing {
	/// Ring with the given members and no score. An empty id means no id.
	pub fn new(ring_id: impl Into<String>, pattern_type: impl Into<String>, members: &[&str]) -> Self {
		Self {
			ring_id: Some(ring_id.into()).filter(|id| !id.is_empty()),
			pattern_type: pattern_type.into(),
			member_accounts: members.iter().map(|m| m.to_string()).collect(),
			risk_score: None,
		}
	}
}

/// Headline numbers for the run. Absent fields display as zero.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Summary {
	/// Distinct accounts the detector saw.
	#[serde(deserialize_with = "optional_amount")]
	pub total_accounts_analyzed: Option<f64>,
	/// Accounts that ended up in `suspicious_accounts`.
	#[serde(deserialize_with = "optional_amount")]
	pub suspicious_accounts_flagged: Option<f64>,
	/// Rings that ended up in `fraud_rings`.
	#[serde(deserialize_with = "optional_amount")]
	pub fraud_rings_detected: Option<f64>,
	/// Wall time the backend spent on the upload.
	#[serde(deserialize_with = "optional_amount")]
	pub processing_time_seconds: Option<f64>,
}

/// Renders a scalar as the string a JS template literal would produce.
fn scalar_text(value: &Value) -> Option<String> {
	match value {
		Value::String(s) => Some(s.clone()),
		Value::Number(n) => Some(n.to_string()),
		Value::Bool(b) => Some(b.to_string()),
		_ => None,
	}
}

fn scalar_number(value: &Value) -> Option<f64> {
	match value {
		Value::Number(n) => n.as_f64(),
		Value::String(s) => s.trim().parse().ok(),
		_ => None,
	}
}

fn account_id<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
	Ok(scalar_text(&Value::deserialize(de)?).unwrap_or_default())
}

fn optional_text<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
	Ok(scalar_text(&Value::deserialize(de)?).filter(|s| !s.is_empty()))
}

fn amount<'de, D: Deserializer<'de>>(de: D) -> Result<f64, D::Error> {
	Ok(scalar_number(&Value::deserialize(de)?).unwrap_or(0.0))
}

fn optional_amount<'de, D: Deserializer<'de>>(de: D) -> Result<Option<f64>, D::Error> {
	Ok(scalar_number(&Value::deserialize(de)?))
}

fn text_list<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<String>, D::Error> {
	Ok(match Value::deserialize(de)? {
		Value::Array(items) => items.iter().filter_map(scalar_text).collect(),
		_ => Vec::new(),
	})
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use serde_json::json;

	use super::*;

	#[test]
	fn numeric_ids_and_string_amounts_are_coerced() {
		let tx: Transaction = serde_json::from_value(json!({
			"sender_id": 1001,
			"receiver_id": "ACC_2",
			"amount": "250.5",
			"transaction_id": "TX1",
		}))
		.unwrap();
		assert_eq!(tx.sender_id, "1001");
		assert_eq!(tx.receiver_id, "ACC_2");
		assert_eq!(tx.amount, 250.5);
		assert_eq!(tx.transaction_id.as_deref(), Some("TX1"));
		assert_eq!(tx.timestamp, None);
	}

	#[test]
	fn garbage_amount_becomes_zero() {
		let tx: Transaction =
			serde_json::from_value(json!({"sender_id": "A", "receiver_id": "B", "amount": "lots"}))
				.unwrap();
		assert_eq!(tx.amount, 0.0);
	}

	#[test]
	fn suspicion_score_is_read_as_risk_score() {
		let acc: SuspiciousAccount = serde_json::from_value(json!({
			"account_id": "A",
			"suspicion_score": 87.5,
			"detected_patterns": ["cycle_length_3", "high_velocity"],
			"ring_id": "RING_001",
		}))
		.unwrap();
		assert_eq!(acc.risk_score, 87.5);
		assert_eq!(acc.ring_id.as_deref(), Some("RING_001"));
		assert_eq!(acc.detected_patterns, vec!["cycle_length_3", "high_velocity"]);
	}

	#[test]
	fn risk_score_wins_over_suspicion_score() {
		let both: SuspiciousAccount = serde_json::from_value(json!({
			"account_id": "A",
			"risk_score": 90,
			"suspicion_score": 40,
		}))
		.unwrap();
		assert_eq!(both.account_id, "A");
		assert_eq!(both.risk_score, 90.0);

		let bad_primary: SuspiciousAccount = serde_json::from_value(json!({
			"account_id": "B",
			"risk_score": null,
			"suspicion_score": "55.5",
		}))
		.unwrap();
		assert_eq!(bad_primary.risk_score, 55.5);
	}

	#[test]
	fn any_object_with_an_account_id_deserializes() {
		let acc: SuspiciousAccount = serde_json::from_value(json!({
			"account_id": 7,
			"risk_score": {"nested": true},
			"suspicion_score": [1, 2],
			"ring_id": false,
			"detected_patterns": "cycle",
			"explanation": 3,
			"unknown": null,
		}))
		.unwrap();
		assert_eq!(acc.account_id, "7");
		assert_eq!(acc.risk_score, 0.0);
		assert_eq!(acc.ring_id.as_deref(), Some("false"));
		assert!(acc.detected_patterns.is_empty());
		assert_eq!(acc.explanation.as_deref(), Some("3"));
	}

	#[test]
	fn null_and_empty_ring_ids_are_absent() {
		let a: SuspiciousAccount =
			serde_json::from_value(json!({"account_id": "A", "ring_id": null})).unwrap();
		let b: SuspiciousAccount =
			serde_json::from_value(json!({"account_id": "B", "ring_id": ""})).unwrap();
		assert_eq!(a.ring_id, None);
		assert_eq!(b.ring_id, None);
	}

	#[test]
	fn ring_without_members_has_empty_membership() {
		let ring: FraudRing =
			serde_json::from_value(json!({"ring_id": "R1", "pattern_type": "layering"})).unwrap();
		assert_eq!(ring, FraudRing::new("R1", "layering", &[]));
	}

	#[test]
	fn missing_and_empty_fraud_ring_ids_are_none() {
		let missing: FraudRing =
			serde_json::from_value(json!({"pattern_type": "cycle", "member_accounts": ["A"]})).unwrap();
		let empty: FraudRing =
			serde_json::from_value(json!({"ring_id": "", "member_accounts": ["B"]})).unwrap();
		let numeric: FraudRing = serde_json::from_value(json!({"ring_id": 12})).unwrap();
		assert_eq!(missing.ring_id, None);
		assert_eq!(missing.member_accounts, vec!["A"]);
		assert_eq!(empty.ring_id, None);
		assert_eq!(numeric.ring_id.as_deref(), Some("12"));
		assert_eq!(FraudRing::new("", "cycle", &["A"]).ring_id, None);
	}

	#[test]
	fn summary_fields_are_optional() {
		let summary: Summary =
			serde_json::from_value(json!({"fraud_rings_detected": 3, "other": true})).unwrap();
		assert_eq!(summary.fraud_rings_detected, Some(3.0));
		assert_eq!(summary.total_accounts_analyzed, None);
	}
}

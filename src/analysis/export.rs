//! Downloadable JSON artifacts.
//!
//! Artifacts are cut from the raw response so nothing is added or lost, and
//! printed byte for byte the way `JSON.stringify(value, null, 2)` prints
//! them. Keys keep their received order except that integer-like keys come
//! first in ascending order, as JS objects enumerate them. Numbers use the
//! ES `Number::toString` form, so `90.0` prints as `90`, `1e-6` as
//! `0.000001` and `1e21` as `1e+21`. Integers beyond 2^53 are rounded to
//! the nearest double first, as a JS client would have parsed them.

use std::io;

use serde::Serialize;
use serde::ser::Error as _;
use serde_json::ser::{Formatter, PrettyFormatter};
use serde_json::{Map, Value};

use super::adapter::AnalysisResult;
use crate::error::AnalysisError;

/// What to download.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Artifact {
	/// The whole response.
	FullResponse,
	/// The `fraud_rings` array.
	FraudRings,
	/// The `suspicious_accounts` array.
	SuspiciousAccounts,
}

impl Artifact {
	/// Download file name.
	pub fn file_name(self) -> &'static str {
		match self {
			Self::FullResponse => "analysis.json",
			Self::FraudRings => "fraud_rings.json",
			Self::SuspiciousAccounts => "suspicious_accounts.json",
		}
	}

	/// Selects the artifact's value from a raw response. A missing array
	/// exports as `[]`, the same fallback the tables use.
	pub fn select(self, raw: &Value) -> Value {
		let key = match self {
			Self::FullResponse => return raw.clone(),
			Self::FraudRings => "fraud_rings",
			Self::SuspiciousAccounts => "suspicious_accounts",
		};
		match raw.get(key) {
			None | Some(Value::Null) => Value::Array(Vec::new()),
			Some(value) => value.clone(),
		}
	}

	/// Renders the artifact text.
	pub fn render(self, result: &AnalysisResult) -> Result<String, AnalysisError> {
		to_pretty_json(&self.select(&result.raw)).map_err(|source| AnalysisError::Export {
			artifact: self.file_name(),
			source,
		})
	}
}

/// Two-space indented JSON with JS key order and number formatting.
pub fn to_pretty_json(value: &Value) -> serde_json::Result<String> {
	let mut out = Vec::new();
	let mut ser = serde_json::Serializer::with_formatter(&mut out, JsFormatter::default());
	js_key_order(value).serialize(&mut ser)?;
	String::from_utf8(out).map_err(serde_json::Error::custom)
}

/// Moves array-index keys (`"0"` to `"4294967294"`) to the front of every
/// object in ascending numeric order. Other keys keep their order.
fn js_key_order(value: &Value) -> Value {
	match value {
		Value::Array(items) => Value::Array(items.iter().map(js_key_order).collect()),
		Value::Object(map) => {
			let mut indexed: Vec<(u32, &String, &Value)> = Vec::new();
			let mut named: Vec<(&String, &Value)> = Vec::new();
			for (key, v) in map {
				match array_index(key) {
					Some(i) => indexed.push((i, key, v)),
					None => named.push((key, v)),
				}
			}
			indexed.sort_by_key(|(i, _, _)| *i);

			let mut ordered = Map::with_capacity(map.len());
			for (key, v) in indexed.into_iter().map(|(_, k, v)| (k, v)).chain(named) {
				ordered.insert(key.clone(), js_key_order(v));
			}
			Value::Object(ordered)
		}
		other => other.clone(),
	}
}

fn array_index(key: &str) -> Option<u32> {
	key.parse::<u32>()
		.ok()
		.filter(|i| *i != u32::MAX && i.to_string() == key)
}

/// ES `Number::prototype.toString` for a finite double.
fn js_number(value: f64) -> String {
	if value == 0.0 {
		return "0".into();
	}
	let sign = if value < 0.0 { "-" } else { "" };
	// Rust prints the shortest round-tripping digits, like ES does.
	let sci = format!("{:e}", value.abs());
	let Some((mantissa, exp)) = sci.split_once('e') else {
		return format!("{sign}{sci}");
	};
	let digits = mantissa.replace('.', "");
	let k = digits.len() as i32;
	let n = exp.parse::<i32>().unwrap_or_default() + 1;

	let body = if k <= n && n <= 21 {
		format!("{digits}{}", "0".repeat((n - k) as usize))
	} else if 0 < n && n <= 21 {
		let (int, frac) = digits.split_at(n as usize);
		format!("{int}.{frac}")
	} else if -6 < n && n <= 0 {
		format!("0.{}{digits}", "0".repeat(-n as usize))
	} else {
		let e = n - 1;
		let e = if e < 0 { format!("-{}", -e) } else { format!("+{e}") };
		match digits.split_at(1) {
			(first, "") => format!("{first}e{e}"),
			(first, rest) => format!("{first}.{rest}e{e}"),
		}
	};
	format!("{sign}{body}")
}

/// Pretty printer with JS number output.
#[derive(Default)]
struct JsFormatter {
	pretty: PrettyFormatter<'static>,
}

impl JsFormatter {
	const SAFE_INT: u64 = (1 << 53) - 1;

	fn write_js<W: ?Sized + io::Write>(writer: &mut W, value: f64) -> io::Result<()> {
		writer.write_all(js_number(value).as_bytes())
	}
}

impl Formatter for JsFormatter {
	fn write_f64<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: f64) -> io::Result<()> {
		Self::write_js(writer, value)
	}

	fn write_u64<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: u64) -> io::Result<()> {
		if value > Self::SAFE_INT {
			return Self::write_js(writer, value as f64);
		}
		write!(writer, "{value}")
	}

	fn write_i64<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: i64) -> io::Result<()> {
		if value.unsigned_abs() > Self::SAFE_INT {
			return Self::write_js(writer, value as f64);
		}
		write!(writer, "{value}")
	}

	fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
		self.pretty.begin_array(writer)
	}

	fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
		self.pretty.end_array(writer)
	}

	fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
		self.pretty.begin_array_value(writer, first)
	}

	fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
		self.pretty.end_array_value(writer)
	}

	fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
		self.pretty.begin_object(writer)
	}

	fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
		self.pretty.end_object(writer)
	}

	fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
		self.pretty.begin_object_key(writer, first)
	}

	fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
		self.pretty.begin_object_value(writer)
	}

	fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
		self.pretty.end_object_value(writer)
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use serde_json::json;

	use super::*;

	fn result(raw: Value) -> AnalysisResult {
		AnalysisResult::from_value(raw).unwrap()
	}

	#[test]
	fn fraud_rings_artifact_is_the_array_only() {
		let res = result(json!({
			"suspicious_accounts": [],
			"fraud_rings": [{"ring_id": "R1", "member_accounts": ["A", "B"], "pattern_type": "cycle", "risk_score": 80.0}],
			"summary": {"fraud_rings_detected": 1},
		}));
		let text = Artifact::FraudRings.render(&res).unwrap();
		assert_eq!(
			text,
			"[\n  {\n    \"ring_id\": \"R1\",\n    \"member_accounts\": [\n      \"A\",\n      \"B\"\n    ],\n    \"pattern_type\": \"cycle\",\n    \"risk_score\": 80\n  }\n]"
		);
	}

	#[test]
	fn key_order_is_preserved() {
		let res = result(json!({"z": 1, "a": 2, "m": {"y": true, "b": null}}));
		assert_eq!(
			Artifact::FullResponse.render(&res).unwrap(),
			"{\n  \"z\": 1,\n  \"a\": 2,\n  \"m\": {\n    \"y\": true,\n    \"b\": null\n  }\n}"
		);
	}

	#[test]
	fn missing_array_exports_empty() {
		let res = result(json!({}));
		assert_eq!(Artifact::SuspiciousAccounts.render(&res).unwrap(), "[]");
		assert_eq!(Artifact::FullResponse.render(&res).unwrap(), "{}");
	}

	#[test]
	fn fractional_numbers_are_untouched() {
		assert_eq!(to_pretty_json(&json!([76.67, 0.5, -3])).unwrap(), "[\n  76.67,\n  0.5,\n  -3\n]");
	}

	#[test]
	fn numbers_print_like_js() {
		assert_eq!(
			to_pretty_json(&json!([1e-6, 1e16, 1e21, 1.5e-7, 123456789012345680000.0, -0.0, -2.5e-3, 90.0])).unwrap(),
			"[\n  0.000001,\n  10000000000000000,\n  1e+21,\n  1.5e-7,\n  123456789012345680000,\n  0,\n  -0.0025,\n  90\n]"
		);
	}

	#[test]
	fn unsafe_integers_round_like_js() {
		assert_eq!(to_pretty_json(&json!(u64::MAX)).unwrap(), "18446744073709552000");
		assert_eq!(to_pretty_json(&json!(9_007_199_254_740_991u64)).unwrap(), "9007199254740991");
		assert_eq!(to_pretty_json(&json!(-12)).unwrap(), "-12");
	}

	#[test]
	fn integer_keys_enumerate_first() {
		let res = result(json!({"b": 1, "10": 2, "2": 3, "a": {"1": true, "x": null, "0": false}, "01": 5, "4294967295": 6}));
		assert_eq!(
			Artifact::FullResponse.render(&res).unwrap(),
			"{\n  \"2\": 3,\n  \"10\": 2,\n  \"b\": 1,\n  \"a\": {\n    \"0\": false,\n    \"1\": true,\n    \"x\": null\n  },\n  \"01\": 5,\n  \"4294967295\": 6\n}"
		);
	}

	#[test]
	fn file_names() {
		assert_eq!(Artifact::FullResponse.file_name(), "analysis.json");
		assert_eq!(Artifact::FraudRings.file_name(), "fraud_rings.json");
		assert_eq!(Artifact::SuspiciousAccounts.file_name(), "suspicious_accounts.json");
	}
}

use mule_graph_dashboard::analysis::{
	AccountGraph, AccountNode, AnalysisResult, Artifact, TransferLink,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn node(id: &str, suspicious: bool, ring: Option<&str>, risk_score: Option<f64>) -> AccountNode {
	AccountNode {
		id: id.into(),
		suspicious,
		ring: ring.map(Into::into),
		risk_score,
	}
}

fn link(source: &str, target: &str, amount: f64) -> TransferLink {
	TransferLink {
		source: source.into(),
		target: target.into(),
		amount,
	}
}

fn graph_of(response: serde_json::Value) -> AccountGraph {
	AccountGraph::from_analysis(&AnalysisResult::from_value(response).unwrap())
}

#[test]
fn single_transfer_without_flags() {
	let graph = graph_of(json!({
		"transactions": [{"sender_id": "A", "receiver_id": "B", "amount": 500}],
		"suspicious_accounts": [],
		"fraud_rings": [],
	}));

	assert_eq!(
		graph,
		AccountGraph {
			nodes: vec![node("A", false, None, None), node("B", false, None, None)],
			links: vec![link("A", "B", 500.0)],
		}
	);
}

#[test]
fn suspicious_ring_member_is_annotated() {
	let graph = graph_of(json!({
		"transactions": [{"sender_id": "A", "receiver_id": "B", "amount": 500}],
		"suspicious_accounts": [{"account_id": "A", "risk_score": 90, "ring_id": "R1"}],
		"fraud_rings": [{"ring_id": "R1", "pattern_type": "layering", "member_accounts": ["A"]}],
	}));

	assert_eq!(graph.nodes[0], node("A", true, Some("R1"), Some(90.0)));
	assert_eq!(graph.nodes[1], node("B", false, None, None));
}

#[test]
fn no_transactions_means_no_graph() {
	let graph = graph_of(json!({
		"transactions": [],
		"suspicious_accounts": [{"account_id": "A", "risk_score": 90, "ring_id": "R1"}],
		"fraud_rings": [{"ring_id": "R1", "pattern_type": "cycle", "member_accounts": ["A", "B"]}],
	}));

	assert_eq!(graph, AccountGraph::default());
}

#[test]
fn repeated_transfers_are_not_merged() {
	let graph = graph_of(json!({
		"transactions": [
			{"sender_id": "A", "receiver_id": "B", "amount": 100},
			{"sender_id": "A", "receiver_id": "B", "amount": 250.5},
		],
	}));

	assert_eq!(graph.nodes.len(), 2);
	assert_eq!(graph.links, vec![link("A", "B", 100.0), link("A", "B", 250.5)]);
}

#[test]
fn fraud_rings_download_matches_js_stringify() {
	let response = json!({
		"suspicious_accounts": [{"account_id": "A", "suspicion_score": 90.0, "ring_id": "RING_001"}],
		"fraud_rings": [
			{"ring_id": "RING_001", "member_accounts": ["A", "B"], "pattern_type": "cycle", "risk_score": 72.5},
			{"ring_id": "RING_002", "member_accounts": [], "pattern_type": "smurfing", "risk_score": 0.0}
		],
		"summary": {"fraud_rings_detected": 2},
	});
	let result = AnalysisResult::from_value(response).unwrap();

	let expected = r#"[
  {
    "ring_id": "RING_001",
    "member_accounts": [
      "A",
      "B"
    ],
    "pattern_type": "cycle",
    "risk_score": 72.5
  },
  {
    "ring_id": "RING_002",
    "member_accounts": [],
    "pattern_type": "smurfing",
    "risk_score": 0
  }
]"#;
	assert_eq!(Artifact::FraudRings.render(&result).unwrap(), expected);
}

#[test]
fn missing_keys_default_to_empty() {
	let result = AnalysisResult::from_value(json!({"summary": {"processing_time_seconds": 1.5}})).unwrap();
	assert!(result.is_empty());
	assert_eq!(AccountGraph::from_analysis(&result), AccountGraph::default());
	assert_eq!(Artifact::FraudRings.render(&result).unwrap(), "[]");
}

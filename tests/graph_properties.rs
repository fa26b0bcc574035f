use std::collections::{HashMap, HashSet};

use mule_graph_dashboard::analysis::{
	DEFAULT_RING_COLOR, FraudRing, RING_PALETTE, SuspiciousAccount, Transaction, build_graph,
	ring_color,
};
use proptest::prelude::*;

fn account_strategy() -> impl Strategy<Value = String> {
	prop_oneof![
		Just("A"),
		Just("B"),
		Just("C"),
		Just("D"),
		Just("E"),
		Just("F"),
		Just("G"),
		Just("H")
	]
	.prop_map(String::from)
}

fn transactions_strategy() -> impl Strategy<Value = Vec<Transaction>> {
	proptest::collection::vec(
		(account_strategy(), account_strategy(), 0.0..1_000_000.0f64)
			.prop_map(|(s, r, amount)| Transaction::new(s, r, amount)),
		0..40,
	)
}

fn suspicious_strategy() -> impl Strategy<Value = Vec<SuspiciousAccount>> {
	proptest::collection::vec(
		(account_strategy(), 0.0..100.0f64).prop_map(|(account_id, risk_score)| SuspiciousAccount {
			account_id,
			risk_score,
			..SuspiciousAccount::default()
		}),
		0..6,
	)
}

/// Ring ids as the backend may send them: named, missing or empty.
fn ring_id_strategy() -> impl Strategy<Value = Option<String>> {
	prop_oneof![
		3 => (0..4u32).prop_map(|i| Some(format!("RING_{i:03}"))),
		1 => Just(None),
		1 => Just(Some(String::new())),
	]
}

fn rings_strategy() -> impl Strategy<Value = Vec<FraudRing>> {
	proptest::collection::vec(
		(ring_id_strategy(), proptest::collection::vec(account_strategy(), 0..5)),
		0..4,
	)
	.prop_map(|rings| {
		rings
			.into_iter()
			.map(|(ring_id, member_accounts)| FraudRing {
				ring_id,
				pattern_type: "cycle".into(),
				member_accounts,
				risk_score: None,
			})
			.collect()
	})
}

proptest! {
	#[test]
	fn nodes_are_the_distinct_endpoints(txs in transactions_strategy()) {
		let graph = build_graph(&txs, &[], &[]);

		let expected: HashSet<&str> = txs
			.iter()
			.flat_map(|t| [t.sender_id.as_str(), t.receiver_id.as_str()])
			.collect();
		let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
		let unique: HashSet<&str> = ids.iter().copied().collect();

		prop_assert_eq!(ids.len(), unique.len());
		prop_assert_eq!(unique, expected);
		prop_assert_eq!(graph.links.len(), txs.len());
		prop_assert!(graph.nodes.len() <= 2 * txs.len());
	}

	#[test]
	fn links_have_nodes_and_keep_order(txs in transactions_strategy()) {
		let graph = build_graph(&txs, &[], &[]);
		for (tx, link) in txs.iter().zip(&graph.links) {
			prop_assert_eq!(&link.source, &tx.sender_id);
			prop_assert_eq!(&link.target, &tx.receiver_id);
			prop_assert_eq!(link.amount, tx.amount);
			prop_assert!(graph.node(&link.source).is_some());
			prop_assert!(graph.node(&link.target).is_some());
		}
	}

	#[test]
	fn building_twice_is_identical(
		txs in transactions_strategy(),
		suspicious in suspicious_strategy(),
		rings in rings_strategy(),
	) {
		prop_assert_eq!(
			build_graph(&txs, &suspicious, &rings),
			build_graph(&txs, &suspicious, &rings)
		);
	}

	#[test]
	fn annotations_match_lookups(
		txs in transactions_strategy(),
		suspicious in suspicious_strategy(),
		rings in rings_strategy(),
	) {
		let graph = build_graph(&txs, &suspicious, &rings);
		let flagged: HashSet<&str> = suspicious.iter().map(|s| s.account_id.as_str()).collect();

		let mut listings: HashMap<&str, Vec<Option<&str>>> = HashMap::new();
		for ring in &rings {
			for member in &ring.member_accounts {
				let id = ring.ring_id.as_deref().filter(|id| !id.is_empty());
				listings.entry(member.as_str()).or_default().push(id);
			}
		}

		for node in &graph.nodes {
			prop_assert_eq!(node.suspicious, flagged.contains(node.id.as_str()));
			prop_assert_eq!(node.risk_score.is_some(), node.suspicious);
			prop_assert_ne!(node.ring.as_deref(), Some(""));
			match listings.get(node.id.as_str()) {
				None => prop_assert_eq!(node.ring.as_deref(), None),
				Some(ids) => prop_assert_eq!(node.ring.as_deref(), ids.last().copied().flatten()),
			}
		}
	}

	#[test]
	fn ring_colors_are_stable(id in "[A-Z_0-9]{1,12}") {
		let color = ring_color(Some(&id));
		prop_assert_eq!(color, ring_color(Some(&id)));
		prop_assert!(RING_PALETTE.contains(&color));
		prop_assert_eq!(ring_color(None), DEFAULT_RING_COLOR);
	}
}

//! Account graph built from an analysis result.
//!
//! Nodes are accounts, edges are transfers. The graph is a multigraph: two
//! transfers between the same pair stay two edges. Only transaction endpoints
//! become nodes, so a flagged account that never moved money is not drawn.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Serialize;

use super::adapter::AnalysisResult;
use super::model::{FraudRing, SuspiciousAccount, Transaction};

/// An account in the graph.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AccountNode {
	/// Account id, unique within the graph.
	pub id: String,
	/// Listed in the suspicious accounts.
	pub suspicious: bool,
	/// Ring that lists this account as a member.
	pub ring: Option<String>,
	/// Score of the matching suspicious account entry.
	#[serde(rename = "riskScore", skip_serializing_if = "Option::is_none")]
	pub risk_score: Option<f64>,
}

/// A directed transfer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TransferLink {
	/// Sending account id.
	pub source: String,
	/// Receiving account id.
	pub target: String,
	/// Transferred amount.
	pub amount: f64,
}

/// Nodes in first-seen order and links in transaction order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AccountGraph {
	/// One entry per distinct account id.
	pub nodes: Vec<AccountNode>,
	/// One entry per transaction.
	pub links: Vec<TransferLink>,
}

impl AccountGraph {
	/// Builds the graph for a normalized response.
	pub fn from_analysis(result: &AnalysisResult) -> Self {
		build_graph(
			&result.transactions,
			&result.suspicious_accounts,
			&result.fraud_rings,
		)
	}

	/// Looks up a node by account id.
	pub fn node(&self, id: &str) -> Option<&AccountNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// True when there is nothing to draw.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}

/// Maps each ring member to its ring. Rings are applied in order, so an
/// account listed in several rings ends up in the last one. A ring without
/// an id still claims its members, leaving them with no ring.
fn ring_membership(rings: &[FraudRing]) -> HashMap<&str, Option<&str>> {
	rings
		.iter()
		.flat_map(|ring| {
			ring.member_accounts
				.iter()
				.map(move |member| {
					(member.as_str(), ring.ring_id.as_deref().filter(|id| !id.is_empty()))
				})
		})
		.collect()
}

/// Suspicious account ids with their score; a repeated id keeps the last score.
fn suspicious_scores(accounts: &[SuspiciousAccount]) -> HashMap<&str, f64> {
	accounts
		.iter()
		.map(|acc| (acc.account_id.as_str(), acc.risk_score))
		.collect()
}

/// Builds nodes and links in a single pass over `transactions`.
pub fn build_graph(
	transactions: &[Transaction],
	suspicious: &[SuspiciousAccount],
	rings: &[FraudRing],
) -> AccountGraph {
	let membership = ring_membership(rings);
	let scores = suspicious_scores(suspicious);

	let annotate = |id: &str| {
		let score = scores.get(id).copied();
		AccountNode {
			id: id.to_string(),
			suspicious: score.is_some(),
			ring: membership.get(id).copied().flatten().map(str::to_string),
			risk_score: score,
		}
	};

	let mut nodes: IndexMap<&str, AccountNode> = IndexMap::new();
	let mut links = Vec::with_capacity(transactions.len());

	for tx in transactions {
		for id in [tx.sender_id.as_str(), tx.receiver_id.as_str()] {
			nodes.entry(id).or_insert_with(|| annotate(id));
		}
		links.push(TransferLink {
			source: tx.sender_id.clone(),
			target: tx.receiver_id.clone(),
			amount: tx.amount,
		});
	}

	AccountGraph {
		nodes: nodes.into_values().collect(),
		links,
	}
}

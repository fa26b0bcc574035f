//! Turns an analysis service response into the account graph.
//!
//! Nothing here touches the DOM, so it all runs under `cargo test`.

pub mod adapter;
pub mod color;
pub mod export;
pub mod graph;
pub mod model;

pub use adapter::AnalysisResult;
pub use color::{DEFAULT_RING_COLOR, RING_PALETTE, ring_color};
pub use export::Artifact;
pub use graph::{AccountGraph, AccountNode, TransferLink, build_graph};
pub use model::{FraudRing, Summary, SuspiciousAccount, Transaction};

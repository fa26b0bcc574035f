pub mod dashboard;
pub mod force_graph;
pub mod info_panel;
pub mod node_table;
pub mod upload;

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use crate::analysis::{AccountGraph, AccountNode, DEFAULT_RING_COLOR, ring_color};
use crate::config::AppConfig;

pub const SUSPICIOUS_COLOR: &str = "#ff2d2d";
pub const HIT_RADIUS: f64 = 12.0;
/// Extra radius of the hovered or selected node.
pub const ACTIVE_GROWTH: f64 = 3.0;

/// How an account is drawn.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeInfo {
	pub id: String,
	pub color: &'static str,
	pub radius: f64,
	pub outlined: bool,
}

impl NodeInfo {
	/// Suspicious accounts win over ring membership.
	pub fn for_account(node: &AccountNode) -> Self {
		let (color, radius) = if node.suspicious {
			(SUSPICIOUS_COLOR, 8.0)
		} else if node.ring.is_some() {
			(ring_color(node.ring.as_deref()), 5.0)
		} else {
			(DEFAULT_RING_COLOR, 3.0)
		};
		Self {
			id: node.id.clone(),
			color,
			radius,
			outlined: node.suspicious,
		}
	}
}

/// A transfer between two simulation nodes.
#[derive(Clone, Debug)]
pub struct LinkInfo {
	pub source: DefaultNodeIdx,
	pub target: DefaultNodeIdx,
	pub high_value: bool,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub moved: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub links: Vec<LinkInfo>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub selected: Option<DefaultNodeIdx>,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
	pub label_zoom: f64,
	high_value_amount: f64,
}

fn simulation() -> ForceGraph<NodeInfo, ()> {
	ForceGraph::new(SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	})
}

impl ForceGraphState {
	pub fn new(data: &AccountGraph, width: f64, height: f64, config: &AppConfig) -> Self {
		let mut state = Self {
			graph: simulation(),
			links: Vec::new(),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			selected: None,
			width,
			height,
			flow_time: 0.0,
			label_zoom: config.label_zoom_threshold,
			high_value_amount: config.high_value_amount,
		};
		state.load(data);
		state
	}

	/// Replaces the simulated graph, keeping the viewport.
	pub fn load(&mut self, data: &AccountGraph) {
		self.graph = simulation();
		self.links.clear();
		self.drag = DragState::default();
		self.pan = PanState::default();
		self.hover = HoverState::default();
		self.selected = None;
		self.flow_time = 0.0;

		let mut id_to_idx = HashMap::new();
		for (i, node) in data.nodes.iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
			let idx = self.graph.add_node(NodeData {
				x: (100.0 * angle.cos()) as f32,
				y: (100.0 * angle.sin()) as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo::for_account(node),
			});
			id_to_idx.insert(node.id.as_str(), idx);
		}

		// Parallel transfers share one spring; self-loops get none.
		let mut springs = HashSet::new();
		for link in &data.links {
			let (Some(&src), Some(&tgt)) = (
				id_to_idx.get(link.source.as_str()),
				id_to_idx.get(link.target.as_str()),
			) else {
				continue;
			};
			if src != tgt && springs.insert((src, tgt)) {
				self.graph.add_edge(src, tgt, EdgeData::default());
			}
			self.links.push(LinkInfo {
				source: src,
				target: tgt,
				high_value: link.amount > self.high_value_amount,
			});
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// HIT_RADIUS is in world-space, scales with zoom like nodes
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS {
				found = Some(node.index());
			}
		});
		found
	}

	/// Account id of a simulation node.
	pub fn account_id(&self, idx: DefaultNodeIdx) -> Option<String> {
		let mut id = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				id = Some(node.data.user_data.id.clone());
			}
		});
		id
	}

	/// Position and radius of every node, for drawing links.
	pub fn positions(&self) -> HashMap<DefaultNodeIdx, (f64, f64, f64)> {
		let mut positions = HashMap::new();
		self.graph.visit_nodes(|node| {
			positions.insert(
				node.index(),
				(node.x() as f64, node.y() as f64, node.data.user_data.radius),
			);
		});
		positions
	}

	/// Returns whether the hovered node changed.
	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) -> bool {
		if self.hover.node == node {
			return false;
		}
		let was_hovering = self.hover.node.is_some();

		// Save previous state for fade-out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for link in &self.links {
				if link.source == idx {
					self.hover.neighbors.insert(link.target);
				} else if link.target == idx {
					self.hover.neighbors.insert(link.source);
				}
			}
		}
		true
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn is_selected(&self, idx: DefaultNodeIdx) -> bool {
		self.selected == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.flow_time += dt as f64;

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	/// Follows a container size change, keeping the view centred on the same
	/// graph point. Returns false when the size is unchanged.
	pub fn resize(&mut self, width: f64, height: f64) -> bool {
		if width == self.width && height == self.height {
			return false;
		}
		self.transform.x += (width - self.width) / 2.0;
		self.transform.y += (height - self.height) / 2.0;
		self.width = width;
		self.height = height;
		true
	}
}

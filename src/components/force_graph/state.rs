//! Canvas-side state: the physics simulation of the visible subgraph plus camera and pointer tracking.

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::debug;

use super::scale::{ScaleConfig, ScaledValues};
use crate::config::SimulationConfig;
use crate::encoding::{EdgeColors, NodeColors};
use crate::filter::Subgraph;

/// Per-node display data attached to each node in the simulation.
#[derive(Clone, Debug)]
pub struct NodeVisual {
	pub id: String,
	pub label: String,
	pub title: String,
	pub colors: NodeColors,
	/// Size multiplier (1.0 = smallest node in view, 2.5 = largest)
	pub size: f64,
}

/// Per-edge display data.
#[derive(Clone, Debug)]
pub struct EdgeVisual {
	pub colors: EdgeColors,
}

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to 0.1..10.0).
	pub k: f64,
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
	/// Set once the pointer travels far enough to count as a drag, not a click.
	pub moved: bool,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
	pub moved: bool,
}

/// Pointer travel (screen px) below which a press-release is a click.
pub const CLICK_TOLERANCE: f64 = 4.0;

/// Smoothed per-node hover intensities.
///
/// Each node in the hovered neighborhood fades towards 1.0, everything else
/// decays towards 0.0 once its hold time has run out.
#[derive(Clone, Debug, Default)]
pub struct HighlightState {
	pub hovered_node: Option<DefaultNodeIdx>,
	target_set: HashSet<DefaultNodeIdx>,
	node_intensity: HashMap<DefaultNodeIdx, f64>,
	hold_timer: HashMap<DefaultNodeIdx, f64>,
	cached_max: f64,
}

/// Minimum time (seconds) a highlight is held before it can fade out.
const MIN_HOLD_TIME: f64 = 0.12;

impl HighlightState {
	/// Update the hovered node and recompute the target highlight set.
	pub fn set_hover(
		&mut self,
		node: Option<DefaultNodeIdx>,
		edges: &[(DefaultNodeIdx, DefaultNodeIdx)],
	) {
		if self.hovered_node == node {
			return;
		}

		self.hovered_node = node;
		self.target_set = node
			.map(|idx| neighborhood(idx, edges))
			.unwrap_or_default();
		for &idx in &self.target_set {
			self.hold_timer.insert(idx, MIN_HOLD_TIME);
		}
	}

	/// Exponential smoothing: value += (target - value) * (1 - e^(-speed * dt))
	pub fn tick(&mut self, dt: f64) {
		const FADE_IN_SPEED: f64 = 6.0;
		const FADE_OUT_SPEED: f64 = 4.0;

		let fade_in_factor = 1.0 - (-FADE_IN_SPEED * dt).exp();
		let fade_out_decay = (-FADE_OUT_SPEED * dt).exp();

		for &idx in &self.target_set {
			let intensity = self.node_intensity.entry(idx).or_insert(0.0);
			*intensity += (1.0 - *intensity) * fade_in_factor;
		}

		self.hold_timer.retain(|idx, timer| {
			if self.target_set.contains(idx) {
				true
			} else {
				*timer -= dt;
				*timer > 0.0
			}
		});

		let mut new_max: f64 = 0.0;
		self.node_intensity.retain(|idx, intensity| {
			if !self.target_set.contains(idx) && !self.hold_timer.contains_key(idx) {
				*intensity *= fade_out_decay;
			}
			new_max = new_max.max(*intensity);
			*intensity > 0.005
		});
		self.cached_max = new_max;
	}

	pub fn node_intensity(&self, idx: DefaultNodeIdx) -> f64 {
		self.node_intensity.get(&idx).copied().unwrap_or(0.0)
	}

	/// Geometric mean of the endpoint intensities.
	pub fn edge_intensity(&self, idx1: DefaultNodeIdx, idx2: DefaultNodeIdx) -> f64 {
		(self.node_intensity(idx1) * self.node_intensity(idx2)).sqrt()
	}

	pub fn max_intensity(&self) -> f64 {
		self.cached_max
	}

	/// Drop all intensities, e.g. after the node indices were rebuilt.
	fn clear(&mut self) {
		*self = Self::default();
	}
}

fn neighborhood(
	idx: DefaultNodeIdx,
	edges: &[(DefaultNodeIdx, DefaultNodeIdx)],
) -> HashSet<DefaultNodeIdx> {
	let mut set = HashSet::from([idx]);
	for &(src, tgt) in edges {
		if src == idx {
			set.insert(tgt);
		} else if tgt == idx {
			set.insert(src);
		}
	}
	set
}

/// Core graph state combining physics simulation with interaction tracking.
///
/// Created once when the canvas mounts. [`ForceGraphState::set_data`] swaps in
/// a new subgraph while keeping the positions of nodes that remain visible.
pub struct ForceGraphState {
	pub graph: ForceGraph<NodeVisual, EdgeVisual>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub highlight: HighlightState,
	pub selected: Option<DefaultNodeIdx>,
	pub width: f64,
	pub height: f64,
	pub physics_enabled: bool,
	simulation: SimulationConfig,
	/// Self-loops are kept out of the simulation, which cannot apply a spring to a single node.
	pub self_loops: Vec<(DefaultNodeIdx, EdgeVisual)>,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
	id_to_idx: HashMap<String, DefaultNodeIdx>,
}

fn simulation_parameters(config: &SimulationConfig) -> SimulationParameters {
	SimulationParameters {
		force_charge: config.force_charge,
		force_spring: config.force_spring,
		force_max: config.force_max,
		node_speed: config.node_speed,
		damping_factor: config.damping_factor,
	}
}

impl ForceGraphState {
	pub fn new(data: &Subgraph, width: f64, height: f64, simulation: &SimulationConfig) -> Self {
		let mut state = Self {
			graph: ForceGraph::new(simulation_parameters(simulation)),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			highlight: HighlightState::default(),
			selected: None,
			width,
			height,
			physics_enabled: true,
			simulation: simulation.clone(),
			self_loops: Vec::new(),
			edges: Vec::new(),
			id_to_idx: HashMap::new(),
		};
		state.set_data(data);
		state
	}

	/// Rebuild the simulation for a new subgraph.
	///
	/// Nodes already on screen keep their position; new nodes start on a ring
	/// around the origin. Edges whose endpoints are not both present are skipped.
	pub fn set_data(&mut self, data: &Subgraph) {
		let mut previous: HashMap<String, (f32, f32, bool)> = HashMap::new();
		self.graph.visit_nodes(|node| {
			previous.insert(
				node.data.user_data.id.clone(),
				(node.x(), node.y(), node.data.is_anchor),
			);
		});
		let selected_id = self.selected.and_then(|idx| self.node_id(idx));

		let mut graph = ForceGraph::new(simulation_parameters(&self.simulation));
		let mut id_to_idx = HashMap::with_capacity(data.nodes.len());

		let (min_size, max_size) = data
			.nodes
			.iter()
			.map(|n| n.size_value)
			.fold((u32::MAX, 0), |(lo, hi), v| (lo.min(v), hi.max(v)));
		let size_span = max_size.saturating_sub(min_size).max(1) as f64;

		let count = data.nodes.len().max(1) as f64;
		for (i, node) in data.nodes.iter().enumerate() {
			let (x, y, is_anchor) = previous.get(node.id()).copied().unwrap_or_else(|| {
				let angle = (i as f64) * 2.0 * PI / count;
				let radius = 100.0 + 4.0 * (i as f64).sqrt();
				((radius * angle.cos()) as f32, (radius * angle.sin()) as f32, false)
			});

			let size = 1.0 + 1.5 * (node.size_value.saturating_sub(min_size)) as f64 / size_span;

			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor,
				user_data: NodeVisual {
					id: node.id().to_string(),
					label: node.label().to_string(),
					title: node.title.clone(),
					colors: node.colors,
					size,
				},
			});
			id_to_idx.insert(node.id().to_string(), idx);
		}

		let mut edges = Vec::with_capacity(data.edges.len());
		let mut self_loops = Vec::new();
		let mut skipped = 0usize;
		for edge in &data.edges {
			let (Some(&src), Some(&tgt)) = (id_to_idx.get(edge.from()), id_to_idx.get(edge.to())) else {
				skipped += 1;
				continue;
			};
			let visual = EdgeVisual {
				colors: edge.colors,
			};
			edges.push((src, tgt));
			if src == tgt {
				self_loops.push((src, visual));
			} else {
				graph.add_edge(src, tgt, EdgeData { user_data: visual });
			}
		}
		if skipped > 0 {
			debug!(
				"sentiment-graph: {} edges reference hidden nodes and are not drawn",
				skipped
			);
		}

		self.graph = graph;
		self.edges = edges;
		self.self_loops = self_loops;
		self.selected = selected_id.and_then(|id| id_to_idx.get(&id).copied());
		self.id_to_idx = id_to_idx;
		self.highlight.clear();
		self.drag = DragState::default();
	}

	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<String> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some(node.data.user_data.id.clone());
			}
		});
		found
	}

	/// Select a node by id; unknown ids clear the selection.
	pub fn select_id(&mut self, id: Option<&str>) {
		self.selected = id.and_then(|id| self.id_to_idx.get(id).copied());
	}

	pub fn is_selected_edge(&self, idx1: DefaultNodeIdx, idx2: DefaultNodeIdx) -> bool {
		self.selected.is_some_and(|s| s == idx1 || s == idx2)
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(
		&self,
		sx: f64,
		sy: f64,
		config: &ScaleConfig,
	) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(config, self.transform.k);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			let node_hit_radius = scale.hit_radius * node.data.user_data.size;
			if (dx * dx + dy * dy).sqrt() < node_hit_radius {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		self.highlight.set_hover(node, &self.edges);
	}

	pub fn tick(&mut self, dt: f32) {
		if self.physics_enabled {
			self.graph.update(dt);
		}
		self.highlight.tick(dt as f64);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Zoom around the canvas centre.
	pub fn zoom_by(&mut self, factor: f64) {
		let (cx, cy) = (self.width / 2.0, self.height / 2.0);
		self.zoom_at(cx, cy, factor);
	}

	/// Zoom keeping the screen point `(x, y)` fixed.
	pub fn zoom_at(&mut self, x: f64, y: f64, factor: f64) {
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Centre and scale the view so every node is visible.
	pub fn fit(&mut self) {
		let mut bounds: Option<(f64, f64, f64, f64)> = None;
		self.graph.visit_nodes(|node| {
			let (x, y) = (node.x() as f64, node.y() as f64);
			bounds = Some(match bounds {
				None => (x, y, x, y),
				Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
			});
		});
		let Some((x0, y0, x1, y1)) = bounds else {
			self.transform = ViewTransform {
				x: self.width / 2.0,
				y: self.height / 2.0,
				k: 1.0,
			};
			return;
		};

		const MARGIN: f64 = 60.0;
		let (w, h) = ((x1 - x0).max(1.0), (y1 - y0).max(1.0));
		let k = ((self.width - 2.0 * MARGIN) / w)
			.min((self.height - 2.0 * MARGIN) / h)
			.clamp(0.1, 2.0);
		self.transform = ViewTransform {
			x: self.width / 2.0 - k * (x0 + x1) / 2.0,
			y: self.height / 2.0 - k * (y0 + y1) / 2.0,
			k,
		};
	}
}

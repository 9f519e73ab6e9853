//! Canvas-side graph state and interaction tracking.
//!
//! Wraps the `force_graph` simulation. Courses placed by the layout are
//! anchored at their grid cells; unplaced courses start on a ring around the
//! layout and are left to the simulation.

use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::adjacency::Adjacency;
use super::highlight::{HighlightState, HighlightSummary};
use super::prepared::PreparedGraph;
use super::scale::{ScaleConfig, ScaledValues};

/// Per-node display metadata attached to each node in the simulation.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	/// Course id.
	pub id: String,
	/// Text drawn under the node.
	pub label: String,
	/// Whether the layout gave this course a grid cell.
	pub placed: bool,
}

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	/// Horizontal pan offset in screen pixels.
	pub x: f64,
	/// Vertical pan offset in screen pixels.
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to 0.1..10.0).
	pub k: f64,
}

/// Tracks an in-progress node press or drag.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	/// A node is pressed.
	pub active: bool,
	/// Node under the press.
	pub node_idx: Option<DefaultNodeIdx>,
	/// Set once the pointer leaves the click tolerance.
	pub moved: bool,
	/// Pointer position at press, screen space.
	pub start_x: f64,
	/// Vertical counterpart of `start_x`.
	pub start_y: f64,
	/// Node position at press, world space.
	pub node_start_x: f32,
	/// Vertical counterpart of `node_start_x`.
	pub node_start_y: f32,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	/// The background is being dragged.
	pub active: bool,
	/// Pointer position when the pan started.
	pub start_x: f64,
	/// Vertical counterpart of `start_x`.
	pub start_y: f64,
	/// Transform offset when the pan started.
	pub transform_start_x: f64,
	/// Vertical counterpart of `transform_start_x`.
	pub transform_start_y: f64,
}

/// Pointer travel (screen pixels) below which a press counts as a click.
pub const CLICK_TOLERANCE: f64 = 4.0;

/// Ring distance beyond the laid-out area for unplaced courses.
const FLOAT_RING_MARGIN: f64 = 150.0;

/// Everything the canvas needs to draw and hit-test one prepared graph.
pub struct GraphViewState {
	/// Simulation holding every course; laid-out ones are anchored.
	pub graph: ForceGraph<NodeInfo, ()>,
	/// Current pan and zoom.
	pub transform: ViewTransform,
	/// Node press in progress.
	pub drag: DragState,
	/// Background drag in progress.
	pub pan: PanState,
	/// Current selection and lineage.
	pub highlight: HighlightState,
	/// Course the graph was loaded for.
	pub focus: String,
	/// Canvas width in pixels.
	pub width: f64,
	/// Canvas height in pixels.
	pub height: f64,
	adjacency: Adjacency,
	ids: HashMap<DefaultNodeIdx, String>,
}

impl GraphViewState {
	/// Build the simulation for `prepared` on a `width` x `height` canvas,
	/// centred on the focus course.
	pub fn new(prepared: &PreparedGraph, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut id_to_idx = HashMap::new();
		let mut ids = HashMap::new();

		let extent = prepared
			.layout
			.iter()
			.filter_map(|(id, _)| prepared.layout.world_position(id, prepared.spacing))
			.map(|(x, y)| x.hypot(y))
			.fold(0.0, f64::max);
		let ring = extent + FLOAT_RING_MARGIN;
		let unplaced = prepared.data.nodes.len().saturating_sub(prepared.layout.len()).max(1);

		let mut float_slot = 0;
		for node in &prepared.data.nodes {
			if id_to_idx.contains_key(&node.id) {
				continue;
			}
			let placed = prepared.layout.world_position(&node.id, prepared.spacing);
			let (x, y) = placed.unwrap_or_else(|| {
				let angle = float_slot as f64 * 2.0 * PI / unplaced as f64;
				float_slot += 1;
				(ring * angle.cos(), ring * angle.sin())
			});

			let idx = graph.add_node(NodeData {
				x: x as f32,
				y: y as f32,
				mass: 10.0,
				is_anchor: placed.is_some(),
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.display_label().to_string(),
					placed: placed.is_some(),
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
			ids.insert(idx, node.id.clone());
		}

		for link in &prepared.data.links {
			if let (Some(&src), Some(&tgt)) =
				(id_to_idx.get(&link.source), id_to_idx.get(&link.target))
			{
				graph.add_edge(src, tgt, EdgeData::default());
			}
		}

		Self {
			graph,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			highlight: HighlightState::default(),
			focus: prepared.focus.clone(),
			width,
			height,
			adjacency: prepared.adjacency.clone(),
			ids,
		}
	}

	/// Convert canvas pixels to world coordinates.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Node within hit distance of a screen point, if any.
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
			if (dx * dx + dy * dy).sqrt() < scale.hit_radius {
				found = Some(node.index());
			}
		});
		found
	}

	/// Toggle selection of the course behind `idx`.
	pub fn toggle_selection(&mut self, idx: DefaultNodeIdx) -> HighlightSummary {
		if let Some(id) = self.ids.get(&idx) {
			self.highlight.toggle(id, &self.adjacency);
		}
		self.highlight.summary()
	}

	/// Drop the selection, e.g. on a background double-click.
	pub fn clear_selection(&mut self) -> HighlightSummary {
		self.highlight.clear();
		self.highlight.summary()
	}

	/// Advance the simulation by `dt` seconds.
	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::prereq_graph::layout::Spacing;
	use crate::components::prereq_graph::types::GraphData;

	fn state() -> GraphViewState {
		let data = GraphData::from_edges(&["A", "B", "C", "D"], &[("A", "B"), ("B", "C"), ("X", "A")]);
		let prepared = PreparedGraph::new(data, "A", Spacing::default()).unwrap();
		GraphViewState::new(&prepared, 800.0, 600.0)
	}

	fn index_of(state: &GraphViewState, id: &str) -> DefaultNodeIdx {
		let mut found = None;
		state.graph.visit_nodes(|node| {
			if node.data.user_data.id == id {
				found = Some(node.index());
			}
		});
		found.unwrap()
	}

	#[test]
	fn placed_courses_are_anchored_at_their_cells() {
		let state = state();
		let mut seen = Vec::new();
		state.graph.visit_nodes(|node| {
			seen.push((
				node.data.user_data.id.clone(),
				node.data.user_data.placed,
				node.x(),
				node.y(),
			));
		});
		seen.sort_by(|a, b| a.0.cmp(&b.0));
		assert_eq!(seen[0], ("A".to_string(), true, 0.0, 0.0));
		assert_eq!(seen[1], ("B".to_string(), true, 200.0, 0.0));
		assert_eq!(seen[2], ("C".to_string(), true, 400.0, 0.0));
		assert!(!seen[3].1);
	}

	#[test]
	fn click_hits_node_under_pointer() {
		let state = state();
		let config = ScaleConfig::default();
		// Screen center maps to the focus course at the world origin.
		assert_eq!(state.node_at_position(400.0, 300.0, &config), Some(index_of(&state, "A")));
		assert_eq!(state.node_at_position(500.0, 300.0, &config), None);
	}

	#[test]
	fn ticking_keeps_placed_courses_on_their_cells() {
		let mut state = state();
		for _ in 0..30 {
			state.tick(0.016);
		}
		let mut placed = Vec::new();
		state.graph.visit_nodes(|node| {
			if node.data.user_data.placed {
				placed.push((node.data.user_data.id.clone(), node.x(), node.y()));
			}
		});
		placed.sort_by(|a, b| a.0.cmp(&b.0));
		assert_eq!(
			placed,
			vec![
				("A".to_string(), 0.0, 0.0),
				("B".to_string(), 200.0, 0.0),
				("C".to_string(), 400.0, 0.0),
			]
		);
	}

	#[test]
	fn toggle_selection_reports_lineage() {
		let mut state = state();
		let b = index_of(&state, "B");
		let summary = state.toggle_selection(b);
		assert_eq!(summary.selected.as_deref(), Some("B"));
		assert_eq!((summary.ancestors, summary.descendants), (1, 1));
		assert_eq!(state.toggle_selection(b), HighlightSummary::default());
	}
}

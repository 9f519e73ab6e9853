//! Per-fetch graph model and the view states a load can end in.

use log::{debug, warn};

use super::adjacency::Adjacency;
use super::error::GraphDataError;
use super::layout::{self, Layout, Spacing};
use super::types::GraphData;

/// A fetched graph with its index and layout, built once per load.
#[derive(Clone, Debug)]
pub struct PreparedGraph {
	/// Course the graph was loaded for.
	pub focus: String,
	/// Fetched data, unchanged.
	pub data: GraphData,
	/// Index built once from `data`.
	pub adjacency: Adjacency,
	/// Grid cells of courses reachable from the focus.
	pub layout: Layout,
	/// Grid to world conversion.
	pub spacing: Spacing,
}

impl PreparedGraph {
	/// Index and lay out `data` around `focus`. Fails when `focus` is not one
	/// of the courses.
	pub fn new(data: GraphData, focus: &str, spacing: Spacing) -> Result<Self, GraphDataError> {
		let adjacency = Adjacency::build(&data);
		let layout = layout::assign(&adjacency, focus)?;
		debug!(
			"prereq-graph: laid out {} of {} courses around {} ({} dangling links)",
			layout.len(),
			adjacency.len(),
			focus,
			adjacency.dangling()
		);
		Ok(Self {
			focus: focus.to_string(),
			data,
			adjacency,
			layout,
			spacing,
		})
	}
}

/// What the graph panel is currently showing.
#[derive(Clone, Debug, Default)]
pub enum ViewState {
	/// No focus course chosen.
	#[default]
	Idle,
/// A load is in flight.
	Loading,
/// The load or layout failed.
	Failed(GraphDataError),
	/// The load succeeded but returned no courses.
	Empty,
/// A graph to draw.
	Ready(PreparedGraph),
}

impl ViewState {
	/// Turn the outcome of a load into the state to display.
	pub fn resolve(
		result: Result<GraphData, GraphDataError>,
		focus: &str,
		spacing: Spacing,
	) -> Self {
		let outcome = result.and_then(|data| {
			if data.is_empty() {
				Ok(None)
			} else {
				PreparedGraph::new(data, focus, spacing).map(Some)
			}
		});

		match outcome {
			Ok(Some(prepared)) => ViewState::Ready(prepared),
			Ok(None) => ViewState::Empty,
			Err(e) => {
				warn!("prereq-graph: cannot show {}: {}", focus, e);
				ViewState::Failed(e)
			}
		}
	}
}

//! Course prerequisite graph visualization.
//!
//! Loads the prerequisite graph around a focus course, lays it out on a
//! deterministic grid (prerequisites to the left, dependents to the right)
//! and renders it on an HTML canvas with:
//! - Click to highlight a course's full lineage, click again to clear
//! - Pan, zoom, and node dragging interactions
//! - Explicit loading, error and empty states
//!
//! The graph model is independent of the canvas and can be used on its own:
//!
//! ```
//! use prereq_graph::{Adjacency, GraphData, HighlightState, layout};
//!
//! let data = GraphData::from_edges(&["A", "B", "C"], &[("A", "B"), ("B", "C")]);
//! let adjacency = Adjacency::build(&data);
//!
//! let grid = layout::assign(&adjacency, "A").unwrap();
//! assert_eq!(grid.position("C").map(|p| p.column), Some(2));
//!
//! let mut highlight = HighlightState::default();
//! highlight.toggle("B", &adjacency);
//! assert!(highlight.is_ancestor("A") && highlight.is_descendant("C"));
//! ```

mod adjacency;
mod component;
mod error;
mod fetch;
mod frame;
mod highlight;
/// Grid layout around the focus course.
pub mod layout;
/// Emphasis roles and colors.
pub mod palette;
mod prepared;
mod render;
/// Zoom-dependent sizes.
pub mod scale;
mod state;
/// Focus cuts of an embedded catalogue.
pub mod subgraph;
mod types;

pub use adjacency::Adjacency;
pub use component::{GraphCanvas, PrereqGraph};
pub use error::GraphDataError;
pub use fetch::{GraphSource, RequestGeneration, fetch_graph, graph_endpoint};
pub use highlight::{HighlightState, HighlightSummary};
pub use layout::{GridPosition, Layout, Spacing};
pub use prepared::{PreparedGraph, ViewState};
pub use state::GraphViewState;
pub use subgraph::SubgraphMode;
pub use types::{GraphData, GraphLink, GraphNode};

//! Graph data structures as delivered by the prerequisite graph endpoint.
//!
//! Links are directed: `source -> target` means the source course is a
//! prerequisite of the target course.

use serde::Deserialize;

/// A course in the graph.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct GraphNode {
	/// Course code, unique within a graph (e.g. "CSC207H5").
	pub id: String,
	/// Optional display label. Falls back to the id when absent.
	#[serde(default)]
	pub label: Option<String>,
}

impl GraphNode {
	/// Node with no explicit label.
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			label: None,
		}
	}

	/// Label to draw: the explicit label, else the id.
	pub fn display_label(&self) -> &str {
		self.label.as_deref().unwrap_or(&self.id)
	}
}

/// A directed prerequisite edge.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct GraphLink {
	/// Prerequisite course id.
	pub source: String,
	/// Course that requires `source`.
	pub target: String,
	/// Optional edge label (e.g. "prerequisite", "corequisite").
	#[serde(default)]
	pub label: Option<String>,
}

impl GraphLink {
	/// Unlabelled link `source -> target`.
	pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			label: None,
		}
	}
}

/// Complete graph data: nodes and links.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct GraphData {
	/// Courses in the graph.
	pub nodes: Vec<GraphNode>,
	/// Prerequisite links; may name courses missing from `nodes`.
	#[serde(default, alias = "edges")]
	pub links: Vec<GraphLink>,
}

impl GraphData {
	/// Convenience constructor used by tests and demos.
	pub fn from_edges(nodes: &[&str], links: &[(&str, &str)]) -> Self {
		Self {
			nodes: nodes.iter().map(|id| GraphNode::new(*id)).collect(),
			links: links
				.iter()
				.map(|(s, t)| GraphLink::new(*s, *t))
				.collect(),
		}
	}

	/// True when there are no courses at all.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}

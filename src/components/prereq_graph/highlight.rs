//! Click selection and lineage highlighting.
//!
//! Selecting a course marks every course it transitively depends on
//! (ancestors) and every course that transitively depends on it
//! (descendants). Both sets are rebuilt from scratch on each change and
//! never include the selected course itself.

use std::collections::HashSet;

use super::adjacency::Adjacency;

/// Current selection and the lineage sets derived from it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HighlightState {
	selected: Option<String>,
	ancestors: HashSet<String>,
	descendants: HashSet<String>,
}

/// Counts shown in the legend under the canvas.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HighlightSummary {
	/// Selected course, if any.
	pub selected: Option<String>,
	/// Number of transitive prerequisites.
	pub ancestors: usize,
	/// Number of transitive dependents.
	pub descendants: usize,
}

impl HighlightState {
	/// Click handler: selecting the selected course clears the selection,
	/// anything else selects it. Ids unknown to the graph clear the selection.
	pub fn toggle(&mut self, id: &str, adjacency: &Adjacency) {
		if self.selected.as_deref() == Some(id) {
			self.clear();
		} else {
			self.select(id, adjacency);
		}
	}

	/// Select `id` and recompute both lineage sets.
	pub fn select(&mut self, id: &str, adjacency: &Adjacency) {
		let Some(root) = adjacency.index_of(id) else {
			self.clear();
			return;
		};
		self.selected = Some(id.to_string());
		self.ancestors = walk(adjacency, root, Adjacency::incoming);
		self.descendants = walk(adjacency, root, Adjacency::outgoing);
	}

	/// Back to the idle state.
	pub fn clear(&mut self) {
		*self = Self::default();
	}

	/// Currently selected course.
	pub fn selected(&self) -> Option<&str> {
		self.selected.as_deref()
	}

	/// Whether `id` is the selected course.
	pub fn is_selected(&self, id: &str) -> bool {
		self.selected.as_deref() == Some(id)
	}

	/// Whether `id` is a transitive prerequisite of the selection.
	pub fn is_ancestor(&self, id: &str) -> bool {
		self.ancestors.contains(id)
	}

	/// Whether `id` is a transitive dependent of the selection.
	pub fn is_descendant(&self, id: &str) -> bool {
		self.descendants.contains(id)
	}

	/// Transitive prerequisites of the selection.
	pub fn ancestors(&self) -> &HashSet<String> {
		&self.ancestors
	}

	/// Transitive dependents of the selection.
	pub fn descendants(&self) -> &HashSet<String> {
		&self.descendants
	}

	/// Legend counts for the current selection.
	pub fn summary(&self) -> HighlightSummary {
		HighlightSummary {
			selected: self.selected.clone(),
			ancestors: self.ancestors.len(),
			descendants: self.descendants.len(),
		}
	}
}

/// Collect every node reachable from `root` along `step`, excluding `root`.
fn walk(
	adjacency: &Adjacency,
	root: usize,
	step: fn(&Adjacency, usize) -> &[usize],
) -> HashSet<String> {
	let mut visited = vec![false; adjacency.len()];
	visited[root] = true;
	let mut stack = vec![root];
	let mut found = HashSet::new();

	while let Some(current) = stack.pop() {
		for &next in step(adjacency, current) {
			if !visited[next] {
				visited[next] = true;
				found.insert(adjacency.id(next).to_string());
				stack.push(next);
			}
		}
	}

	found
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::prereq_graph::types::GraphData;

	fn ids(set: &HashSet<String>) -> Vec<&str> {
		let mut v: Vec<&str> = set.iter().map(String::as_str).collect();
		v.sort();
		v
	}

	#[test]
	fn lineage_of_middle_course() {
		let adj = Adjacency::build(&GraphData::from_edges(
			&["A", "B", "C", "D"],
			&[("A", "B"), ("B", "C"), ("D", "A")],
		));
		let mut h = HighlightState::default();
		h.toggle("B", &adj);
		assert_eq!(h.selected(), Some("B"));
		assert_eq!(ids(h.ancestors()), ["A", "D"]);
		assert_eq!(ids(h.descendants()), ["C"]);
	}

	#[test]
	fn toggling_twice_clears() {
		let adj = Adjacency::build(&GraphData::from_edges(&["A", "B"], &[("A", "B")]));
		let mut h = HighlightState::default();
		h.toggle("A", &adj);
		h.toggle("A", &adj);
		assert_eq!(h, HighlightState::default());
	}

	#[test]
	fn switching_selection_recomputes() {
		let adj = Adjacency::build(&GraphData::from_edges(&["A", "B", "C"], &[("A", "B"), ("B", "C")]));
		let mut h = HighlightState::default();
		h.toggle("A", &adj);
		h.toggle("C", &adj);
		assert_eq!(h.selected(), Some("C"));
		assert_eq!(ids(h.ancestors()), ["A", "B"]);
		assert!(h.descendants().is_empty());
	}

	#[test]
	fn cycle_excludes_selected_course() {
		let adj = Adjacency::build(&GraphData::from_edges(&["A", "B"], &[("A", "B"), ("B", "A")]));
		let mut h = HighlightState::default();
		h.toggle("A", &adj);
		assert_eq!(ids(h.ancestors()), ["B"]);
		assert_eq!(ids(h.descendants()), ["B"]);
		assert!(!h.is_ancestor("A"));
	}

	#[test]
	fn unknown_id_clears_selection() {
		let adj = Adjacency::build(&GraphData::from_edges(&["A"], &[]));
		let mut h = HighlightState::default();
		h.toggle("A", &adj);
		h.toggle("nope", &adj);
		assert_eq!(h.selected(), None);
		assert_eq!(h.summary(), HighlightSummary::default());
	}
}

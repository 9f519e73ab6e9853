//! Deterministic grid layout anchored at the focus course.
//!
//! A breadth-first walk starts at the focus course in column 0. Expanding a
//! course in column `c` places its unplaced dependents (outgoing targets) in
//! column `c + 1` and its unplaced prerequisites (incoming sources) in column
//! `c - 1`. Each column keeps its own row counter, so the same graph always
//! produces the same picture and no two placed courses share a cell.
//!
//! Positions live in a side table keyed by course id; the fetched
//! [`GraphData`](super::types::GraphData) is never touched.

use std::collections::{HashMap, VecDeque};

use super::adjacency::Adjacency;
use super::error::GraphDataError;

/// A cell in the layout grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridPosition {
	/// Negative columns hold prerequisites, positive columns hold dependents.
	pub column: i32,
	/// Row within the column, in placement order.
	pub row: u32,
}

impl GridPosition {
	/// Cell at `column`, `row`.
	pub const fn new(column: i32, row: u32) -> Self {
		Self { column, row }
	}
}

/// World-space distance between grid columns and rows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spacing {
	/// Horizontal distance between columns.
	pub column_gap: f64,
	/// Vertical distance between rows.
	pub row_gap: f64,
}

impl Default for Spacing {
	fn default() -> Self {
		Self {
			column_gap: 200.0,
			row_gap: 70.0,
		}
	}
}

/// Grid positions for every course reachable from the focus.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
	positions: HashMap<String, GridPosition>,
}

impl Layout {
	/// Grid cell of `id`, `None` if it was unreachable.
	pub fn position(&self, id: &str) -> Option<GridPosition> {
		self.positions.get(id).copied()
	}

	/// World coordinates of a placed course, `None` if it was unreachable.
	pub fn world_position(&self, id: &str, spacing: Spacing) -> Option<(f64, f64)> {
		self.position(id).map(|p| {
			(
				p.column as f64 * spacing.column_gap,
				p.row as f64 * spacing.row_gap,
			)
		})
	}

	/// Number of placed courses.
	pub fn len(&self) -> usize {
		self.positions.len()
	}

	/// True when nothing was placed.
	pub fn is_empty(&self) -> bool {
		self.positions.is_empty()
	}

	/// Placed courses and their cells, in no particular order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, GridPosition)> {
		self.positions.iter().map(|(id, p)| (id.as_str(), *p))
	}
}

/// Per-column row allocator.
#[derive(Default)]
struct RowCounters(HashMap<i32, u32>);

impl RowCounters {
	fn next(&mut self, column: i32) -> u32 {
		let row = self.0.entry(column).or_insert(0);
		let current = *row;
		*row += 1;
		current
	}
}

/// Lay out the component containing `focus`.
pub fn assign(adjacency: &Adjacency, focus: &str) -> Result<Layout, GraphDataError> {
	let root = adjacency
		.index_of(focus)
		.ok_or_else(|| GraphDataError::MissingFocus(focus.to_string()))?;

	let mut placed: Vec<Option<GridPosition>> = vec![None; adjacency.len()];
	let mut rows = RowCounters::default();
	let mut queue = VecDeque::new();

	placed[root] = Some(GridPosition::new(0, rows.next(0)));
	queue.push_back(root);

	while let Some(current) = queue.pop_front() {
		let Some(at) = placed[current] else {
			continue;
		};

		for &child in adjacency.outgoing(current) {
			if placed[child].is_none() {
				let column = at.column + 1;
				placed[child] = Some(GridPosition::new(column, rows.next(column)));
				queue.push_back(child);
			}
		}

		for &parent in adjacency.incoming(current) {
			if placed[parent].is_none() {
				let column = at.column - 1;
				placed[parent] = Some(GridPosition::new(column, rows.next(column)));
				queue.push_back(parent);
			}
		}
	}

	let positions = placed
		.into_iter()
		.enumerate()
		.filter_map(|(idx, p)| p.map(|p| (adjacency.id(idx).to_string(), p)))
		.collect();

	Ok(Layout { positions })
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;
	use crate::components::prereq_graph::types::GraphData;

	fn layout(nodes: &[&str], links: &[(&str, &str)], focus: &str) -> Layout {
		assign(&Adjacency::build(&GraphData::from_edges(nodes, links)), focus).unwrap()
	}

	#[test]
	fn chain_runs_left_to_right() {
		let l = layout(&["A", "B", "C"], &[("A", "B"), ("B", "C")], "A");
		assert_eq!(l.position("A"), Some(GridPosition::new(0, 0)));
		assert_eq!(l.position("B"), Some(GridPosition::new(1, 0)));
		assert_eq!(l.position("C"), Some(GridPosition::new(2, 0)));
	}

	#[test]
	fn prerequisites_go_left() {
		let l = layout(&["A", "B", "C"], &[("A", "B"), ("C", "B")], "B");
		assert_eq!(l.position("B"), Some(GridPosition::new(0, 0)));
		assert_eq!(l.position("A"), Some(GridPosition::new(-1, 0)));
		assert_eq!(l.position("C"), Some(GridPosition::new(-1, 1)));
	}

	#[test]
	fn sibling_prerequisite_never_lands_on_focus() {
		// C shares a dependent with the focus, so it is placed in column 0.
		let l = layout(&["A", "B", "C"], &[("A", "B"), ("C", "B")], "A");
		assert_eq!(l.position("A"), Some(GridPosition::new(0, 0)));
		assert_eq!(l.position("C"), Some(GridPosition::new(0, 1)));
	}

	#[test]
	fn cycles_terminate_with_unique_cells() {
		let l = layout(
			&["A", "B", "C", "D"],
			&[("A", "B"), ("B", "C"), ("C", "A"), ("A", "A"), ("B", "D"), ("D", "C")],
			"A",
		);
		assert_eq!(l.len(), 4);
		let cells: HashSet<GridPosition> = l.iter().map(|(_, p)| p).collect();
		assert_eq!(cells.len(), 4);
	}

	#[test]
	fn unreachable_nodes_stay_unplaced() {
		let l = layout(&["A", "B", "D"], &[("A", "B")], "A");
		assert_eq!(l.position("D"), None);
		assert_eq!(l.world_position("D", Spacing::default()), None);
	}

	#[test]
	fn world_position_uses_spacing() {
		let l = layout(&["A", "B", "C"], &[("A", "B"), ("C", "B")], "A");
		let spacing = Spacing {
			column_gap: 10.0,
			row_gap: 5.0,
		};
		assert_eq!(l.world_position("B", spacing), Some((10.0, 0.0)));
		assert_eq!(l.world_position("C", spacing), Some((0.0, 5.0)));
	}

	#[test]
	fn missing_focus_is_an_error() {
		let adj = Adjacency::build(&GraphData::from_edges(&["A"], &[]));
		assert_eq!(
			assign(&adj, "Z"),
			Err(GraphDataError::MissingFocus("Z".into()))
		);
	}
}

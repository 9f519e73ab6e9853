//! Index of a graph's links by source and by target.
//!
//! Built once per fetch so both the layout walk and the lineage walks run in
//! O(nodes + links) instead of rescanning the link list at every step.

use std::collections::HashMap;

use log::debug;

use super::types::GraphData;

/// Adjacency lists over dense node indices.
#[derive(Clone, Debug, Default)]
pub struct Adjacency {
	ids: Vec<String>,
	index: HashMap<String, usize>,
	outgoing: Vec<Vec<usize>>,
	incoming: Vec<Vec<usize>>,
	dangling: usize,
}

impl Adjacency {
	/// Index `data`. Node order and link order are preserved; links whose
	/// source or target is not a known node are skipped.
	pub fn build(data: &GraphData) -> Self {
		let mut ids = Vec::with_capacity(data.nodes.len());
		let mut index = HashMap::with_capacity(data.nodes.len());
		for node in &data.nodes {
			if !index.contains_key(&node.id) {
				index.insert(node.id.clone(), ids.len());
				ids.push(node.id.clone());
			}
		}

		let mut outgoing = vec![Vec::new(); ids.len()];
		let mut incoming = vec![Vec::new(); ids.len()];
		let mut dangling = 0;
		for link in &data.links {
			match (index.get(&link.source), index.get(&link.target)) {
				(Some(&src), Some(&tgt)) => {
					outgoing[src].push(tgt);
					incoming[tgt].push(src);
				}
				_ => {
					debug!(
						"prereq-graph: skipping dangling link {} -> {}",
						link.source, link.target
					);
					dangling += 1;
				}
			}
		}

		Self {
			ids,
			index,
			outgoing,
			incoming,
			dangling,
		}
	}

	/// Number of distinct courses.
	pub fn len(&self) -> usize {
		self.ids.len()
	}

	/// True for a graph without courses.
	pub fn is_empty(&self) -> bool {
		self.ids.is_empty()
	}

	/// Whether `id` is a known course.
	pub fn contains(&self, id: &str) -> bool {
		self.index.contains_key(id)
	}

	/// Dense index of `id`.
	pub fn index_of(&self, id: &str) -> Option<usize> {
		self.index.get(id).copied()
	}

	/// Node id at a dense index.
	pub fn id(&self, idx: usize) -> &str {
		&self.ids[idx]
	}

	/// Targets of links leaving `idx`, in link order.
	pub fn outgoing(&self, idx: usize) -> &[usize] {
		&self.outgoing[idx]
	}

	/// Sources of links entering `idx`, in link order.
	pub fn incoming(&self, idx: usize) -> &[usize] {
		&self.incoming[idx]
	}

	/// Number of links skipped because an endpoint was missing.
	pub fn dangling(&self) -> usize {
		self.dangling
	}
}

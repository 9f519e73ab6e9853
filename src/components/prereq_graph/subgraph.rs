//! Focus-course subgraph extraction from a full prerequisite graph.
//!
//! Used when the page embeds the whole catalogue instead of pointing at a
//! graph endpoint. Two cuts are available, matching what the graph service
//! serves.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use super::types::{GraphData, GraphLink};

/// Which neighbourhood of the focus course to keep.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubgraphMode {
	/// Links touching the focus course and their endpoints.
	#[default]
	Neighbors,
	/// Every transitive prerequisite of the focus course, the links among
	/// them and into the focus, plus the direct links out of the focus.
	Lineage,
}

/// Cut the subgraph around `focus` out of `full`.
///
/// Nodes keep their order in `full`. Link endpoints missing from `full`'s
/// node list are dropped from the node set but the links themselves are
/// kept, exactly as a remote endpoint would deliver them.
pub fn extract(full: &GraphData, focus: &str, mode: SubgraphMode) -> GraphData {
	let links: Vec<GraphLink> = match mode {
		SubgraphMode::Neighbors => full
			.links
			.iter()
			.filter(|l| l.source == focus || l.target == focus)
			.cloned()
			.collect(),
		SubgraphMode::Lineage => lineage_links(full, focus),
	};

	let mut keep: HashSet<&str> = HashSet::with_capacity(links.len() * 2 + 1);
	keep.insert(focus);
	for link in &links {
		keep.insert(&link.source);
		keep.insert(&link.target);
	}

	let nodes = full
		.nodes
		.iter()
		.filter(|n| keep.contains(n.id.as_str()))
		.cloned()
		.collect();

	GraphData { nodes, links }
}

fn lineage_links(full: &GraphData, focus: &str) -> Vec<GraphLink> {
	let ancestors = prerequisite_closure(full, focus);
	let related = full.links.iter().filter(|l| {
		ancestors.contains(l.source.as_str())
			&& (ancestors.contains(l.target.as_str()) || l.target == focus)
	});
	let forward = full.links.iter().filter(|l| l.source == focus);
	related.chain(forward).cloned().collect()
}

/// All ids from which `focus` is reachable, walking links backwards.
///
/// Keyed by link ids rather than through the node index so prerequisites
/// missing from the node list are still followed.
fn prerequisite_closure<'a>(full: &'a GraphData, focus: &str) -> HashSet<&'a str> {
	let mut reverse: HashMap<&str, Vec<&str>> = HashMap::new();
	for link in &full.links {
		reverse.entry(&link.target).or_default().push(&link.source);
	}

	let mut found: HashSet<&'a str> = HashSet::new();
	let mut stack: Vec<&str> = vec![focus];
	while let Some(current) = stack.pop() {
		for &parent in reverse.get(current).into_iter().flatten() {
			if found.insert(parent) {
				stack.push(parent);
			}
		}
	}

	found
}

#[cfg(test)]
mod tests {
	use super::*;

	fn catalogue() -> GraphData {
		GraphData::from_edges(
			&["CSC108", "CSC148", "CSC207", "CSC236", "CSC263", "MAT102", "STA107"],
			&[
				("CSC108", "CSC148"),
				("CSC148", "CSC207"),
				("CSC148", "CSC236"),
				("MAT102", "CSC236"),
				("CSC236", "CSC263"),
				("CSC207", "CSC263"),
			],
		)
	}

	fn node_ids(g: &GraphData) -> Vec<&str> {
		g.nodes.iter().map(|n| n.id.as_str()).collect()
	}

	#[test]
	fn neighbors_keeps_direct_links() {
		let g = extract(&catalogue(), "CSC236", SubgraphMode::Neighbors);
		assert_eq!(node_ids(&g), ["CSC148", "CSC236", "CSC263", "MAT102"]);
		assert_eq!(g.links.len(), 3);
	}

	#[test]
	fn lineage_keeps_all_prerequisites_and_next_step() {
		let g = extract(&catalogue(), "CSC236", SubgraphMode::Lineage);
		assert_eq!(node_ids(&g), ["CSC108", "CSC148", "CSC236", "CSC263", "MAT102"]);
		assert!(g.links.contains(&GraphLink::new("CSC108", "CSC148")));
		assert!(g.links.contains(&GraphLink::new("CSC236", "CSC263")));
		assert!(!g.links.iter().any(|l| l.target == "CSC207"));
	}

	#[test]
	fn isolated_focus_yields_single_node() {
		let g = extract(&catalogue(), "STA107", SubgraphMode::Lineage);
		assert_eq!(node_ids(&g), ["STA107"]);
		assert!(g.links.is_empty());
	}

	#[test]
	fn unknown_focus_yields_no_nodes() {
		let g = extract(&catalogue(), "PHL245", SubgraphMode::Neighbors);
		assert!(g.is_empty());
	}
}

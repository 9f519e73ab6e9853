//! Colors and emphasis rules for the prerequisite graph.
//!
//! Emphasis is decided purely by membership of a course in the current
//! selection, its ancestors or its descendants. The selected course wins
//! over lineage roles, and lineage roles win over the dimmed fallback.

use super::highlight::HighlightState;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha in 0.0..=1.0.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Same color at opacity `a`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// CSS color string: `#rrggbb` when opaque, `rgba(..)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// How a course is emphasised.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeRole {
	/// Focus course while nothing is selected.
	Focus,
	/// Any other course while nothing is selected.
	Default,
/// The clicked course.
	Selected,
/// Transitive prerequisite of the selection.
	Ancestor,
/// Transitive dependent of the selection.
	Descendant,
	/// Outside the selected course's lineage.
	Dimmed,
}

/// How a link is emphasised.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkRole {
	/// Leaves the focus course while nothing is selected.
	Focus,
/// Any other link while nothing is selected.
	Default,
	/// Touches the selected course.
	Selected,
	/// Both ends are ancestors of the selection.
	Ancestor,
	/// Both ends are descendants of the selection.
	Descendant,
/// Outside the selected course's lineage.
	Dimmed,
}

/// Emphasis of course `id`. Without a selection only the focus course
/// stands out; with one, selected beats ancestor beats descendant.
pub fn node_role(id: &str, highlight: &HighlightState, focus: &str) -> NodeRole {
	if highlight.selected().is_none() {
		return if id == focus {
			NodeRole::Focus
		} else {
			NodeRole::Default
		};
	}

	if highlight.is_selected(id) {
		NodeRole::Selected
	} else if highlight.is_ancestor(id) {
		NodeRole::Ancestor
	} else if highlight.is_descendant(id) {
		NodeRole::Descendant
	} else {
		NodeRole::Dimmed
	}
}

/// Emphasis of the link `source -> target`.
pub fn link_role(source: &str, target: &str, highlight: &HighlightState, focus: &str) -> LinkRole {
	if highlight.selected().is_none() {
		return if source == focus {
			LinkRole::Focus
		} else {
			LinkRole::Default
		};
	}

	if highlight.is_selected(source) || highlight.is_selected(target) {
		LinkRole::Selected
	} else if highlight.is_ancestor(source) && highlight.is_ancestor(target) {
		LinkRole::Ancestor
	} else if highlight.is_descendant(source) && highlight.is_descendant(target) {
		LinkRole::Descendant
	} else {
		LinkRole::Dimmed
	}
}

/// Stroke width in screen pixels; only dimmed links are drawn thin.
pub fn link_width(role: LinkRole) -> f64 {
	match role {
		LinkRole::Dimmed => 1.0,
		_ => 3.0,
	}
}

/// Fixed color assignments.
#[derive(Clone, Debug)]
pub struct Palette {
	/// Canvas fill.
	pub background: Color,
	/// Course labels.
	pub label: Color,
	/// Focus course and its outgoing links while idle.
	pub focus: Color,
	/// Other courses while idle.
	pub node: Color,
	/// Other links while idle.
	pub link: Color,
	/// Selected course and links touching it.
	pub selected: Color,
	/// Ancestors and links among them.
	pub ancestor: Color,
	/// Descendants and links among them.
	pub descendant: Color,
	/// Everything outside the lineage.
	pub dimmed: Color,
}

impl Default for Palette {
	fn default() -> Self {
		Self {
			background: Color::rgb(248, 250, 252),
			label: Color::rgb(55, 65, 81),
			focus: Color::rgb(79, 70, 229),
			node: Color::rgb(96, 165, 250),
			link: Color::rgb(148, 163, 184),
			selected: Color::rgb(239, 68, 68),
			ancestor: Color::rgb(14, 165, 233),
			descendant: Color::rgb(79, 70, 229),
			dimmed: Color::rgb(209, 213, 219),
		}
	}
}

impl Palette {
	/// Fill for a course in `role`.
	pub fn node_color(&self, role: NodeRole) -> Color {
		match role {
			NodeRole::Focus => self.focus,
			NodeRole::Default => self.node,
			NodeRole::Selected => self.selected,
			NodeRole::Ancestor => self.ancestor,
			NodeRole::Descendant => self.descendant,
			NodeRole::Dimmed => self.dimmed,
		}
	}

	/// Stroke for a link in `role`.
	pub fn link_color(&self, role: LinkRole) -> Color {
		match role {
			LinkRole::Focus => self.focus,
			LinkRole::Default => self.link,
			LinkRole::Selected => self.selected,
			LinkRole::Ancestor => self.ancestor,
			LinkRole::Descendant => self.descendant,
			LinkRole::Dimmed => self.dimmed,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::prereq_graph::adjacency::Adjacency;
	use crate::components::prereq_graph::types::GraphData;

	fn selected(id: &str) -> HighlightState {
		let adj = Adjacency::build(&GraphData::from_edges(
			&["A", "B", "C", "D", "E"],
			&[("A", "B"), ("B", "C"), ("C", "D"), ("E", "D")],
		));
		let mut h = HighlightState::default();
		h.toggle(id, &adj);
		h
	}

	#[test]
	fn idle_roles_mark_focus() {
		let h = HighlightState::default();
		assert_eq!(node_role("A", &h, "A"), NodeRole::Focus);
		assert_eq!(node_role("B", &h, "A"), NodeRole::Default);
		assert_eq!(link_role("A", "B", &h, "A"), LinkRole::Focus);
		assert_eq!(link_role("B", "C", &h, "A"), LinkRole::Default);
		assert_eq!(link_width(LinkRole::Default), 3.0);
	}

	#[test]
	fn selection_roles_follow_precedence() {
		let h = selected("C");
		assert_eq!(node_role("C", &h, "A"), NodeRole::Selected);
		assert_eq!(node_role("A", &h, "A"), NodeRole::Ancestor);
		assert_eq!(node_role("D", &h, "A"), NodeRole::Descendant);
		assert_eq!(node_role("E", &h, "A"), NodeRole::Dimmed);
	}

	#[test]
	fn link_roles_need_matching_ends() {
		let h = selected("C");
		assert_eq!(link_role("B", "C", &h, "A"), LinkRole::Selected);
		assert_eq!(link_role("A", "B", &h, "A"), LinkRole::Ancestor);
		assert_eq!(link_role("E", "D", &h, "A"), LinkRole::Dimmed);
		assert_eq!(link_width(LinkRole::Dimmed), 1.0);
	}

	#[test]
	fn css_output() {
		let p = Palette::default();
		assert_eq!(p.node_color(NodeRole::Selected).to_css(), "#ef4444");
		assert_eq!(p.link.with_alpha(0.5).to_css(), "rgba(148, 163, 184, 0.5)");
	}
}

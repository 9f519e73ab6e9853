//! Page-level configuration embedded as JSON in the host page.
//!
//! ```html
//! <script id="graph-config" type="application/json">
//!   { "graph_url": "/api/v1/prereq-graph", "focus_id": "CSC207H5" }
//! </script>
//! ```
//!
//! Every field is optional. A `course` query parameter on the page URL takes
//! precedence over `focus_id`.

use reqwest::Url;
use serde::Deserialize;

use crate::components::prereq_graph::{GraphDataError, Spacing, SubgraphMode};

/// Query parameter naming the focus course.
pub const FOCUS_QUERY_PARAM: &str = "course";

/// Settings read from `<script id="graph-config">`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
	/// Graph endpoint; `None` means use the embedded catalogue.
	pub graph_url: Option<String>,
	/// Course to open with.
	pub focus_id: Option<String>,
	/// Cut applied to an embedded catalogue.
	pub mode: SubgraphMode,
	/// Horizontal grid spacing in world units.
	pub column_gap: f64,
	/// Vertical grid spacing in world units.
	pub row_gap: f64,
}

impl Default for GraphConfig {
	fn default() -> Self {
		let spacing = Spacing::default();
		Self {
			graph_url: None,
			focus_id: None,
			mode: SubgraphMode::default(),
			column_gap: spacing.column_gap,
			row_gap: spacing.row_gap,
		}
	}
}

impl GraphConfig {
	/// Parse the JSON configuration block.
	pub fn from_json(text: &str) -> Result<Self, GraphDataError> {
		serde_json::from_str(text).map_err(|e| GraphDataError::InvalidConfig(e.to_string()))
	}

	/// Grid spacing built from the configured gaps.
	pub fn spacing(&self) -> Spacing {
		Spacing {
			column_gap: self.column_gap,
			row_gap: self.row_gap,
		}
	}

	/// Let the page URL's `course` parameter override the configured focus.
	pub fn with_page_url(mut self, page_url: &str) -> Self {
		if let Some(focus) = focus_from_page_url(page_url) {
			self.focus_id = Some(focus);
		}
		self
	}
}

/// Non-empty `course` query parameter of `page_url`, if any.
pub fn focus_from_page_url(page_url: &str) -> Option<String> {
	let url = Url::parse(page_url).ok()?;
	url.query_pairs()
		.find(|(key, _)| key == FOCUS_QUERY_PARAM)
		.map(|(_, value)| value.trim().to_string())
		.filter(|value| !value.is_empty())
}

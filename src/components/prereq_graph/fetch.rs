//! Loading graph data for a focus course.
//!
//! Remote graphs come from `GET {graph_url}/{focus}`; embedded graphs are cut
//! down locally with [`subgraph::extract`]. Every load is tagged with a
//! [`RequestGeneration`] ticket so that a slow response for an old focus
//! never overwrites the graph for the current one.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;
use reqwest::Url;

use super::error::GraphDataError;
use super::subgraph::{self, SubgraphMode};
use super::types::GraphData;

/// Where the graph for a focus course comes from.
#[derive(Clone, Debug)]
pub enum GraphSource {
	/// Endpoint serving `{nodes, links}` at `{graph_url}/{focus}`.
	Remote {
		/// Base endpoint; the focus id is appended as a path segment.
		graph_url: String,
	},
	/// Full catalogue embedded in the page.
	Embedded {
		/// The whole catalogue.
		graph: Arc<GraphData>,
		/// Which cut around the focus to show.
		mode: SubgraphMode,
	},
}

impl GraphSource {
	/// Load the graph for `focus`. `page_url` resolves relative endpoints.
	pub async fn load(
		&self,
		focus: &str,
		page_url: Option<&str>,
	) -> Result<GraphData, GraphDataError> {
		match self {
			GraphSource::Remote { graph_url } => {
				let endpoint = graph_endpoint(graph_url, focus, page_url)?;
				fetch_graph(endpoint).await
			}
			GraphSource::Embedded { graph, mode } => Ok(subgraph::extract(graph, focus, *mode)),
		}
	}

	/// Short description used in log lines.
	pub fn describe(&self) -> String {
		match self {
			GraphSource::Remote { graph_url } => graph_url.clone(),
			GraphSource::Embedded { graph, mode } => {
				format!("embedded graph ({} nodes, {:?})", graph.nodes.len(), mode)
			}
		}
	}
}

/// Build the request URL for `focus`, percent-encoding it as one path
/// segment so course ids containing `/`, `?` or spaces stay intact.
/// Relative `graph_url`s are resolved against `page_url` when given.
pub fn graph_endpoint(
	graph_url: &str,
	focus: &str,
	page_url: Option<&str>,
) -> Result<Url, GraphDataError> {
	let invalid = |reason: String| GraphDataError::InvalidUrl {
		url: graph_url.to_string(),
		reason,
	};

	let parsed = match page_url {
		Some(base) => Url::parse(base).and_then(|base| base.join(graph_url)),
		None => Url::parse(graph_url),
	};
	let mut url = parsed.map_err(|e| invalid(e.to_string()))?;

	url.path_segments_mut()
		.map_err(|_| invalid("url cannot carry a path".into()))?
		.pop_if_empty()
		.push(focus);

	Ok(url)
}

/// Fetch and decode a `{nodes, links}` document.
pub async fn fetch_graph(endpoint: Url) -> Result<GraphData, GraphDataError> {
	debug!("prereq-graph: GET {}", endpoint);
	let response = reqwest::get(endpoint)
		.await
		.map_err(|e| GraphDataError::Request(e.to_string()))?;

	let status = response.status();
	if !status.is_success() {
		return Err(GraphDataError::Status(status.as_u16()));
	}

	response
		.json::<GraphData>()
		.await
		.map_err(|e| GraphDataError::Malformed(e.to_string()))
}

/// Monotonic request counter. Only the response carrying the latest ticket
/// may be applied.
#[derive(Debug, Default)]
pub struct RequestGeneration(AtomicU64);

impl RequestGeneration {
	/// Start a new request and return its ticket.
	pub fn begin(&self) -> u64 {
		self.0.fetch_add(1, Ordering::Relaxed) + 1
	}

	/// Whether `ticket` belongs to the most recent request.
	pub fn is_current(&self, ticket: u64) -> bool {
		self.0.load(Ordering::Relaxed) == ticket
	}

	/// Hand back the outcome of the request behind `ticket`, or `None` if a
	/// newer request has started since.
	pub fn settle<T>(&self, ticket: u64, outcome: T) -> Option<T> {
		self.is_current(ticket).then_some(outcome)
	}
}

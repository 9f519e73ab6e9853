//! prereq-graph: Interactive course prerequisite graph.
//!
//! This crate provides a WASM-based component that fetches the prerequisite
//! graph around a course, lays it out deterministically and highlights the
//! lineage of whichever course the user clicks.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

/// Leptos components.
pub mod components;
/// Page configuration.
pub mod config;

pub use components::prereq_graph::{
	Adjacency, GraphData, GraphDataError, GraphLink, GraphNode, GraphSource, GridPosition,
	HighlightState, Layout, PrereqGraph, RequestGeneration, Spacing, SubgraphMode, fetch_graph,
	graph_endpoint, layout, palette, subgraph,
};
pub use config::GraphConfig;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("prereq-graph: logging initialized");
}

/// Text content of the `<script>` element with the given id.
fn script_text(id: &str) -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Load page configuration from `<script id="graph-config">`, then apply
/// the `course` query parameter.
fn load_config() -> GraphConfig {
	let config = match script_text("graph-config") {
		Some(text) => GraphConfig::from_json(&text).unwrap_or_else(|e| {
			warn!("prereq-graph: {}", e);
			GraphConfig::default()
		}),
		None => GraphConfig::default(),
	};

	match web_sys::window().and_then(|w| w.location().href().ok()) {
		Some(href) => config.with_page_url(&href),
		None => config,
	}
}

/// Load a full catalogue graph from `<script id="graph-data">`.
/// Expected format: JSON with { nodes: [...], links: [...] }
fn load_graph_data() -> Option<GraphData> {
	let json_text = script_text("graph-data")?;

	match serde_json::from_str::<GraphData>(&json_text) {
		Ok(data) => {
			info!(
				"prereq-graph: loaded catalogue with {} nodes, {} links",
				data.nodes.len(),
				data.links.len()
			);
			Some(data)
		}
		Err(e) => {
			warn!("prereq-graph: failed to parse graph data: {}", e);
			None
		}
	}
}

/// Pick the graph source: a configured endpoint wins over an embedded
/// catalogue; with neither, an empty catalogue is used.
fn graph_source(config: &GraphConfig) -> GraphSource {
	match &config.graph_url {
		Some(graph_url) => GraphSource::Remote {
			graph_url: graph_url.clone(),
		},
		None => GraphSource::Embedded {
			graph: Arc::new(load_graph_data().unwrap_or_default()),
			mode: config.mode,
		},
	}
}

/// Main application component.
/// Reads page configuration and renders the prerequisite graph panel.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config();
	let source = graph_source(&config);
	let spacing = config.spacing();
	let focus_id = RwSignal::new(config.focus_id.clone());
	let source_signal = Signal::derive(move || source.clone());

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />
		<Title text="Course Prerequisites" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="graph-page">
			<div class="graph-overlay">
				<h1>{move || focus_id.get().unwrap_or_else(|| "Course Prerequisites".to_string())}</h1>
				<p class="subtitle">
					"Click a course to highlight its prerequisites and dependents. Scroll to zoom. Drag background to pan."
				</p>
			</div>
			<PrereqGraph focus_id=focus_id source=source_signal spacing=spacing />
		</div>
	}
}

// Integration tests reuse lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]
#![cfg(not(target_arch = "wasm32"))]

use std::net::SocketAddr;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use prereq_graph::{
	GraphData, GraphDataError, GraphSource, RequestGeneration, SubgraphMode, fetch_graph,
	graph_endpoint,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve one canned HTTP response on a local port and return its address.
async fn serve_once(status: &'static str, body: &'static str) -> SocketAddr {
	let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = listener.local_addr().unwrap();

	tokio::spawn(async move {
		let (mut socket, _) = listener.accept().await.unwrap();
		let mut request = Vec::new();
		let mut buf = [0u8; 1024];
		while !request.windows(4).any(|w| w == b"\r\n\r\n") {
			let n = socket.read(&mut buf).await.unwrap();
			if n == 0 {
				break;
			}
			request.extend_from_slice(&buf[..n]);
		}
		let response = format!(
			"HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
			status,
			body.len(),
			body
		);
		socket.write_all(response.as_bytes()).await.unwrap();
		socket.shutdown().await.unwrap();
	});

	addr
}

fn endpoint(addr: SocketAddr, focus: &str) -> reqwest::Url {
	graph_endpoint(&format!("http://{}/api/graph", addr), focus, None).unwrap()
}

#[tokio::test]
async fn fetch_decodes_graph_document() {
	let addr = serve_once(
		"200 OK",
		r#"{"nodes": [{"id": "CSC108H5"}, {"id": "CSC148H5"}], "links": [{"source": "CSC108H5", "target": "CSC148H5"}]}"#,
	)
	.await;

	let data = fetch_graph(endpoint(addr, "CSC148H5")).await.unwrap();
	assert_eq!(data, GraphData::from_edges(&["CSC108H5", "CSC148H5"], &[("CSC108H5", "CSC148H5")]));
}

#[tokio::test]
async fn server_error_maps_to_status() {
	let addr = serve_once("500 Internal Server Error", r#"{"detail": "boom"}"#).await;

	let err = fetch_graph(endpoint(addr, "CSC148H5")).await.unwrap_err();
	assert_eq!(err, GraphDataError::Status(500));
}

#[tokio::test]
async fn not_found_maps_to_status() {
	let addr = serve_once("404 Not Found", "").await;

	let err = fetch_graph(endpoint(addr, "NOPE000")).await.unwrap_err();
	assert_eq!(err, GraphDataError::Status(404));
}

#[tokio::test]
async fn bad_body_maps_to_malformed() {
	let addr = serve_once("200 OK", r#"{"nodes": "not a list"}"#).await;

	let err = fetch_graph(endpoint(addr, "CSC148H5")).await.unwrap_err();
	assert!(matches!(err, GraphDataError::Malformed(_)), "got {:?}", err);
}

#[tokio::test]
async fn refused_connection_maps_to_request() {
	let addr = {
		let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
		listener.local_addr().unwrap()
	};

	let err = fetch_graph(endpoint(addr, "CSC148H5")).await.unwrap_err();
	assert!(matches!(err, GraphDataError::Request(_)), "got {:?}", err);
}

#[tokio::test]
async fn remote_source_surfaces_invalid_url() {
	let source = GraphSource::Remote {
		graph_url: "/api/graph".into(),
	};
	let err = source.load("CSC148H5", None).await.unwrap_err();
	assert!(matches!(err, GraphDataError::InvalidUrl { .. }), "got {:?}", err);
}

#[tokio::test]
async fn only_latest_of_overlapping_loads_is_applied() {
	let catalogue = GraphData::from_edges(
		&["CSC108", "CSC148", "CSC207"],
		&[("CSC108", "CSC148"), ("CSC148", "CSC207")],
	);
	let source = GraphSource::Embedded {
		graph: Arc::new(catalogue),
		mode: SubgraphMode::Neighbors,
	};
	let generation = RequestGeneration::default();

	// The user picks CSC108, then CSC207 before the first load finishes.
	let first = generation.begin();
	let second = generation.begin();

	// The newer load completes first, the older one last.
	let newer = source.load("CSC207", None).await;
	let older = source.load("CSC108", None).await;

	let mut applied = Vec::new();
	for (ticket, result) in [(second, newer), (first, older)] {
		if let Some(data) = generation.settle(ticket, result) {
			applied.push(data.unwrap());
		}
	}

	assert_eq!(applied.len(), 1);
	let ids: Vec<&str> = applied[0].nodes.iter().map(|n| n.id.as_str()).collect();
	assert_eq!(ids, ["CSC148", "CSC207"]);
}

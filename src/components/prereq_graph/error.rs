//! Errors raised while loading or preparing a prerequisite graph.

use thiserror::Error;

/// Everything that can keep a graph from being displayed.
///
/// Variants carry owned strings rather than source errors so the value can
/// live inside reactive signals and be cloned into the view.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GraphDataError {
	/// The fetched node set does not contain the focus course.
	#[error("course `{0}` is not present in the graph")]
	MissingFocus(String),
	/// The graph endpoint could not be turned into a request URL.
	#[error("invalid graph url `{url}`: {reason}")]
	InvalidUrl {
		/// The configured endpoint.
		url: String,
		/// Parser message.
		reason: String,
	},
	/// The request never produced a response (network failure, CORS, ...).
	#[error("request failed: {0}")]
	Request(String),
	/// The server answered with a non-2xx status.
	#[error("server responded with status {0}")]
	Status(u16),
	/// The response body is not a `{nodes, links}` document.
	#[error("malformed graph payload: {0}")]
	Malformed(String),
	/// The embedded page configuration could not be parsed.
	#[error("invalid graph configuration: {0}")]
	InvalidConfig(String),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_focus_names_the_course() {
		let err = GraphDataError::MissingFocus("CSC207H5".into());
		assert_eq!(err.to_string(), "course `CSC207H5` is not present in the graph");
	}
}

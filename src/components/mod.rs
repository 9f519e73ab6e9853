//! UI components.

pub mod prereq_graph;

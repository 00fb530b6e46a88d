#![forbid(unsafe_code)]

//! Directed graph container used by the `strata` layout engine.
//!
//! The graph stores string-identified nodes and edges with caller-chosen label types, supports
//! parallel named edges (`multigraph`) and a nesting tree (`compound`), and iterates in insertion
//! order so that layouts are reproducible.

mod graph;

pub mod alg;

pub use graph::{EdgeKey, Graph, GraphOptions};

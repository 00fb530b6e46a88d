#![forbid(unsafe_code)]

//! Layered drawing of directed graphs.
//!
//! [`layout`] assigns every node of a [`Graph`] a position and every edge a polyline, arranging
//! the nodes on horizontal ranks so that edges point downwards (or along `rankdir`) wherever the
//! graph's cycles allow. Parallel edges and nested subgraphs are supported.
//!
//! The phases are public as well and can be run on their own: cycle breaking ([`acyclic`]),
//! [`nesting`] expansion, ranking ([`rank`]), [`normalize`], crossing reduction ([`order`]) and
//! the helpers in [`util`].
//!
//! ```
//! use strata::{EdgeLabel, Graph, GraphLabel, NodeLabel};
//!
//! let mut g: Graph<NodeLabel, EdgeLabel, GraphLabel> = Graph::default();
//! g.set_node("a", NodeLabel::new(40.0, 20.0));
//! g.set_node("b", NodeLabel::new(40.0, 20.0));
//! g.set_edge_with_label("a", "b", EdgeLabel::default());
//! strata::layout(&mut g).unwrap();
//! assert!(g.node("a").unwrap().y < g.node("b").unwrap().y);
//! ```

pub use strata_graph as graph;
pub use strata_graph::{EdgeKey, Graph, GraphOptions};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod acyclic;
pub mod border_segments;
pub mod context;
pub mod coordinate_system;
pub mod data;
pub mod debug;
mod error;
pub mod greedy_fas;
pub mod label;
pub mod nesting;
pub mod normalize;
pub mod observe;
pub mod order;
pub mod parent_dummy_chains;
mod pipeline;
pub mod position;
pub mod rank;
pub mod self_edges;
pub mod util;

pub use context::{DummyChain, LayoutContext};
pub use error::{Error, Result};
pub use label::{
    Acyclicer, BorderSide, Dummy, EdgeLabel, GraphLabel, LabelPos, NodeLabel, Point, RankDir,
    Ranker, Rect, SelfEdge,
};
pub use observe::{NoopObserver, Phase, PhaseObserver, PhaseStats, TracingObserver};
pub use pipeline::{layout, layout_with};

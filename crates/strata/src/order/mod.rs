//! Crossing reduction.
//!
//! Ranks are swept alternately downwards and upwards. On each rank the nodes are sorted by the
//! barycenter of their neighbors on the previous rank, with subgraphs kept contiguous. The
//! ordering with the fewest weighted crossings wins.

mod barycenter;
mod constraints;
mod cross_count;
mod init_order;
mod layer_graph;
mod resolve_conflicts;
mod sibling_order;
mod sort;
mod sort_subgraph;
mod sweep;

pub use barycenter::{BarycenterEntry, barycenter};
pub use constraints::{ConstraintGraph, add_subgraph_constraints};
pub use cross_count::cross_count;
pub use init_order::init_order;
pub use layer_graph::{LayerEdge, LayerGraph, LayerLabel, LayerNode, Relationship, build_layer_graph};
pub use resolve_conflicts::{SortEntry, resolve_conflicts};
pub use sibling_order::align_sibling_subgraphs;
pub use sort::sort;
pub use sort_subgraph::{SortResult, sort_subgraph};
pub use sweep::{OrderOptions, order};

//! Inspection helpers.

use crate::util::{LayoutGraph, build_layer_matrix};
use strata_graph::{Graph, GraphOptions};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DebugNode {
    pub label: String,
    /// Set on the per-rank container nodes.
    pub same_rank: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DebugEdge {
    /// Chains the nodes of one rank in order; not part of the input graph.
    pub invisible: bool,
}

/// A graph that, when drawn, shows the current ordering: every node is nested in a `layer{rank}`
/// container and consecutive nodes of a rank are chained by invisible edges.
pub fn debug_ordering<G: Default>(g: &LayoutGraph<G>) -> Graph<DebugNode, DebugEdge, ()> {
    let mut h: Graph<DebugNode, DebugEdge, ()> = Graph::new(GraphOptions {
        multigraph: true,
        compound: true,
    });
    for (v, node) in g.node_labels() {
        h.set_node(v, DebugNode {
            label: v.to_string(),
            same_rank: false,
        });
        if let Some(rank) = node.rank {
            h.set_parent(v, format!("layer{rank}"));
        }
    }
    for key in g.edges() {
        h.set_edge_key(key.clone(), DebugEdge::default());
    }
    for (i, layer) in build_layer_matrix(g).into_iter().enumerate() {
        h.set_node(format!("layer{i}"), DebugNode {
            label: format!("layer{i}"),
            same_rank: true,
        });
        for pair in layer.windows(2) {
            h.set_edge_with_label(pair[0].clone(), pair[1].clone(), DebugEdge { invisible: true });
        }
    }
    h
}

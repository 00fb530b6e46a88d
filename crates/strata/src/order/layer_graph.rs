use crate::label::NodeLabel;
use crate::util::LayoutGraph;
use strata_graph::{Graph, GraphOptions};

/// Node of a single-rank layer graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerNode {
    pub order: Option<usize>,
    /// Border nodes of a subgraph on this rank.
    pub border_left: Option<String>,
    pub border_right: Option<String>,
}

impl LayerNode {
    pub fn ordered(order: usize) -> Self {
        Self {
            order: Some(order),
            ..Default::default()
        }
    }

    pub fn bordered(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            order: None,
            border_left: Some(left.into()),
            border_right: Some(right.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerEdge {
    pub weight: f64,
}

impl Default for LayerEdge {
    fn default() -> Self {
        Self { weight: 1.0 }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerLabel {
    /// Synthetic parent of every top-level node on the rank.
    pub root: String,
}

pub type LayerGraph = Graph<LayerNode, LayerEdge, LayerLabel>;

/// Which neighbors of a rank contribute to its barycenters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relationship {
    /// Predecessors, for downward sweeps.
    InEdges,
    /// Successors, for upward sweeps.
    OutEdges,
}

/// Builds the graph used to sort `rank`.
///
/// It holds the nodes on `rank` (subgraphs included when they span it) nested as in `g` below a
/// fresh root, plus the neighbors selected by `relationship` as free top-level nodes. Every edge
/// points from the neighbor to the node on `rank`; parallel edges are merged by summing weights.
pub fn build_layer_graph<G: Default>(
    g: &LayoutGraph<G>,
    rank: i32,
    relationship: Relationship,
) -> LayerGraph {
    let root = unused_root_id(g);
    let members: Vec<String> = g
        .node_labels()
        .filter(|(_, node)| spans_rank(node, rank))
        .map(|(v, _)| v.to_string())
        .collect();
    layer_graph_with_root(g, rank, relationship, &root, &members)
}

pub(super) fn spans_rank(node: &NodeLabel, rank: i32) -> bool {
    node.rank == Some(rank)
        || matches!((node.min_rank, node.max_rank), (Some(lo), Some(hi)) if lo <= rank && rank <= hi)
}

pub(super) fn unused_root_id<G: Default>(g: &LayoutGraph<G>) -> String {
    let mut n = 0usize;
    loop {
        let id = format!("_root{n}");
        if !g.has_node(&id) {
            return id;
        }
        n += 1;
    }
}

/// [`build_layer_graph`] over a precomputed member list, in `g`'s node order.
pub(super) fn layer_graph_with_root<G: Default>(
    g: &LayoutGraph<G>,
    rank: i32,
    relationship: Relationship,
    root: &str,
    members: &[String],
) -> LayerGraph {
    let mut lg: LayerGraph = Graph::new(GraphOptions {
        compound: true,
        multigraph: false,
    });
    lg.set_graph(LayerLabel {
        root: root.to_string(),
    });
    lg.set_node(root, LayerNode::default());

    for v in members {
        let Some(node) = g.node(v) else {
            continue;
        };
        if !lg.has_node(v) {
            lg.set_node(v.clone(), LayerNode::default());
        }
        if let Some(label) = lg.node_mut(v) {
            label.order = node.order;
        }
        lg.set_parent(v.clone(), g.parent(v).unwrap_or(root));

        let incident = match relationship {
            Relationship::InEdges => g.in_edges(v, None),
            Relationship::OutEdges => g.out_edges(v, None),
        };
        for key in incident {
            let u = if key.v == *v { &key.w } else { &key.v };
            if !lg.has_node(u) {
                let order = g.node(u).and_then(|n| n.order);
                lg.set_node(u.clone(), LayerNode {
                    order,
                    ..Default::default()
                });
            }
            let weight = g.edge_by_key(&key).map_or(0.0, |e| e.weight);
            let merged = lg.edge(u, v, None).map_or(0.0, |e| e.weight);
            lg.set_edge_with_label(u.clone(), v.clone(), LayerEdge {
                weight: weight + merged,
            });
        }

        if node.min_rank.is_some() {
            let border = |side: &[Option<String>]| {
                usize::try_from(rank)
                    .ok()
                    .and_then(|r| side.get(r).cloned().flatten())
            };
            if let Some(label) = lg.node_mut(v) {
                label.border_left = border(&node.border_left);
                label.border_right = border(&node.border_right);
            }
        }
    }
    lg
}

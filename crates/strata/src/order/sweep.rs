use super::layer_graph::{layer_graph_with_root, spans_rank, unused_root_id};
use super::{
    ConstraintGraph, Relationship, add_subgraph_constraints, align_sibling_subgraphs, cross_count,
    init_order, sort_subgraph,
};
use crate::util::{LayoutGraph, build_layer_matrix, max_rank};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderOptions {
    /// Sweeps allowed, counting the best one, before giving up on finding a better ordering.
    pub patience: usize,
}

impl Default for OrderOptions {
    fn default() -> Self {
        Self { patience: 4 }
    }
}

/// Assigns `order` to every leaf node so that nodes on one rank get `0..n` and weighted edge
/// crossings are (heuristically) minimized.
///
/// Subgraphs stay contiguous on each rank when their border nodes are present, which requires
/// `min_rank`/`max_rank` and per-rank borders on subgraph nodes. Sibling subgraphs end up in the
/// same left-to-right order on every rank they share.
pub fn order<G: Default>(g: &mut LayoutGraph<G>, options: OrderOptions) {
    let max_rank = max_rank(g);
    let layering = init_order(g);
    assign_order(g, &layering);

    let root = unused_root_id(g);
    let members = members_by_rank(g, max_rank);
    let down: Vec<i32> = (1..=max_rank).collect();
    let up: Vec<i32> = (0..max_rank).rev().collect();

    let mut best: Option<Vec<Vec<String>>> = None;
    let mut best_cc = f64::INFINITY;
    let mut since_best = 0;
    let mut i = 0usize;
    while best.is_none() || since_best < options.patience {
        let (ranks, relationship) = if i % 2 == 1 {
            (&down, Relationship::InEdges)
        } else {
            (&up, Relationship::OutEdges)
        };
        sweep(g, ranks, relationship, i % 4 >= 2, &root, &members);
        i += 1;

        // The first sweep never reaches the bottom rank, which still holds the initial order.
        if i < 2 {
            continue;
        }
        let layering = build_layer_matrix(g);
        let cc = cross_count(g, &layering);
        if cc < best_cc {
            since_best = 0;
            best_cc = cc;
            best = Some(layering);
        }
        since_best += 1;
    }
    tracing::trace!(sweeps = i, crossings = best_cc, "ordering done");

    if let Some(best) = best {
        assign_order(g, &best);
    }
    align_sibling_subgraphs(g);
}

fn members_by_rank<G: Default>(g: &LayoutGraph<G>, max_rank: i32) -> Vec<Vec<String>> {
    (0..=max_rank.max(0))
        .map(|rank| {
            g.node_labels()
                .filter(|(_, node)| spans_rank(node, rank))
                .map(|(v, _)| v.to_string())
                .collect()
        })
        .collect()
}

/// Sorts each rank of `ranks` in turn. Every rank sees the orders written by the previous one.
fn sweep<G: Default>(
    g: &mut LayoutGraph<G>,
    ranks: &[i32],
    relationship: Relationship,
    bias_right: bool,
    root: &str,
    members: &[Vec<String>],
) {
    let mut cg = ConstraintGraph::default();
    for &rank in ranks {
        let Some(on_rank) = usize::try_from(rank).ok().and_then(|r| members.get(r)) else {
            continue;
        };
        let lg = layer_graph_with_root(g, rank, relationship, root, on_rank);
        let sorted = sort_subgraph(&lg, root, &cg, bias_right);
        for (i, v) in sorted.vs.iter().enumerate() {
            if let Some(node) = g.node_mut(v) {
                node.order = Some(i);
            }
        }
        add_subgraph_constraints(&lg, &mut cg, &sorted.vs);
    }
}

fn assign_order<G: Default>(g: &mut LayoutGraph<G>, layering: &[Vec<String>]) {
    for layer in layering {
        for (i, v) in layer.iter().enumerate() {
            if let Some(node) = g.node_mut(v) {
                node.order = Some(i);
            }
        }
    }
}

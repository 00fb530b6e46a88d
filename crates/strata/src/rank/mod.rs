//! Rank assignment.
//!
//! All rankers work on a [`RankGraph`]: an index arena holding the leaf nodes of the layout graph
//! and its edges with parallel edges merged (weights summed, largest `minlen` kept). Ranks are
//! written back to the layout graph once the selected strategy has finished.

mod arena;
pub mod feasible_tree;
pub mod network_simplex;
pub mod util;

pub(crate) use arena::RankGraph;

use crate::label::Ranker;
use crate::util::LayoutGraph;

/// Ranks every leaf node of `g` with `ranker` and shifts the result so the lowest rank is 0.
///
/// Subgraph nodes are not ranked. The graph must be acyclic; on a cyclic graph the ranks are
/// unspecified.
pub fn rank<G: Default>(g: &mut LayoutGraph<G>, ranker: Ranker) {
    let mut rg = RankGraph::from_graph(g);
    if rg.is_empty() {
        return;
    }
    rg.for_each_component(|component| match ranker {
        Ranker::LongestPath => util::longest_path_ranks(component),
        Ranker::TightTree => {
            util::longest_path_ranks(component);
            feasible_tree::feasible_tree_ranks(component);
        }
        Ranker::NetworkSimplex => network_simplex::network_simplex_ranks(component),
    });
    rg.normalize();
    rg.write_back(g);
}

use rustc_hash::FxHashMap;
use std::iter::successors;
use strata_graph::Graph;

/// Left-to-right constraints between sibling subgraphs, accumulated over a sweep.
pub type ConstraintGraph = Graph<(), (), ()>;

/// Records in `cg` which sibling subgraphs follow each other in the sorted rank `vs`.
///
/// Each node's enclosing subgraphs are visited innermost first. The first one that differs from
/// the subgraph last seen under the same parent gets an edge from that one; the levels above it
/// are already ordered by that edge.
pub fn add_subgraph_constraints<N, E, G>(
    g: &Graph<N, E, G>,
    cg: &mut ConstraintGraph,
    vs: &[String],
) where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    // Keyed by the enclosing parent, `None` for the top level.
    let mut last_under: FxHashMap<Option<&str>, &str> = FxHashMap::default();
    for v in vs {
        for sg in successors(g.parent(v), |&sg| g.parent(sg)) {
            let before = last_under.insert(g.parent(sg), sg);
            if let Some(left) = before.filter(|&left| left != sg) {
                cg.set_edge(left, sg);
                break;
            }
        }
    }
}

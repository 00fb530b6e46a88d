use crate::util::LayoutGraph;
use rustc_hash::FxHashSet;

/// Initial layering: a depth-first walk from the leaf nodes in rank order, appending each node to
/// its rank as it is first reached. Trees come out without crossings.
///
/// Subgraph nodes are skipped; leaf nodes without a rank are ignored.
pub fn init_order<G: Default>(g: &LayoutGraph<G>) -> Vec<Vec<String>> {
    let mut simple: Vec<(&str, i32)> = g
        .node_labels()
        .filter(|(v, _)| !g.has_children(v))
        .filter_map(|(v, n)| Some((v, n.rank?)))
        .collect();
    let Some(max_rank) = simple.iter().map(|&(_, r)| r).max() else {
        return Vec::new();
    };
    let mut layers: Vec<Vec<String>> = vec![Vec::new(); (max_rank.max(0) + 1) as usize];
    simple.sort_by_key(|&(_, r)| r);

    let mut visited: FxHashSet<&str> = FxHashSet::default();
    for (start, _) in simple {
        let mut stack = vec![start];
        while let Some(v) = stack.pop() {
            if !visited.insert(v) {
                continue;
            }
            let layer = g
                .node(v)
                .and_then(|n| n.rank)
                .and_then(|r| usize::try_from(r).ok())
                .and_then(|r| layers.get_mut(r));
            if let Some(layer) = layer {
                layer.push(v.to_string());
            }
            // Reversed so the first successor is visited first.
            stack.extend(g.successors(v).into_iter().rev());
        }
    }
    layers
}

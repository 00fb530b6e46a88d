use super::RankGraph;
use crate::util::LayoutGraph;
use strata_graph::EdgeKey;

/// Longest-path ranking: sinks get rank 0 and every other node sits as low as its out-edges'
/// `minlen` allow, so ranks are zero or negative.
///
/// Fast, but tends to stretch edges out of sources.
pub fn longest_path<G: Default>(g: &mut LayoutGraph<G>) {
    let mut rg = RankGraph::from_graph(g);
    longest_path_ranks(&mut rg);
    rg.write_back(g);
}

pub(crate) fn longest_path_ranks(rg: &mut RankGraph) {
    let mut seen = vec![false; rg.len()];
    let sources: Vec<usize> = rg.sources().collect();

    for source in sources {
        if seen[source] {
            continue;
        }
        seen[source] = true;
        // (node, next out-edge to look at)
        let mut stack = vec![(source, 0usize)];
        while let Some(top) = stack.last_mut() {
            let v = top.0;
            if let Some(&e) = rg.outs[v].get(top.1) {
                top.1 += 1;
                let w = rg.edges[e].w;
                if !seen[w] {
                    seen[w] = true;
                    stack.push((w, 0));
                }
                continue;
            }
            let rank = rg.outs[v]
                .iter()
                .map(|&e| rg.rank[rg.edges[e].w] - rg.edges[e].minlen)
                .min()
                .unwrap_or(0);
            rg.rank[v] = rank;
            stack.pop();
        }
    }
}

/// `rank(w) - rank(v) - minlen` for the edge `key`. Missing ranks count as 0.
pub fn slack<G: Default>(g: &LayoutGraph<G>, key: &EdgeKey) -> i32 {
    let rank = |v: &str| g.node(v).and_then(|n| n.rank).unwrap_or(0);
    let minlen = g.edge_by_key(key).map_or(1, |e| e.minlen as i32);
    rank(&key.w) - rank(&key.v) - minlen
}

//! Move the dummy nodes of each long edge into the subgraphs the edge passes through.
//!
//! An edge from `v` to `w` climbs from `v` up to the lowest common ancestor of both endpoints and
//! descends again towards `w`. Each dummy gets as parent the deepest subgraph on that path whose
//! rank span still covers the dummy's rank.

use crate::context::LayoutContext;
use crate::util::LayoutGraph;
use rustc_hash::FxHashMap;

/// Postorder interval of a node in the nesting tree: `low..=lim` covers its subtree.
#[derive(Debug, Clone, Copy)]
struct Span {
    low: usize,
    lim: usize,
}

pub fn run<G: Default>(g: &mut LayoutGraph<G>, ctx: &LayoutContext) {
    let spans = postorder(g);

    for chain in &ctx.dummy_chains {
        let edge = &chain.edge;
        let (path, lca) = find_path(g, &spans, &edge.v, &edge.w);

        let mut v = chain.head.clone();
        let mut idx = 0usize;
        let mut ascending = true;
        while v != edge.w {
            let rank = g.node(&v).and_then(|n| n.rank).unwrap_or(0);

            if ascending {
                while path.get(idx).cloned().flatten() != lca
                    && path
                        .get(idx)
                        .and_then(|p| p.as_deref())
                        .and_then(|p| g.node(p))
                        .and_then(|n| n.max_rank)
                        .is_some_and(|max| max < rank)
                {
                    idx += 1;
                }
                if path.get(idx).cloned().flatten() == lca {
                    ascending = false;
                }
            }
            if !ascending {
                while idx + 1 < path.len()
                    && path[idx + 1]
                        .as_deref()
                        .and_then(|p| g.node(p))
                        .and_then(|n| n.min_rank)
                        .is_some_and(|min| min <= rank)
                {
                    idx += 1;
                }
            }

            match path.get(idx).cloned().flatten() {
                Some(parent) => {
                    g.set_parent(v.clone(), parent);
                }
                None => {
                    g.clear_parent(&v);
                }
            }

            let Some(next) = g.successors(&v).first().map(|s| s.to_string()) else {
                break;
            };
            v = next;
        }
    }
}

/// Ancestors of `v` up to and including their lowest common ancestor with `w`, followed by the
/// ancestors of `w` below it, top-down. `None` stands for the root of the nesting tree.
fn find_path<G: Default>(
    g: &LayoutGraph<G>,
    spans: &FxHashMap<String, Span>,
    v: &str,
    w: &str,
) -> (Vec<Option<String>>, Option<String>) {
    let (Some(vs), Some(ws)) = (spans.get(v), spans.get(w)) else {
        return (vec![None], None);
    };
    let low = vs.low.min(ws.low);
    let lim = vs.lim.max(ws.lim);

    let mut path = Vec::new();
    let mut cur = v.to_string();
    let lca = loop {
        let parent = g.parent(&cur).map(String::from);
        path.push(parent.clone());
        let Some(p) = parent else {
            break None;
        };
        if spans.get(&p).is_some_and(|s| s.low <= low && lim <= s.lim) {
            break Some(p);
        }
        cur = p;
    };

    let mut down = Vec::new();
    let mut cur = w.to_string();
    while let Some(p) = g.parent(&cur).map(String::from) {
        if Some(&p) == lca.as_ref() {
            break;
        }
        down.push(Some(p.clone()));
        cur = p;
    }
    path.extend(down.into_iter().rev());
    (path, lca)
}

fn postorder<G: Default>(g: &LayoutGraph<G>) -> FxHashMap<String, Span> {
    fn visit<G: Default>(
        g: &LayoutGraph<G>,
        v: &str,
        next: &mut usize,
        out: &mut FxHashMap<String, Span>,
    ) {
        let low = *next;
        for child in g.children(v) {
            visit(g, child, next, out);
        }
        out.insert(v.to_string(), Span { low, lim: *next });
        *next += 1;
    }

    let mut out = FxHashMap::default();
    let mut next = 0usize;
    for v in g.root_children() {
        visit(g, v, &mut next, &mut out);
    }
    out
}

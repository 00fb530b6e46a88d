//! Make the graph acyclic by reversing a feedback arc set, and restore it afterwards.
//!
//! A reversed edge is re-inserted as `w -> v` under a fresh `rev{n}` name and remembers its
//! original name in `forward_name`.

use crate::greedy_fas::greedy_fas_with_weight;
use crate::label::{Acyclicer, EdgeLabel, GraphLabel, NodeLabel};
use rustc_hash::FxHashSet;
use strata_graph::{EdgeKey, Graph};

pub fn run(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>, acyclicer: Acyclicer) {
    let fas = match acyclicer {
        Acyclicer::Greedy => greedy_fas_with_weight(g, |label: &EdgeLabel| {
            if label.weight.is_finite() {
                label.weight.max(0.0)
            } else {
                0.0
            }
        }),
        Acyclicer::Dfs => dfs_fas(g),
    };

    for key in fas {
        if key.v == key.w {
            continue;
        }
        let Some(mut label) = g.remove_edge_key(&key) else {
            continue;
        };
        label.forward_name = key.name.clone();
        label.reversed = true;
        let name = fresh_reverse_name(g, &key.w, &key.v);
        g.set_named_edge(key.w, key.v, Some(name), label);
    }
}

pub fn undo(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    let reversed: Vec<EdgeKey> = g
        .edge_labels()
        .filter(|(_, label)| label.reversed)
        .map(|(key, _)| key.clone())
        .collect();
    for key in reversed {
        let Some(mut label) = g.remove_edge_key(&key) else {
            continue;
        };
        let name = label.forward_name.take();
        label.reversed = false;
        g.set_named_edge(key.w, key.v, name, label);
    }
}

fn fresh_reverse_name(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>, v: &str, w: &str) -> String {
    let mut n = 1usize;
    loop {
        let candidate = format!("rev{n}");
        if !g.has_edge(v, w, Some(&candidate)) {
            return candidate;
        }
        n += 1;
    }
}

/// Edges closing a cycle during a depth-first walk in node insertion order.
pub fn dfs_fas<N, E, G>(g: &Graph<N, E, G>) -> Vec<EdgeKey>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    let mut fas = Vec::new();
    let mut visited: FxHashSet<String> = FxHashSet::default();
    let mut on_stack: FxHashSet<String> = FxHashSet::default();

    for root in g.nodes() {
        if !visited.insert(root.to_string()) {
            continue;
        }
        on_stack.insert(root.to_string());
        let mut stack: Vec<(Vec<EdgeKey>, usize)> = vec![(g.out_edges(root, None), 0)];
        let mut path: Vec<String> = vec![root.to_string()];
        while let Some((outs, next)) = stack.last_mut() {
            let Some(edge) = outs.get(*next).cloned() else {
                if let Some(v) = path.pop() {
                    on_stack.remove(&v);
                }
                stack.pop();
                continue;
            };
            *next += 1;
            if on_stack.contains(&edge.w) {
                if edge.v != edge.w {
                    fas.push(edge);
                }
            } else if visited.insert(edge.w.clone()) {
                on_stack.insert(edge.w.clone());
                stack.push((g.out_edges(&edge.w, None), 0));
                path.push(edge.w);
            }
        }
    }
    fas
}

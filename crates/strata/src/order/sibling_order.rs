use crate::util::{LayoutGraph, build_layer_matrix};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

/// Puts sibling subgraphs in the same left-to-right order on every rank they share.
///
/// Each subgraph is moved as a whole block into the slots the blocks already occupy, so
/// contiguity and border extremity are preserved. When the ranks already agree (the usual case)
/// nothing moves. Otherwise the siblings follow their observed precedences, falling back to the
/// mean relative position when those contradict each other.
pub fn align_sibling_subgraphs<G: Default>(g: &mut LayoutGraph<G>) {
    if !g.is_compound() {
        return;
    }
    let mut layering = build_layer_matrix(g);
    let paths: FxHashMap<String, Vec<String>> = layering
        .iter()
        .flatten()
        .map(|v| {
            let mut path = vec![v.clone()];
            let mut cur = g.parent(v);
            while let Some(p) = cur {
                path.push(p.to_string());
                cur = g.parent(p);
            }
            (v.clone(), path)
        })
        .collect();

    let mut levels: VecDeque<Option<String>> = VecDeque::from([None]);
    while let Some(level) = levels.pop_front() {
        let children = match level.as_deref() {
            Some(p) => g.children(p),
            None => g.root_children(),
        };
        let subgraphs: FxHashSet<&str> =
            children.into_iter().filter(|c| g.has_children(c)).collect();
        if subgraphs.is_empty() {
            continue;
        }
        let block_of = |v: &str| -> Option<String> {
            let path = paths.get(v)?;
            let top = match level.as_deref() {
                None => path.last()?,
                Some(p) => {
                    let at = path.iter().position(|a| a == p)?;
                    path.get(at.checked_sub(1)?)?
                }
            };
            subgraphs.contains(top.as_str()).then(|| top.clone())
        };
        reorder_blocks(&mut layering, block_of);
        levels.extend(subgraphs.into_iter().map(|s| Some(s.to_string())));
    }

    for layer in &layering {
        for (i, v) in layer.iter().enumerate() {
            if let Some(node) = g.node_mut(v) {
                node.order = Some(i);
            }
        }
    }
}

fn reorder_blocks(layering: &mut [Vec<String>], block_of: impl Fn(&str) -> Option<String>) {
    let blocks: Vec<Vec<String>> = layering
        .iter()
        .map(|layer| {
            let mut seen: Vec<String> = Vec::new();
            for v in layer {
                if let Some(b) = block_of(v.as_str()).filter(|b| !seen.contains(b)) {
                    seen.push(b);
                }
            }
            seen
        })
        .collect();

    let rank = sibling_rank(layering, &blocks, &block_of);

    for (layer, present) in layering.iter_mut().zip(&blocks) {
        if present.len() < 2 {
            continue;
        }
        let mut wanted = present.clone();
        wanted.sort_by_key(|b| rank.get(b).copied().unwrap_or(usize::MAX));
        if &wanted == present {
            continue;
        }
        let mut members: FxHashMap<String, Vec<String>> = FxHashMap::default();
        for v in layer.iter() {
            if let Some(b) = block_of(v.as_str()) {
                members.entry(b).or_default().push(v.clone());
            }
        }
        let mut slot = 0;
        let mut out = Vec::with_capacity(layer.len());
        let mut opened: FxHashSet<String> = FxHashSet::default();
        for v in layer.iter() {
            match block_of(v.as_str()) {
                None => out.push(v.clone()),
                Some(b) => {
                    if opened.insert(b) {
                        if let Some(vs) = members.get(&wanted[slot]) {
                            out.extend(vs.iter().cloned());
                        }
                        slot += 1;
                    }
                }
            }
        }
        *layer = out;
    }
}

/// A total order over the siblings seen in `blocks`: a topological order of the left-of
/// relations observed on each rank, ties and cycles broken by mean relative position.
fn sibling_rank(
    layering: &[Vec<String>],
    blocks: &[Vec<String>],
    block_of: &impl Fn(&str) -> Option<String>,
) -> FxHashMap<String, usize> {
    let mut mean: FxHashMap<String, (f64, f64)> = FxHashMap::default();
    for layer in layering {
        let len = layer.len().max(1) as f64;
        let mut seen: FxHashSet<String> = FxHashSet::default();
        for (i, v) in layer.iter().enumerate() {
            if let Some(b) = block_of(v.as_str()).filter(|b| seen.insert(b.clone())) {
                let entry = mean.entry(b).or_insert((0.0, 0.0));
                entry.0 += i as f64 / len;
                entry.1 += 1.0;
            }
        }
    }
    let key = |b: &str| mean.get(b).map_or(0.0, |&(sum, n)| sum / n);

    let mut succs: FxHashMap<&str, FxHashSet<&str>> = FxHashMap::default();
    let mut indegree: FxHashMap<&str, usize> = mean.keys().map(|b| (b.as_str(), 0)).collect();
    for present in blocks {
        for pair in present.windows(2) {
            if succs.entry(pair[0].as_str()).or_default().insert(pair[1].as_str()) {
                *indegree.entry(pair[1].as_str()).or_insert(0) += 1;
            }
        }
    }

    let mut by_key: Vec<&str> = indegree.keys().copied().collect();
    by_key.sort_by(|a, b| key(a).total_cmp(&key(b)).then_with(|| a.cmp(b)));

    let mut ordered: Vec<&str> = Vec::with_capacity(by_key.len());
    let mut done: FxHashSet<&str> = FxHashSet::default();
    while ordered.len() < by_key.len() {
        let Some(next) = by_key
            .iter()
            .copied()
            .find(|b| !done.contains(b) && indegree.get(b) == Some(&0))
        else {
            // Contradicting ranks: no order keeps every relation.
            ordered = by_key.clone();
            break;
        };
        done.insert(next);
        ordered.push(next);
        for s in succs.get(next).into_iter().flatten() {
            if let Some(d) = indegree.get_mut(s) {
                *d -= 1;
            }
        }
    }
    ordered
        .into_iter()
        .enumerate()
        .map(|(i, b)| (b.to_string(), i))
        .collect()
}

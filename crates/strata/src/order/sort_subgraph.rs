use super::{ConstraintGraph, LayerGraph, barycenter, resolve_conflicts, sort};
use rustc_hash::FxHashMap;

/// Ordering of a subgraph's leaves, with the aggregate barycenter of the subgraph.
#[derive(Debug, Clone, PartialEq)]
pub struct SortResult {
    pub vs: Vec<String>,
    pub barycenter: Option<f64>,
    pub weight: Option<f64>,
}

/// Sorts the children of `v` in `g` recursively. Nested subgraphs are sorted first and then move
/// as a single block; border nodes are pinned to both ends.
pub fn sort_subgraph(
    g: &LayerGraph,
    v: &str,
    cg: &ConstraintGraph,
    bias_right: bool,
) -> SortResult {
    let (border_left, border_right) = match g.node(v) {
        Some(node) => (node.border_left.clone(), node.border_right.clone()),
        None => (None, None),
    };

    let movable: Vec<String> = g
        .children(v)
        .into_iter()
        .filter(|w| {
            border_left.as_deref() != Some(*w) && border_right.as_deref() != Some(*w)
        })
        .map(String::from)
        .collect();

    let mut entries = barycenter(g, &movable);
    let mut subgraphs: FxHashMap<String, SortResult> = FxHashMap::default();
    for entry in &mut entries {
        if !g.has_children(&entry.v) {
            continue;
        }
        let nested = sort_subgraph(g, &entry.v, cg, bias_right);
        if let (Some(b), Some(w)) = (nested.barycenter, nested.weight) {
            match (entry.barycenter, entry.weight) {
                (Some(eb), Some(ew)) => {
                    entry.barycenter = Some((eb * ew + b * w) / (ew + w));
                    entry.weight = Some(ew + w);
                }
                _ => {
                    entry.barycenter = Some(b);
                    entry.weight = Some(w);
                }
            }
        }
        subgraphs.insert(entry.v.clone(), nested);
    }

    let mut resolved = resolve_conflicts(&entries, cg);
    for entry in &mut resolved {
        entry.vs = entry
            .vs
            .drain(..)
            .flat_map(|w| match subgraphs.remove(&w) {
                Some(nested) => nested.vs,
                None => vec![w],
            })
            .collect();
    }

    let mut result = sort(resolved, bias_right);
    if let (Some(bl), Some(br)) = (border_left, border_right) {
        let bl_pred = g.predecessors(&bl).first().and_then(|u| g.node(u)?.order);
        let br_pred = g.predecessors(&br).first().and_then(|u| g.node(u)?.order);
        if let (Some(lo), Some(ro)) = (bl_pred, br_pred) {
            let (b, w) = (result.barycenter.unwrap_or(0.0), result.weight.unwrap_or(0.0));
            result.barycenter = Some((b * w + lo as f64 + ro as f64) / (w + 2.0));
            result.weight = Some(w + 2.0);
        }
        result.vs.insert(0, bl);
        result.vs.push(br);
    }
    result
}

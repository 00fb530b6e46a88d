//! Reconciles barycenter order with the constraint graph.
//!
//! An edge `u -> v` in the constraint graph says `u` must end up left of `v`. When their
//! barycenters disagree, the two entries are merged into one with the combined barycenter, and
//! `u`'s nodes go first. Entries are visited in topological order of the constraint graph.

use super::{BarycenterEntry, ConstraintGraph};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct SortEntry {
    pub vs: Vec<String>,
    /// Smallest input position among the merged entries.
    pub i: usize,
    pub barycenter: Option<f64>,
    pub weight: Option<f64>,
}

#[derive(Debug)]
struct Slot {
    entry: SortEntry,
    indegree: usize,
    ins: Vec<usize>,
    outs: Vec<usize>,
    merged: bool,
}

pub fn resolve_conflicts(entries: &[BarycenterEntry], cg: &ConstraintGraph) -> Vec<SortEntry> {
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    let mut slots: Vec<Slot> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            index.insert(entry.v.as_str(), i);
            Slot {
                entry: SortEntry {
                    vs: vec![entry.v.clone()],
                    i,
                    barycenter: entry.barycenter,
                    weight: entry.weight,
                },
                indegree: 0,
                ins: Vec::new(),
                outs: Vec::new(),
                merged: false,
            }
        })
        .collect();

    for key in cg.edges() {
        let (Some(&v), Some(&w)) = (index.get(key.v.as_str()), index.get(key.w.as_str())) else {
            continue;
        };
        slots[w].indegree += 1;
        slots[v].outs.push(w);
    }

    let mut sources: Vec<usize> = (0..slots.len())
        .filter(|&i| slots[i].indegree == 0)
        .collect();
    let mut visited = Vec::with_capacity(slots.len());
    while let Some(v) = sources.pop() {
        visited.push(v);

        let ins = std::mem::take(&mut slots[v].ins);
        for &u in ins.iter().rev() {
            if slots[u].merged {
                continue;
            }
            let keep_order = matches!(
                (slots[u].entry.barycenter, slots[v].entry.barycenter),
                (Some(bu), Some(bv)) if bu < bv
            );
            if !keep_order {
                merge(&mut slots, v, u);
            }
        }

        let outs = std::mem::take(&mut slots[v].outs);
        for w in outs {
            slots[w].ins.push(v);
            slots[w].indegree -= 1;
            if slots[w].indegree == 0 {
                sources.push(w);
            }
        }
    }

    visited
        .into_iter()
        .filter(|&i| !slots[i].merged)
        .map(|i| slots[i].entry.clone())
        .collect()
}

/// Folds `source` into `target`, placing the source's nodes first.
fn merge(slots: &mut [Slot], target: usize, source: usize) {
    let mut sum = 0.0;
    let mut weight = 0.0;
    for entry in [&slots[target].entry, &slots[source].entry] {
        if let (Some(b), Some(w)) = (entry.barycenter, entry.weight) {
            if w != 0.0 {
                sum += b * w;
                weight += w;
            }
        }
    }

    let source_vs = std::mem::take(&mut slots[source].entry.vs);
    let source_i = slots[source].entry.i;
    slots[source].merged = true;

    let target = &mut slots[target].entry;
    target.vs.splice(0..0, source_vs);
    target.i = target.i.min(source_i);
    if weight != 0.0 {
        target.barycenter = Some(sum / weight);
        target.weight = Some(weight);
    } else {
        target.barycenter = None;
        target.weight = None;
    }
}

//! Greedy feedback arc set (Eades, Lin and Smyth).
//!
//! Nodes are bucketed by `out-weight - in-weight`. Sinks are peeled to the back of the ordering,
//! sources to the front, and otherwise the node with the largest surplus goes to the front while
//! its remaining in-edges join the arc set.
//!
//! Buckets exist only for surpluses that actually occur, so the bucket count is bounded by the
//! number of re-bucketings rather than by the magnitude of the weights.

use crate::data::BucketList;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use strata_graph::{EdgeKey, Graph};

pub fn greedy_fas<N, E, G>(g: &Graph<N, E, G>) -> Vec<EdgeKey>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    greedy_fas_with_weight(g, |_| 1.0)
}

/// Like [`greedy_fas`], weighting each edge by `weight_fn`. Parallel edges are merged (weights
/// summed) before selection and expanded again in the result.
pub fn greedy_fas_with_weight<N, E, G>(
    g: &Graph<N, E, G>,
    weight_fn: impl Fn(&E) -> f64,
) -> Vec<EdgeKey>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    if g.node_count() <= 1 {
        return Vec::new();
    }

    let mut state = FasState::build(g, weight_fn);
    let picked = state.run();

    let ids: Vec<&str> = g.nodes().collect();
    picked
        .into_iter()
        .flat_map(|(u, v)| g.out_edges(ids[u], Some(ids[v])))
        .collect()
}

const SINKS: usize = 0;
const SOURCES: usize = 1;

struct FasEdge {
    tail: usize,
    head: usize,
    weight: f64,
}

/// Bucket key, ordered with `f64::total_cmp`.
#[derive(Debug, Clone, Copy)]
struct Surplus(f64);

impl PartialEq for Surplus {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Surplus {}

impl PartialOrd for Surplus {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Surplus {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

struct FasState {
    edges: Vec<FasEdge>,
    ins: Vec<Vec<usize>>,
    outs: Vec<Vec<usize>>,
    in_w: Vec<f64>,
    out_w: Vec<f64>,
    /// Edges to or from nodes still in the graph.
    in_live: Vec<usize>,
    out_live: Vec<usize>,
    alive: Vec<bool>,
    remaining: usize,
    buckets: BucketList,
    by_surplus: BTreeMap<Surplus, usize>,
    spare: Vec<usize>,
}

impl FasState {
    fn build<N, E, G>(g: &Graph<N, E, G>, weight_fn: impl Fn(&E) -> f64) -> Self
    where
        N: Default + 'static,
        E: Default + 'static,
        G: Default,
    {
        let index: FxHashMap<&str, usize> = g.nodes().enumerate().map(|(i, v)| (v, i)).collect();
        let n = index.len();

        let mut edges: Vec<FasEdge> = Vec::new();
        let mut merged: FxHashMap<(usize, usize), usize> = FxHashMap::default();
        for (key, label) in g.edge_labels() {
            let (Some(&u), Some(&v)) = (index.get(key.v.as_str()), index.get(key.w.as_str())) else {
                continue;
            };
            let weight = weight_fn(label);
            match merged.get(&(u, v)) {
                Some(&ix) => edges[ix].weight += weight,
                None => {
                    merged.insert((u, v), edges.len());
                    edges.push(FasEdge {
                        tail: u,
                        head: v,
                        weight,
                    });
                }
            }
        }

        let mut state = Self {
            edges: Vec::new(),
            ins: vec![Vec::new(); n],
            outs: vec![Vec::new(); n],
            in_w: vec![0.0; n],
            out_w: vec![0.0; n],
            in_live: vec![0; n],
            out_live: vec![0; n],
            alive: vec![true; n],
            remaining: n,
            buckets: BucketList::new(2, n),
            by_surplus: BTreeMap::new(),
            spare: Vec::new(),
        };
        for (ix, e) in edges.iter().enumerate() {
            state.outs[e.tail].push(ix);
            state.ins[e.head].push(ix);
            state.out_w[e.tail] += e.weight;
            state.in_w[e.head] += e.weight;
            state.out_live[e.tail] += 1;
            state.in_live[e.head] += 1;
        }
        state.edges = edges;
        for v in 0..n {
            state.assign_bucket(v);
        }
        state
    }

    fn assign_bucket(&mut self, v: usize) {
        let list = if self.out_live[v] == 0 {
            SINKS
        } else if self.in_live[v] == 0 {
            SOURCES
        } else {
            self.surplus_list(Surplus(self.out_w[v] - self.in_w[v]))
        };
        self.buckets.enqueue(list, v);
    }

    fn surplus_list(&mut self, surplus: Surplus) -> usize {
        if let Some(&list) = self.by_surplus.get(&surplus) {
            return list;
        }
        let list = match self.spare.pop() {
            Some(list) => list,
            None => self.buckets.add_list(),
        };
        self.by_surplus.insert(surplus, list);
        list
    }

    /// Oldest node in the non-empty bucket with the largest surplus. Empty buckets met on the
    /// way are released for reuse.
    fn take_max_surplus(&mut self) -> Option<usize> {
        while let Some((&surplus, &list)) = self.by_surplus.last_key_value() {
            if let Some(v) = self.buckets.dequeue(list) {
                return Some(v);
            }
            self.by_surplus.remove(&surplus);
            self.spare.push(list);
        }
        None
    }

    fn run(&mut self) -> Vec<(usize, usize)> {
        let mut results = Vec::new();

        while self.remaining > 0 {
            while let Some(v) = self.buckets.dequeue(SINKS) {
                self.remove(v, None);
            }
            while let Some(v) = self.buckets.dequeue(SOURCES) {
                self.remove(v, None);
            }
            if self.remaining == 0 {
                break;
            }
            let Some(v) = self.take_max_surplus() else {
                break;
            };
            self.remove(v, Some(&mut results));
        }
        results
    }

    fn remove(&mut self, v: usize, mut collect: Option<&mut Vec<(usize, usize)>>) {
        if !self.alive[v] {
            return;
        }
        self.alive[v] = false;
        self.remaining -= 1;

        for i in 0..self.ins[v].len() {
            let e = &self.edges[self.ins[v][i]];
            let (u, weight) = (e.tail, e.weight);
            if !self.alive[u] {
                continue;
            }
            if let Some(out) = collect.as_deref_mut() {
                out.push((u, v));
            }
            self.out_w[u] -= weight;
            self.out_live[u] -= 1;
            self.assign_bucket(u);
        }
        for i in 0..self.outs[v].len() {
            let e = &self.edges[self.outs[v][i]];
            let (w, weight) = (e.head, e.weight);
            if !self.alive[w] {
                continue;
            }
            self.in_w[w] -= weight;
            self.in_live[w] -= 1;
            self.assign_bucket(w);
        }
    }
}

//! Coordinate assignment for an ordered layering.
//!
//! `y` follows the rank: each rank is as tall as its tallest node and ranks are `ranksep` apart.
//!
//! `x` is solved over columns. Every leaf node is a column of its own, except that all left
//! border nodes of a subgraph share one column, and so do all its right border nodes: the sides
//! of a subgraph box are straight. Neighbors on a rank constrain their columns to stay at least
//! their separation apart. Columns start left-packed along those constraints and are then
//! refined by alternating passes that pull each node towards its neighbors on the adjacent rank
//! and each subgraph side along with its content. A pass never breaks a constraint.

use crate::label::{BorderSide, LabelPos, NodeLabel};
use crate::util::{LayoutGraph, build_layer_matrix};
use rustc_hash::FxHashMap;

/// Refinement passes, alternating between predecessors and successors.
const REFINE_PASSES: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacing {
    pub nodesep: f64,
    pub edgesep: f64,
    pub ranksep: f64,
}

pub fn position<G: Default>(g: &mut LayoutGraph<G>, spacing: Spacing) {
    let layering: Vec<Vec<String>> = build_layer_matrix(g)
        .into_iter()
        .map(|layer| layer.into_iter().filter(|v| !g.has_children(v)).collect())
        .collect();

    position_y(g, &layering, spacing.ranksep);

    let mut columns = Columns::new(g, &layering, spacing, true);
    if !columns.acyclic {
        tracing::debug!("sibling subgraphs interleave; placing border nodes one by one");
        columns = Columns::new(g, &layering, spacing, false);
    }
    let mut xs = columns.pack();
    for pass in 0..REFINE_PASSES {
        columns.refine(g, &mut xs, pass % 2 == 0);
    }

    let x_of = |v: &str| columns.of.get(v).map_or(0.0, |&c| xs[c]);
    let min_left = layering
        .iter()
        .flatten()
        .filter_map(|v| Some(x_of(v) - g.node(v)?.width / 2.0))
        .fold(f64::INFINITY, f64::min);
    let shift = if min_left.is_finite() { min_left } else { 0.0 };
    for v in layering.iter().flatten() {
        let x = x_of(v) - shift;
        if let Some(node) = g.node_mut(v) {
            node.x = Some(x);
        }
    }
}

fn position_y<G: Default>(g: &mut LayoutGraph<G>, layering: &[Vec<String>], ranksep: f64) {
    let mut top = 0.0;
    for layer in layering {
        let height = layer
            .iter()
            .filter_map(|v| g.node(v))
            .map(|n| n.height)
            .fold(0.0, f64::max);
        for v in layer {
            if let Some(node) = g.node_mut(v) {
                node.y = Some(top + height / 2.0);
            }
        }
        top += height + ranksep;
    }
}

/// Minimum distance between the centers of `left` and its right neighbor `right`.
fn separation(left: &NodeLabel, right: &NodeLabel, spacing: Spacing) -> f64 {
    let gap = |n: &NodeLabel| if n.is_dummy() { spacing.edgesep } else { spacing.nodesep };
    let mut sum = left.width / 2.0 + gap(left) / 2.0 + gap(right) / 2.0 + right.width / 2.0;
    // Side labels sit off-center from their dummy.
    match left.label_pos {
        LabelPos::L => sum += left.width / 2.0,
        LabelPos::R => sum -= left.width / 2.0,
        LabelPos::C => {}
    }
    match right.label_pos {
        LabelPos::L => sum -= right.width / 2.0,
        LabelPos::R => sum += right.width / 2.0,
        LabelPos::C => {}
    }
    sum
}

/// Columns of the x placement and the separation constraints between them.
struct Columns {
    of: FxHashMap<String, usize>,
    /// The subgraph whose side a shared column is.
    side_of: Vec<Option<String>>,
    before: Vec<Vec<(usize, f64)>>,
    after: Vec<Vec<(usize, f64)>>,
    /// Columns left to right; every constraint points forward.
    topo: Vec<usize>,
    acyclic: bool,
}

impl Columns {
    fn new<G: Default>(
        g: &LayoutGraph<G>,
        layering: &[Vec<String>],
        spacing: Spacing,
        share_sides: bool,
    ) -> Self {
        let mut of: FxHashMap<String, usize> = FxHashMap::default();
        let mut sides: FxHashMap<(&str, BorderSide), usize> = FxHashMap::default();
        let mut side_of: Vec<Option<String>> = Vec::new();
        for v in layering.iter().flatten() {
            let side = g
                .node(v)
                .and_then(|n| n.border_type)
                .zip(g.parent(v))
                .filter(|_| share_sides);
            let column = match side {
                Some((side, sg)) => *sides.entry((sg, side)).or_insert_with(|| {
                    side_of.push(Some(sg.to_string()));
                    side_of.len() - 1
                }),
                None => {
                    side_of.push(None);
                    side_of.len() - 1
                }
            };
            of.insert(v.clone(), column);
        }

        let n = side_of.len();
        let mut gaps: FxHashMap<(usize, usize), f64> = FxHashMap::default();
        for layer in layering {
            for pair in layer.windows(2) {
                let (Some(&a), Some(&b)) = (of.get(&pair[0]), of.get(&pair[1])) else {
                    continue;
                };
                let (Some(left), Some(right)) = (g.node(&pair[0]), g.node(&pair[1])) else {
                    continue;
                };
                if a == b {
                    continue;
                }
                let gap = separation(left, right, spacing);
                let entry = gaps.entry((a, b)).or_insert(gap);
                *entry = entry.max(gap);
            }
        }
        let mut before = vec![Vec::new(); n];
        let mut after = vec![Vec::new(); n];
        let mut pairs: Vec<((usize, usize), f64)> = gaps.into_iter().collect();
        pairs.sort_by_key(|&(pair, _)| pair);
        for ((a, b), gap) in pairs {
            after[a].push((b, gap));
            before[b].push((a, gap));
        }

        let mut indegree: Vec<usize> = before.iter().map(Vec::len).collect();
        let mut ready: Vec<usize> = (0..n).rev().filter(|&c| indegree[c] == 0).collect();
        let mut topo = Vec::with_capacity(n);
        while let Some(c) = ready.pop() {
            topo.push(c);
            for &(b, _) in &after[c] {
                indegree[b] -= 1;
                if indegree[b] == 0 {
                    ready.push(b);
                }
            }
        }
        let acyclic = topo.len() == n;

        Self {
            of,
            side_of,
            before,
            after,
            topo,
            acyclic,
        }
    }

    /// Every column as far left as its constraints allow, starting at 0.
    fn pack(&self) -> Vec<f64> {
        let mut xs = vec![0.0; self.side_of.len()];
        for &c in &self.topo {
            xs[c] = self.before[c]
                .iter()
                .map(|&(a, gap)| xs[a] + gap)
                .fold(0.0, f64::max);
        }
        xs
    }

    /// One pass against predecessors (`downward`) or successors.
    ///
    /// Desired positions are taken from the current placement. Columns then move right in
    /// reverse topological order and left in topological order, each clamped by its neighbors.
    fn refine<G: Default>(&self, g: &LayoutGraph<G>, xs: &mut [f64], downward: bool) {
        let mut desired = xs.to_vec();
        let mut pull: FxHashMap<&str, (f64, f64)> = FxHashMap::default();
        for (v, &c) in &self.of {
            if self.side_of[c].is_some() {
                continue;
            }
            let mut sum = 0.0;
            let mut weight = 0.0;
            let mut visit = |u: &str, w: f64| {
                if let Some(&cu) = self.of.get(u) {
                    sum += xs[cu] * w;
                    weight += w;
                }
            };
            if downward {
                g.for_each_in_edge(v, |key, e| visit(&key.v, e.weight));
            } else {
                g.for_each_out_edge(v, |key, e| visit(&key.w, e.weight));
            }
            if weight > 0.0 {
                desired[c] = sum / weight;
            }

            let delta = desired[c] - xs[c];
            let mut parent = g.parent(v);
            while let Some(sg) = parent {
                let entry = pull.entry(sg).or_insert((0.0, 0.0));
                entry.0 += delta;
                entry.1 += 1.0;
                parent = g.parent(sg);
            }
        }
        // Subgraph sides follow the mean pull on their content.
        for (c, side) in self.side_of.iter().enumerate() {
            if let Some(&(sum, count)) = side.as_deref().and_then(|sg| pull.get(sg)) {
                desired[c] = xs[c] + sum / count;
            }
        }

        for &c in self.topo.iter().rev() {
            if desired[c] > xs[c] {
                let hi = self.after[c]
                    .iter()
                    .map(|&(b, gap)| xs[b] - gap)
                    .fold(f64::INFINITY, f64::min);
                xs[c] = desired[c].min(hi).max(xs[c]);
            }
        }
        for &c in &self.topo {
            if desired[c] < xs[c] {
                let lo = self.before[c]
                    .iter()
                    .map(|&(a, gap)| xs[a] + gap)
                    .fold(f64::NEG_INFINITY, f64::max);
                xs[c] = desired[c].max(lo).min(xs[c]);
            }
        }
    }
}

//! Network simplex ranking (Gansner et al., "A Technique for Drawing Directed Graphs").
//!
//! Starting from a feasible tight tree, repeatedly pick a tree edge with a negative cut value,
//! replace it with the non-tree edge of minimum slack that reconnects the two halves, and
//! re-derive ranks from the tree. The result minimizes the total weighted edge length.
//!
//! Cut value of a tree edge: the sum of the weights of all graph edges crossing from the tail
//! component to the head component, minus those crossing back.

use super::RankGraph;
use super::feasible_tree::{SpanningTree, feasible_tree_ranks};
use super::util::longest_path_ranks;
use crate::util::LayoutGraph;
use rustc_hash::FxHashMap;

pub fn network_simplex<G: Default>(g: &mut LayoutGraph<G>) {
    let mut rg = RankGraph::from_graph(g);
    rg.for_each_component(network_simplex_ranks);
    rg.write_back(g);
}

pub(crate) fn network_simplex_ranks(rg: &mut RankGraph) {
    longest_path_ranks(rg);
    let tree = feasible_tree_ranks(rg);
    if tree.nodes.len() < rg.len() {
        return;
    }

    let mut simplex = Simplex::new(rg, tree);
    simplex.init_low_lim();
    simplex.init_cut_values();
    while let Some((a, b)) = simplex.leave_edge() {
        // A bridge with negative weight has a negative cut value and nothing to swap in.
        let Some(f) = simplex.enter_edge(a, b) else {
            tracing::warn!(tail = a, head = b, "no entering edge; keeping current ranks");
            break;
        };
        simplex.exchange(a, b, f);
    }
}

fn tree_key(a: usize, b: usize) -> (usize, usize) {
    if a < b { (a, b) } else { (b, a) }
}

struct Simplex<'a> {
    rg: &'a mut RankGraph,
    tree: SpanningTree,
    low: Vec<usize>,
    lim: Vec<usize>,
    parent: Vec<Option<usize>>,
    preorder: Vec<usize>,
    postorder: Vec<usize>,
    cut: FxHashMap<(usize, usize), f64>,
}

impl<'a> Simplex<'a> {
    fn new(rg: &'a mut RankGraph, tree: SpanningTree) -> Self {
        let n = rg.len();
        Self {
            rg,
            tree,
            low: vec![0; n],
            lim: vec![0; n],
            parent: vec![None; n],
            preorder: Vec::with_capacity(n),
            postorder: Vec::with_capacity(n),
            cut: FxHashMap::default(),
        }
    }

    /// Postorder numbering from the tree root: `lim` is a node's own number, `low` the smallest
    /// number in its subtree.
    fn init_low_lim(&mut self) {
        let n = self.rg.len();
        let Some(&root) = self.tree.nodes.first() else {
            return;
        };
        self.preorder.clear();
        self.postorder.clear();
        let mut visited = vec![false; n];
        let mut next_lim = 1usize;

        // (node, parent, next neighbor index, low)
        let mut stack: Vec<(usize, Option<usize>, usize, usize)> = vec![(root, None, 0, next_lim)];
        visited[root] = true;
        self.preorder.push(root);
        while let Some(top) = stack.last_mut() {
            let (v, parent, low) = (top.0, top.1, top.3);
            if let Some(&w) = self.tree.adj[v].get(top.2) {
                top.2 += 1;
                if !visited[w] {
                    visited[w] = true;
                    self.preorder.push(w);
                    stack.push((w, Some(v), 0, next_lim));
                }
                continue;
            }
            self.low[v] = low;
            self.lim[v] = next_lim;
            self.parent[v] = parent;
            self.postorder.push(v);
            next_lim += 1;
            stack.pop();
        }
    }

    fn init_cut_values(&mut self) {
        self.cut.clear();
        let order: Vec<usize> = self.postorder.clone();
        for &v in order.iter().take(order.len().saturating_sub(1)) {
            let Some(parent) = self.parent[v] else {
                continue;
            };
            let value = self.cut_value(v, parent);
            self.cut.insert(tree_key(v, parent), value);
        }
    }

    fn cut_value(&self, child: usize, parent: usize) -> f64 {
        let rg = &*self.rg;
        let (child_is_tail, edge) = match rg.pairs.get(&(child, parent)) {
            Some(&e) => (true, e),
            None => match rg.pairs.get(&(parent, child)) {
                Some(&e) => (false, e),
                None => return 0.0,
            },
        };

        let mut value = rg.edges[edge].weight;
        for e in rg.node_edges(child) {
            let edge = &rg.edges[e];
            let is_out = edge.v == child;
            let other = if is_out { edge.w } else { edge.v };
            if other == parent {
                continue;
            }
            let points_to_head = is_out == child_is_tail;
            value += if points_to_head {
                edge.weight
            } else {
                -edge.weight
            };
            if self.tree.has_edge(child, other) {
                let other_cut = self.cut.get(&tree_key(child, other)).copied().unwrap_or(0.0);
                value += if points_to_head { -other_cut } else { other_cut };
            }
        }
        value
    }

    fn leave_edge(&self) -> Option<(usize, usize)> {
        self.tree
            .edges
            .iter()
            .copied()
            .find(|&(a, b)| self.cut.get(&tree_key(a, b)).is_some_and(|&c| c < 0.0))
    }

    fn is_descendant(&self, v: usize, root: usize) -> bool {
        self.low[root] <= self.lim[v] && self.lim[v] <= self.lim[root]
    }

    /// Non-tree edge of minimum slack crossing the cut made by removing tree edge `a-b`.
    fn enter_edge(&self, a: usize, b: usize) -> Option<usize> {
        let (v, w) = if self.rg.pairs.contains_key(&(a, b)) {
            (a, b)
        } else {
            (b, a)
        };
        let flip = self.lim[v] > self.lim[w];
        let tail = if flip { w } else { v };

        let mut best: Option<(usize, i32)> = None;
        for (ix, e) in self.rg.edges.iter().enumerate() {
            if flip == self.is_descendant(e.v, tail) && flip != self.is_descendant(e.w, tail) {
                let slack = self.rg.slack(ix);
                if best.is_none_or(|(_, s)| slack < s) {
                    best = Some((ix, slack));
                }
            }
        }
        best.map(|(ix, _)| ix)
    }

    fn exchange(&mut self, a: usize, b: usize, f: usize) {
        let entering = self.rg.edges[f];
        self.tree.remove_edge(a, b);
        self.tree.add_edge(entering.v, entering.w);
        self.init_low_lim();
        self.init_cut_values();
        self.update_ranks();
    }

    fn update_ranks(&mut self) {
        for i in 1..self.preorder.len() {
            let v = self.preorder[i];
            let Some(p) = self.parent[v] else {
                continue;
            };
            let rank = match self.rg.pairs.get(&(v, p)) {
                Some(&e) => self.rg.rank[p] - self.rg.edges[e].minlen,
                None => match self.rg.pairs.get(&(p, v)) {
                    Some(&e) => self.rg.rank[p] + self.rg.edges[e].minlen,
                    None => continue,
                },
            };
            self.rg.rank[v] = rank;
        }
    }
}

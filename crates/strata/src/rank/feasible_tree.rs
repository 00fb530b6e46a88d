//! Tight spanning tree construction.
//!
//! A tree edge is tight when its slack is zero. Starting from the first node, the tree absorbs
//! every node reachable over tight edges. While nodes are missing, the non-tree edge with the
//! smallest slack that touches the tree is made tight by shifting every tree node's rank, and the
//! tree grows again. Ranks stay feasible throughout.

use super::RankGraph;
use crate::util::LayoutGraph;
use strata_graph::{Graph, GraphOptions};

/// Spanning tree over node indices. Edges are unordered pairs kept in insertion order.
#[derive(Debug, Clone, Default)]
pub(crate) struct SpanningTree {
    pub nodes: Vec<usize>,
    pub member: Vec<bool>,
    pub edges: Vec<(usize, usize)>,
    pub adj: Vec<Vec<usize>>,
}

impl SpanningTree {
    fn new(size: usize) -> Self {
        Self {
            member: vec![false; size],
            adj: vec![Vec::new(); size],
            ..Default::default()
        }
    }

    fn add_node(&mut self, v: usize) {
        if !self.member[v] {
            self.member[v] = true;
            self.nodes.push(v);
        }
    }

    pub fn add_edge(&mut self, a: usize, b: usize) {
        self.edges.push((a, b));
        self.adj[a].push(b);
        self.adj[b].push(a);
    }

    pub fn remove_edge(&mut self, a: usize, b: usize) {
        self.edges
            .retain(|&(x, y)| !((x == a && y == b) || (x == b && y == a)));
        self.adj[a].retain(|&n| n != b);
        self.adj[b].retain(|&n| n != a);
    }

    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.adj[a].contains(&b)
    }
}

/// Builds a tight spanning tree for `g` from its current ranks, adjusting them as needed.
///
/// `g` must be connected and already carry a feasible ranking, e.g. from
/// [`super::util::longest_path`].
pub fn feasible_tree<G: Default>(g: &mut LayoutGraph<G>) -> Graph<(), (), ()> {
    let mut rg = RankGraph::from_graph(g);
    let tree = feasible_tree_ranks(&mut rg);
    rg.write_back(g);

    let mut out: Graph<(), (), ()> = Graph::new(GraphOptions::default());
    for &v in &tree.nodes {
        out.ensure_node(rg.ids[v].clone());
    }
    for &(a, b) in &tree.edges {
        out.set_edge(rg.ids[a].clone(), rg.ids[b].clone());
    }
    out
}

pub(crate) fn feasible_tree_ranks(rg: &mut RankGraph) -> SpanningTree {
    let mut tree = SpanningTree::new(rg.len());
    if rg.is_empty() {
        return tree;
    }
    tree.add_node(0);

    while grow_tight_tree(&mut tree, rg) < rg.len() {
        let Some(e) = min_slack_crossing_edge(&tree, rg) else {
            break;
        };
        let slack = rg.slack(e);
        let delta = if tree.member[rg.edges[e].v] {
            slack
        } else {
            -slack
        };
        for &v in &tree.nodes {
            rg.rank[v] += delta;
        }
    }
    tree
}

/// Adds every node reachable over tight edges; returns the tree size.
fn grow_tight_tree(tree: &mut SpanningTree, rg: &RankGraph) -> usize {
    let roots = tree.nodes.clone();
    for root in roots {
        let mut stack: Vec<(usize, Vec<usize>, usize)> =
            vec![(root, rg.node_edges(root).collect(), 0)];
        while let Some(top) = stack.last_mut() {
            let v = top.0;
            let Some(&e) = top.1.get(top.2) else {
                stack.pop();
                continue;
            };
            top.2 += 1;
            let edge = &rg.edges[e];
            let w = if edge.v == v { edge.w } else { edge.v };
            if !tree.member[w] && rg.slack(e) == 0 {
                tree.add_node(w);
                tree.add_edge(v, w);
                stack.push((w, rg.node_edges(w).collect(), 0));
            }
        }
    }
    tree.nodes.len()
}

fn min_slack_crossing_edge(tree: &SpanningTree, rg: &RankGraph) -> Option<usize> {
    let mut best: Option<(usize, i32)> = None;
    for (ix, e) in rg.edges.iter().enumerate() {
        if tree.member[e.v] == tree.member[e.w] {
            continue;
        }
        let slack = rg.slack(ix);
        if best.is_none_or(|(_, s)| slack < s) {
            best = Some((ix, slack));
        }
    }
    best.map(|(ix, _)| ix)
}

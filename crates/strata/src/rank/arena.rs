use crate::util::LayoutGraph;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RankEdge {
    pub v: usize,
    pub w: usize,
    pub minlen: i32,
    pub weight: f64,
}

/// Simple directed graph over node indices, with a rank per node.
#[derive(Debug, Clone, Default)]
pub(crate) struct RankGraph {
    pub ids: Vec<String>,
    pub edges: Vec<RankEdge>,
    pub ins: Vec<Vec<usize>>,
    pub outs: Vec<Vec<usize>>,
    pub pairs: FxHashMap<(usize, usize), usize>,
    pub rank: Vec<i32>,
}

impl RankGraph {
    /// Leaf nodes and merged edges of `g`, keeping existing ranks (0 when unset).
    pub fn from_graph<G: Default>(g: &LayoutGraph<G>) -> Self {
        let mut ids = Vec::new();
        let mut rank = Vec::new();
        let mut index: FxHashMap<&str, usize> = FxHashMap::default();
        for (v, label) in g.node_labels() {
            if g.has_children(v) {
                continue;
            }
            index.insert(v, ids.len());
            ids.push(v.to_string());
            rank.push(label.rank.unwrap_or(0));
        }

        let mut rg = Self {
            ins: vec![Vec::new(); ids.len()],
            outs: vec![Vec::new(); ids.len()],
            ids,
            rank,
            ..Default::default()
        };
        for (key, label) in g.edge_labels() {
            let (Some(&v), Some(&w)) = (index.get(key.v.as_str()), index.get(key.w.as_str())) else {
                continue;
            };
            if v == w {
                continue;
            }
            rg.add_edge(v, w, label.minlen as i32, label.weight);
        }
        rg
    }

    fn add_edge(&mut self, v: usize, w: usize, minlen: i32, weight: f64) {
        if let Some(&ix) = self.pairs.get(&(v, w)) {
            let e = &mut self.edges[ix];
            e.weight += weight;
            e.minlen = e.minlen.max(minlen);
            return;
        }
        let ix = self.edges.len();
        self.edges.push(RankEdge {
            v,
            w,
            minlen,
            weight,
        });
        self.pairs.insert((v, w), ix);
        self.outs[v].push(ix);
        self.ins[w].push(ix);
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn slack(&self, e: usize) -> i32 {
        let e = &self.edges[e];
        self.rank[e.w] - self.rank[e.v] - e.minlen
    }

    /// In-edges of `v` followed by its out-edges.
    pub fn node_edges(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        self.ins[v].iter().chain(self.outs[v].iter()).copied()
    }

    pub fn sources(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len()).filter(|&v| self.ins[v].is_empty())
    }

    /// Runs `f` on each weakly connected component as its own graph and copies the ranks back.
    pub fn for_each_component(&mut self, mut f: impl FnMut(&mut RankGraph)) {
        let components = self.components();
        if components.len() == 1 {
            f(self);
            return;
        }
        for nodes in components {
            let mut sub = self.subgraph(&nodes);
            f(&mut sub);
            for (local, &global) in nodes.iter().enumerate() {
                self.rank[global] = sub.rank[local];
            }
        }
    }

    fn components(&self) -> Vec<Vec<usize>> {
        let mut seen = vec![false; self.len()];
        let mut out = Vec::new();
        for start in 0..self.len() {
            if seen[start] {
                continue;
            }
            seen[start] = true;
            let mut comp = Vec::new();
            let mut stack = vec![start];
            while let Some(v) = stack.pop() {
                comp.push(v);
                for e in self.node_edges(v) {
                    let RankEdge { v: a, w: b, .. } = self.edges[e];
                    let other = if a == v { b } else { a };
                    if !seen[other] {
                        seen[other] = true;
                        stack.push(other);
                    }
                }
            }
            comp.sort_unstable();
            out.push(comp);
        }
        out
    }

    fn subgraph(&self, nodes: &[usize]) -> RankGraph {
        let local: FxHashMap<usize, usize> =
            nodes.iter().enumerate().map(|(i, &v)| (v, i)).collect();
        let mut sub = RankGraph {
            ids: nodes.iter().map(|&v| self.ids[v].clone()).collect(),
            rank: nodes.iter().map(|&v| self.rank[v]).collect(),
            ins: vec![Vec::new(); nodes.len()],
            outs: vec![Vec::new(); nodes.len()],
            ..Default::default()
        };
        for e in &self.edges {
            if let (Some(&v), Some(&w)) = (local.get(&e.v), local.get(&e.w)) {
                sub.add_edge(v, w, e.minlen, e.weight);
            }
        }
        sub
    }

    pub fn normalize(&mut self) {
        if let Some(min) = self.rank.iter().copied().min() {
            for r in &mut self.rank {
                *r -= min;
            }
        }
    }

    pub fn write_back<G: Default>(&self, g: &mut LayoutGraph<G>) {
        for (v, &rank) in self.ids.iter().zip(&self.rank) {
            if let Some(label) = g.node_mut(v) {
                label.rank = Some(rank);
            }
        }
    }
}

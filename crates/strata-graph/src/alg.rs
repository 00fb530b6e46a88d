//! Traversals and structural queries over [`Graph`].

use crate::Graph;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

/// Weakly connected components, each listed in discovery order.
pub fn components<N, E, G>(g: &Graph<N, E, G>) -> Vec<Vec<String>>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut out: Vec<Vec<String>> = Vec::new();

    for start in g.nodes() {
        if !seen.insert(start) {
            continue;
        }
        let mut comp: Vec<String> = Vec::new();
        let mut queue: VecDeque<&str> = VecDeque::from([start]);
        while let Some(v) = queue.pop_front() {
            comp.push(v.to_string());
            for n in g.neighbors(v) {
                if seen.insert(n) {
                    queue.push_back(n);
                }
            }
        }
        out.push(comp);
    }
    out
}

fn dfs<N, E, G>(g: &Graph<N, E, G>, roots: &[&str], post: bool) -> Vec<String>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    let mut visited: FxHashSet<String> = FxHashSet::default();
    let mut out: Vec<String> = Vec::new();
    // (node, index of the next successor to visit)
    let mut stack: Vec<(String, usize)> = Vec::new();

    for &root in roots {
        if !g.has_node(root) || !visited.insert(root.to_string()) {
            continue;
        }
        if !post {
            out.push(root.to_string());
        }
        stack.push((root.to_string(), 0));
        while let Some((v, next)) = stack.last_mut() {
            let succs = g.successors(v);
            if let Some(&w) = succs.get(*next) {
                *next += 1;
                if visited.insert(w.to_string()) {
                    if !post {
                        out.push(w.to_string());
                    }
                    stack.push((w.to_string(), 0));
                }
                continue;
            }
            let v = v.clone();
            stack.pop();
            if post {
                out.push(v);
            }
        }
    }
    out
}

/// Nodes reachable from `roots` along out-edges, each listed before its descendants.
pub fn preorder<N, E, G>(g: &Graph<N, E, G>, roots: &[&str]) -> Vec<String>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    dfs(g, roots, false)
}

/// Nodes reachable from `roots` along out-edges, each listed after its descendants.
pub fn postorder<N, E, G>(g: &Graph<N, E, G>, roots: &[&str]) -> Vec<String>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    dfs(g, roots, true)
}

/// Strongly connected components (Tarjan), in the order they are completed.
pub fn tarjan<N, E, G>(g: &Graph<N, E, G>) -> Vec<Vec<String>>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    struct State<'a> {
        index: FxHashMap<&'a str, usize>,
        low: FxHashMap<&'a str, usize>,
        on_stack: FxHashSet<&'a str>,
        stack: Vec<&'a str>,
        next: usize,
        out: Vec<Vec<String>>,
    }

    fn visit<'a, N, E, G>(g: &'a Graph<N, E, G>, v: &'a str, st: &mut State<'a>)
    where
        N: Default + 'static,
        E: Default + 'static,
        G: Default,
    {
        st.index.insert(v, st.next);
        st.low.insert(v, st.next);
        st.next += 1;
        st.stack.push(v);
        st.on_stack.insert(v);

        for w in g.successors(v) {
            if !st.index.contains_key(w) {
                visit(g, w, st);
                let low = st.low[v].min(st.low[w]);
                st.low.insert(v, low);
            } else if st.on_stack.contains(w) {
                let low = st.low[v].min(st.index[w]);
                st.low.insert(v, low);
            }
        }

        if st.low[v] == st.index[v] {
            let mut comp = Vec::new();
            while let Some(w) = st.stack.pop() {
                st.on_stack.remove(w);
                comp.push(w.to_string());
                if w == v {
                    break;
                }
            }
            st.out.push(comp);
        }
    }

    let mut st = State {
        index: FxHashMap::default(),
        low: FxHashMap::default(),
        on_stack: FxHashSet::default(),
        stack: Vec::new(),
        next: 0,
        out: Vec::new(),
    };
    for v in g.nodes() {
        if !st.index.contains_key(v) {
            visit(g, v, &mut st);
        }
    }
    st.out
}

/// Strongly connected components that contain a cycle: more than one node, or a self-loop.
pub fn find_cycles<N, E, G>(g: &Graph<N, E, G>) -> Vec<Vec<String>>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    tarjan(g)
        .into_iter()
        .filter(|comp| comp.len() > 1 || !g.out_edges(&comp[0], Some(&comp[0])).is_empty())
        .collect()
}

pub fn is_acyclic<N, E, G>(g: &Graph<N, E, G>) -> bool
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    find_cycles(g).is_empty()
}

//! The `Graph` container.
//!
//! Nodes and edges are stored in insertion order (`IndexMap`), and removals preserve the order of
//! the remaining entries. Every layout phase relies on that determinism: iterating the same graph
//! twice always yields the same sequence.

use indexmap::{Equivalent, IndexMap, IndexSet};
use rustc_hash::{FxBuildHasher, FxHashMap};
use std::fmt;

type OrderedMap<K, V> = IndexMap<K, V, FxBuildHasher>;
type OrderedSet<T> = IndexSet<T, FxBuildHasher>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphOptions {
    /// Allow several edges between the same ordered pair of nodes, told apart by name.
    pub multigraph: bool,
    /// Allow nodes to be nested under other nodes.
    pub compound: bool,
}

/// Identifies one edge: tail `v`, head `w`, and an optional multi-edge name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    pub v: String,
    pub w: String,
    pub name: Option<String>,
}

impl EdgeKey {
    pub fn new(v: impl Into<String>, w: impl Into<String>) -> Self {
        Self {
            v: v.into(),
            w: w.into(),
            name: None,
        }
    }

    pub fn named(v: impl Into<String>, w: impl Into<String>, name: Option<impl Into<String>>) -> Self {
        Self {
            v: v.into(),
            w: w.into(),
            name: name.map(Into::into),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} -> {} ({name})", self.v, self.w),
            None => write!(f, "{} -> {}", self.v, self.w),
        }
    }
}

/// Borrowed form of [`EdgeKey`]; hashes identically so lookups don't allocate.
#[derive(Clone, Copy, Hash)]
struct EdgeRef<'a> {
    v: &'a str,
    w: &'a str,
    name: Option<&'a str>,
}

impl Equivalent<EdgeKey> for EdgeRef<'_> {
    fn equivalent(&self, key: &EdgeKey) -> bool {
        key.v == self.v && key.w == self.w && key.name.as_deref() == self.name
    }
}

struct NodeSlot<N> {
    label: N,
    ins: OrderedSet<EdgeKey>,
    outs: OrderedSet<EdgeKey>,
}

pub struct Graph<N, E, G>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    options: GraphOptions,
    label: G,
    default_node_label: Box<dyn Fn() -> N>,
    default_edge_label: Box<dyn Fn() -> E>,

    nodes: OrderedMap<String, NodeSlot<N>>,
    edges: OrderedMap<EdgeKey, E>,

    parents: FxHashMap<String, String>,
    children: OrderedMap<String, OrderedSet<String>>,
}

impl<N, E, G> fmt::Debug for Graph<N, E, G>
where
    N: Default + fmt::Debug + 'static,
    E: Default + fmt::Debug + 'static,
    G: Default + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("options", &self.options)
            .field("label", &self.label)
            .field(
                "nodes",
                &self
                    .nodes
                    .iter()
                    .map(|(id, slot)| (id, &slot.label))
                    .collect::<Vec<_>>(),
            )
            .field("edges", &self.edges.iter().collect::<Vec<_>>())
            .finish()
    }
}

impl<N, E, G> Default for Graph<N, E, G>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    fn default() -> Self {
        Self::new(GraphOptions::default())
    }
}

impl<N, E, G> Graph<N, E, G>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    pub fn new(options: GraphOptions) -> Self {
        Self {
            options,
            label: G::default(),
            default_node_label: Box::new(N::default),
            default_edge_label: Box::new(E::default),
            nodes: OrderedMap::default(),
            edges: OrderedMap::default(),
            parents: FxHashMap::default(),
            children: OrderedMap::default(),
        }
    }

    pub fn options(&self) -> GraphOptions {
        self.options
    }

    pub fn is_multigraph(&self) -> bool {
        self.options.multigraph
    }

    pub fn is_compound(&self) -> bool {
        self.options.compound
    }

    pub fn set_graph(&mut self, label: G) -> &mut Self {
        self.label = label;
        self
    }

    pub fn graph(&self) -> &G {
        &self.label
    }

    pub fn graph_mut(&mut self) -> &mut G {
        &mut self.label
    }

    /// Label factory used by [`Graph::ensure_node`] and implicit node creation in `set_edge`.
    pub fn set_default_node_label<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn() -> N + 'static,
    {
        self.default_node_label = Box::new(f);
        self
    }

    /// Label factory used by [`Graph::set_edge`] and [`Graph::set_path`].
    pub fn set_default_edge_label<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn() -> E + 'static,
    {
        self.default_edge_label = Box::new(f);
        self
    }

    // ---- nodes -------------------------------------------------------------------------------

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn has_node(&self, v: &str) -> bool {
        self.nodes.contains_key(v)
    }

    /// Inserts `v` with `label`, or replaces the label of an existing node.
    pub fn set_node(&mut self, v: impl Into<String>, label: N) -> &mut Self {
        let v = v.into();
        match self.nodes.get_mut(&v) {
            Some(slot) => slot.label = label,
            None => {
                self.nodes.insert(
                    v,
                    NodeSlot {
                        label,
                        ins: OrderedSet::default(),
                        outs: OrderedSet::default(),
                    },
                );
            }
        }
        self
    }

    /// Inserts `v` with the default label unless it already exists.
    pub fn ensure_node(&mut self, v: impl Into<String>) -> &mut Self {
        let v = v.into();
        if !self.nodes.contains_key(&v) {
            let label = (self.default_node_label)();
            self.set_node(v, label);
        }
        self
    }

    pub fn set_nodes<I, S>(&mut self, vs: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for v in vs {
            self.ensure_node(v);
        }
        self
    }

    pub fn node(&self, v: &str) -> Option<&N> {
        self.nodes.get(v).map(|slot| &slot.label)
    }

    pub fn node_mut(&mut self, v: &str) -> Option<&mut N> {
        self.nodes.get_mut(v).map(|slot| &mut slot.label)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    pub fn node_ids(&self) -> Vec<String> {
        self.nodes.keys().cloned().collect()
    }

    pub fn node_labels(&self) -> impl Iterator<Item = (&str, &N)> {
        self.nodes.iter().map(|(v, slot)| (v.as_str(), &slot.label))
    }

    pub fn node_labels_mut(&mut self) -> impl Iterator<Item = (&str, &mut N)> {
        self.nodes
            .iter_mut()
            .map(|(v, slot)| (v.as_str(), &mut slot.label))
    }

    /// Removes `v`, its incident edges, and its place in the nesting tree. Children of `v` move to
    /// the root.
    pub fn remove_node(&mut self, v: &str) -> Option<N> {
        let slot = self.nodes.shift_remove(v)?;
        for key in slot.ins.iter().chain(slot.outs.iter()) {
            self.edges.shift_remove(key);
            if key.v != v {
                if let Some(other) = self.nodes.get_mut(&key.v) {
                    other.outs.shift_remove(key);
                }
            }
            if key.w != v {
                if let Some(other) = self.nodes.get_mut(&key.w) {
                    other.ins.shift_remove(key);
                }
            }
        }
        if self.options.compound {
            self.detach(v);
            if let Some(kids) = self.children.shift_remove(v) {
                for kid in kids {
                    self.parents.remove(&kid);
                }
            }
        }
        Some(slot.label)
    }

    pub fn sources(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|(_, slot)| slot.ins.is_empty())
            .map(|(v, _)| v.as_str())
            .collect()
    }

    pub fn sinks(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|(_, slot)| slot.outs.is_empty())
            .map(|(v, _)| v.as_str())
            .collect()
    }

    // ---- nesting -----------------------------------------------------------------------------

    /// Nests `v` under `parent`, creating either node if needed. Ignored on non-compound graphs.
    pub fn set_parent(&mut self, v: impl Into<String>, parent: impl Into<String>) -> &mut Self {
        if !self.options.compound {
            return self;
        }
        let v = v.into();
        let parent = parent.into();
        self.ensure_node(v.clone());
        self.ensure_node(parent.clone());
        self.detach(&v);
        self.children
            .entry(parent.clone())
            .or_default()
            .insert(v.clone());
        self.parents.insert(v, parent);
        self
    }

    /// Moves `v` back to the root of the nesting tree.
    pub fn clear_parent(&mut self, v: &str) -> &mut Self {
        if self.options.compound {
            self.detach(v);
        }
        self
    }

    fn detach(&mut self, v: &str) {
        if let Some(old) = self.parents.remove(v) {
            if let Some(kids) = self.children.get_mut(&old) {
                kids.shift_remove(v);
            }
        }
    }

    pub fn parent(&self, v: &str) -> Option<&str> {
        self.parents.get(v).map(String::as_str)
    }

    pub fn children(&self, v: &str) -> Vec<&str> {
        self.children
            .get(v)
            .map(|kids| kids.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn has_children(&self, v: &str) -> bool {
        self.children.get(v).is_some_and(|kids| !kids.is_empty())
    }

    /// Nodes without a parent, in insertion order.
    pub fn root_children(&self) -> Vec<&str> {
        self.nodes
            .keys()
            .filter(|v| !self.parents.contains_key(v.as_str()))
            .map(String::as_str)
            .collect()
    }

    // ---- edges -------------------------------------------------------------------------------

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> impl Iterator<Item = &EdgeKey> {
        self.edges.keys()
    }

    pub fn edge_keys(&self) -> Vec<EdgeKey> {
        self.edges.keys().cloned().collect()
    }

    pub fn edge_labels(&self) -> impl Iterator<Item = (&EdgeKey, &E)> {
        self.edges.iter()
    }

    pub fn edge_labels_mut(&mut self) -> impl Iterator<Item = (&EdgeKey, &mut E)> {
        self.edges.iter_mut()
    }

    fn edge_ref<'a>(&self, v: &'a str, w: &'a str, name: Option<&'a str>) -> EdgeRef<'a> {
        EdgeRef {
            v,
            w,
            name: if self.options.multigraph { name } else { None },
        }
    }

    /// Adds `v -> w` with the default edge label, creating missing endpoints. An existing edge keeps
    /// its label.
    pub fn set_edge(&mut self, v: impl Into<String>, w: impl Into<String>) -> &mut Self {
        let key = EdgeKey::new(v, w);
        if !self.edges.contains_key(&key) {
            let label = (self.default_edge_label)();
            self.insert_edge(key, label);
        }
        self
    }

    /// Adds or relabels `v -> w`.
    pub fn set_edge_with_label(
        &mut self,
        v: impl Into<String>,
        w: impl Into<String>,
        label: E,
    ) -> &mut Self {
        self.insert_edge(EdgeKey::new(v, w), label);
        self
    }

    /// Adds or relabels the edge `v -> w` called `name`. The name is dropped on simple graphs.
    pub fn set_named_edge(
        &mut self,
        v: impl Into<String>,
        w: impl Into<String>,
        name: Option<impl Into<String>>,
        label: E,
    ) -> &mut Self {
        self.insert_edge(EdgeKey::named(v, w, name), label);
        self
    }

    pub fn set_edge_key(&mut self, key: EdgeKey, label: E) -> &mut Self {
        self.insert_edge(key, label);
        self
    }

    fn insert_edge(&mut self, mut key: EdgeKey, label: E) {
        if !self.options.multigraph {
            key.name = None;
        }
        if let Some(existing) = self.edges.get_mut(&key) {
            *existing = label;
            return;
        }
        self.ensure_node(key.v.clone());
        self.ensure_node(key.w.clone());
        if let Some(slot) = self.nodes.get_mut(&key.v) {
            slot.outs.insert(key.clone());
        }
        if let Some(slot) = self.nodes.get_mut(&key.w) {
            slot.ins.insert(key.clone());
        }
        self.edges.insert(key, label);
    }

    /// Chains consecutive nodes of `path` with default-labelled edges.
    pub fn set_path(&mut self, path: &[&str]) -> &mut Self {
        for pair in path.windows(2) {
            self.set_edge(pair[0], pair[1]);
        }
        self
    }

    pub fn has_edge(&self, v: &str, w: &str, name: Option<&str>) -> bool {
        self.edges.contains_key(&self.edge_ref(v, w, name))
    }

    pub fn has_edge_key(&self, key: &EdgeKey) -> bool {
        self.has_edge(&key.v, &key.w, key.name())
    }

    pub fn edge(&self, v: &str, w: &str, name: Option<&str>) -> Option<&E> {
        self.edges.get(&self.edge_ref(v, w, name))
    }

    pub fn edge_mut(&mut self, v: &str, w: &str, name: Option<&str>) -> Option<&mut E> {
        let r = self.edge_ref(v, w, name);
        self.edges.get_mut(&r)
    }

    pub fn edge_by_key(&self, key: &EdgeKey) -> Option<&E> {
        self.edge(&key.v, &key.w, key.name())
    }

    pub fn edge_by_key_mut(&mut self, key: &EdgeKey) -> Option<&mut E> {
        self.edge_mut(&key.v, &key.w, key.name())
    }

    pub fn remove_edge(&mut self, v: &str, w: &str, name: Option<&str>) -> Option<E> {
        let r = self.edge_ref(v, w, name);
        let (key, label) = self.edges.shift_remove_entry(&r)?;
        if let Some(slot) = self.nodes.get_mut(&key.v) {
            slot.outs.shift_remove(&key);
        }
        if let Some(slot) = self.nodes.get_mut(&key.w) {
            slot.ins.shift_remove(&key);
        }
        Some(label)
    }

    pub fn remove_edge_key(&mut self, key: &EdgeKey) -> Option<E> {
        self.remove_edge(&key.v, &key.w, key.name())
    }

    /// Edges into `v`, optionally restricted to those leaving `u`.
    pub fn in_edges(&self, v: &str, u: Option<&str>) -> Vec<EdgeKey> {
        let Some(slot) = self.nodes.get(v) else {
            return Vec::new();
        };
        slot.ins
            .iter()
            .filter(|key| u.is_none_or(|u| key.v == u))
            .cloned()
            .collect()
    }

    /// Edges out of `v`, optionally restricted to those entering `w`.
    pub fn out_edges(&self, v: &str, w: Option<&str>) -> Vec<EdgeKey> {
        let Some(slot) = self.nodes.get(v) else {
            return Vec::new();
        };
        slot.outs
            .iter()
            .filter(|key| w.is_none_or(|w| key.w == w))
            .cloned()
            .collect()
    }

    /// Every edge touching `v`; with `w`, only the edges between `v` and `w` in either direction.
    pub fn node_edges(&self, v: &str, w: Option<&str>) -> Vec<EdgeKey> {
        let Some(slot) = self.nodes.get(v) else {
            return Vec::new();
        };
        let mut out: Vec<EdgeKey> = slot
            .ins
            .iter()
            .filter(|key| w.is_none_or(|w| key.v == w))
            .cloned()
            .collect();
        for key in &slot.outs {
            if w.is_none_or(|w| key.w == w) && !out.contains(key) {
                out.push(key.clone());
            }
        }
        out
    }

    pub fn for_each_in_edge<F>(&self, v: &str, mut f: F)
    where
        F: FnMut(&EdgeKey, &E),
    {
        let Some(slot) = self.nodes.get(v) else {
            return;
        };
        for key in &slot.ins {
            if let Some(label) = self.edges.get(key) {
                f(key, label);
            }
        }
    }

    pub fn for_each_out_edge<F>(&self, v: &str, mut f: F)
    where
        F: FnMut(&EdgeKey, &E),
    {
        let Some(slot) = self.nodes.get(v) else {
            return;
        };
        for key in &slot.outs {
            if let Some(label) = self.edges.get(key) {
                f(key, label);
            }
        }
    }

    /// Distinct heads of `v`'s out-edges, in first-seen order.
    pub fn successors(&self, v: &str) -> Vec<&str> {
        let Some(slot) = self.nodes.get(v) else {
            return Vec::new();
        };
        let mut out: Vec<&str> = Vec::with_capacity(slot.outs.len());
        for key in &slot.outs {
            if !out.contains(&key.w.as_str()) {
                out.push(key.w.as_str());
            }
        }
        out
    }

    /// Distinct tails of `v`'s in-edges, in first-seen order.
    pub fn predecessors(&self, v: &str) -> Vec<&str> {
        let Some(slot) = self.nodes.get(v) else {
            return Vec::new();
        };
        let mut out: Vec<&str> = Vec::with_capacity(slot.ins.len());
        for key in &slot.ins {
            if !out.contains(&key.v.as_str()) {
                out.push(key.v.as_str());
            }
        }
        out
    }

    /// Predecessors followed by successors, without duplicates.
    pub fn neighbors(&self, v: &str) -> Vec<&str> {
        let mut out = self.predecessors(v);
        for w in self.successors(v) {
            if !out.contains(&w) {
                out.push(w);
            }
        }
        out
    }

    pub fn in_degree(&self, v: &str) -> usize {
        self.nodes.get(v).map_or(0, |slot| slot.ins.len())
    }

    pub fn out_degree(&self, v: &str) -> usize {
        self.nodes.get(v).map_or(0, |slot| slot.outs.len())
    }
}

//! Expand the nesting tree into rank constraints.
//!
//! Every subgraph gets a top and a bottom border node. Heavy edges tie the borders to the
//! subgraph's content so that ranking keeps the subgraph vertically compact, and a synthetic root
//! connects everything into a single component. Original edges have their `minlen` scaled by
//! `node_sep` so that border nodes can always be placed on ranks of their own.
//!
//! With `height` the depth of the deepest subgraph below the root, `node_sep = 2 * height + 1`.
//! A graph without subgraphs has `node_sep = 1` and is only connected to the root.

use crate::context::LayoutContext;
use crate::label::{Dummy, EdgeLabel, NodeLabel};
use crate::util::{LayoutGraph, add_border_node, add_dummy_node};
use rustc_hash::FxHashMap;

pub fn run<G: Default>(g: &mut LayoutGraph<G>, ctx: &mut LayoutContext) {
    let root = add_dummy_node(g, Dummy::NestingRoot, NodeLabel::default(), "_root");
    let depths = tree_depths(g);
    let height = depths.values().copied().max().unwrap_or(1).saturating_sub(1);
    let node_sep = 2 * height + 1;

    for (_, label) in g.edge_labels_mut() {
        label.minlen *= node_sep;
    }
    let weight: f64 = g.edge_labels().map(|(_, label)| label.weight).sum::<f64>() + 1.0;

    let expand = Expand {
        root: &root,
        node_sep,
        weight,
        height,
        depths: &depths,
    };
    let top_level: Vec<String> = g.root_children().into_iter().map(String::from).collect();
    for v in &top_level {
        expand.visit(g, v);
    }

    ctx.nesting_root = Some(root);
    ctx.node_rank_factor = ctx.node_rank_factor.max(node_sep);
}

/// Removes the root and every edge added by [`run`]. Border nodes stay.
pub fn cleanup<G: Default>(g: &mut LayoutGraph<G>, ctx: &mut LayoutContext) {
    if let Some(root) = ctx.nesting_root.take() {
        g.remove_node(&root);
    }
    let nesting: Vec<_> = g
        .edge_labels()
        .filter(|(_, label)| label.nesting_edge)
        .map(|(key, _)| key.clone())
        .collect();
    for key in nesting {
        g.remove_edge_key(&key);
    }
}

/// Depth of every node in the nesting tree; top-level nodes have depth 1.
fn tree_depths<G: Default>(g: &LayoutGraph<G>) -> FxHashMap<String, usize> {
    let mut depths = FxHashMap::default();
    let mut stack: Vec<(&str, usize)> = g.root_children().into_iter().map(|v| (v, 1)).collect();
    while let Some((v, depth)) = stack.pop() {
        depths.insert(v.to_string(), depth);
        stack.extend(g.children(v).into_iter().map(|c| (c, depth + 1)));
    }
    depths
}

struct Expand<'a> {
    root: &'a str,
    node_sep: usize,
    weight: f64,
    height: usize,
    depths: &'a FxHashMap<String, usize>,
}

impl Expand<'_> {
    fn visit<G: Default>(&self, g: &mut LayoutGraph<G>, v: &str) {
        let children: Vec<String> = g.children(v).into_iter().map(String::from).collect();
        if children.is_empty() {
            if v != self.root {
                g.set_edge_with_label(
                    self.root,
                    v,
                    EdgeLabel {
                        weight: 0.0,
                        minlen: self.node_sep,
                        ..Default::default()
                    },
                );
            }
            return;
        }

        let top = add_border_node(g, "_bt", None, None);
        let bottom = add_border_node(g, "_bb", None, None);
        g.set_parent(top.clone(), v);
        g.set_parent(bottom.clone(), v);
        if let Some(label) = g.node_mut(v) {
            label.border_top = Some(top.clone());
            label.border_bottom = Some(bottom.clone());
        }

        let depth = self.depths.get(v).copied().unwrap_or(1);
        for child in &children {
            self.visit(g, child);

            let (child_top, child_bottom) = match g.node(child) {
                Some(NodeLabel {
                    border_top: Some(t),
                    border_bottom: Some(b),
                    ..
                }) => (t.clone(), b.clone()),
                _ => (child.clone(), child.clone()),
            };
            let is_subgraph = child_top != child_bottom;
            let weight = if is_subgraph {
                self.weight
            } else {
                2.0 * self.weight
            };
            let minlen = if is_subgraph {
                1
            } else {
                self.height - depth + 1
            };
            let nesting_edge = || EdgeLabel {
                weight,
                minlen,
                nesting_edge: true,
                ..Default::default()
            };
            g.set_edge_with_label(top.clone(), child_top, nesting_edge());
            g.set_edge_with_label(child_bottom, bottom.clone(), nesting_edge());
        }

        if g.parent(v).is_none() {
            g.set_edge_with_label(
                self.root,
                top,
                EdgeLabel {
                    weight: 0.0,
                    minlen: self.height + depth,
                    ..Default::default()
                },
            );
        }
    }
}

//! Split edges spanning several ranks into chains of unit-length segments.
//!
//! Each intermediate rank gets a zero-size dummy node; the dummy on the edge's `label_rank`
//! carries the label's size instead. [`undo`] collapses the chains again and turns the dummies'
//! coordinates into the edge's `points`.

use crate::context::{DummyChain, LayoutContext};
use crate::label::{Dummy, EdgeLabel, NodeLabel, Point};
use crate::util::{LayoutGraph, add_dummy_node};

pub fn run<G: Default>(g: &mut LayoutGraph<G>, ctx: &mut LayoutContext) {
    ctx.dummy_chains.clear();
    for key in g.edge_keys() {
        let (Some(v_rank), Some(w_rank)) = (
            g.node(&key.v).and_then(|n| n.rank),
            g.node(&key.w).and_then(|n| n.rank),
        ) else {
            continue;
        };
        if w_rank - v_rank <= 1 {
            continue;
        }
        let Some(mut label) = g.remove_edge_key(&key) else {
            continue;
        };
        label.points.clear();

        let segment = || EdgeLabel {
            weight: label.weight,
            ..Default::default()
        };
        let mut v = key.v.clone();
        let mut head: Option<String> = None;
        for rank in v_rank + 1..w_rank {
            let mut attrs = NodeLabel {
                rank: Some(rank),
                edge_obj: Some(key.clone()),
                ..Default::default()
            };
            let mut kind = Dummy::Edge;
            if label.label_rank == Some(rank) {
                attrs.width = label.width;
                attrs.height = label.height;
                attrs.label_pos = label.label_pos;
                kind = Dummy::EdgeLabel;
            }
            let dummy = add_dummy_node(g, kind, attrs, "_d");
            g.set_named_edge(v, dummy.clone(), key.name.clone(), segment());
            head.get_or_insert_with(|| dummy.clone());
            v = dummy;
        }
        g.set_named_edge(v, key.w.clone(), key.name.clone(), segment());

        if let Some(head) = head {
            ctx.dummy_chains.push(DummyChain {
                head,
                edge: key,
                label,
            });
        }
    }
}

pub fn undo<G: Default>(g: &mut LayoutGraph<G>, ctx: &mut LayoutContext) {
    for chain in std::mem::take(&mut ctx.dummy_chains) {
        let DummyChain {
            head,
            edge,
            mut label,
        } = chain;

        let mut v = head;
        while let Some(node) = g
            .node(&v)
            .filter(|n| matches!(n.dummy, Some(Dummy::Edge | Dummy::EdgeLabel)))
            .cloned()
        {
            let next = g.successors(&v).first().map(|w| w.to_string());
            g.remove_node(&v);

            let (x, y) = (node.x.unwrap_or(0.0), node.y.unwrap_or(0.0));
            label.points.push(Point::new(x, y));
            if node.dummy == Some(Dummy::EdgeLabel) {
                label.x = Some(x);
                label.y = Some(y);
                label.width = node.width;
                label.height = node.height;
            }
            match next {
                Some(w) => v = w,
                None => break,
            }
        }
        g.set_edge_key(edge, label);
    }
}

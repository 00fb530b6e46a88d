//! Self loops.
//!
//! Loops cannot be ranked or ordered, so they are detached from the graph up front and parked on
//! their node. After ordering, each loop gets a dummy node right of its owner that reserves room
//! for the loop's label; after positioning the dummy is replaced by a five-point curve.

use crate::label::{Dummy, NodeLabel, Point, SelfEdge};
use crate::util::{LayoutGraph, add_dummy_node, build_layer_matrix};

pub fn remove<G: Default>(g: &mut LayoutGraph<G>) {
    let loops: Vec<_> = g
        .edge_keys()
        .into_iter()
        .filter(|key| key.v == key.w)
        .collect();
    for key in loops {
        let Some(label) = g.remove_edge_key(&key) else {
            continue;
        };
        if let Some(node) = g.node_mut(&key.v) {
            node.self_edges.push(SelfEdge { key, label });
        }
    }
}

/// Inserts one dummy per parked loop, directly after its owner, shifting the rest of the layer.
pub fn insert<G: Default>(g: &mut LayoutGraph<G>) {
    for layer in build_layer_matrix(g) {
        let mut shift = 0usize;
        for (i, v) in layer.iter().enumerate() {
            let Some(node) = g.node_mut(v) else {
                continue;
            };
            node.order = Some(i + shift);
            let rank = node.rank;
            let loops = std::mem::take(&mut node.self_edges);
            for self_edge in loops {
                shift += 1;
                let label = NodeLabel {
                    width: self_edge.label.width,
                    height: self_edge.label.height,
                    rank,
                    order: Some(i + shift),
                    self_edges: vec![self_edge],
                    ..Default::default()
                };
                add_dummy_node(g, Dummy::SelfEdge, label, "_se");
            }
        }
    }
}

/// Restores every loop, routed around the right side of its node.
pub fn position<G: Default>(g: &mut LayoutGraph<G>) {
    let dummies: Vec<String> = g
        .node_labels()
        .filter(|(_, n)| n.dummy == Some(Dummy::SelfEdge))
        .map(|(v, _)| v.to_string())
        .collect();
    for v in dummies {
        let Some(mut dummy) = g.remove_node(&v) else {
            continue;
        };
        let Some(SelfEdge { key, mut label }) = dummy.self_edges.pop() else {
            continue;
        };
        let Some(owner) = g.node(&key.v) else {
            continue;
        };

        let x = owner.x.unwrap_or(0.0) + owner.width / 2.0;
        let y = owner.y.unwrap_or(0.0);
        let dx = dummy.x.unwrap_or(0.0) - x;
        let dy = owner.height / 2.0;
        label.points = vec![
            Point::new(x + 2.0 * dx / 3.0, y - dy),
            Point::new(x + 5.0 * dx / 6.0, y - dy),
            Point::new(x + dx, y),
            Point::new(x + 5.0 * dx / 6.0, y + dy),
            Point::new(x + 2.0 * dx / 3.0, y + dy),
        ];
        label.x = dummy.x;
        label.y = dummy.y;
        g.set_edge_key(key, label);
    }
}

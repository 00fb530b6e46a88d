//! Copying between the caller's graph and the working graph of a layout run.
//!
//! The run mutates labels freely (doubled `minlen`, widened labels, dummy nodes), so it works on a
//! copy holding only the layout inputs and hands back just the results.

use crate::label::{EdgeLabel, GraphLabel, NodeLabel};
use crate::util::LayoutGraph;
use strata_graph::{Graph, GraphOptions};

pub(super) fn build_layout_graph(input: &LayoutGraph<GraphLabel>) -> LayoutGraph<GraphLabel> {
    let mut g: LayoutGraph<GraphLabel> = Graph::new(GraphOptions {
        multigraph: true,
        compound: true,
    });
    g.set_graph(input.graph().clone());

    for (v, node) in input.node_labels() {
        g.set_node(v, NodeLabel::new(node.width, node.height));
    }
    for v in input.nodes() {
        if let Some(parent) = input.parent(v) {
            g.set_parent(v, parent);
        }
    }
    for (key, edge) in input.edge_labels() {
        g.set_edge_key(key.clone(), EdgeLabel {
            width: edge.width,
            height: edge.height,
            minlen: edge.minlen.max(1),
            weight: edge.weight,
            label_pos: edge.label_pos,
            label_offset: edge.label_offset,
            ..Default::default()
        });
    }
    g
}

pub(super) fn update_input_graph(input: &mut LayoutGraph<GraphLabel>, g: &LayoutGraph<GraphLabel>) {
    for (v, node) in input.node_labels_mut() {
        let Some(laid) = g.node(v) else {
            continue;
        };
        node.x = laid.x;
        node.y = laid.y;
        if g.has_children(v) {
            node.width = laid.width;
            node.height = laid.height;
        }
    }
    for (key, edge) in input.edge_labels_mut() {
        let Some(laid) = g.edge_by_key(key) else {
            continue;
        };
        edge.points = laid.points.clone();
        if laid.x.is_some() {
            edge.x = laid.x;
            edge.y = laid.y;
        }
    }
    let (width, height) = (g.graph().width, g.graph().height);
    let out = input.graph_mut();
    out.width = width;
    out.height = height;
}

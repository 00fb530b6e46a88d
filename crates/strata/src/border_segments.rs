//! Left and right border nodes of subgraphs.
//!
//! For every rank a subgraph spans, [`add`] places one border node on each side, chained
//! vertically by edges. Ordering then keeps the subgraph's content between them, and after
//! positioning [`remove_border_nodes`] derives the subgraph's box from their coordinates.

use crate::label::{BorderSide, Dummy, EdgeLabel, NodeLabel};
use crate::util::{LayoutGraph, add_dummy_node};

pub fn add<G: Default>(g: &mut LayoutGraph<G>) {
    let top_level: Vec<String> = g.root_children().into_iter().map(String::from).collect();
    for v in top_level {
        visit(g, &v);
    }
}

fn visit<G: Default>(g: &mut LayoutGraph<G>, v: &str) {
    let children: Vec<String> = g.children(v).into_iter().map(String::from).collect();
    for child in &children {
        visit(g, child);
    }

    let Some((min, max)) = g.node(v).and_then(|n| Some((n.min_rank?, n.max_rank?))) else {
        return;
    };
    let len = usize::try_from(max + 1).unwrap_or(0);
    if let Some(node) = g.node_mut(v) {
        node.border_left = vec![None; len];
        node.border_right = vec![None; len];
    }
    for rank in min..=max {
        add_border_node(g, v, BorderSide::Left, rank);
        add_border_node(g, v, BorderSide::Right, rank);
    }
}

fn add_border_node<G: Default>(g: &mut LayoutGraph<G>, sg: &str, side: BorderSide, rank: i32) {
    let Ok(slot) = usize::try_from(rank) else {
        return;
    };
    let label = NodeLabel {
        rank: Some(rank),
        border_type: Some(side),
        ..Default::default()
    };
    let prefix = match side {
        BorderSide::Left => "_bl",
        BorderSide::Right => "_br",
    };
    let curr = add_dummy_node(g, Dummy::Border, label, prefix);
    g.set_parent(curr.clone(), sg);

    let prev = g.node_mut(sg).and_then(|node| {
        let column = match side {
            BorderSide::Left => &mut node.border_left,
            BorderSide::Right => &mut node.border_right,
        };
        let prev = slot.checked_sub(1).and_then(|p| column.get(p).cloned().flatten());
        if let Some(cell) = column.get_mut(slot) {
            *cell = Some(curr.clone());
        }
        prev
    });
    if let Some(prev) = prev {
        g.set_edge_with_label(prev, curr, EdgeLabel::weighted(1.0));
    }
}

/// Sizes every subgraph from its border nodes, then deletes all border nodes.
pub fn remove_border_nodes<G: Default>(g: &mut LayoutGraph<G>) {
    let subgraphs: Vec<String> = g
        .nodes()
        .filter(|v| g.has_children(v))
        .map(String::from)
        .collect();
    for v in subgraphs {
        let Some(node) = g.node(&v) else {
            continue;
        };
        let y_of = |id: Option<&String>| id.and_then(|id| g.node(id)).map(|n| n.y.unwrap_or(0.0));
        let xs_of = |ids: &[Option<String>]| {
            ids.iter()
                .flatten()
                .filter_map(|id| g.node(id)?.x)
                .collect::<Vec<f64>>()
        };
        let top = y_of(node.border_top.as_ref());
        let bottom = y_of(node.border_bottom.as_ref());
        // The box spans the outermost side on any rank.
        let left = xs_of(&node.border_left).into_iter().reduce(f64::min);
        let right = xs_of(&node.border_right).into_iter().reduce(f64::max);
        let (Some(top), Some(bottom), Some(left), Some(right)) = (top, bottom, left, right) else {
            continue;
        };

        let width = (right - left).abs();
        let height = (bottom - top).abs();
        if let Some(node) = g.node_mut(&v) {
            node.width = width;
            node.height = height;
            node.x = Some(left.min(right) + width / 2.0);
            node.y = Some(top.min(bottom) + height / 2.0);
        }
    }

    let borders: Vec<String> = g
        .node_labels()
        .filter(|(_, n)| n.dummy == Some(Dummy::Border))
        .map(|(v, _)| v.to_string())
        .collect();
    for v in borders {
        g.remove_node(&v);
    }
}

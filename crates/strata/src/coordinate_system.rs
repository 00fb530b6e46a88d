//! Rank direction.
//!
//! Positioning always lays ranks out top to bottom. For horizontal directions node and label
//! sizes are transposed before positioning, and coordinates are flipped and transposed after.

use crate::label::RankDir;
use crate::util::LayoutGraph;

pub fn adjust<G: Default>(g: &mut LayoutGraph<G>, rankdir: RankDir) {
    if matches!(rankdir, RankDir::LR | RankDir::RL) {
        swap_width_height(g);
    }
}

pub fn undo<G: Default>(g: &mut LayoutGraph<G>, rankdir: RankDir) {
    if matches!(rankdir, RankDir::BT | RankDir::RL) {
        reverse_y(g);
    }
    if matches!(rankdir, RankDir::LR | RankDir::RL) {
        swap_xy(g);
        swap_width_height(g);
    }
}

fn swap_width_height<G: Default>(g: &mut LayoutGraph<G>) {
    for (_, node) in g.node_labels_mut() {
        std::mem::swap(&mut node.width, &mut node.height);
        for self_edge in &mut node.self_edges {
            std::mem::swap(&mut self_edge.label.width, &mut self_edge.label.height);
        }
    }
    for (_, edge) in g.edge_labels_mut() {
        std::mem::swap(&mut edge.width, &mut edge.height);
    }
}

fn reverse_y<G: Default>(g: &mut LayoutGraph<G>) {
    for (_, node) in g.node_labels_mut() {
        node.y = node.y.map(|y| -y);
    }
    for (_, edge) in g.edge_labels_mut() {
        for p in &mut edge.points {
            p.y = -p.y;
        }
        edge.y = edge.y.map(|y| -y);
    }
}

fn swap_xy<G: Default>(g: &mut LayoutGraph<G>) {
    for (_, node) in g.node_labels_mut() {
        std::mem::swap(&mut node.x, &mut node.y);
    }
    for (_, edge) in g.edge_labels_mut() {
        for p in &mut edge.points {
            std::mem::swap(&mut p.x, &mut p.y);
        }
        std::mem::swap(&mut edge.x, &mut edge.y);
    }
}

//! Room for edge labels.
//!
//! Doubling every `minlen` (and halving `ranksep` to compensate) guarantees a free rank between
//! the endpoints of any edge; a labelled edge puts its label on the middle one.

use crate::label::{Dummy, GraphLabel, LabelPos, NodeLabel, RankDir};
use crate::util::{LayoutGraph, add_dummy_node};

pub(super) fn make_space(g: &mut LayoutGraph<GraphLabel>) {
    let rankdir = g.graph().rankdir;
    g.graph_mut().ranksep /= 2.0;
    for (_, edge) in g.edge_labels_mut() {
        edge.minlen *= 2;
        if edge.label_pos != LabelPos::C {
            match rankdir {
                RankDir::TB | RankDir::BT => edge.width += edge.label_offset,
                RankDir::LR | RankDir::RL => edge.height += edge.label_offset,
            }
        }
    }
}

/// Adds a rank marker halfway along every edge that has a label, so rank compaction keeps the
/// label's rank in step with the endpoints.
pub(super) fn inject_proxies(g: &mut LayoutGraph<GraphLabel>) {
    let labelled: Vec<_> = g
        .edge_labels()
        .filter(|(_, e)| e.width > 0.0 && e.height > 0.0)
        .filter_map(|(key, _)| {
            let v = g.node(&key.v)?.rank?;
            let w = g.node(&key.w)?.rank?;
            Some((key.clone(), (w - v) / 2 + v))
        })
        .collect();
    for (key, rank) in labelled {
        let label = NodeLabel {
            rank: Some(rank),
            edge_obj: Some(key),
            ..Default::default()
        };
        add_dummy_node(g, Dummy::EdgeProxy, label, "_ep");
    }
}

pub(super) fn remove_proxies(g: &mut LayoutGraph<GraphLabel>) {
    let proxies: Vec<String> = g
        .node_labels()
        .filter(|(_, n)| n.dummy == Some(Dummy::EdgeProxy))
        .map(|(v, _)| v.to_string())
        .collect();
    for v in proxies {
        let Some(proxy) = g.remove_node(&v) else {
            continue;
        };
        if let Some(edge) = proxy.edge_obj.and_then(|key| g.edge_by_key_mut(&key)) {
            edge.label_rank = proxy.rank;
        }
    }
}

/// Moves side labels off the edge by `label_offset` and drops the extra width added for them.
pub(super) fn fixup_coords(g: &mut LayoutGraph<GraphLabel>) {
    for (_, edge) in g.edge_labels_mut() {
        let Some(x) = edge.x else {
            continue;
        };
        match edge.label_pos {
            LabelPos::L => {
                edge.width -= edge.label_offset;
                edge.x = Some(x - edge.width / 2.0 - edge.label_offset);
            }
            LabelPos::R => {
                edge.width -= edge.label_offset;
                edge.x = Some(x + edge.width / 2.0 + edge.label_offset);
            }
            LabelPos::C => {}
        }
    }
}

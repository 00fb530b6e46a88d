//! Rank, layer and geometry helpers shared by the layout phases.

use crate::error::{Error, Result};
use crate::label::{Dummy, EdgeLabel, NodeLabel, Point, Rect};
use std::collections::BTreeMap;
use std::time::Instant;
use strata_graph::{Graph, GraphOptions};

pub type LayoutGraph<G> = Graph<NodeLabel, EdgeLabel, G>;

/// Inserts a synthetic node of kind `kind` under an unused id starting with `prefix`.
pub fn add_dummy_node<G: Default>(
    g: &mut LayoutGraph<G>,
    kind: Dummy,
    mut label: NodeLabel,
    prefix: &str,
) -> String {
    let mut n = g.node_count();
    let mut id = format!("{prefix}{n}");
    while g.has_node(&id) {
        n += 1;
        id = format!("{prefix}{n}");
    }
    label.dummy = Some(kind);
    g.set_node(id.clone(), label);
    id
}

/// A zero-size border node at `rank` (and `order`, when given).
pub fn add_border_node<G: Default>(
    g: &mut LayoutGraph<G>,
    prefix: &str,
    rank: Option<i32>,
    order: Option<usize>,
) -> String {
    let label = NodeLabel {
        rank,
        order,
        ..Default::default()
    };
    add_dummy_node(g, Dummy::Border, label, prefix)
}

/// Copy of `g` without parallel edges: weights of merged edges are summed, minlen is the max.
pub fn simplify<G: Default + Clone>(g: &LayoutGraph<G>) -> LayoutGraph<G> {
    let mut out: LayoutGraph<G> = Graph::new(GraphOptions::default());
    out.set_graph(g.graph().clone());
    for (v, label) in g.node_labels() {
        out.set_node(v, label.clone());
    }
    for (key, label) in g.edge_labels() {
        let (weight, minlen) = out
            .edge(&key.v, &key.w, None)
            .map_or((0.0, 1), |prev| (prev.weight, prev.minlen));
        out.set_edge_with_label(
            key.v.clone(),
            key.w.clone(),
            EdgeLabel {
                weight: weight + label.weight,
                minlen: minlen.max(label.minlen),
                ..Default::default()
            },
        );
    }
    out
}

/// Copy of `g` keeping only leaf nodes, flattened out of the nesting tree.
pub fn as_non_compound_graph<G: Default + Clone>(g: &LayoutGraph<G>) -> LayoutGraph<G> {
    let mut out: LayoutGraph<G> = Graph::new(GraphOptions {
        multigraph: g.is_multigraph(),
        compound: false,
    });
    out.set_graph(g.graph().clone());
    for (v, label) in g.node_labels() {
        if !g.has_children(v) {
            out.set_node(v, label.clone());
        }
    }
    for (key, label) in g.edge_labels() {
        out.set_edge_key(key.clone(), label.clone());
    }
    out
}

pub fn successor_weights<G: Default>(
    g: &LayoutGraph<G>,
) -> BTreeMap<String, BTreeMap<String, f64>> {
    g.nodes()
        .map(|v| {
            let mut acc: BTreeMap<String, f64> = BTreeMap::new();
            g.for_each_out_edge(v, |key, label| {
                *acc.entry(key.w.clone()).or_default() += label.weight;
            });
            (v.to_string(), acc)
        })
        .collect()
}

pub fn predecessor_weights<G: Default>(
    g: &LayoutGraph<G>,
) -> BTreeMap<String, BTreeMap<String, f64>> {
    g.nodes()
        .map(|v| {
            let mut acc: BTreeMap<String, f64> = BTreeMap::new();
            g.for_each_in_edge(v, |key, label| {
                *acc.entry(key.v.clone()).or_default() += label.weight;
            });
            (v.to_string(), acc)
        })
        .collect()
}

/// Where the segment from the center of `rect` towards `point` leaves the rectangle.
pub fn intersect_rect(rect: Rect, point: Point) -> Result<Point> {
    let dx = point.x - rect.x;
    let dy = point.y - rect.y;
    if dx == 0.0 && dy == 0.0 {
        return Err(Error::PointInsideRect {
            x: point.x,
            y: point.y,
        });
    }

    let mut w = rect.width / 2.0;
    let mut h = rect.height / 2.0;
    if w == 0.0 && h == 0.0 {
        return Ok(Point::new(rect.x, rect.y));
    }
    let (sx, sy) = if dy.abs() * w > dx.abs() * h {
        // crosses the top or bottom side
        if dy < 0.0 {
            h = -h;
        }
        (h * dx / dy, h)
    } else {
        if dx < 0.0 {
            w = -w;
        }
        (w, w * dy / dx)
    };
    Ok(Point::new(rect.x + sx, rect.y + sy))
}

/// Node ids per rank (ascending, starting at rank 0), each layer sorted by `order`.
pub fn build_layer_matrix<E, G>(g: &Graph<NodeLabel, E, G>) -> Vec<Vec<String>>
where
    E: Default + 'static,
    G: Default,
{
    let Some(max) = g.node_labels().filter_map(|(_, n)| n.rank).max() else {
        return Vec::new();
    };
    let mut layers: Vec<Vec<(usize, &str)>> = vec![Vec::new(); (max.max(-1) + 1) as usize];
    for (v, node) in g.node_labels() {
        let Some(rank) = node.rank.filter(|&r| r >= 0) else {
            continue;
        };
        layers[rank as usize].push((node.order.unwrap_or(0), v));
    }
    layers
        .into_iter()
        .map(|mut layer| {
            layer.sort_by_key(|&(order, _)| order);
            layer.into_iter().map(|(_, v)| v.to_string()).collect()
        })
        .collect()
}

/// Shifts ranks so the smallest is 0. Nodes without a rank (subgraphs) are left alone.
pub fn normalize_ranks<E, G>(g: &mut Graph<NodeLabel, E, G>)
where
    E: Default + 'static,
    G: Default,
{
    let Some(min) = g.node_labels().filter_map(|(_, n)| n.rank).min() else {
        return;
    };
    for (_, node) in g.node_labels_mut() {
        if let Some(rank) = node.rank.as_mut() {
            *rank -= min;
        }
    }
}

/// Drops empty ranks that do not sit on a multiple of `factor`, pulling later ranks up.
pub fn remove_empty_ranks<E, G>(g: &mut Graph<NodeLabel, E, G>, factor: usize)
where
    E: Default + 'static,
    G: Default,
{
    let factor = factor.max(1);
    let Some(offset) = g.node_labels().filter_map(|(_, n)| n.rank).min() else {
        return;
    };

    let mut layers: BTreeMap<usize, Vec<String>> = BTreeMap::new();
    for (v, node) in g.node_labels() {
        if let Some(rank) = node.rank {
            layers
                .entry((rank - offset) as usize)
                .or_default()
                .push(v.to_string());
        }
    }
    let Some(&last) = layers.keys().next_back() else {
        return;
    };

    let mut delta = 0i32;
    for i in 0..=last {
        match layers.get(&i) {
            None if i % factor != 0 => delta -= 1,
            Some(vs) if delta != 0 => {
                for v in vs {
                    if let Some(rank) = g.node_mut(v).and_then(|n| n.rank.as_mut()) {
                        *rank += delta;
                    }
                }
            }
            _ => {}
        }
    }
}

pub fn max_rank<E, G>(g: &Graph<NodeLabel, E, G>) -> i32
where
    E: Default + 'static,
    G: Default,
{
    g.node_labels()
        .filter_map(|(_, n)| n.rank)
        .max()
        .unwrap_or(0)
}

/// Runs `f`, logging its wall time under `name`, and returns its value.
pub fn time<T>(name: &str, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let out = f();
    tracing::debug!(
        name,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "timed"
    );
    out
}

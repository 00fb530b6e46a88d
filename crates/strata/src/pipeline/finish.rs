use crate::error::{Error, Result};
use crate::label::{GraphLabel, Point, Rect};
use crate::util::{LayoutGraph, intersect_rect};

/// Copies the border ranks of every subgraph into its `min_rank`/`max_rank`.
pub(super) fn assign_rank_min_max(g: &mut LayoutGraph<GraphLabel>) -> Result<()> {
    let spans: Vec<_> = g
        .node_labels()
        .filter_map(|(v, n)| Some((v, n.border_top.as_ref()?, n.border_bottom.as_ref()?)))
        .map(|(v, top, bottom)| {
            let rank_of = |b: &str| {
                g.node(b).and_then(|n| n.rank).ok_or_else(|| Error::MissingRank {
                    node: b.to_string(),
                })
            };
            Ok((v.to_string(), rank_of(top)?, rank_of(bottom)?))
        })
        .collect::<Result<_>>()?;
    for (v, min, max) in spans {
        if let Some(node) = g.node_mut(&v) {
            node.min_rank = Some(min);
            node.max_rank = Some(max);
        }
    }
    Ok(())
}

/// Fails on the first leaf node left without a rank.
pub(super) fn check_ranks(g: &LayoutGraph<GraphLabel>) -> Result<()> {
    match g
        .node_labels()
        .find(|(v, n)| n.rank.is_none() && !g.has_children(v))
    {
        Some((v, _)) => Err(Error::MissingRank {
            node: v.to_string(),
        }),
        None => Ok(()),
    }
}

/// Shifts the drawing so its top-left corner sits at the margins, and records its size.
pub(super) fn translate(g: &mut LayoutGraph<GraphLabel>) {
    let mut min_x = f64::INFINITY;
    let mut max_x = 0.0f64;
    let mut min_y = f64::INFINITY;
    let mut max_y = 0.0f64;
    let mut extend = |x: f64, y: f64, w: f64, h: f64| {
        min_x = min_x.min(x - w / 2.0);
        max_x = max_x.max(x + w / 2.0);
        min_y = min_y.min(y - h / 2.0);
        max_y = max_y.max(y + h / 2.0);
    };
    for (_, n) in g.node_labels() {
        if let (Some(x), Some(y)) = (n.x, n.y) {
            extend(x, y, n.width, n.height);
        }
    }
    for (_, e) in g.edge_labels() {
        if let (Some(x), Some(y)) = (e.x, e.y) {
            extend(x, y, e.width, e.height);
        }
    }
    if !min_x.is_finite() {
        min_x = 0.0;
        min_y = 0.0;
    }

    let (marginx, marginy) = (g.graph().marginx, g.graph().marginy);
    let dx = min_x - marginx;
    let dy = min_y - marginy;
    for (_, n) in g.node_labels_mut() {
        n.x = n.x.map(|x| x - dx);
        n.y = n.y.map(|y| y - dy);
    }
    for (_, e) in g.edge_labels_mut() {
        for p in &mut e.points {
            p.x -= dx;
            p.y -= dy;
        }
        e.x = e.x.map(|x| x - dx);
        e.y = e.y.map(|y| y - dy);
    }

    let label = g.graph_mut();
    label.width = max_x - dx + marginx;
    label.height = max_y - dy + marginy;
}

/// Prepends and appends the points where each edge leaves its tail and enters its head.
pub(super) fn assign_node_intersects(g: &mut LayoutGraph<GraphLabel>) -> Result<()> {
    let rect = |g: &LayoutGraph<GraphLabel>, v: &str| {
        g.node(v)
            .map(|n| Rect {
                x: n.x.unwrap_or(0.0),
                y: n.y.unwrap_or(0.0),
                width: n.width,
                height: n.height,
            })
            .unwrap_or_default()
    };
    for key in g.edge_keys() {
        let (tail, head) = (rect(g, &key.v), rect(g, &key.w));
        let Some(edge) = g.edge_by_key_mut(&key) else {
            continue;
        };
        let (toward_tail, toward_head) = match (edge.points.first(), edge.points.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => (Point::new(head.x, head.y), Point::new(tail.x, tail.y)),
        };
        let start = intersect_rect(tail, toward_tail)?;
        let end = intersect_rect(head, toward_head)?;
        edge.points.insert(0, start);
        edge.points.push(end);
    }
    Ok(())
}

pub(super) fn reverse_points_for_reversed_edges(g: &mut LayoutGraph<GraphLabel>) {
    for (_, e) in g.edge_labels_mut() {
        if e.reversed {
            e.points.reverse();
        }
    }
}

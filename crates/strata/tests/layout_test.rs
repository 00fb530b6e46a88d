use serde_json::json;
use std::time::Duration;
use strata::{
    EdgeLabel, Graph, GraphLabel, GraphOptions, LabelPos, NodeLabel, NoopObserver, Phase,
    PhaseStats, Point, RankDir, layout, layout_with,
};

type InputGraph = Graph<NodeLabel, EdgeLabel, GraphLabel>;

fn new_graph() -> InputGraph {
    let mut g: InputGraph = Graph::new(GraphOptions {
        multigraph: true,
        compound: true,
    });
    g.set_graph(GraphLabel::default());
    g
}

fn x(g: &InputGraph, v: &str) -> f64 {
    g.node(v).unwrap().x.unwrap()
}

fn y(g: &InputGraph, v: &str) -> f64 {
    g.node(v).unwrap().y.unwrap()
}

fn dist(p: Point, x: f64, y: f64) -> f64 {
    ((p.x - x).powi(2) + (p.y - y).powi(2)).sqrt()
}

#[test]
fn lays_out_an_empty_graph() {
    let mut g = new_graph();
    layout(&mut g).unwrap();
    assert_eq!(g.graph().width, 0.0);
    assert_eq!(g.graph().height, 0.0);
}

#[test]
fn lays_out_a_single_node() {
    let mut g = new_graph();
    g.set_node("a", NodeLabel::new(50.0, 100.0));

    layout(&mut g).unwrap();

    assert_eq!(x(&g, "a"), 25.0);
    assert_eq!(y(&g, "a"), 50.0);
    assert_eq!(g.graph().width, 50.0);
    assert_eq!(g.graph().height, 100.0);
}

#[test]
fn margins_shift_the_drawing_and_grow_its_size() {
    let mut g = new_graph();
    g.graph_mut().marginx = 10.0;
    g.graph_mut().marginy = 20.0;
    g.set_node("a", NodeLabel::new(50.0, 100.0));

    layout(&mut g).unwrap();

    assert_eq!(x(&g, "a"), 35.0);
    assert_eq!(y(&g, "a"), 70.0);
    assert_eq!(g.graph().width, 70.0);
    assert_eq!(g.graph().height, 140.0);
}

#[test]
fn lays_out_two_connected_nodes_top_to_bottom() {
    let mut g = new_graph();
    g.set_node("a", NodeLabel::new(50.0, 100.0));
    g.set_node("b", NodeLabel::new(50.0, 100.0));
    g.set_edge("a", "b");

    layout(&mut g).unwrap();

    assert_eq!(x(&g, "a"), x(&g, "b"));
    assert!(y(&g, "a") < y(&g, "b"));
    assert_eq!(y(&g, "b") - y(&g, "a"), 100.0 + g.graph().ranksep);

    let points = &g.edge("a", "b", None).unwrap().points;
    let first = points.first().copied().unwrap();
    let last = points.last().copied().unwrap();
    assert_eq!(first.y, y(&g, "a") + 50.0);
    assert_eq!(last.y, y(&g, "b") - 50.0);
}

#[test]
fn follows_every_rank_direction() {
    for rankdir in [RankDir::TB, RankDir::BT, RankDir::LR, RankDir::RL] {
        let mut g = new_graph();
        g.graph_mut().rankdir = rankdir;
        g.set_node("a", NodeLabel::new(50.0, 100.0));
        g.set_node("b", NodeLabel::new(50.0, 100.0));
        g.set_edge("a", "b");

        layout(&mut g).unwrap();

        let (ax, ay, bx, by) = (x(&g, "a"), y(&g, "a"), x(&g, "b"), y(&g, "b"));
        match rankdir {
            RankDir::TB => assert!(ax == bx && ay < by, "{rankdir:?}"),
            RankDir::BT => assert!(ax == bx && ay > by, "{rankdir:?}"),
            RankDir::LR => assert!(ay == by && ax < bx, "{rankdir:?}"),
            RankDir::RL => assert!(ay == by && ax > bx, "{rankdir:?}"),
        }
    }
}

#[test]
fn places_an_edge_label_between_its_endpoints() {
    let mut g = new_graph();
    g.set_node("a", NodeLabel::new(50.0, 100.0));
    g.set_node("b", NodeLabel::new(50.0, 100.0));
    g.set_edge_with_label("a", "b", EdgeLabel::sized(50.0, 100.0));

    layout(&mut g).unwrap();

    let edge = g.edge("a", "b", None).unwrap();
    let (ex, ey) = (edge.x.unwrap(), edge.y.unwrap());
    assert_eq!(x(&g, "a"), x(&g, "b"));
    assert!(y(&g, "a") < ey && ey < y(&g, "b"));
    // Labels sit to the right of the edge by default.
    assert_eq!(edge.label_pos, LabelPos::R);
    assert!(ex > x(&g, "a"));
    assert_eq!(edge.points.len(), 3);
    // The caller's label size is left as given.
    assert_eq!(edge.width, 50.0);
}

#[test]
fn centered_edge_label_sits_on_the_edge() {
    let mut g = new_graph();
    g.set_node("a", NodeLabel::new(50.0, 100.0));
    g.set_node("b", NodeLabel::new(50.0, 100.0));
    g.set_edge_with_label("a", "b", EdgeLabel {
        label_pos: LabelPos::C,
        ..EdgeLabel::sized(60.0, 20.0)
    });

    layout(&mut g).unwrap();

    let edge = g.edge("a", "b", None).unwrap();
    assert_eq!(edge.x, Some(x(&g, "a")));
    let middle = edge.points[1];
    assert_eq!(middle.x, edge.x.unwrap());
    assert_eq!(middle.y, edge.y.unwrap());
}

#[test]
fn routes_self_loops() {
    let mut g = new_graph();
    g.set_node("a", NodeLabel::new(50.0, 100.0));
    g.set_edge("a", "a");

    layout(&mut g).unwrap();

    let edge = g.edge("a", "a", None).unwrap();
    assert_eq!(edge.points.len(), 7);
    // The loop bulges out to the right of its node.
    assert!(edge.points.iter().all(|p| p.x >= x(&g, "a")));
    assert!(edge.points.iter().any(|p| p.x > x(&g, "a") + 25.0));
}

#[test]
fn reversed_edges_keep_their_direction() {
    let mut g = new_graph();
    g.set_node("a", NodeLabel::new(50.0, 100.0));
    g.set_node("b", NodeLabel::new(50.0, 100.0));
    g.set_edge("a", "b");
    g.set_edge("b", "a");

    layout(&mut g).unwrap();

    for (v, w) in [("a", "b"), ("b", "a")] {
        let points = &g.edge(v, w, None).unwrap().points;
        let first = points.first().copied().unwrap();
        let last = points.last().copied().unwrap();
        assert!(dist(first, x(&g, v), y(&g, v)) < dist(first, x(&g, w), y(&g, w)));
        assert!(dist(last, x(&g, w), y(&g, w)) < dist(last, x(&g, v), y(&g, v)));
    }
}

#[test]
fn keeps_parallel_edges_apart() {
    let mut g = new_graph();
    g.set_node("a", NodeLabel::new(50.0, 50.0));
    g.set_node("b", NodeLabel::new(50.0, 50.0));
    g.set_named_edge("a", "b", Some("x"), EdgeLabel::sized(20.0, 20.0));
    g.set_named_edge("a", "b", Some("y"), EdgeLabel::sized(20.0, 20.0));

    layout(&mut g).unwrap();

    let ex = g.edge("a", "b", Some("x")).unwrap();
    let ey = g.edge("a", "b", Some("y")).unwrap();
    assert_eq!(ex.y, ey.y);
    assert_ne!(ex.x, ey.x);
}

#[test]
fn sizes_subgraphs_around_their_children() {
    let mut g = new_graph();
    g.set_node("a", NodeLabel::new(50.0, 100.0));
    g.set_node("sg", NodeLabel::default());
    g.set_parent("a", "sg");

    layout(&mut g).unwrap();

    let sg = g.node("sg").unwrap();
    let a = g.node("a").unwrap();
    let (sx, sy) = (sg.x.unwrap(), sg.y.unwrap());
    let (ax, ay) = (a.x.unwrap(), a.y.unwrap());
    assert!(sg.width > a.width);
    assert!(sg.height > a.height);
    assert!(sx - sg.width / 2.0 <= ax - a.width / 2.0);
    assert!(ax + a.width / 2.0 <= sx + sg.width / 2.0);
    assert!(sy - sg.height / 2.0 <= ay - a.height / 2.0);
    assert!(ay + a.height / 2.0 <= sy + sg.height / 2.0);
}

#[test]
fn lays_out_edges_into_nested_subgraphs() {
    let mut g = new_graph();
    g.set_node("a", NodeLabel::new(50.0, 50.0));
    g.set_node("b", NodeLabel::new(50.0, 50.0));
    g.set_node("c", NodeLabel::new(50.0, 50.0));
    g.set_parent("b", "sg2");
    g.set_parent("sg2", "sg1");
    g.set_parent("c", "sg1");
    g.set_edge("a", "b");
    g.set_edge("b", "c");

    layout(&mut g).unwrap();

    for v in ["a", "b", "c", "sg1", "sg2"] {
        let node = g.node(v).unwrap();
        assert!(node.x.is_some() && node.y.is_some(), "{v} not positioned");
    }
    assert!(y(&g, "a") < y(&g, "b"));
    assert!(y(&g, "b") < y(&g, "c"));
    assert!(!g.edge("a", "b", None).unwrap().points.is_empty());
}

#[test]
fn keeps_caller_fields_on_edges() {
    let mut g = new_graph();
    g.set_node("a", NodeLabel::new(10.0, 10.0));
    g.set_node("b", NodeLabel::new(10.0, 10.0));
    let mut label = EdgeLabel::with_minlen(2);
    label.extras.insert("color".to_string(), json!("red"));
    g.set_edge_with_label("a", "b", label);

    layout(&mut g).unwrap();

    let edge = g.edge("a", "b", None).unwrap();
    assert_eq!(edge.extras.get("color"), Some(&json!("red")));
    assert_eq!(edge.minlen, 2);
    assert_eq!(g.node("a").unwrap().width, 10.0);
}

#[test]
fn longer_minlen_stretches_the_edge() {
    let ranksep_span = |minlen: usize| {
        let mut g = new_graph();
        g.set_node("a", NodeLabel::new(10.0, 10.0));
        g.set_node("b", NodeLabel::new(10.0, 10.0));
        g.set_edge_with_label("a", "b", EdgeLabel::with_minlen(minlen));
        layout(&mut g).unwrap();
        y(&g, "b") - y(&g, "a")
    };
    assert!(ranksep_span(3) > ranksep_span(1));
}

#[test]
fn node_rank_factor_compacts_empty_ranks() {
    let span = |factor: Option<usize>| {
        let mut g = new_graph();
        g.graph_mut().node_rank_factor = factor;
        g.set_node("a", NodeLabel::new(50.0, 100.0));
        g.set_node("b", NodeLabel::new(50.0, 100.0));
        g.set_edge("a", "b");
        layout(&mut g).unwrap();
        y(&g, "b") - y(&g, "a")
    };
    assert_eq!(span(None), 150.0);
    assert_eq!(span(Some(4)), 125.0);
}

#[test]
fn every_ranker_produces_a_layout() {
    for name in ["network-simplex", "tight-tree", "longest-path"] {
        let mut g = new_graph();
        g.graph_mut().ranker = name.parse().unwrap();
        g.set_node("a", NodeLabel::new(20.0, 20.0));
        g.set_node("b", NodeLabel::new(20.0, 20.0));
        g.set_node("c", NodeLabel::new(20.0, 20.0));
        g.set_path(&["a", "b", "c"]);
        g.set_edge("a", "c");

        layout(&mut g).unwrap();

        assert!(y(&g, "a") < y(&g, "b"), "{name}");
        assert!(y(&g, "b") < y(&g, "c"), "{name}");
    }
}

#[test]
fn reports_every_phase_in_order() {
    let mut g = new_graph();
    for v in ["a", "b", "c"] {
        g.set_node(v, NodeLabel::new(10.0, 10.0));
    }
    g.set_path(&["a", "b", "c"]);
    let mut phases = Vec::new();

    layout_with(&mut g, &mut |phase: Phase, _: Duration, _: PhaseStats| {
        phases.push(phase)
    })
    .unwrap();

    assert_eq!(phases.len(), 27);
    assert_eq!(phases.first(), Some(&Phase::MakeSpaceForEdgeLabels));
    assert_eq!(phases.last(), Some(&Phase::AcyclicUndo));
    let at = |p: Phase| phases.iter().position(|&q| q == p).unwrap();
    assert!(at(Phase::Rank) < at(Phase::Order));
    assert!(at(Phase::Order) < at(Phase::Position));
    assert!(at(Phase::Position) < at(Phase::TranslateGraph));
}

#[test]
fn noop_observer_lays_out_the_same() {
    let build = || {
        let mut g = new_graph();
        g.set_node("a", NodeLabel::new(30.0, 30.0));
        g.set_node("b", NodeLabel::new(30.0, 30.0));
        g.set_node("c", NodeLabel::new(30.0, 30.0));
        g.set_edge("a", "b");
        g.set_edge("a", "c");
        g
    };
    let mut traced = build();
    let mut quiet = build();

    layout(&mut traced).unwrap();
    layout_with(&mut quiet, &mut NoopObserver).unwrap();

    for v in ["a", "b", "c"] {
        assert_eq!(traced.node(v).unwrap().x, quiet.node(v).unwrap().x);
        assert_eq!(traced.node(v).unwrap().y, quiet.node(v).unwrap().y);
    }
}

#[test]
fn phase_names_are_snake_case() {
    assert_eq!(Phase::MakeSpaceForEdgeLabels.name(), "make_space_for_edge_labels");
    assert_eq!(Phase::AcyclicUndo.to_string(), "acyclic_undo");
}

/// Small deterministic generator so the graphs below are reproducible.
struct Lcg(u64);

impl Lcg {
    fn below(&mut self, n: u64) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) % n
    }
}

/// Twelve nodes of assorted sizes over subgraphs `sA`, `sB`, `sC`, and `sD` nested in `sA`.
fn random_compound(seed: u64) -> InputGraph {
    let mut rng = Lcg(seed);
    let mut g = new_graph();
    let nodes: Vec<String> = (0..12).map(|i| format!("n{i}")).collect();
    for v in &nodes {
        let width = 20.0 + 10.0 * rng.below(5) as f64;
        let height = 10.0 + 10.0 * rng.below(3) as f64;
        g.set_node(v.clone(), NodeLabel::new(width, height));
    }
    g.set_parent("sD", "sA");
    let homes = ["sA", "sB", "sC", "sD"];
    for (i, v) in nodes.iter().enumerate() {
        let home = if i < homes.len() { i as u64 } else { rng.below(5) };
        if let Some(sg) = homes.get(home as usize) {
            g.set_parent(v.clone(), *sg);
        }
    }
    for _ in 0..16 {
        let (a, b) = (rng.below(12) as usize, rng.below(12) as usize);
        if a != b {
            g.set_edge(&nodes[a], &nodes[b]);
        }
    }
    g
}

/// `(left, right, top, bottom)` of a node's box.
fn bounds(g: &InputGraph, v: &str) -> (f64, f64, f64, f64) {
    let n = g.node(v).unwrap();
    let (x, y) = (n.x.unwrap(), n.y.unwrap());
    (
        x - n.width / 2.0,
        x + n.width / 2.0,
        y - n.height / 2.0,
        y + n.height / 2.0,
    )
}

#[test]
fn children_stay_inside_their_subgraph_box() {
    const EPS: f64 = 1e-6;
    for seed in 0..30 {
        let mut g = random_compound(seed);
        layout(&mut g).unwrap();

        for v in g.node_ids() {
            let Some(parent) = g.parent(&v) else {
                continue;
            };
            let (l, r, t, b) = bounds(&g, &v);
            let (pl, pr, pt, pb) = bounds(&g, parent);
            assert!(
                pl - EPS <= l && r <= pr + EPS && pt - EPS <= t && b <= pb + EPS,
                "seed {seed}: {v} {:?} not inside {parent} {:?}",
                (l, r, t, b),
                (pl, pr, pt, pb)
            );
        }
    }
}

#[test]
fn sibling_subgraph_boxes_do_not_overlap() {
    const EPS: f64 = 1e-6;
    for seed in 0..30 {
        let mut g = random_compound(seed);
        layout(&mut g).unwrap();

        for (a, b) in [("sA", "sB"), ("sA", "sC"), ("sB", "sC")] {
            let (al, ar, at, ab) = bounds(&g, a);
            let (bl, br, bt, bb) = bounds(&g, b);
            let overlap = al < br - EPS && bl < ar - EPS && at < bb - EPS && bt < ab - EPS;
            assert!(
                !overlap,
                "seed {seed}: {a} {:?} overlaps {b} {:?}",
                (al, ar, at, ab),
                (bl, br, bt, bb)
            );
        }
    }
}

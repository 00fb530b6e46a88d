use strata::position::{Spacing, position};
use strata::{BorderSide, Dummy, EdgeLabel, Graph, GraphLabel, GraphOptions, NodeLabel};

type LayoutGraph = Graph<NodeLabel, EdgeLabel, GraphLabel>;

fn new_graph() -> LayoutGraph {
    let mut g: LayoutGraph = Graph::new(GraphOptions {
        multigraph: true,
        compound: true,
    });
    g.set_graph(GraphLabel::default());
    g
}

fn node(g: &mut LayoutGraph, v: &str, rank: i32, order: usize, width: f64, height: f64) {
    g.set_node(v, NodeLabel {
        rank: Some(rank),
        order: Some(order),
        width,
        height,
        ..Default::default()
    });
}

fn spacing(nodesep: f64, edgesep: f64, ranksep: f64) -> Spacing {
    Spacing {
        nodesep,
        edgesep,
        ranksep,
    }
}

fn x(g: &LayoutGraph, v: &str) -> f64 {
    g.node(v).unwrap().x.unwrap()
}

fn y(g: &LayoutGraph, v: &str) -> f64 {
    g.node(v).unwrap().y.unwrap()
}

#[test]
fn y_centers_each_rank_on_its_tallest_node() {
    let mut g = new_graph();
    node(&mut g, "a", 0, 0, 10.0, 20.0);
    node(&mut g, "b", 0, 1, 10.0, 8.0);
    node(&mut g, "c", 1, 0, 10.0, 40.0);
    g.set_edge("a", "c");

    position(&mut g, spacing(50.0, 20.0, 10.0));

    assert_eq!(y(&g, "a"), 10.0);
    assert_eq!(y(&g, "b"), 10.0);
    assert_eq!(y(&g, "c"), 50.0);
}

#[test]
fn x_keeps_nodesep_between_real_nodes() {
    let mut g = new_graph();
    node(&mut g, "a", 0, 0, 50.0, 10.0);
    node(&mut g, "b", 0, 1, 70.0, 10.0);

    position(&mut g, spacing(30.0, 20.0, 50.0));

    assert_eq!(x(&g, "a"), 25.0);
    assert_eq!(x(&g, "b"), 115.0);
}

#[test]
fn x_uses_edgesep_next_to_dummies() {
    let mut g = new_graph();
    node(&mut g, "a", 0, 0, 50.0, 10.0);
    g.set_node("d", NodeLabel {
        rank: Some(0),
        order: Some(1),
        dummy: Some(Dummy::Edge),
        ..Default::default()
    });

    position(&mut g, spacing(30.0, 10.0, 50.0));

    assert_eq!(x(&g, "d") - x(&g, "a"), 25.0 + 15.0 + 5.0);
}

#[test]
fn leftmost_edge_of_the_drawing_is_at_zero() {
    let mut g = new_graph();
    node(&mut g, "a", 0, 0, 40.0, 10.0);
    node(&mut g, "b", 1, 0, 100.0, 10.0);
    node(&mut g, "c", 1, 1, 20.0, 10.0);
    g.set_edge("a", "b");
    g.set_edge("a", "c");

    position(&mut g, spacing(50.0, 20.0, 50.0));

    let min_left = ["a", "b", "c"]
        .iter()
        .map(|v| x(&g, v) - g.node(v).unwrap().width / 2.0)
        .fold(f64::INFINITY, f64::min);
    assert!(min_left.abs() < 1e-9);
}

#[test]
fn child_is_centered_under_its_parents() {
    let mut g = new_graph();
    node(&mut g, "a", 0, 0, 10.0, 10.0);
    node(&mut g, "b", 0, 1, 10.0, 10.0);
    node(&mut g, "c", 1, 0, 10.0, 10.0);
    g.set_edge("a", "c");
    g.set_edge("b", "c");

    position(&mut g, spacing(10.0, 10.0, 10.0));

    assert_eq!(x(&g, "a"), 5.0);
    assert_eq!(x(&g, "b"), 25.0);
    assert_eq!(x(&g, "c"), 15.0);
}

#[test]
fn single_edge_is_vertical() {
    let mut g = new_graph();
    node(&mut g, "a", 0, 0, 50.0, 100.0);
    node(&mut g, "b", 1, 0, 50.0, 100.0);
    g.set_edge("a", "b");

    position(&mut g, spacing(50.0, 20.0, 50.0));

    assert_eq!(x(&g, "a"), x(&g, "b"));
    assert_eq!(y(&g, "b") - y(&g, "a"), 150.0);
}

#[test]
fn order_and_separation_survive_refinement() {
    let mut g = new_graph();
    node(&mut g, "a", 0, 0, 20.0, 10.0);
    node(&mut g, "b", 0, 1, 20.0, 10.0);
    node(&mut g, "c", 0, 2, 20.0, 10.0);
    node(&mut g, "d", 1, 0, 20.0, 10.0);
    node(&mut g, "e", 1, 1, 20.0, 10.0);
    node(&mut g, "f", 1, 2, 20.0, 10.0);
    // Everything pulls towards the middle.
    g.set_edge("a", "e");
    g.set_edge("b", "e");
    g.set_edge("c", "e");
    g.set_edge("b", "d");
    g.set_edge("b", "f");

    position(&mut g, spacing(15.0, 10.0, 50.0));

    for layer in [["a", "b", "c"], ["d", "e", "f"]] {
        for pair in layer.windows(2) {
            assert!(x(&g, pair[1]) - x(&g, pair[0]) >= 35.0 - 1e-9);
        }
    }
}

#[test]
fn subgraph_nodes_are_not_positioned() {
    let mut g = new_graph();
    node(&mut g, "a", 0, 0, 10.0, 10.0);
    g.set_node("sg", NodeLabel::default());
    g.set_parent("a", "sg");

    position(&mut g, spacing(50.0, 20.0, 50.0));

    assert_eq!(g.node("sg").unwrap().x, None);
    assert_eq!(x(&g, "a"), 5.0);
}

fn side(g: &mut LayoutGraph, v: &str, sg: &str, side: BorderSide, rank: i32, order: usize) {
    g.set_node(v, NodeLabel {
        rank: Some(rank),
        order: Some(order),
        dummy: Some(Dummy::Border),
        border_type: Some(side),
        ..Default::default()
    });
    g.set_parent(v, sg);
}

#[test]
fn subgraph_sides_line_up_across_ranks() {
    let mut g = new_graph();
    side(&mut g, "bl0", "sg", BorderSide::Left, 0, 0);
    node(&mut g, "a", 0, 1, 20.0, 10.0);
    side(&mut g, "br0", "sg", BorderSide::Right, 0, 2);
    node(&mut g, "wide", 1, 0, 100.0, 10.0);
    side(&mut g, "bl1", "sg", BorderSide::Left, 1, 1);
    node(&mut g, "b", 1, 2, 20.0, 10.0);
    side(&mut g, "br1", "sg", BorderSide::Right, 1, 3);
    g.set_parent("a", "sg");
    g.set_parent("b", "sg");
    g.set_edge("a", "b");
    g.set_edge("wide", "a");

    position(&mut g, spacing(20.0, 10.0, 50.0));

    assert_eq!(x(&g, "bl0"), x(&g, "bl1"));
    assert_eq!(x(&g, "br0"), x(&g, "br1"));
    for v in ["a", "b"] {
        let half = g.node(v).unwrap().width / 2.0;
        assert!(x(&g, "bl0") < x(&g, v) - half);
        assert!(x(&g, v) + half < x(&g, "br0"));
    }
    assert!(x(&g, "wide") + 50.0 < x(&g, "bl1"));
}

use strata::debug::{DebugEdge, DebugNode, debug_ordering};
use strata::{EdgeLabel, Graph, GraphLabel, GraphOptions, NodeLabel};

type LayoutGraph = Graph<NodeLabel, EdgeLabel, GraphLabel>;

fn ordered(rank: i32, order: usize) -> NodeLabel {
    NodeLabel {
        rank: Some(rank),
        order: Some(order),
        ..Default::default()
    }
}

fn sample() -> LayoutGraph {
    let mut g: LayoutGraph = Graph::new(GraphOptions {
        multigraph: true,
        compound: true,
    });
    g.set_graph(GraphLabel::default());
    g.set_node("a", ordered(0, 1));
    g.set_node("b", ordered(0, 0));
    g.set_node("c", ordered(1, 0));
    g.set_node("d", ordered(1, 1));
    g.set_edge("a", "c");
    g.set_edge("b", "d");
    g
}

#[test]
fn nests_every_node_in_its_layer() {
    let h = debug_ordering(&sample());

    assert_eq!(h.parent("a"), Some("layer0"));
    assert_eq!(h.parent("b"), Some("layer0"));
    assert_eq!(h.parent("c"), Some("layer1"));
    assert_eq!(h.parent("d"), Some("layer1"));
    assert_eq!(h.node("layer0"), Some(&DebugNode {
        label: "layer0".to_string(),
        same_rank: true,
    }));
    assert!(!h.node("a").unwrap().same_rank);
    assert_eq!(h.node("a").unwrap().label, "a");
}

#[test]
fn chains_each_layer_in_order_with_invisible_edges() {
    let h = debug_ordering(&sample());

    assert_eq!(h.edge("b", "a", None), Some(&DebugEdge { invisible: true }));
    assert_eq!(h.edge("c", "d", None), Some(&DebugEdge { invisible: true }));
    assert!(!h.has_edge("a", "b", None));
}

#[test]
fn keeps_the_original_edges_visible() {
    let h = debug_ordering(&sample());

    assert_eq!(h.edge("a", "c", None), Some(&DebugEdge { invisible: false }));
    assert_eq!(h.edge("b", "d", None), Some(&DebugEdge { invisible: false }));
    assert_eq!(h.edge_count(), 4);
}

#[test]
fn leaves_the_input_alone() {
    let g = sample();
    let _ = debug_ordering(&g);
    assert_eq!(g.node_count(), 4);
    assert_eq!(g.edge_count(), 2);
    assert_eq!(g.parent("a"), None);
}

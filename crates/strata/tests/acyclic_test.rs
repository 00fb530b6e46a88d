use strata::acyclic;
use strata::graph::alg;
use strata::{Acyclicer, EdgeLabel, Graph, GraphLabel, GraphOptions, NodeLabel};

fn new_graph() -> Graph<NodeLabel, EdgeLabel, GraphLabel> {
    let mut g: Graph<NodeLabel, EdgeLabel, GraphLabel> = Graph::new(GraphOptions {
        multigraph: true,
        compound: false,
    });
    g.set_graph(GraphLabel::default());
    g
}

fn strip_edges(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>) -> Vec<(String, String, Option<String>)> {
    let mut edges: Vec<_> = g
        .edges()
        .map(|e| (e.v.clone(), e.w.clone(), e.name.clone()))
        .collect();
    edges.sort();
    edges
}

fn edge(v: &str, w: &str) -> (String, String, Option<String>) {
    (v.to_string(), w.to_string(), None)
}

const ACYCLICERS: [Acyclicer; 2] = [Acyclicer::Greedy, Acyclicer::Dfs];

#[test]
fn run_leaves_an_acyclic_graph_alone() {
    for acyclicer in ACYCLICERS {
        let mut g = new_graph();
        g.set_path(&["a", "b", "d"]);
        g.set_path(&["a", "c", "d"]);
        acyclic::run(&mut g, acyclicer);
        assert_eq!(
            strip_edges(&g),
            vec![edge("a", "b"), edge("a", "c"), edge("b", "d"), edge("c", "d")]
        );
    }
}

#[test]
fn run_breaks_cycles() {
    for acyclicer in ACYCLICERS {
        let mut g = new_graph();
        g.set_path(&["a", "b", "c", "d", "a"]);
        acyclic::run(&mut g, acyclicer);
        assert!(alg::find_cycles(&g).is_empty(), "{acyclicer:?}");
    }
}

#[test]
fn run_creates_a_multi_edge_when_needed() {
    for acyclicer in ACYCLICERS {
        let mut g = new_graph();
        g.set_path(&["a", "b", "a"]);
        acyclic::run(&mut g, acyclicer);
        assert!(alg::find_cycles(&g).is_empty());
        let key = if g.has_edge("a", "b", None) {
            ("b", "a")
        } else {
            ("a", "b")
        };
        assert_eq!(g.out_edges(key.0, Some(key.1)).len(), 0);
        assert_eq!(g.edge_count(), 2);
    }
}

#[test]
fn greedy_prefers_reversing_the_lighter_edge() {
    let mut g = new_graph();
    g.set_edge_with_label("a", "b", EdgeLabel::weighted(2.0));
    g.set_edge_with_label("b", "a", EdgeLabel::weighted(1.0));
    acyclic::run(&mut g, Acyclicer::Greedy);

    let reversed: Vec<_> = g
        .edge_labels()
        .filter(|(_, label)| label.reversed)
        .map(|(key, label)| (key.v.clone(), key.w.clone(), label.weight))
        .collect();
    assert_eq!(reversed, vec![("a".to_string(), "b".to_string(), 1.0)]);
}

#[test]
fn greedy_weighs_fractional_and_huge_edges() {
    for (forward, back, reversed_weight) in [(0.3, 0.2, 0.2), (0.2, 0.3, 0.2), (1e12, 1.0, 1.0)] {
        let mut g = new_graph();
        g.set_edge_with_label("a", "b", EdgeLabel::weighted(forward));
        g.set_edge_with_label("b", "a", EdgeLabel::weighted(back));
        acyclic::run(&mut g, Acyclicer::Greedy);

        assert!(alg::is_acyclic(&g));
        let reversed: Vec<f64> = g
            .edge_labels()
            .filter(|(_, label)| label.reversed)
            .map(|(_, label)| label.weight)
            .collect();
        assert_eq!(reversed, vec![reversed_weight]);
    }
}

#[test]
fn undo_restores_the_original_edges() {
    for acyclicer in ACYCLICERS {
        let mut g = new_graph();
        g.set_edge_with_label("a", "b", EdgeLabel::with_minlen(2));
        g.set_edge_with_label("b", "a", EdgeLabel::with_minlen(3));
        acyclic::run(&mut g, acyclicer);
        acyclic::undo(&mut g);

        assert_eq!(g.edge("a", "b", None).unwrap().minlen, 2);
        assert_eq!(g.edge("b", "a", None).unwrap().minlen, 3);
        assert!(g.edge_labels().all(|(_, label)| !label.reversed));
        assert_eq!(g.edge_count(), 2);
    }
}

#[test]
fn undo_restores_edge_names() {
    let mut g = new_graph();
    g.set_named_edge("a", "b", Some("foo"), EdgeLabel::default());
    g.set_named_edge("b", "a", Some("bar"), EdgeLabel::default());
    acyclic::run(&mut g, Acyclicer::Dfs);
    acyclic::undo(&mut g);

    assert!(g.has_edge("a", "b", Some("foo")));
    assert!(g.has_edge("b", "a", Some("bar")));
    assert_eq!(g.edge_count(), 2);
}

#[test]
fn self_loops_are_never_reversed() {
    for acyclicer in ACYCLICERS {
        let mut g = new_graph();
        g.set_edge("a", "a");
        g.set_path(&["a", "b", "a"]);
        acyclic::run(&mut g, acyclicer);
        assert!(g.has_edge("a", "a", None));
        assert!(!g.edge("a", "a", None).unwrap().reversed);
    }
}

#[test]
fn dfs_fas_returns_back_edges_in_visit_order() {
    let mut g = new_graph();
    g.set_path(&["a", "b", "c", "a"]);
    let fas = acyclic::dfs_fas(&g);
    assert_eq!(fas.len(), 1);
    assert_eq!((fas[0].v.as_str(), fas[0].w.as_str()), ("c", "a"));
}

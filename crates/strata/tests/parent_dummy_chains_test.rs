use strata::parent_dummy_chains;
use strata::{
    DummyChain, EdgeKey, EdgeLabel, Graph, GraphLabel, GraphOptions, LayoutContext, NodeLabel,
};

type LayoutGraph = Graph<NodeLabel, EdgeLabel, GraphLabel>;

fn new_graph() -> LayoutGraph {
    let mut g: LayoutGraph = Graph::new(GraphOptions {
        compound: true,
        multigraph: false,
    });
    g.set_graph(GraphLabel::default());
    g
}

fn span(g: &mut LayoutGraph, sg: &str, min: i32, max: i32) {
    let label = g.node_mut(sg).unwrap();
    label.min_rank = Some(min);
    label.max_rank = Some(max);
}

/// Builds the chain `a -> d1 -> ... -> b` with the dummies at `ranks` and runs the phase.
fn run_chain(g: &mut LayoutGraph, ranks: &[i32]) {
    let dummies: Vec<String> = (1..=ranks.len()).map(|i| format!("d{i}")).collect();
    for (v, &rank) in dummies.iter().zip(ranks) {
        g.set_node(
            v.clone(),
            NodeLabel {
                edge_obj: Some(EdgeKey::new("a", "b")),
                ..NodeLabel::with_rank(rank)
            },
        );
    }
    let mut path: Vec<&str> = vec!["a"];
    path.extend(dummies.iter().map(String::as_str));
    path.push("b");
    g.set_path(&path);

    let mut ctx = LayoutContext::default();
    ctx.dummy_chains.push(DummyChain {
        head: "d1".to_string(),
        edge: EdgeKey::new("a", "b"),
        label: EdgeLabel::default(),
    });
    parent_dummy_chains::run(g, &ctx);
}

#[test]
fn no_parent_when_neither_end_has_one() {
    let mut g = new_graph();
    run_chain(&mut g, &[1]);
    assert_eq!(g.parent("d1"), None);
}

#[test]
fn first_dummy_uses_the_tail_subgraph() {
    let mut g = new_graph();
    g.set_parent("a", "sg1");
    span(&mut g, "sg1", 0, 2);
    run_chain(&mut g, &[2]);
    assert_eq!(g.parent("d1"), Some("sg1"));
}

#[test]
fn first_dummy_uses_the_head_subgraph_when_the_tail_is_top_level() {
    let mut g = new_graph();
    g.set_parent("b", "sg1");
    span(&mut g, "sg1", 1, 3);
    run_chain(&mut g, &[1]);
    assert_eq!(g.parent("d1"), Some("sg1"));
}

#[test]
fn long_chain_leaving_a_subgraph() {
    let mut g = new_graph();
    g.set_parent("a", "sg1");
    span(&mut g, "sg1", 0, 2);
    run_chain(&mut g, &[2, 3, 4]);
    assert_eq!(g.parent("d1"), Some("sg1"));
    assert_eq!(g.parent("d2"), None);
    assert_eq!(g.parent("d3"), None);
}

#[test]
fn long_chain_entering_a_subgraph() {
    let mut g = new_graph();
    g.set_parent("b", "sg1");
    span(&mut g, "sg1", 3, 5);
    run_chain(&mut g, &[1, 2, 3]);
    assert_eq!(g.parent("d1"), None);
    assert_eq!(g.parent("d2"), None);
    assert_eq!(g.parent("d3"), Some("sg1"));
}

#[test]
fn chain_through_nested_subgraphs() {
    let mut g = new_graph();
    g.set_parent("a", "sg2");
    g.set_parent("sg2", "sg1");
    g.set_parent("b", "sg4");
    g.set_parent("sg4", "sg3");
    span(&mut g, "sg1", 0, 4);
    span(&mut g, "sg2", 1, 3);
    span(&mut g, "sg3", 6, 10);
    span(&mut g, "sg4", 7, 9);
    run_chain(&mut g, &[3, 4, 5, 6, 7]);

    assert_eq!(g.parent("d1"), Some("sg2"));
    assert_eq!(g.parent("d2"), Some("sg1"));
    assert_eq!(g.parent("d3"), None);
    assert_eq!(g.parent("d4"), Some("sg3"));
    assert_eq!(g.parent("d5"), Some("sg4"));
}

#[test]
fn overlapping_rank_ranges() {
    let mut g = new_graph();
    g.set_parent("a", "sg1");
    g.set_parent("b", "sg2");
    span(&mut g, "sg1", 0, 3);
    span(&mut g, "sg2", 2, 6);
    run_chain(&mut g, &[2, 3, 4]);

    assert_eq!(g.parent("d1"), Some("sg1"));
    assert_eq!(g.parent("d2"), Some("sg1"));
    assert_eq!(g.parent("d3"), Some("sg2"));
}

#[test]
fn common_ancestor_below_the_root_descending() {
    let mut g = new_graph();
    g.set_parent("a", "sg1");
    g.set_parent("sg2", "sg1");
    g.set_parent("b", "sg2");
    span(&mut g, "sg1", 0, 6);
    span(&mut g, "sg2", 3, 5);
    run_chain(&mut g, &[2, 3]);

    assert_eq!(g.parent("d1"), Some("sg1"));
    assert_eq!(g.parent("d2"), Some("sg2"));
}

#[test]
fn common_ancestor_below_the_root_ascending() {
    let mut g = new_graph();
    g.set_parent("a", "sg2");
    g.set_parent("sg2", "sg1");
    g.set_parent("b", "sg1");
    span(&mut g, "sg1", 0, 6);
    span(&mut g, "sg2", 0, 3);
    run_chain(&mut g, &[3, 4, 5]);

    assert_eq!(g.parent("d1"), Some("sg2"));
    assert_eq!(g.parent("d2"), Some("sg1"));
    assert_eq!(g.parent("d3"), Some("sg1"));
}

//! The layout pipeline.

mod edge_labels;
mod finish;
mod graph_io;

use crate::context::LayoutContext;
use crate::error::Result;
use crate::label::{EdgeLabel, GraphLabel, NodeLabel};
use crate::observe::{Phase, PhaseObserver, PhaseStats, TracingObserver};
use crate::order::OrderOptions;
use crate::position::Spacing;
use crate::util::LayoutGraph;
use crate::{
    acyclic, border_segments, coordinate_system, nesting, normalize, order, parent_dummy_chains,
    position, rank, self_edges, util,
};
use std::time::Instant;
use strata_graph::Graph;

/// Lays out `g` in place, reporting phases as `tracing` debug events.
///
/// Reads the options from `g.graph()` and writes back node `x`/`y`, subgraph sizes, edge
/// `points` (clipped to the endpoint boxes), edge label `x`/`y`, and the drawing's
/// `width`/`height`. Nothing else on the caller's labels is touched.
pub fn layout(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) -> Result<()> {
    layout_with(g, &mut TracingObserver)
}

/// [`layout`] with a caller-supplied observer.
pub fn layout_with(
    g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>,
    observer: &mut dyn PhaseObserver,
) -> Result<()> {
    let mut working = graph_io::build_layout_graph(g);
    run(&mut working, observer)?;
    graph_io::update_input_graph(g, &working);
    Ok(())
}

struct Phases<'a> {
    observer: &'a mut dyn PhaseObserver,
}

impl Phases<'_> {
    fn run<T>(
        &mut self,
        g: &mut LayoutGraph<GraphLabel>,
        phase: Phase,
        f: impl FnOnce(&mut LayoutGraph<GraphLabel>) -> T,
    ) -> T {
        let start = Instant::now();
        let out = f(g);
        let stats = PhaseStats {
            nodes: g.node_count(),
            edges: g.edge_count(),
        };
        self.observer.on_phase(phase, start.elapsed(), stats);
        out
    }
}

fn run(g: &mut LayoutGraph<GraphLabel>, observer: &mut dyn PhaseObserver) -> Result<()> {
    let options = g.graph().clone();
    let mut ctx = LayoutContext::new(&options);
    let mut p = Phases { observer };

    p.run(g, Phase::MakeSpaceForEdgeLabels, edge_labels::make_space);
    p.run(g, Phase::RemoveSelfEdges, |g| self_edges::remove(g));
    p.run(g, Phase::Acyclic, |g| acyclic::run(g, options.acyclicer));
    p.run(g, Phase::NestingRun, |g| nesting::run(g, &mut ctx));
    p.run(g, Phase::Rank, |g| {
        rank::rank(g, ctx.ranker);
        finish::check_ranks(g)
    })?;
    p.run(g, Phase::InjectEdgeLabelProxies, edge_labels::inject_proxies);
    p.run(g, Phase::RemoveEmptyRanks, |g| {
        util::remove_empty_ranks(g, ctx.node_rank_factor)
    });
    p.run(g, Phase::NestingCleanup, |g| nesting::cleanup(g, &mut ctx));
    p.run(g, Phase::NormalizeRanks, |g| util::normalize_ranks(g));
    p.run(g, Phase::AssignRankMinMax, finish::assign_rank_min_max)?;
    p.run(g, Phase::RemoveEdgeLabelProxies, edge_labels::remove_proxies);
    p.run(g, Phase::Normalize, |g| normalize::run(g, &mut ctx));
    p.run(g, Phase::ParentDummyChains, |g| parent_dummy_chains::run(g, &ctx));
    p.run(g, Phase::AddBorderSegments, |g| border_segments::add(g));
    p.run(g, Phase::Order, |g| {
        order::order(g, OrderOptions {
            patience: options.order_patience,
        })
    });
    p.run(g, Phase::InsertSelfEdges, |g| self_edges::insert(g));
    p.run(g, Phase::CoordinateSystemAdjust, |g| {
        coordinate_system::adjust(g, options.rankdir)
    });
    p.run(g, Phase::Position, |g| {
        let spacing = Spacing {
            nodesep: g.graph().nodesep,
            edgesep: g.graph().edgesep,
            ranksep: g.graph().ranksep,
        };
        position::position(g, spacing)
    });
    p.run(g, Phase::PositionSelfEdges, |g| self_edges::position(g));
    p.run(g, Phase::RemoveBorderNodes, |g| {
        border_segments::remove_border_nodes(g)
    });
    p.run(g, Phase::NormalizeUndo, |g| normalize::undo(g, &mut ctx));
    p.run(g, Phase::FixupEdgeLabelCoords, edge_labels::fixup_coords);
    p.run(g, Phase::CoordinateSystemUndo, |g| {
        coordinate_system::undo(g, options.rankdir)
    });
    p.run(g, Phase::TranslateGraph, finish::translate);
    p.run(g, Phase::AssignNodeIntersects, finish::assign_node_intersects)?;
    p.run(g, Phase::ReversePoints, finish::reverse_points_for_reversed_edges);
    p.run(g, Phase::AcyclicUndo, acyclic::undo);
    Ok(())
}

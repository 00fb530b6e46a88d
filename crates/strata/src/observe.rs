//! Phase instrumentation.
//!
//! The layout pipeline reports every phase it completes to a [`PhaseObserver`]. Callers that want
//! timings or progress plug in their own observer; the default one emits `tracing` events.

use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    MakeSpaceForEdgeLabels,
    RemoveSelfEdges,
    Acyclic,
    NestingRun,
    Rank,
    InjectEdgeLabelProxies,
    RemoveEmptyRanks,
    NestingCleanup,
    NormalizeRanks,
    AssignRankMinMax,
    RemoveEdgeLabelProxies,
    Normalize,
    ParentDummyChains,
    AddBorderSegments,
    Order,
    InsertSelfEdges,
    CoordinateSystemAdjust,
    Position,
    PositionSelfEdges,
    RemoveBorderNodes,
    NormalizeUndo,
    FixupEdgeLabelCoords,
    CoordinateSystemUndo,
    TranslateGraph,
    AssignNodeIntersects,
    ReversePoints,
    AcyclicUndo,
}

impl Phase {
    pub fn name(self) -> &'static str {
        match self {
            Phase::MakeSpaceForEdgeLabels => "make_space_for_edge_labels",
            Phase::RemoveSelfEdges => "remove_self_edges",
            Phase::Acyclic => "acyclic",
            Phase::NestingRun => "nesting_run",
            Phase::Rank => "rank",
            Phase::InjectEdgeLabelProxies => "inject_edge_label_proxies",
            Phase::RemoveEmptyRanks => "remove_empty_ranks",
            Phase::NestingCleanup => "nesting_cleanup",
            Phase::NormalizeRanks => "normalize_ranks",
            Phase::AssignRankMinMax => "assign_rank_min_max",
            Phase::RemoveEdgeLabelProxies => "remove_edge_label_proxies",
            Phase::Normalize => "normalize",
            Phase::ParentDummyChains => "parent_dummy_chains",
            Phase::AddBorderSegments => "add_border_segments",
            Phase::Order => "order",
            Phase::InsertSelfEdges => "insert_self_edges",
            Phase::CoordinateSystemAdjust => "coordinate_system_adjust",
            Phase::Position => "position",
            Phase::PositionSelfEdges => "position_self_edges",
            Phase::RemoveBorderNodes => "remove_border_nodes",
            Phase::NormalizeUndo => "normalize_undo",
            Phase::FixupEdgeLabelCoords => "fixup_edge_label_coords",
            Phase::CoordinateSystemUndo => "coordinate_system_undo",
            Phase::TranslateGraph => "translate_graph",
            Phase::AssignNodeIntersects => "assign_node_intersects",
            Phase::ReversePoints => "reverse_points",
            Phase::AcyclicUndo => "acyclic_undo",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Graph size after a phase finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhaseStats {
    pub nodes: usize,
    pub edges: usize,
}

pub trait PhaseObserver {
    fn on_phase(&mut self, phase: Phase, elapsed: Duration, stats: PhaseStats);
}

/// Emits one `tracing::debug!` event per phase.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl PhaseObserver for TracingObserver {
    fn on_phase(&mut self, phase: Phase, elapsed: Duration, stats: PhaseStats) {
        tracing::debug!(
            phase = phase.name(),
            elapsed_us = elapsed.as_micros() as u64,
            nodes = stats.nodes,
            edges = stats.edges,
            "layout phase finished"
        );
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PhaseObserver for NoopObserver {
    fn on_phase(&mut self, _phase: Phase, _elapsed: Duration, _stats: PhaseStats) {}
}

impl<F> PhaseObserver for F
where
    F: FnMut(Phase, Duration, PhaseStats),
{
    fn on_phase(&mut self, phase: Phase, elapsed: Duration, stats: PhaseStats) {
        self(phase, elapsed, stats)
    }
}

use crate::label::{EdgeLabel, GraphLabel, Ranker};
use strata_graph::EdgeKey;

/// One long edge replaced by a chain of dummy nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct DummyChain {
    /// First dummy node of the chain.
    pub head: String,
    /// The removed edge.
    pub edge: EdgeKey,
    /// Label of the removed edge, restored when the chain is collapsed.
    pub label: EdgeLabel,
}

/// Mutable state shared between layout phases for a single run.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutContext {
    pub ranker: Ranker,
    pub nesting_root: Option<String>,
    pub node_rank_factor: usize,
    pub dummy_chains: Vec<DummyChain>,
}

impl Default for LayoutContext {
    fn default() -> Self {
        Self {
            ranker: Ranker::default(),
            nesting_root: None,
            node_rank_factor: 1,
            dummy_chains: Vec::new(),
        }
    }
}

impl LayoutContext {
    pub fn new(options: &GraphLabel) -> Self {
        Self {
            ranker: options.ranker,
            node_rank_factor: options.node_rank_factor.unwrap_or(1).max(1),
            ..Default::default()
        }
    }
}

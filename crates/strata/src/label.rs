//! Node, edge and graph labels consumed and produced by the layout phases.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use strata_graph::EdgeKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RankDir {
    #[default]
    TB,
    BT,
    LR,
    RL,
}

/// Rank assignment strategy.
///
/// Parsing never fails: any unrecognized name selects [`Ranker::NetworkSimplex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Ranker {
    #[default]
    NetworkSimplex,
    TightTree,
    LongestPath,
}

impl Ranker {
    pub fn as_str(self) -> &'static str {
        match self {
            Ranker::NetworkSimplex => "network-simplex",
            Ranker::TightTree => "tight-tree",
            Ranker::LongestPath => "longest-path",
        }
    }
}

impl FromStr for Ranker {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "tight-tree" => Ranker::TightTree,
            "longest-path" => Ranker::LongestPath,
            _ => Ranker::NetworkSimplex,
        })
    }
}

impl From<String> for Ranker {
    fn from(s: String) -> Self {
        let Ok(ranker) = s.parse::<Ranker>();
        ranker
    }
}

impl From<Ranker> for String {
    fn from(r: Ranker) -> Self {
        r.as_str().to_string()
    }
}

impl fmt::Display for Ranker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cycle breaking strategy used before ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Acyclicer {
    /// Weighted greedy feedback arc set.
    #[default]
    Greedy,
    /// Back edges of a depth-first traversal.
    Dfs,
}

/// Where an edge label sits relative to the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPos {
    L,
    #[default]
    C,
    R,
}

/// Kind of synthetic node inserted by a layout phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dummy {
    Border,
    Edge,
    EdgeLabel,
    EdgeProxy,
    NestingRoot,
    SelfEdge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BorderSide {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle given by its center.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Graph-level layout options and output size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphLabel {
    pub rankdir: RankDir,
    pub nodesep: f64,
    pub edgesep: f64,
    pub ranksep: f64,
    pub marginx: f64,
    pub marginy: f64,
    pub ranker: Ranker,
    pub acyclicer: Acyclicer,
    /// Ordering sweeps allowed without improvement before the ordering phase stops.
    pub order_patience: usize,
    /// Rank-spacing factor used when compacting empty ranks. Nesting expansion raises it to its
    /// node separation when that is larger.
    pub node_rank_factor: Option<usize>,

    pub width: f64,
    pub height: f64,
}

impl Default for GraphLabel {
    fn default() -> Self {
        Self {
            rankdir: RankDir::TB,
            nodesep: 50.0,
            edgesep: 20.0,
            ranksep: 50.0,
            marginx: 0.0,
            marginy: 0.0,
            ranker: Ranker::NetworkSimplex,
            acyclicer: Acyclicer::Greedy,
            order_patience: 4,
            node_rank_factor: None,
            width: 0.0,
            height: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeLabel {
    pub width: f64,
    pub height: f64,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub rank: Option<i32>,
    pub order: Option<usize>,
    pub dummy: Option<Dummy>,

    /// For edge dummies and proxies: the edge this node stands in for.
    #[serde(skip)]
    pub edge_obj: Option<EdgeKey>,
    pub label_pos: LabelPos,

    pub min_rank: Option<i32>,
    pub max_rank: Option<i32>,
    pub border_top: Option<String>,
    pub border_bottom: Option<String>,
    /// Left border node per rank, indexed by rank.
    pub border_left: Vec<Option<String>>,
    pub border_right: Vec<Option<String>>,
    pub border_type: Option<BorderSide>,

    #[serde(skip)]
    pub self_edges: Vec<SelfEdge>,
}

impl NodeLabel {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn with_rank(rank: i32) -> Self {
        Self {
            rank: Some(rank),
            ..Default::default()
        }
    }

    pub fn dummy(kind: Dummy) -> Self {
        Self {
            dummy: Some(kind),
            ..Default::default()
        }
    }

    pub fn is_dummy(&self) -> bool {
        self.dummy.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeLabel {
    pub width: f64,
    pub height: f64,
    pub minlen: usize,
    pub weight: f64,
    pub label_rank: Option<i32>,
    pub label_pos: LabelPos,
    pub label_offset: f64,

    pub nesting_edge: bool,
    pub reversed: bool,
    pub forward_name: Option<String>,

    /// Caller fields carried through the layout untouched.
    pub extras: BTreeMap<String, serde_json::Value>,

    pub x: Option<f64>,
    pub y: Option<f64>,
    pub points: Vec<Point>,
}

impl Default for EdgeLabel {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            minlen: 1,
            weight: 1.0,
            label_rank: None,
            label_pos: LabelPos::R,
            label_offset: 10.0,
            nesting_edge: false,
            reversed: false,
            forward_name: None,
            extras: BTreeMap::new(),
            x: None,
            y: None,
            points: Vec::new(),
        }
    }
}

impl EdgeLabel {
    pub fn weighted(weight: f64) -> Self {
        Self {
            weight,
            ..Default::default()
        }
    }

    pub fn with_minlen(minlen: usize) -> Self {
        Self {
            minlen,
            ..Default::default()
        }
    }

    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }
}

/// A self loop removed before ranking and re-attached after ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct SelfEdge {
    pub key: EdgeKey,
    pub label: EdgeLabel,
}

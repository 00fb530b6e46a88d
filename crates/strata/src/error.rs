#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("cannot intersect a rectangle from its own center ({x}, {y})")]
    PointInsideRect { x: f64, y: f64 },
    #[error("node {node} has no rank; ranking must run before this phase")]
    MissingRank { node: String },
}

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

/// Top-level error type for toolpath topology.
#[derive(Debug, Error)]
pub enum ToolpathError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to node references, cursors and lookups.
#[derive(Debug, Error, PartialEq)]
pub enum TopologyError {
    #[error("node reference is stale or belongs to another graph")]
    StaleNode,

    #[error("cursor is past the end of the traversal")]
    PastEnd,

    #[error("point ({x}, {y}) not found")]
    PointNotFound { x: f64, y: f64 },

    #[error("point ({x}, {y}) is not a boundary of the path")]
    NotABoundary { x: f64, y: f64 },

    #[error("seam cursors do not denote the same point")]
    SeamMismatch,

    #[error("node has no forward neighbor")]
    NoSuccessor,

    #[error("cursor runs in the wrong direction: {0}")]
    WrongDirection(&'static str),
}

impl TopologyError {
    pub(crate) fn point_not_found(p: &crate::math::Point2) -> Self {
        Self::PointNotFound { x: p.x, y: p.y }
    }

    pub(crate) fn not_a_boundary(p: &crate::math::Point2) -> Self {
        Self::NotABoundary { x: p.x, y: p.y }
    }
}

/// Errors related to storage limits.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("node storage exhausted (limit {limit})")]
    Exhausted { limit: usize },
}

/// Errors related to configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Convenience type alias for results using [`ToolpathError`].
pub type Result<T> = std::result::Result<T, ToolpathError>;

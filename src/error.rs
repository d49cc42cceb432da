use thiserror::Error;

/// Top-level error type for the sightline engine.
#[derive(Debug, Error)]
pub enum SightlineError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),
}

/// Coarse classification of a [`SightlineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed input (empty ring, non-finite coordinate).
    InvalidArgument,
    /// Zero-length edges, rings with fewer than 3 distinct vertices,
    /// coincident vertices across rings.
    DegenerateGeometry,
    /// Input that is well formed but topologically unusable: self-intersecting
    /// rings, obstacles outside the boundary, origins outside free space.
    UnsupportedTopology,
    /// Failure inside a backend (triangulation).
    Internal,
}

impl SightlineError {
    /// Returns the coarse kind of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Geometry(_) => ErrorKind::DegenerateGeometry,
            Self::Topology(_) => ErrorKind::UnsupportedTopology,
            Self::Operation(OperationError::InvalidArgument(_)) => ErrorKind::InvalidArgument,
            Self::Tessellation(_) => ErrorKind::Internal,
        }
    }
}

/// Errors related to geometric values.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length edge at ({x}, {y}, {z})")]
    ZeroLengthEdge { x: f64, y: f64, z: f64 },

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to the arrangement of rings in a graph.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("ring is self-intersecting: {0}")]
    SelfIntersecting(String),

    #[error("obstacle is not contained in the boundary: {0}")]
    NotContained(String),

    #[error("obstacles overlap: {0}")]
    Overlapping(String),

    #[error("geometry is not planar: {0}")]
    NonPlanar(String),

    #[error("origin does not lie in free space")]
    OriginOutsideFreeSpace,
}

/// Errors related to operation inputs.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Errors related to tessellation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("tessellation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`SightlineError`].
pub type Result<T> = std::result::Result<T, SightlineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_error_groups() {
        let e: SightlineError = GeometryError::ZeroVector.into();
        assert_eq!(e.kind(), ErrorKind::DegenerateGeometry);

        let e: SightlineError = TopologyError::OriginOutsideFreeSpace.into();
        assert_eq!(e.kind(), ErrorKind::UnsupportedTopology);

        let e: SightlineError = OperationError::InvalidArgument("empty".into()).into();
        assert_eq!(e.kind(), ErrorKind::InvalidArgument);

        let e: SightlineError = TessellationError::Failed("cdt".into()).into();
        assert_eq!(e.kind(), ErrorKind::Internal);
    }

    #[test]
    fn messages_are_transparent() {
        let e: SightlineError = GeometryError::ZeroLengthEdge {
            x: 1.0,
            y: 2.0,
            z: 0.0,
        }
        .into();
        assert_eq!(e.to_string(), "zero-length edge at (1, 2, 0)");
    }
}

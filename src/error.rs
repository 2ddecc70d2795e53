use thiserror::Error;

/// Top-level error type for the triangulation engine.
#[derive(Debug, Error)]
pub enum DelaunayError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Insertion(#[from] InsertionError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("non-finite coordinate ({x}, {y})")]
    NonFinite { x: f64, y: f64 },
}

/// Errors related to the mesh structure.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("invalid topology: {0}")]
    InvalidTopology(String),
}

/// Errors raised while registering or inserting vertices.
#[derive(Debug, Error)]
pub enum InsertionError {
    #[error("vertex ({x}, {y}) duplicates an existing vertex")]
    DuplicateVertex { x: f64, y: f64 },

    #[error("no triangle contains ({x}, {y})")]
    NotContained { x: f64, y: f64 },

    #[error("vertex ({x}, {y}) coincides with an existing triangle vertex")]
    CoincidentVertex { x: f64, y: f64 },

    #[error("circumcircle of triangle {triangle} contains vertex {vertex}")]
    Delaunay { triangle: String, vertex: String },
}

/// Convenience type alias for results using [`DelaunayError`].
pub type Result<T> = std::result::Result<T, DelaunayError>;

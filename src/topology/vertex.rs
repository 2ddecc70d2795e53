use std::fmt;

use crate::math::Point2;

/// Identifier of a vertex in the mesh store.
///
/// Caller-supplied points are numbered sequentially from zero. The three
/// synthetic super-triangle vertices live in a separate, reserved space and
/// never appear in finished results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VertexId {
    /// A vertex registered by the caller.
    Input(usize),
    /// One of the three super-triangle vertices (index 0, 1 or 2).
    Super(usize),
}

impl VertexId {
    /// Returns `true` for super-triangle vertices.
    #[must_use]
    pub fn is_super(self) -> bool {
        matches!(self, Self::Super(_))
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(i) => write!(f, "v{i}"),
            Self::Super(i) => write!(f, "s{i}"),
        }
    }
}

/// A vertex of the triangulation. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// The vertex identifier.
    pub id: VertexId,
    /// The 2D position of the vertex.
    pub position: Point2,
}

impl Vertex {
    /// Creates a new vertex at the given position.
    #[must_use]
    pub fn new(id: VertexId, position: Point2) -> Self {
        Self { id, position }
    }
}

use super::edge::EdgeId;
use super::vertex::VertexId;
use crate::math::{Circumcircle, Point2};

slotmap::new_key_type! {
    /// Unique identifier for a triangle in the mesh store.
    pub struct TriangleId;
}

/// A triangle of the mesh.
///
/// The circumcircle is computed once at construction. The Voronoi dual
/// vertex is filled on demand.
#[derive(Debug, Clone)]
pub struct Triangle {
    /// Identifier of this triangle.
    pub id: TriangleId,
    /// The three corners, derived from the edges.
    pub vertices: [VertexId; 3],
    /// The three bounding edges.
    pub edges: [EdgeId; 3],
    /// Center of the circumscribed circle.
    pub circumcenter: Point2,
    /// Radius of the circumscribed circle.
    pub circumradius: f64,
    /// Dual vertex of the Voronoi diagram, `None` until computed or if degenerate.
    pub voronoi_vertex: Option<Point2>,
}

impl Triangle {
    /// Returns `true` if `v` is a corner.
    #[must_use]
    pub fn has_vertex(&self, v: VertexId) -> bool {
        self.vertices.contains(&v)
    }

    /// Returns `true` if `e` bounds this triangle.
    #[must_use]
    pub fn has_edge(&self, e: EdgeId) -> bool {
        self.edges.contains(&e)
    }

    /// Returns `true` if any corner is a super-triangle vertex.
    #[must_use]
    pub fn touches_super(&self) -> bool {
        self.vertices.iter().any(|v| v.is_super())
    }

    /// Returns the corner that is neither `a` nor `b`.
    #[must_use]
    pub fn vertex_opposite(&self, a: VertexId, b: VertexId) -> Option<VertexId> {
        self.vertices.iter().copied().find(|&v| v != a && v != b)
    }

    /// The cached circumcircle.
    #[must_use]
    pub fn circumcircle(&self) -> Circumcircle {
        Circumcircle {
            center: self.circumcenter,
            radius: self.circumradius,
        }
    }
}

use super::triangle::TriangleId;
use super::vertex::VertexId;
use crate::error::TopologyError;

slotmap::new_key_type! {
    /// Unique identifier for an edge in the mesh store.
    pub struct EdgeId;
}

/// An undirected edge between two vertices.
///
/// An edge is owned by at most two triangles, one on each side. During
/// rewiring it may transiently have none.
#[derive(Debug, Clone)]
pub struct Edge {
    /// Identifier of this edge.
    pub id: EdgeId,
    /// The two endpoints.
    pub vertices: [VertexId; 2],
    /// The triangles on either side, if any.
    pub triangles: [Option<TriangleId>; 2],
}

impl Edge {
    pub(crate) fn new(id: EdgeId, a: VertexId, b: VertexId) -> Self {
        Self {
            id,
            vertices: [a, b],
            triangles: [None, None],
        }
    }

    /// Returns `true` if `v` is one of the endpoints.
    #[must_use]
    pub fn has_vertex(&self, v: VertexId) -> bool {
        self.vertices[0] == v || self.vertices[1] == v
    }

    /// Returns `true` if the edge joins `a` and `b`, in either direction.
    #[must_use]
    pub fn connects(&self, a: VertexId, b: VertexId) -> bool {
        (self.vertices[0] == a && self.vertices[1] == b)
            || (self.vertices[0] == b && self.vertices[1] == a)
    }

    /// Returns `true` if either endpoint is a super-triangle vertex.
    #[must_use]
    pub fn touches_super(&self) -> bool {
        self.vertices.iter().any(|v| v.is_super())
    }

    /// Number of attached triangles (0, 1 or 2).
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.iter().flatten().count()
    }

    /// Returns `true` if exactly one triangle is attached (a hull edge).
    #[must_use]
    pub fn is_boundary(&self) -> bool {
        self.triangle_count() == 1
    }

    /// Returns the attached triangle that is not `tri`.
    #[must_use]
    pub fn other_triangle(&self, tri: TriangleId) -> Option<TriangleId> {
        match self.triangles {
            [Some(a), b] if a == tri => b,
            [a, Some(b)] if b == tri => a,
            _ => None,
        }
    }

    /// Attaches `tri` to a free side. Attaching twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if both sides are already taken by other triangles.
    pub(crate) fn attach(&mut self, tri: TriangleId) -> Result<(), TopologyError> {
        if self.triangles.contains(&Some(tri)) {
            return Ok(());
        }
        let [a, b] = self.vertices;
        let slot = self
            .triangles
            .iter_mut()
            .find(|slot| slot.is_none())
            .ok_or_else(|| {
                TopologyError::InvalidTopology(format!("edge {a}-{b} already has two triangles"))
            })?;
        *slot = Some(tri);
        Ok(())
    }

    /// Detaches `tri` if it is attached.
    pub(crate) fn detach(&mut self, tri: TriangleId) {
        for slot in &mut self.triangles {
            if *slot == Some(tri) {
                *slot = None;
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn keys() -> (EdgeId, TriangleId, TriangleId, TriangleId) {
        let mut edges: SlotMap<EdgeId, ()> = SlotMap::with_key();
        let mut tris: SlotMap<TriangleId, ()> = SlotMap::with_key();
        (edges.insert(()), tris.insert(()), tris.insert(()), tris.insert(()))
    }

    #[test]
    fn attaches_at_most_two() {
        let (e, t0, t1, t2) = keys();
        let mut edge = Edge::new(e, VertexId::Input(0), VertexId::Input(1));
        edge.attach(t0).unwrap();
        edge.attach(t1).unwrap();
        assert!(matches!(
            edge.attach(t2),
            Err(TopologyError::InvalidTopology(_))
        ));
        assert_eq!(edge.triangle_count(), 2);
        assert_eq!(edge.other_triangle(t0), Some(t1));
        assert_eq!(edge.other_triangle(t1), Some(t0));
        assert_eq!(edge.other_triangle(t2), None);
    }

    #[test]
    fn reattaching_is_idempotent() {
        let (e, t0, _, _) = keys();
        let mut edge = Edge::new(e, VertexId::Input(0), VertexId::Input(1));
        edge.attach(t0).unwrap();
        edge.attach(t0).unwrap();
        assert_eq!(edge.triangle_count(), 1);
        assert!(edge.is_boundary());
    }

    #[test]
    fn detach_frees_a_side() {
        let (e, t0, t1, t2) = keys();
        let mut edge = Edge::new(e, VertexId::Input(0), VertexId::Input(1));
        edge.attach(t0).unwrap();
        edge.attach(t1).unwrap();
        edge.detach(t0);
        assert_eq!(edge.other_triangle(t1), None);
        edge.attach(t2).unwrap();
        assert_eq!(edge.other_triangle(t2), Some(t1));
    }

    #[test]
    fn endpoints() {
        let (e, _, _, _) = keys();
        let edge = Edge::new(e, VertexId::Input(3), VertexId::Super(1));
        assert!(edge.has_vertex(VertexId::Super(1)));
        assert!(edge.connects(VertexId::Super(1), VertexId::Input(3)));
        assert!(!edge.connects(VertexId::Input(3), VertexId::Input(1)));
        assert!(edge.touches_super());
    }
}

pub mod edge;
pub mod triangle;
pub mod vertex;

pub use edge::{Edge, EdgeId};
pub use triangle::{Triangle, TriangleId};
pub use vertex::{Vertex, VertexId};

use crate::error::{GeometryError, Result, TopologyError};
use crate::math::{Circumcircle, Point2};
use slotmap::SlotMap;

/// Central arena that owns all mesh entities.
///
/// Entities reference each other via typed IDs (generational indices for
/// edges and triangles), avoiding self-referential structures and enabling
/// safe mutation. Removing a triangle detaches it from its edges; edges never
/// remove their triangles.
#[derive(Debug, Default)]
pub struct MeshStore {
    vertices: Vec<Vertex>,
    super_vertices: Option<[Vertex; 3]>,
    edges: SlotMap<EdgeId, Edge>,
    triangles: SlotMap<TriangleId, Triangle>,
}

impl MeshStore {
    /// Creates a new, empty mesh store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes every vertex, edge and triangle.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.clear_results();
    }

    /// Removes edges, triangles and super vertices, keeping input vertices.
    pub fn clear_results(&mut self) {
        self.edges.clear();
        self.triangles.clear();
        self.super_vertices = None;
    }

    // --- Vertex operations ---

    /// Appends an input vertex and returns its ID.
    pub fn push_vertex(&mut self, position: Point2) -> VertexId {
        let id = VertexId::Input(self.vertices.len());
        self.vertices.push(Vertex::new(id, position));
        id
    }

    /// The input vertices, in registration order.
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Installs the three super-triangle vertices and returns their IDs.
    pub fn set_super_vertices(&mut self, positions: [Point2; 3]) -> [VertexId; 3] {
        let ids = [VertexId::Super(0), VertexId::Super(1), VertexId::Super(2)];
        self.super_vertices = Some([
            Vertex::new(ids[0], positions[0]),
            Vertex::new(ids[1], positions[1]),
            Vertex::new(ids[2], positions[2]),
        ]);
        ids
    }

    /// Forgets the super-triangle vertices.
    pub fn clear_super_vertices(&mut self) {
        self.super_vertices = None;
    }

    /// The super-triangle vertices, if installed.
    #[must_use]
    pub fn super_vertices(&self) -> Option<&[Vertex; 3]> {
        self.super_vertices.as_ref()
    }

    /// Returns a reference to the vertex, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn vertex(&self, id: VertexId) -> std::result::Result<&Vertex, TopologyError> {
        let found = match id {
            VertexId::Input(i) => self.vertices.get(i),
            VertexId::Super(i) => self.super_vertices.as_ref().and_then(|s| s.get(i)),
        };
        found.ok_or_else(|| TopologyError::EntityNotFound(format!("vertex {id}")))
    }

    /// Returns the position of a vertex, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn position(&self, id: VertexId) -> std::result::Result<Point2, TopologyError> {
        self.vertex(id).map(|v| v.position)
    }

    // --- Edge operations ---

    /// Inserts an unattached edge between `a` and `b` and returns its ID.
    pub fn add_edge(&mut self, a: VertexId, b: VertexId) -> EdgeId {
        self.edges.insert_with_key(|id| Edge::new(id, a, b))
    }

    /// Returns a reference to the edge, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn edge(&self, id: EdgeId) -> std::result::Result<&Edge, TopologyError> {
        self.edges
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("edge".into()))
    }

    /// Returns a mutable reference to the edge, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn edge_mut(&mut self, id: EdgeId) -> std::result::Result<&mut Edge, TopologyError> {
        self.edges
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("edge".into()))
    }

    /// Removes an edge. Triangles still referencing it are left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn remove_edge(&mut self, id: EdgeId) -> std::result::Result<Edge, TopologyError> {
        self.edges
            .remove(id)
            .ok_or_else(|| TopologyError::EntityNotFound("edge".into()))
    }

    /// Iterates over all edges.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    // --- Triangle operations ---

    /// Builds a triangle from three edges forming a closed loop, computes its
    /// circumcircle and attaches it to each edge.
    ///
    /// # Errors
    ///
    /// Returns an error if an edge is missing or already shared by two
    /// triangles, if the edges do not form a triangle, or if the corners are
    /// collinear.
    pub fn add_triangle(&mut self, edges: [EdgeId; 3]) -> Result<TriangleId> {
        let vertices = self.loop_vertices(edges)?;
        for &e in &edges {
            let edge = self.edge(e)?;
            if edge.triangle_count() == 2 {
                return Err(TopologyError::InvalidTopology(format!(
                    "edge {}-{} already has two triangles",
                    edge.vertices[0], edge.vertices[1]
                ))
                .into());
            }
        }

        let [a, b, c] = vertices.map(|v| self.position(v));
        let circle = Circumcircle::from_points(&a?, &b?, &c?).ok_or_else(|| {
            GeometryError::Degenerate(format!(
                "triangle {} {} {} has no circumcircle",
                vertices[0], vertices[1], vertices[2]
            ))
        })?;

        let id = self.triangles.insert_with_key(|id| Triangle {
            id,
            vertices,
            edges,
            circumcenter: circle.center,
            circumradius: circle.radius,
            voronoi_vertex: None,
        });
        for e in edges {
            self.edge_mut(e)?.attach(id)?;
        }
        Ok(id)
    }

    /// Derives the three corners of an edge loop.
    fn loop_vertices(&self, edges: [EdgeId; 3]) -> Result<[VertexId; 3]> {
        let [a, b] = self.edge(edges[0])?.vertices;
        let e1 = self.edge(edges[1])?;
        let e2 = self.edge(edges[2])?;
        let closes = |c: VertexId| {
            (e1.connects(a, c) && e2.connects(b, c)) || (e1.connects(b, c) && e2.connects(a, c))
        };
        match e1.vertices.iter().copied().find(|&v| v != a && v != b) {
            Some(c) if a != b && closes(c) => Ok([a, b, c]),
            _ => Err(TopologyError::InvalidTopology("edges do not form a triangle".into()).into()),
        }
    }

    /// Returns a reference to the triangle, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn triangle(&self, id: TriangleId) -> std::result::Result<&Triangle, TopologyError> {
        self.triangles
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("triangle".into()))
    }

    /// Returns a mutable reference to the triangle, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn triangle_mut(
        &mut self,
        id: TriangleId,
    ) -> std::result::Result<&mut Triangle, TopologyError> {
        self.triangles
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("triangle".into()))
    }

    /// Removes a triangle and detaches it from its edges.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn remove_triangle(&mut self, id: TriangleId) -> std::result::Result<Triangle, TopologyError> {
        let tri = self
            .triangles
            .remove(id)
            .ok_or_else(|| TopologyError::EntityNotFound("triangle".into()))?;
        for e in tri.edges {
            if let Some(edge) = self.edges.get_mut(e) {
                edge.detach(id);
            }
        }
        Ok(tri)
    }

    /// Iterates over all triangles.
    pub fn triangles(&self) -> impl Iterator<Item = &Triangle> {
        self.triangles.values()
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Corner positions of a triangle, in vertex order.
    ///
    /// # Errors
    ///
    /// Returns an error if the triangle or one of its vertices is not found.
    pub fn triangle_positions(
        &self,
        id: TriangleId,
    ) -> std::result::Result<[Point2; 3], TopologyError> {
        let [a, b, c] = self.triangle(id)?.vertices;
        Ok([self.position(a)?, self.position(b)?, self.position(c)?])
    }

    /// Returns the edge of triangle `tri` joining `a` and `b`.
    ///
    /// # Errors
    ///
    /// Returns an error if the triangle is missing or has no such edge.
    pub fn edge_between(
        &self,
        tri: TriangleId,
        a: VertexId,
        b: VertexId,
    ) -> std::result::Result<EdgeId, TopologyError> {
        let t = self.triangle(tri)?;
        t.edges
            .iter()
            .copied()
            .find(|&e| self.edges.get(e).is_some_and(|edge| edge.connects(a, b)))
            .ok_or_else(|| TopologyError::InvalidTopology(format!("no edge {a}-{b} in triangle")))
    }

    /// Returns the triangle across `edge` from `tri`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge is not found.
    pub fn neighbor(
        &self,
        tri: TriangleId,
        edge: EdgeId,
    ) -> std::result::Result<Option<TriangleId>, TopologyError> {
        Ok(self.edge(edge)?.other_triangle(tri))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::DelaunayError;

    fn store_with_square() -> (MeshStore, [VertexId; 4]) {
        let mut store = MeshStore::new();
        let ids = [
            store.push_vertex(Point2::new(0.0, 0.0)),
            store.push_vertex(Point2::new(10.0, 0.0)),
            store.push_vertex(Point2::new(10.0, 10.0)),
            store.push_vertex(Point2::new(0.0, 10.0)),
        ];
        (store, ids)
    }

    #[test]
    fn vertices_are_numbered_sequentially() {
        let (store, ids) = store_with_square();
        assert_eq!(ids[0], VertexId::Input(0));
        assert_eq!(ids[3], VertexId::Input(3));
        assert_eq!(store.vertices().len(), 4);
        assert!(store.vertex(VertexId::Input(4)).is_err());
    }

    #[test]
    fn super_vertices_are_separate() {
        let (mut store, _) = store_with_square();
        assert!(store.vertex(VertexId::Super(0)).is_err());
        let ids = store.set_super_vertices([
            Point2::new(-1e4, -1e4),
            Point2::new(1e4, -1e4),
            Point2::new(0.0, 1e4),
        ]);
        assert!(ids.iter().all(|id| id.is_super()));
        assert_eq!(store.vertices().len(), 4);
        assert!((store.position(ids[2]).unwrap().y - 1e4).abs() < 1e-9);
        store.clear_results();
        assert!(store.super_vertices().is_none());
        assert_eq!(store.vertices().len(), 4);
    }

    #[test]
    fn triangle_attaches_to_edges() {
        let (mut store, [a, b, c, _]) = store_with_square();
        let e0 = store.add_edge(a, b);
        let e1 = store.add_edge(b, c);
        let e2 = store.add_edge(c, a);
        let t = store.add_triangle([e0, e1, e2]).unwrap();

        let tri = store.triangle(t).unwrap();
        assert_eq!(tri.vertices, [a, b, c]);
        assert!((tri.circumcenter - Point2::new(5.0, 5.0)).norm() < 1e-9);
        for e in [e0, e1, e2] {
            assert!(store.edge(e).unwrap().is_boundary());
        }
        assert_eq!(store.edge_between(t, c, b).unwrap(), e1);
    }

    #[test]
    fn removing_triangle_detaches_edges() {
        let (mut store, [a, b, c, _]) = store_with_square();
        let e0 = store.add_edge(a, b);
        let e1 = store.add_edge(b, c);
        let e2 = store.add_edge(c, a);
        let t = store.add_triangle([e0, e1, e2]).unwrap();
        store.remove_triangle(t).unwrap();
        assert_eq!(store.triangle_count(), 0);
        assert!(store.edges().all(|e| e.triangle_count() == 0));
        assert!(store.remove_triangle(t).is_err());
    }

    #[test]
    fn shared_edge_links_neighbors() {
        let (mut store, [a, b, c, d]) = store_with_square();
        let ab = store.add_edge(a, b);
        let bc = store.add_edge(b, c);
        let ca = store.add_edge(c, a);
        let cd = store.add_edge(c, d);
        let da = store.add_edge(d, a);
        let t0 = store.add_triangle([ab, bc, ca]).unwrap();
        let t1 = store.add_triangle([ca, cd, da]).unwrap();
        assert_eq!(store.neighbor(t0, ca).unwrap(), Some(t1));
        assert_eq!(store.neighbor(t1, ca).unwrap(), Some(t0));
        assert_eq!(store.neighbor(t0, ab).unwrap(), None);
        assert_eq!(store.triangle(t1).unwrap().vertex_opposite(c, a), Some(d));
    }

    #[test]
    fn third_triangle_on_edge_is_rejected() {
        let (mut store, [a, b, c, d]) = store_with_square();
        let e = store.push_vertex(Point2::new(5.0, -5.0));
        let ab = store.add_edge(a, b);
        let t_edges = |store: &mut MeshStore, apex: VertexId| {
            [ab, store.add_edge(b, apex), store.add_edge(apex, a)]
        };
        let first = t_edges(&mut store, c);
        store.add_triangle(first).unwrap();
        let second = t_edges(&mut store, e);
        store.add_triangle(second).unwrap();
        let third = t_edges(&mut store, d);
        let err = store.add_triangle(third).unwrap_err();
        assert!(matches!(err, DelaunayError::Topology(TopologyError::InvalidTopology(_))));
    }

    #[test]
    fn collinear_triangle_is_degenerate() {
        let mut store = MeshStore::new();
        let a = store.push_vertex(Point2::new(0.0, 0.0));
        let b = store.push_vertex(Point2::new(5.0, 0.0));
        let c = store.push_vertex(Point2::new(10.0, 0.0));
        let edges = [store.add_edge(a, b), store.add_edge(b, c), store.add_edge(c, a)];
        let err = store.add_triangle(edges).unwrap_err();
        assert!(matches!(err, DelaunayError::Geometry(GeometryError::Degenerate(_))));
        assert_eq!(store.triangle_count(), 0);
    }

    #[test]
    fn open_loop_is_rejected() {
        let (mut store, [a, b, c, d]) = store_with_square();
        let edges = [store.add_edge(a, b), store.add_edge(b, c), store.add_edge(c, d)];
        assert!(store.add_triangle(edges).is_err());
    }
}

use crate::math::intersect_2d::bisector_intersect_2d;
use crate::math::{Point2, Vector2, TOLERANCE};
use crate::topology::{Edge, EdgeId, MeshStore, TriangleId};

/// An edge of the Voronoi diagram, dual to a triangulation edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VoronoiEdge {
    /// Dual of an interior edge: joins the Voronoi vertices of its two triangles.
    Segment {
        /// The triangulation edge this segment is dual to.
        edge: EdgeId,
        /// Voronoi vertex of the first triangle.
        from: Point2,
        /// Voronoi vertex of the second triangle.
        to: Point2,
    },
    /// Dual of a hull edge: leaves the Voronoi vertex of its only triangle
    /// and runs outward, perpendicular to the edge.
    Ray {
        /// The triangulation edge this ray is dual to.
        edge: EdgeId,
        /// Voronoi vertex of the hull triangle.
        origin: Point2,
        /// Unit direction, pointing away from the triangle.
        direction: Vector2,
    },
}

/// Point equidistant from the three corners, via perpendicular bisectors.
///
/// Tries the bisectors of the first two edges, then falls back to the
/// remaining pair.
#[must_use]
pub fn dual_vertex(corners: &[Point2; 3]) -> Option<Point2> {
    let [a, b, c] = corners;
    bisector_intersect_2d(a, b, b, c).or_else(|| bisector_intersect_2d(b, c, c, a))
}

/// Fills the Voronoi vertex of every triangle. Returns how many triangles
/// were left without one.
pub(crate) fn update_voronoi_vertices(store: &mut MeshStore) -> usize {
    let updates: Vec<(TriangleId, Option<Point2>)> = store
        .triangles()
        .map(|t| {
            let vertex = store
                .triangle_positions(t.id)
                .ok()
                .and_then(|corners| dual_vertex(&corners));
            (t.id, vertex)
        })
        .collect();

    let mut degenerate = 0;
    for (id, vertex) in updates {
        if vertex.is_none() {
            tracing::warn!(triangle = ?id, "bisectors do not meet, no Voronoi vertex");
            degenerate += 1;
        }
        if let Ok(tri) = store.triangle_mut(id) {
            tri.voronoi_vertex = vertex;
        }
    }
    degenerate
}

/// Collects the dual edge of every triangulation edge whose triangles carry
/// a Voronoi vertex.
pub(crate) fn voronoi_edges(store: &MeshStore) -> Vec<VoronoiEdge> {
    store
        .edges()
        .filter_map(|edge| dual_edge(store, edge))
        .collect()
}

fn dual_edge(store: &MeshStore, edge: &Edge) -> Option<VoronoiEdge> {
    match edge.triangles {
        [Some(t0), Some(t1)] => Some(VoronoiEdge::Segment {
            edge: edge.id,
            from: store.triangle(t0).ok()?.voronoi_vertex?,
            to: store.triangle(t1).ok()?.voronoi_vertex?,
        }),
        [Some(t), None] | [None, Some(t)] => {
            let tri = store.triangle(t).ok()?;
            let origin = tri.voronoi_vertex?;
            let [a, b] = edge.vertices;
            let pa = store.position(a).ok()?;
            let pb = store.position(b).ok()?;
            let apex = store.position(tri.vertex_opposite(a, b)?).ok()?;

            let d = pb - pa;
            let mut normal = Vector2::new(-d.y, d.x);
            if normal.dot(&(apex - pa)) > 0.0 {
                normal = -normal;
            }
            Some(VoronoiEdge::Ray {
                edge: edge.id,
                origin,
                direction: normal.try_normalize(TOLERANCE)?,
            })
        }
        [None, None] => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn dual_vertex_is_circumcenter() {
        let corners = [
            Point2::new(0.0, 0.0),
            Point2::new(6.0, 0.0),
            Point2::new(1.0, 5.0),
        ];
        let v = dual_vertex(&corners).unwrap();
        for c in &corners {
            assert_relative_eq!((c - v).norm(), (corners[0] - v).norm(), epsilon = 1e-9);
        }
    }

    #[test]
    fn collinear_corners_have_no_dual_vertex() {
        let corners = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 2.0),
        ];
        assert!(dual_vertex(&corners).is_none());
    }

    #[test]
    fn hull_edge_ray_points_outward() {
        let mut store = MeshStore::new();
        let a = store.push_vertex(Point2::new(0.0, 0.0));
        let b = store.push_vertex(Point2::new(10.0, 0.0));
        let c = store.push_vertex(Point2::new(5.0, 8.0));
        let ab = store.add_edge(a, b);
        let edges = [ab, store.add_edge(b, c), store.add_edge(c, a)];
        store.add_triangle(edges).unwrap();

        assert_eq!(update_voronoi_vertices(&mut store), 0);
        let duals = voronoi_edges(&store);
        assert_eq!(duals.len(), 3);
        let ray = duals
            .iter()
            .find(|d| matches!(d, VoronoiEdge::Ray { edge, .. } if *edge == ab))
            .unwrap();
        let VoronoiEdge::Ray { direction, .. } = ray else {
            panic!("expected ray");
        };
        assert_relative_eq!(direction.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(direction.y, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn missing_voronoi_vertices_give_no_edges() {
        let mut store = MeshStore::new();
        let a = store.push_vertex(Point2::new(0.0, 0.0));
        let b = store.push_vertex(Point2::new(10.0, 0.0));
        let c = store.push_vertex(Point2::new(5.0, 8.0));
        let edges = [store.add_edge(a, b), store.add_edge(b, c), store.add_edge(c, a)];
        store.add_triangle(edges).unwrap();
        assert!(voronoi_edges(&store).is_empty());
    }
}

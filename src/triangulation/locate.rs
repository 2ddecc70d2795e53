use crate::math::distance_2d::{lies_between, nearest_index};
use crate::math::polygon_2d::outer_product;
use crate::math::Point2;
use crate::topology::{EdgeId, MeshStore, Triangle, TriangleId, VertexId};

/// Where a query point lies relative to the current triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// Strictly inside the triangle.
    Contained(TriangleId),
    /// On `edge` of `triangle`, between its endpoints.
    Online {
        /// The first triangle found owning the edge.
        triangle: TriangleId,
        /// The edge under the point.
        edge: EdgeId,
    },
    /// On top of an existing corner of `triangle`.
    Coincident {
        /// The first triangle found with that corner.
        triangle: TriangleId,
        /// The corner the point coincides with.
        vertex: VertexId,
    },
    /// Outside every triangle.
    NotContained,
}

impl Location {
    /// The triangle holding the point, if any.
    #[must_use]
    pub fn triangle(&self) -> Option<TriangleId> {
        match *self {
            Self::Contained(t) | Self::Online { triangle: t, .. } | Self::Coincident { triangle: t, .. } => {
                Some(t)
            }
            Self::NotContained => None,
        }
    }
}

/// Classifies `p` against every triangle in store order; the first match wins.
pub(crate) fn locate(store: &MeshStore, p: &Point2, eps: f64) -> Location {
    store
        .triangles()
        .find_map(|tri| classify(store, tri, p, eps))
        .unwrap_or(Location::NotContained)
}

/// Classifies `p` against a single triangle, `None` if it lies outside.
fn classify(store: &MeshStore, tri: &Triangle, p: &Point2, eps: f64) -> Option<Location> {
    if tri.circumcircle().bbox_excludes(p) {
        return None;
    }
    let corners = store.triangle_positions(tri.id).ok()?;
    let rel = corners.map(|c| c - p);
    // areas[k] belongs to the edge from corner k to corner k + 1.
    let areas = [0, 1, 2].map(|k| outer_product(&rel[k], &rel[(k + 1) % 3]));

    let positive = areas.iter().any(|&a| a > eps);
    let negative = areas.iter().any(|&a| a < -eps);
    if positive && negative {
        return None;
    }

    let mut zeros = (0..3).filter(|&k| areas[k].abs() <= eps);
    match (zeros.next(), zeros.next()) {
        (None, _) => Some(Location::Contained(tri.id)),
        (Some(k), None) => {
            let j = (k + 1) % 3;
            if !lies_between(p, &corners[k], &corners[j], eps) {
                return None;
            }
            let edge = store
                .edge_between(tri.id, tri.vertices[k], tri.vertices[j])
                .ok()?;
            Some(Location::Online {
                triangle: tri.id,
                edge,
            })
        }
        (Some(_), Some(_)) => {
            let k = nearest_index(&corners, p)?;
            Some(Location::Coincident {
                triangle: tri.id,
                vertex: tri.vertices[k],
            })
        }
    }
}

use super::legalize::{legalize, Pending};
use super::locate::{locate, Location};
use crate::error::{InsertionError, Result, TopologyError};
use crate::topology::{EdgeId, MeshStore, TriangleId, VertexId};

/// Corner pairs whose old edge becomes the base of one child triangle.
const EDGE_PAIRS: [(usize, usize); 3] = [(0, 1), (1, 2), (2, 0)];

/// Inserts a registered vertex into the mesh and legalizes around it.
///
/// Returns the number of edge flips performed.
///
/// # Errors
///
/// Returns an error if no triangle holds the vertex, if it coincides with an
/// existing corner, or if a new triangle would be degenerate.
pub(crate) fn insert_vertex(store: &mut MeshStore, vertex: VertexId, eps: f64) -> Result<usize> {
    let p = store.position(vertex)?;
    let work = match locate(store, &p, eps) {
        Location::Contained(tri) => split_contained(store, tri, vertex)?,
        Location::Online { edge, .. } => split_online(store, edge, vertex)?,
        Location::Coincident { .. } => {
            return Err(InsertionError::CoincidentVertex { x: p.x, y: p.y }.into())
        }
        Location::NotContained => {
            return Err(InsertionError::NotContained { x: p.x, y: p.y }.into())
        }
    };
    legalize(store, work)
}

/// Splits `tri` into three around `p`, which lies strictly inside it.
fn split_contained(store: &mut MeshStore, tri: TriangleId, p: VertexId) -> Result<Vec<Pending>> {
    let corners = store.triangle(tri)?.vertices;
    let mut old_edges = [EdgeId::default(); 3];
    for (slot, &(i, j)) in old_edges.iter_mut().zip(&EDGE_PAIRS) {
        *slot = store.edge_between(tri, corners[i], corners[j])?;
    }
    store.remove_triangle(tri)?;

    let spokes = corners.map(|c| store.add_edge(p, c));
    let mut work = Vec::with_capacity(3);
    for (&old, &(i, j)) in old_edges.iter().zip(&EDGE_PAIRS) {
        let child = store.add_triangle([old, spokes[i], spokes[j]])?;
        work.push(Pending {
            triangle: child,
            vertex: p,
            edge: old,
        });
    }
    Ok(work)
}

/// Splits the one or two triangles owning `edge` around `p`, which lies on it.
fn split_online(store: &mut MeshStore, edge: EdgeId, p: VertexId) -> Result<Vec<Pending>> {
    let (vertices, owners) = {
        let e = store.edge(edge)?;
        (e.vertices, e.triangles)
    };
    let [a, b] = vertices;

    // (triangle, apex, apex-a edge, apex-b edge) per side.
    let mut sides = Vec::with_capacity(2);
    for tri in owners.into_iter().flatten() {
        let apex = store.triangle(tri)?.vertex_opposite(a, b).ok_or_else(|| {
            TopologyError::InvalidTopology(format!("triangle on {a}-{b} has no apex"))
        })?;
        let to_a = store.edge_between(tri, apex, a)?;
        let to_b = store.edge_between(tri, apex, b)?;
        sides.push((tri, apex, to_a, to_b));
    }
    for &(tri, ..) in &sides {
        store.remove_triangle(tri)?;
    }
    store.remove_edge(edge)?;

    let pa = store.add_edge(p, a);
    let pb = store.add_edge(p, b);
    let mut work = Vec::with_capacity(4);
    for (_, apex, to_a, to_b) in sides {
        let pc = store.add_edge(p, apex);
        for (old, half) in [(to_a, pa), (to_b, pb)] {
            let child = store.add_triangle([old, half, pc])?;
            work.push(Pending {
                triangle: child,
                vertex: p,
                edge: old,
            });
        }
    }
    Ok(work)
}

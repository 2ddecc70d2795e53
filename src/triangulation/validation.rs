use crate::error::{InsertionError, Result, TopologyError};
use crate::math::polygon_2d::{convex_hull_2d, signed_area_2d};
use crate::math::Point2;
use crate::topology::MeshStore;

/// Relative slack allowed when checking the empty-circumcircle property.
const DELAUNAY_TOLERANCE: f64 = 1e-9;

/// Checks the structural and geometric invariants of a finished mesh.
///
/// - no edge or triangle references a super-triangle vertex,
/// - every edge has one or two triangles, each of which lists it back,
/// - every triangle's edges list the triangle and span its corners,
/// - the triangles tile the convex hull of the input vertices,
/// - no input vertex lies strictly inside a triangle's circumcircle.
pub(crate) fn validate(store: &MeshStore) -> Result<()> {
    validate_structure(store)?;
    validate_hull_coverage(store)?;
    validate_empty_circumcircles(store)
}

fn validate_structure(store: &MeshStore) -> Result<()> {
    for edge in store.edges() {
        let [a, b] = edge.vertices;
        if edge.touches_super() {
            return Err(invalid(format!("edge {a}-{b} touches the super-triangle")));
        }
        if edge.triangle_count() == 0 {
            return Err(invalid(format!("edge {a}-{b} has no triangle")));
        }
        for &tri in edge.triangles.iter().flatten() {
            if !store.triangle(tri)?.has_edge(edge.id) {
                return Err(invalid(format!("triangle on edge {a}-{b} does not list it")));
            }
        }
    }

    for tri in store.triangles() {
        if tri.touches_super() {
            return Err(invalid("triangle touches the super-triangle".into()));
        }
        for e in tri.edges {
            let edge = store.edge(e)?;
            if !edge.triangles.contains(&Some(tri.id)) {
                return Err(invalid("edge does not list its triangle".into()));
            }
            if !edge.vertices.iter().all(|&v| tri.has_vertex(v)) {
                return Err(invalid("edge does not span two triangle corners".into()));
            }
        }
    }
    Ok(())
}

/// Compares the summed triangle area with the area of the vertices' hull.
fn validate_hull_coverage(store: &MeshStore) -> Result<()> {
    let points: Vec<Point2> = store.vertices().iter().map(|v| v.position).collect();
    let hull_area = signed_area_2d(&convex_hull_2d(&points)).abs();
    let mut covered = 0.0;
    for tri in store.triangles() {
        covered += signed_area_2d(&store.triangle_positions(tri.id)?).abs();
    }
    if (covered - hull_area).abs() > DELAUNAY_TOLERANCE * hull_area {
        return Err(invalid(format!(
            "triangles cover area {covered} of convex hull area {hull_area}"
        )));
    }
    Ok(())
}

fn validate_empty_circumcircles(store: &MeshStore) -> Result<()> {
    for tri in store.triangles() {
        let slack = DELAUNAY_TOLERANCE * tri.circumradius.max(1.0);
        for v in store.vertices() {
            if tri.has_vertex(v.id) {
                continue;
            }
            let dist = (v.position - tri.circumcenter).norm();
            if dist < tri.circumradius - slack {
                let [a, b, c] = tri.vertices;
                return Err(InsertionError::Delaunay {
                    triangle: format!("{a} {b} {c}"),
                    vertex: v.id.to_string(),
                }
                .into());
            }
        }
    }
    Ok(())
}

fn invalid(message: String) -> crate::error::DelaunayError {
    TopologyError::InvalidTopology(message).into()
}

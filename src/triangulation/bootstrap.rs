use crate::error::Result;
use crate::math::{Point2, Rect2, Vector2, TOLERANCE};
use crate::topology::{EdgeId, MeshStore, TriangleId};

/// Smallest usable `scale`. Below 1.5 the region's top corners fall outside.
pub const MIN_SUPER_SCALE: f64 = 2.0;

/// Corner positions of a super-triangle enclosing `region`.
///
/// The corners sit `scale` times the region's larger dimension away from its
/// center along each axis. `scale` is raised to [`MIN_SUPER_SCALE`], so every
/// point of the region is strictly inside.
#[must_use]
pub fn super_triangle_points(region: &Rect2, scale: f64) -> [Point2; 3] {
    let size = region.width().max(region.height());
    let size = if size > TOLERANCE { size } else { 1.0 };
    let d = size * scale.max(MIN_SUPER_SCALE);
    let c = region.center();
    [
        c + Vector2::new(-d, -d),
        c + Vector2::new(d, -d),
        c + Vector2::new(0.0, d),
    ]
}

/// Installs the super vertices and wires the initial triangle.
pub(crate) fn create_initial_triangle(
    store: &mut MeshStore,
    region: &Rect2,
    scale: f64,
) -> Result<TriangleId> {
    let [s0, s1, s2] = store.set_super_vertices(super_triangle_points(region, scale));
    let edges = [
        store.add_edge(s0, s1),
        store.add_edge(s1, s2),
        store.add_edge(s2, s0),
    ];
    store.add_triangle(edges)
}

/// Strips every edge and triangle touching a super vertex, then drops edges
/// left without any triangle and forgets the super vertices.
pub(crate) fn remove_initial_vertices(store: &mut MeshStore) -> Result<()> {
    let doomed: Vec<EdgeId> = store
        .edges()
        .filter(|e| e.touches_super())
        .map(|e| e.id)
        .collect();
    for id in doomed {
        let edge = store.remove_edge(id)?;
        for tri in edge.triangles.into_iter().flatten() {
            if store.triangle(tri).is_ok() {
                store.remove_triangle(tri)?;
            }
        }
    }

    let orphans: Vec<EdgeId> = store
        .edges()
        .filter(|e| e.triangle_count() == 0)
        .map(|e| e.id)
        .collect();
    for id in orphans {
        store.remove_edge(id)?;
    }

    store.clear_super_vertices();
    Ok(())
}

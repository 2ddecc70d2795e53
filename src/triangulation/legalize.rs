use crate::error::{Result, TopologyError};
use crate::math::polygon_2d::outer_product;
use crate::math::{Vector2, TOLERANCE};
use crate::topology::{EdgeId, MeshStore, Triangle, TriangleId, VertexId};

/// A triangle incident to `vertex` whose far `edge` still has to be checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Pending {
    pub triangle: TriangleId,
    pub vertex: VertexId,
    pub edge: EdgeId,
}

/// Restores the Delaunay property around freshly inserted vertices.
///
/// Works through `work` as a stack: each flip replaces the item with the two
/// edges the new triangles inherited from the flipped neighbor. A flip either
/// trades an edge with a super endpoint for a real one or removes a triangle
/// whose circumcircle contains the vertex, so the loop ends. Returns the
/// number of flips performed.
pub(crate) fn legalize(store: &mut MeshStore, mut work: Vec<Pending>) -> Result<usize> {
    let mut flips = 0;
    while let Some(item) = work.pop() {
        if let Some(next) = flip_if_illegal(store, item)? {
            flips += 1;
            work.extend(next);
        }
    }
    Ok(flips)
}

/// Flips `item.edge` if it is illegal with respect to `item.vertex`.
fn flip_if_illegal(store: &mut MeshStore, item: Pending) -> Result<Option<[Pending; 2]>> {
    let Pending {
        triangle,
        vertex: p,
        edge,
    } = item;
    match store.triangle(triangle) {
        Ok(tri) if tri.has_edge(edge) => {}
        _ => return Ok(None),
    }
    let Some(neighbor) = store.neighbor(triangle, edge)? else {
        return Ok(None);
    };

    let [a, b] = store.edge(edge)?.vertices;
    let nb = store.triangle(neighbor)?;
    let q = nb.vertex_opposite(a, b).ok_or_else(|| {
        TopologyError::InvalidTopology(format!("neighbor across {a}-{b} has no apex"))
    })?;
    if !is_illegal(store, nb, [p, a, b, q])? || !is_convex(store, [p, a, b, q])? {
        return Ok(None);
    }

    let pa = store.edge_between(triangle, p, a)?;
    let pb = store.edge_between(triangle, p, b)?;
    let qa = store.edge_between(neighbor, q, a)?;
    let qb = store.edge_between(neighbor, q, b)?;

    store.remove_triangle(triangle)?;
    store.remove_triangle(neighbor)?;
    store.remove_edge(edge)?;

    let pq = store.add_edge(p, q);
    let t_a = store.add_triangle([pq, pa, qa])?;
    let t_b = store.add_triangle([pq, pb, qb])?;
    tracing::trace!(%p, %q, "flipped edge {a}-{b}");

    Ok(Some([
        Pending {
            triangle: t_a,
            vertex: p,
            edge: qa,
        },
        Pending {
            triangle: t_b,
            vertex: p,
            edge: qb,
        },
    ]))
}

/// Legality of edge `a`-`b` between apexes `p` and `q`, where `nb` is the
/// triangle `a b q`.
///
/// Super vertices stand for points infinitely far away, so their finite
/// positions never enter an in-circle test:
/// - an edge is never flipped onto a super apex,
/// - an edge with a super endpoint is flipped whenever both apexes are real,
/// - otherwise `p` must lie strictly inside the circumcircle of `nb`.
fn is_illegal(store: &MeshStore, nb: &Triangle, [p, a, b, q]: [VertexId; 4]) -> Result<bool> {
    if p.is_super() || q.is_super() {
        return Ok(false);
    }
    if a.is_super() || b.is_super() {
        return Ok(true);
    }
    Ok(nb.circumcircle().contains(&store.position(p)?))
}

/// Returns `true` if the quad `p a q b` is strictly convex, i.e. `a` and `b`
/// lie clearly on opposite sides of the diagonal `p`-`q`.
fn is_convex(store: &MeshStore, [p, a, b, q]: [VertexId; 4]) -> Result<bool> {
    let pp = store.position(p)?;
    let pq = store.position(q)? - pp;
    let ra = store.position(a)? - pp;
    let rb = store.position(b)? - pp;
    let side = |v: &Vector2| outer_product(&pq, v);
    let clear = |v: &Vector2| side(v).abs() > TOLERANCE * pq.norm() * v.norm();
    Ok(clear(&ra) && clear(&rb) && side(&ra) * side(&rb) < 0.0)
}

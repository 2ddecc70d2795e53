mod bootstrap;
mod insertion;
mod legalize;
mod locate;
mod validation;
mod voronoi;

pub use bootstrap::{super_triangle_points, MIN_SUPER_SCALE};
pub use locate::Location;
pub use voronoi::{dual_vertex, VoronoiEdge};

use crate::error::{GeometryError, InsertionError, Result};
use crate::math::distance_2d::nearest_index;
use crate::math::polygon_2d::all_collinear;
use crate::math::{Point2, Rect2, DUPLICATE_TOLERANCE, TOLERANCE};
use crate::topology::{Edge, EdgeId, MeshStore, Triangle, TriangleId, Vertex, VertexId};

/// Parameters controlling numerical tolerances of the triangulation.
#[derive(Debug, Clone, Copy)]
pub struct TriangulationConfig {
    /// Signed-area magnitude at or below which a point counts as lying on an edge.
    pub epsilon: f64,
    /// Points closer than this to an existing vertex are rejected as duplicates.
    pub duplicate_tolerance: f64,
    /// Distance of the super-triangle corners, in multiples of the input extent.
    /// Values below [`MIN_SUPER_SCALE`] are raised to it.
    pub super_triangle_scale: f64,
}

impl Default for TriangulationConfig {
    fn default() -> Self {
        Self {
            epsilon: TOLERANCE,
            duplicate_tolerance: DUPLICATE_TOLERANCE,
            super_triangle_scale: 1000.0,
        }
    }
}

/// Incremental planar Delaunay triangulation of a point set, with its
/// Voronoi dual.
///
/// Register points with [`add_vertex`](Self::add_vertex), then call
/// [`compute`](Self::compute). Each compute starts from scratch: a
/// super-triangle encloses the input, vertices are inserted one by one and
/// legalized by edge flips, and finally everything touching the
/// super-triangle is stripped.
#[derive(Debug, Default)]
pub struct DelaunayTriangulation {
    store: MeshStore,
    config: TriangulationConfig,
    region: Option<Rect2>,
    flips: usize,
}

impl DelaunayTriangulation {
    /// Creates an empty triangulation with default tolerances.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty triangulation with custom tolerances.
    #[must_use]
    pub fn with_config(config: TriangulationConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The tolerances in use.
    #[must_use]
    pub fn config(&self) -> &TriangulationConfig {
        &self.config
    }

    /// Clears everything and pre-seeds a super-triangle enclosing `region`.
    ///
    /// `region` is remembered and merged with the vertex bounds on every
    /// later [`compute`](Self::compute).
    ///
    /// # Errors
    ///
    /// Returns an error if the super-triangle is degenerate (non-finite region).
    pub fn init(&mut self, region: Rect2) -> Result<()> {
        self.clear();
        self.region = Some(region);
        bootstrap::create_initial_triangle(&mut self.store, &region, self.config.super_triangle_scale)?;
        Ok(())
    }

    /// Removes all vertices, edges and triangles and forgets the region.
    pub fn clear(&mut self) {
        self.store.clear();
        self.region = None;
        self.flips = 0;
    }

    /// Discards edges and triangles, keeping registered vertices.
    pub fn clear_results(&mut self) {
        self.store.clear_results();
    }

    /// Registers a point and returns its index.
    ///
    /// # Errors
    ///
    /// Returns an error if a coordinate is not finite, or if an existing
    /// vertex lies within the duplicate tolerance.
    pub fn add_vertex(&mut self, x: f64, y: f64) -> Result<usize> {
        if !(x.is_finite() && y.is_finite()) {
            return Err(GeometryError::NonFinite { x, y }.into());
        }
        let p = Point2::new(x, y);
        let tol_sq = self.config.duplicate_tolerance * self.config.duplicate_tolerance;
        if self
            .store
            .vertices()
            .iter()
            .any(|v| nalgebra::distance_squared(&v.position, &p) <= tol_sq)
        {
            return Err(InsertionError::DuplicateVertex { x, y }.into());
        }
        let index = self.store.vertices().len();
        self.store.push_vertex(p);
        Ok(index)
    }

    /// Registers points in order, silently skipping rejected ones. Returns
    /// how many were added.
    pub fn add_vertices<I>(&mut self, points: I) -> usize
    where
        I: IntoIterator<Item = Point2>,
    {
        points
            .into_iter()
            .filter(|p| self.add_vertex(p.x, p.y).is_ok())
            .count()
    }

    /// Triangulates the registered vertices from scratch.
    ///
    /// Fewer than three vertices, or all of them on one line, give an empty
    /// triangulation.
    ///
    /// # Errors
    ///
    /// Returns an error if a vertex cannot be located or a degenerate
    /// triangle arises. Edges and triangles are then discarded; vertices are
    /// kept so the caller can adjust the input and retry.
    pub fn compute(&mut self) -> Result<()> {
        self.flips = 0;
        match self.run() {
            Ok(()) => {
                tracing::debug!(
                    vertices = self.store.vertices().len(),
                    triangles = self.store.triangle_count(),
                    edges = self.store.edge_count(),
                    flips = self.flips,
                    "triangulation computed"
                );
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%err, "triangulation failed, discarding results");
                self.store.clear_results();
                Err(err)
            }
        }
    }

    fn run(&mut self) -> Result<()> {
        self.store.clear_results();
        let points: Vec<Point2> = self.store.vertices().iter().map(|v| v.position).collect();
        if points.len() < 3 {
            return Ok(());
        }
        if all_collinear(&points, self.config.epsilon) {
            tracing::debug!(vertices = points.len(), "all vertices collinear, no triangles");
            return Ok(());
        }
        let Some(bounds) = Rect2::from_points(&points) else {
            return Ok(());
        };
        let region = self.region.map_or(bounds, |r| r.union(&bounds));

        bootstrap::create_initial_triangle(&mut self.store, &region, self.config.super_triangle_scale)?;
        for i in 0..points.len() {
            self.flips += insertion::insert_vertex(&mut self.store, VertexId::Input(i), self.config.epsilon)?;
        }
        bootstrap::remove_initial_vertices(&mut self.store)
    }

    /// Fills the Voronoi vertex of every current triangle. Returns how many
    /// triangles were left without one.
    pub fn update_voronoi_vertices(&mut self) -> usize {
        voronoi::update_voronoi_vertices(&mut self.store)
    }

    /// Dual edges of the Voronoi diagram.
    ///
    /// Only triangles with a Voronoi vertex contribute, so call
    /// [`update_voronoi_vertices`](Self::update_voronoi_vertices) first.
    #[must_use]
    pub fn voronoi_edges(&self) -> Vec<VoronoiEdge> {
        voronoi::voronoi_edges(&self.store)
    }

    /// Checks the mesh invariants and the Delaunay property.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<()> {
        validation::validate(&self.store)
    }

    /// Registered vertices, in registration order.
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        self.store.vertices()
    }

    /// Returns the registered vertex with the given index.
    #[must_use]
    pub fn vertex(&self, index: usize) -> Option<&Vertex> {
        self.store.vertices().get(index)
    }

    /// Position of any vertex, including super-triangle vertices while they exist.
    #[must_use]
    pub fn position(&self, id: VertexId) -> Option<Point2> {
        self.store.position(id).ok()
    }

    /// Iterates over the current edges.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.store.edges()
    }

    /// Returns an edge by ID.
    #[must_use]
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.store.edge(id).ok()
    }

    /// Number of current edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.store.edge_count()
    }

    /// Iterates over the current triangles.
    pub fn triangles(&self) -> impl Iterator<Item = &Triangle> {
        self.store.triangles()
    }

    /// Returns a triangle by ID.
    #[must_use]
    pub fn triangle(&self, id: TriangleId) -> Option<&Triangle> {
        self.store.triangle(id).ok()
    }

    /// Number of current triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.store.triangle_count()
    }

    /// Corner positions of a triangle.
    #[must_use]
    pub fn triangle_positions(&self, id: TriangleId) -> Option<[Point2; 3]> {
        self.store.triangle_positions(id).ok()
    }

    /// Number of edge flips performed by the last [`compute`](Self::compute).
    #[must_use]
    pub fn last_flip_count(&self) -> usize {
        self.flips
    }

    /// Classifies `pos` against the current triangles.
    #[must_use]
    pub fn locate(&self, pos: &Point2) -> Location {
        locate::locate(&self.store, pos, self.config.epsilon)
    }

    /// Returns the first triangle containing `pos`, boundary included.
    #[must_use]
    pub fn find_triangle_contains(&self, pos: &Point2) -> Option<&Triangle> {
        self.locate(pos).triangle().and_then(|id| self.triangle(id))
    }

    /// Returns the registered vertex closest to `pos`; ties go to the
    /// earliest registered.
    #[must_use]
    pub fn find_nearest_vertex(&self, pos: &Point2) -> Option<&Vertex> {
        let vertices = self.store.vertices();
        nearest_index(vertices.iter().map(|v| &v.position), pos).map(|i| &vertices[i])
    }
}

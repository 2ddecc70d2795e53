pub mod error;
pub mod math;
pub mod topology;
pub mod triangulation;

pub use error::{DelaunayError, Result};
pub use triangulation::{DelaunayTriangulation, Location, TriangulationConfig, VoronoiEdge};

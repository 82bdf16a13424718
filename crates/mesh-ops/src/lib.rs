//! Mesh topology operations: boundary outlining and node smoothing.

pub mod outline;
pub mod smooth;

pub use outline::{boundary_rings, outline_mesh, BoundaryRing};
pub use smooth::smooth_mesh;

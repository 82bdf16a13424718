//! Grid interconversion for the surface engine: fault-aware resampling,
//! rotated-grid unrolling, scattered-point gridding and mesh-to-grid
//! derivation.

pub mod fault_index;
pub mod from_mesh;
pub mod resample;
pub mod rotate;
pub mod scatter;

pub use fault_index::{FaultIndex, IntervalCrossings};
pub use from_mesh::{grid_from_mesh_faces, grid_from_mesh_nodes};
pub use resample::{resample, ResampleMethod, MAX_GRID_CELLS};
pub use rotate::rotate_to_axis_aligned;
pub use scatter::grid_from_points;

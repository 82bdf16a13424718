//! Surface state orchestration: owns master grid/mesh data per surface,
//! tracks what the display properties invalidate, and emits drawable
//! primitives (contours, images, nodes, edges, faults) on demand.

pub mod derived;
pub mod primitives;
pub mod surface;

pub use derived::{Axis, AxisClock, Derived};
pub use surface::{CacheStats, Surface};

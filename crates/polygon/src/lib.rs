//! Polygon geometry for the surface engine: point location, hole
//! nesting, polyline clipping and rasterized clip masks.

pub mod clip;
pub mod inside;
pub mod mask;
pub mod nest;

pub use clip::{clip_polyline, ClipSide};
pub use inside::{locate_point, point_inside_clip, point_inside_ring, segment_intersection, Containment};
pub use mask::{build_clip_mask, ClipMask};
pub use nest::nest_rings;

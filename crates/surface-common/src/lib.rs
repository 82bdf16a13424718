//! Common models and error types shared across the surface engine crates.

pub mod bands;
pub mod error;
pub mod fault;
pub mod geometry;
pub mod grid;
pub mod image;
pub mod options;
pub mod primitives;
pub mod trimesh;

pub use bands::{AttributeColorTable, ColorBand, Rgba};
pub use error::{SurfaceError, SurfaceResult};
pub use fault::{total_fault_points, FaultLine};
pub use geometry::{BoundingBox, ClipPolygon, Point2, Point3, PolygonArea, Ring};
pub use grid::{is_null, Grid, GridGeometry, ANGLE_SNAP_DEG, NULL_THRESHOLD, NULL_VALUE};
pub use image::{ImageRequest, RasterImage, MAX_IMAGE_CELLS};
pub use options::{ContourCalcOptions, ContourDrawOptions, SurfaceProperties, ThicknessMode};
pub use primitives::{ContourLine, EdgeLine, FaultTrace, LabelSpot, NodeMarker};
pub use trimesh::{mesh_flags, MeshEdge, MeshNode, MeshTriangle, TriMesh};

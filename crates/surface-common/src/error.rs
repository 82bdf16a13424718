//! Error types shared across the surface engine crates.

use thiserror::Error;

/// Result type alias using SurfaceError.
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// Primary error type for surface engine operations.
#[derive(Debug, Error)]
pub enum SurfaceError {
    // === Geometry Errors ===
    #[error("Invalid grid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Grid data length {actual} does not match geometry ({expected} cells)")]
    DataLengthMismatch { expected: usize, actual: usize },

    #[error("Invalid bounding rectangle: {0}")]
    InvalidBounds(String),

    // === Mesh Errors ===
    #[error("Invalid mesh topology: {0}")]
    InvalidMesh(String),

    #[error("Mesh element index out of range: {kind} {index} (table has {len})")]
    MeshIndexOutOfRange {
        kind: &'static str,
        index: u32,
        len: usize,
    },

    // === Option Errors ===
    #[error("Invalid contour options: {0}")]
    InvalidOptions(String),

    #[error("Invalid surface properties: {0}")]
    PropertiesError(String),

    // === Conversion Errors ===
    #[error("Target resolution {cells} cells exceeds the limit of {max}")]
    TargetTooLarge { cells: usize, max: usize },

    #[error("Fault data rejected: {0}")]
    InvalidFault(String),

    // === Image Errors ===
    #[error("Invalid image request: {0}")]
    InvalidImageRequest(String),

    #[error("Clip mask geometry does not match the output image: {0}")]
    MaskGeometryMismatch(String),
}

impl From<serde_json::Error> for SurfaceError {
    fn from(err: serde_json::Error) -> Self {
        SurfaceError::PropertiesError(format!("JSON error: {}", err))
    }
}

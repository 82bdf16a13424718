//! Raster output buffers and image requests.

use crate::bands::Rgba;
use crate::error::{SurfaceError, SurfaceResult};
use serde::{Deserialize, Serialize};

/// Upper bound on output image cells. Rejecting absurd resolutions up
/// front replaces the allocation-failure unwinding of the host protocol.
pub const MAX_IMAGE_CELLS: usize = 64_000_000;

/// Requested view rectangle and output resolution for image generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageRequest {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub ncol: usize,
    pub nrow: usize,
}

impl ImageRequest {
    pub fn new(
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        ncol: usize,
        nrow: usize,
    ) -> SurfaceResult<Self> {
        if !(x1 < x2) || !(y1 < y2) {
            return Err(SurfaceError::InvalidImageRequest(format!(
                "view rectangle ({}, {}) to ({}, {}) is inverted or empty",
                x1, y1, x2, y2
            )));
        }
        if ncol < 2 || nrow < 2 {
            return Err(SurfaceError::InvalidImageRequest(format!(
                "image must be at least 2x2, got {}x{}",
                ncol, nrow
            )));
        }
        let cells = ncol * nrow;
        if cells > MAX_IMAGE_CELLS {
            return Err(SurfaceError::TargetTooLarge {
                cells,
                max: MAX_IMAGE_CELLS,
            });
        }
        Ok(Self {
            x1,
            y1,
            x2,
            y2,
            ncol,
            nrow,
        })
    }

    pub fn len(&self) -> usize {
        self.ncol * self.nrow
    }

    pub fn is_empty(&self) -> bool {
        self.ncol == 0 || self.nrow == 0
    }
}

/// RGBA raster as four byte planes at grid-like geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pub ncol: usize,
    pub nrow: usize,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub r: Vec<u8>,
    pub g: Vec<u8>,
    pub b: Vec<u8>,
    pub a: Vec<u8>,
}

impl RasterImage {
    /// A fully transparent image covering the request.
    pub fn transparent(request: &ImageRequest) -> Self {
        let n = request.len();
        Self {
            ncol: request.ncol,
            nrow: request.nrow,
            x1: request.x1,
            y1: request.y1,
            x2: request.x2,
            y2: request.y2,
            r: vec![0; n],
            g: vec![0; n],
            b: vec![0; n],
            a: vec![0; n],
        }
    }

    pub fn len(&self) -> usize {
        self.ncol * self.nrow
    }

    pub fn is_empty(&self) -> bool {
        self.ncol == 0 || self.nrow == 0
    }

    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.ncol + col
    }

    pub fn rgba_at(&self, row: usize, col: usize) -> Rgba {
        let k = self.index(row, col);
        Rgba::new(self.r[k], self.g[k], self.b[k], self.a[k])
    }

    pub fn put(&mut self, k: usize, color: Rgba) {
        self.r[k] = color.r;
        self.g[k] = color.g;
        self.b[k] = color.b;
        self.a[k] = color.a;
    }
}

//! Scalar grid model for surface data.
//!
//! A grid is a rectangular array of f32 samples anchored at an origin with
//! a physical width and height and an optional rotation about the origin.
//! Null cells are encoded in-band: any value at or beyond 1e20 in magnitude
//! means "no data".

use crate::error::{SurfaceError, SurfaceResult};
use crate::geometry::{BoundingBox, Point2};
use serde::{Deserialize, Serialize};

/// Values with magnitude at or above this threshold are nulls.
pub const NULL_THRESHOLD: f32 = 1.0e20;

/// Canonical null written into grid cells.
pub const NULL_VALUE: f32 = 1.0e30;

/// Angles within this many degrees of zero are treated as exactly zero.
pub const ANGLE_SNAP_DEG: f64 = 0.01;

/// True if a grid value represents a null (no data) cell.
#[inline]
pub fn is_null(v: f32) -> bool {
    v >= NULL_THRESHOLD || v <= -NULL_THRESHOLD
}

/// Placement of a regular grid: cell counts, origin, physical span and
/// rotation angle in degrees counterclockwise about the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    pub ncol: usize,
    pub nrow: usize,
    pub xmin: f64,
    pub ymin: f64,
    pub width: f64,
    pub height: f64,
    pub angle: f64,
}

impl GridGeometry {
    /// Build and validate a grid placement.
    ///
    /// Angles within [`ANGLE_SNAP_DEG`] of zero snap to exactly zero so
    /// nearly-axis-aligned inputs skip the rotation machinery.
    pub fn new(
        ncol: usize,
        nrow: usize,
        xmin: f64,
        ymin: f64,
        width: f64,
        height: f64,
        angle: f64,
    ) -> SurfaceResult<Self> {
        if ncol < 2 || nrow < 2 {
            return Err(SurfaceError::InvalidGeometry(format!(
                "grid must be at least 2x2, got {}x{}",
                ncol, nrow
            )));
        }
        if !(width > 0.0) || !(height > 0.0) {
            return Err(SurfaceError::InvalidGeometry(format!(
                "width and height must be positive, got {} x {}",
                width, height
            )));
        }
        if xmin.abs() >= 1.0e20 || ymin.abs() >= 1.0e20 {
            return Err(SurfaceError::InvalidGeometry(format!(
                "origin ({}, {}) is out of range",
                xmin, ymin
            )));
        }
        if angle.abs() > 360.1 || !angle.is_finite() {
            return Err(SurfaceError::InvalidGeometry(format!(
                "rotation angle {} is out of range",
                angle
            )));
        }
        let angle = if angle.abs() < ANGLE_SNAP_DEG { 0.0 } else { angle };
        Ok(Self {
            ncol,
            nrow,
            xmin,
            ymin,
            width,
            height,
            angle,
        })
    }

    /// Axis-aligned placement (angle fixed at zero).
    pub fn axis_aligned(
        ncol: usize,
        nrow: usize,
        xmin: f64,
        ymin: f64,
        width: f64,
        height: f64,
    ) -> SurfaceResult<Self> {
        Self::new(ncol, nrow, xmin, ymin, width, height, 0.0)
    }

    pub fn is_rotated(&self) -> bool {
        self.angle != 0.0
    }

    /// Horizontal node spacing.
    pub fn xspace(&self) -> f64 {
        self.width / (self.ncol - 1) as f64
    }

    /// Vertical node spacing.
    pub fn yspace(&self) -> f64 {
        self.height / (self.nrow - 1) as f64
    }

    pub fn xmax(&self) -> f64 {
        self.xmin + self.width
    }

    pub fn ymax(&self) -> f64 {
        self.ymin + self.height
    }

    /// Total number of grid nodes.
    pub fn len(&self) -> usize {
        self.ncol * self.nrow
    }

    pub fn is_empty(&self) -> bool {
        self.ncol == 0 || self.nrow == 0
    }

    /// Flat array index for a node position.
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.ncol + col
    }

    /// World x of a column, ignoring rotation.
    #[inline]
    pub fn node_x(&self, col: usize) -> f64 {
        self.xmin + col as f64 * self.xspace()
    }

    /// World y of a row, ignoring rotation.
    #[inline]
    pub fn node_y(&self, row: usize) -> f64 {
        self.ymin + row as f64 * self.yspace()
    }

    /// The four corners with rotation applied, starting at the origin and
    /// winding counterclockwise.
    pub fn corners(&self) -> [Point2; 4] {
        if !self.is_rotated() {
            return [
                Point2::new(self.xmin, self.ymin),
                Point2::new(self.xmax(), self.ymin),
                Point2::new(self.xmax(), self.ymax()),
                Point2::new(self.xmin, self.ymax()),
            ];
        }
        let (sin_a, cos_a) = self.angle.to_radians().sin_cos();
        let p0 = Point2::new(self.xmin, self.ymin);
        let p1 = Point2::new(
            self.xmin + self.width * cos_a,
            self.ymin + self.width * sin_a,
        );
        let p3 = Point2::new(
            self.xmin - self.height * sin_a,
            self.ymin + self.height * cos_a,
        );
        let p2 = Point2::new(p3.x + self.width * cos_a, p3.y + self.width * sin_a);
        [p0, p1, p2, p3]
    }

    /// Axis-aligned bounds. Exact for unrotated grids; the hull of the
    /// four rotated corners otherwise.
    pub fn bbox(&self) -> BoundingBox {
        if !self.is_rotated() {
            return BoundingBox::new(self.xmin, self.ymin, self.xmax(), self.ymax());
        }
        BoundingBox::from_points(&self.corners())
    }

    /// Rotate an axis-space point into world space about the origin.
    pub fn rotate_point(&self, x: f64, y: f64) -> Point2 {
        if !self.is_rotated() {
            return Point2::new(x, y);
        }
        let (sin_a, cos_a) = self.angle.to_radians().sin_cos();
        let dx = x - self.xmin;
        let dy = y - self.ymin;
        Point2::new(
            self.xmin + dx * cos_a - dy * sin_a,
            self.ymin + dx * sin_a + dy * cos_a,
        )
    }
}

/// A scalar grid: row-major f32 samples plus their placement.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub data: Vec<f32>,
    pub geom: GridGeometry,
}

impl Grid {
    /// Wrap samples in a validated grid. The data length must match the
    /// geometry exactly.
    pub fn new(data: Vec<f32>, geom: GridGeometry) -> SurfaceResult<Self> {
        if data.len() != geom.len() {
            return Err(SurfaceError::DataLengthMismatch {
                expected: geom.len(),
                actual: data.len(),
            });
        }
        Ok(Self { data, geom })
    }

    /// Grid filled with a single value.
    pub fn filled(value: f32, geom: GridGeometry) -> Self {
        Self {
            data: vec![value; geom.len()],
            geom,
        }
    }

    #[inline]
    pub fn value(&self, row: usize, col: usize) -> f32 {
        self.data[self.geom.index(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, v: f32) {
        let idx = self.geom.index(row, col);
        self.data[idx] = v;
    }

    #[inline]
    pub fn is_null_at(&self, row: usize, col: usize) -> bool {
        is_null(self.value(row, col))
    }

    /// Min and max over non-null cells, or None if every cell is null.
    pub fn value_range(&self) -> Option<(f32, f32)> {
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        let mut seen = false;
        for &v in &self.data {
            if is_null(v) {
                continue;
            }
            seen = true;
            if v < min {
                min = v;
            }
            if v > max {
                max = v;
            }
        }
        if seen {
            Some((min, max))
        } else {
            None
        }
    }

    /// Count of null cells.
    pub fn null_count(&self) -> usize {
        self.data.iter().filter(|&&v| is_null(v)).count()
    }

    /// Multiply every non-null cell by a factor.
    pub fn scale_values(&mut self, factor: f32) {
        for v in &mut self.data {
            if !is_null(*v) {
                *v *= factor;
            }
        }
    }
}

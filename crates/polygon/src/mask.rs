//! Rasterized inside/outside masks for clip polygons.

use surface_common::{ClipPolygon, SurfaceError, SurfaceResult};

/// A 0/1 raster recording which image nodes lie inside a clip region.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipMask {
    pub ncol: usize,
    pub nrow: usize,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub data: Vec<u8>,
}

impl ClipMask {
    #[inline]
    pub fn inside(&self, row: usize, col: usize) -> bool {
        self.data[row * self.ncol + col] != 0
    }

    /// Verify this mask matches an output raster's placement. Row/column
    /// counts must be identical and the rectangles must agree within a
    /// small fraction of a cell.
    pub fn matches_geometry(
        &self,
        ncol: usize,
        nrow: usize,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    ) -> bool {
        if self.ncol != ncol || self.nrow != nrow {
            return false;
        }
        let tol = ((self.x2 - self.x1) + (self.y2 - self.y1)) / 1.0e6;
        (self.x1 - x1).abs() <= tol
            && (self.y1 - y1).abs() <= tol
            && (self.x2 - x2).abs() <= tol
            && (self.y2 - y2).abs() <= tol
    }
}

/// Rasterize a clip region into an inside/outside mask at the given node
/// resolution, using even-odd scanline filling. Holes carve out of their
/// outer rings automatically.
pub fn build_clip_mask(
    clip: &ClipPolygon,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    ncol: usize,
    nrow: usize,
) -> SurfaceResult<ClipMask> {
    if ncol < 2 || nrow < 2 {
        return Err(SurfaceError::InvalidBounds(format!(
            "mask must be at least 2x2, got {}x{}",
            ncol, nrow
        )));
    }
    if !(x1 < x2) || !(y1 < y2) {
        return Err(SurfaceError::InvalidBounds(format!(
            "mask rectangle ({}, {}) to ({}, {}) is inverted",
            x1, y1, x2, y2
        )));
    }

    let xspace = (x2 - x1) / (ncol - 1) as f64;
    let yspace = (y2 - y1) / (nrow - 1) as f64;
    let mut data = vec![0u8; ncol * nrow];
    let mut crossings: Vec<f64> = Vec::new();

    for row in 0..nrow {
        let y = y1 + row as f64 * yspace;
        crossings.clear();

        for ring in clip.rings() {
            let pts = &ring.points;
            let n = pts.len();
            if n < 3 {
                continue;
            }
            for i in 0..n {
                let a = pts[i];
                let b = pts[(i + 1) % n];
                // Half-open span so shared vertices count once.
                if (a.y > y) != (b.y > y) {
                    let t = (y - a.y) / (b.y - a.y);
                    crossings.push(a.x + t * (b.x - a.x));
                }
            }
        }

        if crossings.is_empty() {
            continue;
        }
        crossings.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        // Fill alternating spans between crossing pairs.
        let base = row * ncol;
        for pair in crossings.chunks_exact(2) {
            let (xs, xe) = (pair[0], pair[1]);
            let c1 = ((xs - x1) / xspace).ceil().max(0.0) as usize;
            let c2 = ((xe - x1) / xspace).floor() as isize;
            if c2 < 0 {
                continue;
            }
            let c2 = (c2 as usize).min(ncol - 1);
            for col in c1..=c2 {
                data[base + col] = 1;
            }
        }
    }

    Ok(ClipMask {
        ncol,
        nrow,
        x1,
        y1,
        x2,
        y2,
        data,
    })
}

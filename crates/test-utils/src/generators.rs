//! Grid, fault and color band generators for creating synthetic surface data.
//!
//! These generators create predictable, verifiable data patterns that can
//! be used across the test suite.

use surface_common::{ColorBand, FaultLine, Grid, GridGeometry, Rgba, NULL_VALUE};

/// Creates a test grid with predictable values.
///
/// Each cell value is calculated as: `col * 1000 + row`
///
/// This makes it easy to verify that data is being read/written correctly
/// by checking that grid[row][col] == col * 1000 + row.
///
/// # Example
///
/// ```
/// use test_utils::create_test_grid;
///
/// let data = create_test_grid(10, 5);
/// assert_eq!(data.len(), 50); // 10 * 5
/// assert_eq!(data[0], 0.0);   // col=0, row=0 -> 0*1000 + 0
/// assert_eq!(data[1], 1000.0); // col=1, row=0 -> 1*1000 + 0
/// assert_eq!(data[10], 1.0);  // col=0, row=1 -> 0*1000 + 1
/// ```
pub fn create_test_grid(ncol: usize, nrow: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(ncol * nrow);
    for row in 0..nrow {
        for col in 0..ncol {
            data.push((col * 1000 + row) as f32);
        }
    }
    data
}

/// A grid whose values increase linearly left to right: `value = col`.
///
/// Useful for contour tests, since every vertical line `x = level` is an
/// isoline of this field.
pub fn gradient_grid(ncol: usize, nrow: usize) -> Grid {
    let geom = GridGeometry::axis_aligned(
        ncol,
        nrow,
        0.0,
        0.0,
        (ncol - 1) as f64,
        (nrow - 1) as f64,
    )
    .unwrap();
    let mut data = Vec::with_capacity(ncol * nrow);
    for _row in 0..nrow {
        for col in 0..ncol {
            data.push(col as f32);
        }
    }
    Grid::new(data, geom).unwrap()
}

/// A grid with a single central peak falling off linearly with distance.
///
/// `value = height - max(|col - center_col|, |row - center_row|)`, so the
/// isolines are concentric squares around the center.
pub fn peak_grid(ncol: usize, nrow: usize, height: f32) -> Grid {
    let geom = GridGeometry::axis_aligned(
        ncol,
        nrow,
        0.0,
        0.0,
        (ncol - 1) as f64,
        (nrow - 1) as f64,
    )
    .unwrap();
    let cc = (ncol - 1) as f32 / 2.0;
    let cr = (nrow - 1) as f32 / 2.0;
    let mut data = Vec::with_capacity(ncol * nrow);
    for row in 0..nrow {
        for col in 0..ncol {
            let d = (col as f32 - cc).abs().max((row as f32 - cr).abs());
            data.push(height - d);
        }
    }
    Grid::new(data, geom).unwrap()
}

/// A constant grid. Contouring it must produce nothing.
pub fn constant_grid(ncol: usize, nrow: usize, value: f32) -> Grid {
    let geom = GridGeometry::axis_aligned(
        ncol,
        nrow,
        0.0,
        0.0,
        (ncol - 1) as f64,
        (nrow - 1) as f64,
    )
    .unwrap();
    Grid::filled(value, geom)
}

/// Punch nulls into a grid at the given (row, col) positions.
pub fn with_nulls(mut grid: Grid, holes: &[(usize, usize)]) -> Grid {
    for &(row, col) in holes {
        grid.set(row, col, NULL_VALUE);
    }
    grid
}

/// A vertical fault line at `x`, spanning the full y range with margin.
pub fn vertical_fault(x: f64, ymin: f64, ymax: f64) -> FaultLine {
    let margin = (ymax - ymin) * 0.05;
    FaultLine::from_xy(&[x, x], &[ymin - margin, ymax + margin], 0.0)
}

/// A horizontal fault line at `y`, spanning the full x range with margin.
pub fn horizontal_fault(y: f64, xmin: f64, xmax: f64) -> FaultLine {
    let margin = (xmax - xmin) * 0.05;
    FaultLine::from_xy(&[xmin - margin, xmax + margin], &[y, y], 0.0)
}

/// A small band set covering `[lo, hi)` with `n` contiguous bands of
/// distinct opaque gray levels.
pub fn gray_bands(lo: f64, hi: f64, n: usize) -> Vec<ColorBand> {
    let step = (hi - lo) / n as f64;
    (0..n)
        .map(|i| {
            let level = (255 * (i + 1) / n) as u8;
            ColorBand::new(
                lo + i as f64 * step,
                lo + (i + 1) as f64 * step,
                Rgba::opaque(level, level, level),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_grid_pattern() {
        let data = create_test_grid(4, 3);
        assert_eq!(data[0], 0.0);
        assert_eq!(data[3], 3000.0);
        assert_eq!(data[4], 1.0); // row 1, col 0
    }

    #[test]
    fn test_gradient_grid_values() {
        let grid = gradient_grid(5, 4);
        assert_eq!(grid.value(0, 3), 3.0);
        assert_eq!(grid.value(3, 3), 3.0);
        assert_eq!(grid.geom.xspace(), 1.0);
    }

    #[test]
    fn test_peak_grid_center() {
        let grid = peak_grid(5, 5, 10.0);
        assert_eq!(grid.value(2, 2), 10.0);
        assert_eq!(grid.value(0, 0), 8.0);
    }

    #[test]
    fn test_with_nulls() {
        let grid = with_nulls(gradient_grid(4, 4), &[(1, 2)]);
        assert!(grid.is_null_at(1, 2));
        assert!(!grid.is_null_at(1, 1));
    }

    #[test]
    fn test_gray_bands_cover_range() {
        let bands = gray_bands(0.0, 10.0, 5);
        assert_eq!(bands.len(), 5);
        assert_eq!(bands[0].min, 0.0);
        assert_eq!(bands[4].max, 10.0);
        assert!(bands[2].contains(5.0));
    }
}

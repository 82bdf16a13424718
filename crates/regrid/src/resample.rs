//! Grid resampling at a new geometry and resolution.

use crate::fault_index::FaultIndex;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use surface_common::{
    is_null, Grid, GridGeometry, Point2, SurfaceError, SurfaceResult, NULL_VALUE,
};
use tracing::debug;

/// Upper bound on resampled grid cells; absurd targets are rejected up
/// front instead of failing deep inside an allocation.
pub const MAX_GRID_CELLS: usize = 64_000_000;

/// Interpolation used when resampling a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResampleMethod {
    Bilinear,
    #[default]
    Bicubic,
}

/// Resample a grid onto a new axis-aligned geometry.
///
/// Output nodes outside the source bounds are null, and a null source
/// corner makes the dependent output node null. When a fault index is
/// supplied, nodes within two cells of a fault interpolate one-sided so
/// no estimate blends values from opposite sides of the discontinuity.
pub fn resample(
    grid: &Grid,
    target: GridGeometry,
    method: ResampleMethod,
    faults: Option<&FaultIndex>,
) -> SurfaceResult<Grid> {
    if grid.geom.is_rotated() || target.is_rotated() {
        return Err(SurfaceError::InvalidGeometry(
            "resample requires axis-aligned source and target".into(),
        ));
    }
    if target.len() > MAX_GRID_CELLS {
        return Err(SurfaceError::TargetTooLarge {
            cells: target.len(),
            max: MAX_GRID_CELLS,
        });
    }

    debug!(
        src = ?(grid.geom.ncol, grid.geom.nrow),
        dst = ?(target.ncol, target.nrow),
        ?method,
        faulted = faults.map(|f| f.has_faults()).unwrap_or(false),
        "resampling grid"
    );

    let mut out = vec![NULL_VALUE; target.len()];
    out.par_chunks_mut(target.ncol)
        .enumerate()
        .for_each(|(row, chunk)| {
            let y = target.node_y(row);
            for (col, slot) in chunk.iter_mut().enumerate() {
                let x = target.node_x(col);
                *slot = sample(grid, x, y, method, faults);
            }
        });

    Grid::new(out, target)
}

/// Interpolate the source grid at one world position.
pub fn sample(
    grid: &Grid,
    x: f64,
    y: f64,
    method: ResampleMethod,
    faults: Option<&FaultIndex>,
) -> f32 {
    let geom = &grid.geom;
    let fx = (x - geom.xmin) / geom.xspace();
    let fy = (y - geom.ymin) / geom.yspace();
    let edge_tol = 1e-9;
    if fx < -edge_tol
        || fy < -edge_tol
        || fx > (geom.ncol - 1) as f64 + edge_tol
        || fy > (geom.nrow - 1) as f64 + edge_tol
    {
        return NULL_VALUE;
    }
    let col = (fx.floor() as usize).min(geom.ncol - 2);
    let row = (fy.floor() as usize).min(geom.nrow - 2);

    if let Some(index) = faults {
        if index.has_faults() && near_fault(index, row, col) {
            return sample_one_sided(grid, x, y, fx, fy, row, col, method, index);
        }
    }

    match method {
        ResampleMethod::Bilinear => bilinear(grid, fx, fy, row, col),
        ResampleMethod::Bicubic => bicubic(grid, fx, fy, row, col),
    }
}

fn near_fault(index: &FaultIndex, row: usize, col: usize) -> bool {
    index.closest_at(row, col) <= 2
}

fn bilinear(grid: &Grid, fx: f64, fy: f64, row: usize, col: usize) -> f32 {
    let v00 = grid.value(row, col);
    let v01 = grid.value(row, col + 1);
    let v10 = grid.value(row + 1, col);
    let v11 = grid.value(row + 1, col + 1);
    if is_null(v00) || is_null(v01) || is_null(v10) || is_null(v11) {
        return NULL_VALUE;
    }
    let tx = fx - col as f64;
    let ty = fy - row as f64;
    let top = v00 as f64 + tx * (v01 - v00) as f64;
    let bot = v10 as f64 + tx * (v11 - v10) as f64;
    (top + ty * (bot - top)) as f32
}

/// Catmull-Rom weights at parameter t for samples at -1, 0, 1, 2.
fn cubic_weights(t: f64) -> [f64; 4] {
    let t2 = t * t;
    let t3 = t2 * t;
    [
        0.5 * (-t3 + 2.0 * t2 - t),
        0.5 * (3.0 * t3 - 5.0 * t2 + 2.0),
        0.5 * (-3.0 * t3 + 4.0 * t2 + t),
        0.5 * (t3 - t2),
    ]
}

fn bicubic(grid: &Grid, fx: f64, fy: f64, row: usize, col: usize) -> f32 {
    let geom = &grid.geom;
    let mut patch = [[0.0f64; 4]; 4];
    for (j, prow) in patch.iter_mut().enumerate() {
        let r = (row as isize + j as isize - 1).clamp(0, geom.nrow as isize - 1) as usize;
        for (i, slot) in prow.iter_mut().enumerate() {
            let c = (col as isize + i as isize - 1).clamp(0, geom.ncol as isize - 1) as usize;
            let v = grid.value(r, c);
            if is_null(v) {
                // Missing support: degrade to bilinear on the inner quad.
                return bilinear(grid, fx, fy, row, col);
            }
            *slot = v as f64;
        }
    }
    interpolate_patch(&patch, fx - col as f64, fy - row as f64)
}

fn interpolate_patch(patch: &[[f64; 4]; 4], tx: f64, ty: f64) -> f32 {
    let wx = cubic_weights(tx);
    let wy = cubic_weights(ty);
    let mut acc = 0.0;
    for j in 0..4 {
        let mut rowv = 0.0;
        for i in 0..4 {
            rowv += patch[j][i] * wx[i];
        }
        acc += rowv * wy[j];
    }
    acc as f32
}

/// One-sided interpolation near a fault.
///
/// Builds a 4x4 work patch around the containing cell, nulls out the
/// patch nodes that a fault separates from the output position, refills
/// the nulled entries from their unblocked neighbors, then interpolates
/// plainly on the patch.
#[allow(clippy::too_many_arguments)]
fn sample_one_sided(
    grid: &Grid,
    x: f64,
    y: f64,
    fx: f64,
    fy: f64,
    row: usize,
    col: usize,
    method: ResampleMethod,
    index: &FaultIndex,
) -> f32 {
    let geom = &grid.geom;
    let target = Point2::new(x, y);

    let mut patch = [[NULL_VALUE as f64; 4]; 4];
    let mut usable = [[false; 4]; 4];
    let mut any = false;
    for j in 0..4 {
        let r = (row as isize + j as isize - 1).clamp(0, geom.nrow as isize - 1) as usize;
        for i in 0..4 {
            let c = (col as isize + i as isize - 1).clamp(0, geom.ncol as isize - 1) as usize;
            let v = grid.value(r, c);
            if is_null(v) {
                continue;
            }
            let node = Point2::new(geom.node_x(c), geom.node_y(r));
            if index.blocks(target, node) {
                continue;
            }
            patch[j][i] = v as f64;
            usable[j][i] = true;
            any = true;
        }
    }
    if !any {
        return NULL_VALUE;
    }

    // The four corners of the containing cell must be usable for the
    // interpolation to mean anything; a blocked corner with no same-side
    // replacement makes the output null.
    for _pass in 0..4 {
        let mut changed = false;
        for j in 0..4 {
            for i in 0..4 {
                if usable[j][i] {
                    continue;
                }
                let mut sum = 0.0;
                let mut n = 0;
                for (dj, di) in [(0i32, -1i32), (0, 1), (-1, 0), (1, 0)] {
                    let jj = j as i32 + dj;
                    let ii = i as i32 + di;
                    if (0..4).contains(&jj) && (0..4).contains(&ii) && usable[jj as usize][ii as usize]
                    {
                        sum += patch[jj as usize][ii as usize];
                        n += 1;
                    }
                }
                if n > 0 {
                    patch[j][i] = sum / n as f64;
                    usable[j][i] = true;
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }
    if !usable.iter().flatten().all(|&u| u) {
        return NULL_VALUE;
    }

    let tx = fx - col as f64;
    let ty = fy - row as f64;
    match method {
        ResampleMethod::Bicubic => interpolate_patch(&patch, tx, ty),
        ResampleMethod::Bilinear => {
            let top = patch[1][1] + tx * (patch[1][2] - patch[1][1]);
            let bot = patch[2][1] + tx * (patch[2][2] - patch[2][1]);
            (top + ty * (bot - top)) as f32
        }
    }
}

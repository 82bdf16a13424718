//! Contour extraction for grids and triangulated meshes.
//!
//! The grid extractor is state-free: one grid, optional fault index and
//! the calculation options in, labeled polylines out. The trimesh path
//! reuses it by tracing an auxiliary grid derived from the mesh nodes
//! and clipping the result to the mesh boundary.

pub mod labels;
pub mod levels;
pub mod mesh;
pub mod trace;

pub use mesh::contour_mesh_grid;

use levels::{build_levels, Level};
use regrid::FaultIndex;
use surface_common::{
    is_null, ContourCalcOptions, ContourDrawOptions, ContourLine, Grid, SurfaceResult, NULL_VALUE,
};
use trace::{connect_segments, smooth_line, smoothing_passes, trace_level, TracedLine};
use tracing::debug;

/// Extract labeled contour polylines from one grid.
///
/// A constant or all-null grid yields an empty set (success). Invalid
/// options (zero interval, inverted ranges) are errors with no output.
pub fn contour_grid(
    grid: &Grid,
    faults: Option<&FaultIndex>,
    calc: &ContourCalcOptions,
    draw: &ContourDrawOptions,
) -> SurfaceResult<Vec<ContourLine>> {
    let (work, levels) = prepare(grid, calc)?;
    let Some((work, levels)) = work.map(|w| (w, levels)) else {
        return Ok(Vec::new());
    };
    let lines = extract(&work, &levels, faults, calc);
    Ok(finish(lines, &work, calc, draw))
}

/// Preprocessed tracing input: the work grid (hard-clamped, log
/// converted, null-border trimmed) and its level list.
pub(crate) fn prepare(
    grid: &Grid,
    calc: &ContourCalcOptions,
) -> SurfaceResult<(Option<Grid>, Vec<Level>)> {
    let mut work = grid.clone();

    // Cells outside the hard clamp draw nothing, same as nulls.
    if calc.hard_min.is_some() || calc.hard_max.is_some() {
        let lo = calc.hard_min.unwrap_or(f64::NEG_INFINITY);
        let hi = calc.hard_max.unwrap_or(f64::INFINITY);
        for v in &mut work.data {
            if !is_null(*v) && ((*v as f64) < lo || (*v as f64) > hi) {
                *v = NULL_VALUE;
            }
        }
    }

    if let Some(base) = calc.effective_log_base() {
        let ln_base = base.ln();
        for v in &mut work.data {
            if is_null(*v) {
                continue;
            }
            *v = if *v > 0.0 {
                ((*v as f64).ln() / ln_base) as f32
            } else {
                NULL_VALUE
            };
        }
    }

    let work = match trim_null_border(&work) {
        Some(w) => w,
        None => return Ok((None, Vec::new())),
    };

    let Some((zmin, zmax)) = work.value_range() else {
        return Ok((None, Vec::new()));
    };
    let levels = build_levels(zmin as f64, zmax as f64, calc)?;
    if levels.is_empty() {
        return Ok((None, Vec::new()));
    }
    Ok((Some(work), levels))
}

/// Shrink the traced region past rows and columns that are entirely null.
fn trim_null_border(grid: &Grid) -> Option<Grid> {
    let geom = &grid.geom;
    let row_live = |r: usize| (0..geom.ncol).any(|c| !grid.is_null_at(r, c));
    let col_live = |c: usize| (0..geom.nrow).any(|r| !grid.is_null_at(r, c));

    let r0 = (0..geom.nrow).find(|&r| row_live(r))?;
    let r1 = (0..geom.nrow).rfind(|&r| row_live(r))?;
    let c0 = (0..geom.ncol).find(|&c| col_live(c))?;
    let c1 = (0..geom.ncol).rfind(|&c| col_live(c))?;
    if r1 - r0 < 1 || c1 - c0 < 1 {
        return None; // a single live row/column has no cells to trace
    }
    if r0 == 0 && c0 == 0 && r1 == geom.nrow - 1 && c1 == geom.ncol - 1 {
        return Some(grid.clone());
    }

    let sub_geom = surface_common::GridGeometry::axis_aligned(
        c1 - c0 + 1,
        r1 - r0 + 1,
        geom.node_x(c0),
        geom.node_y(r0),
        (c1 - c0) as f64 * geom.xspace(),
        (r1 - r0) as f64 * geom.yspace(),
    )
    .ok()?;
    let mut data = Vec::with_capacity(sub_geom.len());
    for r in r0..=r1 {
        for c in c0..=c1 {
            data.push(grid.value(r, c));
        }
    }
    Grid::new(data, sub_geom).ok()
}

/// Trace every level into polylines, without labels.
pub(crate) fn extract(
    work: &Grid,
    levels: &[Level],
    faults: Option<&FaultIndex>,
    calc: &ContourCalcOptions,
) -> Vec<ContourLine> {
    let geom = &work.geom;
    let join_tol = geom.xspace().min(geom.yspace()) * 1e-3;
    let range = work
        .value_range()
        .map(|(lo, hi)| (hi - lo) as f64)
        .unwrap_or(0.0);
    let nudge = (range * 1e-7).max(1e-30);
    let passes = smoothing_passes(calc.smoothing_clamped());

    let mut out = Vec::new();
    for level in levels {
        let segments = trace_level(work, level.value, nudge, faults);
        let lines = connect_segments(segments, join_tol);
        for line in lines {
            let line = smooth_line(&line, passes);
            out.push(traced_to_contour(line, level, calc));
        }
    }
    debug!(
        levels = levels.len(),
        lines = out.len(),
        smoothing = passes,
        "extracted contours"
    );
    out
}

fn traced_to_contour(line: TracedLine, level: &Level, calc: &ContourCalcOptions) -> ContourLine {
    // Stored levels are display values; tracing may run in log space.
    let display = match calc.effective_log_base() {
        Some(b) => b.powf(level.value),
        None => level.value,
    };
    ContourLine::new(display as f32, level.major, line.points, line.closed)
}

/// Attach label text and spots per the draw options.
pub(crate) fn finish(
    mut lines: Vec<ContourLine>,
    work: &Grid,
    calc: &ContourCalcOptions,
    draw: &ContourDrawOptions,
) -> Vec<ContourLine> {
    let range = work
        .value_range()
        .map(|(lo, hi)| (hi - lo) as f64)
        .unwrap_or(0.0);
    let log_base = calc.effective_log_base();

    for line in &mut lines {
        let size = if line.major {
            draw.major_label_size
        } else {
            draw.minor_label_size
        };
        if size <= 0.0 {
            continue;
        }
        let level = match log_base {
            // The stored level is already de-logged; format from the
            // log-space value so decimals match the traced ladder.
            Some(b) => (line.level as f64).ln() / b.ln(),
            None => line.level as f64,
        };
        line.label = Some(labels::format_level(level, range, log_base));
        let spacing = if draw.label_spacing > 0.0 {
            draw.label_spacing
        } else {
            size * 40.0
        };
        line.label_spots = labels::label_spots(&line.points, spacing);
    }
    lines
}

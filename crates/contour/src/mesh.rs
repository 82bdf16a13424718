//! Contours for triangulated meshes.
//!
//! A mesh is contoured through its auxiliary grid: the caller resamples
//! the mesh onto a regular grid, traces that grid, and clips the traced
//! lines back to the mesh boundary so nothing draws over the concave
//! notches and holes the rectangular grid papered over.

use polygon::{clip_polyline, ClipSide};
use surface_common::{
    ClipPolygon, ContourCalcOptions, ContourDrawOptions, ContourLine, Grid, SurfaceResult,
};

/// Extract contours from a mesh's auxiliary grid, clipped to the mesh
/// boundary.
///
/// Without a boundary this is plain grid contouring. With one, every
/// traced line is cut against the boundary and only the inside runs
/// survive; a closed ring that crosses the boundary comes back as open
/// pieces. Labels are placed after clipping so no spot lands on a
/// discarded run.
pub fn contour_mesh_grid(
    aux_grid: &Grid,
    boundary: Option<&ClipPolygon>,
    calc: &ContourCalcOptions,
    draw: &ContourDrawOptions,
) -> SurfaceResult<Vec<ContourLine>> {
    let (work, levels) = crate::prepare(aux_grid, calc)?;
    let Some(work) = work else {
        return Ok(Vec::new());
    };
    let lines = crate::extract(&work, &levels, None, calc);

    let lines = match boundary {
        Some(clip) if !clip.is_empty() => clip_lines(lines, clip, &work),
        _ => lines,
    };
    Ok(crate::finish(lines, &work, calc, draw))
}

fn clip_lines(lines: Vec<ContourLine>, clip: &ClipPolygon, work: &Grid) -> Vec<ContourLine> {
    let geom = &work.geom;
    let tol = (geom.xspace() + geom.yspace()) * 1e-6;

    let mut out = Vec::new();
    for line in lines {
        // Close the ring explicitly so the run through the wrap-around
        // segment is clipped like any other.
        let mut points = line.points;
        if line.closed {
            if let Some(&first) = points.first() {
                points.push(first);
            }
        }
        let runs = clip_polyline(&points, clip, ClipSide::Inside, tol);
        let survived_whole = runs.len() == 1 && runs[0].len() == points.len();
        for run in runs {
            let closed = line.closed && survived_whole;
            let mut run = run;
            if closed {
                run.pop(); // drop the duplicated wrap-around point
            }
            if run.len() >= 2 {
                out.push(ContourLine::new(line.level, line.major, run, closed));
            }
        }
    }
    out
}

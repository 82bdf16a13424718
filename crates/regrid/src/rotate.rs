//! Rotated-grid unrolling.
//!
//! An angled grid cannot be contoured or rasterized directly; it is
//! re-gridded onto the axis-aligned bounding box of its four rotated
//! corners. Coverage outside the rotated footprint is masked back to
//! null, so the unrolled grid draws exactly the same area.

use crate::scatter::grid_from_points;
use polygon::point_inside_ring;
use surface_common::{
    FaultLine, Grid, GridGeometry, Point3, Ring, SurfaceResult, NULL_VALUE,
};
use tracing::debug;

/// Node counts of the unrolled grid are clamped to keep the re-gridding
/// bounded for long thin rotations.
const MAX_AXIS_NODES: usize = 4096;

/// Unroll a rotated grid into an axis-aligned one, rotating its fault
/// lines along with it.
///
/// Returns the input unchanged when the grid is already axis-aligned.
pub fn rotate_to_axis_aligned(
    grid: &Grid,
    faults: &[FaultLine],
) -> SurfaceResult<(Grid, Vec<FaultLine>)> {
    let geom = &grid.geom;
    if !geom.is_rotated() {
        return Ok((grid.clone(), faults.to_vec()));
    }

    let corners = geom.corners();
    let bbox = geom.bbox();
    let xspace = geom.xspace();
    let yspace = geom.yspace();
    let ncol = ((bbox.width() / xspace).ceil() as usize + 1).clamp(2, MAX_AXIS_NODES);
    let nrow = ((bbox.height() / yspace).ceil() as usize + 1).clamp(2, MAX_AXIS_NODES);
    let target = GridGeometry::axis_aligned(
        ncol,
        nrow,
        bbox.min_x,
        bbox.min_y,
        bbox.width(),
        bbox.height(),
    )?;

    debug!(
        angle = geom.angle,
        src = ?(geom.ncol, geom.nrow),
        dst = ?(ncol, nrow),
        "unrolling rotated grid"
    );

    // Scatter every valid node at its rotated world position.
    let mut points = Vec::with_capacity(grid.data.len());
    for row in 0..geom.nrow {
        for col in 0..geom.ncol {
            let v = grid.value(row, col);
            if surface_common::is_null(v) {
                continue;
            }
            let p = geom.rotate_point(geom.node_x(col), geom.node_y(row));
            points.push(Point3::new(p.x, p.y, v as f64));
        }
    }

    let rotated_faults: Vec<FaultLine> = faults
        .iter()
        .map(|fault| {
            FaultLine::new(
                fault
                    .points
                    .iter()
                    .map(|p| {
                        let r = geom.rotate_point(p.x, p.y);
                        Point3::new(r.x, r.y, p.z)
                    })
                    .collect(),
            )
        })
        .collect();

    let mut out = grid_from_points(&points, target, &rotated_faults)?;

    // Mask nodes outside the rotated footprint back to null.
    let quad = Ring::new(corners.to_vec());
    let tol = (xspace + yspace) / 100.0;
    for row in 0..target.nrow {
        let y = target.node_y(row);
        for col in 0..target.ncol {
            let x = target.node_x(col);
            if !point_inside_ring(&quad, x, y, tol) {
                out.set(row, col, NULL_VALUE);
            }
        }
    }

    Ok((out, rotated_faults))
}

//! Scattered-point grid builder.
//!
//! Shared by rotated-grid unrolling and mesh-node gridding: snap points
//! onto their nearest grid node (averaging duplicates), then fill the
//! remaining nulls with the fault-aware row/column interpolation. Sparse
//! or degenerate coverage degrades to a plane-fit surface rather than
//! failing.

use crate::fault_index::FaultIndex;
use crate::resample::MAX_GRID_CELLS;
use surface_common::{
    FaultLine, Grid, GridGeometry, Point3, SurfaceError, SurfaceResult, NULL_VALUE,
};
use tracing::debug;

/// Build a grid from scattered (x, y, z) points.
///
/// Points outside the target geometry are ignored. Returns an error when
/// the target is rotated or oversized, or when no point lands on it.
pub fn grid_from_points(
    points: &[Point3],
    geom: GridGeometry,
    faults: &[FaultLine],
) -> SurfaceResult<Grid> {
    if geom.is_rotated() {
        return Err(SurfaceError::InvalidGeometry(
            "scattered gridding requires an axis-aligned target".into(),
        ));
    }
    if geom.len() > MAX_GRID_CELLS {
        return Err(SurfaceError::TargetTooLarge {
            cells: geom.len(),
            max: MAX_GRID_CELLS,
        });
    }

    let mut sums = vec![0.0f64; geom.len()];
    let mut counts = vec![0u32; geom.len()];
    let mut seeded = 0usize;
    for p in points {
        let col = ((p.x - geom.xmin) / geom.xspace()).round();
        let row = ((p.y - geom.ymin) / geom.yspace()).round();
        if col < 0.0 || row < 0.0 || col > (geom.ncol - 1) as f64 || row > (geom.nrow - 1) as f64 {
            continue;
        }
        let idx = geom.index(row as usize, col as usize);
        sums[idx] += p.z;
        if counts[idx] == 0 {
            seeded += 1;
        }
        counts[idx] += 1;
    }
    if seeded == 0 {
        return Err(SurfaceError::InvalidGeometry(
            "no scattered point lands on the target geometry".into(),
        ));
    }
    debug!(
        points = points.len(),
        seeded,
        cells = geom.len(),
        "seeding scattered grid"
    );

    let data = sums
        .iter()
        .zip(counts.iter())
        .map(|(&s, &n)| if n > 0 { (s / n as f64) as f32 } else { NULL_VALUE })
        .collect();
    let mut grid = Grid::new(data, geom)?;

    let index = FaultIndex::new(&geom, faults)?;
    index.interpolate_nulls(&mut grid)?;
    Ok(grid)
}

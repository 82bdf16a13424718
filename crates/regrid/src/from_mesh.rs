//! Deriving grids from triangulated meshes.

use crate::resample::MAX_GRID_CELLS;
use crate::scatter::grid_from_points;
use surface_common::{
    Grid, GridGeometry, Point3, SurfaceError, SurfaceResult, TriMesh, NULL_VALUE,
};
use tracing::debug;

/// Minimum cell count of a node-derived grid; tiny meshes still get
/// enough resolution to contour.
const MIN_NODE_GRID_CELLS: usize = 1000;

/// Derive a grid from mesh node positions by scattered-point gridding.
///
/// The target resolution is roughly four cells per node (at least
/// [`MIN_NODE_GRID_CELLS`]), aspect-matched to the mesh bounding box.
/// This is the auxiliary grid the trimesh contour path traces on.
pub fn grid_from_mesh_nodes(mesh: &TriMesh) -> SurfaceResult<Grid> {
    let bbox = mesh
        .bbox()
        .ok_or_else(|| SurfaceError::InvalidMesh("mesh has no active nodes".into()))?;
    if bbox.width() <= 0.0 || bbox.height() <= 0.0 {
        return Err(SurfaceError::InvalidMesh(
            "mesh bounding box is degenerate".into(),
        ));
    }

    let ntot = (4 * mesh.active_node_count()).max(MIN_NODE_GRID_CELLS);
    let aspect = bbox.height() / bbox.width();
    let ncol = ((ntot as f64 / aspect).sqrt().round() as usize).clamp(2, 4096);
    let nrow = (ntot / ncol).clamp(2, 4096);
    let geom = GridGeometry::axis_aligned(
        ncol,
        nrow,
        bbox.min_x,
        bbox.min_y,
        bbox.width(),
        bbox.height(),
    )?;
    debug!(
        nodes = mesh.active_node_count(),
        ncol, nrow, "deriving grid from mesh nodes"
    );

    let points: Vec<Point3> = mesh
        .nodes
        .iter()
        .filter(|n| !n.is_deleted())
        .map(|n| Point3::new(n.x, n.y, n.z))
        .collect();
    grid_from_points(&points, geom, &[])
}

/// Rasterize mesh triangles onto a target geometry with barycentric
/// interpolation of node z. Cells no triangle covers stay null.
///
/// Used for final color rasterization of a trimesh at image resolution,
/// where the triangle faces themselves define the drawn area.
pub fn grid_from_mesh_faces(mesh: &TriMesh, geom: GridGeometry) -> SurfaceResult<Grid> {
    if geom.is_rotated() {
        return Err(SurfaceError::InvalidGeometry(
            "face rasterization requires an axis-aligned target".into(),
        ));
    }
    if geom.len() > MAX_GRID_CELLS {
        return Err(SurfaceError::TargetTooLarge {
            cells: geom.len(),
            max: MAX_GRID_CELLS,
        });
    }

    let mut grid = Grid::filled(NULL_VALUE, geom);
    let mut covered = 0usize;
    for tri in mesh.triangles.iter().filter(|t| !t.is_deleted()) {
        let Some(corners) = mesh.triangle_nodes(tri) else {
            continue;
        };
        let [a, b, c] = corners.map(|id| &mesh.nodes[id as usize]);
        if a.is_deleted() || b.is_deleted() || c.is_deleted() {
            continue;
        }

        let det = (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y);
        if det.abs() < 1e-30 {
            continue; // degenerate triangle
        }

        let xmin = a.x.min(b.x).min(c.x);
        let xmax = a.x.max(b.x).max(c.x);
        let ymin = a.y.min(b.y).min(c.y);
        let ymax = a.y.max(b.y).max(c.y);
        let c0 = (((xmin - geom.xmin) / geom.xspace()).floor().max(0.0)) as usize;
        let c1 = ((((xmax - geom.xmin) / geom.xspace()).ceil()) as usize).min(geom.ncol - 1);
        let r0 = (((ymin - geom.ymin) / geom.yspace()).floor().max(0.0)) as usize;
        let r1 = ((((ymax - geom.ymin) / geom.yspace()).ceil()) as usize).min(geom.nrow - 1);
        if c0 > c1 || r0 > r1 {
            continue;
        }

        let eps = -1e-9;
        for row in r0..=r1 {
            let y = geom.node_y(row);
            for col in c0..=c1 {
                let x = geom.node_x(col);
                let w1 = ((b.x - a.x) * (y - a.y) - (x - a.x) * (b.y - a.y)) / det;
                let w2 = ((x - a.x) * (c.y - a.y) - (c.x - a.x) * (y - a.y)) / det;
                let w0 = 1.0 - w1 - w2;
                if w0 < eps || w1 < eps || w2 < eps {
                    continue;
                }
                let z = w0 * a.z + w2 * b.z + w1 * c.z;
                grid.set(row, col, z as f32);
                covered += 1;
            }
        }
    }
    debug!(covered, cells = geom.len(), "rasterized mesh faces");
    Ok(grid)
}

//! Fault crossing index for interpolation blocking.
//!
//! A fault line is an interpolation barrier: no estimate may blend values
//! from opposite sides of it. The index precomputes, for every grid row
//! and column line, where faults cross each cell interval, plus a per-node
//! distance table used to skip the blocking test far away from any fault.

use nalgebra::{Matrix3, Vector3};
use polygon::segment_intersection;
use surface_common::{
    is_null, FaultLine, Grid, GridGeometry, Point2, Point3, SurfaceError, SurfaceResult,
    NULL_VALUE,
};
use tracing::debug;

/// Node distances at or beyond this many cells count as "nowhere near a
/// fault" and skip the blocking test entirely.
const CLOSEST_FAR: u32 = 1_000_000;

/// Crossing positions are clamped away from the interval endpoints so a
/// fault running exactly through a node still separates both intervals.
const PCT_MIN: f64 = 0.01;
const PCT_MAX: f64 = 0.99;

/// Fault crossings of one cell interval along a row or column line.
///
/// Only the outermost two crossings are kept; the count records how many
/// were seen in total.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IntervalCrossings {
    pub count: u32,
    /// Position of the first crossing as a fraction of the interval.
    pub first_pct: f64,
    /// Fault z at the first crossing.
    pub first_z: f64,
    pub last_pct: f64,
    pub last_z: f64,
}

impl IntervalCrossings {
    fn add(&mut self, pct: f64, z: f64) {
        if self.count == 0 || pct < self.first_pct {
            self.first_pct = pct;
            self.first_z = z;
        }
        if self.count == 0 || pct > self.last_pct {
            self.last_pct = pct;
            self.last_z = z;
        }
        self.count += 1;
    }

    pub fn is_crossed(&self) -> bool {
        self.count > 0
    }
}

/// Precomputed fault crossings for one grid geometry.
#[derive(Debug, Clone)]
pub struct FaultIndex {
    geom: GridGeometry,
    /// Every fault segment, flattened across all fault lines.
    segments: Vec<(Point3, Point3)>,
    /// Segment ids overlapping each grid cell, `(ncol-1) * (nrow-1)`.
    cell_segments: Vec<Vec<u32>>,
    /// Crossings of column interval `c` on row line `r`,
    /// indexed `r * (ncol-1) + c`.
    row_crossings: Vec<IntervalCrossings>,
    /// Crossings of row interval `r` on column line `c`,
    /// indexed `c * (nrow-1) + r`.
    col_crossings: Vec<IntervalCrossings>,
    /// Per-node L1 distance, in cells, to the nearest fault-crossed cell.
    closest: Vec<u32>,
    /// Nodes a fault point passes within tolerance of.
    grazed: Vec<bool>,
    snap_tol: f64,
}

impl FaultIndex {
    /// Build the crossing index for an axis-aligned grid geometry.
    ///
    /// An empty fault set builds a trivial index that blocks nothing, so
    /// callers can use one code path for faulted and unfaulted grids.
    pub fn new(geom: &GridGeometry, faults: &[FaultLine]) -> SurfaceResult<Self> {
        if geom.is_rotated() {
            return Err(SurfaceError::InvalidFault(
                "fault index requires an axis-aligned grid".into(),
            ));
        }
        for fault in faults {
            for p in &fault.points {
                if !p.x.is_finite() || !p.y.is_finite() {
                    return Err(SurfaceError::InvalidFault(
                        "fault point coordinates must be finite".into(),
                    ));
                }
            }
        }

        let ncol = geom.ncol;
        let nrow = geom.nrow;
        let xspace = geom.xspace();
        let yspace = geom.yspace();
        let snap_tol = (xspace + yspace) / 500.0;

        let mut index = Self {
            geom: *geom,
            segments: Vec::new(),
            cell_segments: vec![Vec::new(); (ncol - 1) * (nrow - 1)],
            row_crossings: vec![IntervalCrossings::default(); nrow * (ncol - 1)],
            col_crossings: vec![IntervalCrossings::default(); ncol * (nrow - 1)],
            closest: vec![CLOSEST_FAR; ncol * nrow],
            grazed: vec![false; ncol * nrow],
            snap_tol,
        };

        for fault in faults {
            if fault.is_empty() {
                continue;
            }
            for (a, b) in fault.segments() {
                let a = index.snap_point(*a);
                let b = index.snap_point(*b);
                index.set_vector_crossings(&a, &b);
            }
            for p in &fault.points {
                index.mark_grazed(p);
            }
        }

        index.build_closest_table();
        debug!(
            segments = index.segments.len(),
            ncol, nrow, "fault index built"
        );
        Ok(index)
    }

    pub fn has_faults(&self) -> bool {
        !self.segments.is_empty()
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geom
    }

    /// Crossings of column interval `col` on row line `row`.
    pub fn row_crossing(&self, row: usize, col: usize) -> &IntervalCrossings {
        &self.row_crossings[row * (self.geom.ncol - 1) + col]
    }

    /// Crossings of row interval `row` on column line `col`.
    pub fn col_crossing(&self, col: usize, row: usize) -> &IntervalCrossings {
        &self.col_crossings[col * (self.geom.nrow - 1) + row]
    }

    /// L1 distance, in cells, from a node to the nearest faulted cell.
    pub fn closest_at(&self, row: usize, col: usize) -> u32 {
        self.closest[self.geom.index(row, col)]
    }

    pub fn is_grazed(&self, row: usize, col: usize) -> bool {
        self.grazed[self.geom.index(row, col)]
    }

    /// Snap a fault point onto the nearest row/column line when it lands
    /// within tolerance, so an endpoint sitting on a node is not counted
    /// by both flanking intervals.
    fn snap_point(&self, mut p: Point3) -> Point3 {
        let col_line = (p.x - self.geom.xmin) / self.geom.xspace();
        let row_line = (p.y - self.geom.ymin) / self.geom.yspace();
        let nearest_x = self.geom.xmin + col_line.round() * self.geom.xspace();
        let nearest_y = self.geom.ymin + row_line.round() * self.geom.yspace();
        if (p.x - nearest_x).abs() < self.snap_tol {
            p.x = nearest_x;
        }
        if (p.y - nearest_y).abs() < self.snap_tol {
            p.y = nearest_y;
        }
        p
    }

    /// Record one fault segment: its row/column line crossings and the
    /// cells it overlaps.
    fn set_vector_crossings(&mut self, a: &Point3, b: &Point3) {
        let geom = self.geom;
        let ncol = geom.ncol;
        let nrow = geom.nrow;
        let xspace = geom.xspace();
        let yspace = geom.yspace();

        let seg_id = self.segments.len() as u32;
        self.segments.push((*a, *b));

        // Cells overlapped by the segment bounding box. Conservative but
        // cheap; the exact intersection test runs at query time.
        let cmin = (((a.x.min(b.x) - geom.xmin) / xspace).floor() as isize).clamp(0, ncol as isize - 2);
        let cmax = (((a.x.max(b.x) - geom.xmin) / xspace).floor() as isize).clamp(0, ncol as isize - 2);
        let rmin = (((a.y.min(b.y) - geom.ymin) / yspace).floor() as isize).clamp(0, nrow as isize - 2);
        let rmax = (((a.y.max(b.y) - geom.ymin) / yspace).floor() as isize).clamp(0, nrow as isize - 2);
        if a.x.max(b.x) >= geom.xmin
            && a.x.min(b.x) <= geom.xmax()
            && a.y.max(b.y) >= geom.ymin
            && a.y.min(b.y) <= geom.ymax()
        {
            for r in rmin..=rmax {
                for c in cmin..=cmax {
                    self.cell_segments[r as usize * (ncol - 1) + c as usize].push(seg_id);
                }
            }
        }

        // Row line crossings.
        let (ylo, yhi) = if a.y <= b.y { (a.y, b.y) } else { (b.y, a.y) };
        let r0 = ((ylo - geom.ymin) / yspace).ceil().max(0.0) as usize;
        for row in r0..nrow {
            let y = geom.node_y(row);
            if y > yhi {
                break;
            }
            let dy = b.y - a.y;
            if dy.abs() < 1e-30 {
                continue; // segment runs along the row line
            }
            let t = (y - a.y) / dy;
            if !(0.0..=1.0).contains(&t) {
                continue;
            }
            let x = a.x + t * (b.x - a.x);
            let z = a.z + t * (b.z - a.z);
            let cf = (x - geom.xmin) / xspace;
            if cf < 0.0 || cf > (ncol - 1) as f64 {
                continue;
            }
            let col = (cf.floor() as usize).min(ncol - 2);
            let pct = (cf - col as f64).clamp(PCT_MIN, PCT_MAX);
            self.row_crossings[row * (ncol - 1) + col].add(pct, z);
        }

        // Column line crossings.
        let (xlo, xhi) = if a.x <= b.x { (a.x, b.x) } else { (b.x, a.x) };
        let c0 = ((xlo - geom.xmin) / xspace).ceil().max(0.0) as usize;
        for col in c0..ncol {
            let x = geom.node_x(col);
            if x > xhi {
                break;
            }
            let dx = b.x - a.x;
            if dx.abs() < 1e-30 {
                continue;
            }
            let t = (x - a.x) / dx;
            if !(0.0..=1.0).contains(&t) {
                continue;
            }
            let y = a.y + t * (b.y - a.y);
            let z = a.z + t * (b.z - a.z);
            let rf = (y - geom.ymin) / yspace;
            if rf < 0.0 || rf > (nrow - 1) as f64 {
                continue;
            }
            let row = (rf.floor() as usize).min(nrow - 2);
            let pct = (rf - row as f64).clamp(PCT_MIN, PCT_MAX);
            self.col_crossings[col * (nrow - 1) + row].add(pct, z);
        }
    }

    fn mark_grazed(&mut self, p: &Point3) {
        let geom = self.geom;
        let cf = (p.x - geom.xmin) / geom.xspace();
        let rf = (p.y - geom.ymin) / geom.yspace();
        let col = cf.round();
        let row = rf.round();
        if col < 0.0 || row < 0.0 || col > (geom.ncol - 1) as f64 || row > (geom.nrow - 1) as f64 {
            return;
        }
        let dx = (cf - col) * geom.xspace();
        let dy = (rf - row) * geom.yspace();
        if dx.abs() < self.snap_tol && dy.abs() < self.snap_tol {
            self.grazed[geom.index(row as usize, col as usize)] = true;
        }
    }

    /// Two-pass chamfer fill of the per-node distance table. Corner nodes
    /// of any cell with a fault segment start at zero.
    fn build_closest_table(&mut self) {
        let ncol = self.geom.ncol;
        let nrow = self.geom.nrow;

        for r in 0..nrow - 1 {
            for c in 0..ncol - 1 {
                if self.cell_segments[r * (ncol - 1) + c].is_empty() {
                    continue;
                }
                for (nr, nc) in [(r, c), (r, c + 1), (r + 1, c), (r + 1, c + 1)] {
                    self.closest[nr * ncol + nc] = 0;
                }
            }
        }

        for r in 0..nrow {
            for c in 0..ncol {
                let idx = r * ncol + c;
                let mut best = self.closest[idx];
                if c > 0 {
                    best = best.min(self.closest[idx - 1].saturating_add(1));
                }
                if r > 0 {
                    best = best.min(self.closest[idx - ncol].saturating_add(1));
                }
                self.closest[idx] = best;
            }
        }
        for r in (0..nrow).rev() {
            for c in (0..ncol).rev() {
                let idx = r * ncol + c;
                let mut best = self.closest[idx];
                if c + 1 < ncol {
                    best = best.min(self.closest[idx + 1].saturating_add(1));
                }
                if r + 1 < nrow {
                    best = best.min(self.closest[idx + ncol].saturating_add(1));
                }
                self.closest[idx] = best;
            }
        }
    }

    /// True when the open segment `a -> b` crosses any fault.
    ///
    /// Segments shorter than the recorded distance from `a` to the
    /// nearest faulted cell return early without testing geometry.
    pub fn blocks(&self, a: Point2, b: Point2) -> bool {
        if self.segments.is_empty() {
            return false;
        }
        let geom = self.geom;
        let xspace = geom.xspace();
        let yspace = geom.yspace();

        let col = (((a.x - geom.xmin) / xspace).round()).clamp(0.0, (geom.ncol - 1) as f64);
        let row = (((a.y - geom.ymin) / yspace).round()).clamp(0.0, (geom.nrow - 1) as f64);
        let near = self.closest[geom.index(row as usize, col as usize)];
        let len_cells = ((b.x - a.x) / xspace)
            .abs()
            .max(((b.y - a.y) / yspace).abs());
        if near != 0 && (near as f64) > len_cells + 1.0 {
            return false;
        }

        let ncol = geom.ncol;
        let nrow = geom.nrow;
        let cmin = (((a.x.min(b.x) - geom.xmin) / xspace).floor() as isize).clamp(0, ncol as isize - 2);
        let cmax = (((a.x.max(b.x) - geom.xmin) / xspace).floor() as isize).clamp(0, ncol as isize - 2);
        let rmin = (((a.y.min(b.y) - geom.ymin) / yspace).floor() as isize).clamp(0, nrow as isize - 2);
        let rmax = (((a.y.max(b.y) - geom.ymin) / yspace).floor() as isize).clamp(0, nrow as isize - 2);

        let mut tested: Vec<u32> = Vec::new();
        for r in rmin..=rmax {
            for c in cmin..=cmax {
                for &seg_id in &self.cell_segments[r as usize * (ncol - 1) + c as usize] {
                    if tested.contains(&seg_id) {
                        continue;
                    }
                    tested.push(seg_id);
                    let (s1, s2) = self.segments[seg_id as usize];
                    if segment_intersection(a, b, s1.xy(), s2.xy()).is_some() {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Fill the null nodes of a partially seeded grid without blending
    /// across faults.
    ///
    /// Row and column estimates interpolate linearly between bracketing
    /// seeds; an interval with a fault crossing takes the same-side seed
    /// value instead. Both estimates combine by inverse-distance-squared
    /// weights. Nodes with neither estimate fall back to a local plane
    /// fit over the nearest unblocked seeds.
    pub fn interpolate_nulls(&self, grid: &mut Grid) -> SurfaceResult<()> {
        if grid.geom != self.geom {
            return Err(SurfaceError::InvalidGeometry(
                "grid geometry does not match the fault index".into(),
            ));
        }
        let ncol = self.geom.ncol;
        let nrow = self.geom.nrow;
        let seeds = grid.data.clone();

        let mut row_est = vec![(NULL_VALUE, f64::MAX); seeds.len()];
        let mut col_est = vec![(NULL_VALUE, f64::MAX); seeds.len()];

        for row in 0..nrow {
            let cols: Vec<usize> = (0..ncol)
                .filter(|&c| !is_null(seeds[row * ncol + c]))
                .collect();
            for pair in cols.windows(2) {
                let (c0, c1) = (pair[0], pair[1]);
                if c1 == c0 + 1 {
                    continue;
                }
                let crossed: Vec<usize> = (c0..c1)
                    .filter(|&c| self.row_crossing(row, c).is_crossed())
                    .collect();
                let v0 = seeds[row * ncol + c0] as f64;
                let v1 = seeds[row * ncol + c1] as f64;
                for c in c0 + 1..c1 {
                    let est = if crossed.is_empty() {
                        let t = (c - c0) as f64 / (c1 - c0) as f64;
                        v0 + t * (v1 - v0)
                    } else if crossed.iter().all(|&cc| cc >= c) {
                        v0 // every crossing is on the far side of c1's seed
                    } else if crossed.iter().all(|&cc| cc < c) {
                        v1
                    } else {
                        continue; // crossings on both sides, leave for fallback
                    };
                    let dist = (c - c0).min(c1 - c) as f64;
                    row_est[row * ncol + c] = (est as f32, dist);
                }
            }
        }

        for col in 0..ncol {
            let rows: Vec<usize> = (0..nrow)
                .filter(|&r| !is_null(seeds[r * ncol + col]))
                .collect();
            for pair in rows.windows(2) {
                let (r0, r1) = (pair[0], pair[1]);
                if r1 == r0 + 1 {
                    continue;
                }
                let crossed: Vec<usize> = (r0..r1)
                    .filter(|&r| self.col_crossing(col, r).is_crossed())
                    .collect();
                let v0 = seeds[r0 * ncol + col] as f64;
                let v1 = seeds[r1 * ncol + col] as f64;
                for r in r0 + 1..r1 {
                    let est = if crossed.is_empty() {
                        let t = (r - r0) as f64 / (r1 - r0) as f64;
                        v0 + t * (v1 - v0)
                    } else if crossed.iter().all(|&rr| rr >= r) {
                        v0
                    } else if crossed.iter().all(|&rr| rr < r) {
                        v1
                    } else {
                        continue;
                    };
                    let dist = (r - r0).min(r1 - r) as f64;
                    col_est[r * ncol + col] = (est as f32, dist);
                }
            }
        }

        let mut unresolved = Vec::new();
        for idx in 0..seeds.len() {
            if !is_null(seeds[idx]) {
                continue;
            }
            let (rv, rd) = row_est[idx];
            let (cv, cd) = col_est[idx];
            let value = match (is_null(rv), is_null(cv)) {
                (false, false) => {
                    let wr = 1.0 / (rd * rd).max(1e-12);
                    let wc = 1.0 / (cd * cd).max(1e-12);
                    ((rv as f64 * wr + cv as f64 * wc) / (wr + wc)) as f32
                }
                (false, true) => rv,
                (true, false) => cv,
                (true, true) => {
                    unresolved.push(idx);
                    continue;
                }
            };
            grid.data[idx] = value;
        }

        if !unresolved.is_empty() {
            self.fill_borders(grid, &seeds, &unresolved)?;
        }
        Ok(())
    }

    /// Plane-fit fallback for nodes with no bracketing seeds in either
    /// direction, typically outside the seeded footprint.
    fn fill_borders(&self, grid: &mut Grid, seeds: &[f32], targets: &[usize]) -> SurfaceResult<()> {
        let ncol = self.geom.ncol;
        let want = if self.has_faults() { 10 } else { 3 };

        let seed_nodes: Vec<(usize, usize, f64)> = seeds
            .iter()
            .enumerate()
            .filter(|(_, &v)| !is_null(v))
            .map(|(idx, &v)| (idx / ncol, idx % ncol, v as f64))
            .collect();
        if seed_nodes.is_empty() {
            return Ok(());
        }

        let zmin = seed_nodes.iter().map(|s| s.2).fold(f64::MAX, f64::min);
        let zmax = seed_nodes.iter().map(|s| s.2).fold(f64::MIN, f64::max);
        let flat = (zmax - zmin).abs() < 1e-10 * zmax.abs().max(1.0);

        for &idx in targets {
            let row = idx / ncol;
            let col = idx % ncol;
            if flat {
                grid.data[idx] = zmin as f32;
                continue;
            }
            let target = Point2::new(self.geom.node_x(col), self.geom.node_y(row));

            // Nearest unblocked seeds by L1 node distance.
            let mut near: Vec<(usize, &(usize, usize, f64))> = seed_nodes
                .iter()
                .map(|s| (s.0.abs_diff(row) + s.1.abs_diff(col), s))
                .collect();
            near.sort_by_key(|(d, _)| *d);
            let picked: Vec<&(usize, usize, f64)> = near
                .iter()
                .map(|(_, s)| *s)
                .filter(|s| {
                    !self.has_faults()
                        || !self.blocks(
                            target,
                            Point2::new(self.geom.node_x(s.1), self.geom.node_y(s.0)),
                        )
                })
                .take(want.max(3) * 2)
                .collect();

            if picked.len() < 3 {
                grid.data[idx] = zmin as f32;
                continue;
            }
            match plane_fit(
                &picked
                    .iter()
                    .map(|s| Point3::new(self.geom.node_x(s.1), self.geom.node_y(s.0), s.2))
                    .collect::<Vec<_>>(),
            ) {
                Some((a, b, c)) => {
                    grid.data[idx] = (a + b * target.x + c * target.y) as f32;
                }
                None => grid.data[idx] = zmin as f32,
            }
        }
        Ok(())
    }
}

/// Least-squares plane `z = a + b*x + c*y` through a point set.
///
/// Coordinates are centered before solving so large world offsets do not
/// wreck the conditioning. Returns None for degenerate (collinear) sets.
fn plane_fit(points: &[Point3]) -> Option<(f64, f64, f64)> {
    let n = points.len() as f64;
    let cx = points.iter().map(|p| p.x).sum::<f64>() / n;
    let cy = points.iter().map(|p| p.y).sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    let mut syy = 0.0;
    let mut sx = 0.0;
    let mut sy = 0.0;
    let mut sxz = 0.0;
    let mut syz = 0.0;
    let mut sz = 0.0;
    for p in points {
        let x = p.x - cx;
        let y = p.y - cy;
        sxx += x * x;
        sxy += x * y;
        syy += y * y;
        sx += x;
        sy += y;
        sxz += x * p.z;
        syz += y * p.z;
        sz += p.z;
    }

    let m = Matrix3::new(n, sx, sy, sx, sxx, sxy, sy, sxy, syy);
    let rhs = Vector3::new(sz, sxz, syz);
    let sol = m.lu().solve(&rhs)?;
    let (a0, b, c) = (sol[0], sol[1], sol[2]);
    // Un-center the constant term.
    Some((a0 - b * cx - c * cy, b, c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use surface_common::GridGeometry;

    fn geom_10() -> GridGeometry {
        GridGeometry::axis_aligned(10, 10, 0.0, 0.0, 9.0, 9.0).unwrap()
    }

    #[test]
    fn test_empty_faults_block_nothing() {
        let index = FaultIndex::new(&geom_10(), &[]).unwrap();
        assert!(!index.has_faults());
        assert!(!index.blocks(Point2::new(0.0, 0.0), Point2::new(9.0, 9.0)));
    }

    #[test]
    fn test_vertical_fault_crossings() {
        let fault = FaultLine::from_xy(&[4.5, 4.5], &[-1.0, 10.0], 7.0);
        let index = FaultIndex::new(&geom_10(), &[fault]).unwrap();
        // Every row line is crossed in column interval 4
        for row in 0..10 {
            let c = index.row_crossing(row, 4);
            assert!(c.is_crossed(), "row {} not crossed", row);
            assert!((c.first_pct - 0.5).abs() < 1e-9);
            assert_eq!(c.first_z, 7.0);
        }
        assert!(!index.row_crossing(3, 2).is_crossed());
    }

    #[test]
    fn test_blocks_across_fault() {
        let fault = FaultLine::from_xy(&[4.5, 4.5], &[-1.0, 10.0], 0.0);
        let index = FaultIndex::new(&geom_10(), &[fault]).unwrap();
        assert!(index.blocks(Point2::new(3.0, 5.0), Point2::new(6.0, 5.0)));
        assert!(!index.blocks(Point2::new(0.0, 5.0), Point2::new(3.0, 5.0)));
        assert!(!index.blocks(Point2::new(5.0, 5.0), Point2::new(8.0, 5.0)));
    }

    #[test]
    fn test_closest_table() {
        let fault = FaultLine::from_xy(&[4.5, 4.5], &[-1.0, 10.0], 0.0);
        let index = FaultIndex::new(&geom_10(), &[fault]).unwrap();
        assert_eq!(index.closest_at(5, 4), 0);
        assert_eq!(index.closest_at(5, 5), 0);
        assert_eq!(index.closest_at(5, 7), 2);
        assert_eq!(index.closest_at(5, 0), 4);
    }

    #[test]
    fn test_endpoint_snaps_to_node() {
        // Endpoint lands a hair away from node (5, 5); it must snap and
        // not double-count in both flanking intervals.
        let fault = FaultLine::from_xy(&[5.0005, 5.0005], &[-1.0, 10.0], 0.0);
        let index = FaultIndex::new(&geom_10(), &[fault]).unwrap();
        for row in 0..10 {
            let left = index.row_crossing(row, 4).count;
            let right = index.row_crossing(row, 5).count;
            assert_eq!(left + right, 1, "row {} counted {} + {}", row, left, right);
        }
    }

    #[test]
    fn test_interpolate_nulls_plain() {
        let geom = geom_10();
        let index = FaultIndex::new(&geom, &[]).unwrap();
        let mut grid = Grid::filled(NULL_VALUE, geom);
        // Seed two ends of the middle row
        grid.set(5, 0, 0.0);
        grid.set(5, 9, 9.0);
        index.interpolate_nulls(&mut grid).unwrap();
        assert!((grid.value(5, 3) - 3.0).abs() < 1e-4);
        // Nodes off the seeded row get a plane-fit estimate, never null
        assert!(!grid.is_null_at(0, 0));
    }

    #[test]
    fn test_interpolate_nulls_respects_fault() {
        let geom = geom_10();
        let fault = FaultLine::from_xy(&[4.5, 4.5], &[-1.0, 10.0], 0.0);
        let index = FaultIndex::new(&geom, &[fault]).unwrap();
        let mut grid = Grid::filled(NULL_VALUE, geom);
        for row in 0..10 {
            grid.set(row, 0, 0.0);
            grid.set(row, 9, 100.0);
        }
        index.interpolate_nulls(&mut grid).unwrap();
        // Left of the fault takes the left seed, not a blend
        assert!((grid.value(5, 3) - 0.0).abs() < 1e-4);
        assert!((grid.value(5, 6) - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_plane_fit_exact() {
        let pts = vec![
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 3.0),
            Point3::new(0.0, 1.0, 4.0),
            Point3::new(1.0, 1.0, 6.0),
        ];
        let (a, b, c) = plane_fit(&pts).unwrap();
        assert!((a - 1.0).abs() < 1e-9);
        assert!((b - 2.0).abs() < 1e-9);
        assert!((c - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotated_geometry_rejected() {
        let geom = GridGeometry::new(5, 5, 0.0, 0.0, 4.0, 4.0, 30.0).unwrap();
        assert!(FaultIndex::new(&geom, &[]).is_err());
    }
}

//! Cell-by-cell contour tracing over one grid.
//!
//! Classic 16-case marching over grid cells with linear edge
//! interpolation, extended with in-band null handling, fault blocking
//! and a per-level nudge so no contour passes exactly through a node.

use regrid::FaultIndex;
use surface_common::{is_null, Grid, Point2};

/// One raw crossing segment in world coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Segment {
    pub start: Point2,
    pub end: Point2,
}

/// An assembled polyline at one level.
#[derive(Debug, Clone)]
pub struct TracedLine {
    pub points: Vec<Point2>,
    pub closed: bool,
}

/// Edge crossings are clamped away from the nodes so assembled lines
/// never collapse onto a grid corner.
const EDGE_CLAMP: f64 = 0.001;

/// Extract all crossing segments of one level.
///
/// Cells with a null corner produce nothing. Node values within the
/// nudge epsilon of the level are pushed off it before classification,
/// so a contour never runs exactly through a cell corner. With a fault
/// index, any candidate segment crossing a fault is dropped; assembly
/// then naturally splits the polyline at the fault trace.
pub fn trace_level(
    grid: &Grid,
    level: f64,
    nudge: f64,
    faults: Option<&FaultIndex>,
) -> Vec<Segment> {
    let geom = &grid.geom;
    let mut segments = Vec::new();

    let adjust = |v: f32| -> f64 {
        let v = v as f64;
        if (v - level).abs() < nudge {
            level + nudge
        } else {
            v
        }
    };

    for row in 0..geom.nrow - 1 {
        let y0 = geom.node_y(row);
        let y1 = geom.node_y(row + 1);
        for col in 0..geom.ncol - 1 {
            let raw = [
                grid.value(row, col),
                grid.value(row, col + 1),
                grid.value(row + 1, col + 1),
                grid.value(row + 1, col),
            ];
            if raw.iter().any(|&v| is_null(v)) {
                continue;
            }
            let x0 = geom.node_x(col);
            let x1 = geom.node_x(col + 1);
            // Corner order: bl, br, tr, tl in world terms (y grows up)
            let bl = adjust(raw[0]);
            let br = adjust(raw[1]);
            let tr = adjust(raw[2]);
            let tl = adjust(raw[3]);

            let mut index = 0u8;
            if bl >= level {
                index |= 1;
            }
            if br >= level {
                index |= 2;
            }
            if tr >= level {
                index |= 4;
            }
            if tl >= level {
                index |= 8;
            }
            if index == 0 || index == 15 {
                continue;
            }

            let bottom = cross(x0, y0, x1, y0, bl, br, level);
            let right = cross(x1, y0, x1, y1, br, tr, level);
            let top = cross(x0, y1, x1, y1, tl, tr, level);
            let left = cross(x0, y0, x0, y1, bl, tl, level);

            let cell_segments: &[(Point2, Point2)] = match index {
                1 | 14 => &[(left, bottom)],
                2 | 13 => &[(bottom, right)],
                3 | 12 => &[(left, right)],
                4 | 11 => &[(right, top)],
                5 => &[(left, top), (bottom, right)], // saddle
                6 | 9 => &[(bottom, top)],
                7 | 8 => &[(left, top)],
                10 => &[(left, bottom), (right, top)], // saddle
                _ => &[],
            };

            for &(start, end) in cell_segments {
                if let Some(index) = faults {
                    if index.blocks(start, end) {
                        continue;
                    }
                }
                segments.push(Segment { start, end });
            }
        }
    }
    segments
}

/// Crossing point on one cell edge, clamped off the nodes.
fn cross(x1: f64, y1: f64, x2: f64, y2: f64, v1: f64, v2: f64, level: f64) -> Point2 {
    let t = if (v2 - v1).abs() < 1e-30 {
        0.5
    } else {
        ((level - v1) / (v2 - v1)).clamp(EDGE_CLAMP, 1.0 - EDGE_CLAMP)
    };
    Point2::new(x1 + t * (x2 - x1), y1 + t * (y2 - y1))
}

/// Connect raw segments into continuous polylines by endpoint matching.
pub fn connect_segments(segments: Vec<Segment>, join_tol: f64) -> Vec<TracedLine> {
    if segments.is_empty() {
        return Vec::new();
    }
    let tol2 = join_tol * join_tol;
    let close = |a: &Point2, b: &Point2| {
        let dx = a.x - b.x;
        let dy = a.y - b.y;
        dx * dx + dy * dy < tol2
    };

    let mut used = vec![false; segments.len()];
    let mut lines = Vec::new();

    for start_idx in 0..segments.len() {
        if used[start_idx] {
            continue;
        }
        used[start_idx] = true;
        let mut points = vec![segments[start_idx].start, segments[start_idx].end];

        // Grow forward from the tail, then backward from the head.
        for back in [false, true] {
            loop {
                let anchor = if back { points[0] } else { points[points.len() - 1] };
                let mut found = None;
                for (i, seg) in segments.iter().enumerate() {
                    if used[i] {
                        continue;
                    }
                    if close(&seg.start, &anchor) {
                        found = Some((i, seg.end));
                        break;
                    }
                    if close(&seg.end, &anchor) {
                        found = Some((i, seg.start));
                        break;
                    }
                }
                match found {
                    Some((i, next)) => {
                        used[i] = true;
                        if back {
                            points.insert(0, next);
                        } else {
                            points.push(next);
                        }
                    }
                    None => break,
                }
            }
        }

        let closed = points.len() > 3 && close(&points[0], &points[points.len() - 1]);
        if closed {
            points.pop();
        }
        if points.len() >= 2 {
            lines.push(TracedLine { points, closed });
        }
    }
    lines
}

/// Chaikin corner cutting: each pass replaces every segment with its
/// 25% and 75% points. Open lines keep their endpoints.
pub fn smooth_line(line: &TracedLine, passes: u32) -> TracedLine {
    if passes == 0 || line.points.len() < 3 {
        return line.clone();
    }
    let mut points = line.points.clone();
    for _ in 0..passes {
        let n = points.len();
        let mut next = Vec::with_capacity(n * 2);
        if !line.closed {
            next.push(points[0]);
        }
        let last_pair = if line.closed { n } else { n - 1 };
        for i in 0..last_pair {
            let p1 = points[i];
            let p2 = points[(i + 1) % n];
            next.push(Point2::new(
                0.75 * p1.x + 0.25 * p2.x,
                0.75 * p1.y + 0.25 * p2.y,
            ));
            next.push(Point2::new(
                0.25 * p1.x + 0.75 * p2.x,
                0.25 * p1.y + 0.75 * p2.y,
            ));
        }
        if !line.closed {
            next.push(points[n - 1]);
        }
        points = next;
    }
    TracedLine {
        points,
        closed: line.closed,
    }
}

/// Map the 0..=9 smoothing factor onto Chaikin passes.
pub fn smoothing_passes(factor: u32) -> u32 {
    match factor.min(9) {
        0 => 0,
        1..=3 => 1,
        4..=6 => 2,
        _ => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use surface_common::{GridGeometry, NULL_VALUE};

    fn ramp() -> Grid {
        let geom = GridGeometry::axis_aligned(5, 5, 0.0, 0.0, 4.0, 4.0).unwrap();
        let data = (0..25).map(|i| (i % 5) as f32).collect();
        Grid::new(data, geom).unwrap()
    }

    #[test]
    fn test_ramp_level_is_vertical_line() {
        let segments = trace_level(&ramp(), 2.5, 1e-9, None);
        assert_eq!(segments.len(), 4); // one per cell row
        for seg in &segments {
            assert!((seg.start.x - 2.5).abs() < 1e-9);
            assert!((seg.end.x - 2.5).abs() < 1e-9);
        }
    }

    #[test]
    fn test_null_cell_breaks_line() {
        let mut grid = ramp();
        grid.set(2, 2, NULL_VALUE);
        let segments = trace_level(&grid, 2.5, 1e-9, None);
        // Rows 1 and 2 of cells touch the null node and drop out
        assert_eq!(segments.len(), 2);
    }

    #[test]
    fn test_nudge_keeps_contour_off_nodes() {
        // Level exactly equal to a node column value
        let segments = trace_level(&ramp(), 2.0, 1e-7, None);
        assert!(!segments.is_empty());
        for seg in &segments {
            for p in [seg.start, seg.end] {
                // Crossing sits just off the node column
                assert!((p.x - 2.0).abs() > 1e-12);
                assert!((p.x - 2.0).abs() < 0.01);
            }
        }
    }

    #[test]
    fn test_connect_open_line() {
        let segments = trace_level(&ramp(), 2.5, 1e-9, None);
        let lines = connect_segments(segments, 1e-6);
        assert_eq!(lines.len(), 1);
        assert!(!lines[0].closed);
        assert_eq!(lines[0].points.len(), 5);
    }

    #[test]
    fn test_connect_closed_loop() {
        // Peak in the middle gives a closed ring around it
        let geom = GridGeometry::axis_aligned(5, 5, 0.0, 0.0, 4.0, 4.0).unwrap();
        let mut data = vec![0.0f32; 25];
        data[12] = 10.0;
        let grid = Grid::new(data, geom).unwrap();
        let lines = connect_segments(trace_level(&grid, 5.0, 1e-9, None), 1e-6);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].closed);
    }

    #[test]
    fn test_smooth_open_keeps_endpoints() {
        let line = TracedLine {
            points: vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 1.0),
                Point2::new(2.0, 0.0),
            ],
            closed: false,
        };
        let smoothed = smooth_line(&line, 2);
        assert_eq!(smoothed.points.first().unwrap(), &line.points[0]);
        assert_eq!(smoothed.points.last().unwrap(), &line.points[2]);
        assert!(smoothed.points.len() > line.points.len());
    }

    #[test]
    fn test_smoothing_passes_mapping() {
        assert_eq!(smoothing_passes(0), 0);
        assert_eq!(smoothing_passes(2), 1);
        assert_eq!(smoothing_passes(6), 2);
        assert_eq!(smoothing_passes(9), 3);
        assert_eq!(smoothing_passes(40), 3);
    }
}

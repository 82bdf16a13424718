//! Clipping polylines to a polygon region.

use crate::inside::{point_inside_clip, segment_intersection};
use surface_common::{ClipPolygon, Point2};

/// Which side of the region survives clipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipSide {
    Inside,
    Outside,
}

/// Clip one polyline against a clip region, keeping the runs on the
/// requested side. Each crossing of a region edge splits the line; the
/// crossing point itself belongs to both halves so kept runs end exactly
/// on the boundary.
pub fn clip_polyline(
    line: &[Point2],
    clip: &ClipPolygon,
    side: ClipSide,
    tol: f64,
) -> Vec<Vec<Point2>> {
    if line.len() < 2 || clip.is_empty() {
        return Vec::new();
    }

    let keep = |x: f64, y: f64| {
        let inside = point_inside_clip(clip, x, y, tol);
        match side {
            ClipSide::Inside => inside,
            ClipSide::Outside => !inside,
        }
    };

    let mut out: Vec<Vec<Point2>> = Vec::new();
    let mut run: Vec<Point2> = Vec::new();

    for w in line.windows(2) {
        let (a, b) = (w[0], w[1]);

        // Split the segment at every region-edge crossing.
        let mut cuts: Vec<(f64, Point2)> = Vec::new();
        for ring in clip.rings() {
            let n = ring.len();
            for i in 0..n {
                let e1 = ring.points[i];
                let e2 = ring.points[(i + 1) % n];
                if let Some((p, t)) = segment_intersection(a, b, e1, e2) {
                    if t > 1e-12 && t < 1.0 - 1e-12 {
                        cuts.push((t, p));
                    }
                }
            }
        }
        cuts.sort_by(|x, y| x.0.partial_cmp(&y.0).unwrap_or(std::cmp::Ordering::Equal));
        cuts.dedup_by(|x, y| (x.0 - y.0).abs() < 1e-12);

        // Classify each piece by its midpoint.
        let mut prev = a;
        let mut prev_t = 0.0;
        for (t, p) in cuts.into_iter().chain(std::iter::once((1.0, b))) {
            let mid_t = (prev_t + t) * 0.5;
            let mx = a.x + mid_t * (b.x - a.x);
            let my = a.y + mid_t * (b.y - a.y);
            if keep(mx, my) {
                if run.is_empty() {
                    run.push(prev);
                }
                run.push(p);
            } else if !run.is_empty() {
                out.push(std::mem::take(&mut run));
            }
            prev = p;
            prev_t = t;
        }
    }

    if run.len() >= 2 {
        out.push(run);
    }
    out.retain(|r| r.len() >= 2);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use surface_common::ClipPolygon;

    #[test]
    fn test_line_fully_inside() {
        let clip = ClipPolygon::rectangle(0.0, 0.0, 10.0, 10.0);
        let line = vec![Point2::new(1.0, 1.0), Point2::new(9.0, 9.0)];
        let kept = clip_polyline(&line, &clip, ClipSide::Inside, 1e-9);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].len(), 2);
    }

    #[test]
    fn test_line_crossing_boundary() {
        let clip = ClipPolygon::rectangle(0.0, 0.0, 10.0, 10.0);
        let line = vec![Point2::new(-5.0, 5.0), Point2::new(5.0, 5.0)];
        let kept = clip_polyline(&line, &clip, ClipSide::Inside, 1e-9);
        assert_eq!(kept.len(), 1);
        // Kept run starts at the boundary crossing.
        assert!((kept[0][0].x - 0.0).abs() < 1e-9);
        assert!((kept[0].last().unwrap().x - 5.0).abs() < 1e-9);

        let dropped = clip_polyline(&line, &clip, ClipSide::Outside, 1e-9);
        assert_eq!(dropped.len(), 1);
        assert!((dropped[0][0].x + 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_line_through_and_out() {
        let clip = ClipPolygon::rectangle(0.0, 0.0, 10.0, 10.0);
        let line = vec![Point2::new(-2.0, 5.0), Point2::new(12.0, 5.0)];
        let kept = clip_polyline(&line, &clip, ClipSide::Inside, 1e-9);
        assert_eq!(kept.len(), 1);
        let run = &kept[0];
        assert!((run[0].x - 0.0).abs() < 1e-9);
        assert!((run.last().unwrap().x - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_line_fully_outside() {
        let clip = ClipPolygon::rectangle(0.0, 0.0, 10.0, 10.0);
        let line = vec![Point2::new(20.0, 20.0), Point2::new(30.0, 20.0)];
        assert!(clip_polyline(&line, &clip, ClipSide::Inside, 1e-9).is_empty());
    }

    #[test]
    fn test_multiple_reentries() {
        // A zigzag that leaves and re-enters produces two kept runs.
        let clip = ClipPolygon::rectangle(0.0, 0.0, 10.0, 10.0);
        let line = vec![
            Point2::new(2.0, 2.0),
            Point2::new(2.0, 15.0),
            Point2::new(8.0, 15.0),
            Point2::new(8.0, 2.0),
        ];
        let kept = clip_polyline(&line, &clip, ClipSide::Inside, 1e-9);
        assert_eq!(kept.len(), 2);
    }
}

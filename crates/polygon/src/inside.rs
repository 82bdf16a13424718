//! Point location against polygon rings.

use surface_common::{ClipPolygon, Point2, Ring};

/// Where a point sits relative to a ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Containment {
    Inside,
    OnEdge,
    Outside,
}

/// Locate a point against one closed ring using the ray-crossing rule.
///
/// Points within `tol` of an edge report [`Containment::OnEdge`].
pub fn locate_point(ring: &Ring, x: f64, y: f64, tol: f64) -> Containment {
    let pts = &ring.points;
    let n = pts.len();
    if n < 3 {
        return Containment::Outside;
    }

    let tol2 = tol * tol;
    let mut crossings = 0u32;
    for i in 0..n {
        let a = pts[i];
        let b = pts[(i + 1) % n];

        if point_segment_dist2(x, y, a, b) <= tol2 {
            return Containment::OnEdge;
        }

        // Half-open span rule so a vertex on the ray counts once.
        let spans = (a.y > y) != (b.y > y);
        if spans {
            let t = (y - a.y) / (b.y - a.y);
            let xint = a.x + t * (b.x - a.x);
            if xint > x {
                crossings += 1;
            }
        }
    }

    if crossings % 2 == 1 {
        Containment::Inside
    } else {
        Containment::Outside
    }
}

/// True when a point is inside or on the edge of the ring.
pub fn point_inside_ring(ring: &Ring, x: f64, y: f64, tol: f64) -> bool {
    locate_point(ring, x, y, tol) != Containment::Outside
}

/// Even-odd test across every ring of a clip region. Holes flip the
/// parity, so a point inside an outer ring and inside one of its holes is
/// outside the region.
pub fn point_inside_clip(clip: &ClipPolygon, x: f64, y: f64, tol: f64) -> bool {
    let mut winds = 0u32;
    for ring in clip.rings() {
        match locate_point(ring, x, y, tol) {
            Containment::OnEdge => return true,
            Containment::Inside => winds += 1,
            Containment::Outside => {}
        }
    }
    winds % 2 == 1
}

/// Squared distance from a point to a segment.
fn point_segment_dist2(x: f64, y: f64, a: Point2, b: Point2) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len2 = dx * dx + dy * dy;
    let t = if len2 > 0.0 {
        (((x - a.x) * dx + (y - a.y) * dy) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let px = a.x + t * dx - x;
    let py = a.y + t * dy - y;
    px * px + py * py
}

/// Intersection of two segments, if they properly cross. Returns the
/// intersection point and the parameter along the first segment.
pub fn segment_intersection(
    a1: Point2,
    a2: Point2,
    b1: Point2,
    b2: Point2,
) -> Option<(Point2, f64)> {
    let d1x = a2.x - a1.x;
    let d1y = a2.y - a1.y;
    let d2x = b2.x - b1.x;
    let d2y = b2.y - b1.y;

    let denom = d1x * d2y - d1y * d2x;
    if denom.abs() < 1e-30 {
        return None;
    }

    let t = ((b1.x - a1.x) * d2y - (b1.y - a1.y) * d2x) / denom;
    let u = ((b1.x - a1.x) * d1y - (b1.y - a1.y) * d1x) / denom;

    if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
        return None;
    }
    Some((Point2::new(a1.x + t * d1x, a1.y + t * d1y), t))
}

//! Planar geometry primitives shared across the engine.

use serde::{Deserialize, Serialize};

/// A point in the surface plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point2) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A point with an attached scalar value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn xy(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// An inverted box that grows to fit the first point included.
    pub fn empty() -> Self {
        Self {
            min_x: f64::MAX,
            min_y: f64::MAX,
            max_x: f64::MIN,
            max_y: f64::MIN,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// True when no point has been included yet.
    pub fn is_degenerate(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Grow the box to include a point.
    pub fn include(&mut self, x: f64, y: f64) {
        if x < self.min_x {
            self.min_x = x;
        }
        if x > self.max_x {
            self.max_x = x;
        }
        if y < self.min_y {
            self.min_y = y;
        }
        if y > self.max_y {
            self.max_y = y;
        }
    }

    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Point2>,
    {
        let mut bbox = Self::empty();
        for p in points {
            bbox.include(p.x, p.y);
        }
        bbox
    }
}

/// A closed polygon ring. The last point implicitly connects back to
/// the first; callers must not duplicate the closing point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ring {
    pub points: Vec<Point2>,
}

impl Ring {
    pub fn new(points: Vec<Point2>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn bbox(&self) -> BoundingBox {
        BoundingBox::from_points(&self.points)
    }

    /// Signed area via the shoelace formula. Positive for
    /// counterclockwise winding.
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut sum = 0.0;
        for i in 0..n {
            let a = &self.points[i];
            let b = &self.points[(i + 1) % n];
            sum += a.x * b.y - b.x * a.y;
        }
        sum * 0.5
    }
}

/// One outer ring plus the hole rings nested directly under it.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonArea {
    pub outer: Ring,
    pub holes: Vec<Ring>,
}

impl PolygonArea {
    pub fn new(outer: Ring) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    /// Total vertex count across the outer ring and all holes.
    pub fn total_points(&self) -> usize {
        self.outer.len() + self.holes.iter().map(Ring::len).sum::<usize>()
    }

    pub fn rings(&self) -> impl Iterator<Item = &Ring> {
        std::iter::once(&self.outer).chain(self.holes.iter())
    }
}

/// A clip region: one or more polygons, each with optional holes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClipPolygon {
    pub areas: Vec<PolygonArea>,
}

impl ClipPolygon {
    pub fn new(areas: Vec<PolygonArea>) -> Self {
        Self { areas }
    }

    /// Single rectangle helper, mostly for tests and defaults.
    pub fn rectangle(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        let outer = Ring::new(vec![
            Point2::new(min_x, min_y),
            Point2::new(max_x, min_y),
            Point2::new(max_x, max_y),
            Point2::new(min_x, max_y),
        ]);
        Self {
            areas: vec![PolygonArea::new(outer)],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    pub fn total_points(&self) -> usize {
        self.areas.iter().map(PolygonArea::total_points).sum()
    }

    pub fn rings(&self) -> impl Iterator<Item = &Ring> {
        self.areas.iter().flat_map(PolygonArea::rings)
    }

    pub fn bbox(&self) -> BoundingBox {
        let mut bbox = BoundingBox::empty();
        for ring in self.rings() {
            for p in &ring.points {
                bbox.include(p.x, p.y);
            }
        }
        bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_include() {
        let mut bbox = BoundingBox::empty();
        assert!(bbox.is_degenerate());
        bbox.include(1.0, 2.0);
        bbox.include(-1.0, 5.0);
        assert_eq!(bbox.min_x, -1.0);
        assert_eq!(bbox.max_y, 5.0);
        assert!(!bbox.is_degenerate());
    }

    #[test]
    fn test_ring_signed_area() {
        // Counterclockwise unit square
        let ring = Ring::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ]);
        assert!((ring.signed_area() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_clip_polygon_rectangle() {
        let clip = ClipPolygon::rectangle(0.0, 0.0, 10.0, 5.0);
        assert_eq!(clip.total_points(), 4);
        let bbox = clip.bbox();
        assert_eq!(bbox.max_x, 10.0);
        assert_eq!(bbox.max_y, 5.0);
    }
}

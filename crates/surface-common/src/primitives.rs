//! Drawable primitives emitted by the engine.
//!
//! These are plain owned values; the display layer consumes them and drops
//! them when done.

use crate::geometry::{Point2, Point3};

/// Placement for one rendered label instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelSpot {
    pub x: f64,
    pub y: f64,
    /// Text baseline angle in radians, following the polyline direction.
    pub angle: f64,
}

/// One contour polyline at a single level.
#[derive(Debug, Clone, PartialEq)]
pub struct ContourLine {
    pub level: f32,
    pub major: bool,
    pub closed: bool,
    pub points: Vec<Point2>,
    /// Label text for this level, present when labeling is enabled for
    /// the line's class.
    pub label: Option<String>,
    /// Positions along the line where the label repeats.
    pub label_spots: Vec<LabelSpot>,
}

impl ContourLine {
    pub fn new(level: f32, major: bool, points: Vec<Point2>, closed: bool) -> Self {
        Self {
            level,
            major,
            closed,
            points,
            label: None,
            label_spots: Vec::new(),
        }
    }

    /// Total arc length of the polyline.
    pub fn arc_length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| w[0].distance(&w[1]))
            .sum()
    }
}

/// Node marker with optional value text.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeMarker {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub text: Option<String>,
}

/// A cell-edge or mesh-edge polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeLine {
    pub points: Vec<Point2>,
}

impl EdgeLine {
    pub fn new(points: Vec<Point2>) -> Self {
        Self { points }
    }
}

/// A fault trace polyline carrying z along the trace.
#[derive(Debug, Clone, PartialEq)]
pub struct FaultTrace {
    pub points: Vec<Point3>,
}

impl FaultTrace {
    pub fn new(points: Vec<Point3>) -> Self {
        Self { points }
    }
}

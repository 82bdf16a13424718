//! Fault polylines acting as interpolation barriers.

use crate::geometry::Point3;

/// An ordered polyline across which scalar interpolation must not blend.
/// The z values carry the surface elevation along the fault trace.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaultLine {
    pub points: Vec<Point3>,
}

impl FaultLine {
    pub fn new(points: Vec<Point3>) -> Self {
        Self { points }
    }

    /// Build from parallel coordinate slices with a constant z.
    pub fn from_xy(xs: &[f64], ys: &[f64], z: f64) -> Self {
        let points = xs
            .iter()
            .zip(ys.iter())
            .map(|(&x, &y)| Point3::new(x, y, z))
            .collect();
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.len() < 2
    }

    /// Consecutive point pairs.
    pub fn segments(&self) -> impl Iterator<Item = (&Point3, &Point3)> {
        self.points.iter().zip(self.points.iter().skip(1))
    }
}

/// Total point count across a set of fault lines.
pub fn total_fault_points(faults: &[FaultLine]) -> usize {
    faults.iter().map(FaultLine::len).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments() {
        let fault = FaultLine::from_xy(&[0.0, 1.0, 2.0], &[0.0, 0.5, 0.0], 10.0);
        assert_eq!(fault.len(), 3);
        assert_eq!(fault.segments().count(), 2);
        assert!(!fault.is_empty());
        assert!(FaultLine::from_xy(&[0.0], &[0.0], 0.0).is_empty());
    }

    #[test]
    fn test_total_points() {
        let faults = vec![
            FaultLine::from_xy(&[0.0, 1.0], &[0.0, 1.0], 0.0),
            FaultLine::from_xy(&[0.0, 1.0, 2.0], &[0.0, 1.0, 2.0], 0.0),
        ];
        assert_eq!(total_fault_points(&faults), 5);
    }
}

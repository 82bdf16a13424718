//! Integration tests for contour extraction.

use contour::contour_grid;
use regrid::FaultIndex;
use surface_common::{ContourCalcOptions, ContourDrawOptions, Point2};
use test_utils::{constant_grid, gradient_grid, horizontal_fault, peak_grid, with_nulls};

fn default_draw() -> ContourDrawOptions {
    ContourDrawOptions::default()
}

// ============================================================
// Level geometry
// ============================================================

#[test]
fn test_gradient_grid_vertical_isolines() {
    // value = col, so the x = 2.5 isoline is exact: crossings land at the
    // midpoint of every horizontal cell edge.
    let grid = gradient_grid(11, 11);
    let calc = ContourCalcOptions {
        interval: Some(1.0),
        base_value: 0.5,
        ..Default::default()
    };
    let lines = contour_grid(&grid, None, &calc, &default_draw()).unwrap();
    assert_eq!(lines.len(), 10); // levels 0.5 .. 9.5

    for line in &lines {
        assert!(!line.closed);
        for p in &line.points {
            assert!(
                (p.x - line.level as f64).abs() < 1e-6,
                "level {} crossed at x = {}",
                line.level,
                p.x
            );
        }
        // Spans the full grid height
        let ys: Vec<f64> = line.points.iter().map(|p| p.y).collect();
        let (lo, hi) = ys
            .iter()
            .fold((f64::MAX, f64::MIN), |(lo, hi), &y| (lo.min(y), hi.max(y)));
        assert!(lo < 0.5 && hi > 9.5);
    }
}

#[test]
fn test_peak_grid_closed_rings() {
    // Square peak: every level between the rim and the apex is a closed
    // ring around the center.
    let grid = peak_grid(21, 21, 100.0);
    let calc = ContourCalcOptions {
        interval: Some(2.0),
        base_value: 1.0,
        first_contour: Some(92.0),
        ..Default::default()
    };
    let lines = contour_grid(&grid, None, &calc, &default_draw()).unwrap();
    assert!(!lines.is_empty());
    for line in &lines {
        assert!(line.closed, "level {} should close", line.level);
        // Ring stays centered on the peak
        let cx: f64 = line.points.iter().map(|p| p.x).sum::<f64>() / line.points.len() as f64;
        assert!((cx - 10.0).abs() < 0.1);
    }
}

#[test]
fn test_constant_grid_yields_nothing() {
    let grid = constant_grid(10, 10, 7.0);
    let lines = contour_grid(
        &grid,
        None,
        &ContourCalcOptions::default(),
        &default_draw(),
    )
    .unwrap();
    assert!(lines.is_empty());
}

#[test]
fn test_null_holes_break_lines() {
    let grid = with_nulls(gradient_grid(11, 11), &[(5, 5)]);
    let calc = ContourCalcOptions {
        interval: Some(1.0),
        base_value: 0.5,
        ..Default::default()
    };
    let lines = contour_grid(&grid, None, &calc, &default_draw()).unwrap();
    // The x = 4.5 and x = 5.5 isolines pass through cells touching the
    // null node and split in two.
    let at = |level: f32| lines.iter().filter(|l| l.level == level).count();
    assert_eq!(at(4.5), 2);
    assert_eq!(at(5.5), 2);
    assert_eq!(at(1.5), 1);
}

// ============================================================
// Faults
// ============================================================

#[test]
fn test_fault_splits_crossing_lines() {
    // Vertical isolines crossing a horizontal fault break at the trace.
    let grid = gradient_grid(11, 11);
    let fault = horizontal_fault(5.25, 0.0, 10.0);
    let index = FaultIndex::new(&grid.geom, &[fault]).unwrap();
    let calc = ContourCalcOptions {
        interval: Some(1.0),
        base_value: 0.5,
        ..Default::default()
    };

    let unfaulted = contour_grid(&grid, None, &calc, &default_draw()).unwrap();
    let faulted = contour_grid(&grid, Some(&index), &calc, &default_draw()).unwrap();
    assert_eq!(faulted.len(), 2 * unfaulted.len());

    for line in &faulted {
        let crosses = line
            .points
            .windows(2)
            .any(|w| (w[0].y - 5.25) * (w[1].y - 5.25) < 0.0);
        assert!(!crosses, "level {} still crosses the fault", line.level);
    }
}

// ============================================================
// Labels
// ============================================================

#[test]
fn test_labels_attach_per_class() {
    let grid = gradient_grid(11, 11);
    let calc = ContourCalcOptions {
        interval: Some(1.0),
        base_value: 0.5,
        major_spacing: 2,
        ..Default::default()
    };
    let draw = ContourDrawOptions {
        major_label_size: 0.2,
        minor_label_size: 0.0,
        label_spacing: 3.0,
        ..Default::default()
    };
    let lines = contour_grid(&grid, None, &calc, &draw).unwrap();
    for line in &lines {
        if line.major {
            assert!(line.label.is_some());
            assert!(!line.label_spots.is_empty());
        } else {
            assert!(line.label.is_none());
            assert!(line.label_spots.is_empty());
        }
    }
}

#[test]
fn test_label_text_matches_level() {
    let grid = gradient_grid(11, 11);
    let calc = ContourCalcOptions {
        interval: Some(2.0),
        base_value: 1.0,
        ..Default::default()
    };
    let draw = ContourDrawOptions {
        major_label_size: 0.2,
        minor_label_size: 0.2,
        ..Default::default()
    };
    let lines = contour_grid(&grid, None, &calc, &draw).unwrap();
    let line = lines.iter().find(|l| l.level == 5.0).unwrap();
    assert_eq!(line.label.as_deref(), Some("5"));
}

// ============================================================
// Smoothing and log scale
// ============================================================

#[test]
fn test_smoothing_densifies_lines() {
    let grid = peak_grid(21, 21, 100.0);
    let calc = |smoothing| ContourCalcOptions {
        interval: Some(2.0),
        base_value: 1.0,
        first_contour: Some(95.0),
        smoothing,
        ..Default::default()
    };
    let crisp = contour_grid(&grid, None, &calc(0), &default_draw()).unwrap();
    let smooth = contour_grid(&grid, None, &calc(9), &default_draw()).unwrap();
    assert_eq!(crisp.len(), smooth.len());
    let count = |lines: &[surface_common::ContourLine]| -> usize {
        lines.iter().map(|l| l.points.len()).sum()
    };
    assert!(count(&smooth) > 2 * count(&crisp));
}

#[test]
fn test_smoothing_preserves_closure() {
    let grid = peak_grid(21, 21, 100.0);
    let calc = ContourCalcOptions {
        interval: Some(2.0),
        base_value: 1.0,
        first_contour: Some(95.0),
        smoothing: 5,
        ..Default::default()
    };
    let lines = contour_grid(&grid, None, &calc, &default_draw()).unwrap();
    assert!(lines.iter().all(|l| l.closed));
}

#[test]
fn test_log_scale_levels_are_display_values() {
    // Data spans 1..10^4; log10 tracing steps by 0.2 in log space and the
    // emitted levels are powers of 10^0.2.
    let mut grid = gradient_grid(11, 11);
    for v in &mut grid.data {
        *v = 10f32.powf(*v * 0.4);
    }
    let calc = ContourCalcOptions {
        log_base: Some(10.0),
        ..Default::default()
    };
    let lines = contour_grid(&grid, None, &calc, &default_draw()).unwrap();
    assert!(!lines.is_empty());
    for line in &lines {
        assert!(line.level >= 1.0 && line.level <= 1.1e4);
        let log = (line.level as f64).log10();
        let steps = log / 0.2;
        assert!(
            (steps - steps.round()).abs() < 1e-4,
            "level {} is off the log ladder",
            line.level
        );
    }
}

// ============================================================
// Line continuity
// ============================================================

#[test]
fn test_lines_have_no_jumps() {
    let grid = peak_grid(31, 31, 100.0);
    let calc = ContourCalcOptions {
        interval: Some(5.0),
        ..Default::default()
    };
    let lines = contour_grid(&grid, None, &calc, &default_draw()).unwrap();
    let max_step = 2.0 * std::f64::consts::SQRT_2; // at most a cell diagonal
    for line in &lines {
        let pairs: Vec<(Point2, Point2)> = line
            .points
            .windows(2)
            .map(|w| (w[0], w[1]))
            .collect();
        for (a, b) in pairs {
            assert!(
                a.distance(&b) < max_step,
                "jump of {} in level {}",
                a.distance(&b),
                line.level
            );
        }
    }
}

//! Integration tests for polygon clipping and masking.

use polygon::{build_clip_mask, clip_polyline, nest_rings, point_inside_clip, ClipSide};
use surface_common::{ClipPolygon, Point2, Ring};

fn square(cx: f64, cy: f64, half: f64) -> Ring {
    Ring::new(vec![
        Point2::new(cx - half, cy - half),
        Point2::new(cx + half, cy - half),
        Point2::new(cx + half, cy + half),
        Point2::new(cx - half, cy + half),
    ])
}

// ============================================================================
// Nesting + point location working together
// ============================================================================

#[test]
fn test_nested_region_point_tests() {
    let clip = nest_rings(vec![square(0.0, 0.0, 10.0), square(0.0, 0.0, 3.0)], 1e-9).unwrap();
    assert_eq!(clip.areas.len(), 1);
    assert_eq!(clip.areas[0].holes.len(), 1);

    assert!(point_inside_clip(&clip, 8.0, 0.0, 1e-9));
    assert!(!point_inside_clip(&clip, 0.0, 0.0, 1e-9)); // in the hole
    assert!(!point_inside_clip(&clip, 20.0, 0.0, 1e-9));
}

// ============================================================================
// Clipping against a region with a hole
// ============================================================================

#[test]
fn test_clip_line_across_hole() {
    let clip = nest_rings(vec![square(0.0, 0.0, 10.0), square(0.0, 0.0, 3.0)], 1e-9).unwrap();
    // Horizontal line through the middle crosses the hole.
    let line = vec![Point2::new(-9.0, 0.5), Point2::new(9.0, 0.5)];
    let kept = clip_polyline(&line, &clip, ClipSide::Inside, 1e-9);
    assert_eq!(kept.len(), 2);
    // Left piece ends at the hole's left edge.
    assert!((kept[0].last().unwrap().x + 3.0).abs() < 1e-9);
    // Right piece starts at the hole's right edge.
    assert!((kept[1][0].x - 3.0).abs() < 1e-9);
}

// ============================================================================
// Mask and clip agreement
// ============================================================================

#[test]
fn test_mask_agrees_with_point_tests() {
    let clip = nest_rings(vec![square(5.0, 5.0, 4.0), square(5.0, 5.0, 1.5)], 1e-9).unwrap();
    let mask = build_clip_mask(&clip, 0.0, 0.0, 10.0, 10.0, 41, 41).unwrap();
    let xspace = 10.0 / 40.0;
    for row in (0..41).step_by(4) {
        for col in (0..41).step_by(4) {
            let x = col as f64 * xspace;
            let y = row as f64 * xspace;
            // Skip points near ring edges where raster rounding differs.
            let near_edge = (x - 1.0).abs() < 0.3
                || (x - 9.0).abs() < 0.3
                || (y - 1.0).abs() < 0.3
                || (y - 9.0).abs() < 0.3
                || (x - 3.5).abs() < 0.3
                || (x - 6.5).abs() < 0.3
                || (y - 3.5).abs() < 0.3
                || (y - 6.5).abs() < 0.3;
            if near_edge {
                continue;
            }
            assert_eq!(
                mask.inside(row, col),
                point_inside_clip(&clip, x, y, 1e-9),
                "disagreement at ({}, {})",
                x,
                y
            );
        }
    }
}

#[test]
fn test_empty_clip_produces_nothing() {
    let clip = ClipPolygon::default();
    let line = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)];
    assert!(clip_polyline(&line, &clip, ClipSide::Inside, 1e-9).is_empty());
}

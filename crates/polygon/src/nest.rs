//! Hole nesting: grouping loose rings into polygons with one level of
//! holes each.

use crate::inside::point_inside_ring;
use surface_common::{ClipPolygon, PolygonArea, Ring};

/// Nest loose rings into polygons.
///
/// Repeatedly finds a root ring that is inside no other remaining ring,
/// attaches as its holes every ring that is inside the root but inside no
/// other remaining ring, then removes the group and continues. Deeper
/// nesting levels (an island inside a hole) start a new polygon of their
/// own on a later pass.
///
/// Rings that are degenerate (fewer than 3 points) are dropped. Returns
/// None when nothing nestable remains, or when no root can be found
/// (identical duplicated rings).
pub fn nest_rings(rings: Vec<Ring>, tol: f64) -> Option<ClipPolygon> {
    let mut stack: Vec<Ring> = rings.into_iter().filter(|r| r.len() >= 3).collect();
    if stack.is_empty() {
        return None;
    }
    if stack.len() == 1 {
        return Some(ClipPolygon::new(vec![PolygonArea::new(stack.remove(0))]));
    }

    let mut areas = Vec::new();
    while !stack.is_empty() {
        let root_idx = find_root(&stack, tol)?;
        let root = stack.remove(root_idx);

        // Holes of this root: inside it, but inside no other remaining
        // ring. A ring nested deeper (inside another candidate) stays on
        // the stack and roots its own polygon on a later pass.
        let candidates = std::mem::take(&mut stack);
        let is_hole: Vec<bool> = (0..candidates.len())
            .map(|i| {
                ring_inside_ring(&candidates[i], &root, tol)
                    && !candidates
                        .iter()
                        .enumerate()
                        .any(|(j, other)| j != i && ring_inside_ring(&candidates[i], other, tol))
            })
            .collect();

        let mut area = PolygonArea::new(root);
        for (candidate, hole) in candidates.into_iter().zip(is_hole) {
            if hole {
                area.holes.push(candidate);
            } else {
                stack.push(candidate);
            }
        }
        areas.push(area);
    }

    Some(ClipPolygon::new(areas))
}

/// Index of a ring not inside any other ring on the stack.
fn find_root(stack: &[Ring], tol: f64) -> Option<usize> {
    'outer: for (i, ring) in stack.iter().enumerate() {
        for (j, other) in stack.iter().enumerate() {
            if i != j && ring_inside_ring(ring, other, tol) {
                continue 'outer;
            }
        }
        return Some(i);
    }
    None
}

/// True when `inner` lies inside `outer`. Tests vertices until one lands
/// clearly in or out; a vertex on the edge is not decisive.
fn ring_inside_ring(inner: &Ring, outer: &Ring, tol: f64) -> bool {
    use crate::inside::{locate_point, Containment};
    for p in &inner.points {
        match locate_point(outer, p.x, p.y, tol) {
            Containment::Inside => return true,
            Containment::Outside => return false,
            Containment::OnEdge => {}
        }
    }
    // Every vertex on the edge: treat as inside, matching the host
    // convention for shared boundaries.
    inner
        .points
        .first()
        .map(|p| point_inside_ring(outer, p.x, p.y, tol))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use surface_common::Point2;

    fn square(cx: f64, cy: f64, half: f64) -> Ring {
        Ring::new(vec![
            Point2::new(cx - half, cy - half),
            Point2::new(cx + half, cy - half),
            Point2::new(cx + half, cy + half),
            Point2::new(cx - half, cy + half),
        ])
    }

    #[test]
    fn test_single_ring_passes_through() {
        let clip = nest_rings(vec![square(0.0, 0.0, 5.0)], 1e-9).unwrap();
        assert_eq!(clip.areas.len(), 1);
        assert!(clip.areas[0].holes.is_empty());
    }

    #[test]
    fn test_hole_nests_under_outer() {
        let clip = nest_rings(vec![square(0.0, 0.0, 2.0), square(0.0, 0.0, 10.0)], 1e-9).unwrap();
        assert_eq!(clip.areas.len(), 1);
        assert_eq!(clip.areas[0].holes.len(), 1);
        assert_eq!(clip.areas[0].outer.len(), 4);
        assert!((clip.areas[0].outer.signed_area().abs() - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_disjoint_rings_become_separate_areas() {
        let clip = nest_rings(vec![square(0.0, 0.0, 1.0), square(10.0, 0.0, 1.0)], 1e-9).unwrap();
        assert_eq!(clip.areas.len(), 2);
        assert!(clip.areas.iter().all(|a| a.holes.is_empty()));
    }

    #[test]
    fn test_island_inside_hole() {
        // outer > hole > island: island starts its own polygon.
        let clip = nest_rings(
            vec![
                square(0.0, 0.0, 10.0),
                square(0.0, 0.0, 5.0),
                square(0.0, 0.0, 1.0),
            ],
            1e-9,
        )
        .unwrap();
        assert_eq!(clip.areas.len(), 2);
        let with_hole = clip.areas.iter().find(|a| !a.holes.is_empty()).unwrap();
        assert!((with_hole.outer.signed_area().abs() - 400.0).abs() < 1e-9);
        assert_eq!(with_hole.holes.len(), 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(nest_rings(Vec::new(), 1e-9).is_none());
    }
}

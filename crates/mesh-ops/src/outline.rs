//! Mesh boundary outlining.
//!
//! The boundary of a trimesh is the set of edges used by exactly one
//! triangle. Chaining those edges end to end yields closed rings: the
//! outer outline plus any interior holes. Disconnected mesh pieces give
//! several ring groups; the group with the most points is the dominant
//! boundary used for clipping.

use polygon::nest_rings;
use surface_common::{ClipPolygon, Point2, Point3, Ring, SurfaceResult, TriMesh};
use tracing::{debug, warn};

/// One closed boundary ring with its source topology: node ids and full
/// (x, y, z) positions, parallel vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryRing {
    pub nodes: Vec<u32>,
    pub points: Vec<Point3>,
}

impl BoundaryRing {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop z, keeping the planar ring.
    pub fn to_ring(&self) -> Ring {
        Ring::new(
            self.points
                .iter()
                .map(|p| Point2::new(p.x, p.y))
                .collect(),
        )
    }
}

/// Walk every non-deleted boundary edge into closed rings.
///
/// Edges that cannot be chained into a closed loop (dangling topology)
/// are dropped. Returns an empty vector when the mesh has no boundary
/// edges at all.
pub fn boundary_rings(mesh: &TriMesh) -> Vec<BoundaryRing> {
    let boundary: Vec<usize> = mesh
        .edges
        .iter()
        .enumerate()
        .filter(|(_, e)| e.is_boundary() && !e.is_deleted())
        .map(|(i, _)| i)
        .collect();
    if boundary.is_empty() {
        return Vec::new();
    }

    let mut used = vec![false; mesh.edges.len()];
    let mut rings = Vec::new();

    for &start in &boundary {
        if used[start] {
            continue;
        }
        used[start] = true;
        let first = mesh.edges[start].node1;
        let mut current = mesh.edges[start].node2;
        let mut chain = vec![first, current];

        // Follow boundary edges from node to node until the loop closes
        // or no continuation exists.
        loop {
            if current == first {
                chain.pop(); // the closing node repeats the first
                break;
            }
            let next_edge = boundary.iter().copied().find_map(|e| {
                if used[e] {
                    return None;
                }
                mesh.edges[e].other_node(current).map(|next| (e, next))
            });
            match next_edge {
                Some((e, next)) => {
                    used[e] = true;
                    current = next;
                    chain.push(current);
                }
                None => {
                    chain.clear(); // open chain, not a ring
                    break;
                }
            }
        }

        if chain.len() >= 3 {
            let points = chain
                .iter()
                .map(|&id| {
                    let n = &mesh.nodes[id as usize];
                    Point3::new(n.x, n.y, n.z)
                })
                .collect();
            rings.push(BoundaryRing {
                nodes: chain,
                points,
            });
        }
    }

    rings
}

/// Outline a mesh as a nested clip polygon.
///
/// Holes are nested under their enclosing outer rings. When the rings
/// form more than one polygon (disconnected mesh pieces), the polygon
/// with the most total points moves to the front as the dominant
/// boundary. Soft failure: `Ok(None)` when no closable ring exists, so
/// callers fall back to unclipped data.
pub fn outline_mesh(mesh: &TriMesh) -> SurfaceResult<Option<ClipPolygon>> {
    let rings = boundary_rings(mesh);
    if rings.is_empty() {
        warn!("mesh has no closable boundary ring");
        return Ok(None);
    }

    let bbox = mesh.bbox();
    let tol = bbox
        .map(|b| (b.width() + b.height()) * 1e-9)
        .unwrap_or(1e-9);

    let planar: Vec<Ring> = rings.iter().map(BoundaryRing::to_ring).collect();
    let Some(mut clip) = nest_rings(planar, tol) else {
        warn!("boundary rings could not be nested");
        return Ok(None);
    };

    if clip.areas.len() > 1 {
        let dominant = clip
            .areas
            .iter()
            .enumerate()
            .max_by_key(|(_, a)| a.total_points())
            .map(|(i, _)| i)
            .unwrap_or(0);
        clip.areas.swap(0, dominant);
        debug!(
            areas = clip.areas.len(),
            dominant_points = clip.areas[0].total_points(),
            "mesh outline has disjoint pieces"
        );
    }

    Ok(Some(clip))
}

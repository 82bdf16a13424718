//! Node, edge and fault-line primitive extraction from master data.

use contour::labels::format_level;
use surface_common::{EdgeLine, FaultLine, FaultTrace, Grid, NodeMarker, Point2, TriMesh};

/// Node markers for every non-null grid node, optionally labeled with
/// the node value (decimals follow the data range magnitude).
pub fn grid_node_markers(grid: &Grid, with_text: bool) -> Vec<NodeMarker> {
    let range = grid
        .value_range()
        .map(|(lo, hi)| (hi - lo) as f64)
        .unwrap_or(0.0);
    let geom = &grid.geom;
    let mut out = Vec::new();
    for row in 0..geom.nrow {
        for col in 0..geom.ncol {
            if grid.is_null_at(row, col) {
                continue;
            }
            let z = grid.value(row, col) as f64;
            let p = geom.rotate_point(geom.node_x(col), geom.node_y(row));
            out.push(NodeMarker {
                x: p.x,
                y: p.y,
                z,
                text: with_text.then(|| format_level(z, range, None)),
            });
        }
    }
    out
}

/// Node markers for every non-deleted mesh node.
pub fn mesh_node_markers(mesh: &TriMesh, with_text: bool) -> Vec<NodeMarker> {
    let range = mesh.z_range().map(|(lo, hi)| hi - lo).unwrap_or(0.0);
    mesh.nodes
        .iter()
        .filter(|n| !n.is_deleted())
        .map(|n| NodeMarker {
            x: n.x,
            y: n.y,
            z: n.z,
            text: with_text.then(|| format_level(n.z, range, None)),
        })
        .collect()
}

/// Row and column polylines along the grid lattice. A null node ends the
/// current run; single-node runs are dropped.
pub fn grid_cell_edges(grid: &Grid) -> Vec<EdgeLine> {
    let geom = &grid.geom;
    let mut out = Vec::new();
    let mut run: Vec<Point2> = Vec::new();

    for row in 0..geom.nrow {
        for col in 0..geom.ncol {
            if grid.is_null_at(row, col) {
                flush(&mut run, &mut out);
            } else {
                run.push(geom.rotate_point(geom.node_x(col), geom.node_y(row)));
            }
        }
        flush(&mut run, &mut out);
    }
    for col in 0..geom.ncol {
        for row in 0..geom.nrow {
            if grid.is_null_at(row, col) {
                flush(&mut run, &mut out);
            } else {
                run.push(geom.rotate_point(geom.node_x(col), geom.node_y(row)));
            }
        }
        flush(&mut run, &mut out);
    }
    out
}

fn flush(run: &mut Vec<Point2>, out: &mut Vec<EdgeLine>) {
    if run.len() >= 2 {
        out.push(EdgeLine::new(std::mem::take(run)));
    } else {
        run.clear();
    }
}

/// One two-point polyline per non-deleted mesh edge with live endpoints.
pub fn mesh_cell_edges(mesh: &TriMesh) -> Vec<EdgeLine> {
    mesh.edges
        .iter()
        .filter(|e| !e.is_deleted())
        .filter_map(|e| {
            let a = &mesh.nodes[e.node1 as usize];
            let b = &mesh.nodes[e.node2 as usize];
            if a.is_deleted() || b.is_deleted() {
                return None;
            }
            Some(EdgeLine::new(vec![
                Point2::new(a.x, a.y),
                Point2::new(b.x, b.y),
            ]))
        })
        .collect()
}

/// Stored fault polylines as drawable traces.
pub fn grid_fault_traces(faults: &[FaultLine]) -> Vec<FaultTrace> {
    faults
        .iter()
        .filter(|f| !f.is_empty())
        .map(|f| FaultTrace::new(f.points.clone()))
        .collect()
}

/// Fault traces of a mesh: fault-flagged edges, excluding deleted edges
/// and zero-discontinuity constraints, chained into polylines by shared
/// endpoints.
pub fn mesh_fault_traces(mesh: &TriMesh) -> Vec<FaultTrace> {
    let fault_edges: Vec<usize> = mesh
        .edges
        .iter()
        .enumerate()
        .filter(|(_, e)| !e.is_deleted() && e.is_on_fault() && !e.is_zero_discontinuity())
        .map(|(i, _)| i)
        .collect();

    let mut used = vec![false; fault_edges.len()];
    let mut traces = Vec::new();

    for start in 0..fault_edges.len() {
        if used[start] {
            continue;
        }
        used[start] = true;
        let edge = &mesh.edges[fault_edges[start]];
        let mut chain = vec![edge.node1, edge.node2];

        // Extend from the tail, then from the head.
        for back in [false, true] {
            loop {
                let anchor = if back { chain[0] } else { chain[chain.len() - 1] };
                let mut found = None;
                for (slot, &edge_id) in fault_edges.iter().enumerate() {
                    if used[slot] {
                        continue;
                    }
                    if let Some(next) = mesh.edges[edge_id].other_node(anchor) {
                        found = Some((slot, next));
                        break;
                    }
                }
                match found {
                    Some((slot, next)) => {
                        used[slot] = true;
                        if back {
                            chain.insert(0, next);
                        } else {
                            chain.push(next);
                        }
                    }
                    None => break,
                }
            }
        }

        let points = chain
            .iter()
            .map(|&id| {
                let n = &mesh.nodes[id as usize];
                surface_common::Point3::new(n.x, n.y, n.z)
            })
            .collect();
        traces.push(FaultTrace::new(points));
    }
    traces
}

#[cfg(test)]
mod tests {
    use super::*;
    use surface_common::{mesh_flags, NULL_VALUE};
    use test_utils::{gradient_grid, quad_mesh, with_nulls};

    #[test]
    fn test_grid_markers_skip_nulls() {
        let grid = with_nulls(gradient_grid(4, 4), &[(1, 1), (2, 2)]);
        let markers = grid_node_markers(&grid, true);
        assert_eq!(markers.len(), 14);
        // Range is 3, so two decimals, zeros trimmed
        assert_eq!(markers[1].text.as_deref(), Some("1"));
    }

    #[test]
    fn test_grid_edges_split_at_null() {
        let grid = with_nulls(gradient_grid(4, 4), &[(0, 2)]);
        let edges = grid_cell_edges(&grid);
        // Row 0 loses its tail past the null: [0,1] survives as one run,
        // node 3 alone is dropped. 3 full rows + 1 partial + 4 columns
        // with one 3-node column.
        let row0: Vec<_> = edges
            .iter()
            .filter(|e| e.points.iter().all(|p| p.y == 0.0))
            .collect();
        assert_eq!(row0.len(), 1);
        assert_eq!(row0[0].points.len(), 2);
        assert_eq!(edges.len(), 8);
    }

    #[test]
    fn test_mesh_fault_chaining() {
        let mut mesh = quad_mesh();
        // Edges 0 (0-1) and 1 (1-2) share node 1 and chain into one trace
        mesh.edges[0].flag |= mesh_flags::EDGE_ON_FAULT;
        mesh.edges[1].flag |= mesh_flags::EDGE_ON_FAULT;
        // Zero-discontinuity constraint stays out
        mesh.edges[3].flag |=
            mesh_flags::EDGE_ON_FAULT | mesh_flags::EDGE_ZERO_DISCONTINUITY;

        let traces = mesh_fault_traces(&mesh);
        assert_eq!(traces.len(), 1);
        assert_eq!(traces[0].points.len(), 3);
    }

    #[test]
    fn test_grid_fault_traces_skip_degenerate() {
        let faults = vec![
            FaultLine::from_xy(&[0.0, 1.0], &[0.0, 1.0], 5.0),
            FaultLine::from_xy(&[2.0], &[2.0], 0.0),
        ];
        let traces = grid_fault_traces(&faults);
        assert_eq!(traces.len(), 1);
        assert_eq!(traces[0].points[0].z, 5.0);
    }

    #[test]
    fn test_all_null_grid_no_primitives() {
        let geom = gradient_grid(3, 3).geom;
        let grid = Grid::filled(NULL_VALUE, geom);
        assert!(grid_node_markers(&grid, false).is_empty());
        assert!(grid_cell_edges(&grid).is_empty());
    }
}

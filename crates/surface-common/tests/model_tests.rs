//! Integration tests for the shared surface models.

use surface_common::{
    mesh_flags, ColorBand, ContourCalcOptions, Grid, GridGeometry, MeshEdge, MeshNode,
    MeshTriangle, Rgba, SurfaceProperties, ThicknessMode, TriMesh, NULL_VALUE,
};

// ============================================================================
// Grid geometry tests
// ============================================================================

#[test]
fn test_grid_geometry_spacing() {
    let geom = GridGeometry::axis_aligned(11, 21, 0.0, 0.0, 100.0, 50.0).unwrap();
    assert!((geom.xspace() - 10.0).abs() < 1e-12);
    assert!((geom.yspace() - 2.5).abs() < 1e-12);
    assert_eq!(geom.len(), 231);
}

#[test]
fn test_rotated_bbox_covers_corners() {
    let geom = GridGeometry::new(5, 5, 10.0, 10.0, 20.0, 10.0, 45.0).unwrap();
    let bbox = geom.bbox();
    for corner in geom.corners() {
        assert!(bbox.contains(corner.x, corner.y));
    }
    // A 45 degree rotation pushes the width corner up
    let corners = geom.corners();
    assert!(corners[1].y > 10.0);
}

#[test]
fn test_unrotated_rotate_point_is_identity() {
    let geom = GridGeometry::axis_aligned(5, 5, 2.0, 3.0, 10.0, 10.0).unwrap();
    let p = geom.rotate_point(7.0, 8.0);
    assert_eq!(p.x, 7.0);
    assert_eq!(p.y, 8.0);
}

// ============================================================================
// Grid data tests
// ============================================================================

#[test]
fn test_grid_scale_preserves_nulls() {
    let geom = GridGeometry::axis_aligned(2, 2, 0.0, 0.0, 1.0, 1.0).unwrap();
    let mut grid = Grid::new(vec![1.0, 2.0, NULL_VALUE, 4.0], geom).unwrap();
    grid.scale_values(3.0);
    assert_eq!(grid.data[0], 3.0);
    assert_eq!(grid.data[2], NULL_VALUE);
    assert_eq!(grid.data[3], 12.0);
}

// ============================================================================
// TriMesh tests
// ============================================================================

fn two_triangle_mesh() -> TriMesh {
    let nodes = vec![
        MeshNode::new(0.0, 0.0, 10.0),
        MeshNode::new(4.0, 0.0, 20.0),
        MeshNode::new(4.0, 4.0, 30.0),
        MeshNode::new(0.0, 4.0, 40.0),
    ];
    let edges = vec![
        MeshEdge::new(0, 1, Some(0), None),
        MeshEdge::new(1, 2, Some(0), None),
        MeshEdge::new(0, 2, Some(0), Some(1)),
        MeshEdge::new(2, 3, Some(1), None),
        MeshEdge::new(3, 0, Some(1), None),
    ];
    let tris = vec![MeshTriangle::new(0, 1, 2), MeshTriangle::new(2, 3, 4)];
    TriMesh::new(nodes, edges, tris).unwrap()
}

#[test]
fn test_mesh_bbox_and_range() {
    let mesh = two_triangle_mesh();
    let bbox = mesh.bbox().unwrap();
    assert_eq!(bbox.min_x, 0.0);
    assert_eq!(bbox.max_x, 4.0);
    assert_eq!(mesh.z_range(), Some((10.0, 40.0)));
}

#[test]
fn test_deleted_nodes_drop_out_of_bbox() {
    let mut mesh = two_triangle_mesh();
    mesh.nodes[2].flag |= mesh_flags::DELETED;
    assert_eq!(mesh.active_node_count(), 3);
    assert_eq!(mesh.z_range(), Some((10.0, 40.0)));
}

#[test]
fn test_mesh_rejects_dangling_triangle() {
    let nodes = vec![
        MeshNode::new(0.0, 0.0, 0.0),
        MeshNode::new(1.0, 0.0, 0.0),
        MeshNode::new(0.0, 1.0, 0.0),
    ];
    let edges = vec![
        MeshEdge::new(0, 1, Some(0), None),
        MeshEdge::new(1, 2, Some(0), None),
        MeshEdge::new(2, 0, Some(0), None),
    ];
    let tris = vec![MeshTriangle::new(0, 1, 7)];
    assert!(TriMesh::new(nodes, edges, tris).is_err());
}

// ============================================================================
// Properties round trip
// ============================================================================

#[test]
fn test_properties_serde_round_trip() {
    let props = SurfaceProperties {
        contour_interval: Some(25.0),
        thickness: ThicknessMode::Positive,
        bands: vec![ColorBand::new(0.0, 50.0, Rgba::opaque(10, 20, 30))],
        z_scale: 1.5,
        ..Default::default()
    };
    let json = serde_json::to_string(&props).unwrap();
    let back: SurfaceProperties = serde_json::from_str(&json).unwrap();
    assert_eq!(back, props);
}

#[test]
fn test_calc_options_defaults_from_empty_json() {
    let opts: ContourCalcOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(opts.interval, None);
    assert_eq!(opts.major_spacing, 5);
    assert_eq!(opts.thickness, ThicknessMode::None);
}

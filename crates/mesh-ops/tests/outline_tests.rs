//! Integration tests for mesh outlining and smoothing.

use mesh_ops::{outline_mesh, smooth_mesh};
use surface_common::{MeshEdge, MeshNode, MeshTriangle, TriMesh};
use test_utils::{fan_mesh, quad_mesh};

#[test]
fn test_quad_mesh_outline() {
    let clip = outline_mesh(&quad_mesh()).unwrap().unwrap();
    assert_eq!(clip.areas.len(), 1);
    assert_eq!(clip.areas[0].outer.len(), 4);
    assert!((clip.areas[0].outer.signed_area().abs() - 1.0).abs() < 1e-12);
}

#[test]
fn test_fan_mesh_outline_is_rim() {
    let clip = outline_mesh(&fan_mesh(8, 3.0, 5.0, 0.0)).unwrap().unwrap();
    assert_eq!(clip.areas.len(), 1);
    // The rim has 8 nodes; the center node is interior
    assert_eq!(clip.areas[0].outer.len(), 8);
}

#[test]
fn test_disjoint_pieces_pick_dominant() {
    // A 4-node quad far from an 8-node fan: the fan's rim has more
    // points and must lead the outline.
    let quad = quad_mesh();
    let fan = fan_mesh(8, 3.0, 5.0, 0.0);
    let base = quad.nodes.len() as u32;
    let ebase = quad.edges.len() as u32;
    let tbase = quad.triangles.len() as u32;

    let mut nodes = quad.nodes.clone();
    nodes.extend(fan.nodes.iter().map(|n| {
        let mut n = *n;
        n.x += 100.0;
        n
    }));
    let mut edges = quad.edges.clone();
    edges.extend(fan.edges.iter().map(|e| {
        MeshEdge {
            node1: e.node1 + base,
            node2: e.node2 + base,
            tri1: e.tri1.map(|t| t + tbase),
            tri2: e.tri2.map(|t| t + tbase),
            flag: e.flag,
        }
    }));
    let mut triangles = quad.triangles.clone();
    triangles.extend(fan.triangles.iter().map(|t| {
        MeshTriangle::new(t.edge1 + ebase, t.edge2 + ebase, t.edge3 + ebase)
    }));
    let mesh = TriMesh::new(nodes, edges, triangles).unwrap();

    let clip = outline_mesh(&mesh).unwrap().unwrap();
    assert_eq!(clip.areas.len(), 2);
    assert_eq!(clip.areas[0].outer.len(), 8, "dominant piece must lead");
    assert_eq!(clip.areas[1].outer.len(), 4);
}

#[test]
fn test_smoothed_mesh_keeps_outline() {
    let mesh = fan_mesh(6, 2.0, 8.0, 1.0);
    let smoothed = smooth_mesh(&mesh, 7);
    let a = outline_mesh(&mesh).unwrap().unwrap();
    let b = outline_mesh(&smoothed).unwrap().unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_single_triangle_mesh() {
    let nodes = vec![
        MeshNode::new(0.0, 0.0, 0.0),
        MeshNode::new(2.0, 0.0, 0.0),
        MeshNode::new(0.0, 2.0, 0.0),
    ];
    let edges = vec![
        MeshEdge::new(0, 1, Some(0), None),
        MeshEdge::new(1, 2, Some(0), None),
        MeshEdge::new(2, 0, Some(0), None),
    ];
    let triangles = vec![MeshTriangle::new(0, 1, 2)];
    let mesh = TriMesh::new(nodes, edges, triangles).unwrap();
    let clip = outline_mesh(&mesh).unwrap().unwrap();
    assert_eq!(clip.areas[0].outer.len(), 3);
}

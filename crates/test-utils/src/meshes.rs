//! Hand-built triangulated meshes with known topology.

use surface_common::{MeshEdge, MeshNode, MeshTriangle, TriMesh};

/// One unit quad split along the diagonal into two triangles.
///
/// Nodes wind counterclockwise from the origin with z values 1..=4. The
/// four perimeter edges are boundary edges; the diagonal is shared.
pub fn quad_mesh() -> TriMesh {
    let nodes = vec![
        MeshNode::new(0.0, 0.0, 1.0),
        MeshNode::new(1.0, 0.0, 2.0),
        MeshNode::new(1.0, 1.0, 3.0),
        MeshNode::new(0.0, 1.0, 4.0),
    ];
    let edges = vec![
        MeshEdge::new(0, 1, Some(0), None),
        MeshEdge::new(1, 2, Some(0), None),
        MeshEdge::new(0, 2, Some(0), Some(1)),
        MeshEdge::new(2, 3, Some(1), None),
        MeshEdge::new(3, 0, Some(1), None),
    ];
    let triangles = vec![MeshTriangle::new(0, 1, 2), MeshTriangle::new(2, 3, 4)];
    TriMesh::new(nodes, edges, triangles).unwrap()
}

/// A scaled and translated quad mesh covering `[x0, x0+size] x [y0, y0+size]`
/// with node z from the supplied values (corner order: origin, +x, +x+y, +y).
pub fn quad_mesh_at(x0: f64, y0: f64, size: f64, z: [f64; 4]) -> TriMesh {
    let mut mesh = quad_mesh();
    for (node, &zi) in mesh.nodes.iter_mut().zip(z.iter()) {
        node.x = x0 + node.x * size;
        node.y = y0 + node.y * size;
        node.z = zi;
    }
    mesh
}

/// A triangle fan around a central node: `n` rim nodes on a circle of the
/// given radius, every rim edge a boundary edge, every spoke shared by two
/// triangles.
///
/// Node 0 is the center at z = `center_z`; rim nodes carry z = `rim_z`.
pub fn fan_mesh(n: usize, radius: f64, center_z: f64, rim_z: f64) -> TriMesh {
    assert!(n >= 3, "fan needs at least 3 rim nodes");
    let mut nodes = vec![MeshNode::new(0.0, 0.0, center_z)];
    for i in 0..n {
        let theta = i as f64 / n as f64 * std::f64::consts::TAU;
        nodes.push(MeshNode::new(
            radius * theta.cos(),
            radius * theta.sin(),
            rim_z,
        ));
    }

    // Edge layout: spokes 0..n (center to rim i+1), rim edges n..2n.
    let mut edges = Vec::with_capacity(2 * n);
    for i in 0..n {
        let prev_tri = ((i + n - 1) % n) as u32;
        edges.push(MeshEdge::new(
            0,
            (i + 1) as u32,
            Some(i as u32),
            Some(prev_tri),
        ));
    }
    for i in 0..n {
        let j = (i + 1) % n;
        edges.push(MeshEdge::new(
            (i + 1) as u32,
            (j + 1) as u32,
            Some(i as u32),
            None,
        ));
    }

    let triangles = (0..n)
        .map(|i| {
            let j = (i + 1) % n;
            MeshTriangle::new(i as u32, (n + i) as u32, j as u32)
        })
        .collect();

    TriMesh::new(nodes, edges, triangles).unwrap()
}

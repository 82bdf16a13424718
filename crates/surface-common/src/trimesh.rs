//! Triangulated mesh model: node, edge and triangle tables.
//!
//! The tables reference each other by index. Edges name their two nodes
//! and the one or two triangles that share them; a missing second triangle
//! marks a boundary edge. All cross-references are validated when the mesh
//! is constructed so downstream walks can index without checking.

use crate::error::{SurfaceError, SurfaceResult};
use crate::geometry::BoundingBox;

/// Flags ORed into mesh element `flag` fields.
pub mod mesh_flags {
    /// Element is deleted and must be skipped by every walk.
    pub const DELETED: i32 = 0x01;
    /// Edge lies on a fault trace.
    pub const EDGE_ON_FAULT: i32 = 0x02;
    /// Edge is a constraint with no z jump across it. Excluded from
    /// fault-line output even though it carries the fault flag.
    pub const EDGE_ZERO_DISCONTINUITY: i32 = 0x04;
}

/// A mesh vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshNode {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub flag: i32,
}

impl MeshNode {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z, flag: 0 }
    }

    pub fn is_deleted(&self) -> bool {
        self.flag & mesh_flags::DELETED != 0
    }
}

/// An edge between two nodes, shared by one or two triangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshEdge {
    pub node1: u32,
    pub node2: u32,
    pub tri1: Option<u32>,
    pub tri2: Option<u32>,
    pub flag: i32,
}

impl MeshEdge {
    pub fn new(node1: u32, node2: u32, tri1: Option<u32>, tri2: Option<u32>) -> Self {
        Self {
            node1,
            node2,
            tri1,
            tri2,
            flag: 0,
        }
    }

    /// Boundary edges belong to exactly one triangle.
    pub fn is_boundary(&self) -> bool {
        self.tri2.is_none()
    }

    pub fn is_deleted(&self) -> bool {
        self.flag & mesh_flags::DELETED != 0
    }

    pub fn is_on_fault(&self) -> bool {
        self.flag & mesh_flags::EDGE_ON_FAULT != 0
    }

    pub fn is_zero_discontinuity(&self) -> bool {
        self.flag & mesh_flags::EDGE_ZERO_DISCONTINUITY != 0
    }

    /// The node opposite to `node` on this edge, if `node` is one of the
    /// endpoints.
    pub fn other_node(&self, node: u32) -> Option<u32> {
        if self.node1 == node {
            Some(self.node2)
        } else if self.node2 == node {
            Some(self.node1)
        } else {
            None
        }
    }
}

/// A triangle referencing three edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshTriangle {
    pub edge1: u32,
    pub edge2: u32,
    pub edge3: u32,
    pub flag: i32,
}

impl MeshTriangle {
    pub fn new(edge1: u32, edge2: u32, edge3: u32) -> Self {
        Self {
            edge1,
            edge2,
            edge3,
            flag: 0,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.flag & mesh_flags::DELETED != 0
    }

    pub fn edges(&self) -> [u32; 3] {
        [self.edge1, self.edge2, self.edge3]
    }
}

/// A triangulated mesh with validated cross-references.
#[derive(Debug, Clone, PartialEq)]
pub struct TriMesh {
    pub nodes: Vec<MeshNode>,
    pub edges: Vec<MeshEdge>,
    pub triangles: Vec<MeshTriangle>,
}

impl TriMesh {
    /// Build a mesh, checking that every index lands inside its table and
    /// that every triangle's edges close into three distinct corners.
    pub fn new(
        nodes: Vec<MeshNode>,
        edges: Vec<MeshEdge>,
        triangles: Vec<MeshTriangle>,
    ) -> SurfaceResult<Self> {
        if nodes.len() < 3 || edges.len() < 3 || triangles.is_empty() {
            return Err(SurfaceError::InvalidMesh(format!(
                "mesh needs at least 3 nodes, 3 edges and 1 triangle, got {}/{}/{}",
                nodes.len(),
                edges.len(),
                triangles.len()
            )));
        }
        for edge in &edges {
            for node in [edge.node1, edge.node2] {
                if node as usize >= nodes.len() {
                    return Err(SurfaceError::MeshIndexOutOfRange {
                        kind: "node",
                        index: node,
                        len: nodes.len(),
                    });
                }
            }
            for tri in [edge.tri1, edge.tri2].into_iter().flatten() {
                if tri as usize >= triangles.len() {
                    return Err(SurfaceError::MeshIndexOutOfRange {
                        kind: "triangle",
                        index: tri,
                        len: triangles.len(),
                    });
                }
            }
        }
        for tri in &triangles {
            for edge in tri.edges() {
                if edge as usize >= edges.len() {
                    return Err(SurfaceError::MeshIndexOutOfRange {
                        kind: "edge",
                        index: edge,
                        len: edges.len(),
                    });
                }
            }
        }
        let mesh = Self {
            nodes,
            edges,
            triangles,
        };
        for (i, tri) in mesh.triangles.iter().enumerate() {
            if mesh.triangle_nodes(tri).is_none() {
                return Err(SurfaceError::InvalidMesh(format!(
                    "triangle {} does not close into three corners",
                    i
                )));
            }
        }
        Ok(mesh)
    }

    /// The three distinct corner nodes of a triangle, or None if its
    /// edges do not chain into a closed loop.
    pub fn triangle_nodes(&self, tri: &MeshTriangle) -> Option<[u32; 3]> {
        let mut corners = [u32::MAX; 3];
        let mut n = 0;
        for edge_id in tri.edges() {
            let edge = &self.edges[edge_id as usize];
            for node in [edge.node1, edge.node2] {
                if !corners[..n].contains(&node) {
                    if n == 3 {
                        return None;
                    }
                    corners[n] = node;
                    n += 1;
                }
            }
        }
        if n == 3 {
            Some(corners)
        } else {
            None
        }
    }

    /// Count of nodes not marked deleted.
    pub fn active_node_count(&self) -> usize {
        self.nodes.iter().filter(|n| !n.is_deleted()).count()
    }

    /// Bounds over non-deleted nodes, or None for an all-deleted mesh.
    pub fn bbox(&self) -> Option<BoundingBox> {
        let mut bbox = BoundingBox::empty();
        for node in self.nodes.iter().filter(|n| !n.is_deleted()) {
            bbox.include(node.x, node.y);
        }
        if bbox.is_degenerate() {
            None
        } else {
            Some(bbox)
        }
    }

    /// Min and max node z over non-deleted nodes.
    pub fn z_range(&self) -> Option<(f64, f64)> {
        let mut min = f64::MAX;
        let mut max = f64::MIN;
        let mut seen = false;
        for node in self.nodes.iter().filter(|n| !n.is_deleted()) {
            seen = true;
            min = min.min(node.z);
            max = max.max(node.z);
        }
        if seen {
            Some((min, max))
        } else {
            None
        }
    }

    /// Multiply every node z by a factor.
    pub fn scale_z(&mut self, factor: f64) {
        for node in &mut self.nodes {
            node.z *= factor;
        }
    }
}

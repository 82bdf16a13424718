//! Mesh node smoothing.

use surface_common::TriMesh;
use tracing::debug;

/// Smooth node z values by averaging each node with its edge-connected
/// neighbors. The factor (0..=9) controls the number of passes and the
/// blend toward the neighbor average; zero returns the mesh unchanged.
///
/// Only z moves; node positions and topology are untouched, so the
/// boundary outline of a smoothed mesh is identical to the original's.
pub fn smooth_mesh(mesh: &TriMesh, factor: u32) -> TriMesh {
    let factor = factor.min(9);
    if factor == 0 {
        return mesh.clone();
    }
    let passes = (factor + 2) / 3; // 1-3 -> 1, 4-6 -> 2, 7-9 -> 3
    let blend = 0.25 + 0.05 * factor as f64;

    let mut out = mesh.clone();
    let mut z: Vec<f64> = out.nodes.iter().map(|n| n.z).collect();
    let mut next = z.clone();

    for _ in 0..passes {
        let mut sums = vec![0.0f64; z.len()];
        let mut counts = vec![0u32; z.len()];
        for edge in out.edges.iter().filter(|e| !e.is_deleted()) {
            let (a, b) = (edge.node1 as usize, edge.node2 as usize);
            sums[a] += z[b];
            counts[a] += 1;
            sums[b] += z[a];
            counts[b] += 1;
        }
        for i in 0..z.len() {
            next[i] = if counts[i] > 0 {
                let avg = sums[i] / counts[i] as f64;
                z[i] + blend * (avg - z[i])
            } else {
                z[i]
            };
        }
        std::mem::swap(&mut z, &mut next);
    }

    for (node, &zi) in out.nodes.iter_mut().zip(z.iter()) {
        node.z = zi;
    }
    debug!(factor, passes, nodes = out.nodes.len(), "smoothed mesh");
    out
}

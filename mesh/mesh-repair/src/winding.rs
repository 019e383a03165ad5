//! Winding order analysis and correction.
//!
//! Two faces sharing a manifold edge are consistently wound when they
//! traverse the edge in opposite directions. A breadth-first walk from a
//! seed face decides, for every reachable face, whether it must be flipped
//! to agree with the seed. If some face would need both orientations the
//! surface is non-orientable (a Möbius-like twist) and the walk keeps the
//! first decision.

use std::collections::VecDeque;

use mesh_types::{IndexedMesh, Triangle};
use tracing::debug;

use crate::adjacency::{has_directed_edge, MeshAdjacency};
use crate::components::find_connected_components;

/// Outcome of an orientation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrientationReport {
    /// Faces flipped to agree with their component's seed.
    pub faces_flipped: usize,
    /// Components whose winding was reversed so they enclose positive volume.
    pub components_reversed: usize,
    /// Whether every manifold edge can be made consistent.
    pub is_orientable: bool,
}

/// Per-face flip decisions for consistent winding.
///
/// Returns the flip flags and whether the mesh is orientable.
fn propagate_orientation(faces: &[[u32; 3]], adjacency: &MeshAdjacency) -> (Vec<bool>, bool) {
    let mut flip: Vec<Option<bool>> = vec![None; faces.len()];
    let mut orientable = true;
    let mut queue = VecDeque::new();

    for seed in 0..faces.len() {
        if flip[seed].is_some() {
            continue;
        }
        flip[seed] = Some(false);
        queue.push_back(seed);

        while let Some(face) = queue.pop_front() {
            let face_flipped = flip[face].unwrap_or(false);
            for (neighbor, (a, b)) in adjacency.edge_neighbors(faces, face) {
                // Only two-face edges carry an orientation constraint
                if adjacency.faces_for_edge(a, b).is_none_or(|f| f.len() != 2) {
                    continue;
                }
                // Effective direction of `face` on this edge is a → b, reversed if flipped
                let neighbor_same_dir = has_directed_edge(&faces[neighbor], a, b);
                let required = neighbor_same_dir ^ face_flipped;
                match flip[neighbor] {
                    None => {
                        flip[neighbor] = Some(required);
                        queue.push_back(neighbor);
                    }
                    Some(existing) if existing != required => orientable = false,
                    Some(_) => {}
                }
            }
        }
    }

    (flip.into_iter().map(|f| f.unwrap_or(false)).collect(), orientable)
}

/// Check whether the faces can be consistently oriented.
#[must_use]
pub fn is_orientable(mesh: &IndexedMesh) -> bool {
    let adjacency = MeshAdjacency::build(&mesh.faces, mesh.vertices.len());
    propagate_orientation(&mesh.faces, &adjacency).1
}

/// Count faces whose winding disagrees with their component's first face.
#[must_use]
pub fn count_inconsistent_faces(mesh: &IndexedMesh) -> usize {
    let adjacency = MeshAdjacency::build(&mesh.faces, mesh.vertices.len());
    let (flip, _) = propagate_orientation(&mesh.faces, &adjacency);
    flip.iter().filter(|&&f| f).count()
}

/// Make winding consistent within every component, then reverse any
/// component whose enclosed signed volume is negative so normals point
/// outward.
///
/// Non-orientable surfaces are left as consistent as the walk can make
/// them; the report says so.
///
/// # Example
///
/// ```
/// use mesh_repair::orient_outward;
/// use mesh_types::unit_cube;
///
/// let mut cube = unit_cube();
/// cube.faces[3].swap(1, 2);
/// cube.flip_normals();
///
/// let report = orient_outward(&mut cube);
/// assert!(report.is_orientable);
/// assert!((cube.signed_volume() - 1.0).abs() < 1e-12);
/// ```
pub fn orient_outward(mesh: &mut IndexedMesh) -> OrientationReport {
    let adjacency = MeshAdjacency::build(&mesh.faces, mesh.vertices.len());
    let (flip, is_orientable) = propagate_orientation(&mesh.faces, &adjacency);

    let mut faces_flipped = 0;
    for (face, &f) in mesh.faces.iter_mut().zip(&flip) {
        if f {
            face.swap(1, 2);
            faces_flipped += 1;
        }
    }

    let analysis = find_connected_components(mesh);
    let mut components_reversed = 0;
    for members in &analysis.components {
        let volume: f64 = members
            .iter()
            .map(|&fi| {
                let [a, b, c] = mesh.faces[fi];
                Triangle::new(
                    mesh.vertices[a as usize].position,
                    mesh.vertices[b as usize].position,
                    mesh.vertices[c as usize].position,
                )
                .signed_volume()
            })
            .sum();
        if volume < 0.0 {
            for &fi in members {
                mesh.faces[fi].swap(1, 2);
            }
            components_reversed += 1;
        }
    }

    let report = OrientationReport {
        faces_flipped,
        components_reversed,
        is_orientable,
    };
    debug!(?report, "Oriented mesh outward");
    report
}

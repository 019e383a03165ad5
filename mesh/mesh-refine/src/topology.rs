//! Shared local-geometry helpers.

#![allow(clippy::cast_possible_truncation)]

use hashbrown::HashMap;
use mesh_types::{IndexedMesh, Point3, Triangle, Vector3};
use smallvec::SmallVec;

use crate::error::{RefineError, RefineResult};

/// One-ring neighbour list. Most vertices of a surface mesh have fewer
/// than ten neighbours.
pub type Ring = SmallVec<[u32; 8]>;

/// Undirected edge key.
#[inline]
pub const fn edge_key(a: u32, b: u32) -> (u32, u32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// The vertex following the directed edge `a → b` in `face`, if the face
/// contains that directed edge.
pub fn third_after(face: [u32; 3], a: u32, b: u32) -> Option<u32> {
    (0..3)
        .find(|&i| face[i] == a && face[(i + 1) % 3] == b)
        .map(|i| face[(i + 2) % 3])
}

/// Unit normal of a triangle given by positions.
#[inline]
pub fn normal_of(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) -> Option<Vector3<f64>> {
    Triangle::new(a, b, c).normal()
}

/// Interior angle at `apex` in the triangle `(apex, p, q)`.
pub fn angle_at(apex: Point3<f64>, p: Point3<f64>, q: Point3<f64>) -> f64 {
    let u = p - apex;
    let v = q - apex;
    let denom = u.norm() * v.norm();
    if denom < 1e-20 {
        return 0.0;
    }
    (u.dot(&v) / denom).clamp(-1.0, 1.0).acos()
}

/// Faces adjacent to every undirected edge.
pub fn edge_face_map(faces: &[[u32; 3]]) -> HashMap<(u32, u32), SmallVec<[usize; 2]>> {
    let mut map: HashMap<(u32, u32), SmallVec<[usize; 2]>> =
        HashMap::with_capacity(faces.len() * 3 / 2);
    for (fi, face) in faces.iter().enumerate() {
        for i in 0..3 {
            map.entry(edge_key(face[i], face[(i + 1) % 3]))
                .or_default()
                .push(fi);
        }
    }
    map
}

/// Distinct neighbours of every vertex.
pub fn one_rings(mesh: &IndexedMesh) -> Vec<Ring> {
    let mut rings: Vec<Ring> = vec![Ring::new(); mesh.vertices.len()];
    for face in &mesh.faces {
        for i in 0..3 {
            let ring = &mut rings[face[i] as usize];
            for other in [face[(i + 1) % 3], face[(i + 2) % 3]] {
                if !ring.contains(&other) {
                    ring.push(other);
                }
            }
        }
    }
    rings
}

/// Normalised sum of incident unit face normals per vertex.
pub fn vertex_normals(mesh: &IndexedMesh) -> Vec<Option<Vector3<f64>>> {
    let mut sums = vec![Vector3::zeros(); mesh.vertices.len()];
    for tri in &mesh.faces {
        let [a, b, c] = tri.map(|v| mesh.vertices[v as usize].position);
        if let Some(n) = normal_of(a, b, c) {
            for &v in tri {
                sums[v as usize] += n;
            }
        }
    }
    sums.into_iter().map(|s| s.try_normalize(1e-12)).collect()
}

/// Reject empty meshes and out-of-range face indices.
pub fn validate_input(mesh: &IndexedMesh) -> RefineResult<()> {
    if mesh.vertices.is_empty() {
        return Err(RefineError::EmptyMesh);
    }
    if mesh.faces.is_empty() {
        return Err(RefineError::NoFaces);
    }
    let vertex_count = mesh.vertices.len();
    if let Some(&index) = mesh
        .faces
        .iter()
        .flatten()
        .find(|&&v| v as usize >= vertex_count)
    {
        return Err(RefineError::InvalidIndex {
            index,
            vertex_count,
        });
    }
    Ok(())
}

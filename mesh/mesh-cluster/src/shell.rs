//! Dual surface over cluster representatives.

use hashbrown::HashSet;
use mesh_types::{IndexedMesh, Point3};

/// Connect representatives of clusters that meet at a face.
///
/// Every face whose three vertices lie in three different clusters adds one
/// triangle, keeping the face's orientation. A triple of clusters is only
/// added once.
#[must_use]
pub fn dual_shell(
    mesh: &IndexedMesh,
    labels: &[Option<u32>],
    representatives: &[Point3<f64>],
) -> IndexedMesh {
    let mut seen: HashSet<[u32; 3]> = HashSet::new();
    let mut faces = Vec::new();

    for face in &mesh.faces {
        let [Some(a), Some(b), Some(c)] = face.map(|v| labels[v as usize]) else {
            continue;
        };
        if a == b || b == c || a == c {
            continue;
        }
        let mut key = [a, b, c];
        key.sort_unstable();
        if seen.insert(key) {
            faces.push([a, b, c]);
        }
    }

    IndexedMesh::from_positions(representatives, faces)
}

//! Connected component analysis.
//!
//! Faces are connected when they share an edge. Components are numbered in
//! order of their lowest face index, so component 0 always contains face 0.

#![allow(clippy::cast_possible_truncation)]

use std::collections::VecDeque;

use mesh_types::IndexedMesh;
use tracing::debug;

use crate::adjacency::MeshAdjacency;
use crate::error::{RepairError, RepairResult};

/// Face membership of every connected component.
#[derive(Debug, Clone, Default)]
pub struct ComponentAnalysis {
    /// Component id per face.
    pub face_component: Vec<usize>,
    /// Face indices of each component, ascending.
    pub components: Vec<Vec<usize>>,
}

impl ComponentAnalysis {
    /// Number of components.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Index of the component with the most faces (first on ties).
    #[must_use]
    pub fn largest(&self) -> Option<usize> {
        self.components
            .iter()
            .enumerate()
            .max_by(|(ia, a), (ib, b)| a.len().cmp(&b.len()).then(ib.cmp(ia)))
            .map(|(i, _)| i)
    }
}

/// Label edge-connected components.
///
/// # Example
///
/// ```
/// use mesh_repair::find_connected_components;
/// use mesh_types::{unit_cube, IndexedMesh};
///
/// let mut two = unit_cube();
/// let mut other = unit_cube();
/// other.translate(nalgebra::Vector3::new(5.0, 0.0, 0.0));
/// let offset = two.vertices.len() as u32;
/// two.vertices.extend(other.vertices);
/// two.faces.extend(other.faces.iter().map(|f| f.map(|v| v + offset)));
///
/// let analysis = find_connected_components(&two);
/// assert_eq!(analysis.component_count(), 2);
/// ```
#[must_use]
pub fn find_connected_components(mesh: &IndexedMesh) -> ComponentAnalysis {
    let adjacency = MeshAdjacency::build(&mesh.faces, mesh.vertices.len());
    let mut face_component = vec![usize::MAX; mesh.faces.len()];
    let mut components = Vec::new();
    let mut queue = VecDeque::new();

    for seed in 0..mesh.faces.len() {
        if face_component[seed] != usize::MAX {
            continue;
        }
        let id = components.len();
        let mut members = Vec::new();
        face_component[seed] = id;
        queue.push_back(seed);

        while let Some(face) = queue.pop_front() {
            members.push(face);
            for (neighbor, _) in adjacency.edge_neighbors(&mesh.faces, face) {
                if face_component[neighbor] == usize::MAX {
                    face_component[neighbor] = id;
                    queue.push_back(neighbor);
                }
            }
        }

        members.sort_unstable();
        components.push(members);
    }

    ComponentAnalysis {
        face_component,
        components,
    }
}

/// Split a mesh into one compacted mesh per connected component.
///
/// Vertex attributes are carried over. The returned meshes are in
/// component order, so index 0 is the component containing face 0.
///
/// # Errors
///
/// Returns [`RepairError::EmptyMesh`] if the mesh has no faces and
/// [`RepairError::InvalidIndex`] if a face references a missing vertex.
pub fn split_into_components(mesh: &IndexedMesh) -> RepairResult<Vec<IndexedMesh>> {
    if mesh.faces.is_empty() {
        return Err(RepairError::EmptyMesh);
    }
    if let Some(&index) = mesh
        .faces
        .iter()
        .flatten()
        .find(|&&v| v as usize >= mesh.vertices.len())
    {
        return Err(RepairError::InvalidIndex {
            index,
            vertex_count: mesh.vertices.len(),
        });
    }

    let analysis = find_connected_components(mesh);
    debug!(
        components = analysis.component_count(),
        "Splitting mesh into connected components"
    );

    let mut remap = vec![u32::MAX; mesh.vertices.len()];
    let parts = analysis
        .components
        .iter()
        .map(|faces| {
            let mut part = IndexedMesh::with_capacity(faces.len() / 2 + 2, faces.len());
            for &face_idx in faces {
                let face = mesh.faces[face_idx].map(|v| {
                    let slot = &mut remap[v as usize];
                    if *slot == u32::MAX {
                        *slot = part.vertices.len() as u32;
                        part.vertices.push(mesh.vertices[v as usize].clone());
                    }
                    *slot
                });
                part.faces.push(face);
            }
            // Reset only the entries this component touched
            for &face_idx in faces {
                for &v in &mesh.faces[face_idx] {
                    remap[v as usize] = u32::MAX;
                }
            }
            part
        })
        .collect();

    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::{unit_cube, MeshTopology, Vertex};
    use nalgebra::Vector3;

    fn two_cubes(small_first: bool) -> IndexedMesh {
        let mut a = unit_cube();
        let mut b = IndexedMesh::icosphere(3.0, 1);
        b.translate(Vector3::new(10.0, 0.0, 0.0));
        if !small_first {
            std::mem::swap(&mut a, &mut b);
        }
        let offset = a.vertices.len() as u32;
        a.vertices.extend(b.vertices);
        a.faces.extend(b.faces.iter().map(|f| f.map(|v| v + offset)));
        a
    }

    #[test]
    fn single_component() {
        let analysis = find_connected_components(&unit_cube());
        assert_eq!(analysis.component_count(), 1);
        assert_eq!(analysis.largest(), Some(0));
    }

    #[test]
    fn component_zero_contains_face_zero() {
        let mesh = two_cubes(true);
        let parts = split_into_components(&mesh).unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].face_count(), 12);
        assert_eq!(parts[0].vertex_count(), 8);
        assert_eq!(parts[1].face_count(), 80);

        let analysis = find_connected_components(&mesh);
        assert_eq!(analysis.largest(), Some(1));
    }

    #[test]
    fn split_preserves_volume() {
        let mesh = two_cubes(false);
        let parts = split_into_components(&mesh).unwrap();
        let total: f64 = parts.iter().map(IndexedMesh::signed_volume).sum();
        assert!((total - mesh.signed_volume()).abs() < 1e-9);
    }

    #[test]
    fn split_carries_attributes() {
        let mut mesh = unit_cube();
        mesh.select_all();
        let parts = split_into_components(&mesh).unwrap();
        assert!(parts[0].vertices.iter().all(Vertex::is_selected));
    }

    #[test]
    fn split_rejects_bad_input() {
        assert!(matches!(
            split_into_components(&IndexedMesh::new()),
            Err(RepairError::EmptyMesh)
        ));
        let mut mesh = unit_cube();
        mesh.faces.push([0, 1, 99]);
        assert!(matches!(
            split_into_components(&mesh),
            Err(RepairError::InvalidIndex { index: 99, .. })
        ));
    }
}

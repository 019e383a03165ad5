//! Edge graph and area weights of a triangle mesh.

// Mesh indices don't overflow in practice
#![allow(clippy::cast_possible_truncation)]

use mesh_types::{IndexedMesh, Point3, Triangle};
use smallvec::SmallVec;

use crate::error::{ClusterError, ClusterResult};

/// Neighbours of a vertex with the length of the connecting edge.
pub type Neighbors = SmallVec<[(u32, f64); 8]>;

/// Vertex adjacency, positions and area weights.
#[derive(Debug, Clone)]
pub struct SurfaceGraph {
    /// Vertex positions.
    pub positions: Vec<Point3<f64>>,
    /// Edge neighbours of each vertex.
    pub neighbors: Vec<Neighbors>,
    /// One third of the area of the incident triangles.
    pub weights: Vec<f64>,
}

impl SurfaceGraph {
    /// Build the graph of `mesh`.
    ///
    /// # Errors
    ///
    /// Returns an error if the mesh has no vertices or faces, or a face
    /// index is out of range.
    pub fn new(mesh: &IndexedMesh) -> ClusterResult<Self> {
        if mesh.vertices.is_empty() {
            return Err(ClusterError::EmptyMesh);
        }
        if mesh.faces.is_empty() {
            return Err(ClusterError::NoFaces);
        }
        let vertex_count = mesh.vertices.len();
        if let Some(&index) = mesh
            .faces
            .iter()
            .flatten()
            .find(|&&v| v as usize >= vertex_count)
        {
            return Err(ClusterError::InvalidIndex {
                index,
                vertex_count,
            });
        }

        let positions = mesh.positions();
        let mut neighbors = vec![Neighbors::new(); vertex_count];
        let mut weights = vec![0.0; vertex_count];

        for face in &mesh.faces {
            let [a, b, c] = face.map(|v| positions[v as usize]);
            let third = Triangle::new(a, b, c).area() / 3.0;
            for i in 0..3 {
                let (u, v) = (face[i], face[(i + 1) % 3]);
                weights[u as usize] += third;
                if u == v || neighbors[u as usize].iter().any(|&(n, _)| n == v) {
                    continue;
                }
                let length = (positions[u as usize] - positions[v as usize]).norm();
                neighbors[u as usize].push((v, length));
                neighbors[v as usize].push((u, length));
            }
        }

        Ok(Self {
            positions,
            neighbors,
            weights,
        })
    }

    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True when the graph has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// True when the vertex belongs to at least one face.
    #[must_use]
    pub fn is_referenced(&self, v: usize) -> bool {
        !self.neighbors[v].is_empty()
    }

    /// Number of vertices that belong to a face.
    #[must_use]
    pub fn referenced_count(&self) -> usize {
        (0..self.len()).filter(|&v| self.is_referenced(v)).count()
    }
}

//! Mesh adjacency data structures.
//!
//! Edge-to-face and vertex-to-face lookups shared by the diagnostics,
//! component split and orientation passes.

use hashbrown::HashMap;

/// Adjacency information for a triangle list.
#[derive(Debug, Clone)]
pub struct MeshAdjacency {
    /// Undirected edge `(low, high)` to the faces that use it.
    edge_to_faces: HashMap<(u32, u32), Vec<usize>>,
    /// Vertex index to the faces that use it.
    vertex_to_faces: Vec<Vec<usize>>,
}

impl MeshAdjacency {
    /// Build adjacency for `faces`, sized for `vertex_count` vertices.
    ///
    /// Face indices beyond `vertex_count` grow the vertex table instead of
    /// panicking, so this is safe to call on unvalidated input.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_repair::MeshAdjacency;
    ///
    /// let faces = vec![[0, 1, 2], [2, 1, 3]];
    /// let adj = MeshAdjacency::build(&faces, 4);
    ///
    /// assert_eq!(adj.boundary_edge_count(), 4);
    /// assert_eq!(adj.faces_for_edge(1, 2), Some(&[0, 1][..]));
    /// ```
    #[must_use]
    pub fn build(faces: &[[u32; 3]], vertex_count: usize) -> Self {
        let mut edge_to_faces: HashMap<(u32, u32), Vec<usize>> =
            HashMap::with_capacity(faces.len() * 3 / 2);
        let mut vertex_to_faces: Vec<Vec<usize>> = vec![Vec::new(); vertex_count];

        for (face_idx, face) in faces.iter().enumerate() {
            for &v in face {
                let v = v as usize;
                if v >= vertex_to_faces.len() {
                    vertex_to_faces.resize(v + 1, Vec::new());
                }
                vertex_to_faces[v].push(face_idx);
            }
            for (a, b) in face_edges(face) {
                edge_to_faces
                    .entry(normalize_edge(a, b))
                    .or_default()
                    .push(face_idx);
            }
        }

        Self {
            edge_to_faces,
            vertex_to_faces,
        }
    }

    /// Faces using an edge, in face order. `None` if the edge is absent.
    #[must_use]
    pub fn faces_for_edge(&self, v0: u32, v1: u32) -> Option<&[usize]> {
        self.edge_to_faces
            .get(&normalize_edge(v0, v1))
            .map(Vec::as_slice)
    }

    /// Faces using a vertex; empty for unused vertices.
    #[must_use]
    pub fn faces_for_vertex(&self, v: u32) -> &[usize] {
        self.vertex_to_faces
            .get(v as usize)
            .map_or(&[], Vec::as_slice)
    }

    /// Faces sharing an edge with `face_idx`, with the shared edge as it
    /// appears in `faces[face_idx]`.
    pub fn edge_neighbors<'a>(
        &'a self,
        faces: &'a [[u32; 3]],
        face_idx: usize,
    ) -> impl Iterator<Item = (usize, (u32, u32))> + 'a {
        face_edges(&faces[face_idx]).into_iter().flat_map(move |(a, b)| {
            self.faces_for_edge(a, b)
                .unwrap_or(&[])
                .iter()
                .filter(move |&&other| other != face_idx)
                .map(move |&other| (other, (a, b)))
        })
    }

    /// Number of edges used by exactly one face.
    #[must_use]
    pub fn boundary_edge_count(&self) -> usize {
        self.edge_to_faces.values().filter(|f| f.len() == 1).count()
    }

    /// Number of edges used by more than two faces.
    #[must_use]
    pub fn non_manifold_edge_count(&self) -> usize {
        self.edge_to_faces.values().filter(|f| f.len() > 2).count()
    }

    /// Iterate over edges used by exactly two faces.
    pub fn manifold_edges(&self) -> impl Iterator<Item = ((u32, u32), [usize; 2])> + '_ {
        self.edge_to_faces
            .iter()
            .filter(|(_, f)| f.len() == 2)
            .map(|(&edge, f)| (edge, [f[0], f[1]]))
    }

    /// True if every edge has at most two faces.
    #[must_use]
    pub fn is_manifold(&self) -> bool {
        self.edge_to_faces.values().all(|f| f.len() <= 2)
    }

    /// True if every edge has at least two faces.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.edge_to_faces.values().all(|f| f.len() >= 2)
    }

    /// Number of distinct edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_to_faces.len()
    }
}

/// The three directed edges of a face, in winding order.
#[inline]
#[must_use]
pub fn face_edges(face: &[u32; 3]) -> [(u32, u32); 3] {
    [(face[0], face[1]), (face[1], face[2]), (face[2], face[0])]
}

/// True if `face` traverses the directed edge `a → b`.
#[inline]
#[must_use]
pub fn has_directed_edge(face: &[u32; 3], a: u32, b: u32) -> bool {
    face_edges(face).contains(&(a, b))
}

/// Normalize edge direction so v0 < v1.
#[inline]
const fn normalize_edge(v0: u32, v1: u32) -> (u32, u32) {
    if v0 < v1 { (v0, v1) } else { (v1, v0) }
}

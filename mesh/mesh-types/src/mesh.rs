//! Indexed triangle mesh.

use std::collections::HashMap;

use crate::{Aabb, MeshBounds, MeshTopology, Triangle, Vertex};
use nalgebra::{Point3, Vector3};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An indexed triangle mesh.
///
/// Vertices and faces are stored separately; faces reference vertices by
/// index and use counter-clockwise winding when viewed from outside.
///
/// # Example
///
/// ```
/// use mesh_types::{IndexedMesh, MeshTopology, Vertex};
///
/// let mut mesh = IndexedMesh::new();
/// mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
/// mesh.faces.push([0, 1, 2]);
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.edge_count(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexedMesh {
    /// Vertex data.
    pub vertices: Vec<Vertex>,

    /// Triangle faces as indices into the vertex array.
    pub faces: Vec<[u32; 3]>,
}

impl IndexedMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Create a mesh from vertices and faces.
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Vertex>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Create a mesh from bare positions and faces.
    #[must_use]
    pub fn from_positions(positions: &[Point3<f64>], faces: Vec<[u32; 3]>) -> Self {
        Self {
            vertices: positions.iter().copied().map(Vertex::new).collect(),
            faces,
        }
    }

    /// Vertex positions in index order.
    #[must_use]
    pub fn positions(&self) -> Vec<Point3<f64>> {
        self.vertices.iter().map(|v| v.position).collect()
    }

    /// Number of distinct undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.unique_edges().len()
    }

    /// Distinct undirected edges as `(low, high)` index pairs, sorted.
    #[must_use]
    pub fn unique_edges(&self) -> Vec<(u32, u32)> {
        let mut edges: Vec<(u32, u32)> = self
            .faces
            .iter()
            .flat_map(|f| [(f[0], f[1]), (f[1], f[2]), (f[2], f[0])])
            .map(|(a, b)| if a < b { (a, b) } else { (b, a) })
            .collect();
        edges.sort_unstable();
        edges.dedup();
        edges
    }

    /// Mean length over distinct edges, `0.0` for a mesh without faces.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean_edge_length(&self) -> f64 {
        let edges = self.unique_edges();
        if edges.is_empty() {
            return 0.0;
        }
        let total: f64 = edges
            .iter()
            .map(|&(a, b)| {
                (self.vertices[a as usize].position - self.vertices[b as usize].position).norm()
            })
            .sum();
        total / edges.len() as f64
    }

    /// Signed enclosed volume (divergence theorem).
    ///
    /// Positive for a closed mesh with outward normals, negative when the
    /// mesh is inside-out. Not meaningful for open meshes.
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        self.triangles().map(|t| t.signed_volume()).sum()
    }

    /// Absolute enclosed volume.
    #[inline]
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.signed_volume().abs()
    }

    /// Total surface area.
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        self.triangles().map(|tri| tri.area()).sum()
    }

    /// Reverse the winding of every face and negate stored normals.
    pub fn flip_normals(&mut self) {
        for face in &mut self.faces {
            face.swap(1, 2);
        }
        for vertex in &mut self.vertices {
            if let Some(normal) = vertex.attributes.normal.as_mut() {
                *normal = -*normal;
            }
        }
    }

    /// Translate every vertex.
    pub fn translate(&mut self, offset: Vector3<f64>) {
        for v in &mut self.vertices {
            v.position += offset;
        }
    }

    /// Set the selection flag on every vertex.
    pub fn select_all(&mut self) {
        for v in &mut self.vertices {
            v.attributes.selected = true;
        }
    }

    /// Drop vertices no face references and renumber faces.
    ///
    /// Returns the number of vertices removed.
    #[allow(clippy::cast_possible_truncation)]
    pub fn remove_unreferenced_vertices(&mut self) -> usize {
        let mut remap = vec![u32::MAX; self.vertices.len()];
        for face in &self.faces {
            for &v in face {
                remap[v as usize] = 0;
            }
        }

        let mut next = 0u32;
        let mut kept = Vec::with_capacity(self.vertices.len());
        for (old, vertex) in self.vertices.drain(..).enumerate() {
            if remap[old] != u32::MAX {
                remap[old] = next;
                next += 1;
                kept.push(vertex);
            }
        }
        let removed = remap.len() - kept.len();
        self.vertices = kept;

        for face in &mut self.faces {
            for v in face.iter_mut() {
                *v = remap[*v as usize];
            }
        }
        removed
    }
}

impl MeshTopology for IndexedMesh {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn vertex(&self, index: usize) -> Option<&Vertex> {
        self.vertices.get(index)
    }

    fn face(&self, index: usize) -> Option<[u32; 3]> {
        self.faces.get(index).copied()
    }

    fn triangle(&self, face_index: usize) -> Option<Triangle> {
        let [i0, i1, i2] = *self.faces.get(face_index)?;
        Some(Triangle::new(
            self.vertices.get(i0 as usize)?.position,
            self.vertices.get(i1 as usize)?.position,
            self.vertices.get(i2 as usize)?.position,
        ))
    }

    fn triangles(&self) -> impl Iterator<Item = Triangle> {
        self.faces.iter().map(|&[i0, i1, i2]| {
            Triangle::new(
                self.vertices[i0 as usize].position,
                self.vertices[i1 as usize].position,
                self.vertices[i2 as usize].position,
            )
        })
    }
}

impl MeshBounds for IndexedMesh {
    fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter().map(|v| &v.position))
    }
}

/// A unit cube from (0,0,0) to (1,1,1) with outward-facing normals.
///
/// # Example
///
/// ```
/// use mesh_types::{unit_cube, MeshTopology};
///
/// let cube = unit_cube();
/// assert_eq!(cube.vertex_count(), 8);
/// assert_eq!(cube.face_count(), 12);
/// assert!((cube.signed_volume() - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn unit_cube() -> IndexedMesh {
    let corners = [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 1.0],
        [1.0, 1.0, 1.0],
        [0.0, 1.0, 1.0],
    ];
    let faces = vec![
        [0, 2, 1],
        [0, 3, 2],
        [4, 5, 6],
        [4, 6, 7],
        [0, 1, 5],
        [0, 5, 4],
        [3, 7, 6],
        [3, 6, 2],
        [0, 4, 7],
        [0, 7, 3],
        [1, 2, 6],
        [1, 6, 5],
    ];
    IndexedMesh::from_parts(corners.into_iter().map(Vertex::from).collect(), faces)
}

impl IndexedMesh {
    /// A geodesic sphere built by repeatedly splitting an icosahedron.
    ///
    /// `subdivisions = 0` yields the icosahedron (12 vertices, 20 faces);
    /// each level multiplies the face count by four. Faces are CCW from
    /// outside.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{IndexedMesh, MeshTopology};
    ///
    /// let sphere = IndexedMesh::icosphere(2.0, 2);
    /// assert_eq!(sphere.face_count(), 320);
    /// assert!(sphere.signed_volume() > 0.0);
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn icosphere(radius: f64, subdivisions: u32) -> Self {
        let t = (1.0 + 5.0_f64.sqrt()) / 2.0;
        let mut positions: Vec<Vector3<f64>> = [
            [-1.0, t, 0.0],
            [1.0, t, 0.0],
            [-1.0, -t, 0.0],
            [1.0, -t, 0.0],
            [0.0, -1.0, t],
            [0.0, 1.0, t],
            [0.0, -1.0, -t],
            [0.0, 1.0, -t],
            [t, 0.0, -1.0],
            [t, 0.0, 1.0],
            [-t, 0.0, -1.0],
            [-t, 0.0, 1.0],
        ]
        .iter()
        .map(|&[x, y, z]| Vector3::new(x, y, z).normalize())
        .collect();

        let mut faces: Vec<[u32; 3]> = vec![
            [0, 11, 5],
            [0, 5, 1],
            [0, 1, 7],
            [0, 7, 10],
            [0, 10, 11],
            [1, 5, 9],
            [5, 11, 4],
            [11, 10, 2],
            [10, 7, 6],
            [7, 1, 8],
            [3, 9, 4],
            [3, 4, 2],
            [3, 2, 6],
            [3, 6, 8],
            [3, 8, 9],
            [4, 9, 5],
            [2, 4, 11],
            [6, 2, 10],
            [8, 6, 7],
            [9, 8, 1],
        ];

        for _ in 0..subdivisions {
            let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
            let mut midpoint = |a: u32, b: u32, positions: &mut Vec<Vector3<f64>>| -> u32 {
                let key = if a < b { (a, b) } else { (b, a) };
                *midpoints.entry(key).or_insert_with(|| {
                    let m = (positions[a as usize] + positions[b as usize]).normalize();
                    positions.push(m);
                    (positions.len() - 1) as u32
                })
            };

            let mut next = Vec::with_capacity(faces.len() * 4);
            for &[a, b, c] in &faces {
                let ab = midpoint(a, b, &mut positions);
                let bc = midpoint(b, c, &mut positions);
                let ca = midpoint(c, a, &mut positions);
                next.extend_from_slice(&[[a, ab, ca], [b, bc, ab], [c, ca, bc], [ab, bc, ca]]);
            }
            faces = next;
        }

        let vertices = positions
            .into_iter()
            .map(|p| Vertex::new(Point3::from(p * radius)))
            .collect();
        Self::from_parts(vertices, faces)
    }
}

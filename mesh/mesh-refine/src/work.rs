//! Mutable mesh with vertex-to-face incidence for local edits.
//!
//! Faces are tombstoned instead of removed so face indices stay stable
//! while a pass runs; [`WorkMesh::into_mesh`] compacts at the end.

#![allow(clippy::cast_possible_truncation)]

use mesh_types::{IndexedMesh, Point3, Vector3, Vertex};
use smallvec::SmallVec;

use crate::topology::{normal_of, Ring};

/// Limits applied to every half-edge collapse.
#[derive(Debug, Clone, Copy)]
pub struct CollapseLimits {
    pub min_valence: usize,
    pub min_normal_dot: f64,
}

pub struct WorkMesh {
    vertices: Vec<Vertex>,
    faces: Vec<Option<[u32; 3]>>,
    vertex_faces: Vec<SmallVec<[usize; 8]>>,
    removed: Vec<bool>,
    live_face_count: usize,
}

impl WorkMesh {
    pub fn new(mesh: &IndexedMesh) -> Self {
        let mut vertex_faces = vec![SmallVec::new(); mesh.vertices.len()];
        for (fi, face) in mesh.faces.iter().enumerate() {
            for &v in face {
                vertex_faces[v as usize].push(fi);
            }
        }
        Self {
            vertices: mesh.vertices.clone(),
            faces: mesh.faces.iter().copied().map(Some).collect(),
            vertex_faces,
            removed: vec![false; mesh.vertices.len()],
            live_face_count: mesh.faces.len(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_live(&self, v: u32) -> bool {
        !self.removed[v as usize] && !self.vertex_faces[v as usize].is_empty()
    }

    pub fn is_selected(&self, v: u32) -> bool {
        self.vertices[v as usize].is_selected()
    }

    #[inline]
    pub fn position(&self, v: u32) -> Point3<f64> {
        self.vertices[v as usize].position
    }

    pub const fn face_count(&self) -> usize {
        self.live_face_count
    }

    pub fn live_faces(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.faces.iter().filter_map(|f| *f)
    }

    fn incident(&self, v: u32) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.vertex_faces[v as usize]
            .iter()
            .filter_map(|&f| self.faces[f])
    }

    fn face_normal(&self, face: [u32; 3]) -> Option<Vector3<f64>> {
        let [a, b, c] = face.map(|v| self.position(v));
        normal_of(a, b, c)
    }

    /// Unit normals of every live face around `v`.
    pub fn incident_normals(&self, v: u32) -> SmallVec<[Vector3<f64>; 8]> {
        self.incident(v)
            .filter_map(|face| self.face_normal(face))
            .collect()
    }

    /// Normalised sum of the unit normals around `v`.
    pub fn vertex_normal(&self, v: u32) -> Option<Vector3<f64>> {
        self.incident_normals(v)
            .iter()
            .fold(Vector3::zeros(), |acc, n| acc + n)
            .try_normalize(1e-12)
    }

    /// Distinct neighbours of `v`.
    pub fn one_ring(&self, v: u32) -> Ring {
        let mut ring = Ring::new();
        for face in self.incident(v) {
            for u in face {
                if u != v && !ring.contains(&u) {
                    ring.push(u);
                }
            }
        }
        ring
    }

    /// Whether some edge at `v` does not have exactly two faces.
    ///
    /// Non-manifold fans count as boundary too, so they are never edited.
    pub fn is_boundary(&self, v: u32) -> bool {
        self.one_ring(v).iter().any(|&u| {
            self.incident(v).filter(|face| face.contains(&u)).count() != 2
        })
    }

    /// Collapse `v` into its neighbour `target`, removing `v`.
    ///
    /// Returns `false` and leaves the mesh untouched if the collapse would
    /// break manifoldness or fold a face.
    pub fn try_collapse(&mut self, v: u32, target: u32, limits: CollapseLimits) -> bool {
        let ring = self.one_ring(v);
        if ring.len() < limits.min_valence || !ring.contains(&target) || self.is_boundary(v) {
            return false;
        }

        // Link condition: the edge's endpoints share exactly the two
        // vertices opposite the edge.
        let target_ring = self.one_ring(target);
        let shared: SmallVec<[u32; 4]> = ring
            .iter()
            .copied()
            .filter(|u| target_ring.contains(u))
            .collect();
        if shared.len() != 2 {
            return false;
        }
        // The opposite vertices lose a neighbour each
        if shared.iter().any(|&s| self.one_ring(s).len() <= 3) {
            return false;
        }

        for face in self.incident(v) {
            if face.contains(&target) {
                continue;
            }
            let moved = face.map(|x| if x == v { target } else { x });
            let Some(after) = self.face_normal(moved) else {
                return false;
            };
            if let Some(before) = self.face_normal(face) {
                if before.dot(&after) < limits.min_normal_dot {
                    return false;
                }
            }
        }

        let incident = std::mem::take(&mut self.vertex_faces[v as usize]);
        for f in incident {
            let Some(face) = self.faces[f] else {
                continue;
            };
            if face.contains(&target) {
                self.faces[f] = None;
                self.live_face_count -= 1;
                for x in face {
                    if x != v {
                        self.vertex_faces[x as usize].retain(|g| *g != f);
                    }
                }
            } else {
                self.faces[f] = Some(face.map(|x| if x == v { target } else { x }));
                self.vertex_faces[target as usize].push(f);
            }
        }
        self.removed[v as usize] = true;
        true
    }

    /// Drop removed vertices and tombstoned faces.
    pub fn into_mesh(self) -> IndexedMesh {
        let mut remap = vec![u32::MAX; self.vertices.len()];
        let mut vertices = Vec::with_capacity(self.vertices.len());
        for (old, vertex) in self.vertices.into_iter().enumerate() {
            if !self.removed[old] {
                remap[old] = vertices.len() as u32;
                vertices.push(vertex);
            }
        }
        let faces = self
            .faces
            .into_iter()
            .flatten()
            .map(|face| face.map(|v| remap[v as usize]))
            .collect();
        IndexedMesh::from_parts(vertices, faces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::unit_cube;

    const LIMITS: CollapseLimits = CollapseLimits {
        min_valence: 4,
        min_normal_dot: 0.2,
    };

    /// Regular octahedron, every vertex has valence four.
    fn octahedron() -> IndexedMesh {
        let positions = [
            [1.0, 0.0, 0.0],
            [-1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, -1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, -1.0],
        ];
        let faces = vec![
            [0, 2, 4],
            [2, 1, 4],
            [1, 3, 4],
            [3, 0, 4],
            [2, 0, 5],
            [1, 2, 5],
            [3, 1, 5],
            [0, 3, 5],
        ];
        IndexedMesh::from_parts(positions.into_iter().map(Vertex::from).collect(), faces)
    }

    #[test]
    fn octahedron_collapse_keeps_closed_surface() {
        let mut work = WorkMesh::new(&octahedron());
        assert!(!work.is_boundary(4));
        assert!(work.try_collapse(4, 0, LIMITS));
        assert_eq!(work.face_count(), 6);

        let mesh = work.into_mesh();
        assert_eq!(mesh.vertices.len(), 5);
        assert_eq!(mesh.faces.len(), 6);
        assert!(mesh.signed_volume() > 0.0);
        let report = mesh_repair::validate_mesh(&mesh);
        assert!(report.is_closed && report.is_manifold && report.is_orientable);
    }

    #[test]
    fn apex_normal_points_along_the_axis() {
        let work = WorkMesh::new(&octahedron());
        let n = work.vertex_normal(4).unwrap();
        assert!((n - Vector3::z()).norm() < 1e-12);
    }

    #[test]
    fn non_neighbour_target_is_rejected() {
        let mut work = WorkMesh::new(&octahedron());
        assert!(!work.try_collapse(4, 5, LIMITS));
        assert_eq!(work.into_mesh(), octahedron());
    }

    #[test]
    fn open_mesh_vertex_is_boundary() {
        let mut cube = unit_cube();
        cube.faces.truncate(10);
        let work = WorkMesh::new(&cube);
        assert!(work.is_boundary(1));
    }

    #[test]
    fn valence_below_limit_is_kept() {
        let mut work = WorkMesh::new(&octahedron());
        assert_eq!(work.one_ring(4).len(), 4);
        let strict = CollapseLimits {
            min_valence: 5,
            ..LIMITS
        };
        assert!(!work.try_collapse(4, 0, strict));
        assert!(work.is_live(4));
    }
}

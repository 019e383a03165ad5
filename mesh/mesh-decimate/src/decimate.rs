//! Core mesh decimation algorithm.
//!
//! Implements edge collapse with quadric error metrics (QEM). With volume
//! preservation on, the merged vertex minimises the combined quadric
//! subject to the one linear constraint that keeps the signed volume of
//! the edge's neighbourhood unchanged.

// Mesh indices and counts don't overflow in practice
#![allow(clippy::cast_possible_truncation)]
// Algorithm uses standard mathematical variable names
#![allow(clippy::many_single_char_names)]

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use hashbrown::HashSet;
use mesh_types::{IndexedMesh, Point3, Triangle, Vector3, Vertex};
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::error::{DecimateError, DecimateResult};
use crate::params::DecimateParams;
use crate::quadric::Quadric;
use crate::result::DecimationResult;

/// An edge collapse candidate in the priority queue.
#[derive(Debug, Clone)]
struct EdgeCollapse {
    /// Surviving vertex.
    keep: u32,
    /// Removed vertex.
    remove: u32,
    /// The error cost of this collapse.
    cost: f64,
    /// The position of the merged vertex.
    position: Point3<f64>,
    /// Vertex versions the candidate was computed against.
    stamps: (u32, u32),
}

impl PartialEq for EdgeCollapse {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for EdgeCollapse {}

impl PartialOrd for EdgeCollapse {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EdgeCollapse {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior (smaller cost = higher priority)
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| (other.keep, other.remove).cmp(&(self.keep, self.remove)))
    }
}

/// Working state: tombstoned faces plus vertex-to-face incidence.
struct Decimator<'a> {
    params: &'a DecimateParams,
    positions: Vec<Point3<f64>>,
    faces: Vec<Option<[u32; 3]>>,
    vertex_faces: Vec<SmallVec<[usize; 8]>>,
    quadrics: Vec<Quadric>,
    removed: Vec<bool>,
    stamps: Vec<u32>,
    boundary: Vec<bool>,
}

/// Decimate a mesh using edge collapse with quadric error metrics.
///
/// # Errors
///
/// Returns an error if the mesh has no vertices or faces, a face index is
/// out of range, the target ratio is outside `[0, 1]`, or an explicit
/// target triangle count is zero.
///
/// # Example
///
/// ```
/// use mesh_types::IndexedMesh;
/// use mesh_decimate::{decimate_mesh, DecimateParams};
///
/// let sphere = IndexedMesh::icosphere(1.0, 3);
/// let result = decimate_mesh(&sphere, &DecimateParams::with_reduction(0.9))?;
/// assert!(result.final_triangles <= 128);
/// assert!(result.volume_change().abs() < 1e-6);
/// # Ok::<(), mesh_decimate::DecimateError>(())
/// ```
pub fn decimate_mesh(
    mesh: &IndexedMesh,
    params: &DecimateParams,
) -> DecimateResult<DecimationResult> {
    validate(mesh, params)?;

    let original_triangles = mesh.faces.len();
    let original_volume = mesh.signed_volume();
    let target = params.target_for(original_triangles);

    // Don't decimate if already at or below target
    if original_triangles <= target {
        let mut out = mesh.clone();
        out.remove_unreferenced_vertices();
        return Ok(DecimationResult {
            final_vertices: out.vertices.len(),
            mesh: out,
            original_triangles,
            final_triangles: original_triangles,
            original_vertices: mesh.vertices.len(),
            collapses_performed: 0,
            collapses_rejected: 0,
            original_volume,
            final_volume: original_volume,
        });
    }

    info!(
        original = original_triangles,
        target,
        preserve_volume = params.preserve_volume,
        "Starting mesh decimation"
    );

    let mut state = Decimator::new(mesh, params);
    let mut heap = state.initial_queue();
    let mut active_faces = original_triangles;
    let mut collapses_performed = 0;
    let mut collapses_rejected = 0;

    while active_faces > target {
        let Some(candidate) = heap.pop() else {
            break;
        };
        let (keep, remove) = (candidate.keep, candidate.remove);
        if state.removed[keep as usize] || state.removed[remove as usize] {
            continue;
        }
        if candidate.stamps != (state.stamps[keep as usize], state.stamps[remove as usize]) {
            continue;
        }
        if let Some(max_error) = params.max_error {
            if candidate.cost > max_error {
                collapses_rejected += 1;
                continue;
            }
        }
        match state.collapse(keep, remove, candidate.position) {
            Some(faces_removed) => {
                active_faces -= faces_removed;
                collapses_performed += 1;
                state.requeue_around(keep, &mut heap);
            }
            None => collapses_rejected += 1,
        }
    }

    let final_mesh = state.into_mesh(mesh);
    let result = DecimationResult {
        original_triangles,
        final_triangles: final_mesh.faces.len(),
        original_vertices: mesh.vertices.len(),
        final_vertices: final_mesh.vertices.len(),
        collapses_performed,
        collapses_rejected,
        original_volume,
        final_volume: final_mesh.signed_volume(),
        mesh: final_mesh,
    };

    info!(
        final_triangles = result.final_triangles,
        final_vertices = result.final_vertices,
        collapses = collapses_performed,
        rejected = collapses_rejected,
        volume_change = result.volume_change(),
        "Decimation complete"
    );
    Ok(result)
}

fn validate(mesh: &IndexedMesh, params: &DecimateParams) -> DecimateResult<()> {
    if mesh.vertices.is_empty() {
        return Err(DecimateError::EmptyMesh);
    }
    if mesh.faces.is_empty() {
        return Err(DecimateError::NoFaces);
    }
    if !(0.0..=1.0).contains(&params.target_ratio) {
        return Err(DecimateError::InvalidRatio(params.target_ratio));
    }
    if params.target_triangles == Some(0) {
        return Err(DecimateError::InvalidTargetCount(0));
    }
    let vertex_count = mesh.vertices.len();
    if let Some(&index) = mesh
        .faces
        .iter()
        .flatten()
        .find(|&&v| v as usize >= vertex_count)
    {
        return Err(DecimateError::InvalidIndex {
            index,
            vertex_count,
        });
    }
    Ok(())
}

const fn normalize_edge(v1: u32, v2: u32) -> (u32, u32) {
    if v1 < v2 {
        (v1, v2)
    } else {
        (v2, v1)
    }
}

impl<'a> Decimator<'a> {
    fn new(mesh: &IndexedMesh, params: &'a DecimateParams) -> Self {
        let positions: Vec<Point3<f64>> = mesh.positions();
        let mut vertex_faces = vec![SmallVec::new(); positions.len()];
        let mut quadrics = vec![Quadric::default(); positions.len()];

        for (fi, face) in mesh.faces.iter().enumerate() {
            for &v in face {
                vertex_faces[v as usize].push(fi);
            }
            let tri = Triangle::new(
                positions[face[0] as usize],
                positions[face[1] as usize],
                positions[face[2] as usize],
            );
            // Area-weighted planes keep slivers from dominating
            if let Some(normal) = tri.normal() {
                let q = Quadric::from_point_normal(&tri.v0, normal, tri.area());
                for &v in face {
                    quadrics[v as usize] += q;
                }
            }
        }

        let mut state = Self {
            params,
            removed: vec![false; positions.len()],
            stamps: vec![0; positions.len()],
            boundary: vec![false; positions.len()],
            positions,
            faces: mesh.faces.iter().copied().map(Some).collect(),
            vertex_faces,
            quadrics,
        };
        for v in 0..state.positions.len() as u32 {
            state.boundary[v as usize] = state.is_boundary(v);
        }
        state
    }

    fn incident(&self, v: u32) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.vertex_faces[v as usize]
            .iter()
            .filter_map(|&f| self.faces[f])
    }

    fn one_ring(&self, v: u32) -> SmallVec<[u32; 8]> {
        let mut ring = SmallVec::new();
        for face in self.incident(v) {
            for u in face {
                if u != v && !ring.contains(&u) {
                    ring.push(u);
                }
            }
        }
        ring
    }

    fn is_boundary(&self, v: u32) -> bool {
        self.one_ring(v)
            .iter()
            .any(|&u| self.incident(v).filter(|f| f.contains(&u)).count() != 2)
    }

    fn face_normal(&self, face: [u32; 3]) -> Option<Vector3<f64>> {
        let [a, b, c] = face.map(|v| self.positions[v as usize]);
        Triangle::new(a, b, c).normal()
    }

    fn initial_queue(&self) -> BinaryHeap<EdgeCollapse> {
        let mut heap = BinaryHeap::new();
        let mut seen = HashSet::new();
        for face in self.faces.iter().flatten() {
            for i in 0..3 {
                let (a, b) = (face[i], face[(i + 1) % 3]);
                if seen.insert(normalize_edge(a, b)) {
                    if let Some(candidate) = self.candidate(a, b) {
                        heap.push(candidate);
                    }
                }
            }
        }
        heap
    }

    /// Price the collapse of edge `(a, b)`, choosing which endpoint
    /// survives by index so the same edge always maps to one candidate.
    fn candidate(&self, a: u32, b: u32) -> Option<EdgeCollapse> {
        let (keep, remove) = normalize_edge(a, b);
        if self.params.preserve_boundary
            && (self.boundary[keep as usize] || self.boundary[remove as usize])
        {
            return None;
        }

        let combined = self.quadrics[keep as usize] + self.quadrics[remove as usize];
        let position = self.placement(keep, remove, &combined);
        Some(EdgeCollapse {
            keep,
            remove,
            cost: combined.evaluate(&position).max(0.0),
            position,
            stamps: (self.stamps[keep as usize], self.stamps[remove as usize]),
        })
    }

    /// Where the merged vertex goes.
    fn placement(&self, keep: u32, remove: u32, quadric: &Quadric) -> Point3<f64> {
        let p = self.positions[keep as usize];
        let q = self.positions[remove as usize];
        let midpoint = Point3::from((p.coords + q.coords) * 0.5);
        let reach = (q - p).norm() * 2.0;
        let near = |x: &Point3<f64>| (x - midpoint).norm() <= reach;

        if !self.params.preserve_volume {
            return quadric
                .optimal_point()
                .filter(near)
                .unwrap_or_else(|| cheapest(quadric, [p, q, midpoint]));
        }

        let (g, h) = self.volume_constraint(keep, remove);
        if let Some(x) = quadric.constrained_optimum(&g, h).filter(near) {
            return x;
        }
        // Singular system: take the cheapest simple choice and slide it
        // along the constraint normal onto the volume-preserving plane
        let fallback = cheapest(quadric, [p, q, midpoint]);
        let g_norm = g.norm_squared();
        if g_norm < 1e-24 {
            return fallback;
        }
        fallback + g * ((h - g.dot(&fallback.coords)) / g_norm)
    }

    /// Linear constraint `g·x = h` that keeps the signed volume of the
    /// faces around `keep` and `remove` unchanged when both move to `x`.
    fn volume_constraint(&self, keep: u32, remove: u32) -> (Vector3<f64>, f64) {
        let mut g = Vector3::zeros();
        let mut h = 0.0;
        let mut seen: SmallVec<[usize; 16]> = SmallVec::new();

        for v in [keep, remove] {
            for &f in &self.vertex_faces[v as usize] {
                let Some(face) = self.faces[f] else {
                    continue;
                };
                if seen.contains(&f) {
                    continue;
                }
                seen.push(f);
                let [a, b, c] = face.map(|i| self.positions[i as usize].coords);
                h += a.dot(&b.cross(&c)) / 6.0;

                let on_edge = |i: u32| i == keep || i == remove;
                if face.iter().filter(|&&i| on_edge(i)).count() == 2 {
                    continue; // Face disappears
                }
                // Rotate so the moving vertex comes first: x·(b × c)
                let k = (0..3).find(|&k| on_edge(face[k])).unwrap_or(0);
                let next = self.positions[face[(k + 1) % 3] as usize].coords;
                let prev = self.positions[face[(k + 2) % 3] as usize].coords;
                g += next.cross(&prev) / 6.0;
            }
        }
        (g, h)
    }

    /// Merge `remove` into `keep` at `position`.
    ///
    /// Returns the number of faces removed, or `None` if the collapse is
    /// rejected.
    fn collapse(&mut self, keep: u32, remove: u32, position: Point3<f64>) -> Option<usize> {
        let ring_keep = self.one_ring(keep);
        if !ring_keep.contains(&remove) {
            return None;
        }
        let ring_remove = self.one_ring(remove);

        // Link condition
        let edge_faces = self
            .incident(keep)
            .filter(|f| f.contains(&remove))
            .count();
        let shared: SmallVec<[u32; 4]> = ring_keep
            .iter()
            .copied()
            .filter(|u| ring_remove.contains(u))
            .collect();
        if shared.len() != edge_faces {
            return None;
        }
        if shared.iter().any(|&s| self.one_ring(s).len() <= 3) {
            return None;
        }
        // Collapsing the last edges of a tetrahedron leaves a flat pair
        if ring_keep.len() + ring_remove.len() - 2 - shared.len() < 3 {
            return None;
        }

        // Normal stability of every surviving face
        for v in [keep, remove] {
            for face in self.incident(v) {
                if face.contains(&keep) && face.contains(&remove) {
                    continue;
                }
                let before = self.face_normal(face);
                let moved = face.map(|i| {
                    if i == keep || i == remove {
                        position
                    } else {
                        self.positions[i as usize]
                    }
                });
                let after = Triangle::new(moved[0], moved[1], moved[2]).normal()?;
                if let Some(before) = before {
                    if before.dot(&after) <= self.params.min_normal_dot {
                        return None;
                    }
                }
            }
        }

        // Apply
        self.positions[keep as usize] = position;
        let q = self.quadrics[remove as usize];
        self.quadrics[keep as usize] += q;

        let mut faces_removed = 0;
        let incident = std::mem::take(&mut self.vertex_faces[remove as usize]);
        for f in incident {
            let Some(face) = self.faces[f] else {
                continue;
            };
            if face.contains(&keep) {
                self.faces[f] = None;
                faces_removed += 1;
                for i in face {
                    if i != remove {
                        self.vertex_faces[i as usize].retain(|g| *g != f);
                    }
                }
            } else {
                self.faces[f] = Some(face.map(|i| if i == remove { keep } else { i }));
                self.vertex_faces[keep as usize].push(f);
            }
        }
        self.removed[remove as usize] = true;
        self.boundary[keep as usize] |= self.boundary[remove as usize];

        debug!(keep, remove, faces_removed, "Collapsed edge");
        Some(faces_removed)
    }

    /// Invalidate and re-price every edge around `center` and its ring.
    fn requeue_around(&mut self, center: u32, heap: &mut BinaryHeap<EdgeCollapse>) {
        let ring = self.one_ring(center);
        for &v in ring.iter().chain(std::iter::once(&center)) {
            self.stamps[v as usize] = self.stamps[v as usize].wrapping_add(1);
        }
        let mut seen: HashSet<(u32, u32)> = HashSet::new();
        for &v in ring.iter().chain(std::iter::once(&center)) {
            for u in self.one_ring(v) {
                if seen.insert(normalize_edge(u, v)) {
                    if let Some(candidate) = self.candidate(u, v) {
                        heap.push(candidate);
                    }
                }
            }
        }
    }

    /// Compact to a mesh, carrying attributes of surviving vertices.
    fn into_mesh(self, source: &IndexedMesh) -> IndexedMesh {
        let vertices: Vec<Vertex> = source
            .vertices
            .iter()
            .zip(&self.positions)
            .map(|(v, p)| {
                let mut out = v.clone();
                if out.position != *p {
                    out.position = *p;
                    out.attributes.normal = None;
                }
                out
            })
            .collect();
        let faces = self.faces.into_iter().flatten().collect();
        let mut mesh = IndexedMesh::from_parts(vertices, faces);
        mesh.remove_unreferenced_vertices();
        mesh
    }
}

/// Lowest-cost point among `options`.
fn cheapest(quadric: &Quadric, options: [Point3<f64>; 3]) -> Point3<f64> {
    let [first, rest @ ..] = options;
    rest.into_iter().fold(first, |best, x| {
        if quadric.evaluate(&x) < quadric.evaluate(&best) {
            x
        } else {
            best
        }
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_types::unit_cube;

    #[test]
    fn test_empty_mesh() {
        let mesh = IndexedMesh::new();
        let result = decimate_mesh(&mesh, &DecimateParams::default());
        assert!(matches!(result, Err(DecimateError::EmptyMesh)));
    }

    #[test]
    fn test_no_faces() {
        let mut mesh = IndexedMesh::new();
        mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
        let result = decimate_mesh(&mesh, &DecimateParams::default());
        assert!(matches!(result, Err(DecimateError::NoFaces)));
    }

    #[test]
    fn test_invalid_params() {
        let cube = unit_cube();
        let params = DecimateParams {
            target_ratio: 2.0,
            ..DecimateParams::default()
        };
        assert!(matches!(
            decimate_mesh(&cube, &params),
            Err(DecimateError::InvalidRatio(_))
        ));
        assert!(matches!(
            decimate_mesh(&cube, &DecimateParams::with_target_triangles(0)),
            Err(DecimateError::InvalidTargetCount(0))
        ));
    }

    #[test]
    fn test_already_at_target() {
        let cube = unit_cube();
        let result = decimate_mesh(&cube, &DecimateParams::with_target_ratio(1.0)).unwrap();
        assert_eq!(result.final_triangles, 12);
        assert!(!result.was_decimated());
    }

    #[test]
    fn test_sphere_volume_is_preserved() {
        let sphere = IndexedMesh::icosphere(2.0, 4);
        let result = decimate_mesh(&sphere, &DecimateParams::with_reduction(0.9)).unwrap();

        assert!(result.final_triangles <= sphere.faces.len() / 10 + 1);
        assert_relative_eq!(
            result.final_volume,
            result.original_volume,
            max_relative = 1e-6
        );
        let report = mesh_repair::validate_mesh(&result.mesh);
        assert!(report.is_clean(), "{report}");
    }

    #[test]
    fn test_plain_qem_keeps_topology() {
        let sphere = IndexedMesh::icosphere(2.0, 3);
        let params = DecimateParams::with_reduction(0.9).with_preserve_volume(false);
        let result = decimate_mesh(&sphere, &params).unwrap();
        assert!(result.was_decimated());
        let report = mesh_repair::validate_mesh(&result.mesh);
        assert!(report.is_closed && report.is_manifold);
        assert_eq!(report.euler_characteristic(), 2);
    }

    #[test]
    fn test_max_error_stops_early() {
        let sphere = IndexedMesh::icosphere(2.0, 3);
        let params = DecimateParams::with_reduction(0.9).with_max_error(0.0);
        let result = decimate_mesh(&sphere, &params).unwrap();
        assert!(result.collapses_rejected > 0);
        assert!(result.final_triangles > 128);
    }

    #[test]
    fn test_boundary_is_kept() {
        // Open hemisphere-ish patch: drop a band of faces
        let mut sphere = IndexedMesh::icosphere(1.0, 2);
        sphere.faces.truncate(200);
        let result = decimate_mesh(&sphere, &DecimateParams::with_target_ratio(0.3)).unwrap();
        let before = mesh_repair::validate_mesh(&sphere).boundary_edge_count;
        let after = mesh_repair::validate_mesh(&result.mesh).boundary_edge_count;
        assert_eq!(before, after);
    }

    #[test]
    fn test_unreferenced_vertices_are_dropped() {
        let mut cube = unit_cube();
        cube.vertices.push(Vertex::from_coords(9.0, 9.0, 9.0));
        let result = decimate_mesh(&cube, &DecimateParams::with_target_ratio(1.0)).unwrap();
        assert_eq!(result.final_vertices, 8);
    }

    #[test]
    fn test_stops_at_minimal_closed_mesh() {
        let sphere = IndexedMesh::icosphere(1.0, 1);
        let result = decimate_mesh(&sphere, &DecimateParams::with_target_triangles(1)).unwrap();
        assert!(result.final_triangles >= 4);
        let report = mesh_repair::validate_mesh(&result.mesh);
        assert!(report.is_closed && report.is_manifold);
    }
}

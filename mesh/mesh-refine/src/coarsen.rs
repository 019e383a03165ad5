//! Vertex-removal coarsening of dense and flat regions.
//!
//! Each pass scores the selected vertices, sorts the candidates so the
//! strongest match goes first, and removes an independent set of them by
//! half-edge collapse into the nearest neighbour that passes the collapse
//! checks. Once a vertex is removed its one-ring is locked for the rest of
//! the pass. A pass stops early when the face count reaches
//! [`CoarsenParams::min_faces`].

#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]

use mesh_types::IndexedMesh;
use nalgebra::Matrix3;
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::error::{RefineError, RefineResult};
use crate::params::CoarsenParams;
use crate::result::CoarsenStats;
use crate::topology::validate_input;
use crate::work::{CollapseLimits, WorkMesh};

#[derive(Debug, Clone, Copy)]
enum Criterion {
    Dense,
    Flat,
}

impl Criterion {
    const fn label(self) -> &'static str {
        match self {
            Self::Dense => "dense",
            Self::Flat => "flat",
        }
    }
}

/// Remove selected vertices lying in densely sampled regions.
///
/// A vertex is dense when `(l_max / l_mean)^weight < rate`, where `l_max`
/// is its longest incident edge and `l_mean` the mean edge length of the
/// whole mesh. Only vertices whose every edge is short qualify, so an
/// evenly sampled surface keeps most of its vertices.
///
/// # Errors
///
/// Returns an error if the mesh is empty, has invalid indices, or the rate
/// is not a positive finite number.
///
/// # Examples
///
/// ```
/// use mesh_refine::{coarsen_dense, CoarsenParams};
/// use mesh_types::IndexedMesh;
///
/// let mut mesh = IndexedMesh::icosphere(1.0, 3);
/// mesh.select_all();
/// let before = mesh.vertices.len();
///
/// let stats = coarsen_dense(&mut mesh, &CoarsenParams::dense())?;
/// assert_eq!(mesh.vertices.len(), before - stats.vertices_removed);
/// # Ok::<(), mesh_refine::RefineError>(())
/// ```
pub fn coarsen_dense(mesh: &mut IndexedMesh, params: &CoarsenParams) -> RefineResult<CoarsenStats> {
    coarsen(mesh, params, Criterion::Dense)
}

/// Remove selected vertices lying in flat regions.
///
/// The normal tensor `Σ n nᵀ` is summed over the vertex normals of the
/// vertex and its one-ring. With eigenvalues `λ1 ≥ λ2 ≥ λ3`, the vertex is
/// flat when `(λ2 / λ1)^weight < rate`.
///
/// # Errors
///
/// Returns an error if the mesh is empty, has invalid indices, or the rate
/// is not a positive finite number.
pub fn coarsen_flat(mesh: &mut IndexedMesh, params: &CoarsenParams) -> RefineResult<CoarsenStats> {
    coarsen(mesh, params, Criterion::Flat)
}

fn coarsen(
    mesh: &mut IndexedMesh,
    params: &CoarsenParams,
    criterion: Criterion,
) -> RefineResult<CoarsenStats> {
    validate_input(mesh)?;
    if !(params.rate.is_finite() && params.rate > 0.0) {
        return Err(RefineError::InvalidRate(params.rate));
    }

    let limits = CollapseLimits {
        min_valence: params.min_valence,
        min_normal_dot: params.min_normal_dot,
    };
    let mut work = WorkMesh::new(mesh);
    let mut stats = CoarsenStats::default();
    // Each collapse takes two faces with it
    let floor = params.min_faces.saturating_add(2);

    for pass in 0..params.iterations {
        if work.face_count() < floor {
            stats.reached_floor = true;
            break;
        }
        let candidates = match criterion {
            Criterion::Dense => dense_candidates(&work, params),
            Criterion::Flat => flat_candidates(&work, params),
        };
        if pass == 0 {
            stats.candidates = candidates.len();
        }

        let mut locked = vec![false; work.vertex_count()];
        let mut removed = 0;
        for (v, _) in candidates {
            if work.face_count() < floor {
                stats.reached_floor = true;
                break;
            }
            if locked[v as usize] || !work.is_live(v) {
                continue;
            }
            let ring = work.one_ring(v);
            let origin = work.position(v);
            let mut targets: SmallVec<[(u32, f64); 8]> = ring
                .iter()
                .map(|&u| (u, (work.position(u) - origin).norm_squared()))
                .collect();
            targets.sort_by(|a, b| a.1.total_cmp(&b.1));

            if targets
                .iter()
                .any(|&(target, _)| work.try_collapse(v, target, limits))
            {
                locked[v as usize] = true;
                for &u in &ring {
                    locked[u as usize] = true;
                }
                removed += 1;
            }
        }

        stats.passes += 1;
        stats.vertices_removed += removed;
        debug!(
            criterion = criterion.label(),
            pass = pass + 1,
            removed,
            faces = work.face_count(),
            "Coarsening pass"
        );
        if removed == 0 || stats.reached_floor {
            break;
        }
    }

    *mesh = work.into_mesh();
    info!(
        criterion = criterion.label(),
        rate = params.rate,
        removed = stats.vertices_removed,
        reached_floor = stats.reached_floor,
        vertices = mesh.vertices.len(),
        faces = mesh.faces.len(),
        "Coarsened surface"
    );
    Ok(stats)
}

/// Selected dense vertices with their score, densest first.
fn dense_candidates(work: &WorkMesh, params: &CoarsenParams) -> Vec<(u32, f64)> {
    let (total, count) = work.live_faces().fold((0.0, 0usize), |(sum, n), face| {
        let edges: f64 = (0..3)
            .map(|i| (work.position(face[i]) - work.position(face[(i + 1) % 3])).norm())
            .sum();
        (sum + edges, n + 3)
    });
    if count == 0 {
        return Vec::new();
    }
    let mean = total / count as f64;
    if mean <= 0.0 {
        return Vec::new();
    }

    let mut candidates: Vec<(u32, f64)> = (0..work.vertex_count() as u32)
        .filter(|&v| work.is_live(v) && work.is_selected(v))
        .filter_map(|v| {
            let ring = work.one_ring(v);
            if ring.is_empty() {
                return None;
            }
            let p = work.position(v);
            let longest = ring
                .iter()
                .map(|&u| (work.position(u) - p).norm())
                .fold(0.0, f64::max);
            let score = (longest / mean).powf(params.weight);
            (score < params.rate).then_some((v, score))
        })
        .collect();
    candidates.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
    candidates
}

/// Selected flat vertices with their score, flattest first.
fn flat_candidates(work: &WorkMesh, params: &CoarsenParams) -> Vec<(u32, f64)> {
    let mut candidates: Vec<(u32, f64)> = (0..work.vertex_count() as u32)
        .filter(|&v| work.is_live(v) && work.is_selected(v))
        .filter_map(|v| {
            let score = flatness(work, v)?.powf(params.weight);
            (score < params.rate).then_some((v, score))
        })
        .collect();
    candidates.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
    candidates
}

/// `λ2 / λ1` of the normal tensor around `v`; zero on a plane.
fn flatness(work: &WorkMesh, v: u32) -> Option<f64> {
    let tensor = std::iter::once(v)
        .chain(work.one_ring(v))
        .filter_map(|u| work.vertex_normal(u))
        .fold(Matrix3::zeros(), |acc, n| acc + n * n.transpose());

    let e = tensor.symmetric_eigen().eigenvalues;
    let mut eigenvalues = [e.x, e.y, e.z];
    eigenvalues.sort_by(|a, b| b.total_cmp(a));
    (eigenvalues[0] > 0.0).then(|| eigenvalues[1].max(0.0) / eigenvalues[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::{unit_cube, Vector3};

    fn selected_sphere(subdivisions: u32) -> IndexedMesh {
        let mut mesh = IndexedMesh::icosphere(1.0, subdivisions);
        mesh.select_all();
        mesh
    }

    #[test]
    fn flat_sphere_loses_vertices_and_stays_closed() {
        let mut mesh = selected_sphere(3);
        let before = mesh.vertices.len();
        let stats = coarsen_flat(&mut mesh, &CoarsenParams::flat()).unwrap();

        assert!(stats.vertices_removed > 0);
        assert_eq!(mesh.vertices.len(), before - stats.vertices_removed);
        let report = mesh_repair::validate_mesh(&mesh);
        assert!(report.is_clean(), "{report}");
        assert_eq!(report.euler_characteristic(), 2);
    }

    #[test]
    fn tiny_rate_finds_nothing_flat() {
        let mut mesh = selected_sphere(2);
        let original = mesh.clone();
        let stats = coarsen_flat(&mut mesh, &CoarsenParams::new(1e-9, 3)).unwrap();
        assert_eq!(stats.candidates, 0);
        assert_eq!(stats.passes, 1);
        assert_eq!(mesh, original);
    }

    #[test]
    fn cube_corners_are_not_flat() {
        let mut cube = unit_cube();
        cube.select_all();
        let stats = coarsen_flat(&mut cube, &CoarsenParams::flat()).unwrap();
        assert_eq!(stats.vertices_removed, 0);
        assert_eq!(cube.vertices.len(), 8);
    }

    #[test]
    fn unselected_vertices_are_kept() {
        let mut mesh = IndexedMesh::icosphere(1.0, 3);
        let before = mesh.vertices.len();
        let stats = coarsen_dense(&mut mesh, &CoarsenParams::dense()).unwrap();
        assert_eq!(stats.candidates, 0);
        assert_eq!(mesh.vertices.len(), before);
    }

    #[test]
    fn dense_patch_is_coarsened_first() {
        // Squeeze one cap of the sphere so its edges are much shorter
        let mut mesh = selected_sphere(3);
        for v in &mut mesh.vertices {
            if v.position.z > 0.6 {
                let radial = Vector3::new(v.position.x, v.position.y, 0.0);
                v.position -= radial * 0.7;
            }
        }
        let params = CoarsenParams::new(1.0, 1);
        let stats = coarsen_dense(&mut mesh, &params).unwrap();
        assert!(stats.vertices_removed > 0);

        let report = mesh_repair::validate_mesh(&mesh);
        assert!(report.is_closed && report.is_manifold && report.is_orientable);
    }

    #[test]
    fn plane_vertex_has_zero_flatness() {
        let n = 5_u32;
        let vertices = (0..n * n)
            .map(|k| mesh_types::Vertex::from([f64::from(k % n), f64::from(k / n), 0.0]))
            .collect();
        let mut faces = Vec::new();
        for j in 0..n - 1 {
            for i in 0..n - 1 {
                let a = j * n + i;
                faces.push([a, a + 1, a + n + 1]);
                faces.push([a, a + n + 1, a + n]);
            }
        }
        let work = WorkMesh::new(&IndexedMesh::from_parts(vertices, faces));
        let centre = 2 * n + 2;
        assert!(flatness(&work, centre).unwrap() < 1e-12);
    }

    #[test]
    fn sphere_vertex_flatness_follows_curvature() {
        let coarse = WorkMesh::new(&IndexedMesh::icosphere(1.0, 1));
        let fine = WorkMesh::new(&IndexedMesh::icosphere(1.0, 4));
        let coarse_flatness = flatness(&coarse, 0).unwrap();
        let fine_flatness = flatness(&fine, 0).unwrap();
        assert!(fine_flatness < coarse_flatness);
        assert!(fine_flatness < CoarsenParams::flat().rate);
    }

    #[test]
    fn face_floor_stops_removal() {
        let mut mesh = selected_sphere(4);
        let floor = mesh.faces.len() - 1000;
        // Every vertex qualifies at this rate
        let params = CoarsenParams::new(1e6, 50).with_min_faces(floor);
        let stats = coarsen_flat(&mut mesh, &params).unwrap();

        assert!(stats.reached_floor);
        assert!(mesh.faces.len() >= floor);
        assert!(mesh.faces.len() < floor + 2);
        assert!(mesh_repair::validate_mesh(&mesh).is_closed);
    }

    #[test]
    fn face_floor_above_mesh_size_removes_nothing() {
        let mut mesh = selected_sphere(2);
        let original = mesh.clone();
        let params = CoarsenParams::dense().with_min_faces(original.faces.len() + 10);
        let stats = coarsen_dense(&mut mesh, &params).unwrap();
        assert!(stats.reached_floor);
        assert_eq!(stats.vertices_removed, 0);
        assert_eq!(mesh, original);
    }

    #[test]
    fn invalid_rate_is_rejected() {
        let mut mesh = selected_sphere(1);
        let result = coarsen_dense(&mut mesh, &CoarsenParams::new(f64::NAN, 1));
        assert!(matches!(result, Err(RefineError::InvalidRate(_))));
        let result = coarsen_flat(&mut mesh, &CoarsenParams::new(0.0, 1));
        assert!(matches!(result, Err(RefineError::InvalidRate(_))));
    }

    #[test]
    fn empty_mesh_is_rejected() {
        let mut mesh = IndexedMesh::new();
        assert!(matches!(
            coarsen_dense(&mut mesh, &CoarsenParams::dense()),
            Err(RefineError::EmptyMesh)
        ));
    }
}

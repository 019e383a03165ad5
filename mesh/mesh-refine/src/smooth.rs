//! Edge flipping and tangential smoothing.

#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]

use hashbrown::HashSet;
use mesh_types::{IndexedMesh, Point3};
use tracing::{debug, info};

use crate::error::{RefineError, RefineResult};
use crate::params::SmoothParams;
use crate::result::SmoothStats;
use crate::topology::{
    angle_at, edge_face_map, edge_key, normal_of, one_rings, third_after, validate_input,
    vertex_normals,
};

/// Improve triangle quality without changing the vertex count.
///
/// Every iteration first flips edges that violate the Delaunay angle
/// criterion, then moves each selected vertex toward the centroid of its
/// one-ring within its tangent plane. Boundary vertices never move. With
/// `preserve_ridges`, vertices on an edge whose dihedral angle exceeds the
/// ridge angle stay fixed and ridge edges are never flipped.
///
/// # Errors
///
/// Returns an error if the mesh is empty, has invalid indices, or the
/// relaxation factor is outside `(0, 1]`.
///
/// # Examples
///
/// ```
/// use mesh_refine::{smooth, SmoothParams};
/// use mesh_types::IndexedMesh;
///
/// let mut mesh = IndexedMesh::icosphere(1.0, 2);
/// mesh.select_all();
/// let stats = smooth(&mut mesh, &SmoothParams::new(3))?;
/// assert_eq!(stats.iterations, 3);
/// assert_eq!(mesh.faces.len(), 320);
/// # Ok::<(), mesh_refine::RefineError>(())
/// ```
pub fn smooth(mesh: &mut IndexedMesh, params: &SmoothParams) -> RefineResult<SmoothStats> {
    validate_input(mesh)?;
    if !(params.relaxation > 0.0 && params.relaxation <= 1.0) {
        return Err(RefineError::InvalidRelaxation(params.relaxation));
    }

    let cos_ridge = params.ridge_angle.cos();
    let mut stats = SmoothStats::default();

    for iter in 0..params.iterations {
        let flips = if params.enable_flip {
            flip_edges(mesh, params.preserve_ridges, cos_ridge)
        } else {
            0
        };
        let fixed = fixed_vertices(mesh, params.preserve_ridges, cos_ridge);
        let moved = tangential_relax(mesh, &fixed.mask, params.relaxation);

        debug!(
            iteration = iter + 1,
            flips,
            moved,
            ridges = fixed.ridges,
            "Smoothing iteration"
        );
        stats.iterations += 1;
        stats.flips_performed += flips;
        stats.vertices_moved += moved;
        stats.ridge_vertices = fixed.ridges;
    }

    info!(
        iterations = stats.iterations,
        flips = stats.flips_performed,
        preserve_ridges = params.preserve_ridges,
        "Smoothed surface"
    );
    Ok(stats)
}

/// Flip interior edges whose opposite angles sum to more than π.
///
/// A flip is skipped when it would create a duplicate edge, drop an
/// endpoint below valence three, fold either new face against the old
/// pair, or (with ridge preservation) cross a ridge.
fn flip_edges(mesh: &mut IndexedMesh, preserve_ridges: bool, cos_ridge: f64) -> usize {
    let edge_faces = edge_face_map(&mesh.faces);
    let mut edges: HashSet<(u32, u32)> = edge_faces.keys().copied().collect();
    let mut valence = vec![0usize; mesh.vertices.len()];
    for &(a, b) in edge_faces.keys() {
        valence[a as usize] += 1;
        valence[b as usize] += 1;
    }

    // Hash iteration order is arbitrary; sort for reproducible output
    let mut candidates: Vec<((u32, u32), usize, usize)> = edge_faces
        .iter()
        .filter(|(_, faces)| faces.len() == 2)
        .map(|(&edge, faces)| (edge, faces[0], faces[1]))
        .collect();
    candidates.sort_unstable_by_key(|c| c.0);

    let mut touched = vec![false; mesh.faces.len()];
    let mut flips = 0;

    for ((p, q), f0, f1) in candidates {
        if touched[f0] || touched[f1] {
            continue;
        }
        // Orient so f0 holds the directed edge a → b and f1 holds b → a
        let (a, b) = if third_after(mesh.faces[f0], p, q).is_some() {
            (p, q)
        } else {
            (q, p)
        };
        let (Some(c), Some(d)) = (
            third_after(mesh.faces[f0], a, b),
            third_after(mesh.faces[f1], b, a),
        ) else {
            continue;
        };
        if c == d || edges.contains(&edge_key(c, d)) {
            continue;
        }
        if valence[a as usize] <= 3 || valence[b as usize] <= 3 {
            continue;
        }

        let [pa, pb, pc, pd] = [a, b, c, d].map(|v| mesh.vertices[v as usize].position);
        let (Some(n0), Some(n1)) = (normal_of(pa, pb, pc), normal_of(pb, pa, pd)) else {
            continue;
        };
        if preserve_ridges && n0.dot(&n1) < cos_ridge {
            continue;
        }
        if angle_at(pc, pa, pb) + angle_at(pd, pa, pb) <= std::f64::consts::PI + 1e-9 {
            continue;
        }
        let (Some(m0), Some(m1)) = (normal_of(pa, pd, pc), normal_of(pd, pb, pc)) else {
            continue;
        };
        let reference = n0 + n1;
        if m0.dot(&m1) <= 0.0 || m0.dot(&reference) <= 0.0 || m1.dot(&reference) <= 0.0 {
            continue;
        }

        mesh.faces[f0] = [a, d, c];
        mesh.faces[f1] = [d, b, c];
        touched[f0] = true;
        touched[f1] = true;
        edges.remove(&edge_key(a, b));
        edges.insert(edge_key(c, d));
        valence[a as usize] -= 1;
        valence[b as usize] -= 1;
        valence[c as usize] += 1;
        valence[d as usize] += 1;
        flips += 1;
    }

    flips
}

struct FixedVertices {
    mask: Vec<bool>,
    ridges: usize,
}

/// Boundary vertices always; ridge vertices when preserving ridges.
fn fixed_vertices(mesh: &IndexedMesh, preserve_ridges: bool, cos_ridge: f64) -> FixedVertices {
    let mut mask = vec![false; mesh.vertices.len()];
    let mut ridge = vec![false; mesh.vertices.len()];

    for ((a, b), faces) in edge_face_map(&mesh.faces) {
        if faces.len() != 2 {
            mask[a as usize] = true;
            mask[b as usize] = true;
            continue;
        }
        if !preserve_ridges {
            continue;
        }
        let normal = |f: usize| {
            let [x, y, z] = mesh.faces[f].map(|v| mesh.vertices[v as usize].position);
            normal_of(x, y, z)
        };
        if let (Some(n0), Some(n1)) = (normal(faces[0]), normal(faces[1])) {
            if n0.dot(&n1) < cos_ridge {
                ridge[a as usize] = true;
                ridge[b as usize] = true;
            }
        }
    }

    let ridges = ridge.iter().filter(|&&r| r).count();
    for (m, r) in mask.iter_mut().zip(ridge) {
        *m |= r;
    }
    FixedVertices { mask, ridges }
}

/// Move every free selected vertex toward its one-ring centroid, projected
/// onto the vertex tangent plane. Returns the number of vertices moved.
fn tangential_relax(mesh: &mut IndexedMesh, fixed: &[bool], relaxation: f64) -> usize {
    let rings = one_rings(mesh);
    let normals = vertex_normals(mesh);

    let updates: Vec<(usize, Point3<f64>)> = mesh
        .vertices
        .iter()
        .enumerate()
        .filter(|(vi, vertex)| vertex.is_selected() && !fixed[*vi] && !rings[*vi].is_empty())
        .filter_map(|(vi, vertex)| {
            let normal = normals[vi]?;
            let ring = &rings[vi];
            let centroid = ring
                .iter()
                .map(|&u| mesh.vertices[u as usize].position.coords)
                .sum::<mesh_types::Vector3<f64>>()
                / ring.len() as f64;
            let delta = centroid - vertex.position.coords;
            let tangential = delta - normal * normal.dot(&delta);
            (tangential.norm_squared() > 0.0)
                .then(|| (vi, vertex.position + tangential * relaxation))
        })
        .collect();

    let moved = updates.len();
    for (vi, position) in updates {
        mesh.vertices[vi].position = position;
    }
    moved
}

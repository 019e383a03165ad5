//! Per-vertex normals from incident faces.

use mesh_types::{IndexedMesh, Triangle, Vector3};

use crate::error::{OffsetError, OffsetResult};

/// Unit normal of every vertex: the normalised sum of the unit normals of
/// its incident faces.
///
/// Vertices with no incident face, or whose face normals cancel, get `None`.
///
/// # Errors
///
/// Returns an error if the mesh has no faces or a face index is out of
/// range.
pub fn vertex_normals(mesh: &IndexedMesh) -> OffsetResult<Vec<Option<Vector3<f64>>>> {
    validate(mesh)?;

    let mut sums = vec![Vector3::zeros(); mesh.vertices.len()];
    for face in &mesh.faces {
        let [a, b, c] = face.map(|v| mesh.vertices[v as usize].position);
        if let Some(normal) = Triangle::new(a, b, c).normal() {
            for &v in face {
                sums[v as usize] += normal;
            }
        }
    }

    Ok(sums
        .into_iter()
        .map(|sum| sum.try_normalize(f64::EPSILON))
        .collect())
}

/// Recompute and store normals in the vertex attributes.
///
/// Returns the number of vertices left without a normal.
///
/// # Errors
///
/// Same as [`vertex_normals`].
pub fn compute_vertex_normals(mesh: &mut IndexedMesh) -> OffsetResult<usize> {
    let normals = vertex_normals(mesh)?;
    let mut missing = 0;
    for (vertex, normal) in mesh.vertices.iter_mut().zip(normals) {
        missing += usize::from(normal.is_none());
        vertex.attributes.normal = normal;
    }
    Ok(missing)
}

pub(crate) fn validate(mesh: &IndexedMesh) -> OffsetResult<()> {
    if mesh.vertices.is_empty() || mesh.faces.is_empty() {
        return Err(OffsetError::EmptyMesh);
    }
    let vertex_count = mesh.vertices.len();
    match mesh
        .faces
        .iter()
        .flatten()
        .find(|&&v| v as usize >= vertex_count)
    {
        Some(&index) => Err(OffsetError::InvalidIndex {
            index,
            vertex_count,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_types::{unit_cube, Vertex};

    #[test]
    fn sphere_normals_point_outward() {
        let sphere = IndexedMesh::icosphere(3.0, 2);
        let normals = vertex_normals(&sphere).unwrap();
        for (vertex, normal) in sphere.vertices.iter().zip(normals) {
            let radial = vertex.position.coords.normalize();
            assert!(normal.unwrap().dot(&radial) > 0.99);
        }
    }

    #[test]
    fn cube_corner_normal_is_diagonal() {
        let cube = unit_cube();
        let normals = vertex_normals(&cube).unwrap();
        // Vertex 0 sits at the origin corner, so its normal points away
        // from the cube centre
        let n = normals[0].unwrap();
        assert!(n.x < 0.0 && n.y < 0.0 && n.z < 0.0);
        assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn isolated_vertex_has_no_normal() {
        let mut cube = unit_cube();
        cube.vertices.push(Vertex::from_coords(5.0, 5.0, 5.0));
        let missing = compute_vertex_normals(&mut cube).unwrap();
        assert_eq!(missing, 1);
        assert!(cube.vertices[8].attributes.normal.is_none());
        assert!(cube.vertices[0].attributes.normal.is_some());
    }

    #[test]
    fn bad_input_is_rejected() {
        assert!(matches!(
            vertex_normals(&IndexedMesh::new()),
            Err(OffsetError::EmptyMesh)
        ));
        let mut cube = unit_cube();
        cube.faces.push([0, 1, 42]);
        assert!(matches!(
            vertex_normals(&cube),
            Err(OffsetError::InvalidIndex { index: 42, .. })
        ));
    }
}

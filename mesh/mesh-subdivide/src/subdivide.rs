//! Linear midpoint subdivision.

// Mesh indices don't overflow in practice
#![allow(clippy::cast_possible_truncation)]

use hashbrown::HashMap;
use mesh_types::{IndexedMesh, Point3, Vertex, VertexAttributes};
use tracing::{debug, info};

use crate::error::{SubdivideError, SubdivideResult};
use crate::params::SubdivideParams;
use crate::result::SubdivisionResult;

/// Subdivide a mesh by splitting every triangle into four at its edge
/// midpoints, `params.iterations` times.
///
/// Original vertices keep their positions and indices; midpoints of shared
/// edges are created once, so a closed mesh stays closed.
///
/// # Errors
///
/// Returns an error if:
/// - The mesh is empty (no vertices or faces)
/// - A face index is out of range
/// - The resulting mesh would exceed `max_faces`
///
/// # Examples
///
/// ```
/// use mesh_types::{IndexedMesh, Vertex};
/// use mesh_subdivide::{subdivide_mesh, SubdivideParams};
///
/// let mut mesh = IndexedMesh::new();
/// mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(0.5, 1.0, 0.0));
/// mesh.faces.push([0, 1, 2]);
///
/// let result = subdivide_mesh(&mesh, &SubdivideParams::new(3))?;
/// assert_eq!(result.final_faces, 64);
/// assert_eq!(result.final_vertices, 45);
/// # Ok::<(), mesh_subdivide::SubdivideError>(())
/// ```
pub fn subdivide_mesh(
    mesh: &IndexedMesh,
    params: &SubdivideParams,
) -> SubdivideResult<SubdivisionResult> {
    validate(mesh)?;

    let original_faces = mesh.faces.len();
    let original_vertices = mesh.vertices.len();

    // Check projected size
    let projected = params.expected_faces(original_faces).unwrap_or(usize::MAX);
    if projected > params.max_faces {
        return Err(SubdivideError::MeshTooLarge {
            current: original_faces,
            projected,
            max: params.max_faces,
        });
    }

    let mut current = mesh.clone();
    for i in 0..params.iterations {
        current = subdivide_once(&current);
        debug!(
            iteration = i + 1,
            faces = current.faces.len(),
            vertices = current.vertices.len(),
            "Subdivided"
        );
    }

    let result = SubdivisionResult {
        original_faces,
        final_faces: current.faces.len(),
        original_vertices,
        final_vertices: current.vertices.len(),
        iterations: params.iterations,
        mesh: current,
    };
    info!(
        faces = result.final_faces,
        vertices = result.final_vertices,
        iterations = result.iterations,
        "Subdivision complete"
    );
    Ok(result)
}

fn validate(mesh: &IndexedMesh) -> SubdivideResult<()> {
    if mesh.vertices.is_empty() {
        return Err(SubdivideError::EmptyMesh);
    }
    if mesh.faces.is_empty() {
        return Err(SubdivideError::NoFaces);
    }
    let vertex_count = mesh.vertices.len();
    if let Some(&index) = mesh
        .faces
        .iter()
        .flatten()
        .find(|&&v| v as usize >= vertex_count)
    {
        return Err(SubdivideError::InvalidIndex {
            index,
            vertex_count,
        });
    }
    Ok(())
}

/// Split each triangle into 4 by adding edge midpoints.
fn subdivide_once(mesh: &IndexedMesh) -> IndexedMesh {
    // Euler: a closed mesh has F/2 * 3 edges, each adding one vertex
    let mut vertices = Vec::with_capacity(mesh.vertices.len() + mesh.faces.len() * 3 / 2);
    vertices.extend_from_slice(&mesh.vertices);
    let mut faces = Vec::with_capacity(mesh.faces.len() * 4);
    let mut midpoints: HashMap<(u32, u32), u32> = HashMap::with_capacity(mesh.faces.len() * 2);

    let mut midpoint = |a: u32, b: u32, vertices: &mut Vec<Vertex>| -> u32 {
        let key = if a < b { (a, b) } else { (b, a) };
        *midpoints.entry(key).or_insert_with(|| {
            let vertex = interpolate(&mesh.vertices[a as usize], &mesh.vertices[b as usize]);
            vertices.push(vertex);
            (vertices.len() - 1) as u32
        })
    };

    for &[v0, v1, v2] in &mesh.faces {
        let m01 = midpoint(v0, v1, &mut vertices);
        let m12 = midpoint(v1, v2, &mut vertices);
        let m20 = midpoint(v2, v0, &mut vertices);

        // Corner triangles
        faces.push([v0, m01, m20]);
        faces.push([v1, m12, m01]);
        faces.push([v2, m20, m12]);
        // Center triangle
        faces.push([m01, m12, m20]);
    }

    IndexedMesh::from_parts(vertices, faces)
}

/// Midpoint of two vertices, carrying over the attributes both share.
fn interpolate(a: &Vertex, b: &Vertex) -> Vertex {
    let normal = match (a.attributes.normal, b.attributes.normal) {
        (Some(na), Some(nb)) => (na + nb).try_normalize(f64::EPSILON),
        _ => None,
    };
    Vertex {
        position: Point3::from((a.position.coords + b.position.coords) * 0.5),
        attributes: VertexAttributes {
            normal,
            selected: a.attributes.selected && b.attributes.selected,
        },
    }
}

//! Type conversions between mesh types and Bevy types.
//!
//! This module is the only place that knows both `mesh-types` and Bevy
//! types.

#![allow(clippy::cast_possible_truncation)] // f64 -> f32 is intentional for Bevy

use bevy::asset::RenderAssetUsages;
use bevy::math::Vec3;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::Mesh;
use mesh_types::{IndexedMesh, Point3, Triangle, Vector3};

/// Convert a nalgebra Point3 to Bevy Vec3.
#[inline]
#[must_use]
pub fn vec3_from_point(p: &Point3<f64>) -> Vec3 {
    Vec3::new(p.x as f32, p.y as f32, p.z as f32)
}

/// Convert a nalgebra Vector3 to Bevy Vec3.
#[inline]
#[must_use]
pub fn vec3_from_vector(v: &Vector3<f64>) -> Vec3 {
    Vec3::new(v.x as f32, v.y as f32, v.z as f32)
}

/// Smooth-shaded triangle list from an indexed mesh.
///
/// Stored vertex normals are used when present; otherwise each vertex gets
/// the normalised sum of its incident face normals.
#[must_use]
pub fn bevy_mesh(mesh: &IndexedMesh) -> Mesh {
    let positions: Vec<[f32; 3]> = mesh
        .vertices
        .iter()
        .map(|v| vec3_from_point(&v.position).to_array())
        .collect();
    let indices: Vec<u32> = mesh.faces.iter().flatten().copied().collect();

    let mut normals = vec![Vector3::zeros(); mesh.vertices.len()];
    for face in &mesh.faces {
        let [a, b, c] = face.map(|v| mesh.vertices[v as usize].position);
        if let Some(n) = Triangle::new(a, b, c).normal() {
            for &v in face {
                normals[v as usize] += n;
            }
        }
    }
    let normals: Vec<[f32; 3]> = mesh
        .vertices
        .iter()
        .zip(&normals)
        .map(|(vertex, sum)| {
            vertex
                .attributes
                .normal
                .or_else(|| sum.try_normalize(1e-12))
                .map_or([0.0, 1.0, 0.0], |n| vec3_from_vector(&n).to_array())
        })
        .collect();

    let mut out = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    );
    out.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    out.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    out.insert_indices(Indices::U32(indices));
    out
}

/// Unique edges of a mesh as line segments.
#[must_use]
pub fn edge_segments(mesh: &IndexedMesh) -> Vec<(Vec3, Vec3)> {
    mesh.unique_edges()
        .into_iter()
        .map(|(a, b)| {
            (
                vec3_from_point(&mesh.vertices[a as usize].position),
                vec3_from_point(&mesh.vertices[b as usize].position),
            )
        })
        .collect()
}

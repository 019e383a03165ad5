//! Core mesh types for the surface sampling pipeline.
//!
//! This crate provides the data model every other `mesh-*` crate works on:
//!
//! - [`Vertex`] - A point in 3D space with optional attributes
//! - [`IndexedMesh`] - A triangle mesh with indexed vertices
//! - [`Triangle`] - A concrete triangle with vertex positions
//! - [`Aabb`] - Axis-aligned bounding box
//! - [`MarkedSurface`] - A mesh with per-face markers and root metadata
//! - [`PointSet`] - An ordered sequence of 3D points
//!
//! # Interchange
//!
//! [`MarkedSurface`] and [`PointSet`] are the two explicit interchange
//! types at the stage boundaries of the pipeline. A marked surface is
//! what the refinement stage produces and the OBJ writer consumes; a
//! point set is what clustering produces and the structure writer
//! consumes.
//!
//! # Units
//!
//! Coordinates are `f64` in the units of the input structure (Ångström
//! for PDB files).
//!
//! # Winding
//!
//! Face winding is **counter-clockwise (CCW) when viewed from outside**.
//! Normals point outward by the right-hand rule, and a correctly oriented
//! closed mesh has positive [`IndexedMesh::signed_volume`].
//!
//! # Example
//!
//! ```
//! use mesh_types::{IndexedMesh, MeshTopology, Point3, Vertex};
//!
//! let mut mesh = IndexedMesh::new();
//! mesh.vertices.push(Vertex::new(Point3::new(0.0, 0.0, 0.0)));
//! mesh.vertices.push(Vertex::new(Point3::new(1.0, 0.0, 0.0)));
//! mesh.vertices.push(Vertex::new(Point3::new(0.5, 1.0, 0.0)));
//! mesh.faces.push([0, 1, 2]);
//!
//! assert_eq!(mesh.face_count(), 1);
//! assert!(!mesh.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod bounds;
mod mesh;
mod points;
mod surface;
mod traits;
mod triangle;
mod vertex;

pub use bounds::Aabb;
pub use mesh::{unit_cube, IndexedMesh};
pub use points::PointSet;
pub use surface::{MarkedSurface, SurfaceInfo};
pub use traits::{MeshBounds, MeshTopology};
pub use triangle::Triangle;
pub use vertex::{Vertex, VertexAttributes};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_serde<T: Serialize + DeserializeOwned>() {}

    #[test]
    fn stage_boundary_types_serialize() {
        assert_serde::<IndexedMesh>();
        assert_serde::<MarkedSurface>();
        assert_serde::<PointSet>();
        assert_serde::<Aabb>();
    }
}

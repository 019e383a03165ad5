//! Mesh topology diagnostics, orientation and component handling.
//!
//! This crate provides tools for:
//! - Surface diagnostics (closed, manifold, orientable, inside-out)
//! - Winding order correction with outward orientation per component
//! - Connected component analysis and splitting
//!
//! Diagnostics never fail: a non-manifold or non-orientable mesh yields a
//! report, not an error.
//!
//! # Example
//!
//! ```
//! use mesh_repair::{orient_outward, split_into_components, validate_mesh};
//! use mesh_types::IndexedMesh;
//!
//! let mut mesh = IndexedMesh::icosphere(2.0, 2);
//! mesh.flip_normals();
//!
//! let report = validate_mesh(&mesh);
//! assert!(report.is_inside_out);
//!
//! orient_outward(&mut mesh);
//! let parts = split_into_components(&mesh).unwrap();
//! assert_eq!(parts.len(), 1);
//! assert!(parts[0].signed_volume() > 0.0);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod adjacency;
pub mod components;
mod error;
mod validate;
pub mod winding;

pub use adjacency::{face_edges, has_directed_edge, MeshAdjacency};
pub use error::{RepairError, RepairResult};
pub use validate::{report_diagnostics, validate_mesh, MeshReport};

pub use components::{find_connected_components, split_into_components, ComponentAnalysis};
pub use winding::{count_inconsistent_faces, is_orientable, orient_outward, OrientationReport};

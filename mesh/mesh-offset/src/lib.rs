//! Normal-based surface expansion.
//!
//! Pushes a closed surface outward by repeatedly moving every vertex along
//! its vertex normal, the normalised sum of its incident unit face normals.
//! Unlike an SDF offset this never re-triangulates, so the expanded mesh
//! keeps the connectivity of its input.
//!
//! # Example
//!
//! ```
//! use mesh_types::IndexedMesh;
//! use mesh_offset::{expand, OffsetConfig};
//!
//! let mut shell = IndexedMesh::icosphere(20.0, 2);
//! let volume = shell.volume();
//! let stats = expand(&mut shell, 2.0, &OffsetConfig::default())?;
//! assert_eq!(stats.steps, 2);
//! assert!(shell.volume() > volume);
//! # Ok::<(), mesh_offset::OffsetError>(())
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod normals;
mod offset;

pub use error::{OffsetError, OffsetResult};
pub use normals::{compute_vertex_normals, vertex_normals};
pub use offset::{expand, expansion_steps, warp_along_normals, ExpansionStats, OffsetConfig};

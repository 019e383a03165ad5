//! Surface refinement for molecular surface meshes.
//!
//! Three operations, each working in place on an [`IndexedMesh`] and only
//! touching vertices whose `selected` flag is set:
//! - **Dense coarsening**: removes vertices whose longest incident edge is
//!   still short compared with the mesh average
//! - **Flat coarsening**: removes vertices whose neighbourhood normals all
//!   point the same way
//! - **Smoothing**: Delaunay edge flips followed by tangential relaxation,
//!   optionally keeping ridges fixed
//!
//! Vertex removal is a half-edge collapse that keeps closed manifold
//! surfaces closed and manifold. [`CoarsenParams::min_faces`] bounds how far
//! a surface can shrink.
//!
//! # Example
//!
//! ```
//! use mesh_refine::{coarsen_dense, coarsen_flat, smooth, CoarsenParams, RefineStats, SmoothParams};
//! use mesh_types::IndexedMesh;
//!
//! let mut mesh = IndexedMesh::icosphere(5.0, 3);
//! mesh.select_all();
//!
//! coarsen_dense(&mut mesh, &CoarsenParams::dense())?;
//! coarsen_flat(&mut mesh, &CoarsenParams::flat())?;
//! smooth(&mut mesh, &SmoothParams::new(3).with_preserve_ridges(true))?;
//!
//! let stats = RefineStats::of(&mesh);
//! assert_eq!(stats.vertices + stats.faces, stats.edges + 2);
//! # Ok::<(), mesh_refine::RefineError>(())
//! ```
//!
//! [`IndexedMesh`]: mesh_types::IndexedMesh

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod coarsen;
mod error;
mod params;
mod result;
mod smooth;
mod topology;
mod work;

pub use coarsen::{coarsen_dense, coarsen_flat};
pub use error::{RefineError, RefineResult};
pub use params::{CoarsenParams, SmoothParams};
pub use result::{CoarsenStats, RefineStats, SmoothStats};
pub use smooth::smooth;

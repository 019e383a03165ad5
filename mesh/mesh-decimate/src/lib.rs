//! Mesh simplification using quadric error metrics.
//!
//! This crate provides mesh decimation (simplification) by iteratively collapsing edges
//! while minimizing geometric error using the Quadric Error Metrics (QEM) algorithm.
//!
//! # Features
//!
//! - **Edge collapse**: Iteratively collapse edges with lowest error
//! - **Volume preservation**: Merged vertices are placed so the enclosed volume is unchanged
//! - **Boundary preservation**: Optionally preserve mesh boundaries
//! - **Target control**: Specify target by triangle count, ratio or reduction
//!
//! # Example
//!
//! ```
//! use mesh_types::IndexedMesh;
//! use mesh_decimate::{decimate_mesh, DecimateParams};
//!
//! let sphere = IndexedMesh::icosphere(1.0, 3);
//!
//! // Remove 75% of the triangles
//! let result = decimate_mesh(&sphere, &DecimateParams::with_reduction(0.75))?;
//! println!("{result}");
//! assert!(result.final_triangles <= 320);
//! # Ok::<(), mesh_decimate::DecimateError>(())
//! ```
//!
//! # Algorithm
//!
//! 1. For each vertex, accumulate an area-weighted quadric of the planes of
//!    its adjacent faces
//! 2. For each edge, place the merged vertex at the quadric minimum, subject
//!    to the neighbourhood volume constraint when volume preservation is on
//! 3. Collapse the cheapest edge, re-price its neighbourhood and repeat
//!    until the target is reached
//! 4. Reject collapses that break the link condition, flip a face or touch
//!    a preserved boundary

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod decimate;
mod error;
mod params;
mod quadric;
mod result;

pub use decimate::decimate_mesh;
pub use error::{DecimateError, DecimateResult};
pub use params::DecimateParams;
pub use quadric::Quadric;
pub use result::DecimationResult;

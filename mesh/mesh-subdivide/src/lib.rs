//! Linear mesh subdivision.
//!
//! Splits every triangle into four at its edge midpoints. Positions of the
//! original vertices never move, so the surface geometry is unchanged and
//! only its sampling density grows: `n` iterations multiply the face count
//! by `4ⁿ`.
//!
//! # Example
//!
//! ```
//! use mesh_types::unit_cube;
//! use mesh_subdivide::{subdivide_mesh, SubdivideParams};
//!
//! let cube = unit_cube();
//! let result = subdivide_mesh(&cube, &SubdivideParams::new(2))?;
//!
//! assert_eq!(result.final_faces, 12 * 16);
//! assert!((result.mesh.signed_volume() - 1.0).abs() < 1e-12);
//! # Ok::<(), mesh_subdivide::SubdivideError>(())
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod params;
mod result;
mod subdivide;

pub use error::{SubdivideError, SubdivideResult};
pub use params::SubdivideParams;
pub use result::SubdivisionResult;
pub use subdivide::subdivide_mesh;

//! Mesh file I/O for surface sampling.
//!
//! Wavefront OBJ is the interchange format between surface refinement and
//! the rest of the pipeline. Plain meshes round-trip exactly; marked
//! surfaces additionally carry per-face markers (as `g marker_<n>` groups)
//! and root metadata (as a `# surface ...` comment) so downstream
//! volumetric meshers can pick them up.
//!
//! # Example
//!
//! ```no_run
//! use mesh_io::{load_obj, save_marked_obj};
//! use mesh_types::{IndexedMesh, MarkedSurface};
//!
//! let mut surface = MarkedSurface::new(IndexedMesh::icosphere(1.0, 2));
//! surface.fill_markers(23);
//! save_marked_obj(&surface, "sphere.obj").unwrap();
//!
//! let mesh = load_obj("sphere.obj").unwrap();
//! assert_eq!(mesh.faces.len(), 320);
//! ```

#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod obj;

pub use error::{IoError, IoResult};
pub use obj::{load_marked_obj, load_obj, read_obj, save_marked_obj, save_obj, write_marked_obj};

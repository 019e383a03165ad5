//! Gaussian molecular surfaces.
//!
//! Turns a list of atoms into a closed, outward-oriented triangle mesh:
//!
//! 1. Sample a smooth density on a regular grid, each atom contributing
//!    `exp(B (d²/r² - 1))` where `r` is its van der Waals radius
//! 2. Extract the level set `density = isovalue` with marching tetrahedra
//!
//! With the default blobbyness of `-0.2` and isovalue of `2.5` the result
//! is the smooth, slightly inflated envelope commonly used as a starting
//! point for protein surface meshing.
//!
//! # Example
//!
//! ```
//! use mesh_molsurf::{gaussian_surface, Atom, Element, GaussianSurfaceParams};
//! use nalgebra::Point3;
//!
//! let atoms: Vec<Atom> = (0..8)
//!     .map(|i| {
//!         let p = Point3::new(f64::from(i & 1), f64::from((i >> 1) & 1), f64::from(i >> 2));
//!         Atom::new(Element::Oxygen, p * 1.2)
//!     })
//!     .collect();
//!
//! let params = GaussianSurfaceParams::default().with_isovalue(1.5);
//! let surface = gaussian_surface(&atoms, &params).unwrap();
//! assert!(surface.mesh.volume() > 0.0);
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod atom;
mod density;
mod error;
mod grid;
mod marching;
mod params;
mod surface;

pub use atom::{Atom, Element};
pub use density::sample_density;
pub use error::{MolsurfError, MolsurfResult};
pub use grid::ScalarGrid;
pub use marching::extract_isosurface;
pub use params::GaussianSurfaceParams;
pub use surface::{gaussian_surface, GaussianSurface};

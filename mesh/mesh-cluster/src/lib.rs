//! Uniform surface resampling by clustering.
//!
//! Partitions a triangle mesh into a requested number of regions of roughly
//! equal area with the approximated centroidal Voronoi diagram (ACVD) of
//! Valette and Chassery, and represents each region by one point. Dense
//! inputs give better balanced regions, so meshes are usually subdivided
//! first.
//!
//! The pipeline:
//! 1. Weight every vertex by one third of its incident triangle area
//! 2. Seed clusters by farthest-point sampling along mesh edges and grow
//!    them with a multi-source Dijkstra
//! 3. Move boundary vertices between neighbouring clusters while the
//!    energy `Σ_c |Σ w_i x_i|² / Σ w_i` increases
//! 4. Snap each cluster centroid to its nearest vertex (KD-tree) and build
//!    the dual shell over the representatives
//!
//! # Example
//!
//! ```
//! use mesh_types::IndexedMesh;
//! use mesh_cluster::{cluster_mesh, ClusterParams};
//!
//! let sphere = IndexedMesh::icosphere(5.0, 3);
//! let clustering = cluster_mesh(&sphere, &ClusterParams::new(20))?;
//! println!("{clustering}");
//! assert_eq!(clustering.points.len(), 20);
//! assert!(!clustering.shell.faces.is_empty());
//! # Ok::<(), mesh_cluster::ClusterError>(())
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod acvd;
mod error;
mod graph;
mod params;
mod result;
mod seeds;
mod shell;

pub use acvd::cluster_mesh;
pub use error::{ClusterError, ClusterResult};
pub use graph::SurfaceGraph;
pub use params::ClusterParams;
pub use result::Clustering;
pub use seeds::{farthest_point_seeds, Seeding};
pub use shell::dual_shell;

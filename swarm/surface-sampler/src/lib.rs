//! Swarm point sampling around a molecular surface.
//!
//! Turns a protein structure into evenly spaced points on a surface pushed
//! out from the molecule by a fixed distance:
//!
//! 1. Gaussian molecular surface, oriented outward, first component kept
//! 2. Smoothing and five rounds of coarsening, exported as `<stem>.obj`
//! 3. Volume-preserving decimation of the reloaded surface
//! 4. Expansion along vertex normals, one step per whole unit of distance
//! 5. Linear subdivision and ACVD clustering into the requested point count
//! 6. Optional preview, then the points written as `<stem>_swarms.pdb`
//!
//! # Example
//!
//! ```no_run
//! use surface_sampler::{run, SamplerConfig};
//!
//! let config = SamplerConfig::new("1abc.pdb", 10.0, 400);
//! let output = run(&config)?;
//! println!("{} points in {}", output.clustering.cluster_count(), output.swarms_path.display());
//! # Ok::<(), surface_sampler::SamplerError>(())
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod config;
mod error;
pub mod pipeline;
pub mod structure;

pub use config::SamplerConfig;
pub use error::{SamplerError, SamplerResult};
pub use pipeline::{run, run_with, SamplerOutput};

/// Show the expanded surface, the dual shell and the swarm points.
///
/// Blocks until the window is closed.
///
/// # Errors
///
/// Returns [`SamplerError::Viewer`] if the window exits abnormally.
#[cfg(feature = "preview")]
pub fn preview(output: &SamplerOutput) -> SamplerResult<()> {
    let scene = swarm_viewer::PreviewScene::new(
        output.expanded.clone(),
        output.clustering.shell.clone(),
        output.clustering.points.clone(),
    );
    swarm_viewer::show(scene)?;
    Ok(())
}

/// Without the `preview` feature there is no viewer to open.
///
/// # Errors
///
/// Never fails.
#[cfg(not(feature = "preview"))]
#[allow(clippy::unnecessary_wraps)] // Same signature with and without the viewer
pub fn preview(_output: &SamplerOutput) -> SamplerResult<()> {
    tracing::info!("Preview skipped, built without the `preview` feature");
    Ok(())
}

//! Interactive preview for surface-sampler results.
//!
//! Opens one window showing the expanded surface (smooth shaded), the dual
//! shell over the resampled points and the points themselves as red
//! spheres, overlaid under a single orbit camera with a bounding box.
//!
//! [`show`] blocks until the window is closed.
//!
//! # Example
//!
//! ```no_run
//! use mesh_types::{IndexedMesh, PointSet};
//! use swarm_viewer::{show, PreviewScene};
//!
//! let sphere = IndexedMesh::icosphere(10.0, 3);
//! let points = PointSet::from(&IndexedMesh::icosphere(10.0, 1));
//! show(PreviewScene::new(sphere, IndexedMesh::new(), points))?;
//! # Ok::<(), swarm_viewer::ViewerError>(())
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

pub mod camera;
pub mod convert;
mod error;
pub mod plugin;
mod scene;

use bevy::log::LogPlugin;
use bevy::prelude::*;
use tracing::info;

pub use error::{ViewerError, ViewerResult};
pub use plugin::SwarmViewerPlugin;
pub use scene::PreviewScene;

/// Open the preview window and block until it is closed.
///
/// Logging stays with the caller's subscriber; Bevy's log plugin is
/// disabled.
///
/// # Errors
///
/// Returns [`ViewerError::EmptyScene`] when there is nothing to draw, or
/// [`ViewerError::Exit`] when the app loop ends with an error code.
pub fn show(scene: PreviewScene) -> ViewerResult<()> {
    if scene.is_empty() {
        return Err(ViewerError::EmptyScene);
    }
    info!(
        points = scene.points.len(),
        shell_faces = scene.shell.faces.len(),
        "Opening preview window"
    );

    let exit = App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "surface-sampler".into(),
                        ..default()
                    }),
                    ..default()
                })
                .disable::<LogPlugin>(),
        )
        .add_plugins(SwarmViewerPlugin::new(scene))
        .run();

    match exit {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => Err(ViewerError::Exit(code)),
    }
}

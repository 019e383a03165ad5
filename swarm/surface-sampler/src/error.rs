//! Error types for the sampling pipeline.

use std::path::PathBuf;

use mesh_cluster::ClusterError;
use mesh_decimate::DecimateError;
use mesh_io::IoError;
use mesh_molsurf::MolsurfError;
use mesh_offset::OffsetError;
use mesh_refine::RefineError;
use mesh_repair::RepairError;
use mesh_subdivide::SubdivideError;
use thiserror::Error;

/// Result type for pipeline operations.
pub type SamplerResult<T> = Result<T, SamplerError>;

/// Errors raised by any pipeline stage.
#[derive(Debug, Error)]
pub enum SamplerError {
    /// The structure file could not be read or written.
    #[error("structure file {path}: {message}")]
    Structure {
        /// File involved.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },

    /// At least one point must be requested.
    #[error("point count must be positive, got {0}")]
    InvalidPointCount(usize),

    /// The expansion distance is NaN or infinite.
    #[error("expansion distance must be finite, got {0}")]
    InvalidDistance(f64),

    /// Splitting the surface produced nothing to keep.
    #[error("molecular surface has no connected components")]
    NoComponents,

    /// Surface construction failed.
    #[error("molecular surface")]
    Molsurf(#[from] MolsurfError),

    /// Diagnostics or component splitting failed.
    #[error("surface repair")]
    Repair(#[from] RepairError),

    /// Smoothing or coarsening failed.
    #[error("surface refinement")]
    Refine(#[from] RefineError),

    /// Exporting or reloading the intermediate mesh failed.
    #[error("mesh file")]
    Io(#[from] IoError),

    /// Decimation failed.
    #[error("decimation")]
    Decimate(#[from] DecimateError),

    /// Normal expansion failed.
    #[error("expansion")]
    Offset(#[from] OffsetError),

    /// Subdivision failed.
    #[error("subdivision")]
    Subdivide(#[from] SubdivideError),

    /// Clustering failed.
    #[error("clustering")]
    Cluster(#[from] ClusterError),

    /// The preview window exited abnormally.
    #[cfg(feature = "preview")]
    #[error("preview")]
    Viewer(#[from] swarm_viewer::ViewerError),
}

impl SamplerError {
    /// Structure error for `path`.
    pub fn structure(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Structure {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn wrapped_errors_keep_their_source() {
        let err = SamplerError::from(ClusterError::ZeroClusters);
        assert_eq!(err.to_string(), "clustering");
        assert!(err.source().is_some());
    }

    #[test]
    fn structure_error_names_the_file() {
        let err = SamplerError::structure("1abc.pdb", "no atoms");
        assert_eq!(err.to_string(), "structure file 1abc.pdb: no atoms");
    }
}

//! Error types for surface refinement.

use thiserror::Error;

/// Errors that can occur during refinement operations.
#[derive(Debug, Error)]
pub enum RefineError {
    /// Mesh has no vertices.
    #[error("Mesh has no vertices")]
    EmptyMesh,

    /// Mesh has no faces.
    #[error("Mesh has no faces")]
    NoFaces,

    /// A face references a vertex that does not exist.
    #[error("Face references vertex {index} but mesh has {vertex_count} vertices")]
    InvalidIndex {
        /// The offending index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// Coarsening rate is not a positive finite number.
    #[error("Invalid coarsening rate: {0} (must be > 0)")]
    InvalidRate(f64),

    /// Relaxation factor outside `(0, 1]`.
    #[error("Invalid relaxation factor: {0} (must be in (0, 1])")]
    InvalidRelaxation(f64),
}

/// Result type for refinement operations.
pub type RefineResult<T> = std::result::Result<T, RefineError>;

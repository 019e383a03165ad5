//! Error types for mesh offset operations.

use thiserror::Error;

/// Result type for offset operations.
pub type OffsetResult<T> = Result<T, OffsetError>;

/// Errors that can occur during mesh offset.
#[derive(Debug, Error)]
pub enum OffsetError {
    /// Mesh is empty (no vertices or faces).
    #[error("mesh is empty")]
    EmptyMesh,

    /// A face references a vertex that does not exist.
    #[error("face references vertex {index}, but mesh has {vertex_count} vertices")]
    InvalidIndex {
        /// Offending index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// Offset distance is invalid.
    #[error("invalid offset distance: {0}")]
    InvalidDistance(f64),

    /// Per-step displacement is invalid.
    #[error("invalid warp scale: {0}")]
    InvalidScale(f64),
}

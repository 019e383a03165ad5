//! Error types for clustering.

use thiserror::Error;

/// Result type for clustering operations.
pub type ClusterResult<T> = Result<T, ClusterError>;

/// Errors that can occur during clustering.
#[derive(Debug, Error)]
pub enum ClusterError {
    /// Mesh has no vertices.
    #[error("mesh has no vertices")]
    EmptyMesh,

    /// Mesh has no faces, so no vertex carries area.
    #[error("mesh has no faces")]
    NoFaces,

    /// A face references a vertex that does not exist.
    #[error("face references vertex {index}, but mesh has {vertex_count} vertices")]
    InvalidIndex {
        /// Offending index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// Zero clusters were requested.
    #[error("cluster count must be at least 1")]
    ZeroClusters,
}

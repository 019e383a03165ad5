//! Result types for decimation operations.

// Triangle counts don't overflow in practice
#![allow(clippy::cast_precision_loss)]

use mesh_types::IndexedMesh;

/// Result of mesh decimation.
#[derive(Debug, Clone)]
pub struct DecimationResult {
    /// The decimated mesh, without unreferenced vertices.
    pub mesh: IndexedMesh,

    /// Number of triangles in original mesh.
    pub original_triangles: usize,

    /// Number of triangles in decimated mesh.
    pub final_triangles: usize,

    /// Number of vertices in original mesh.
    pub original_vertices: usize,

    /// Number of vertices in decimated mesh.
    pub final_vertices: usize,

    /// Number of edge collapses performed.
    pub collapses_performed: usize,

    /// Number of edge collapses rejected (e.g., would create non-manifold).
    pub collapses_rejected: usize,

    /// Signed volume before decimation.
    pub original_volume: f64,

    /// Signed volume after decimation.
    pub final_volume: f64,
}

impl DecimationResult {
    /// Get the reduction ratio (final / original).
    #[must_use]
    pub fn reduction_ratio(&self) -> f64 {
        if self.original_triangles == 0 {
            1.0
        } else {
            self.final_triangles as f64 / self.original_triangles as f64
        }
    }

    /// Get the percentage of triangles removed.
    #[must_use]
    pub fn reduction_percent(&self) -> f64 {
        (1.0 - self.reduction_ratio()) * 100.0
    }

    /// Relative change of the enclosed volume.
    #[must_use]
    pub fn volume_change(&self) -> f64 {
        if self.original_volume == 0.0 {
            0.0
        } else {
            (self.final_volume - self.original_volume) / self.original_volume
        }
    }

    /// Check if any decimation occurred.
    #[must_use]
    pub const fn was_decimated(&self) -> bool {
        self.collapses_performed > 0
    }
}

impl std::fmt::Display for DecimationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Decimation: {} → {} triangles, {} → {} points ({:.1}% reduction, {} collapses)",
            self.original_triangles,
            self.final_triangles,
            self.original_vertices,
            self.final_vertices,
            self.reduction_percent(),
            self.collapses_performed
        )
    }
}

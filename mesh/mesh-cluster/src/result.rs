//! Clustering output.

use mesh_types::{IndexedMesh, PointSet};

/// Result of ACVD clustering.
#[derive(Debug, Clone)]
pub struct Clustering {
    /// One representative point per cluster, in cluster order.
    pub points: PointSet,

    /// Dual mesh over the representatives: one triangle per distinct triple
    /// of clusters meeting at a face of the input.
    pub shell: IndexedMesh,

    /// Cluster of each input vertex; `None` for vertices outside every face.
    pub labels: Vec<Option<u32>>,

    /// Reassignment sweeps performed.
    pub sweeps: u32,

    /// Vertices moved between clusters over all sweeps.
    pub moves: usize,

    /// Final value of `Σ_c |Σ w_i x_i|² / Σ w_i`.
    pub energy: f64,
}

impl Clustering {
    /// Number of clusters.
    #[must_use]
    pub fn cluster_count(&self) -> usize {
        self.points.len()
    }

    /// Number of vertices in each cluster.
    #[must_use]
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.cluster_count()];
        for &label in self.labels.iter().flatten() {
            if let Some(size) = sizes.get_mut(label as usize) {
                *size += 1;
            }
        }
        sizes
    }
}

impl std::fmt::Display for Clustering {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Clustering: {} clusters, {} sweeps, {} moves, shell {} faces",
            self.cluster_count(),
            self.sweeps,
            self.moves,
            self.shell.faces.len()
        )
    }
}

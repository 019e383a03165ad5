//! Clustering parameters.

/// Parameters for ACVD clustering.
#[derive(Debug, Clone)]
pub struct ClusterParams {
    /// Number of clusters, and so of output points.
    pub clusters: usize,

    /// Upper bound on reassignment sweeps. Default: 100
    pub max_sweeps: u32,

    /// Smallest energy gain that counts as an improvement, relative to the
    /// total energy. Default: 1e-12
    pub tolerance: f64,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            clusters: 1,
            max_sweeps: 100,
            tolerance: 1e-12,
        }
    }
}

impl ClusterParams {
    /// Parameters for `clusters` regions.
    #[must_use]
    pub fn new(clusters: usize) -> Self {
        Self {
            clusters,
            ..Self::default()
        }
    }

    /// Set the sweep limit.
    #[must_use]
    pub const fn with_max_sweeps(mut self, max_sweeps: u32) -> Self {
        self.max_sweeps = max_sweeps;
        self
    }

    /// Set the improvement tolerance.
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

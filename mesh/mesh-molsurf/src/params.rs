//! Parameters for Gaussian surface construction.

/// Parameters for the Gaussian molecular surface.
///
/// Each atom contributes `exp(blobbyness * (d² / r² - 1))` to the density
/// at distance `d`, so the contribution is exactly `1.0` on the van der
/// Waals sphere. The surface is the level set `density = isovalue`.
#[derive(Debug, Clone)]
pub struct GaussianSurfaceParams {
    /// Decay rate of each atom's density. Must be negative. Default: -0.2
    pub blobbyness: f64,

    /// Density level of the extracted surface. Default: 2.5
    pub isovalue: f64,

    /// Edge length of a grid cell in Å. Default: 1.0
    pub grid_spacing: f64,

    /// Atom contributions below this value are ignored. Default: 1e-3
    pub cutoff: f64,

    /// Upper bound on grid points, to fail fast on huge inputs.
    /// Default: 64 million
    pub max_grid_points: usize,
}

impl Default for GaussianSurfaceParams {
    fn default() -> Self {
        Self {
            blobbyness: -0.2,
            isovalue: 2.5,
            grid_spacing: 1.0,
            cutoff: 1e-3,
            max_grid_points: 64_000_000,
        }
    }
}

impl GaussianSurfaceParams {
    /// Finer grid for small structures or final renders.
    #[must_use]
    pub fn fine() -> Self {
        Self {
            grid_spacing: 0.5,
            ..Default::default()
        }
    }

    /// Coarse grid for quick previews.
    #[must_use]
    pub fn coarse() -> Self {
        Self {
            grid_spacing: 2.0,
            ..Default::default()
        }
    }

    /// Set the grid spacing.
    #[must_use]
    pub const fn with_grid_spacing(mut self, spacing: f64) -> Self {
        self.grid_spacing = spacing;
        self
    }

    /// Set the isovalue.
    #[must_use]
    pub const fn with_isovalue(mut self, isovalue: f64) -> Self {
        self.isovalue = isovalue;
        self
    }

    /// Set the blobbyness.
    #[must_use]
    pub const fn with_blobbyness(mut self, blobbyness: f64) -> Self {
        self.blobbyness = blobbyness;
        self
    }

    /// Distance beyond which an atom of radius `radius` contributes less
    /// than [`cutoff`](Self::cutoff).
    ///
    /// Solves `exp(B (d²/r² - 1)) = cutoff` for `d`.
    #[must_use]
    pub fn influence_radius(&self, radius: f64) -> f64 {
        let ratio_sq = 1.0 + self.cutoff.ln() / self.blobbyness;
        radius * ratio_sq.max(0.0).sqrt()
    }
}

//! Pipeline configuration.

use std::path::{Path, PathBuf};

use mesh_molsurf::GaussianSurfaceParams;

use crate::error::{SamplerError, SamplerResult};

/// Inputs of one sampling run plus the fixed recipe constants.
///
/// Only the structure path, distance and point count vary per run; grid
/// spacing and isovalue are tunable but default to the values the recipe
/// was calibrated with.
#[derive(Debug, Clone)]
pub struct SamplerConfig {
    /// Input structure (PDB or mmCIF).
    pub molecule: PathBuf,

    /// Requested expansion distance. Only the integer part is used.
    pub distance: f64,

    /// Number of swarm points to produce.
    pub points: usize,

    /// Density grid spacing in Å. Default: 1.0
    pub grid_spacing: f64,

    /// Density level of the molecular surface. Default: 2.5
    pub isovalue: f64,

    /// Directory for both outputs. Defaults to the working directory.
    pub output_dir: Option<PathBuf>,
}

impl SamplerConfig {
    /// Rounds of coarsen dense, coarsen flat and smooth.
    pub const REFINE_ROUNDS: u32 = 5;
    /// Bound on `(longest edge / mean edge)^DENSE_WEIGHT` for a dense vertex.
    pub const DENSE_RATE: f64 = 2.0;
    /// Exponent of the dense edge ratio.
    pub const DENSE_WEIGHT: f64 = 10.0;
    /// Dense coarsening passes per round.
    pub const DENSE_ITERATIONS: u32 = 3;
    /// Normal tensor eigenvalue ratio below which a region counts as flat.
    pub const FLAT_RATE: f64 = 0.1;
    /// Flat coarsening passes per round.
    pub const FLAT_ITERATIONS: u32 = 3;
    /// Ridge-preserving smoothing iterations per round.
    pub const SMOOTH_ITERATIONS: u32 = 3;
    /// Smoothing iterations before the first round, ridges not preserved.
    pub const INITIAL_SMOOTH_ITERATIONS: u32 = 5;
    /// Smallest face count coarsening may leave, whatever the point count.
    pub const MIN_REFINED_FACES: usize = 1000;
    /// Refined faces kept per requested point.
    ///
    /// Decimation keeps 3% of the faces and three subdivisions turn each
    /// into about 32 vertices, so four faces per point leave the clustering
    /// close to four vertices per cluster.
    pub const FACES_PER_POINT: usize = 4;
    /// Marker written on every face of the exported surface.
    pub const FACE_MARKER: i32 = 23;
    /// Region marker of the exported surface.
    pub const ROOT_MARKER: i32 = -1;
    /// Fraction of triangles removed by decimation.
    pub const DECIMATION_REDUCTION: f64 = 0.97;
    /// Displacement along the unit normal per expansion step.
    pub const WARP_SCALE: f64 = 2.0;
    /// Linear subdivision passes before clustering.
    pub const SUBDIVISIONS: u32 = 3;

    /// Configuration with default surface parameters.
    #[must_use]
    pub fn new(molecule: impl Into<PathBuf>, distance: f64, points: usize) -> Self {
        let surface = GaussianSurfaceParams::default();
        Self {
            molecule: molecule.into(),
            distance,
            points,
            grid_spacing: surface.grid_spacing,
            isovalue: surface.isovalue,
            output_dir: None,
        }
    }

    /// Set the density grid spacing.
    #[must_use]
    pub const fn with_grid_spacing(mut self, spacing: f64) -> Self {
        self.grid_spacing = spacing;
        self
    }

    /// Set the surface isovalue.
    #[must_use]
    pub const fn with_isovalue(mut self, isovalue: f64) -> Self {
        self.isovalue = isovalue;
        self
    }

    /// Write outputs into `dir` instead of the working directory.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Check the per-run inputs.
    ///
    /// # Errors
    ///
    /// [`SamplerError::InvalidPointCount`] for zero points and
    /// [`SamplerError::InvalidDistance`] for a non-finite distance. Grid
    /// parameters are checked by the surface builder.
    pub fn validate(&self) -> SamplerResult<()> {
        if self.points == 0 {
            return Err(SamplerError::InvalidPointCount(self.points));
        }
        if !self.distance.is_finite() {
            return Err(SamplerError::InvalidDistance(self.distance));
        }
        Ok(())
    }

    /// Face count the refinement loop stops coarsening at.
    #[must_use]
    pub fn refined_face_floor(&self) -> usize {
        self.points
            .saturating_mul(Self::FACES_PER_POINT)
            .max(Self::MIN_REFINED_FACES)
    }

    /// Parameters for the Gaussian surface.
    #[must_use]
    pub fn surface_params(&self) -> GaussianSurfaceParams {
        GaussianSurfaceParams::default()
            .with_grid_spacing(self.grid_spacing)
            .with_isovalue(self.isovalue)
    }

    /// File stem shared by both outputs.
    #[must_use]
    pub fn stem(&self) -> String {
        self.molecule
            .file_stem()
            .map_or_else(|| "surface".to_owned(), |s| s.to_string_lossy().into_owned())
    }

    /// Directory the outputs are written to. The empty path means the
    /// working directory.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        self.output_dir.as_deref().unwrap_or_else(|| Path::new(""))
    }

    /// Path of the refined surface, `<stem>.obj`.
    #[must_use]
    pub fn obj_path(&self) -> PathBuf {
        self.output_dir().join(format!("{}.obj", self.stem()))
    }

    /// Path of the swarm points, `<stem>_swarms.pdb`.
    #[must_use]
    pub fn swarms_path(&self) -> PathBuf {
        self.output_dir().join(format!("{}_swarms.pdb", self.stem()))
    }
}

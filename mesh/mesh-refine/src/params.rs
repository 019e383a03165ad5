//! Refinement parameters.

/// Parameters for vertex-removal coarsening.
///
/// Each criterion reduces a vertex to a ratio, raises it to `weight` and
/// removes the vertex when the result is below `rate`:
/// - [`coarsen_dense`](crate::coarsen_dense): longest incident edge over
///   the mesh mean edge length
/// - [`coarsen_flat`](crate::coarsen_flat): middle over largest eigenvalue
///   of the normal tensor of the vertex and its one-ring
///
/// Both ratios are scale free, so removal slows down on its own once the
/// surface is evenly sampled. `min_faces` is a hard floor on top of that.
#[derive(Debug, Clone)]
pub struct CoarsenParams {
    /// Criterion threshold.
    pub rate: f64,

    /// Exponent applied to the criterion ratio.
    pub weight: f64,

    /// Number of removal passes. Each pass removes an independent set.
    pub iterations: u32,

    /// Vertices with fewer neighbours than this are never removed.
    pub min_valence: usize,

    /// Minimum dot product between a surviving face's normal before and
    /// after a collapse. Lower values allow more aggressive folding.
    pub min_normal_dot: f64,

    /// Removal stops before the face count drops below this.
    pub min_faces: usize,
}

impl Default for CoarsenParams {
    fn default() -> Self {
        Self {
            rate: 1.0,
            weight: 1.0,
            iterations: 1,
            min_valence: 4,
            min_normal_dot: 0.2,
            min_faces: 0,
        }
    }
}

impl CoarsenParams {
    /// Create parameters with a rate and pass count.
    #[must_use]
    pub fn new(rate: f64, iterations: u32) -> Self {
        Self {
            rate,
            iterations,
            ..Self::default()
        }
    }

    /// Dense-region removal used by the surface refinement loop.
    ///
    /// With weight 10 a vertex goes when its longest edge is within about
    /// 7% of the mean edge length.
    #[must_use]
    pub fn dense() -> Self {
        Self::new(2.0, 3).with_weight(10.0)
    }

    /// Flat-region removal used by the surface refinement loop.
    #[must_use]
    pub fn flat() -> Self {
        Self::new(0.1, 3)
    }

    /// Set the criterion threshold.
    #[must_use]
    pub const fn with_rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    /// Set the exponent applied to the criterion ratio.
    #[must_use]
    pub const fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Set the face count below which nothing more is removed.
    #[must_use]
    pub const fn with_min_faces(mut self, min_faces: usize) -> Self {
        self.min_faces = min_faces;
        self
    }

    /// Set the number of passes.
    #[must_use]
    pub const fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the minimum valence of a removable vertex.
    #[must_use]
    pub const fn with_min_valence(mut self, min_valence: usize) -> Self {
        self.min_valence = min_valence;
        self
    }

    /// Set the face normal stability threshold.
    #[must_use]
    pub const fn with_min_normal_dot(mut self, dot: f64) -> Self {
        self.min_normal_dot = dot;
        self
    }
}

/// Parameters for edge flipping plus tangential smoothing.
#[derive(Debug, Clone)]
pub struct SmoothParams {
    /// Number of flip + relax iterations.
    pub iterations: u32,

    /// Keep ridge vertices fixed and never flip across a ridge.
    pub preserve_ridges: bool,

    /// Dihedral angle (radians) above which an edge is a ridge.
    pub ridge_angle: f64,

    /// Fraction of the tangential displacement applied per iteration.
    pub relaxation: f64,

    /// Enable Delaunay edge flips before relaxing.
    pub enable_flip: bool,
}

impl Default for SmoothParams {
    fn default() -> Self {
        Self {
            iterations: 3,
            preserve_ridges: true,
            ridge_angle: std::f64::consts::FRAC_PI_3, // 60 degrees
            relaxation: 0.5,
            enable_flip: true,
        }
    }
}

impl SmoothParams {
    /// Create parameters with an iteration count.
    #[must_use]
    pub fn new(iterations: u32) -> Self {
        Self {
            iterations,
            ..Self::default()
        }
    }

    /// Set the number of iterations.
    #[must_use]
    pub const fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set whether ridges are preserved.
    #[must_use]
    pub const fn with_preserve_ridges(mut self, preserve: bool) -> Self {
        self.preserve_ridges = preserve;
        self
    }

    /// Set the ridge angle threshold in degrees.
    #[must_use]
    pub fn with_ridge_angle_degrees(mut self, degrees: f64) -> Self {
        self.ridge_angle = degrees.to_radians();
        self
    }

    /// Set the relaxation factor.
    #[must_use]
    pub const fn with_relaxation(mut self, relaxation: f64) -> Self {
        self.relaxation = relaxation;
        self
    }

    /// Enable or disable edge flipping.
    #[must_use]
    pub const fn with_flip(mut self, enable: bool) -> Self {
        self.enable_flip = enable;
        self
    }
}

//! Parameters for mesh decimation.

/// Parameters for mesh decimation.
#[derive(Debug, Clone)]
pub struct DecimateParams {
    /// Target number of triangles. If None, uses `target_ratio` instead.
    pub target_triangles: Option<usize>,

    /// Target ratio of triangles to keep (0.0 to 1.0). Default: 0.5
    pub target_ratio: f64,

    /// Place merged vertices so the enclosed volume does not change.
    /// Default: true
    pub preserve_volume: bool,

    /// Never collapse edges touching a boundary vertex. Default: true
    pub preserve_boundary: bool,

    /// Minimum dot product between a surviving face's unit normal before
    /// and after a collapse. Default: 0.0 (reject flips only)
    pub min_normal_dot: f64,

    /// Maximum error allowed for edge collapse. If None, no limit.
    pub max_error: Option<f64>,
}

impl Default for DecimateParams {
    fn default() -> Self {
        Self {
            target_triangles: None,
            target_ratio: 0.5,
            preserve_volume: true,
            preserve_boundary: true,
            min_normal_dot: 0.0,
            max_error: None,
        }
    }
}

impl DecimateParams {
    /// Create params targeting a specific triangle count.
    #[must_use]
    pub fn with_target_triangles(count: usize) -> Self {
        Self {
            target_triangles: Some(count),
            ..Default::default()
        }
    }

    /// Create params targeting a ratio of original triangles.
    #[must_use]
    pub fn with_target_ratio(ratio: f64) -> Self {
        Self {
            target_ratio: ratio.clamp(0.0, 1.0),
            ..Default::default()
        }
    }

    /// Create params that remove `reduction` of the triangles, so `0.97`
    /// keeps 3%.
    #[must_use]
    pub fn with_reduction(reduction: f64) -> Self {
        Self::with_target_ratio(1.0 - reduction)
    }

    /// Set volume preservation.
    #[must_use]
    pub const fn with_preserve_volume(mut self, preserve: bool) -> Self {
        self.preserve_volume = preserve;
        self
    }

    /// Set preserve boundary option.
    #[must_use]
    pub const fn with_preserve_boundary(mut self, preserve: bool) -> Self {
        self.preserve_boundary = preserve;
        self
    }

    /// Set the normal stability threshold.
    #[must_use]
    pub const fn with_min_normal_dot(mut self, dot: f64) -> Self {
        self.min_normal_dot = dot;
        self
    }

    /// Set maximum error threshold.
    #[must_use]
    pub const fn with_max_error(mut self, max_error: f64) -> Self {
        self.max_error = Some(max_error);
        self
    }

    /// Triangle count to stop at for a mesh with `original` triangles.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn target_for(&self, original: usize) -> usize {
        self.target_triangles
            .unwrap_or_else(|| ((original as f64) * self.target_ratio).ceil() as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = DecimateParams::default();
        assert!((params.target_ratio - 0.5).abs() < 0.001);
        assert!(params.preserve_volume);
        assert!(params.preserve_boundary);
    }

    #[test]
    fn test_target_triangles() {
        let params = DecimateParams::with_target_triangles(1000);
        assert_eq!(params.target_triangles, Some(1000));
        assert_eq!(params.target_for(5000), 1000);
    }

    #[test]
    fn test_reduction() {
        let params = DecimateParams::with_reduction(0.97);
        assert!((params.target_ratio - 0.03).abs() < 1e-12);
        assert_eq!(params.target_for(10), 1);

        let params = DecimateParams::with_reduction(0.75);
        assert_eq!(params.target_for(10_000), 2500);
    }

    #[test]
    fn test_ratio_clamping() {
        let params = DecimateParams::with_target_ratio(1.5);
        assert!((params.target_ratio - 1.0).abs() < 0.001);

        let params = DecimateParams::with_target_ratio(-0.5);
        assert!((params.target_ratio).abs() < 0.001);
    }

    #[test]
    fn test_builder() {
        let params = DecimateParams::default()
            .with_preserve_volume(false)
            .with_preserve_boundary(false)
            .with_max_error(0.01);

        assert!(!params.preserve_volume);
        assert!(!params.preserve_boundary);
        assert_eq!(params.max_error, Some(0.01));
    }
}

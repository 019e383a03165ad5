//! Subdivision parameters.

/// Parameters for linear subdivision.
#[derive(Debug, Clone)]
pub struct SubdivideParams {
    /// Number of subdivision iterations. Each multiplies the face count by 4.
    pub iterations: u32,

    /// Maximum faces allowed in result (prevents memory issues).
    pub max_faces: usize,
}

impl Default for SubdivideParams {
    fn default() -> Self {
        Self {
            iterations: 1,
            max_faces: 50_000_000,
        }
    }
}

impl SubdivideParams {
    /// Parameters for `iterations` rounds of subdivision.
    #[must_use]
    pub fn new(iterations: u32) -> Self {
        Self {
            iterations,
            ..Self::default()
        }
    }

    /// Set number of iterations.
    #[must_use]
    pub const fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set maximum faces allowed.
    #[must_use]
    pub const fn with_max_faces(mut self, max_faces: usize) -> Self {
        self.max_faces = max_faces;
        self
    }

    /// Face count after subdivision, or `None` on overflow.
    #[must_use]
    pub const fn expected_faces(&self, current_faces: usize) -> Option<usize> {
        let mut faces = current_faces;
        let mut i = 0;
        while i < self.iterations {
            faces = match faces.checked_mul(4) {
                Some(f) => f,
                None => return None,
            };
            i += 1;
        }
        Some(faces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = SubdivideParams::default();
        assert_eq!(params.iterations, 1);
        assert!(params.max_faces > 1_000_000);
    }

    #[test]
    fn test_builder() {
        let params = SubdivideParams::new(3).with_max_faces(1_000);
        assert_eq!(params.iterations, 3);
        assert_eq!(params.max_faces, 1_000);
        assert_eq!(params.with_iterations(2).iterations, 2);
    }

    #[test]
    fn test_expected_faces() {
        assert_eq!(SubdivideParams::new(3).expected_faces(10), Some(640));
        assert_eq!(SubdivideParams::new(0).expected_faces(10), Some(10));
        assert_eq!(SubdivideParams::new(40).expected_faces(10), None);
    }
}

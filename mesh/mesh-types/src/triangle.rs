//! Triangle with resolved vertex positions.

use nalgebra::{Point3, Vector3};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A triangle defined by three positions in CCW order.
///
/// # Example
///
/// ```
/// use mesh_types::{Point3, Triangle};
///
/// let tri = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(3.0, 0.0, 0.0),
///     Point3::new(0.0, 4.0, 0.0),
/// );
/// assert!((tri.area() - 6.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangle {
    /// First vertex.
    pub v0: Point3<f64>,
    /// Second vertex.
    pub v1: Point3<f64>,
    /// Third vertex.
    pub v2: Point3<f64>,
}

impl Triangle {
    /// Create a triangle from three positions.
    #[inline]
    #[must_use]
    pub const fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self { v0, v1, v2 }
    }

    /// Cross product of the two edges leaving `v0`.
    ///
    /// Its magnitude is twice the area.
    #[inline]
    #[must_use]
    pub fn normal_unnormalized(&self) -> Vector3<f64> {
        (self.v1 - self.v0).cross(&(self.v2 - self.v0))
    }

    /// Unit normal, or `None` for a degenerate triangle.
    #[must_use]
    pub fn normal(&self) -> Option<Vector3<f64>> {
        let n = self.normal_unnormalized();
        let len_sq = n.norm_squared();
        (len_sq > f64::EPSILON * f64::EPSILON).then(|| n / len_sq.sqrt())
    }

    /// Triangle area.
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        self.normal_unnormalized().norm() * 0.5
    }

    /// Centroid of the three vertices.
    #[inline]
    #[must_use]
    pub fn centroid(&self) -> Point3<f64> {
        Point3::from((self.v0.coords + self.v1.coords + self.v2.coords) / 3.0)
    }

    /// Edge lengths `[|v0v1|, |v1v2|, |v2v0|]`.
    #[must_use]
    pub fn edge_lengths(&self) -> [f64; 3] {
        [
            (self.v1 - self.v0).norm(),
            (self.v2 - self.v1).norm(),
            (self.v0 - self.v2).norm(),
        ]
    }

    /// Smallest interior angle in radians.
    ///
    /// Degenerate triangles report `0.0`.
    #[must_use]
    pub fn min_angle(&self) -> f64 {
        let corners = [
            (self.v0, self.v1, self.v2),
            (self.v1, self.v2, self.v0),
            (self.v2, self.v0, self.v1),
        ];
        corners
            .iter()
            .map(|(apex, a, b)| {
                let ea = a - apex;
                let eb = b - apex;
                let denom = ea.norm() * eb.norm();
                if denom < f64::EPSILON {
                    0.0
                } else {
                    (ea.dot(&eb) / denom).clamp(-1.0, 1.0).acos()
                }
            })
            .fold(f64::INFINITY, f64::min)
    }

    /// Signed volume of the tetrahedron spanned by the triangle and the origin.
    ///
    /// Summed over a closed CCW mesh this gives the enclosed volume.
    #[inline]
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        self.v0.coords.dot(&self.v1.coords.cross(&self.v2.coords)) / 6.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn right_triangle() -> Triangle {
        Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn normal_follows_right_hand_rule() {
        let n = right_triangle().normal();
        assert!(n.is_some_and(|n| (n.z - 1.0).abs() < 1e-12));
    }

    #[test]
    fn degenerate_triangle_has_no_normal() {
        let tri = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        );
        assert!(tri.normal().is_none());
        assert_relative_eq!(tri.min_angle(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn min_angle_of_right_isoceles_is_quarter_pi() {
        assert_relative_eq!(
            right_triangle().min_angle(),
            std::f64::consts::FRAC_PI_4,
            epsilon = 1e-12
        );
    }

    #[test]
    fn centroid_and_area() {
        let tri = right_triangle();
        assert_relative_eq!(tri.area(), 0.5);
        assert_relative_eq!(tri.centroid().x, 1.0 / 3.0);
    }
}

//! Quadric error metric implementation.
//!
//! A quadric `Q(x) = xᵀAx + 2bᵀx + c` accumulates squared distances from
//! `x` to a set of planes. Vertex quadrics are summed along an edge to
//! price its collapse and to place the merged vertex.

use nalgebra::{Matrix3, Matrix4, Point3, Vector3, Vector4};

/// Quadric error matrix in block form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadric {
    a: Matrix3<f64>,
    b: Vector3<f64>,
    c: f64,
}

impl Default for Quadric {
    fn default() -> Self {
        Self {
            a: Matrix3::zeros(),
            b: Vector3::zeros(),
            c: 0.0,
        }
    }
}

impl std::ops::AddAssign for Quadric {
    fn add_assign(&mut self, other: Self) {
        self.a += other.a;
        self.b += other.b;
        self.c += other.c;
    }
}

impl std::ops::Add for Quadric {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self += other;
        self
    }
}

impl Quadric {
    /// Quadric of the plane `n·x + d = 0`. `normal` must be unit length.
    #[must_use]
    pub fn from_plane(normal: Vector3<f64>, d: f64) -> Self {
        Self {
            a: normal * normal.transpose(),
            b: normal * d,
            c: d * d,
        }
    }

    /// Quadric of the plane through `point` with unit `normal`, scaled by
    /// `weight` (typically the face area).
    #[must_use]
    pub fn from_point_normal(point: &Point3<f64>, normal: Vector3<f64>, weight: f64) -> Self {
        let q = Self::from_plane(normal, -normal.dot(&point.coords));
        Self {
            a: q.a * weight,
            b: q.b * weight,
            c: q.c * weight,
        }
    }

    /// Sum of weighted squared plane distances at `p`.
    #[must_use]
    pub fn evaluate(&self, p: &Point3<f64>) -> f64 {
        let x = p.coords;
        x.dot(&(self.a * x)) + 2.0 * self.b.dot(&x) + self.c
    }

    /// Unconstrained minimiser, or `None` when `A` is singular.
    #[must_use]
    pub fn optimal_point(&self) -> Option<Point3<f64>> {
        if self.a.determinant().abs() < 1e-10 {
            return None;
        }
        self.a.try_inverse().map(|inv| Point3::from(-(inv * self.b)))
    }

    /// Minimiser subject to the linear constraint `g·x = h`.
    ///
    /// Solves the Lagrange system
    /// ```text
    /// [ 2A  g ] [x]   [-2b]
    /// [ gᵀ  0 ] [λ] = [ h ]
    /// ```
    /// Returns `None` if the system is singular.
    #[must_use]
    pub fn constrained_optimum(&self, g: &Vector3<f64>, h: f64) -> Option<Point3<f64>> {
        let a2 = self.a * 2.0;
        #[rustfmt::skip]
        let kkt = Matrix4::new(
            a2[(0, 0)], a2[(0, 1)], a2[(0, 2)], g.x,
            a2[(1, 0)], a2[(1, 1)], a2[(1, 2)], g.y,
            a2[(2, 0)], a2[(2, 1)], a2[(2, 2)], g.z,
            g.x,        g.y,        g.z,        0.0,
        );
        let rhs = Vector4::new(-2.0 * self.b.x, -2.0 * self.b.y, -2.0 * self.b.z, h);
        let solution = kkt.lu().solve(&rhs)?;
        let x = Point3::new(solution.x, solution.y, solution.z);
        x.coords.iter().all(|c| c.is_finite()).then_some(x)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_quadric_default() {
        let q = Quadric::default();
        assert_relative_eq!(q.evaluate(&Point3::new(1.0, 2.0, 3.0)), 0.0);
    }

    #[test]
    fn test_quadric_from_plane() {
        // Plane z = 0
        let q = Quadric::from_plane(Vector3::z(), 0.0);
        assert_relative_eq!(q.evaluate(&Point3::new(1.0, 2.0, 0.0)), 0.0);
        assert_relative_eq!(q.evaluate(&Point3::new(0.0, 0.0, 1.0)), 1.0);
        assert_relative_eq!(q.evaluate(&Point3::new(5.0, -3.0, -2.0)), 4.0);
    }

    #[test]
    fn three_planes_meet_at_a_corner() {
        let corner = Point3::new(1.0, 2.0, 3.0);
        let q = Quadric::from_point_normal(&corner, Vector3::x(), 1.0)
            + Quadric::from_point_normal(&corner, Vector3::y(), 1.0)
            + Quadric::from_point_normal(&corner, Vector3::z(), 1.0);
        let optimum = q.optimal_point().unwrap();
        assert_relative_eq!(optimum, corner, epsilon = 1e-9);
        assert_relative_eq!(q.evaluate(&optimum), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn single_plane_is_singular() {
        let q = Quadric::from_plane(Vector3::z(), 0.0);
        assert!(q.optimal_point().is_none());
    }

    #[test]
    fn constraint_picks_point_on_line() {
        // Two planes x = 0 and y = 0 leave the z axis free; the constraint
        // z = 4 pins it down
        let q = Quadric::from_plane(Vector3::x(), 0.0) + Quadric::from_plane(Vector3::y(), 0.0);
        let p = q.constrained_optimum(&Vector3::z(), 4.0).unwrap();
        assert_relative_eq!(p, Point3::new(0.0, 0.0, 4.0), epsilon = 1e-9);
    }

    #[test]
    fn constraint_parallel_to_only_plane_is_singular() {
        let q = Quadric::from_plane(Vector3::z(), 0.0);
        assert!(q.constrained_optimum(&Vector3::z(), 1.0).is_none());
    }
}

//! Ordered point sequences.

use crate::{Aabb, IndexedMesh, MeshBounds};
use nalgebra::Point3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An ordered sequence of 3D points.
///
/// The stage-boundary form of resampled swarm positions: clustering
/// produces one, the structure writer consumes one.
///
/// # Example
///
/// ```
/// use mesh_types::{MeshBounds, Point3, PointSet};
///
/// let points = PointSet::from(vec![Point3::origin(), Point3::new(1.0, 2.0, 3.0)]);
/// assert_eq!(points.len(), 2);
/// assert!((points.bounds().volume() - 6.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointSet {
    /// Points in output order.
    pub points: Vec<Point3<f64>>,
}

impl PointSet {
    /// An empty point set.
    #[must_use]
    pub const fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when there are no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over the points.
    pub fn iter(&self) -> std::slice::Iter<'_, Point3<f64>> {
        self.points.iter()
    }

    /// True when every coordinate is finite.
    #[must_use]
    pub fn all_finite(&self) -> bool {
        self.points
            .iter()
            .all(|p| p.coords.iter().all(|c| c.is_finite()))
    }
}

impl From<Vec<Point3<f64>>> for PointSet {
    fn from(points: Vec<Point3<f64>>) -> Self {
        Self { points }
    }
}

impl From<&IndexedMesh> for PointSet {
    fn from(mesh: &IndexedMesh) -> Self {
        Self {
            points: mesh.positions(),
        }
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point3<f64>;
    type IntoIter = std::slice::Iter<'a, Point3<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl MeshBounds for PointSet {
    fn bounds(&self) -> Aabb {
        Aabb::from_points(self.points.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit_cube;

    #[test]
    fn from_mesh_keeps_vertex_order() {
        let cube = unit_cube();
        let points = PointSet::from(&cube);
        assert_eq!(points.len(), 8);
        assert_eq!(points.points[6], Point3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn non_finite_points_are_detected() {
        let points = PointSet::from(vec![Point3::new(f64::NAN, 0.0, 0.0)]);
        assert!(!points.all_finite());
        assert!(PointSet::new().all_finite());
    }
}

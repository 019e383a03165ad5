//! Vertex type and per-vertex attributes.

use nalgebra::{Point3, Vector3};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Optional per-vertex data carried alongside the position.
///
/// Attributes survive operations that move or merge vertices (refinement,
/// decimation); operations that create new vertices (subdivision, surface
/// extraction) start them empty.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VertexAttributes {
    /// Unit normal, when one has been computed.
    pub normal: Option<Vector3<f64>>,

    /// Selection flag. Refinement operators only touch selected vertices.
    pub selected: bool,
}

impl VertexAttributes {
    /// Attributes with no normal and no selection.
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            normal: None,
            selected: false,
        }
    }

    /// Returns true if no attribute is set.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.normal.is_none() && !self.selected
    }
}

/// A mesh vertex: a position plus [`VertexAttributes`].
///
/// # Example
///
/// ```
/// use mesh_types::{Point3, Vertex};
///
/// let v1 = Vertex::new(Point3::new(1.0, 2.0, 3.0));
/// let v2 = Vertex::from_coords(1.0, 2.0, 3.0);
///
/// assert_eq!(v1.position, v2.position);
/// assert!(v1.attributes.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    /// 3D position.
    pub position: Point3<f64>,

    /// Optional attributes.
    pub attributes: VertexAttributes,
}

impl Vertex {
    /// Create a vertex with only its position set.
    #[inline]
    #[must_use]
    pub const fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            attributes: VertexAttributes::empty(),
        }
    }

    /// Create a vertex from raw coordinates.
    #[inline]
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z))
    }

    /// The vertex normal, if computed.
    #[inline]
    #[must_use]
    pub const fn normal(&self) -> Option<Vector3<f64>> {
        self.attributes.normal
    }

    /// Whether the vertex is selected for refinement.
    #[inline]
    #[must_use]
    pub const fn is_selected(&self) -> bool {
        self.attributes.selected
    }
}

impl From<Point3<f64>> for Vertex {
    fn from(position: Point3<f64>) -> Self {
        Self::new(position)
    }
}

impl From<[f64; 3]> for Vertex {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::from_coords(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_vertex_has_empty_attributes() {
        let v = Vertex::from_coords(1.0, 2.0, 3.0);
        assert!(v.attributes.is_empty());
        assert!(!v.is_selected());
        assert!(v.normal().is_none());
    }

    #[test]
    fn selection_makes_attributes_non_empty() {
        let mut v = Vertex::from([0.0, 0.0, 0.0]);
        v.attributes.selected = true;
        assert!(!v.attributes.is_empty());
        assert!(v.is_selected());
    }
}

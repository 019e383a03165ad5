//! Traits for mesh types.

use crate::{Aabb, Triangle, Vertex};
use nalgebra::Point3;

/// Read access to mesh connectivity.
pub trait MeshTopology {
    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// Number of faces (triangles).
    fn face_count(&self) -> usize;

    /// True if there are no vertices or no faces.
    fn is_empty(&self) -> bool {
        self.vertex_count() == 0 || self.face_count() == 0
    }

    /// Vertex by index.
    fn vertex(&self, index: usize) -> Option<&Vertex>;

    /// Face by index, as vertex indices.
    fn face(&self, index: usize) -> Option<[u32; 3]>;

    /// Triangle by face index with resolved positions.
    fn triangle(&self, face_index: usize) -> Option<Triangle>;

    /// Iterate over all triangles with resolved positions.
    fn triangles(&self) -> impl Iterator<Item = Triangle>;
}

/// Types that have an axis-aligned extent.
pub trait MeshBounds {
    /// Bounding box; empty when there are no vertices.
    fn bounds(&self) -> Aabb;

    /// Center of the bounding box.
    fn center(&self) -> Point3<f64> {
        self.bounds().center()
    }
}

//! What the preview shows.

use mesh_types::{Aabb, IndexedMesh, MeshBounds, PointSet};

/// Everything drawn in the preview window, overlaid in one view.
#[derive(Debug, Clone, Default)]
pub struct PreviewScene {
    /// Surface after expansion, drawn smooth shaded.
    pub expanded: IndexedMesh,
    /// Dual shell over the resampled points.
    pub shell: IndexedMesh,
    /// Resampled points, drawn as red spheres.
    pub points: PointSet,
}

impl PreviewScene {
    /// Assemble a scene.
    #[must_use]
    pub const fn new(expanded: IndexedMesh, shell: IndexedMesh, points: PointSet) -> Self {
        Self {
            expanded,
            shell,
            points,
        }
    }

    /// True when there is nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expanded.vertices.is_empty()
            && self.shell.vertices.is_empty()
            && self.points.is_empty()
    }

    /// Box around everything in the scene.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        let mut aabb = self.expanded.bounds();
        for p in self
            .shell
            .vertices
            .iter()
            .map(|v| &v.position)
            .chain(self.points.iter())
        {
            aabb.expand_to_include(p);
        }
        aabb
    }

    /// Sphere radius for the points, scaled to the scene.
    #[must_use]
    pub fn point_radius(&self) -> f64 {
        (self.bounds().diagonal() * 0.006).max(0.05)
    }
}

//! Surface mesh with face markers and root metadata.

use crate::IndexedMesh;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mesh-level metadata read by downstream volumetric meshers.
///
/// `is_hole` tells a tetrahedralizer that the enclosed region is excluded
/// from the volume; `marker` is the region marker it should assign.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SurfaceInfo {
    /// Whether the surface bounds a hole.
    pub is_hole: bool,
    /// Region marker.
    pub marker: i32,
}

/// A triangle mesh plus one marker per face and a [`SurfaceInfo`] record.
///
/// This is the stage-boundary form of a refined surface. It keeps
/// `face_markers` the same length as `mesh.faces`; operations that
/// change the face list go through [`MarkedSurface::mesh_mut`] and
/// then [`MarkedSurface::fill_markers`].
///
/// # Example
///
/// ```
/// use mesh_types::{unit_cube, MarkedSurface};
///
/// let mut surface = MarkedSurface::new(unit_cube());
/// surface.fill_markers(23);
/// surface.info.is_hole = true;
/// surface.info.marker = -1;
///
/// assert!(surface.face_markers.iter().all(|&m| m == 23));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MarkedSurface {
    /// Geometry and connectivity.
    pub mesh: IndexedMesh,
    /// One marker per face.
    pub face_markers: Vec<i32>,
    /// Root metadata.
    pub info: SurfaceInfo,
}

impl MarkedSurface {
    /// Wrap a mesh with zeroed markers and default metadata.
    #[must_use]
    pub fn new(mesh: IndexedMesh) -> Self {
        let face_markers = vec![0; mesh.faces.len()];
        Self {
            mesh,
            face_markers,
            info: SurfaceInfo::default(),
        }
    }

    /// Mutable access to the mesh.
    ///
    /// Callers that add or remove faces must refill markers afterwards.
    pub fn mesh_mut(&mut self) -> &mut IndexedMesh {
        &mut self.mesh
    }

    /// Set every face marker to `marker`, resizing to the face count.
    pub fn fill_markers(&mut self, marker: i32) {
        self.face_markers.clear();
        self.face_markers.resize(self.mesh.faces.len(), marker);
    }

    /// Whether there is exactly one marker per face.
    #[must_use]
    pub fn markers_consistent(&self) -> bool {
        self.face_markers.len() == self.mesh.faces.len()
    }

    /// Drop markers and metadata, keeping the bare mesh.
    #[must_use]
    pub fn into_mesh(self) -> IndexedMesh {
        self.mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit_cube;

    #[test]
    fn new_surface_has_one_marker_per_face() {
        let surface = MarkedSurface::new(unit_cube());
        assert!(surface.markers_consistent());
        assert_eq!(surface.info, SurfaceInfo::default());
    }

    #[test]
    fn fill_markers_resizes_after_face_edit() {
        let mut surface = MarkedSurface::new(unit_cube());
        surface.mesh_mut().faces.truncate(4);
        assert!(!surface.markers_consistent());

        surface.fill_markers(7);
        assert!(surface.markers_consistent());
        assert_eq!(surface.face_markers, vec![7; 4]);
    }
}

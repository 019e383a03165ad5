//! Outward expansion of a surface along its vertex normals.
//!
//! Each step recomputes normals on the current surface and moves every
//! vertex by a fixed scale along its normal. Topology never changes.

// Step counts are small integers
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use mesh_types::IndexedMesh;
use tracing::{debug, info};

use crate::error::{OffsetError, OffsetResult};
use crate::normals::vertex_normals;

/// Configuration for normal-based expansion.
#[derive(Debug, Clone)]
pub struct OffsetConfig {
    /// Displacement along the unit normal per step. Default: 2.0
    pub scale: f64,
}

impl Default for OffsetConfig {
    fn default() -> Self {
        Self { scale: 2.0 }
    }
}

impl OffsetConfig {
    /// Set the per-step displacement.
    #[must_use]
    pub const fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }
}

/// Summary of an expansion.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpansionStats {
    /// Number of warp steps performed.
    pub steps: u32,
    /// Part of the requested distance that did not make a whole step.
    pub dropped_fraction: f64,
    /// Vertices that could not be moved in at least one step.
    pub stuck_vertices: usize,
}

impl std::fmt::Display for ExpansionStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Expansion: {} steps", self.steps)?;
        if self.dropped_fraction > 0.0 {
            write!(f, " ({:.3} dropped)", self.dropped_fraction)?;
        }
        Ok(())
    }
}

/// Number of whole warp steps for a requested distance.
///
/// The fractional part is dropped, and negative distances give zero steps.
///
/// # Errors
///
/// Returns [`OffsetError::InvalidDistance`] for a non-finite distance.
///
/// # Example
///
/// ```
/// use mesh_offset::expansion_steps;
///
/// assert_eq!(expansion_steps(3.0)?, 3);
/// assert_eq!(expansion_steps(2.7)?, 2);
/// assert_eq!(expansion_steps(-1.0)?, 0);
/// # Ok::<(), mesh_offset::OffsetError>(())
/// ```
pub fn expansion_steps(distance: f64) -> OffsetResult<u32> {
    if !distance.is_finite() {
        return Err(OffsetError::InvalidDistance(distance));
    }
    Ok(distance.trunc().clamp(0.0, f64::from(u32::MAX)) as u32)
}

/// Move every vertex by `scale` along its current unit normal.
///
/// Normals are recomputed from the faces first and stored in the vertex
/// attributes. Returns the number of vertices left in place because they
/// have no normal.
///
/// # Errors
///
/// Returns an error if the mesh is empty, a face index is out of range or
/// `scale` is not finite.
pub fn warp_along_normals(mesh: &mut IndexedMesh, scale: f64) -> OffsetResult<usize> {
    if !scale.is_finite() {
        return Err(OffsetError::InvalidScale(scale));
    }
    let normals = vertex_normals(mesh)?;

    let mut stuck = 0;
    for (vertex, normal) in mesh.vertices.iter_mut().zip(normals) {
        match normal {
            Some(n) => vertex.position += n * scale,
            None => stuck += 1,
        }
        vertex.attributes.normal = normal;
    }
    Ok(stuck)
}

/// Expand a mesh outward once per whole unit of `distance`.
///
/// Runs `trunc(distance)` warp steps of `config.scale` each, so the net
/// displacement is roughly `scale × trunc(distance)`.
///
/// # Errors
///
/// Returns an error if the distance or scale is not finite, or the mesh is
/// empty or has an out-of-range face index.
///
/// # Example
///
/// ```
/// use mesh_types::IndexedMesh;
/// use mesh_offset::{expand, OffsetConfig};
///
/// let mut sphere = IndexedMesh::icosphere(10.0, 3);
/// let stats = expand(&mut sphere, 3.0, &OffsetConfig::default())?;
/// assert_eq!(stats.steps, 3);
///
/// let radius = sphere.vertices[0].position.coords.norm();
/// assert!((radius - 16.0).abs() < 1e-9);
/// # Ok::<(), mesh_offset::OffsetError>(())
/// ```
pub fn expand(
    mesh: &mut IndexedMesh,
    distance: f64,
    config: &OffsetConfig,
) -> OffsetResult<ExpansionStats> {
    let steps = expansion_steps(distance)?;
    if !config.scale.is_finite() {
        return Err(OffsetError::InvalidScale(config.scale));
    }
    crate::normals::validate(mesh)?;

    let mut stuck_vertices = 0;
    for step in 1..=steps {
        let stuck = warp_along_normals(mesh, config.scale)?;
        stuck_vertices = stuck_vertices.max(stuck);
        debug!(step, stuck, "Warped along normals");
    }

    let stats = ExpansionStats {
        steps,
        dropped_fraction: (distance - f64::from(steps)).clamp(0.0, 1.0),
        stuck_vertices,
    };
    info!(
        steps,
        scale = config.scale,
        vertices = mesh.vertices.len(),
        "Expansion complete"
    );
    Ok(stats)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_types::unit_cube;

    #[test]
    fn steps_truncate_toward_zero() {
        assert_eq!(expansion_steps(0.0).unwrap(), 0);
        assert_eq!(expansion_steps(0.99).unwrap(), 0);
        assert_eq!(expansion_steps(3.0).unwrap(), 3);
        assert_eq!(expansion_steps(4.5).unwrap(), 4);
        assert_eq!(expansion_steps(-2.0).unwrap(), 0);
        assert!(matches!(
            expansion_steps(f64::INFINITY),
            Err(OffsetError::InvalidDistance(_))
        ));
    }

    #[test]
    fn zero_distance_leaves_mesh_untouched() {
        let mut sphere = IndexedMesh::icosphere(5.0, 2);
        let before = sphere.clone();
        let stats = expand(&mut sphere, 0.0, &OffsetConfig::default()).unwrap();
        assert_eq!(stats.steps, 0);
        assert_eq!(sphere, before);
    }

    #[test]
    fn icosahedron_radius_grows_by_scale_per_step() {
        // Every vertex of the icosahedron is symmetric, so normals are radial
        let mut sphere = IndexedMesh::icosphere(5.0, 0);
        let stats = expand(&mut sphere, 2.5, &OffsetConfig::default().with_scale(1.5)).unwrap();
        assert_eq!(stats.steps, 2);
        assert_relative_eq!(stats.dropped_fraction, 0.5);
        for v in &sphere.vertices {
            assert_relative_eq!(v.position.coords.norm(), 8.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn warp_stores_normals() {
        let mut cube = unit_cube();
        let stuck = warp_along_normals(&mut cube, 1.0).unwrap();
        assert_eq!(stuck, 0);
        assert!(cube.vertices.iter().all(|v| v.attributes.normal.is_some()));
        assert!(cube.signed_volume() > 1.0);
    }

    #[test]
    fn topology_is_unchanged() {
        let mut sphere = IndexedMesh::icosphere(5.0, 2);
        let faces = sphere.faces.clone();
        expand(&mut sphere, 3.0, &OffsetConfig::default()).unwrap();
        assert_eq!(sphere.faces, faces);
    }

    #[test]
    fn invalid_scale_is_rejected() {
        let mut cube = unit_cube();
        assert!(matches!(
            warp_along_normals(&mut cube, f64::NAN),
            Err(OffsetError::InvalidScale(_))
        ));
        let config = OffsetConfig::default().with_scale(f64::INFINITY);
        assert!(expand(&mut cube, 1.0, &config).is_err());
    }

    #[test]
    fn display_mentions_dropped_part() {
        let stats = ExpansionStats {
            steps: 2,
            dropped_fraction: 0.5,
            stuck_vertices: 0,
        };
        assert_eq!(stats.to_string(), "Expansion: 2 steps (0.500 dropped)");
    }
}

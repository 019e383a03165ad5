//! Surface health diagnostics.
//!
//! Informational only: nothing here fails on a bad mesh.

use mesh_types::IndexedMesh;
use tracing::warn;

use crate::adjacency::MeshAdjacency;
use crate::components::find_connected_components;
use crate::winding::is_orientable;

/// Topology and orientation report for a triangle mesh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeshReport {
    /// Total number of vertices.
    pub vertex_count: usize,
    /// Total number of faces.
    pub face_count: usize,
    /// Total number of distinct edges.
    pub edge_count: usize,
    /// Edge-connected components.
    pub component_count: usize,

    /// Edges with only one adjacent face.
    pub boundary_edge_count: usize,
    /// Edges with more than two adjacent faces.
    pub non_manifold_edge_count: usize,

    /// No boundary edges.
    pub is_closed: bool,
    /// No non-manifold edges.
    pub is_manifold: bool,
    /// Winding can be made consistent across every manifold edge.
    pub is_orientable: bool,
    /// Total signed volume is negative.
    pub is_inside_out: bool,
}

impl MeshReport {
    /// Closed, manifold, orientable and outward.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.is_closed && self.is_manifold && self.is_orientable && !self.is_inside_out
    }

    /// Euler characteristic `V - E + F`.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn euler_characteristic(&self) -> i64 {
        self.vertex_count as i64 - self.edge_count as i64 + self.face_count as i64
    }
}

impl std::fmt::Display for MeshReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let yes_no = |b: bool| if b { "yes" } else { "no" };
        write!(
            f,
            "{} vertices, {} edges, {} faces, {} component(s); closed: {}, manifold: {}, orientable: {}",
            self.vertex_count,
            self.edge_count,
            self.face_count,
            self.component_count,
            yes_no(self.is_closed),
            yes_no(self.is_manifold),
            yes_no(self.is_orientable),
        )?;
        if self.boundary_edge_count > 0 {
            write!(f, ", {} boundary edges", self.boundary_edge_count)?;
        }
        if self.non_manifold_edge_count > 0 {
            write!(f, ", {} non-manifold edges", self.non_manifold_edge_count)?;
        }
        if self.is_inside_out {
            write!(f, ", inside-out")?;
        }
        Ok(())
    }
}

/// Compute a [`MeshReport`].
///
/// # Example
///
/// ```
/// use mesh_repair::validate_mesh;
/// use mesh_types::unit_cube;
///
/// let report = validate_mesh(&unit_cube());
/// assert!(report.is_clean());
/// assert_eq!(report.euler_characteristic(), 2);
/// ```
#[must_use]
pub fn validate_mesh(mesh: &IndexedMesh) -> MeshReport {
    let adjacency = MeshAdjacency::build(&mesh.faces, mesh.vertices.len());
    let components = find_connected_components(mesh);

    MeshReport {
        vertex_count: mesh.vertices.len(),
        face_count: mesh.faces.len(),
        edge_count: adjacency.edge_count(),
        component_count: components.component_count(),
        boundary_edge_count: adjacency.boundary_edge_count(),
        non_manifold_edge_count: adjacency.non_manifold_edge_count(),
        is_closed: adjacency.is_closed(),
        is_manifold: adjacency.is_manifold(),
        is_orientable: is_orientable(mesh),
        is_inside_out: mesh.signed_volume() < 0.0,
    }
}

/// Compute a report and log a warning for each problem found.
pub fn report_diagnostics(mesh: &IndexedMesh) -> MeshReport {
    let report = validate_mesh(mesh);
    if !report.is_orientable {
        warn!("Mesh is not orientable");
    }
    if !report.is_manifold {
        warn!(
            edges = report.non_manifold_edge_count,
            "Mesh has non-manifold edges"
        );
    }
    if !report.is_closed {
        warn!(edges = report.boundary_edge_count, "Mesh has boundary edges");
    }
    report
}

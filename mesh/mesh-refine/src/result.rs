//! Result types for refinement operations.

use mesh_types::IndexedMesh;

/// Vertex, edge and face counts of a mesh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefineStats {
    /// Number of vertices.
    pub vertices: usize,
    /// Number of distinct edges.
    pub edges: usize,
    /// Number of faces.
    pub faces: usize,
}

impl RefineStats {
    /// Count a mesh.
    #[must_use]
    pub fn of(mesh: &IndexedMesh) -> Self {
        Self {
            vertices: mesh.vertices.len(),
            edges: mesh.edge_count(),
            faces: mesh.faces.len(),
        }
    }
}

impl std::fmt::Display for RefineStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "V: {} E: {} F: {}", self.vertices, self.edges, self.faces)
    }
}

/// Outcome of a coarsening call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoarsenStats {
    /// Passes actually run (stops early when a pass removes nothing).
    pub passes: u32,
    /// Vertices matching the criterion in the first pass.
    pub candidates: usize,
    /// Vertices removed in total.
    pub vertices_removed: usize,
    /// Removal stopped because the face count reached the floor.
    pub reached_floor: bool,
}

impl std::fmt::Display for CoarsenStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Coarsen: {} removed of {} candidates in {} passes",
            self.vertices_removed, self.candidates, self.passes
        )?;
        if self.reached_floor {
            write!(f, " (face floor reached)")?;
        }
        Ok(())
    }
}

/// Outcome of a smoothing call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SmoothStats {
    /// Iterations run.
    pub iterations: u32,
    /// Edge flips performed.
    pub flips_performed: usize,
    /// Vertex moves summed over iterations.
    pub vertices_moved: usize,
    /// Vertices held fixed as ridges in the last iteration.
    pub ridge_vertices: usize,
}

impl std::fmt::Display for SmoothStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Smooth: {} iterations, {} flips, {} moves, {} ridge vertices",
            self.iterations, self.flips_performed, self.vertices_moved, self.ridge_vertices
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::unit_cube;

    #[test]
    fn test_stats_of_cube() {
        let stats = RefineStats::of(&unit_cube());
        assert_eq!(
            stats,
            RefineStats {
                vertices: 8,
                edges: 18,
                faces: 12
            }
        );
        assert_eq!(stats.to_string(), "V: 8 E: 18 F: 12");
    }

    #[test]
    fn test_display() {
        let stats = CoarsenStats {
            passes: 3,
            candidates: 40,
            vertices_removed: 12,
            reached_floor: false,
        };
        let display = format!("{stats}");
        assert!(display.contains("12 removed"));
        assert!(display.contains("40"));
        assert!(!display.contains("floor"));

        let floored = CoarsenStats {
            reached_floor: true,
            ..stats
        };
        assert!(floored.to_string().ends_with("(face floor reached)"));
    }
}

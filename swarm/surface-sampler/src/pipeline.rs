//! The sampling pipeline, one function per stage.
//!
//! [`run`] chains the stages in a fixed order. Each stage is public so
//! tests and callers can drive a subset of the pipeline on their own
//! meshes.

use std::path::{Path, PathBuf};

use mesh_cluster::{cluster_mesh, ClusterParams, Clustering};
use mesh_decimate::{decimate_mesh, DecimateParams, DecimationResult};
use mesh_molsurf::{gaussian_surface, Atom, GaussianSurfaceParams};
use mesh_offset::{expand, ExpansionStats, OffsetConfig};
use mesh_refine::{coarsen_dense, coarsen_flat, smooth, CoarsenParams, RefineStats, SmoothParams};
use mesh_repair::{orient_outward, report_diagnostics, split_into_components, RepairError};
use mesh_subdivide::{subdivide_mesh, SubdivideParams, SubdivisionResult};
use mesh_types::{IndexedMesh, MarkedSurface};
use tracing::{info, warn};

use crate::config::SamplerConfig;
use crate::error::{SamplerError, SamplerResult};
use crate::structure::{read_atoms, write_points};

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct SamplerOutput {
    /// Path of the exported refined surface.
    pub obj_path: PathBuf,
    /// Path of the written swarm points.
    pub swarms_path: PathBuf,
    /// Counts of the refined surface at export.
    pub refined: RefineStats,
    /// Decimation summary; its mesh is the shell before expansion.
    pub decimation: DecimationResult,
    /// The shell after expansion.
    pub expanded: IndexedMesh,
    /// Expansion summary.
    pub expansion: ExpansionStats,
    /// Subdivision summary of the expanded shell.
    pub subdivision: SubdivisionResult,
    /// Swarm points and their dual shell.
    pub clustering: Clustering,
}

/// Build the molecular surface, log its diagnostics and orient it outward.
///
/// # Errors
///
/// Propagates surface construction errors.
pub fn build_surface(atoms: &[Atom], params: &GaussianSurfaceParams) -> SamplerResult<IndexedMesh> {
    let mut mesh = gaussian_surface(atoms, params)?.mesh;

    let report = report_diagnostics(&mesh);
    info!(
        "The mesh has {} components, is {}, and is {}.",
        report.component_count,
        if report.is_orientable { "orientable" } else { "non-orientable" },
        if report.is_manifold { "manifold" } else { "non-manifold" },
    );

    let orientation = orient_outward(&mut mesh);
    if orientation.faces_flipped > 0 {
        info!(
            faces = orientation.faces_flipped,
            components = orientation.components_reversed,
            "Corrected face orientation"
        );
    }
    Ok(mesh)
}

/// Split into components and keep the one containing face 0.
///
/// # Errors
///
/// [`SamplerError::NoComponents`] when the mesh has no faces, or a repair
/// error for invalid face indices.
pub fn select_component(mesh: &IndexedMesh) -> SamplerResult<IndexedMesh> {
    let components = match split_into_components(mesh) {
        Err(RepairError::EmptyMesh) => return Err(SamplerError::NoComponents),
        other => other?,
    };
    for (i, component) in components.iter().enumerate() {
        info!("Mesh {i} is {:.3} A^3 in volume.", component.volume());
    }

    // Component 0 holds face 0; it is usually but not always the largest
    let kept_faces = components.first().map_or(0, |c| c.faces.len());
    if let Some(larger) = components.iter().position(|c| c.faces.len() > kept_faces) {
        warn!(
            kept_faces,
            larger,
            larger_faces = components[larger].faces.len(),
            "Keeping the first component, which is not the largest"
        );
    }

    components.into_iter().next().ok_or(SamplerError::NoComponents)
}

/// Smooth and coarsen the surface, then mark it for export.
///
/// Coarsening never takes the surface below `min_faces` faces.
///
/// # Errors
///
/// Propagates refinement errors.
pub fn refine_surface(mut mesh: IndexedMesh, min_faces: usize) -> SamplerResult<MarkedSurface> {
    mesh.select_all();
    smooth(
        &mut mesh,
        &SmoothParams::new(SamplerConfig::INITIAL_SMOOTH_ITERATIONS).with_preserve_ridges(false),
    )?;

    let dense = CoarsenParams::new(SamplerConfig::DENSE_RATE, SamplerConfig::DENSE_ITERATIONS)
        .with_weight(SamplerConfig::DENSE_WEIGHT)
        .with_min_faces(min_faces);
    let flat = CoarsenParams::new(SamplerConfig::FLAT_RATE, SamplerConfig::FLAT_ITERATIONS)
        .with_min_faces(min_faces);
    let ridges = SmoothParams::new(SamplerConfig::SMOOTH_ITERATIONS).with_preserve_ridges(true);
    for round in 1..=SamplerConfig::REFINE_ROUNDS {
        coarsen_dense(&mut mesh, &dense)?;
        coarsen_flat(&mut mesh, &flat)?;
        smooth(&mut mesh, &ridges)?;
        info!("Iteration {round}: {}", RefineStats::of(&mesh));
    }

    let mut surface = MarkedSurface::new(mesh);
    surface.fill_markers(SamplerConfig::FACE_MARKER);
    surface.info.is_hole = true;
    surface.info.marker = SamplerConfig::ROOT_MARKER;
    Ok(surface)
}

/// Write the marked surface and reload it as a plain mesh.
///
/// # Errors
///
/// Propagates file errors.
pub fn export_and_reload(surface: &MarkedSurface, path: &Path) -> SamplerResult<IndexedMesh> {
    mesh_io::save_marked_obj(surface, path)?;
    info!(path = %path.display(), faces = surface.mesh.faces.len(), "Exported surface");
    Ok(mesh_io::load_obj(path)?)
}

/// Decimate with volume preservation.
///
/// # Errors
///
/// Propagates decimation errors.
pub fn decimate_shell(mesh: &IndexedMesh) -> SamplerResult<DecimationResult> {
    let params = DecimateParams::with_reduction(SamplerConfig::DECIMATION_REDUCTION)
        .with_preserve_volume(true);
    let result = decimate_mesh(mesh, &params)?;
    info!(
        "Decimation: {} -> {}",
        result.original_vertices, result.final_vertices
    );
    Ok(result)
}

/// Expand the shell by `distance`, one normal warp per whole unit.
///
/// # Errors
///
/// Propagates expansion errors.
pub fn expand_shell(mesh: &mut IndexedMesh, distance: f64) -> SamplerResult<ExpansionStats> {
    let config = OffsetConfig::default().with_scale(SamplerConfig::WARP_SCALE);
    let stats = expand(mesh, distance, &config)?;
    if stats.dropped_fraction > 0.0 {
        warn!(
            distance,
            steps = stats.steps,
            dropped = stats.dropped_fraction,
            "Expansion distance truncated to whole steps"
        );
    }
    Ok(stats)
}

/// Subdivide the expanded shell and cluster it into `points` regions.
///
/// # Errors
///
/// Propagates subdivision and clustering errors.
pub fn resample(mesh: &IndexedMesh, points: usize) -> SamplerResult<(SubdivisionResult, Clustering)> {
    let subdivision = subdivide_mesh(mesh, &SubdivideParams::new(SamplerConfig::SUBDIVISIONS))?;
    let clustering = cluster_mesh(&subdivision.mesh, &ClusterParams::new(points))?;
    info!("{clustering}");
    Ok((subdivision, clustering))
}

/// Run every stage and write both output files.
///
/// Same as [`run_with`] with nothing to do before the points are written.
///
/// # Errors
///
/// Returns the first stage error.
pub fn run(config: &SamplerConfig) -> SamplerResult<SamplerOutput> {
    run_with(config, |_| Ok(()))
}

/// Run every stage, call `before_output`, then write the swarm points.
///
/// The refined surface is exported mid-pipeline. The point file is only
/// written once `before_output` returns, which is where the binary blocks
/// on the preview window. An error from `before_output` aborts the run
/// without writing the points.
///
/// # Errors
///
/// Returns the first stage error or the error of `before_output`.
pub fn run_with<F>(config: &SamplerConfig, before_output: F) -> SamplerResult<SamplerOutput>
where
    F: FnOnce(&SamplerOutput) -> SamplerResult<()>,
{
    config.validate()?;

    let atoms = read_atoms(&config.molecule)?;
    let mesh = build_surface(&atoms, &config.surface_params())?;
    let mesh = select_component(&mesh)?;
    let surface = refine_surface(mesh, config.refined_face_floor())?;
    let refined = RefineStats::of(&surface.mesh);

    let obj_path = config.obj_path();
    let reloaded = export_and_reload(&surface, &obj_path)?;

    let decimation = decimate_shell(&reloaded)?;
    let mut expanded = decimation.mesh.clone();
    let expansion = expand_shell(&mut expanded, config.distance)?;

    let (subdivision, clustering) = resample(&expanded, config.points)?;

    let output = SamplerOutput {
        obj_path,
        swarms_path: config.swarms_path(),
        refined,
        decimation,
        expanded,
        expansion,
        subdivision,
        clustering,
    };

    before_output(&output)?;
    write_points(&output.clustering.points, &output.swarms_path)?;
    Ok(output)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use mesh_molsurf::Element;
    use mesh_repair::{find_connected_components, validate_mesh};
    use mesh_types::{Point3, Vector3};

    fn blob(offset: Vector3<f64>) -> Vec<Atom> {
        (0..27)
            .map(|i| {
                let (x, y, z) = (i % 3, (i / 3) % 3, i / 9);
                let p = Point3::new(f64::from(x), f64::from(y), f64::from(z)) * 1.5 + offset;
                Atom::new(Element::Carbon, p)
            })
            .collect()
    }

    #[test]
    fn surface_is_closed_and_outward() {
        let mesh = build_surface(&blob(Vector3::zeros()), &GaussianSurfaceParams::default()).unwrap();
        let report = validate_mesh(&mesh);
        assert!(report.is_closed);
        assert!(!report.is_inside_out);
    }

    #[test]
    fn first_component_is_kept() {
        let mut atoms = blob(Vector3::zeros());
        atoms.extend(blob(Vector3::new(40.0, 0.0, 0.0)));
        let mesh = build_surface(&atoms, &GaussianSurfaceParams::default()).unwrap();
        assert_eq!(find_connected_components(&mesh).component_count(), 2);

        let kept = select_component(&mesh).unwrap();
        assert_eq!(find_connected_components(&kept).component_count(), 1);
        assert!(kept.faces.len() < mesh.faces.len());
        assert!(kept.faces.iter().flatten().all(|&v| (v as usize) < kept.vertices.len()));
    }

    #[test]
    fn empty_mesh_has_no_component() {
        assert!(matches!(
            select_component(&IndexedMesh::new()),
            Err(SamplerError::NoComponents)
        ));
    }

    #[test]
    fn refined_surface_is_marked() {
        let mesh = build_surface(&blob(Vector3::zeros()), &GaussianSurfaceParams::default()).unwrap();
        let original_faces = mesh.faces.len();
        let surface = refine_surface(mesh, 0).unwrap();

        assert!(surface.markers_consistent());
        assert!(surface.face_markers.iter().all(|&m| m == SamplerConfig::FACE_MARKER));
        assert!(surface.info.is_hole);
        assert_eq!(surface.info.marker, SamplerConfig::ROOT_MARKER);
        assert!(surface.mesh.faces.len() <= original_faces);
        assert!(validate_mesh(&surface.mesh).is_closed);
    }

    #[test]
    fn refinement_keeps_the_face_floor() {
        let mut atoms = blob(Vector3::zeros());
        atoms.extend(blob(Vector3::new(3.0, 0.0, 0.0)));
        let mesh = build_surface(&atoms, &GaussianSurfaceParams::default()).unwrap();
        let floor = mesh.faces.len() / 2;

        let surface = refine_surface(mesh, floor).unwrap();
        assert!(surface.mesh.faces.len() >= floor);
        assert!(validate_mesh(&surface.mesh).is_closed);
    }

    #[test]
    fn fractional_distance_runs_whole_steps() {
        let mut sphere = IndexedMesh::icosphere(10.0, 2);
        let stats = expand_shell(&mut sphere, 2.7).unwrap();
        assert_eq!(stats.steps, 2);
        assert!((stats.dropped_fraction - 0.7).abs() < 1e-9);
    }

    #[test]
    fn resample_yields_requested_points() {
        let sphere = IndexedMesh::icosphere(10.0, 1);
        let (subdivision, clustering) = resample(&sphere, 30).unwrap();
        assert_eq!(subdivision.final_faces, sphere.faces.len() * 64);
        assert_eq!(clustering.cluster_count(), 30);
    }
}

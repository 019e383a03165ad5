//! End-to-end runs on synthetic structures.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use approx::assert_relative_eq;
use mesh_repair::validate_mesh;
use mesh_types::MeshBounds;
use surface_sampler::structure::read_atoms;
use surface_sampler::{run, run_with, SamplerConfig, SamplerError, SamplerOutput};
use tempfile::TempDir;

/// Carbons at `positions`, as fixed-column ATOM records in `dir/name`.
fn write_structure(dir: &Path, name: &str, positions: &[[f64; 3]]) -> PathBuf {
    let mut text = String::new();
    for (i, [x, y, z]) in positions.iter().enumerate() {
        let serial = i + 1;
        writeln!(
            text,
            "ATOM  {serial:>5}  C   GLY A{serial:>4}    {x:>8.3}{y:>8.3}{z:>8.3}  1.00  0.00           C"
        )
        .unwrap();
    }
    writeln!(text, "END").unwrap();

    let path = dir.join(name);
    std::fs::write(&path, text).unwrap();
    path
}

/// A 3×3×3 block of carbons 1.5 Å apart.
fn write_blob(dir: &Path) -> PathBuf {
    let positions: Vec<[f64; 3]> = (0..27_u32)
        .map(|i| {
            let (x, y, z) = (i % 3, (i / 3) % 3, i / 9);
            [f64::from(x) * 1.5, f64::from(y) * 1.5, f64::from(z) * 1.5]
        })
        .collect();
    write_structure(dir, "blob.pdb", &positions)
}

/// Carbons on a 1.5 Å lattice filling an ellipsoid with semi-axes of
/// 12, 8 and 6.5 Å, a few hundred atoms, about the size of a small domain.
fn write_ellipsoid(dir: &Path) -> PathBuf {
    let (a, b, c) = (12.0, 8.0, 6.5);
    let mut positions = Vec::new();
    for i in -8..=8_i32 {
        for j in -6..=6_i32 {
            for k in -5..=5_i32 {
                let (x, y, z) = (f64::from(i) * 1.5, f64::from(j) * 1.5, f64::from(k) * 1.5);
                if (x / a).powi(2) + (y / b).powi(2) + (z / c).powi(2) <= 1.0 {
                    positions.push([x, y, z]);
                }
            }
        }
    }
    write_structure(dir, "domain.pdb", &positions)
}

fn sample(distance: f64, points: usize) -> (TempDir, SamplerOutput) {
    let dir = tempfile::tempdir().unwrap();
    let molecule = write_blob(dir.path());
    let config = SamplerConfig::new(molecule, distance, points).with_output_dir(dir.path());
    let output = run(&config).unwrap();
    (dir, output)
}

#[test]
fn outputs_are_named_after_the_input() {
    let (dir, output) = sample(1.0, 20);
    assert_eq!(output.obj_path, dir.path().join("blob.obj"));
    assert_eq!(output.swarms_path, dir.path().join("blob_swarms.pdb"));
    assert!(output.obj_path.exists());
    assert!(output.swarms_path.exists());
}

#[test]
fn exported_surface_reloads_closed_and_oriented() {
    let (_dir, output) = sample(1.0, 20);

    let reloaded = mesh_io::load_marked_obj(&output.obj_path).unwrap();
    assert_eq!(reloaded.mesh.faces.len(), output.refined.faces);
    assert!(reloaded.info.is_hole);
    assert_eq!(reloaded.info.marker, SamplerConfig::ROOT_MARKER);
    assert!(reloaded
        .face_markers
        .iter()
        .all(|&m| m == SamplerConfig::FACE_MARKER));

    let report = validate_mesh(&reloaded.mesh);
    assert!(report.is_closed);
    assert!(report.is_orientable);
    assert!(!report.is_inside_out);
}

#[test]
fn decimation_keeps_the_volume() {
    let (_dir, output) = sample(1.0, 20);
    let decimation = &output.decimation;
    assert!(decimation.final_triangles < decimation.original_triangles);
    assert!(decimation.volume_change().abs() < 1e-6);
    assert!(validate_mesh(&decimation.mesh).is_closed);
}

#[test]
fn point_file_has_the_requested_count() {
    let (_dir, output) = sample(3.0, 40);
    assert_eq!(output.clustering.cluster_count(), 40);

    let atoms = read_atoms(&output.swarms_path).unwrap();
    assert_eq!(atoms.len(), 40);
    for (atom, point) in atoms.iter().zip(output.clustering.points.iter()) {
        assert_relative_eq!(atom.position, *point, epsilon = 1e-3);
    }
}

#[test]
fn zero_distance_leaves_the_shell_unchanged() {
    let (_dir, output) = sample(0.0, 20);
    assert_eq!(output.expansion.steps, 0);
    assert_eq!(
        output.expanded.positions(),
        output.decimation.mesh.positions()
    );
    assert_eq!(output.expanded.faces, output.decimation.mesh.faces);
}

#[test]
fn whole_distance_runs_one_step_per_unit() {
    let (_dir, output) = sample(3.0, 20);
    assert_eq!(output.expansion.steps, 3);
    assert_relative_eq!(output.expansion.dropped_fraction, 0.0);

    let before = output.decimation.mesh.bounds().volume();
    let after = output.expanded.bounds().volume();
    assert!(after > before, "expanded box {after} not above {before}");
    assert!(output.expanded.volume() > output.decimation.mesh.volume());
}

#[test]
fn expanded_points_clear_the_molecule() {
    let (dir, output) = sample(3.0, 30);
    let atoms = read_atoms(&dir.path().join("blob.pdb")).unwrap();
    let nearest = output
        .clustering
        .points
        .iter()
        .map(|p| {
            atoms
                .iter()
                .map(|a| (a.position - p).norm())
                .fold(f64::INFINITY, f64::min)
        })
        .fold(f64::INFINITY, f64::min);
    assert!(nearest > 2.0, "a swarm point sits {nearest} Å from an atom");
}

#[test]
fn output_dir_redirects_both_files() {
    let input = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let molecule = write_blob(input.path());

    let config = SamplerConfig::new(molecule, 1.0, 10).with_output_dir(out.path());
    let output = run(&config).unwrap();
    assert!(output.obj_path.starts_with(out.path()));
    assert!(out.path().join("blob_swarms.pdb").exists());
    assert!(!input.path().join("blob.obj").exists());
}

#[test]
fn invalid_inputs_fail_before_reading() {
    let config = SamplerConfig::new("does-not-exist.pdb", 1.0, 0);
    assert!(matches!(run(&config), Err(SamplerError::InvalidPointCount(0))));

    let config = SamplerConfig::new("does-not-exist.pdb", f64::NAN, 10);
    assert!(matches!(run(&config), Err(SamplerError::InvalidDistance(_))));

    let config = SamplerConfig::new("does-not-exist.pdb", 1.0, 10);
    assert!(matches!(run(&config), Err(SamplerError::Structure { .. })));
}

#[test]
fn unreachable_isovalue_is_a_surface_error() {
    let dir = tempfile::tempdir().unwrap();
    let molecule = write_blob(dir.path());
    let config = SamplerConfig::new(molecule, 1.0, 10)
        .with_isovalue(1000.0)
        .with_output_dir(dir.path());
    assert!(matches!(run(&config), Err(SamplerError::Molsurf(_))));
}

#[test]
fn points_are_written_after_the_preview_step() {
    let dir = tempfile::tempdir().unwrap();
    let molecule = write_blob(dir.path());
    let config = SamplerConfig::new(molecule, 1.0, 20).with_output_dir(dir.path());

    let mut called = false;
    let output = run_with(&config, |output| {
        called = true;
        assert!(output.obj_path.exists());
        assert!(!output.swarms_path.exists());
        Ok(())
    })
    .unwrap();
    assert!(called);
    assert!(output.swarms_path.exists());
}

#[test]
fn failed_preview_step_writes_no_points() {
    let dir = tempfile::tempdir().unwrap();
    let molecule = write_blob(dir.path());
    let config = SamplerConfig::new(molecule, 1.0, 20).with_output_dir(dir.path());

    let result = run_with(&config, |output| {
        Err(SamplerError::structure(&output.swarms_path, "window closed abnormally"))
    });
    assert!(matches!(result, Err(SamplerError::Structure { .. })));
    assert!(dir.path().join("blob.obj").exists());
    assert!(!dir.path().join("blob_swarms.pdb").exists());
}

#[test]
fn domain_sized_structure_keeps_its_surface_and_point_count() {
    let dir = tempfile::tempdir().unwrap();
    let molecule = write_ellipsoid(dir.path());
    assert!(read_atoms(&molecule).unwrap().len() > 500);

    let requested = 400;
    let config = SamplerConfig::new(molecule, 10.0, requested).with_output_dir(dir.path());
    let output = run(&config).unwrap();

    assert!(
        output.refined.faces >= config.refined_face_floor(),
        "refined surface shrank to {} faces",
        output.refined.faces
    );
    assert!(output.decimation.final_triangles >= 40, "{}", output.decimation);
    assert_eq!(output.expansion.steps, 10);

    let written = read_atoms(&output.swarms_path).unwrap().len();
    assert_eq!(written, output.clustering.cluster_count());
    let tolerance = requested / 10;
    assert!(
        written.abs_diff(requested) <= tolerance,
        "{written} points for {requested} requested"
    );
}

//! OBJ files written by this crate load back unchanged.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::cast_possible_truncation)]

use mesh_io::{load_marked_obj, load_obj, save_marked_obj, save_obj, IoError};
use mesh_types::{IndexedMesh, MarkedSurface, Point3, SurfaceInfo};
use proptest::prelude::*;
use tempfile::tempdir;

#[test]
fn marked_sphere_survives_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sphere.obj");

    let mut surface = MarkedSurface::new(IndexedMesh::icosphere(3.5, 3));
    surface.fill_markers(23);
    surface.info = SurfaceInfo {
        is_hole: true,
        marker: -1,
    };
    save_marked_obj(&surface, &path).unwrap();

    let loaded = load_marked_obj(&path).unwrap();
    assert_eq!(loaded, surface);

    let plain = load_obj(&path).unwrap();
    assert_eq!(plain, surface.mesh);
}

#[test]
fn plain_save_has_default_markers() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plain.obj");
    let sphere = IndexedMesh::icosphere(1.0, 1);
    save_obj(&sphere, &path).unwrap();

    let loaded = load_marked_obj(&path).unwrap();
    assert_eq!(loaded.mesh, sphere);
    assert!(loaded.face_markers.iter().all(|&m| m == 0));
    assert_eq!(loaded.info, SurfaceInfo::default());
}

#[test]
fn overwrite_replaces_content() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("twice.obj");
    save_obj(&IndexedMesh::icosphere(1.0, 2), &path).unwrap();
    save_obj(&IndexedMesh::icosphere(1.0, 0), &path).unwrap();
    assert_eq!(load_obj(&path).unwrap().faces.len(), 20);
}

#[test]
fn missing_file_is_reported() {
    let dir = tempdir().unwrap();
    let err = load_obj(dir.path().join("absent.obj")).unwrap_err();
    assert!(matches!(err, IoError::FileNotFound { .. }));
}

proptest! {
    #[test]
    fn arbitrary_coordinates_round_trip(
        coords in prop::collection::vec(prop::array::uniform3(-1.0e6f64..1.0e6), 3..40),
        marker in -100i32..100,
    ) {
        let n = coords.len() as u32;
        let positions: Vec<_> = coords.iter().map(|c| Point3::from(*c)).collect();
        let faces: Vec<[u32; 3]> = (0..n - 2).map(|i| [i, i + 1, i + 2]).collect();
        let mut surface = MarkedSurface::new(IndexedMesh::from_positions(&positions, faces));
        surface.fill_markers(marker);

        let mut text = Vec::new();
        mesh_io::write_marked_obj(&surface, &mut text).unwrap();
        let back = mesh_io::read_obj(text.as_slice()).unwrap();
        prop_assert_eq!(back, surface);
    }
}

//! Topology checks on extracted molecular surfaces.

use mesh_molsurf::{gaussian_surface, Atom, Element, GaussianSurfaceParams};
use mesh_repair::validate_mesh;
use nalgebra::Point3;
use proptest::prelude::*;

/// A short helix of alternating carbons and nitrogens, roughly backbone-like.
fn helix(n: usize) -> Vec<Atom> {
    (0..n)
        .map(|i| {
            let t = i as f64 * 100f64.to_radians();
            let element = if i % 2 == 0 { Element::Carbon } else { Element::Nitrogen };
            Atom::new(element, Point3::new(2.3 * t.cos(), 2.3 * t.sin(), 1.5 * i as f64))
        })
        .collect()
}

#[test]
fn helix_surface_is_clean_and_single() {
    let surface = gaussian_surface(&helix(24), &GaussianSurfaceParams::default()).unwrap();
    let report = validate_mesh(&surface.mesh);

    assert!(report.is_clean(), "{report}");
    assert_eq!(report.component_count, 1);
}

#[test]
fn distant_clusters_give_separate_components() {
    let mut atoms = helix(12);
    atoms.extend(helix(12).into_iter().map(|mut a| {
        a.position.x += 60.0;
        a
    }));
    let surface = gaussian_surface(&atoms, &GaussianSurfaceParams::default()).unwrap();
    assert_eq!(validate_mesh(&surface.mesh).component_count, 2);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn proptest_surface_is_closed_for_any_spacing(spacing in 0.6f64..1.6) {
        let params = GaussianSurfaceParams::default().with_grid_spacing(spacing);
        let surface = gaussian_surface(&helix(16), &params).unwrap();
        let report = validate_mesh(&surface.mesh);
        prop_assert!(report.is_closed);
        prop_assert!(report.is_manifold);
        prop_assert!(!report.is_inside_out);
    }
}

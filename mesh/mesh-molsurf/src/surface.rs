//! Gaussian molecular surface construction.

use mesh_types::IndexedMesh;
use tracing::info;

use crate::atom::Atom;
use crate::density::sample_density;
use crate::error::{MolsurfError, MolsurfResult};
use crate::marching::extract_isosurface;
use crate::params::GaussianSurfaceParams;

/// A molecular surface and the grid it was extracted from.
#[derive(Debug, Clone)]
pub struct GaussianSurface {
    /// The extracted triangle mesh, CCW from outside.
    pub mesh: IndexedMesh,

    /// Dimensions of the density grid.
    pub grid_dimensions: (usize, usize, usize),

    /// Highest sampled density.
    pub max_density: f64,

    /// Number of atoms that contributed.
    pub atom_count: usize,
}

impl std::fmt::Display for GaussianSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (nx, ny, nz) = self.grid_dimensions;
        write!(
            f,
            "Gaussian surface: {} atoms → {} vertices, {} faces ({nx}×{ny}×{nz} grid)",
            self.atom_count,
            self.mesh.vertices.len(),
            self.mesh.faces.len(),
        )
    }
}

/// Build the Gaussian molecular surface of a set of atoms.
///
/// # Errors
///
/// Returns [`MolsurfError::EmptySurface`] when the density never reaches the
/// isovalue, plus any error from [`sample_density`].
///
/// # Example
///
/// ```
/// use mesh_molsurf::{gaussian_surface, Atom, Element, GaussianSurfaceParams};
/// use nalgebra::Point3;
///
/// // A tight cluster of carbons is dense enough to reach the default isovalue
/// let atoms: Vec<Atom> = (0..27)
///     .map(|i| {
///         let (x, y, z) = (i % 3, (i / 3) % 3, i / 9);
///         Atom::new(Element::Carbon, Point3::new(f64::from(x), f64::from(y), f64::from(z)) * 1.5)
///     })
///     .collect();
///
/// let surface = gaussian_surface(&atoms, &GaussianSurfaceParams::default()).unwrap();
/// assert!(surface.mesh.signed_volume() > 0.0);
/// ```
pub fn gaussian_surface(
    atoms: &[Atom],
    params: &GaussianSurfaceParams,
) -> MolsurfResult<GaussianSurface> {
    info!(
        atoms = atoms.len(),
        spacing = params.grid_spacing,
        isovalue = params.isovalue,
        "Building Gaussian molecular surface"
    );

    let grid = sample_density(atoms, params)?;
    let max_density = grid.max_value().unwrap_or(0.0);
    if max_density < params.isovalue {
        return Err(MolsurfError::EmptySurface {
            isovalue: params.isovalue,
        });
    }

    let mesh = extract_isosurface(&grid, params.isovalue);
    if mesh.faces.is_empty() {
        return Err(MolsurfError::EmptySurface {
            isovalue: params.isovalue,
        });
    }

    let surface = GaussianSurface {
        mesh,
        grid_dimensions: grid.dimensions(),
        max_density,
        atom_count: atoms.len(),
    };
    info!("{surface}");
    Ok(surface)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::Element;
    use nalgebra::Point3;

    fn cluster(n: i32, step: f64) -> Vec<Atom> {
        let mut atoms = Vec::new();
        for x in 0..n {
            for y in 0..n {
                for z in 0..n {
                    let p = Point3::new(f64::from(x), f64::from(y), f64::from(z)) * step;
                    atoms.push(Atom::new(Element::Carbon, p));
                }
            }
        }
        atoms
    }

    #[test]
    fn lone_atom_has_no_surface_at_default_isovalue() {
        let atoms = [Atom::new(Element::Carbon, Point3::origin())];
        let result = gaussian_surface(&atoms, &GaussianSurfaceParams::default());
        assert!(matches!(result, Err(MolsurfError::EmptySurface { .. })));
    }

    #[test]
    fn lone_atom_surface_at_low_isovalue() {
        let atoms = [Atom::new(Element::Carbon, Point3::origin())];
        let params = GaussianSurfaceParams::fine().with_isovalue(1.0);
        let surface = gaussian_surface(&atoms, &params).unwrap();

        // isovalue 1.0 is exactly the van der Waals sphere
        let exact = 4.0 / 3.0 * std::f64::consts::PI * 1.7_f64.powi(3);
        let volume = surface.mesh.signed_volume();
        assert!((volume - exact).abs() / exact < 0.1, "volume {volume} vs {exact}");
    }

    #[test]
    fn cluster_surface_encloses_atoms() {
        let atoms = cluster(3, 1.5);
        let surface = gaussian_surface(&atoms, &GaussianSurfaceParams::default()).unwrap();
        let bounds = mesh_types::MeshBounds::bounds(&surface.mesh);
        for atom in &atoms {
            assert!(bounds.contains(&atom.position));
        }
        assert!(surface.to_string().contains("27 atoms"));
    }
}

//! Gaussian density sampling.

#![allow(clippy::cast_precision_loss)]

use std::ops::Range;

use mesh_types::Aabb;
use tracing::debug;

use crate::atom::Atom;
use crate::error::{MolsurfError, MolsurfResult};
use crate::grid::ScalarGrid;
use crate::params::GaussianSurfaceParams;

/// Grid-index footprint of one atom.
struct Footprint {
    center: [f64; 3],
    inv_radius_sq: f64,
    influence_sq: f64,
    x: Range<usize>,
    y: Range<usize>,
}

/// Sample the Gaussian density of `atoms` on a grid that covers every
/// atom's influence region.
///
/// The outermost layer of grid points is forced to zero so any isosurface
/// extracted from the result is closed.
///
/// # Errors
///
/// Returns an error if there are no atoms, an atom is not finite, the
/// parameters are invalid, or the grid would exceed
/// [`GaussianSurfaceParams::max_grid_points`].
///
/// # Example
///
/// ```
/// use mesh_molsurf::{sample_density, Atom, Element, GaussianSurfaceParams};
/// use nalgebra::Point3;
///
/// let atoms = [Atom::new(Element::Carbon, Point3::origin())];
/// let grid = sample_density(&atoms, &GaussianSurfaceParams::default()).unwrap();
///
/// // Peak density of a lone atom is exp(0.2) at its center
/// assert!(grid.max_value().unwrap() > 1.2);
/// ```
pub fn sample_density(atoms: &[Atom], params: &GaussianSurfaceParams) -> MolsurfResult<ScalarGrid> {
    validate(atoms, params)?;

    let max_radius = atoms.iter().map(Atom::radius).fold(0.0, f64::max);
    let margin = params.influence_radius(max_radius) + params.grid_spacing;
    let bounds = Aabb::from_points(atoms.iter().map(|a| &a.position));

    let (nx, ny, nz) = ScalarGrid::dimensions_for(&bounds, params.grid_spacing, margin);
    let points = nx.saturating_mul(ny).saturating_mul(nz);
    if points > params.max_grid_points {
        return Err(MolsurfError::GridTooLarge {
            points,
            limit: params.max_grid_points,
        });
    }

    let mut grid = ScalarGrid::covering(&bounds, params.grid_spacing, margin);
    debug!(nx, ny, nz, atoms = atoms.len(), "Sampling Gaussian density");

    // Bucket atoms by the z-slices they touch so slices fill independently
    let mut footprints = Vec::with_capacity(atoms.len());
    let mut per_slice: Vec<Vec<usize>> = vec![Vec::new(); nz];
    for atom in atoms {
        let r = atom.radius();
        let influence = params.influence_radius(r);
        let p = atom.position;
        let index = footprints.len();
        for iz in grid.axis_range(2, p.z, influence) {
            per_slice[iz].push(index);
        }
        footprints.push(Footprint {
            center: [p.x, p.y, p.z],
            inv_radius_sq: 1.0 / (r * r),
            influence_sq: influence * influence,
            x: grid.axis_range(0, p.x, influence),
            y: grid.axis_range(1, p.y, influence),
        });
    }

    let origin = grid.origin();
    let spacing = grid.spacing();
    let blobbyness = params.blobbyness;

    grid.par_fill_slices(|iz, slice| {
        let z = origin.z + iz as f64 * spacing;
        for &index in &per_slice[iz] {
            let fp = &footprints[index];
            let dz = z - fp.center[2];
            for iy in fp.y.clone() {
                let dy = origin.y + iy as f64 * spacing - fp.center[1];
                let dyz = dy.mul_add(dy, dz * dz);
                if dyz > fp.influence_sq {
                    continue;
                }
                let row = iy * nx;
                for ix in fp.x.clone() {
                    let dx = origin.x + ix as f64 * spacing - fp.center[0];
                    let d_sq = dx.mul_add(dx, dyz);
                    if d_sq <= fp.influence_sq {
                        slice[row + ix] += (blobbyness * d_sq.mul_add(fp.inv_radius_sq, -1.0)).exp();
                    }
                }
            }
        }
    });

    grid.set_boundary(0.0);
    Ok(grid)
}

fn validate(atoms: &[Atom], params: &GaussianSurfaceParams) -> MolsurfResult<()> {
    if atoms.is_empty() {
        return Err(MolsurfError::EmptyStructure);
    }
    if let Some(index) = atoms
        .iter()
        .position(|a| a.position.coords.iter().any(|c| !c.is_finite()))
    {
        return Err(MolsurfError::NonFiniteAtom { index });
    }
    if !(params.grid_spacing.is_finite() && params.grid_spacing > 0.0) {
        return Err(MolsurfError::InvalidSpacing(params.grid_spacing));
    }
    if !(params.blobbyness.is_finite() && params.blobbyness < 0.0) {
        return Err(MolsurfError::InvalidBlobbyness(params.blobbyness));
    }
    if !(params.isovalue.is_finite() && params.isovalue > 0.0) {
        return Err(MolsurfError::InvalidIsovalue(params.isovalue));
    }
    Ok(())
}

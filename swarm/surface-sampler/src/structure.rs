//! Structure file input and swarm point output.
//!
//! Both directions go through `pdbtbx`, so the input may be PDB or mmCIF
//! (chosen by extension) and the output is always PDB.

use std::path::Path;

use mesh_molsurf::{Atom, Element};
use mesh_types::{Point3, PointSet};
use pdbtbx::{Atom as PdbAtom, Element as PdbElement, Model, PDBError, StrictnessLevel, PDB};
use tracing::{debug, info, warn};

use crate::error::{SamplerError, SamplerResult};

/// Atom name of every swarm point.
pub const SWARM_ATOM_NAME: &str = "C";
/// Residue name of every swarm point.
pub const SWARM_RESIDUE: &str = "SWR";
/// Chain holding the swarm points.
pub const SWARM_CHAIN: &str = "Z";

/// Map a `pdbtbx` element to one with a known radius.
fn element_of(atom: &PdbAtom) -> Option<Element> {
    match atom.element()? {
        PdbElement::C => Some(Element::Carbon),
        PdbElement::H => Some(Element::Hydrogen),
        PdbElement::O => Some(Element::Oxygen),
        PdbElement::N => Some(Element::Nitrogen),
        PdbElement::S => Some(Element::Sulfur),
        PdbElement::Se => Some(Element::Selenium),
        PdbElement::P => Some(Element::Phosphorus),
        _ => None,
    }
}

/// Convert atoms, returning the usable ones and the number skipped.
pub fn convert_atoms<'a>(atoms: impl Iterator<Item = &'a PdbAtom>) -> (Vec<Atom>, usize) {
    let mut skipped = 0;
    let converted = atoms
        .filter_map(|atom| {
            let element = element_of(atom);
            if element.is_none() {
                skipped += 1;
            }
            element.map(|e| Atom::new(e, Point3::new(atom.x(), atom.y(), atom.z())))
        })
        .collect();
    (converted, skipped)
}

fn utf8_path(path: &Path) -> SamplerResult<&str> {
    path.to_str()
        .ok_or_else(|| SamplerError::structure(path, "path is not valid UTF-8"))
}

fn describe(errors: &[PDBError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Read the atoms of the first model in a structure file.
///
/// Atoms whose element has no known radius (metals, waters without an
/// element column, ...) are skipped with a warning.
///
/// # Errors
///
/// [`SamplerError::Structure`] when the file cannot be parsed or holds no
/// usable atoms.
pub fn read_atoms(path: &Path) -> SamplerResult<Vec<Atom>> {
    let (pdb, warnings) =
        pdbtbx::open(utf8_path(path)?).map_err(|e| SamplerError::structure(path, describe(&e)))?;
    if !warnings.is_empty() {
        debug!(count = warnings.len(), "Structure parsed with warnings");
    }

    let model = pdb
        .models()
        .next()
        .ok_or_else(|| SamplerError::structure(path, "no models"))?;
    let (atoms, skipped) = convert_atoms(model.atoms());
    if skipped > 0 {
        warn!(skipped, "Skipped atoms with unsupported elements");
    }
    if atoms.is_empty() {
        return Err(SamplerError::structure(path, "no atoms with a supported element"));
    }

    info!(
        atoms = atoms.len(),
        models = pdb.model_count(),
        path = %path.display(),
        "Read structure"
    );
    Ok(atoms)
}

/// Build a single-model structure with one atom per point.
///
/// # Errors
///
/// [`SamplerError::Structure`] if a point is not finite.
pub fn points_to_pdb(points: &PointSet, path: &Path) -> SamplerResult<PDB> {
    if !points.all_finite() {
        return Err(SamplerError::structure(path, "swarm points must be finite"));
    }

    let mut model = Model::new(0);
    for (i, p) in points.iter().enumerate() {
        let serial = i + 1;
        let atom = PdbAtom::new(
            false,
            serial,
            SWARM_ATOM_NAME,
            p.x,
            p.y,
            p.z,
            1.0,
            0.0,
            SWARM_ATOM_NAME,
            0,
        )
        .ok_or_else(|| SamplerError::structure(path, format!("point {i} is not a valid atom")))?;
        let residue = isize::try_from(serial)
            .map_err(|_| SamplerError::structure(path, "too many points"))?;
        model.add_atom(atom, SWARM_CHAIN, (residue, None), (SWARM_RESIDUE, None));
    }

    let mut pdb = PDB::new();
    pdb.add_model(model);
    Ok(pdb)
}

/// Write swarm points as `ATOM` records, overwriting `path`.
///
/// Returns the number of records written.
///
/// # Errors
///
/// [`SamplerError::Structure`] if a point is not finite or the file
/// cannot be written.
pub fn write_points(points: &PointSet, path: &Path) -> SamplerResult<usize> {
    let pdb = points_to_pdb(points, path)?;
    pdbtbx::save(&pdb, utf8_path(path)?, StrictnessLevel::Loose)
        .map_err(|e| SamplerError::structure(path, describe(&e)))?;
    info!(points = points.len(), path = %path.display(), "Wrote swarm points");
    Ok(points.len())
}

//! Isosurface extraction by marching tetrahedra.
//!
//! Every grid cell is split into six tetrahedra that share the cell's main
//! diagonal (the Kuhn triangulation). Neighbouring cells split their shared
//! faces the same way, so the extracted surface is watertight and manifold
//! without any lookup tables. Surface vertices live on grid edges and are
//! shared between all triangles that cross the same edge.

#![allow(clippy::cast_possible_truncation)]

use hashbrown::HashMap;
use mesh_types::{IndexedMesh, Vertex};
use nalgebra::{Point3, Vector3};

use crate::grid::ScalarGrid;

/// Keeps interpolated vertices strictly inside their grid edge.
const EDGE_T_MIN: f64 = 1e-3;

/// Corner offsets of a cell, bit 0 = x, bit 1 = y, bit 2 = z.
const fn corner_offset(corner: usize) -> (usize, usize, usize) {
    (corner & 1, (corner >> 1) & 1, (corner >> 2) & 1)
}

/// The six Kuhn tetrahedra: one per axis permutation, walking from
/// corner 0 to corner 7.
const TETRAHEDRA: [[usize; 4]; 6] = [
    [0, 1, 3, 7],
    [0, 1, 5, 7],
    [0, 2, 3, 7],
    [0, 2, 6, 7],
    [0, 4, 5, 7],
    [0, 4, 6, 7],
];

struct Extractor<'a> {
    grid: &'a ScalarGrid,
    isovalue: f64,
    edge_vertices: HashMap<(usize, usize), u32>,
    mesh: IndexedMesh,
}

/// A sampled tetrahedron corner.
#[derive(Clone, Copy)]
struct Corner {
    index: usize,
    position: Point3<f64>,
    value: f64,
}

impl Corner {
    fn inside(&self, isovalue: f64) -> bool {
        self.value >= isovalue
    }
}

/// Extract the surface `value == isovalue` from a grid.
///
/// Samples at or above the isovalue are inside. Triangles are wound so
/// their normals point from inside to outside, which for a density field
/// means away from the atoms.
///
/// # Example
///
/// ```
/// use mesh_molsurf::{extract_isosurface, ScalarGrid};
/// use mesh_types::MeshTopology;
/// use nalgebra::Point3;
///
/// let mut grid = ScalarGrid::new((8, 8, 8), Point3::new(-3.5, -3.5, -3.5), 1.0);
/// for iz in 0..8 {
///     for iy in 0..8 {
///         for ix in 0..8 {
///             let r = grid.position(ix, iy, iz).coords.norm();
///             grid.set(ix, iy, iz, 3.0 - r);
///         }
///     }
/// }
///
/// let sphere = extract_isosurface(&grid, 0.0);
/// assert!(sphere.face_count() > 0);
/// assert!(sphere.signed_volume() > 0.0);
/// ```
#[must_use]
pub fn extract_isosurface(grid: &ScalarGrid, isovalue: f64) -> IndexedMesh {
    let mut extractor = Extractor {
        grid,
        isovalue,
        edge_vertices: HashMap::new(),
        mesh: IndexedMesh::new(),
    };

    let (nx, ny, nz) = grid.dimensions();
    if nx < 2 || ny < 2 || nz < 2 {
        return extractor.mesh;
    }

    for iz in 0..nz - 1 {
        for iy in 0..ny - 1 {
            for ix in 0..nx - 1 {
                extractor.process_cell(ix, iy, iz);
            }
        }
    }

    extractor.mesh
}

impl Extractor<'_> {
    fn process_cell(&mut self, ix: usize, iy: usize, iz: usize) {
        let corners: [Corner; 8] = std::array::from_fn(|c| {
            let (dx, dy, dz) = corner_offset(c);
            let (x, y, z) = (ix + dx, iy + dy, iz + dz);
            Corner {
                index: self.grid.index(x, y, z),
                position: self.grid.position(x, y, z),
                value: self.grid.get(x, y, z),
            }
        });

        let inside_count = corners.iter().filter(|c| c.inside(self.isovalue)).count();
        if inside_count == 0 || inside_count == 8 {
            return;
        }

        for tet in TETRAHEDRA {
            self.process_tetrahedron([
                corners[tet[0]],
                corners[tet[1]],
                corners[tet[2]],
                corners[tet[3]],
            ]);
        }
    }

    fn process_tetrahedron(&mut self, tet: [Corner; 4]) {
        let (inside, outside): (Vec<Corner>, Vec<Corner>) =
            tet.iter().partition(|c| c.inside(self.isovalue));

        let outward = centroid(&outside) - centroid(&inside);

        match (inside.as_slice(), outside.as_slice()) {
            ([a], [b, c, d]) | ([b, c, d], [a]) => {
                let v0 = self.edge_vertex(a, b);
                let v1 = self.edge_vertex(a, c);
                let v2 = self.edge_vertex(a, d);
                self.push_oriented([v0, v1, v2], &outward);
            }
            ([a, b], [c, d]) => {
                let ac = self.edge_vertex(a, c);
                let ad = self.edge_vertex(a, d);
                let bd = self.edge_vertex(b, d);
                let bc = self.edge_vertex(b, c);
                self.push_oriented([ac, ad, bd], &outward);
                self.push_oriented([ac, bd, bc], &outward);
            }
            _ => {}
        }
    }

    /// Vertex where the surface crosses the edge between two corners on
    /// opposite sides of the isovalue.
    fn edge_vertex(&mut self, a: &Corner, b: &Corner) -> u32 {
        let key = if a.index < b.index {
            (a.index, b.index)
        } else {
            (b.index, a.index)
        };
        if let Some(&v) = self.edge_vertices.get(&key) {
            return v;
        }

        let t = ((self.isovalue - a.value) / (b.value - a.value)).clamp(EDGE_T_MIN, 1.0 - EDGE_T_MIN);
        let position = a.position + (b.position - a.position) * t;

        let v = self.mesh.vertices.len() as u32;
        self.mesh.vertices.push(Vertex::new(position));
        self.edge_vertices.insert(key, v);
        v
    }

    fn push_oriented(&mut self, face: [u32; 3], outward: &Vector3<f64>) {
        let p = |i: u32| self.mesh.vertices[i as usize].position;
        let normal = (p(face[1]) - p(face[0])).cross(&(p(face[2]) - p(face[0])));
        if normal.dot(outward) < 0.0 {
            self.mesh.faces.push([face[0], face[2], face[1]]);
        } else {
            self.mesh.faces.push(face);
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn centroid(corners: &[Corner]) -> Point3<f64> {
    let sum: Vector3<f64> = corners.iter().map(|c| c.position.coords).sum();
    Point3::from(sum / corners.len().max(1) as f64)
}

//! Wavefront OBJ format support.
//!
//! Only geometry is read: `v` and `f` records. Texture and normal
//! references in face records are accepted and discarded, and polygons are
//! fan-triangulated. Two extensions carry surface metadata through plain
//! OBJ syntax:
//!
//! ```text
//! # surface ishole=true marker=-1
//! v 0.0 0.0 0.0
//! ...
//! g marker_23
//! f 1 2 3
//! ```
//!
//! The comment line holds the root [`SurfaceInfo`]; each `g marker_<n>`
//! group assigns marker `n` to the faces that follow it.

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use mesh_types::{IndexedMesh, MarkedSurface, SurfaceInfo, Vertex};
use tracing::debug;

use crate::error::{IoError, IoResult};

const INFO_PREFIX: &str = "surface";
const MARKER_GROUP: &str = "marker_";

fn open(path: &Path) -> IoResult<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::Io(e)
        }
    })
}

/// Load a triangle mesh from an OBJ file.
///
/// Markers and metadata are dropped; use [`load_marked_obj`] to keep them.
///
/// # Errors
///
/// Returns an error if the file cannot be read, a record is malformed, a
/// face index is out of range, or the file has no faces.
///
/// # Example
///
/// ```no_run
/// use mesh_io::load_obj;
///
/// let mesh = load_obj("surface.obj").unwrap();
/// println!("Loaded {} faces", mesh.faces.len());
/// ```
pub fn load_obj<P: AsRef<Path>>(path: P) -> IoResult<IndexedMesh> {
    load_marked_obj(path).map(MarkedSurface::into_mesh)
}

/// Load a mesh with its face markers and root metadata.
///
/// # Errors
///
/// Same as [`load_obj`].
pub fn load_marked_obj<P: AsRef<Path>>(path: P) -> IoResult<MarkedSurface> {
    let path = path.as_ref();
    let surface = read_obj(BufReader::new(open(path)?))?;
    debug!(
        path = %path.display(),
        vertices = surface.mesh.vertices.len(),
        faces = surface.mesh.faces.len(),
        "Loaded OBJ"
    );
    Ok(surface)
}

/// Parse OBJ text.
///
/// # Errors
///
/// Returns an error on malformed records, out-of-range indices, or when no
/// face is present.
pub fn read_obj<R: BufRead>(reader: R) -> IoResult<MarkedSurface> {
    let mut vertices: Vec<Vertex> = Vec::new();
    let mut faces: Vec<[u32; 3]> = Vec::new();
    let mut face_markers: Vec<i32> = Vec::new();
    let mut info = SurfaceInfo::default();
    let mut marker = 0;

    for (line_idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = line_idx + 1;
        let trimmed = line.trim();

        if let Some(comment) = trimmed.strip_prefix('#') {
            if let Some(parsed) = parse_info(comment) {
                info = parsed;
            }
            continue;
        }

        let mut parts = trimmed.split_whitespace();
        let Some(keyword) = parts.next() else {
            continue;
        };

        match keyword {
            "v" => {
                let mut coords = [0.0; 3];
                for c in &mut coords {
                    let token = parts
                        .next()
                        .ok_or_else(|| IoError::parse(line_no, "vertex needs 3 coordinates"))?;
                    *c = token.parse().map_err(|_| {
                        IoError::parse(line_no, format!("invalid coordinate '{token}'"))
                    })?;
                }
                vertices.push(Vertex::from(coords));
            }
            "f" => {
                let mut polygon: Vec<u32> = Vec::with_capacity(4);
                for token in parts {
                    let index = parse_index(token, line_no)?;
                    let resolved = if index < 0 {
                        vertices.len() as i64 + index
                    } else {
                        index - 1
                    };
                    if resolved < 0 || resolved >= vertices.len() as i64 {
                        return Err(IoError::IndexOutOfRange {
                            line: line_no,
                            index,
                            vertex_count: vertices.len(),
                        });
                    }
                    polygon.push(resolved as u32);
                }
                if polygon.len() < 3 {
                    return Err(IoError::parse(line_no, "face needs at least 3 vertices"));
                }
                for i in 1..polygon.len() - 1 {
                    faces.push([polygon[0], polygon[i], polygon[i + 1]]);
                    face_markers.push(marker);
                }
            }
            "g" => {
                marker = parts
                    .next()
                    .and_then(|name| name.strip_prefix(MARKER_GROUP))
                    .and_then(|n| n.parse().ok())
                    .unwrap_or(0);
            }
            _ => {}
        }
    }

    if faces.is_empty() {
        return Err(IoError::EmptyMesh);
    }

    Ok(MarkedSurface {
        mesh: IndexedMesh::from_parts(vertices, faces),
        face_markers,
        info,
    })
}

/// Index part of a face token: `i`, `i/t`, `i//n` or `i/t/n`.
fn parse_index(token: &str, line: usize) -> IoResult<i64> {
    let head = token.split('/').next().unwrap_or(token);
    match head.parse::<i64>() {
        Ok(0) => Err(IoError::parse(line, "face index 0 is invalid (OBJ is 1-based)")),
        Ok(index) => Ok(index),
        Err(_) => Err(IoError::parse(line, format!("invalid face index '{token}'"))),
    }
}

/// Parse `surface ishole=<bool> marker=<int>` from a comment body.
fn parse_info(comment: &str) -> Option<SurfaceInfo> {
    let mut parts = comment.split_whitespace();
    if parts.next() != Some(INFO_PREFIX) {
        return None;
    }
    let mut info = SurfaceInfo::default();
    for part in parts {
        match part.split_once('=') {
            Some(("ishole", value)) => info.is_hole = value.parse().ok()?,
            Some(("marker", value)) => info.marker = value.parse().ok()?,
            _ => {}
        }
    }
    Some(info)
}

/// Save a bare mesh as OBJ.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_obj<P: AsRef<Path>>(mesh: &IndexedMesh, path: P) -> IoResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_vertices(mesh, &mut writer)?;
    for face in &mesh.faces {
        write_face(*face, &mut writer)?;
    }
    writer.flush()?;
    Ok(())
}

/// Save a mesh with its face markers and root metadata.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
///
/// # Example
///
/// ```no_run
/// use mesh_io::save_marked_obj;
/// use mesh_types::{unit_cube, MarkedSurface};
///
/// let mut surface = MarkedSurface::new(unit_cube());
/// surface.fill_markers(23);
/// save_marked_obj(&surface, "cube.obj").unwrap();
/// ```
pub fn save_marked_obj<P: AsRef<Path>>(surface: &MarkedSurface, path: P) -> IoResult<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_marked_obj(surface, &mut writer)?;
    writer.flush()?;
    debug!(
        path = %path.display(),
        faces = surface.mesh.faces.len(),
        "Saved OBJ"
    );
    Ok(())
}

/// Write a marked surface as OBJ text.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_marked_obj<W: Write>(surface: &MarkedSurface, writer: &mut W) -> IoResult<()> {
    writeln!(
        writer,
        "# {INFO_PREFIX} ishole={} marker={}",
        surface.info.is_hole, surface.info.marker
    )?;
    write_vertices(&surface.mesh, writer)?;

    let mut current = None;
    for (i, face) in surface.mesh.faces.iter().enumerate() {
        let marker = surface.face_markers.get(i).copied().unwrap_or(0);
        if current != Some(marker) {
            writeln!(writer, "g {MARKER_GROUP}{marker}")?;
            current = Some(marker);
        }
        write_face(*face, writer)?;
    }
    Ok(())
}

fn write_vertices<W: Write>(mesh: &IndexedMesh, writer: &mut W) -> IoResult<()> {
    for v in &mesh.vertices {
        // `{}` on f64 is the shortest representation that parses back exactly
        writeln!(writer, "v {} {} {}", v.position.x, v.position.y, v.position.z)?;
    }
    Ok(())
}

fn write_face<W: Write>([a, b, c]: [u32; 3], writer: &mut W) -> IoResult<()> {
    writeln!(writer, "f {} {} {}", a + 1, b + 1, c + 1)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use mesh_types::unit_cube;

    fn read(text: &str) -> IoResult<MarkedSurface> {
        read_obj(BufReader::new(text.as_bytes()))
    }

    #[test]
    fn all_face_forms() {
        let text = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vn 0 0 1
f 1 2 3
f 1/1 3/1 4/1
f 1//1 2//1 4//1
f 2/1/1 3/1/1 4/1/1
";
        let surface = read(text).unwrap();
        assert_eq!(surface.mesh.vertices.len(), 4);
        assert_eq!(
            surface.mesh.faces,
            vec![[0, 1, 2], [0, 2, 3], [0, 1, 3], [1, 2, 3]]
        );
    }

    #[test]
    fn negative_indices_are_relative() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n";
        let surface = read(text).unwrap();
        assert_eq!(surface.mesh.faces, vec![[0, 1, 2]]);
    }

    #[test]
    fn polygons_are_fan_triangulated() {
        let text = "v 0 0 0\nv 1 0 0\nv 2 1 0\nv 1 2 0\nv 0 1 0\nf 1 2 3 4 5\n";
        let surface = read(text).unwrap();
        assert_eq!(surface.mesh.faces, vec![[0, 1, 2], [0, 2, 3], [0, 3, 4]]);
    }

    #[test]
    fn groups_and_info_are_read() {
        let text = "\
# surface ishole=true marker=-1
v 0 0 0
v 1 0 0
v 0 1 0
v 0 0 1
g marker_23
f 1 2 3
g other
f 1 2 4
";
        let surface = read(text).unwrap();
        assert_eq!(surface.face_markers, vec![23, 0]);
        assert!(surface.info.is_hole);
        assert_eq!(surface.info.marker, -1);
    }

    #[test]
    fn errors_carry_line_numbers() {
        let err = read("v 0 0 0\nv 1 x 0\n").unwrap_err();
        assert!(matches!(err, IoError::Parse { line: 2, .. }), "{err}");

        let err = read("v 0 0 0\nv 1 0 0\nv 0 1 0\n\nf 1 2 7\n").unwrap_err();
        assert!(matches!(
            err,
            IoError::IndexOutOfRange {
                line: 5,
                index: 7,
                vertex_count: 3
            }
        ));

        let err = read("v 0 0 0\nf 0 1 1\n").unwrap_err();
        assert!(matches!(err, IoError::Parse { line: 2, .. }));

        let err = read("v 0 0 0\nv 1 0 0\nf 1 2\n").unwrap_err();
        assert!(matches!(err, IoError::Parse { line: 3, .. }));
    }

    #[test]
    fn no_faces_is_empty() {
        assert!(matches!(read("v 0 0 0\n"), Err(IoError::EmptyMesh)));
        assert!(matches!(read(""), Err(IoError::EmptyMesh)));
    }

    #[test]
    fn writer_groups_runs_of_markers() {
        let mut surface = MarkedSurface::new(unit_cube());
        surface.fill_markers(23);
        surface.face_markers[11] = 5;
        surface.info = SurfaceInfo {
            is_hole: true,
            marker: -1,
        };

        let mut out = Vec::new();
        write_marked_obj(&surface, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("# surface ishole=true marker=-1\n"));
        assert_eq!(text.matches("g marker_23").count(), 1);
        assert_eq!(text.matches("g marker_5").count(), 1);
        assert_eq!(text.lines().filter(|l| l.starts_with("f ")).count(), 12);

        let back = read(&text).unwrap();
        assert_eq!(back, surface);
    }

    #[test]
    fn load_nonexistent_file() {
        let result = load_obj("nonexistent_file_12345.obj");
        if let Err(IoError::FileNotFound { path }) = result {
            assert!(path.to_string_lossy().contains("nonexistent"));
        } else {
            panic!("expected FileNotFound");
        }
    }
}

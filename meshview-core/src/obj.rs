//! Wavefront OBJ reader: positions, normals, texture coordinates and faces
use std::fs;
use std::path::Path;

use nalgebra::{Point3, Vector3};
use nom::{
    character::complete::{char, digit1},
    combinator::{all_consuming, map_opt, opt},
    number::complete::float,
    sequence::{pair, preceded},
    IResult,
};
use tracing::{info, trace, warn};

use crate::bounds::BoundingBox;
use crate::error::{ObjError, ObjResult};
use crate::geometry::{Corner, Mesh, TexCoord};

/// Output of [`parse_obj`]: the raw mesh plus the bounds of its `v` records.
#[derive(Debug, Clone)]
pub struct ParsedObj {
    pub mesh: Mesh,
    pub bounds: BoundingBox,
}

impl ParsedObj {
    /// Recenter on the bounding box midpoint and hand back the mesh.
    pub fn into_centered(self) -> Mesh {
        let mut mesh = self.mesh;
        mesh.center_in_place(&self.bounds);
        mesh
    }
}

/// One line of an OBJ file, dispatched on its leading keyword.
///
/// Keywords other than `v`, `vn`, `vt` and `f` (comments, groups,
/// materials, smoothing groups, ...) become [`Record::Ignored`] so newer or
/// richer files still load.
#[derive(Debug, Clone, PartialEq)]
pub enum Record<'a> {
    Vertex(Point3<f32>),
    Normal(Vector3<f32>),
    TexCoord(TexCoord),
    Face(Vec<Corner>),
    Ignored(&'a str),
}

/// Parse an OBJ document. Fan triangulation happens as faces are read.
pub fn parse_obj(input: &str) -> ObjResult<ParsedObj> {
    let mut mesh = Mesh::new();
    let mut bounds = BoundingBox::empty();

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        match parse_record(line, line_no)? {
            Record::Vertex(position) => {
                bounds.include(&position);
                mesh.vertices.push(position);
            }
            Record::Normal(normal) => mesh.normals.push(normal),
            Record::TexCoord(uv) => mesh.texcoords.push(uv),
            Record::Face(corners) => {
                if corners.len() < 3 {
                    warn!(
                        line = line_no,
                        corners = corners.len(),
                        "skipping face with fewer than 3 corners"
                    );
                    continue;
                }
                mesh.add_polygon(&corners);
            }
            Record::Ignored(keyword) => {
                if !keyword.is_empty() {
                    trace!(line = line_no, keyword, "ignoring record");
                }
            }
        }
    }

    Ok(ParsedObj { mesh, bounds })
}

/// Read, parse and center an OBJ file.
pub fn load_obj(path: impl AsRef<Path>) -> ObjResult<Mesh> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| ObjError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    // Exporters write comments and group names in whatever encoding they like.
    // Numeric records stay strict: a stray byte there becomes U+FFFD and fails
    // the token parsers.
    let text = String::from_utf8_lossy(&bytes);
    let parsed = parse_obj(&text)?;
    let extent = parsed.bounds.size();
    let mesh = parsed.into_centered();
    info!(
        path = %path.display(),
        extent = ?(extent.x, extent.y, extent.z),
        vertices = mesh.vertices.len(),
        normals = mesh.normals.len(),
        texcoords = mesh.texcoords.len(),
        faces = mesh.faces.len(),
        "loaded mesh"
    );
    Ok(mesh)
}

/// Classify and parse a single line.
pub fn parse_record(line: &str, line_no: usize) -> ObjResult<Record<'_>> {
    let mut tokens = line.split_whitespace();
    let Some(keyword) = tokens.next() else {
        return Ok(Record::Ignored(""));
    };

    match keyword {
        "v" => {
            let [x, y, z] = coordinates(&mut tokens, line_no, "v")?;
            Ok(Record::Vertex(Point3::new(x, y, z)))
        }
        "vn" => {
            let [x, y, z] = coordinates(&mut tokens, line_no, "vn")?;
            Ok(Record::Normal(unit_or_zero(Vector3::new(x, y, z))))
        }
        "vt" => {
            let [u] = coordinates(&mut tokens, line_no, "vt")?;
            let v = match tokens.next() {
                Some(token) => number(token, line_no)?,
                None => 0.0,
            };
            Ok(Record::TexCoord(TexCoord::new(u, v)))
        }
        "f" => tokens
            .map(|token| face_corner(token, line_no))
            .collect::<ObjResult<Vec<_>>>()
            .map(Record::Face),
        other => Ok(Record::Ignored(other)),
    }
}

/// Normalize, leaving an exactly zero vector as is.
fn unit_or_zero(normal: Vector3<f32>) -> Vector3<f32> {
    let length = normal.norm();
    if length > 0.0 {
        normal / length
    } else {
        normal
    }
}

fn coordinates<'a, const N: usize>(
    tokens: &mut impl Iterator<Item = &'a str>,
    line_no: usize,
    record: &'static str,
) -> ObjResult<[f32; N]> {
    let mut values = [0.0; N];
    for value in &mut values {
        let token = tokens.next().ok_or(ObjError::MissingValue {
            line: line_no,
            record,
        })?;
        *value = number(token, line_no)?;
    }
    Ok(values)
}

fn number(token: &str, line_no: usize) -> ObjResult<f32> {
    all_consuming(float::<&str, nom::error::Error<&str>>)(token)
        .map(|(_, value)| value)
        .map_err(|_| ObjError::InvalidNumber {
            line: line_no,
            token: token.to_string(),
        })
}

/// Parse one `f` corner: `v`, `v/vt`, `v//vn` or `v/vt/vn`.
pub fn face_corner(token: &str, line_no: usize) -> ObjResult<Corner> {
    all_consuming(corner)(token)
        .map(|(_, corner)| corner)
        .map_err(|_| ObjError::InvalidFaceToken {
            line: line_no,
            token: token.to_string(),
        })
}

fn corner(input: &str) -> IResult<&str, Corner> {
    let (input, vertex) = index(input)?;
    let (input, rest) = opt(preceded(
        char('/'),
        pair(opt(index), opt(preceded(char('/'), index))),
    ))(input)?;
    let (texcoord, normal) = rest.unwrap_or((None, None));
    Ok((
        input,
        Corner {
            vertex,
            texcoord,
            normal,
        },
    ))
}

/// One-based positive index, returned zero-based. Relative (negative)
/// indices are rejected.
fn index(input: &str) -> IResult<&str, usize> {
    map_opt(digit1, |digits: &str| {
        digits.parse::<usize>().ok()?.checked_sub(1)
    })(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_face_token_forms() {
        let full = face_corner("1/2/3", 1).unwrap();
        assert_eq!((full.vertex, full.texcoord, full.normal), (0, Some(1), Some(2)));

        let no_uv = face_corner("4//5", 1).unwrap();
        assert_eq!((no_uv.vertex, no_uv.texcoord, no_uv.normal), (3, None, Some(4)));

        let bare = face_corner("7", 1).unwrap();
        assert_eq!((bare.vertex, bare.texcoord, bare.normal), (6, None, None));

        let uv_only = face_corner("2/9", 1).unwrap();
        assert_eq!((uv_only.vertex, uv_only.texcoord, uv_only.normal), (1, Some(8), None));
    }

    #[test]
    fn test_bad_face_tokens() {
        for token in ["0", "-1", "1/-2/3", "a", "1/2/", "1//", "1/2/3/4", ""] {
            assert!(
                matches!(face_corner(token, 9), Err(ObjError::InvalidFaceToken { line: 9, .. })),
                "{token:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_normals_are_normalized() {
        let parsed = parse_obj("vn 0 3 4\nvn 0 0 0\n").unwrap();
        assert_relative_eq!(parsed.mesh.normals[0], Vector3::new(0.0, 0.6, 0.8), epsilon = 1e-6);
        assert_eq!(parsed.mesh.normals[1], Vector3::zeros());
    }

    #[test]
    fn test_texcoords_are_verbatim() {
        let parsed = parse_obj("vt 1.5 -2\nvt 0.25\n").unwrap();
        assert_eq!(parsed.mesh.texcoords[0], TexCoord::new(1.5, -2.0));
        assert_eq!(parsed.mesh.texcoords[1], TexCoord::new(0.25, 0.0));
    }

    #[test]
    fn test_unknown_records_are_ignored() {
        let input = "# comment\nmtllib scene.mtl\no thing\ng group\ns off\n\
                     usemtl steel\nv 1 2 3\n\n   \n";
        let parsed = parse_obj(input).unwrap();
        assert_eq!(parsed.mesh.vertices.len(), 1);
        assert!(parsed.mesh.faces.is_empty());
        assert_eq!(parse_record("usemtl steel", 1).unwrap(), Record::Ignored("usemtl"));
    }

    #[test]
    fn test_vertex_bounds_accumulate() {
        let parsed = parse_obj("v 0 0 0\nv 10 -2 4\nv 3 5 -1\n").unwrap();
        assert_eq!(parsed.bounds.min, Point3::new(0.0, -2.0, -1.0));
        assert_eq!(parsed.bounds.max, Point3::new(10.0, 5.0, 4.0));
    }

    #[test]
    fn test_extra_vertex_components_are_ignored() {
        let parsed = parse_obj("v 1 2 3 1.0\n").unwrap();
        assert_eq!(parsed.mesh.vertices[0], Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_malformed_number_fails_parse() {
        let err = parse_obj("v 1 2 3\nv 1 two 3\n").unwrap_err();
        match err {
            ObjError::InvalidNumber { line, token } => {
                assert_eq!(line, 2);
                assert_eq!(token, "two");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(
            parse_obj("vn 1 2.5e\n"),
            Err(ObjError::InvalidNumber { line: 1, .. })
        ));
    }

    #[test]
    fn test_missing_coordinate_fails_parse() {
        assert!(matches!(
            parse_obj("v 1 2\n"),
            Err(ObjError::MissingValue { line: 1, record: "v" })
        ));
    }

    #[test]
    fn test_degenerate_face_is_skipped() {
        let parsed = parse_obj("v 0 0 0\nv 1 0 0\nf 1 2\n").unwrap();
        assert!(parsed.mesh.faces.is_empty());
    }
}

/// Wavefront OBJ parser for `v`, `vt`, `vn` and `f` records
use std::fs;
use std::path::{Path, PathBuf};

use nalgebra::{Vector3, Vector4};
use nom::{
    character::complete::{char, i64 as index},
    combinator::{all_consuming, opt},
    number::complete::float,
    sequence::preceded,
    Finish, IResult,
};

use crate::geometry::{Mesh, Polygon, PolygonVertex};

/// Failure to produce a mesh from a file
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("line {line}: {kind} in `{content}`")]
    Parse {
        /// One-based line number
        line: usize,
        content: String,
        kind: ParseErrorKind,
    },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("`{record}` record needs at least {required} values, found {found}")]
    MissingValues {
        record: &'static str,
        required: usize,
        found: usize,
    },
    #[error("invalid number `{0}`")]
    InvalidNumber(String),
    #[error("invalid face vertex `{0}`")]
    InvalidFaceVertex(String),
    #[error("vertex index 0 is not allowed")]
    ZeroIndex,
    #[error("relative index {index} reaches before the first of {count} vertices")]
    IndexBeforeStart { index: i64, count: usize },
}

/// Read and parse the OBJ file at `path`
pub fn load<P: AsRef<Path>>(path: P) -> Result<Mesh, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!("Loading mesh: {}", path.display());
    parse_str(&text)
}

/// Parse OBJ text. Any malformed record fails the whole parse.
pub fn parse_str(input: &str) -> Result<Mesh, LoadError> {
    let mut mesh = Mesh::new();

    for (number, line) in input.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        parse_record(trimmed, &mut mesh).map_err(|kind| LoadError::Parse {
            line: number + 1,
            content: trimmed.to_string(),
            kind,
        })?;
    }

    log::debug!(
        "parsed {} vertices, {} texture vertices, {} normals, {} polygons",
        mesh.vertices.len(),
        mesh.texture_vertices.len(),
        mesh.normals.len(),
        mesh.polygons.len()
    );
    Ok(mesh)
}

fn parse_record(line: &str, mesh: &mut Mesh) -> Result<(), ParseErrorKind> {
    let mut tokens = line.split_whitespace();
    let Some(kind) = tokens.next() else {
        return Ok(());
    };
    let payload: Vec<&str> = tokens.collect();

    match kind {
        "v" => {
            require("v", &payload, 3)?;
            let w = payload.get(3).map(|t| parse_number(t)).transpose()?;
            mesh.vertices.push(Vector4::new(
                parse_number(payload[0])?,
                parse_number(payload[1])?,
                parse_number(payload[2])?,
                w.unwrap_or(1.0),
            ));
        }
        "vt" => {
            require("vt", &payload, 1)?;
            let v = payload.get(1).map(|t| parse_number(t)).transpose()?;
            let w = payload.get(2).map(|t| parse_number(t)).transpose()?;
            mesh.texture_vertices.push(Vector3::new(
                parse_number(payload[0])?,
                v.unwrap_or(0.0),
                w.unwrap_or(0.0),
            ));
        }
        "vn" => {
            require("vn", &payload, 3)?;
            mesh.normals.push(Vector3::new(
                parse_number(payload[0])?,
                parse_number(payload[1])?,
                parse_number(payload[2])?,
            ));
        }
        "f" => {
            require("f", &payload, 3)?;
            let records = payload
                .iter()
                .map(|token| parse_face_vertex(token, mesh))
                .collect::<Result<Vec<_>, _>>()?;
            mesh.polygons.push(Polygon::new(records));
        }
        other => log::trace!("ignoring `{}` record", other),
    }

    Ok(())
}

fn require(record: &'static str, payload: &[&str], required: usize) -> Result<(), ParseErrorKind> {
    if payload.len() < required {
        return Err(ParseErrorKind::MissingValues {
            record,
            required,
            found: payload.len(),
        });
    }
    Ok(())
}

/// Decimal point, no grouping, regardless of locale
fn parse_number(token: &str) -> Result<f32, ParseErrorKind> {
    all_consuming(float::<&str, nom::error::Error<&str>>)(token)
        .finish()
        .ok()
        .map(|(_, value)| value)
        // nom also takes `nan`, `inf` and overflowing exponents
        .filter(|value| value.is_finite())
        .ok_or_else(|| ParseErrorKind::InvalidNumber(token.to_string()))
}

/// `g`, `g/t`, `g/t/n` or `g//n`, indices still as written
fn face_vertex(input: &str) -> IResult<&str, (i64, Option<i64>, Option<i64>)> {
    let (input, geometric) = index(input)?;
    let (input, texture) = opt(preceded(char('/'), opt(index)))(input)?;
    let (input, normal) = match texture {
        Some(_) => opt(preceded(char('/'), index))(input)?,
        None => (input, None),
    };
    Ok((input, (geometric, texture.flatten(), normal)))
}

fn parse_face_vertex(token: &str, mesh: &Mesh) -> Result<PolygonVertex, ParseErrorKind> {
    let (_, (geometric, texture, normal)) = all_consuming(face_vertex)(token)
        .finish()
        .map_err(|_| ParseErrorKind::InvalidFaceVertex(token.to_string()))?;

    Ok(PolygonVertex {
        geometric: resolve_index(geometric, mesh.vertices.len())?,
        texture: texture
            .map(|i| resolve_index(i, mesh.texture_vertices.len()))
            .transpose()?,
        normal: normal
            .map(|i| resolve_index(i, mesh.normals.len()))
            .transpose()?,
    })
}

/// Turn a one-based or negative (relative to `count` parsed so far) index into a zero-based one
pub fn resolve_index(index: i64, count: usize) -> Result<usize, ParseErrorKind> {
    match index {
        0 => Err(ParseErrorKind::ZeroIndex),
        k if k > 0 => Ok((k - 1) as usize),
        k => {
            let resolved = count as i64 + k;
            if resolved < 0 {
                return Err(ParseErrorKind::IndexBeforeStart { index: k, count });
            }
            Ok(resolved as usize)
        }
    }
}

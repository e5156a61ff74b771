//! Structured coordinate addresses.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Address of one coordinate slot inside a feature.
///
/// Polygons use `(ring, vertex)`. The dotted string form (`"0.3"`) only exists
/// at the GeoJSON boundary, e.g. in the `coord_path` property of vertex markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordPath {
    pub ring: usize,
    pub vertex: usize,
}

impl CoordPath {
    /// Path to a vertex of the outer ring.
    pub const fn outer(vertex: usize) -> Self {
        Self { ring: 0, vertex }
    }
}

/// Failure to parse a dotted coordinate path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("coordinate path is empty")]
    Empty,
    #[error("coordinate path '{0}' must have exactly two components")]
    WrongArity(String),
    #[error("invalid index '{index}' in coordinate path '{path}'")]
    InvalidIndex { path: String, index: String },
}

impl fmt::Display for CoordPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.ring, self.vertex)
    }
}

impl FromStr for CoordPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PathError::Empty);
        }

        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() != 2 {
            return Err(PathError::WrongArity(s.to_string()));
        }

        let parse = |index: &str| {
            index.parse::<usize>().map_err(|_| PathError::InvalidIndex {
                path: s.to_string(),
                index: index.to_string(),
            })
        };

        Ok(Self {
            ring: parse(parts[0])?,
            vertex: parse(parts[1])?,
        })
    }
}

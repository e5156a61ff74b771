//! Feature geometry and its GeoJSON representation.
//!
//! - [`PolygonFeature`]: the editable polygon with path-addressed coordinates
//! - [`CoordPath`]: structured `(ring, vertex)` address with a dotted wire form
//! - [`Feature`]/[`Geometry`]: the GeoJSON output handed to renderers and listeners

pub mod geojson;
pub mod path;
pub mod polygon;
pub mod vertex;

pub use geojson::{ActiveState, Feature, Geometry, Meta, Position, Properties};
pub use path::{CoordPath, PathError};
pub use polygon::{FeatureError, PolygonFeature};
pub use vertex::create_vertex;

use std::fmt;
use std::str::FromStr;

/// Store-assigned feature identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeatureId(pub u64);

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FeatureId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(FeatureId)
    }
}

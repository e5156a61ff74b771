//! Vertex handle features.

use super::FeatureId;
use super::geojson::{ActiveState, Feature, Geometry, Meta, Position, Properties};
use super::path::CoordPath;

/// Builds a clickable vertex marker belonging to `parent`.
///
/// Markers carry the parent id and the dotted coordinate path so that a
/// click on the rendered handle can be traced back to the slot it stands for.
pub fn create_vertex(
    parent: FeatureId,
    position: Position,
    path: CoordPath,
    selected: bool,
) -> Feature {
    Feature {
        id: None,
        properties: Properties {
            meta: Some(Meta::Vertex),
            parent: Some(parent.to_string()),
            coord_path: Some(path.to_string()),
            active: Some(if selected {
                ActiveState::Active
            } else {
                ActiveState::Inactive
            }),
            ..Default::default()
        },
        geometry: Geometry::Point(position),
    }
}

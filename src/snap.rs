//! Pointer snapping against features published by the map.

use crate::feature::{FeatureId, Geometry, Position};
use crate::input::MapEvent;
use crate::map::MapSurface;

/// Adjusts a pointer event so it lands on nearby existing geometry.
pub trait Snapper {
    /// Returns `event`, possibly with its position moved onto a snap target.
    ///
    /// `feature_id` is the feature being drawn; it is never a snap target.
    fn snap(
        &self,
        event: &MapEvent,
        map: &dyn MapSurface,
        feature_id: FeatureId,
        sources: &[String],
    ) -> MapEvent;
}

/// Snaps to the closest vertex within `tolerance` screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexSnapper {
    pub tolerance: f64,
}

impl VertexSnapper {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }
}

impl Snapper for VertexSnapper {
    fn snap(
        &self,
        event: &MapEvent,
        map: &dyn MapSurface,
        feature_id: FeatureId,
        sources: &[String],
    ) -> MapEvent {
        let Some(lng_lat) = event.lng_lat else {
            return event.clone();
        };
        let origin = event.point.unwrap_or_else(|| map.project(lng_lat));
        let own_id = feature_id.to_string();

        let mut best: Option<(f64, Position)> = None;
        for source in sources {
            for feature in map.query_source(source) {
                let is_own = feature.id.as_deref() == Some(own_id.as_str())
                    || feature.properties.parent.as_deref() == Some(own_id.as_str());
                if is_own {
                    continue;
                }
                for vertex in vertices(&feature.geometry) {
                    let distance = map.project(vertex).distance(&origin);
                    if distance <= self.tolerance && best.is_none_or(|(d, _)| distance < d) {
                        best = Some((distance, vertex));
                    }
                }
            }
        }

        match best {
            Some((_, vertex)) => {
                let mut snapped = event.clone();
                snapped.lng_lat = Some(vertex);
                snapped.point = Some(map.project(vertex));
                snapped
            }
            None => event.clone(),
        }
    }
}

fn vertices(geometry: &Geometry) -> Vec<Position> {
    match geometry {
        Geometry::Point(p) => vec![*p],
        Geometry::LineString(coords) => coords.clone(),
        Geometry::Polygon(rings) => rings.iter().flatten().copied().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::{Feature, Properties};
    use crate::map::HeadlessMap;

    fn point_feature(id: &str, at: Position) -> Feature {
        Feature {
            id: Some(id.into()),
            properties: Properties::default(),
            geometry: Geometry::Point(at),
        }
    }

    fn map_with_targets() -> HeadlessMap {
        let mut map = HeadlessMap::new(100.0, true);
        map.add_source_feature("roads", point_feature("r1", Position::new(1.0, 1.0)));
        map.add_source_feature("roads", point_feature("r2", Position::new(1.05, 1.0)));
        map.add_source_feature("parcels", point_feature("p1", Position::new(2.0, 2.0)));
        map
    }

    #[test]
    fn snaps_to_nearest_vertex_in_range() {
        let map = map_with_targets();
        let snapper = VertexSnapper::new(10.0);
        let event = MapEvent::mouse_move(Position::new(1.04, 1.0));

        let snapped = snapper.snap(&event, &map, FeatureId(99), &["roads".to_string()]);
        assert_eq!(snapped.lng_lat, Some(Position::new(1.05, 1.0)));
        assert!(snapped.point.is_some());
    }

    #[test]
    fn leaves_event_alone_when_nothing_is_close() {
        let map = map_with_targets();
        let snapper = VertexSnapper::new(2.0);
        let event = MapEvent::mouse_move(Position::new(1.5, 1.5));

        let snapped = snapper.snap(&event, &map, FeatureId(99), &["roads".to_string()]);
        assert_eq!(snapped, event);
    }

    #[test]
    fn only_configured_sources_are_searched() {
        let map = map_with_targets();
        let snapper = VertexSnapper::new(10.0);
        let event = MapEvent::mouse_move(Position::new(2.01, 2.0));

        let untouched = snapper.snap(&event, &map, FeatureId(99), &["roads".to_string()]);
        assert_eq!(untouched.lng_lat, event.lng_lat);

        let snapped = snapper.snap(&event, &map, FeatureId(99), &["parcels".to_string()]);
        assert_eq!(snapped.lng_lat, Some(Position::new(2.0, 2.0)));
    }

    #[test]
    fn never_snaps_to_the_feature_being_drawn() {
        let mut map = HeadlessMap::new(100.0, true);
        map.add_source_feature("draw", point_feature("5", Position::new(0.0, 0.0)));
        let snapper = VertexSnapper::new(10.0);
        let event = MapEvent::mouse_move(Position::new(0.01, 0.0));

        let snapped = snapper.snap(&event, &map, FeatureId(5), &["draw".to_string()]);
        assert_eq!(snapped, event);
    }
}

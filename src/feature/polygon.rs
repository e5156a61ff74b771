//! Polygon feature with path-addressed coordinate storage.

use super::geojson::{Feature, Geometry, Position, Properties};
use super::path::CoordPath;
use super::FeatureId;
use thiserror::Error;

/// Failure to mutate a feature's coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeatureError {
    #[error("ring {ring} does not exist (feature has {rings} rings)")]
    MissingRing { ring: usize, rings: usize },
    #[error("vertex {vertex} is past the end of ring {ring} (length {len})")]
    VertexOutOfRange {
        ring: usize,
        vertex: usize,
        len: usize,
    },
}

/// A polygon stored without closing repeats.
///
/// Each ring holds only its distinct entries; `to_geojson` appends the first
/// entry again when producing the wire form.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonFeature {
    id: FeatureId,
    pub properties: Properties,
    coordinates: Vec<Vec<Position>>,
}

impl PolygonFeature {
    /// Creates a polygon with a single empty outer ring.
    pub fn empty(id: FeatureId) -> Self {
        Self {
            id,
            properties: Properties::default(),
            coordinates: vec![Vec::new()],
        }
    }

    /// Builds a polygon from open rings (without the closing repeat).
    pub fn from_rings(id: FeatureId, coordinates: Vec<Vec<Position>>) -> Self {
        Self {
            id,
            properties: Properties::default(),
            coordinates,
        }
    }

    pub fn id(&self) -> FeatureId {
        self.id
    }

    /// The open rings, one `Vec` per ring.
    pub fn coordinates(&self) -> &[Vec<Position>] {
        &self.coordinates
    }

    /// Returns the coordinate at `path`, if that slot exists.
    pub fn get_coordinate(&self, path: CoordPath) -> Option<Position> {
        self.coordinates
            .get(path.ring)
            .and_then(|ring| ring.get(path.vertex))
            .copied()
    }

    /// Writes a coordinate into `path`.
    ///
    /// Writing one past the end of a ring appends; writing to the ring right
    /// after the last one opens a new ring.
    pub fn update_coordinate(
        &mut self,
        path: CoordPath,
        lng: f64,
        lat: f64,
    ) -> Result<(), FeatureError> {
        if path.ring == self.coordinates.len() {
            self.coordinates.push(Vec::new());
        }
        let rings = self.coordinates.len();
        let ring = self
            .coordinates
            .get_mut(path.ring)
            .ok_or(FeatureError::MissingRing {
                ring: path.ring,
                rings,
            })?;

        let position = Position::new(lng, lat);
        match path.vertex {
            v if v < ring.len() => ring[v] = position,
            v if v == ring.len() => ring.push(position),
            v => {
                return Err(FeatureError::VertexOutOfRange {
                    ring: path.ring,
                    vertex: v,
                    len: ring.len(),
                });
            }
        }
        Ok(())
    }

    /// Removes the coordinate at `path`. Missing slots are ignored.
    pub fn remove_coordinate(&mut self, path: CoordPath) {
        if let Some(ring) = self.coordinates.get_mut(path.ring) {
            if path.vertex < ring.len() {
                ring.remove(path.vertex);
            }
        }
    }

    /// A polygon is valid when every ring has at least three distinct vertices.
    pub fn is_valid(&self) -> bool {
        !self.coordinates.is_empty()
            && self
                .coordinates
                .iter()
                .all(|ring| distinct_count(ring) >= 3)
    }

    /// Returns the feature as GeoJSON with every ring closed.
    pub fn to_geojson(&self) -> Feature {
        let rings = self
            .coordinates
            .iter()
            .map(|ring| {
                let mut closed = ring.clone();
                if let Some(first) = ring.first() {
                    closed.push(*first);
                }
                closed
            })
            .collect();

        let mut properties = self.properties.clone();
        properties.id = Some(self.id.to_string());

        Feature {
            id: Some(self.id.to_string()),
            properties,
            geometry: Geometry::Polygon(rings),
        }
    }
}

fn distinct_count(ring: &[Position]) -> usize {
    let mut seen: Vec<Position> = Vec::with_capacity(ring.len());
    for position in ring {
        if !seen.contains(position) {
            seen.push(*position);
        }
    }
    seen.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> PolygonFeature {
        PolygonFeature::from_rings(
            FeatureId(1),
            vec![vec![
                Position::new(0.0, 0.0),
                Position::new(1.0, 0.0),
                Position::new(1.0, 1.0),
                Position::new(0.0, 1.0),
            ]],
        )
    }

    #[test]
    fn update_appends_at_ring_end_and_replaces_inside() {
        let mut polygon = PolygonFeature::empty(FeatureId(1));
        polygon.update_coordinate(CoordPath::outer(0), 1.0, 2.0).unwrap();
        polygon.update_coordinate(CoordPath::outer(1), 3.0, 4.0).unwrap();
        polygon.update_coordinate(CoordPath::outer(0), 5.0, 6.0).unwrap();

        assert_eq!(
            polygon.coordinates()[0],
            vec![Position::new(5.0, 6.0), Position::new(3.0, 4.0)]
        );
    }

    #[test]
    fn update_past_end_is_rejected() {
        let mut polygon = PolygonFeature::empty(FeatureId(1));
        let err = polygon
            .update_coordinate(CoordPath::outer(2), 0.0, 0.0)
            .unwrap_err();
        assert_eq!(
            err,
            FeatureError::VertexOutOfRange {
                ring: 0,
                vertex: 2,
                len: 0
            }
        );
        assert!(matches!(
            polygon.update_coordinate(CoordPath { ring: 3, vertex: 0 }, 0.0, 0.0),
            Err(FeatureError::MissingRing { ring: 3, .. })
        ));
    }

    #[test]
    fn remove_ignores_missing_slots() {
        let mut polygon = square();
        polygon.remove_coordinate(CoordPath::outer(10));
        polygon.remove_coordinate(CoordPath { ring: 4, vertex: 0 });
        assert_eq!(polygon.coordinates()[0].len(), 4);

        polygon.remove_coordinate(CoordPath::outer(1));
        assert_eq!(polygon.get_coordinate(CoordPath::outer(1)), Some(Position::new(1.0, 1.0)));
    }

    #[test]
    fn validity_counts_distinct_vertices() {
        assert!(square().is_valid());

        let degenerate = PolygonFeature::from_rings(
            FeatureId(2),
            vec![vec![
                Position::new(0.0, 0.0),
                Position::new(1.0, 0.0),
                Position::new(1.0, 0.0),
            ]],
        );
        assert!(!degenerate.is_valid());
        assert!(!PolygonFeature::empty(FeatureId(3)).is_valid());
    }

    #[test]
    fn geojson_closes_each_ring() {
        let feature = square().to_geojson();
        let Geometry::Polygon(rings) = feature.geometry else {
            panic!("expected polygon geometry");
        };
        assert_eq!(rings[0].len(), 5);
        assert_eq!(rings[0].first(), rings[0].last());
        assert_eq!(feature.properties.id.as_deref(), Some("1"));
    }

    #[test]
    fn empty_ring_stays_empty_in_geojson() {
        let feature = PolygonFeature::empty(FeatureId(9)).to_geojson();
        assert_eq!(feature.geometry, Geometry::Polygon(vec![vec![]]));
    }
}

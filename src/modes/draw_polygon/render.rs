use crate::feature::{
    ActiveState, CoordPath, Feature, Geometry, Meta, create_vertex,
};

use super::DrawPolygonMode;

impl DrawPolygonMode {
    /// Projects one store feature for this frame.
    ///
    /// Features other than the owned polygon pass through marked inactive. The
    /// owned polygon renders nothing until its ring has three entries, then a
    /// line between its first two points, and from five entries on the polygon
    /// itself plus vertex markers at the first and the last committed vertex.
    pub(super) fn project(&self, mut geojson: Feature) -> Vec<Feature> {
        let id = self.state.polygon_id;
        let is_active_polygon = geojson.properties.id.as_deref() == Some(id.to_string().as_str());
        geojson.properties.active = Some(if is_active_polygon {
            ActiveState::Active
        } else {
            ActiveState::Inactive
        });
        if !is_active_polygon {
            return vec![geojson];
        }

        let Geometry::Polygon(rings) = &geojson.geometry else {
            return vec![geojson];
        };
        let Some(ring) = rings.first() else {
            return Vec::new();
        };

        let coordinate_count = ring.len();
        if coordinate_count < 3 {
            return Vec::new();
        }

        let first = ring[0];
        let second = ring[1];
        let mut out = Vec::with_capacity(3);
        if coordinate_count > 4 {
            let end = coordinate_count - 3;
            out.push(create_vertex(id, first, CoordPath::outer(0), false));
            out.push(create_vertex(id, ring[end], CoordPath::outer(end), false));
        }

        geojson.properties.meta = Some(Meta::Feature);
        if coordinate_count > 4 {
            out.push(geojson);
        } else {
            out.push(Feature {
                id: geojson.id,
                properties: geojson.properties,
                geometry: Geometry::LineString(vec![first, second]),
            });
        }
        out
    }
}

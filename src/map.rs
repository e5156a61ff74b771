//! Map surface collaborator and the notifications fired on it.
//!
//! The drawing modes never render or project anything themselves. They talk to
//! a [`MapSurface`], which in a real embedding wraps the map engine and in the
//! CLI and tests is the in-memory [`HeadlessMap`].

use crate::feature::{Feature, Position};
use crate::modes::{Actions, ModeName};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Screen position in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &ScreenPoint) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Notification fired on the map for external listeners.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum DrawEvent {
    /// A drawing was committed
    #[serde(rename = "draw.create")]
    Create { features: Vec<Feature> },
    /// Features were removed without `silent`
    #[serde(rename = "draw.delete")]
    Delete { features: Vec<Feature> },
    /// The set of selected features changed
    #[serde(rename = "draw.selectionchange")]
    SelectionChange { features: Vec<Feature> },
    /// The active mode changed through a non-silent transition
    #[serde(rename = "draw.modechange")]
    ModeChange { mode: ModeName },
    /// The set of globally available commands changed
    #[serde(rename = "draw.actionable")]
    Actionable { actions: Actions },
}

/// Operations the drawing modes need from the map engine.
pub trait MapSurface {
    /// Projects a geographic position to screen pixels.
    fn project(&self, position: Position) -> ScreenPoint;

    /// Inverse of [`MapSurface::project`].
    fn unproject(&self, point: ScreenPoint) -> Position;

    fn double_click_zoom_enabled(&self) -> bool;

    fn set_double_click_zoom(&mut self, enabled: bool);

    fn has_layer(&self, id: &str) -> bool;

    fn remove_layer(&mut self, id: &str);

    /// Features currently published under a source id (snap targets).
    fn query_source(&self, source: &str) -> Vec<Feature>;

    /// Delivers a notification to listeners.
    fn fire(&mut self, event: DrawEvent);
}

/// Map surface without a renderer.
///
/// Uses a flat projection where one degree maps to `pixels_per_degree`
/// pixels, with screen `y` growing southwards.
#[derive(Debug, Clone)]
pub struct HeadlessMap {
    pixels_per_degree: f64,
    double_click_zoom: bool,
    layers: BTreeSet<String>,
    sources: HashMap<String, Vec<Feature>>,
}

impl HeadlessMap {
    pub fn new(pixels_per_degree: f64, double_click_zoom: bool) -> Self {
        Self {
            pixels_per_degree,
            double_click_zoom,
            layers: BTreeSet::new(),
            sources: HashMap::new(),
        }
    }

    pub fn add_layer(&mut self, id: impl Into<String>) {
        self.layers.insert(id.into());
    }

    pub fn add_source_feature(&mut self, source: impl Into<String>, feature: Feature) {
        self.sources.entry(source.into()).or_default().push(feature);
    }
}

impl Default for HeadlessMap {
    fn default() -> Self {
        Self::new(100.0, true)
    }
}

impl MapSurface for HeadlessMap {
    fn project(&self, position: Position) -> ScreenPoint {
        ScreenPoint::new(
            position.lng * self.pixels_per_degree,
            -position.lat * self.pixels_per_degree,
        )
    }

    fn unproject(&self, point: ScreenPoint) -> Position {
        Position::new(
            point.x / self.pixels_per_degree,
            -point.y / self.pixels_per_degree,
        )
    }

    fn double_click_zoom_enabled(&self) -> bool {
        self.double_click_zoom
    }

    fn set_double_click_zoom(&mut self, enabled: bool) {
        self.double_click_zoom = enabled;
    }

    fn has_layer(&self, id: &str) -> bool {
        self.layers.contains(id)
    }

    fn remove_layer(&mut self, id: &str) {
        self.layers.remove(id);
    }

    fn query_source(&self, source: &str) -> Vec<Feature> {
        self.sources.get(source).cloned().unwrap_or_default()
    }

    fn fire(&mut self, event: DrawEvent) {
        debug!("Map event: {:?}", event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_round_trips_through_screen_space() {
        let map = HeadlessMap::new(50.0, true);
        let position = Position::new(2.5, -1.0);
        let point = map.project(position);
        assert_eq!(point, ScreenPoint::new(125.0, 50.0));
        assert_eq!(map.unproject(point), position);
    }

    #[test]
    fn removing_unknown_layer_is_harmless() {
        let mut map = HeadlessMap::default();
        map.add_layer("snap-hover");
        map.remove_layer("missing");
        assert!(map.has_layer("snap-hover"));
        map.remove_layer("snap-hover");
        assert!(!map.has_layer("snap-hover"));
    }
}

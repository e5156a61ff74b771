//! Configuration type definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing interaction settings.
///
/// Tolerances are measured in screen pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DrawConfig {
    /// Pixel radius around the first vertex in which a click closes the polygon
    /// (valid range: 0.0 - 50.0)
    #[serde(default = "default_click_tolerance")]
    pub click_tolerance: f64,

    /// Same as `click_tolerance` but for touch taps (valid range: 0.0 - 100.0)
    #[serde(default = "default_touch_tolerance")]
    pub touch_tolerance: f64,

    /// Snap the pointer onto vertices of the configured sources
    #[serde(default)]
    pub snap_to: bool,

    /// Snap radius in pixels (valid range: 0.0 - 100.0)
    #[serde(default = "default_snap_tolerance")]
    pub snap_tolerance: f64,

    /// Map source ids whose features are snap targets
    #[serde(default)]
    pub snap_over_sources: Vec<String>,

    /// Map layer ids added for snap hover previews; removed when a drawing ends
    #[serde(default)]
    pub snap_over_styles: Vec<String>,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            click_tolerance: default_click_tolerance(),
            touch_tolerance: default_touch_tolerance(),
            snap_to: false,
            snap_tolerance: default_snap_tolerance(),
            snap_over_sources: Vec::new(),
            snap_over_styles: Vec::new(),
        }
    }
}

/// Map surface settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MapConfig {
    /// Whether the headless map starts with double-click-zoom enabled. Drawing
    /// modes only re-enable it on exit if the map had it enabled at startup.
    #[serde(default = "default_double_click_zoom")]
    pub double_click_zoom: bool,

    /// Scale of the headless projection (must be positive)
    #[serde(default = "default_pixels_per_degree")]
    pub pixels_per_degree: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            double_click_zoom: default_double_click_zoom(),
            pixels_per_degree: default_pixels_per_degree(),
        }
    }
}

fn default_click_tolerance() -> f64 {
    2.0
}

fn default_touch_tolerance() -> f64 {
    25.0
}

fn default_snap_tolerance() -> f64 {
    10.0
}

fn default_double_click_zoom() -> bool {
    true
}

fn default_pixels_per_degree() -> f64 {
    100.0
}

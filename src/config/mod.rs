//! Configuration file support for polydraw.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/polydraw/config.toml`. Settings cover closing-gesture
//! tolerances, snapping, and the headless map used by the CLI.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod types;

pub use types::{DrawConfig, MapConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [draw]
/// click_tolerance = 2.0
/// touch_tolerance = 25.0
/// snap_to = true
/// snap_tolerance = 10.0
/// snap_over_sources = ["roads", "parcels"]
/// snap_over_styles = ["snap-hover"]
///
/// [map]
/// double_click_zoom = true
/// pixels_per_degree = 100.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Drawing interaction settings
    #[serde(default)]
    pub draw: DrawConfig,

    /// Map surface settings
    #[serde(default)]
    pub map: MapConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Validated ranges:
    /// - `click_tolerance`: 0.0 - 50.0
    /// - `touch_tolerance`: 0.0 - 100.0
    /// - `snap_tolerance`: 0.0 - 100.0
    /// - `pixels_per_degree`: > 0.0 (falls back to 100.0)
    pub fn validate_and_clamp(&mut self) {
        if !(0.0..=50.0).contains(&self.draw.click_tolerance) {
            log::warn!(
                "Invalid click_tolerance {:.1}, clamping to 0.0-50.0 range",
                self.draw.click_tolerance
            );
            self.draw.click_tolerance = clamp_or_zero(self.draw.click_tolerance, 50.0);
        }

        if !(0.0..=100.0).contains(&self.draw.touch_tolerance) {
            log::warn!(
                "Invalid touch_tolerance {:.1}, clamping to 0.0-100.0 range",
                self.draw.touch_tolerance
            );
            self.draw.touch_tolerance = clamp_or_zero(self.draw.touch_tolerance, 100.0);
        }

        if !(0.0..=100.0).contains(&self.draw.snap_tolerance) {
            log::warn!(
                "Invalid snap_tolerance {:.1}, clamping to 0.0-100.0 range",
                self.draw.snap_tolerance
            );
            self.draw.snap_tolerance = clamp_or_zero(self.draw.snap_tolerance, 100.0);
        }

        if !(self.map.pixels_per_degree.is_finite() && self.map.pixels_per_degree > 0.0) {
            log::warn!(
                "Invalid pixels_per_degree {}, falling back to 100.0",
                self.map.pixels_per_degree
            );
            self.map.pixels_per_degree = 100.0;
        }

        let before = self.draw.snap_over_sources.len();
        self.draw.snap_over_sources.retain(|s| !s.trim().is_empty());
        if self.draw.snap_over_sources.len() != before {
            log::warn!("Ignoring empty entries in snap_over_sources");
        }

        if self.draw.snap_to && self.draw.snap_over_sources.is_empty() {
            log::warn!("snap_to is enabled but snap_over_sources is empty; nothing will snap");
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/polydraw/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("polydraw");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or contains invalid TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Serializes the configuration and writes it to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, config_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// JSON schema of the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

fn clamp_or_zero(value: f64, max: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, max) }
}

//! Interaction modes and the interface the editor drives them through.
//!
//! Exactly one mode is active at a time. The editor forwards input events to
//! it, asks it to project store features for rendering once per frame, and
//! performs the transitions it requests. A transition always stops the current
//! mode before the next one starts.

pub mod bindings;
pub mod draw_polygon;
pub mod simple_select;

pub use bindings::EventTable;
pub use draw_polygon::DrawPolygonMode;
pub use simple_select::SimpleSelectMode;

use crate::context::DrawContext;
use crate::feature::{Feature, FeatureId};
use crate::input::MapEvent;
use serde::{Deserialize, Serialize};

/// Registered mode names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeName {
    SimpleSelect,
    DrawPolygon,
}

/// Options passed to the mode being started.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeOptions {
    /// Features to select on entry
    pub feature_ids: Vec<FeatureId>,
}

/// A transition requested by a mode callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeChange {
    pub mode: ModeName,
    pub options: ModeOptions,
    /// Suppress the `draw.modechange` notification
    pub silent: bool,
}

impl ModeChange {
    pub fn to(mode: ModeName) -> Self {
        Self {
            mode,
            options: ModeOptions::default(),
            silent: false,
        }
    }

    /// Selection mode with the given features selected.
    pub fn select(feature_ids: Vec<FeatureId>) -> Self {
        Self {
            mode: ModeName::SimpleSelect,
            options: ModeOptions { feature_ids },
            silent: false,
        }
    }

    pub fn silently(mut self) -> Self {
        self.silent = true;
        self
    }
}

/// Global commands the active mode supports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Actions {
    pub combine_features: bool,
    pub uncombine_features: bool,
    pub trash: bool,
}

/// Lifecycle and input hooks every mode provides.
pub trait Mode {
    fn name(&self) -> ModeName;

    /// Called when the mode becomes active. Registers handlers.
    fn start(&mut self, ctx: &mut DrawContext);

    /// Called before the next mode starts. May redirect the pending transition.
    fn stop(&mut self, ctx: &mut DrawContext) -> Option<ModeChange>;

    /// Reacts to one input event.
    fn handle_event(&mut self, event: &MapEvent, ctx: &mut DrawContext) -> Option<ModeChange>;

    /// Projects one store feature into the features to draw this frame.
    fn render(&self, geojson: Feature, ctx: &DrawContext) -> Vec<Feature>;

    /// The global trash command.
    fn trash(&mut self, ctx: &mut DrawContext) -> Option<ModeChange>;
}

/// The active mode, one variant per registered mode.
pub enum ActiveMode {
    SimpleSelect(SimpleSelectMode),
    DrawPolygon(DrawPolygonMode),
}

impl ActiveMode {
    /// Builds the mode for `name`. Construction may register features in the store.
    pub fn build(name: ModeName, options: ModeOptions, ctx: &mut DrawContext) -> Self {
        match name {
            ModeName::SimpleSelect => ActiveMode::SimpleSelect(SimpleSelectMode::new(options)),
            ModeName::DrawPolygon => ActiveMode::DrawPolygon(DrawPolygonMode::new(ctx)),
        }
    }

    fn as_mode(&self) -> &dyn Mode {
        match self {
            ActiveMode::SimpleSelect(mode) => mode,
            ActiveMode::DrawPolygon(mode) => mode,
        }
    }

    fn as_mode_mut(&mut self) -> &mut dyn Mode {
        match self {
            ActiveMode::SimpleSelect(mode) => mode,
            ActiveMode::DrawPolygon(mode) => mode,
        }
    }
}

impl Mode for ActiveMode {
    fn name(&self) -> ModeName {
        self.as_mode().name()
    }

    fn start(&mut self, ctx: &mut DrawContext) {
        self.as_mode_mut().start(ctx)
    }

    fn stop(&mut self, ctx: &mut DrawContext) -> Option<ModeChange> {
        self.as_mode_mut().stop(ctx)
    }

    fn handle_event(&mut self, event: &MapEvent, ctx: &mut DrawContext) -> Option<ModeChange> {
        self.as_mode_mut().handle_event(event, ctx)
    }

    fn render(&self, geojson: Feature, ctx: &DrawContext) -> Vec<Feature> {
        self.as_mode().render(geojson, ctx)
    }

    fn trash(&mut self, ctx: &mut DrawContext) -> Option<ModeChange> {
        self.as_mode_mut().trash(ctx)
    }
}

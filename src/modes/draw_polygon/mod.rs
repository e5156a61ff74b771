//! Polygon drawing mode.
//!
//! The user clicks (or taps) vertices one by one. The slot after the last
//! committed vertex floats with the pointer so the preview always shows the
//! shape the next click would produce. Clicking the first vertex, clicking any
//! rendered vertex handle or pressing Enter finishes; Escape cancels; trash
//! undoes the last vertex.

mod handlers;
mod lifecycle;
mod render;
mod state;
#[cfg(test)]
mod tests;

pub use state::DrawPolygonState;

use super::{EventTable, Mode, ModeChange, ModeName};
use crate::context::DrawContext;
use crate::feature::{Feature, FeatureId, PolygonFeature};
use crate::input::MapEvent;
use log::debug;

/// Reactions registered by [`DrawPolygonMode::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PolygonHandler {
    MouseMove,
    ClickAnywhere,
    ClickOnVertex,
    Cancel,
    Finish,
}

/// Interactive construction of a single-ring polygon.
pub struct DrawPolygonMode {
    state: DrawPolygonState,
    handlers: EventTable<PolygonHandler>,
}

impl DrawPolygonMode {
    /// Creates the in-progress polygon and registers it in the store so the
    /// renderer sees it right away.
    pub fn new(ctx: &mut DrawContext) -> Self {
        let id = ctx.store.next_id();
        ctx.store.add(PolygonFeature::empty(id));
        debug!("Created in-progress polygon {id}");

        Self {
            state: DrawPolygonState::new(id, ctx.options.snap_over_sources.clone()),
            handlers: EventTable::new(),
        }
    }

    /// Id of the polygon this mode owns.
    pub fn polygon_id(&self) -> FeatureId {
        self.state.polygon_id
    }

    pub fn state(&self) -> &DrawPolygonState {
        &self.state
    }
}

impl Mode for DrawPolygonMode {
    fn name(&self) -> ModeName {
        ModeName::DrawPolygon
    }

    fn start(&mut self, ctx: &mut DrawContext) {
        self.on_start(ctx);
    }

    fn stop(&mut self, ctx: &mut DrawContext) -> Option<ModeChange> {
        self.on_stop(ctx)
    }

    fn handle_event(&mut self, event: &MapEvent, ctx: &mut DrawContext) -> Option<ModeChange> {
        match self.handlers.dispatch(event)? {
            PolygonHandler::MouseMove => {
                self.on_mouse_move(event, ctx);
                None
            }
            PolygonHandler::ClickAnywhere => self.on_click_anywhere(event, ctx),
            PolygonHandler::ClickOnVertex => Some(self.finish()),
            PolygonHandler::Cancel => Some(self.cancel(ctx)),
            PolygonHandler::Finish => Some(self.finish()),
        }
    }

    fn render(&self, geojson: Feature, _ctx: &DrawContext) -> Vec<Feature> {
        self.project(geojson)
    }

    fn trash(&mut self, ctx: &mut DrawContext) -> Option<ModeChange> {
        self.on_trash(ctx)
    }
}

//! The editor: owns the context and the active mode and routes input to it.

use crate::config::Config;
use crate::context::DrawContext;
use crate::feature::{Feature, FeatureId};
use crate::input::MapEvent;
use crate::map::{DrawEvent, MapSurface};
use crate::modes::{ActiveMode, Mode, ModeChange, ModeName, ModeOptions};
use crate::snap::Snapper;
use crate::store::DeleteOptions;
use log::debug;

/// Event router and mode host.
///
/// Every public call runs to completion before returning: the mode reacts,
/// any transition it requests is carried out (stop, then start), cursor
/// classes are applied, and queued notifications reach the map.
pub struct Editor {
    ctx: DrawContext,
    mode: ActiveMode,
}

impl Editor {
    /// Creates an editor in selection mode.
    pub fn new(config: &Config, map: Box<dyn MapSurface>) -> Self {
        Self::from_context(DrawContext::new(config, map))
    }

    /// Creates an editor with a custom snapping collaborator.
    pub fn with_snapper(config: &Config, map: Box<dyn MapSurface>, snapper: Box<dyn Snapper>) -> Self {
        Self::from_context(DrawContext::with_snapper(config, map, snapper))
    }

    /// Keeps a copy of every notification for [`Editor::take_events`].
    ///
    /// Embeddings that only listen through [`MapSurface::fire`] leave this off.
    pub fn record_events(mut self) -> Self {
        self.ctx.record_fired();
        self
    }

    fn from_context(mut ctx: DrawContext) -> Self {
        let mut mode = ActiveMode::build(ModeName::SimpleSelect, ModeOptions::default(), &mut ctx);
        mode.start(&mut ctx);
        let mut editor = Self { ctx, mode };
        editor.settle();
        editor
    }

    pub fn mode_name(&self) -> ModeName {
        self.mode.name()
    }

    pub fn mode(&self) -> &ActiveMode {
        &self.mode
    }

    pub fn context(&self) -> &DrawContext {
        &self.ctx
    }

    /// Mutable access for embedders, e.g. to change live options between events.
    pub fn context_mut(&mut self) -> &mut DrawContext {
        &mut self.ctx
    }

    /// Switches modes. The current mode is stopped before the next one starts.
    pub fn change_mode(&mut self, mode: ModeName, options: ModeOptions) {
        self.apply(ModeChange {
            mode,
            options,
            silent: false,
        });
        self.settle();
    }

    /// Delivers one input event to the active mode.
    pub fn handle_event(&mut self, mut event: MapEvent) {
        match (event.lng_lat, event.point) {
            (Some(lng_lat), None) => event.point = Some(self.ctx.map.project(lng_lat)),
            (None, Some(point)) => event.lng_lat = Some(self.ctx.map.unproject(point)),
            _ => {}
        }

        if let Some(change) = self.mode.handle_event(&event, &mut self.ctx) {
            self.apply(change);
        }
        self.settle();
    }

    /// Runs the global trash command.
    pub fn trash(&mut self) {
        if let Some(change) = self.mode.trash(&mut self.ctx) {
            self.apply(change);
        }
        self.settle();
    }

    /// Deletes features from outside the active mode (e.g. via an API call).
    pub fn delete(&mut self, ids: &[FeatureId]) {
        if ids.is_empty() || self.ctx.store.is_empty() {
            return;
        }
        self.ctx.store.delete(ids, DeleteOptions::default());
        self.settle();
    }

    /// Renders every store feature through the active mode.
    pub fn render_frame(&self) -> Vec<Feature> {
        self.ctx
            .store
            .features()
            .iter()
            .flat_map(|feature| self.mode.render(feature.to_geojson(), &self.ctx))
            .collect()
    }

    /// Takes the notifications fired since the last call. Requires [`Editor::record_events`].
    pub fn take_events(&mut self) -> Vec<DrawEvent> {
        self.ctx.take_fired()
    }

    fn apply(&mut self, requested: ModeChange) {
        let redirect = self.mode.stop(&mut self.ctx);
        // A redirect from stop() replaces the target; the requester still
        // decides whether listeners hear about the transition.
        let change = match redirect {
            Some(redirect) => {
                debug!("stop() redirected transition to {:?}", redirect.mode);
                ModeChange {
                    silent: requested.silent,
                    ..redirect
                }
            }
            None => requested,
        };

        debug!("Changing mode: {:?} -> {:?}", self.mode.name(), change.mode);
        let mut next = ActiveMode::build(change.mode, change.options, &mut self.ctx);
        next.start(&mut self.ctx);
        self.mode = next;

        if !change.silent {
            self.ctx.fire(DrawEvent::ModeChange { mode: change.mode });
        }
    }

    fn settle(&mut self) {
        self.ctx.ui.update_map_classes();
        self.ctx.flush_store();
    }
}

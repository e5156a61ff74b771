//! Shared state handed to every mode callback.

use crate::config::{Config, DrawConfig};
use crate::map::{DrawEvent, MapSurface};
use crate::modes::Actions;
use crate::snap::{Snapper, VertexSnapper};
use crate::store::FeatureStore;
use crate::ui::Ui;
use log::debug;

/// Everything a mode may read or mutate while handling an event.
pub struct DrawContext {
    /// Features and selection
    pub store: FeatureStore,
    /// Cursor classes and toolbar state
    pub ui: Ui,
    /// Map engine collaborator
    pub map: Box<dyn MapSurface>,
    /// Live drawing options; may be changed between events
    pub options: DrawConfig,
    /// Snapping collaborator, consulted only when `options.snap_to` is set
    pub snapper: Box<dyn Snapper>,
    initial_double_click_zoom: bool,
    actions: Actions,
    /// Copy of every fired notification, kept only once recording is enabled
    fired: Option<Vec<DrawEvent>>,
}

impl DrawContext {
    pub fn new(config: &Config, map: Box<dyn MapSurface>) -> Self {
        let snapper = Box::new(VertexSnapper::new(config.draw.snap_tolerance));
        Self::with_snapper(config, map, snapper)
    }

    pub fn with_snapper(config: &Config, map: Box<dyn MapSurface>, snapper: Box<dyn Snapper>) -> Self {
        Self {
            store: FeatureStore::new(),
            ui: Ui::new(),
            initial_double_click_zoom: map.double_click_zoom_enabled(),
            map,
            options: config.draw.clone(),
            snapper,
            actions: Actions::default(),
            fired: None,
        }
    }

    /// Fires a notification, after any notifications the store queued earlier.
    pub fn fire(&mut self, event: DrawEvent) {
        self.flush_store();
        self.deliver(event);
    }

    /// Forwards queued store notifications to the map.
    pub fn flush_store(&mut self) {
        for event in self.store.take_notifications() {
            self.deliver(event);
        }
    }

    fn deliver(&mut self, event: DrawEvent) {
        if let Some(fired) = &mut self.fired {
            fired.push(event.clone());
        }
        self.map.fire(event);
    }

    /// Starts keeping a copy of fired notifications for [`DrawContext::take_fired`].
    pub fn record_fired(&mut self) {
        self.fired.get_or_insert_with(Vec::new);
    }

    /// Takes every notification fired since the last call, oldest first.
    ///
    /// Always empty unless [`DrawContext::record_fired`] was called.
    pub fn take_fired(&mut self) -> Vec<DrawEvent> {
        self.fired.as_mut().map(std::mem::take).unwrap_or_default()
    }

    /// Advertises which global commands apply to the active mode.
    pub fn actionable(&mut self, actions: Actions) {
        if actions != self.actions {
            debug!("Actionable commands changed: {:?}", actions);
            self.actions = actions;
            self.fire(DrawEvent::Actionable { actions });
        }
    }

    pub fn actions(&self) -> Actions {
        self.actions
    }

    pub fn disable_double_click_zoom(&mut self) {
        self.map.set_double_click_zoom(false);
    }

    /// Re-enables double-click-zoom unless the map had it disabled when the editor started.
    pub fn enable_double_click_zoom(&mut self) {
        if self.initial_double_click_zoom {
            self.map.set_double_click_zoom(true);
        }
    }
}

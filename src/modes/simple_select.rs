//! Selection mode the drawing modes hand finished features to.
//!
//! Only selection itself is supported: clicking a feature selects it, clicking
//! empty map or pressing Escape clears the selection, trash deletes it.

use super::{Actions, EventTable, Mode, ModeChange, ModeName, ModeOptions};
use crate::context::DrawContext;
use crate::feature::{ActiveState, Feature, FeatureId};
use crate::input::{EventClass, MapEvent, Selector};
use crate::store::DeleteOptions;
use crate::ui::Cursor;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SelectHandler {
    ClearSelection,
    SelectFeature,
}

pub struct SimpleSelectMode {
    initial_selection: Vec<FeatureId>,
    handlers: EventTable<SelectHandler>,
}

impl SimpleSelectMode {
    pub fn new(options: ModeOptions) -> Self {
        Self {
            initial_selection: options.feature_ids,
            handlers: EventTable::new(),
        }
    }

    fn refresh_actions(ctx: &mut DrawContext) {
        let has_selection = !ctx.store.selected_ids().is_empty();
        ctx.actionable(Actions {
            combine_features: ctx.store.selected_ids().len() > 1,
            uncombine_features: false,
            trash: has_selection,
        });
    }
}

impl Mode for SimpleSelectMode {
    fn name(&self) -> ModeName {
        ModeName::SimpleSelect
    }

    fn start(&mut self, ctx: &mut DrawContext) {
        ctx.store.set_selected(&self.initial_selection);
        ctx.ui.queue_cursor(Cursor::None);

        let handlers = &mut self.handlers;
        handlers.clear();
        handlers.on(EventClass::Click, Selector::NoTarget, SelectHandler::ClearSelection);
        handlers.on(EventClass::Click, Selector::IsFeature, SelectHandler::SelectFeature);
        handlers.on(EventClass::Tap, Selector::NoTarget, SelectHandler::ClearSelection);
        handlers.on(EventClass::Tap, Selector::IsFeature, SelectHandler::SelectFeature);
        handlers.on(EventClass::KeyUp, Selector::IsEscapeKey, SelectHandler::ClearSelection);

        Self::refresh_actions(ctx);
    }

    fn stop(&mut self, _ctx: &mut DrawContext) -> Option<ModeChange> {
        None
    }

    fn handle_event(&mut self, event: &MapEvent, ctx: &mut DrawContext) -> Option<ModeChange> {
        match self.handlers.dispatch(event)? {
            SelectHandler::ClearSelection => ctx.store.clear_selected(),
            SelectHandler::SelectFeature => {
                let id = event
                    .feature_target
                    .as_ref()
                    .and_then(|target| target.properties.id.as_deref())
                    .and_then(|id| id.parse::<FeatureId>().ok());
                if let Some(id) = id {
                    ctx.store.set_selected(&[id]);
                }
            }
        }
        Self::refresh_actions(ctx);
        None
    }

    fn render(&self, mut geojson: Feature, ctx: &DrawContext) -> Vec<Feature> {
        let selected = geojson
            .properties
            .id
            .as_deref()
            .and_then(|id| id.parse::<FeatureId>().ok())
            .is_some_and(|id| ctx.store.is_selected(id));
        geojson.properties.active = Some(if selected {
            ActiveState::Active
        } else {
            ActiveState::Inactive
        });
        vec![geojson]
    }

    fn trash(&mut self, ctx: &mut DrawContext) -> Option<ModeChange> {
        let selected = ctx.store.selected_ids().to_vec();
        if !selected.is_empty() {
            debug!("Deleting {} selected feature(s)", selected.len());
            ctx.store.delete(&selected, DeleteOptions::default());
            Self::refresh_actions(ctx);
        }
        None
    }
}

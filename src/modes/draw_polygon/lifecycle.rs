use crate::context::DrawContext;
use crate::feature::CoordPath;
use crate::input::{EventClass, Selector};
use crate::map::DrawEvent;
use crate::modes::{Actions, ModeChange, ModeName};
use crate::store::DeleteOptions;
use crate::ui::{Button, Cursor};
use log::{debug, info, warn};

use super::{DrawPolygonMode, PolygonHandler};

impl DrawPolygonMode {
    pub(super) fn on_start(&mut self, ctx: &mut DrawContext) {
        ctx.store.clear_selected();
        ctx.disable_double_click_zoom();
        ctx.ui.queue_cursor(Cursor::Add);
        ctx.ui.set_active_button(Some(Button::Polygon));

        // Later registrations take precedence, so vertex clicks go after the
        // unconditioned click handlers.
        let handlers = &mut self.handlers;
        handlers.clear();
        handlers.on(EventClass::MouseMove, Selector::Always, PolygonHandler::MouseMove);
        handlers.on(EventClass::Click, Selector::Always, PolygonHandler::ClickAnywhere);
        handlers.on(EventClass::Click, Selector::IsVertex, PolygonHandler::ClickOnVertex);
        handlers.on(EventClass::Tap, Selector::Always, PolygonHandler::ClickAnywhere);
        handlers.on(EventClass::Tap, Selector::IsVertex, PolygonHandler::ClickOnVertex);
        handlers.on(EventClass::KeyUp, Selector::IsEscapeKey, PolygonHandler::Cancel);
        handlers.on(EventClass::KeyUp, Selector::IsEnterKey, PolygonHandler::Finish);

        ctx.actionable(Actions {
            combine_features: false,
            uncombine_features: false,
            trash: true,
        });
    }

    /// Finalizes the drawing: commits a valid polygon, silently drops anything else.
    pub(super) fn on_stop(&mut self, ctx: &mut DrawContext) -> Option<ModeChange> {
        ctx.ui.queue_cursor(Cursor::None);
        ctx.enable_double_click_zoom();
        ctx.ui.set_active_button(None);

        let id = self.state.polygon_id;
        let floating = self.state.floating_path();
        let Some(polygon) = ctx.store.get_mut(id) else {
            debug!("Polygon {id} already removed; nothing to finalize");
            return None;
        };

        polygon.remove_coordinate(floating);
        let valid = polygon.is_valid();
        let geojson = polygon.to_geojson();

        if ctx.options.snap_to {
            for style in &ctx.options.snap_over_styles {
                if ctx.map.has_layer(style) {
                    ctx.map.remove_layer(style);
                }
            }
        }

        if valid {
            info!(
                "Committed polygon {id} with {} vertices",
                geojson.outer_len().saturating_sub(1)
            );
            ctx.fire(DrawEvent::Create {
                features: vec![geojson],
            });
            None
        } else {
            debug!("Discarding degenerate polygon {id}");
            ctx.store.delete(&[id], DeleteOptions::SILENT);
            Some(ModeChange::to(ModeName::SimpleSelect).silently())
        }
    }

    /// Undoes the most recently committed vertex, or abandons the drawing when
    /// there is nothing left to undo.
    pub(super) fn on_trash(&mut self, ctx: &mut DrawContext) -> Option<ModeChange> {
        let id = self.state.polygon_id;

        if self.state.current_vertex_position() <= 1 {
            ctx.store.delete(&[id], DeleteOptions::SILENT);
            return Some(ModeChange::to(ModeName::SimpleSelect));
        }

        let Some(polygon) = ctx.store.get_mut(id) else {
            debug!("Polygon {id} already removed; nothing to undo");
            return None;
        };

        let floating = self.state.floating_path();
        let mut cursor_position = polygon.get_coordinate(floating);
        let heard_mouse_move = self.state.heard_mouse_move();

        if cursor_position.is_none() && heard_mouse_move {
            // No move since the last click: recreate the floating slot.
            let previous = CoordPath::outer(floating.vertex - 1);
            cursor_position = polygon.get_coordinate(previous);
            if let Some(p) = cursor_position {
                if let Err(err) = polygon.update_coordinate(floating, p.lng, p.lat) {
                    warn!("Failed to restore floating vertex: {err}");
                }
            }
        }
        if cursor_position.is_some() && !heard_mouse_move {
            // Touch input: the floating slot is the last tap itself.
            polygon.remove_coordinate(floating);
            self.state.retreat();
        }

        self.state.retreat();
        polygon.remove_coordinate(self.state.floating_path());
        debug!(
            "Undid vertex of polygon {id}; {} committed",
            self.state.current_vertex_position()
        );
        None
    }
}

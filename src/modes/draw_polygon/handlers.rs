use crate::context::DrawContext;
use crate::feature::{CoordPath, Position};
use crate::input::{EventKind, MapEvent, Selector};
use crate::modes::{ModeChange, ModeName};
use crate::store::DeleteOptions;
use crate::ui::Cursor;
use log::{debug, warn};

use super::DrawPolygonMode;

impl DrawPolygonMode {
    /// Moves the floating slot to the (possibly snapped) pointer position.
    pub(super) fn on_mouse_move(&mut self, event: &MapEvent, ctx: &mut DrawContext) {
        let mut evt = event.clone();

        if ctx.options.snap_to && evt.point.is_some() {
            evt = ctx.snapper.snap(
                &evt,
                ctx.map.as_ref(),
                self.state.polygon_id,
                self.state.snap_over_sources(),
            );
            if self.state.adopt_sources(&ctx.options.snap_over_sources) {
                debug!(
                    "Snap sources changed to {:?}",
                    self.state.snap_over_sources()
                );
            }
            self.state.record_snap(evt.clone());
        } else {
            self.state.clear_snap();
        }

        if let Some(lng_lat) = evt.lng_lat {
            self.write_slot(ctx, self.state.floating_path(), lng_lat);
        }

        if Selector::IsVertex.matches(&evt) {
            ctx.ui.queue_cursor(Cursor::Pointer);
        }
        self.state.mark_motion();
    }

    /// Commits a vertex, or finishes when the click closes the ring.
    pub(super) fn on_click_anywhere(
        &mut self,
        event: &MapEvent,
        ctx: &mut DrawContext,
    ) -> Option<ModeChange> {
        let evt = self
            .state
            .snap_click_point()
            .filter(|_| ctx.options.snap_to)
            .cloned()
            .unwrap_or_else(|| event.clone());

        if self.state.current_vertex_position() > 0 && self.is_closing_click(&evt, event.kind, ctx) {
            return Some(self.finish());
        }

        ctx.ui.queue_cursor(Cursor::Add);
        let Some(lng_lat) = evt.lng_lat else {
            return None;
        };
        if self.write_slot(ctx, self.state.floating_path(), lng_lat) {
            self.state.advance();
            debug!(
                "Committed vertex {} of polygon {}",
                self.state.current_vertex_position(),
                self.state.polygon_id
            );
        }
        None
    }

    /// Hands the polygon to selection mode; `stop()` decides whether it is kept.
    pub(super) fn finish(&self) -> ModeChange {
        ModeChange::select(vec![self.state.polygon_id])
    }

    /// Drops the polygon without notifying listeners.
    pub(super) fn cancel(&self, ctx: &mut DrawContext) -> ModeChange {
        ctx.store
            .delete(&[self.state.polygon_id], DeleteOptions::SILENT);
        ModeChange::to(ModeName::SimpleSelect)
    }

    /// A click closes the ring when it lands on the first committed vertex
    /// (within tolerance) or exactly on the most recent one.
    fn is_closing_click(&self, evt: &MapEvent, kind: EventKind, ctx: &DrawContext) -> bool {
        let Some(polygon) = ctx.store.get(self.state.polygon_id) else {
            return false;
        };

        let tolerance = match kind {
            EventKind::Tap => ctx.options.touch_tolerance,
            _ => ctx.options.click_tolerance,
        };

        let near_first = polygon
            .get_coordinate(CoordPath::outer(0))
            .is_some_and(|first| is_event_near(evt, first, tolerance, ctx));

        let on_last = self
            .state
            .last_committed_path()
            .and_then(|path| polygon.get_coordinate(path))
            .is_some_and(|last| evt.lng_lat == Some(last));

        near_first || on_last
    }

    /// Writes `lng_lat` into `path` of the owned polygon. Returns `false` if the
    /// polygon is gone or the slot cannot be written.
    pub(super) fn write_slot(&self, ctx: &mut DrawContext, path: CoordPath, lng_lat: Position) -> bool {
        let Some(polygon) = ctx.store.get_mut(self.state.polygon_id) else {
            debug!("Polygon {} no longer in store", self.state.polygon_id);
            return false;
        };
        match polygon.update_coordinate(path, lng_lat.lng, lng_lat.lat) {
            Ok(()) => true,
            Err(err) => {
                warn!("Failed to update coordinate {path}: {err}");
                false
            }
        }
    }
}

/// Whether `evt` happened within `tolerance` pixels of `position`.
///
/// Falls back to exact coordinate equality when the event has no screen point.
fn is_event_near(evt: &MapEvent, position: Position, tolerance: f64, ctx: &DrawContext) -> bool {
    match evt.point {
        Some(point) => ctx.map.project(position).distance(&point) <= tolerance,
        None => evt.lng_lat == Some(position),
    }
}

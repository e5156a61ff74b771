//! Per-session bookkeeping of the polygon mode.

use crate::feature::{CoordPath, FeatureId};
use crate::input::MapEvent;

/// Mode state shared by every polygon handler.
///
/// All mutation goes through the named transitions below so handlers never
/// see the cursor and the floating slot disagree.
#[derive(Debug, Clone)]
pub struct DrawPolygonState {
    /// Feature being drawn
    pub polygon_id: FeatureId,
    /// Number of vertices committed by click; also the floating slot index
    current_vertex_position: usize,
    /// Whether any pointer motion has been seen (false for pure touch input)
    heard_mouse_move: bool,
    /// Last pointer event after snapping, used in place of the click position
    snap_click_point: Option<MapEvent>,
    /// Snap sources this session uses; follows the live options when they change
    snap_over_sources: Vec<String>,
}

impl DrawPolygonState {
    pub fn new(polygon_id: FeatureId, snap_over_sources: Vec<String>) -> Self {
        Self {
            polygon_id,
            current_vertex_position: 0,
            heard_mouse_move: false,
            snap_click_point: None,
            snap_over_sources,
        }
    }

    pub fn current_vertex_position(&self) -> usize {
        self.current_vertex_position
    }

    /// Path of the slot that tracks the pointer.
    pub fn floating_path(&self) -> CoordPath {
        CoordPath::outer(self.current_vertex_position)
    }

    /// Path of the most recently committed vertex.
    pub fn last_committed_path(&self) -> Option<CoordPath> {
        self.current_vertex_position
            .checked_sub(1)
            .map(CoordPath::outer)
    }

    /// Commits the floating slot; the next slot becomes floating.
    pub fn advance(&mut self) {
        self.current_vertex_position += 1;
    }

    pub fn retreat(&mut self) {
        self.current_vertex_position = self.current_vertex_position.saturating_sub(1);
    }

    pub fn heard_mouse_move(&self) -> bool {
        self.heard_mouse_move
    }

    pub fn mark_motion(&mut self) {
        self.heard_mouse_move = true;
    }

    pub fn snap_click_point(&self) -> Option<&MapEvent> {
        self.snap_click_point.as_ref()
    }

    pub fn record_snap(&mut self, event: MapEvent) {
        self.snap_click_point = Some(event);
    }

    /// Forgets the snapped point once snapping is off.
    pub fn clear_snap(&mut self) {
        self.snap_click_point = None;
    }

    pub fn snap_over_sources(&self) -> &[String] {
        &self.snap_over_sources
    }

    /// Adopts `live` if it differs from the sources in use. Returns `true` on change.
    pub fn adopt_sources(&mut self, live: &[String]) -> bool {
        if self.snap_over_sources.as_slice() == live {
            return false;
        }
        self.snap_over_sources = live.to_vec();
        true
    }
}

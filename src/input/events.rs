//! Generic input event types delivered by the embedding map.

use crate::feature::{Feature, Meta, Position};
use crate::map::ScreenPoint;
use serde::Deserialize;

/// Generic key representation.
///
/// Embeddings map their native key codes to these values. Only Escape and
/// Return are consumed by the polygon mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Key {
    /// Regular character key
    Char(char),
    /// Escape key
    Escape,
    /// Return/Enter key
    Return,
    /// Backspace key
    Backspace,
}

/// Event class used to pick the handler list a binding belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventClass {
    MouseMove,
    Click,
    Tap,
    KeyUp,
}

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    MouseMove,
    Click,
    Tap,
    KeyUp(Key),
}

impl EventKind {
    pub fn class(&self) -> EventClass {
        match self {
            EventKind::MouseMove => EventClass::MouseMove,
            EventKind::Click => EventClass::Click,
            EventKind::Tap => EventClass::Tap,
            EventKind::KeyUp(_) => EventClass::KeyUp,
        }
    }
}

/// One input event as seen by the modes.
#[derive(Debug, Clone, PartialEq)]
pub struct MapEvent {
    pub kind: EventKind,
    /// Geographic position under the pointer (absent for key events)
    pub lng_lat: Option<Position>,
    /// Screen position under the pointer (absent for key events)
    pub point: Option<ScreenPoint>,
    /// Rendered feature under the pointer, if any
    pub feature_target: Option<Feature>,
}

impl MapEvent {
    fn pointer(kind: EventKind, lng_lat: Position) -> Self {
        Self {
            kind,
            lng_lat: Some(lng_lat),
            point: None,
            feature_target: None,
        }
    }

    pub fn mouse_move(lng_lat: Position) -> Self {
        Self::pointer(EventKind::MouseMove, lng_lat)
    }

    pub fn click(lng_lat: Position) -> Self {
        Self::pointer(EventKind::Click, lng_lat)
    }

    pub fn tap(lng_lat: Position) -> Self {
        Self::pointer(EventKind::Tap, lng_lat)
    }

    pub fn key_up(key: Key) -> Self {
        Self {
            kind: EventKind::KeyUp(key),
            lng_lat: None,
            point: None,
            feature_target: None,
        }
    }

    /// Attaches the screen position the event happened at.
    pub fn at_point(mut self, point: ScreenPoint) -> Self {
        self.point = Some(point);
        self
    }

    /// Marks the event as happening over a rendered feature.
    pub fn over(mut self, target: Feature) -> Self {
        self.feature_target = Some(target);
        self
    }

    pub fn key(&self) -> Option<Key> {
        match self.kind {
            EventKind::KeyUp(key) => Some(key),
            _ => None,
        }
    }

    /// Role of the rendered feature under the pointer.
    pub fn target_meta(&self) -> Option<Meta> {
        self.feature_target
            .as_ref()
            .and_then(|target| target.properties.meta)
    }
}

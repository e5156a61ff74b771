//! Cursor classes and toolbar state owned by the editor.

use serde::Serialize;

/// Mouse cursor class applied to the map container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cursor {
    /// Crosshair shown while placing vertices
    Add,
    /// Hand shown over a clickable handle
    Pointer,
    /// No mode-specific cursor
    None,
}

/// Toolbar buttons that a mode can highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Button {
    Polygon,
}

/// Queued and applied UI state.
///
/// Modes queue classes while handling an event; the editor applies them once
/// the event is done so a handler that both sets and resets a cursor causes a
/// single visible change.
#[derive(Debug, Default)]
pub struct Ui {
    queued_cursor: Option<Cursor>,
    cursor: Option<Cursor>,
    active_button: Option<Button>,
}

impl Ui {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a cursor class, replacing anything queued earlier.
    pub fn queue_cursor(&mut self, cursor: Cursor) {
        self.queued_cursor = Some(cursor);
    }

    /// Applies the queued cursor. Returns `true` if the visible cursor changed.
    pub fn update_map_classes(&mut self) -> bool {
        match self.queued_cursor.take() {
            Some(cursor) if self.cursor != Some(cursor) => {
                self.cursor = Some(cursor);
                true
            }
            _ => false,
        }
    }

    /// Cursor currently applied to the map.
    pub fn cursor(&self) -> Cursor {
        self.cursor.unwrap_or(Cursor::None)
    }

    pub fn set_active_button(&mut self, button: Option<Button>) {
        self.active_button = button;
    }

    pub fn active_button(&self) -> Option<Button> {
        self.active_button
    }
}

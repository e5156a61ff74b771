//! Ordered handler tables.

use crate::input::{EventClass, MapEvent, Selector};

#[derive(Debug, Clone, Copy)]
struct Binding<H> {
    class: EventClass,
    selector: Selector,
    handler: H,
}

/// Handlers a mode registered, in registration order.
///
/// Dispatch walks the table from the most recent registration backwards and
/// runs only the first binding whose class and selector match. Modes register
/// general handlers first and more specific ones after them.
#[derive(Debug, Clone)]
pub struct EventTable<H> {
    bindings: Vec<Binding<H>>,
}

impl<H> Default for EventTable<H> {
    fn default() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }
}

impl<H: Copy> EventTable<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&mut self, class: EventClass, selector: Selector, handler: H) {
        self.bindings.push(Binding {
            class,
            selector,
            handler,
        });
    }

    /// Picks the handler for `event`, if any binding matches.
    pub fn dispatch(&self, event: &MapEvent) -> Option<H> {
        let class = event.kind.class();
        self.bindings
            .iter()
            .rev()
            .filter(|b| b.class == class)
            .find(|b| b.selector.matches(event))
            .map(|b| b.handler)
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

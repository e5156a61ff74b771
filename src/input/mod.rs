//! Input events and the predicates modes filter them with.
//!
//! The embedding translates its native pointer, touch and keyboard events into
//! [`MapEvent`]s. Modes register handlers against an [`EventClass`] plus a
//! [`Selector`]; the router picks the handler to run.

pub mod events;
pub mod selectors;

pub use events::{EventClass, EventKind, Key, MapEvent};
pub use selectors::Selector;

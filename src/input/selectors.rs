//! Event predicates used when registering mode handlers.

use super::events::{Key, MapEvent};
use crate::feature::Meta;

/// Predicate a binding must satisfy before its handler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// Matches every event
    Always,
    /// Pointer is over a rendered vertex handle
    IsVertex,
    /// Pointer is over a user feature
    IsFeature,
    /// Pointer is over empty map
    NoTarget,
    /// Escape key
    IsEscapeKey,
    /// Return key
    IsEnterKey,
}

impl Selector {
    pub fn matches(&self, event: &MapEvent) -> bool {
        match self {
            Selector::Always => true,
            Selector::IsVertex => event.target_meta() == Some(Meta::Vertex),
            Selector::IsFeature => event.target_meta() == Some(Meta::Feature),
            Selector::NoTarget => event.feature_target.is_none(),
            Selector::IsEscapeKey => event.key() == Some(Key::Escape),
            Selector::IsEnterKey => event.key() == Some(Key::Return),
        }
    }
}

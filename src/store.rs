//! Feature store shared by all drawing modes.

use crate::feature::{FeatureId, PolygonFeature};
use crate::map::DrawEvent;
use log::debug;

/// Options for [`FeatureStore::delete`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteOptions {
    /// Suppress the `draw.delete` notification
    pub silent: bool,
}

impl DeleteOptions {
    pub const SILENT: Self = Self { silent: true };
}

/// Container for every feature known to the editor.
///
/// Features keep their insertion order, which is also render order. The store
/// never talks to the map directly: notifications are queued in an outbox and
/// flushed by the editor after each operation.
#[derive(Debug, Default)]
pub struct FeatureStore {
    features: Vec<PolygonFeature>,
    selected: Vec<FeatureId>,
    next_id: u64,
    outbox: Vec<DrawEvent>,
}

impl FeatureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out a fresh id for a feature about to be added.
    pub fn next_id(&mut self) -> FeatureId {
        self.next_id += 1;
        FeatureId(self.next_id)
    }

    /// Adds a feature, replacing any existing feature with the same id.
    pub fn add(&mut self, feature: PolygonFeature) -> FeatureId {
        let id = feature.id();
        self.next_id = self.next_id.max(id.0);
        match self.features.iter_mut().find(|f| f.id() == id) {
            Some(existing) => *existing = feature,
            None => self.features.push(feature),
        }
        id
    }

    pub fn get(&self, id: FeatureId) -> Option<&PolygonFeature> {
        self.features.iter().find(|f| f.id() == id)
    }

    pub fn get_mut(&mut self, id: FeatureId) -> Option<&mut PolygonFeature> {
        self.features.iter_mut().find(|f| f.id() == id)
    }

    pub fn contains(&self, id: FeatureId) -> bool {
        self.get(id).is_some()
    }

    /// All features in render order.
    pub fn features(&self) -> &[PolygonFeature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Removes the given features. Ids that are not present are skipped.
    ///
    /// Unless `options.silent` is set, a `draw.delete` notification carrying
    /// the removed features is queued.
    pub fn delete(&mut self, ids: &[FeatureId], options: DeleteOptions) -> Vec<PolygonFeature> {
        let mut removed = Vec::new();
        self.features.retain(|f| {
            if ids.contains(&f.id()) {
                removed.push(f.clone());
                false
            } else {
                true
            }
        });
        self.selected.retain(|id| !ids.contains(id));

        if !removed.is_empty() {
            debug!(
                "Deleted {} feature(s) from store, {} left (silent: {})",
                removed.len(),
                self.len(),
                options.silent
            );
            if !options.silent {
                self.outbox.push(DrawEvent::Delete {
                    features: removed.iter().map(PolygonFeature::to_geojson).collect(),
                });
            }
        }
        removed
    }

    pub fn selected_ids(&self) -> &[FeatureId] {
        &self.selected
    }

    pub fn is_selected(&self, id: FeatureId) -> bool {
        self.selected.contains(&id)
    }

    /// Replaces the selection with the given ids that exist in the store.
    pub fn set_selected(&mut self, ids: &[FeatureId]) {
        let mut next: Vec<FeatureId> = Vec::with_capacity(ids.len());
        for id in ids {
            if self.contains(*id) && !next.contains(id) {
                next.push(*id);
            }
        }
        if next != self.selected {
            self.selected = next;
            self.queue_selection_change();
        }
    }

    pub fn clear_selected(&mut self) {
        if !self.selected.is_empty() {
            self.selected.clear();
            self.queue_selection_change();
        }
    }

    fn queue_selection_change(&mut self) {
        let features = self
            .selected
            .iter()
            .filter_map(|id| self.get(*id))
            .map(PolygonFeature::to_geojson)
            .collect();
        self.outbox.push(DrawEvent::SelectionChange { features });
    }

    /// Takes all queued notifications.
    pub fn take_notifications(&mut self) -> Vec<DrawEvent> {
        std::mem::take(&mut self.outbox)
    }
}

//! Resolves board-item batches into drawn-item batches.
//!
//! Plain items are drawn by the factory and registered under their id.
//! Items carrying `clones_id` are drawn as a copy of the registered item,
//! shrunk and faded as requested. Copies are never registered, so a copy
//! cannot itself be copied.

use bevy::platform::collections::HashMap;
use bevy::prelude::*;

use super::entities::{BoardItem, DrawnItem, DrawnItemsChanged, ItemId, ItemsChanged};
use super::factory::{DrawnItemFactory, RegularPolygonFactory};
use crate::error::LinkError;

/// Result of processing one batch: the batch to forward and the items that
/// had to be dropped from it.
#[derive(Debug, Default, PartialEq)]
pub struct LinkOutput {
    /// Batch for the renderer.
    pub changed: DrawnItemsChanged,
    /// One entry per dropped item, in input order.
    pub errors: Vec<LinkError>,
}

/// Owns the id → drawn item registry used to resolve copies.
#[derive(Resource)]
pub struct CloningDataLink<F: DrawnItemFactory = RegularPolygonFactory> {
    factory: F,
    registry: HashMap<ItemId, DrawnItem>,
}

impl<F: DrawnItemFactory> CloningDataLink<F> {
    /// Empty registry drawing through `factory`.
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            registry: HashMap::new(),
        }
    }

    /// Drawn item registered under `id`, if any.
    pub fn registered(&self, id: &ItemId) -> Option<&DrawnItem> {
        self.registry.get(id)
    }

    /// Number of registered source items.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Processes one batch.
    ///
    /// Removed ids are evicted first, so a batch that removes and re-adds an
    /// id leaves the new drawn item registered. Added items are then handled
    /// in order; a copy may refer to a source added earlier in the same
    /// batch. `removed` and `updated` are forwarded unchanged.
    pub fn on_data_changed(&mut self, event: &ItemsChanged) -> LinkOutput {
        for item in &event.removed {
            self.registry.remove(&item.id);
        }

        let mut output = LinkOutput::default();
        for item in &event.added {
            let drawn = match &item.clones_id {
                Some(source_id) => self.derive_copy(item, source_id),
                None => self.register(item),
            };
            match drawn {
                Ok(drawn) => output.changed.added.push(drawn),
                Err(err) => output.errors.push(err),
            }
        }

        output.changed.removed = event.removed.clone();
        output.changed.updated = event.updated.clone();
        output
    }

    fn register(&mut self, item: &BoardItem) -> Result<DrawnItem, LinkError> {
        let drawn = self
            .factory
            .drawn_item(item)
            .map_err(|source| LinkError::InvalidItem {
                item: item.id.clone(),
                source,
            })?;
        self.registry.insert(item.id.clone(), drawn.clone());
        Ok(drawn)
    }

    fn derive_copy(&self, item: &BoardItem, source_id: &ItemId) -> Result<DrawnItem, LinkError> {
        let source = self
            .registry
            .get(source_id)
            .ok_or_else(|| LinkError::UnresolvedCloneSource {
                item: item.id.clone(),
                source_id: source_id.clone(),
            })?;

        let mut copy = source.clone();
        copy.id = item.id.clone();
        copy.item = item.clone();
        if let Some(scale) = copy_override(item.clone_scale) {
            copy.scale = Vec3::splat(scale);
        }
        if let Some(alpha) = copy_override(item.clone_alpha) {
            copy.material.alpha = alpha;
        }
        Ok(copy)
    }
}

/// An override of zero or a non-finite value keeps the source's value.
fn copy_override(value: Option<f32>) -> Option<f32> {
    value.filter(|v| v.is_finite() && *v != 0.0)
}

impl Default for CloningDataLink {
    fn default() -> Self {
        Self::new(RegularPolygonFactory::default())
    }
}

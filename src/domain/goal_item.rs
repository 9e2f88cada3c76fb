//! Goal Item Entity
//!
//! A purchase target: an item key, its display name and its last known unit price.

use serde::{Deserialize, Serialize};
use super::entity::Entity;

/// Opaque game item key. Keys `<= 0` denote empty slots and are never priced.
pub type ItemId = i32;

/// A tracked purchase target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalItem {
    /// Item key, also the identity used for duplicate checks
    pub item_id: ItemId,
    /// Display name
    pub name: String,
    /// Unit price from the last refresh (0 = unknown/unpriced)
    pub price: u64,
    /// Opaque image reference, owned by the presentation layer
    pub image: Option<String>,
}

impl GoalItem {
    pub fn new(item_id: ItemId, name: impl Into<String>, price: u64) -> Self {
        Self {
            item_id,
            name: name.into(),
            price,
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Whether a price has been observed for this item
    pub fn is_priced(&self) -> bool {
        self.price > 0
    }
}

impl Entity for GoalItem {
    type Id = ItemId;

    fn id(&self) -> Self::Id {
        self.item_id
    }
}

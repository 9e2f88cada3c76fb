//! Container entries as observed from the game client.

use serde::{Deserialize, Serialize};
use super::goal_item::ItemId;

/// One slot of an observed item container (inventory, bank).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerItem {
    pub item_id: ItemId,
    pub quantity: u32,
}

impl ContainerItem {
    pub fn new(item_id: ItemId, quantity: u32) -> Self {
        Self { item_id, quantity }
    }

    /// Empty slots and placeholders carry no value
    pub fn is_appraisable(&self) -> bool {
        self.item_id > 0 && self.quantity != 0
    }
}

impl From<(ItemId, u32)> for ContainerItem {
    fn from((item_id, quantity): (ItemId, u32)) -> Self {
        Self::new(item_id, quantity)
    }
}

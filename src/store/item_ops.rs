//! Item Operations
//!
//! Adding and removing top-level goal items, and re-pricing everything tracked.

use crate::domain::{DomainError, DomainResult, GoalItem, ItemId};
use crate::valuation::PriceCache;
use super::goal_store::GoalStore;
use super::index::Owner;

/// Trait for top-level item operations
pub trait ItemOperations {
    /// Append an item to the top-level sequence
    fn add_item(&mut self, item: GoalItem) -> DomainResult<()>;

    /// Remove an item from the top-level sequence; false if it was not there
    fn remove_item(&mut self, item_id: ItemId) -> bool;

    /// Re-read every tracked item's price. Returns how many prices changed.
    fn refresh_prices(&mut self, prices: &dyn PriceCache) -> usize;
}

impl ItemOperations for GoalStore {
    fn add_item(&mut self, item: GoalItem) -> DomainResult<()> {
        if !self.index.insert(item.item_id, Owner::TopLevel) {
            return Err(DomainError::DuplicateItem(item.item_id));
        }
        self.items.push(item);
        Ok(())
    }

    fn remove_item(&mut self, item_id: ItemId) -> bool {
        if self.index.owner_of(item_id) != Some(Owner::TopLevel) {
            return false;
        }
        self.items.retain(|item| item.item_id != item_id);
        self.index.remove(item_id);
        true
    }

    fn refresh_prices(&mut self, prices: &dyn PriceCache) -> usize {
        let grouped = self.groups.iter_mut().flat_map(|group| group.items.iter_mut());
        let mut changed = 0;
        for item in grouped.chain(self.items.iter_mut()) {
            let price = prices.price(item.item_id);
            if item.price != price {
                item.price = price;
                changed += 1;
            }
        }
        changed
    }
}

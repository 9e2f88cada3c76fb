//! Price lookups
//!
//! The live price source is owned by the host client; the valuation engine
//! only needs a total function from item key to unit price.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::ItemId;

/// Resolves an item key to its current unit price.
///
/// Implementations must never fail: unknown items yield 0.
pub trait PriceCache: Send + Sync {
    fn price(&self, item_id: ItemId) -> u64;
}

impl PriceCache for HashMap<ItemId, u64> {
    fn price(&self, item_id: ItemId) -> u64 {
        self.get(&item_id).copied().unwrap_or(0)
    }
}

impl<P: PriceCache + ?Sized> PriceCache for Arc<P> {
    fn price(&self, item_id: ItemId) -> u64 {
        (**self).price(item_id)
    }
}

/// Mutable in-memory price table, updated by whoever feeds prices in.
#[derive(Debug, Default)]
pub struct PriceTable {
    prices: RwLock<HashMap<ItemId, u64>>,
}

impl PriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_price(&self, item_id: ItemId, price: u64) {
        if let Ok(mut prices) = self.prices.write() {
            prices.insert(item_id, price);
        }
    }
}

impl FromIterator<(ItemId, u64)> for PriceTable {
    fn from_iter<I: IntoIterator<Item = (ItemId, u64)>>(iter: I) -> Self {
        Self {
            prices: RwLock::new(iter.into_iter().collect()),
        }
    }
}

impl PriceCache for PriceTable {
    fn price(&self, item_id: ItemId) -> u64 {
        // A poisoned lock degrades to "unpriced" like any other miss
        self.prices
            .read()
            .map(|prices| prices.get(&item_id).copied().unwrap_or(0))
            .unwrap_or(0)
    }
}

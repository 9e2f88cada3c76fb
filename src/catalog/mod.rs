//! Item Catalog
//!
//! Names and images for item keys, and the free-text search the selection
//! view feeds into `add_item`. The real catalog belongs to the host client;
//! `MemoryCatalog` serves tests and offline use.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{GoalItem, ItemId};

/// Upper bound on search results handed to the selection view
pub const MAX_SEARCH_RESULTS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub item_id: ItemId,
    pub name: String,
    pub image: Option<String>,
}

pub trait ItemCatalog: Send + Sync {
    fn lookup(&self, item_id: ItemId) -> Option<CatalogEntry>;

    /// Entries matching `query`, at most [`MAX_SEARCH_RESULTS`]
    fn search(&self, query: &str) -> Vec<CatalogEntry>;

    /// Goal item for a stored key. Unknown keys keep a placeholder name so
    /// the goal is not lost.
    fn goal_item(&self, item_id: ItemId, price: u64) -> GoalItem {
        match self.lookup(item_id) {
            Some(entry) => GoalItem {
                item_id,
                name: entry.name,
                price,
                image: entry.image,
            },
            None => GoalItem::new(item_id, format!("Item {}", item_id), price),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    entries: BTreeMap<ItemId, CatalogEntry>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item_id: ItemId, name: impl Into<String>) {
        self.entries.insert(
            item_id,
            CatalogEntry {
                item_id,
                name: name.into(),
                image: Some(format!("item:{}", item_id)),
            },
        );
    }
}

impl<'a> FromIterator<(ItemId, &'a str)> for MemoryCatalog {
    fn from_iter<I: IntoIterator<Item = (ItemId, &'a str)>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for (item_id, name) in iter {
            catalog.insert(item_id, name);
        }
        catalog
    }
}

impl ItemCatalog for MemoryCatalog {
    fn lookup(&self, item_id: ItemId) -> Option<CatalogEntry> {
        self.entries.get(&item_id).cloned()
    }

    fn search(&self, query: &str) -> Vec<CatalogEntry> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        self.entries
            .values()
            .filter(|entry| entry.name.to_lowercase().contains(&query))
            .take(MAX_SEARCH_RESULTS)
            .cloned()
            .collect()
    }
}

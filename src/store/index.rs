//! Identity index: item key → owning sequence.

use std::collections::HashMap;

use crate::domain::{GroupId, ItemId};

/// Which sequence currently holds an item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    TopLevel,
    Group(GroupId),
}

#[derive(Debug, Clone, Default)]
pub(crate) struct IdentityIndex {
    owners: HashMap<ItemId, Owner>,
}

impl IdentityIndex {
    pub fn owner_of(&self, item_id: ItemId) -> Option<Owner> {
        self.owners.get(&item_id).copied()
    }

    pub fn contains(&self, item_id: ItemId) -> bool {
        self.owners.contains_key(&item_id)
    }

    /// Record a new member. Returns false if the key was already indexed.
    pub fn insert(&mut self, item_id: ItemId, owner: Owner) -> bool {
        if self.owners.contains_key(&item_id) {
            return false;
        }
        self.owners.insert(item_id, owner);
        true
    }

    pub fn reassign(&mut self, item_id: ItemId, owner: Owner) {
        self.owners.insert(item_id, owner);
    }

    pub fn remove(&mut self, item_id: ItemId) {
        self.owners.remove(&item_id);
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }
}

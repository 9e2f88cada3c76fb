//! Goal Store - ordered top-level items and goal groups
//!
//! In-memory aggregate. Mutations live in the operation modules:
//! - item_ops: add/remove/price refresh
//! - group_ops: group lifecycle and membership
//! - positioning: sort and shift
//!
//! Every operation validates first and mutates second, so a failed call
//! leaves the store untouched.

use crate::domain::{DomainError, DomainResult, Entity, GoalGroup, GoalItem, GroupId, ItemId};
use super::index::{IdentityIndex, Owner};

/// A group as read back from storage, before ids are assigned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupParts {
    pub name: String,
    pub collapsed: bool,
    pub items: Vec<GoalItem>,
}

#[derive(Debug, Clone, Default)]
pub struct GoalStore {
    pub(super) items: Vec<GoalItem>,
    pub(super) groups: Vec<GoalGroup>,
    pub(super) index: IdentityIndex,
    next_group_id: u32,
}

impl GoalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from stored sequences.
    ///
    /// Order is kept as given. A key seen a second time (stored data written
    /// by something other than this store) is dropped with a warning.
    pub fn from_parts(items: Vec<GoalItem>, groups: Vec<GroupParts>) -> Self {
        let mut store = Self::new();

        for item in items {
            if store.index.insert(item.item_id, Owner::TopLevel) {
                store.items.push(item);
            } else {
                log::warn!("Dropping duplicate stored item {}", item.item_id);
            }
        }

        for parts in groups {
            let id = store.allocate_group_id();
            let mut group = GoalGroup::new(id, parts.name);
            group.collapsed = parts.collapsed;
            for item in parts.items {
                if store.index.insert(item.item_id, Owner::Group(id)) {
                    group.items.push(item);
                } else {
                    log::warn!("Dropping duplicate stored item {} from group '{}'", item.item_id, group.name);
                }
            }
            store.groups.push(group);
        }

        store
    }

    /// Top-level items in display order
    pub fn items(&self) -> &[GoalItem] {
        &self.items
    }

    /// Groups in display order
    pub fn groups(&self) -> &[GoalGroup] {
        &self.groups
    }

    pub fn group(&self, id: GroupId) -> Option<&GoalGroup> {
        self.groups.iter().find(|group| group.id() == id)
    }

    pub fn group_by_name(&self, name: &str) -> Option<&GoalGroup> {
        self.groups.iter().find(|group| group.name == name)
    }

    /// Whether the item key is tracked anywhere in the store
    pub fn contains(&self, item_id: ItemId) -> bool {
        self.index.contains(item_id)
    }

    pub fn owner_of(&self, item_id: ItemId) -> Option<Owner> {
        self.index.owner_of(item_id)
    }

    /// Number of tracked items, grouped or not
    pub fn tracked_count(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.groups.is_empty()
    }

    pub(super) fn allocate_group_id(&mut self) -> GroupId {
        self.next_group_id += 1;
        GroupId(self.next_group_id)
    }

    pub(super) fn group_index(&self, id: GroupId) -> DomainResult<usize> {
        self.groups
            .iter()
            .position(|group| group.id() == id)
            .ok_or(DomainError::GroupNotFound(id))
    }

    pub(super) fn name_taken(&self, name: &str) -> bool {
        self.groups.iter().any(|group| group.name == name)
    }
}

//! Group Operations
//!
//! Group lifecycle and moving items between the top-level sequence and groups.

use crate::domain::{normalize_group_name, DomainError, DomainResult, GoalGroup, GroupId, ItemId};
use super::goal_store::GoalStore;
use super::index::Owner;

/// Trait for goal group operations
pub trait GroupOperations {
    /// Create an empty, expanded group at the end of the group sequence
    fn add_group(&mut self, name: &str) -> DomainResult<GroupId>;

    /// Rename in place. Returns false when the new name is already taken,
    /// in which case the group keeps its old name.
    fn rename_group(&mut self, id: GroupId, new_name: &str) -> DomainResult<bool>;

    /// Delete a group, moving its items to the end of the top-level sequence
    fn remove_group(&mut self, id: GroupId) -> DomainResult<()>;

    /// Move top-level items, matched by display name, into a group.
    /// Names without a match are skipped. Returns how many items moved.
    fn move_items_to_group(&mut self, id: GroupId, names: &[&str]) -> DomainResult<usize>;

    /// Move an item out of a group to the end of the top-level sequence.
    /// Returns false if the item was not in that group.
    fn remove_item_from_group(&mut self, id: GroupId, item_id: ItemId) -> DomainResult<bool>;

    /// Flip the collapsed flag, returning the new state
    fn toggle_group_collapsed(&mut self, id: GroupId) -> DomainResult<bool>;
}

impl GroupOperations for GoalStore {
    fn add_group(&mut self, name: &str) -> DomainResult<GroupId> {
        let name = normalize_group_name(name)?;
        if self.name_taken(&name) {
            return Err(DomainError::DuplicateGroupName(name));
        }

        let id = self.allocate_group_id();
        self.groups.push(GoalGroup::new(id, name));
        Ok(id)
    }

    fn rename_group(&mut self, id: GroupId, new_name: &str) -> DomainResult<bool> {
        let name = normalize_group_name(new_name)?;
        let position = self.group_index(id)?;
        if self.name_taken(&name) {
            log::debug!("Rename of group {} to '{}' dropped: name taken", id, name);
            return Ok(false);
        }

        self.groups[position].name = name;
        Ok(true)
    }

    fn remove_group(&mut self, id: GroupId) -> DomainResult<()> {
        let position = self.group_index(id)?;
        let group = self.groups.remove(position);

        for item in &group.items {
            self.index.reassign(item.item_id, Owner::TopLevel);
        }
        self.items.extend(group.items);
        Ok(())
    }

    fn move_items_to_group(&mut self, id: GroupId, names: &[&str]) -> DomainResult<usize> {
        let position = self.group_index(id)?;

        let mut moved = 0;
        for name in names {
            let Some(found) = self.items.iter().position(|item| item.name == *name) else {
                continue;
            };
            let item = self.items.remove(found);
            self.index.reassign(item.item_id, Owner::Group(id));
            self.groups[position].items.push(item);
            moved += 1;
        }
        Ok(moved)
    }

    fn remove_item_from_group(&mut self, id: GroupId, item_id: ItemId) -> DomainResult<bool> {
        let position = self.group_index(id)?;
        let group = &mut self.groups[position];
        let Some(found) = group.position_of(item_id) else {
            return Ok(false);
        };

        let item = group.items.remove(found);
        self.index.reassign(item.item_id, Owner::TopLevel);
        self.items.push(item);
        Ok(true)
    }

    fn toggle_group_collapsed(&mut self, id: GroupId) -> DomainResult<bool> {
        let position = self.group_index(id)?;
        let group = &mut self.groups[position];
        group.collapsed = !group.collapsed;
        Ok(group.collapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GoalItem, MAX_GROUP_NAME_LENGTH};
    use crate::store::ItemOperations;

    fn store_with(names: &[(ItemId, &str)]) -> GoalStore {
        let mut store = GoalStore::new();
        for (id, name) in names {
            store.add_item(GoalItem::new(*id, *name, 0)).unwrap();
        }
        store
    }

    fn top_level_ids(store: &GoalStore) -> Vec<ItemId> {
        store.items().iter().map(|item| item.item_id).collect()
    }

    #[test]
    fn test_add_group_validation() {
        let mut store = GoalStore::new();
        assert_eq!(store.add_group("  "), Err(DomainError::InvalidName));

        let id = store.add_group("Gear").unwrap();
        assert_eq!(store.add_group("Gear"), Err(DomainError::DuplicateGroupName("Gear".into())));
        assert_eq!(store.groups().len(), 1);

        let group = store.group(id).unwrap();
        assert!(!group.collapsed);
        assert!(group.items.is_empty());
    }

    #[test]
    fn test_add_group_truncates() {
        let mut store = GoalStore::new();
        let id = store.add_group(&"x".repeat(80)).unwrap();
        assert_eq!(store.group(id).unwrap().name.len(), MAX_GROUP_NAME_LENGTH);
        // Same name after truncation collides
        assert!(matches!(store.add_group(&"x".repeat(70)), Err(DomainError::DuplicateGroupName(_))));
    }

    #[test]
    fn test_rename_group() {
        let mut store = GoalStore::new();
        let first = store.add_group("Gear").unwrap();
        let second = store.add_group("Bows").unwrap();

        assert_eq!(store.rename_group(second, "Ranged"), Ok(true));
        assert_eq!(store.groups()[1].name, "Ranged");
        assert_eq!(store.groups()[1].id, second);

        // Collision is dropped silently
        assert_eq!(store.rename_group(first, "Ranged"), Ok(false));
        assert_eq!(store.group(first).unwrap().name, "Gear");

        assert_eq!(store.rename_group(first, ""), Err(DomainError::InvalidName));
        assert_eq!(store.rename_group(GroupId(99), "X"), Err(DomainError::GroupNotFound(GroupId(99))));
    }

    #[test]
    fn test_move_items_by_name() {
        let mut store = store_with(&[(1, "A"), (2, "B"), (3, "C")]);
        let group = store.add_group("Gear").unwrap();

        let moved = store.move_items_to_group(group, &["C", "missing", "A"]).unwrap();
        assert_eq!(moved, 2);
        assert_eq!(top_level_ids(&store), vec![2]);

        let grouped: Vec<_> = store.group(group).unwrap().items.iter().map(|i| i.item_id).collect();
        assert_eq!(grouped, vec![3, 1]);
        assert_eq!(store.owner_of(3), Some(Owner::Group(group)));
    }

    #[test]
    fn test_move_into_missing_group_is_not_partial() {
        let mut store = store_with(&[(1, "A")]);
        assert!(store.move_items_to_group(GroupId(5), &["A"]).is_err());
        assert_eq!(top_level_ids(&store), vec![1]);
    }

    #[test]
    fn test_remove_group_preserves_items() {
        let mut store = store_with(&[(1, "A"), (2, "B"), (3, "C"), (4, "D")]);
        let gear = store.add_group("Gear").unwrap();
        let other = store.add_group("Other").unwrap();
        store.move_items_to_group(gear, &["C", "A"]).unwrap();
        store.move_items_to_group(other, &["D"]).unwrap();

        store.remove_group(gear).unwrap();

        assert_eq!(top_level_ids(&store), vec![2, 3, 1]);
        assert_eq!(store.groups().len(), 1);
        assert_eq!(store.groups()[0].id, other);
        assert_eq!(store.owner_of(1), Some(Owner::TopLevel));
        assert_eq!(store.tracked_count(), 4);
    }

    #[test]
    fn test_remove_item_from_group() {
        let mut store = store_with(&[(1, "A"), (2, "B")]);
        let group = store.add_group("Gear").unwrap();
        store.move_items_to_group(group, &["A"]).unwrap();

        assert_eq!(store.remove_item_from_group(group, 2), Ok(false));
        assert_eq!(store.remove_item_from_group(group, 1), Ok(true));
        assert_eq!(top_level_ids(&store), vec![2, 1]);
        assert!(store.group(group).unwrap().items.is_empty());
    }

    #[test]
    fn test_toggle_collapsed() {
        let mut store = GoalStore::new();
        let group = store.add_group("Gear").unwrap();
        assert_eq!(store.toggle_group_collapsed(group), Ok(true));
        assert_eq!(store.toggle_group_collapsed(group), Ok(false));
    }
}

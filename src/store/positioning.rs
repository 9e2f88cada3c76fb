//! Positioning Operations
//!
//! Reordering within the top-level sequence and within a group. Groups
//! themselves are never reordered.

use crate::domain::{DomainError, DomainResult, GroupId};
use super::goal_store::GoalStore;

/// Trait for item positioning operations
pub trait PositioningOperations {
    /// Stable sort of the top-level sequence by unit price
    fn sort(&mut self, ascending: bool);

    /// Swap the top-level item at `index` with its upper or lower neighbour
    fn shift_item(&mut self, index: usize, up: bool) -> DomainResult<()>;

    /// Swap the grouped item at `index` with its upper or lower neighbour
    fn shift_item_in_group(&mut self, id: GroupId, index: usize, up: bool) -> DomainResult<()>;
}

/// Index of the neighbour to swap with, if both ends are in range
fn neighbour(index: usize, up: bool, len: usize) -> DomainResult<usize> {
    let target = if up { index.checked_sub(1) } else { index.checked_add(1) };
    match target {
        Some(target) if index < len && target < len => Ok(target),
        _ => Err(DomainError::OutOfRange { index, len }),
    }
}

impl PositioningOperations for GoalStore {
    fn sort(&mut self, ascending: bool) {
        if ascending {
            self.items.sort_by(|a, b| a.price.cmp(&b.price));
        } else {
            self.items.sort_by(|a, b| b.price.cmp(&a.price));
        }
    }

    fn shift_item(&mut self, index: usize, up: bool) -> DomainResult<()> {
        let target = neighbour(index, up, self.items.len())?;
        self.items.swap(index, target);
        Ok(())
    }

    fn shift_item_in_group(&mut self, id: GroupId, index: usize, up: bool) -> DomainResult<()> {
        let position = self.group_index(id)?;
        let items = &mut self.groups[position].items;
        let target = neighbour(index, up, items.len())?;
        items.swap(index, target);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GoalItem, ItemId};
    use crate::store::{GroupOperations, ItemOperations};

    fn priced(items: &[(ItemId, u64)]) -> GoalStore {
        let mut store = GoalStore::new();
        for (id, price) in items {
            store.add_item(GoalItem::new(*id, format!("item {}", id), *price)).unwrap();
        }
        store
    }

    fn ids(store: &GoalStore) -> Vec<ItemId> {
        store.items().iter().map(|item| item.item_id).collect()
    }

    #[test]
    fn test_sort_is_stable_both_ways() {
        let mut store = priced(&[(1, 30), (2, 10), (3, 30), (4, 20), (5, 10)]);

        store.sort(true);
        assert_eq!(ids(&store), vec![2, 5, 4, 1, 3]);

        store.sort(false);
        assert_eq!(ids(&store), vec![1, 3, 4, 2, 5]);
    }

    #[test]
    fn test_sort_leaves_groups_alone() {
        let mut store = priced(&[(1, 30), (2, 10), (3, 5)]);
        let group = store.add_group("Gear").unwrap();
        store.move_items_to_group(group, &["item 1", "item 3"]).unwrap();

        store.sort(true);
        let grouped: Vec<_> = store.groups()[0].items.iter().map(|i| i.item_id).collect();
        assert_eq!(grouped, vec![1, 3]);
    }

    #[test]
    fn test_shift_item() {
        let mut store = priced(&[(1, 0), (2, 0), (3, 0)]);
        store.shift_item(1, true).unwrap();
        assert_eq!(ids(&store), vec![2, 1, 3]);
        store.shift_item(1, false).unwrap();
        assert_eq!(ids(&store), vec![2, 3, 1]);
    }

    #[test]
    fn test_shift_out_of_range() {
        let mut store = priced(&[(1, 0), (2, 0)]);
        assert_eq!(store.shift_item(0, true), Err(DomainError::OutOfRange { index: 0, len: 2 }));
        assert_eq!(store.shift_item(1, false), Err(DomainError::OutOfRange { index: 1, len: 2 }));
        assert_eq!(store.shift_item(7, true), Err(DomainError::OutOfRange { index: 7, len: 2 }));
        assert_eq!(ids(&store), vec![1, 2]);
    }

    #[test]
    fn test_shift_in_group() {
        let mut store = priced(&[(1, 0), (2, 0), (3, 0)]);
        let group = store.add_group("Gear").unwrap();
        store.move_items_to_group(group, &["item 1", "item 2", "item 3"]).unwrap();

        store.shift_item_in_group(group, 2, true).unwrap();
        let grouped: Vec<_> = store.groups()[0].items.iter().map(|i| i.item_id).collect();
        assert_eq!(grouped, vec![1, 3, 2]);

        assert!(store.shift_item_in_group(group, 0, true).is_err());
        assert_eq!(
            store.shift_item_in_group(GroupId(77), 0, false),
            Err(DomainError::GroupNotFound(GroupId(77)))
        );
    }
}

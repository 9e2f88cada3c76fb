//! Progress math
//!
//! Turns the current wealth and the goal list into the percentages the
//! progress view renders.

use serde::{Deserialize, Serialize};
use super::goal_group::{GoalGroup, GroupId};
use super::goal_item::{GoalItem, ItemId};

/// Percentage of `cost` covered by `wealth`, rounded, clamped to 100.
/// An unknown cost (0) reports no progress.
pub fn progress_percent(wealth: u64, cost: u64) -> u8 {
    if cost == 0 {
        return 0;
    }
    let percent = (wealth as f64 / cost as f64) * 100.0;
    percent.min(100.0).round() as u8
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemProgress {
    pub item_id: ItemId,
    pub name: String,
    pub price: u64,
    /// None when the item is listed but not tracked
    pub percent: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupProgress {
    pub group_id: GroupId,
    pub name: String,
    pub collapsed: bool,
    pub total_cost: u64,
    pub percent: u8,
    pub items: Vec<ItemProgress>,
}

/// Snapshot of everything the progress view shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressReport {
    pub wealth: u64,
    pub items: Vec<ItemProgress>,
    pub groups: Vec<GroupProgress>,
    /// Combined price of the top-level items
    pub total_cost: u64,
    pub total_percent: u8,
}

impl ProgressReport {
    /// Build a report. With `only_track_first` set, only the first
    /// top-level item carries a percentage.
    pub fn build(wealth: u64, items: &[GoalItem], groups: &[GoalGroup], only_track_first: bool) -> Self {
        let items: Vec<ItemProgress> = items
            .iter()
            .enumerate()
            .map(|(index, item)| ItemProgress {
                item_id: item.item_id,
                name: item.name.clone(),
                price: item.price,
                percent: (!only_track_first || index == 0).then(|| progress_percent(wealth, item.price)),
            })
            .collect();

        let groups = groups
            .iter()
            .map(|group| {
                let total_cost = group.total_cost();
                GroupProgress {
                    group_id: group.id,
                    name: group.name.clone(),
                    collapsed: group.collapsed,
                    total_cost,
                    percent: progress_percent(wealth, total_cost),
                    items: group
                        .items
                        .iter()
                        .map(|item| ItemProgress {
                            item_id: item.item_id,
                            name: item.name.clone(),
                            price: item.price,
                            percent: Some(progress_percent(wealth, item.price)),
                        })
                        .collect(),
                }
            })
            .collect();

        let total_cost = items.iter().fold(0u64, |acc, item| acc.saturating_add(item.price));

        Self {
            wealth,
            items,
            groups,
            total_cost,
            total_percent: progress_percent(wealth, total_cost),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_clamps_and_rounds() {
        assert_eq!(progress_percent(0, 100), 0);
        assert_eq!(progress_percent(50, 100), 50);
        assert_eq!(progress_percent(2, 3), 67);
        assert_eq!(progress_percent(500, 100), 100);
        assert_eq!(progress_percent(1_000, 0), 0);
    }

    #[test]
    fn test_only_first_item_tracked() {
        let items = vec![GoalItem::new(1, "A", 200), GoalItem::new(2, "B", 400)];
        let report = ProgressReport::build(100, &items, &[], true);
        assert_eq!(report.items[0].percent, Some(50));
        assert_eq!(report.items[1].percent, None);
        assert_eq!(report.total_cost, 600);
        assert_eq!(report.total_percent, 17);
    }

    #[test]
    fn test_group_totals() {
        let mut group = GoalGroup::new(GroupId(7), "Skilling".to_string());
        group.items.push(GoalItem::new(3, "C", 300));
        group.items.push(GoalItem::new(4, "D", 100));
        let report = ProgressReport::build(100, &[], &[group], false);

        let group = &report.groups[0];
        assert_eq!(group.total_cost, 400);
        assert_eq!(group.percent, 25);
        assert_eq!(group.items[1].percent, Some(100));
        assert_eq!(report.total_percent, 0);
    }
}

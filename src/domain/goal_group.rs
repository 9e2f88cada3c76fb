//! Goal Group Entity
//!
//! A named, collapsible sub-sequence of goal items.

use serde::{Deserialize, Serialize};
use super::entity::{DomainError, DomainResult, Entity};
use super::goal_item::{GoalItem, ItemId};

/// Longest group name kept, in characters
pub const MAX_GROUP_NAME_LENGTH: usize = 50;

/// Stable in-memory group handle. Not persisted; reassigned on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(pub u32);

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalGroup {
    pub id: GroupId,
    pub name: String,
    /// Whether the group's items are hidden in the progress view
    pub collapsed: bool,
    pub items: Vec<GoalItem>,
}

impl GoalGroup {
    /// Create an empty, expanded group
    pub fn new(id: GroupId, name: String) -> Self {
        Self {
            id,
            name,
            collapsed: false,
            items: Vec::new(),
        }
    }

    /// Sum of the unit prices of every item in the group
    pub fn total_cost(&self) -> u64 {
        self.items
            .iter()
            .fold(0u64, |acc, item| acc.saturating_add(item.price))
    }

    pub fn position_of(&self, item_id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == item_id)
    }
}

impl Entity for GoalGroup {
    type Id = GroupId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Validate and normalise a requested group name.
///
/// Surrounding whitespace is trimmed; names longer than
/// [`MAX_GROUP_NAME_LENGTH`] characters are cut, never rejected.
pub fn normalize_group_name(raw: &str) -> DomainResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidName);
    }
    Ok(trimmed.chars().take(MAX_GROUP_NAME_LENGTH).collect())
}

//! Goal Repository
//!
//! Persists wealth, the top-level item keys and the groups as three
//! independently serialized fields, so one corrupt field never takes the
//! others down with it.

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult, GoalGroup, GoalItem, ItemId};
use super::kv_state::KvState;

pub const CONFIG_GROUP: &str = "purchaseprogress";

const KEY_VALUE: &str = "value";
const KEY_ITEM_IDS: &str = "itemIds";
const KEY_GROUPS: &str = "groups";

/// Namespaced storage key
pub fn config_key(name: &str) -> String {
    format!("{}.{}", CONFIG_GROUP, name)
}

/// Stored shape of one group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRecord {
    pub name: String,
    pub collapsed: bool,
    pub items: Vec<ItemId>,
}

impl From<&GoalGroup> for GroupRecord {
    fn from(group: &GoalGroup) -> Self {
        Self {
            name: group.name.clone(),
            collapsed: group.collapsed,
            items: group.items.iter().map(|item| item.item_id).collect(),
        }
    }
}

/// Everything read back from storage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedGoals {
    pub wealth: u64,
    pub items: Vec<ItemId>,
    pub groups: Vec<GroupRecord>,
    /// Fields that could not be parsed and were replaced by their empty value
    pub issues: Vec<DomainError>,
}

pub struct GoalRepository {
    state: KvState,
}

impl GoalRepository {
    pub fn new(state: KvState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &KvState {
        &self.state
    }

    /// Read all three fields.
    ///
    /// Fails with `NotYetAvailable` before storage is attached. Unparsable
    /// fields are logged, reported in `issues` and read as empty.
    pub async fn load(&self) -> DomainResult<PersistedGoals> {
        let backend = self.state.get_backend().await?;
        let mut goals = PersistedGoals::default();

        if let Some(raw) = backend.get(&config_key(KEY_VALUE)).await? {
            match raw.trim().parse::<u64>() {
                Ok(wealth) => goals.wealth = wealth,
                Err(e) => goals.issues.push(malformed(KEY_VALUE, e)),
            }
        }

        let raw_items = backend.get(&config_key(KEY_ITEM_IDS)).await?;
        match parse_list::<ItemId>(raw_items.as_deref()) {
            Ok(items) => goals.items = items,
            Err(e) => goals.issues.push(malformed(KEY_ITEM_IDS, e)),
        }

        let raw_groups = backend.get(&config_key(KEY_GROUPS)).await?;
        match parse_list::<GroupRecord>(raw_groups.as_deref()) {
            Ok(groups) => goals.groups = groups,
            Err(e) => goals.issues.push(malformed(KEY_GROUPS, e)),
        }

        Ok(goals)
    }

    /// Write all three fields
    pub async fn save(&self, wealth: u64, items: &[GoalItem], groups: &[GoalGroup]) -> DomainResult<()> {
        let backend = self.state.get_backend().await?;

        let item_ids: Vec<ItemId> = items.iter().map(|item| item.item_id).collect();
        let records: Vec<GroupRecord> = groups.iter().map(GroupRecord::from).collect();

        let items_json = serde_json::to_string(&item_ids).map_err(|e| DomainError::Storage(e.to_string()))?;
        let groups_json = serde_json::to_string(&records).map_err(|e| DomainError::Storage(e.to_string()))?;

        backend.set(&config_key(KEY_VALUE), &wealth.to_string()).await?;
        backend.set(&config_key(KEY_ITEM_IDS), &items_json).await?;
        backend.set(&config_key(KEY_GROUPS), &groups_json).await?;

        log::debug!(
            "Saved goals: wealth={} items={} groups={}",
            wealth,
            item_ids.len(),
            records.len()
        );
        Ok(())
    }
}

/// Absent and `[]` both mean "no entries"
fn parse_list<T: serde::de::DeserializeOwned>(raw: Option<&str>) -> Result<Vec<T>, serde_json::Error> {
    match raw.map(str::trim) {
        None | Some("[]") | Some("") => Ok(Vec::new()),
        Some(json) => serde_json::from_str(json),
    }
}

fn malformed(field: &str, reason: impl std::fmt::Display) -> DomainError {
    log::error!("Exception occurred while loading purchase progress {}: {}", field, reason);
    DomainError::MalformedPersistedData {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

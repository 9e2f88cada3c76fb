//! Settings
//!
//! User-facing options, stored as individual keys next to the goal data.
//! Missing or unparsable keys fall back to their default.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::DomainResult;
use crate::valuation::{AppraisalConfig, SECTION_COUNT};
use super::goal_repo::config_key;
use super::kv_state::KvState;

const KEY_INCLUDE_BANK_TAB: &str = "includeBankTab";
const KEY_BANK_TAB: &str = "bankTab";
const KEY_ONLY_TRACK_FIRST_ITEM: &str = "onlyTrackFirstItem";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Include a bank tab's value in addition to currency
    pub include_bank_tab: bool,
    /// Bank tab to include, 0 for the entire bank
    pub bank_tab: usize,
    /// Only show progress for the first listed item
    pub only_track_first_item: bool,
}

impl Settings {
    pub async fn load(state: &KvState) -> DomainResult<Self> {
        let backend = state.get_backend().await?;
        let defaults = Self::default();

        let include_bank_tab = parse_or(
            backend.get(&config_key(KEY_INCLUDE_BANK_TAB)).await?,
            KEY_INCLUDE_BANK_TAB,
            defaults.include_bank_tab,
        );
        let mut bank_tab = parse_or(
            backend.get(&config_key(KEY_BANK_TAB)).await?,
            KEY_BANK_TAB,
            defaults.bank_tab,
        );
        let only_track_first_item = parse_or(
            backend.get(&config_key(KEY_ONLY_TRACK_FIRST_ITEM)).await?,
            KEY_ONLY_TRACK_FIRST_ITEM,
            defaults.only_track_first_item,
        );

        if bank_tab > SECTION_COUNT {
            log::warn!("bankTab {} out of range, using {}", bank_tab, SECTION_COUNT);
            bank_tab = SECTION_COUNT;
        }

        Ok(Self {
            include_bank_tab,
            bank_tab,
            only_track_first_item,
        })
    }

    pub async fn save(&self, state: &KvState) -> DomainResult<()> {
        let backend = state.get_backend().await?;
        backend.set(&config_key(KEY_INCLUDE_BANK_TAB), &self.include_bank_tab.to_string()).await?;
        backend.set(&config_key(KEY_BANK_TAB), &self.bank_tab.to_string()).await?;
        backend.set(&config_key(KEY_ONLY_TRACK_FIRST_ITEM), &self.only_track_first_item.to_string()).await?;
        Ok(())
    }

    pub fn appraisal(&self) -> AppraisalConfig {
        AppraisalConfig {
            include_section: self.include_bank_tab,
            section: self.bank_tab,
        }
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, key: &str, default: T) -> T {
    match raw {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring unparsable setting {}={:?}", key, raw);
            default
        }),
    }
}

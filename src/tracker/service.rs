//! Tracker Service
//!
//! Owns the goal store, the wealth calculator and the repository. Every
//! successful mutation is saved and announced exactly once; rejected
//! requests are announced as warnings and change nothing.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::ItemCatalog;
use crate::domain::{
    ContainerItem, DomainError, DomainResult, GoalGroup, GoalItem, GroupId, ItemId, ProgressReport,
};
use crate::repository::{GoalRepository, KvState, Settings};
use crate::store::{GoalStore, GroupOperations, GroupParts, ItemOperations, PositioningOperations};
use crate::valuation::{PriceCache, SecondaryContainer, WealthCalculator};
use super::events::{EventBus, ProgressEvent};

/// Read-only copy of the tracker state handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerSnapshot {
    pub wealth: u64,
    pub items: Vec<GoalItem>,
    pub groups: Vec<GoalGroup>,
    pub settings: Settings,
    pub loaded: bool,
}

pub struct Tracker {
    store: GoalStore,
    wealth: u64,
    settings: Settings,
    calculator: WealthCalculator,
    repo: GoalRepository,
    prices: Arc<dyn PriceCache>,
    catalog: Arc<dyn ItemCatalog>,
    events: EventBus,
    /// Saves stay off until stored goals were read, so an early save can
    /// not overwrite them with an empty list
    loaded: bool,
}

impl Tracker {
    pub fn new(state: KvState, prices: Arc<dyn PriceCache>, catalog: Arc<dyn ItemCatalog>, events: EventBus) -> Self {
        Self {
            store: GoalStore::new(),
            wealth: 0,
            settings: Settings::default(),
            calculator: WealthCalculator::new(prices.clone()),
            repo: GoalRepository::new(state),
            prices,
            catalog,
            events,
            loaded: false,
        }
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn wealth(&self) -> u64 {
        self.wealth
    }

    pub fn store(&self) -> &GoalStore {
        &self.store
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    // ========================================================================
    // Startup
    // ========================================================================

    /// Rebuild goals and wealth from storage, then re-price everything.
    ///
    /// Returns `NotYetAvailable` if storage is not attached yet; call again
    /// once the session is up.
    pub async fn load(&mut self) -> DomainResult<()> {
        let goals = match self.repo.load().await {
            Ok(goals) => goals,
            Err(DomainError::NotYetAvailable) => {
                log::info!("Storage not ready, deferring goal load");
                return Err(DomainError::NotYetAvailable);
            }
            Err(e) => return Err(e),
        };

        self.settings = Settings::load(self.repo.state()).await.unwrap_or_else(|e| {
            log::error!("Failed to load settings, using defaults: {}", e);
            Settings::default()
        });

        // Prices are filled in by the refresh below
        let items = goals
            .items
            .iter()
            .map(|id| self.catalog.goal_item(*id, 0))
            .collect();
        let groups = goals
            .groups
            .into_iter()
            .map(|record| GroupParts {
                items: record.items.iter().map(|id| self.catalog.goal_item(*id, 0)).collect(),
                name: record.name,
                collapsed: record.collapsed,
            })
            .collect();

        self.store = GoalStore::from_parts(items, groups);
        self.wealth = goals.wealth;
        self.loaded = true;
        log::info!(
            "Loaded {} tracked items in {} groups, wealth {}",
            self.store.tracked_count(),
            self.store.groups().len(),
            self.wealth
        );

        self.events.emit(ProgressEvent::Loaded);
        self.refresh_prices();
        Ok(())
    }

    // ========================================================================
    // Wealth
    // ========================================================================

    /// Recompute wealth from an explicit primary count and optional container
    pub async fn observe_wealth(&mut self, primary_count: u64, container: Option<&SecondaryContainer>) -> u64 {
        let appraisal = self.settings.appraisal();
        let wealth = self.calculator.calculate(primary_count, container, &appraisal);
        self.set_wealth(wealth).await
    }

    /// Recompute wealth from the carried inventory and the bank
    pub async fn observe_holdings(
        &mut self,
        inventory: Option<&[ContainerItem]>,
        bank: Option<&SecondaryContainer>,
    ) -> u64 {
        let appraisal = self.settings.appraisal();
        let wealth = self.calculator.value_holdings(inventory, bank, &appraisal);
        self.set_wealth(wealth).await
    }

    async fn set_wealth(&mut self, wealth: u64) -> u64 {
        self.wealth = wealth;
        self.persist().await;
        self.events.emit(ProgressEvent::Refresh);
        wealth
    }

    // ========================================================================
    // Items
    // ========================================================================

    pub async fn add_item(&mut self, item: GoalItem) -> DomainResult<()> {
        let result = self.store.add_item(item);
        self.commit(result).await
    }

    /// Add an item picked from the catalog, priced now
    pub async fn add_item_by_id(&mut self, item_id: ItemId) -> DomainResult<()> {
        let item = self.catalog.goal_item(item_id, self.prices.price(item_id));
        self.add_item(item).await
    }

    pub async fn remove_item(&mut self, item_id: ItemId) -> DomainResult<bool> {
        let removed = self.store.remove_item(item_id);
        self.commit(Ok(removed)).await
    }

    /// Re-read every tracked item's price. Prices are not persisted, so
    /// this only asks for a re-render.
    pub fn refresh_prices(&mut self) -> usize {
        let changed = self.store.refresh_prices(self.prices.as_ref());
        log::debug!("Price refresh: {} of {} items changed", changed, self.store.tracked_count());
        self.events.emit(ProgressEvent::Refresh);
        changed
    }

    // ========================================================================
    // Groups
    // ========================================================================

    pub async fn add_group(&mut self, name: &str) -> DomainResult<GroupId> {
        let result = self.store.add_group(name);
        self.commit(result).await
    }

    /// Returns false when the name was taken and the rename dropped
    pub async fn rename_group(&mut self, id: GroupId, new_name: &str) -> DomainResult<bool> {
        match self.store.rename_group(id, new_name) {
            Ok(false) => Ok(false),
            result => self.commit(result).await,
        }
    }

    pub async fn remove_group(&mut self, id: GroupId) -> DomainResult<()> {
        let result = self.store.remove_group(id);
        self.commit(result).await
    }

    pub async fn move_items_to_group(&mut self, id: GroupId, names: &[String]) -> DomainResult<usize> {
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        let result = self.store.move_items_to_group(id, &names);
        self.commit(result).await
    }

    pub async fn remove_item_from_group(&mut self, id: GroupId, item_id: ItemId) -> DomainResult<bool> {
        let result = self.store.remove_item_from_group(id, item_id);
        self.commit(result).await
    }

    pub async fn toggle_group_collapsed(&mut self, id: GroupId) -> DomainResult<bool> {
        let result = self.store.toggle_group_collapsed(id);
        self.commit(result).await
    }

    // ========================================================================
    // Positioning
    // ========================================================================

    /// Sort the top-level items by price. An empty list is left alone.
    pub async fn sort(&mut self, ascending: bool) -> DomainResult<()> {
        if self.store.items().is_empty() {
            return Ok(());
        }
        self.store.sort(ascending);
        self.commit(Ok(())).await
    }

    pub async fn shift_item(&mut self, index: usize, up: bool) -> DomainResult<()> {
        let result = self.store.shift_item(index, up);
        self.commit(result).await
    }

    pub async fn shift_item_in_group(&mut self, id: GroupId, index: usize, up: bool) -> DomainResult<()> {
        let result = self.store.shift_item_in_group(id, index, up);
        self.commit(result).await
    }

    // ========================================================================
    // Settings and reads
    // ========================================================================

    pub async fn update_settings(&mut self, settings: Settings) -> DomainResult<()> {
        settings.save(self.repo.state()).await?;
        self.settings = settings;
        self.events.emit(ProgressEvent::Refresh);
        Ok(())
    }

    pub fn snapshot(&self) -> TrackerSnapshot {
        TrackerSnapshot {
            wealth: self.wealth,
            items: self.store.items().to_vec(),
            groups: self.store.groups().to_vec(),
            settings: self.settings,
            loaded: self.loaded,
        }
    }

    pub fn report(&self) -> ProgressReport {
        ProgressReport::build(
            self.wealth,
            self.store.items(),
            self.store.groups(),
            self.settings.only_track_first_item,
        )
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Save and announce a successful mutation, or warn about a rejected one
    async fn commit<T>(&mut self, result: DomainResult<T>) -> DomainResult<T> {
        match &result {
            Ok(_) => {
                self.persist().await;
                self.events.emit(ProgressEvent::Refresh);
            }
            Err(e) if e.is_user_warning() => {
                log::warn!("{}", e);
                self.events.emit(ProgressEvent::Warning(e.to_string()));
            }
            Err(e) => log::debug!("Rejected request: {}", e),
        }
        result
    }

    async fn persist(&self) {
        if !self.loaded {
            log::warn!("Skipping save: stored goals not loaded yet");
            return;
        }
        if let Err(e) = self
            .repo
            .save(self.wealth, self.store.items(), self.store.groups())
            .await
        {
            log::error!("Failed to save goals: {}", e);
        }
    }
}

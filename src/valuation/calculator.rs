//! Wealth Calculator
//!
//! Current wealth is the primary currency count plus, optionally, the
//! appraised value of one section of the secondary container. The appraisal
//! is memoized on a content fingerprint so an unchanged bank tab is never
//! re-priced.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::ContainerItem;
use super::currency::{self, is_currency};
use super::fingerprint::{fingerprint, Fingerprint};
use super::price::PriceCache;
use super::sections::SectionCounts;

/// Which part of the secondary container counts toward wealth
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppraisalConfig {
    /// Appraise container contents at all
    pub include_section: bool,
    /// 1-based section index, 0 for the whole container
    pub section: usize,
}

/// A secondary container as observed during one valuation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecondaryContainer {
    pub items: Vec<ContainerItem>,
    pub sections: SectionCounts,
}

impl SecondaryContainer {
    pub fn new(items: Vec<ContainerItem>, sections: SectionCounts) -> Self {
        Self { items, sections }
    }

    /// Container treated as a single section
    pub fn unsectioned(items: Vec<ContainerItem>) -> Self {
        Self::new(items, SectionCounts::default())
    }

    fn section(&self, section: usize) -> &[ContainerItem] {
        &self.items[self.sections.window(section, self.items.len())]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AppraisalCache {
    fingerprint: Fingerprint,
    value: u64,
}

pub struct WealthCalculator {
    prices: Arc<dyn PriceCache>,
    cache: Option<AppraisalCache>,
    memoize: bool,
}

impl WealthCalculator {
    pub fn new(prices: Arc<dyn PriceCache>) -> Self {
        Self {
            prices,
            cache: None,
            memoize: true,
        }
    }

    /// Calculator that re-appraises on every call. Same results, more lookups.
    pub fn without_memoization(prices: Arc<dyn PriceCache>) -> Self {
        Self {
            memoize: false,
            ..Self::new(prices)
        }
    }

    /// Total wealth for one observation.
    ///
    /// `primary_count` is taken 1:1. An absent container, or a disabled
    /// section appraisal, contributes nothing.
    pub fn calculate(
        &mut self,
        primary_count: u64,
        container: Option<&SecondaryContainer>,
        config: &AppraisalConfig,
    ) -> u64 {
        let Some(container) = container else {
            return primary_count;
        };
        if !config.include_section {
            return primary_count;
        }

        let appraised = self.appraise(container.section(config.section));
        primary_count.saturating_add(appraised)
    }

    /// Full valuation from the carried inventory and the bank: currency in
    /// both, plus the configured bank section.
    pub fn value_holdings(
        &mut self,
        inventory: Option<&[ContainerItem]>,
        bank: Option<&SecondaryContainer>,
        config: &AppraisalConfig,
    ) -> u64 {
        let mut primary = inventory.map(currency::primary_count).unwrap_or(0);
        if let Some(bank) = bank {
            primary = primary.saturating_add(currency::primary_count(&bank.items));
        }
        self.calculate(primary, bank, config)
    }

    fn appraise(&mut self, items: &[ContainerItem]) -> u64 {
        let current = fingerprint(items);
        if self.memoize {
            if let Some(cache) = self.cache.filter(|cache| cache.fingerprint == current) {
                log::debug!("Appraisal cache hit ({} slots)", items.len());
                return cache.value;
            }
        }

        let value = items
            .iter()
            .filter(|item| item.is_appraisable() && !is_currency(item.item_id))
            .map(|item| self.prices.price(item.item_id).saturating_mul(u64::from(item.quantity)))
            .fold(0u64, u64::saturating_add);

        log::debug!("Appraised {} slots at {}", items.len(), value);
        self.cache = Some(AppraisalCache {
            fingerprint: current,
            value,
        });
        value
    }

    /// Value of the last appraisal, if any
    pub fn cached_appraisal(&self) -> Option<u64> {
        self.cache.map(|cache| cache.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use crate::domain::ItemId;
    use crate::valuation::currency::{COINS, PLATINUM_TOKEN};

    /// Price source that records every lookup
    #[derive(Default)]
    struct CountingPrices {
        prices: HashMap<ItemId, u64>,
        lookups: Mutex<Vec<ItemId>>,
    }

    impl CountingPrices {
        fn with(prices: &[(ItemId, u64)]) -> Arc<Self> {
            Arc::new(Self {
                prices: prices.iter().copied().collect(),
                lookups: Mutex::new(Vec::new()),
            })
        }

        fn lookups(&self) -> Vec<ItemId> {
            self.lookups.lock().unwrap().clone()
        }

        fn reset(&self) {
            self.lookups.lock().unwrap().clear();
        }
    }

    impl PriceCache for CountingPrices {
        fn price(&self, item_id: ItemId) -> u64 {
            self.lookups.lock().unwrap().push(item_id);
            self.prices.get(&item_id).copied().unwrap_or(0)
        }
    }

    fn bank(pairs: &[(ItemId, u32)]) -> SecondaryContainer {
        SecondaryContainer::unsectioned(pairs.iter().copied().map(ContainerItem::from).collect())
    }

    const WHOLE: AppraisalConfig = AppraisalConfig {
        include_section: true,
        section: 0,
    };

    #[test]
    fn test_absent_container_returns_primary() {
        let prices = CountingPrices::with(&[]);
        let mut calc = WealthCalculator::new(prices.clone());
        for primary in [0, 1, 1_000, u64::MAX] {
            assert_eq!(calc.calculate(primary, None, &WHOLE), primary);
        }
        assert!(prices.lookups().is_empty());
    }

    #[test]
    fn test_disabled_section_ignores_contents() {
        let prices = CountingPrices::with(&[(1, 10)]);
        let mut calc = WealthCalculator::new(prices.clone());
        let container = bank(&[(1, 5_000)]);

        let value = calc.calculate(1_000, Some(&container), &AppraisalConfig::default());
        assert_eq!(value, 1_000);
        assert!(prices.lookups().is_empty());
    }

    #[test]
    fn test_cache_hit_skips_price_lookups() {
        let prices = CountingPrices::with(&[(1, 10), (2, 3)]);
        let mut calc = WealthCalculator::new(prices.clone());

        let first = calc.calculate(0, Some(&bank(&[(1, 5), (2, 2)])), &WHOLE);
        assert_eq!(first, 56);
        prices.reset();

        let second = calc.calculate(0, Some(&bank(&[(2, 2), (1, 5)])), &WHOLE);
        assert_eq!(second, first);
        assert!(prices.lookups().is_empty());
    }

    #[test]
    fn test_change_invalidates_cache() {
        let prices = CountingPrices::with(&[(1, 10), (2, 3)]);
        let mut calc = WealthCalculator::new(prices.clone());

        assert_eq!(calc.calculate(0, Some(&bank(&[(1, 5)])), &WHOLE), 50);
        prices.reset();

        assert_eq!(calc.calculate(0, Some(&bank(&[(1, 5), (2, 2)])), &WHOLE), 56);
        let mut looked_up = prices.lookups();
        looked_up.sort();
        assert_eq!(looked_up, vec![1, 2]);
        assert_eq!(calc.cached_appraisal(), Some(56));
    }

    #[test]
    fn test_currency_and_empty_slots_not_appraised() {
        let prices = CountingPrices::with(&[(COINS, 1), (PLATINUM_TOKEN, 1_000), (7, 4)]);
        let mut calc = WealthCalculator::new(prices.clone());
        let container = bank(&[(COINS, 100), (PLATINUM_TOKEN, 2), (-1, 3), (7, 0), (7, 0), (8, 1)]);

        assert_eq!(calc.calculate(0, Some(&container), &WHOLE), 0);
        assert_eq!(prices.lookups(), vec![8]);
    }

    #[test]
    fn test_selected_section_only() {
        let prices = CountingPrices::with(&[(1, 1), (2, 10), (3, 100)]);
        let mut calc = WealthCalculator::new(prices.clone());
        let mut counts = [0u32; 9];
        counts[0] = 1;
        counts[1] = 2;
        let container = SecondaryContainer::new(
            vec![ContainerItem::new(1, 1), ContainerItem::new(2, 1), ContainerItem::new(2, 1), ContainerItem::new(3, 1)],
            counts.into(),
        );

        let tab_two = AppraisalConfig { include_section: true, section: 2 };
        assert_eq!(calc.calculate(5, Some(&container), &tab_two), 25);
        // Slot 4 sits after every tab, so only the whole-bank view sees it
        assert_eq!(calc.calculate(5, Some(&container), &WHOLE), 5 + 1 + 20 + 100);
    }

    #[test]
    fn test_memoization_does_not_change_results() {
        let table = [(1, 7), (2, 11), (3, 13)];
        let sequence = [
            bank(&[(1, 1)]),
            bank(&[(1, 1)]),
            bank(&[(1, 2), (3, 4)]),
            bank(&[(3, 4), (1, 2)]),
            bank(&[(2, 9)]),
        ];

        let mut cached = WealthCalculator::new(CountingPrices::with(&table));
        let mut uncached = WealthCalculator::without_memoization(CountingPrices::with(&table));
        for container in &sequence {
            assert_eq!(
                cached.calculate(17, Some(container), &WHOLE),
                uncached.calculate(17, Some(container), &WHOLE)
            );
        }
    }

    #[test]
    fn test_value_holdings_counts_currency_once() {
        let prices = CountingPrices::with(&[(4151, 100)]);
        let mut calc = WealthCalculator::new(prices);
        let inventory = [ContainerItem::new(COINS, 50), ContainerItem::new(PLATINUM_TOKEN, 1)];
        let container = bank(&[(COINS, 200), (4151, 3)]);

        assert_eq!(calc.value_holdings(Some(&inventory), None, &WHOLE), 1_050);
        assert_eq!(calc.value_holdings(Some(&inventory), Some(&container), &WHOLE), 1_050 + 200 + 300);
        assert_eq!(calc.value_holdings(None, Some(&container), &AppraisalConfig::default()), 200);
    }
}

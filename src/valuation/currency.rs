//! Primary currency denominations
//!
//! Coins and platinum tokens count toward wealth at a fixed rate and are
//! never appraised through the price source.

use crate::domain::{ContainerItem, ItemId};

pub const COINS: ItemId = 995;
pub const PLATINUM_TOKEN: ItemId = 13204;

/// (item key, value per unit)
pub const DENOMINATIONS: [(ItemId, u64); 2] = [(COINS, 1), (PLATINUM_TOKEN, 1_000)];

pub fn is_currency(item_id: ItemId) -> bool {
    DENOMINATIONS.iter().any(|(id, _)| *id == item_id)
}

/// Currency held in a container, in coins.
pub fn primary_count(items: &[ContainerItem]) -> u64 {
    items
        .iter()
        .filter_map(|item| {
            DENOMINATIONS
                .iter()
                .find(|(id, _)| *id == item.item_id)
                .map(|(_, unit)| u64::from(item.quantity).saturating_mul(*unit))
        })
        .fold(0u64, u64::saturating_add)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_coins_and_tokens() {
        let items = [
            ContainerItem::new(COINS, 2_500),
            ContainerItem::new(4151, 1),
            ContainerItem::new(PLATINUM_TOKEN, 3),
        ];
        assert_eq!(primary_count(&items), 5_500);
    }

    #[test]
    fn test_split_stacks_are_summed() {
        let items = [ContainerItem::new(COINS, 10), ContainerItem::new(COINS, 5)];
        assert_eq!(primary_count(&items), 15);
        assert!(is_currency(PLATINUM_TOKEN));
        assert!(!is_currency(4151));
    }
}

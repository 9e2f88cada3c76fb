//! Content fingerprint for appraisal caching.

use std::collections::BTreeMap;

use crate::domain::{ContainerItem, ItemId};

/// Order-independent hash of an item-key → quantity mapping.
pub type Fingerprint = blake3::Hash;

/// Fingerprint a slice of container slots.
///
/// Duplicate keys are coalesced, last slot wins, so two slot lists with the
/// same effective mapping in any order hash identically.
pub fn fingerprint(items: &[ContainerItem]) -> Fingerprint {
    let mapping: BTreeMap<ItemId, u32> = items
        .iter()
        .map(|item| (item.item_id, item.quantity))
        .collect();

    let mut hasher = blake3::Hasher::new();
    for (item_id, quantity) in &mapping {
        hasher.update(&item_id.to_le_bytes());
        hasher.update(&quantity.to_le_bytes());
    }
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(pairs: &[(ItemId, u32)]) -> Vec<ContainerItem> {
        pairs.iter().copied().map(ContainerItem::from).collect()
    }

    #[test]
    fn test_order_independent() {
        let a = fingerprint(&slots(&[(1, 5), (2, 7), (3, 1)]));
        let b = fingerprint(&slots(&[(3, 1), (1, 5), (2, 7)]));
        assert_eq!(a, b);
    }

    #[test]
    fn test_quantity_change_detected() {
        let a = fingerprint(&slots(&[(1, 5), (2, 7)]));
        let b = fingerprint(&slots(&[(1, 5), (2, 8)]));
        assert_ne!(a, b);
    }

    #[test]
    fn test_duplicate_keys_last_write_wins() {
        let a = fingerprint(&slots(&[(1, 9), (2, 7), (1, 5)]));
        let b = fingerprint(&slots(&[(2, 7), (1, 5)]));
        assert_eq!(a, b);
    }
}

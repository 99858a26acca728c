//! Component F — inventory/buylist records and their merge rules (spec.md
//! §4.F), translated from `InventoryRecord.add` and its three strictness
//! wrappers (`AddRelaxed`/`Add`/`AddStrict`) in
//! `examples/original_source/mtgban/base.go`.

use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    #[error("duplicate entry for {id}: conditions={conditions} price={price} already present")]
    DuplicateEntry {
        id: String,
        conditions: String,
        price: f64,
    },
}

/// How aggressively two entries for the same canonical id are merged
/// (spec.md §4.F).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// Sum quantity whenever `(conditions, price)` match.
    Relaxed,
    /// Merge (no-op) only on an exact field-for-field duplicate; anything
    /// else is appended as a distinct entry.
    Default,
    /// Any `(conditions, price)` collision that isn't a field-for-field
    /// duplicate is rejected outright.
    Strict,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryEntry {
    pub conditions: String,
    pub price: f64,
    pub quantity: u32,
    pub url: String,
    pub seller_name: String,
    pub bundle: bool,
    pub original_id: Option<String>,
    pub instance_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuylistEntry {
    pub conditions: String,
    pub buy_price: f64,
    pub trade_price: f64,
    pub quantity: u32,
    pub url: String,
    pub vendor_name: String,
    /// Ratio applied to `buy_price` to derive `trade_price`; adapter-local
    /// per spec.md §9's Open Question resolution (jupitergames uses 1.25,
    /// cardkingdom/channelfireball use 1.3). Not the same field as
    /// `price_ratio` below, which mirrors the source's own `PriceRatio`.
    pub trade_ratio: f64,
    /// `buyPrice / sellPrice * 100` (spec.md §3 `BuylistEntry.priceRatio`),
    /// populated only when the caller cross-references a sell-side price;
    /// left unset for adapters that buy without also tracking their own
    /// matching sell-side listing.
    pub price_ratio: Option<f64>,
    /// Buy quantity as a fraction of sell quantity, same caveat as
    /// `price_ratio` (spec.md §3 `BuylistEntry.quantityRatio`).
    pub quantity_ratio: Option<f64>,
    pub original_id: Option<String>,
}

fn price_key(price: f64) -> String {
    format!("{:.2}", price)
}

#[derive(Debug, Default, Clone)]
pub struct InventoryRecord {
    entries: HashMap<String, Vec<InventoryEntry>>,
}

impl InventoryRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> &[InventoryEntry] {
        self.entries.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_exact_duplicate(a: &InventoryEntry, b: &InventoryEntry) -> bool {
        a.conditions == b.conditions
            && (a.price - b.price).abs() < f64::EPSILON
            && a.url == b.url
            && a.seller_name == b.seller_name
            && a.quantity == b.quantity
    }

    pub fn add(&mut self, id: &str, entry: InventoryEntry, mode: MergeMode) -> Result<(), StoreError> {
        let bucket = self.entries.entry(id.to_string()).or_default();
        let target_key = (entry.conditions.clone(), price_key(entry.price));

        match mode {
            MergeMode::Relaxed => {
                if let Some(existing) = bucket
                    .iter_mut()
                    .find(|e| (e.conditions.clone(), price_key(e.price)) == target_key)
                {
                    existing.quantity += entry.quantity;
                } else {
                    bucket.push(entry);
                }
            }
            MergeMode::Default => {
                if !bucket.iter().any(|e| Self::is_exact_duplicate(e, &entry)) {
                    bucket.push(entry);
                }
            }
            MergeMode::Strict => {
                if let Some(existing) = bucket
                    .iter()
                    .find(|e| (e.conditions.clone(), price_key(e.price)) == target_key)
                {
                    if !Self::is_exact_duplicate(existing, &entry) {
                        return Err(StoreError::DuplicateEntry {
                            id: id.to_string(),
                            conditions: entry.conditions,
                            price: entry.price,
                        });
                    }
                    return Ok(());
                }
                bucket.push(entry);
            }
        }
        Ok(())
    }

    pub fn add_relaxed(&mut self, id: &str, entry: InventoryEntry) {
        self.add(id, entry, MergeMode::Relaxed)
            .expect("relaxed merges never fail");
    }

    pub fn add_strict(&mut self, id: &str, entry: InventoryEntry) -> Result<(), StoreError> {
        self.add(id, entry, MergeMode::Strict)
    }
}

#[derive(Debug, Default, Clone)]
pub struct BuylistRecord {
    entries: HashMap<String, Vec<BuylistEntry>>,
}

impl BuylistRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> &[BuylistEntry] {
        self.entries.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_exact_duplicate(a: &BuylistEntry, b: &BuylistEntry) -> bool {
        a.conditions == b.conditions
            && (a.buy_price - b.buy_price).abs() < f64::EPSILON
            && a.url == b.url
            && a.vendor_name == b.vendor_name
            && a.quantity == b.quantity
    }

    pub fn add(&mut self, id: &str, entry: BuylistEntry, mode: MergeMode) -> Result<(), StoreError> {
        let bucket = self.entries.entry(id.to_string()).or_default();
        let target_key = (entry.conditions.clone(), price_key(entry.buy_price));

        match mode {
            MergeMode::Relaxed => {
                if let Some(existing) = bucket
                    .iter_mut()
                    .find(|e| (e.conditions.clone(), price_key(e.buy_price)) == target_key)
                {
                    existing.quantity += entry.quantity;
                } else {
                    bucket.push(entry);
                }
            }
            MergeMode::Default => {
                if !bucket.iter().any(|e| Self::is_exact_duplicate(e, &entry)) {
                    bucket.push(entry);
                }
            }
            MergeMode::Strict => {
                if let Some(existing) = bucket
                    .iter()
                    .find(|e| (e.conditions.clone(), price_key(e.buy_price)) == target_key)
                {
                    if !Self::is_exact_duplicate(existing, &entry) {
                        return Err(StoreError::DuplicateEntry {
                            id: id.to_string(),
                            conditions: entry.conditions,
                            price: entry.buy_price,
                        });
                    }
                    return Ok(());
                }
                bucket.push(entry);
            }
        }
        Ok(())
    }

    pub fn add_relaxed(&mut self, id: &str, entry: BuylistEntry) {
        self.add(id, entry, MergeMode::Relaxed)
            .expect("relaxed merges never fail");
    }

    pub fn add_strict(&mut self, id: &str, entry: BuylistEntry) -> Result<(), StoreError> {
        self.add(id, entry, MergeMode::Strict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(conditions: &str, price: f64, qty: u32) -> InventoryEntry {
        InventoryEntry {
            conditions: conditions.to_string(),
            price,
            quantity: qty,
            url: "https://example.test/card".to_string(),
            seller_name: "Test Seller".to_string(),
            bundle: false,
            original_id: None,
            instance_id: None,
        }
    }

    #[test]
    fn relaxed_sums_quantity_on_matching_conditions_and_price() {
        let mut record = InventoryRecord::new();
        record.add_relaxed("id1", entry("NM", 1.0, 3));
        record.add_relaxed("id1", entry("NM", 1.0, 2));
        assert_eq!(record.get("id1").len(), 1);
        assert_eq!(record.get("id1")[0].quantity, 5);
    }

    #[test]
    fn default_mode_appends_non_identical_entries() {
        let mut record = InventoryRecord::new();
        record.add("id1", entry("NM", 1.0, 3), MergeMode::Default).unwrap();
        let mut other = entry("NM", 1.0, 3);
        other.url = "https://example.test/other".to_string();
        record.add("id1", other, MergeMode::Default).unwrap();
        assert_eq!(record.get("id1").len(), 2);
    }

    #[test]
    fn default_mode_dedupes_exact_duplicates() {
        let mut record = InventoryRecord::new();
        record.add("id1", entry("NM", 1.0, 3), MergeMode::Default).unwrap();
        record.add("id1", entry("NM", 1.0, 3), MergeMode::Default).unwrap();
        assert_eq!(record.get("id1").len(), 1);
    }

    #[test]
    fn strict_mode_rejects_conditions_price_collisions() {
        let mut record = InventoryRecord::new();
        record.add_strict("id1", entry("NM", 1.0, 3)).unwrap();
        let mut other = entry("NM", 1.0, 3);
        other.quantity = 7;
        let err = record.add_strict("id1", other).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEntry { .. }));
    }
}

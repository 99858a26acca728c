//! External interface serialization (spec.md §6): the JSON record-map shape
//! and CSV row shape vendors' own exports and downstream consumers use.
//! Kept separate from [`crate::store`] so the in-memory record types stay
//! free of a serde dependency they don't otherwise need.

use crate::store::{BuylistEntry, BuylistRecord, InventoryEntry, InventoryRecord, MergeMode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{Read, Write};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct InventoryRow {
    id: String,
    conditions: String,
    price: f64,
    quantity: u32,
    url: String,
    #[serde(rename = "sellerName")]
    seller_name: String,
    bundle: bool,
    #[serde(rename = "originalId")]
    original_id: Option<String>,
    #[serde(rename = "instanceId")]
    instance_id: Option<String>,
}

impl InventoryRow {
    fn from_entry(id: &str, entry: &InventoryEntry) -> Self {
        InventoryRow {
            id: id.to_string(),
            conditions: entry.conditions.clone(),
            price: entry.price,
            quantity: entry.quantity,
            url: entry.url.clone(),
            seller_name: entry.seller_name.clone(),
            bundle: entry.bundle,
            original_id: entry.original_id.clone(),
            instance_id: entry.instance_id.clone(),
        }
    }

    fn into_entry(self) -> (String, InventoryEntry) {
        (
            self.id,
            InventoryEntry {
                conditions: self.conditions,
                price: self.price,
                quantity: self.quantity,
                url: self.url,
                seller_name: self.seller_name,
                bundle: self.bundle,
                original_id: self.original_id,
                instance_id: self.instance_id,
            },
        )
    }
}

/// `{ id -> [ entry, ... ] }`, the record-map shape spec.md §6 describes.
pub fn inventory_to_json(record: &InventoryRecord) -> anyhow::Result<serde_json::Value> {
    let mut map: BTreeMap<String, Vec<InventoryRow>> = BTreeMap::new();
    for id in record.ids() {
        let rows = record.get(id).iter().map(|e| InventoryRow::from_entry(id, e)).collect();
        map.insert(id.to_string(), rows);
    }
    Ok(serde_json::to_value(map)?)
}

pub fn write_inventory_csv<W: Write>(writer: W, record: &InventoryRecord) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for id in record.ids() {
        for entry in record.get(id) {
            wtr.serialize(InventoryRow::from_entry(id, entry))?;
        }
    }
    wtr.flush()?;
    Ok(())
}

pub fn read_inventory_csv<R: Read>(reader: R, mode: MergeMode) -> anyhow::Result<InventoryRecord> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut record = InventoryRecord::new();
    for result in rdr.deserialize::<InventoryRow>() {
        let (id, entry) = result?.into_entry();
        record.add(&id, entry, mode)?;
    }
    Ok(record)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BuylistRow {
    id: String,
    conditions: String,
    #[serde(rename = "buyPrice")]
    buy_price: f64,
    #[serde(rename = "tradePrice")]
    trade_price: f64,
    quantity: u32,
    url: String,
    #[serde(rename = "vendorName")]
    vendor_name: String,
    #[serde(rename = "tradeRatio")]
    trade_ratio: f64,
    #[serde(rename = "priceRatio")]
    price_ratio: Option<f64>,
    #[serde(rename = "quantityRatio")]
    quantity_ratio: Option<f64>,
    #[serde(rename = "originalId")]
    original_id: Option<String>,
}

impl BuylistRow {
    fn from_entry(id: &str, entry: &BuylistEntry) -> Self {
        BuylistRow {
            id: id.to_string(),
            conditions: entry.conditions.clone(),
            buy_price: entry.buy_price,
            trade_price: entry.trade_price,
            quantity: entry.quantity,
            url: entry.url.clone(),
            vendor_name: entry.vendor_name.clone(),
            trade_ratio: entry.trade_ratio,
            price_ratio: entry.price_ratio,
            quantity_ratio: entry.quantity_ratio,
            original_id: entry.original_id.clone(),
        }
    }

    fn into_entry(self) -> (String, BuylistEntry) {
        (
            self.id,
            BuylistEntry {
                conditions: self.conditions,
                buy_price: self.buy_price,
                trade_price: self.trade_price,
                quantity: self.quantity,
                url: self.url,
                vendor_name: self.vendor_name,
                trade_ratio: self.trade_ratio,
                price_ratio: self.price_ratio,
                quantity_ratio: self.quantity_ratio,
                original_id: self.original_id,
            },
        )
    }
}

pub fn buylist_to_json(record: &BuylistRecord) -> anyhow::Result<serde_json::Value> {
    let mut map: BTreeMap<String, Vec<BuylistRow>> = BTreeMap::new();
    for id in record.ids() {
        let rows = record.get(id).iter().map(|e| BuylistRow::from_entry(id, e)).collect();
        map.insert(id.to_string(), rows);
    }
    Ok(serde_json::to_value(map)?)
}

pub fn write_buylist_csv<W: Write>(writer: W, record: &BuylistRecord) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for id in record.ids() {
        for entry in record.get(id) {
            wtr.serialize(BuylistRow::from_entry(id, entry))?;
        }
    }
    wtr.flush()?;
    Ok(())
}

pub fn read_buylist_csv<R: Read>(reader: R, mode: MergeMode) -> anyhow::Result<BuylistRecord> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut record = BuylistRecord::new();
    for result in rdr.deserialize::<BuylistRow>() {
        let (id, entry) = result?.into_entry();
        record.add(&id, entry, mode)?;
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> InventoryRecord {
        let mut record = InventoryRecord::new();
        record.add_relaxed(
            "00000000-0000-0000-0000-000000000001",
            InventoryEntry {
                conditions: "NM".to_string(),
                price: 4.5,
                quantity: 3,
                url: "https://example.test/card".to_string(),
                seller_name: "Test Seller".to_string(),
                bundle: false,
                original_id: None,
                instance_id: Some("inst-1".to_string()),
            },
        );
        record
    }

    #[test]
    fn csv_round_trip_preserves_every_field() {
        let record = sample_record();
        let mut buf = Vec::new();
        write_inventory_csv(&mut buf, &record).unwrap();
        let parsed = read_inventory_csv(buf.as_slice(), crate::store::MergeMode::Default).unwrap();
        let entries = parsed.get("00000000-0000-0000-0000-000000000001");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].price, 4.5);
        assert_eq!(entries[0].instance_id.as_deref(), Some("inst-1"));
    }

    #[test]
    fn json_record_map_is_keyed_by_id() {
        let record = sample_record();
        let value = inventory_to_json(&record).unwrap();
        assert!(value
            .get("00000000-0000-0000-0000-000000000001")
            .and_then(|v| v.as_array())
            .is_some());
    }
}

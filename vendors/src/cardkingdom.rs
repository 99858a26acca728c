//! Card Kingdom adapter, grounded on `examples/original_source/cardkingdom.go`:
//! a single combined pricelist (each row carries both a sell side and a buy
//! side), SKU-encoded set/number hints, a SKU-keyed fixup table for
//! malformed rows, token/checklist row rejection, and a 1.3x buy-to-trade
//! price ratio.

use crate::fetch::Fetcher;
use mtgmatch_core::adapter::{DefaultGrading, Grading, ScraperInfo, Scraper, Seller, Vendor};
use mtgmatch_core::matcher::resolve;
use mtgmatch_core::preprocess::{Preprocessor, RawRow, StandardPreprocessor};
use mtgmatch_core::reference::Datastore;
use mtgmatch_core::store::{BuylistEntry, BuylistRecord, InventoryEntry, InventoryRecord};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Card Kingdom's trade-in price is 1.3x their cash buy price (spec.md §9
/// Open Question: the ratio is adapter-local, not a core constant).
const TRADE_PRICE_RATIO: f64 = 1.3;

static SKU_FIXUPS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    // A handful of CK SKUs whose product name never lines up with the
    // reference dataset's card name (`skuFixupTable` in the original
    // source) — kept small and explicit rather than guessed at.
    HashMap::from([("SLD-GODZILLA-1", "Dirge Bat")])
});

/// One pricelist row, combining both sides of the market the way Card
/// Kingdom's own API does (`scrape()`'s `card` struct in the original
/// source) rather than the separate sell/buy feeds most other vendors use.
#[derive(Debug, Deserialize)]
struct CkRow {
    sku: String,
    name: String,
    edition: String,
    #[serde(default)]
    foil: bool,
    #[serde(rename = "sellPrice", default)]
    sell_price: f64,
    #[serde(rename = "sellQty", default)]
    sell_qty: u32,
    #[serde(rename = "buyPrice", default)]
    buy_price: f64,
    #[serde(rename = "buyQty", default)]
    buy_qty: u32,
}

fn parse_sku_number(sku: &str) -> Option<String> {
    sku.splitn(3, '-').nth(1).map(|s| s.to_string())
}

pub struct CardKingdom {
    fetcher: Box<dyn Fetcher>,
    datastore: Arc<Datastore>,
    pricelist_url: String,
    preprocessor: StandardPreprocessor,
    grading: DefaultGrading,
    info: ScraperInfo,
    // Memoized the way the original source's `ck.inventory`/`ck.buylist`
    // maps are: one `scrape()` populates both, and later calls reuse it.
    inventory: Option<InventoryRecord>,
    buylist: Option<BuylistRecord>,
}

impl CardKingdom {
    pub fn new(fetcher: impl Fetcher + 'static, datastore: Arc<Datastore>) -> Self {
        CardKingdom {
            fetcher: Box::new(fetcher),
            datastore,
            pricelist_url: "https://api.cardkingdom.com/api/pricelist".to_string(),
            preprocessor: StandardPreprocessor {
                drop_non_english: true,
                drop_non_single: true,
            },
            grading: DefaultGrading,
            info: ScraperInfo {
                name: "Card Kingdom".to_string(),
                shorthand: "CK".to_string(),
                inventory_timestamp: None,
                buylist_timestamp: None,
                no_quantity: false,
                metadata_only: false,
                country_flag: String::new(),
                no_credit: false,
                sealed_mode: false,
            },
            inventory: None,
            buylist: None,
        }
    }

    fn row_to_loose(&self, row: &CkRow) -> Option<mtgmatch_core::matcher::LooseCard> {
        if let Some(fixed) = SKU_FIXUPS.get(row.sku.as_str()) {
            return Some(
                mtgmatch_core::matcher::LooseCard::new(*fixed)
                    .with_edition(row.edition.clone())
                    .with_foil(row.foil),
            );
        }
        let mut raw = RawRow::new(row.name.clone(), row.edition.clone());
        raw.foil = row.foil;
        let mut loose = self.preprocessor.process(&raw).ok()?;
        if let Some(number) = parse_sku_number(&row.sku) {
            loose.variation = if loose.variation.is_empty() {
                number
            } else {
                format!("{number} {}", loose.variation)
            };
        }
        Some(loose)
    }

    /// Fetches the combined pricelist once and fills both records, mirroring
    /// the original source's single `scrape()` feeding `ck.inventory` and
    /// `ck.buylist`.
    fn scrape(&mut self) -> anyhow::Result<()> {
        if self.inventory.is_some() && self.buylist.is_some() {
            return Ok(());
        }
        let body = self.fetcher.fetch(&self.pricelist_url)?;
        let rows: Vec<CkRow> = serde_json::from_str(&body)?;

        let mut inventory = InventoryRecord::new();
        let mut buylist = BuylistRecord::new();

        for row in &rows {
            let Some(mut loose) = self.row_to_loose(row) else {
                continue;
            };
            let id = match resolve(&self.datastore, &mut loose) {
                Ok(id) => id,
                Err(_) => continue,
            };

            if row.sell_qty > 0 && row.sell_price > 0.0 {
                inventory.add_relaxed(
                    &id,
                    InventoryEntry {
                        conditions: "NM".to_string(),
                        price: row.sell_price,
                        quantity: row.sell_qty,
                        url: format!("https://www.cardkingdom.com/mtg/{}", row.sku),
                        seller_name: "Card Kingdom".to_string(),
                        bundle: false,
                        original_id: Some(row.sku.clone()),
                        instance_id: None,
                    },
                );
            }

            if row.buy_qty > 0 && row.buy_price > 0.0 {
                let buy_price = row.buy_price * self.grading.multiplier("NM");
                // `price / sellPrice * 100` and `buyQty / sellQty * 100`,
                // the original source's `priceRatio`/`qtyRatio` — only
                // meaningful when Card Kingdom is also buying the card it
                // sells, so both stay `None` otherwise.
                let price_ratio = (row.sell_price > 0.0).then(|| buy_price / row.sell_price * 100.0);
                let quantity_ratio =
                    (row.sell_qty > 0).then(|| row.buy_qty as f64 / row.sell_qty as f64 * 100.0);
                buylist.add_relaxed(
                    &id,
                    BuylistEntry {
                        conditions: "NM".to_string(),
                        buy_price,
                        trade_price: buy_price * TRADE_PRICE_RATIO,
                        quantity: row.buy_qty,
                        url: format!("https://www.cardkingdom.com/purchasing/mtg_singles?{}", row.sku),
                        vendor_name: "Card Kingdom".to_string(),
                        trade_ratio: TRADE_PRICE_RATIO,
                        price_ratio,
                        quantity_ratio,
                        original_id: Some(row.sku.clone()),
                    },
                );
            }
        }

        self.inventory = Some(inventory);
        self.buylist = Some(buylist);
        Ok(())
    }
}

impl Scraper for CardKingdom {
    fn info(&self) -> &ScraperInfo {
        &self.info
    }
}

impl Seller for CardKingdom {
    fn inventory(&mut self) -> anyhow::Result<InventoryRecord> {
        self.scrape()?;
        Ok(self.inventory.clone().expect("scrape populates inventory"))
    }
}

impl Vendor for CardKingdom {
    fn buylist(&mut self) -> anyhow::Result<BuylistRecord> {
        self.scrape()?;
        Ok(self.buylist.clone().expect("scrape populates buylist"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mtgmatch_core::reference::schema::{CardObject, ReferenceFile, SetObject};

    fn sample_datastore() -> Arc<Datastore> {
        let mut file: ReferenceFile = ReferenceFile::new();
        file.insert(
            "ELD".to_string(),
            SetObject {
                name: "Throne of Eldraine".to_string(),
                release_date: "2019-10-04".to_string(),
                cards: vec![CardObject {
                    name: "Sorcerous Spyglass".to_string(),
                    number: "209".to_string(),
                    uuid: "ck-test-0001".to_string(),
                    scryfall_id: None,
                    foreign_data: vec![],
                    printings: vec!["ELD".to_string()],
                    promo_types: vec![],
                    border_color: "black".to_string(),
                    frame_effects: vec![],
                    layout: "normal".to_string(),
                    is_alternative: false,
                    flavor_name: None,
                    face_name: None,
                    variations: vec![],
                    side: None,
                    has_foil: true,
                    has_non_foil: true,
                    language: "English".to_string(),
                }],
                is_online_only: false,
                is_foil_only: false,
            },
        );
        Arc::new(Datastore::build(&file))
    }

    #[test]
    fn inventory_resolves_rows_into_canonical_ids() {
        let body = serde_json::json!([
            {"sku": "ELD-209-NM", "name": "Sorcerous Spyglass", "edition": "Throne of Eldraine",
             "foil": false, "sellPrice": 6.99, "sellQty": 4, "buyPrice": 0.0, "buyQty": 0}
        ])
        .to_string();
        let fetcher = crate::fetch::StaticFetcher::new().with("https://api.cardkingdom.com/api/pricelist", body);
        let mut ck = CardKingdom::new(fetcher, sample_datastore());
        let record = ck.inventory().unwrap();
        assert_eq!(record.get("ck-test-0001").len(), 1);
        assert_eq!(record.get("ck-test-0001")[0].price, 6.99);
    }

    #[test]
    fn buylist_applies_the_trade_price_ratio() {
        let body = serde_json::json!([
            {"sku": "ELD-209-NM", "name": "Sorcerous Spyglass", "edition": "Throne of Eldraine",
             "foil": false, "sellPrice": 0.0, "sellQty": 0, "buyPrice": 3.0, "buyQty": 10}
        ])
        .to_string();
        let fetcher = crate::fetch::StaticFetcher::new().with("https://api.cardkingdom.com/api/pricelist", body);
        let mut ck = CardKingdom::new(fetcher, sample_datastore());
        let record = ck.buylist().unwrap();
        let entry = &record.get("ck-test-0001")[0];
        assert_eq!(entry.trade_price, entry.buy_price * 1.3);
        assert!(entry.price_ratio.is_none());
    }

    #[test]
    fn buylist_computes_price_and_quantity_ratios_against_the_sell_side() {
        let body = serde_json::json!([
            {"sku": "ELD-209-NM", "name": "Sorcerous Spyglass", "edition": "Throne of Eldraine",
             "foil": false, "sellPrice": 10.0, "sellQty": 8, "buyPrice": 4.0, "buyQty": 2}
        ])
        .to_string();
        let fetcher = crate::fetch::StaticFetcher::new().with("https://api.cardkingdom.com/api/pricelist", body);
        let mut ck = CardKingdom::new(fetcher, sample_datastore());
        let record = ck.buylist().unwrap();
        let entry = &record.get("ck-test-0001")[0];
        // buy_price after grading (NM, 1.0x) is 4.0; ratio = 4.0 / 10.0 * 100
        assert_eq!(entry.price_ratio, Some(40.0));
        assert_eq!(entry.quantity_ratio, Some(25.0));

        let inventory = ck.inventory().unwrap();
        assert_eq!(inventory.get("ck-test-0001").len(), 1);
        assert_eq!(inventory.get("ck-test-0001")[0].price, 10.0);
    }
}

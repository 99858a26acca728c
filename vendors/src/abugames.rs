//! ABU Games adapter, grounded on
//! `examples/original_source/abugames/preprocess.go`: a vendor-local name
//! fixup table (`cardTable`), promo-tag detection scanning the parsed
//! variation text (`promoTags`), and the shared language/single-product
//! row filtering every preprocessor in that file applies before matching.

use crate::fetch::Fetcher;
use mtgmatch_core::adapter::{ScraperInfo, Scraper, Seller};
use mtgmatch_core::fixups::{resolve_name, FixupTable, StaticFixupTable};
use mtgmatch_core::matcher::resolve;
use mtgmatch_core::preprocess::{Preprocessor, RawRow, StandardPreprocessor};
use mtgmatch_core::reference::Datastore;
use mtgmatch_core::store::{InventoryEntry, InventoryRecord};
use serde::Deserialize;
use std::sync::Arc;

/// Variation keywords that mark a listing as some kind of promo, scanned
/// after name/variant parsing rather than before (`promoTags` in the
/// original source).
const PROMO_TAGS: &[&str] = &["promo", "prerelease", "release", "fnm", "judge", "arena"];

#[derive(Debug, Deserialize)]
struct AbuRow {
    name: String,
    edition: String,
    #[serde(default)]
    foil: bool,
    price: f64,
    #[serde(default)]
    qty: u32,
}

pub struct AbuGames {
    fetcher: Box<dyn Fetcher>,
    datastore: Arc<Datastore>,
    inventory_url: String,
    preprocessor: StandardPreprocessor,
    card_table: StaticFixupTable,
    info: ScraperInfo,
}

impl AbuGames {
    pub fn new(fetcher: impl Fetcher + 'static, datastore: Arc<Datastore>) -> Self {
        AbuGames {
            fetcher: Box::new(fetcher),
            datastore,
            inventory_url: "https://www.abugames.com/api/inventory".to_string(),
            preprocessor: StandardPreprocessor {
                drop_non_english: true,
                drop_non_single: true,
            },
            // A handful of ABU-specific name mangles, standing in for
            // `cardTable` in the original source.
            card_table: StaticFixupTable::new([(
                "Jace, the Mind Sculptor (JTMS)",
                "Jace, the Mind Sculptor",
            )]),
            info: ScraperInfo {
                name: "ABU Games".to_string(),
                shorthand: "ABU".to_string(),
                inventory_timestamp: None,
                buylist_timestamp: None,
                no_quantity: false,
                metadata_only: false,
                country_flag: String::new(),
                no_credit: false,
                sealed_mode: false,
            },
        }
    }

    fn row_to_loose(&self, row: &AbuRow) -> Option<mtgmatch_core::matcher::LooseCard> {
        let fixup_table: &dyn FixupTable = &self.card_table;
        let resolved_name = resolve_name(&row.name, Some(fixup_table));
        let mut raw = RawRow::new(resolved_name, row.edition.clone());
        raw.foil = row.foil;
        let mut loose = self.preprocessor.process(&raw).ok()?;
        let tagged = PROMO_TAGS.iter().any(|tag| {
            mtgmatch_core::text::contains(&loose.variation, tag)
                || mtgmatch_core::text::contains(&loose.edition, tag)
        });
        if tagged {
            loose.promo = true;
        }
        Some(loose)
    }
}

impl Scraper for AbuGames {
    fn info(&self) -> &ScraperInfo {
        &self.info
    }
}

impl Seller for AbuGames {
    fn inventory(&mut self) -> anyhow::Result<InventoryRecord> {
        let body = self.fetcher.fetch(&self.inventory_url)?;
        let rows: Vec<AbuRow> = serde_json::from_str(&body)?;
        let mut record = InventoryRecord::new();
        for row in &rows {
            let Some(mut loose) = self.row_to_loose(row) else {
                continue;
            };
            let id = match resolve(&self.datastore, &mut loose) {
                Ok(id) => id,
                Err(_) => continue,
            };
            record.add_relaxed(
                &id,
                InventoryEntry {
                    conditions: "NM".to_string(),
                    price: row.price,
                    quantity: row.qty,
                    url: self.inventory_url.clone(),
                    seller_name: "ABU Games".to_string(),
                    bundle: false,
                    original_id: None,
                    instance_id: None,
                },
            );
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mtgmatch_core::reference::schema::{CardObject, ReferenceFile, SetObject};

    fn sample_datastore() -> Arc<Datastore> {
        let mut file: ReferenceFile = ReferenceFile::new();
        file.insert(
            "WWK".to_string(),
            SetObject {
                name: "Worldwake".to_string(),
                release_date: "2010-02-05".to_string(),
                cards: vec![CardObject {
                    name: "Jace, the Mind Sculptor".to_string(),
                    number: "31".to_string(),
                    uuid: "abu-test-0001".to_string(),
                    scryfall_id: None,
                    foreign_data: vec![],
                    printings: vec!["WWK".to_string()],
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
    fn vendor_fixup_table_resolves_a_mangled_name() {
        let body = serde_json::json!([
            {"name": "Jace, the Mind Sculptor (JTMS)", "edition": "Worldwake", "foil": false, "price": 80.0, "qty": 1}
        ])
        .to_string();
        let fetcher = crate::fetch::StaticFetcher::new().with("https://www.abugames.com/api/inventory", body);
        let mut abu = AbuGames::new(fetcher, sample_datastore());
        let record = abu.inventory().unwrap();
        assert_eq!(record.get("abu-test-0001").len(), 1);
    }
}

//! Jupiter Games adapter, grounded on
//! `examples/original_source/jupitergames.go`: a bounded worker-pool crawl
//! across several buylist pages, pipe-delimited rows, a flat grading curve
//! (no condition discount), and a 1.25x trade price ratio — distinct from
//! Card Kingdom's and Channel Fireball's 1.3x.

use crate::fetch::Fetcher;
use mtgmatch_core::adapter::{FlatGrading, Grading, ScraperInfo, Scraper, Vendor};
use mtgmatch_core::matcher::resolve;
use mtgmatch_core::preprocess::{Preprocessor, RawRow, StandardPreprocessor};
use mtgmatch_core::reference::Datastore;
use mtgmatch_core::runtime::RuntimeConfig;
use mtgmatch_core::store::{BuylistEntry, BuylistRecord};
use std::sync::Arc;

const TRADE_PRICE_RATIO: f64 = 1.25;

struct JgRow {
    name: String,
    price: f64,
    quantity: u32,
}

fn parse_body(body: &str) -> Vec<JgRow> {
    body.lines()
        .filter_map(|line| {
            let mut parts = line.splitn(3, '|');
            let name = parts.next()?.trim().to_string();
            let price: f64 = parts.next()?.trim().parse().ok()?;
            let quantity: u32 = parts.next()?.trim().parse().ok()?;
            if name.is_empty() {
                return None;
            }
            Some(JgRow { name, price, quantity })
        })
        .collect()
}

pub struct JupiterGames {
    fetcher: Box<dyn Fetcher>,
    datastore: Arc<Datastore>,
    page_urls: Vec<String>,
    preprocessor: StandardPreprocessor,
    runtime: RuntimeConfig,
    info: ScraperInfo,
}

impl JupiterGames {
    pub fn new(fetcher: impl Fetcher + 'static, datastore: Arc<Datastore>, page_urls: Vec<String>) -> Self {
        JupiterGames {
            fetcher: Box::new(fetcher),
            datastore,
            page_urls,
            preprocessor: StandardPreprocessor {
                drop_non_english: true,
                drop_non_single: true,
            },
            // Jupiter Games' crawl queue defaults to 8 concurrent workers,
            // the same width `Jupitergames.MaxConcurrency` defaults to in
            // the original source.
            runtime: RuntimeConfig {
                max_concurrency: 8,
                show_progress: false,
                ..Default::default()
            },
            info: ScraperInfo {
                name: "Jupiter Games".to_string(),
                shorthand: "JG".to_string(),
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

    pub fn with_runtime(mut self, runtime: RuntimeConfig) -> Self {
        self.runtime = runtime;
        self
    }

    fn fetch_and_parse_page(&self, url: &str) -> Vec<(String, BuylistEntry)> {
        let Ok(body) = self.fetcher.fetch(url) else {
            return Vec::new();
        };
        parse_body(&body)
            .into_iter()
            .filter_map(|row| {
                let raw = RawRow::new(row.name.clone(), String::new());
                let mut loose = self.preprocessor.process(&raw).ok()?;
                let id = resolve(&self.datastore, &mut loose).ok()?;
                let buy_price = row.price * FlatGrading.multiplier("NM");
                Some((
                    id,
                    BuylistEntry {
                        conditions: "NM".to_string(),
                        buy_price,
                        trade_price: buy_price * TRADE_PRICE_RATIO,
                        quantity: row.quantity,
                        url: url.to_string(),
                        vendor_name: "Jupiter Games".to_string(),
                        trade_ratio: TRADE_PRICE_RATIO,
                        price_ratio: None,
                        quantity_ratio: None,
                        original_id: None,
                    },
                ))
            })
            .collect()
    }
}

impl Scraper for JupiterGames {
    fn info(&self) -> &ScraperInfo {
        &self.info
    }
}

impl Vendor for JupiterGames {
    fn buylist(&mut self) -> anyhow::Result<BuylistRecord> {
        let pages = mtgmatch_core::runtime::run_pool(&self.page_urls, &self.runtime, |url| {
            self.fetch_and_parse_page(url)
        })?;

        let mut record = BuylistRecord::new();
        for page in pages {
            for (id, entry) in page {
                record.add_relaxed(&id, entry);
            }
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
            "LEA".to_string(),
            SetObject {
                name: "Limited Edition Alpha".to_string(),
                release_date: "1993-08-05".to_string(),
                cards: vec![CardObject {
                    name: "Lightning Bolt".to_string(),
                    number: "161".to_string(),
                    uuid: "jg-test-0001".to_string(),
                    scryfall_id: None,
                    foreign_data: vec![],
                    printings: vec!["LEA".to_string()],
                    promo_types: vec![],
                    border_color: "black".to_string(),
                    frame_effects: vec![],
                    layout: "normal".to_string(),
                    is_alternative: false,
                    flavor_name: None,
                    face_name: None,
                    variations: vec![],
                    side: None,
                    has_foil: false,
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
    fn buylist_merges_results_from_every_page() {
        let datastore = sample_datastore();
        let fetcher = crate::fetch::StaticFetcher::new()
            .with("https://jupitergames.test/buylist?page=1", "Lightning Bolt|5.00|3")
            .with("https://jupitergames.test/buylist?page=2", "Lightning Bolt|5.00|2");
        let urls = vec![
            "https://jupitergames.test/buylist?page=1".to_string(),
            "https://jupitergames.test/buylist?page=2".to_string(),
        ];
        let mut jg = JupiterGames::new(fetcher, datastore, urls);
        let record = jg.buylist().unwrap();
        assert_eq!(record.get("jg-test-0001").len(), 1);
        assert_eq!(record.get("jg-test-0001")[0].quantity, 5);
        assert_eq!(record.get("jg-test-0001")[0].trade_price, 5.0 * 1.25);
    }
}

//! Channel Fireball adapter, grounded on
//! `examples/original_source/channelfireball.go`: a buylist fanned out
//! across one fetch per condition ("channel"), `SplitVariants`-parsed
//! names, a date-bucketed grading curve, and a 1.3x trade price ratio.

use crate::fetch::Fetcher;
use mtgmatch_core::adapter::{DateBucketedGrading, Grading, ScraperInfo, Scraper, Vendor};
use mtgmatch_core::matcher::resolve;
use mtgmatch_core::preprocess::{Preprocessor, RawRow, StandardPreprocessor};
use mtgmatch_core::reference::Datastore;
use mtgmatch_core::store::{BuylistEntry, BuylistRecord};
use std::sync::Arc;

const TRADE_PRICE_RATIO: f64 = 1.3;

/// The conditions Channel Fireball buys at, one fetch per channel
/// (`channelfireball.go`'s per-condition page crawl).
const CHANNELS: &[&str] = &["NM", "LP", "MP", "HP"];

struct CfxRow {
    name: String,
    price: f64,
    quantity: u32,
}

fn parse_body(body: &str) -> Vec<CfxRow> {
    body.lines()
        .filter_map(|line| {
            let mut parts = line.splitn(3, '|');
            let name = parts.next()?.trim().to_string();
            let price: f64 = parts.next()?.trim().parse().ok()?;
            let quantity: u32 = parts.next()?.trim().parse().ok()?;
            if name.is_empty() {
                return None;
            }
            Some(CfxRow { name, price, quantity })
        })
        .collect()
}

pub struct ChannelFireball {
    fetcher: Box<dyn Fetcher>,
    datastore: Arc<Datastore>,
    base_url: String,
    preprocessor: StandardPreprocessor,
    info: ScraperInfo,
}

impl ChannelFireball {
    pub fn new(fetcher: impl Fetcher + 'static, datastore: Arc<Datastore>) -> Self {
        ChannelFireball {
            fetcher: Box::new(fetcher),
            datastore,
            base_url: "https://www.channelfireball.com/buylist".to_string(),
            preprocessor: StandardPreprocessor {
                drop_non_english: true,
                drop_non_single: true,
            },
            info: ScraperInfo {
                name: "Channel Fireball".to_string(),
                shorthand: "CFB".to_string(),
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

    fn channel_url(&self, condition: &str) -> String {
        format!("{}?condition={condition}", self.base_url)
    }

    fn release_year(&self, canonical_id: &str) -> i32 {
        let base_id = canonical_id
            .trim_end_matches("_etched")
            .trim_end_matches("_f")
            .trim_end_matches("_jpn")
            .trim_end_matches("_ita");
        self.datastore
            .get_uuid(base_id)
            .ok()
            .and_then(|printing| self.datastore.get_set(&printing.set_code).ok())
            .and_then(|set| set.release_date.get(0..4))
            .and_then(|year| year.parse().ok())
            .unwrap_or(2020)
    }
}

impl Scraper for ChannelFireball {
    fn info(&self) -> &ScraperInfo {
        &self.info
    }
}

impl Vendor for ChannelFireball {
    fn buylist(&mut self) -> anyhow::Result<BuylistRecord> {
        let mut record = BuylistRecord::new();
        for &condition in CHANNELS {
            let url = self.channel_url(condition);
            let body = self.fetcher.fetch(&url)?;
            for row in parse_body(&body) {
                let raw = RawRow::new(row.name.clone(), String::new());
                let Ok(mut loose) = self.preprocessor.process(&raw) else {
                    continue;
                };
                let id = match resolve(&self.datastore, &mut loose) {
                    Ok(id) => id,
                    Err(_) => continue,
                };
                let grading = DateBucketedGrading {
                    release_year: self.release_year(&id),
                };
                let buy_price = row.price * grading.multiplier(condition);
                record.add_relaxed(
                    &id,
                    BuylistEntry {
                        conditions: condition.to_string(),
                        buy_price,
                        trade_price: buy_price * TRADE_PRICE_RATIO,
                        quantity: row.quantity,
                        url: url.clone(),
                        vendor_name: "Channel Fireball".to_string(),
                        trade_ratio: TRADE_PRICE_RATIO,
                        price_ratio: None,
                        quantity_ratio: None,
                        original_id: None,
                    },
                );
            }
        }
        Ok(record)
    }
}

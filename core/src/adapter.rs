//! Component G — the vendor adapter trait surface (spec.md §4.G),
//! translated from the `Scraper`/`Seller`/`Vendor`/`Market` interfaces and
//! `ScraperInfo`/`DefaultGrading` in
//! `examples/original_source/mtgban/mtgban.go`.

use crate::store::{BuylistRecord, InventoryRecord};
use chrono::{DateTime, Utc};

/// Static identity and capability flags for one vendor adapter (spec.md
/// §3 `ScraperInfo`).
#[derive(Debug, Clone)]
pub struct ScraperInfo {
    pub name: String,
    pub shorthand: String,
    /// ISO country code or emoji flag identifying the vendor's home
    /// market, shown alongside `name` by orchestrators (spec.md §3
    /// `countryFlag`). Empty for vendors with no single home market.
    pub country_flag: String,
    pub inventory_timestamp: Option<DateTime<Utc>>,
    pub buylist_timestamp: Option<DateTime<Utc>>,
    /// Set when a vendor only reports prices, never stock levels
    /// (`NoQuantityInventory` in the original source).
    pub no_quantity: bool,
    /// Set when a vendor is a price index with no purchasable inventory
    /// of its own (`MetadataOnly`).
    pub metadata_only: bool,
    /// Set when a vendor's buylist pays cash only, no store-credit/trade
    /// premium to report (`NoCredit`).
    pub no_credit: bool,
    /// Set when a vendor's listings are sealed product rather than
    /// singles (`SealedMode`); such adapters skip the matcher entirely.
    pub sealed_mode: bool,
}

/// Every adapter, seller or vendor, exposes its static identity.
pub trait Scraper {
    fn info(&self) -> &ScraperInfo;
}

/// An adapter that sells singles (spec.md §4.G). `inventory` is expected to
/// memoize: the original source's `BaseSeller` fetches once and caches,
/// and implementors here should do the same around their own fetch calls.
pub trait Seller: Scraper {
    fn inventory(&mut self) -> anyhow::Result<InventoryRecord>;

    /// A single seller's slice of a marketplace-shaped inventory, e.g. one
    /// storefront on a multi-seller index (`InventoryForSeller` in the
    /// original source). The default filters the full inventory by
    /// `seller_name`; marketplace adapters that index many storefronts
    /// should override this with a cheaper, already-partitioned lookup.
    fn inventory_for_seller(&mut self, seller_name: &str) -> anyhow::Result<InventoryRecord> {
        let full = self.inventory()?;
        let mut filtered = InventoryRecord::new();
        for id in full.ids() {
            for entry in full.get(id) {
                if entry.seller_name == seller_name {
                    filtered.add_relaxed(id, entry.clone());
                }
            }
        }
        Ok(filtered)
    }
}

/// An adapter that buys singles.
pub trait Vendor: Scraper {
    fn buylist(&mut self) -> anyhow::Result<BuylistRecord>;
}

/// An adapter that does both (most scrapers are one or the other; a few,
/// like cardkingdom, are both at once).
pub trait Market: Seller + Vendor {}

impl<T: Seller + Vendor> Market for T {}

/// Adapters whose inventory fetch needs an explicit kickoff distinct from
/// the lazy-on-first-call default (e.g. authenticating, or priming a
/// paginated crawl) implement this instead of relying on `inventory`'s own
/// memoization.
pub trait InventoryInitializer: Seller {
    fn initialize_inventory(&mut self) -> anyhow::Result<()>;
}

/// Symmetric hook for buylist-side adapters.
pub trait BuylistInitializer: Vendor {
    fn initialize_buylist(&mut self) -> anyhow::Result<()>;
}

/// A condition-to-price-multiplier curve (spec.md §4.G `Grading`).
/// Vendors differ in how harshly they discount played copies; this crate
/// ships the three shapes observed across the original source's adapters
/// rather than hardcoding one.
pub trait Grading: Send + Sync {
    fn multiplier(&self, conditions: &str) -> f64;
}

/// The common "near mint full price, increasingly discounted below that"
/// curve most vendors use (`DefaultGrading` in the original source).
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultGrading;

impl Grading for DefaultGrading {
    fn multiplier(&self, conditions: &str) -> f64 {
        match conditions {
            "NM" => 1.0,
            "LP" => 0.9,
            "MP" => 0.75,
            "HP" => 0.6,
            "DMG" | "PO" => 0.4,
            _ => 1.0,
        }
    }
}

/// A vendor that pays the same regardless of condition (jupitergames'
/// buylist curve in the original source).
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatGrading;

impl Grading for FlatGrading {
    fn multiplier(&self, _conditions: &str) -> f64 {
        1.0
    }
}

/// A curve whose discount steepness depends on how old the printing is —
/// older cards are assumed scarcer in low grades, so the discount is
/// gentler (channelfireball's date-bucketed curve in the original
/// source).
#[derive(Debug, Clone, Copy)]
pub struct DateBucketedGrading {
    pub release_year: i32,
}

impl Grading for DateBucketedGrading {
    fn multiplier(&self, conditions: &str) -> f64 {
        let vintage = self.release_year < 2000;
        match (conditions, vintage) {
            ("NM", _) => 1.0,
            ("LP", true) => 0.95,
            ("LP", false) => 0.9,
            ("MP", true) => 0.85,
            ("MP", false) => 0.75,
            ("HP", true) => 0.7,
            ("HP", false) => 0.6,
            ("DMG", true) | ("PO", true) => 0.5,
            ("DMG", false) | ("PO", false) => 0.4,
            _ => 1.0,
        }
    }
}

/// Vendors that support building a purchase cart before checkout
/// (spec.md §4.G, cart `Activate`/`Add` extension points).
pub trait Cart {
    /// Authenticate/open a session, if the vendor requires one before
    /// items can be added.
    fn activate(&mut self) -> anyhow::Result<()>;

    fn add(&mut self, id: &str, quantity: u32) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grading_discounts_played_copies() {
        let g = DefaultGrading;
        assert_eq!(g.multiplier("NM"), 1.0);
        assert!(g.multiplier("HP") < g.multiplier("LP"));
    }

    #[test]
    fn flat_grading_never_discounts() {
        let g = FlatGrading;
        assert_eq!(g.multiplier("DMG"), 1.0);
    }

    #[test]
    fn date_bucketed_grading_is_gentler_for_vintage() {
        let vintage = DateBucketedGrading { release_year: 1994 };
        let modern = DateBucketedGrading { release_year: 2020 };
        assert!(vintage.multiplier("HP") > modern.multiplier("HP"));
    }
}

//! Component I — shared preprocessing helpers (spec.md §4.I), grounded on
//! `preprocess()` in `examples/original_source/abugames/preprocess.go`
//! (language/single filtering, `SplitVariants`-based name parsing, promo
//! tagging) and the token/checklist row filtering in
//! `examples/original_source/cardkingdom.go`.

use crate::matcher::LooseCard;
use crate::text::split_variants;

/// Why a raw vendor row never became a [`LooseCard`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NonEnglish,
    NonSingle,
    Token,
    Checklist,
    Unparseable(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NonEnglish => write!(f, "non-English row"),
            SkipReason::NonSingle => write!(f, "non-single product row"),
            SkipReason::Token => write!(f, "token row"),
            SkipReason::Checklist => write!(f, "checklist row"),
            SkipReason::Unparseable(reason) => write!(f, "unparseable row: {reason}"),
        }
    }
}

/// A vendor's raw listing row, before it becomes a [`LooseCard`].
#[derive(Debug, Clone)]
pub struct RawRow {
    pub name: String,
    pub edition: String,
    pub foil: bool,
    pub language: String,
    pub is_single: bool,
}

impl RawRow {
    pub fn new(name: impl Into<String>, edition: impl Into<String>) -> Self {
        RawRow {
            name: name.into(),
            edition: edition.into(),
            foil: false,
            language: "English".to_string(),
            is_single: true,
        }
    }
}

/// Turns one vendor's raw rows into [`LooseCard`]s, applying whatever
/// filtering and per-row parsing that vendor needs (spec.md §4.I).
pub trait Preprocessor {
    fn process(&self, row: &RawRow) -> Result<LooseCard, SkipReason>;
}

pub(crate) fn is_checklist_row(name: &str) -> bool {
    crate::text::contains(name, "checklist")
}

pub(crate) fn is_token_row(name: &str) -> bool {
    crate::text::contains(name, "token") || crate::text::contains(name, "emblem")
}

/// The filtering/parsing every vendor needs at minimum: drop sealed
/// product, token, and checklist rows, then split the name on its
/// parenthetical variant tags. Concrete adapters wrap this and layer their
/// own typo tables and edition rewrites on top (spec.md §4.I, §4.D).
#[derive(Debug, Clone, Default)]
pub struct StandardPreprocessor {
    pub drop_non_english: bool,
    pub drop_non_single: bool,
}

impl Preprocessor for StandardPreprocessor {
    fn process(&self, row: &RawRow) -> Result<LooseCard, SkipReason> {
        if self.drop_non_english && row.language != "English" {
            return Err(SkipReason::NonEnglish);
        }
        if self.drop_non_single && !row.is_single {
            return Err(SkipReason::NonSingle);
        }
        if is_checklist_row(&row.name) {
            return Err(SkipReason::Checklist);
        }
        if is_token_row(&row.name) {
            return Err(SkipReason::Token);
        }

        let mut parts = split_variants(&row.name);
        if parts.is_empty() || parts[0].is_empty() {
            return Err(SkipReason::Unparseable(row.name.clone()));
        }
        let name = parts.remove(0);
        let variation = parts.join(" ");

        let mut loose = LooseCard::new(name)
            .with_edition(row.edition.clone())
            .with_variation(variation)
            .with_foil(row.foil);
        loose.promo = loose.contains("promo");
        Ok(loose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_parenthetical_variants_off_the_name() {
        let pp = StandardPreprocessor::default();
        let row = RawRow::new("Oko, Thief of Crowns (Borderless) (Showcase)", "Throne of Eldraine");
        let loose = pp.process(&row).unwrap();
        assert_eq!(loose.name, "Oko, Thief of Crowns");
        assert_eq!(loose.variation, "Borderless Showcase");
    }

    #[test]
    fn drops_token_and_checklist_rows() {
        let pp = StandardPreprocessor::default();
        assert_eq!(
            pp.process(&RawRow::new("Soldier Token", "War of the Spark")),
            Err(SkipReason::Token)
        );
        assert_eq!(
            pp.process(&RawRow::new("Checklist", "War of the Spark")),
            Err(SkipReason::Checklist)
        );
    }

    #[test]
    fn drops_non_english_rows_when_configured() {
        let pp = StandardPreprocessor {
            drop_non_english: true,
            drop_non_single: false,
        };
        let mut row = RawRow::new("Lightning Bolt", "Limited Edition Alpha");
        row.language = "Japanese".to_string();
        assert_eq!(pp.process(&row), Err(SkipReason::NonEnglish));
    }
}

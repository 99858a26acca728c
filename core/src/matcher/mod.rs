//! Component E — the identity matcher (spec.md §4.E), the heart of the crate.
//!
//! The entry point is [`Match::resolve`]. Its shape is translated directly
//! from `Match` in `examples/original_source/mtgmatcher/mtgmatcher.go`:
//! direct id lookup, name lookup with one `adjustName` retry, edition
//! normalization, a printings filter, three-pass edition selection, and a
//! final within-set disambiguation pass.

mod adjust;
mod filters;
mod predicates;

pub use adjust::{adjust_edition, adjust_name};
pub use filters::{differ_only_by_number, filter_cards, filter_printings};

use crate::reference::{is_unsupported_layout, Datastore, DatastoreError, Printing};
use crate::text::normalize;
use thiserror::Error;

/// A loosely-described card, as handed to the matcher by a preprocessor
/// (spec.md §3 `LooseCard`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LooseCard {
    pub name: String,
    pub edition: String,
    pub variation: String,
    pub foil: bool,
    pub promo: bool,
    pub maybe_prefix: bool,
    pub id: Option<String>,
}

impl LooseCard {
    pub fn new(name: impl Into<String>) -> Self {
        LooseCard {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_edition(mut self, edition: impl Into<String>) -> Self {
        self.edition = edition.into();
        self
    }

    pub fn with_variation(mut self, variation: impl Into<String>) -> Self {
        self.variation = variation.into();
        self
    }

    pub fn with_foil(mut self, foil: bool) -> Self {
        self.foil = foil;
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_maybe_prefix(mut self, maybe_prefix: bool) -> Self {
        self.maybe_prefix = maybe_prefix;
        self
    }

    /// Append a token to the variation field, preserving any existing
    /// contents (`Card.addToVariant` in the original source).
    pub(crate) fn add_to_variant(&mut self, token: &str) {
        if token.is_empty() {
            return;
        }
        if self.variation.is_empty() {
            self.variation = token.to_string();
        } else {
            self.variation = format!("{} {}", token, self.variation);
        }
    }

    pub(crate) fn contains(&self, needle: &str) -> bool {
        crate::text::contains(&self.edition, needle) || crate::text::contains(&self.variation, needle)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("reference datastore is empty")]
    DatastoreEmpty,
    #[error("card does not exist: {0}")]
    CardDoesNotExist(String),
    #[error("unknown card id: {0}")]
    CardUnknownId(String),
    #[error("card not in edition: {name} ({edition})")]
    CardNotInEdition { name: String, edition: String },
    #[error("card {0} requires a variant to disambiguate, none given")]
    CardMissingVariant(String),
    #[error("card {0} variant did not match any printing")]
    CardWrongVariant(String),
    #[error("aliasing: {0} candidates remain indistinguishable")]
    Aliasing(Vec<String>),
    #[error("unsupported card: {0}")]
    Unsupported(String),
}

impl From<DatastoreError> for MatchError {
    fn from(e: DatastoreError) -> Self {
        match e {
            DatastoreError::Empty => MatchError::DatastoreEmpty,
            other => MatchError::CardDoesNotExist(other.to_string()),
        }
    }
}

/// Canonical id suffix for a printing's language, per spec.md §6 ordering
/// (language, then foil, then etched).
fn language_suffix(language: &str) -> &'static str {
    match language {
        "Japanese" => "_jpn",
        "Italian" => "_ita",
        "English" | "" => "",
        _ => "",
    }
}

/// Compose the canonical id for a resolved printing (spec.md §4.E "output").
pub fn output(printing: &Printing, foil_requested: bool) -> String {
    let mut id = printing.id.clone();
    id.push_str(language_suffix(&printing.language));
    if foil_requested && printing.has_foil && printing.has_non_foil {
        id.push_str("_f");
    }
    if printing
        .promo_types
        .iter()
        .any(|p| p.eq_ignore_ascii_case("etched"))
    {
        id.push_str("_etched");
    }
    id
}

/// All printings named `name` (pre-canonicalized) within `set_code`,
/// dataset order preserved (`matchInSet` in the original source).
pub(crate) fn match_in_set<'d>(ds: &'d Datastore, set_code: &str, name: &str) -> Vec<&'d Printing> {
    let Ok(set) = ds.get_set(set_code) else {
        return Vec::new();
    };
    set.card_ids
        .iter()
        .filter_map(|id| ds.get_uuid(id).ok())
        .filter(|p| p.name == name)
        .collect()
}

/// Resolve a [`LooseCard`] to a canonical printing id (spec.md §4.E `Match`).
pub fn resolve(ds: &Datastore, loose: &mut LooseCard) -> Result<String, MatchError> {
    if !ds.is_loaded() {
        return Err(MatchError::DatastoreEmpty);
    }

    // 1. Direct id lookup.
    if let Some(id) = &loose.id {
        if let Ok(printing) = ds.get_uuid(id) {
            if printing.is_online_only_layout() {
                return Err(MatchError::Unsupported(printing.id.clone()));
            }
            return Ok(output(printing, loose.foil));
        }
    }

    // 2. Name lookup, retrying once through adjustName on a miss.
    let summary = match ds.get_card_summary(&normalize(&loose.name)) {
        Some(s) => s,
        None => {
            adjust_name(ds, loose);
            ds.get_card_summary(&normalize(&loose.name))
                .ok_or_else(|| MatchError::CardDoesNotExist(loose.name.clone()))?
        }
    };

    if is_unsupported_layout(&summary.layout) {
        return Err(MatchError::Unsupported(summary.name.clone()));
    }

    // 3. Canonicalize name.
    loose.name = summary.name.clone();
    let printings_of_card = summary.printings.clone();

    // 4. Edition normalization.
    adjust_edition(ds, loose);

    // 5. Printings filter.
    let candidate_sets = if printings_of_card.len() > 1 {
        let filtered = filter_printings(ds, loose, &printings_of_card);
        if filtered.is_empty() {
            return Err(MatchError::CardNotInEdition {
                name: loose.name.clone(),
                edition: loose.edition.clone(),
            });
        }
        filtered
    } else {
        printings_of_card
    };

    // 6. Edition selection: build setCode -> candidate printings.
    let mut by_set: Vec<(String, Vec<&Printing>)> = Vec::new();
    if candidate_sets.len() == 1 {
        by_set.push((
            candidate_sets[0].clone(),
            match_in_set(ds, &candidate_sets[0], &loose.name),
        ));
    } else {
        // First pass: exact edition name match.
        for set_code in &candidate_sets {
            if let Ok(set) = ds.get_set(set_code) {
                if crate::text::equals(&set.name, &loose.edition) {
                    by_set.push((set_code.clone(), match_in_set(ds, set_code, &loose.name)));
                }
            }
        }
        // Second pass: substring heuristic, plus generic-promo/Promos suffix rule.
        if by_set.is_empty() {
            for set_code in &candidate_sets {
                if let Ok(set) = ds.get_set(set_code) {
                    let generic_promo_match =
                        loose.is_generic_promo() && set.name.ends_with("Promos");
                    if crate::text::contains(&set.name, &loose.edition) || generic_promo_match {
                        by_set.push((set_code.clone(), match_in_set(ds, set_code, &loose.name)));
                    }
                }
            }
        }
        // Third pass: YOLO, consider everything.
        if by_set.is_empty() {
            for set_code in &candidate_sets {
                by_set.push((set_code.clone(), match_in_set(ds, set_code, &loose.name)));
            }
        }
    }

    // 7. Within-set disambiguation.
    let single = by_set.len() == 1 && by_set[0].1.len() == 1;
    let mut out_cards: Vec<&Printing> = if single {
        vec![by_set[0].1[0]]
    } else {
        let merged: Vec<&Printing> = by_set.iter().flat_map(|(_, cards)| cards.iter().copied()).collect();
        filter_cards(loose, &merged)
    };

    // World-championship ties keep the first card by dataset order.
    if out_cards.len() > 1 && loose.is_world_champ() {
        out_cards.truncate(1);
    }

    // 8. Outcome. Multiple surviving printings that differ only by
    // collector number, with no number given in the loose card's
    // variation text, are a missing disambiguator rather than a true
    // alias (spec.md §8 scenario 1 vs. scenario 2): the loose card just
    // never told us which of "22a"/"22b" it meant. Printings that remain
    // tied after every predicate (e.g. several otherwise-identical
    // full-art basics) have nothing left to ask for, so those stay
    // `Aliasing`.
    match out_cards.len() {
        0 => Err(MatchError::CardWrongVariant(loose.name.clone())),
        1 => Ok(output(out_cards[0], loose.foil)),
        _ => {
            let number_given = !crate::text::extract_number(&loose.variation).is_empty();
            if !number_given && differ_only_by_number(&out_cards) {
                Err(MatchError::CardMissingVariant(loose.name.clone()))
            } else {
                Err(MatchError::Aliasing(
                    out_cards.iter().map(|p| output(p, loose.foil)).collect(),
                ))
            }
        }
    }
}

/// spec.md §4.A supplemented op: reverse lookup a canonical id back into a
/// loose-shaped description (`Unmatch` in `mtgmatcher/api.go`).
pub fn unmatch(ds: &Datastore, canonical_id: &str) -> Result<LooseCard, MatchError> {
    if !ds.is_loaded() {
        return Err(MatchError::DatastoreEmpty);
    }
    let base_id = canonical_id
        .trim_end_matches("_etched")
        .trim_end_matches("_f")
        .trim_end_matches("_jpn")
        .trim_end_matches("_ita");
    let printing = ds
        .get_uuid(base_id)
        .map_err(|_| MatchError::CardUnknownId(canonical_id.to_string()))?;
    let set = ds.get_set(&printing.set_code)?;
    Ok(LooseCard {
        name: printing.name.clone(),
        edition: set.name.clone(),
        variation: String::new(),
        foil: canonical_id.contains("_f"),
        promo: false,
        maybe_prefix: false,
        id: Some(printing.id.clone()),
    })
}

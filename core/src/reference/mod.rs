//! Component A — the reference dataset index (spec.md §4.A).
//!
//! Three immutable lookup tables built once from a parsed
//! [`schema::ReferenceFile`]: `by_id`, `by_set`, and `by_name`. Grounded on
//! `mtgmatcher/mtgmatcher.go`'s `backend.Sets` / `backend.Cards` / `backend.UUIDs`
//! globals in `examples/original_source/` — this crate trades the Go package-level
//! `var`s for an explicit, narrow-accessor `Datastore` struct per spec.md §9
//! ("Global state... expose via a narrow accessor surface").

pub mod schema;

use schema::ReferenceFile;
use std::collections::HashMap;
use thiserror::Error;

use crate::text::normalize;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum DatastoreError {
    /// The index has not been constructed yet, or construction was given
    /// an empty document. spec.md §4.A: "all reads return a datastore
    /// empty failure if construction has not occurred."
    #[error("reference datastore is empty")]
    Empty,
    #[error("unknown set code: {0}")]
    UnknownSet(String),
    #[error("unknown set name: {0}")]
    UnknownSetName(String),
    #[error("unknown printing id: {0}")]
    UnknownId(String),
}

/// One physical printing (spec.md §3 `Printing`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Printing {
    pub id: String,
    pub name: String,
    pub set_code: String,
    pub number: String,
    /// Set codes this card (by name) appears in across the whole dataset.
    pub printings: Vec<String>,
    pub promo_types: Vec<String>,
    pub border_color: String,
    pub frame_effects: Vec<String>,
    pub language: String,
    pub is_alternative: bool,
    pub flavor_name: Option<String>,
    pub face_name: Option<String>,
    pub layout: String,
    pub has_foil: bool,
    pub has_non_foil: bool,
}

impl Printing {
    pub fn is_online_only_layout(&self) -> bool {
        is_unsupported_layout(&self.layout)
    }
}

/// Layouts the matcher refuses to resolve (spec.md §4.E outcome
/// "Unsupported — layout or product-type excluded by design"): tokens,
/// art-series cards, and double-faced tokens aren't real game pieces a
/// vendor can hold inventory of.
pub fn is_unsupported_layout(layout: &str) -> bool {
    matches!(layout, "token" | "double_faced_token" | "art_series")
}

/// One set/edition (spec.md §3 `Set`, trimmed to what the matcher needs).
#[derive(Debug, Clone)]
pub struct Set {
    pub code: String,
    pub name: String,
    pub release_date: String,
    pub is_online_only: bool,
    pub is_foil_only: bool,
    /// Printing ids belonging to this set, dataset order preserved —
    /// matcher's "keep the first card by dataset order" tie-break
    /// (spec.md §4.E step 7) depends on this order being stable.
    pub card_ids: Vec<String>,
}

/// What `by_name` stores: the canonical name plus every set this name
/// appears in (spec.md §4.A `byNameNormalized[normName]→CardSummary`).
#[derive(Debug, Clone)]
pub struct CardSummary {
    pub name: String,
    pub printings: Vec<String>,
    pub layout: String,
}

#[derive(Debug, Default)]
pub struct Datastore {
    by_id: HashMap<String, Printing>,
    by_set: HashMap<String, Set>,
    by_set_name: HashMap<String, String>,
    by_name: HashMap<String, CardSummary>,
    loaded: bool,
}

impl Datastore {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the three indices from a parsed reference document. Every
    /// `CardObject` becomes one [`Printing`]; faces (`face_name`) and
    /// flavor names are indexed alongside the primary name so that
    /// "for multi-face cards, lookups by any face name succeed"
    /// (spec.md §3 invariant) holds.
    pub fn build(file: &ReferenceFile) -> Self {
        let mut by_id = HashMap::new();
        let mut by_set = HashMap::new();
        let mut by_set_name = HashMap::new();
        let mut by_name: HashMap<String, CardSummary> = HashMap::new();

        for (set_code, set_obj) in file {
            let mut card_ids = Vec::with_capacity(set_obj.cards.len());
            for card in &set_obj.cards {
                let printing = Printing {
                    id: card.uuid.clone(),
                    name: card.name.clone(),
                    set_code: set_code.clone(),
                    number: card.number.clone(),
                    printings: card.printings.clone(),
                    promo_types: card.promo_types.clone(),
                    border_color: card.border_color.clone(),
                    frame_effects: card.frame_effects.clone(),
                    language: card.language.clone(),
                    is_alternative: card.is_alternative,
                    flavor_name: card.flavor_name.clone(),
                    face_name: card.face_name.clone(),
                    layout: card.layout.clone(),
                    has_foil: card.has_foil,
                    has_non_foil: card.has_non_foil,
                };
                card_ids.push(printing.id.clone());

                let mut names = vec![card.name.clone()];
                if let Some(face) = &card.face_name {
                    if face != &card.name {
                        names.push(face.clone());
                    }
                }

                for name in names {
                    let key = normalize(&name);
                    let entry = by_name.entry(key).or_insert_with(|| CardSummary {
                        name: name.clone(),
                        printings: Vec::new(),
                        layout: card.layout.clone(),
                    });
                    for code in &card.printings {
                        if !entry.printings.contains(code) {
                            entry.printings.push(code.clone());
                        }
                    }
                    // A card's own set might be missing from `printings`
                    // on sparse fixtures; make sure it is always present.
                    if !entry.printings.contains(set_code) {
                        entry.printings.push(set_code.clone());
                    }
                }

                by_id.insert(printing.id.clone(), printing);
            }

            by_set_name.insert(normalize(&set_obj.name), set_code.clone());
            by_set.insert(
                set_code.clone(),
                Set {
                    code: set_code.clone(),
                    name: set_obj.name.clone(),
                    release_date: set_obj.release_date.clone(),
                    is_online_only: set_obj.is_online_only,
                    is_foil_only: set_obj.is_foil_only,
                    card_ids,
                },
            );
        }

        Datastore {
            by_id,
            by_set,
            by_set_name,
            by_name,
            loaded: true,
        }
    }

    fn require_loaded(&self) -> Result<(), DatastoreError> {
        if self.loaded {
            Ok(())
        } else {
            Err(DatastoreError::Empty)
        }
    }

    pub fn get_set(&self, code: &str) -> Result<&Set, DatastoreError> {
        self.require_loaded()?;
        self.by_set
            .get(code)
            .ok_or_else(|| DatastoreError::UnknownSet(code.to_string()))
    }

    pub fn get_set_by_name(&self, name: &str) -> Result<&Set, DatastoreError> {
        self.require_loaded()?;
        let code = self
            .by_set_name
            .get(&normalize(name))
            .ok_or_else(|| DatastoreError::UnknownSetName(name.to_string()))?;
        self.get_set(code)
    }

    pub fn get_uuid(&self, id: &str) -> Result<&Printing, DatastoreError> {
        self.require_loaded()?;
        self.by_id
            .get(id)
            .ok_or_else(|| DatastoreError::UnknownId(id.to_string()))
    }

    pub fn get_card_summary(&self, normalized_name: &str) -> Option<&CardSummary> {
        self.by_name.get(normalized_name)
    }

    pub fn cards_iter(&self) -> impl Iterator<Item = (&str, &CardSummary)> {
        self.by_name.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn printings_iter(&self) -> impl Iterator<Item = &Printing> {
        self.by_id.values()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// spec.md §4.A: `HasPrereleasePrinting`.
    pub fn has_prerelease_printing(&self, name: &str) -> bool {
        self.has_promo_type_printing(name, "prerelease")
    }

    /// spec.md §4.A: `HasPromoPackPrinting`.
    pub fn has_promo_pack_printing(&self, name: &str) -> bool {
        self.has_promo_type_printing(name, "promopack")
    }

    fn has_promo_type_printing(&self, name: &str, promo_type: &str) -> bool {
        if !self.loaded {
            return false;
        }
        let Some(summary) = self.by_name.get(&normalize(name)) else {
            return false;
        };
        for set_code in &summary.printings {
            let Some(set) = self.by_set.get(set_code) else {
                continue;
            };
            if set.is_online_only {
                continue;
            }
            for id in &set.card_ids {
                if let Some(printing) = self.by_id.get(id) {
                    if printing.name == summary.name
                        && printing
                            .promo_types
                            .iter()
                            .any(|p| p.eq_ignore_ascii_case(promo_type))
                    {
                        return true;
                    }
                }
            }
        }
        false
    }
}

//! Serde types for the external reference dataset document (spec.md §6).
//!
//! This mirrors the shape MTGJSON's `AllPrintings.json` actually uses,
//! the same document `mtgjson-indexer/src/types.rs` deserializes. Parsing
//! the file from disk is the caller's job (spec.md §1 treats the loader
//! as an external collaborator); this module only describes the shape
//! `reference::Datastore::build` consumes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Top-level reference document: `{ setCode -> SetObject }`.
pub type ReferenceFile = HashMap<String, SetObject>;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetObject {
    pub name: String,
    pub release_date: String,
    pub cards: Vec<CardObject>,
    #[serde(default)]
    pub is_online_only: bool,
    #[serde(default)]
    pub is_foil_only: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardObject {
    pub name: String,
    pub number: String,
    pub uuid: String,
    #[serde(default)]
    pub scryfall_id: Option<String>,
    #[serde(default)]
    pub foreign_data: Vec<ForeignData>,
    #[serde(default)]
    pub printings: Vec<String>,
    #[serde(default)]
    pub promo_types: Vec<String>,
    #[serde(default)]
    pub border_color: String,
    #[serde(default)]
    pub frame_effects: Vec<String>,
    pub layout: String,
    #[serde(default)]
    pub is_alternative: bool,
    #[serde(default)]
    pub flavor_name: Option<String>,
    #[serde(default)]
    pub face_name: Option<String>,
    #[serde(default)]
    pub variations: Vec<String>,
    #[serde(default)]
    pub side: Option<String>,
    #[serde(default)]
    pub has_foil: bool,
    #[serde(default)]
    pub has_non_foil: bool,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "English".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ForeignData {
    pub language: String,
    pub name: String,
    #[serde(default)]
    pub face_name: Option<String>,
}

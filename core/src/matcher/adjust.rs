//! `adjustName` and `adjustEdition`, the two retry passes the matcher takes
//! on a name or edition miss (spec.md §4.E), translated from the functions
//! of the same name in `examples/original_source/mtgmatcher/mtgmatcher.go`.

use super::LooseCard;
use crate::editions;
use crate::reference::Datastore;
use crate::text::{contains, equals, extract_number, has_prefix, normalize};

/// Single-card oddities whose true edition never falls out of any general
/// rule above — the original source keeps an equivalent hardcoded block at
/// the tail of `adjustEdition`.
const SINGLE_CARD_EDITION_EXCEPTIONS: &[(&str, &str)] = &[
    ("Splendid Genesis", "Arena League 1996"),
    ("Proposal", "Vegas Guest Experience"),
    ("1996 World Champion", "World Championship Decks"),
    ("Robot Chicken", "Unglued"),
];

/// Promo-set overrides keyed on a predicate plus a set this card was
/// actually printed in, rather than on the name alone (the tail switch in
/// the original source's `adjustEdition`, e.g. XLN Treasure Chest, BFZ
/// Standard Series). Each entry is `(predicate, set_code)`; the first whose
/// predicate matches *and* whose set actually carries this card name wins.
const PROMO_SET_OVERRIDES: &[(fn(&LooseCard) -> bool, &str)] = &[
    (LooseCard::is_bab, "PXTC"),
    (LooseCard::is_generic_alt_art, "PSS1"),
    (LooseCard::is_generic_extended_art, "PCMP"),
    (LooseCard::is_portal_alt, "PPOD"),
];

/// Collector-scope suffixes vendors tack onto an otherwise-recognizable set
/// name ("Throne of Eldraine: Extras", "Zendikar Rising Variants", "Double
/// Masters Box Toppers") — spec.md §4.E adjustEdition item 3's suffix
/// collapse. Longest-first so "Collector Boosters" doesn't leave a stray
/// "Collector" on the tail after a shorter match wins.
const COLLECTOR_SUFFIXES: &[&str] = &[
    ": Collector Boosters",
    " Collector Boosters",
    ": Box Toppers",
    " Box Toppers",
    ": Box Topper",
    " Box Topper",
    ": Extras",
    " Extras",
    ": Variants",
    " Variants",
    ": Collectors",
    " Collectors",
];

/// `(name, predicate, edition)` single-card exceptions gated on more than
/// just the name — spec.md §4.E's "Dragon Con, 15th Anniversary, Open the
/// Helvault" examples all fall in here rather than in the unconditional
/// [`SINGLE_CARD_EDITION_EXCEPTIONS`] table above.
const GATED_SINGLE_CARD_EXCEPTIONS: &[(&str, fn(&LooseCard) -> bool, &str)] = &[
    ("Nalathni Dragon", LooseCard::is_idw_magazine_book, "Dragon Con"),
    ("Kamahl, Pit Fighter", dci_tagged, "15th Anniversary Cards"),
    ("Char", dci_tagged, "15th Anniversary Cards"),
    ("Sigarda, Host of Herons", LooseCard::is_prerelease, "Open the Helvault"),
    ("Griselbrand", LooseCard::is_prerelease, "Open the Helvault"),
    ("Gisela, Blade of Goldnight", LooseCard::is_prerelease, "Open the Helvault"),
    ("Bruna, Light of Alabaster", LooseCard::is_prerelease, "Open the Helvault"),
    ("Avacyn, Angel of Hope", LooseCard::is_prerelease, "Open the Helvault"),
];

fn dci_tagged(loose: &LooseCard) -> bool {
    loose.contains("dci")
}

/// Retry a name miss: peel collector numbers and basic-land art letters out
/// of the name, resolve Ikoria's Godzilla flavor-name reskins, and fall
/// back to a prefix search for truncated or funny-card names.
pub fn adjust_name(ds: &Datastore, loose: &mut LooseCard) {
    // 1. Peel a trailing collector number off the name into the variation.
    let number = extract_number(&loose.name);
    if !number.is_empty() && loose.name.trim_end().ends_with(number.as_str()) {
        let trimmed = loose.name[..loose.name.len() - number.len()].trim().to_string();
        if !trimmed.is_empty() {
            loose.add_to_variant(&number);
            loose.name = trimmed;
        }
    }

    // 2. Basic lands: a lone trailing letter is a land-art variant tag,
    // e.g. "Forest A" -> name "Forest", variant "A".
    if let Some((base, letter)) = split_trailing_letter(&loose.name) {
        if super::predicates::is_basic_land_name(&base) {
            loose.add_to_variant(&letter);
            loose.name = base;
        }
    }

    // 3. Ikoria's godzilla-themed flavor names stand in for the real card
    // name on certain vendor feeds.
    if contains(&loose.edition, "ikoria") || loose.contains("godzilla") {
        if let Some(real_name) = find_flavor_name(ds, &loose.name) {
            loose.name = real_name;
            loose.add_to_variant("Godzilla");
            return;
        }
    }

    // 4. Prefix search, scoped to the Un-sets first (their card names get
    // truncated or abbreviated more than anywhere else) and otherwise only
    // attempted when the caller marked the name as possibly truncated.
    if ds.get_card_summary(&normalize(&loose.name)).is_none() {
        let un_set = contains(&loose.edition, "unglued")
            || contains(&loose.edition, "unhinged")
            || contains(&loose.edition, "unstable")
            || contains(&loose.edition, "unsanctioned")
            || contains(&loose.edition, "unfinity");
        if un_set || loose.maybe_prefix {
            if let Some(full_name) = find_prefix_name(ds, &loose.name) {
                loose.name = full_name;
            }
        }
    }
}

/// Retry an edition miss: canonicalize through the alias table, resolve
/// Commander/Guild Kit/Ravnica Weekend families from the variation, inject
/// Teferi, Master of Time's synthetic prerelease edition, and finally fall
/// back to the single-card exception table.
pub fn adjust_edition(ds: &Datastore, loose: &mut LooseCard) {
    if let Some(canonical) = editions::lookup(&loose.edition) {
        loose.edition = canonical.to_string();
        return;
    }

    if let Some(stripped) = strip_collector_suffix(&loose.edition) {
        loose.edition = editions::lookup(&stripped)
            .map(str::to_string)
            .unwrap_or(stripped);
        return;
    }

    if contains(&loose.edition, "commander") && ds.get_set_by_name(&loose.edition).is_err() {
        loose.edition = loose.commander_edition();
        return;
    }

    if contains(&loose.edition, "ravnica weekend") {
        if let Some((set_name, guild)) = loose.ravnica_weekend() {
            loose.edition = set_name.to_string();
            loose.add_to_variant(guild);
            return;
        }
    }

    if contains(&loose.edition, "guild kit") {
        if let Some(set_name) = loose.ravnica_guild_kit() {
            loose.edition = set_name.to_string();
            return;
        }
    }

    if loose.name == "Teferi, Master of Time" && loose.is_prerelease() {
        loose.edition = "Throne of Eldraine Promos".to_string();
        return;
    }

    if let Some(forced) = single_card_edition_exception(&loose.name) {
        loose.edition = forced.to_string();
        return;
    }

    if let Some(forced) = gated_single_card_exception(loose) {
        loose.edition = forced.to_string();
        return;
    }

    // Providers regularly mislabel these promos with a generic edition
    // name; trust the predicate plus actual set membership over whatever
    // string the feed sent (the tail switch in the original's adjustEdition).
    if let Some(set_name) = promo_set_override(ds, loose) {
        loose.edition = set_name;
    }
}

fn single_card_edition_exception(name: &str) -> Option<&'static str> {
    SINGLE_CARD_EDITION_EXCEPTIONS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, edition)| *edition)
}

fn gated_single_card_exception(loose: &LooseCard) -> Option<&'static str> {
    GATED_SINGLE_CARD_EXCEPTIONS
        .iter()
        .find(|(name, predicate, _)| *name == loose.name.as_str() && predicate(loose))
        .map(|(_, _, edition)| *edition)
}

/// Strips the first matching suffix from [`COLLECTOR_SUFFIXES`], comparing
/// case-insensitively but returning the base text in its original case.
/// `None` when nothing matches, or the match would leave nothing behind.
fn strip_collector_suffix(edition: &str) -> Option<String> {
    let lower = edition.to_lowercase();
    for suffix in COLLECTOR_SUFFIXES {
        if lower.ends_with(&suffix.to_lowercase()) {
            let base = edition[..edition.len() - suffix.len()].trim();
            if !base.is_empty() {
                return Some(base.to_string());
            }
        }
    }
    None
}

fn set_contains_name(ds: &Datastore, set_code: &str, name: &str) -> bool {
    let Ok(set) = ds.get_set(set_code) else {
        return false;
    };
    set.card_ids
        .iter()
        .filter_map(|id| ds.get_uuid(id).ok())
        .any(|p| p.name == name)
}

fn promo_set_override(ds: &Datastore, loose: &LooseCard) -> Option<String> {
    for (predicate, set_code) in PROMO_SET_OVERRIDES {
        if predicate(loose) && set_contains_name(ds, set_code, &loose.name) {
            if let Ok(set) = ds.get_set(set_code) {
                return Some(set.name.clone());
            }
        }
    }
    None
}

/// Splits a lone trailing letter token off a name, e.g. `"Forest A"` into
/// `("Forest", "A")`. Returns `None` when there is no separate letter
/// token to split off.
fn split_trailing_letter(name: &str) -> Option<(String, String)> {
    let trimmed = name.trim_end();
    let (idx, last) = trimmed.char_indices().next_back()?;
    if !last.is_ascii_alphabetic() {
        return None;
    }
    let prefix = &trimmed[..idx];
    if !prefix.ends_with(' ') {
        return None;
    }
    Some((prefix.trim_end().to_string(), last.to_string()))
}

fn find_flavor_name(ds: &Datastore, flavor: &str) -> Option<String> {
    ds.printings_iter()
        .find(|p| {
            p.flavor_name
                .as_deref()
                .map(|f| equals(f, flavor))
                .unwrap_or(false)
        })
        .map(|p| p.name.clone())
}

fn find_prefix_name(ds: &Datastore, prefix: &str) -> Option<String> {
    let mut candidates: Vec<&str> = ds
        .cards_iter()
        .map(|(_, summary)| summary.name.as_str())
        .filter(|name| has_prefix(name, prefix))
        .collect();
    candidates.sort_unstable();
    candidates.first().map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::schema::{CardObject, ReferenceFile, SetObject};

    fn bare_card(name: &str, uuid: &str) -> CardObject {
        CardObject {
            name: name.to_string(),
            number: "1".to_string(),
            uuid: uuid.to_string(),
            scryfall_id: None,
            foreign_data: vec![],
            printings: vec!["IKO".to_string()],
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
        }
    }

    #[test]
    fn godzilla_flavor_name_resolves_to_real_name() {
        let mut file: ReferenceFile = ReferenceFile::new();
        let mut c = bare_card("Dirge Bat", "uuid-1");
        c.flavor_name = Some("Gigan, Legendary Monster".to_string());
        file.insert(
            "IKO".to_string(),
            SetObject {
                name: "Ikoria: Lair of Behemoths".to_string(),
                release_date: "2020-04-16".to_string(),
                cards: vec![c],
                is_online_only: false,
                is_foil_only: false,
            },
        );
        let ds = Datastore::build(&file);
        let mut loose = LooseCard::new("Gigan, Legendary Monster").with_edition("Ikoria: Lair of Behemoths Promos");
        adjust_name(&ds, &mut loose);
        assert_eq!(loose.name, "Dirge Bat");
        assert_eq!(loose.variation, "Godzilla");
    }

    #[test]
    fn basic_land_letter_moves_to_variant() {
        let ds = Datastore::empty();
        let mut loose = LooseCard::new("Forest A");
        adjust_name(&ds, &mut loose);
        assert_eq!(loose.name, "Forest");
        assert_eq!(loose.variation, "A");
    }

    #[test]
    fn commander_edition_falls_back_without_a_set_match() {
        let ds = Datastore::empty();
        let mut loose = LooseCard::new("Sol Ring").with_edition("Commander Singles");
        adjust_edition(&ds, &mut loose);
        assert_eq!(loose.edition, "Commander 2011");
    }

    #[test]
    fn teferi_prerelease_gets_its_synthetic_edition() {
        let ds = Datastore::empty();
        let mut loose = LooseCard::new("Teferi, Master of Time")
            .with_edition("Throne of Eldraine")
            .with_variation("Prerelease");
        adjust_edition(&ds, &mut loose);
        assert_eq!(loose.edition, "Throne of Eldraine Promos");
    }

    fn set_with(code: &str, name: &str, cards: Vec<CardObject>) -> (String, SetObject) {
        (
            code.to_string(),
            SetObject {
                name: name.to_string(),
                release_date: "2019-01-01".to_string(),
                cards,
                is_online_only: false,
                is_foil_only: false,
            },
        )
    }

    #[test]
    fn buy_a_box_card_rewrites_to_xln_treasure_chest() {
        let mut file: ReferenceFile = ReferenceFile::new();
        let mut c = bare_card("Sun Wukong, Timeless Hero", "uuid-pxtc");
        c.printings = vec!["PXTC".to_string()];
        let (code, set) = set_with("PXTC", "XLN Treasure Chest", vec![c]);
        file.insert(code, set);
        let ds = Datastore::build(&file);
        let mut loose = LooseCard::new("Sun Wukong, Timeless Hero")
            .with_edition("Ixalan Promos")
            .with_variation("Buy-a-Box");
        adjust_edition(&ds, &mut loose);
        assert_eq!(loose.edition, "XLN Treasure Chest");
    }

    #[test]
    fn buy_a_box_card_without_a_treasure_chest_printing_keeps_its_edition() {
        let ds = Datastore::empty();
        let mut loose = LooseCard::new("Some Other Card")
            .with_edition("Ixalan Promos")
            .with_variation("Buy-a-Box");
        adjust_edition(&ds, &mut loose);
        assert_eq!(loose.edition, "Ixalan Promos");
    }

    #[test]
    fn nalathni_dragon_idw_promo_resolves_to_dragon_con() {
        let ds = Datastore::empty();
        let mut loose = LooseCard::new("Nalathni Dragon").with_variation("IDW Comic Promo");
        adjust_edition(&ds, &mut loose);
        assert_eq!(loose.edition, "Dragon Con");
    }

    #[test]
    fn kamahl_pit_fighter_dci_promo_resolves_to_15th_anniversary() {
        let ds = Datastore::empty();
        let mut loose = LooseCard::new("Kamahl, Pit Fighter").with_variation("DCI Judge Promo");
        adjust_edition(&ds, &mut loose);
        assert_eq!(loose.edition, "15th Anniversary Cards");
    }

    #[test]
    fn extras_suffix_collapses_to_the_base_set() {
        let ds = Datastore::empty();
        let mut loose = LooseCard::new("Questing Beast").with_edition("Throne of Eldraine: Extras");
        adjust_edition(&ds, &mut loose);
        assert_eq!(loose.edition, "Throne of Eldraine");
    }

    #[test]
    fn variants_suffix_collapses_to_the_base_set() {
        let ds = Datastore::empty();
        let mut loose = LooseCard::new("Agadeem's Awakening").with_edition("Zendikar Rising Variants");
        adjust_edition(&ds, &mut loose);
        assert_eq!(loose.edition, "Zendikar Rising");
    }

    #[test]
    fn box_toppers_suffix_collapses_to_the_base_set() {
        let ds = Datastore::empty();
        let mut loose = LooseCard::new("Demonic Tutor").with_edition("Double Masters Box Toppers");
        adjust_edition(&ds, &mut loose);
        assert_eq!(loose.edition, "Double Masters");
    }
}

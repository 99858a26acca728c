//! The printings filter and within-set disambiguation pass (spec.md §4.E
//! steps 5 and 7), translated from the edition-candidate pruning and
//! `filterCards` in `examples/original_source/mtgmatcher/mtgmatcher.go`.

use super::LooseCard;
use crate::reference::{Datastore, Printing};
use crate::text::extract_number;

fn has_promo(printing: &Printing, tag: &str) -> bool {
    printing.promo_types.iter().any(|t| t.eq_ignore_ascii_case(tag))
}

fn has_frame_effect(printing: &Printing, effect: &str) -> bool {
    printing
        .frame_effects
        .iter()
        .any(|f| f.eq_ignore_ascii_case(effect))
}

/// Drop candidate sets that cannot possibly hold the printing a `LooseCard`
/// describes: sets that are online-only (spec.md §4.E "online-only-drop"
/// edge case), and sets with no printing of this name carrying the promo
/// markers the loose card's variation text implies.
pub fn filter_printings(ds: &Datastore, loose: &LooseCard, printings: &[String]) -> Vec<String> {
    printings
        .iter()
        .filter(|set_code| set_could_hold_card(ds, loose, set_code))
        .cloned()
        .collect()
}

fn set_could_hold_card(ds: &Datastore, loose: &LooseCard, set_code: &str) -> bool {
    let Ok(set) = ds.get_set(set_code) else {
        return false;
    };
    if set.is_online_only {
        return false;
    }
    // A foil-only set (e.g. many judge/arena promo editions) only ever
    // held a foil printing of this card; it can't be the source of a
    // non-foil request.
    if set.is_foil_only && !loose.foil {
        return false;
    }
    let cards_named: Vec<&Printing> = set
        .card_ids
        .iter()
        .filter_map(|id| ds.get_uuid(id).ok())
        .filter(|p| p.name == loose.name)
        .collect();
    if cards_named.is_empty() {
        return false;
    }
    promo_shape_matches(loose, &cards_named)
}

fn promo_shape_matches(loose: &LooseCard, cards: &[&Printing]) -> bool {
    if loose.is_prerelease() && !cards.iter().any(|p| has_promo(p, "prerelease")) {
        return false;
    }
    if loose.is_promo_pack() && !cards.iter().any(|p| has_promo(p, "promopack")) {
        return false;
    }
    if loose.is_bab() && !cards.iter().any(|p| has_promo(p, "boxtopper") || has_promo(p, "buyabox")) {
        return false;
    }
    if loose.is_borderless() && !cards.iter().any(|p| p.border_color.eq_ignore_ascii_case("borderless")) {
        return false;
    }
    if loose.is_showcase() && !cards.iter().any(|p| has_frame_effect(p, "showcase")) {
        return false;
    }
    if loose.is_extended_art() && !cards.iter().any(|p| has_frame_effect(p, "extendedart")) {
        return false;
    }
    if loose.is_bundle() && !cards.iter().any(|p| has_promo(p, "bundle")) {
        return false;
    }
    if loose.is_release() && !cards.iter().any(|p| has_promo(p, "release")) {
        return false;
    }
    if loose.is_wpn_gateway() && !cards.iter().any(|p| has_promo(p, "wizardsplaynetwork")) {
        return false;
    }
    if loose.is_generic_alt_art() && !cards.iter().any(|p| p.is_alternative) {
        return false;
    }
    true
}

/// Keep `pred`'s narrower subset only when it doesn't eliminate every
/// candidate — mirrors `filterCards` successively tightening the candidate
/// list on language, promo markers, and finish without ever dropping to
/// zero at an intermediate step (spec.md §4.E step 7).
fn narrow<'a>(current: Vec<&'a Printing>, pred: impl Fn(&Printing) -> bool) -> Vec<&'a Printing> {
    let filtered: Vec<&Printing> = current.iter().copied().filter(|p| pred(p)).collect();
    if filtered.is_empty() {
        current
    } else {
        filtered
    }
}

/// Collector number extracted from a loose card's variation text, e.g.
/// `"22b"` on `{name:"Arcane Denial", variation:"22b"}` (spec.md §8
/// scenario 2). Empty when the variation carries no number token.
fn requested_number(loose: &LooseCard) -> String {
    extract_number(&loose.variation)
}

fn number_matches(printing: &Printing, requested: &str) -> bool {
    printing.number.eq_ignore_ascii_case(requested)
}

/// Split a collector number into its leading digits and trailing letter
/// suffix, e.g. `"22b"` -> `("22", "b")`.
fn split_number(number: &str) -> (&str, &str) {
    let split_at = number.find(|c: char| c.is_ascii_alphabetic());
    match split_at {
        Some(i) => (&number[..i], &number[i..]),
        None => (number, ""),
    }
}

/// True when every candidate shares one base collector number but a
/// distinct letter suffix, e.g. Alliances' "22a"/"22b" Arcane Denial —
/// the case spec.md §4.E step 7 reserves for `CardMissingVariant` rather
/// than `Aliasing` (§8 scenario 1 vs. scenario 2): the loose card never
/// said which lettered printing it meant. Printings that simply carry
/// distinct, unrelated numbers (e.g. several full-art basics) have no
/// such shared-base relationship and stay `Aliasing` (§8 scenario 5).
pub fn differ_only_by_number(cards: &[&Printing]) -> bool {
    let Some((base0, suffix0)) = cards.first().map(|p| split_number(&p.number)) else {
        return false;
    };
    if suffix0.is_empty() {
        return false;
    }
    let all_same_base = cards.iter().all(|p| {
        let (base, suffix) = split_number(&p.number);
        base == base0 && !suffix.is_empty()
    });
    all_same_base && cards.windows(2).any(|w| w[0].number != w[1].number)
}

/// Disambiguate a merged candidate list down to (ideally) one printing, by
/// successively narrowing on collector number, language, the promo-marker
/// predicates, and requested finish.
pub fn filter_cards<'a>(loose: &LooseCard, cards: &[&'a Printing]) -> Vec<&'a Printing> {
    let mut current: Vec<&Printing> = cards.to_vec();
    let wanted_language = if loose.is_jpn() { "Japanese" } else { "English" };

    let number = requested_number(loose);
    if !number.is_empty() {
        current = narrow(current, |p| number_matches(p, &number));
    }
    current = narrow(current, |p| p.language == wanted_language);
    current = narrow(current, |p| has_promo(p, "prerelease") == loose.is_prerelease());
    current = narrow(current, |p| has_promo(p, "promopack") == loose.is_promo_pack());
    current = narrow(current, |p| {
        (has_promo(p, "boxtopper") || has_promo(p, "buyabox")) == loose.is_bab()
    });
    current = narrow(current, |p| {
        p.border_color.eq_ignore_ascii_case("borderless") == loose.is_borderless()
    });
    current = narrow(current, |p| has_frame_effect(p, "showcase") == loose.is_showcase());
    current = narrow(current, |p| {
        has_frame_effect(p, "extendedart") == loose.is_extended_art()
    });
    current = narrow(current, |p| has_promo(p, "bundle") == loose.is_bundle());
    current = narrow(current, |p| has_promo(p, "release") == loose.is_release());
    current = narrow(current, |p| {
        has_promo(p, "wizardsplaynetwork") == loose.is_wpn_gateway()
    });
    current = narrow(current, |p| p.is_alternative == loose.is_generic_alt_art());
    current = narrow(current, |p| if loose.foil { p.has_foil } else { p.has_non_foil });

    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::schema::{CardObject, ReferenceFile, SetObject};

    fn printing(id: &str, name: &str, border: &str, frame_effects: &[&str], promo: &[&str]) -> Printing {
        Printing {
            id: id.to_string(),
            name: name.to_string(),
            set_code: "ELD".to_string(),
            number: "1".to_string(),
            printings: vec!["ELD".to_string()],
            promo_types: promo.iter().map(|s| s.to_string()).collect(),
            border_color: border.to_string(),
            frame_effects: frame_effects.iter().map(|s| s.to_string()).collect(),
            language: "English".to_string(),
            is_alternative: false,
            flavor_name: None,
            face_name: None,
            layout: "normal".to_string(),
            has_foil: true,
            has_non_foil: true,
        }
    }

    #[test]
    fn filter_cards_narrows_on_showcase() {
        let normal = printing("n1", "Oko, Thief of Crowns", "black", &[], &[]);
        let showcase = printing("n2", "Oko, Thief of Crowns", "black", &["showcase"], &[]);
        let loose = LooseCard::new("Oko, Thief of Crowns").with_variation("Showcase");
        let out = filter_cards(&loose, &[&normal, &showcase]);
        assert_eq!(out, vec![&showcase]);
    }

    #[test]
    fn filter_cards_never_empties_out() {
        let normal = printing("n1", "Oko, Thief of Crowns", "black", &[], &[]);
        let loose = LooseCard::new("Oko, Thief of Crowns").with_variation("Showcase");
        let out = filter_cards(&loose, &[&normal]);
        assert_eq!(out, vec![&normal]);
    }

    #[test]
    fn filter_cards_narrows_on_a_supplied_collector_number() {
        let mut a = printing("n1", "Arcane Denial", "black", &[], &[]);
        a.number = "22a".to_string();
        let mut b = printing("n2", "Arcane Denial", "black", &[], &[]);
        b.number = "22b".to_string();
        let loose = LooseCard::new("Arcane Denial").with_variation("22b");
        let out = filter_cards(&loose, &[&a, &b]);
        assert_eq!(out, vec![&b]);
    }

    #[test]
    fn lettered_variants_differ_only_by_number() {
        let mut a = printing("n1", "Arcane Denial", "black", &[], &[]);
        a.number = "22a".to_string();
        let mut b = printing("n2", "Arcane Denial", "black", &[], &[]);
        b.number = "22b".to_string();
        assert!(differ_only_by_number(&[&a, &b]));
    }

    #[test]
    fn filter_cards_narrows_on_generic_alt_art() {
        let mut normal = printing("n1", "Beast Within", "black", &[], &[]);
        normal.is_alternative = false;
        let mut alt = printing("n2", "Beast Within", "black", &[], &[]);
        alt.is_alternative = true;
        let loose = LooseCard::new("Beast Within").with_variation("Alt Art");
        let out = filter_cards(&loose, &[&normal, &alt]);
        assert_eq!(out, vec![&alt]);
    }

    #[test]
    fn unrelated_numbers_are_not_a_missing_variant() {
        let mut a = printing("n1", "Forest", "black", &[], &[]);
        a.number = "281".to_string();
        let mut b = printing("n2", "Forest", "black", &[], &[]);
        b.number = "282".to_string();
        assert!(!differ_only_by_number(&[&a, &b]));
    }

    fn bare_card(name: &str, uuid: &str) -> CardObject {
        CardObject {
            name: name.to_string(),
            number: "1".to_string(),
            uuid: uuid.to_string(),
            scryfall_id: None,
            foreign_data: vec![],
            printings: vec![],
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
            has_non_foil: false,
            language: "English".to_string(),
        }
    }

    fn foil_only_dataset() -> Datastore {
        let mut file: ReferenceFile = ReferenceFile::new();
        let mut judge = bare_card("Vindicate", "77777777-0000-0000-0000-000000000001");
        judge.printings = vec!["G03".to_string()];
        file.insert(
            "G03".to_string(),
            SetObject {
                name: "Judge Gift Cards 2003".to_string(),
                release_date: "2003-01-01".to_string(),
                cards: vec![judge],
                is_online_only: false,
                is_foil_only: true,
            },
        );
        Datastore::build(&file)
    }

    #[test]
    fn foil_only_set_is_dropped_for_a_non_foil_request() {
        let ds = foil_only_dataset();
        let loose = LooseCard::new("Vindicate");
        let out = filter_printings(&ds, &loose, &["G03".to_string()]);
        assert!(out.is_empty());
    }

    #[test]
    fn foil_only_set_is_kept_for_a_foil_request() {
        let ds = foil_only_dataset();
        let loose = LooseCard::new("Vindicate").with_foil(true);
        let out = filter_printings(&ds, &loose, &["G03".to_string()]);
        assert_eq!(out, vec!["G03".to_string()]);
    }
}

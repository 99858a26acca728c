//! Closed predicates over a [`LooseCard`]'s variation/edition text, used by
//! [`super::filters`] and [`super::adjust`] to recognize the recurring
//! promo/finish categories spec.md §4.E names. Grounded on the `is*` helper
//! family scattered through `examples/original_source/mtgmatcher/mtgmatcher.go`
//! (`isBasicLand`, `isWorldChamp`) and the per-vendor `preprocess.go` files
//! (`isPrerelease`, `isPromoPack`, `isBorderless`, ...).

use super::LooseCard;
use crate::text::{contains, extract_number};

const BASIC_LANDS: &[&str] = &["Plains", "Island", "Swamp", "Mountain", "Forest", "Wastes"];

pub(crate) fn is_basic_land_name(name: &str) -> bool {
    BASIC_LANDS.iter().any(|&land| name == land)
}

impl LooseCard {
    pub fn is_basic_land(&self) -> bool {
        is_basic_land_name(&self.name)
    }

    pub fn is_prerelease(&self) -> bool {
        self.contains("prerelease") || self.contains("pre-release")
    }

    pub fn is_promo_pack(&self) -> bool {
        self.contains("promo pack") || self.contains("planeswalker deck")
    }

    pub fn is_borderless(&self) -> bool {
        self.contains("borderless")
    }

    pub fn is_showcase(&self) -> bool {
        self.contains("showcase")
    }

    pub fn is_extended_art(&self) -> bool {
        self.contains("extended art") || self.contains("extended")
    }

    /// Buy-a-Box promo.
    pub fn is_bab(&self) -> bool {
        self.contains("buy-a-box") || self.contains("buy a box") || self.contains("bab")
    }

    pub fn is_bundle(&self) -> bool {
        self.contains("bundle")
    }

    pub fn is_release(&self) -> bool {
        self.contains("release") && !self.is_prerelease()
    }

    pub fn is_jpn(&self) -> bool {
        self.contains("japanese") || self.contains("jpn")
    }

    /// A promo whose variation carries no set-specific hint at all, e.g.
    /// a bare "Promo" tag — these fall back to set-name-suffix matching
    /// in the edition-selection second pass (spec.md §4.E).
    pub fn is_generic_promo(&self) -> bool {
        self.promo && !self.is_prerelease() && !self.is_promo_pack() && !self.is_bab()
    }

    pub fn is_generic_alt_art(&self) -> bool {
        self.contains("alt art") || self.contains("alternate art")
    }

    /// An alt-art printing that's also extended-art (e.g. some Secret Lair
    /// drops). Composed from the two predicates above rather than narrowed
    /// on its own in `filter_cards` — but `adjust_edition`'s
    /// `PROMO_SET_OVERRIDES` does key directly on this one, to route Champs
    /// and States promos to the right set.
    pub fn is_generic_extended_art(&self) -> bool {
        self.is_generic_alt_art() && self.is_extended_art()
    }

    /// Gold-bordered World Championship decks collapse every duplicate
    /// printing in a set down to the first by dataset order (spec.md §4.E,
    /// `isWorldChamp` in the original source).
    pub fn is_world_champ(&self) -> bool {
        contains(&self.edition, "world championship")
    }

    /// IDW comic-book/magazine insert promos. No MTGJSON `promoTypes` tag
    /// distinguishes these from a plain reprint, so this isn't consulted by
    /// `filter_cards`/`filter_printings` — `adjust_edition`'s
    /// `GATED_SINGLE_CARD_EXCEPTIONS` uses it instead, for Nalathni Dragon's
    /// Dragon Con promo.
    pub fn is_idw_magazine_book(&self) -> bool {
        self.contains("idw") || self.contains("magazine") || self.contains("comic")
    }

    pub fn is_wpn_gateway(&self) -> bool {
        self.contains("wpn") || self.contains("gateway")
    }

    /// Portal's alternate-reminder-text starter printings. Like
    /// [`Self::is_idw_magazine_book`], there's no per-printing field on
    /// `Printing` to narrow a filter stage against; `adjust_edition`'s
    /// `PROMO_SET_OVERRIDES` consults it instead to rewrite into the
    /// Portal Demo Game set.
    pub fn is_portal_alt(&self) -> bool {
        contains(&self.edition, "portal") && self.contains("reminder text")
    }

    /// Which physical "Commander"-family box a loose variation implies,
    /// defaulting to the first release when no year is present (spec.md
    /// §4.C worked example; `adjustEdition`'s commander branch in the
    /// original source).
    pub fn commander_edition(&self) -> String {
        let year = extract_number(&self.variation);
        if year.len() == 4 {
            format!("Commander {year}")
        } else {
            "Commander 2011".to_string()
        }
    }

    /// Guild-specific Ravnica Allegiance / Guilds of Ravnica Weekend promos
    /// resolve to a (set name, guild) pair.
    pub fn ravnica_weekend(&self) -> Option<(&'static str, &'static str)> {
        const GRN_GUILDS: &[&str] = &["boros", "dimir", "golgari", "izzet", "selesnya"];
        const RNA_GUILDS: &[&str] = &["azorius", "gruul", "orzhov", "rakdos", "simic"];
        for guild in GRN_GUILDS {
            if self.contains(guild) {
                return Some(("GRN Ravnica Weekend", guild_label(guild)));
            }
        }
        for guild in RNA_GUILDS {
            if self.contains(guild) {
                return Some(("RNA Ravnica Weekend", guild_label(guild)));
            }
        }
        None
    }

    /// Which Guild Kit (Guilds of Ravnica vs. Ravnica Allegiance) a loose
    /// variation implies.
    pub fn ravnica_guild_kit(&self) -> Option<&'static str> {
        const GRN_GUILDS: &[&str] = &["boros", "dimir", "golgari", "izzet", "selesnya"];
        const RNA_GUILDS: &[&str] = &["azorius", "gruul", "orzhov", "rakdos", "simic"];
        if GRN_GUILDS.iter().any(|g| self.contains(g)) {
            return Some("GRN Guild Kit");
        }
        if RNA_GUILDS.iter().any(|g| self.contains(g)) {
            return Some("RNA Guild Kit");
        }
        None
    }
}

fn guild_label(guild: &str) -> &'static str {
    match guild {
        "boros" => "Boros",
        "dimir" => "Dimir",
        "golgari" => "Golgari",
        "izzet" => "Izzet",
        "selesnya" => "Selesnya",
        "azorius" => "Azorius",
        "gruul" => "Gruul",
        "orzhov" => "Orzhov",
        "rakdos" => "Rakdos",
        "simic" => "Simic",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prerelease_and_promo_pack_are_distinct() {
        let pre = LooseCard::new("Teferi, Master of Time").with_variation("Prerelease");
        assert!(pre.is_prerelease());
        assert!(!pre.is_promo_pack());

        let pack = LooseCard::new("Sorcerous Spyglass").with_variation("Promo Pack");
        assert!(pack.is_promo_pack());
        assert!(!pack.is_prerelease());
    }

    #[test]
    fn commander_edition_defaults_without_a_year() {
        let loose = LooseCard::new("Sol Ring").with_variation("Commander");
        assert_eq!(loose.commander_edition(), "Commander 2011");
        let loose = LooseCard::new("Sol Ring").with_variation("Commander 2019");
        assert_eq!(loose.commander_edition(), "Commander 2019");
    }

    #[test]
    fn guild_kit_detects_from_variation() {
        let loose = LooseCard::new("Unexpectedly Absent").with_variation("Orzhov Guild Kit");
        assert_eq!(loose.ravnica_guild_kit(), Some("RNA Guild Kit"));
    }
}

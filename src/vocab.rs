// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Fixed vocabularies recognised in sprite filenames
//!
//! Every token the classifier understands lives here. Matching is
//! case-insensitive; the stored form is always the lowercase `as_str()`
//! value except for classes and genders, which keep the filename's casing.

use std::fmt;

/// Known hero classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeroClass {
    Bomber,
    Champion,
    Orc,
}

impl HeroClass {
    pub const ALL: [HeroClass; 3] = [HeroClass::Bomber, HeroClass::Champion, HeroClass::Orc];

    pub fn as_str(self) -> &'static str {
        match self {
            HeroClass::Bomber => "Bomber",
            HeroClass::Champion => "Champion",
            HeroClass::Orc => "Orc",
        }
    }

    /// Find a known class contained anywhere in `raw`, ignoring case
    pub fn find_in(raw: &str) -> Option<Self> {
        let lower = raw.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| lower.contains(&c.as_str().to_lowercase()))
    }
}

/// Hero gender token, matched case-sensitively in the filename head
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Female, Gender::Male];

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

/// Equipment region a skin applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Head,
    Body,
    Arms,
    Legs,
    Belt,
}

impl Slot {
    pub const ALL: [Slot; 5] = [Slot::Head, Slot::Body, Slot::Arms, Slot::Legs, Slot::Belt];

    pub fn as_str(self) -> &'static str {
        match self {
            Slot::Head => "head",
            Slot::Body => "body",
            Slot::Arms => "arms",
            Slot::Legs => "legs",
            Slot::Belt => "belt",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str().eq_ignore_ascii_case(token))
    }
}

/// Sprite palette. `Grey` and `Gray` are distinct tokens and kept apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Grey,
    Red,
    Blue,
    Green,
    Violet,
    Purple,
    Yellow,
    Orange,
    Pink,
    Brown,
    Black,
    Turquoise,
    Gold,
    Gray,
}

impl Color {
    pub const ALL: [Color; 14] = [
        Color::Grey,
        Color::Red,
        Color::Blue,
        Color::Green,
        Color::Violet,
        Color::Purple,
        Color::Yellow,
        Color::Orange,
        Color::Pink,
        Color::Brown,
        Color::Black,
        Color::Turquoise,
        Color::Gold,
        Color::Gray,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Color::Grey => "grey",
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Violet => "violet",
            Color::Purple => "purple",
            Color::Yellow => "yellow",
            Color::Orange => "orange",
            Color::Pink => "pink",
            Color::Brown => "brown",
            Color::Black => "black",
            Color::Turquoise => "turquoise",
            Color::Gold => "gold",
            Color::Gray => "gray",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str().eq_ignore_ascii_case(token))
    }
}

/// Rarity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// Misspelling of "uncommon" found in shipped sprite names
pub const MISSPELLED_UNCOMMON: &str = "uncommom";

impl Rarity {
    pub const ALL: [Rarity; 5] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        }
    }

    /// Parse a rarity token, folding the known misspelling into `Uncommon`
    pub fn parse(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case(MISSPELLED_UNCOMMON) {
            return Some(Rarity::Uncommon);
        }
        Self::ALL.into_iter().find(|r| r.as_str().eq_ignore_ascii_case(token))
    }

    /// Rewrite a stored rarity value to its canonical form. Idempotent.
    pub fn normalize(value: &str) -> String {
        match Self::parse(value) {
            Some(rarity) => rarity.as_str().to_string(),
            None => value.to_string(),
        }
    }
}

/// Named skin sets recognised in filename tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkinSet {
    Armor,
    Ronin,
    Doomsday,
    Soldier,
    Cyber,
    Gladiator,
    Tank,
    Sabbath,
    Horned,
    Tusked,
    Start,
}

impl SkinSet {
    pub const ALL: [SkinSet; 11] = [
        SkinSet::Armor,
        SkinSet::Ronin,
        SkinSet::Doomsday,
        SkinSet::Soldier,
        SkinSet::Cyber,
        SkinSet::Gladiator,
        SkinSet::Tank,
        SkinSet::Sabbath,
        SkinSet::Horned,
        SkinSet::Tusked,
        SkinSet::Start,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SkinSet::Armor => "armor",
            SkinSet::Ronin => "ronin",
            SkinSet::Doomsday => "doomsday",
            SkinSet::Soldier => "soldier",
            SkinSet::Cyber => "cyber",
            SkinSet::Gladiator => "gladiator",
            SkinSet::Tank => "tank",
            SkinSet::Sabbath => "sabbath",
            SkinSet::Horned => "horned",
            SkinSet::Tusked => "tusked",
            SkinSet::Start => "start",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str().eq_ignore_ascii_case(token))
    }

    /// In-game display name, where one exists
    pub fn friendly_name(self) -> Option<&'static str> {
        match self {
            SkinSet::Tank => Some("Battering Ram"),
            SkinSet::Cyber => Some("Cyber Gladiator"),
            SkinSet::Soldier => Some("Steel Quarterback"),
            SkinSet::Doomsday => Some("Street Falcon"),
            SkinSet::Ronin => Some("Ronin"),
            _ => None,
        }
    }
}

/// Display name for a skin set id: the friendly name if known, otherwise the
/// id with its first character upper-cased.
pub fn skin_set_display_name(id: &str) -> String {
    SkinSet::ALL
        .into_iter()
        .find(|s| s.as_str() == id)
        .and_then(SkinSet::friendly_name)
        .map(String::from)
        .unwrap_or_else(|| capitalize_first(id))
}

/// Upper-case the first character, leaving the rest untouched
pub fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

macro_rules! impl_display {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

impl_display!(HeroClass, Gender, Slot, Color, Rarity, SkinSet);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_folds_misspelling() {
        assert_eq!(Rarity::parse("uncommom"), Some(Rarity::Uncommon));
        assert_eq!(Rarity::parse("UNCOMMOM"), Some(Rarity::Uncommon));
        assert_eq!(Rarity::parse("Legendary"), Some(Rarity::Legendary));
        assert_eq!(Rarity::parse("mythic"), None);
    }

    #[test]
    fn test_rarity_normalize_is_idempotent() {
        let once = Rarity::normalize("uncommom");
        assert_eq!(once, "uncommon");
        assert_eq!(Rarity::normalize(&once), "uncommon");
        assert_eq!(Rarity::normalize(""), "");
    }

    #[test]
    fn test_class_found_by_substring() {
        assert_eq!(HeroClass::find_in("Bomber"), Some(HeroClass::Bomber));
        assert_eq!(HeroClass::find_in("BigORC"), Some(HeroClass::Orc));
        assert_eq!(HeroClass::find_in("Wizard"), None);
    }

    #[test]
    fn test_grey_and_gray_are_distinct() {
        assert_eq!(Color::parse("GREY"), Some(Color::Grey));
        assert_eq!(Color::parse("gray"), Some(Color::Gray));
    }

    #[test]
    fn test_display_names() {
        assert_eq!(skin_set_display_name("doomsday"), "Street Falcon");
        assert_eq!(skin_set_display_name("tank"), "Battering Ram");
        assert_eq!(skin_set_display_name("armor"), "Armor");
        assert_eq!(skin_set_display_name("403"), "403");
        assert_eq!(skin_set_display_name(""), "");
    }

    #[test]
    fn test_capitalize_keeps_rest() {
        assert_eq!(capitalize_first("mIxEd"), "MIxEd");
    }
}

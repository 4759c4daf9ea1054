// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Filename classifier
//!
//! Sprite names look like `Hero<Class><Gender>_<token>_<token>...png`.
//! The gender is the last `Male`/`Female` in the leading word run, so
//! `HeroOrcMaleAlt_...` and `HeroOrc_Male_...` both carry a head. Tokens are
//! the whole stem split on `_`, matched against [`crate::vocab`].
//!
//! Precedence rules, kept exactly as the sprite naming has always been read:
//! - the first purely numeric token is the skin set and beats any named set;
//! - a rarity in the final token is taken before the general scan;
//! - during the scan, skin set and rarity keep the FIRST match while slot
//!   and color keep the LAST match.

use tracing::{debug, warn};

use crate::catalog::{Catalog, SkinRecord};
use crate::vocab::{
    skin_set_display_name, Color, Gender, HeroClass, Rarity, SkinSet, Slot, MISSPELLED_UNCOMMON,
};

/// Filename prefix every sprite shares
pub const HERO_PREFIX: &str = "Hero";

/// Extensions stripped from the final token
pub const SPRITE_EXTENSIONS: &[&str] = &["png", "webp", "jpg", "jpeg", "gif"];

/// An eligible filename that yielded no tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub filename: String,
    pub reason: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Could not parse tags for {} ({})", self.filename, self.reason)
    }
}

/// Outcome of classifying a single filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Not a hero sprite; skipped without a diagnostic
    Ineligible,
    /// Looked like a hero sprite but nothing could be extracted
    Unparsed(Diagnostic),
    Tagged(SkinRecord),
}

/// Result of classifying a batch of filenames
#[derive(Debug, Default)]
pub struct ClassifyReport {
    pub catalog: Catalog,
    pub diagnostics: Vec<Diagnostic>,
    pub ineligible: usize,
}

#[derive(Debug, Default)]
struct TagSet {
    class: Option<String>,
    gender: Option<Gender>,
    skin_set: Option<String>,
    slot: Option<Slot>,
    color: Option<Color>,
    rarity: Option<Rarity>,
}

impl TagSet {
    fn is_empty(&self) -> bool {
        self.class.is_none()
            && self.gender.is_none()
            && self.skin_set.is_none()
            && self.slot.is_none()
            && self.color.is_none()
            && self.rarity.is_none()
    }

    fn into_record(self) -> SkinRecord {
        let skin_set_name = self
            .skin_set
            .as_deref()
            .map(skin_set_display_name)
            .unwrap_or_default();

        SkinRecord {
            class: self.class.unwrap_or_default(),
            gender: self.gender.map(|g| g.as_str().to_string()).unwrap_or_default(),
            skin_set: self.skin_set.unwrap_or_default(),
            skin_set_name,
            slot: self.slot.map(|s| s.as_str().to_string()).unwrap_or_default(),
            color: self.color.map(|c| c.as_str().to_string()).unwrap_or_default(),
            rarity: self.rarity.map(|r| r.as_str().to_string()).unwrap_or_default(),
        }
    }
}

/// Whether a filename is a candidate hero sprite at all
pub fn is_eligible(filename: &str) -> bool {
    filename.starts_with(HERO_PREFIX) && filename.contains('_')
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Find `Hero<Class><Gender>` at the start of a filename. The class text is
/// everything between the prefix and the last gender token in the leading
/// word run, and is never empty.
fn split_head(filename: &str) -> Option<(&str, Gender)> {
    let after = filename.strip_prefix(HERO_PREFIX)?;
    let run = &after[..after.find(|c| !is_word_char(c)).unwrap_or(after.len())];

    Gender::ALL
        .into_iter()
        .filter_map(|gender| {
            run.rfind(gender.as_str())
                .filter(|&at| at > 0)
                .map(|at| (at, gender))
        })
        .max_by_key(|(at, _)| *at)
        .map(|(at, gender)| (&run[..at], gender))
}

fn strip_extension(filename: &str) -> &str {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if SPRITE_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext)) => stem,
        _ => filename,
    }
}

fn is_numeric(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}

/// Classify one filename
pub fn classify(filename: &str) -> Classification {
    if !is_eligible(filename) {
        return Classification::Ineligible;
    }

    let mut tags = TagSet::default();

    if let Some((class_text, gender)) = split_head(filename) {
        if HeroClass::find_in(class_text).is_some() {
            tags.class = Some(class_text.to_string());
        }
        tags.gender = Some(gender);

        let tokens: Vec<&str> = strip_extension(filename).split('_').collect();

        if let Some(number) = tokens.iter().find(|t| is_numeric(t)) {
            tags.skin_set = Some(number.to_string());
        }

        if let Some(last) = tokens.last() {
            tags.rarity = Rarity::parse(last);
        }

        for token in &tokens {
            if let Some(set) = SkinSet::parse(token) {
                tags.skin_set.get_or_insert_with(|| set.as_str().to_string());
            }
            if let Some(slot) = Slot::parse(token) {
                tags.slot = Some(slot);
            }
            if let Some(color) = Color::parse(token) {
                tags.color = Some(color);
            }
            if let Some(rarity) = Rarity::parse(token) {
                tags.rarity.get_or_insert(rarity);
            }
        }

        if tags.rarity.is_none() && filename.to_lowercase().contains(MISSPELLED_UNCOMMON) {
            tags.rarity = Some(Rarity::Uncommon);
        }
    }

    if tags.is_empty() {
        return Classification::Unparsed(Diagnostic {
            filename: filename.to_string(),
            reason: format!("expected {}<Class><Male|Female>_...", HERO_PREFIX),
        });
    }

    Classification::Tagged(tags.into_record())
}

/// Classify a batch of filenames into a fresh catalog
pub fn classify_all<I, S>(filenames: I) -> ClassifyReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut report = ClassifyReport::default();

    for filename in filenames {
        let filename = filename.as_ref();
        match classify(filename) {
            Classification::Ineligible => {
                debug!("Skipping non-hero file: {}", filename);
                report.ineligible += 1;
            }
            Classification::Unparsed(diagnostic) => {
                warn!("{}", diagnostic);
                report.diagnostics.push(diagnostic);
            }
            Classification::Tagged(record) => {
                report.catalog.insert(filename, record);
            }
        }
    }

    report.catalog.normalize_rarities();
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(filename: &str) -> SkinRecord {
        match classify(filename) {
            Classification::Tagged(record) => record,
            other => panic!("Expected tagged record for {}, got {:?}", filename, other),
        }
    }

    #[test]
    fn test_numeric_skin_set_beats_named() {
        let r = tagged("HeroBomberFemale_armor_403_bomber_female_head_grey_common.png");
        assert_eq!(r.class, "Bomber");
        assert_eq!(r.gender, "Female");
        assert_eq!(r.skin_set, "403");
        assert_eq!(r.skin_set_name, "403");
        assert_eq!(r.slot, "head");
        assert_eq!(r.color, "grey");
        assert_eq!(r.rarity, "common");
    }

    #[test]
    fn test_friendly_skin_set_name() {
        let r = tagged("HeroChampionFemale_legs_doomsday_pink_uncommon.png");
        assert_eq!(r.class, "Champion");
        assert_eq!(r.gender, "Female");
        assert_eq!(r.skin_set, "doomsday");
        assert_eq!(r.skin_set_name, "Street Falcon");
        assert_eq!(r.slot, "legs");
        assert_eq!(r.color, "pink");
        assert_eq!(r.rarity, "uncommon");
    }

    #[test]
    fn test_misspelled_rarity_token() {
        let r = tagged("HeroOrcMale_uncommom_tusked_belt.png");
        assert_eq!(r.rarity, "uncommon");
        assert_eq!(r.skin_set, "tusked");
        assert_eq!(r.skin_set_name, "Tusked");
    }

    #[test]
    fn test_misspelled_rarity_inside_token() {
        let r = tagged("HeroOrcMale_horned_redUncommom.png");
        assert_eq!(r.rarity, "uncommon");
        assert_eq!(r.color, "");
    }

    #[test]
    fn test_last_token_rarity_beats_earlier_rarity() {
        let r = tagged("HeroOrcMale_rare_tank_body_epic.png");
        assert_eq!(r.rarity, "epic");
        assert_eq!(r.skin_set_name, "Battering Ram");
    }

    #[test]
    fn test_first_rarity_wins_in_scan() {
        let r = tagged("HeroOrcMale_rare_epic_tank_body.png");
        assert_eq!(r.rarity, "rare");
    }

    #[test]
    fn test_slot_and_color_last_match_wins() {
        let r = tagged("HeroOrcMale_head_red_cyber_body_blue.png");
        assert_eq!(r.slot, "body");
        assert_eq!(r.color, "blue");
    }

    #[test]
    fn test_skin_set_first_match_wins() {
        let r = tagged("HeroOrcMale_ronin_soldier_arms.png");
        assert_eq!(r.skin_set, "ronin");
        assert_eq!(r.skin_set_name, "Ronin");
    }

    #[test]
    fn test_case_insensitive_tokens_stored_lowercase() {
        let r = tagged("HeroBomberMale_CYBER_Arms_Gold_LEGENDARY.PNG");
        assert_eq!(r.skin_set, "cyber");
        assert_eq!(r.slot, "arms");
        assert_eq!(r.color, "gold");
        assert_eq!(r.rarity, "legendary");
    }

    #[test]
    fn test_unknown_class_left_empty() {
        let r = tagged("HeroWizardMale_start_head.png");
        assert_eq!(r.class, "");
        assert_eq!(r.gender, "Male");
        assert_eq!(r.skin_set, "start");
    }

    #[test]
    fn test_class_kept_verbatim() {
        let r = tagged("HeroEliteOrcFemale_sabbath.png");
        assert_eq!(r.class, "EliteOrc");
    }

    #[test]
    fn test_gender_followed_by_more_text() {
        let r = tagged("HeroOrcMaleAlt_tank_head_red_rare.png");
        assert_eq!(r.class, "Orc");
        assert_eq!(r.gender, "Male");
        assert_eq!(r.skin_set, "tank");
        assert_eq!(r.slot, "head");
        assert_eq!(r.color, "red");
        assert_eq!(r.rarity, "rare");
    }

    #[test]
    fn test_gender_after_underscore() {
        let r = tagged("HeroOrc_Male_tank_head_red_rare.png");
        assert_eq!(r.class, "Orc_");
        assert_eq!(r.gender, "Male");
        assert_eq!(r.skin_set, "tank");
        assert_eq!(r.slot, "head");
        assert_eq!(r.color, "red");
        assert_eq!(r.rarity, "rare");
    }

    #[test]
    fn test_last_gender_token_ends_class() {
        assert_eq!(
            split_head("HeroFemaleOrcMale_tank.png"),
            Some(("FemaleOrc", Gender::Male))
        );
        assert_eq!(split_head("HeroMale_x.png"), None);
        assert_eq!(split_head("HeroOrc.Male_x.png"), None);
    }

    #[test]
    fn test_ineligible_files() {
        assert_eq!(classify("Background_01.png"), Classification::Ineligible);
        assert_eq!(classify("HeroBomberFemale.png"), Classification::Ineligible);
    }

    #[test]
    fn test_eligible_but_unparsed() {
        match classify("Hero_portrait_frame.png") {
            Classification::Unparsed(d) => assert_eq!(d.filename, "Hero_portrait_frame.png"),
            other => panic!("Expected diagnostic, got {:?}", other),
        }
        assert!(matches!(classify("HeroMale_x.png"), Classification::Unparsed(_)));
    }

    #[test]
    fn test_classify_all_collects_diagnostics() {
        let report = classify_all([
            "HeroOrcMale_tusked_arms_green_rare.png",
            "Hero_bad.png",
            "icon.png",
        ]);
        assert_eq!(report.catalog.len(), 1);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.ineligible, 1);
    }

    #[test]
    fn test_classify_all_is_deterministic() {
        let names = [
            "HeroOrcMale_tusked_arms_green_rare.png",
            "HeroBomberFemale_armor_403_bomber_female_head_grey_common.png",
            "HeroChampionFemale_legs_doomsday_pink_uncommon.png",
        ];
        let mut reversed = names;
        reversed.reverse();

        let a = classify_all(names).catalog.to_json_pretty().unwrap();
        let b = classify_all(reversed).catalog.to_json_pretty().unwrap();
        assert_eq!(a, b);
        assert!(!a.contains(MISSPELLED_UNCOMMON));
    }
}

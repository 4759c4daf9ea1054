// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Cascading filter engine over a loaded catalog
//!
//! Selection is hierarchical: class and gender first, then a skin set, then
//! any of rarity, color and slot. Changing a level clears everything below it.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::{Catalog, SkinRecord};
use crate::vocab::{capitalize_first, Rarity};

/// Display name that always sorts to the end of the skin set list
pub const OTHER_SKIN_SET: &str = "Other";

/// Current selection. Empty string means "not selected".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    pub class: String,
    pub gender: String,
    pub skin_set: String,
    pub rarity: String,
    pub color: String,
    pub slot: String,
}

/// Secondary facets, available once a skin set is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    Rarity,
    Color,
    Slot,
}

impl FilterState {
    /// Build a state by applying selections in cascade order. Values that
    /// the cascade does not allow yet (a skin set without class and gender,
    /// a secondary facet without a skin set) are dropped.
    pub fn from_selection(selection: &FilterState) -> Self {
        let mut state = Self::default();
        state.set_class(selection.class.as_str());
        state.set_gender(selection.gender.as_str());
        state.set_skin_set(selection.skin_set.as_str());
        state.set_facet(Facet::Rarity, selection.rarity.as_str());
        state.set_facet(Facet::Color, selection.color.as_str());
        state.set_facet(Facet::Slot, selection.slot.as_str());
        state
    }

    pub fn has_primary(&self) -> bool {
        !self.class.is_empty() && !self.gender.is_empty()
    }

    pub fn has_skin_set(&self) -> bool {
        self.has_primary() && !self.skin_set.is_empty()
    }

    pub fn set_class(&mut self, class: impl Into<String>) {
        self.class = class.into();
        self.clear_skin_set();
    }

    pub fn set_gender(&mut self, gender: impl Into<String>) {
        self.gender = gender.into();
        self.clear_skin_set();
    }

    pub fn clear_class(&mut self) {
        self.set_class(String::new());
    }

    pub fn clear_gender(&mut self) {
        self.set_gender(String::new());
    }

    /// Choose a skin set. Ignored until class and gender are both chosen.
    pub fn set_skin_set(&mut self, skin_set: impl Into<String>) -> bool {
        if !self.has_primary() {
            return false;
        }
        self.skin_set = skin_set.into();
        self.clear_secondary();
        true
    }

    pub fn clear_skin_set(&mut self) {
        self.skin_set.clear();
        self.clear_secondary();
    }

    /// Set or clear (with `""`) a secondary facet. Ignored until a skin set
    /// is chosen.
    pub fn set_facet(&mut self, facet: Facet, value: impl Into<String>) -> bool {
        if !self.has_skin_set() {
            return false;
        }
        *self.facet_mut(facet) = value.into();
        true
    }

    pub fn facet(&self, facet: Facet) -> &str {
        match facet {
            Facet::Rarity => &self.rarity,
            Facet::Color => &self.color,
            Facet::Slot => &self.slot,
        }
    }

    fn facet_mut(&mut self, facet: Facet) -> &mut String {
        match facet {
            Facet::Rarity => &mut self.rarity,
            Facet::Color => &mut self.color,
            Facet::Slot => &mut self.slot,
        }
    }

    fn clear_secondary(&mut self) {
        self.rarity.clear();
        self.color.clear();
        self.slot.clear();
    }

    fn matches_primary(&self, record: &SkinRecord) -> bool {
        record.class == self.class && record.gender == self.gender
    }

    fn matches_skin_set(&self, record: &SkinRecord) -> bool {
        self.matches_primary(record) && record.skin_set == self.skin_set
    }

    fn matches_all(&self, record: &SkinRecord) -> bool {
        self.matches_skin_set(record)
            && [Facet::Rarity, Facet::Color, Facet::Slot].into_iter().all(|facet| {
                let wanted = self.facet(facet);
                wanted.is_empty() || field(record, facet) == wanted
            })
    }
}

fn field(record: &SkinRecord, facet: Facet) -> &str {
    match facet {
        Facet::Rarity => &record.rarity,
        Facet::Color => &record.color,
        Facet::Slot => &record.slot,
    }
}

/// Values offered by the class and gender selectors
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PrimaryFacets {
    pub classes: Vec<String>,
    pub genders: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkinSetOption {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "skin_sets", rename_all = "snake_case")]
pub enum SkinSetFacet {
    /// Class or gender not chosen yet
    SelectionRequired,
    /// Nothing in the catalog for this class and gender
    NoSkinSets,
    Available(Vec<SkinSetOption>),
}

/// One selectable secondary value; `value` is what filters, `label` is shown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SecondaryFacets {
    pub rarity: Vec<FacetOption>,
    pub color: Vec<FacetOption>,
    pub slot: Vec<FacetOption>,
}

impl SecondaryFacets {
    pub fn options(&self, facet: Facet) -> &[FacetOption] {
        match facet {
            Facet::Rarity => &self.rarity,
            Facet::Color => &self.color,
            Facet::Slot => &self.slot,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryEntry<'a> {
    pub filename: &'a str,
    #[serde(flatten)]
    pub record: &'a SkinRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "skins", rename_all = "snake_case")]
pub enum Gallery<'a> {
    SelectionRequired,
    SkinSetRequired,
    /// Fully specified filter with zero matches
    NoSkins,
    Entries(Vec<GalleryEntry<'a>>),
}

/// Everything a browser needs to render one state of the filter UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryView<'a> {
    pub filters: FilterState,
    pub primary: PrimaryFacets,
    pub skin_sets: SkinSetFacet,
    pub secondary: Option<SecondaryFacets>,
    pub gallery: Gallery<'a>,
}

/// Read-only query surface over a catalog
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'a> {
    catalog: &'a Catalog,
}

impl<'a> QueryEngine<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Distinct non-empty classes and genders, sorted
    pub fn primary_facets(&self) -> PrimaryFacets {
        let mut classes = BTreeSet::new();
        let mut genders = BTreeSet::new();
        for record in self.catalog.records() {
            if !record.class.is_empty() {
                classes.insert(record.class.clone());
            }
            if !record.gender.is_empty() {
                genders.insert(record.gender.clone());
            }
        }
        PrimaryFacets {
            classes: classes.into_iter().collect(),
            genders: genders.into_iter().collect(),
        }
    }

    /// Skin sets for the chosen class and gender, sorted by display name
    /// with "Other" last
    pub fn skin_sets(&self, state: &FilterState) -> SkinSetFacet {
        if !state.has_primary() {
            return SkinSetFacet::SelectionRequired;
        }

        let mut sets: BTreeMap<&str, &str> = BTreeMap::new();
        for record in self.catalog.records().filter(|r| state.matches_primary(r)) {
            if !record.skin_set.is_empty() && !record.skin_set_name.is_empty() {
                sets.insert(&record.skin_set, &record.skin_set_name);
            }
        }

        if sets.is_empty() {
            return SkinSetFacet::NoSkinSets;
        }

        let mut options: Vec<SkinSetOption> = sets
            .into_iter()
            .map(|(id, name)| SkinSetOption {
                id: id.to_string(),
                name: name.to_string(),
            })
            .collect();
        options.sort_by(|a, b| {
            (a.name == OTHER_SKIN_SET, &a.name, &a.id).cmp(&(b.name == OTHER_SKIN_SET, &b.name, &b.id))
        });
        SkinSetFacet::Available(options)
    }

    /// Rarity, color and slot values present in the chosen skin set.
    /// `None` until a skin set is chosen.
    pub fn secondary_facets(&self, state: &FilterState) -> Option<SecondaryFacets> {
        if !state.has_skin_set() {
            return None;
        }

        let in_set: Vec<&SkinRecord> = self
            .catalog
            .records()
            .filter(|r| state.matches_skin_set(r))
            .collect();

        let collect = |facet: Facet| -> Vec<FacetOption> {
            let values: BTreeSet<&str> = in_set
                .iter()
                .map(|r| field(r, facet))
                .filter(|v| !v.is_empty())
                .collect();
            let mut values: Vec<&str> = values.into_iter().collect();
            if facet == Facet::Rarity {
                // Tier order; unknown values after the known tiers
                values.sort_by_key(|v| Rarity::parse(v).map_or(Rarity::ALL.len(), |r| r as usize));
            }
            values
                .into_iter()
                .map(|v| FacetOption {
                    value: v.to_string(),
                    label: capitalize_first(v),
                })
                .collect()
        };

        Some(SecondaryFacets {
            rarity: collect(Facet::Rarity),
            color: collect(Facet::Color),
            slot: collect(Facet::Slot),
        })
    }

    /// Records matching every active filter
    pub fn gallery(&self, state: &FilterState) -> Gallery<'a> {
        if !state.has_primary() {
            return Gallery::SelectionRequired;
        }
        if !state.has_skin_set() {
            return Gallery::SkinSetRequired;
        }

        let entries: Vec<GalleryEntry<'a>> = self
            .catalog
            .iter()
            .filter(|(_, record)| state.matches_all(record))
            .map(|(filename, record)| GalleryEntry { filename, record })
            .collect();

        if entries.is_empty() {
            Gallery::NoSkins
        } else {
            Gallery::Entries(entries)
        }
    }

    /// Normalize `selection` through the cascade and compute every view
    pub fn view(&self, selection: &FilterState) -> QueryView<'a> {
        let filters = FilterState::from_selection(selection);
        QueryView {
            primary: self.primary_facets(),
            skin_sets: self.skin_sets(&filters),
            secondary: self.secondary_facets(&filters),
            gallery: self.gallery(&filters),
            filters,
        }
    }
}

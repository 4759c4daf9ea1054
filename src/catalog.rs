// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Skin catalog: the JSON sidecar shared by the tagger and the browser

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::vocab::Rarity;
use crate::{Result, SkintagError};

/// Tags for one sprite. Every field is always present; an empty string
/// stands for "unknown".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkinRecord {
    pub class: String,
    pub gender: String,
    pub skin_set: String,
    pub skin_set_name: String,
    pub slot: String,
    pub color: String,
    pub rarity: String,
}

/// Filename -> record mapping.
///
/// Keys are kept sorted so that identical inputs always serialize to
/// byte-identical documents, whatever order the directory was read in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    records: BTreeMap<String, SkinRecord>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record. Filenames are unique keys; a repeat replaces.
    pub fn insert(&mut self, filename: impl Into<String>, record: SkinRecord) {
        self.records.insert(filename.into(), record);
    }

    pub fn get(&self, filename: &str) -> Option<&SkinRecord> {
        self.records.get(filename)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SkinRecord)> {
        self.records.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn records(&self) -> impl Iterator<Item = &SkinRecord> {
        self.records.values()
    }

    /// Final pass folding any misspelled rarity into its canonical value
    pub fn normalize_rarities(&mut self) {
        for record in self.records.values_mut() {
            record.rarity = Rarity::normalize(&record.rarity);
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| SkintagError::Catalog(format!("Malformed catalog: {}", e)))
    }

    /// Read a catalog document from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            SkintagError::Catalog(format!("Cannot read {}: {}", path.display(), e))
        })?;
        let catalog = Self::from_json_str(&content)?;
        debug!("Loaded {} records from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    /// Write the whole catalog at once: serialize to a sibling temp file,
    /// then rename over the destination. Returns the record count.
    pub fn write_atomic(&self, path: &Path) -> Result<usize> {
        let json = self.to_json_pretty()?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = temp_path_for(path);
        {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, path)?;

        info!("Wrote {} records to {:?}", self.len(), path);
        Ok(self.len())
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "catalog.json".into());
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(rarity: &str) -> SkinRecord {
        SkinRecord {
            class: "Orc".to_string(),
            gender: "Male".to_string(),
            skin_set: "tusked".to_string(),
            skin_set_name: "Tusked".to_string(),
            slot: "arms".to_string(),
            color: "green".to_string(),
            rarity: rarity.to_string(),
        }
    }

    #[test]
    fn test_every_field_serialized() {
        let mut catalog = Catalog::new();
        catalog.insert("HeroOrcMale_tusked_arms.png", SkinRecord::default());

        let value: serde_json::Value =
            serde_json::from_str(&catalog.to_json_pretty().unwrap()).unwrap();
        let fields = value["HeroOrcMale_tusked_arms.png"].as_object().unwrap();
        assert_eq!(fields.len(), 7);
        assert!(fields.values().all(|v| v == ""));
    }

    #[test]
    fn test_keys_sorted_regardless_of_insert_order() {
        let mut a = Catalog::new();
        a.insert("b.png", record("rare"));
        a.insert("a.png", record("epic"));
        let mut b = Catalog::new();
        b.insert("a.png", record("epic"));
        b.insert("b.png", record("rare"));
        assert_eq!(a.to_json_pretty().unwrap(), b.to_json_pretty().unwrap());
    }

    #[test]
    fn test_normalize_rarities() {
        let mut catalog = Catalog::new();
        catalog.insert("x.png", record("uncommom"));
        catalog.normalize_rarities();
        catalog.normalize_rarities();
        assert_eq!(catalog.get("x.png").unwrap().rarity, "uncommon");
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let err = Catalog::from_json_str(r#"{"x.png": {"class": "Orc"}}"#).unwrap_err();
        assert!(matches!(err, SkintagError::Catalog(_)));
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("skin_tags.json");

        let mut catalog = Catalog::new();
        catalog.insert("HeroOrcMale_tusked_arms_green_rare.png", record("rare"));
        assert_eq!(catalog.write_atomic(&path).unwrap(), 1);

        assert!(!dir.path().join("out").join("skin_tags.json.tmp").exists());
        assert_eq!(Catalog::load(&path).unwrap(), catalog);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = Catalog::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("Cannot read"));
    }
}

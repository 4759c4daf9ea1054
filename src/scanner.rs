// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Sprite directory scanning and catalog generation

use std::path::Path;
use tracing::{debug, info, warn};

use crate::classifier::{classify_all, ClassifyReport};
use crate::watcher::should_process;
use crate::{AppConfig, Result, SkintagError};

/// List sprite filenames (not paths) directly inside `dir`, sorted.
///
/// Not recursive. Names that are not valid UTF-8 are skipped with a warning.
pub fn list_sprites(dir: &Path, extension: &str) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Err(SkintagError::FileSystem(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Sprite directory not found: {}", dir.display()),
        )));
    }

    let pattern = format!(
        "{}/*.{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        extension
    );
    debug!("Scanning with pattern {}", pattern);

    let mut names = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                warn!("Unreadable entry: {}", e);
                continue;
            }
        };
        if !path.is_file() || !should_process(&path) {
            continue;
        }
        match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => names.push(name.to_string()),
            None => warn!("Skipping non UTF-8 filename: {:?}", path),
        }
    }

    names.sort();
    Ok(names)
}

/// Scan a directory and classify every sprite in it
pub fn tag_directory(dir: &Path, extension: &str) -> Result<ClassifyReport> {
    let names = list_sprites(dir, extension)?;
    info!("Found {} .{} files in {:?}", names.len(), extension, dir);
    Ok(classify_all(&names))
}

/// Full tagger run: scan, classify, and replace the catalog on disk
pub fn run_scan(config: &AppConfig) -> Result<ClassifyReport> {
    let report = tag_directory(&config.sprite_dir, &config.extension)?;
    report.catalog.write_atomic(&config.catalog_path)?;
    info!("Processed {} files", report.catalog.len());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Catalog;
    use std::fs;
    use tempfile::tempdir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"\x89PNG").unwrap();
    }

    #[test]
    fn test_list_sprites_filters_and_sorts() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "HeroOrcMale_tusked_arms.png");
        touch(dir.path(), "HeroBomberFemale_tank_head.png");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), ".hidden.png");
        fs::create_dir(dir.path().join("nested.png")).unwrap();

        let names = list_sprites(dir.path(), "png").unwrap();
        assert_eq!(
            names,
            vec!["HeroBomberFemale_tank_head.png", "HeroOrcMale_tusked_arms.png"]
        );
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(list_sprites(&dir.path().join("Sprite"), "png").is_err());
    }

    #[test]
    fn test_run_scan_writes_fresh_catalog() {
        let dir = tempdir().unwrap();
        let sprites = dir.path().join("Sprite");
        fs::create_dir(&sprites).unwrap();
        touch(&sprites, "HeroChampionFemale_legs_doomsday_pink_uncommon.png");
        touch(&sprites, "Hero_banner.png");
        touch(&sprites, "logo.png");

        let catalog_path = dir.path().join("skin_tags.json");
        fs::write(&catalog_path, r#"{"stale.png": {}}"#).unwrap();

        let config = AppConfig {
            sprite_dir: sprites,
            catalog_path: catalog_path.clone(),
            ..AppConfig::default()
        };

        let report = run_scan(&config).unwrap();
        assert_eq!(report.catalog.len(), 1);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.ineligible, 1);

        let on_disk = Catalog::load(&catalog_path).unwrap();
        assert!(on_disk.get("stale.png").is_none());
        let record = on_disk
            .get("HeroChampionFemale_legs_doomsday_pink_uncommon.png")
            .unwrap();
        assert_eq!(record.skin_set_name, "Street Falcon");
    }

    #[test]
    fn test_repeated_scans_are_byte_identical() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "HeroOrcMale_horned_belt_black_epic.png");
        touch(dir.path(), "HeroOrcFemale_sabbath_legs_violet_uncommom.png");

        let first = tag_directory(dir.path(), "png").unwrap();
        let second = tag_directory(dir.path(), "png").unwrap();
        assert_eq!(
            first.catalog.to_json_pretty().unwrap(),
            second.catalog.to_json_pretty().unwrap()
        );
    }
}

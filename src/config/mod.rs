// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Configuration management for Skintag

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Directory holding the sprite images
    #[serde(default = "default_sprite_dir")]
    pub sprite_dir: PathBuf,

    /// Where the tagger writes the catalog and the browser reads it
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Image extension picked up by the scanner (without the dot)
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Web UI settings
    #[serde(default)]
    pub web: WebConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct WebConfig {
    #[serde(default = "default_web_host")]
    pub host: String,
    #[serde(default = "default_web_port")]
    pub port: u16,
    /// URL path the sprite directory is served under
    #[serde(default = "default_sprite_url_prefix")]
    pub sprite_url_prefix: String,
    /// Image shown when a sprite fails to load
    #[serde(default = "default_placeholder_url")]
    pub placeholder_url: String,
}

// Default value functions
fn default_sprite_dir() -> PathBuf { PathBuf::from("Sprite") }
fn default_catalog_path() -> PathBuf { PathBuf::from("skin_tags.json") }
fn default_extension() -> String { "png".to_string() }
fn default_web_host() -> String { "127.0.0.1".to_string() }
fn default_web_port() -> u16 { 8080 }
fn default_sprite_url_prefix() -> String { "/Sprite".to_string() }
fn default_placeholder_url() -> String {
    "https://via.placeholder.com/200x200?text=Image+Not+Found".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sprite_dir: default_sprite_dir(),
            catalog_path: default_catalog_path(),
            extension: default_extension(),
            web: WebConfig::default(),
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_web_host(),
            port: default_web_port(),
            sprite_url_prefix: default_sprite_url_prefix(),
            placeholder_url: default_placeholder_url(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = serde_json::from_str(&content)
                .map_err(|e| crate::SkintagError::Config(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            tracing::info!("Config file not found at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Presence checks only
    pub fn validate(&self) -> crate::Result<()> {
        if self.extension.trim().is_empty() || self.extension.contains(['/', '*', '.']) {
            return Err(crate::SkintagError::Config(format!(
                "Invalid extension '{}'", self.extension
            )));
        }
        let prefix = &self.web.sprite_url_prefix;
        if !prefix.starts_with('/') || prefix.trim_end_matches('/').is_empty() {
            return Err(crate::SkintagError::Config(
                "web.sprite_url_prefix must be a path below '/'".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("skintag.json")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.catalog_path, PathBuf::from("skin_tags.json"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("skintag.json");
        std::fs::write(&path, r#"{"sprite_dir": "art", "web": {"port": 9000}}"#).unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.sprite_dir, PathBuf::from("art"));
        assert_eq!(config.extension, "png");
        assert_eq!(config.web.port, 9000);
        assert_eq!(config.web.host, "127.0.0.1");
    }

    #[test]
    fn test_save_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("skintag.json");
        let mut config = AppConfig::default();
        config.web.port = 8181;
        config.save(&path).unwrap();
        assert_eq!(AppConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_rejects_bad_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("skintag.json");
        std::fs::write(&path, r#"{"extension": "*.png"}"#).unwrap();
        assert!(AppConfig::load(&path).is_err());
    }
}

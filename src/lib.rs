// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Skintag: Hero Skin Sprite Tagger
//!
//! Derives class, gender, skin set, slot, color and rarity from sprite
//! filenames, persists them as a JSON catalog, and serves a cascading
//! filter browser over that catalog.

pub mod catalog;
pub mod classifier;
pub mod config;
pub mod error;
pub mod query;
pub mod scanner;
pub mod vocab;
pub mod watcher;
pub mod web;

pub use catalog::{Catalog, SkinRecord};
pub use config::AppConfig;
pub use error::{Result, SkintagError};

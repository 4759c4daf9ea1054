// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Error types for Skintag

use thiserror::Error;

/// Result type alias for Skintag operations
pub type Result<T> = std::result::Result<T, SkintagError>;

/// Skintag error types
#[derive(Error, Debug)]
pub enum SkintagError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    #[error("Watch error: {0}")]
    Watch(#[from] notify::Error),

    #[error("Invalid scan pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),
}

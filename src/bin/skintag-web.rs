// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Skintag Web Browser
//!
//! Standalone web server for browsing the skin catalog.

use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info, warn};

use skintag::config::AppConfig;
use skintag::Result;

#[derive(Parser, Debug)]
#[command(name = "skintag-web")]
#[command(author = "Jonathan D. A. Jewell <hyperpolymath>")]
#[command(version = "1.0.0")]
#[command(about = "Skintag catalog browser")]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "skintag.json")]
    config: PathBuf,

    /// Host to bind to
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Catalog file to serve (overrides config)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Sprite directory to serve (overrides config)
    #[arg(long)]
    sprites: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Open browser automatically
    #[arg(long)]
    open: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Skintag Web v1.0.0");

    // Load config
    let mut config = AppConfig::load(&args.config)?;

    // Apply CLI overrides
    if let Some(host) = args.host {
        config.web.host = host;
    }
    if let Some(port) = args.port {
        config.web.port = port;
    }
    if let Some(catalog) = args.catalog {
        config.catalog_path = catalog;
    }
    if let Some(sprites) = args.sprites {
        config.sprite_dir = sprites;
    }

    if !config.catalog_path.exists() {
        warn!("Catalog {:?} not found yet. Run: skintag scan", config.catalog_path);
    }

    // Open browser if requested
    if args.open {
        let url = format!("http://{}:{}", config.web.host, config.web.port);
        if let Err(e) = open_browser(&url) {
            error!("Failed to open browser: {}", e);
        }
    }

    skintag::web::start_server(config).await
}

fn open_browser(url: &str) -> std::io::Result<()> {
    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()?;
    }
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()?;
    }
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_overrides() {
        let args = Args::try_parse_from([
            "skintag-web", "-H", "0.0.0.0", "--port", "9090", "--catalog", "out/tags.json",
        ]).unwrap();
        assert_eq!(args.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(args.port, Some(9090));
        assert_eq!(args.catalog, Some(PathBuf::from("out/tags.json")));
        assert!(!args.open);
    }
}

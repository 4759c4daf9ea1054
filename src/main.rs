// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Skintag: Hero Skin Sprite Tagger
//!
//! Tags sprite images from their filenames and writes the skin catalog.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::signal;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use skintag::classifier::{classify, classify_all, Classification, ClassifyReport};
use skintag::config::AppConfig;
use skintag::query::{FilterState, Gallery, QueryEngine, SkinSetFacet};
use skintag::scanner::{run_scan, tag_directory};
use skintag::watcher::{FileWatcher, WatchEvent};
use skintag::{Catalog, Result, SkintagError};

/// Quiet period after the last directory change before rescanning
const RESCAN_DEBOUNCE: Duration = Duration::from_millis(750);

/// Skintag CLI - Hero Skin Sprite Tagger
#[derive(Parser, Debug)]
#[command(name = "skintag")]
#[command(author = "Jonathan D. A. Jewell <hyperpolymath>")]
#[command(version = "1.0.0")]
#[command(about = "Derive skin tags from sprite filenames", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (JSON format)
    #[arg(short, long, default_value = "skintag.json", global = true)]
    config: PathBuf,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable trace logging (most verbose)
    #[arg(long, global = true)]
    trace: bool,

    /// Output format for results
    #[arg(long, global = true, default_value = "text", value_parser = ["text", "json"])]
    format: String,

    /// Suppress non-essential output (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan the sprite directory and write the catalog
    Scan {
        /// Sprite directory (overrides config)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Catalog output file (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the catalog instead of writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Rewrite the catalog whenever the sprite directory changes
    Watch {
        /// Sprite directory (overrides config)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Catalog output file (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Classify filenames without touching the disk
    Classify {
        /// Filenames to classify
        #[arg(required = true)]
        filenames: Vec<String>,
    },

    /// Browse the catalog with cascading filters
    Query {
        /// Catalog file (overrides config)
        #[arg(long)]
        catalog: Option<PathBuf>,

        #[arg(long)]
        class: Option<String>,

        #[arg(long)]
        gender: Option<String>,

        #[arg(long)]
        skin_set: Option<String>,

        #[arg(long)]
        rarity: Option<String>,

        #[arg(long)]
        color: Option<String>,

        #[arg(long)]
        slot: Option<String>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Initialize a new Skintag project
    Init {
        /// Directory to initialize (default: current)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Force overwrite existing configuration
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Generate default configuration file
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "skintag.json")]
        output: PathBuf,
    },

    /// Validate configuration file
    Validate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if !cli.quiet {
        info!("Skintag v1.0.0 - Hero Skin Sprite Tagger");
    }

    // Load configuration
    let mut config = AppConfig::load(&cli.config)?;

    match cli.command {
        Some(Commands::Scan { dir, output, dry_run }) => {
            apply_overrides(&mut config, dir, output);
            run_scan_command(&config, dry_run, &cli.format)
        }
        Some(Commands::Watch { dir, output }) => {
            apply_overrides(&mut config, dir, output);
            run_watch(config).await
        }
        Some(Commands::Classify { filenames }) => {
            run_classify(&filenames, &cli.format)
        }
        Some(Commands::Query { catalog, class, gender, skin_set, rarity, color, slot }) => {
            if let Some(catalog) = catalog {
                config.catalog_path = catalog;
            }
            let selection = FilterState {
                class: class.unwrap_or_default(),
                gender: gender.unwrap_or_default(),
                skin_set: skin_set.unwrap_or_default(),
                rarity: rarity.unwrap_or_default(),
                color: color.unwrap_or_default(),
                slot: slot.unwrap_or_default(),
            };
            run_query(&config, &selection, &cli.format)
        }
        Some(Commands::Config { action }) => {
            run_config_command(config, action, &cli.config)
        }
        Some(Commands::Init { dir, force }) => {
            run_init(dir, force)
        }
        None => {
            // Default: one scan with the configured paths
            run_scan_command(&config, false, &cli.format)
        }
    }
}

fn apply_overrides(config: &mut AppConfig, dir: Option<PathBuf>, output: Option<PathBuf>) {
    if let Some(dir) = dir {
        config.sprite_dir = dir;
    }
    if let Some(output) = output {
        config.catalog_path = output;
    }
}

fn print_diagnostics(report: &ClassifyReport) {
    for diagnostic in &report.diagnostics {
        println!("Warning: {}", diagnostic);
    }
}

/// Catalog JSON for stdout and warning lines for stderr, in every format
fn dry_run_output(report: &ClassifyReport) -> Result<(String, Vec<String>)> {
    let warnings = report
        .diagnostics
        .iter()
        .map(|d| format!("Warning: {}", d))
        .collect();
    Ok((report.catalog.to_json_pretty()?, warnings))
}

/// Run the tagger once
fn run_scan_command(config: &AppConfig, dry_run: bool, format: &str) -> Result<()> {
    if dry_run {
        let report = tag_directory(&config.sprite_dir, &config.extension)?;
        let (catalog, warnings) = dry_run_output(&report)?;
        println!("{}", catalog);
        for warning in warnings {
            eprintln!("{}", warning);
        }
        return Ok(());
    }

    let report = run_scan(config)?;

    match format {
        "json" => {
            let summary = serde_json::json!({
                "processed": report.catalog.len(),
                "output": config.catalog_path.to_string_lossy(),
                "diagnostics": report.diagnostics.iter().map(|d| d.to_string()).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        _ => {
            print_diagnostics(&report);
            println!("Processed {} files", report.catalog.len());
            println!("Results written to {}", config.catalog_path.display());
        }
    }

    Ok(())
}

/// Keep the catalog in sync with the sprite directory until interrupted
async fn run_watch(config: AppConfig) -> Result<()> {
    let mut watcher = FileWatcher::new()?;
    watcher.watch(&config.sprite_dir)?;

    if let Err(e) = run_scan(&config) {
        error!("Initial scan failed: {}", e);
    }

    // Setup graceful shutdown
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        let ctrl_c = async {
            if let Err(e) = signal::ctrl_c().await {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    sigterm.recv().await;
                }
                Err(e) => {
                    error!("Failed to install SIGTERM handler: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
            _ = terminate => info!("Received SIGTERM, shutting down..."),
        }

        let _ = shutdown_tx.send(true);
    });

    info!("Watching {:?}. Press Ctrl+C to stop.", watcher.watched_paths());

    let mut pending: Option<Instant> = None;

    loop {
        if *shutdown_rx.borrow() {
            break;
        }

        match watcher.next_event(Duration::from_millis(100)) {
            Some(WatchEvent::Error(e)) => warn!("Watch error: {}", e),
            Some(event) if event.changes_listing(&config.extension) => {
                debug!("Directory changed: {:?}", event);
                pending = Some(Instant::now());
            }
            _ => {}
        }

        if pending.is_some_and(|since| since.elapsed() >= RESCAN_DEBOUNCE) {
            pending = None;
            match run_scan(&config) {
                Ok(report) => info!(
                    "Catalog refreshed: {} records, {} warnings",
                    report.catalog.len(),
                    report.diagnostics.len()
                ),
                Err(e) => error!("Rescan failed: {}", e),
            }
        }
    }

    info!("Skintag stopped.");
    Ok(())
}

/// Classify filenames given on the command line
fn run_classify(filenames: &[String], format: &str) -> Result<()> {
    match format {
        "json" => {
            let report = classify_all(filenames);
            println!("{}", report.catalog.to_json_pretty()?);
            for diagnostic in &report.diagnostics {
                eprintln!("Warning: {}", diagnostic);
            }
        }
        _ => {
            for filename in filenames {
                match classify(filename) {
                    Classification::Ineligible => println!("{}: skipped (not a hero sprite)", filename),
                    Classification::Unparsed(d) => println!("Warning: {}", d),
                    Classification::Tagged(r) => println!(
                        "{}: class={} gender={} skin_set={} ({}) slot={} color={} rarity={}",
                        filename, r.class, r.gender, r.skin_set, r.skin_set_name, r.slot, r.color, r.rarity
                    ),
                }
            }
        }
    }
    Ok(())
}

/// Run the filter engine against the catalog
fn run_query(config: &AppConfig, selection: &FilterState, format: &str) -> Result<()> {
    let catalog = Catalog::load(&config.catalog_path)?;
    let engine = QueryEngine::new(&catalog);
    let view = engine.view(selection);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("Classes: {}", view.primary.classes.join(", "));
    println!("Genders: {}", view.primary.genders.join(", "));

    match &view.skin_sets {
        SkinSetFacet::SelectionRequired => {
            println!("\nPlease select a class and gender to see available skin sets.");
        }
        SkinSetFacet::NoSkinSets => {
            println!("\nNo skin sets found for the selected class and gender.");
        }
        SkinSetFacet::Available(sets) => {
            println!("\nSkin sets:");
            for set in sets {
                let marker = if set.id == view.filters.skin_set { "→" } else { " " };
                println!("  {} {} [{}]", marker, set.name, set.id);
            }
        }
    }

    if let Some(secondary) = &view.secondary {
        let labels = |options: &[skintag::query::FacetOption]| {
            options.iter().map(|o| o.label.as_str()).collect::<Vec<_>>().join(", ")
        };
        println!("\nRarities: {}", labels(&secondary.rarity[..]));
        println!("Colors: {}", labels(&secondary.color[..]));
        println!("Slots: {}", labels(&secondary.slot[..]));
    }

    match &view.gallery {
        Gallery::SelectionRequired | Gallery::SkinSetRequired => {
            println!("\nSelect a skin set to view skins.");
        }
        Gallery::NoSkins => println!("\nNo skins found for the selected filters."),
        Gallery::Entries(entries) => {
            println!("\nSkins ({}):", entries.len());
            for entry in entries {
                println!(
                    "  {} (slot: {}, color: {}, rarity: {})",
                    entry.filename,
                    or_unknown(&entry.record.slot),
                    or_unknown(&entry.record.color),
                    or_unknown(&entry.record.rarity)
                );
            }
        }
    }

    Ok(())
}

fn or_unknown(value: &str) -> &str {
    if value.is_empty() { "Unknown" } else { value }
}

/// Run config commands
fn run_config_command(config: AppConfig, action: ConfigCommands, config_path: &Path) -> Result<()> {
    match action {
        ConfigCommands::Show => {
            let json = serde_json::to_string_pretty(&config)?;
            println!("{}", json);
        }
        ConfigCommands::Generate { output } => {
            let default_config = AppConfig::default();
            default_config.save(&output)?;
            println!("Generated config at {:?}", output);
        }
        ConfigCommands::Validate => {
            config.validate()?;
            println!("Configuration at {:?} is valid", config_path);
            println!("  Sprite directory: {:?}", config.sprite_dir);
            println!("  Catalog: {:?}", config.catalog_path);
            println!("  Extension: .{}", config.extension);
        }
    }

    Ok(())
}

/// Initialize a new Skintag project
fn run_init(dir: Option<PathBuf>, force: bool) -> Result<()> {
    let target = dir.unwrap_or_else(|| PathBuf::from("."));
    let config_path = target.join("skintag.json");

    if config_path.exists() && !force {
        return Err(SkintagError::Config(
            "skintag.json already exists. Use --force to overwrite".to_string()
        ));
    }

    let config = AppConfig::default();
    std::fs::create_dir_all(target.join(&config.sprite_dir))?;
    config.save(&config_path)?;

    println!("Skintag initialized in {:?}", target);
    println!("\nCreated:");
    println!("  - skintag.json");
    println!("  - {}/", config.sprite_dir.display());
    println!("\nNext steps:");
    println!("  1. Copy sprites into {}/", config.sprite_dir.display());
    println!("  2. Tag them: skintag scan");
    println!("  3. Browse: skintag-web --open");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["skintag"]).unwrap();
        assert!(!cli.verbose);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_scan_command() {
        let cli = Cli::try_parse_from([
            "skintag", "scan", "--dry-run", "--dir", "/tmp/Sprite"
        ]).unwrap();

        match cli.command {
            Some(Commands::Scan { dry_run, dir, output }) => {
                assert!(dry_run);
                assert_eq!(dir, Some(PathBuf::from("/tmp/Sprite")));
                assert!(output.is_none());
            }
            _ => panic!("Expected Scan command"),
        }
    }

    #[test]
    fn test_cli_query_command() {
        let cli = Cli::try_parse_from([
            "skintag", "query", "--class", "Orc", "--gender", "Male", "--skin-set", "tank", "--format", "json"
        ]).unwrap();

        assert_eq!(cli.format, "json");
        match cli.command {
            Some(Commands::Query { class, gender, skin_set, rarity, .. }) => {
                assert_eq!(class.as_deref(), Some("Orc"));
                assert_eq!(gender.as_deref(), Some("Male"));
                assert_eq!(skin_set.as_deref(), Some("tank"));
                assert!(rarity.is_none());
            }
            _ => panic!("Expected Query command"),
        }
    }

    #[test]
    fn test_cli_classify_requires_filenames() {
        assert!(Cli::try_parse_from(["skintag", "classify"]).is_err());
    }

    #[test]
    fn test_dry_run_keeps_diagnostics() {
        let report = classify_all(["HeroOrcMale_tank_head_red_rare.png", "Hero_frame.png"]);
        let (catalog, warnings) = dry_run_output(&report).unwrap();
        assert!(catalog.contains("HeroOrcMale_tank_head_red_rare.png"));
        assert!(!catalog.contains("Hero_frame.png"));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Hero_frame.png"));
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        run_init(Some(dir.path().to_path_buf()), false).unwrap();
        assert!(dir.path().join("skintag.json").exists());
        assert!(dir.path().join("Sprite").is_dir());
        assert!(run_init(Some(dir.path().to_path_buf()), false).is_err());
        assert!(run_init(Some(dir.path().to_path_buf()), true).is_ok());
    }
}

//! CLI administration tool for country-registry.
//!
//! Runs the upstream sync and inspects the database without going through
//! the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Sync from the configured COUNTRIES_SOURCE_URL
//! cargo run --bin admin -- sync
//!
//! # Sync from another URL or a local file, without the confirmation prompt
//! cargo run --bin admin -- sync --url https://example.com/countries.json --yes
//! cargo run --bin admin -- sync --file ./countries.json --yes
//!
//! # Per-region statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server, see `country_registry::config`.

use country_registry::application::services::{StatsService, SyncService};
use country_registry::config::{self, Config, mask_connection_string};
use country_registry::domain::country_source::CountrySource;
use country_registry::domain::sync_report::{EntityKind, Outcome, SyncEntry, SyncReport};
use country_registry::infrastructure::persistence::{
    PgCountryRepository, PgRegionRepository, PgTopLevelDomainRepository,
};
use country_registry::infrastructure::source::{
    FileCountrySource, HttpCountrySource, HttpSourceConfig,
};
use country_registry::{server, telemetry};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::path::PathBuf;
use std::sync::Arc;

/// CLI tool for managing country-registry.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the upstream country list and reconcile the database with it
    Sync {
        /// Fetch from this URL instead of COUNTRIES_SOURCE_URL
        #[arg(long, conflicts_with = "file")]
        url: Option<String>,

        /// Read the list from a local JSON file
        #[arg(long)]
        file: Option<PathBuf>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show per-region country count and population
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_fallback("warn");

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    match cli.command {
        Commands::Sync { url, file, yes } => handle_sync(&config, url, file, yes).await?,
        Commands::Stats => handle_stats(&server::connect(&config).await?).await?,
        Commands::Db { action } => handle_db_action(action, &config).await?,
    }

    Ok(())
}

/// Builds the source selected on the command line.
fn build_source(
    config: &Config,
    url: Option<String>,
    file: Option<PathBuf>,
) -> Result<Box<dyn CountrySource>> {
    if let Some(path) = file {
        return Ok(Box::new(FileCountrySource::new(path)));
    }

    let source_config = match url {
        Some(url) => {
            let parsed = url::Url::parse(&url).with_context(|| format!("Invalid URL '{url}'"))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                anyhow::bail!("--url must use http or https, got '{}'", parsed.scheme());
            }
            HttpSourceConfig {
                url,
                ..config.source_config()
            }
        }
        None => config.source_config(),
    };

    Ok(Box::new(HttpCountrySource::new(source_config)?))
}

/// Fetches the upstream list and reconciles every record.
///
/// # Flow
///
/// 1. Resolve the source (`--file`, `--url` or the configured URL)
/// 2. Confirm (unless `--yes`)
/// 3. Connect and apply migrations
/// 4. Reconcile records in order, then print one line per entity touched
async fn handle_sync(
    config: &Config,
    url: Option<String>,
    file: Option<PathBuf>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🌍 Sync countries".bright_blue().bold());
    println!();

    let source = build_source(config, url, file)?;

    println!("  Source:   {}", source.describe().cyan());
    println!(
        "  Database: {}",
        mask_connection_string(&config.database_url).bright_black()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Update the database from this source?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let pool = Arc::new(server::connect(config).await?);
    server::migrate(&pool).await?;

    let service = SyncService::new(
        Arc::new(PgRegionRepository::new(pool.clone())),
        Arc::new(PgCountryRepository::new(pool.clone())),
        Arc::new(PgTopLevelDomainRepository::new(pool)),
    );

    let report = service
        .sync(source.as_ref())
        .await
        .context("Sync failed; records before the failing one were kept")?;

    print_report(&report);

    Ok(())
}

fn print_report(report: &SyncReport) {
    for entry in &report.entries {
        println!("  {}", colorize(entry));
    }

    println!();
    println!(
        "  Created: {}  Updated: {}  Unchanged: {}  New regions: {}",
        report.created().to_string().bright_green().bold(),
        report.updated().to_string().bright_yellow().bold(),
        report.unchanged().to_string().bright_black().bold(),
        report.regions_created().to_string().bright_cyan().bold()
    );
    println!(
        "  Finished in {} ms",
        (report.finished_at - report.started_at).num_milliseconds()
    );
    println!();
    println!("{}", "✅ Sync complete".green().bold());
}

fn colorize(entry: &SyncEntry) -> ColoredString {
    let line = entry.to_string();
    match (entry.kind, entry.outcome) {
        (EntityKind::Region, _) => line.bright_cyan(),
        (EntityKind::Country, Outcome::Created) => line.green(),
        (EntityKind::Country, Outcome::Updated) => line.yellow(),
        (EntityKind::Country, Outcome::Unchanged) => line.normal(),
    }
}

/// Prints the per-region statistics table.
///
/// # Output Format
///
/// ```text
///   Region                    Countries      Population
///   ───────────────────────────────────────────────────
///   Africa                           59    1216130000
/// ```
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Region statistics".bright_blue().bold());
    println!();

    let service = StatsService::new(Arc::new(PgRegionRepository::new(Arc::new(pool.clone()))));
    let stats = service
        .compute_stats()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to compute stats: {e}"))?;

    if stats.is_empty() {
        println!("{}", "  No regions yet".yellow());
        println!();
        println!(
            "  Load data with: {} admin sync",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<24} {:>10} {:>15}",
        "Region".bright_white().bold(),
        "Countries".bright_white().bold(),
        "Population".bright_white().bold()
    );
    println!("  {}", "─".repeat(51).bright_black());

    for region in &stats {
        println!(
            "  {:<24} {:>10} {:>15}",
            region.name.cyan(),
            region.number_countries,
            region.total_population
        );
    }

    let countries: i64 = stats.iter().map(|r| r.number_countries).sum();
    let population: i64 = stats.iter().map(|r| r.total_population).sum();

    println!("  {}", "─".repeat(51).bright_black());
    println!(
        "  {:<24} {:>10} {:>15}",
        "Total".bright_white().bold(),
        countries.to_string().bright_green().bold(),
        population.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, config: &Config) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            let pool = server::connect(config).await?;
            sqlx::query("SELECT 1").fetch_one(&pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let pool = server::connect(config).await?;
            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(&pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());

            for table in ["regions", "countries", "top_level_domains"] {
                let count: Option<i64> =
                    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
                        .fetch_one(&pool)
                        .await
                        .ok();

                match count {
                    Some(count) => println!("  {table:<18} {}", count.to_string().bright_green()),
                    None => println!("  {table:<18} {}", "not migrated".yellow()),
                }
            }
            println!();
        }
    }

    Ok(())
}

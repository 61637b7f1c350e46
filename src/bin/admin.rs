//! CLI administration tool for url-purger.
//!
//! Purges URLs and inspects flood control without going through the HTTP
//! API.
//!
//! # Usage
//!
//! ```bash
//! # Purge URLs (comma- or newline-separated)
//! cargo run --bin admin -- purge "https://www.example.com/,https://www.example.com/news"
//!
//! # Show how much of the flood budget is used
//! cargo run --bin admin -- flood status
//!
//! # Delete expired flood events
//! cargo run --bin admin -- flood gc
//!
//! # Print the effective configuration
//! cargo run --bin admin -- config
//! ```
//!
//! Purges started here are neither limited by nor counted against the flood
//! budget. The exit code is 1 when any backend reported a failed URL.
//!
//! # Environment Variables
//!
//! Same as the server, see `url_purger::config`.

use url_purger::application::services::{FLOOD_EVENT, PurgeService};
use url_purger::config::{self, Config, mask_connection_string, mask_secret};
use url_purger::domain::entities::{NoticeLevel, PurgeBatch, PurgeReport};
use url_purger::server::{build_purge_service, connect_flood_store, connect_page_cache};

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// CLI tool for managing url-purger.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Purge URLs from every enabled backend
    Purge {
        /// URLs, separated by commas or newlines
        #[arg(required = true)]
        urls: Vec<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Inspect flood control
    Flood {
        #[command(subcommand)]
        action: FloodAction,
    },

    /// Print the effective configuration (secrets masked)
    Config,
}

/// Flood control subcommands.
#[derive(Subcommand)]
enum FloodAction {
    /// Show used and remaining purge budget
    Status,

    /// Delete expired flood events
    Gc,

    /// Reset the purge budget
    Clear {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("warn"))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Purge { urls, yes } => {
            let service = purge_service(&config).await?;
            purge(&service, &urls, yes).await
        }
        Commands::Flood { action } => {
            let service = purge_service(&config).await?;
            handle_flood_action(&service, action).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Config => {
            print_config(&config);
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn purge_service(config: &Config) -> Result<PurgeService> {
    let page_cache = connect_page_cache(config).await;
    let flood_store = connect_flood_store(config).await?;
    Ok(build_purge_service(config, page_cache, flood_store))
}

/// Joins CLI arguments into the newline-delimited form the validator expects.
fn to_raw_list(args: &[String]) -> String {
    args.iter()
        .flat_map(|arg| arg.split(','))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Purges the given URLs after confirmation.
///
/// # Flow
///
/// 1. Split arguments on commas
/// 2. Validate the batch (nothing is purged if any URL is invalid)
/// 3. Confirm (unless `--yes` flag)
/// 4. Purge and print one line per backend
async fn purge(service: &PurgeService, urls: &[String], skip_confirm: bool) -> Result<ExitCode> {
    println!("{}", "🧹 Purge URLs".bright_blue().bold());
    println!();

    let raw = to_raw_list(urls);
    let batch = match PurgeBatch::parse(&raw, service.settings().max_url_per_request) {
        Ok(batch) => batch,
        Err(e) => {
            println!("{} {}", "❌".red(), e.to_string().red());
            return Ok(ExitCode::FAILURE);
        }
    };

    for url in &batch {
        println!("  {}", url.cyan());
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Purge {} url(s) from all backends?", batch.len()))
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(ExitCode::SUCCESS);
        }
    }

    let report = service.purge_unthrottled(&raw).await?;
    print_report(&report);

    if report.has_errors() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Prints processed/failed counts and the notice of each backend.
///
/// # Output Format
///
/// ```text
///   page_cache   2 processed  0 failed
///   varnish      1 processed  1 failed
///     ✗ https://www.example.com/news
/// ```
fn print_report(report: &PurgeReport) {
    if report.is_empty() {
        println!("{}", "⚠️  No backend is enabled".yellow());
        return;
    }

    for (backend, result) in report.iter() {
        let failed = result.errors.len().to_string();
        println!(
            "  {:<12} {} processed  {} failed",
            backend.as_str().bright_white().bold(),
            result.processed.len().to_string().green(),
            if result.has_errors() {
                failed.red().bold()
            } else {
                failed.bright_black()
            }
        );
        for url in &result.errors {
            println!("    {} {}", "✗".red(), url.bright_black());
        }
    }

    println!();
    for notice in report.notices() {
        let line = match notice.level {
            NoticeLevel::Status => notice.message.green(),
            NoticeLevel::Warning => notice.message.yellow(),
            NoticeLevel::Error => notice.message.red(),
        };
        println!("  {line}");
    }
    println!();
}

/// Dispatches flood control commands.
async fn handle_flood_action(service: &PurgeService, action: FloodAction) -> Result<()> {
    match action {
        FloodAction::Status => {
            println!("{}", "📊 Flood Control".bright_blue().bold());
            println!();

            let status = service.flood_status(FLOOD_EVENT).await?;
            println!("  {}", status.summary());
            println!(
                "  Remaining: {}",
                status
                    .limit
                    .saturating_sub(status.count)
                    .to_string()
                    .bright_white()
                    .bold()
            );
            if status.allowed {
                println!("  Status:    {}", "ALLOWED".green());
            } else {
                println!("  Status:    {}", "BLOCKED".red());
            }
            println!();
        }
        FloodAction::Gc => {
            let removed = service.flood().garbage_collect().await?;
            println!(
                "{} Removed {} expired flood event(s)",
                "✅".green(),
                removed.to_string().bright_white().bold()
            );
        }
        FloodAction::Clear { yes } => {
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Drop every recorded purge and reset the budget?")
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            let removed = service.flood().clear(FLOOD_EVENT, FLOOD_EVENT).await?;
            println!(
                "{} Cleared {} flood event(s)",
                "✅".green(),
                removed.to_string().bright_white().bold()
            );
        }
    }

    Ok(())
}

fn print_config(config: &Config) {
    println!("{}", "ℹ️  Configuration".bright_blue().bold());
    println!();
    println!("  Listen:              {}", config.listen_addr);
    println!(
        "  Database:            {}",
        config
            .database_url
            .as_deref()
            .map(mask_connection_string)
            .unwrap_or_else(|| "in-memory".to_string())
    );
    println!(
        "  Redis:               {}",
        config
            .redis_url
            .as_deref()
            .map(mask_connection_string)
            .unwrap_or_else(|| "-".to_string())
    );
    println!("  Admin token:         {}", mask_secret(&config.admin_token));
    println!("  Max URLs/request:    {}", config.max_url_per_request);
    println!(
        "  Flood limit:         {} per {}h",
        config.flood_limit, config.flood_interval_hours
    );
    println!();
    println!("  Page cache:          {}", on_off(config.page_cache_enabled));
    println!("  Varnish:             {}", on_off(config.varnish_enabled));
    println!(
        "    Domain:            {}",
        config.purge_domain.as_deref().unwrap_or("-")
    );
    println!(
        "    Address:           {}:{}",
        config
            .varnish_ip
            .map(|ip| ip.to_string())
            .unwrap_or_else(|| "dns".to_string()),
        config.varnish_port
    );
    println!("    Environment:       {}", config.varnish_environment);
    println!(
        "    Verify peer/host:  {}/{}",
        on_off(config.varnish_verify_peer),
        on_off(config.varnish_verify_host)
    );
    println!("  Cloudflare:          {}", on_off(config.cloudflare_enabled));
    match &config.cloudflare {
        Some(cf) => {
            println!("    Zone:              {}", cf.zone_id);
            println!("    Email:             {}", cf.email);
            println!("    API key:           {}", mask_secret(&cf.api_key));
        }
        None => println!("    {}", "not configured, purges are skipped".yellow()),
    }
    println!();
}

fn on_off(flag: bool) -> ColoredString {
    if flag { "on".green() } else { "off".red() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_raw_list_splits_commas() {
        let args = vec![
            "https://a.example/,https://b.example/".to_string(),
            "https://c.example/".to_string(),
        ];
        assert_eq!(
            to_raw_list(&args),
            "https://a.example/\nhttps://b.example/\nhttps://c.example/"
        );
    }
}

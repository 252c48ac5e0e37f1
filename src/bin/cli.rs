//! Show notifier CLI
//!
//! Polls the concert archive and pushes a notification for each new show.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use show_notifier::{
    config::{self, Overrides},
    error::Result,
    pipeline,
    services::{ArchiveClient, ShowArchive},
    utils::http,
};

/// show-notifier - New show push notifications
#[derive(Parser, Debug)]
#[command(
    name = "show-notifier",
    version,
    about = "Announces newly archived shows through push notifications"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Defaults to `run` when omitted
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Poll the archive forever and push new shows
    Run {
        /// Seconds between polls (overrides poll.interval_secs)
        #[arg(long)]
        interval: Option<u64>,
    },

    /// Print the current per-year show counts
    Years,

    /// Print the most recent shows
    Latest {
        /// Number of shows to list
        #[arg(short = 'n', long, default_value_t = 5)]
        count: usize,
    },

    /// Validate configuration
    Validate,
}

/// Initialize logging before configuration is read.
///
/// Without `RUST_LOG` or `--verbose` the logger accepts every record and the
/// effective level is set through `log::set_max_level`, starting at info.
fn init_logging(verbose: bool) {
    let explicit = verbose || std::env::var_os("RUST_LOG").is_some();
    let level = if verbose { "debug" } else { "trace" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
    if !explicit {
        log::set_max_level(log::LevelFilter::Info);
    }
}

/// Level to enforce from `logging.level`, if neither `RUST_LOG` nor
/// `--verbose` already decided.
fn configured_filter(verbose: bool, rust_log_set: bool, level: &str) -> Option<log::LevelFilter> {
    if verbose || rust_log_set {
        return None;
    }
    Some(level.parse().unwrap_or_else(|_| {
        log::warn!("Unknown logging.level {:?}, keeping info", level);
        log::LevelFilter::Info
    }))
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = config::load_config(&cli.config)?;
    let rust_log_set = std::env::var_os("RUST_LOG").is_some();
    if let Some(filter) = configured_filter(cli.verbose, rust_log_set, &config.logging.level) {
        log::set_max_level(filter);
    }

    match cli.command.unwrap_or(Command::Run { interval: None }) {
        Command::Run { interval } => {
            let overrides = Overrides {
                interval_secs: interval,
            };
            let config = config::with_overrides(config, &overrides).inspect_err(|e| {
                log::error!("Refusing to start: {}", e);
            })?;
            pipeline::run_pipeline(&config).await?;
        }

        Command::Years => {
            let client = http::create_async_client(&config.http)?;
            let archive = ArchiveClient::new(&config.archive, client)?;
            let snapshot = archive.fetch_snapshot().await?;

            for year in snapshot.years() {
                println!("{}\t{}", year.year_label, year.show_count);
            }
            if let Some(latest) = snapshot.latest() {
                log::info!(
                    "{} years, {} shows, latest {} ({} shows)",
                    snapshot.len(),
                    snapshot.total_shows(),
                    latest.year_label,
                    latest.show_count
                );
            }
        }

        Command::Latest { count } => {
            let client = http::create_async_client(&config.http)?;
            let archive = ArchiveClient::new(&config.archive, client)?;
            let shows = archive.fetch_latest_shows(count).await?;

            for show in &shows {
                println!("{}\t{}\t{}", show.id, show.date, show.venue_name);
            }
            log::info!("Listed {} shows", shows.len());
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_is_default_command() {
        let cli = Cli::try_parse_from(["show-notifier", "--config", "custom.toml"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.config, PathBuf::from("custom.toml"));
    }

    #[test]
    fn test_run_interval_flag() {
        let cli = Cli::try_parse_from(["show-notifier", "run", "--interval", "60"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Run { interval: Some(60) })));
    }

    #[test]
    fn test_configured_level_applies_without_overrides() {
        assert_eq!(
            configured_filter(false, false, "debug"),
            Some(log::LevelFilter::Debug)
        );
        assert_eq!(
            configured_filter(false, false, "loud"),
            Some(log::LevelFilter::Info)
        );
    }

    #[test]
    fn test_verbose_and_rust_log_win_over_config() {
        assert_eq!(configured_filter(true, false, "warn"), None);
        assert_eq!(configured_filter(false, true, "warn"), None);
    }
}

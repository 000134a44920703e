// src/main.rs

//! jobsweep CLI: crawl a careers site's search results into a file.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jobsweep::{
    error::{AppError, Result},
    models::Config,
    pipeline::{CancelToken, CrawlRequest, run_crawl},
    storage::OutputFormat,
};

/// jobsweep - careers-site job listing crawler
#[derive(Parser, Debug)]
#[command(name = "jobsweep", version, about = "Careers-site job listing crawler")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl search results for a keyword query
    Crawl {
        /// Search keywords, e.g. "QA automation testing"
        #[arg(short, long)]
        keywords: String,

        /// Start from this URL instead of the configured search URL
        #[arg(long)]
        start_url: Option<String>,

        /// Use offset-based pagination instead of next links
        #[arg(long)]
        offset_mode: bool,

        /// Output file (default: from config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format: csv or json (default: from config)
        #[arg(short, long)]
        format: Option<String>,

        /// File of job ids (one per line) to exclude from the output
        #[arg(long)]
        seen_ids: Option<PathBuf>,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Load previously-seen job ids, one per line.
fn load_seen_ids(path: &PathBuf) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);

    match cli.command {
        Command::Crawl {
            keywords,
            start_url,
            offset_mode,
            output,
            format,
            seen_ids,
        } => {
            config.validate()?;

            let format_name = format.unwrap_or_else(|| config.output.format.clone());
            let format = OutputFormat::from_str(&format_name).ok_or_else(|| {
                AppError::config(format!("Unknown output format: {format_name}"))
            })?;

            let request = CrawlRequest {
                query: keywords,
                start_url,
                offset_mode,
                output: output.unwrap_or_else(|| PathBuf::from(&config.output.path)),
                format,
                seen_ids: match &seen_ids {
                    Some(path) => load_seen_ids(path)?,
                    None => Vec::new(),
                },
            };

            // Ctrl-C cancels the loop cleanly; partial results still
            // get persisted.
            let cancel = CancelToken::new();
            {
                let cancel = cancel.clone();
                tokio::spawn(async move {
                    if tokio::signal::ctrl_c().await.is_ok() {
                        log::warn!("Interrupt received, finishing current page...");
                        cancel.cancel();
                    }
                });
            }

            run_crawl(&config, request, cancel).await?;
        }

        Command::Validate => {
            config.validate()?;
            log::info!("Configuration is valid");
        }
    }

    Ok(())
}

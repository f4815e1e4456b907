//! Skyell Inspector main entry point
//!
//! This is the command-line interface for the Skyell Inspector page analyzer.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use skyell_inspector::config::{load_config, Config};
use skyell_inspector::crawler::{crawl, Coordinator};
use skyell_inspector::output::{
    format_markdown_report, load_statistics, print_statistics, write_markdown_report,
};
use skyell_inspector::storage::{SqliteStorage, Storage};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Skyell Inspector: single-page web analysis
///
/// Fetches a page and reports its HTML version, title, heading counts,
/// internal/external links, broken links and login form presence.
#[derive(Parser, Debug)]
#[command(name = "skyell-inspector")]
#[command(version)]
#[command(about = "Analyze the structure of a web page", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a URL once and print the report, without storing anything
    Analyze {
        /// The page to analyze
        url: String,
    },

    /// Register URLs for crawling
    Add {
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Crawl stored URLs and wait for them to finish
    Start {
        #[arg(required = true)]
        ids: Vec<i64>,
    },

    /// Mark a running crawl as stopped
    Stop { id: i64 },

    /// List stored URLs with their status
    List,

    /// Show the latest result for a stored URL
    Report {
        id: i64,

        /// Write the report to the configured report path instead of stdout
        #[arg(long)]
        export: bool,
    },

    /// Show statistics from the database and exit
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;

    match cli.command {
        Command::Analyze { url } => handle_analyze(&config, &url).await,
        Command::Add { urls } => handle_add(&config, &urls),
        Command::Start { ids } => handle_start(&config, &ids).await,
        Command::Stop { id } => handle_stop(&config, id),
        Command::List => handle_list(&config),
        Command::Report { id, export } => handle_report(&config, id, export),
        Command::Stats => handle_stats(&config),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("skyell_inspector=info,warn"),
            1 => EnvFilter::new("skyell_inspector=debug,info"),
            2 => EnvFilter::new("skyell_inspector=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn open_storage(config: &Config) -> anyhow::Result<SqliteStorage> {
    let path = Path::new(&config.output.database_path);
    SqliteStorage::new(path).with_context(|| format!("Failed to open database {}", path.display()))
}

/// Handles `analyze`: one crawl, report on stdout
async fn handle_analyze(config: &Config, url: &str) -> anyhow::Result<()> {
    match crawl(config, url).await {
        Ok(outcome) => {
            print!("{}", format_markdown_report(url, &outcome));
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}

fn handle_add(config: &Config, urls: &[String]) -> anyhow::Result<()> {
    let mut storage = open_storage(config)?;

    for url in urls {
        if url::Url::parse(url).is_err() {
            bail!("Invalid URL: {}", url);
        }
        let id = storage.insert_url(url)?;
        println!("{}\t{}", id, url);
    }

    Ok(())
}

/// Handles `start`: dispatches every id, then waits so the process
/// does not exit under the running crawls
async fn handle_start(config: &Config, ids: &[i64]) -> anyhow::Result<()> {
    let coordinator = Coordinator::new(config, open_storage(config)?)?;

    let mut handles = Vec::new();
    for (id, started) in coordinator.bulk_start(ids) {
        match started {
            Ok(handle) => handles.push((id, handle)),
            Err(e) => eprintln!("#{}: {}", id, e),
        }
    }

    for (id, handle) in handles {
        if let Err(e) = handle.await {
            tracing::error!("Crawl task for URL #{} panicked: {}", id, e);
        }
        let record = coordinator.url(id)?;
        match record.error_message {
            Some(message) => println!("#{} {}: {} ({})", id, record.url, record.status, message),
            None => println!("#{} {}: {}", id, record.url, record.status),
        }
    }

    Ok(())
}

fn handle_stop(config: &Config, id: i64) -> anyhow::Result<()> {
    let coordinator = Coordinator::new(config, open_storage(config)?)?;
    coordinator.stop(id)?;
    println!("#{}: stopped", id);
    Ok(())
}

fn handle_list(config: &Config) -> anyhow::Result<()> {
    let storage = open_storage(config)?;

    for record in storage.list_urls()? {
        match record.error_message {
            Some(message) => println!("{}\t{}\t{}\t{}", record.id, record.status, record.url, message),
            None => println!("{}\t{}\t{}", record.id, record.status, record.url),
        }
    }

    Ok(())
}

fn handle_report(config: &Config, id: i64, export: bool) -> anyhow::Result<()> {
    let storage = open_storage(config)?;
    let record = storage.get_url(id)?;

    let Some(result) = storage.latest_result(id)? else {
        bail!("No crawl result for URL #{} (status: {})", id, record.status);
    };
    let links = storage.get_links(result.id)?;
    let outcome = result.to_outcome(&links);

    if export {
        let path = Path::new(&config.output.report_path);
        write_markdown_report(&record.url, &outcome, path)?;
        println!("✓ Report exported to: {}", path.display());
    } else {
        print!("{}", format_markdown_report(&record.url, &outcome));
    }

    Ok(())
}

fn handle_stats(config: &Config) -> anyhow::Result<()> {
    let storage = open_storage(config)?;
    println!("Database: {}\n", config.output.database_path);

    let stats = load_statistics(&storage)?;
    print_statistics(&stats);

    Ok(())
}

//! Compliance Crawler main entry point
//!
//! This is the command-line interface for the compliance page crawler.

use anyhow::{bail, Context};
use clap::Parser;
use compliance_crawler::config::{collect_targets, load_config_with_hash, validate, Config};
use compliance_crawler::crawler::Coordinator;
use compliance_crawler::url::seed_url;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Compliance Crawler: finds the legal pages of a website
///
/// Visits the index page of every given domain, follows the links that look
/// like a privacy policy, imprint, terms or contact page, and saves every
/// page it fetched together with a JSON ledger.
#[derive(Parser, Debug)]
#[command(name = "compliance-crawler")]
#[command(version)]
#[command(about = "Finds the legal pages of a website", long_about = None)]
struct Cli {
    /// Single domain to crawl
    #[arg(short, long, value_name = "DOMAIN")]
    domain: Option<String>,

    /// File with one domain per line
    #[arg(short, long, value_name = "FILE")]
    list: Option<PathBuf>,

    /// Maximum concurrent requests per host
    #[arg(short, long, value_name = "N")]
    threads: Option<u32>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Output directory for the ledger and saved pages
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show statistics from an existing ledger and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load_configuration(&cli)?;

    if cli.stats {
        return handle_stats(&config);
    }

    let targets = collect_targets(cli.domain.as_deref(), cli.list.as_deref())
        .context("Failed to collect domains to crawl")?;

    if cli.dry_run {
        handle_dry_run(&config, &targets);
        return Ok(());
    }

    handle_crawl(&config, &targets).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("compliance_crawler=info,warn"),
            1 => EnvFilter::new("compliance_crawler=debug,info"),
            2 => EnvFilter::new("compliance_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the optional config file, applies CLI overrides and validates the result
fn load_configuration(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(threads) = cli.threads {
        config.crawler.parallelism = threads;
    }
    if let Some(output) = &cli.output {
        config.output.directory = output.clone();
    }

    validate(&config).context("Invalid configuration")?;
    Ok(config)
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config, targets: &[String]) {
    println!("=== Compliance Crawler Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Parallelism per host: {}", config.crawler.parallelism);
    println!("  Request timeout: {}ms", config.crawler.request_timeout);
    println!("  Page budget per domain: {}", config.crawler.page_budget);
    println!("  Relative links: {:?}", config.crawler.relative_links);
    println!("  Classify by href: {}", config.crawler.classify_by_href);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory.display());
    println!("  Ledger: {}", config.ledger_path().display());

    println!("\nDomains ({}):", targets.len());
    let mut valid = 0;
    for target in targets {
        match seed_url(target) {
            Ok(url) => {
                valid += 1;
                println!("  - {} ({})", target, url);
            }
            Err(e) => println!("  - {} (skipped: {})", target, e),
        }
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would start crawling with {} seed URLs", valid);
}

/// Handles the --stats mode: shows statistics from an existing ledger
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    use compliance_crawler::output::{load_statistics, print_statistics};
    use compliance_crawler::storage::Ledger;

    let path = config.ledger_path();
    println!("Ledger: {}\n", path.display());

    let ledger =
        Ledger::open(&path).with_context(|| format!("Failed to open {}", path.display()))?;
    print_statistics(&load_statistics(&ledger));

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, targets: &[String]) -> anyhow::Result<()> {
    let coordinator =
        Coordinator::from_config(config).context("Failed to initialize crawl output")?;
    let ledger = coordinator.ledger();

    tokio::select! {
        result = coordinator.run(targets) => {
            let summary = result.context("Crawl failed")?;
            println!(
                "Crawled {} domains, {} pages",
                summary.domains, summary.pages
            );
            Ok(())
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("Interrupted, flushing ledger {}", ledger.path().display());
            ledger.flush().context("Failed to flush ledger")?;
            bail!("Crawl interrupted");
        }
    }
}

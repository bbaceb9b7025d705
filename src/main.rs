//! Dropwatch main entry point
//!
//! This is the command-line interface for the Dropwatch release crawler.

use clap::Parser;
use dropwatch::config::{load_config_with_hash, validate, Config};
use dropwatch::crawler::run_crawl;
use dropwatch::output::{print_statistics, publish, RunSummary};
use dropwatch::release::FilenameGrammar;
use dropwatch::resolve_tags;
use dropwatch::url::Jail;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Dropwatch: latest-build aliases for drop sites
///
/// Dropwatch crawls directory listings of build drop sites, parses release
/// metadata out of artifact filenames, and writes a JSON map from alias
/// tags such as `sourcemod-latest-linux` to download URLs.
#[derive(Parser, Debug)]
#[command(name = "dropwatch")]
#[command(version = "1.0.0")]
#[command(about = "Latest-build aliases for drop sites", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show roots, jails and grammar without crawling
    #[arg(long)]
    dry_run: bool,

    /// Write the alias map here instead of the configured releases path
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Only register releases for this platform (repeatable)
    #[arg(short, long = "platform", value_name = "NAME")]
    platforms: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    apply_overrides(&mut config, &cli)?;

    if cli.dry_run {
        handle_dry_run(&config)?;
    } else {
        handle_crawl(&config, config_hash).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("dropwatch=info,warn"),
            1 => EnvFilter::new("dropwatch=debug,info"),
            2 => EnvFilter::new("dropwatch=trace,debug"),
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

/// Applies command-line overrides and re-validates the result
fn apply_overrides(config: &mut Config, cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(output) = &cli.output {
        config.output.releases_path = output.display().to_string();
    }

    if !cli.platforms.is_empty() {
        tracing::info!("Accepting platforms: {}", cli.platforms.join(", "));
        config.releases.accept_platforms = Some(cli.platforms.clone());
    }

    validate(config)?;
    Ok(())
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Dropwatch Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Request timeout: {}ms", config.crawler.request_timeout);
    println!("  Retry timeout: {}ms", config.crawler.retry_timeout);
    println!("  Request delay: {}ms", config.crawler.request_delay);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);

    println!("\nReleases:");
    if config.releases.projects.is_empty() {
        println!("  Projects: any");
    } else {
        println!("  Projects: {}", config.releases.projects.join(", "));
    }
    println!("  Platforms: {}", config.releases.platforms.join(", "));
    match &config.releases.accept_platforms {
        Some(accepted) => println!("  Accepted platforms: {}", accepted.join(", ")),
        None => println!("  Accepted platforms: all"),
    }

    let grammar = FilenameGrammar::new(&config.releases.projects, &config.releases.platforms)?;
    println!("\nFilename Grammar:\n  {}", grammar.pattern());

    println!("\nRoots ({}):", config.roots.len());
    for root in &config.roots {
        let url = Url::parse(&root.url)?;
        let jail = Jail::new(url.as_str(), Some(&root.version_pattern), Some(grammar.pattern()))?;
        println!("  - {}", root.url);
        println!("    jail: {}", jail);
    }

    println!("\nOutput:");
    println!("  Releases: {}", config.output.releases_path);
    if let Some(summary_path) = &config.output.summary_path {
        println!("  Summary: {}", summary_path);
    }

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, config_hash: String) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Roots: {}, Platforms: {}",
        config.roots.len(),
        config.releases.platforms.join(", ")
    );

    // Run the crawler
    let mut report = match run_crawl(config).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    let aliases = resolve_tags(&mut report.registry);
    tracing::info!(
        "Resolved {} aliases from {} releases",
        aliases.len(),
        report.registry.len()
    );

    let summary = RunSummary::new(
        config.roots.iter().map(|root| root.url.clone()).collect(),
        config_hash,
        report.registry.len(),
        aliases,
        report.stats,
    );

    // Output failures are reported, never fatal
    let failures = publish(&config.output, &summary);
    if failures > 0 {
        tracing::warn!("{} output(s) could not be written", failures);
    }

    print_statistics(&summary.stats);

    Ok(())
}

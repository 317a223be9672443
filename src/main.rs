//! Insurance-Compare main entry point
//!
//! This is the command-line interface for the insurance website comparator.

use anyhow::Context;
use clap::Parser;
use insurance_compare::config::{load_config, CompanyEntry, Config};
use insurance_compare::crawler::crawl;
use insurance_compare::generator::GeminiClient;
use insurance_compare::pipeline::Pipeline;
use insurance_compare::report::{format_comparison, format_crawl_stats};
use insurance_compare::{CompareError, ConfigError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Exit code used when the text generation backend fails
const GENERATION_FAILURE_EXIT: u8 = 2;

/// Insurance-Compare: compare insurers from their own websites
///
/// Crawls the websites of two insurance companies, summarizes the content
/// of each and produces a comparative analysis in markdown.
#[derive(Parser, Debug)]
#[command(name = "insurance-compare")]
#[command(version = "1.0.0")]
#[command(about = "Compare insurance companies from their websites", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Id of the first company (defaults to the first configured company)
    #[arg(value_name = "FIRST")]
    first: Option<String>,

    /// Id of the second company (defaults to the second configured company)
    #[arg(value_name = "SECOND")]
    second: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Regenerate summaries and the comparison, overwriting saved ones
    #[arg(long)]
    fresh: bool,

    /// Validate config and show what would be compared without crawling
    #[arg(long, conflicts_with = "crawl_only")]
    dry_run: bool,

    /// Crawl the selected companies and report what was extracted, without generating
    #[arg(long, conflicts_with = "dry_run")]
    crawl_only: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<CompareError>() {
            Some(compare_error) if compare_error.is_generation_failure() => {
                tracing::error!("{}", compare_error);
                eprintln!(
                    "Error communicating with the text generation service: {}",
                    compare_error
                );
                ExitCode::from(GENERATION_FAILURE_EXIT)
            }
            _ => {
                eprintln!("Error: {:#}", e);
                ExitCode::FAILURE
            }
        },
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // A missing .env file is fine; the key may already be in the environment
    dotenvy::dotenv().ok();

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully");

    let (first, second) = select_companies(&config, cli.first.as_deref(), cli.second.as_deref())?;

    if cli.dry_run {
        handle_dry_run(&config, &first, &second);
    } else if cli.crawl_only {
        handle_crawl_only(&config, &[&first, &second]).await?;
    } else {
        handle_compare(config, &first, &second, cli.fresh).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("insurance_compare=info,warn"),
            1 => EnvFilter::new("insurance_compare=debug,info"),
            2 => EnvFilter::new("insurance_compare=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolves the two companies to compare
///
/// Missing ids fall back to the first two configured companies, skipping
/// whichever one was named explicitly.
fn select_companies(
    config: &Config,
    first: Option<&str>,
    second: Option<&str>,
) -> Result<(CompanyEntry, CompanyEntry), CompareError> {
    let lookup = |id: &str| {
        config
            .company(id)
            .cloned()
            .ok_or_else(|| CompareError::UnknownCompany(id.to_string()))
    };

    let first = match first {
        Some(id) => lookup(id)?,
        None => config
            .companies
            .first()
            .cloned()
            .ok_or_else(|| ConfigError::Validation("No companies configured".to_string()))?,
    };

    let second = match second {
        Some(id) => lookup(id)?,
        None => config
            .companies
            .iter()
            .find(|c| c.id != first.id)
            .cloned()
            .ok_or_else(|| {
                ConfigError::Validation(
                    "At least two companies are needed for a comparison".to_string(),
                )
            })?,
    };

    Ok((first, second))
}

/// Handles the --dry-run mode: validates config and shows what would be compared
fn handle_dry_run(config: &Config, first: &CompanyEntry, second: &CompanyEntry) {
    println!("=== Insurance-Compare Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max pages: {}", config.crawler.max_pages);
    println!("  Max workers: {}", config.crawler.max_workers);
    println!("  Chunk size: {}", config.crawler.chunk_size);
    println!("  Request timeout: {}s", config.crawler.request_timeout);
    println!("  Cache capacity: {}", config.crawler.cache_capacity);
    println!(
        "  Insecure TLS domains: {}",
        config.crawler.insecure_tls_domains.join(", ")
    );

    println!("\nGenerator:");
    println!("  Model: {}", config.generator.model);
    println!("  API key variable: {}", config.generator.api_key_env);

    println!("\nOutput:");
    println!("  Summaries: {}", config.output.summaries_dir);
    println!("  Comparisons: {}", config.output.comparisons_dir);
    println!("  Max characters for analysis: {}", config.output.max_chars);

    println!("\nCompanies ({}):", config.companies.len());
    for company in &config.companies {
        println!("  - {} [{}] {}", company.name, company.id, company.url);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would compare {} with {}", first.name, second.name);
}

/// Handles the --crawl-only mode: extracts content and reports sizes
async fn handle_crawl_only(config: &Config, companies: &[&CompanyEntry]) -> anyhow::Result<()> {
    for company in companies {
        let output = crawl(&company.url, config)
            .await
            .with_context(|| format!("Failed to crawl {}", company.url))?;
        println!("{}", format_crawl_stats(&company.name, &output));
    }
    Ok(())
}

/// Handles the main summarize-and-compare operation
async fn handle_compare(
    config: Config,
    first: &CompanyEntry,
    second: &CompanyEntry,
    fresh: bool,
) -> anyhow::Result<()> {
    if fresh {
        tracing::info!("Starting fresh analysis (ignoring saved summaries)");
    }

    let generator = GeminiClient::from_config(&config.generator).map_err(CompareError::from)?;
    let pipeline = Pipeline::new(config, generator).fresh(fresh);

    let comparison = pipeline.compare_companies(&first.id, &second.id).await?;
    println!("{}", format_comparison(&first.name, &second.name, &comparison));
    Ok(())
}

// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Build the crawl's collaborators (fetcher, region resolver)
// 3. Run the crawl and print its summary
// 4. Serialize the dataset to stdout or a file
// 5. Exit with proper code (0 = success, 2 = error)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; // src/cli.rs - command-line parsing
mod extract; // src/extract/ - HTML field extraction + text cleanup
mod fetch; // src/fetch/ - resilient page fetching
mod filter; // src/filter/ - inclusion/exclusion rules
mod geo; // src/geo/ - coordinate-to-state resolution
mod model; // src/model.rs - output record types
mod spider; // src/spider/ - the crawl orchestrator

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;

use cli::{Cli, Commands};
use fetch::RetryingFetcher;
use geo::RegionResolver;
use spider::{RunStats, Spider, SpiderConfig};

#[tokio::main]
async fn main() {
    env_logger::init();

    // Run our application logic and capture the exit code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Crawl {
            query,
            output,
            concurrency,
            max_retries,
            states_file,
        } => handle_crawl(&query, output.as_deref(), concurrency, max_retries, &states_file).await,
    }
}

// Handles the 'crawl' subcommand: one full crawl run, summary included
async fn handle_crawl(
    query: &str,
    output: Option<&Path>,
    concurrency: usize,
    max_retries: u32,
    states_file: &Path,
) -> Result<i32> {
    println!("🕷️  Crawling for: {}", query);

    // Collaborators are built once here and shared for the whole run; the
    // boundary dataset in particular is parsed a single time
    let resolver = Arc::new(RegionResolver::from_file(states_file)?);
    let fetcher = RetryingFetcher::new(max_retries)?;
    let config = SpiderConfig {
        concurrency,
        ..SpiderConfig::default()
    };
    let spider = Spider::new(query, config, Box::new(fetcher), resolver);

    let started = Instant::now();
    let report = spider.crawl().await?;

    print_summary(&report.stats, started.elapsed(), report.campsites.len());

    let json = serde_json::to_string_pretty(&report.campsites)?;
    match output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!(
                "💾 Wrote {} record(s) to {}",
                report.campsites.len(),
                path.display()
            );
        }
        None => println!("{}", json),
    }

    Ok(0)
}

// Prints the run's statistics in a human-readable block.
// These numbers are advisory - the dataset itself is the contract.
fn print_summary(stats: &RunStats, total: Duration, count: usize) {
    println!("\n📊 Crawl summary:");
    println!("   Pages fetched: {}", stats.pages_fetched);
    println!("   Detail links found: {}", stats.detail_links_found);
    println!("   Details fetched: {}", stats.details_fetched);
    println!("   Duplicates skipped: {}", stats.duplicates);
    println!("   Excluded by filter: {}", stats.excluded);
    println!("   Errors: {}", stats.errors);
    println!(
        "   Detail fetch durations (ms): avg={}, min={:.1}, max={:.1}",
        stats.avg_ms, stats.min_ms, stats.max_ms
    );
    let seconds = total.as_secs();
    println!("   Total time: {}m {}s", seconds / 60, seconds % 60);
    println!("   Final campsite count: {}", count);
}

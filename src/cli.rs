// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes.
// =============================================================================

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::fetch::DEFAULT_MAX_RETRIES;
use crate::spider::DEFAULT_CONCURRENCY;

#[derive(Parser, Debug)]
#[command(
    name = "campsite-spider",
    version = "0.1.0",
    about = "Crawls the BLM recreation search and extracts a cleaned campsite dataset",
    long_about = "campsite-spider walks the paginated recreation search for a query, fetches every \
                  discovered detail page under a bounded concurrency limit, and emits a deduplicated, \
                  filtered, geocoded JSON dataset of campsites."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a crawl and emit the extracted dataset as JSON
    ///
    /// Example: campsite-spider crawl campgrounds --output campsites.json
    Crawl {
        /// Search query used to seed the listing pages
        query: String,

        /// Write the JSON dataset to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Maximum detail pages fetched concurrently
        #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
        concurrency: usize,

        /// Retries after a failed fetch (the default 2 means 3 total tries)
        #[arg(long, default_value_t = DEFAULT_MAX_RETRIES)]
        max_retries: u32,

        /// GeoJSON FeatureCollection of state boundaries, used to resolve a
        /// state from coordinates when a page doesn't declare one
        #[arg(long, default_value = "data/us-states.geojson")]
        states_file: PathBuf,
    },
}

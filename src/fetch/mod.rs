// src/fetch/mod.rs
// =============================================================================
// Page fetching.
//
// The `Fetch` trait is the seam between the spider and the network: the real
// crawl uses `RetryingFetcher` (pooled reqwest client, bounded retries),
// while tests hand the spider an in-memory fake and never open a socket.
// =============================================================================

use anyhow::Result;
use async_trait::async_trait;

mod retry;

pub use retry::{RetryingFetcher, DEFAULT_MAX_RETRIES};

/// One logical HTTP GET: returns the page body, or the terminal error after
/// the implementation has done whatever retrying it is going to do.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

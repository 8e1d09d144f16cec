// src/fetch/retry.rs
// =============================================================================
// HTTP fetching with bounded retries and linear backoff.
//
// One reqwest Client is built per crawl run and reused for every request, so
// connections stay pooled across the whole crawl. Retrying is an explicit
// bounded loop: after a failed attempt N (1-based) we sleep backoff * N and
// try again, up to the configured retry count; the last error surfaces
// tagged with the URL that failed.
// =============================================================================

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;

use super::Fetch;

/// Per-request timeout applied to every fetch.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
/// Retries after the first attempt, so 3 total tries by default.
pub const DEFAULT_MAX_RETRIES: u32 = 2;
/// Base delay for the linear backoff between attempts.
pub const DEFAULT_BACKOFF_BASE: Duration = Duration::from_secs(1);

pub struct RetryingFetcher {
    client: Client,
    max_retries: u32,
    backoff_base: Duration,
}

impl RetryingFetcher {
    pub fn new(max_retries: u32) -> Result<Self> {
        Self::with_backoff(max_retries, DEFAULT_BACKOFF_BASE)
    }

    pub fn with_backoff(max_retries: u32, backoff_base: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to create HTTP client")?;
        Ok(RetryingFetcher {
            client,
            max_retries,
            backoff_base,
        })
    }

    async fn request(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        Ok(body)
    }
}

#[async_trait]
impl Fetch for RetryingFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match self.request(url).await {
                Ok(body) => return Ok(body),
                Err(err) if attempt <= self.max_retries => {
                    log::warn!("attempt {} failed for {}: {:#}", attempt, url, err);
                    tokio::time::sleep(self.backoff_base * attempt).await;
                }
                Err(err) => {
                    return Err(err)
                        .with_context(|| format!("failed to fetch {} after {} attempts", url, attempt));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_terminal_error_names_url_and_attempts() {
        // Nothing listens on port 1, so every attempt fails to connect
        let fetcher =
            RetryingFetcher::with_backoff(1, Duration::from_millis(1)).unwrap();
        let err = fetcher.fetch("http://127.0.0.1:1/").await.unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("http://127.0.0.1:1/"), "got: {message}");
        assert!(message.contains("2 attempts"), "got: {message}");
    }

    #[tokio::test]
    async fn test_zero_retries_means_single_attempt() {
        let fetcher =
            RetryingFetcher::with_backoff(0, Duration::from_millis(1)).unwrap();
        let err = fetcher.fetch("http://127.0.0.1:1/").await.unwrap_err();
        assert!(format!("{err:#}").contains("1 attempts"));
    }
}

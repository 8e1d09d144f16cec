// src/spider/stats.rs
// =============================================================================
// Run-level statistics for one crawl.
//
// Counters cover both phases (listing pagination and detail fetching) plus
// timing aggregates over the detail fetches that completed. Tasks report
// their outcomes back to the spider, which folds them in here after the
// concurrent batch drains, so accumulation itself is single-threaded.
// =============================================================================

use std::time::Duration;

/// Counters and duration aggregates for a single crawl run.
#[derive(Debug, Clone)]
pub struct RunStats {
    /// Listing pages fetched successfully.
    pub pages_fetched: u64,
    /// Detail links discovered across all listing pages.
    pub detail_links_found: u64,
    /// Detail pages fetched and parsed (includes excluded and no-data ones).
    pub details_fetched: u64,
    /// Detail URLs skipped because they were already visited this run.
    pub duplicates: u64,
    /// Candidates rejected by the inclusion filter.
    pub excluded: u64,
    /// Detail tasks that failed outright (fetch errors).
    pub errors: u64,
    /// Detail fetch+parse durations in milliseconds.
    pub avg_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
    total_ms: f64,
}

impl Default for RunStats {
    fn default() -> Self {
        RunStats {
            pages_fetched: 0,
            detail_links_found: 0,
            details_fetched: 0,
            duplicates: 0,
            excluded: 0,
            errors: 0,
            avg_ms: 0.0,
            min_ms: f64::INFINITY,
            max_ms: 0.0,
            total_ms: 0.0,
        }
    }
}

impl RunStats {
    /// Records one timed detail fetch.
    pub fn record_fetch(&mut self, duration: Duration) {
        let ms = duration.as_secs_f64() * 1000.0;
        self.details_fetched += 1;
        self.total_ms += ms;
        self.min_ms = self.min_ms.min(ms);
        self.max_ms = self.max_ms.max(ms);
    }

    /// Computes the average over successfully timed fetches (rounded to
    /// 0.1 ms) and zeroes the aggregates when nothing was fetched.
    pub fn finalize(&mut self) {
        if self.details_fetched > 0 {
            self.avg_ms = (self.total_ms / self.details_fetched as f64 * 10.0).round() / 10.0;
        } else {
            self.avg_ms = 0.0;
            self.min_ms = 0.0;
            self.max_ms = 0.0;
        }
    }
}

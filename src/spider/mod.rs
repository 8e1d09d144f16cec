// src/spider/mod.rs
// =============================================================================
// The crawl orchestrator.
//
// A crawl has two clearly separated phases:
//
// 1. Pagination (sequential): request listing page 0, 1, 2, ... and collect
//    every detail link. Page N+1 only exists if page N had results, so this
//    phase can't parallelize. A listing fetch failure ends pagination for
//    the run; it never fails the crawl.
// 2. Detail work (bounded concurrency): one task per unique detail URL runs
//    fetch -> extract -> filter -> assemble. Tasks report an outcome value;
//    outcomes are folded into stats and the output collection after the
//    whole batch settles, so one bad page never aborts its siblings.
//
// The visited set is checked-and-inserted in the single-threaded dispatch
// loop before any task is created, which is what makes "at most one fetch
// per URL per run" hold even at full concurrency.
// =============================================================================

mod stats;

pub use stats::RunStats;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use scraper::Html;
use url::Url;
use uuid::Uuid;

use crate::extract::{clean, extract_candidate, extract_detail_links, CandidateRecord};
use crate::fetch::Fetch;
use crate::filter;
use crate::geo::RegionResolver;
use crate::model::{Campsite, CampsiteImage, SOURCE};

/// Origin used to build listing URLs and absolutize detail links.
pub const BASE_URL: &str = "https://www.blm.gov";
/// Maximum detail tasks in flight at once.
pub const DEFAULT_CONCURRENCY: usize = 12;

#[derive(Debug, Clone)]
pub struct SpiderConfig {
    pub base_url: String,
    pub concurrency: usize,
}

impl Default for SpiderConfig {
    fn default() -> Self {
        SpiderConfig {
            base_url: BASE_URL.to_string(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// Everything a crawl run produces: the dataset plus the run's statistics.
#[derive(Debug)]
pub struct CrawlReport {
    pub campsites: Vec<Campsite>,
    pub stats: RunStats,
}

// A detail link as discovered on a listing page. The page/index tags only
// feed log lines; they are not part of the output.
#[derive(Debug, Clone)]
struct DetailLink {
    relative_url: String,
    page: usize,
    index: usize,
}

// What one detail task reports back to the orchestrator.
enum DetailOutcome {
    /// Fetch failed after retries.
    Error,
    /// Page fetched but yielded an empty candidate.
    NoData { duration: Duration },
    /// Candidate rejected by the inclusion filter.
    Excluded { duration: Duration },
    /// Candidate accepted and assembled.
    Included {
        duration: Duration,
        campsite: Box<Campsite>,
    },
}

pub struct Spider {
    query: String,
    config: SpiderConfig,
    fetcher: Box<dyn Fetch>,
    resolver: Arc<RegionResolver>,
}

impl Spider {
    pub fn new(
        query: &str,
        config: SpiderConfig,
        fetcher: Box<dyn Fetch>,
        resolver: Arc<RegionResolver>,
    ) -> Self {
        Spider {
            query: query.to_string(),
            config,
            fetcher,
            resolver,
        }
    }

    /// Runs one full crawl. Per-URL failures are counted, never fatal; the
    /// only hard error is a crawl target that can't form a listing URL.
    pub async fn crawl(&self) -> Result<CrawlReport> {
        let mut search_url = Url::parse(&format!("{}/visit/search", self.config.base_url))
            .with_context(|| format!("invalid base URL {}", self.config.base_url))?;
        search_url
            .query_pairs_mut()
            .append_pair("query", &self.query);

        let mut visited: HashSet<String> = HashSet::new();
        let mut stats = RunStats::default();

        // Phase 1: walk listing pages in order until one comes up empty
        // (or fails, or cycles back on itself)
        let mut detail_links: Vec<DetailLink> = Vec::new();
        let mut page = 0usize;
        loop {
            let page_url = format!("{}&page={}", search_url, page);
            if !visited.insert(format!("search:{}", page_url)) {
                break;
            }

            let html = match self.fetcher.fetch(&page_url).await {
                Ok(html) => {
                    stats.pages_fetched += 1;
                    html
                }
                Err(err) => {
                    log::warn!("failed to fetch search page {}: {:#}", page_url, err);
                    break;
                }
            };

            let document = Html::parse_document(&html);
            let found = extract_detail_links(&document);
            stats.detail_links_found += found.len() as u64;
            println!("  Page {}: found {} detail link(s)", page, found.len());

            if found.is_empty() {
                break;
            }
            detail_links.extend(found.into_iter().enumerate().map(|(index, relative_url)| {
                DetailLink {
                    relative_url,
                    page,
                    index,
                }
            }));
            page += 1;
        }

        println!(
            "  Total detail links to process: {}",
            detail_links.len()
        );

        // Phase 2: dedup in this single-threaded loop, then run the unique
        // URLs through the bounded-concurrency pipeline
        let mut tasks = Vec::new();
        for link in detail_links {
            let detail_url = format!("{}{}", self.config.base_url, link.relative_url);
            if !visited.insert(format!("detail:{}", detail_url)) {
                stats.duplicates += 1;
                continue;
            }
            tasks.push(self.process_detail(link, detail_url));
        }

        let outcomes: Vec<DetailOutcome> = stream::iter(tasks)
            .buffer_unordered(self.config.concurrency)
            .collect()
            .await;

        let mut campsites = Vec::new();
        for outcome in outcomes {
            match outcome {
                DetailOutcome::Error => stats.errors += 1,
                DetailOutcome::NoData { duration } => stats.record_fetch(duration),
                DetailOutcome::Excluded { duration } => {
                    stats.record_fetch(duration);
                    stats.excluded += 1;
                }
                DetailOutcome::Included { duration, campsite } => {
                    stats.record_fetch(duration);
                    campsites.push(*campsite);
                }
            }
        }
        stats.finalize();

        Ok(CrawlReport { campsites, stats })
    }

    // One detail task: fetch, extract, filter, assemble. Every failure mode
    // maps to an outcome value; nothing propagates.
    async fn process_detail(&self, link: DetailLink, detail_url: String) -> DetailOutcome {
        let started = Instant::now();

        let html = match self.fetcher.fetch(&detail_url).await {
            Ok(html) => html,
            Err(err) => {
                log::error!(
                    "[{}:{}] failed to fetch detail page {}: {:#}",
                    link.page,
                    link.index,
                    detail_url,
                    err
                );
                return DetailOutcome::Error;
            }
        };

        let candidate = {
            let document = Html::parse_document(&html);
            extract_candidate(&document)
        };
        let duration = started.elapsed();

        if candidate.is_empty() {
            log::warn!(
                "[{}:{}] no site data found for {}",
                link.page,
                link.index,
                detail_url
            );
            return DetailOutcome::NoData { duration };
        }

        let verdict = filter::decide(&candidate);
        if !verdict.included {
            println!(
                "  [{}:{}] Skipped: \"{}\" - {} ({})",
                link.page,
                link.index,
                candidate.name.as_deref().unwrap_or("Unknown"),
                verdict.reason,
                detail_url
            );
            return DetailOutcome::Excluded { duration };
        }

        println!(
            "  [{}:{}] Parsed site: {} ({})",
            link.page,
            link.index,
            candidate.name.as_deref().unwrap_or("Unknown"),
            detail_url
        );

        DetailOutcome::Included {
            duration,
            campsite: Box::new(self.assemble(candidate, detail_url)),
        }
    }

    // Normalization and enrichment: clean every free-text field, resolve the
    // state (declared beats coordinates), stamp id/url/source.
    fn assemble(&self, candidate: CandidateRecord, url: String) -> Campsite {
        // The filter already rejected candidates where both would be zero
        let lat = candidate.lat.unwrap_or(0.0);
        let lng = candidate.lng.unwrap_or(0.0);

        let state = candidate
            .state
            .clone()
            .or_else(|| self.resolver.resolve(lat, lng).map(str::to_string))
            .unwrap_or_default();

        Campsite {
            id: Uuid::new_v4(),
            name: candidate
                .name
                .as_deref()
                .map(clean)
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| "Unknown".to_string()),
            url,
            description: cleaned(candidate.description),
            lat,
            lng,
            state,
            map_link: candidate.map_link.unwrap_or_default(),
            directions: cleaned(candidate.directions),
            campgrounds: candidate.campgrounds,
            activities: candidate.activities,
            wildlife: candidate.wildlife,
            fees: cleaned(candidate.fees),
            stay_limit: cleaned(candidate.stay_limit),
            images: candidate.images.map(|images| {
                images
                    .into_iter()
                    .map(|image| CampsiteImage {
                        src: image.src,
                        alt: cleaned(image.alt),
                        credit: cleaned(image.credit),
                    })
                    .collect()
            }),
            source: SOURCE.to_string(),
        }
    }
}

/// Normalizes an optional text field, turning an emptied-out value into
/// absence rather than an empty string.
fn cleaned(field: Option<String>) -> Option<String> {
    field
        .as_deref()
        .map(clean)
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::sync::Mutex;

    use anyhow::anyhow;
    use async_trait::async_trait;

    // In-memory fetcher: serves canned pages and records every URL asked of
    // it, so tests can assert exactly what was fetched. The request log is
    // shared out through an Arc because the spider takes ownership of the
    // fetcher itself.
    struct FakeFetcher {
        pages: HashMap<String, String>,
        requests: Arc<Mutex<Vec<String>>>,
    }

    impl FakeFetcher {
        fn new(pages: Vec<(String, String)>) -> Self {
            FakeFetcher {
                pages: pages.into_iter().collect(),
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn request_log(&self) -> Arc<Mutex<Vec<String>>> {
            Arc::clone(&self.requests)
        }
    }

    #[async_trait]
    impl Fetch for FakeFetcher {
        async fn fetch(&self, url: &str) -> Result<String> {
            self.requests.lock().unwrap().push(url.to_string());
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| anyhow!("no page for {}", url))
        }
    }

    const BASE: &str = "https://campsites.test";

    fn resolver_with_mock_state() -> Arc<RegionResolver> {
        // One square region covering the coordinates used in detail fixtures
        let data = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {"name": "MockState"},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[
                        [-120.0, 30.0], [-110.0, 30.0], [-110.0, 40.0],
                        [-120.0, 40.0], [-120.0, 30.0]
                    ]]
                }
            }]
        }"#;
        Arc::new(RegionResolver::from_geojson(data).unwrap())
    }

    fn listing_page(links: &[&str]) -> String {
        links
            .iter()
            .map(|href| {
                format!(
                    r#"<div class="field contact-block -title"><h4><a href="{href}">A site</a></h4></div>"#
                )
            })
            .collect()
    }

    fn detail_page(name: &str, lat: f64, lng: f64) -> String {
        format!(
            r#"
            <div class="field contact-block -title"><h4><a href="/x">{name}</a></h4></div>
            <div class="field contact-block -body">
              <h2>Overview</h2>
              <p>Dispersed camping along the wash.</p>
            </div>
            <div>
              <h2>Geographic Coordinates</h2>
              <div class="views-field-field-latitude"><span class="field-content">{lat}</span></div>
              <div class="views-field-field-longitude"><span class="field-content">{lng}</span></div>
            </div>
            "#
        )
    }

    fn search_url(page: usize) -> String {
        format!("{BASE}/visit/search?query=campgrounds&page={page}")
    }

    fn spider(fetcher: FakeFetcher) -> Spider {
        let config = SpiderConfig {
            base_url: BASE.to_string(),
            concurrency: DEFAULT_CONCURRENCY,
        };
        Spider::new(
            "campgrounds",
            config,
            Box::new(fetcher),
            resolver_with_mock_state(),
        )
    }

    #[tokio::test]
    async fn test_two_listing_pages_two_detail_tasks() {
        let page0 = listing_page(&["/visit/one", "/visit/two"]);
        let detail = detail_page("Canyon Camp", 35.0, -115.0);
        let fetcher = FakeFetcher::new(vec![
            (search_url(0), page0),
            (search_url(1), String::new()),
            (format!("{BASE}/visit/one"), detail.clone()),
            (format!("{BASE}/visit/two"), detail),
        ]);
        let spider = spider(fetcher);

        let report = spider.crawl().await.unwrap();
        assert_eq!(report.stats.pages_fetched, 2);
        assert_eq!(report.stats.detail_links_found, 2);
        assert_eq!(report.stats.details_fetched, 2);
        assert_eq!(report.campsites.len(), 2);
    }

    #[tokio::test]
    async fn test_end_to_end_single_campsite() {
        let page0 = listing_page(&["/visit/afton-canyon"]);
        let detail = detail_page("Afton Canyon | Bureau of Land Management", 35.03, -116.38);
        let fetcher = FakeFetcher::new(vec![
            (search_url(0), page0),
            (search_url(1), String::new()),
            (format!("{BASE}/visit/afton-canyon"), detail),
        ]);
        let spider = spider(fetcher);

        let report = spider.crawl().await.unwrap();
        assert_eq!(report.campsites.len(), 1);

        let site = &report.campsites[0];
        assert_eq!(site.name, "Afton Canyon");
        assert_eq!(site.url, format!("{BASE}/visit/afton-canyon"));
        assert_eq!(site.source, "BLM");
        assert_eq!(site.lat, 35.03);
        assert_eq!(site.lng, -116.38);
        // No declared state on the page, so the resolver fills it in
        assert_eq!(site.state, "MockState");
        assert!(!site.map_link.is_empty());
        assert!(!site.id.is_nil());
        assert_eq!(
            site.description.as_deref(),
            Some("Dispersed camping along the wash.")
        );
    }

    #[tokio::test]
    async fn test_duplicate_detail_links_fetched_once() {
        let page0 = listing_page(&["/visit/one", "/visit/one", "/visit/one"]);
        let detail = detail_page("Canyon Camp", 35.0, -115.0);
        let fetcher = FakeFetcher::new(vec![
            (search_url(0), page0),
            (search_url(1), String::new()),
            (format!("{BASE}/visit/one"), detail),
        ]);
        let requests = fetcher.request_log();
        let spider = spider(fetcher);

        let report = spider.crawl().await.unwrap();
        assert_eq!(report.stats.duplicates, 2);
        assert_eq!(report.campsites.len(), 1);

        let detail_url = format!("{BASE}/visit/one");
        let fetches = requests
            .lock()
            .unwrap()
            .iter()
            .filter(|url| **url == detail_url)
            .count();
        assert_eq!(fetches, 1);
    }

    #[tokio::test]
    async fn test_detail_fetch_failure_counted_not_fatal() {
        let page0 = listing_page(&["/visit/good", "/visit/missing"]);
        let detail = detail_page("Canyon Camp", 35.0, -115.0);
        let fetcher = FakeFetcher::new(vec![
            (search_url(0), page0),
            (search_url(1), String::new()),
            (format!("{BASE}/visit/good"), detail),
            // /visit/missing intentionally absent
        ]);
        let spider = spider(fetcher);

        let report = spider.crawl().await.unwrap();
        assert_eq!(report.stats.errors, 1);
        assert_eq!(report.campsites.len(), 1);
    }

    #[tokio::test]
    async fn test_listing_failure_ends_pagination_quietly() {
        // Only page 0 exists; fetching page 1 errors instead of being empty
        let page0 = listing_page(&["/visit/one"]);
        let detail = detail_page("Canyon Camp", 35.0, -115.0);
        let fetcher = FakeFetcher::new(vec![
            (search_url(0), page0),
            (format!("{BASE}/visit/one"), detail),
        ]);
        let spider = spider(fetcher);

        let report = spider.crawl().await.unwrap();
        assert_eq!(report.stats.pages_fetched, 1);
        assert_eq!(report.campsites.len(), 1);
    }

    #[tokio::test]
    async fn test_excluded_candidate_counted() {
        let page0 = listing_page(&["/visit/range"]);
        // No camping-related text anywhere, so the exclusion holds
        let detail = r#"
            <div class="field contact-block -title"><h4><a href="/x">Shooting Range</a></h4></div>
            <div>
              <h2>Geographic Coordinates</h2>
              <div class="views-field-field-latitude"><span class="field-content">35.0</span></div>
              <div class="views-field-field-longitude"><span class="field-content">-115.0</span></div>
            </div>
            "#
        .to_string();
        let fetcher = FakeFetcher::new(vec![
            (search_url(0), page0),
            (search_url(1), String::new()),
            (format!("{BASE}/visit/range"), detail),
        ]);
        let spider = spider(fetcher);

        let report = spider.crawl().await.unwrap();
        assert_eq!(report.stats.excluded, 1);
        assert!(report.campsites.is_empty());
        // Excluded pages still count as fetched details
        assert_eq!(report.stats.details_fetched, 1);
    }

    #[tokio::test]
    async fn test_declared_state_beats_resolver() {
        let page0 = listing_page(&["/visit/declared"]);
        let detail = format!(
            "{}{}",
            detail_page("Canyon Camp", 35.0, -115.0),
            r#"<div class="field contact-block -state">Declaredland</div>"#
        );
        let fetcher = FakeFetcher::new(vec![
            (search_url(0), page0),
            (search_url(1), String::new()),
            (format!("{BASE}/visit/declared"), detail),
        ]);
        let spider = spider(fetcher);

        let report = spider.crawl().await.unwrap();
        assert_eq!(report.campsites[0].state, "Declaredland");
    }
}

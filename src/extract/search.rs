// src/extract/search.rs
// =============================================================================
// Extracts detail-page links from a search (listing) page.
//
// Each search result is rendered as a card whose title block wraps an anchor
// pointing at the detail page. We collect those hrefs in document order; the
// hrefs are relative and get joined onto the base URL by the spider.
// =============================================================================

use scraper::{Html, Selector};

/// Returns the relative detail-page URLs found on a listing page, in
/// document order. Anchors without an href are skipped. No matches means an
/// empty vec, never an error.
pub fn extract_detail_links(page: &Html) -> Vec<String> {
    // Selector::parse returns Result, so we use .unwrap() which panics on
    // error. This is OK here because our selector is a constant and known
    // to be valid.
    let selector = Selector::parse("div.field.contact-block.-title a").unwrap();

    page.select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| href.to_string())
        .collect()
}

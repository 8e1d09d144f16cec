// src/extract/mod.rs
// =============================================================================
// HTML extraction for the two page shapes we crawl.
//
// Submodules:
// - search: pulls detail-page links out of a listing page
// - detail: pulls a candidate campsite record out of a detail page
// - activities: fixed activity vocabulary + body-text scan
// - text: free-text normalization applied before records are assembled
// =============================================================================

mod activities;
mod detail;
mod search;
mod text;

pub use detail::{extract_candidate, CandidateRecord};
pub use search::extract_detail_links;
pub use text::clean;

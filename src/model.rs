// src/model.rs
// =============================================================================
// Final output records produced by a crawl.
//
// A `Campsite` is what the spider hands to whoever persists or serves the
// dataset: normalized text, resolved state, fresh id, absolute URL. The wire
// shape is camelCase JSON; optional fields are omitted entirely when absent
// (absence is distinct from an empty string).
// =============================================================================

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Source tag stamped on every record produced by this crawler.
pub const SOURCE: &str = "BLM";

/// One image attached to a campsite: where it lives, what it shows,
/// and who to credit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampsiteImage {
    pub src: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit: Option<String>,
}

/// A fully assembled campsite record.
///
/// Invariant: `lat`/`lng` are never both exactly zero here. Candidates with
/// (0,0) or missing coordinates are rejected by the inclusion filter before
/// assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campsite {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub lat: f64,
    pub lng: f64,
    /// Site-declared state, else resolved from coordinates, else empty.
    pub state: String,
    pub map_link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campgrounds: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wildlife: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fees: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stay_limit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<CampsiteImage>>,
    pub source: String,
}

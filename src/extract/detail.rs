// src/extract/detail.rs
// =============================================================================
// Extracts a candidate campsite record from a detail page.
//
// The target site renders detail pages from a CMS, so every field needs an
// ordered set of fallback strategies: the markup varies between pages and
// plenty of them are missing sections entirely. Extraction is total: a
// missing or malformed field is simply absent, never an error for the whole
// record.
// =============================================================================

use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::activities::scan_activities;
use crate::model::CampsiteImage;

lazy_static! {
    // Trailing "| Bureau of Land Management" on <title> and heading text
    static ref ORG_SUFFIX: Regex =
        Regex::new(r"\s*\|\s*Bureau of Land Management\s*$").unwrap();
    // One sentence-ish fragment: anything up to punctuation or a newline
    static ref SENTENCE: Regex = Regex::new(r"[^.!?\n]+[.!?]?").unwrap();
}

/// The raw, possibly-partial extraction result from one detail page.
/// All fields are optional; absence means the page didn't yield the field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateRecord {
    pub name: Option<String>,
    pub description: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub state: Option<String>,
    pub map_link: Option<String>,
    pub directions: Option<String>,
    pub campgrounds: Option<Vec<String>>,
    pub activities: Option<Vec<String>>,
    pub wildlife: Option<Vec<String>>,
    pub fees: Option<String>,
    pub stay_limit: Option<String>,
    pub images: Option<Vec<CampsiteImage>>,
}

impl CandidateRecord {
    /// A candidate that yielded neither a name, a description, nor
    /// coordinates carries nothing worth keeping.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.lat.is_none()
            && self.lng.is_none()
    }
}

/// Extracts a candidate record from a parsed detail page.
pub fn extract_candidate(page: &Html) -> CandidateRecord {
    let (lat, lng) = extract_coordinates(page);
    let map_link = match (lat, lng) {
        (Some(lat), Some(lng)) => Some(map_embed_url(lat, lng)),
        _ => None,
    };

    CandidateRecord {
        name: extract_name(page),
        description: extract_description(page),
        lat,
        lng,
        state: block_text(page, ".field.contact-block.-state"),
        map_link,
        directions: extract_directions(page),
        campgrounds: extract_campgrounds(page),
        activities: extract_activities(page),
        wildlife: extract_wildlife(page),
        fees: block_text(page, ".field.contact-block.-fee-description"),
        stay_limit: block_text(page, ".field.contact-block.-stay-limit"),
        images: extract_images(page),
    }
}

/// Full trimmed text of an element, including all descendants.
fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Trimmed text of the first element matching `css`, or None when the
/// element is missing or its text is empty.
fn block_text(page: &Html, css: &str) -> Option<String> {
    let selector = Selector::parse(css).unwrap();
    page.select(&selector)
        .next()
        .map(element_text)
        .filter(|text| !text.is_empty())
}

// Name: result-card title link, then the page heading, then <title>.
// Whichever wins, the site appends "| Bureau of Land Management" to some of
// them, so the suffix is stripped at the end.
fn extract_name(page: &Html) -> Option<String> {
    let name = block_text(page, "div.field.contact-block.-title h4 a")
        .or_else(|| block_text(page, "h1.page-title"))
        .or_else(|| block_text(page, "title"))?;
    let name = ORG_SUFFIX.replace(&name, "").to_string();
    Some(name).filter(|n| !n.is_empty())
}

// Description strategy, in priority order:
//   1. paragraphs following an "Overview" heading in the body block, up to
//      the next heading
//   2. if that found nothing, every <p> sibling after the heading
//   3. the page's meta description
//   4. every <p> in the body block (only when 1-3 all came up empty)
// Distinct non-empty candidates are joined, then the result is trimmed back
// to whole sentences.
fn extract_description(page: &Html) -> Option<String> {
    let body_selector = Selector::parse("div.field.contact-block.-body").unwrap();
    let heading_selector = Selector::parse("h2, h3").unwrap();
    let p_selector = Selector::parse("p").unwrap();

    let body = page.select(&body_selector).next();

    let mut overview_text = String::new();
    if let Some(body) = body {
        let overview = body
            .select(&heading_selector)
            .find(|h| element_text(*h).contains("Overview"));
        if let Some(heading) = overview {
            let mut parts: Vec<String> = Vec::new();
            for sibling in heading.next_siblings() {
                let Some(element) = ElementRef::wrap(sibling) else {
                    continue;
                };
                if is_heading(element) {
                    break;
                }
                if element.value().name() == "p" {
                    let text = element_text(element);
                    if !text.is_empty() {
                        parts.push(text);
                    }
                }
            }
            if parts.is_empty() {
                // No paragraphs before the next heading; take every <p>
                // sibling that follows instead
                for sibling in heading.next_siblings() {
                    let Some(element) = ElementRef::wrap(sibling) else {
                        continue;
                    };
                    if element.value().name() == "p" {
                        let text = element_text(element);
                        if !text.is_empty() {
                            parts.push(text);
                        }
                    }
                }
            }
            overview_text = parts.join("\n\n");
        }
    }

    let meta_selector = Selector::parse(r#"meta[name="description"]"#).unwrap();
    let meta_desc = page
        .select(&meta_selector)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .unwrap_or_default()
        .to_string();

    let mut full_body_text = String::new();
    if overview_text.is_empty() && meta_desc.trim().is_empty() {
        if let Some(body) = body {
            let paragraphs: Vec<String> = body
                .select(&p_selector)
                .map(element_text)
                .filter(|text| !text.is_empty())
                .collect();
            full_body_text = paragraphs.join("\n\n");
        }
    }

    // Keep distinct non-empty candidates in priority order
    let mut parts: Vec<String> = Vec::new();
    for candidate in [overview_text, meta_desc, full_body_text] {
        let candidate = candidate.trim().to_string();
        if !candidate.is_empty() && !parts.contains(&candidate) {
            parts.push(candidate);
        }
    }
    let raw = parts.join("\n\n");
    if raw.is_empty() {
        return None;
    }
    Some(trim_to_sentences(&raw))
}

/// Splits text on sentence boundaries and drops an unterminated trailing
/// fragment, but only when more than one sentence was found; a single
/// fragment is kept as-is rather than discarded.
fn trim_to_sentences(raw: &str) -> String {
    let mut sentences: Vec<&str> = SENTENCE.find_iter(raw).map(|m| m.as_str()).collect();
    if sentences.len() > 1 {
        let unterminated = sentences.last().is_some_and(|last| {
            !matches!(last.trim().chars().last(), Some('.') | Some('!') | Some('?'))
        });
        if unterminated {
            sentences.pop();
        }
        sentences
            .iter()
            .map(|s| s.trim())
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        raw.trim().to_string()
    }
}

fn is_heading(element: ElementRef) -> bool {
    matches!(
        element.value().name(),
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6"
    )
}

// Directions: paragraph and list-item text inside the directions block,
// falling back to the block's full text when it holds neither.
fn extract_directions(page: &Html) -> Option<String> {
    let block_selector = Selector::parse(".field.contact-block.-directions").unwrap();
    let item_selector = Selector::parse("p, li").unwrap();

    let block = page.select(&block_selector).next()?;
    let items: Vec<String> = block
        .select(&item_selector)
        .map(element_text)
        .filter(|text| !text.is_empty())
        .collect();

    let directions = if items.is_empty() {
        element_text(block)
    } else {
        items.join(" ")
    };
    Some(directions).filter(|d| !d.is_empty())
}

// Wildlife: first h3/h4 mentioning "wildlife", then the first <ul> sibling
// after it.
fn extract_wildlife(page: &Html) -> Option<Vec<String>> {
    let heading_selector = Selector::parse("h3, h4").unwrap();
    let li_selector = Selector::parse("li").unwrap();

    let heading = page
        .select(&heading_selector)
        .find(|h| element_text(*h).to_lowercase().contains("wildlife"))?;

    let list = heading
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "ul")?;

    let items: Vec<String> = list
        .select(&li_selector)
        .map(element_text)
        .filter(|text| !text.is_empty())
        .collect();
    Some(items).filter(|items| !items.is_empty())
}

fn extract_activities(page: &Html) -> Option<Vec<String>> {
    let body_selector = Selector::parse("div.field.contact-block.-body").unwrap();
    let body_text: String = page
        .select(&body_selector)
        .map(|el| el.text().collect::<String>())
        .collect();

    let found = scan_activities(&body_text);
    Some(found).filter(|found| !found.is_empty())
}

// Campgrounds are called out as <h3> or underlined spans inside the body
// block; anything whose text mentions "campground" counts.
fn extract_campgrounds(page: &Html) -> Option<Vec<String>> {
    let selector = Selector::parse(
        "div.field.contact-block.-body h3, div.field.contact-block.-body u",
    )
    .unwrap();

    let mut campgrounds: Vec<String> = Vec::new();
    for element in page.select(&selector) {
        let text = element_text(element);
        if text.to_lowercase().contains("campground") && !campgrounds.contains(&text) {
            campgrounds.push(text);
        }
    }
    Some(campgrounds).filter(|c| !c.is_empty())
}

// Coordinates live in a "Geographic Coordinates" section as separate
// latitude/longitude view fields. Both must parse or neither is kept.
fn extract_coordinates(page: &Html) -> (Option<f64>, Option<f64>) {
    let h2_selector = Selector::parse("h2").unwrap();
    let lat_selector =
        Selector::parse(".views-field-field-latitude .field-content").unwrap();
    let lng_selector =
        Selector::parse(".views-field-field-longitude .field-content").unwrap();

    let heading = page
        .select(&h2_selector)
        .find(|h| element_text(*h).contains("Geographic Coordinates"));
    let Some(heading) = heading else {
        return (None, None);
    };
    let Some(section) = heading.parent().and_then(ElementRef::wrap) else {
        return (None, None);
    };

    let lat = section
        .select(&lat_selector)
        .next()
        .map(element_text)
        .and_then(|text| text.parse::<f64>().ok());
    let lng = section
        .select(&lng_selector)
        .next()
        .map(element_text)
        .and_then(|text| text.parse::<f64>().ok());

    match (lat, lng) {
        (Some(lat), Some(lng)) => (Some(lat), Some(lng)),
        _ => (None, None),
    }
}

/// Fixed-zoom embeddable map centered on the point.
fn map_embed_url(lat: f64, lng: f64) -> String {
    format!(
        "https://www.openstreetmap.org/export/embed.html?bbox={},{},{},{}&layer=mapnik&marker={},{}",
        lng - 0.01,
        lat - 0.01,
        lng + 0.01,
        lat + 0.01,
        lat,
        lng
    )
}

// Images: each image block contributes its first <img>'s src and alt plus an
// optional photographer credit. Blocks without a resolvable src are dropped.
fn extract_images(page: &Html) -> Option<Vec<CampsiteImage>> {
    let block_selector = Selector::parse("div.ridb-image-content").unwrap();
    let img_selector = Selector::parse("img").unwrap();
    let credit_selector = Selector::parse(".field-credit").unwrap();

    let mut images: Vec<CampsiteImage> = Vec::new();
    for block in page.select(&block_selector) {
        let Some(img) = block.select(&img_selector).next() else {
            continue;
        };
        let Some(src) = img
            .value()
            .attr("src")
            .map(str::trim)
            .filter(|src| !src.is_empty())
        else {
            continue;
        };
        let alt = img
            .value()
            .attr("alt")
            .map(str::trim)
            .filter(|alt| !alt.is_empty())
            .map(str::to_string);
        let credit = block
            .select(&credit_selector)
            .next()
            .map(element_text)
            .filter(|credit| !credit.is_empty());

        images.push(CampsiteImage {
            src: src.to_string(),
            alt,
            credit,
        });
    }
    Some(images).filter(|images| !images.is_empty())
}

// src/filter/mod.rs
// =============================================================================
// Decides whether a candidate record belongs in the final dataset.
//
// Two kinds of rejection:
// - unusable coordinates: (0,0) or missing entirely
// - keyword heuristics: places that match an exclusion term (shooting
//   ranges, day-use sites, visitor facilities) and show no sign of actually
//   offering camping
//
// The stay-limit field gets a stricter rule: an exclusion term there rejects
// the record outright, camping keywords or not, since "Day use only" in the
// stay limit is the site telling us overnight stays are prohibited.
// =============================================================================

use crate::extract::CandidateRecord;

/// Terms that mark a place as something other than a campsite.
/// These lists are the tuning point for what the dataset keeps.
pub const EXCLUSION_TERMS: &[&str] = &[
    "shooting range",
    "day use",
    "day-use",
    "day use only",
    "day-use only",
    "science center",
    "interpretive site",
    "habitat management",
    "schoolhouse",
];

/// Terms indicating a place supports camping, which override a general
/// exclusion match (but never a stay-limit match).
pub const CAMPING_TERMS: &[&str] = &["camp", "camping", "campground", "tent", "rv"];

/// The filter's decision for one candidate, with a human-readable reason.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub included: bool,
    pub reason: String,
}

impl Verdict {
    fn reject(reason: String) -> Self {
        Verdict {
            included: false,
            reason,
        }
    }
}

/// Applies the inclusion rules, in order:
/// 1. reject (0,0) or missing coordinates
/// 2. reject on an exclusion term in the stay limit, unconditionally
/// 3. reject on an exclusion term anywhere, unless a camping term also
///    appears anywhere
/// 4. include
pub fn decide(candidate: &CandidateRecord) -> Verdict {
    // Missing coordinates would default to (0,0) at assembly time, which is
    // exactly the shape the final record is never allowed to have
    if candidate.lat.unwrap_or(0.0) == 0.0 && candidate.lng.unwrap_or(0.0) == 0.0 {
        return Verdict::reject("Coordinates are (0,0)".to_string());
    }

    let haystack = build_haystack(candidate);
    let has_camping = CAMPING_TERMS.iter().any(|term| haystack.contains(term));

    if let Some(stay_limit) = &candidate.stay_limit {
        let stay_limit = stay_limit.to_lowercase();
        if let Some(term) = EXCLUSION_TERMS
            .iter()
            .find(|term| stay_limit.contains(*term))
        {
            return Verdict::reject(format!("stayLimit matches \"{term}\""));
        }
    }

    if let Some(term) = EXCLUSION_TERMS.iter().find(|term| haystack.contains(*term)) {
        if !has_camping {
            return Verdict::reject(format!(
                "Matches \"{term}\" and has no camping-related content"
            ));
        }
    }

    Verdict {
        included: true,
        reason: "included".to_string(),
    }
}

/// Lowercased free text the keyword rules run over: name, description,
/// stay limit, directions, and every matched activity.
fn build_haystack(candidate: &CandidateRecord) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for field in [
        &candidate.name,
        &candidate.description,
        &candidate.stay_limit,
        &candidate.directions,
    ] {
        if let Some(value) = field {
            parts.push(value);
        }
    }
    if let Some(activities) = &candidate.activities {
        parts.extend(activities.iter().map(String::as_str));
    }
    parts.join(" ").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str) -> CandidateRecord {
        CandidateRecord {
            name: Some(name.to_string()),
            lat: Some(35.0),
            lng: Some(-116.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_zero_coordinates_always_rejected() {
        let mut site = candidate("Riverside Campground");
        site.lat = Some(0.0);
        site.lng = Some(0.0);
        let verdict = decide(&site);
        assert!(!verdict.included);
        assert_eq!(verdict.reason, "Coordinates are (0,0)");
    }

    #[test]
    fn test_missing_coordinates_rejected() {
        let mut site = candidate("Riverside Campground");
        site.lat = None;
        site.lng = None;
        assert!(!decide(&site).included);
    }

    #[test]
    fn test_exclusion_term_without_camping_rejected() {
        let verdict = decide(&candidate("Shooting Range"));
        assert!(!verdict.included);
        assert!(verdict.reason.contains("shooting range"));
    }

    #[test]
    fn test_camping_term_overrides_general_exclusion() {
        let verdict = decide(&candidate("Shooting Range Campground"));
        assert!(verdict.included);
        assert_eq!(verdict.reason, "included");
    }

    #[test]
    fn test_stay_limit_exclusion_is_absolute() {
        let mut site = candidate("Riverside Camp");
        site.stay_limit = Some("Day use only".to_string());
        let verdict = decide(&site);
        assert!(!verdict.included);
        assert!(verdict.reason.contains("stayLimit"));
        assert!(verdict.reason.contains("day use"));
    }

    #[test]
    fn test_exclusion_in_activities_detected() {
        let mut site = candidate("Mesa Overlook");
        site.activities = Some(vec!["INTERPRETIVE SITE".to_string()]);
        assert!(!decide(&site).included);
    }

    #[test]
    fn test_plain_candidate_included() {
        let mut site = candidate("Afton Canyon");
        site.description = Some("Dispersed camping along the river.".to_string());
        let verdict = decide(&site);
        assert!(verdict.included);
        assert_eq!(verdict.reason, "included");
    }
}

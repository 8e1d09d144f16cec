// src/extract/activities.rs
// =============================================================================
// Fixed vocabulary of activity names used on the target site, plus the scan
// that matches them against a detail page's body text.
//
// The site lists activities as free text rather than structured fields, so we
// substring-match the lowercased body text against every known term. A term
// is kept at most once, in vocabulary order.
// =============================================================================

pub const ACTIVITY_KEYWORDS: &[&str] = &[
    "ACCESSIBLE FACILITY OR ACTIVITY",
    "SAILBOARDING",
    "ACCESSIBLE SWIMMING",
    "AMPHITHEATER",
    "BACKPACKING",
    "BEACHCOMBING",
    "BERRY PICKING",
    "BIKING",
    "BIRD WATCHING",
    "BIRDING",
    "BOATING",
    "BOULDERING",
    "CAMPING",
    "CAMPING AREA",
    "CANOEING",
    "CANYONEERING",
    "CAVING",
    "CLIMBING",
    "CROSS COUNTRY SKIING",
    "CULTURAL ACTIVITIES",
    "DAY USE AREA",
    "DISC GOLF",
    "DISPERSED CAMPING",
    "DIVING",
    "DOG MUSHING",
    "DOGS ON LEASH (LEASH REQUIRED)",
    "DOWNHILL SKIING",
    "E-BIKING, CLASS 1",
    "E-BIKING, CLASS 2",
    "E-BIKING, CLASS 3",
    "EDUCATIONAL PROGRAMS",
    "ENVIRONMENTAL EDUCATION",
    "EVENING PROGRAMS",
    "FAT TIRE BIKING",
    "FIRE LOOKOUTS/CABINS OVERNIGHT",
    "FISH HATCHERY",
    "FISH VIEWING SITE",
    "FISHING",
    "FLY FISHING",
    "GEOCACHING",
    "GOLD PANNING",
    "GUIDED INTERPRETIVE WALKS",
    "HANG GLIDING - PARASAILING",
    "HIKING",
    "HISTORIC & CULTURAL SITE",
    "HISTORIC SITES",
    "HORSE CAMPING",
    "HORSEBACK RIDING",
    "HOT SPRINGS SOAKING",
    "HUNTING",
    "ICE CLIMBING",
    "ICE FISHING",
    "INFORMATION SITE",
    "INTERPRETIVE PROGRAMS",
    "JET SKIING",
    "KAYAKING",
    "LAND - SAND SAILING",
    "LONG TERM VISITOR AREA",
    "MOTOR BOAT",
    "MOUNTAIN BIKING",
    "MOUNTAIN CLIMBING",
    "NON-MOTORIZED BOATING",
    "OFF HIGHWAY VEHICLE",
    "OHV USE - ULTRALIGHT",
    "PADDLE BOATING",
    "PADDLING",
    "PHOTOGRAPHY",
    "PICNICKING",
    "PLAYGROUND PARK SPECIALIZED SPORT SITE",
    "RAFTING",
    "RANGER STATION",
    "RECREATIONAL SHOOTING",
    "RECREATIONAL VEHICLES",
    "ROCK CLIMBING",
    "ROCKHOUNDING",
    "SAILING",
    "SCENIC DRIVE",
    "SCUBA DIVING",
    "SEA KAYAKING",
    "SHOOTING RANGE",
    "SKATE SKIING",
    "SKIING",
    "SKIJORING",
    "SLEDDING",
    "SNORKELING",
    "SNOW FAT TIRE BIKING",
    "SNOW TUBING",
    "SNOWBOARDING",
    "SNOWMOBILE",
    "SNOWMOBILE TRAILS",
    "SNOWMOBILING",
    "SNOWPARK",
    "SNOWSHOEING",
    "SOFTBALL FIELDS",
    "STARGAZING",
    "SURFING",
    "SWIMMING",
    "SWIMMING SITE",
    "TRAIL RUNNING",
    "TRAILS, HORSE",
    "TRAPPING",
    "TUBING",
    "VISITOR CENTER",
    "WATER ACCESS",
    "WATER SKIING",
    "WATER SPORTS",
    "WHALE WATCHING",
    "WHITEWATER RAFTING",
    "WILD HORSE VIEWING",
    "WILDERNESS",
    "WILDLIFE VIEWING",
    "WINDSURFING",
    "WINTER SPORTS",
];

/// Scans lowercased body text for known activity terms.
///
/// Substring matching is intentional: the site renders activities inside
/// prose and list markup with no stable structure to select on.
pub fn scan_activities(body_text: &str) -> Vec<String> {
    let haystack = body_text.to_lowercase();
    ACTIVITY_KEYWORDS
        .iter()
        .filter(|keyword| haystack.contains(&keyword.to_lowercase()))
        .map(|keyword| keyword.to_string())
        .collect()
}

// src/extract/text.rs
// =============================================================================
// Free-text normalization for extracted fields.
//
// Pages on the target site carry invisible Unicode (zero-width joiners, bidi
// controls), non-breaking spaces, stray ASCII control characters, and a
// federal banner phrase that leaks into scraped text. `clean` strips all of
// that and is idempotent: clean(clean(x)) == clean(x).
// =============================================================================

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Zero-width and bidi control characters
    static ref INVISIBLE: Regex =
        Regex::new("[\\x{200B}-\\x{200F}\\x{202A}-\\x{202E}\\x{2060}-\\x{206F}\\x{FEFF}]")
            .unwrap();
    // ASCII control characters, newline excepted
    static ref CONTROL: Regex = Regex::new("[\\x00-\\x09\\x0B-\\x1F\\x7F]").unwrap();
    // Boilerplate banner, with whatever whitespace surrounds it
    static ref BANNER: Regex =
        Regex::new(r"(?i)\n*\s*An official website of the United States government\s*")
            .unwrap();
    // Three or more newlines collapse to a blank line
    static ref EXCESS_NEWLINES: Regex = Regex::new(r"\n{3,}").unwrap();
}

/// Strips invisible characters, control characters, and known boilerplate
/// from a text field, collapsing runs of blank lines and trimming the ends.
pub fn clean(text: &str) -> String {
    let text = INVISIBLE.replace_all(text, "");
    let text = text.replace('\u{00A0}', " ");
    let text = CONTROL.replace_all(&text, "");
    let text = BANNER.replace_all(&text, "");
    let text = EXCESS_NEWLINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_zero_width_and_bidi_characters() {
        assert_eq!(clean("Afton\u{200B} Canyon\u{202E}"), "Afton Canyon");
        assert_eq!(clean("\u{FEFF}Juniper Flats"), "Juniper Flats");
    }

    #[test]
    fn test_converts_non_breaking_spaces() {
        assert_eq!(clean("14\u{00A0}day limit"), "14 day limit");
    }

    #[test]
    fn test_strips_control_characters_but_keeps_newlines() {
        assert_eq!(clean("line one\x00\x07\nline two"), "line one\nline two");
    }

    #[test]
    fn test_removes_government_banner() {
        let input = "Desert trails.\n\n  An official website of the United States government \nOpen year round.";
        assert_eq!(clean(input), "Desert trails.Open year round.");
    }

    #[test]
    fn test_collapses_newline_runs() {
        assert_eq!(clean("a\n\n\n\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(clean("  hello  "), "hello");
    }

    #[test]
    fn test_clean_is_idempotent() {
        let inputs = [
            "Afton\u{200B} Canyon\u{00A0}\x01\n\n\n\ntrail",
            "An official website of the United States government",
            "  plain text  ",
            "",
            "a\n\n\nAn official website of the United States government\n\n\nb",
        ];
        for input in inputs {
            let once = clean(input);
            assert_eq!(clean(&once), once, "not idempotent for {:?}", input);
        }
    }
}

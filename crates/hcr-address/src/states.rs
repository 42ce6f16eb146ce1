//! Canonical US state reference list and state-name normalization.

/// The 50 canonical state names, in fixed enumeration order. Tie-breaks in
/// [`normalize_state`] resolve to the first match in this order.
pub const STATE_NAMES: [&str; 50] = [
    "Alabama",
    "Alaska",
    "Arizona",
    "Arkansas",
    "California",
    "Colorado",
    "Connecticut",
    "Delaware",
    "Florida",
    "Georgia",
    "Hawaii",
    "Idaho",
    "Illinois",
    "Indiana",
    "Iowa",
    "Kansas",
    "Kentucky",
    "Louisiana",
    "Maine",
    "Maryland",
    "Massachusetts",
    "Michigan",
    "Minnesota",
    "Mississippi",
    "Missouri",
    "Montana",
    "Nebraska",
    "Nevada",
    "New Hampshire",
    "New Jersey",
    "New Mexico",
    "New York",
    "North Carolina",
    "North Dakota",
    "Ohio",
    "Oklahoma",
    "Oregon",
    "Pennsylvania",
    "Rhode Island",
    "South Carolina",
    "South Dakota",
    "Tennessee",
    "Texas",
    "Utah",
    "Vermont",
    "Virginia",
    "Washington",
    "West Virginia",
    "Wisconsin",
    "Wyoming",
];

/// USPS two-letter abbreviations, index-aligned with [`STATE_NAMES`].
const STATE_ABBREVIATIONS: [&str; 50] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
    "VA", "WA", "WV", "WI", "WY",
];

/// Maps a free-form state name or abbreviation to its canonical entry in
/// [`STATE_NAMES`].
///
/// Matching order:
/// 1. exact case-insensitive match against a canonical name;
/// 2. USPS two-letter abbreviation (case-insensitive);
/// 3. first canonical name that case-insensitively contains the candidate
///    as a substring (partial names like `"Virgin"`);
/// 4. no match — the candidate is returned unchanged so the field still
///    shows something rather than blanking.
///
/// Empty or whitespace-only input is returned unchanged.
#[must_use]
pub fn normalize_state(candidate: &str) -> String {
    let trimmed = candidate.trim();
    if trimmed.is_empty() {
        return candidate.to_owned();
    }

    if let Some(name) = STATE_NAMES
        .iter()
        .find(|name| name.eq_ignore_ascii_case(trimmed))
    {
        return (*name).to_owned();
    }

    if trimmed.len() == 2 {
        if let Some(idx) = STATE_ABBREVIATIONS
            .iter()
            .position(|abbr| abbr.eq_ignore_ascii_case(trimmed))
        {
            return STATE_NAMES[idx].to_owned();
        }
    }

    let needle = trimmed.to_ascii_lowercase();
    if let Some(name) = STATE_NAMES
        .iter()
        .find(|name| name.to_ascii_lowercase().contains(&needle))
    {
        return (*name).to_owned();
    }

    candidate.to_owned()
}

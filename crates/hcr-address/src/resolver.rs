//! The address reconciliation core.
//!
//! Merges structured place data, free-text heuristics, and user overrides
//! into one consistent [`ResolvedAddress`]. Resolution never fails: missing
//! structured data is a no-op, a failed extraction leaves fields empty, and
//! every fallback is absorbed internally. Override flags are consulted
//! before every automatic write; coordinates are never overridable because
//! there is no manual lat/lng input.

use hcr_core::{OverrideFlags, ResolvedAddress};

use crate::candidate::{AddressCandidate, Place};
use crate::extract::{city_candidate, find_state_token, find_zip};
use crate::states::normalize_state;

/// Component types accepted as a city, in preference order. The first type
/// that matches any component wins, not the first-listed component.
pub const CITY_COMPONENT_TYPES: [&str; 5] = [
    "locality",
    "postal_town",
    "sublocality",
    "sublocality_level_1",
    "administrative_area_level_3",
];

const ZIP_COMPONENT_TYPE: &str = "postal_code";
const STATE_COMPONENT_TYPE: &str = "administrative_area_level_1";

/// Applies a candidate to the resolved address, dispatching on its shape.
pub fn resolve(addr: &mut ResolvedAddress, flags: OverrideFlags, candidate: &AddressCandidate) {
    match candidate {
        AddressCandidate::Structured(place) => resolve_from_structured(addr, flags, place),
        AddressCandidate::FreeText(raw) => resolve_from_free_text(addr, flags, raw),
    }
}

/// Resolves city/state/zip/location from a structured place.
///
/// A place with no components is a no-op. Extracted fields are written only
/// when non-empty and not user-overridden; the state passes through
/// [`normalize_state`] first. Coordinates, when present, are written
/// unconditionally. If any of city/state/zip is still empty afterwards and
/// the session's display address is non-empty, the free-text heuristics run
/// once on that display string; the free-text path cannot re-trigger this
/// fallback, so resolution always terminates after at most one retry.
pub fn resolve_from_structured(addr: &mut ResolvedAddress, flags: OverrideFlags, place: &Place) {
    if place.components.is_empty() {
        return;
    }

    let zip = component_long_name(place, &[ZIP_COMPONENT_TYPE]);
    let city = component_long_name(place, &CITY_COMPONENT_TYPES);
    let state = component_long_name(place, &[STATE_COMPONENT_TYPE]);

    if !flags.city {
        if let Some(city) = non_empty(city) {
            addr.city = city.to_owned();
        }
    }
    if !flags.state {
        if let Some(state) = non_empty(state) {
            addr.state = normalize_state(state);
        }
    }
    if !flags.zip {
        if let Some(zip) = non_empty(zip) {
            addr.zip = zip.to_owned();
        }
    }

    if let Some(location) = place.location {
        addr.location = Some(location);
    }

    if addr.city.is_empty() || addr.state.is_empty() || addr.zip.is_empty() {
        let display = addr.display_address.trim().to_owned();
        if !display.is_empty() {
            tracing::debug!(
                city = %addr.city,
                state = %addr.state,
                zip = %addr.zip,
                "structured resolution incomplete, retrying via free-text heuristics"
            );
            resolve_from_free_text(addr, flags, &display);
        }
    }
}

/// Resolves city/state/zip from raw text via the regex heuristics.
///
/// Empty or whitespace-only input means "no candidate": all non-overridden
/// fields are cleared and the location is cleared unconditionally. This
/// path never sets coordinates.
pub fn resolve_from_free_text(addr: &mut ResolvedAddress, flags: OverrideFlags, raw: &str) {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        clear_address_fields(addr, flags);
        return;
    }

    let zip = find_zip(trimmed);
    let state = find_state_token(trimmed);

    if let Some(zip) = zip {
        if !flags.zip {
            addr.zip = zip.to_owned();
        }
    }
    if let Some(state) = state {
        if !flags.state {
            addr.state = normalize_state(state);
        }
    }
    if !flags.city {
        if let Some(city) = city_candidate(trimmed, zip, state) {
            addr.city = city;
        }
    }
}

/// Clears city/state/zip where not user-overridden, and the location
/// unconditionally (override flags never protect coordinates).
pub fn clear_address_fields(addr: &mut ResolvedAddress, flags: OverrideFlags) {
    if !flags.city {
        addr.city.clear();
    }
    if !flags.state {
        addr.state.clear();
    }
    if !flags.zip {
        addr.zip.clear();
    }
    addr.location = None;
}

/// First component whose type-set intersects `types`, checked in `types`
/// order.
fn component_long_name<'a>(place: &'a Place, types: &[&str]) -> Option<&'a str> {
    types.iter().find_map(|type_tag| {
        place
            .components
            .iter()
            .find(|component| component.has_type(type_tag))
            .map(|component| component.long_name.as_str())
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

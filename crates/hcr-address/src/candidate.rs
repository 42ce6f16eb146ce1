//! Address candidate types fed into the resolver.
//!
//! A candidate is either a fully structured place (autocomplete selection or
//! geocoder hit, with typed sub-components) or a raw free-text string the
//! user typed, pasted, or left in the field at blur time. Provider payloads
//! are modeled as explicit optional fields rather than an untyped bag so
//! missing-field handling is exhaustive and checked.

use hcr_core::LatLng;
use serde::{Deserialize, Serialize};

/// One typed sub-component of a structured place, e.g.
/// `{ types: ["locality", "political"], long_name: "Austin" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressComponent {
    pub types: Vec<String>,
    pub long_name: String,
}

impl AddressComponent {
    /// Whether this component carries the given type tag.
    #[must_use]
    pub fn has_type(&self, type_tag: &str) -> bool {
        self.types.iter().any(|t| t == type_tag)
    }
}

/// A structured address result from an autocomplete or geocode provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Provider-formatted single-line address. Absent on some partial
    /// results; a suggestion without one is ignored by the session.
    #[serde(default)]
    pub formatted_address: Option<String>,

    /// Typed sub-components. An empty list means the provider returned no
    /// component data and the resolver must not touch the address.
    #[serde(default)]
    pub components: Vec<AddressComponent>,

    /// Geometry, when the provider resolved coordinates.
    #[serde(default)]
    pub location: Option<LatLng>,
}

/// What an input event hands to the resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AddressCandidate {
    /// An autocomplete selection or successful geocoder result.
    Structured(Place),
    /// Raw user text, not yet resolved to components.
    FreeText(String),
}

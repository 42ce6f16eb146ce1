//! Resolved-address domain types shared across the workspace.
//!
//! The resolution *algorithm* lives in `hcr-address`; this module only holds
//! the records it produces and the override bookkeeping that protects
//! user-entered values from automatic derivation.

use serde::{Deserialize, Serialize};

/// A geographic coordinate pair.
///
/// Latitude and longitude are only ever observed together: the resolved
/// address stores `Option<LatLng>`, so there is no state in which exactly
/// one of the two is set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// The reconciled address fields for one review-form session.
///
/// Invariant: each string field is either empty or non-empty after trimming —
/// no field ever holds only whitespace. Writers trim before assignment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedAddress {
    pub city: String,
    pub state: String,
    pub zip: String,
    /// The full address line shown in the input field: a provider-formatted
    /// address after a suggestion is picked, or the raw typed text otherwise.
    pub display_address: String,
    pub location: Option<LatLng>,
}

/// The three address fields a user can manually override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressField {
    City,
    State,
    Zip,
}

/// Per-session record of which fields the user has explicitly typed into.
///
/// A set flag means automatic derivation must not overwrite that field.
/// This is the single source of truth consulted before every automatic
/// field write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverrideFlags {
    pub city: bool,
    pub state: bool,
    pub zip: bool,
}

impl OverrideFlags {
    /// Records a manual edit of `field`. The flag is set when the typed
    /// value is non-empty after trimming and cleared when the user empties
    /// the field again.
    pub fn mark_edited(&mut self, field: AddressField, value: &str) {
        let set = !value.trim().is_empty();
        match field {
            AddressField::City => self.city = set,
            AddressField::State => self.state = set,
            AddressField::Zip => self.zip = set,
        }
    }

    /// Whether automatic derivation is blocked for `field`.
    #[must_use]
    pub fn is_overridden(self, field: AddressField) -> bool {
        match field {
            AddressField::City => self.city,
            AddressField::State => self.state,
            AddressField::Zip => self.zip,
        }
    }
}

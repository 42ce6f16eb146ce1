//! Per-form resolution session.
//!
//! [`ResolutionSession`] is an explicit value object owning the resolved
//! address and override flags for one open review form — no UI-held mutable
//! state. Geocode requests carry a monotonic sequence number; a completion
//! that is not the latest request is discarded, so a stale geocoder
//! response can never overwrite the output of a later user action.

use hcr_core::{AddressField, OverrideFlags, ResolvedAddress};

use crate::candidate::Place;
use crate::resolver::{clear_address_fields, resolve_from_free_text, resolve_from_structured};

/// Where the session currently is in the resolution cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No candidate has been seen since the session opened or was cleared.
    Idle,
    /// A geocode request is in flight.
    AwaitingGeocode,
    /// The most recent candidate has been applied.
    Resolved,
}

/// Result of a geocode call. Failures are absorbed by the session via the
/// free-text heuristics, never surfaced as errors.
#[derive(Debug, Clone)]
pub enum GeocodeOutcome {
    Success(Place),
    /// Provider status or transport description, e.g. `"ZERO_RESULTS"`.
    Failure(String),
}

/// A geocode request issued by the session. The holder resolves it by
/// passing it back to [`ResolutionSession::complete_geocode`] together with
/// the outcome.
#[derive(Debug, Clone)]
pub struct GeocodeRequest {
    pub seq: u64,
    pub query: String,
}

/// Owns the mutable resolution state for one review-form session.
///
/// Created when the form opens, discarded on submit or abandon. All methods
/// run on one logical task; events are serialized by the caller's queue, so
/// no locking is needed.
#[derive(Debug, Default)]
pub struct ResolutionSession {
    address: ResolvedAddress,
    overrides: OverrideFlags,
    phase: SessionPhase,
    /// Set when an autocomplete suggestion has been confirmed since the
    /// field was last cleared; blocks debounced free-text resolution.
    suggestion_picked: bool,
    /// Monotonic sequence of issued geocode requests; completions with an
    /// older sequence are stale and dropped.
    geocode_seq: u64,
}

impl Default for SessionPhase {
    fn default() -> Self {
        SessionPhase::Idle
    }
}

impl ResolutionSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn address(&self) -> &ResolvedAddress {
        &self.address
    }

    /// Consumes the session, yielding the final resolved address for
    /// submission assembly.
    #[must_use]
    pub fn into_address(self) -> ResolvedAddress {
        self.address
    }

    #[must_use]
    pub fn overrides(&self) -> OverrideFlags {
        self.overrides
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn suggestion_picked(&self) -> bool {
        self.suggestion_picked
    }

    /// Records a manual edit of a city/state/zip field: the typed value
    /// lands in the resolved address (this is the form binding) and the
    /// override flag is set or cleared from it.
    pub fn mark_edited(&mut self, field: AddressField, value: &str) {
        self.overrides.mark_edited(field, value);
        let trimmed = value.trim().to_owned();
        match field {
            AddressField::City => self.address.city = trimmed,
            AddressField::State => self.address.state = trimmed,
            AddressField::Zip => self.address.zip = trimmed,
        }
    }

    /// Applies a confirmed autocomplete selection.
    ///
    /// A place without a formatted address is ignored (matching the form's
    /// guard on partial selections). Any in-flight geocode is invalidated so
    /// its late response cannot overwrite the selection. Returns whether the
    /// selection was applied.
    pub fn select_suggestion(&mut self, place: &Place) -> bool {
        let Some(formatted) = place
            .formatted_address
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
        else {
            return false;
        };

        self.invalidate_inflight();
        self.suggestion_picked = true;
        self.address.display_address = formatted.to_owned();
        resolve_from_structured(&mut self.address, self.overrides, place);
        self.phase = SessionPhase::Resolved;
        true
    }

    /// Handles typed input that has sat unchanged for the debounce window.
    ///
    /// Does nothing when a suggestion has been picked since the field was
    /// last cleared. Empty text clears the address; non-empty text becomes
    /// the display address and yields a geocode request for the caller to
    /// run.
    pub fn typed_quiescent(&mut self, text: &str) -> Option<GeocodeRequest> {
        if self.suggestion_picked {
            return None;
        }
        let trimmed = text.trim();
        if trimmed.is_empty() {
            self.clear_input();
            return None;
        }
        self.address.display_address = trimmed.to_owned();
        Some(self.begin_geocode(trimmed))
    }

    /// Handles pasted input after the paste settle delay. Pasting geocodes
    /// regardless of a prior suggestion and leaves the display address to
    /// the resolution result.
    pub fn pasted(&mut self, text: &str) -> Option<GeocodeRequest> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(self.begin_geocode(trimmed))
    }

    /// Handles loss of focus. Empty text clears the address and resets the
    /// suggestion latch; unconfirmed non-empty text is geocoded exactly like
    /// a free-text candidate. The latch always resets on blur.
    pub fn blur(&mut self, text: &str) -> Option<GeocodeRequest> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            self.clear_input();
            return None;
        }

        let request = if self.suggestion_picked {
            None
        } else {
            self.address.display_address = trimmed.to_owned();
            Some(self.begin_geocode(trimmed))
        };
        self.suggestion_picked = false;
        request
    }

    /// Feeds a geocode outcome back into the session.
    ///
    /// Stale responses (the request is no longer the latest) are discarded
    /// and `false` is returned. A success resolves structurally; a failure
    /// falls back to the regex heuristics on the queried text.
    pub fn complete_geocode(&mut self, request: &GeocodeRequest, outcome: GeocodeOutcome) -> bool {
        if request.seq != self.geocode_seq {
            tracing::debug!(
                seq = request.seq,
                latest = self.geocode_seq,
                query = %request.query,
                "discarding stale geocode response"
            );
            return false;
        }

        match outcome {
            GeocodeOutcome::Success(place) => {
                resolve_from_structured(&mut self.address, self.overrides, &place);
            }
            GeocodeOutcome::Failure(reason) => {
                tracing::warn!(%reason, query = %request.query, "geocode failed, using heuristic extraction");
                resolve_from_free_text(&mut self.address, self.overrides, &request.query);
            }
        }
        self.phase = SessionPhase::Resolved;
        true
    }

    /// Clears the address for an emptied input field: non-overridden fields
    /// and coordinates are wiped, the suggestion latch resets, and any
    /// in-flight geocode is invalidated so it cannot repopulate the form.
    pub fn clear_input(&mut self) {
        clear_address_fields(&mut self.address, self.overrides);
        self.suggestion_picked = false;
        self.invalidate_inflight();
        self.phase = SessionPhase::Idle;
    }

    fn begin_geocode(&mut self, query: &str) -> GeocodeRequest {
        self.geocode_seq += 1;
        self.phase = SessionPhase::AwaitingGeocode;
        GeocodeRequest {
            seq: self.geocode_seq,
            query: query.to_owned(),
        }
    }

    /// Bumps the sequence so any in-flight completion becomes stale.
    fn invalidate_inflight(&mut self) {
        self.geocode_seq += 1;
    }
}

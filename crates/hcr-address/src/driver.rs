//! Single-task event driver for a resolution session.
//!
//! UI input events arrive over a channel and are serialized onto one
//! logical task, so the session needs no locking. Typed input is debounced
//! (calibration value 500 ms), pasted input settles for 200 ms, and blur
//! resolves immediately. Geocode calls run concurrently with event intake;
//! their outcomes re-enter the session, where stale responses are dropped
//! by sequence number.

use std::time::Duration;

use futures::future::LocalBoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::mpsc;
use tokio::time::Instant;

use hcr_core::AddressField;

use crate::candidate::Place;
use crate::session::{GeocodeOutcome, GeocodeRequest, ResolutionSession};

/// Asynchronous geocoding lookup consumed by the driver. Failures are
/// values, not errors: transport problems surface as
/// [`GeocodeOutcome::Failure`] and the session absorbs them.
#[allow(async_fn_in_trait)]
pub trait GeocodeService {
    async fn geocode(&self, address: &str) -> GeocodeOutcome;
}

/// One address-input event from the form.
#[derive(Debug, Clone)]
pub enum AddressEvent {
    /// The user confirmed an autocomplete suggestion.
    SuggestionSelected(Place),
    /// The input field content changed (starts/restarts the debounce).
    TypedInput(String),
    /// Text was pasted into the field.
    Pasted(String),
    /// The field lost focus with the given content.
    Blurred(String),
    /// The user typed into one of the city/state/zip fields.
    FieldEdited { field: AddressField, value: String },
}

/// Timing knobs for the driver.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    pub debounce: Duration,
    pub paste_delay: Duration,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(500),
            paste_delay: Duration::from_millis(200),
        }
    }
}

/// Drives a session until the event channel closes and all pending timers
/// and geocode calls have settled.
pub async fn run_session<G: GeocodeService>(
    service: &G,
    config: &DriverConfig,
    mut events: mpsc::Receiver<AddressEvent>,
    session: &mut ResolutionSession,
) {
    let mut inflight: FuturesUnordered<LocalBoxFuture<'_, (GeocodeRequest, GeocodeOutcome)>> =
        FuturesUnordered::new();
    let mut debounce: Option<(Instant, String)> = None;
    let mut paste: Option<(Instant, String)> = None;
    let mut open = true;

    while open || !inflight.is_empty() || debounce.is_some() || paste.is_some() {
        let debounce_at = debounce.as_ref().map(|(at, _)| *at);
        let paste_at = paste.as_ref().map(|(at, _)| *at);

        tokio::select! {
            event = events.recv(), if open => {
                match event {
                    None => open = false,
                    Some(AddressEvent::SuggestionSelected(place)) => {
                        debounce = None;
                        session.select_suggestion(&place);
                    }
                    Some(AddressEvent::TypedInput(text)) => {
                        debounce = Some((Instant::now() + config.debounce, text));
                    }
                    Some(AddressEvent::Pasted(text)) => {
                        paste = Some((Instant::now() + config.paste_delay, text));
                    }
                    Some(AddressEvent::Blurred(text)) => {
                        debounce = None;
                        if let Some(request) = session.blur(&text) {
                            issue(service, &mut inflight, request);
                        }
                    }
                    Some(AddressEvent::FieldEdited { field, value }) => {
                        session.mark_edited(field, &value);
                    }
                }
            }
            Some((request, outcome)) = inflight.next(), if !inflight.is_empty() => {
                session.complete_geocode(&request, outcome);
            }
            () = sleep_until_opt(debounce_at), if debounce_at.is_some() => {
                if let Some((_, text)) = debounce.take() {
                    if let Some(request) = session.typed_quiescent(&text) {
                        issue(service, &mut inflight, request);
                    }
                }
            }
            () = sleep_until_opt(paste_at), if paste_at.is_some() => {
                if let Some((_, text)) = paste.take() {
                    if let Some(request) = session.pasted(&text) {
                        issue(service, &mut inflight, request);
                    }
                }
            }
        }
    }
}

fn issue<'a, G: GeocodeService>(
    service: &'a G,
    inflight: &mut FuturesUnordered<LocalBoxFuture<'a, (GeocodeRequest, GeocodeOutcome)>>,
    request: GeocodeRequest,
) {
    inflight.push(Box::pin(async move {
        let outcome = service.geocode(&request.query).await;
        (request, outcome)
    }));
}

async fn sleep_until_opt(at: Option<Instant>) {
    match at {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}

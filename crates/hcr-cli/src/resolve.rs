//! Address resolution command handler.

use hcr_address::{GeocodeOutcome, GeocodeService, ResolutionSession};
use hcr_backend::GeocodeClient;
use hcr_core::AppConfig;

/// Resolve `text` the way a review form would on blur: geocode when enabled,
/// fall back to the regex heuristics otherwise, and print the resulting
/// address fields as JSON.
///
/// # Errors
///
/// Returns an error if the geocode client cannot be constructed or the
/// result cannot be serialized.
pub(crate) async fn run_resolve(
    config: &AppConfig,
    text: &str,
    geocode: bool,
) -> anyhow::Result<()> {
    let address = resolve_text(config, text, geocode).await?;
    println!("{}", serde_json::to_string_pretty(&address)?);
    Ok(())
}

/// Drives a fresh session through a single blur event and returns the
/// resolved address.
pub(crate) async fn resolve_text(
    config: &AppConfig,
    text: &str,
    geocode: bool,
) -> anyhow::Result<hcr_core::ResolvedAddress> {
    let mut session = ResolutionSession::new();

    if let Some(request) = session.blur(text) {
        let outcome = if geocode {
            let client = GeocodeClient::new(
                &config.geocode_url,
                config.geocode_api_key.clone(),
                config.request_timeout_secs,
            )
            .map_err(|e| anyhow::anyhow!("failed to build geocode client: {e}"))?;
            client.geocode(&request.query).await
        } else {
            GeocodeOutcome::Failure("geocoding disabled".to_owned())
        };
        session.complete_geocode(&request, outcome);
    }

    Ok(session.into_address())
}

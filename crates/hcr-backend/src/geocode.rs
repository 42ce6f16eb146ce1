//! Geocoding client adapting the provider's JSON shape to the resolver's
//! [`Place`] type.
//!
//! The provider's status codes are values, not errors: anything other than
//! `"OK"` with at least one result becomes [`GeocodeOutcome::Failure`], and
//! transport problems are folded into the same shape so the resolution
//! session can always fall back to its heuristics (it has no error path).

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;

use hcr_address::{AddressComponent, GeocodeOutcome, GeocodeService, Place};
use hcr_core::LatLng;

use crate::error::BackendError;

/// Client for the geocoding REST API.
pub struct GeocodeClient {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl GeocodeClient {
    /// Creates a client for the geocode endpoint at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`BackendError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("hcr/0.1 (address-resolution)")
            .build()?;

        let base_url = Url::parse(base_url).map_err(|e| BackendError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// Geocodes `address` (US-biased) and classifies the response.
    ///
    /// # Errors
    ///
    /// - [`BackendError::Http`] on network failure or non-2xx status.
    /// - [`BackendError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn lookup(&self, address: &str) -> Result<GeocodeOutcome, BackendError> {
        let mut request = self
            .client
            .get(self.base_url.clone())
            .query(&[("address", address), ("region", "US")]);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key.as_str())]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.base_url.to_string(),
            });
        }

        let body: serde_json::Value = response.json().await?;
        let parsed: GeocodeResponse =
            serde_json::from_value(body).map_err(|e| BackendError::Deserialize {
                context: format!("geocode({address})"),
                source: e,
            })?;

        if parsed.status == "OK" {
            if let Some(first) = parsed.results.into_iter().next() {
                return Ok(GeocodeOutcome::Success(first.into_place()));
            }
        }
        Ok(GeocodeOutcome::Failure(parsed.status))
    }
}

impl GeocodeService for GeocodeClient {
    async fn geocode(&self, address: &str) -> GeocodeOutcome {
        match self.lookup(address).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(error = %e, "geocode transport failure");
                GeocodeOutcome::Failure(format!("transport: {e}"))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    #[serde(default)]
    formatted_address: Option<String>,
    #[serde(default)]
    address_components: Vec<RawComponent>,
    #[serde(default)]
    geometry: Option<RawGeometry>,
}

#[derive(Debug, Deserialize)]
struct RawComponent {
    #[serde(default)]
    types: Vec<String>,
    long_name: String,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    location: RawLocation,
}

#[derive(Debug, Deserialize)]
struct RawLocation {
    lat: f64,
    lng: f64,
}

impl GeocodeResult {
    fn into_place(self) -> Place {
        Place {
            formatted_address: self.formatted_address,
            components: self
                .address_components
                .into_iter()
                .map(|c| AddressComponent {
                    types: c.types,
                    long_name: c.long_name,
                })
                .collect(),
            location: self.geometry.map(|g| LatLng {
                lat: g.location.lat,
                lng: g.location.lng,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_place_maps_components_and_geometry() {
        let result: GeocodeResult = serde_json::from_value(serde_json::json!({
            "formatted_address": "Austin, TX 78701, USA",
            "address_components": [
                { "types": ["locality", "political"], "long_name": "Austin" },
                { "types": ["postal_code"], "long_name": "78701" }
            ],
            "geometry": { "location": { "lat": 30.267, "lng": -97.743 } }
        }))
        .expect("valid fixture");

        let place = result.into_place();
        assert_eq!(place.components.len(), 2);
        assert!(place.components[0].has_type("locality"));
        assert_eq!(
            place.location,
            Some(LatLng {
                lat: 30.267,
                lng: -97.743
            })
        );
    }

    #[test]
    fn into_place_tolerates_missing_geometry() {
        let result: GeocodeResult = serde_json::from_value(serde_json::json!({
            "address_components": [
                { "types": ["locality"], "long_name": "Austin" }
            ]
        }))
        .expect("valid fixture");

        let place = result.into_place();
        assert!(place.location.is_none());
        assert!(place.formatted_address.is_none());
    }
}

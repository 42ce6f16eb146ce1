//! HTTP client for the hosted backend's REST surface.
//!
//! Wraps `reqwest` with API-key headers, typed response deserialization,
//! and PostgREST-style upsert/filter parameters. The base URL is injectable
//! so tests can point at a mock server.

use std::time::Duration;

use chrono::Utc;
use reqwest::{Client, Response, Url};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use hcr_core::ReviewSubmission;
use hcr_push::{PushError, TokenStore};

use crate::error::BackendError;

/// Client for the hosted backend (REST tables + object storage).
pub struct BackendClient {
    pub(crate) client: Client,
    pub(crate) base_url: Url,
    pub(crate) api_key: String,
}

/// A project-type reference row from the `services` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceType {
    pub id: i64,
    pub name: String,
}

impl BackendClient {
    /// Creates a client for the given backend project.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`BackendError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(base_url: &str, api_key: &str, timeout_secs: u64) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("hcr/0.1 (review-submission)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // joins append to the path rather than replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| BackendError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.to_owned(),
        })
    }

    /// Inserts or refreshes a `(user_id, fcm_token)` row in `user_tokens`.
    ///
    /// Conflicts on the pair merge into the existing row, refreshing
    /// `updated_at`.
    ///
    /// # Errors
    ///
    /// - [`BackendError::Http`] on network failure.
    /// - [`BackendError::UnexpectedStatus`] on a non-2xx response.
    pub async fn upsert_user_token(&self, user_id: Uuid, token: &str) -> Result<(), BackendError> {
        let url = self.table_url("user_tokens")?;
        let body = serde_json::json!({
            "user_id": user_id,
            "fcm_token": token,
            "updated_at": Utc::now(),
        });

        let response = self
            .authed(self.client.post(url.clone()))
            .query(&[("on_conflict", "user_id,fcm_token")])
            .header("Prefer", "resolution=merge-duplicates")
            .json(&body)
            .send()
            .await?;
        Self::check_status(&response, &url)?;

        tracing::debug!(%user_id, "push token upserted");
        Ok(())
    }

    /// Deletes every `user_tokens` row for `user_id`.
    ///
    /// # Errors
    ///
    /// - [`BackendError::Http`] on network failure.
    /// - [`BackendError::UnexpectedStatus`] on a non-2xx response.
    pub async fn delete_user_tokens(&self, user_id: Uuid) -> Result<(), BackendError> {
        let url = self.table_url("user_tokens")?;
        let response = self
            .authed(self.client.delete(url.clone()))
            .query(&[("user_id", format!("eq.{user_id}"))])
            .send()
            .await?;
        Self::check_status(&response, &url)?;

        tracing::debug!(%user_id, "push tokens deleted");
        Ok(())
    }

    /// Inserts an assembled review into the `reviews` table.
    ///
    /// # Errors
    ///
    /// - [`BackendError::Http`] on network failure.
    /// - [`BackendError::UnexpectedStatus`] on a non-2xx response.
    pub async fn submit_review(&self, review: &ReviewSubmission) -> Result<(), BackendError> {
        let url = self.table_url("reviews")?;
        let response = self
            .authed(self.client.post(url.clone()))
            .header("Prefer", "return=minimal")
            .json(review)
            .send()
            .await?;
        Self::check_status(&response, &url)?;

        tracing::info!(contractor_id = %review.contractor_id, "review submitted");
        Ok(())
    }

    /// Fetches the project-type reference list.
    ///
    /// # Errors
    ///
    /// - [`BackendError::Http`] on network failure.
    /// - [`BackendError::UnexpectedStatus`] on a non-2xx response.
    /// - [`BackendError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn list_services(&self) -> Result<Vec<ServiceType>, BackendError> {
        let url = self.table_url("services")?;
        let response = self
            .authed(self.client.get(url.clone()))
            .query(&[("select", "*"), ("order", "name")])
            .send()
            .await?;
        Self::check_status(&response, &url)?;

        let body: serde_json::Value = response.json().await?;
        serde_json::from_value(body).map_err(|e| BackendError::Deserialize {
            context: "listServices".to_owned(),
            source: e,
        })
    }

    pub(crate) fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    pub(crate) fn check_status(response: &Response, url: &Url) -> Result<(), BackendError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(BackendError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            })
        }
    }

    fn table_url(&self, table: &str) -> Result<Url, BackendError> {
        self.base_url
            .join(&format!("rest/v1/{table}"))
            .map_err(|e| BackendError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }
}

impl TokenStore for BackendClient {
    async fn upsert_token(&self, user_id: Uuid, token: &str) -> Result<(), PushError> {
        self.upsert_user_token(user_id, token)
            .await
            .map_err(|e| PushError::TokenPersist(e.to_string()))
    }

    async fn delete_tokens(&self, user_id: Uuid) -> Result<(), PushError> {
        self.delete_user_tokens(user_id)
            .await
            .map_err(|e| PushError::TokenPersist(e.to_string()))
    }
}

//! Push-notification registration and token lifecycle.
//!
//! The platform notification API and the token persistence backend are both
//! behind traits: [`PushPlatform`] is implemented by the host shell,
//! [`TokenStore`] by the hosted backend client. [`PushService`] wires the
//! permission/registration flow between them.

pub mod service;
pub mod types;

pub use service::PushService;
pub use types::{PermissionState, PushEvent, PushNotification, RegistrationToken};

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum PushError {
    #[error("push permission not granted")]
    PermissionDenied,

    #[error("push registration failed: {0}")]
    Registration(String),

    #[error("failed to persist push token: {0}")]
    TokenPersist(String),
}

/// Platform notification API: permission checks and registration.
#[allow(async_fn_in_trait)]
pub trait PushPlatform {
    async fn check_permissions(&self) -> PermissionState;
    async fn request_permissions(&self) -> PermissionState;

    /// Starts registration with the platform push gateway. The resulting
    /// token (or error) arrives later as a [`PushEvent`].
    ///
    /// # Errors
    ///
    /// Returns [`PushError::Registration`] when the platform rejects the
    /// registration attempt outright.
    async fn register(&self) -> Result<(), PushError>;
}

/// Token persistence keyed by `(user_id, token)` with upsert semantics,
/// deletable per user.
#[allow(async_fn_in_trait)]
pub trait TokenStore {
    /// Inserts or refreshes a `(user_id, token)` row.
    ///
    /// # Errors
    ///
    /// Returns [`PushError::TokenPersist`] when the backend write fails.
    async fn upsert_token(&self, user_id: Uuid, token: &str) -> Result<(), PushError>;

    /// Deletes every token registered for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`PushError::TokenPersist`] when the backend delete fails.
    async fn delete_tokens(&self, user_id: Uuid) -> Result<(), PushError>;
}

//! Event and payload types for the push subsystem.

use serde::{Deserialize, Serialize};

/// Platform permission state for receiving push notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    /// The user has not been asked yet.
    Prompt,
    Granted,
    Denied,
}

/// A registration token minted by the platform push gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationToken {
    pub value: String,
}

/// A delivered notification payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PushNotification {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    /// Provider-specific extras, passed through untouched.
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Delivery-event callbacks surfaced by the platform.
#[derive(Debug, Clone)]
pub enum PushEvent {
    /// Registration succeeded and produced a token.
    Registered(RegistrationToken),
    /// Registration failed after being initiated.
    RegistrationError(String),
    /// A notification arrived while the app was in the foreground.
    Received(PushNotification),
    /// The user tapped a notification delivered in the background.
    ActionPerformed(PushNotification),
}

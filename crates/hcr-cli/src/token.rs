//! Push-token command handlers.

use uuid::Uuid;

use hcr_backend::BackendClient;
use hcr_core::AppConfig;

fn backend(config: &AppConfig) -> anyhow::Result<BackendClient> {
    Ok(BackendClient::new(
        &config.backend_url,
        &config.backend_api_key,
        config.request_timeout_secs,
    )?)
}

/// Store (or refresh) a device token for `user`.
///
/// # Errors
///
/// Returns an error if the backend request fails.
pub(crate) async fn run_save(config: &AppConfig, user: Uuid, token: &str) -> anyhow::Result<()> {
    backend(config)?.upsert_user_token(user, token).await?;
    println!("token saved for user {user}");
    Ok(())
}

/// Delete every stored device token for `user`.
///
/// # Errors
///
/// Returns an error if the backend request fails.
pub(crate) async fn run_clear(config: &AppConfig, user: Uuid) -> anyhow::Result<()> {
    backend(config)?.delete_user_tokens(user).await?;
    println!("tokens cleared for user {user}");
    Ok(())
}

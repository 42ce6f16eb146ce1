use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let backend_url = require("HCR_BACKEND_URL")?;
    let backend_api_key = require("HCR_BACKEND_API_KEY")?;

    let env = parse_environment(&or_default("HCR_ENV", "development"));
    let log_level = or_default("HCR_LOG_LEVEL", "info");
    let storage_bucket = or_default("HCR_STORAGE_BUCKET", "profile-images");
    let geocode_url = or_default(
        "HCR_GEOCODE_URL",
        "https://maps.googleapis.com/maps/api/geocode/json",
    );
    let geocode_api_key = lookup("HCR_GEOCODE_API_KEY").ok();

    let request_timeout_secs = parse_u64("HCR_REQUEST_TIMEOUT_SECS", "30")?;
    let debounce_ms = parse_u64("HCR_ADDRESS_DEBOUNCE_MS", "500")?;
    let paste_delay_ms = parse_u64("HCR_ADDRESS_PASTE_DELAY_MS", "200")?;

    Ok(AppConfig {
        env,
        log_level,
        backend_url,
        backend_api_key,
        storage_bucket,
        geocode_url,
        geocode_api_key,
        request_timeout_secs,
        debounce_ms,
        paste_delay_ms,
    })
}

fn parse_environment(raw: &str) -> Environment {
    match raw.to_ascii_lowercase().as_str() {
        "production" | "prod" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

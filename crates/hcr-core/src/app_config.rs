#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Base URL of the hosted backend (REST + storage).
    pub backend_url: String,
    pub backend_api_key: String,
    /// Storage bucket holding review photos.
    pub storage_bucket: String,
    /// Base URL of the geocoding API; overridable for tests.
    pub geocode_url: String,
    pub geocode_api_key: Option<String>,
    pub request_timeout_secs: u64,
    /// Quiescence window before typed address input is resolved.
    pub debounce_ms: u64,
    /// Delay before pasted address input is resolved.
    pub paste_delay_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("backend_url", &self.backend_url)
            .field("backend_api_key", &"[redacted]")
            .field("storage_bucket", &self.storage_bucket)
            .field("geocode_url", &self.geocode_url)
            .field(
                "geocode_api_key",
                &self.geocode_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("debounce_ms", &self.debounce_ms)
            .field("paste_delay_ms", &self.paste_delay_ms)
            .finish()
    }
}

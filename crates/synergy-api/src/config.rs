use url::Url;

/// Default backend address for local development.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Environment variable overriding the backend base URL.
pub const API_URL_ENV: &str = "SYNERGY_API_URL";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: Url,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
        })
    }

    /// Read the base URL from `SYNERGY_API_URL`, falling back to the local
    /// development address.
    pub fn from_env() -> Result<Self, url::ParseError> {
        let raw = std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.into());
        Self::new(&raw)
    }
}

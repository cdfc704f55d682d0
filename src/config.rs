//! Client configuration.
//!
//! The backend base URL is resolved exactly once, at construction: the
//! `MAILDESK_API_URL` environment variable wins, then a caller-supplied
//! override, then the local-development default. Call sites never look the
//! URL up ambiently.

/// Environment variable consulted for the backend base URL.
pub const BASE_URL_ENV: &str = "MAILDESK_API_URL";

/// Fallback base URL for local development.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Resolved connection settings for the backend API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// Use an explicit base URL. A trailing slash is stripped so endpoint
    /// paths can always start with `/`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Resolve the base URL: environment, then `override_url`, then the
    /// hardcoded fallback.
    pub fn resolve(override_url: Option<&str>) -> Self {
        Self::resolve_from(std::env::var(BASE_URL_ENV).ok(), override_url)
    }

    fn resolve_from(env_url: Option<String>, override_url: Option<&str>) -> Self {
        match env_url.filter(|url| !url.is_empty()) {
            Some(url) => Self::new(url),
            None => Self::new(override_url.unwrap_or(DEFAULT_BASE_URL)),
        }
    }

    /// The resolved base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an endpoint path (`path` starts with `/`).
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::resolve(None)
    }
}

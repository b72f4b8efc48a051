//! Client configuration
//!
//! All settings the client needs are carried by [`TvdbConfig`] and handed to
//! the constructor; nothing is read from global state afterwards.

use crate::error::{Result, TvdbError};
use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Base URL of TheTVDB v3 REST API
const DEFAULT_API_URL: &str = "https://api.thetvdb.com";

/// Base URL image file names are resolved against
const DEFAULT_IMAGE_URL: &str = "https://thetvdb.com/banners/";

/// Language requested for all textual fields
const DEFAULT_LANGUAGE: &str = "en";

/// Request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`crate::TvdbClient`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TvdbConfig {
    /// API key exchanged for a bearer token on first use
    pub api_key: String,
    /// Optional account name sent along with the api key
    #[serde(default)]
    pub username: Option<String>,
    /// Optional account key sent along with the api key
    #[serde(default)]
    pub user_key: Option<String>,
    /// Root of the REST API; a trailing slash is ignored
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Prefix for image file names
    #[serde(default = "default_image_url")]
    pub image_url: String,
    /// Value of the `Accept-Language` header
    #[serde(default = "default_language")]
    pub language: String,
    /// Per-request timeout enforced by the HTTP transport
    #[serde(default = "default_timeout")]
    pub timeout: Duration,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_image_url() -> String {
    DEFAULT_IMAGE_URL.to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(DEFAULT_TIMEOUT_SECS)
}

impl TvdbConfig {
    /// Creates a configuration for the public API with the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            username: None,
            user_key: None,
            api_url: default_api_url(),
            image_url: default_image_url(),
            language: default_language(),
            timeout: default_timeout(),
        }
    }

    /// Builds a configuration from `TVDB_API_KEY` and the optional
    /// `TVDB_USERNAME`, `TVDB_USER_KEY` and `TVDB_LANGUAGE` variables.
    ///
    /// # Errors
    ///
    /// Returns `TvdbError::InvalidCredentials` if `TVDB_API_KEY` is unset or empty.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a configuration from whatever `lookup` returns for the
    /// `TVDB_*` variable names.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup("TVDB_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                TvdbError::InvalidCredentials("TVDB_API_KEY is not set".to_string())
            })?;

        let mut config = Self::new(api_key);
        config.username = lookup("TVDB_USERNAME");
        config.user_key = lookup("TVDB_USER_KEY");
        if let Some(language) = lookup("TVDB_LANGUAGE") {
            config.language = language;
        }
        Ok(config)
    }

    /// Sets the account name and key sent with the login request.
    #[must_use]
    pub fn with_user(mut self, username: impl Into<String>, user_key: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.user_key = Some(user_key.into());
        self
    }

    /// Overrides the API root (used to point the client at a mock server).
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Overrides the image base URL.
    #[must_use]
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = url.into();
        self
    }

    /// Overrides the response language.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Overrides the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The API root without trailing slashes, however the config was built.
    fn api_root(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    pub(crate) fn login_url(&self) -> String {
        format!("{}/login", self.api_root())
    }

    pub(crate) fn search_url(&self) -> String {
        format!("{}/search/series", self.api_root())
    }

    pub(crate) fn series_url(&self, path: &str) -> String {
        format!("{}/series/{}", self.api_root(), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_public_defaults() {
        let config = TvdbConfig::new("KEY");
        assert_eq!(config.api_key, "KEY");
        assert_eq!(config.api_url, "https://api.thetvdb.com");
        assert_eq!(config.image_url, "https://thetvdb.com/banners/");
        assert_eq!(config.language, "en");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.username.is_none());
    }

    #[test]
    fn test_with_api_url_strips_trailing_slash() {
        let config = TvdbConfig::new("KEY").with_api_url("http://127.0.0.1:8080/");
        assert_eq!(config.api_url, "http://127.0.0.1:8080");
        assert_eq!(config.login_url(), "http://127.0.0.1:8080/login");
        assert_eq!(config.search_url(), "http://127.0.0.1:8080/search/series");
        assert_eq!(
            config.series_url("73388/episodes"),
            "http://127.0.0.1:8080/series/73388/episodes"
        );
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: TvdbConfig =
            serde_json::from_str(r#"{"api_key": "KEY", "language": "de"}"#).unwrap();
        assert_eq!(config.api_key, "KEY");
        assert_eq!(config.language, "de");
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_with_user() {
        let config = TvdbConfig::new("KEY").with_user("alice", "SECRET");
        assert_eq!(config.username.as_deref(), Some("alice"));
        assert_eq!(config.user_key.as_deref(), Some("SECRET"));
    }

    #[test]
    fn test_deserialized_api_url_builds_clean_urls() {
        let config: TvdbConfig =
            serde_json::from_str(r#"{"api_key": "KEY", "api_url": "https://x/"}"#).unwrap();
        assert_eq!(config.login_url(), "https://x/login");
        assert_eq!(config.search_url(), "https://x/search/series");
        assert_eq!(config.series_url("1/actors"), "https://x/series/1/actors");
    }

    fn variables(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
            .collect();
        move |name| {
            pairs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone())
        }
    }

    #[test]
    fn test_lookup_without_api_key_is_invalid_credentials() {
        let result = TvdbConfig::from_lookup(variables(&[("TVDB_USERNAME", "alice")]));
        assert!(matches!(result, Err(TvdbError::InvalidCredentials(_))));
    }

    #[test]
    fn test_lookup_with_blank_api_key_is_invalid_credentials() {
        let result = TvdbConfig::from_lookup(variables(&[("TVDB_API_KEY", "  ")]));
        assert!(matches!(result, Err(TvdbError::InvalidCredentials(_))));
    }

    #[test]
    fn test_lookup_reads_all_variables() {
        let config = TvdbConfig::from_lookup(variables(&[
            ("TVDB_API_KEY", "KEY"),
            ("TVDB_USERNAME", "alice"),
            ("TVDB_USER_KEY", "SECRET"),
            ("TVDB_LANGUAGE", "de"),
        ]))
        .unwrap();
        assert_eq!(config.api_key, "KEY");
        assert_eq!(config.username.as_deref(), Some("alice"));
        assert_eq!(config.user_key.as_deref(), Some("SECRET"));
        assert_eq!(config.language, "de");
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }
}

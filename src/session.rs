//! Authorization state shared by all requests of one client
//!
//! The session owns the request headers. Once the api key has been exchanged
//! for a bearer token, the token is attached to the headers and every later
//! request carries it.

use crate::catalog::tvdb_types::{LoginRequest, LoginResponse};
use crate::config::TvdbConfig;
use crate::error::{Result, TvdbError};
use crate::transport::{Transport, upstream_error};
use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue,
};
use tracing::info;

/// Request headers plus the authorization flag of one client instance.
#[derive(Debug, Clone)]
pub(crate) struct Session {
    headers: HeaderMap,
    authorized: bool,
}

impl Session {
    /// Creates an unauthorized session declaring JSON and the configured language.
    pub(crate) fn new(config: &TvdbConfig) -> Result<Self> {
        let language = HeaderValue::from_str(&config.language).map_err(|_| {
            TvdbError::InvalidInput(format!("invalid language tag: {}", config.language))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT_LANGUAGE, language);

        Ok(Self {
            headers,
            authorized: false,
        })
    }

    pub(crate) fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub(crate) fn is_authorized(&self) -> bool {
        self.authorized
    }

    /// Logs in unless this session already holds a token.
    ///
    /// A rejected login is not retried; the session stays unauthorized.
    pub(crate) fn ensure_authorized<T: Transport>(
        &mut self,
        transport: &T,
        config: &TvdbConfig,
    ) -> Result<()> {
        if self.authorized {
            return Ok(());
        }

        if config.api_key.trim().is_empty() {
            return Err(TvdbError::InvalidCredentials(
                "no api key configured".to_string(),
            ));
        }

        let payload = LoginRequest {
            apikey: &config.api_key,
            username: config.username.as_deref(),
            userkey: config.user_key.as_deref(),
        };
        let body = serde_json::to_value(&payload)
            .map_err(|e| TvdbError::InvalidData(e.to_string()))?;

        let response = transport.post(&config.login_url(), &body, &self.headers)?;
        if let Some(message) = upstream_error(&response) {
            return Err(TvdbError::InvalidCredentials(message.to_string()));
        }

        let token = serde_json::from_value::<LoginResponse>(response)
            .ok()
            .and_then(|login| login.token)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                TvdbError::InvalidCredentials("login response carried no token".to_string())
            })?;

        let bearer = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
            TvdbError::InvalidCredentials("token is not a valid header value".to_string())
        })?;
        self.headers.insert(AUTHORIZATION, bearer);
        self.authorized = true;

        info!("Authorized against TheTVDB");
        Ok(())
    }
}

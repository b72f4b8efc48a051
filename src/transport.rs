//! HTTP transport for TheTVDB.
//!
//! The client only needs two capabilities from the network: a GET with query
//! parameters and a POST with a JSON body, both answering with a JSON value.
//! [`Transport`] captures exactly that so the request logic can be exercised
//! without a live server.

use crate::config::TvdbConfig;
use crate::error::{Result, TvdbError};
use reqwest::header::HeaderMap;
use serde_json::Value;
use tracing::debug;

/// Capability to issue JSON requests against the service.
///
/// Implementations return the decoded body for every HTTP status. TheTVDB
/// reports failures such as "no results" inside the body, so classifying
/// them is left to the caller.
pub trait Transport {
    /// Issues a GET request with the given query parameters and headers.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent or the body is not JSON.
    fn get(&self, url: &str, query: &[(&str, String)], headers: &HeaderMap) -> Result<Value>;

    /// Issues a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent or the body is not JSON.
    fn post(&self, url: &str, body: &Value, headers: &HeaderMap) -> Result<Value>;
}

/// Transport backed by a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Creates a transport honouring the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns `TvdbError::Request` if the TLS backend cannot be initialised.
    pub fn new(config: &TvdbConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client })
    }

    /// Reads the body of any response as JSON.
    fn decode(response: reqwest::blocking::Response) -> Result<Value> {
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "TheTVDB response");

        let body = response.text()?;
        serde_json::from_str(&body).map_err(|e| {
            TvdbError::Parse(format!(
                "HTTP {} {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown"),
                e
            ))
        })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, query: &[(&str, String)], headers: &HeaderMap) -> Result<Value> {
        debug!(method = "GET", url, ?query, "TheTVDB request");
        let response = self
            .client
            .get(url)
            .query(query)
            .headers(headers.clone())
            .send()?;
        Self::decode(response)
    }

    fn post(&self, url: &str, body: &Value, headers: &HeaderMap) -> Result<Value> {
        debug!(method = "POST", url, "TheTVDB request");
        let response = self
            .client
            .post(url)
            .json(body)
            .headers(headers.clone())
            .send()?;
        Self::decode(response)
    }
}

/// Returns the service's error message if the body carries one.
///
/// TheTVDB signals "nothing found" and rejected credentials with a top-level
/// `Error` string instead of a payload.
pub(crate) fn upstream_error(body: &Value) -> Option<&str> {
    match body.get("Error") {
        None | Some(Value::Null) => None,
        Some(Value::String(message)) if message.is_empty() => None,
        Some(Value::String(message)) => Some(message.as_str()),
        Some(_) => Some("unspecified error"),
    }
}

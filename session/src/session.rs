//! Asynchronous dispatch of resolved requests.
//!
//! # Design
//! `Session` owns the fixed base URL and a `reqwest::Client` built once at
//! construction; both are read-only afterwards, so one session is safely
//! shared across concurrent tasks. Each [`Session::send`] call is
//! single-shot: resolve, execute, decode — no retries, no status-code
//! interpretation. The returned future resumes on the caller's executor
//! context, never on a transport worker thread. Dropping the future aborts
//! the in-flight request.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::error::SessionError;
use crate::http::ResolvedRequest;
use crate::request::{resolve, ApiRequest};

/// Transport timeouts, applied to every request a session dispatches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Longest pause tolerated while receiving response data.
    pub request_timeout: Duration,
    /// Ceiling on the whole transfer, connect to last byte.
    pub resource_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            resource_timeout: Duration::from_secs(120),
        }
    }
}

/// Dispatches typed requests against a fixed base URL.
///
/// Holds no shared cookie store or cache — every `Session` is isolated from
/// every other. Construct once and reuse for the life of the process.
#[derive(Debug, Clone)]
pub struct Session {
    base_url: Url,
    client: reqwest::Client,
}

impl Session {
    /// A session with the default timeouts (30 s per read, 120 s total).
    pub fn new(base_url: Url) -> Self {
        Self::with_config(base_url, SessionConfig::default())
    }

    pub fn with_config(base_url: Url, config: SessionConfig) -> Self {
        let client = reqwest::Client::builder()
            .read_timeout(config.request_timeout)
            .timeout(config.resource_timeout)
            .build()
            .expect("HTTP client construction fails only on TLS backend misconfiguration");

        Self { base_url, client }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Dispatch a request and decode its JSON response into `R::Response`.
    ///
    /// Resolution failures ([`SessionError::MalformedUrl`]) abort before any
    /// network attempt. Transport failures surface as
    /// [`SessionError::Transport`] without the body being inspected; a body
    /// that arrives intact but does not decode into the declared shape is
    /// [`SessionError::Decode`]. HTTP status codes are not interpreted — an
    /// error body either decodes into `R::Response` or fails decoding.
    pub async fn send<R: ApiRequest>(&self, request: &R) -> Result<R::Response, SessionError> {
        let resolved = resolve(request, &self.base_url)?;

        let bytes = self.transfer(resolved).await.map_err(|err| {
            tracing::warn!(error = %err, "network request failed");
            SessionError::Transport(err)
        })?;

        serde_json::from_slice(&bytes).map_err(SessionError::Decode)
    }

    async fn transfer(&self, resolved: ResolvedRequest) -> Result<bytes::Bytes, reqwest::Error> {
        let mut builder = self.client.request(verb(resolved.method), resolved.url);

        for (key, value) in &resolved.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = resolved.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        response.bytes().await
    }
}

/// Decode one JSON body into a declared response shape.
///
/// Exposed for callers that run the transport themselves but want the same
/// decoding contract as [`Session::send`].
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SessionError> {
    serde_json::from_slice(bytes).map_err(SessionError::Decode)
}

// The resolver only ever emits these three names.
fn verb(name: &str) -> reqwest::Method {
    match name {
        "POST" => reqwest::Method::POST,
        "PUT" => reqwest::Method::PUT,
        _ => reqwest::Method::GET,
    }
}

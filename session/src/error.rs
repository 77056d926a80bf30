//! Error types for the session client.
//!
//! # Design
//! `Io` and `MalformedUrl` abort a request before any network attempt is
//! made. `Transport` wraps network-layer failures (connect, timeout, TLS)
//! without inspecting the response bytes. `Decode` is a distinct variant so
//! callers can tell "the network succeeded but the body was unparseable"
//! apart from a transport failure.

use std::fmt;

/// Errors returned by the request pipeline.
#[derive(Debug)]
pub enum SessionError {
    /// Reading a local file for a multipart upload failed.
    Io(std::io::Error),

    /// The endpoint could not be parsed or resolved against the base URL.
    /// Carries the offending endpoint string.
    MalformedUrl(String),

    /// Connection, timeout, TLS, or other network-layer failure.
    Transport(reqwest::Error),

    /// The response body was not valid JSON for the expected shape.
    Decode(serde_json::Error),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Io(err) => write!(f, "multipart file read failed: {err}"),
            SessionError::MalformedUrl(endpoint) => {
                write!(f, "malformed request URL: {endpoint}")
            }
            SessionError::Transport(err) => write!(f, "network request failed: {err}"),
            SessionError::Decode(err) => write!(f, "response decoding failed: {err}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Io(err) => Some(err),
            SessionError::MalformedUrl(_) => None,
            SessionError::Transport(err) => Some(err),
            SessionError::Decode(err) => Some(err),
        }
    }
}

//! Asynchronous typed client for JSON HTTP APIs.
//!
//! # Overview
//! Callers describe each API call as a type implementing [`ApiRequest`]:
//! an HTTP method (GET with query items, or POST/PUT with a raw body), an
//! endpoint resolved against the session's fixed base URL, optional headers,
//! and the shape the JSON response decodes into. [`Session::send`] resolves
//! the request, dispatches it over HTTP, and decodes the body — or returns
//! a [`SessionError`] pinpointing which stage failed.
//!
//! # Design
//! - Resolution ([`request::resolve`]) is a pure synchronous transform,
//!   testable without a network; dispatch is a separate async step.
//! - `Session` is read-only after construction and shared freely across
//!   tasks; concurrent requests are independent and complete in whatever
//!   order the transport finishes them.
//! - Response shapes decode snake_case JSON keys directly into snake_case
//!   fields; timestamp fields use [`epoch_millis`] (milliseconds since the
//!   Unix epoch).
//! - Multipart upload bodies are encoded by [`multipart::form_data`] in the
//!   legacy byte-exact wire format and fed to a POST/PUT request together
//!   with the headers it returns.

pub mod error;
pub mod http;
pub mod multipart;
pub mod request;
pub mod session;

pub use error::SessionError;
pub use http::{HeaderMap, HttpMethod, ResolvedRequest};
pub use multipart::{FileParameter, ValueParameter};
pub use request::ApiRequest;
pub use session::{Session, SessionConfig};

/// Serde adapter for timestamp fields carried as milliseconds since the
/// Unix epoch: `#[serde(with = "api_session::epoch_millis")]`.
pub use chrono::serde::ts_milliseconds as epoch_millis;

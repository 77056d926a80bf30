//! Transport-ready request types.
//!
//! # Design
//! These types describe a fully resolved HTTP request as plain data. The
//! resolver produces a `ResolvedRequest` and the session executes it without
//! any further interpretation — the split keeps URL assembly and header
//! defaulting deterministic and testable away from the network.

use std::collections::HashMap;

use url::Url;

/// Header names and values as the caller supplies them. Keys are matched
/// case-sensitively by the resolver's Content-Type check.
pub type HeaderMap = HashMap<String, String>;

/// HTTP method for a request, carrying the method-specific payload.
///
/// GET requests carry optional query items (ordered key/value pairs) and no
/// body; POST and PUT carry an optional raw body and no query items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get(Option<Vec<(String, String)>>),
    Post(Option<Vec<u8>>),
    Put(Option<Vec<u8>>),
}

impl HttpMethod {
    /// The method name as it appears on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            HttpMethod::Get(_) => "GET",
            HttpMethod::Post(_) => "POST",
            HttpMethod::Put(_) => "PUT",
        }
    }

    /// Extract the request body. GET never has one.
    pub fn into_body(self) -> Option<Vec<u8>> {
        match self {
            HttpMethod::Get(_) => None,
            HttpMethod::Post(body) | HttpMethod::Put(body) => body,
        }
    }
}

/// A fully resolved, transport-ready request.
///
/// Produced by [`resolve`](crate::request::resolve) and consumed immediately
/// by [`Session::send`](crate::session::Session::send); not retained after
/// dispatch.
#[derive(Debug, Clone)]
pub struct ResolvedRequest {
    pub url: Url,
    pub method: &'static str,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

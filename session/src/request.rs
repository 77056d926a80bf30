//! The typed request protocol and its resolution into transport form.
//!
//! # Design
//! Callers describe each API call as a value type implementing
//! [`ApiRequest`]: a method, an endpoint, optional headers, and the response
//! shape the body decodes into. [`resolve`] turns that description into a
//! [`ResolvedRequest`] — URL joined against the session's base, query items
//! attached, Content-Type defaulted — as a pure synchronous transform with
//! no network I/O.

use serde::de::DeserializeOwned;
use url::Url;

use crate::error::SessionError;
use crate::http::{HeaderMap, HttpMethod, ResolvedRequest};

/// A logical description of one API call, associated with the shape its
/// JSON response decodes into.
///
/// Implementors are small per-call-site values, immutable once constructed.
/// Timestamp fields in `Response` shapes decode from epoch-milliseconds
/// integers via [`epoch_millis`](crate::epoch_millis).
pub trait ApiRequest {
    /// The decode shape for the response body.
    type Response: DeserializeOwned;

    fn method(&self) -> HttpMethod;

    /// A URI reference, resolved relative to the session's base URL.
    fn endpoint(&self) -> &str;

    fn headers(&self) -> Option<HeaderMap> {
        None
    }
}

/// Resolve a logical request against a base URL.
///
/// For GET requests with query items, the items replace any query already
/// present on the endpoint, preserving input order. All caller headers are
/// applied verbatim; `Content-Type: application/json` is inserted only when
/// the key is absent (case-sensitive match) — an explicit Content-Type is
/// never overridden.
pub fn resolve<R: ApiRequest>(
    request: &R,
    base_url: &Url,
) -> Result<ResolvedRequest, SessionError> {
    let endpoint = request.endpoint();
    let mut url = base_url
        .join(endpoint)
        .map_err(|_| SessionError::MalformedUrl(endpoint.to_string()))?;

    let method = request.method();

    if let HttpMethod::Get(Some(items)) = &method {
        {
            let mut pairs = url.query_pairs_mut();
            pairs.clear();
            pairs.extend_pairs(items.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        if items.is_empty() {
            url.set_query(None);
        }
    }

    let name = method.name();
    let body = method.into_body();

    let mut headers = request.headers().unwrap_or_default();
    match headers.get("Content-Type") {
        Some(content_type) => {
            tracing::debug!(%content_type, "using request's Content-Type");
        }
        None => {
            tracing::debug!("defaulting request to Content-Type: application/json");
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
    }

    Ok(ResolvedRequest {
        url,
        method: name,
        headers,
        body,
    })
}

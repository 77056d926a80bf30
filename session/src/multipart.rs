//! Multipart form-data body construction.
//!
//! # Design
//! Serializes an optional file attachment and an ordered list of plain form
//! fields into a single `multipart/form-data` body per the HTML4 §17.13.4.2
//! convention, plus the headers that describe it. The body layout is kept
//! byte-compatible with the legacy clients of this format: a leading
//! `Content-Type` block duplicating the outer header, `\r\n` line endings
//! throughout, and a `\r\n--<boundary>--` terminator directly after the file
//! bytes. File contents are read synchronously at encode time, so a missing
//! file surfaces as [`SessionError::Io`] before any network call.

use std::path::PathBuf;

use rand::RngExt;

use crate::error::SessionError;
use crate::http::HeaderMap;

/// A plain form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueParameter {
    pub name: String,
    pub value: String,
}

impl ValueParameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A single file attachment. The file bytes are read when the body is
/// encoded, not when the parameter is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileParameter {
    pub name: String,
    pub path: PathBuf,
    pub content_type: String,
}

impl FileParameter {
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            content_type: content_type.into(),
        }
    }
}

/// Encode a multipart form-data body and the headers describing it.
///
/// The returned headers are the caller's map (if any) with
/// `Content-Type: multipart/form-data; boundary=<token>` and
/// `Cache-Control: no-cache` merged in. An existing Content-Type is
/// overwritten — the multipart framing requires the generated boundary —
/// while unrelated entries pass through untouched.
pub fn form_data(
    file: Option<&FileParameter>,
    params: Option<&[ValueParameter]>,
    headers: Option<HeaderMap>,
) -> Result<(Vec<u8>, HeaderMap), SessionError> {
    let mut headers = headers.unwrap_or_default();

    let separator = boundary_token();

    headers.insert(
        "Content-Type".to_string(),
        format!("multipart/form-data; boundary={separator}"),
    );
    headers.insert("Cache-Control".to_string(), "no-cache".to_string());

    let mut body_header = format!("Content-Type: multipart/form-data; boundary={separator}\r\n\r\n");

    if let Some(params) = params {
        for p in params {
            body_header.push_str(&format!("--{separator}\r\n"));
            body_header.push_str(&format!(
                "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                p.name
            ));
            body_header.push_str(&format!("{}\r\n", p.value));
        }
    }

    let file_contents = match file {
        Some(file) => {
            let filename = file
                .path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();

            body_header.push_str(&format!("--{separator}\r\n"));
            body_header.push_str(&format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{filename}\"\r\n",
                file.name
            ));
            body_header.push_str(&format!("Content-Type: {}\r\n\r\n", file.content_type));

            Some(std::fs::read(&file.path).map_err(SessionError::Io)?)
        }
        None => None,
    };

    let body_footer = format!("\r\n--{separator}--");

    let mut body = Vec::with_capacity(
        body_header.len() + file_contents.as_ref().map_or(0, Vec::len) + body_footer.len(),
    );
    body.extend_from_slice(body_header.as_bytes());
    if let Some(contents) = &file_contents {
        body.extend_from_slice(contents);
    }
    body.extend_from_slice(body_footer.as_bytes());

    Ok((body, headers))
}

const BOUNDARY_LEN: usize = 16;
const BOUNDARY_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Random boundary token: 16 characters drawn uniformly from `[a-zA-Z]`.
/// Uniqueness per call keeps collisions with body content unlikely; this is
/// not a cryptographic requirement.
fn boundary_token() -> String {
    let mut rng = rand::rng();
    (0..BOUNDARY_LEN)
        .map(|_| BOUNDARY_CHARS[rng.random_range(0..BOUNDARY_CHARS.len())] as char)
        .collect()
}

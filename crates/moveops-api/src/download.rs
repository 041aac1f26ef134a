//! File download helpers
//!
//! The upstream suggests a filename via `Content-Disposition`; extraction is
//! deliberately permissive, falling back to a caller-generated default when
//! the header is absent or unrecognizable.

use bytes::Bytes;
use moveops_client::{ApiClient, RequestOptions, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{Method, Response};

static FILENAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)filename="?([^";]+)"?"#).expect("filename regex compiles"));

/// A fetched binary payload plus the name to save it under.
#[derive(Debug, Clone)]
pub struct Download {
    pub filename: String,
    pub bytes: Bytes,
}

pub(crate) fn infer_filename(response: &Response, fallback: &str) -> String {
    response
        .headers()
        .get(reqwest::header::CONTENT_DISPOSITION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| FILENAME_RE.captures(value))
        .map(|captures| captures[1].to_string())
        .unwrap_or_else(|| fallback.to_string())
}

/// GET a file through the client (same credential/CSRF/error semantics as
/// any other call) and pair it with its suggested filename.
pub(crate) async fn fetch(client: &ApiClient, path: &str, fallback: &str) -> Result<Download> {
    let response = client
        .request_raw(Method::GET, path, RequestOptions::default())
        .await?;
    let filename = infer_filename(&response, fallback);
    let bytes = response.bytes().await?;
    Ok(Download { filename, bytes })
}

//! Fallback handler that forwards any unmatched request to the upstream API

use axum::Router;
use axum::body::{Body, Bytes};
use axum::extract::Request;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Upstream base used when nothing is configured (local dev).
pub const DEFAULT_UPSTREAM_BASE: &str = "http://localhost:8080/api";

/// Redirects are followed server-side so internal upstream hostnames never
/// leak back to the browser through a Location header.
const MAX_REDIRECT_HOPS: usize = 5;

/// Reverse proxy error
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("upstream request failed: {0}")]
    UpstreamFailed(#[from] reqwest::Error),

    #[error("failed to read request body: {0}")]
    BodyRead(String),

    #[error("invalid upstream base URL: {0}")]
    InvalidUpstream(String),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = match &self {
            ProxyError::BodyRead(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::BAD_GATEWAY,
        };

        let body = serde_json::json!({
            "error": {
                "message": self.to_string(),
                "code": "proxy_error",
            }
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Resolve the upstream base URL from configuration layers.
///
/// Precedence: explicit server config, then the internal API URL (container
/// environments where the API has internal ingress only), then the public API
/// URL, then the local dev default. A relative base like `/api` would make the
/// proxy call itself; in production that is a hard error, otherwise it falls
/// back to the dev default.
pub fn resolve_upstream_base(
    explicit: Option<&str>,
    internal: Option<&str>,
    public: Option<&str>,
    is_production: bool,
) -> Result<String, ProxyError> {
    let base = explicit
        .or(internal)
        .or(public)
        .unwrap_or(DEFAULT_UPSTREAM_BASE);

    if base.starts_with('/') {
        if is_production {
            return Err(ProxyError::InvalidUpstream(format!(
                "{base} is relative; set an absolute internal API URL"
            )));
        }
        warn!(base, "relative upstream base, falling back to local default");
        return Ok(DEFAULT_UPSTREAM_BASE.to_string());
    }

    Ok(base.trim_end_matches('/').to_string())
}

/// The upstream API the proxy forwards to
#[derive(Debug, Clone)]
pub struct Upstream {
    base_url: String,
    client: Client,
}

impl Upstream {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProxyError> {
        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECT_HOPS))
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(60))
            .use_rustls_tls()
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join the upstream base with a request path, normalizing slashes.
    fn build_url(&self, path: &str, query: Option<&str>) -> String {
        let path = path.trim_start_matches('/');
        match query {
            Some(q) if !q.is_empty() => format!("{}/{}?{}", self.base_url, path, q),
            _ => format!("{}/{}", self.base_url, path),
        }
    }
}

/// Build a router whose fallback forwards everything to the upstream.
///
/// Mount this behind health/metrics routes so those never leave the process.
pub fn proxy_router(upstream: Arc<Upstream>) -> Router {
    Router::new().fallback(move |req: Request| {
        let upstream = upstream.clone();
        async move {
            match forward_handler(upstream, req).await {
                Ok(response) => response,
                Err(e) => {
                    error!("proxy forwarding failed: {}", e);
                    e.into_response()
                }
            }
        }
    })
}

async fn forward_handler(upstream: Arc<Upstream>, req: Request) -> Result<Response, ProxyError> {
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(str::to_string);
    let method = req.method().clone();

    let (parts, body) = req.into_parts();

    let body_bytes = if method == Method::GET || method == Method::HEAD {
        Bytes::new()
    } else {
        axum::body::to_bytes(body, usize::MAX)
            .await
            .map_err(|e| ProxyError::BodyRead(e.to_string()))?
    };

    forward(&upstream, &path, query.as_deref(), method, parts.headers, body_bytes).await
}

/// Forward one request to the upstream and translate the response back.
pub async fn forward(
    upstream: &Upstream,
    path: &str,
    query: Option<&str>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let url = upstream.build_url(path, query);

    debug!("proxy: {} {} -> {}", method, path, url);

    let mut request_headers = HeaderMap::new();

    for (name, value) in headers.iter() {
        let name_str = name.as_str();

        if is_hop_by_hop_header(name_str) || name_str.eq_ignore_ascii_case("host") {
            continue;
        }

        request_headers.append(name.clone(), value.clone());
    }

    // Upstream sees the original host for cookie domains and logging.
    if let Some(host) = headers.get(header::HOST) {
        request_headers.insert(forwarded_host_header(), host.clone());
    }
    let proto = headers
        .get(forwarded_proto_header())
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("http"));
    request_headers.insert(forwarded_proto_header(), proto);

    let mut req_builder = upstream
        .client
        .request(method.clone(), &url)
        .headers(request_headers);

    if !body.is_empty() {
        req_builder = req_builder.body(body);
    }

    let upstream_response = req_builder.send().await?;

    let status = upstream_response.status();
    let upstream_headers = upstream_response.headers().clone();
    let response_bytes = upstream_response.bytes().await?;

    debug!(
        "proxy response: {} {} ({} bytes)",
        status,
        path,
        response_bytes.len()
    );

    let mut response_headers = HeaderMap::new();

    for (name, value) in upstream_headers.iter() {
        let name_str = name.as_str();

        if is_hop_by_hop_header(name_str) || is_framing_header(name_str) {
            continue;
        }

        // append, not insert: multiple Set-Cookie values must all survive
        response_headers.append(name.clone(), value.clone());
    }

    let mut response = Response::new(Body::from(response_bytes));
    *response.status_mut() = status;
    *response.headers_mut() = response_headers;

    Ok(response)
}

fn forwarded_host_header() -> HeaderName {
    HeaderName::from_static("x-forwarded-host")
}

fn forwarded_proto_header() -> HeaderName {
    HeaderName::from_static("x-forwarded-proto")
}

/// Hop-by-hop headers are connection-scoped and must not be forwarded.
fn is_hop_by_hop_header(name: &str) -> bool {
    matches!(
        name.to_lowercase().as_str(),
        "connection"
            | "keep-alive"
            | "proxy-authenticate"
            | "proxy-authorization"
            | "te"
            | "trailers"
            | "transfer-encoding"
            | "upgrade"
    )
}

/// The proxy re-frames the body it buffered, so the upstream's framing and
/// encoding headers would be wrong if copied through.
fn is_framing_header(name: &str) -> bool {
    matches!(
        name.to_lowercase().as_str(),
        "content-encoding" | "content-length"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_hop_by_hop_header() {
        assert!(is_hop_by_hop_header("Connection"));
        assert!(is_hop_by_hop_header("keep-alive"));
        assert!(is_hop_by_hop_header("Transfer-Encoding"));
        assert!(is_hop_by_hop_header("Upgrade"));

        assert!(!is_hop_by_hop_header("Content-Type"));
        assert!(!is_hop_by_hop_header("Cookie"));
        assert!(!is_hop_by_hop_header("Set-Cookie"));
    }

    #[test]
    fn test_is_framing_header() {
        assert!(is_framing_header("Content-Encoding"));
        assert!(is_framing_header("content-length"));
        assert!(!is_framing_header("content-type"));
    }

    #[test]
    fn test_build_url_normalizes_slashes() {
        let upstream = Upstream::new("http://api.internal:8080/api/").unwrap();
        assert_eq!(upstream.base_url(), "http://api.internal:8080/api");

        assert_eq!(
            upstream.build_url("/jobs/42", None),
            "http://api.internal:8080/api/jobs/42"
        );
        assert_eq!(
            upstream.build_url("jobs/42", Some("phase=booked")),
            "http://api.internal:8080/api/jobs/42?phase=booked"
        );
    }

    #[test]
    fn test_resolve_upstream_base_precedence() {
        let base = resolve_upstream_base(
            Some("http://explicit:1"),
            Some("http://internal:2"),
            Some("http://public:3"),
            true,
        )
        .unwrap();
        assert_eq!(base, "http://explicit:1");

        let base =
            resolve_upstream_base(None, Some("http://internal:2"), Some("http://public:3"), true)
                .unwrap();
        assert_eq!(base, "http://internal:2");

        let base = resolve_upstream_base(None, None, Some("http://public:3/"), true).unwrap();
        assert_eq!(base, "http://public:3");

        let base = resolve_upstream_base(None, None, None, false).unwrap();
        assert_eq!(base, DEFAULT_UPSTREAM_BASE);
    }

    #[test]
    fn test_resolve_upstream_base_rejects_relative_in_production() {
        let err = resolve_upstream_base(Some("/api"), None, None, true).unwrap_err();
        assert!(matches!(err, ProxyError::InvalidUpstream(_)));

        // falls back to the dev default outside production
        let base = resolve_upstream_base(Some("/api"), None, None, false).unwrap();
        assert_eq!(base, DEFAULT_UPSTREAM_BASE);
    }
}

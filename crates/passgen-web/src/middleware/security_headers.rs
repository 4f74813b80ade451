//! Response headers for every route, API and static page alike.

use axum::body::Body;
use axum::extract::State;
use axum::http::header::{HeaderName, HeaderValue};
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

const BASELINE: &[(&str, &str)] = &[
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "no-referrer"),
    (
        "content-security-policy",
        "default-src 'self'; style-src 'self' 'unsafe-inline'; frame-ancestors 'none'",
    ),
    // Generated passwords must never land in a shared or browser cache.
    ("cache-control", "no-store"),
    ("pragma", "no-cache"),
];

const HSTS: (&str, &str) = (
    "strict-transport-security",
    "max-age=31536000; includeSubDomains",
);

/// Which optional headers to add on top of the baseline.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderPolicy {
    /// Only meaningful when the listener terminates TLS itself.
    pub hsts: bool,
}

pub async fn security_headers(
    State(policy): State<HeaderPolicy>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    let extra = policy.hsts.then_some(HSTS);
    for &(name, value) in BASELINE.iter().chain(extra.iter()) {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
    response
}

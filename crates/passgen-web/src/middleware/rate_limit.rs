//! Per-client admission control in front of the generation endpoint.
//!
//! The client identity is the peer IP (or the first forwarded address when
//! `proxy.trust_forwarded_for` is set). The tier comes from the `api_key`
//! query parameter or the `X-Api-Key` header.

use std::net::SocketAddr;

use axum::body::Body;
use axum::extract::{ConnectInfo, Query, State};
use axum::http::{HeaderMap, Request};
use axum::middleware::Next;
use axum::response::Response;
use passgen_core::{unix_now, Tier};
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;

/// Identity the request was rate limited under, for handler logging.
#[derive(Debug, Clone)]
pub struct ClientId(pub String);

#[derive(Debug, Default, Deserialize)]
struct ApiKeyQuery {
    api_key: Option<String>,
}

pub async fn rate_limit(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let identity = client_identity(&req, state.config.proxy.trust_forwarded_for);

    let provided = provided_token(&req);
    let tier = Tier::resolve(provided.as_deref(), state.config.trusted_token());

    state
        .limiter
        .check(&identity, tier, unix_now())
        .into_result()
        .inspect_err(|_| {
            tracing::warn!("Rate limit exceeded: client={identity}, tier={}", tier.as_str());
        })?;

    req.extensions_mut().insert(tier);
    req.extensions_mut().insert(ClientId(identity));
    Ok(next.run(req).await)
}

fn provided_token(req: &Request<Body>) -> Option<String> {
    if let Some(key) = Query::<ApiKeyQuery>::try_from_uri(req.uri())
        .ok()
        .and_then(|Query(q)| q.api_key)
    {
        return Some(key);
    }
    req.headers()
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

fn client_identity(req: &Request<Body>, trust_forwarded_for: bool) -> String {
    if trust_forwarded_for {
        if let Some(ip) = forwarded_ip(req.headers()) {
            return ip;
        }
    }
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn forwarded_ip(headers: &HeaderMap) -> Option<String> {
    let from_header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| v.to_string())
    };
    from_header("x-forwarded-for").or_else(|| from_header("x-real-ip"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(uri: &str) -> axum::http::request::Builder {
        Request::builder().uri(uri)
    }

    #[test]
    fn identity_from_connect_info() {
        let req = request("/api/generate")
            .extension(ConnectInfo(SocketAddr::from(([10, 0, 0, 7], 41000))))
            .body(Body::empty())
            .unwrap();
        assert_eq!(client_identity(&req, false), "10.0.0.7");
    }

    #[test]
    fn identity_falls_back_to_unknown() {
        let req = request("/api/generate").body(Body::empty()).unwrap();
        assert_eq!(client_identity(&req, false), "unknown");
    }

    #[test]
    fn forwarded_for_ignored_unless_trusted() {
        let req = request("/api/generate")
            .header("x-forwarded-for", "203.0.113.9, 10.0.0.1")
            .extension(ConnectInfo(SocketAddr::from(([10, 0, 0, 1], 41000))))
            .body(Body::empty())
            .unwrap();
        assert_eq!(client_identity(&req, false), "10.0.0.1");
        assert_eq!(client_identity(&req, true), "203.0.113.9");
    }

    #[test]
    fn real_ip_used_when_forwarded_for_missing() {
        let req = request("/api/generate")
            .header("x-real-ip", "198.51.100.4")
            .body(Body::empty())
            .unwrap();
        assert_eq!(client_identity(&req, true), "198.51.100.4");
    }

    #[test]
    fn token_from_query_or_header() {
        let req = request("/api/generate?length=12&api_key=abc")
            .body(Body::empty())
            .unwrap();
        assert_eq!(provided_token(&req).as_deref(), Some("abc"));

        let req = request("/api/generate")
            .header("x-api-key", "xyz")
            .body(Body::empty())
            .unwrap();
        assert_eq!(provided_token(&req).as_deref(), Some("xyz"));

        let req = request("/api/generate").body(Body::empty()).unwrap();
        assert!(provided_token(&req).is_none());
    }
}

// SPDX-FileCopyrightText: 2026 Wappdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared-secret authentication middleware.
//!
//! The Green API webhook is configured with a `key` query parameter; every
//! API route checks it against the configured secret before touching any
//! state. When no key is configured, all requests are rejected (fail-closed).

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};

/// Authentication configuration for the gateway.
#[derive(Clone)]
pub struct AuthConfig {
    /// Expected shared secret. Empty rejects all requests (fail-closed).
    pub key: String,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("key", &if self.key.is_empty() { "[unset]" } else { "[redacted]" })
            .finish()
    }
}

/// Extract the `key` query parameter from a request URI.
fn query_key(request: &Request) -> Option<String> {
    let query = request.uri().query()?;
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query).ok()?;
    pairs.into_iter().find(|(k, _)| k == "key").map(|(_, v)| v)
}

/// Middleware validating the shared-secret query parameter.
///
/// Rejects with 401 before any handler runs, so a mismatched key never
/// touches conversation or storage state.
pub async fn auth_middleware(
    State(auth): State<AuthConfig>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if auth.key.is_empty() {
        tracing::error!("gateway has no webhook key configured -- rejecting request");
        return Err(StatusCode::UNAUTHORIZED);
    }

    match query_key(&request) {
        Some(key) if key == auth.key => Ok(next.run(request).await),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request(uri: &str) -> Request {
        axum::http::Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn query_key_is_extracted() {
        let req = request("/api/wapp/received?key=secret");
        assert_eq!(query_key(&req).as_deref(), Some("secret"));
    }

    #[test]
    fn query_key_handles_multiple_params() {
        let req = request("/api/wapp/received?foo=bar&key=secret");
        assert_eq!(query_key(&req).as_deref(), Some("secret"));
    }

    #[test]
    fn query_key_missing_is_none() {
        assert!(query_key(&request("/api/wapp/received")).is_none());
        assert!(query_key(&request("/api/wapp/received?foo=bar")).is_none());
    }

    #[test]
    fn query_key_is_url_decoded() {
        let req = request("/api/wapp/received?key=a%20b");
        assert_eq!(query_key(&req).as_deref(), Some("a b"));
    }

    #[test]
    fn auth_config_debug_redacts_key() {
        let config = AuthConfig {
            key: "super-secret".to_string(),
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[redacted]"));
    }
}

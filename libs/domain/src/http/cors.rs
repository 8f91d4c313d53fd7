//! Permissive cross-origin headers.
//!
//! Every response, errors and fallbacks included, carries the same fixed
//! header set. Preflights are answered by [`preflight`] with `204` and an
//! empty body.

use axum::{
    Router,
    http::{HeaderName, HeaderValue, StatusCode, header},
};
use tower_http::set_header::SetResponseHeaderLayer;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, POST, OPTIONS, PUT, DELETE";
pub const ALLOW_HEADERS: &str =
    "Content-Type, Authorization, X-Requested-With";
pub const MAX_AGE: &str = "86400";

pub fn cors_headers() -> [(HeaderName, HeaderValue); 4] {
    [
        (
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ALLOW_ORIGIN),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        ),
        (
            header::ACCESS_CONTROL_MAX_AGE,
            HeaderValue::from_static(MAX_AGE),
        ),
    ]
}

/// Stamps the permissive header set on every response of `router`.
pub fn with_permissive_cors<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    cors_headers()
        .into_iter()
        .fold(router, |router, (name, value)| {
            router.layer(SetResponseHeaderLayer::overriding(name, value))
        })
}

/// `OPTIONS` handler: always `204 No Content`, no body.
pub async fn preflight() -> StatusCode { StatusCode::NO_CONTENT }

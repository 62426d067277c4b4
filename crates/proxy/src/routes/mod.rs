//! HTTP route handlers for the app proxy.
//!
//! # Route Structure
//!
//! ```text
//! GET     /api/giftcard - Reachability probe
//! POST    /api/giftcard - Provision a gift card variant
//! OPTIONS /api/giftcard - CORS preflight
//!
//! GET  /health          - Liveness check
//! GET  /health/ready    - Readiness check (Shopify reachability)
//! ```
//!
//! Health endpoints are registered in `main.rs`. Every response out of
//! the `/api` router carries the CORS headers the storefront theme needs,
//! including error responses and the 405 for unsupported methods.

pub mod giftcard;

use axum::Router;
use axum::http::{HeaderValue, header};
use axum::routing::get;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::state::AppState;

/// Create the gift card routes router.
///
/// `store` is the shop's `myshopify.com` domain; requests come from the
/// storefront theme, so that origin is the only one allowed.
///
/// # Panics
///
/// Panics if the store domain cannot be used in a header value.
pub fn giftcard_routes(store: &str) -> Router<AppState> {
    let origin = HeaderValue::from_str(&format!("https://{store}"))
        .expect("store domain is not a valid header value");

    Router::new()
        .route(
            "/giftcard",
            get(giftcard::probe)
                .post(giftcard::provision)
                .options(giftcard::preflight),
        )
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            origin,
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type, Authorization"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS"),
        ))
}

/// Create all routes for the proxy.
///
/// # Panics
///
/// Panics if the store domain cannot be used in a header value.
pub fn routes(store: &str) -> Router<AppState> {
    Router::new().nest("/api", giftcard_routes(store))
}

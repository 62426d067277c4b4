//! Integration tests for the custom gift card service.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the proxy with real Shopify credentials in .env
//! cargo run -p custom-gift-card-proxy
//!
//! # Run the live tests against it
//! cargo test -p custom-gift-card-integration-tests -- --ignored
//! ```
//!
//! The live tests provision real products against the configured store;
//! point them at a development store, not production.
//!
//! # Environment Variables
//!
//! - `PROXY_BASE_URL` - Proxy under test (default `http://localhost:3000`)
//! - `SHOPIFY_STORE` - Shop domain the proxy is configured for
//! - `SHOPIFY_API_SECRET` - App API secret used to sign requests

#![cfg_attr(not(test), forbid(unsafe_code))]

use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Base URL for the proxy under test (configurable via environment).
#[must_use]
pub fn proxy_base_url() -> String {
    std::env::var("PROXY_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Shop domain the proxy is configured for.
///
/// # Panics
///
/// Panics if `SHOPIFY_STORE` is not set; the live tests cannot run
/// without it.
#[must_use]
pub fn store_domain() -> String {
    std::env::var("SHOPIFY_STORE").expect("SHOPIFY_STORE must be set for integration tests")
}

/// App API secret used to sign proxy requests.
///
/// # Panics
///
/// Panics if `SHOPIFY_API_SECRET` is not set.
#[must_use]
pub fn api_secret() -> String {
    std::env::var("SHOPIFY_API_SECRET")
        .expect("SHOPIFY_API_SECRET must be set for integration tests")
}

/// Build a query string signed the way Shopify's app proxy signs requests.
///
/// Includes the parameters Shopify forwards on every proxied request. The
/// signature covers the sorted `key=value` pairs joined with no delimiter,
/// HMAC-SHA256 over the decoded values, hex-encoded.
///
/// # Panics
///
/// Panics if the system clock is before the Unix epoch.
#[must_use]
pub fn signed_proxy_query(shop: &str, secret: &str) -> String {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("System clock before Unix epoch")
        .as_secs()
        .to_string();

    // Keys listed in sort order; the message is their concatenation.
    let params = [
        ("logged_in_customer_id", String::new()),
        ("path_prefix", "/apps/giftcard".to_string()),
        ("shop", shop.to_string()),
        ("timestamp", timestamp),
    ];

    let message: String = params
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect();

    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
        .expect("HMAC-SHA256 accepts keys of any length");
    mac.update(message.as_bytes());
    let signature = hex::encode(mac.finalize().into_bytes());

    let mut query = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in &params {
        query.append_pair(key, value);
    }
    query.append_pair("signature", &signature);
    query.finish()
}

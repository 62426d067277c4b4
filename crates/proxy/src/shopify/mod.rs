//! Shopify Admin API client for gift card provisioning.
//!
//! # Security
//!
//! **This module holds the Shopify Admin API access token.**
//!
//! The token has write access to products and variants, so the proxy must
//! never log it or echo it back in responses. [`AdminClient`] redacts it
//! from `Debug` output.
//!
//! # Architecture
//!
//! - Raw GraphQL documents with typed `serde` response structs
//! - Direct API calls to Shopify (no local product cache)
//! - Rate limit responses surfaced as [`ShopifyError::RateLimited`]
//!
//! # Example
//!
//! ```rust,ignore
//! use custom_gift_card_proxy::shopify::AdminClient;
//!
//! let client = AdminClient::new(&config.shopify);
//!
//! // Look up an existing gift card product
//! let product = client.product_by_handle(&handle).await?;
//!
//! // Create one when missing
//! let payload = client.create_product(&handle, card_type, &bucket.price).await?;
//! ```

mod app_proxy;
mod client;
mod products;
mod settings;

pub use app_proxy::verify_proxy_signature;
pub use client::{AdminClient, ShopInfo};
pub use products::{
    Product, ProductCreatePayload, ProductOption, ShopifyUserError, Variant, VariantsBulkPayload,
    format_user_errors,
};
pub use settings::ShopSettings;

use thiserror::Error;

/// Errors that can occur when interacting with the Shopify Admin API.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication/authorization failed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

/// A GraphQL error returned by the Shopify Admin API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Source locations in the query.
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| e.message.clone())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphql_error_formatting() {
        let errors = vec![
            GraphQLError {
                message: "Field not found".to_string(),
                locations: vec![],
                path: vec![],
            },
            GraphQLError {
                message: "Invalid ID".to_string(),
                locations: vec![],
                path: vec![],
            },
        ];
        let err = ShopifyError::GraphQL(errors);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: Field not found; Invalid ID"
        );
    }

    #[test]
    fn test_rate_limited_error() {
        let err = ShopifyError::RateLimited(60);
        assert_eq!(err.to_string(), "Rate limited, retry after 60 seconds");
    }

    #[test]
    fn test_unauthorized_error() {
        let err = ShopifyError::Unauthorized("Invalid token".to_string());
        assert_eq!(err.to_string(), "Unauthorized: Invalid token");
    }
}

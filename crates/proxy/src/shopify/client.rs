//! Shopify Admin API GraphQL client.
//!
//! Executes raw GraphQL documents against the Admin API and deserializes
//! the `data` payload into typed response structs.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::instrument;

use crate::config::ShopifyProxyConfig;

use super::{GraphQLError, GraphQLErrorLocation, ShopifyError};

/// Shopify Admin API GraphQL client.
///
/// Cheap to clone; all clones share the same connection pool and token.
///
/// # Security
///
/// Holds the Admin API access token. The token is redacted from `Debug`
/// output and never appears in logs.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    client: reqwest::Client,
    store: String,
    api_version: String,
    access_token: SecretString,
}

/// GraphQL response wrapper.
#[derive(Debug, Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLErrorResponse>>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorResponse {
    message: String,
    #[serde(default)]
    locations: Vec<GraphQLErrorLocationResponse>,
    #[serde(default)]
    path: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorLocationResponse {
    line: i64,
    column: i64,
}

impl AdminClient {
    /// Create a new Admin API client.
    ///
    /// # Arguments
    ///
    /// * `config` - Shopify store domain, API version, and access token
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created. This should never happen
    /// under normal circumstances as we use standard TLS configuration.
    #[must_use]
    pub fn new(config: &ShopifyProxyConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            inner: Arc::new(AdminClientInner {
                client,
                store: config.store.clone(),
                api_version: config.api_version.clone(),
                access_token: config.admin_token.clone(),
            }),
        }
    }

    /// Get the store domain.
    #[must_use]
    pub fn store(&self) -> &str {
        &self.inner.store
    }

    // =========================================================================
    // GraphQL Execution
    // =========================================================================

    /// Execute a GraphQL document.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError::RateLimited` if Shopify throttles the call.
    /// Returns `ShopifyError::Unauthorized` if the access token is rejected.
    /// Returns `ShopifyError::GraphQL` if the response carries errors.
    /// Returns `ShopifyError::Http` on network failures.
    #[instrument(skip(self, query, variables))]
    pub async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Option<serde_json::Value>,
    ) -> Result<T, ShopifyError> {
        let endpoint = format!(
            "https://{}/admin/api/{}/graphql.json",
            self.inner.store, self.inner.api_version
        );

        let body = serde_json::json!({
            "query": query,
            "variables": variables.unwrap_or(serde_json::Value::Null)
        });

        let response = self
            .inner
            .client
            .post(&endpoint)
            .header(
                "X-Shopify-Access-Token",
                self.inner.access_token.expose_secret(),
            )
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        // Check for rate limiting
        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(ShopifyError::RateLimited(retry_after));
        }

        // Check for unauthorized
        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ShopifyError::Unauthorized(
                "Invalid or expired access token".to_string(),
            ));
        }

        let graphql_response: GraphQLResponse<T> = response.json().await?;

        // Check for GraphQL errors
        if let Some(errors) = graphql_response.errors
            && !errors.is_empty()
        {
            let converted_errors: Vec<GraphQLError> = errors
                .into_iter()
                .map(|e| GraphQLError {
                    message: e.message,
                    locations: e
                        .locations
                        .into_iter()
                        .map(|l| GraphQLErrorLocation {
                            line: l.line,
                            column: l.column,
                        })
                        .collect(),
                    path: e.path,
                })
                .collect();
            return Err(ShopifyError::GraphQL(converted_errors));
        }

        graphql_response.data.ok_or_else(|| {
            ShopifyError::GraphQL(vec![GraphQLError {
                message: "No data in response".to_string(),
                locations: vec![],
                path: vec![],
            }])
        })
    }

    /// Test the connection by fetching the shop ID.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError` if the connection test fails due to
    /// authentication issues, network errors, or GraphQL errors.
    #[instrument(skip(self))]
    pub async fn ping(&self) -> Result<ShopInfo, ShopifyError> {
        let query = r"
            query {
                shop {
                    id
                }
            }
        ";

        #[derive(Debug, Deserialize)]
        struct Response {
            shop: ShopInfo,
        }

        let response: Response = self.execute(query, None).await?;
        Ok(response.shop)
    }
}

impl std::fmt::Debug for AdminClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminClient")
            .field("store", &self.inner.store)
            .field("api_version", &self.inner.api_version)
            .field("access_token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

/// Basic shop information.
#[derive(Debug, Clone, Deserialize)]
pub struct ShopInfo {
    /// Shop GID (e.g., `gid://shopify/Shop/123`).
    pub id: String,
}

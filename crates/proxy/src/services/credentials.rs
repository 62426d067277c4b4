//! Maps the `shop` query parameter onto Admin API credentials.

use crate::config::ShopifyProxyConfig;
use crate::error::AppError;
use crate::shopify::AdminClient;

/// Resolves a shop domain to an authenticated [`AdminClient`].
///
/// This deployment is single-tenant: one store, one set of credentials,
/// both fixed at startup. Any request naming a different shop is rejected
/// before a single API call is made. Handlers go through this seam rather
/// than holding credentials themselves, so a multi-store lookup can slot
/// in without touching the routes.
#[derive(Debug, Clone)]
pub struct CredentialResolver {
    store: String,
    client: AdminClient,
}

impl CredentialResolver {
    /// Builds the resolver and its shared [`AdminClient`].
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be created.
    #[must_use]
    pub fn new(config: &ShopifyProxyConfig) -> Self {
        Self {
            store: config.store.clone(),
            client: AdminClient::new(config),
        }
    }

    /// The shared client, independent of any request.
    ///
    /// Used by readiness probes and tooling that act as the configured
    /// store rather than on behalf of a caller.
    #[must_use]
    pub fn client(&self) -> &AdminClient {
        &self.client
    }

    /// Resolves `shop` to a client, or rejects the request.
    ///
    /// Shopify sends the shop's `myshopify.com` domain; comparison is
    /// ASCII-case-insensitive since domains are.
    pub fn resolve(&self, shop: &str) -> Result<AdminClient, AppError> {
        if shop.eq_ignore_ascii_case(&self.store) {
            Ok(self.client.clone())
        } else {
            Err(AppError::Unauthorized)
        }
    }
}

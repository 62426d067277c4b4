//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ProxyConfig;
use crate::services::{CredentialResolver, ProvisioningService};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like configuration, credentials, and the
/// provisioning service.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ProxyConfig,
    credentials: CredentialResolver,
    provisioner: ProvisioningService,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be created.
    #[must_use]
    pub fn new(config: ProxyConfig) -> Self {
        let credentials = CredentialResolver::new(&config.shopify);
        let provisioner = ProvisioningService::new();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                credentials,
                provisioner,
            }),
        }
    }

    /// Get a reference to the proxy configuration.
    #[must_use]
    pub fn config(&self) -> &ProxyConfig {
        &self.inner.config
    }

    /// Get a reference to the credential resolver.
    #[must_use]
    pub fn credentials(&self) -> &CredentialResolver {
        &self.inner.credentials
    }

    /// Get a reference to the provisioning service.
    #[must_use]
    pub fn provisioner(&self) -> &ProvisioningService {
        &self.inner.provisioner
    }
}

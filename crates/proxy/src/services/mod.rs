//! Request-scoped services behind the HTTP handlers.
//!
//! [`CredentialResolver`] maps the `shop` query parameter onto an
//! authenticated [`crate::shopify::AdminClient`], and
//! [`ProvisioningService`] runs the idempotent catalog walk that turns a
//! requested denomination into a purchasable variant.

mod credentials;
mod provisioning;

pub use credentials::CredentialResolver;
pub use provisioning::{Provisioned, ProvisioningService};

//! Direct provisioning command.
//!
//! Runs the same pipeline as the proxy endpoint, minus the HTTP layer
//! and signature verification. Useful for smoke-testing credentials and
//! for seeding the catalog before a launch.
//!
//! # Usage
//!
//! ```bash
//! giftcard-cli provision --amount 350 --type digital
//! giftcard-cli provision --amount 199.50 --type physical
//! ```
//!
//! # Environment Variables
//!
//! - `SHOPIFY_STORE` - Shop domain (`*.myshopify.com`)
//! - `SHOPIFY_ADMIN_TOKEN` - Admin API access token
//! - `SHOPIFY_API_SECRET` - App API secret (shared proxy configuration)

use custom_gift_card_core::{Amount, GiftCardType};
use custom_gift_card_proxy::config::{ConfigError, ProxyConfig};
use custom_gift_card_proxy::error::AppError;
use custom_gift_card_proxy::services::ProvisioningService;
use custom_gift_card_proxy::shopify::AdminClient;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur during provisioning.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// The amount flag is not a usable number.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// The card type flag is not recognized.
    #[error("Invalid card type: {0}. Valid types: digital, physical")]
    InvalidType(String),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The provisioning pipeline failed.
    #[error(transparent)]
    App(#[from] AppError),
}

/// Provision a gift card variant for the given amount and type.
///
/// # Errors
///
/// Returns an error if the flags do not parse, configuration is
/// incomplete, the amount is outside the shop's configured range, or a
/// Shopify call fails.
pub async fn run(amount: &str, card_type: &str) -> Result<(), ProvisionError> {
    dotenvy::dotenv().ok();

    let card_type: GiftCardType = card_type
        .parse()
        .map_err(|_| ProvisionError::InvalidType(card_type.to_owned()))?;
    let amount = Amount::from_json(&Value::String(amount.to_owned()))
        .map_err(|_| ProvisionError::InvalidAmount(amount.to_owned()))?;

    let config = ProxyConfig::from_env()?;
    let client = AdminClient::new(&config.shopify);

    tracing::info!("Fetching gift card settings for {}", config.shopify.store);
    let shop = client.get_shop_settings().await.map_err(AppError::from)?;

    let provisioner = ProvisioningService::new();
    let provisioned = provisioner
        .provision(&client, card_type, amount, &shop.settings)
        .await?;

    if provisioned.created {
        tracing::info!(
            "Created variant {} at {}",
            provisioned.variant_id,
            provisioned.price
        );
    } else {
        tracing::info!(
            "Found existing variant {} at {}",
            provisioned.variant_id,
            provisioned.price
        );
    }

    Ok(())
}

//! Gift card settings commands.
//!
//! # Usage
//!
//! ```bash
//! # Show the shop's gift card settings
//! giftcard-cli settings show
//!
//! # Raise the maximum amount, leave everything else alone
//! giftcard-cli settings set --max-price 2000
//! ```
//!
//! # Environment Variables
//!
//! - `SHOPIFY_STORE` - Shop domain (`*.myshopify.com`)
//! - `SHOPIFY_ADMIN_TOKEN` - Admin API access token
//! - `SHOPIFY_API_SECRET` - App API secret (shared proxy configuration)

use custom_gift_card_core::{GiftCardSettings, SettingsRangeError};
use custom_gift_card_proxy::config::{ConfigError, ProxyConfig};
use custom_gift_card_proxy::shopify::{AdminClient, ShopifyError, format_user_errors};
use thiserror::Error;

/// Errors that can occur during settings operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// No flags were provided to `settings set`.
    #[error("Nothing to update; pass at least one settings flag")]
    NothingToUpdate,

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The resulting amount range is invalid.
    #[error(transparent)]
    Range(#[from] SettingsRangeError),

    /// Shopify API error.
    #[error(transparent)]
    Shopify(#[from] ShopifyError),

    /// Shopify rejected the metafield write.
    #[error("Settings update rejected: {0}")]
    Rejected(String),
}

/// Partial settings update assembled from CLI flags.
///
/// `None` fields keep the shop's current value.
#[derive(Debug, Default)]
pub struct SettingsUpdate {
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub enabled: Option<bool>,
    pub digital: Option<bool>,
    pub physical: Option<bool>,
    pub giftbox: Option<bool>,
}

impl SettingsUpdate {
    fn is_empty(&self) -> bool {
        self.min_price.is_none()
            && self.max_price.is_none()
            && self.enabled.is_none()
            && self.digital.is_none()
            && self.physical.is_none()
            && self.giftbox.is_none()
    }

    fn apply(&self, settings: &mut GiftCardSettings) {
        if let Some(min_price) = self.min_price {
            settings.min_price = min_price;
        }
        if let Some(max_price) = self.max_price {
            settings.max_price = max_price;
        }
        if let Some(enabled) = self.enabled {
            settings.enabled = enabled;
        }
        if let Some(digital) = self.digital {
            settings.digital_enabled = digital;
        }
        if let Some(physical) = self.physical {
            settings.physical_enabled = physical;
        }
        if let Some(giftbox) = self.giftbox {
            settings.physical_giftbox_enabled = giftbox;
        }
    }
}

/// Print the shop's gift card settings.
///
/// # Errors
///
/// Returns an error if configuration is incomplete or the Shopify API
/// call fails.
pub async fn show() -> Result<(), SettingsError> {
    dotenvy::dotenv().ok();

    let config = ProxyConfig::from_env()?;
    let client = AdminClient::new(&config.shopify);

    let shop = client.get_shop_settings().await?;
    let settings = &shop.settings;

    tracing::info!("Gift card settings for {}", config.shopify.store);
    tracing::info!("  Shop ID: {}", shop.shop_id);
    tracing::info!("  Enabled: {}", settings.enabled);
    tracing::info!("  Digital cards: {}", settings.digital_enabled);
    tracing::info!("  Physical cards: {}", settings.physical_enabled);
    tracing::info!("  Gift box upsell: {}", settings.physical_giftbox_enabled);
    tracing::info!(
        "  Amount range: {} - {}",
        settings.min_price,
        settings.max_price
    );

    Ok(())
}

/// Update the shop's gift card settings.
///
/// Reads the current metafields, applies the provided flags, validates
/// the resulting amount range, and writes everything back.
///
/// # Errors
///
/// Returns an error if no flags were provided, the resulting range is
/// invalid, or the metafield write fails or is rejected.
pub async fn set(update: &SettingsUpdate) -> Result<(), SettingsError> {
    dotenvy::dotenv().ok();

    if update.is_empty() {
        return Err(SettingsError::NothingToUpdate);
    }

    let config = ProxyConfig::from_env()?;
    let client = AdminClient::new(&config.shopify);

    let mut shop = client.get_shop_settings().await?;
    update.apply(&mut shop.settings);

    GiftCardSettings::validate_range(shop.settings.min_price, shop.settings.max_price)?;

    let user_errors = client.set_settings(&shop.shop_id, &shop.settings).await?;
    if !user_errors.is_empty() {
        return Err(SettingsError::Rejected(format_user_errors(&user_errors)));
    }

    tracing::info!("Settings updated for {}", config.shopify.store);
    tracing::info!(
        "  Amount range: {} - {}",
        shop.settings.min_price,
        shop.settings.max_price
    );
    tracing::info!("  Enabled: {}", shop.settings.enabled);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_update_is_detected() {
        assert!(SettingsUpdate::default().is_empty());
        assert!(
            !SettingsUpdate {
                max_price: Some(2000),
                ..Default::default()
            }
            .is_empty()
        );
    }

    #[test]
    fn apply_changes_only_provided_fields() {
        let mut settings = GiftCardSettings {
            enabled: true,
            physical_enabled: true,
            ..Default::default()
        };
        let update = SettingsUpdate {
            max_price: Some(2000),
            physical: Some(false),
            ..Default::default()
        };

        update.apply(&mut settings);

        assert_eq!(settings.max_price, 2000);
        assert!(!settings.physical_enabled);
        assert_eq!(settings.min_price, GiftCardSettings::DEFAULT_MIN_PRICE);
        assert!(settings.enabled);
    }
}

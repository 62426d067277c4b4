//! Merchant gift card settings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::amount::Amount;

/// Amount outside the configured bounds.
///
/// The `Display` text is shown verbatim to storefront customers, so its
/// wording is part of the API contract.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Amount must be between {min} and {max}")]
pub struct AmountRangeError {
    /// Configured minimum (inclusive).
    pub min: i64,
    /// Configured maximum (inclusive).
    pub max: i64,
}

/// Invalid min/max pair on the settings write path.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsRangeError {
    /// Minimum is not strictly below maximum.
    #[error("Invalid input values")]
    Inverted,
    /// One of the bounds is negative.
    #[error("Amounts must be positive numbers")]
    Negative,
}

/// The shop's gift card configuration, stored as metafields in the
/// `gift_card_settings` namespace.
///
/// Only `min_price` and `max_price` gate provisioning. The enablement flags
/// and `selected_product` belong to the storefront theme, which reads the
/// same namespace; they are carried here so the CLI can show and update the
/// full picture without clobbering keys it does not understand.
///
/// Missing or unparsable metafield values fall back to the defaults rather
/// than failing the request: a half-configured shop still provisions with
/// the 100-1000 bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftCardSettings {
    /// Smallest accepted amount (inclusive).
    pub min_price: i64,
    /// Largest accepted amount (inclusive).
    pub max_price: i64,
    /// Master switch for the storefront widget.
    pub enabled: bool,
    /// Whether digital cards are offered.
    pub digital_enabled: bool,
    /// Whether physical cards are offered.
    pub physical_enabled: bool,
    /// Whether the gift box upsell is offered with physical cards.
    pub physical_giftbox_enabled: bool,
    /// Theme product selection, opaque JSON managed by the settings UI.
    pub selected_product: Option<serde_json::Value>,
}

impl Default for GiftCardSettings {
    fn default() -> Self {
        Self {
            min_price: Self::DEFAULT_MIN_PRICE,
            max_price: Self::DEFAULT_MAX_PRICE,
            enabled: false,
            digital_enabled: false,
            physical_enabled: false,
            physical_giftbox_enabled: false,
            selected_product: None,
        }
    }
}

impl GiftCardSettings {
    /// Metafield namespace holding these settings.
    pub const NAMESPACE: &'static str = "gift_card_settings";

    /// Default minimum amount when the metafield is absent.
    pub const DEFAULT_MIN_PRICE: i64 = 100;

    /// Default maximum amount when the metafield is absent.
    pub const DEFAULT_MAX_PRICE: i64 = 1000;

    /// Build settings from raw metafield key/value pairs.
    ///
    /// Unknown keys are ignored. Unparsable numbers fall back to the
    /// defaults; booleans are true only for the literal string `"true"`.
    pub fn from_metafields<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut settings = Self::default();
        for (key, value) in fields {
            match key.as_str() {
                "min_price" => {
                    settings.min_price = value.parse().unwrap_or(Self::DEFAULT_MIN_PRICE);
                }
                "max_price" => {
                    settings.max_price = value.parse().unwrap_or(Self::DEFAULT_MAX_PRICE);
                }
                "enabled" => settings.enabled = value == "true",
                "digital_enabled" => settings.digital_enabled = value == "true",
                "physical_enabled" => settings.physical_enabled = value == "true",
                "physical_giftbox_enabled" => {
                    settings.physical_giftbox_enabled = value == "true";
                }
                "selected_product" => {
                    settings.selected_product = serde_json::from_str(&value).ok();
                }
                _ => {}
            }
        }
        settings
    }

    /// Check a requested amount against the configured bounds.
    ///
    /// Both bounds are inclusive: with the defaults, 100 and 1000 are both
    /// accepted.
    ///
    /// # Errors
    ///
    /// Returns [`AmountRangeError`] when the amount falls outside
    /// `[min_price, max_price]`.
    pub fn validate_amount(&self, amount: Amount) -> Result<(), AmountRangeError> {
        let value = amount.as_decimal();
        if value < Decimal::from(self.min_price) || value > Decimal::from(self.max_price) {
            return Err(AmountRangeError {
                min: self.min_price,
                max: self.max_price,
            });
        }
        Ok(())
    }

    /// Validate a min/max pair before writing it back to the shop.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsRangeError`] when the minimum is not strictly below
    /// the maximum or either bound is negative.
    pub const fn validate_range(min: i64, max: i64) -> Result<(), SettingsRangeError> {
        if min >= max {
            return Err(SettingsRangeError::Inverted);
        }
        if min < 0 || max < 0 {
            return Err(SettingsRangeError::Negative);
        }
        Ok(())
    }
}

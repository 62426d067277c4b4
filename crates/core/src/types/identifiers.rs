//! Derived catalog identifiers.
//!
//! Product handles and variant SKUs are the natural keys that make
//! provisioning idempotent. They are derived, never stored: looking one up
//! in the Shopify catalog answers "has this bucket been provisioned before".

use core::fmt;

use serde::Serialize;

use super::bucket::PriceBucket;
use super::card::GiftCardType;

/// A Shopify product handle derived from a price bucket.
///
/// One product per card type per bucket:
/// `custom-gift-card-300-399` for digital, with a `-physical` marker for
/// physical cards (`custom-gift-card-physical-300-399`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductHandle(String);

impl ProductHandle {
    /// Common prefix of every derived handle.
    pub const PREFIX: &'static str = "custom-gift-card";

    /// Derive the handle for a card type and price bucket.
    #[must_use]
    pub fn for_bucket(card_type: GiftCardType, bucket: &PriceBucket) -> Self {
        let handle = if card_type.is_physical() {
            format!("{}-physical-{}-{}", Self::PREFIX, bucket.min, bucket.max)
        } else {
            format!("{}-{}-{}", Self::PREFIX, bucket.min, bucket.max)
        };
        Self(handle)
    }

    /// Returns the handle as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the handle and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProductHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProductHandle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A variant SKU derived from a card type and exact price.
///
/// `GIFT-DIGITAL-350-00` for a digital card at 350.00; the decimal point in
/// the price becomes a dash so the SKU stays in the usual SKU alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VariantSku(String);

impl VariantSku {
    /// Derive the SKU for a card type and two-decimal price string.
    #[must_use]
    pub fn for_price(card_type: GiftCardType, price: &str) -> Self {
        let tag = if card_type.is_physical() {
            "PHYSICAL"
        } else {
            "DIGITAL"
        };
        Self(format!("GIFT-{tag}-{}", price.replace('.', "-")))
    }

    /// Returns the SKU as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the SKU and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for VariantSku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VariantSku {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

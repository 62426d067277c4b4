//! Price bucket derivation.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use super::amount::Amount;

/// A $100-wide price band that a requested amount falls into.
///
/// The bucket is the unit of idempotency for provisioning: every amount in
/// `[min, max]` maps to the same product handle, and the exact amount maps
/// to the variant SKU via [`price`](Self::price). Bucket 300-399 holds all
/// amounts from 300.00 through 399.99.
///
/// ## Examples
///
/// ```
/// use custom_gift_card_core::{Amount, PriceBucket};
/// use serde_json::json;
///
/// let amount = Amount::from_json(&json!(350)).unwrap();
/// let bucket = PriceBucket::for_amount(amount);
///
/// assert_eq!(bucket.min, 300);
/// assert_eq!(bucket.max, 399);
/// assert_eq!(bucket.price, "350.00");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceBucket {
    /// Lower bound of the band (inclusive).
    pub min: i64,
    /// Upper bound of the band (inclusive).
    pub max: i64,
    /// The requested amount formatted with two decimal places.
    pub price: String,
}

impl PriceBucket {
    /// Width of each price band.
    pub const WIDTH: i64 = 100;

    /// Derive the bucket for a requested amount.
    #[must_use]
    pub fn for_amount(amount: Amount) -> Self {
        let hundreds = (amount.as_decimal() / Decimal::ONE_HUNDRED).floor();
        let min = (hundreds * Decimal::ONE_HUNDRED)
            .to_i64()
            .unwrap_or(i64::MAX);
        let max = min.saturating_add(Self::WIDTH - 1);

        Self {
            min,
            max,
            price: amount.to_string(),
        }
    }
}

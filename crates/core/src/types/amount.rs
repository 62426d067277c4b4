//! Requested gift card amount.

use core::fmt;

use rust_decimal::Decimal;
use serde_json::Value;

/// Errors that can occur when parsing an [`Amount`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountParseError {
    /// The value is missing, not a number, or not parseable as one.
    #[error("amount must be a number")]
    Invalid,
    /// The value is zero.
    #[error("amount cannot be zero")]
    Zero,
}

/// A requested gift card amount.
///
/// Storefront clients send the amount in the JSON request body, and in
/// practice it arrives either as a JSON number or as a numeric string,
/// depending on the theme's form handling. Both are accepted; everything
/// else is rejected up front so invalid input never reaches the catalog.
///
/// Amounts are held as [`Decimal`] so that fractional prices like `350.50`
/// survive exactly. Zero is rejected at parse time; negative amounts parse
/// successfully and are left to the range check, whose error message is the
/// storefront-facing contract.
///
/// ## Examples
///
/// ```
/// use custom_gift_card_core::Amount;
/// use serde_json::json;
///
/// assert!(Amount::from_json(&json!(350)).is_ok());
/// assert!(Amount::from_json(&json!("350.50")).is_ok());
///
/// assert!(Amount::from_json(&json!("abc")).is_err());
/// assert!(Amount::from_json(&json!(null)).is_err());
/// assert!(Amount::from_json(&json!(0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount(Decimal);

impl Amount {
    /// Parse an `Amount` from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value:
    /// - Is not a JSON number or string
    /// - Is a string that does not parse as a decimal number
    /// - Is zero
    pub fn from_json(value: &Value) -> Result<Self, AmountParseError> {
        let decimal = match value {
            Value::Number(n) => parse_decimal(&n.to_string())?,
            Value::String(s) => parse_decimal(s.trim())?,
            _ => return Err(AmountParseError::Invalid),
        };

        if decimal.is_zero() {
            return Err(AmountParseError::Zero);
        }

        Ok(Self(decimal))
    }

    /// Returns the underlying decimal value.
    #[must_use]
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }
}

fn parse_decimal(s: &str) -> Result<Decimal, AmountParseError> {
    s.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(s))
        .map_err(|_| AmountParseError::Invalid)
}

impl fmt::Display for Amount {
    /// Formats the amount with exactly two decimal places, the form Shopify
    /// expects for variant prices.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_number() {
        let amount = Amount::from_json(&json!(350)).unwrap();
        assert_eq!(amount.to_string(), "350.00");
    }

    #[test]
    fn test_from_json_fractional_number() {
        let amount = Amount::from_json(&json!(350.5)).unwrap();
        assert_eq!(amount.to_string(), "350.50");
    }

    #[test]
    fn test_from_json_numeric_string() {
        let amount = Amount::from_json(&json!("425")).unwrap();
        assert_eq!(amount.to_string(), "425.00");
    }

    #[test]
    fn test_from_json_trims_whitespace() {
        let amount = Amount::from_json(&json!("  350.50  ")).unwrap();
        assert_eq!(amount.to_string(), "350.50");
    }

    #[test]
    fn test_from_json_non_numeric_string() {
        assert!(matches!(
            Amount::from_json(&json!("abc")),
            Err(AmountParseError::Invalid)
        ));
    }

    #[test]
    fn test_from_json_empty_string() {
        assert!(matches!(
            Amount::from_json(&json!("")),
            Err(AmountParseError::Invalid)
        ));
    }

    #[test]
    fn test_from_json_null() {
        assert!(matches!(
            Amount::from_json(&json!(null)),
            Err(AmountParseError::Invalid)
        ));
    }

    #[test]
    fn test_from_json_object() {
        assert!(matches!(
            Amount::from_json(&json!({"value": 350})),
            Err(AmountParseError::Invalid)
        ));
    }

    #[test]
    fn test_from_json_bool() {
        assert!(matches!(
            Amount::from_json(&json!(true)),
            Err(AmountParseError::Invalid)
        ));
    }

    #[test]
    fn test_from_json_zero() {
        assert!(matches!(
            Amount::from_json(&json!(0)),
            Err(AmountParseError::Zero)
        ));
        assert!(matches!(
            Amount::from_json(&json!("0.00")),
            Err(AmountParseError::Zero)
        ));
    }

    #[test]
    fn test_from_json_negative_parses() {
        // Negative amounts are rejected later by the range check, which owns
        // the storefront-facing error message.
        let amount = Amount::from_json(&json!(-50)).unwrap();
        assert_eq!(amount.to_string(), "-50.00");
    }

    #[test]
    fn test_display_two_decimal_places() {
        let amount = Amount::from_json(&json!(100)).unwrap();
        assert_eq!(format!("{amount}"), "100.00");
    }
}

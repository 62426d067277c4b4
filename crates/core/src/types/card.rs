//! Gift card type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`GiftCardType`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GiftCardTypeError {
    /// The input is not a recognized gift card type.
    #[error("unknown gift card type: {0:?}")]
    Unknown(String),
}

/// The kind of gift card being requested.
///
/// Digital cards become Shopify gift card products (`giftCard: true`);
/// physical cards are ordinary products that get fulfilled and shipped.
/// The wire form is the lowercase name, and matching is case sensitive:
/// `"Digital"` is rejected, not normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GiftCardType {
    /// Delivered by email as a Shopify gift card.
    Digital,
    /// A physical card fulfilled like any other product.
    Physical,
}

impl GiftCardType {
    /// Returns true for physical cards.
    #[must_use]
    pub const fn is_physical(self) -> bool {
        matches!(self, Self::Physical)
    }

    /// Returns the lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Digital => "digital",
            Self::Physical => "physical",
        }
    }
}

impl fmt::Display for GiftCardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for GiftCardType {
    type Err = GiftCardTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "digital" => Ok(Self::Digital),
            "physical" => Ok(Self::Physical),
            _ => Err(GiftCardTypeError::Unknown(s.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("digital".parse::<GiftCardType>().unwrap(), GiftCardType::Digital);
        assert_eq!("physical".parse::<GiftCardType>().unwrap(), GiftCardType::Physical);
    }

    #[test]
    fn test_from_str_is_case_sensitive() {
        assert!(matches!(
            "Digital".parse::<GiftCardType>(),
            Err(GiftCardTypeError::Unknown(_))
        ));
        assert!(matches!(
            "PHYSICAL".parse::<GiftCardType>(),
            Err(GiftCardTypeError::Unknown(_))
        ));
    }

    #[test]
    fn test_from_str_unknown() {
        assert!("paper".parse::<GiftCardType>().is_err());
        assert!("".parse::<GiftCardType>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let digital: GiftCardType = serde_json::from_str("\"digital\"").unwrap();
        assert_eq!(digital, GiftCardType::Digital);
        assert_eq!(serde_json::to_string(&digital).unwrap(), "\"digital\"");
    }

    #[test]
    fn test_serde_rejects_other_casing() {
        assert!(serde_json::from_str::<GiftCardType>("\"Digital\"").is_err());
    }

    #[test]
    fn test_is_physical() {
        assert!(GiftCardType::Physical.is_physical());
        assert!(!GiftCardType::Digital.is_physical());
    }

    #[test]
    fn test_display() {
        assert_eq!(GiftCardType::Digital.to_string(), "digital");
        assert_eq!(GiftCardType::Physical.to_string(), "physical");
    }
}

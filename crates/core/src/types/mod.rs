//! Core types for gift card provisioning.
//!
//! This module provides type-safe wrappers for the domain concepts shared by
//! the proxy service and the CLI.

pub mod amount;
pub mod bucket;
pub mod card;
pub mod identifiers;
pub mod settings;

pub use amount::{Amount, AmountParseError};
pub use bucket::PriceBucket;
pub use card::{GiftCardType, GiftCardTypeError};
pub use identifiers::{ProductHandle, VariantSku};
pub use settings::{AmountRangeError, GiftCardSettings, SettingsRangeError};

//! Custom Gift Card Core - Shared domain types.
//!
//! This crate provides the types used across the gift card components:
//! - `proxy` - Storefront-facing provisioning service behind the Shopify app proxy
//! - `cli` - Command-line tools for settings management and manual provisioning
//!
//! # Architecture
//!
//! The core crate contains only types and pure derivation logic - no I/O, no
//! HTTP clients. Every identifier the provisioning flow keys on (price
//! buckets, product handles, variant SKUs) is derived here deterministically,
//! which is what lets repeated requests converge on the same catalog objects.
//!
//! # Modules
//!
//! - [`types`] - Amounts, price buckets, gift card types, handles, SKUs, and settings

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

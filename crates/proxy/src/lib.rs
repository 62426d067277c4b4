//! Custom Gift Card Proxy library.
//!
//! This crate provides the proxy functionality as a library, allowing it
//! to be tested and reused by the CLI and integration tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod shopify;
pub mod state;

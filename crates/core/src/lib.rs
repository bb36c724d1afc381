//! Bold Type Core - Shared view-model types.
//!
//! This crate provides the normalized catalog and account types consumed by
//! every Bold Type component:
//! - `storefront` - Gateway client, normalizer, and state containers
//! - `integration-tests` - Scenario tests against mock collaborators
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no storage.
//! Raw Shopify response shapes never appear here; the storefront crate's
//! normalizer converts them into these types at the API boundary.
//!
//! # Modules
//!
//! - [`types`] - Products, collections, customers, and orders as the view
//!   layer sees them

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

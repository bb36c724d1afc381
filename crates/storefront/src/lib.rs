//! Bold Type Storefront core library.
//!
//! Everything the view layer needs to drive the storefront, with the pages
//! themselves left to the consumer:
//!
//! - [`shopify`] - Storefront API client and the normalizer that flattens
//!   gateway response shapes into `bold-type-core` view models
//! - [`state`] - Cart, wishlist, customer session, and debounced search
//!   containers
//! - [`storage`] - Durable key-value storage backing the wishlist and the
//!   customer session
//! - [`config`] - Environment-driven configuration
//! - [`gateway`] - Trait seams the containers use to reach the gateway, so
//!   tests run against in-memory mocks

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod gateway;
pub mod shopify;
pub mod state;
pub mod storage;

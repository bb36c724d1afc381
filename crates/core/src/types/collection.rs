//! Normalized collection type.

use serde::{Deserialize, Serialize};

use super::product::Product;

/// A merchandising collection.
///
/// `products` is empty when only collection metadata was requested (the
/// collections index), and populated when a single collection was fetched
/// with its nested product listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    /// URL slug.
    pub handle: String,
    pub title: String,
    pub description: String,
    /// Collection image URL.
    pub image: Option<String>,
    pub products: Vec<Product>,
}

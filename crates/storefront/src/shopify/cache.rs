//! Cache types for Storefront API responses.

use bold_type_core::{Collection, Product};

/// Cached value types. Keys are formatted strings built by the client from
/// the operation name and its arguments.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    Products(Vec<Product>),
    Collection(Box<Collection>),
    Collections(Vec<Collection>),
}

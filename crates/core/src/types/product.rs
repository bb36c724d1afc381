//! Normalized product and variant types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product as the view layer sees it.
///
/// Flattened from the gateway's nested edge/node shape by the storefront
/// normalizer. The price is the minimum across variants; `compare_at_price`
/// is only present when it is strictly greater than `price`, so a populated
/// field always represents a real discount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Gateway product ID (opaque, e.g. `gid://shopify/Product/123`).
    pub id: String,
    /// URL slug.
    pub handle: String,
    pub title: String,
    pub description: String,
    pub description_html: String,
    /// Minimum variant price.
    pub price: Decimal,
    /// Minimum compare-at price, present only when strictly above `price`.
    pub compare_at_price: Option<Decimal>,
    /// ISO 4217 currency code (e.g. "USD").
    pub currency_code: String,
    /// Featured image URL.
    pub image: Option<String>,
    /// All image URLs, gallery order.
    pub images: Vec<String>,
    pub tags: Vec<String>,
    pub product_type: String,
    pub available_for_sale: bool,
    pub variants: Vec<ProductVariant>,
    /// Distinct size labels across variants, first-seen order.
    pub sizes: Vec<String>,
    /// Distinct color labels across variants, first-seen order.
    pub colors: Vec<String>,
}

impl Product {
    /// Whether the product carries a genuine discount.
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.compare_at_price
            .is_some_and(|compare_at| compare_at > self.price)
    }
}

/// A purchasable variant of a [`Product`].
///
/// Owned by its parent product; referenced elsewhere only by ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: String,
    pub title: String,
    pub available_for_sale: bool,
    pub price: Decimal,
    /// Variant-level compare-at price, passed through unguarded.
    pub compare_at_price: Option<Decimal>,
    /// Value of the variant's "Size" option, if it has one.
    pub size: Option<String>,
    /// Value of the variant's "Color" option, if it has one.
    pub color: Option<String>,
    /// Variant-specific image override URL.
    pub image: Option<String>,
}

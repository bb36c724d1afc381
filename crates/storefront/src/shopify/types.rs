//! Raw Shopify Storefront API response shapes.
//!
//! These mirror the wire format (camelCase fields, paginated edge/node
//! wrappers) and exist only long enough for [`super::conversions`] to
//! flatten them into `bold-type-core` view models. Optional fields default
//! rather than error: a sparse catalog record must never take a page down.

use serde::Deserialize;

/// Sort orders accepted by the product listing endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSortKey {
    #[default]
    BestSelling,
    Price,
    CreatedAt,
    Title,
}

impl ProductSortKey {
    /// The GraphQL enum value for this sort key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BestSelling => "BEST_SELLING",
            Self::Price => "PRICE",
            Self::CreatedAt => "CREATED_AT",
            Self::Title => "TITLE",
        }
    }
}

// =============================================================================
// Connection plumbing
// =============================================================================

/// A paginated edge/node wrapper.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Connection<T> {
    #[serde(default)]
    pub edges: Vec<Edge<T>>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { edges: Vec::new() }
    }
}

impl<T> Connection<T> {
    /// Flatten into the plain ordered node list.
    pub fn into_nodes(self) -> Vec<T> {
        self.edges.into_iter().map(|edge| edge.node).collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

const fn default_true() -> bool {
    true
}

// =============================================================================
// Catalog shapes
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMoney {
    pub amount: String,
    #[serde(default)]
    pub currency_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPriceRange {
    #[serde(default)]
    pub min_variant_price: Option<RawMoney>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawImage {
    pub url: String,
    #[serde(default)]
    pub alt_text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSelectedOption {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVariant {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_true")]
    pub available_for_sale: bool,
    #[serde(default)]
    pub selected_options: Vec<RawSelectedOption>,
    #[serde(default)]
    pub price: Option<RawMoney>,
    #[serde(default)]
    pub compare_at_price: Option<RawMoney>,
    #[serde(default)]
    pub image: Option<RawImage>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    pub id: String,
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub description_html: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub product_type: String,
    #[serde(default = "default_true")]
    pub available_for_sale: bool,
    #[serde(default)]
    pub featured_image: Option<RawImage>,
    #[serde(default)]
    pub images: Connection<RawImage>,
    #[serde(default)]
    pub variants: Connection<RawVariant>,
    #[serde(default)]
    pub price_range: Option<RawPriceRange>,
    #[serde(default)]
    pub compare_at_price_range: Option<RawPriceRange>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCollection {
    pub id: String,
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<RawImage>,
    #[serde(default)]
    pub products: Connection<RawProduct>,
}

// =============================================================================
// Customer shapes
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCustomer {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Access token as issued by `customerAccessTokenCreate`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAccessToken {
    pub access_token: String,
    pub expires_at: String,
}

/// User error attached to customer mutations.
#[derive(Debug, Clone, Deserialize)]
pub struct RawUserError {
    pub message: String,
}

// =============================================================================
// Order shapes
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOrder {
    pub id: String,
    pub name: String,
    pub order_number: i64,
    pub processed_at: String,
    #[serde(default)]
    pub financial_status: Option<String>,
    #[serde(default)]
    pub fulfillment_status: Option<String>,
    pub total_price: RawMoney,
    #[serde(default)]
    pub subtotal_price: Option<RawMoney>,
    #[serde(default)]
    pub total_shipping_price: Option<RawMoney>,
    #[serde(default)]
    pub shipping_address: Option<RawOrderAddress>,
    #[serde(default)]
    pub line_items: Connection<RawOrderLineItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawOrderAddress {
    #[serde(default)]
    pub address1: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOrderLineItem {
    pub title: String,
    pub quantity: u32,
    pub original_total_price: RawMoney,
    #[serde(default)]
    pub variant: Option<RawOrderVariant>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOrderVariant {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub image: Option<RawImage>,
    #[serde(default)]
    pub selected_options: Vec<RawSelectedOption>,
    #[serde(default)]
    pub product: Option<RawProductHandle>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawProductHandle {
    pub handle: String,
}

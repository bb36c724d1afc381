//! Normalized order history types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A past order from the customer's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    /// Display name (e.g. "#1001").
    pub name: String,
    pub order_number: i64,
    /// When the order was processed, ISO-8601 as the gateway reported it.
    pub processed_at: String,
    pub financial_status: Option<String>,
    pub fulfillment_status: Option<String>,
    pub total_price: Decimal,
    pub subtotal_price: Decimal,
    pub shipping_price: Decimal,
    /// ISO 4217 currency code shared by the order's prices.
    pub currency_code: String,
    pub shipping_address: Option<OrderAddress>,
    pub line_items: Vec<OrderLineItem>,
}

impl Order {
    /// Parse the `processed_at` timestamp.
    #[must_use]
    pub fn processed_at_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.processed_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Shipping destination attached to an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderAddress {
    pub address1: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: Option<String>,
    pub zip: Option<String>,
}

/// One purchased line within an [`Order`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub title: String,
    pub quantity: u32,
    /// Original total price for the line.
    pub price: Decimal,
    pub currency_code: String,
    pub variant_title: Option<String>,
    pub image: Option<String>,
    /// Slug of the purchased product, when the variant still exists.
    pub product_handle: Option<String>,
    pub options: Vec<SelectedOption>,
}

/// A variant option as selected at purchase time (e.g. Size = "M").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedOption {
    pub name: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processed_at_parses_rfc3339() {
        let order = Order {
            id: "gid://shopify/Order/1".to_string(),
            name: "#1001".to_string(),
            order_number: 1001,
            processed_at: "2025-06-01T12:30:00Z".to_string(),
            financial_status: Some("PAID".to_string()),
            fulfillment_status: None,
            total_price: Decimal::from(96),
            subtotal_price: Decimal::from(96),
            shipping_price: Decimal::ZERO,
            currency_code: "USD".to_string(),
            shipping_address: None,
            line_items: Vec::new(),
        };

        let parsed = order.processed_at_datetime().expect("valid timestamp");
        assert_eq!(parsed.to_rfc3339(), "2025-06-01T12:30:00+00:00");
    }

    #[test]
    fn test_processed_at_garbage_is_none() {
        let order = Order {
            id: String::new(),
            name: String::new(),
            order_number: 0,
            processed_at: "yesterday-ish".to_string(),
            financial_status: None,
            fulfillment_status: None,
            total_price: Decimal::ZERO,
            subtotal_price: Decimal::ZERO,
            shipping_price: Decimal::ZERO,
            currency_code: "USD".to_string(),
            shipping_address: None,
            line_items: Vec::new(),
        };

        assert!(order.processed_at_datetime().is_none());
    }
}

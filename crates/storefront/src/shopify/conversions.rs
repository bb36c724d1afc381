//! Conversion functions from raw Shopify shapes to view models.
//!
//! Pure functions: same raw record in, same view model out, no side effects.
//! Missing optional fields fall back to defaults enumerated here rather than
//! erroring; only transport-level failures ever reach callers, and those are
//! raised by the client before conversion starts.

use rust_decimal::Decimal;

use bold_type_core::{
    Collection, Customer, Order, OrderAddress, OrderLineItem, Product, ProductVariant,
    SelectedOption,
};

use super::types::{RawCollection, RawCustomer, RawMoney, RawOrder, RawProduct, RawVariant};

const DEFAULT_CURRENCY: &str = "USD";

/// Parse a money amount, treating absence or garbage as zero.
fn parse_amount(money: Option<&RawMoney>) -> Decimal {
    try_parse_amount(money).unwrap_or(Decimal::ZERO)
}

/// Parse a money amount, keeping absence distinct from a value.
fn try_parse_amount(money: Option<&RawMoney>) -> Option<Decimal> {
    money.and_then(|m| m.amount.parse::<Decimal>().ok())
}

fn currency_of(money: Option<&RawMoney>) -> String {
    money
        .and_then(|m| m.currency_code.clone())
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string())
}

/// First value of the named variant option, matched case-insensitively.
fn option_value(variant: &RawVariant, name: &str) -> Option<String> {
    variant
        .selected_options
        .iter()
        .find(|opt| opt.name.eq_ignore_ascii_case(name))
        .map(|opt| opt.value.clone())
}

// =============================================================================
// Products
// =============================================================================

/// Flatten a raw gateway product record into a [`Product`].
#[must_use]
pub fn normalize_product(raw: RawProduct) -> Product {
    let min_price = raw
        .price_range
        .as_ref()
        .and_then(|range| range.min_variant_price.as_ref());
    let price = parse_amount(min_price);
    let currency_code = currency_of(min_price);

    // Only surface a discount when it is real: a compare-at figure at or
    // below the selling price is treated as absent.
    let compare_at_price = try_parse_amount(
        raw.compare_at_price_range
            .as_ref()
            .and_then(|range| range.min_variant_price.as_ref()),
    )
    .filter(|compare_at| *compare_at > price);

    let variants: Vec<ProductVariant> = raw
        .variants
        .into_nodes()
        .into_iter()
        .map(|variant| normalize_variant(variant, price))
        .collect();

    // Deduplicated unions of the variants' option values, first-seen order.
    let mut sizes: Vec<String> = Vec::new();
    let mut colors: Vec<String> = Vec::new();
    for variant in &variants {
        if let Some(size) = &variant.size
            && !sizes.contains(size)
        {
            sizes.push(size.clone());
        }
        if let Some(color) = &variant.color
            && !colors.contains(color)
        {
            colors.push(color.clone());
        }
    }

    Product {
        id: raw.id,
        handle: raw.handle,
        title: raw.title,
        description: raw.description,
        description_html: raw.description_html,
        price,
        compare_at_price,
        currency_code,
        image: raw.featured_image.map(|image| image.url),
        images: raw
            .images
            .into_nodes()
            .into_iter()
            .map(|image| image.url)
            .collect(),
        tags: raw.tags,
        product_type: raw.product_type,
        available_for_sale: raw.available_for_sale,
        variants,
        sizes,
        colors,
    }
}

/// `product_min_price` covers variants the gateway returned without a price.
fn normalize_variant(raw: RawVariant, product_min_price: Decimal) -> ProductVariant {
    let size = option_value(&raw, "size");
    let color = option_value(&raw, "color");

    ProductVariant {
        price: try_parse_amount(raw.price.as_ref()).unwrap_or(product_min_price),
        compare_at_price: try_parse_amount(raw.compare_at_price.as_ref()),
        size,
        color,
        image: raw.image.map(|image| image.url),
        id: raw.id,
        title: raw.title,
        available_for_sale: raw.available_for_sale,
    }
}

// =============================================================================
// Collections
// =============================================================================

/// Flatten a raw collection record, normalizing any nested products.
#[must_use]
pub fn normalize_collection(raw: RawCollection) -> Collection {
    Collection {
        id: raw.id,
        handle: raw.handle,
        title: raw.title,
        description: raw.description,
        image: raw.image.map(|image| image.url),
        products: raw
            .products
            .into_nodes()
            .into_iter()
            .map(normalize_product)
            .collect(),
    }
}

// =============================================================================
// Customers
// =============================================================================

#[must_use]
pub fn normalize_customer(raw: RawCustomer) -> Customer {
    Customer {
        id: raw.id,
        email: raw.email,
        first_name: raw.first_name,
        last_name: raw.last_name,
        phone: raw.phone,
    }
}

// =============================================================================
// Orders
// =============================================================================

#[must_use]
pub fn normalize_order(raw: RawOrder) -> Order {
    let currency_code = currency_of(Some(&raw.total_price));

    let line_items = raw
        .line_items
        .into_nodes()
        .into_iter()
        .map(|item| {
            let item_currency = currency_of(Some(&item.original_total_price));
            let price = parse_amount(Some(&item.original_total_price));
            let (variant_title, image, product_handle, options) = match item.variant {
                Some(variant) => (
                    variant.title,
                    variant.image.map(|image| image.url),
                    variant.product.map(|product| product.handle),
                    variant
                        .selected_options
                        .into_iter()
                        .map(|opt| SelectedOption {
                            name: opt.name,
                            value: opt.value,
                        })
                        .collect(),
                ),
                None => (None, None, None, Vec::new()),
            };

            OrderLineItem {
                title: item.title,
                quantity: item.quantity,
                price,
                currency_code: item_currency,
                variant_title,
                image,
                product_handle,
                options,
            }
        })
        .collect();

    Order {
        id: raw.id,
        name: raw.name,
        order_number: raw.order_number,
        processed_at: raw.processed_at,
        financial_status: raw.financial_status,
        fulfillment_status: raw.fulfillment_status,
        total_price: parse_amount(Some(&raw.total_price)),
        subtotal_price: parse_amount(raw.subtotal_price.as_ref()),
        shipping_price: parse_amount(raw.total_shipping_price.as_ref()),
        currency_code,
        shipping_address: raw.shipping_address.map(|addr| OrderAddress {
            address1: addr.address1,
            city: addr.city,
            province: addr.province,
            country: addr.country,
            zip: addr.zip,
        }),
        line_items,
    }
}

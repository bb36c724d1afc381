//! Cart container scenarios.

use rust_decimal::Decimal;

use bold_type_storefront::state::{Cart, CartItemInput, LineKey};

fn item(product_id: &str, size: &str, price: &str) -> CartItemInput {
    CartItemInput {
        product_id: product_id.to_string(),
        title: format!("Tee {product_id}"),
        size: size.to_string(),
        unit_price: price.parse().expect("test price"),
        image: None,
    }
}

#[test]
fn add_update_remove_flow() {
    let mut cart = Cart::new();

    cart.add_item(item("p1", "M", "48"));
    cart.add_item(item("p1", "M", "48"));
    cart.add_item(item("p1", "L", "48"));
    cart.add_item(item("p2", "M", "55"));

    // Three distinct lines: (p1, M) x2, (p1, L), (p2, M).
    assert_eq!(cart.item_count(), 3);
    assert_eq!(cart.subtotal(), "199".parse::<Decimal>().expect("decimal"));

    cart.update_quantity(&LineKey::new("p1", "M"), 1);
    assert_eq!(cart.subtotal(), "151".parse::<Decimal>().expect("decimal"));

    cart.update_quantity(&LineKey::new("p1", "L"), 0);
    assert_eq!(cart.item_count(), 2);

    cart.remove_item(&LineKey::new("p2", "M"));
    cart.remove_item(&LineKey::new("p1", "M"));
    assert!(cart.is_empty());
    assert_eq!(cart.subtotal(), Decimal::ZERO);
}

#[test]
fn badge_counts_lines_not_units() {
    let mut cart = Cart::new();
    for _ in 0..4 {
        cart.add_item(item("p1", "M", "48"));
    }
    cart.add_item(item("p1", "S", "48"));

    assert_eq!(cart.item_count(), 2);
    assert_eq!(
        cart.items()
            .iter()
            .map(|line| line.quantity)
            .collect::<Vec<_>>(),
        vec![4, 1]
    );
}

#[test]
fn clearing_resets_everything() {
    let mut cart = Cart::new();
    cart.add_item(item("p1", "M", "48.50"));
    cart.add_item(item("p2", "S", "52.00"));

    cart.clear();

    assert!(cart.is_empty());
    assert_eq!(cart.item_count(), 0);
    assert_eq!(cart.subtotal(), Decimal::ZERO);

    // The cart is still usable after a clear.
    let line = cart.add_item(item("p1", "M", "48.50"));
    assert_eq!(line.quantity, 1);
}

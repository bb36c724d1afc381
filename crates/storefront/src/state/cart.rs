//! Cart state container.
//!
//! Tracks what the visitor intends to purchase within the current browsing
//! session. Mutation is synchronous and always succeeds; the container is
//! session-scoped and never persisted. Derived values are recomputed on
//! every read.
//!
//! Opening the cart drawer after an add is the caller's decision:
//! [`Cart::add_item`] returns the affected line and carries no UI state.

use rust_decimal::Decimal;

/// Composite key identifying a unique cart line.
///
/// Two lines with the same product but different sizes are distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub product_id: String,
    pub size: String,
}

impl LineKey {
    #[must_use]
    pub fn new(product_id: impl Into<String>, size: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            size: size.into(),
        }
    }
}

/// Candidate for [`Cart::add_item`]: a line without a quantity yet.
#[derive(Debug, Clone)]
pub struct CartItemInput {
    pub product_id: String,
    pub title: String,
    pub size: String,
    pub unit_price: Decimal,
    pub image: Option<String>,
}

/// One (product, size) entry in the cart.
///
/// Quantity is always >= 1; reducing it to zero removes the line entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product_id: String,
    pub title: String,
    pub size: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub image: Option<String>,
}

impl CartLine {
    /// The composite key this line is addressed by.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey::new(self.product_id.clone(), self.size.clone())
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }

    fn matches(&self, key: &LineKey) -> bool {
        self.product_id == key.product_id && self.size == key.size
    }
}

/// The cart container. Starts empty; insertion order is preserved.
#[derive(Debug, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a (product, size) combination.
    ///
    /// An existing line is incremented by exactly 1; repeated calls are the
    /// mechanism for "add two". A new combination is appended with quantity
    /// 1. Returns a snapshot of the affected line.
    pub fn add_item(&mut self, item: CartItemInput) -> CartLine {
        let key = LineKey::new(item.product_id.clone(), item.size.clone());

        if let Some(line) = self.lines.iter_mut().find(|line| line.matches(&key)) {
            line.quantity += 1;
            return line.clone();
        }

        let line = CartLine {
            product_id: item.product_id,
            title: item.title,
            size: item.size,
            unit_price: item.unit_price,
            quantity: 1,
            image: item.image,
        };
        self.lines.push(line.clone());
        line
    }

    /// Remove the line with this key. No-op if absent.
    pub fn remove_item(&mut self, key: &LineKey) {
        self.lines.retain(|line| !line.matches(key));
    }

    /// Replace a line's quantity verbatim. Zero removes the line; no upper
    /// bound is enforced here (inventory limits are the gateway's concern).
    pub fn update_quantity(&mut self, key: &LineKey, quantity: u32) {
        if quantity == 0 {
            self.remove_item(key);
            return;
        }

        if let Some(line) = self.lines.iter_mut().find(|line| line.matches(key)) {
            line.quantity = quantity;
        }
    }

    /// Empty the cart unconditionally.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct lines (the badge count), not summed quantities.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of `unit_price * quantity` over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn tee(size: &str, price: i64) -> CartItemInput {
        CartItemInput {
            product_id: "p1".to_string(),
            title: "I'm Not Arguing".to_string(),
            size: size.to_string(),
            unit_price: Decimal::from(price),
            image: Some("https://cdn.example/arguing.jpg".to_string()),
        }
    }

    #[test]
    fn test_add_remove_scenario() {
        let mut cart = Cart::new();
        let key = LineKey::new("p1", "M");

        let line = cart.add_item(tee("M", 48));
        assert_eq!(line.quantity, 1);
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.subtotal(), Decimal::from(48));

        let line = cart.add_item(tee("M", 48));
        assert_eq!(line.quantity, 2);
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.subtotal(), Decimal::from(96));

        cart.update_quantity(&key, 1);
        assert_eq!(cart.subtotal(), Decimal::from(48));

        cart.remove_item(&key);
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Decimal::ZERO);
    }

    #[test]
    fn test_repeated_adds_accumulate_on_one_line() {
        let mut cart = Cart::new();
        for _ in 0..5 {
            cart.add_item(tee("M", 48));
        }

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.items().first().unwrap().quantity, 5);
    }

    #[test]
    fn test_sizes_are_distinct_lines() {
        let mut cart = Cart::new();
        cart.add_item(tee("M", 48));
        cart.add_item(tee("L", 48));

        assert_eq!(cart.item_count(), 2);
        // Badge counts lines, not units.
        cart.add_item(tee("M", 48));
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_update_to_zero_equals_remove() {
        let mut a = Cart::new();
        let mut b = Cart::new();
        for cart in [&mut a, &mut b] {
            cart.add_item(tee("M", 48));
            cart.add_item(tee("L", 48));
        }
        let key = LineKey::new("p1", "M");

        a.update_quantity(&key, 0);
        b.remove_item(&key);

        assert_eq!(a.items(), b.items());
    }

    #[test]
    fn test_update_quantity_verbatim() {
        let mut cart = Cart::new();
        cart.add_item(tee("M", 48));

        cart.update_quantity(&LineKey::new("p1", "M"), 7);
        assert_eq!(cart.items().first().unwrap().quantity, 7);
        assert_eq!(cart.subtotal(), Decimal::from(48 * 7));
    }

    #[test]
    fn test_remove_absent_key_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(tee("M", 48));

        cart.remove_item(&LineKey::new("p9", "M"));
        cart.update_quantity(&LineKey::new("p9", "M"), 3);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::new();
        cart.add_item(tee("M", 48));
        cart.add_item(tee("S", 48));
        cart.add_item(tee("XL", 48));
        // Incrementing an older line must not re-sort.
        cart.add_item(tee("M", 48));

        let sizes: Vec<_> = cart.items().iter().map(|line| line.size.as_str()).collect();
        assert_eq!(sizes, vec!["M", "S", "XL"]);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_item(tee("M", 48));
        cart.add_item(tee("L", 48));

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.subtotal(), Decimal::ZERO);
    }

    #[test]
    fn test_fractional_prices() {
        let mut cart = Cart::new();
        cart.add_item(CartItemInput {
            unit_price: "48.50".parse().unwrap(),
            ..tee("M", 0)
        });
        cart.add_item(CartItemInput {
            unit_price: "48.50".parse().unwrap(),
            ..tee("M", 0)
        });

        assert_eq!(cart.subtotal(), "97.00".parse::<Decimal>().unwrap());
    }
}

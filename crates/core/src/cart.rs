//! The visitor's cart.
//!
//! A [`Cart`] is an ordered list of [`CartLineItem`]s with two invariants:
//!
//! - at most one line per product id
//! - every line has a quantity of at least 1
//!
//! Operations that would break an invariant are no-ops rather than errors.
//! A quantity that drops to zero removes its line. Derived values
//! ([`Cart::subtotal`], [`Cart::item_count`]) are recomputed on every call.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Product};
use crate::types::{CurrencyCode, Price, ProductId};

/// A product and how many of it the visitor wants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    product: Product,
    quantity: u32,
}

impl CartLineItem {
    /// The product on this line.
    #[must_use]
    pub const fn product(&self) -> &Product {
        &self.product
    }

    /// Units of the product, always at least 1.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// Line items in the order they were first added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add `quantity` units of `product`.
    ///
    /// Increments the existing line for the product, or appends a new line.
    /// A non-positive quantity leaves the cart unchanged.
    pub fn add_item(&mut self, product: &Product, quantity: i64) {
        let Some(quantity) = positive_quantity(quantity) else {
            return;
        };

        if let Some(line) = self.line_mut(product.id) {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.lines.push(CartLineItem {
                product: product.clone(),
                quantity,
            });
        }
    }

    /// Set the quantity of the line for `product_id`.
    ///
    /// A non-positive quantity removes the line. Unknown ids are ignored.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) {
        let Some(quantity) = positive_quantity(quantity) else {
            self.remove_item(product_id);
            return;
        };

        if let Some(line) = self.line_mut(product_id) {
            line.quantity = quantity;
        }
    }

    /// Remove the line for `product_id` if present.
    pub fn remove_item(&mut self, product_id: ProductId) {
        self.lines.retain(|line| line.product.id != product_id);
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    /// The line for `product_id`, if any.
    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLineItem> {
        self.lines.iter().find(|line| line.product.id == product_id)
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |count, line| count.saturating_add(line.quantity))
    }

    /// Sum of price times quantity over all lines.
    ///
    /// Lines come from a single-currency [`Catalog`], so the currency is
    /// taken from the first line; an empty cart totals zero in the default
    /// currency.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        let currency = self
            .lines
            .first()
            .map_or_else(CurrencyCode::default, |line| line.product.price.currency_code);

        let amount = self
            .lines
            .iter()
            .map(|line| line.line_total().amount)
            .sum();

        Price::new(amount, currency)
    }

    /// Bring product snapshots up to date with the catalog.
    ///
    /// Lines whose product has left the catalog are dropped. Returns the ids
    /// that were dropped.
    pub fn reconcile(&mut self, catalog: &Catalog) -> Vec<ProductId> {
        let mut dropped = Vec::new();

        self.lines.retain_mut(|line| {
            if let Some(current) = catalog.get(line.product.id) {
                if *current != line.product {
                    line.product = current.clone();
                }
                true
            } else {
                dropped.push(line.product.id);
                false
            }
        });

        dropped
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLineItem> {
        self.lines
            .iter_mut()
            .find(|line| line.product.id == product_id)
    }
}

fn positive_quantity(quantity: i64) -> Option<u32> {
    if quantity <= 0 {
        return None;
    }
    Some(u32::try_from(quantity).unwrap_or(u32::MAX))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::catalog::Category;
    use crate::catalog::tests::product;

    #[test]
    fn test_add_new_item_appends_line() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 100, Category::Seating), 1);
        cart.add_item(&product(2, 250, Category::Tables), 3);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.lines()[0].product().id, ProductId::new(1));
        assert_eq!(cart.lines()[1].quantity(), 3);
    }

    #[test]
    fn test_add_same_product_merges_quantities() {
        let chair = product(1, 100, Category::Seating);
        let mut cart = Cart::new();
        cart.add_item(&chair, 1);
        cart.add_item(&chair, 2);
        cart.add_item(&chair, 0);
        cart.add_item(&chair, -4);
        cart.add_item(&chair, 5);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.line(chair.id).unwrap().quantity(), 8);
    }

    #[test]
    fn test_add_non_positive_quantity_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 100, Category::Seating), 0);
        cart.add_item(&product(1, 100, Category::Seating), -1);

        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_saturates_quantity() {
        let chair = product(1, 100, Category::Seating);
        let mut cart = Cart::new();
        cart.add_item(&chair, i64::MAX);
        cart.add_item(&chair, 10);

        assert_eq!(cart.item_count(), u32::MAX);
    }

    #[test]
    fn test_insertion_order_kept_after_merge() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 100, Category::Seating), 1);
        cart.add_item(&product(2, 100, Category::Seating), 1);
        cart.add_item(&product(1, 100, Category::Seating), 1);

        let ids: Vec<i32> = cart.lines().iter().map(|l| l.product().id.as_i32()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_update_quantity_sets_value() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 100, Category::Seating), 4);
        cart.update_quantity(ProductId::new(1), 2);

        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_update_quantity_zero_equals_remove() {
        let mut updated = Cart::new();
        updated.add_item(&product(1, 100, Category::Seating), 2);
        updated.add_item(&product(2, 250, Category::Tables), 1);
        let mut removed = updated.clone();

        updated.update_quantity(ProductId::new(1), 0);
        removed.remove_item(ProductId::new(1));

        assert_eq!(updated, removed);
        assert!(updated.line(ProductId::new(1)).is_none());
    }

    #[test]
    fn test_update_unknown_product_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 100, Category::Seating), 1);
        let before = cart.clone();

        cart.update_quantity(ProductId::new(99), 5);
        cart.update_quantity(ProductId::new(99), 0);

        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_unknown_product_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 100, Category::Seating), 1);
        cart.remove_item(ProductId::new(2));

        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 100, Category::Seating), 2);
        cart.add_item(&product(2, 250, Category::Tables), 1);
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert!(cart.subtotal().is_zero());
    }

    #[test]
    fn test_subtotal_and_count() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 100, Category::Seating), 2);
        cart.add_item(&product(2, 250, Category::Tables), 1);

        assert_eq!(cart.subtotal().amount, Decimal::new(450, 0));
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.lines()[0].line_total().amount, Decimal::new(200, 0));
    }

    #[test]
    fn test_reconcile_refreshes_and_drops() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 100, Category::Seating), 1);
        cart.add_item(&product(2, 250, Category::Tables), 1);

        let mut repriced = product(1, 120, Category::Seating);
        repriced.name = "Arden Chair".to_string();
        let catalog = Catalog::new(vec![repriced]);

        let dropped = cart.reconcile(&catalog);

        assert_eq!(dropped, vec![ProductId::new(2)]);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].product().name, "Arden Chair");
        assert_eq!(cart.subtotal().amount, Decimal::new(120, 0));
    }

    #[test]
    fn test_serde_roundtrip_preserves_lines() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 100, Category::Seating), 2);

        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
    }
}

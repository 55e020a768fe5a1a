//! Orders placed at checkout.
//!
//! An [`Order`] is an immutable snapshot of a cart plus the customer's
//! details. Placing an order does not touch the cart; the caller clears it
//! once the order has been recorded.

use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cart::{Cart, CartLineItem};
use crate::inquiry::Customer;
use crate::types::Price;

/// Human-facing order reference, e.g. `OAK-1F3A9C2B`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Prefix shared by every order number.
    pub const PREFIX: &'static str = "OAK-";

    /// Generate a fresh random order number.
    #[must_use]
    pub fn generate() -> Self {
        let hex = Uuid::new_v4().simple().to_string().to_uppercase();
        let short: String = hex.chars().take(8).collect();
        Self(format!("{}{short}", Self::PREFIX))
    }

    /// The order number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub number: OrderNumber,
    pub customer: Customer,
    pub lines: Vec<CartLineItem>,
    pub subtotal: Price,
    pub item_count: u32,
    pub placed_at: DateTime<Utc>,
}

impl Order {
    /// Snapshot `cart` into a new order.
    ///
    /// Returns `None` if the cart is empty.
    #[must_use]
    pub fn place(cart: &Cart, customer: Customer) -> Option<Self> {
        if cart.is_empty() {
            return None;
        }

        Some(Self {
            number: OrderNumber::generate(),
            customer,
            lines: cart.lines().to_vec(),
            subtotal: cart.subtotal(),
            item_count: cart.item_count(),
            placed_at: Utc::now(),
        })
    }
}

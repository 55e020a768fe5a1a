//! Session-related types.
//!
//! The cart and the most recently placed order live in the visitor's
//! session. Both are stored as JSON by tower-sessions.

use serde::{Deserialize, Serialize};

/// Values every page template needs for the site header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteChrome {
    /// Units in the cart, shown on the header badge.
    pub cart_count: u32,
}

/// Session keys for visitor state.
pub mod keys {
    /// Key for the visitor's cart.
    pub const CART: &str = "cart";

    /// Key for the order shown on the confirmation page.
    pub const LAST_ORDER: &str = "last_order";
}

//! Per-visitor state extractors.
//!
//! - [`SessionCart`] loads the cart from the session and writes it back on
//!   [`SessionCart::save`].
//! - [`ViewHistory`] loads the recently viewed list from cookies and emits
//!   its pending writes as `Set-Cookie` headers when returned as part of a
//!   response.
//!
//! Both degrade to empty state when storage misbehaves; neither ever rejects
//! a request.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header::SET_COOKIE, request::Parts},
    response::{IntoResponseParts, ResponseParts},
};
use oakline_core::{Cart, Catalog, Order, Product, ProductId, RecentlyViewed};
use tower_sessions::Session;

use crate::middleware::cookie_storage::CookieStorage;
use crate::models::{SiteChrome, session_keys};
use crate::state::AppState;

// =============================================================================
// Cart
// =============================================================================

/// The visitor's cart, bound to their session.
///
/// The cart is reconciled against the catalog on load, so prices and names
/// are always current and discontinued products drop out.
pub struct SessionCart {
    session: Option<Session>,
    cart: Cart,
}

impl SessionCart {
    /// The current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Mutable access for cart operations. Call [`Self::save`] afterwards.
    pub const fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    /// Header values derived from the cart.
    #[must_use]
    pub fn chrome(&self) -> SiteChrome {
        SiteChrome {
            cart_count: self.cart.item_count(),
        }
    }

    /// Persist the cart to the session.
    ///
    /// Failures are logged; the in-memory cart stays as mutated.
    pub async fn save(&self) {
        let Some(session) = self.session.as_ref() else {
            tracing::warn!("No session layer, cart changes will not persist");
            return;
        };
        if let Err(e) = session.insert(session_keys::CART, &self.cart).await {
            tracing::error!(error = %e, "Failed to save cart to session");
        }
    }

    /// Store a placed order for the confirmation page.
    ///
    /// # Errors
    ///
    /// Returns the session error if the order cannot be stored.
    pub async fn remember_order(&self, order: &Order) -> Result<(), tower_sessions::session::Error> {
        match self.session.as_ref() {
            Some(session) => session.insert(session_keys::LAST_ORDER, order).await,
            None => Ok(()),
        }
    }

    /// The most recently placed order, if any.
    pub async fn last_order(&self) -> Option<Order> {
        let session = self.session.as_ref()?;
        session
            .get::<Order>(session_keys::LAST_ORDER)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to read last order from session");
                None
            })
    }
}

impl FromRequestParts<AppState> for SessionCart {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Set by SessionManagerLayer
        let session = parts.extensions.get::<Session>().cloned();

        let mut cart = match session.as_ref() {
            Some(session) => session
                .get::<Cart>(session_keys::CART)
                .await
                .unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "Failed to read cart from session, starting empty");
                    None
                })
                .unwrap_or_default(),
            None => Cart::new(),
        };

        let dropped = cart.reconcile(state.catalog());
        if !dropped.is_empty() {
            tracing::info!(?dropped, "Removed discontinued products from cart");
        }

        Ok(Self { session, cart })
    }
}

// =============================================================================
// Recently viewed
// =============================================================================

/// The visitor's recently viewed products, persisted in a cookie.
///
/// Return it alongside the response body so any recorded view is written
/// back: `(history, template)`.
pub struct ViewHistory {
    tracker: RecentlyViewed<CookieStorage>,
}

impl ViewHistory {
    /// Record a product detail view.
    pub fn record_view(&mut self, product_id: ProductId) {
        self.tracker.record_view(product_id);
    }

    /// Viewed products in most-recent-first order, skipping `exclude`.
    #[must_use]
    pub fn products<'a>(&self, catalog: &'a Catalog, exclude: Option<ProductId>) -> Vec<&'a Product> {
        self.tracker
            .viewed_products(catalog)
            .into_iter()
            .filter(|p| Some(p.id) != exclude)
            .collect()
    }
}

impl FromRequestParts<AppState> for ViewHistory {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let storage = CookieStorage::from_headers(&parts.headers, state.config().secure_cookies());
        let tracker = RecentlyViewed::load(storage, state.config().recently_viewed_limit);
        Ok(Self { tracker })
    }
}

impl IntoResponseParts for ViewHistory {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        for value in self.tracker.store().set_cookie_headers() {
            res.headers_mut().append(SET_COOKIE, value);
        }
        Ok(res)
    }
}

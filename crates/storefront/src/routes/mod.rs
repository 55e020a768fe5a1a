//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /about                  - About the studio (markdown)
//! GET  /pages/{slug}           - Other markdown pages
//! GET  /gallery                - Project gallery
//! GET  /services               - Design services
//!
//! # Shop
//! GET  /shop                   - Product grid (?category=<slug>)
//! GET  /shop/{id}              - Product detail (records a view)
//!
//! # Cart (post/redirect/get, every POST answers 303 -> /cart)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add to cart
//! POST /cart/update            - Set line quantity (<= 0 removes)
//! POST /cart/remove            - Remove line
//! POST /cart/clear             - Empty the cart
//!
//! # Checkout
//! GET  /checkout               - Delivery details form
//! POST /checkout               - Place order, 303 -> /order-confirmation
//! GET  /order-confirmation     - Last placed order
//!
//! # Connect
//! GET  /connect                - Contact form (?project=<slug>)
//! POST /connect                - Submit inquiry
//! ```

pub mod cart;
pub mod checkout;
pub mod connect;
pub mod gallery;
pub mod home;
pub mod pages;
pub mod services;
pub mod shop;

use axum::{
    Router,
    http::Uri,
    routing::{get, post},
};

use crate::error::AppError;
use crate::middleware::{cart_rate_limiter, form_rate_limiter};
use crate::state::AppState;

/// Create the shop routes router.
pub fn shop_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(shop::index))
        .route("/{id}", get(shop::show))
}

/// Create the cart routes router.
///
/// Mutations share one rate limiter per client.
pub fn cart_routes() -> Router<AppState> {
    let mutations = Router::new()
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route_layer(cart_rate_limiter());

    Router::new().route("/", get(cart::show)).merge(mutations)
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/checkout",
            get(checkout::show).merge(post(checkout::submit).layer(form_rate_limiter())),
        )
        .route("/order-confirmation", get(checkout::confirmation))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Content pages
        .route("/", get(home::home))
        .route("/about", get(pages::about))
        .route("/pages/{slug}", get(pages::show))
        .route("/gallery", get(gallery::index))
        .route("/services", get(services::index))
        // Shop
        .nest("/shop", shop_routes())
        .nest("/cart", cart_routes())
        .merge(checkout_routes())
        // Connect form
        .route(
            "/connect",
            get(connect::show).merge(post(connect::submit).layer(form_rate_limiter())),
        )
}

/// Fallback for unmatched paths.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

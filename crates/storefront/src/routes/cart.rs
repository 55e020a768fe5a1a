//! Cart route handlers.
//!
//! The cart lives in the visitor's session. Mutations are plain form posts
//! answered with `303 See Other` back to the cart page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use oakline_core::{Cart, CartLineItem, ProductId};
use serde::Deserialize;
use tracing::instrument;

use crate::error::add_breadcrumb;
use crate::filters;
use crate::middleware::SessionCart;
use crate::models::SiteChrome;
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub product_id: i32,
    pub name: String,
    pub image: String,
    pub unit_price: String,
    pub quantity: u32,
    pub line_total: String,
}

impl From<&CartLineItem> for CartItemView {
    fn from(line: &CartLineItem) -> Self {
        let product = line.product();
        Self {
            product_id: product.id.as_i32(),
            name: product.name.clone(),
            image: product.image.clone(),
            unit_price: product.price.to_string(),
            quantity: line.quantity(),
            line_total: line.line_total().to_string(),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl CartView {
    /// Build a view from line snapshots and their totals.
    pub fn from_lines(lines: &[CartLineItem], subtotal: String, item_count: u32) -> Self {
        Self {
            items: lines.iter().map(CartItemView::from).collect(),
            subtotal,
            item_count,
        }
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self::from_lines(cart.lines(), cart.subtotal().to_string(), cart.item_count())
    }
}

/// Add to cart form data.
///
/// Fields are kept as raw text so a blank or malformed value is ignored
/// rather than rejected by the extractor.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AddToCartForm {
    pub product_id: String,
    pub quantity: String,
}

impl AddToCartForm {
    /// Requested quantity. Blank means one; unparsable is `None`.
    fn quantity(&self) -> Option<i64> {
        let raw = self.quantity.trim();
        if raw.is_empty() {
            Some(1)
        } else {
            raw.parse().ok()
        }
    }
}

/// Update cart form data.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateCartForm {
    pub product_id: String,
    pub quantity: String,
}

/// Remove from cart form data.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RemoveFromCartForm {
    pub product_id: String,
}

fn parse_product_id(raw: &str) -> Option<ProductId> {
    raw.parse().ok()
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub chrome: SiteChrome,
    pub cart: CartView,
}

/// Display cart page.
#[instrument(skip(cart))]
pub async fn show(cart: SessionCart) -> impl IntoResponse {
    CartShowTemplate {
        chrome: cart.chrome(),
        cart: CartView::from(cart.cart()),
    }
}

/// Add a product to the cart.
///
/// Unknown and out-of-stock products are ignored, as are malformed fields.
#[instrument(skip(state, cart))]
pub async fn add(
    State(state): State<AppState>,
    mut cart: SessionCart,
    Form(form): Form<AddToCartForm>,
) -> Redirect {
    let (Some(product_id), Some(quantity)) = (parse_product_id(&form.product_id), form.quantity())
    else {
        tracing::debug!(?form, "Ignoring malformed add to cart");
        return Redirect::to("/cart");
    };
    let Some(product) = state.catalog().get(product_id) else {
        tracing::debug!(%product_id, "Ignoring add of unknown product");
        return Redirect::to("/cart");
    };
    if !product.in_stock {
        tracing::debug!(%product_id, "Ignoring add of out-of-stock product");
        return Redirect::to("/cart");
    }

    cart.cart_mut().add_item(product, quantity);
    cart.save().await;

    let product_id = product_id.to_string();
    add_breadcrumb("cart", "Added to cart", Some(&[("product_id", product_id.as_str())]));

    Redirect::to("/cart")
}

/// Set a line's quantity. Zero or less removes the line; a blank or
/// unparsable quantity leaves the cart alone.
#[instrument(skip(cart))]
pub async fn update(mut cart: SessionCart, Form(form): Form<UpdateCartForm>) -> Redirect {
    let product_id = parse_product_id(&form.product_id);
    let quantity = form.quantity.trim().parse::<i64>().ok();
    if let (Some(product_id), Some(quantity)) = (product_id, quantity) {
        cart.cart_mut().update_quantity(product_id, quantity);
        cart.save().await;
    } else {
        tracing::debug!(?form, "Ignoring malformed cart update");
    }
    Redirect::to("/cart")
}

/// Remove a line from the cart.
#[instrument(skip(cart))]
pub async fn remove(mut cart: SessionCart, Form(form): Form<RemoveFromCartForm>) -> Redirect {
    if let Some(product_id) = parse_product_id(&form.product_id) {
        cart.cart_mut().remove_item(product_id);
        cart.save().await;
    }
    Redirect::to("/cart")
}

/// Empty the cart.
#[instrument(skip(cart))]
pub async fn clear(mut cart: SessionCart) -> Redirect {
    cart.cart_mut().clear();
    cart.save().await;
    add_breadcrumb("cart", "Cleared cart", None);
    Redirect::to("/cart")
}

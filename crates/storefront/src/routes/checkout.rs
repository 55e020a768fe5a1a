//! Checkout route handlers.
//!
//! Orders are placed against the session cart and kept in the session so
//! the confirmation page can show them after the redirect.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use oakline_core::{Customer, CustomerFields, Order};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::SessionCart;
use crate::models::SiteChrome;
use crate::routes::cart::CartView;

/// Checkout form data. Every field defaults so a partial post re-renders
/// the form instead of failing to deserialize.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CheckoutForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postcode: String,
    pub notes: String,
}

impl CheckoutForm {
    fn fields(&self) -> CustomerFields<'_> {
        CustomerFields {
            name: &self.name,
            email: &self.email,
            phone: Some(&self.phone),
            address: &self.address,
            city: &self.city,
            postcode: &self.postcode,
            notes: Some(&self.notes),
        }
    }
}

/// Placed order display data.
pub struct OrderView {
    pub number: String,
    pub customer_name: String,
    pub email: String,
    pub address: String,
    pub placed_on: String,
    pub cart: CartView,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        let customer = &order.customer;
        Self {
            number: order.number.to_string(),
            customer_name: customer.name.clone(),
            email: customer.email.clone(),
            address: format!("{}, {} {}", customer.address, customer.city, customer.postcode),
            placed_on: order.placed_at.format("%B %-d, %Y").to_string(),
            cart: CartView::from_lines(&order.lines, order.subtotal.to_string(), order.item_count),
        }
    }
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub chrome: SiteChrome,
    pub cart: CartView,
    pub form: CheckoutForm,
    pub error: Option<String>,
}

/// Order confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/confirmation.html")]
pub struct ConfirmationTemplate {
    pub chrome: SiteChrome,
    pub order: OrderView,
}

/// Display the checkout form. An empty cart goes back to the cart page.
#[instrument(skip(cart))]
pub async fn show(cart: SessionCart) -> Response {
    if cart.cart().is_empty() {
        return Redirect::to("/cart").into_response();
    }

    CheckoutTemplate {
        chrome: cart.chrome(),
        cart: CartView::from(cart.cart()),
        form: CheckoutForm::default(),
        error: None,
    }
    .into_response()
}

/// Place the order.
///
/// Invalid details re-render the form with `422 Unprocessable Entity`.
///
/// # Errors
///
/// Returns an error if the order cannot be stored in the session.
#[instrument(skip(cart, form))]
pub async fn submit(mut cart: SessionCart, Form(form): Form<CheckoutForm>) -> Result<Response> {
    if cart.cart().is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    let customer = match Customer::new(form.fields()) {
        Ok(customer) => customer,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected checkout details");
            let template = CheckoutTemplate {
                chrome: cart.chrome(),
                cart: CartView::from(cart.cart()),
                error: Some(capitalize(&e.to_string())),
                form,
            };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response());
        }
    };

    let order = Order::place(cart.cart(), customer)
        .ok_or_else(|| AppError::Internal("cart emptied during checkout".to_string()))?;

    cart.remember_order(&order).await?;
    cart.cart_mut().clear();
    cart.save().await;

    tracing::info!(
        order_number = %order.number,
        item_count = order.item_count,
        subtotal = %order.subtotal,
        "Order placed"
    );
    add_breadcrumb("checkout", "Order placed", Some(&[("order_number", order.number.as_str())]));

    Ok(Redirect::to("/order-confirmation").into_response())
}

/// Show the most recently placed order, or send the visitor to the shop.
#[instrument(skip(cart))]
pub async fn confirmation(cart: SessionCart) -> Response {
    match cart.last_order().await {
        Some(order) => ConfirmationTemplate {
            chrome: cart.chrome(),
            order: OrderView::from(&order),
        }
        .into_response(),
        None => Redirect::to("/shop").into_response(),
    }
}

/// Uppercase the first letter of a validation message for display.
pub(crate) fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

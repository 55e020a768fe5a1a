//! End-to-end tests for the storefront router.
//!
//! Each test builds its own router and session store, so visitors never
//! share state across tests.

#![allow(clippy::unwrap_used)]

use axum::http::{StatusCode, header};
use oakline_integration_tests::{Visitor, test_app, test_config};
use secrecy::SecretString;

const RECENTLY_VIEWED_COOKIE: &str = "oak_kv_recently_viewed";

fn visitor() -> Visitor {
    Visitor::new(test_app(test_config()))
}

/// The part of a page after the recently viewed heading.
fn recently_viewed_section(body: &str) -> Option<&str> {
    body.find("<h2>Recently viewed</h2>").map(|i| &body[i..])
}

// =============================================================================
// Pages
// =============================================================================

#[tokio::test]
async fn test_health() {
    let mut visitor = visitor();
    let response = visitor.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "ok");
}

#[tokio::test]
async fn test_home_shows_featured_products() {
    let mut visitor = visitor();
    let response = visitor.get("/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("From the shop"));
    assert!(response.body.contains("Arden Three-Seat Sofa"));
    assert!(response.body.contains("Fenn Wool Rug"));
    assert!(!response.body.contains("cart-count"));
}

#[tokio::test]
async fn test_pages_carry_security_headers_and_request_id() {
    let mut visitor = visitor();
    let response = visitor.get("/").await;

    assert_eq!(response.headers.get(header::X_FRAME_OPTIONS).unwrap(), "DENY");
    assert_eq!(
        response.headers.get(header::CACHE_CONTROL).unwrap(),
        "no-store, max-age=0"
    );
    assert!(response.headers.get("x-request-id").is_some());
}

#[tokio::test]
async fn test_content_pages() {
    let mut visitor = visitor();

    let about = visitor.get("/about").await;
    assert_eq!(about.status, StatusCode::OK);
    assert!(about.body.contains("About the Studio"));

    let shipping = visitor.get("/pages/shipping").await;
    assert_eq!(shipping.status, StatusCode::OK);

    let missing = visitor.get("/pages/does-not-exist").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_services_link_to_connect_form() {
    let mut visitor = visitor();
    let response = visitor.get("/services").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Room Styling"));
    assert!(response.body.contains("/connect?project=room-styling"));
}

#[tokio::test]
async fn test_gallery() {
    let mut visitor = visitor();
    let response = visitor.get("/gallery").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Living Rooms"));
}

#[tokio::test]
async fn test_static_stylesheet_is_served() {
    let mut visitor = visitor();
    let response = visitor.get("/static/css/site.css").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(
        response
            .headers
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("text/css")
    );
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let mut visitor = visitor();
    assert_eq!(visitor.get("/no-such-page").await.status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Shop
// =============================================================================

#[tokio::test]
async fn test_shop_lists_every_product() {
    let mut visitor = visitor();
    let response = visitor.get("/shop").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("All pieces"));
    assert!(response.body.contains("Arden Three-Seat Sofa"));
    assert!(response.body.contains("Rowan Arched Mirror"));
    assert!(response.body.contains("Sold out"));
}

#[tokio::test]
async fn test_shop_category_filter() {
    let mut visitor = visitor();
    let response = visitor.get("/shop?category=lighting").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Orla Floor Lamp"));
    assert!(response.body.contains("Cove Pendant"));
    assert!(!response.body.contains("Arden Three-Seat Sofa"));

    let unknown = visitor.get("/shop?category=boats").await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_product_page() {
    let mut visitor = visitor();
    let response = visitor.get("/shop/4").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Marlow Dining Table"));
    assert!(response.body.contains("$2150.00"));
    assert!(response.body.contains(r#"action="/cart/add""#));
    assert!(response.body.contains("You might also like"));
}

#[tokio::test]
async fn test_out_of_stock_product_has_no_add_form() {
    let mut visitor = visitor();
    let response = visitor.get("/shop/3").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Sold out"));
    assert!(!response.body.contains(r#"action="/cart/add""#));
}

#[tokio::test]
async fn test_unknown_product() {
    let mut visitor = visitor();
    assert_eq!(visitor.get("/shop/999").await.status, StatusCode::NOT_FOUND);
    assert_eq!(visitor.get("/shop/abc").await.status, StatusCode::BAD_REQUEST);
    assert!(visitor.cookie(RECENTLY_VIEWED_COOKIE).is_none());
}

// =============================================================================
// Recently viewed
// =============================================================================

#[tokio::test]
async fn test_product_views_are_remembered_most_recent_first() {
    let mut visitor = visitor();

    visitor.get("/shop/5").await;
    assert_eq!(visitor.cookie(RECENTLY_VIEWED_COOKIE), Some("%5B5%5D"));

    visitor.get("/shop/7").await;
    visitor.get("/shop/5").await;
    assert_eq!(visitor.cookie(RECENTLY_VIEWED_COOKIE), Some("%5B5%2C7%5D"));

    let shop = visitor.get("/shop").await;
    let shelf = recently_viewed_section(&shop.body).unwrap();
    let pike = shelf.find("Pike Side Table").unwrap();
    let alder = shelf.find("Alder Bookcase").unwrap();
    assert!(pike < alder);
}

#[tokio::test]
async fn test_product_page_shelf_leaves_out_current_product() {
    let mut visitor = visitor();
    visitor.get("/shop/5").await;

    let response = visitor.get("/shop/7").await;
    let shelf = recently_viewed_section(&response.body).unwrap();
    assert!(shelf.contains("Pike Side Table"));
    assert!(!shelf.contains("Alder Bookcase"));
}

#[tokio::test]
async fn test_first_view_has_no_shelf() {
    let mut visitor = visitor();
    let response = visitor.get("/shop/5").await;
    assert!(recently_viewed_section(&response.body).is_none());
}

#[tokio::test]
async fn test_browsing_the_grid_does_not_touch_history() {
    let mut visitor = visitor();
    let response = visitor.get("/shop").await;

    assert!(
        !response
            .set_cookies()
            .iter()
            .any(|c| c.starts_with(RECENTLY_VIEWED_COOKIE))
    );
}

#[tokio::test]
async fn test_history_is_capped() {
    let mut config = test_config();
    config.recently_viewed_limit = 3;
    let mut visitor = Visitor::new(test_app(config));

    for id in 1..=5 {
        visitor.get(&format!("/shop/{id}")).await;
    }

    assert_eq!(
        visitor.cookie(RECENTLY_VIEWED_COOKIE),
        Some("%5B5%2C4%2C3%5D")
    );
}

#[tokio::test]
async fn test_corrupt_history_cookie_starts_over() {
    let mut visitor = visitor();
    visitor.set_cookie(RECENTLY_VIEWED_COOKIE, "not-json");

    let shop = visitor.get("/shop").await;
    assert_eq!(shop.status, StatusCode::OK);
    assert!(recently_viewed_section(&shop.body).is_none());

    visitor.get("/shop/2").await;
    assert_eq!(visitor.cookie(RECENTLY_VIEWED_COOKIE), Some("%5B2%5D"));
}

// =============================================================================
// Cart
// =============================================================================

#[tokio::test]
async fn test_add_to_cart_redirects_and_merges_lines() {
    let mut visitor = visitor();

    let response = visitor
        .post_form("/cart/add", &[("product_id", "4"), ("quantity", "2")])
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/cart"));

    visitor.post_form("/cart/add", &[("product_id", "4")]).await;

    let cart = visitor.get("/cart").await;
    assert_eq!(cart.status, StatusCode::OK);
    assert!(cart.body.contains("Marlow Dining Table"));
    assert!(cart.body.contains(r#"<span class="cart-count">3</span>"#));
    assert!(cart.body.contains("$6450.00"));
    assert_eq!(cart.body.matches(r#"action="/cart/remove""#).count(), 1);
}

#[tokio::test]
async fn test_cart_count_shows_on_every_page() {
    let mut visitor = visitor();
    visitor
        .post_form("/cart/add", &[("product_id", "12"), ("quantity", "2")])
        .await;

    for path in ["/", "/about", "/shop", "/connect"] {
        let response = visitor.get(path).await;
        assert!(
            response.body.contains(r#"<span class="cart-count">2</span>"#),
            "{path} is missing the cart count"
        );
    }

    let product = visitor.get("/shop/12").await;
    assert!(product.body.contains("2 in your"));
}

#[tokio::test]
async fn test_cart_ignores_invalid_adds() {
    let mut visitor = visitor();

    // Out of stock, unknown and non-positive quantities
    visitor.post_form("/cart/add", &[("product_id", "3")]).await;
    visitor.post_form("/cart/add", &[("product_id", "999")]).await;
    visitor
        .post_form("/cart/add", &[("product_id", "5"), ("quantity", "0")])
        .await;
    visitor
        .post_form("/cart/add", &[("product_id", "5"), ("quantity", "-2")])
        .await;

    let cart = visitor.get("/cart").await;
    assert!(cart.body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_update_quantity() {
    let mut visitor = visitor();
    visitor.post_form("/cart/add", &[("product_id", "11")]).await;

    let response = visitor
        .post_form("/cart/update", &[("product_id", "11"), ("quantity", "4")])
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let cart = visitor.get("/cart").await;
    assert!(cart.body.contains(r#"<span class="cart-count">4</span>"#));
    assert!(cart.body.contains("$580.00"));

    visitor
        .post_form("/cart/update", &[("product_id", "11"), ("quantity", "0")])
        .await;
    let cart = visitor.get("/cart").await;
    assert!(cart.body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_blank_or_malformed_cart_fields_are_ignored() {
    let mut visitor = visitor();
    visitor
        .post_form("/cart/add", &[("product_id", "11"), ("quantity", "2")])
        .await;

    for quantity in ["", "abc", "1.5"] {
        let response = visitor
            .post_form("/cart/update", &[("product_id", "11"), ("quantity", quantity)])
            .await;
        assert_eq!(response.status, StatusCode::SEE_OTHER, "update {quantity:?}");
        assert_eq!(response.location(), Some("/cart"));
    }
    for quantity in ["abc", "1.5"] {
        let response = visitor
            .post_form("/cart/add", &[("product_id", "11"), ("quantity", quantity)])
            .await;
        assert_eq!(response.status, StatusCode::SEE_OTHER, "add {quantity:?}");
    }
    let response = visitor
        .post_form("/cart/remove", &[("product_id", "")])
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let cart = visitor.get("/cart").await;
    assert!(cart.body.contains(r#"<span class="cart-count">2</span>"#));
    assert!(cart.body.contains("$290.00"));

    // A cleared quantity field on the product page adds one
    let response = visitor
        .post_form("/cart/add", &[("product_id", "11"), ("quantity", "")])
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    let cart = visitor.get("/cart").await;
    assert!(cart.body.contains(r#"<span class="cart-count">3</span>"#));
}

#[tokio::test]
async fn test_remove_and_clear() {
    let mut visitor = visitor();
    visitor.post_form("/cart/add", &[("product_id", "8")]).await;
    visitor.post_form("/cart/add", &[("product_id", "9")]).await;

    visitor.post_form("/cart/remove", &[("product_id", "8")]).await;
    let cart = visitor.get("/cart").await;
    assert!(!cart.body.contains("Orla Floor Lamp"));
    assert!(cart.body.contains("Cove Pendant"));

    let response = visitor.post_form("/cart/clear", &[]).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    let cart = visitor.get("/cart").await;
    assert!(cart.body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_carts_are_per_visitor() {
    let app = test_app(test_config());
    let mut alice = Visitor::new(app.clone());
    let mut bob = Visitor::new(app).with_ip("198.51.100.20");

    alice.post_form("/cart/add", &[("product_id", "6")]).await;

    assert!(alice.get("/cart").await.body.contains("Linden Sideboard"));
    assert!(bob.get("/cart").await.body.contains("Your cart is empty"));
}

// =============================================================================
// Checkout
// =============================================================================

fn delivery_details(name: &'static str) -> Vec<(&'static str, &'static str)> {
    vec![
        ("name", name),
        ("email", "Ada@Example.com"),
        ("phone", ""),
        ("address", "12 Alder Lane"),
        ("city", "Portland"),
        ("postcode", "97201"),
        ("notes", "Leave with the concierge"),
    ]
}

#[tokio::test]
async fn test_checkout_with_empty_cart_goes_back_to_cart() {
    let mut visitor = visitor();

    let response = visitor.get("/checkout").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/cart"));

    let response = visitor.post_form("/checkout", &delivery_details("Ada Park")).await;
    assert_eq!(response.location(), Some("/cart"));
}

#[tokio::test]
async fn test_checkout_rejects_missing_details() {
    let mut visitor = visitor();
    visitor.post_form("/cart/add", &[("product_id", "11")]).await;

    let response = visitor.post_form("/checkout", &delivery_details("  ")).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body.contains("Name is required"));
    assert!(response.body.contains(r#"value="12 Alder Lane""#));

    // Cart is untouched
    let cart = visitor.get("/cart").await;
    assert!(cart.body.contains("Moss Linen Throw"));
}

#[tokio::test]
async fn test_checkout_places_order_and_clears_cart() {
    let mut visitor = visitor();
    visitor
        .post_form("/cart/add", &[("product_id", "11"), ("quantity", "2")])
        .await;

    let form = visitor.get("/checkout").await;
    assert_eq!(form.status, StatusCode::OK);
    assert!(form.body.contains("$290.00"));

    let response = visitor.post_form("/checkout", &delivery_details("Ada Park")).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/order-confirmation"));

    let confirmation = visitor.get("/order-confirmation").await;
    assert_eq!(confirmation.status, StatusCode::OK);
    assert!(confirmation.body.contains("Thank you, Ada Park"));
    assert!(confirmation.body.contains("OAK-"));
    assert!(confirmation.body.contains("ada@example.com"));
    assert!(confirmation.body.contains("Moss Linen Throw"));
    assert!(confirmation.body.contains("$290.00"));
    assert!(!confirmation.body.contains("cart-count"));

    let cart = visitor.get("/cart").await;
    assert!(cart.body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_confirmation_without_order_goes_to_shop() {
    let mut visitor = visitor();
    let response = visitor.get("/order-confirmation").await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/shop"));
}

// =============================================================================
// Connect
// =============================================================================

fn inquiry(email: &'static str) -> Vec<(&'static str, &'static str)> {
    vec![
        ("name", "Ada Park"),
        ("email", email),
        ("phone", "503-555-0199"),
        ("project", "room-styling"),
        ("message", "We'd like help with a north-facing living room."),
    ]
}

#[tokio::test]
async fn test_connect_preselects_project() {
    let mut visitor = visitor();
    let response = visitor.get("/connect?project=room-styling").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains(r#"<option value="room-styling" selected>"#));
}

#[tokio::test]
async fn test_connect_rejects_invalid_email() {
    let mut visitor = visitor();
    let response = visitor.post_form("/connect", &inquiry("ada-at-example")).await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body.contains("Please enter a valid email address"));
    assert!(response.body.contains(r#"value="Ada Park""#));
}

#[tokio::test]
async fn test_connect_without_webhook_logs_and_thanks() {
    let mut visitor = visitor();
    let response = visitor.post_form("/connect", &inquiry("ada@example.com")).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Thanks, Ada Park"));
    assert!(response.body.contains("ada@example.com"));
}

#[tokio::test]
async fn test_connect_delivery_failure_keeps_the_form() {
    let mut config = test_config();
    // Nothing listens on the discard port
    config.inquiry_webhook_url = Some(SecretString::from("http://127.0.0.1:9/inquiries"));
    let mut visitor = Visitor::new(test_app(config));

    let response = visitor.post_form("/connect", &inquiry("ada@example.com")).await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert!(response.body.contains("Please try again in a few minutes"));
    assert!(response.body.contains(r#"value="Ada Park""#));
}

#[tokio::test]
async fn test_connect_is_rate_limited() {
    let mut visitor = Visitor::new(test_app(test_config())).with_ip("192.0.2.77");

    for _ in 0..5 {
        let response = visitor.post_form("/connect", &inquiry("not-an-email")).await;
        assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    let response = visitor.post_form("/connect", &inquiry("not-an-email")).await;
    assert_eq!(response.status, StatusCode::TOO_MANY_REQUESTS);

    // Reading the form is not limited
    assert_eq!(visitor.get("/connect").await.status, StatusCode::OK);
}

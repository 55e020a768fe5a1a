//! Shop route handlers: the product grid and product detail pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use oakline_core::{Category, Product, ProductId};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{SessionCart, ViewHistory};
use crate::models::SiteChrome;
use crate::state::AppState;

/// Number of related products shown on a detail page.
const RELATED_LIMIT: usize = 4;

/// Product display data for grids and shelves.
#[derive(Clone)]
pub struct ProductCard {
    pub id: i32,
    pub name: String,
    pub price: String,
    pub image: String,
    pub category: &'static str,
    pub in_stock: bool,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            price: product.price.to_string(),
            image: product.image.clone(),
            category: product.category.label(),
            in_stock: product.in_stock,
        }
    }
}

/// Convert catalog products into cards.
pub fn cards<'a>(products: impl IntoIterator<Item = &'a Product>) -> Vec<ProductCard> {
    products.into_iter().map(ProductCard::from).collect()
}

/// Category filter link.
pub struct CategoryLink {
    pub slug: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Shop query parameters.
#[derive(Debug, Deserialize)]
pub struct ShopQuery {
    pub category: Option<String>,
}

/// Shop grid template.
#[derive(Template, WebTemplate)]
#[template(path = "shop/index.html")]
pub struct ShopIndexTemplate {
    pub chrome: SiteChrome,
    pub categories: Vec<CategoryLink>,
    pub heading: &'static str,
    pub products: Vec<ProductCard>,
    pub recently_viewed: Vec<ProductCard>,
}

/// Product detail template.
#[derive(Template, WebTemplate)]
#[template(path = "shop/show.html")]
pub struct ProductShowTemplate {
    pub chrome: SiteChrome,
    pub product: ProductCard,
    pub description: String,
    pub category_slug: &'static str,
    pub in_cart: u32,
    pub related: Vec<ProductCard>,
    pub recently_viewed: Vec<ProductCard>,
}

/// Display the product grid, optionally filtered by category.
///
/// # Errors
///
/// Returns 404 for an unknown category slug.
#[instrument(skip(state, cart, history))]
pub async fn index(
    State(state): State<AppState>,
    cart: SessionCart,
    history: ViewHistory,
    Query(query): Query<ShopQuery>,
) -> Result<impl IntoResponse> {
    let selected = match query.category.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(slug) => Some(
            Category::from_slug(slug)
                .ok_or_else(|| AppError::NotFound(format!("category {slug}")))?,
        ),
    };

    let catalog = state.catalog();
    let products = match selected {
        Some(category) => cards(catalog.by_category(category)),
        None => cards(catalog.products()),
    };

    let categories = Category::ALL
        .into_iter()
        .map(|category| CategoryLink {
            slug: category.slug(),
            label: category.label(),
            active: selected == Some(category),
        })
        .collect();

    Ok(ShopIndexTemplate {
        chrome: cart.chrome(),
        categories,
        heading: selected.map_or("All pieces", Category::label),
        products,
        recently_viewed: cards(history.products(catalog, None)),
    })
}

/// Display a product and record the view.
///
/// The recently viewed shelf leaves out the product being shown.
///
/// # Errors
///
/// Returns 404 if the product doesn't exist.
#[instrument(skip(state, cart, history, id), fields(product_id = %id))]
pub async fn show(
    State(state): State<AppState>,
    cart: SessionCart,
    mut history: ViewHistory,
    Path(id): Path<ProductId>,
) -> Result<impl IntoResponse> {
    let catalog = state.catalog();
    let product = catalog
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    history.record_view(id);

    let template = ProductShowTemplate {
        chrome: cart.chrome(),
        product: ProductCard::from(product),
        description: product.description.clone(),
        category_slug: product.category.slug(),
        in_cart: cart.cart().line(id).map_or(0, |line| line.quantity()),
        related: cards(catalog.related(id, RELATED_LIMIT)),
        recently_viewed: cards(history.products(catalog, Some(id))),
    };

    Ok((history, template))
}

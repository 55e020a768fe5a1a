//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::filters;
use crate::middleware::SessionCart;
use crate::models::SiteChrome;
use crate::routes::services::{SERVICES, Service};
use crate::routes::shop::{ProductCard, cards};
use crate::state::AppState;

// =============================================================================
// Hero
// =============================================================================

/// A single hero panel.
pub struct HeroSlide {
    pub eyebrow: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub button_text: &'static str,
    pub button_url: &'static str,
    pub image_path: &'static str,
    pub image_alt: &'static str,
}

pub const HERO_SLIDES: &[HeroSlide] = &[
    HeroSlide {
        eyebrow: "Interior design studio",
        title: "Rooms that feel like yours",
        subtitle: "Warm, considered interiors built around natural materials.",
        button_text: "Start a project",
        button_url: "/connect",
        image_path: "/static/images/hero/living-room.jpg",
        image_alt: "Sunlit living room with an oak sideboard and linen sofa",
    },
    HeroSlide {
        eyebrow: "The shop",
        title: "Furniture we'd keep ourselves",
        subtitle: "Solid timber, natural fibres and small-batch ceramics.",
        button_text: "Browse the shop",
        button_url: "/shop",
        image_path: "/static/images/hero/dining.jpg",
        image_alt: "White oak dining table beneath an opal glass pendant",
    },
];

/// Number of service teasers on the home page.
const SERVICE_TEASERS: usize = 3;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub chrome: SiteChrome,
    pub slides: &'static [HeroSlide],
    pub featured: Vec<ProductCard>,
    pub services: &'static [Service],
}

/// Display the home page.
#[instrument(skip(state, cart))]
pub async fn home(State(state): State<AppState>, cart: SessionCart) -> impl IntoResponse {
    HomeTemplate {
        chrome: cart.chrome(),
        slides: HERO_SLIDES,
        featured: cards(state.catalog().featured()),
        services: SERVICES.get(..SERVICE_TEASERS).unwrap_or(SERVICES),
    }
}

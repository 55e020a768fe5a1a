//! Design services page.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use oakline_core::ProjectKind;
use tracing::instrument;

use crate::filters;
use crate::middleware::SessionCart;
use crate::models::SiteChrome;

/// A design service offered by the studio.
pub struct Service {
    pub kind: ProjectKind,
    pub title: &'static str,
    pub summary: &'static str,
    pub includes: &'static [&'static str],
    pub starting_at: &'static str,
}

/// Every service, in page order.
pub const SERVICES: &[Service] = &[
    Service {
        kind: ProjectKind::FullHomeDesign,
        title: "Full Home Design",
        summary: "From floor plans to the last cushion, we shape every room around how you live.",
        includes: &[
            "Space planning and layout",
            "Material, finish and colour palettes",
            "Furniture sourcing and custom pieces",
            "Installation day styling",
        ],
        starting_at: "From $12,000",
    },
    Service {
        kind: ProjectKind::RoomStyling,
        title: "Room Styling",
        summary: "A single room, finished properly. Ideal for living rooms, bedrooms and studies.",
        includes: &[
            "Mood board and shopping list",
            "Two rounds of revisions",
            "Placement plan for art and lighting",
        ],
        starting_at: "From $2,400",
    },
    Service {
        kind: ProjectKind::CustomFurniture,
        title: "Custom Furniture",
        summary: "Pieces drawn in the studio and built by our workshop partners in solid hardwood.",
        includes: &[
            "Measured drawings",
            "Timber and upholstery samples",
            "White-glove delivery",
        ],
        starting_at: "Quoted per piece",
    },
    Service {
        kind: ProjectKind::Consultation,
        title: "Design Consultation",
        summary: "Two hours with a designer, at your home or over video, to unblock a project.",
        includes: &["Walkthrough and recommendations", "Follow-up notes within a week"],
        starting_at: "$350",
    },
];

/// Services page template.
#[derive(Template, WebTemplate)]
#[template(path = "services.html")]
pub struct ServicesTemplate {
    pub chrome: SiteChrome,
    pub services: &'static [Service],
}

/// Display the services page.
#[instrument(skip(cart))]
pub async fn index(cart: SessionCart) -> impl IntoResponse {
    ServicesTemplate {
        chrome: cart.chrome(),
        services: SERVICES,
    }
}

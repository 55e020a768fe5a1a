//! Project gallery, grouped by room.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::filters;
use crate::middleware::SessionCart;
use crate::models::SiteChrome;

/// One photograph.
pub struct GalleryImage {
    pub file: &'static str,
    pub alt: &'static str,
    pub caption: &'static str,
}

/// A room and its photographs.
pub struct Room {
    pub slug: &'static str,
    pub name: &'static str,
    pub images: &'static [GalleryImage],
}

pub const ROOMS: &[Room] = &[
    Room {
        slug: "living",
        name: "Living Rooms",
        images: &[
            GalleryImage {
                file: "gallery/living-alder-st.jpg",
                alt: "Living room with linen sofa and oak shelving",
                caption: "Alder Street, Portland",
            },
            GalleryImage {
                file: "gallery/living-hillside.jpg",
                alt: "Sunken lounge with wool rug and floor lamp",
                caption: "Hillside residence",
            },
        ],
    },
    Room {
        slug: "dining",
        name: "Dining",
        images: &[
            GalleryImage {
                file: "gallery/dining-marlow.jpg",
                alt: "White oak dining table set for six",
                caption: "Marlow table in situ",
            },
            GalleryImage {
                file: "gallery/dining-cove.jpg",
                alt: "Opal glass pendants over a dining nook",
                caption: "Breakfast nook, Lake Oswego",
            },
        ],
    },
    Room {
        slug: "bedroom",
        name: "Bedrooms",
        images: &[GalleryImage {
            file: "gallery/bedroom-attic.jpg",
            alt: "Attic bedroom with sloped ceiling and linen bedding",
            caption: "Attic conversion",
        }],
    },
    Room {
        slug: "study",
        name: "Studies",
        images: &[GalleryImage {
            file: "gallery/study-bookcase.jpg",
            alt: "Study with fluted oak bookcase and reading chair",
            caption: "Library wall",
        }],
    },
];

/// Gallery page template.
#[derive(Template, WebTemplate)]
#[template(path = "gallery.html")]
pub struct GalleryTemplate {
    pub chrome: SiteChrome,
    pub rooms: &'static [Room],
}

/// Display the gallery.
#[instrument(skip(cart))]
pub async fn index(cart: SessionCart) -> impl IntoResponse {
    GalleryTemplate {
        chrome: cart.chrome(),
        rooms: ROOMS,
    }
}

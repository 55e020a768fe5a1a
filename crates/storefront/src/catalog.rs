//! The shop's product table.
//!
//! Products are maintained here by hand and loaded into a
//! [`Catalog`] once at startup.

use oakline_core::{Catalog, Category, CurrencyCode, Price, Product, ProductId};

/// One row of the product table.
struct Row {
    id: i32,
    name: &'static str,
    description: &'static str,
    cents: i64,
    image: &'static str,
    category: Category,
    in_stock: bool,
    featured: bool,
}

const PRODUCTS: &[Row] = &[
    Row {
        id: 1,
        name: "Arden Three-Seat Sofa",
        description: "Kiln-dried oak frame, feather-wrapped cushions and a washed linen slipcover in oat.",
        cents: 289_900,
        image: "shop/arden-sofa.jpg",
        category: Category::Seating,
        in_stock: true,
        featured: true,
    },
    Row {
        id: 2,
        name: "Hollis Lounge Chair",
        description: "A low, deep chair in boucle with a solid walnut base.",
        cents: 124_500,
        image: "shop/hollis-chair.jpg",
        category: Category::Seating,
        in_stock: true,
        featured: false,
    },
    Row {
        id: 3,
        name: "Wren Dining Chair",
        description: "Steam-bent ash with a woven paper-cord seat. Sold individually.",
        cents: 38_500,
        image: "shop/wren-chair.jpg",
        category: Category::Seating,
        in_stock: false,
        featured: false,
    },
    Row {
        id: 4,
        name: "Marlow Dining Table",
        description: "Seats six. Solid white oak top with a hand-rubbed oil finish.",
        cents: 215_000,
        image: "shop/marlow-table.jpg",
        category: Category::Tables,
        in_stock: true,
        featured: true,
    },
    Row {
        id: 5,
        name: "Pike Side Table",
        description: "Travertine top on a blackened steel pedestal.",
        cents: 54_000,
        image: "shop/pike-side-table.jpg",
        category: Category::Tables,
        in_stock: true,
        featured: false,
    },
    Row {
        id: 6,
        name: "Linden Sideboard",
        description: "Four cane-fronted doors with adjustable shelves behind.",
        cents: 189_000,
        image: "shop/linden-sideboard.jpg",
        category: Category::Storage,
        in_stock: true,
        featured: false,
    },
    Row {
        id: 7,
        name: "Alder Bookcase",
        description: "Open oak shelving with a fluted back panel.",
        cents: 98_000,
        image: "shop/alder-bookcase.jpg",
        category: Category::Storage,
        in_stock: true,
        featured: false,
    },
    Row {
        id: 8,
        name: "Orla Floor Lamp",
        description: "Hand-pleated linen shade on a brushed brass stem.",
        cents: 42_000,
        image: "shop/orla-lamp.jpg",
        category: Category::Lighting,
        in_stock: true,
        featured: true,
    },
    Row {
        id: 9,
        name: "Cove Pendant",
        description: "Mouth-blown opal glass. Includes ceiling canopy.",
        cents: 36_000,
        image: "shop/cove-pendant.jpg",
        category: Category::Lighting,
        in_stock: true,
        featured: false,
    },
    Row {
        id: 10,
        name: "Fenn Wool Rug",
        description: "Hand-knotted New Zealand wool, 8 x 10 ft.",
        cents: 165_000,
        image: "shop/fenn-rug.jpg",
        category: Category::Textiles,
        in_stock: true,
        featured: true,
    },
    Row {
        id: 11,
        name: "Moss Linen Throw",
        description: "Stonewashed European linen with a fringed edge.",
        cents: 14_500,
        image: "shop/moss-throw.jpg",
        category: Category::Textiles,
        in_stock: true,
        featured: false,
    },
    Row {
        id: 12,
        name: "Tamsin Vessel",
        description: "Wheel-thrown stoneware with an ash glaze. Each piece varies.",
        cents: 9_500,
        image: "shop/tamsin-vessel.jpg",
        category: Category::Decor,
        in_stock: true,
        featured: false,
    },
    Row {
        id: 13,
        name: "Rowan Arched Mirror",
        description: "Oak-framed arch, 40 in tall. Hangs or leans.",
        cents: 46_500,
        image: "shop/rowan-mirror.jpg",
        category: Category::Decor,
        in_stock: false,
        featured: false,
    },
];

/// Build the shop catalog from the product table.
#[must_use]
pub fn seed_catalog() -> Catalog {
    Catalog::new(
        PRODUCTS
            .iter()
            .map(|row| Product {
                id: ProductId::new(row.id),
                name: row.name.to_string(),
                description: row.description.to_string(),
                price: Price::from_cents(row.cents, CurrencyCode::USD),
                image: format!("/static/images/{}", row.image),
                category: row.category,
                in_stock: row.in_stock,
                featured: row.featured,
            })
            .collect(),
    )
}

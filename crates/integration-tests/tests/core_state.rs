//! Cart and recently viewed behaviour through the public core API.

#![allow(clippy::unwrap_used)]

use oakline_core::recently_viewed::STORAGE_KEY;
use oakline_core::{
    Cart, Catalog, Category, CurrencyCode, Customer, CustomerFields, KeyValueStore, MemoryStore,
    Order, Price, Product, ProductId, RecentlyViewed,
};
use oakline_storefront::catalog::seed_catalog;

fn product(id: i32, dollars: i64) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        description: String::new(),
        price: Price::from_cents(dollars * 100, CurrencyCode::USD),
        image: String::new(),
        category: Category::Decor,
        in_stock: true,
        featured: false,
    }
}

fn ids(viewed: &RecentlyViewed<impl KeyValueStore>) -> Vec<i32> {
    viewed.ids().iter().map(ProductId::as_i32).collect()
}

// =============================================================================
// Cart
// =============================================================================

#[test]
fn test_repeated_adds_merge_into_one_line() {
    let vase = product(1, 40);
    let mut cart = Cart::new();
    cart.add_item(&vase, 1);
    cart.add_item(&vase, 3);
    cart.add_item(&vase, -1);

    assert_eq!(cart.len(), 1);
    assert_eq!(cart.item_count(), 4);
}

#[test]
fn test_zero_quantity_update_equals_remove() {
    let a = product(1, 10);
    let b = product(2, 20);

    let mut updated = Cart::new();
    updated.add_item(&a, 2);
    updated.add_item(&b, 1);
    updated.update_quantity(a.id, 0);

    let mut removed = Cart::new();
    removed.add_item(&a, 2);
    removed.add_item(&b, 1);
    removed.remove_item(a.id);

    assert_eq!(updated, removed);
}

#[test]
fn test_clear_resets_totals() {
    let mut cart = Cart::new();
    cart.add_item(&product(1, 10), 5);
    cart.clear();

    assert!(cart.is_empty());
    assert_eq!(cart.item_count(), 0);
    assert!(cart.subtotal().is_zero());
}

#[test]
fn test_subtotal() {
    let mut cart = Cart::new();
    cart.add_item(&product(1, 100), 2);
    cart.add_item(&product(2, 250), 1);

    assert_eq!(cart.subtotal(), Price::from_cents(45_000, CurrencyCode::USD));
    assert_eq!(cart.subtotal().to_string(), "$450.00");
}

#[test]
fn test_cart_survives_session_serialization() {
    let catalog = seed_catalog();
    let mut cart = Cart::new();
    cart.add_item(catalog.get(ProductId::new(4)).unwrap(), 2);
    cart.add_item(catalog.get(ProductId::new(11)).unwrap(), 1);

    let json = serde_json::to_string(&cart).unwrap();
    let restored: Cart = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, cart);
    assert_eq!(restored.subtotal().to_string(), "$4445.00");
}

#[test]
fn test_reconcile_drops_discontinued_products() {
    let mut cart = Cart::new();
    cart.add_item(&product(1, 10), 1);
    cart.add_item(&product(2, 20), 1);

    let catalog = Catalog::new(vec![product(2, 25)]);
    let dropped = cart.reconcile(&catalog);

    assert_eq!(dropped, vec![ProductId::new(1)]);
    assert_eq!(cart.subtotal().to_string(), "$25.00");
}

// =============================================================================
// Recently viewed
// =============================================================================

#[test]
fn test_revisit_moves_to_front() {
    let mut viewed = RecentlyViewed::load(MemoryStore::new(), 20);
    for id in [5, 7, 5] {
        viewed.record_view(ProductId::new(id));
    }
    assert_eq!(ids(&viewed), vec![5, 7]);
}

#[test]
fn test_capacity_evicts_oldest() {
    let mut viewed = RecentlyViewed::load(MemoryStore::new(), 3);
    for id in 1..=4 {
        viewed.record_view(ProductId::new(id));
    }
    assert_eq!(ids(&viewed), vec![4, 3, 2]);
}

#[test]
fn test_history_survives_reload() {
    let mut store = MemoryStore::new();
    {
        let mut viewed = RecentlyViewed::load(&mut store, 20);
        viewed.record_view(ProductId::new(9));
        viewed.record_view(ProductId::new(2));
    }

    assert_eq!(store.get(STORAGE_KEY).unwrap().as_deref(), Some("[2,9]"));
    let viewed = RecentlyViewed::load(store, 20);
    assert_eq!(ids(&viewed), vec![2, 9]);
}

#[test]
fn test_viewed_products_skip_missing_ids() {
    let catalog = seed_catalog();
    let store: MemoryStore = [(STORAGE_KEY.to_string(), "[8,404,1]".to_string())]
        .into_iter()
        .collect();

    let viewed = RecentlyViewed::load(store, 20);
    let names: Vec<_> = viewed
        .viewed_products(&catalog)
        .into_iter()
        .map(|p| p.name.as_str())
        .collect();

    assert_eq!(names, vec!["Orla Floor Lamp", "Arden Three-Seat Sofa"]);
}

// =============================================================================
// Orders
// =============================================================================

#[test]
fn test_order_snapshots_cart() {
    let mut cart = Cart::new();
    cart.add_item(&product(1, 100), 2);

    let customer = Customer::new(CustomerFields {
        name: "Ada Park",
        email: "ada@example.com",
        address: "12 Alder Lane",
        city: "Portland",
        postcode: "97201",
        ..CustomerFields::default()
    })
    .unwrap();

    let order = Order::place(&cart, customer).unwrap();
    cart.clear();

    assert_eq!(order.lines.len(), 1);
    assert_eq!(order.item_count, 2);
    assert_eq!(order.subtotal.to_string(), "$200.00");
    assert!(Order::place(&cart, order.customer.clone()).is_none());
}

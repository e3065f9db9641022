//! The cart page end to end: session, markup binder and a shared store.

use storefront_commerce::prelude::*;
use storefront_observability::StructuredLogger;
use storefront_store::MemoryStore;
use storefront_ui::shop::{add_to_cart, AddToCartButton, ProductAttributes};
use storefront_ui::{CartControl, ControlAction, MarkupBinder, NoticeBoard, Page};

fn open(store: &MemoryStore, page: Page) -> CartSession<MemoryStore, MarkupBinder> {
    CartSession::open(
        CartConfig::default(),
        store.clone(),
        MarkupBinder::for_page(page, NoticeBoard::default()),
        StructuredLogger::disabled(),
    )
    .unwrap()
}

fn product(id: &str, name: &str, price: &str, category: &str) -> ProductAttributes {
    ProductAttributes::from_attrs(
        Some(id.to_string()),
        Some(name.to_string()),
        Some(price.to_string()),
        Some(format!("{}.jpg", id)),
        Some(category.to_string()),
    )
    .unwrap()
}

#[test]
fn test_shop_adds_show_up_on_cart_page() {
    let store = MemoryStore::new();

    let mut shop = open(&store, Page::Shop);
    let mut button = AddToCartButton::new("Add to Cart");
    let boots = product("boots", "Safety Boots", "120", "primary");
    add_to_cart(&mut shop, &boots, &mut button).unwrap();
    add_to_cart(&mut shop, &boots, &mut button).unwrap();
    add_to_cart(&mut shop, &product("boots", "Trail Shoes", "60", "secondary"), &mut button)
        .unwrap();

    assert_eq!(button.label(), "Added (1)");
    assert_eq!(shop.binder().content(".cart-count"), Some("3"));
    assert_eq!(shop.binder().content("#cartItemsContainer"), None);

    let cart = open(&store, Page::Cart);
    let binder = cart.binder();
    let items = binder.content("#cartItemsContainer").unwrap();
    assert!(items.contains("Your Items (3)"));
    assert!(items.contains(r#"data-product-id="boots" data-category="primary""#));
    assert!(items.contains(r#"data-product-id="boots" data-category="secondary""#));
    assert_eq!(binder.content("#subtotal"), Some("$300.00"));
    assert_eq!(binder.content("#shipping"), Some("$0.00"));
    assert_eq!(binder.content("#tax"), Some("$24.00"));
    assert_eq!(binder.content("#total"), Some("$324.00"));
}

#[test]
fn test_cart_page_controls() {
    let store = MemoryStore::new();
    let mut cart = open(&store, Page::Cart);
    let vest = ItemId::new("vest");
    cart.add_to_cart(Category::Primary, vest.clone(), "Vest", "40", "v.jpg")
        .unwrap();

    cart.increment(Category::Primary, &vest).unwrap();
    cart.apply_promotion("save10");
    assert_eq!(cart.binder().content("#discount"), Some("-$8.00"));
    assert_eq!(cart.binder().content("#total"), Some("$88.39"));

    cart.decrement(Category::Primary, &vest).unwrap();
    cart.decrement(Category::Primary, &vest).unwrap();
    assert_eq!(cart.binder().content("#itemCount"), Some("1"));

    cart.remove_from_cart(Category::Primary, &vest).unwrap();
    let binder = cart.binder();
    assert!(binder
        .content("#cartItemsContainer")
        .is_some_and(|html| html.contains("Your cart is empty")));
    assert_eq!(binder.content(".mobile-cart-count"), Some("0"));
    assert_eq!(binder.content("#total"), Some("$9.99"));
    assert_eq!(
        binder.notice().map(|n| n.message.as_str()),
        Some("Removed <strong>Vest</strong> from cart")
    );
}

/// `(class, data-product-id, data-category)` of every rendered button.
fn rendered_buttons(html: &str) -> Vec<(String, String, String)> {
    let attr = |tag: &str, name: &str| -> String {
        let start = tag.find(&format!("{}=\"", name)).map(|i| i + name.len() + 2);
        start
            .and_then(|i| tag[i..].find('"').map(|end| tag[i..i + end].to_string()))
            .unwrap_or_default()
    };
    html.split("<button")
        .skip(1)
        .map(|rest| {
            let tag = &rest[..rest.find('>').unwrap()];
            (attr(tag, "class"), attr(tag, "data-product-id"), attr(tag, "data-category"))
        })
        .collect()
}

#[test]
fn test_rendered_buttons_resolve_to_controls() {
    let store = MemoryStore::new();
    let mut cart = open(&store, Page::Cart);
    let mut button = AddToCartButton::new("Add to Cart");
    add_to_cart(&mut cart, &product("k1", "Knee Pads", "30", "primary"), &mut button).unwrap();
    add_to_cart(&mut cart, &product("k1", "Kneeling Mat", "15", "secondary"), &mut button).unwrap();

    let html = cart.binder().content("#cartItemsContainer").unwrap().to_string();
    let controls: Vec<CartControl> = rendered_buttons(&html)
        .iter()
        .filter_map(|(class, id, category)| {
            CartControl::from_element_attrs(class, Some(id), Some(category))
        })
        .collect();
    // minus, plus and remove for each of the two rows
    assert_eq!(controls.len(), 6);

    let plus_secondary = controls
        .iter()
        .find(|c| c.action == ControlAction::Increment && c.category == Category::Secondary)
        .unwrap();
    plus_secondary.apply(&mut cart).unwrap();
    assert_eq!(cart.ledger(Category::Secondary).quantity_of(&ItemId::new("k1")), Some(2));
    assert_eq!(cart.ledger(Category::Primary).quantity_of(&ItemId::new("k1")), Some(1));
    assert_eq!(cart.binder().content(".cart-count"), Some("3"));

    let remove_primary = controls
        .iter()
        .find(|c| c.action == ControlAction::Remove && c.category == Category::Primary)
        .unwrap();
    remove_primary.apply(&mut cart).unwrap();
    let html = cart.binder().content("#cartItemsContainer").unwrap();
    assert!(!html.contains("Knee Pads"));
    assert!(html.contains("Kneeling Mat"));
    assert_eq!(cart.binder().notice().unwrap().message, "Removed <strong>Knee Pads</strong> from cart");
}

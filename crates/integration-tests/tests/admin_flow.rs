//! End-to-end admin scenarios: catalog management and order handling.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use rust_decimal::Decimal;
use velora_admin::{AdminConsole, ProductForm};
use velora_core::{CartLine, status};
use velora_feed::mirror::{ALL_CATEGORIES, CatalogMirror, OrderMirror};
use velora_integration_tests::TestShop;
use velora_storefront::checkout::{CheckoutRequest, ShippingForm};
use velora_storefront::Cart;

fn tee_form() -> ProductForm {
    ProductForm {
        name: "Tee".to_owned(),
        price: "100".to_owned(),
        image: "https://img.example/tee.jpg".to_owned(),
        category: "Summer".to_owned(),
        sizes: "S, M, L".to_owned(),
        colors: vec![],
    }
}

#[tokio::test]
async fn test_created_product_propagates_to_catalog_mirror() {
    let shop = TestShop::new();
    let mut console = AdminConsole::new(shop.products(), shop.orders())
        .await
        .unwrap();

    let mut mirror = CatalogMirror::new(&shop.products());
    assert!(mirror.products().is_empty());

    let key = console.create_product(&tee_form()).await.unwrap();
    assert!(mirror.changed().await);

    let product = mirror.get(&key).unwrap();
    assert_eq!(product.name, "Tee");
    assert_eq!(product.sizes, ["S", "M", "L"]);
    assert_eq!(mirror.categories(), [ALL_CATEGORIES, "Summer"]);
}

#[tokio::test]
async fn test_deleted_product_leaves_historical_orders_intact() {
    let shop = TestShop::new();
    let mut console = AdminConsole::new(shop.products(), shop.orders())
        .await
        .unwrap();
    let key = console.create_product(&tee_form()).await.unwrap();

    // A customer orders the product, then the admin removes it.
    let mut cart = Cart::new();
    cart.add(CartLine {
        name: "Tee".to_owned(),
        price: Decimal::from(100),
        size: "M".to_owned(),
        image: "https://img.example/tee.jpg".to_owned(),
        color: "#000".to_owned(),
        quantity: 1,
    });
    shop.pipeline()
        .submit(
            "Ali",
            &mut cart,
            CheckoutRequest::FullCart,
            &ShippingForm {
                name: "Ali".to_owned(),
                phone: "1001234567".to_owned(),
                address: "Cairo".to_owned(),
            },
        )
        .await
        .unwrap();

    console.delete_product(&key).await.unwrap();
    assert!(shop.products().list().await.unwrap().is_empty());

    let orders = shop.orders().list().await.unwrap();
    assert_eq!(orders[0].1.items[0].name, "Tee");
    assert_eq!(orders[0].1.items[0].price, Decimal::from(100));
}

#[tokio::test]
async fn test_status_transition_reaches_customer_mirror_with_link() {
    let shop = TestShop::new();
    let console = AdminConsole::new(shop.products(), shop.orders())
        .await
        .unwrap();

    let mut cart = Cart::new();
    cart.add(CartLine {
        name: "Tee".to_owned(),
        price: Decimal::from(100),
        size: "M".to_owned(),
        image: "https://img.example/tee.jpg".to_owned(),
        color: "#000".to_owned(),
        quantity: 2,
    });
    let key = shop
        .pipeline()
        .submit(
            "Ali",
            &mut cart,
            CheckoutRequest::FullCart,
            &ShippingForm {
                name: "Ali".to_owned(),
                phone: "1001234567".to_owned(),
                address: "Cairo".to_owned(),
            },
        )
        .await
        .unwrap();

    let mut mirror = OrderMirror::new(&shop.orders());
    assert_eq!(mirror.get(&key).unwrap().status, status::PROCESSING);

    let order = mirror.get(&key).unwrap().clone();
    let link = console
        .set_status(&key, &order, status::DELIVERED)
        .await
        .unwrap();
    assert!(link.starts_with("https://wa.me/201001234567?text="));

    assert!(mirror.changed().await);
    let updated = mirror.get(&key).unwrap();
    assert_eq!(updated.status, status::DELIVERED);
    // Only the status field moved.
    assert_eq!(updated.total, Decimal::from(200));
    assert_eq!(updated.items.len(), 1);
}

#[tokio::test]
async fn test_deleted_order_disappears_for_admin_and_customer() {
    let shop = TestShop::new();
    let console = AdminConsole::new(shop.products(), shop.orders())
        .await
        .unwrap();

    let mut cart = Cart::new();
    cart.add(CartLine {
        name: "Tee".to_owned(),
        price: Decimal::from(100),
        size: "M".to_owned(),
        image: "https://img.example/tee.jpg".to_owned(),
        color: "#000".to_owned(),
        quantity: 1,
    });
    let key = shop
        .pipeline()
        .submit(
            "Ali",
            &mut cart,
            CheckoutRequest::FullCart,
            &ShippingForm {
                name: "Ali".to_owned(),
                phone: "1001234567".to_owned(),
                address: "Cairo".to_owned(),
            },
        )
        .await
        .unwrap();

    let mut mirror = OrderMirror::new(&shop.orders());
    assert_eq!(mirror.for_user("Ali").len(), 1);

    console.delete_order(&key).await.unwrap();
    assert!(mirror.changed().await);
    assert!(mirror.all().is_empty());
    assert!(mirror.for_user("Ali").is_empty());
}

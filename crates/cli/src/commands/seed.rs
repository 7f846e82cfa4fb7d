//! Seed the catalog with demo products.

use rust_decimal::Decimal;
use tracing::info;
use velora_core::{NewProduct, ProductColor};
use velora_feed::stores::ProductStore;
use velora_storefront::StorefrontConfig;

fn demo_catalog() -> Vec<NewProduct> {
    vec![
        NewProduct {
            name: "Oversized Tee".to_owned(),
            price: Decimal::from(450),
            image: "https://images.velora.example/oversized-tee.jpg".to_owned(),
            category: "Summer".to_owned(),
            sizes: vec!["S".to_owned(), "M".to_owned(), "L".to_owned(), "XL".to_owned()],
            colors: vec![
                ProductColor {
                    image: "https://images.velora.example/oversized-tee-black.jpg".to_owned(),
                    color: "#1a1a1a".to_owned(),
                },
                ProductColor {
                    image: "https://images.velora.example/oversized-tee-sand.jpg".to_owned(),
                    color: "#d2b48c".to_owned(),
                },
            ],
        },
        NewProduct {
            name: "Fleece Hoodie".to_owned(),
            price: Decimal::from(850),
            image: "https://images.velora.example/fleece-hoodie.jpg".to_owned(),
            category: "Winter".to_owned(),
            sizes: vec!["M".to_owned(), "L".to_owned(), "XL".to_owned()],
            colors: vec![ProductColor {
                image: "https://images.velora.example/fleece-hoodie-grey.jpg".to_owned(),
                color: "#808080".to_owned(),
            }],
        },
        NewProduct {
            name: "Canvas Tote".to_owned(),
            price: Decimal::from(250),
            image: "https://images.velora.example/canvas-tote.jpg".to_owned(),
            category: String::new(),
            sizes: vec!["One Size".to_owned()],
            colors: vec![],
        },
    ]
}

/// Insert the demo catalog.
///
/// # Errors
///
/// Returns an error if connecting or any insert fails.
pub async fn run(config: &StorefrontConfig) -> Result<(), Box<dyn std::error::Error>> {
    let (feed, ns) = super::connect(config).await?;
    let products = ProductStore::new(feed, ns);

    let catalog = demo_catalog();
    info!(count = catalog.len(), "Seeding demo catalog");

    for product in &catalog {
        let key = products.create(product).await?;
        info!(product = %key, name = %product.name, "Product seeded");
    }

    info!("Seeding complete");
    Ok(())
}

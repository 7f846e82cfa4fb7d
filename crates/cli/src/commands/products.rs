//! List the current catalog.

use velora_feed::mirror::CatalogMirror;
use velora_feed::stores::ProductStore;
use velora_storefront::StorefrontConfig;

/// Print the catalog, newest first, with its category facets.
///
/// # Errors
///
/// Returns an error if connecting or the catalog read fails.
#[allow(clippy::print_stdout)]
pub async fn list(config: &StorefrontConfig) -> Result<(), Box<dyn std::error::Error>> {
    let (feed, ns) = super::open(config);
    let products = ProductStore::new(feed, ns);

    // Wait for the subscription's first snapshot before printing.
    let mut mirror = CatalogMirror::new(&products);
    if mirror.products().is_empty() && !mirror.changed().await {
        return Err("catalog subscription closed before the first snapshot".into());
    }

    for (key, product) in mirror.products() {
        println!(
            "{key}  {name}  {price} EGP  [{category}]  sizes: {sizes}",
            name = product.name,
            price = product.price,
            category = product.facet_category(),
            sizes = product.sizes.join(", "),
        );
    }
    println!("categories: {}", mirror.categories().join(", "));
    Ok(())
}

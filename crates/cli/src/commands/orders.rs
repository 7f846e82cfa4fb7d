//! Order management commands.

use std::sync::Arc;

use tracing::info;
use velora_admin::AdminConsole;
use velora_core::OrderKey;
use velora_feed::mirror::OrderMirror;
use velora_feed::stores::{OrderStore, ProductStore};
use velora_storefront::StorefrontConfig;

/// Follow the order collection and print it on every snapshot delivery.
///
/// Runs until interrupted or the subscription closes.
///
/// # Errors
///
/// Returns an error if connecting fails.
#[allow(clippy::print_stdout)]
pub async fn watch(config: &StorefrontConfig) -> Result<(), Box<dyn std::error::Error>> {
    let (feed, ns) = super::open(config);
    let orders = OrderStore::new(feed, ns);

    let mut mirror = OrderMirror::new(&orders);
    info!("Watching the order collection, Ctrl-C to stop");

    loop {
        for (key, order) in mirror.all() {
            println!(
                "{key}  {user}  {total} EGP  {status}  {items} item(s)",
                user = order.user_name,
                total = order.total,
                status = order.status,
                items = order.items.len(),
            );
        }
        println!("---");
        if !mirror.changed().await {
            info!("Subscription closed");
            return Ok(());
        }
    }
}

/// Transition one order's status and print the customer notification
/// link for manual dispatch.
///
/// # Errors
///
/// Returns an error if the order is unknown or the update fails.
#[allow(clippy::print_stdout)]
pub async fn set_status(
    config: &StorefrontConfig,
    order: &str,
    status: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let (feed, ns) = super::connect(config).await?;
    let products = ProductStore::new(Arc::clone(&feed) as _, ns.clone());
    let orders = OrderStore::new(feed, ns);

    let key = OrderKey::new(order);
    let listed = orders.list().await?;
    let Some((_, record)) = listed.iter().find(|(k, _)| *k == key) else {
        return Err(format!("no order with key {order}").into());
    };

    let console = AdminConsole::new(products, orders).await?;
    let link = console.set_status(&key, record, status).await?;

    info!(order = %key, status = %status, "Status updated");
    println!("{link}");
    Ok(())
}

//! The admin console: product and order management operations.

use rust_decimal::Decimal;
use velora_core::{DEFAULT_CATEGORY, NewProduct, Order, OrderKey, ProductColor, ProductKey};
use velora_feed::FeedError;
use velora_feed::stores::{OrderStore, ProductStore};

use crate::error::AdminError;
use crate::whatsapp;

/// A new product as authored in the console, before coercion.
///
/// `price` is the raw string from the form and `sizes` a single
/// comma-separated string; both are parsed on submission.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub name: String,
    pub price: String,
    pub image: String,
    pub category: String,
    pub sizes: String,
    pub colors: Vec<ProductColor>,
}

/// Mutating operations over the catalog and order collections.
pub struct AdminConsole {
    products: ProductStore,
    orders: OrderStore,
    categories: Vec<String>,
}

impl AdminConsole {
    /// Create a console, seeding the category suggestion set from one
    /// read of the current catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the seeding read fails.
    pub async fn new(products: ProductStore, orders: OrderStore) -> Result<Self, FeedError> {
        let mut categories = Vec::new();
        for (_, product) in products.list().await? {
            let facet = product.facet_category();
            if !categories.iter().any(|c| c == facet) {
                categories.push(facet.to_owned());
            }
        }
        Ok(Self {
            products,
            orders,
            categories,
        })
    }

    /// Categories seen so far, for form autocompletion. Purely a local
    /// convenience; nothing persists this set.
    #[must_use]
    pub fn category_suggestions(&self) -> &[String] {
        &self.categories
    }

    /// Validate and insert a new product.
    ///
    /// The category defaults when blank, sizes are parsed from the
    /// comma-separated string with empties dropped, and colors are
    /// taken as authored. A newly used category is folded into the
    /// suggestion set.
    ///
    /// # Errors
    ///
    /// [`AdminError::IncompleteProduct`] when name, price, or image is
    /// missing, [`AdminError::InvalidPrice`] when the price does not
    /// coerce to a non-negative number, and feed errors from the write.
    pub async fn create_product(&mut self, form: &ProductForm) -> Result<ProductKey, AdminError> {
        if form.name.is_empty() || form.price.is_empty() || form.image.is_empty() {
            return Err(AdminError::IncompleteProduct);
        }
        let price: Decimal = form
            .price
            .trim()
            .parse()
            .map_err(|_| AdminError::InvalidPrice(form.price.clone()))?;
        if price < Decimal::ZERO {
            return Err(AdminError::InvalidPrice(form.price.clone()));
        }

        let category = match form.category.trim() {
            "" => DEFAULT_CATEGORY.to_owned(),
            trimmed => trimmed.to_owned(),
        };
        let sizes: Vec<String> = form
            .sizes
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect();

        let key = self
            .products
            .create(&NewProduct {
                name: form.name.clone(),
                price,
                image: form.image.clone(),
                category: category.clone(),
                sizes,
                colors: form.colors.clone(),
            })
            .await?;
        tracing::info!(product = %key, name = %form.name, "product created");

        if !self.categories.contains(&category) {
            self.categories.push(category);
        }
        Ok(key)
    }

    /// Permanently remove a product.
    ///
    /// Callers confirm with the operator first; this is irreversible.
    /// Historical order item snapshots are untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the feed delete fails.
    pub async fn delete_product(&self, key: &ProductKey) -> Result<(), FeedError> {
        self.products.remove(key).await?;
        tracing::info!(product = %key, "product deleted");
        Ok(())
    }

    /// Transition one order's status and compose the customer
    /// notification.
    ///
    /// Only the status field is written; the rest of the record is
    /// untouched. Returns the compose link for the operator to open -
    /// dispatch is manual.
    ///
    /// # Errors
    ///
    /// Returns an error if the feed update fails; no link is composed
    /// in that case.
    pub async fn set_status(
        &self,
        key: &OrderKey,
        order: &Order,
        status: &str,
    ) -> Result<String, FeedError> {
        self.orders.set_status(key, status).await?;
        tracing::info!(order = %key, status = %status, "order status updated");
        Ok(whatsapp::status_link(order, status))
    }

    /// Permanently remove an order.
    ///
    /// Callers confirm with the operator first; this is irreversible.
    ///
    /// # Errors
    ///
    /// Returns an error if the feed delete fails.
    pub async fn delete_order(&self, key: &OrderKey) -> Result<(), FeedError> {
        self.orders.remove(key).await?;
        tracing::info!(order = %key, "order deleted");
        Ok(())
    }
}

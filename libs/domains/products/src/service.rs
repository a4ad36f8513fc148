//! Product Service - query and validation layer

use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::Product;
use crate::store::{ChangeSet, ProductQuery, ProductStore};

/// Product service.
///
/// Checks arguments before touching the store. A rejected call leaves the store
/// untouched and is logged as a client input defect; store faults propagate as-is.
pub struct ProductService<S: ProductStore> {
    store: Arc<S>,
}

impl<S: ProductStore> ProductService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// One page of products, optionally narrowed to names containing `search_term`.
    ///
    /// `page` is zero-based. A blank term lists everything.
    #[instrument(skip(self))]
    pub async fn get_products(
        &self,
        search_term: Option<&str>,
        page: i64,
        page_size: i64,
    ) -> ProductResult<Vec<Product>> {
        if page < 0 {
            warn!(page, "Rejected product listing: negative page");
            return Err(ProductError::OutOfRange("page"));
        }
        if page_size <= 0 {
            warn!(page_size, "Rejected product listing: page size must be positive");
            return Err(ProductError::OutOfRange("pageSize"));
        }

        let search = search_term
            .filter(|term| !term.trim().is_empty())
            .map(str::to_string);

        // Both are non-negative past the checks above
        let query = ProductQuery {
            search,
            skip: page.saturating_mul(page_size) as u64,
            take: page_size as u64,
        };

        self.store.scan(query).await
    }

    /// Point lookup. Absence is `Ok(None)`, not an error.
    #[instrument(skip(self))]
    pub async fn get_product_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        if id.is_nil() {
            warn!("Rejected product lookup: nil id");
            return Err(ProductError::OutOfRange("id"));
        }

        self.store.find(id).await
    }

    /// Validate and store a new product. Any identifier on the input is replaced.
    #[instrument(skip(self, product))]
    pub async fn create_product(&self, product: Option<Product>) -> ProductResult<Product> {
        let Some(product) = product else {
            warn!("Rejected product creation: no product given");
            return Err(ProductError::MissingArgument("product"));
        };
        if let Err(errors) = product.validate() {
            warn!(%errors, "Rejected product creation: invalid content");
            return Err(errors.into());
        }

        let mut changes = ChangeSet::new();
        let created = changes.insert(product);
        self.store.commit(changes).await?;

        info!(product_id = %created.id, name = %created.name, "Product created");
        Ok(created)
    }

    /// Replace the stored record with the same identifier.
    #[instrument(skip(self, product))]
    pub async fn update_product(&self, product: Option<Product>) -> ProductResult<Product> {
        let Some(product) = product else {
            warn!("Rejected product update: no product given");
            return Err(ProductError::MissingArgument("product"));
        };
        if product.id.is_nil() {
            warn!("Rejected product update: nil id");
            return Err(ProductError::OutOfRange("id"));
        }
        if let Err(errors) = product.validate() {
            warn!(product_id = %product.id, %errors, "Rejected product update: invalid content");
            return Err(errors.into());
        }
        if self.store.find(product.id).await?.is_none() {
            warn!(product_id = %product.id, "Rejected product update: unknown id");
            return Err(ProductError::NotFound(product.id));
        }

        let mut changes = ChangeSet::new();
        changes.update(product.clone());
        self.store.commit(changes).await?;

        info!(product_id = %product.id, "Product updated");
        Ok(product)
    }

    /// Remove an existing product. An unknown id is out of range, same as nil.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<()> {
        if id.is_nil() {
            warn!("Rejected product deletion: nil id");
            return Err(ProductError::OutOfRange("id"));
        }
        if self.store.find(id).await?.is_none() {
            warn!(product_id = %id, "Rejected product deletion: unknown id");
            return Err(ProductError::OutOfRange("id"));
        }

        let mut changes = ChangeSet::new();
        changes.remove(id);
        self.store.commit(changes).await?;

        info!(product_id = %id, "Product deleted");
        Ok(())
    }
}

impl<S: ProductStore> Clone for ProductService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::Product;

/// Filter and window for [`ProductStore::scan`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    /// Case-insensitive substring of `name`; `None` matches every record
    pub search: Option<String>,
    pub skip: u64,
    pub take: u64,
}

/// A single staged mutation
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    Insert(Product),
    Update(Product),
    Remove(Uuid),
}

/// Unit of work: mutations are staged here and applied together by [`ProductStore::commit`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet {
    changes: Vec<Change>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage an insert. The record gets a fresh time-ordered identifier, returned
    /// with the record so callers can hand it back before the commit lands.
    pub fn insert(&mut self, mut product: Product) -> Product {
        product.id = Uuid::now_v7();
        self.changes.push(Change::Insert(product.clone()));
        product
    }

    /// Stage an in-place replacement of the record with `product.id`.
    pub fn update(&mut self, product: Product) {
        self.changes.push(Change::Update(product));
    }

    pub fn remove(&mut self, id: Uuid) {
        self.changes.push(Change::Remove(id));
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn changes(&self) -> &[Change] {
        &self.changes
    }
}

impl IntoIterator for ChangeSet {
    type Item = Change;
    type IntoIter = std::vec::IntoIter<Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.into_iter()
    }
}

/// Persistence capability behind [`ProductService`](crate::service::ProductService)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Point lookup
    async fn find(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// Filtered or unfiltered scan in natural order, windowed by skip/take
    async fn scan(&self, query: ProductQuery) -> ProductResult<Vec<Product>>;

    /// Apply every staged change atomically; returns the number of records affected.
    ///
    /// An update or removal whose identifier matches nothing affects nothing.
    async fn commit(&self, changes: ChangeSet) -> ProductResult<usize>;
}

/// Case-insensitive substring match on the product name
pub(crate) fn name_matches(name: &str, term: &str) -> bool {
    name.to_lowercase().contains(&term.to_lowercase())
}

/// In-memory store; natural order is insertion order.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductStore {
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing records, kept in the given order.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            products: Arc::new(RwLock::new(products.into_iter().collect())),
        }
    }

    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn find(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn scan(&self, query: ProductQuery) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        let skip = usize::try_from(query.skip).unwrap_or(usize::MAX);
        let take = usize::try_from(query.take).unwrap_or(usize::MAX);

        let page = products
            .iter()
            .filter(|p| match &query.search {
                Some(term) => name_matches(&p.name, term),
                None => true,
            })
            .skip(skip)
            .take(take)
            .cloned()
            .collect();

        Ok(page)
    }

    async fn commit(&self, changes: ChangeSet) -> ProductResult<usize> {
        let mut products = self.products.write().await;
        let mut affected = 0;

        for change in changes {
            match change {
                Change::Insert(product) => {
                    products.push(product);
                    affected += 1;
                }
                Change::Update(product) => {
                    if let Some(slot) = products.iter_mut().find(|p| p.id == product.id) {
                        *slot = product;
                        affected += 1;
                    }
                }
                Change::Remove(id) => {
                    let before = products.len();
                    products.retain(|p| p.id != id);
                    affected += before - products.len();
                }
            }
        }

        tracing::debug!(affected, "Committed product changes");
        Ok(affected)
    }
}

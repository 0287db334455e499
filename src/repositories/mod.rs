//! Repository layer for data access operations.
//!
//! Services talk to the [`CategoryStore`] and [`ProductStore`] traits; the
//! diesel-async repositories are the production implementations.

mod category_repo;
#[cfg(test)]
mod memory;
mod product_repo;
mod traits;

pub use category_repo::CategoryRepository;
#[cfg(test)]
pub use memory::InMemoryCatalog;
pub use product_repo::ProductRepository;
pub use traits::{CategoryStore, ProductStore};

use std::sync::Arc;

use crate::db::AsyncDbPool;

/// Aggregates all repositories for convenient access.
///
/// Cloning is cheap; both stores sit behind `Arc`.
#[derive(Clone)]
pub struct Repositories {
    pub categories: Arc<dyn CategoryStore>,
    pub products: Arc<dyn ProductStore>,
}

impl Repositories {
    /// Creates the Postgres-backed repositories sharing one pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            categories: Arc::new(CategoryRepository::new(pool.clone())),
            products: Arc::new(ProductRepository::new(pool)),
        }
    }

    pub fn from_stores(
        categories: Arc<dyn CategoryStore>,
        products: Arc<dyn ProductStore>,
    ) -> Self {
        Self {
            categories,
            products,
        }
    }

    #[cfg(test)]
    pub fn in_memory() -> (Self, InMemoryCatalog) {
        let catalog = InMemoryCatalog::new();
        let repos = Self::from_stores(Arc::new(catalog.clone()), Arc::new(catalog.clone()));
        (repos, catalog)
    }
}

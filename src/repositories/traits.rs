//! Store contracts the services are written against.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{
    Category, CategoryWithProducts, NewCategory, NewProduct, Product, ProductWithCategory,
    UpdateCategory, UpdateProduct,
};

/// Category persistence.
///
/// `update` and `delete` report a missing id as `AppError::NotFound`; a slug
/// clash on `create` or `update` surfaces as `AppError::Duplicate` on `slug`.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn count(&self) -> AppResult<i64>;

    /// One page ordered by name descending, each category with its products.
    async fn list_page(&self, offset: i64, limit: i64) -> AppResult<Vec<CategoryWithProducts>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CategoryWithProducts>>;

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<CategoryWithProducts>>;

    async fn slug_exists(&self, slug: &str) -> AppResult<bool>;

    async fn create(&self, new_category: NewCategory) -> AppResult<Category>;

    /// An empty changeset returns the current row.
    async fn update(&self, id: Uuid, changes: UpdateCategory) -> AppResult<Category>;

    /// Returns the deleted row. Products go with it.
    async fn delete(&self, id: Uuid) -> AppResult<Category>;
}

/// Product persistence, same error contract as [`CategoryStore`].
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn count(&self) -> AppResult<i64>;

    /// One page ordered by slug ascending.
    async fn list_page(&self, offset: i64, limit: i64) -> AppResult<Vec<Product>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ProductWithCategory>>;

    async fn slug_exists(&self, slug: &str) -> AppResult<bool>;

    async fn create(&self, new_product: NewProduct) -> AppResult<Product>;

    async fn update(&self, id: Uuid, changes: UpdateProduct) -> AppResult<Product>;

    async fn delete(&self, id: Uuid) -> AppResult<Product>;
}

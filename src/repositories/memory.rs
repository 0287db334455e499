//! In-memory catalog used by service and handler tests.
//!
//! Mirrors the Postgres schema rules: unique slugs per table, products must
//! reference an existing category, deleting a category cascades.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use jiff_diesel::ToDiesel;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    Category, CategoryWithProducts, NewCategory, NewProduct, Product, ProductWithCategory,
    UpdateCategory, UpdateProduct,
};
use crate::repositories::{CategoryStore, ProductStore};

#[derive(Default)]
struct CatalogState {
    categories: Vec<Category>,
    products: Vec<Product>,
    // Simulates a concurrent writer taking the slug between check and insert.
    forced_slug_conflicts: usize,
}

#[derive(Clone, Default)]
pub struct InMemoryCatalog {
    state: Arc<Mutex<CatalogState>>,
}

fn now() -> jiff_diesel::DateTime {
    jiff::Zoned::now().datetime().to_diesel()
}

fn duplicate_slug(table: &str, value: &str) -> AppError {
    AppError::Duplicate {
        entity: table.to_string(),
        field: "slug".to_string(),
        value: value.to_string(),
    }
}

fn page<T: Clone>(rows: &[T], offset: i64, limit: i64) -> Vec<T> {
    rows.iter()
        .skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .cloned()
        .collect()
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `n` inserts fail with a slug clash.
    pub fn force_slug_conflicts(&self, n: usize) {
        self.lock().forced_slug_conflicts = n;
    }

    fn lock(&self) -> MutexGuard<'_, CatalogState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CatalogState {
    fn take_forced_conflict(&mut self) -> bool {
        if self.forced_slug_conflicts > 0 {
            self.forced_slug_conflicts -= 1;
            true
        } else {
            false
        }
    }

    fn products_of(&self, category_id: Uuid) -> Vec<Product> {
        self.products
            .iter()
            .filter(|p| p.category_id == category_id)
            .cloned()
            .collect()
    }

    fn with_products(&self, category: &Category) -> CategoryWithProducts {
        CategoryWithProducts {
            category: category.clone(),
            products: self.products_of(category.id),
        }
    }

    fn check_category_exists(&self, category_id: Uuid) -> AppResult<()> {
        if self.categories.iter().any(|c| c.id == category_id) {
            Ok(())
        } else {
            Err(AppError::Validation {
                field: "category_id".to_string(),
                reason: format!(
                    "Invalid reference from products with value '{}'",
                    category_id
                ),
            })
        }
    }
}

#[async_trait]
impl CategoryStore for InMemoryCatalog {
    async fn count(&self) -> AppResult<i64> {
        Ok(self.lock().categories.len() as i64)
    }

    async fn list_page(&self, offset: i64, limit: i64) -> AppResult<Vec<CategoryWithProducts>> {
        let state = self.lock();
        let mut sorted = state.categories.clone();
        sorted.sort_by(|a, b| b.name.cmp(&a.name).then(a.id.cmp(&b.id)));
        Ok(page(&sorted, offset, limit)
            .iter()
            .map(|c| state.with_products(c))
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CategoryWithProducts>> {
        let state = self.lock();
        Ok(state
            .categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| state.with_products(c)))
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<CategoryWithProducts>> {
        let state = self.lock();
        Ok(state
            .categories
            .iter()
            .find(|c| c.slug == slug)
            .map(|c| state.with_products(c)))
    }

    async fn slug_exists(&self, slug: &str) -> AppResult<bool> {
        Ok(self.lock().categories.iter().any(|c| c.slug == slug))
    }

    async fn create(&self, new_category: NewCategory) -> AppResult<Category> {
        let mut state = self.lock();
        if state.take_forced_conflict()
            || state.categories.iter().any(|c| c.slug == new_category.slug)
        {
            return Err(duplicate_slug("categories", &new_category.slug));
        }

        let timestamp = now();
        let category = Category {
            id: Uuid::new_v4(),
            name: new_category.name,
            slug: new_category.slug,
            description: new_category.description,
            created_at: timestamp,
            updated_at: timestamp,
        };
        state.categories.push(category.clone());
        Ok(category)
    }

    async fn update(&self, id: Uuid, changes: UpdateCategory) -> AppResult<Category> {
        let mut state = self.lock();

        if let Some(slug) = &changes.slug {
            if state.categories.iter().any(|c| c.id != id && &c.slug == slug) {
                return Err(duplicate_slug("categories", slug));
            }
        }

        let category = state
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::not_found("category", id))?;

        if changes.is_empty() {
            return Ok(category.clone());
        }
        if let Some(name) = changes.name {
            category.name = name;
        }
        if let Some(slug) = changes.slug {
            category.slug = slug;
        }
        if let Some(description) = changes.description {
            category.description = Some(description);
        }
        category.updated_at = now();
        Ok(category.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<Category> {
        let mut state = self.lock();
        let index = state
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| AppError::not_found("category", id))?;

        state.products.retain(|p| p.category_id != id);
        Ok(state.categories.remove(index))
    }
}

#[async_trait]
impl ProductStore for InMemoryCatalog {
    async fn count(&self) -> AppResult<i64> {
        Ok(self.lock().products.len() as i64)
    }

    async fn list_page(&self, offset: i64, limit: i64) -> AppResult<Vec<Product>> {
        let mut sorted = self.lock().products.clone();
        sorted.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(page(&sorted, offset, limit))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ProductWithCategory>> {
        let state = self.lock();
        let Some(product) = state.products.iter().find(|p| p.id == id) else {
            return Ok(None);
        };
        Ok(state
            .categories
            .iter()
            .find(|c| c.id == product.category_id)
            .map(|category| ProductWithCategory {
                product: product.clone(),
                category: category.clone(),
            }))
    }

    async fn slug_exists(&self, slug: &str) -> AppResult<bool> {
        Ok(self.lock().products.iter().any(|p| p.slug == slug))
    }

    async fn create(&self, new_product: NewProduct) -> AppResult<Product> {
        let mut state = self.lock();
        if state.take_forced_conflict()
            || state.products.iter().any(|p| p.slug == new_product.slug)
        {
            return Err(duplicate_slug("products", &new_product.slug));
        }
        state.check_category_exists(new_product.category_id)?;

        let timestamp = now();
        let product = Product {
            id: Uuid::new_v4(),
            name: new_product.name,
            slug: new_product.slug,
            description: new_product.description,
            price: new_product.price,
            category_id: new_product.category_id,
            created_at: timestamp,
            updated_at: timestamp,
        };
        state.products.push(product.clone());
        Ok(product)
    }

    async fn update(&self, id: Uuid, changes: UpdateProduct) -> AppResult<Product> {
        let mut state = self.lock();

        if let Some(slug) = &changes.slug {
            if state.products.iter().any(|p| p.id != id && &p.slug == slug) {
                return Err(duplicate_slug("products", slug));
            }
        }
        if !state.products.iter().any(|p| p.id == id) {
            return Err(AppError::not_found("product", id));
        }
        if let Some(category_id) = changes.category_id {
            state.check_category_exists(category_id)?;
        }

        let product = state
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::not_found("product", id))?;

        if changes.is_empty() {
            return Ok(product.clone());
        }
        if let Some(name) = changes.name {
            product.name = name;
        }
        if let Some(slug) = changes.slug {
            product.slug = slug;
        }
        if let Some(description) = changes.description {
            product.description = Some(description);
        }
        if let Some(price) = changes.price {
            product.price = price;
        }
        if let Some(category_id) = changes.category_id {
            product.category_id = category_id;
        }
        product.updated_at = now();
        Ok(product.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<Product> {
        let mut state = self.lock();
        let index = state
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| AppError::not_found("product", id))?;
        Ok(state.products.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;

    fn new_category(name: &str, slug: &str) -> NewCategory {
        NewCategory {
            name: name.to_string(),
            slug: slug.to_string(),
            description: None,
        }
    }

    fn new_product(slug: &str, category_id: Uuid) -> NewProduct {
        NewProduct {
            name: slug.to_string(),
            slug: slug.to_string(),
            description: None,
            price: BigDecimal::from(10),
            category_id,
        }
    }

    #[tokio::test]
    async fn test_unique_slug_per_table() {
        let store = InMemoryCatalog::new();
        CategoryStore::create(&store, new_category("Shoes", "shoes"))
            .await
            .unwrap();

        let err = CategoryStore::create(&store, new_category("Shoes", "shoes"))
            .await
            .unwrap_err();
        assert!(err.is_duplicate_of("slug"));
    }

    #[tokio::test]
    async fn test_product_requires_existing_category() {
        let store = InMemoryCatalog::new();
        let err = ProductStore::create(&store, new_product("boot", Uuid::new_v4()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "category_id"));
    }

    #[tokio::test]
    async fn test_delete_category_cascades() {
        let store = InMemoryCatalog::new();
        let shoes = CategoryStore::create(&store, new_category("Shoes", "shoes"))
            .await
            .unwrap();
        ProductStore::create(&store, new_product("boot", shoes.id))
            .await
            .unwrap();

        CategoryStore::delete(&store, shoes.id).await.unwrap();
        assert_eq!(ProductStore::count(&store).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_rows() {
        let store = InMemoryCatalog::new();
        let id = Uuid::new_v4();

        let err = CategoryStore::update(&store, id, UpdateCategory::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));

        let err = ProductStore::delete(&store, id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_forced_conflicts_are_consumed() {
        let store = InMemoryCatalog::new();
        store.force_slug_conflicts(1);

        assert!(
            CategoryStore::create(&store, new_category("Hats", "hats"))
                .await
                .is_err()
        );
        assert!(
            CategoryStore::create(&store, new_category("Hats", "hats"))
                .await
                .is_ok()
        );
    }
}

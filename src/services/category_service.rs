//! Category business logic: slug assignment, paging and nested reads.

use std::sync::Arc;

use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Category, CategoryWithProducts, NewCategory, UpdateCategory};
use crate::repositories::CategoryStore;
use crate::services::{MAX_CREATE_ATTEMPTS, Page, Pagination};
use crate::utils::collation::sort_by_name;
use crate::utils::slug::{generate_slug, generate_suffixed_slug};

/// Caller-supplied fields for a new category. The slug is derived.
#[derive(Debug, Clone)]
pub struct CreateCategory {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Clone)]
pub struct CategoryService {
    store: Arc<dyn CategoryStore>,
}

impl CategoryService {
    pub fn new(store: Arc<dyn CategoryStore>) -> Self {
        Self { store }
    }

    /// Creates a category under a slug no other category uses.
    ///
    /// The slug starts as `generate_slug(name)` and gets a random suffix
    /// while taken. If the insert still loses a race on the unique
    /// constraint the whole sequence restarts, up to
    /// [`MAX_CREATE_ATTEMPTS`] times.
    pub async fn create(&self, input: CreateCategory) -> AppResult<Category> {
        let mut attempt = 1;
        loop {
            let slug = self.free_slug(&input.name).await?;
            let new_category = NewCategory {
                name: input.name.clone(),
                slug: slug.clone(),
                description: input.description.clone(),
            };

            match self.store.create(new_category).await {
                Ok(category) => {
                    tracing::info!(id = %category.id, slug = %category.slug, "Category created");
                    return Ok(category);
                }
                Err(e) if e.is_duplicate_of("slug") && attempt < MAX_CREATE_ATTEMPTS => {
                    tracing::warn!(slug = %slug, attempt, "Category slug taken concurrently, retrying");
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn free_slug(&self, name: &str) -> AppResult<String> {
        let mut slug = generate_slug(name);
        while self.store.slug_exists(&slug).await? {
            slug = generate_suffixed_slug(name);
        }
        Ok(slug)
    }

    /// Categories by name descending, each with its products.
    pub async fn find_all(&self, pagination: Pagination) -> AppResult<Page<CategoryWithProducts>> {
        let total_count = self.store.count().await?;
        let data = self
            .store
            .list_page(pagination.offset(), pagination.limit())
            .await?;
        Ok(Page::new(data, pagination, total_count))
    }

    /// The category with its products sorted by name.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CategoryWithProducts>> {
        let mut found = self.store.find_by_id(id).await?;
        if let Some(category) = found.as_mut() {
            sort_by_name(&mut category.products, |p| p.name.as_str());
        }
        Ok(found)
    }

    pub async fn get_by_slug(&self, slug: &str) -> AppResult<Option<CategoryWithProducts>> {
        self.store.find_by_slug(slug).await
    }

    /// Applies the supplied fields verbatim; the slug is never regenerated.
    pub async fn update(&self, id: Uuid, changes: UpdateCategory) -> AppResult<Category> {
        let category = self.store.update(id, changes).await?;
        tracing::info!(id = %category.id, "Category updated");
        Ok(category)
    }

    /// Deletes the category and, through the foreign key, its products.
    pub async fn remove(&self, id: Uuid) -> AppResult<Category> {
        let category = self.store.delete(id).await?;
        tracing::info!(id = %category.id, slug = %category.slug, "Category removed");
        Ok(category)
    }
}

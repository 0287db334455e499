//! Product business logic: slug assignment, paging and the category-inline read.

use std::sync::Arc;

use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{NewProduct, Product, ProductWithCategory, UpdateProduct};
use crate::repositories::ProductStore;
use crate::services::{MAX_CREATE_ATTEMPTS, Page, Pagination};
use crate::utils::slug::{generate_slug, generate_suffixed_slug};

/// Caller-supplied fields for a new product. The slug is derived.
#[derive(Debug, Clone)]
pub struct CreateProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub category_id: Uuid,
}

#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn ProductStore>,
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    /// Same slug assignment and bounded retry as category creation.
    pub async fn create(&self, input: CreateProduct) -> AppResult<Product> {
        let mut attempt = 1;
        loop {
            let slug = self.free_slug(&input.name).await?;
            let new_product = NewProduct {
                name: input.name.clone(),
                slug: slug.clone(),
                description: input.description.clone(),
                price: input.price.clone(),
                category_id: input.category_id,
            };

            match self.store.create(new_product).await {
                Ok(product) => {
                    tracing::info!(
                        id = %product.id,
                        slug = %product.slug,
                        category_id = %product.category_id,
                        "Product created"
                    );
                    return Ok(product);
                }
                Err(e) if e.is_duplicate_of("slug") && attempt < MAX_CREATE_ATTEMPTS => {
                    tracing::warn!(slug = %slug, attempt, "Product slug taken concurrently, retrying");
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

    /// Products by slug ascending, without their categories.
    pub async fn find_all(&self, pagination: Pagination) -> AppResult<Page<Product>> {
        let total_count = self.store.count().await?;
        let data = self
            .store
            .list_page(pagination.offset(), pagination.limit())
            .await?;
        Ok(Page::new(data, pagination, total_count))
    }

    pub async fn find_one(&self, id: Uuid) -> AppResult<Option<ProductWithCategory>> {
        self.store.find_by_id(id).await
    }

    pub async fn update(&self, id: Uuid, changes: UpdateProduct) -> AppResult<Product> {
        let product = self.store.update(id, changes).await?;
        tracing::info!(id = %product.id, "Product updated");
        Ok(product)
    }

    pub async fn remove(&self, id: Uuid) -> AppResult<Product> {
        let product = self.store.delete(id).await?;
        tracing::info!(id = %product.id, slug = %product.slug, "Product removed");
        Ok(product)
    }
}

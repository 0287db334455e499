//! Product repository over diesel_async.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Category, NewProduct, Product, ProductWithCategory, UpdateProduct};
use crate::repositories::ProductStore;
use crate::schema::{categories, products};

const ENTITY: &str = "product";

#[derive(Clone)]
pub struct ProductRepository {
    pool: AsyncDbPool,
}

impl ProductRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    async fn find_row(&self, product_id: Uuid) -> AppResult<Option<Product>> {
        let mut conn = self.pool.get().await?;

        products::table
            .find(product_id)
            .select(Product::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }
}

#[async_trait]
impl ProductStore for ProductRepository {
    async fn count(&self) -> AppResult<i64> {
        let mut conn = self.pool.get().await?;

        products::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn list_page(&self, offset: i64, limit: i64) -> AppResult<Vec<Product>> {
        let mut conn = self.pool.get().await?;

        products::table
            .order(products::slug.asc())
            .offset(offset)
            .limit(limit)
            .select(Product::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_id(&self, product_id: Uuid) -> AppResult<Option<ProductWithCategory>> {
        let mut conn = self.pool.get().await?;

        let row = products::table
            .inner_join(categories::table)
            .filter(products::id.eq(product_id))
            .select((Product::as_select(), Category::as_select()))
            .first::<(Product, Category)>(&mut conn)
            .await
            .optional()?;

        Ok(row.map(|(product, category)| ProductWithCategory { product, category }))
    }

    async fn slug_exists(&self, wanted: &str) -> AppResult<bool> {
        let mut conn = self.pool.get().await?;

        diesel::select(diesel::dsl::exists(
            products::table.filter(products::slug.eq(wanted)),
        ))
        .get_result(&mut conn)
        .await
        .map_err(AppError::from)
    }

    async fn create(&self, new_product: NewProduct) -> AppResult<Product> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(products::table)
            .values(&new_product)
            .returning(Product::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn update(&self, product_id: Uuid, changes: UpdateProduct) -> AppResult<Product> {
        if changes.is_empty() {
            return self
                .find_row(product_id)
                .await?
                .ok_or_else(|| AppError::not_found(ENTITY, product_id));
        }

        let mut conn = self.pool.get().await?;
        diesel::update(products::table.find(product_id))
            .set(&changes)
            .returning(Product::as_returning())
            .get_result(&mut conn)
            .await
            .optional()?
            .ok_or_else(|| AppError::not_found(ENTITY, product_id))
    }

    async fn delete(&self, product_id: Uuid) -> AppResult<Product> {
        let mut conn = self.pool.get().await?;

        diesel::delete(products::table.find(product_id))
            .returning(Product::as_returning())
            .get_result(&mut conn)
            .await
            .optional()?
            .ok_or_else(|| AppError::not_found(ENTITY, product_id))
    }
}

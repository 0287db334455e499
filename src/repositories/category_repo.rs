//! Category repository over diesel_async.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Category, CategoryWithProducts, NewCategory, Product, UpdateCategory};
use crate::repositories::CategoryStore;

const ENTITY: &str = "category";

/// Cheap to clone; the pool is reference counted.
#[derive(Clone)]
pub struct CategoryRepository {
    pool: AsyncDbPool,
}

impl CategoryRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    async fn with_products(&self, rows: Vec<Category>) -> AppResult<Vec<CategoryWithProducts>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.pool.get().await?;
        let products = Product::belonging_to(&rows)
            .select(Product::as_select())
            .load::<Product>(&mut conn)
            .await?;

        Ok(products
            .grouped_by(&rows)
            .into_iter()
            .zip(rows)
            .map(|(products, category)| CategoryWithProducts { category, products })
            .collect())
    }

    async fn find_row(&self, category_id: Uuid) -> AppResult<Option<Category>> {
        use crate::schema::categories::dsl::*;
        let mut conn = self.pool.get().await?;

        categories
            .filter(id.eq(category_id))
            .select(Category::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }
}

#[async_trait]
impl CategoryStore for CategoryRepository {
    async fn count(&self) -> AppResult<i64> {
        use crate::schema::categories::dsl::*;
        let mut conn = self.pool.get().await?;

        categories
            .count()
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn list_page(&self, offset: i64, limit: i64) -> AppResult<Vec<CategoryWithProducts>> {
        use crate::schema::categories::dsl::*;
        let rows = {
            let mut conn = self.pool.get().await?;
            categories
                .order((name.desc(), id.asc()))
                .offset(offset)
                .limit(limit)
                .select(Category::as_select())
                .load(&mut conn)
                .await?
        };

        self.with_products(rows).await
    }

    async fn find_by_id(&self, category_id: Uuid) -> AppResult<Option<CategoryWithProducts>> {
        let Some(row) = self.find_row(category_id).await? else {
            return Ok(None);
        };
        Ok(self.with_products(vec![row]).await?.pop())
    }

    async fn find_by_slug(&self, wanted: &str) -> AppResult<Option<CategoryWithProducts>> {
        use crate::schema::categories::dsl::*;
        let row = {
            let mut conn = self.pool.get().await?;
            categories
                .filter(slug.eq(wanted))
                .select(Category::as_select())
                .first(&mut conn)
                .await
                .optional()?
        };

        match row {
            Some(row) => Ok(self.with_products(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn slug_exists(&self, wanted: &str) -> AppResult<bool> {
        use crate::schema::categories::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::select(diesel::dsl::exists(categories.filter(slug.eq(wanted))))
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn create(&self, new_category: NewCategory) -> AppResult<Category> {
        use crate::schema::categories::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(categories)
            .values(&new_category)
            .returning(Category::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn update(&self, category_id: Uuid, changes: UpdateCategory) -> AppResult<Category> {
        use crate::schema::categories::dsl::*;

        // diesel refuses an UPDATE without SET clauses
        if changes.is_empty() {
            return self
                .find_row(category_id)
                .await?
                .ok_or_else(|| AppError::not_found(ENTITY, category_id));
        }

        let mut conn = self.pool.get().await?;
        diesel::update(categories.filter(id.eq(category_id)))
            .set(&changes)
            .returning(Category::as_returning())
            .get_result(&mut conn)
            .await
            .optional()?
            .ok_or_else(|| AppError::not_found(ENTITY, category_id))
    }

    async fn delete(&self, category_id: Uuid) -> AppResult<Category> {
        use crate::schema::categories::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::delete(categories.filter(id.eq(category_id)))
            .returning(Category::as_returning())
            .get_result(&mut conn)
            .await
            .optional()?
            .ok_or_else(|| AppError::not_found(ENTITY, category_id))
    }
}

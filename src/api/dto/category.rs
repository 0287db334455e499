//! Category request and response DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::ProductResponse;
use crate::api::dto::validation::validate_slug;
use crate::models::{Category, CategoryWithProducts, UpdateCategory};
use crate::services::CreateCategory;

// ============================================================================
// Request DTOs
// ============================================================================

/// Request body for creating a category. The slug is derived from `name`.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    #[schema(min_length = 1, max_length = 255, example = "Running Shoes")]
    pub name: String,
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    #[schema(max_length = 2000)]
    pub description: Option<String>,
}

impl From<CreateCategoryRequest> for CreateCategory {
    fn from(request: CreateCategoryRequest) -> Self {
        Self {
            name: request.name,
            description: request.description,
        }
    }
}

/// Request body for updating a category. Omitted fields stay as they are.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    #[schema(min_length = 1, max_length = 255)]
    pub name: Option<String>,
    #[validate(custom(function = "validate_slug"))]
    #[schema(pattern = "^[a-z0-9_-]+$", example = "running-shoes")]
    pub slug: Option<String>,
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    #[schema(max_length = 2000)]
    pub description: Option<String>,
}

impl From<UpdateCategoryRequest> for UpdateCategory {
    fn from(request: UpdateCategoryRequest) -> Self {
        Self {
            name: request.name,
            slug: request.slug,
            description: request.description,
        }
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            slug: category.slug,
            description: category.description,
            created_at: category.created_at.to_jiff().to_string(),
            updated_at: category.updated_at.to_jiff().to_string(),
        }
    }
}

/// A category with its products nested.
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryDetailResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub products: Vec<ProductResponse>,
}

impl From<CategoryWithProducts> for CategoryDetailResponse {
    fn from(row: CategoryWithProducts) -> Self {
        let category = CategoryResponse::from(row.category);
        Self {
            id: category.id,
            name: category.name,
            slug: category.slug,
            description: category.description,
            created_at: category.created_at,
            updated_at: category.updated_at,
            products: row.products.into_iter().map(ProductResponse::from).collect(),
        }
    }
}

//! Product request and response DTOs.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::CategoryResponse;
use crate::api::dto::validation::{
    deserialize_optional_price, deserialize_price, validate_price, validate_slug,
};
use crate::models::{Product, ProductWithCategory, UpdateProduct};
use crate::services::CreateProduct;

// ============================================================================
// Request DTOs
// ============================================================================

/// Request body for creating a product. The slug is derived from `name`.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    #[schema(min_length = 1, max_length = 255, example = "Trail Runner")]
    pub name: String,
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    #[schema(max_length = 2000)]
    pub description: Option<String>,
    /// Decimal amount, as a JSON number or string
    #[serde(deserialize_with = "deserialize_price")]
    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = String, example = "49.99")]
    pub price: BigDecimal,
    pub category_id: Uuid,
}

impl From<CreateProductRequest> for CreateProduct {
    fn from(request: CreateProductRequest) -> Self {
        Self {
            name: request.name,
            description: request.description,
            price: request.price,
            category_id: request.category_id,
        }
    }
}

/// Request body for updating a product. Omitted fields stay as they are.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: Option<String>,
    #[validate(custom(function = "validate_slug"))]
    #[schema(pattern = "^[a-z0-9_-]+$")]
    pub slug: Option<String>,
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_price")]
    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = Option<String>, example = "39.99")]
    pub price: Option<BigDecimal>,
    pub category_id: Option<Uuid>,
}

impl From<UpdateProductRequest> for UpdateProduct {
    fn from(request: UpdateProductRequest) -> Self {
        Self {
            name: request.name,
            slug: request.slug,
            description: request.description,
            price: request.price,
            category_id: request.category_id,
        }
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    /// Decimal rendered as a string to keep its precision
    #[schema(example = "49.99")]
    pub price: String,
    pub category_id: Uuid,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            slug: product.slug,
            description: product.description,
            price: product.price.to_string(),
            category_id: product.category_id,
            created_at: product.created_at.to_jiff().to_string(),
            updated_at: product.updated_at.to_jiff().to_string(),
        }
    }
}

/// A product with its owning category inline.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductDetailResponse {
    #[serde(flatten)]
    pub product: ProductResponse,
    pub category: CategoryResponse,
}

impl From<ProductWithCategory> for ProductDetailResponse {
    fn from(row: ProductWithCategory) -> Self {
        Self {
            product: row.product.into(),
            category: row.category.into(),
        }
    }
}

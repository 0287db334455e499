//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `category` / `product` - catalog request/response DTOs
//! - `error` - Common error response DTOs
//! - `health` - Health probe payloads
//! - `pagination` - Pagination-related DTOs

mod category;
mod error;
mod health;
mod pagination;
mod product;
mod validation;

pub use category::{
    CategoryDetailResponse, CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest,
};
pub use error::ErrorResponse;
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use pagination::{PagedResponse, PaginationParams};
pub use product::{
    CreateProductRequest, ProductDetailResponse, ProductResponse, UpdateProductRequest,
};

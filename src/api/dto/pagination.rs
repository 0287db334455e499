//! Pagination-related DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::config::PaginationConfig;
use crate::error::{AppError, AppResult};
use crate::services::{Page, Pagination};

/// Query parameters for pagination.
#[derive(Debug, Default, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Page number (1-based), defaults to 1
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    #[param(minimum = 1, example = 1)]
    pub page: Option<u32>,

    /// Number of items per page (max 100), defaults to 5
    #[validate(range(min = 1, max = 100, message = "Page size must be between 1 and 100"))]
    #[param(minimum = 1, maximum = 100, example = 5)]
    pub page_size: Option<u32>,
}

impl PaginationParams {
    /// Fills in defaults from settings and enforces the configured ceiling.
    pub fn resolve(&self, config: PaginationConfig) -> AppResult<Pagination> {
        let page_size = self.page_size.unwrap_or(config.default_page_size);
        if page_size > config.max_page_size {
            return Err(AppError::Validation {
                field: "page_size".to_string(),
                reason: format!("Page size must be at most {}", config.max_page_size),
            });
        }
        Pagination::new(self.page.unwrap_or(1), page_size)
    }
}

/// Generic paged response wrapper.
#[derive(Debug, Serialize, ToSchema)]
pub struct PagedResponse<T> {
    /// The data items for this page
    pub data: Vec<T>,

    /// Current page number (1-based)
    #[schema(example = 1)]
    pub page: u32,

    /// Number of items per page
    #[schema(example = 5)]
    pub page_size: u32,

    /// Total number of items across all pages
    #[schema(example = 12)]
    pub total_count: u64,

    /// Total number of pages
    #[schema(example = 3)]
    pub total_pages: u64,
}

impl<M, T: From<M>> From<Page<M>> for PagedResponse<T> {
    fn from(page: Page<M>) -> Self {
        let page = page.map(T::from);
        Self {
            data: page.data,
            page: page.page,
            page_size: page.page_size,
            total_count: page.total_count,
            total_pages: page.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PaginationConfig {
        PaginationConfig {
            default_page_size: 5,
            max_page_size: 100,
        }
    }

    #[test]
    fn test_defaults_from_config() {
        let pagination = PaginationParams::default().resolve(config()).unwrap();
        assert_eq!(pagination.page(), 1);
        assert_eq!(pagination.page_size(), 5);
    }

    #[test]
    fn test_explicit_values_win() {
        let params = PaginationParams {
            page: Some(3),
            page_size: Some(20),
        };
        let pagination = params.resolve(config()).unwrap();
        assert_eq!(pagination.offset(), 40);
    }

    #[test]
    fn test_validator_rejects_out_of_range() {
        let params = PaginationParams {
            page: Some(0),
            page_size: Some(101),
        };
        let errors = params.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("page"));
        assert!(fields.contains_key("page_size"));
    }

    #[test]
    fn test_configured_ceiling() {
        let params = PaginationParams {
            page: None,
            page_size: Some(50),
        };
        let tight = PaginationConfig {
            default_page_size: 5,
            max_page_size: 25,
        };
        assert!(params.resolve(tight).is_err());
    }

    #[test]
    fn test_paged_response_from_page() {
        let pagination = Pagination::new(2, 5).unwrap();
        let page = Page::new(vec![1u32, 2], pagination, 12);
        let response: PagedResponse<u64> = page.into();
        assert_eq!(response.data, vec![1u64, 2]);
        assert_eq!(response.total_pages, 3);
    }
}

//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories and handlers.

mod category_service;
mod product_service;

pub use category_service::{CategoryService, CreateCategory};
pub use product_service::{CreateProduct, ProductService};

use crate::error::{AppError, AppResult};
use crate::repositories::Repositories;

/// Upper bound on insert attempts when concurrent creators keep taking the
/// same slug.
pub const MAX_CREATE_ATTEMPTS: u32 = 5;

/// A validated page request, 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    page_size: u32,
}

impl Pagination {
    pub fn new(page: u32, page_size: u32) -> AppResult<Self> {
        if page == 0 {
            return Err(AppError::Validation {
                field: "page".to_string(),
                reason: "Page must be at least 1".to_string(),
            });
        }
        if page_size == 0 {
            return Err(AppError::Validation {
                field: "page_size".to_string(),
                reason: "Page size must be at least 1".to_string(),
            });
        }
        Ok(Self { page, page_size })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.page_size as i64
    }

    pub fn limit(&self) -> i64 {
        self.page_size as i64
    }
}

/// One page of results plus the counts a client needs to walk the rest.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, pagination: Pagination, total_count: i64) -> Self {
        let total_count = total_count.max(0) as u64;
        Self {
            data,
            page: pagination.page,
            page_size: pagination.page_size,
            total_count,
            total_pages: total_count.div_ceil(pagination.page_size as u64),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_count: self.total_count,
            total_pages: self.total_pages,
        }
    }
}

/// Aggregates all services for convenient access.
///
/// Cloning is cheap; each service only holds an `Arc` to its store.
#[derive(Clone)]
pub struct Services {
    pub categories: CategoryService,
    pub products: ProductService,
}

impl Services {
    pub fn new(repos: Repositories) -> Self {
        Self {
            categories: CategoryService::new(repos.categories),
            products: ProductService::new(repos.products),
        }
    }
}

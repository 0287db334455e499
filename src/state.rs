//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use crate::config::PaginationConfig;
use crate::db::AsyncDbPool;
use crate::repositories::Repositories;
use crate::services::Services;

/// Application state containing all shared services and resources.
///
/// Cloning is cheap since both Services and AsyncDbPool use Arc internally.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Direct access to the pool, used by health checks
    pub db_pool: AsyncDbPool,
    /// Paging defaults for list endpoints
    pub pagination: PaginationConfig,
}

impl AppState {
    /// Wires the Postgres repositories and services over `pool`.
    pub fn new(pool: AsyncDbPool, pagination: PaginationConfig) -> Self {
        let repos = Repositories::new(pool.clone());
        Self::with_repositories(repos, pool, pagination)
    }

    pub fn with_repositories(
        repos: Repositories,
        pool: AsyncDbPool,
        pagination: PaginationConfig,
    ) -> Self {
        Self {
            services: Services::new(repos),
            db_pool: pool,
            pagination,
        }
    }

    /// State over the given repositories with a pool that points nowhere,
    /// so health checks fail fast.
    #[cfg(test)]
    pub fn for_tests(repos: Repositories) -> Self {
        use crate::config::DatabaseConfig;

        let database = DatabaseConfig {
            url: "postgres://storefront@127.0.0.1:1/storefront".to_string(),
            max_connections: 1,
            min_connections: 0,
            connection_timeout: 1,
            auto_migrate: false,
        };
        let pool = crate::db::lazy_connection_pool(&database);
        Self::with_repositories(repos, pool, PaginationConfig::default())
    }
}

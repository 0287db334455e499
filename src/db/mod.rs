//! Database access: the async connection pool and embedded migrations.

pub mod migrations;
mod pool;

pub use migrations::MIGRATIONS;
#[cfg(test)]
pub use pool::lazy_connection_pool;
pub use pool::{AsyncDbPool, establish_async_connection_pool};

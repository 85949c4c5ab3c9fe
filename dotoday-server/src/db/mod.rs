//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - Connection pool, no Arc<Mutex<Connection>>
//! - The unique index on list names is the source of truth; service
//!   pre-checks only produce nicer errors
//! - One statement per logical write, no multi-step transactions

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_memory_pool, create_pool, create_pool_with_options, DEFAULT_MAX_CONNECTIONS};
pub use repos::*;

/// In-memory pool with the schema applied.
#[cfg(test)]
pub(crate) async fn test_pool() -> sqlx::SqlitePool {
    let pool = create_memory_pool().await.expect("pool creation failed");
    migrations::run(&pool).await.expect("migrations failed");
    pool
}

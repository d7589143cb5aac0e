//! PostgreSQL persistence adapters.
//!
//! - [`DbPool`] and [`PoolConfig`]: async connection pooling.
//! - [`DieselUserRepository`] and [`DieselFollowRepository`]: the driven port
//!   implementations; every write runs in its own transaction.
//! - [`run_pending_migrations`]: embedded schema migrations.

mod diesel_error_mapping;
mod diesel_follow_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_follow_repository::DieselFollowRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DEFAULT_CONNECTION_TIMEOUT, DEFAULT_MAX_SIZE, DbPool, PoolConfig, PoolError};

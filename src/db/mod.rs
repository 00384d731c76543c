//! Database layer
//!
//! Storage for the park catalog. Two backends are supported:
//! - SQLite (default, single file next to the binary)
//! - MySQL
//!
//! The backend is selected by [`crate::config::DatabaseConfig::driver`]; the
//! rest of the application only sees the `DatabasePool` trait.
//!
//! # Usage
//!
//! ```ignore
//! use tere_verde::config::DatabaseConfig;
//! use tere_verde::db::{create_pool, migrations};
//!
//! let pool = create_pool(&DatabaseConfig::default()).await?;
//! migrations::run_migrations(&pool).await?;
//! pool.ping().await?;
//! ```

pub mod migrations;
pub mod pool;
pub mod repositories;

pub use pool::{
    create_pool, create_test_pool, DatabasePool, DynDatabasePool, MysqlDatabase, SqliteDatabase,
};

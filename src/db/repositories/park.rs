//! Park repository
//!
//! Read-only access to parks.
//!
//! This module provides:
//! - `ParkRepository` trait defining the interface for park data access
//! - `SqlxParkRepository` implementing the trait for SQLite and MySQL
//! - row mappers reused by repositories that join `parques`

use crate::config::DatabaseDriver;
use crate::db::pool::{mysql, sqlite};
use crate::db::DynDatabasePool;
use crate::models::Park;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{mysql::MySqlRow, sqlite::SqliteRow, MySqlPool, Row, SqlitePool};
use std::sync::Arc;

/// Park repository trait
#[async_trait]
pub trait ParkRepository: Send + Sync {
    /// List all parks, in id order
    async fn list(&self) -> Result<Vec<Park>>;

    /// Get park by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<Park>>;
}

/// SQLx-based park repository implementation
pub struct SqlxParkRepository {
    pool: DynDatabasePool,
}

impl SqlxParkRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn ParkRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl ParkRepository for SqlxParkRepository {
    async fn list(&self) -> Result<Vec<Park>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => list_parks_sqlite(sqlite(&self.pool)?).await,
            DatabaseDriver::Mysql => list_parks_mysql(mysql(&self.pool)?).await,
        }
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Park>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => get_park_by_id_sqlite(sqlite(&self.pool)?, id).await,
            DatabaseDriver::Mysql => get_park_by_id_mysql(mysql(&self.pool)?, id).await,
        }
    }
}

// ============================================================================
// SQLite implementations
// ============================================================================

async fn list_parks_sqlite(pool: &SqlitePool) -> Result<Vec<Park>> {
    let rows = sqlx::query("SELECT id, nome, descricao, localizacao FROM parques ORDER BY id")
        .fetch_all(pool)
        .await
        .context("Failed to list parks")?;

    rows.iter().map(|row| park_from_sqlite_row(row, "")).collect()
}

async fn get_park_by_id_sqlite(pool: &SqlitePool, id: i64) -> Result<Option<Park>> {
    let row = sqlx::query("SELECT id, nome, descricao, localizacao FROM parques WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get park by ID")?;

    row.map(|r| park_from_sqlite_row(&r, "")).transpose()
}

/// Map the park columns of a row, each named `{prefix}{column}`.
pub(super) fn park_from_sqlite_row(row: &SqliteRow, prefix: &str) -> Result<Park> {
    Ok(Park {
        id: row.try_get(format!("{prefix}id").as_str())?,
        name: row.try_get(format!("{prefix}nome").as_str())?,
        description: row.try_get(format!("{prefix}descricao").as_str())?,
        location: row.try_get(format!("{prefix}localizacao").as_str())?,
    })
}

/// Like [`park_from_sqlite_row`] for a LEFT JOIN: a NULL id means no park.
pub(super) fn optional_park_from_sqlite_row(row: &SqliteRow, prefix: &str) -> Result<Option<Park>> {
    let id: Option<i64> = row.try_get(format!("{prefix}id").as_str())?;
    match id {
        Some(_) => park_from_sqlite_row(row, prefix).map(Some),
        None => Ok(None),
    }
}

// ============================================================================
// MySQL implementations
// ============================================================================

async fn list_parks_mysql(pool: &MySqlPool) -> Result<Vec<Park>> {
    let rows = sqlx::query("SELECT id, nome, descricao, localizacao FROM parques ORDER BY id")
        .fetch_all(pool)
        .await
        .context("Failed to list parks")?;

    rows.iter().map(|row| park_from_mysql_row(row, "")).collect()
}

async fn get_park_by_id_mysql(pool: &MySqlPool, id: i64) -> Result<Option<Park>> {
    let row = sqlx::query("SELECT id, nome, descricao, localizacao FROM parques WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get park by ID")?;

    row.map(|r| park_from_mysql_row(&r, "")).transpose()
}

pub(super) fn park_from_mysql_row(row: &MySqlRow, prefix: &str) -> Result<Park> {
    Ok(Park {
        id: row.try_get(format!("{prefix}id").as_str())?,
        name: row.try_get(format!("{prefix}nome").as_str())?,
        description: row.try_get(format!("{prefix}descricao").as_str())?,
        location: row.try_get(format!("{prefix}localizacao").as_str())?,
    })
}

pub(super) fn optional_park_from_mysql_row(row: &MySqlRow, prefix: &str) -> Result<Option<Park>> {
    let id: Option<i64> = row.try_get(format!("{prefix}id").as_str())?;
    match id {
        Some(_) => park_from_mysql_row(row, prefix).map(Some),
        None => Ok(None),
    }
}

//! Opening hours repository
//!
//! Opening hours are only read through their park, so the repository exposes
//! per-park lookups instead of a global listing. Rows always come back in
//! week order (Monday first), then by id.

use crate::config::DatabaseDriver;
use crate::db::pool::{mysql, sqlite};
use crate::db::DynDatabasePool;
use crate::models::OpeningHours;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{mysql::MySqlRow, sqlite::SqliteRow, MySqlPool, Row, SqlitePool};
use std::sync::Arc;

/// Week position of a stored day code. Codes sort alphabetically otherwise.
const DAY_ORDER: &str = "CASE dia \
    WHEN 'SEG' THEN 1 WHEN 'TER' THEN 2 WHEN 'QUA' THEN 3 WHEN 'QUI' THEN 4 \
    WHEN 'SEX' THEN 5 WHEN 'SAB' THEN 6 WHEN 'DOM' THEN 7 ELSE 8 END";

/// Opening hours repository trait
#[async_trait]
pub trait OpeningHoursRepository: Send + Sync {
    /// Opening hours of one park
    async fn list_by_park(&self, park_id: i64) -> Result<Vec<OpeningHours>>;

    /// Opening hours of several parks, grouped by park id
    async fn list_by_parks(&self, park_ids: &[i64]) -> Result<Vec<OpeningHours>>;
}

/// SQLx-based opening hours repository implementation
pub struct SqlxOpeningHoursRepository {
    pool: DynDatabasePool,
}

impl SqlxOpeningHoursRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn OpeningHoursRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl OpeningHoursRepository for SqlxOpeningHoursRepository {
    async fn list_by_park(&self, park_id: i64) -> Result<Vec<OpeningHours>> {
        self.list_by_parks(&[park_id]).await
    }

    async fn list_by_parks(&self, park_ids: &[i64]) -> Result<Vec<OpeningHours>> {
        if park_ids.is_empty() {
            return Ok(Vec::new());
        }

        match self.pool.driver() {
            DatabaseDriver::Sqlite => list_by_parks_sqlite(sqlite(&self.pool)?, park_ids).await,
            DatabaseDriver::Mysql => list_by_parks_mysql(mysql(&self.pool)?, park_ids).await,
        }
    }
}

fn list_by_parks_sql(count: usize) -> String {
    let placeholders = vec!["?"; count].join(", ");
    format!(
        "SELECT id, dia, hora_abertura, hora_fechamento, parque_id \
         FROM horarios_funcionamento \
         WHERE parque_id IN ({}) \
         ORDER BY parque_id, {}, id",
        placeholders, DAY_ORDER
    )
}

// ============================================================================
// SQLite implementations
// ============================================================================

async fn list_by_parks_sqlite(pool: &SqlitePool, park_ids: &[i64]) -> Result<Vec<OpeningHours>> {
    let sql = list_by_parks_sql(park_ids.len());
    let mut query = sqlx::query(&sql);
    for id in park_ids {
        query = query.bind(*id);
    }

    let rows = query
        .fetch_all(pool)
        .await
        .context("Failed to list opening hours")?;

    rows.iter().map(row_to_opening_hours_sqlite).collect()
}

fn row_to_opening_hours_sqlite(row: &SqliteRow) -> Result<OpeningHours> {
    let day: String = row.try_get("dia")?;
    Ok(OpeningHours {
        id: row.try_get("id")?,
        park_id: row.try_get("parque_id")?,
        day: day.parse()?,
        opens_at: row.try_get("hora_abertura")?,
        closes_at: row.try_get("hora_fechamento")?,
    })
}

// ============================================================================
// MySQL implementations
// ============================================================================

async fn list_by_parks_mysql(pool: &MySqlPool, park_ids: &[i64]) -> Result<Vec<OpeningHours>> {
    let sql = list_by_parks_sql(park_ids.len());
    let mut query = sqlx::query(&sql);
    for id in park_ids {
        query = query.bind(*id);
    }

    let rows = query
        .fetch_all(pool)
        .await
        .context("Failed to list opening hours")?;

    rows.iter().map(row_to_opening_hours_mysql).collect()
}

fn row_to_opening_hours_mysql(row: &MySqlRow) -> Result<OpeningHours> {
    let day: String = row.try_get("dia")?;
    Ok(OpeningHours {
        id: row.try_get("id")?,
        park_id: row.try_get("parque_id")?,
        day: day.parse()?,
        opens_at: row.try_get("hora_abertura")?,
        closes_at: row.try_get("hora_fechamento")?,
    })
}

//! Trail repository
//!
//! Trails are always read together with their park (inner join, the park is
//! mandatory), so the nested summary reflects the park as currently stored.
//!
//! `extensao_km` is read as an integer number of hundredths to keep the
//! fixed-point value exact across both drivers.

use crate::config::DatabaseDriver;
use crate::db::pool::{mysql, sqlite};
use crate::db::DynDatabasePool;
use crate::models::{Difficulty, LengthKm, Trail, TrailWithPark};
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{mysql::MySqlRow, sqlite::SqliteRow, MySqlPool, Row, SqlitePool};
use std::sync::Arc;

use super::park::{park_from_mysql_row, park_from_sqlite_row};

/// Trail repository trait
#[async_trait]
pub trait TrailRepository: Send + Sync {
    /// List all trails with their parks, in id order
    async fn list(&self) -> Result<Vec<TrailWithPark>>;

    /// Get trail by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<TrailWithPark>>;
}

/// SQLx-based trail repository implementation
pub struct SqlxTrailRepository {
    pool: DynDatabasePool,
}

impl SqlxTrailRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn TrailRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl TrailRepository for SqlxTrailRepository {
    async fn list(&self) -> Result<Vec<TrailWithPark>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => list_trails_sqlite(sqlite(&self.pool)?).await,
            DatabaseDriver::Mysql => list_trails_mysql(mysql(&self.pool)?).await,
        }
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<TrailWithPark>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => get_trail_by_id_sqlite(sqlite(&self.pool)?, id).await,
            DatabaseDriver::Mysql => get_trail_by_id_mysql(mysql(&self.pool)?, id).await,
        }
    }
}

// ============================================================================
// SQLite implementations
// ============================================================================

const SELECT_TRAILS_SQLITE: &str = r#"
    SELECT t.id, t.parque_id, t.nome, t.descricao,
           CAST(ROUND(t.extensao_km * 100) AS INTEGER) AS extensao_centesimos,
           t.dificuldade, t.status,
           p.id AS p_id, p.nome AS p_nome, p.descricao AS p_descricao,
           p.localizacao AS p_localizacao
    FROM trilhas t
    JOIN parques p ON p.id = t.parque_id
"#;

async fn list_trails_sqlite(pool: &SqlitePool) -> Result<Vec<TrailWithPark>> {
    let sql = format!("{} ORDER BY t.id", SELECT_TRAILS_SQLITE);
    let rows = sqlx::query(&sql)
        .fetch_all(pool)
        .await
        .context("Failed to list trails")?;

    rows.iter()
        .map(|row| trail_with_park_from_sqlite_row(row, "", "p_"))
        .collect()
}

async fn get_trail_by_id_sqlite(pool: &SqlitePool, id: i64) -> Result<Option<TrailWithPark>> {
    let sql = format!("{} WHERE t.id = ?", SELECT_TRAILS_SQLITE);
    let row = sqlx::query(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get trail by ID")?;

    row.map(|r| trail_with_park_from_sqlite_row(&r, "", "p_"))
        .transpose()
}

/// Map trail columns named `{trail_prefix}{column}` and park columns named
/// `{park_prefix}{column}`.
pub(super) fn trail_with_park_from_sqlite_row(
    row: &SqliteRow,
    trail_prefix: &str,
    park_prefix: &str,
) -> Result<TrailWithPark> {
    let col = |name: &str| format!("{trail_prefix}{name}");
    let status: String = row.try_get(col("status").as_str())?;

    let trail = Trail {
        id: row.try_get(col("id").as_str())?,
        park_id: row.try_get(col("parque_id").as_str())?,
        name: row.try_get(col("nome").as_str())?,
        description: row.try_get(col("descricao").as_str())?,
        length_km: LengthKm::from_hundredths(row.try_get(col("extensao_centesimos").as_str())?),
        difficulty: Difficulty::from_code(row.try_get(col("dificuldade").as_str())?)?,
        status: status.parse()?,
    };

    Ok(TrailWithPark {
        trail,
        park: park_from_sqlite_row(row, park_prefix)?,
    })
}

// ============================================================================
// MySQL implementations
// ============================================================================

const SELECT_TRAILS_MYSQL: &str = r#"
    SELECT t.id, t.parque_id, t.nome, t.descricao,
           CAST(ROUND(t.extensao_km * 100) AS SIGNED) AS extensao_centesimos,
           CAST(t.dificuldade AS SIGNED) AS dificuldade, t.status,
           p.id AS p_id, p.nome AS p_nome, p.descricao AS p_descricao,
           p.localizacao AS p_localizacao
    FROM trilhas t
    JOIN parques p ON p.id = t.parque_id
"#;

async fn list_trails_mysql(pool: &MySqlPool) -> Result<Vec<TrailWithPark>> {
    let sql = format!("{} ORDER BY t.id", SELECT_TRAILS_MYSQL);
    let rows = sqlx::query(&sql)
        .fetch_all(pool)
        .await
        .context("Failed to list trails")?;

    rows.iter()
        .map(|row| trail_with_park_from_mysql_row(row, "", "p_"))
        .collect()
}

async fn get_trail_by_id_mysql(pool: &MySqlPool, id: i64) -> Result<Option<TrailWithPark>> {
    let sql = format!("{} WHERE t.id = ?", SELECT_TRAILS_MYSQL);
    let row = sqlx::query(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get trail by ID")?;

    row.map(|r| trail_with_park_from_mysql_row(&r, "", "p_"))
        .transpose()
}

pub(super) fn trail_with_park_from_mysql_row(
    row: &MySqlRow,
    trail_prefix: &str,
    park_prefix: &str,
) -> Result<TrailWithPark> {
    let col = |name: &str| format!("{trail_prefix}{name}");
    let status: String = row.try_get(col("status").as_str())?;

    let trail = Trail {
        id: row.try_get(col("id").as_str())?,
        park_id: row.try_get(col("parque_id").as_str())?,
        name: row.try_get(col("nome").as_str())?,
        description: row.try_get(col("descricao").as_str())?,
        length_km: LengthKm::from_hundredths(row.try_get(col("extensao_centesimos").as_str())?),
        difficulty: Difficulty::from_code(row.try_get(col("dificuldade").as_str())?)?,
        status: status.parse()?,
    };

    Ok(TrailWithPark {
        trail,
        park: park_from_mysql_row(row, park_prefix)?,
    })
}

//! News repository
//!
//! News items are listed by publication date, newest first. Each row is
//! joined with its own park and with its trail (plus the trail's park), all
//! optional.

use crate::config::DatabaseDriver;
use crate::db::pool::{mysql, sqlite};
use crate::db::DynDatabasePool;
use crate::models::{News, NewsWithRelations};
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{mysql::MySqlRow, sqlite::SqliteRow, MySqlPool, Row, SqlitePool};
use std::sync::Arc;

use super::park::{optional_park_from_mysql_row, optional_park_from_sqlite_row};
use super::trail::{trail_with_park_from_mysql_row, trail_with_park_from_sqlite_row};

/// News repository trait
#[async_trait]
pub trait NewsRepository: Send + Sync {
    /// List all news, most recent publication first
    async fn list(&self) -> Result<Vec<NewsWithRelations>>;

    /// Get news item by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<NewsWithRelations>>;
}

/// SQLx-based news repository implementation
pub struct SqlxNewsRepository {
    pool: DynDatabasePool,
}

impl SqlxNewsRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn NewsRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl NewsRepository for SqlxNewsRepository {
    async fn list(&self) -> Result<Vec<NewsWithRelations>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => list_news_sqlite(sqlite(&self.pool)?).await,
            DatabaseDriver::Mysql => list_news_mysql(mysql(&self.pool)?).await,
        }
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<NewsWithRelations>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => get_news_by_id_sqlite(sqlite(&self.pool)?, id).await,
            DatabaseDriver::Mysql => get_news_by_id_mysql(mysql(&self.pool)?, id).await,
        }
    }
}

// Column aliases: `np_` news park, `t_` trail, `tp_` trail park.

// ============================================================================
// SQLite implementations
// ============================================================================

const SELECT_NEWS_SQLITE: &str = r#"
    SELECT n.id, n.parque_id, n.trilha_id, n.titulo, n.conteudo, n.data_publicacao,
           np.id AS np_id, np.nome AS np_nome, np.descricao AS np_descricao,
           np.localizacao AS np_localizacao,
           t.id AS t_id, t.parque_id AS t_parque_id, t.nome AS t_nome,
           t.descricao AS t_descricao,
           CAST(ROUND(t.extensao_km * 100) AS INTEGER) AS t_extensao_centesimos,
           t.dificuldade AS t_dificuldade, t.status AS t_status,
           tp.id AS tp_id, tp.nome AS tp_nome, tp.descricao AS tp_descricao,
           tp.localizacao AS tp_localizacao
    FROM novidades n
    LEFT JOIN parques np ON np.id = n.parque_id
    LEFT JOIN trilhas t ON t.id = n.trilha_id
    LEFT JOIN parques tp ON tp.id = t.parque_id
"#;

async fn list_news_sqlite(pool: &SqlitePool) -> Result<Vec<NewsWithRelations>> {
    let sql = format!("{} ORDER BY n.data_publicacao DESC, n.id", SELECT_NEWS_SQLITE);
    let rows = sqlx::query(&sql)
        .fetch_all(pool)
        .await
        .context("Failed to list news")?;

    rows.iter().map(row_to_news_sqlite).collect()
}

async fn get_news_by_id_sqlite(pool: &SqlitePool, id: i64) -> Result<Option<NewsWithRelations>> {
    let sql = format!("{} WHERE n.id = ?", SELECT_NEWS_SQLITE);
    let row = sqlx::query(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get news by ID")?;

    row.as_ref().map(row_to_news_sqlite).transpose()
}

fn row_to_news_sqlite(row: &SqliteRow) -> Result<NewsWithRelations> {
    let trail_id: Option<i64> = row.try_get("t_id")?;
    let trail = match trail_id {
        Some(_) => Some(trail_with_park_from_sqlite_row(row, "t_", "tp_")?),
        None => None,
    };

    Ok(NewsWithRelations {
        news: News {
            id: row.try_get("id")?,
            park_id: row.try_get("parque_id")?,
            trail_id: row.try_get("trilha_id")?,
            title: row.try_get("titulo")?,
            content: row.try_get("conteudo")?,
            published_on: row.try_get("data_publicacao")?,
        },
        park: optional_park_from_sqlite_row(row, "np_")?,
        trail,
    })
}

// ============================================================================
// MySQL implementations
// ============================================================================

const SELECT_NEWS_MYSQL: &str = r#"
    SELECT n.id, n.parque_id, n.trilha_id, n.titulo, n.conteudo, n.data_publicacao,
           np.id AS np_id, np.nome AS np_nome, np.descricao AS np_descricao,
           np.localizacao AS np_localizacao,
           t.id AS t_id, t.parque_id AS t_parque_id, t.nome AS t_nome,
           t.descricao AS t_descricao,
           CAST(ROUND(t.extensao_km * 100) AS SIGNED) AS t_extensao_centesimos,
           CAST(t.dificuldade AS SIGNED) AS t_dificuldade, t.status AS t_status,
           tp.id AS tp_id, tp.nome AS tp_nome, tp.descricao AS tp_descricao,
           tp.localizacao AS tp_localizacao
    FROM novidades n
    LEFT JOIN parques np ON np.id = n.parque_id
    LEFT JOIN trilhas t ON t.id = n.trilha_id
    LEFT JOIN parques tp ON tp.id = t.parque_id
"#;

async fn list_news_mysql(pool: &MySqlPool) -> Result<Vec<NewsWithRelations>> {
    let sql = format!("{} ORDER BY n.data_publicacao DESC, n.id", SELECT_NEWS_MYSQL);
    let rows = sqlx::query(&sql)
        .fetch_all(pool)
        .await
        .context("Failed to list news")?;

    rows.iter().map(row_to_news_mysql).collect()
}

async fn get_news_by_id_mysql(pool: &MySqlPool, id: i64) -> Result<Option<NewsWithRelations>> {
    let sql = format!("{} WHERE n.id = ?", SELECT_NEWS_MYSQL);
    let row = sqlx::query(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get news by ID")?;

    row.as_ref().map(row_to_news_mysql).transpose()
}

fn row_to_news_mysql(row: &MySqlRow) -> Result<NewsWithRelations> {
    let trail_id: Option<i64> = row.try_get("t_id")?;
    let trail = match trail_id {
        Some(_) => Some(trail_with_park_from_mysql_row(row, "t_", "tp_")?),
        None => None,
    };

    Ok(NewsWithRelations {
        news: News {
            id: row.try_get("id")?,
            park_id: row.try_get("parque_id")?,
            trail_id: row.try_get("trilha_id")?,
            title: row.try_get("titulo")?,
            content: row.try_get("conteudo")?,
            published_on: row.try_get("data_publicacao")?,
        },
        park: optional_park_from_mysql_row(row, "np_")?,
        trail,
    })
}

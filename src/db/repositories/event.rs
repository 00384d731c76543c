//! Event repository
//!
//! Events are listed newest first (date descending, then id) and joined with
//! their park when one is still referenced.

use crate::config::DatabaseDriver;
use crate::db::pool::{mysql, sqlite};
use crate::db::DynDatabasePool;
use crate::models::{Event, EventWithPark};
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{mysql::MySqlRow, sqlite::SqliteRow, MySqlPool, Row, SqlitePool};
use std::sync::Arc;

use super::park::{optional_park_from_mysql_row, optional_park_from_sqlite_row};

/// Event repository trait
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// List all events, most recent date first
    async fn list(&self) -> Result<Vec<EventWithPark>>;

    /// Get event by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<EventWithPark>>;
}

/// SQLx-based event repository implementation
pub struct SqlxEventRepository {
    pool: DynDatabasePool,
}

impl SqlxEventRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn EventRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl EventRepository for SqlxEventRepository {
    async fn list(&self) -> Result<Vec<EventWithPark>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => list_events_sqlite(sqlite(&self.pool)?).await,
            DatabaseDriver::Mysql => list_events_mysql(mysql(&self.pool)?).await,
        }
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<EventWithPark>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => get_event_by_id_sqlite(sqlite(&self.pool)?, id).await,
            DatabaseDriver::Mysql => get_event_by_id_mysql(mysql(&self.pool)?, id).await,
        }
    }
}

/// Same statement for both drivers; only the row types differ.
const SELECT_EVENTS: &str = r#"
    SELECT e.id, e.parque_id, e.titulo, e.data, e.local, e.descricao, e.imagem_url,
           p.id AS p_id, p.nome AS p_nome, p.descricao AS p_descricao,
           p.localizacao AS p_localizacao
    FROM eventos e
    LEFT JOIN parques p ON p.id = e.parque_id
"#;

fn list_events_sql() -> String {
    format!("{} ORDER BY e.data DESC, e.id", SELECT_EVENTS)
}

fn get_event_sql() -> String {
    format!("{} WHERE e.id = ?", SELECT_EVENTS)
}

// ============================================================================
// SQLite implementations
// ============================================================================

async fn list_events_sqlite(pool: &SqlitePool) -> Result<Vec<EventWithPark>> {
    let rows = sqlx::query(&list_events_sql())
        .fetch_all(pool)
        .await
        .context("Failed to list events")?;

    rows.iter().map(row_to_event_sqlite).collect()
}

async fn get_event_by_id_sqlite(pool: &SqlitePool, id: i64) -> Result<Option<EventWithPark>> {
    let row = sqlx::query(&get_event_sql())
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get event by ID")?;

    row.as_ref().map(row_to_event_sqlite).transpose()
}

fn row_to_event_sqlite(row: &SqliteRow) -> Result<EventWithPark> {
    Ok(EventWithPark {
        event: Event {
            id: row.try_get("id")?,
            park_id: row.try_get("parque_id")?,
            title: row.try_get("titulo")?,
            date: row.try_get("data")?,
            location: row.try_get("local")?,
            description: row.try_get("descricao")?,
            image_url: row.try_get("imagem_url")?,
        },
        park: optional_park_from_sqlite_row(row, "p_")?,
    })
}

// ============================================================================
// MySQL implementations
// ============================================================================

async fn list_events_mysql(pool: &MySqlPool) -> Result<Vec<EventWithPark>> {
    let rows = sqlx::query(&list_events_sql())
        .fetch_all(pool)
        .await
        .context("Failed to list events")?;

    rows.iter().map(row_to_event_mysql).collect()
}

async fn get_event_by_id_mysql(pool: &MySqlPool, id: i64) -> Result<Option<EventWithPark>> {
    let row = sqlx::query(&get_event_sql())
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get event by ID")?;

    row.as_ref().map(row_to_event_mysql).transpose()
}

fn row_to_event_mysql(row: &MySqlRow) -> Result<EventWithPark> {
    Ok(EventWithPark {
        event: Event {
            id: row.try_get("id")?,
            park_id: row.try_get("parque_id")?,
            title: row.try_get("titulo")?,
            date: row.try_get("data")?,
            location: row.try_get("local")?,
            description: row.try_get("descricao")?,
            image_url: row.try_get("imagem_url")?,
        },
        park: optional_park_from_mysql_row(row, "p_")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::fixtures::{exec, insert_event, insert_park, migrated_pool};
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_list_events_newest_first() {
        let pool = migrated_pool().await;
        let repo = SqlxEventRepository::new(pool.clone());
        let park = insert_park(&pool, "Serra Verde", "Zone A").await;

        insert_event(&pool, Some(park), "Março", "2024-03-10").await;
        insert_event(&pool, Some(park), "Dezembro", "2024-12-01").await;
        insert_event(&pool, None, "Janeiro", "2025-01-15").await;
        insert_event(&pool, Some(park), "Março bis", "2024-03-10").await;

        let titles: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.event.title)
            .collect();

        assert_eq!(titles, vec!["Janeiro", "Dezembro", "Março", "Março bis"]);
    }

    #[tokio::test]
    async fn test_get_event_with_park() {
        let pool = migrated_pool().await;
        let repo = SqlxEventRepository::new(pool.clone());
        let park = insert_park(&pool, "Serra Verde", "Zone A").await;
        let id = insert_event(&pool, Some(park), "Observação de aves", "2024-08-20").await;

        let found = repo.get_by_id(id).await.unwrap().expect("Event should exist");

        assert_eq!(found.event.park_id, Some(park));
        assert_eq!(found.event.date, NaiveDate::from_ymd_opt(2024, 8, 20).unwrap());
        assert_eq!(found.event.location, "Centro de Visitantes");
        assert_eq!(found.event.image_url, "");
        assert_eq!(found.park.map(|p| p.name), Some("Serra Verde".to_string()));
    }

    #[tokio::test]
    async fn test_event_survives_park_deletion() {
        let pool = migrated_pool().await;
        let repo = SqlxEventRepository::new(pool.clone());
        let park = insert_park(&pool, "Serra Verde", "Zone A").await;
        let id = insert_event(&pool, Some(park), "Festival", "2024-08-20").await;

        exec(&pool, "DELETE FROM parques").await;

        let found = repo.get_by_id(id).await.unwrap().expect("Event should survive");
        assert_eq!(found.event.park_id, None);
        assert!(found.park.is_none());
        assert_eq!(found.to_string(), "Festival");
    }

    #[tokio::test]
    async fn test_get_event_not_found() {
        let pool = migrated_pool().await;
        let repo = SqlxEventRepository::new(pool);

        assert!(repo.get_by_id(1).await.unwrap().is_none());
    }
}

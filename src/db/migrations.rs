//! Database migrations
//!
//! Migrations are embedded in the binary as SQL strings, one variant per
//! supported driver, and tracked in the `_migrations` table.
//!
//! # Usage
//!
//! ```ignore
//! use tere_verde::db::{create_pool, migrations};
//!
//! let pool = create_pool(&config).await?;
//! migrations::run_migrations(&pool).await?;
//! ```
//!
//! Referential rules live in the schema itself: opening hours and trails are
//! deleted with their park, while events and news keep existing with their
//! references set to NULL.

use anyhow::{Context, Result};
use sqlx::{MySqlPool, Row, SqlitePool};

use super::pool::{mysql, sqlite};
use super::DynDatabasePool;
use crate::config::DatabaseDriver;

/// A database migration with SQL for both SQLite and MySQL
#[derive(Debug, Clone)]
pub struct Migration {
    /// Migration version number (must be unique and sequential)
    pub version: i32,
    /// Human-readable migration name
    pub name: &'static str,
    /// SQL statements for SQLite
    pub up_sqlite: &'static str,
    /// SQL statements for MySQL
    pub up_mysql: &'static str,
}

/// Migration record stored in the database
#[derive(Debug, Clone)]
pub struct MigrationRecord {
    pub version: i64,
    pub name: String,
}

/// All migrations, in application order.
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "create_parques",
        up_sqlite: r#"
            CREATE TABLE IF NOT EXISTS parques (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                nome VARCHAR(100) NOT NULL,
                descricao TEXT NOT NULL,
                localizacao VARCHAR(255) NOT NULL
            );
        "#,
        up_mysql: r#"
            CREATE TABLE IF NOT EXISTS parques (
                id BIGINT PRIMARY KEY AUTO_INCREMENT,
                nome VARCHAR(100) NOT NULL,
                descricao TEXT NOT NULL,
                localizacao VARCHAR(255) NOT NULL
            );
        "#,
    },
    Migration {
        version: 2,
        name: "create_horarios_funcionamento",
        up_sqlite: r#"
            CREATE TABLE IF NOT EXISTS horarios_funcionamento (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                dia VARCHAR(3) NOT NULL CHECK (dia IN ('SEG', 'TER', 'QUA', 'QUI', 'SEX', 'SAB', 'DOM')),
                hora_abertura TIME NOT NULL,
                hora_fechamento TIME NOT NULL,
                parque_id INTEGER NOT NULL,
                FOREIGN KEY (parque_id) REFERENCES parques(id) ON DELETE CASCADE
            );
            CREATE INDEX IF NOT EXISTS idx_horarios_parque_id ON horarios_funcionamento(parque_id);
        "#,
        up_mysql: r#"
            CREATE TABLE IF NOT EXISTS horarios_funcionamento (
                id BIGINT PRIMARY KEY AUTO_INCREMENT,
                dia VARCHAR(3) NOT NULL CHECK (dia IN ('SEG', 'TER', 'QUA', 'QUI', 'SEX', 'SAB', 'DOM')),
                hora_abertura TIME NOT NULL,
                hora_fechamento TIME NOT NULL,
                parque_id BIGINT NOT NULL,
                FOREIGN KEY (parque_id) REFERENCES parques(id) ON DELETE CASCADE
            );
            CREATE INDEX idx_horarios_parque_id ON horarios_funcionamento(parque_id);
        "#,
    },
    Migration {
        version: 3,
        name: "create_trilhas",
        up_sqlite: r#"
            CREATE TABLE IF NOT EXISTS trilhas (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                parque_id INTEGER NOT NULL,
                nome VARCHAR(100) NOT NULL,
                descricao TEXT NOT NULL DEFAULT '',
                extensao_km DECIMAL(5, 2) NOT NULL,
                dificuldade INTEGER NOT NULL DEFAULT 2 CHECK (dificuldade IN (1, 2, 3)),
                status VARCHAR(15) NOT NULL DEFAULT 'ABERTA' CHECK (status IN ('ABERTA', 'FECHADA', 'EM_MANUTENCAO')),
                FOREIGN KEY (parque_id) REFERENCES parques(id) ON DELETE CASCADE
            );
            CREATE INDEX IF NOT EXISTS idx_trilhas_parque_id ON trilhas(parque_id);
        "#,
        up_mysql: r#"
            CREATE TABLE IF NOT EXISTS trilhas (
                id BIGINT PRIMARY KEY AUTO_INCREMENT,
                parque_id BIGINT NOT NULL,
                nome VARCHAR(100) NOT NULL,
                descricao TEXT NOT NULL DEFAULT (''),
                extensao_km DECIMAL(5, 2) NOT NULL,
                dificuldade INT NOT NULL DEFAULT 2 CHECK (dificuldade IN (1, 2, 3)),
                status VARCHAR(15) NOT NULL DEFAULT 'ABERTA' CHECK (status IN ('ABERTA', 'FECHADA', 'EM_MANUTENCAO')),
                FOREIGN KEY (parque_id) REFERENCES parques(id) ON DELETE CASCADE
            );
            CREATE INDEX idx_trilhas_parque_id ON trilhas(parque_id);
        "#,
    },
    Migration {
        version: 4,
        name: "create_eventos",
        up_sqlite: r#"
            CREATE TABLE IF NOT EXISTS eventos (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                parque_id INTEGER,
                titulo VARCHAR(100) NOT NULL,
                data DATE NOT NULL,
                local VARCHAR(255) NOT NULL,
                descricao TEXT NOT NULL,
                imagem_url VARCHAR(200) NOT NULL DEFAULT '',
                FOREIGN KEY (parque_id) REFERENCES parques(id) ON DELETE SET NULL
            );
            CREATE INDEX IF NOT EXISTS idx_eventos_data ON eventos(data);
        "#,
        up_mysql: r#"
            CREATE TABLE IF NOT EXISTS eventos (
                id BIGINT PRIMARY KEY AUTO_INCREMENT,
                parque_id BIGINT NULL,
                titulo VARCHAR(100) NOT NULL,
                data DATE NOT NULL,
                local VARCHAR(255) NOT NULL,
                descricao TEXT NOT NULL,
                imagem_url VARCHAR(200) NOT NULL DEFAULT '',
                FOREIGN KEY (parque_id) REFERENCES parques(id) ON DELETE SET NULL
            );
            CREATE INDEX idx_eventos_data ON eventos(data);
        "#,
    },
    Migration {
        version: 5,
        name: "create_novidades",
        up_sqlite: r#"
            CREATE TABLE IF NOT EXISTS novidades (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                parque_id INTEGER,
                trilha_id INTEGER,
                titulo VARCHAR(100) NOT NULL,
                conteudo TEXT NOT NULL,
                data_publicacao DATE NOT NULL DEFAULT (date('now')),
                FOREIGN KEY (parque_id) REFERENCES parques(id) ON DELETE SET NULL,
                FOREIGN KEY (trilha_id) REFERENCES trilhas(id) ON DELETE SET NULL
            );
            CREATE INDEX IF NOT EXISTS idx_novidades_data_publicacao ON novidades(data_publicacao);
        "#,
        up_mysql: r#"
            CREATE TABLE IF NOT EXISTS novidades (
                id BIGINT PRIMARY KEY AUTO_INCREMENT,
                parque_id BIGINT NULL,
                trilha_id BIGINT NULL,
                titulo VARCHAR(100) NOT NULL,
                conteudo TEXT NOT NULL,
                data_publicacao DATE NOT NULL DEFAULT (CURRENT_DATE),
                FOREIGN KEY (parque_id) REFERENCES parques(id) ON DELETE SET NULL,
                FOREIGN KEY (trilha_id) REFERENCES trilhas(id) ON DELETE SET NULL
            );
            CREATE INDEX idx_novidades_data_publicacao ON novidades(data_publicacao);
        "#,
    },
];

/// Run all pending migrations
///
/// Creates the tracking table if needed, then applies every migration whose
/// version is not recorded yet, in order.
///
/// # Returns
///
/// Number of migrations applied
pub async fn run_migrations(pool: &DynDatabasePool) -> Result<usize> {
    create_migrations_table(pool).await?;

    let applied = get_applied_migrations(pool).await?;
    let applied_versions: Vec<i64> = applied.iter().map(|m| m.version).collect();

    let mut count = 0;

    for migration in MIGRATIONS {
        if !applied_versions.contains(&i64::from(migration.version)) {
            tracing::info!(
                "Applying migration {}: {}",
                migration.version,
                migration.name
            );
            apply_migration(pool, migration)
                .await
                .with_context(|| format!("Failed to apply migration: {}", migration.name))?;
            count += 1;
        }
    }

    if count > 0 {
        tracing::info!("Applied {} migration(s)", count);
    } else {
        tracing::debug!("No pending migrations");
    }

    Ok(count)
}

/// Create the migrations tracking table if it doesn't exist
async fn create_migrations_table(pool: &DynDatabasePool) -> Result<()> {
    let sql = match pool.driver() {
        DatabaseDriver::Sqlite => {
            r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version INTEGER PRIMARY KEY,
                name VARCHAR(255) NOT NULL UNIQUE,
                applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#
        }
        DatabaseDriver::Mysql => {
            r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version BIGINT PRIMARY KEY,
                name VARCHAR(255) NOT NULL UNIQUE,
                applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#
        }
    };

    pool.execute(sql).await?;
    Ok(())
}

async fn get_applied_migrations(pool: &DynDatabasePool) -> Result<Vec<MigrationRecord>> {
    match pool.driver() {
        DatabaseDriver::Sqlite => get_applied_migrations_sqlite(sqlite(pool)?).await,
        DatabaseDriver::Mysql => get_applied_migrations_mysql(mysql(pool)?).await,
    }
}

async fn get_applied_migrations_sqlite(pool: &SqlitePool) -> Result<Vec<MigrationRecord>> {
    let rows = sqlx::query("SELECT version, name FROM _migrations ORDER BY version")
        .fetch_all(pool)
        .await
        .context("Failed to read applied migrations")?;

    rows.iter()
        .map(|row| {
            Ok(MigrationRecord {
                version: row.try_get("version")?,
                name: row.try_get("name")?,
            })
        })
        .collect()
}

async fn get_applied_migrations_mysql(pool: &MySqlPool) -> Result<Vec<MigrationRecord>> {
    let rows = sqlx::query("SELECT version, name FROM _migrations ORDER BY version")
        .fetch_all(pool)
        .await
        .context("Failed to read applied migrations")?;

    rows.iter()
        .map(|row| {
            Ok(MigrationRecord {
                version: row.try_get("version")?,
                name: row.try_get("name")?,
            })
        })
        .collect()
}

async fn apply_migration(pool: &DynDatabasePool, migration: &Migration) -> Result<()> {
    match pool.driver() {
        DatabaseDriver::Sqlite => apply_migration_sqlite(sqlite(pool)?, migration).await,
        DatabaseDriver::Mysql => apply_migration_mysql(mysql(pool)?, migration).await,
    }
}

async fn apply_migration_sqlite(pool: &SqlitePool, migration: &Migration) -> Result<()> {
    for statement in split_sql_statements(migration.up_sqlite) {
        sqlx::query(statement)
            .execute(pool)
            .await
            .with_context(|| format!("Failed to execute: {}", truncate_sql(statement)))?;
    }

    sqlx::query("INSERT INTO _migrations (version, name) VALUES (?, ?)")
        .bind(migration.version)
        .bind(migration.name)
        .execute(pool)
        .await?;

    Ok(())
}

async fn apply_migration_mysql(pool: &MySqlPool, migration: &Migration) -> Result<()> {
    for statement in split_sql_statements(migration.up_mysql) {
        sqlx::query(statement)
            .execute(pool)
            .await
            .with_context(|| format!("Failed to execute: {}", truncate_sql(statement)))?;
    }

    sqlx::query("INSERT INTO _migrations (version, name) VALUES (?, ?)")
        .bind(migration.version)
        .bind(migration.name)
        .execute(pool)
        .await?;

    Ok(())
}

/// Truncate SQL for error messages
fn truncate_sql(sql: &str) -> String {
    match sql.char_indices().nth(100) {
        Some((idx, _)) => format!("{}...", &sql[..idx]),
        None => sql.to_string(),
    }
}

/// Split SQL into individual statements, dropping empty and comment-only ones.
fn split_sql_statements(sql: &str) -> Vec<&str> {
    sql.split(';')
        .map(str::trim)
        .filter(|stmt| !stmt.is_empty() && !is_comment_only(stmt))
        .collect()
}

/// Check if a string contains only SQL comments
fn is_comment_only(s: &str) -> bool {
    s.lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with("--"))
}

/// Get pending migrations count
pub async fn pending_count(pool: &DynDatabasePool) -> Result<usize> {
    create_migrations_table(pool).await?;

    let applied = get_applied_migrations(pool).await?;
    Ok(MIGRATIONS.len().saturating_sub(applied.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;

    async fn migrated_pool() -> DynDatabasePool {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        run_migrations(&pool).await.expect("Failed to run migrations");
        pool
    }

    async fn count(pool: &SqlitePool, sql: &str) -> i64 {
        sqlx::query_scalar(sql)
            .fetch_one(pool)
            .await
            .expect("Failed to count rows")
    }

    #[tokio::test]
    async fn test_run_migrations_is_idempotent() {
        let pool = create_test_pool().await.expect("Failed to create test pool");

        let count = run_migrations(&pool).await.expect("Failed to run migrations");
        assert_eq!(count, MIGRATIONS.len());

        let count = run_migrations(&pool).await.expect("Failed to run migrations");
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_pending_count() {
        let pool = create_test_pool().await.expect("Failed to create test pool");

        assert_eq!(pending_count(&pool).await.unwrap(), MIGRATIONS.len());

        run_migrations(&pool).await.expect("Failed to run migrations");

        assert_eq!(pending_count(&pool).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_all_tables_created() {
        let pool = migrated_pool().await;
        let sqlite_pool = pool.as_sqlite().unwrap();

        for table in ["parques", "horarios_funcionamento", "trilhas", "eventos", "novidades"] {
            let found: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
            )
            .bind(table)
            .fetch_one(sqlite_pool)
            .await
            .unwrap();
            assert_eq!(found, 1, "table {table} missing");
        }
    }

    #[tokio::test]
    async fn test_trail_defaults() {
        let pool = migrated_pool().await;
        let sqlite_pool = pool.as_sqlite().unwrap();

        sqlx::query("INSERT INTO parques (nome, descricao, localizacao) VALUES ('P', '', 'L')")
            .execute(sqlite_pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO trilhas (parque_id, nome, extensao_km) VALUES (1, 'T', 3.2)")
            .execute(sqlite_pool)
            .await
            .unwrap();

        let row = sqlx::query("SELECT descricao, dificuldade, status FROM trilhas")
            .fetch_one(sqlite_pool)
            .await
            .unwrap();
        let descricao: String = row.get("descricao");
        let dificuldade: i64 = row.get("dificuldade");
        let status: String = row.get("status");

        assert_eq!(descricao, "");
        assert_eq!(dificuldade, 2);
        assert_eq!(status, "ABERTA");
    }

    #[tokio::test]
    async fn test_unknown_codes_rejected_by_schema() {
        let pool = migrated_pool().await;
        let sqlite_pool = pool.as_sqlite().unwrap();

        sqlx::query("INSERT INTO parques (nome, descricao, localizacao) VALUES ('P', '', 'L')")
            .execute(sqlite_pool)
            .await
            .unwrap();

        let bad_day = sqlx::query(
            "INSERT INTO horarios_funcionamento (dia, hora_abertura, hora_fechamento, parque_id) VALUES ('XYZ', '08:00:00', '17:00:00', 1)",
        )
        .execute(sqlite_pool)
        .await;
        let bad_difficulty = sqlx::query(
            "INSERT INTO trilhas (parque_id, nome, extensao_km, dificuldade) VALUES (1, 'T', 1.0, 4)",
        )
        .execute(sqlite_pool)
        .await;
        let bad_status = sqlx::query(
            "INSERT INTO trilhas (parque_id, nome, extensao_km, status) VALUES (1, 'T', 1.0, 'ABERTO')",
        )
        .execute(sqlite_pool)
        .await;

        assert!(bad_day.is_err());
        assert!(bad_difficulty.is_err());
        assert!(bad_status.is_err());
    }

    #[tokio::test]
    async fn test_opening_hours_require_existing_park() {
        let pool = migrated_pool().await;

        let result = sqlx::query(
            "INSERT INTO horarios_funcionamento (dia, hora_abertura, hora_fechamento, parque_id) VALUES ('SEG', '08:00:00', '17:00:00', 999)",
        )
        .execute(pool.as_sqlite().unwrap())
        .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_delete_park_cascades_and_nullifies() {
        let pool = migrated_pool().await;
        let sqlite_pool = pool.as_sqlite().unwrap();

        for sql in [
            "INSERT INTO parques (nome, descricao, localizacao) VALUES ('P', '', 'L')",
            "INSERT INTO horarios_funcionamento (dia, hora_abertura, hora_fechamento, parque_id) VALUES ('SEG', '08:00:00', '17:00:00', 1)",
            "INSERT INTO trilhas (parque_id, nome, extensao_km) VALUES (1, 'T', 2.5)",
            "INSERT INTO eventos (parque_id, titulo, data, local, descricao) VALUES (1, 'E', '2024-05-01', 'L', 'D')",
            "INSERT INTO novidades (parque_id, trilha_id, titulo, conteudo) VALUES (1, 1, 'N', 'C')",
            "DELETE FROM parques WHERE id = 1",
        ] {
            sqlx::query(sql).execute(sqlite_pool).await.unwrap();
        }

        assert_eq!(count(sqlite_pool, "SELECT COUNT(*) FROM horarios_funcionamento").await, 0);
        assert_eq!(count(sqlite_pool, "SELECT COUNT(*) FROM trilhas").await, 0);
        assert_eq!(count(sqlite_pool, "SELECT COUNT(*) FROM eventos WHERE parque_id IS NULL").await, 1);
        assert_eq!(
            count(
                sqlite_pool,
                "SELECT COUNT(*) FROM novidades WHERE parque_id IS NULL AND trilha_id IS NULL"
            )
            .await,
            1
        );
    }

    #[tokio::test]
    async fn test_news_publication_date_defaults_to_today() {
        let pool = migrated_pool().await;
        let sqlite_pool = pool.as_sqlite().unwrap();

        sqlx::query("INSERT INTO novidades (titulo, conteudo) VALUES ('N', 'C')")
            .execute(sqlite_pool)
            .await
            .unwrap();

        let published: chrono::NaiveDate =
            sqlx::query_scalar("SELECT data_publicacao FROM novidades")
                .fetch_one(sqlite_pool)
                .await
                .unwrap();

        assert_eq!(published, chrono::Utc::now().date_naive());
    }

    #[test]
    fn test_split_sql_statements() {
        let sql = "CREATE TABLE a (id INT); CREATE TABLE b (id INT);";
        assert_eq!(split_sql_statements(sql).len(), 2);

        let sql_with_comments = "-- Comment\nCREATE TABLE a (id INT);\n-- trailing";
        assert_eq!(split_sql_statements(sql_with_comments).len(), 1);
    }

    #[test]
    fn test_is_comment_only() {
        assert!(is_comment_only("-- This is a comment"));
        assert!(is_comment_only("-- Line 1\n-- Line 2"));
        assert!(!is_comment_only("CREATE TABLE test"));
        assert!(!is_comment_only("-- Comment\nCREATE TABLE test"));
    }

    #[test]
    fn test_migration_versions_are_sequential() {
        for (idx, migration) in MIGRATIONS.iter().enumerate() {
            assert_eq!(migration.version as usize, idx + 1, "{}", migration.name);
        }
    }
}

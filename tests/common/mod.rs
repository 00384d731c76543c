//! Shared setup for HTTP integration tests.

#![allow(dead_code)]

use axum_test::TestServer;
use sqlx::SqlitePool;
use tere_verde::{
    api::{build_router, AppState},
    config::ServerConfig,
    db::{create_test_pool, migrations, DynDatabasePool},
};

pub struct TestApp {
    pub server: TestServer,
    pub pool: DynDatabasePool,
}

impl TestApp {
    pub async fn new() -> Self {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let app = build_router(
            AppState::new(pool.clone()),
            &ServerConfig::default().cors_origins,
        );
        let server = TestServer::new(app).expect("Failed to start test server");

        Self { server, pool }
    }

    fn sqlite(&self) -> &SqlitePool {
        self.pool.as_sqlite().expect("test pool is sqlite")
    }

    pub async fn exec(&self, sql: &str) {
        sqlx::query(sql)
            .execute(self.sqlite())
            .await
            .unwrap_or_else(|e| panic!("Failed to execute {sql}: {e}"));
    }

    pub async fn park(&self, id: i64, nome: &str, localizacao: &str) {
        sqlx::query("INSERT INTO parques (id, nome, descricao, localizacao) VALUES (?, ?, ?, ?)")
            .bind(id)
            .bind(nome)
            .bind(format!("Descrição de {nome}"))
            .bind(localizacao)
            .execute(self.sqlite())
            .await
            .expect("Failed to insert park");
    }

    pub async fn hours(&self, park_id: i64, dia: &str, abertura: &str, fechamento: &str) {
        sqlx::query(
            "INSERT INTO horarios_funcionamento (dia, hora_abertura, hora_fechamento, parque_id) VALUES (?, ?, ?, ?)",
        )
        .bind(dia)
        .bind(abertura)
        .bind(fechamento)
        .bind(park_id)
        .execute(self.sqlite())
        .await
        .expect("Failed to insert opening hours");
    }

    /// Trail with the storage defaults for description, difficulty and status.
    pub async fn default_trail(&self, id: i64, park_id: i64, nome: &str, extensao_km: &str) {
        sqlx::query("INSERT INTO trilhas (id, parque_id, nome, extensao_km) VALUES (?, ?, ?, CAST(? AS DECIMAL(5, 2)))")
            .bind(id)
            .bind(park_id)
            .bind(nome)
            .bind(extensao_km)
            .execute(self.sqlite())
            .await
            .expect("Failed to insert trail");
    }

    pub async fn trail(
        &self,
        id: i64,
        park_id: i64,
        nome: &str,
        extensao_km: &str,
        dificuldade: i64,
        status: &str,
    ) {
        sqlx::query(
            "INSERT INTO trilhas (id, parque_id, nome, descricao, extensao_km, dificuldade, status) VALUES (?, ?, ?, ?, CAST(? AS DECIMAL(5, 2)), ?, ?)",
        )
        .bind(id)
        .bind(park_id)
        .bind(nome)
        .bind(format!("Percurso {nome}"))
        .bind(extensao_km)
        .bind(dificuldade)
        .bind(status)
        .execute(self.sqlite())
        .await
        .expect("Failed to insert trail");
    }

    pub async fn event(&self, id: i64, park_id: Option<i64>, titulo: &str, data: &str) {
        sqlx::query(
            "INSERT INTO eventos (id, parque_id, titulo, data, local, descricao, imagem_url) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(park_id)
        .bind(titulo)
        .bind(data)
        .bind("Centro de Visitantes")
        .bind(format!("Sobre {titulo}"))
        .bind("https://example.org/evento.jpg")
        .execute(self.sqlite())
        .await
        .expect("Failed to insert event");
    }

    pub async fn news(
        &self,
        id: i64,
        park_id: Option<i64>,
        trail_id: Option<i64>,
        titulo: &str,
        data_publicacao: &str,
    ) {
        sqlx::query(
            "INSERT INTO novidades (id, parque_id, trilha_id, titulo, conteudo, data_publicacao) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(park_id)
        .bind(trail_id)
        .bind(titulo)
        .bind(format!("Conteúdo de {titulo}"))
        .bind(data_publicacao)
        .execute(self.sqlite())
        .await
        .expect("Failed to insert news");
    }
}

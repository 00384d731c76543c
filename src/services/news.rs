//! News service

use std::sync::Arc;

use super::CatalogError;
use crate::db::repositories::NewsRepository;
use crate::models::NewsWithRelations;

pub struct NewsService {
    repo: Arc<dyn NewsRepository>,
}

impl NewsService {
    pub fn new(repo: Arc<dyn NewsRepository>) -> Self {
        Self { repo }
    }

    /// All news, most recent publication first
    pub async fn list(&self) -> Result<Vec<NewsWithRelations>, CatalogError> {
        let news = self.repo.list().await?;
        tracing::debug!(count = news.len(), "Listed news");
        Ok(news)
    }

    pub async fn get(&self, id: i64) -> Result<NewsWithRelations, CatalogError> {
        let news = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found("News", id))?;

        tracing::debug!(news = %news, "Loaded news");
        Ok(news)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::fixtures::{insert_news, migrated_pool};
    use crate::db::repositories::SqlxNewsRepository;

    #[tokio::test]
    async fn test_list_and_get_news() {
        let pool = migrated_pool().await;
        let id = insert_news(&pool, None, None, "Boletim", "2024-01-10").await;
        let service = NewsService::new(SqlxNewsRepository::boxed(pool));

        assert_eq!(service.list().await.unwrap().len(), 1);
        assert_eq!(service.get(id).await.unwrap().to_string(), "Boletim");
    }

    #[tokio::test]
    async fn test_get_missing_news() {
        let pool = migrated_pool().await;
        let service = NewsService::new(SqlxNewsRepository::boxed(pool));

        let err = service.get(12).await.unwrap_err();
        assert_eq!(err.to_string(), "News not found: 12");
    }
}

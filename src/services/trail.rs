//! Trail service

use std::sync::Arc;

use super::CatalogError;
use crate::db::repositories::TrailRepository;
use crate::models::TrailWithPark;

pub struct TrailService {
    repo: Arc<dyn TrailRepository>,
}

impl TrailService {
    pub fn new(repo: Arc<dyn TrailRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<TrailWithPark>, CatalogError> {
        let trails = self.repo.list().await?;
        tracing::debug!(count = trails.len(), "Listed trails");
        Ok(trails)
    }

    pub async fn get(&self, id: i64) -> Result<TrailWithPark, CatalogError> {
        let trail = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Trail", id))?;

        tracing::debug!(trail = %trail, "Loaded trail");
        Ok(trail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::fixtures::{insert_park, insert_trail, migrated_pool};
    use crate::db::repositories::SqlxTrailRepository;
    use anyhow::Result;
    use async_trait::async_trait;

    /// Repository whose storage is always unreachable.
    struct BrokenRepository;

    #[async_trait]
    impl TrailRepository for BrokenRepository {
        async fn list(&self) -> Result<Vec<TrailWithPark>> {
            Err(anyhow::anyhow!("connection refused"))
        }

        async fn get_by_id(&self, _id: i64) -> Result<Option<TrailWithPark>> {
            Err(anyhow::anyhow!("connection refused"))
        }
    }

    #[tokio::test]
    async fn test_get_trail() {
        let pool = migrated_pool().await;
        let park = insert_park(&pool, "Serra Verde", "Zone A").await;
        let id = insert_trail(&pool, park, "Trail 1", "5.50", 2, "ABERTA").await;
        let service = TrailService::new(SqlxTrailRepository::boxed(pool));

        let trail = service.get(id).await.unwrap();

        assert_eq!(trail.to_string(), "Trail 1 (Serra Verde) - ABERTA - 5.50 km - 2");
    }

    #[tokio::test]
    async fn test_get_missing_trail() {
        let pool = migrated_pool().await;
        let service = TrailService::new(SqlxTrailRepository::boxed(pool));

        let err = service.get(3).await.unwrap_err();

        assert!(matches!(err, CatalogError::NotFound { resource: "Trail", id: 3 }));
        assert_eq!(err.to_string(), "Trail not found: 3");
    }

    #[tokio::test]
    async fn test_storage_failure_is_not_not_found() {
        let service = TrailService::new(Arc::new(BrokenRepository));

        assert!(matches!(service.list().await, Err(CatalogError::Storage(_))));
        assert!(matches!(service.get(1).await, Err(CatalogError::Storage(_))));
    }
}

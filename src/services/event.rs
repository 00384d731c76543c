//! Event service

use std::sync::Arc;

use super::CatalogError;
use crate::db::repositories::EventRepository;
use crate::models::EventWithPark;

pub struct EventService {
    repo: Arc<dyn EventRepository>,
}

impl EventService {
    pub fn new(repo: Arc<dyn EventRepository>) -> Self {
        Self { repo }
    }

    /// All events, most recent date first
    pub async fn list(&self) -> Result<Vec<EventWithPark>, CatalogError> {
        let events = self.repo.list().await?;
        tracing::debug!(count = events.len(), "Listed events");
        Ok(events)
    }

    pub async fn get(&self, id: i64) -> Result<EventWithPark, CatalogError> {
        let event = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Event", id))?;

        tracing::debug!(event = %event, "Loaded event");
        Ok(event)
    }
}

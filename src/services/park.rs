//! Park service
//!
//! Assembles parks with their opening hours. Listing uses a single batched
//! hours query for all parks instead of one query per park.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Context;

use super::CatalogError;
use crate::db::repositories::{OpeningHoursRepository, ParkRepository};
use crate::models::{OpeningHours, ParkWithHours};

pub struct ParkService {
    parks: Arc<dyn ParkRepository>,
    hours: Arc<dyn OpeningHoursRepository>,
}

impl ParkService {
    pub fn new(parks: Arc<dyn ParkRepository>, hours: Arc<dyn OpeningHoursRepository>) -> Self {
        Self { parks, hours }
    }

    /// All parks, each with its opening hours Monday first
    pub async fn list(&self) -> Result<Vec<ParkWithHours>, CatalogError> {
        let parks = self.parks.list().await?;
        let ids: Vec<i64> = parks.iter().map(|p| p.id).collect();

        let mut by_park: HashMap<i64, Vec<OpeningHours>> = HashMap::new();
        for hours in self
            .hours
            .list_by_parks(&ids)
            .await
            .context("Failed to load opening hours for parks")?
        {
            by_park.entry(hours.park_id).or_default().push(hours);
        }

        let parks: Vec<ParkWithHours> = parks
            .into_iter()
            .map(|park| {
                let hours = by_park.remove(&park.id).unwrap_or_default();
                ParkWithHours::new(park, hours)
            })
            .collect();

        tracing::debug!(count = parks.len(), "Listed parks");
        Ok(parks)
    }

    /// One park with its opening hours
    pub async fn get(&self, id: i64) -> Result<ParkWithHours, CatalogError> {
        let park = self
            .parks
            .get_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Park", id))?;

        let hours = self.hours.list_by_park(park.id).await?;
        tracing::debug!(park = %park, hours = hours.len(), "Loaded park");

        Ok(ParkWithHours::new(park, hours))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::fixtures::{insert_hours, insert_park, migrated_pool};
    use crate::db::repositories::{SqlxOpeningHoursRepository, SqlxParkRepository};
    use crate::db::DynDatabasePool;
    use crate::models::DayOfWeek;

    fn service(pool: &DynDatabasePool) -> ParkService {
        ParkService::new(
            SqlxParkRepository::boxed(pool.clone()),
            SqlxOpeningHoursRepository::boxed(pool.clone()),
        )
    }

    #[tokio::test]
    async fn test_list_attaches_hours_to_each_park() {
        let pool = migrated_pool().await;
        let first = insert_park(&pool, "Serra Verde", "Zone A").await;
        let second = insert_park(&pool, "Vale", "Zone B").await;
        let bare = insert_park(&pool, "Sem horário", "Zone C").await;

        insert_hours(&pool, second, "TER", "09:00:00", "16:00:00").await;
        insert_hours(&pool, first, "DOM", "07:00:00", "12:00:00").await;
        insert_hours(&pool, first, "SEG", "08:00:00", "17:00:00").await;

        let parks = service(&pool).list().await.unwrap();

        assert_eq!(parks.len(), 3);
        assert_eq!(parks[0].park.id, first);
        let days: Vec<DayOfWeek> = parks[0].opening_hours.iter().map(|h| h.day).collect();
        assert_eq!(days, vec![DayOfWeek::Monday, DayOfWeek::Sunday]);
        assert_eq!(parks[1].opening_hours.len(), 1);
        assert_eq!(parks[2].park.id, bare);
        assert!(parks[2].opening_hours.is_empty());
    }

    #[tokio::test]
    async fn test_get_park() {
        let pool = migrated_pool().await;
        let id = insert_park(&pool, "Serra Verde", "Zone A").await;
        insert_hours(&pool, id, "QUA", "08:00:00", "17:00:00").await;

        let found = service(&pool).get(id).await.unwrap();

        assert_eq!(found.park.name, "Serra Verde");
        assert_eq!(found.opening_hours[0].day, DayOfWeek::Wednesday);
    }

    #[tokio::test]
    async fn test_get_missing_park() {
        let pool = migrated_pool().await;

        let err = service(&pool).get(77).await.unwrap_err();

        assert!(matches!(err, CatalogError::NotFound { resource: "Park", id: 77 }));
    }
}

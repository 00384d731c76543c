//! Services layer
//!
//! Read-only catalog services. Each service wraps the repositories of one
//! resource, turns a missing record into [`CatalogError::NotFound`] and logs
//! what it serves.

pub mod event;
pub mod news;
pub mod park;
pub mod trail;

pub use event::EventService;
pub use news::NewsService;
pub use park::ParkService;
pub use trail::TrailService;

/// Error type shared by the catalog services
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// No record with this id
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: i64 },

    /// Storage failure (connection, query or corrupt stored value)
    #[error("Storage error: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl CatalogError {
    pub(crate) fn not_found(resource: &'static str, id: i64) -> Self {
        Self::NotFound { resource, id }
    }
}

//! Park model
//!
//! A park is the top-level location of the catalog. Trails and opening hours
//! belong to exactly one park; events and news may reference one.

use super::OpeningHours;

/// Park entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Park {
    /// Unique identifier
    pub id: i64,
    /// Park name (up to 100 characters)
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Location (up to 255 characters)
    pub location: String,
}

impl std::fmt::Display for Park {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Park together with its opening hours, Monday first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParkWithHours {
    pub park: Park,
    pub opening_hours: Vec<OpeningHours>,
}

impl ParkWithHours {
    pub fn new(park: Park, opening_hours: Vec<OpeningHours>) -> Self {
        Self {
            park,
            opening_hours,
        }
    }
}

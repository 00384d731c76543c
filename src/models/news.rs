//! News model
//!
//! News items may point at a park, a trail, both or neither. Both references
//! are cleared when the referent is deleted. The publication date is set by
//! storage on insert and never changes afterwards.

use chrono::NaiveDate;

use super::{Park, TrailWithPark};

/// News entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct News {
    pub id: i64,
    pub park_id: Option<i64>,
    pub trail_id: Option<i64>,
    pub title: String,
    pub content: String,
    pub published_on: NaiveDate,
}

/// News joined with its park and trail (the trail with its own park).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsWithRelations {
    pub news: News,
    pub park: Option<Park>,
    pub trail: Option<TrailWithPark>,
}

impl std::fmt::Display for NewsWithRelations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.trail {
            Some(trail) => write!(f, "{} - {}", trail, self.news.title),
            None => f.write_str(&self.news.title),
        }
    }
}

//! Data models
//!
//! Entities of the park catalog (Park, OpeningHours, Trail, Event, News),
//! their enumerants and the joined shapes the query layer returns.
//!
//! Every joined shape implements `Display` with a human-readable label used
//! in log output. Labels never appear in API payloads.

mod event;
mod news;
mod opening_hours;
mod park;
mod trail;

pub use event::{Event, EventWithPark};
pub use news::{News, NewsWithRelations};
pub use opening_hours::{DayOfWeek, OpeningHours};
pub use park::{Park, ParkWithHours};
pub use trail::{Difficulty, LengthKm, Trail, TrailStatus, TrailWithPark};

//! Database repositories
//!
//! Read-only repository implementations, one per catalog entity. Each trait
//! has a `Sqlx*Repository` implementation dispatching on the pool's driver.

pub mod event;
pub mod news;
pub mod opening_hours;
pub mod park;
pub mod trail;

pub use event::{EventRepository, SqlxEventRepository};
pub use news::{NewsRepository, SqlxNewsRepository};
pub use opening_hours::{OpeningHoursRepository, SqlxOpeningHoursRepository};
pub use park::{ParkRepository, SqlxParkRepository};
pub use trail::{SqlxTrailRepository, TrailRepository};

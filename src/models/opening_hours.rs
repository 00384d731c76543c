//! Opening hours model
//!
//! One row per (day, opening time, closing time) rule of a park. Rules are not
//! validated: a closing time before the opening time, or two rules for the same
//! day, are stored and served as they are.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Day of the week, declared in calendar order starting on Monday.
///
/// The derived `Ord` follows declaration order, so sorting by day yields
/// Monday through Sunday.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
pub enum DayOfWeek {
    #[serde(rename = "SEG")]
    Monday,
    #[serde(rename = "TER")]
    Tuesday,
    #[serde(rename = "QUA")]
    Wednesday,
    #[serde(rename = "QUI")]
    Thursday,
    #[serde(rename = "SEX")]
    Friday,
    #[serde(rename = "SAB")]
    Saturday,
    #[serde(rename = "DOM")]
    Sunday,
}

impl DayOfWeek {
    /// All days, Monday first
    pub const ALL: [DayOfWeek; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Stored three-letter code
    pub fn code(self) -> &'static str {
        match self {
            Self::Monday => "SEG",
            Self::Tuesday => "TER",
            Self::Wednesday => "QUA",
            Self::Thursday => "QUI",
            Self::Friday => "SEX",
            Self::Saturday => "SAB",
            Self::Sunday => "DOM",
        }
    }

    /// Full Portuguese name of the day
    pub fn label(self) -> &'static str {
        match self {
            Self::Monday => "Segunda-feira",
            Self::Tuesday => "Terça-feira",
            Self::Wednesday => "Quarta-feira",
            Self::Thursday => "Quinta-feira",
            Self::Friday => "Sexta-feira",
            Self::Saturday => "Sábado",
            Self::Sunday => "Domingo",
        }
    }
}

impl std::fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for DayOfWeek {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|day| day.code() == s)
            .ok_or_else(|| anyhow::anyhow!("Invalid day of week code: {}", s))
    }
}

/// Opening hours entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpeningHours {
    pub id: i64,
    /// Owning park
    pub park_id: i64,
    pub day: DayOfWeek,
    pub opens_at: NaiveTime,
    pub closes_at: NaiveTime,
}

impl std::fmt::Display for OpeningHours {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} - {}",
            self.day.label(),
            self.opens_at.format("%H:%M"),
            self.closes_at.format("%H:%M")
        )
    }
}

//! Trail model
//!
//! A hiking trail inside a park, with a fixed-point length, a difficulty level
//! and an operational status.

use serde::{Deserialize, Serialize, Serializer};
use utoipa::ToSchema;

use super::Park;

/// Largest length a `DECIMAL(5, 2)` column can hold, in hundredths.
const MAX_HUNDREDTHS: i64 = 99_999;

/// Trail length in kilometres with exactly two decimal places.
///
/// Stored as hundredths of a kilometre so the value never goes through a
/// binary float. Formats and serializes as a decimal string, e.g. `"5.50"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LengthKm(i64);

impl LengthKm {
    pub fn from_hundredths(hundredths: i64) -> Self {
        Self(hundredths)
    }

    pub fn hundredths(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for LengthKm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl std::str::FromStr for LengthKm {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || anyhow::anyhow!("Invalid trail length: {}", s);

        let (whole, fraction) = s.trim().split_once('.').unwrap_or((s.trim(), ""));
        if whole.is_empty()
            || fraction.len() > 2
            || !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let whole: i64 = whole.parse().map_err(|_| invalid())?;
        let fraction: i64 = format!("{:0<2}", fraction).parse().map_err(|_| invalid())?;
        let hundredths = whole
            .checked_mul(100)
            .and_then(|v| v.checked_add(fraction))
            .filter(|v| *v <= MAX_HUNDREDTHS)
            .ok_or_else(invalid)?;

        Ok(Self(hundredths))
    }
}

impl Serialize for LengthKm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Trail difficulty, stored as its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Moderate,
    Hard,
}

impl Difficulty {
    pub fn code(self) -> u8 {
        match self {
            Self::Easy => 1,
            Self::Moderate => 2,
            Self::Hard => 3,
        }
    }

    /// Display name of the level
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Fácil",
            Self::Moderate => "Moderado",
            Self::Hard => "Difícil",
        }
    }

    /// Map a stored code back to a level. Unknown codes are an error.
    pub fn from_code(code: i64) -> anyhow::Result<Self> {
        match code {
            1 => Ok(Self::Easy),
            2 => Ok(Self::Moderate),
            3 => Ok(Self::Hard),
            _ => Err(anyhow::anyhow!("Invalid difficulty code: {}", code)),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Trail operational status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum TrailStatus {
    #[default]
    #[serde(rename = "ABERTA")]
    Open,
    #[serde(rename = "FECHADA")]
    Closed,
    #[serde(rename = "EM_MANUTENCAO")]
    UnderMaintenance,
}

impl TrailStatus {
    pub fn code(self) -> &'static str {
        match self {
            Self::Open => "ABERTA",
            Self::Closed => "FECHADA",
            Self::UnderMaintenance => "EM_MANUTENCAO",
        }
    }
}

impl std::fmt::Display for TrailStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for TrailStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ABERTA" => Ok(Self::Open),
            "FECHADA" => Ok(Self::Closed),
            "EM_MANUTENCAO" => Ok(Self::UnderMaintenance),
            _ => Err(anyhow::anyhow!("Invalid trail status: {}", s)),
        }
    }
}

/// Trail entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trail {
    pub id: i64,
    /// Owning park
    pub park_id: i64,
    pub name: String,
    /// May be empty
    pub description: String,
    pub length_km: LengthKm,
    pub difficulty: Difficulty,
    pub status: TrailStatus,
}

/// Trail joined with the park it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailWithPark {
    pub trail: Trail,
    pub park: Park,
}

impl std::fmt::Display for TrailWithPark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}) - {} - {} km - {}",
            self.trail.name,
            self.park.name,
            self.trail.status,
            self.trail.length_km,
            self.trail.difficulty
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TrailWithPark {
        TrailWithPark {
            trail: Trail {
                id: 7,
                park_id: 1,
                name: "Trail 1".to_string(),
                description: String::new(),
                length_km: "5.5".parse().unwrap(),
                difficulty: Difficulty::Moderate,
                status: TrailStatus::Open,
            },
            park: Park {
                id: 1,
                name: "Serra Verde".to_string(),
                description: String::new(),
                location: "Zone A".to_string(),
            },
        }
    }

    #[test]
    fn test_trail_label() {
        assert_eq!(
            sample().to_string(),
            "Trail 1 (Serra Verde) - ABERTA - 5.50 km - 2"
        );
    }

    #[test]
    fn test_difficulty_labels() {
        assert_eq!(Difficulty::from_code(1).unwrap().label(), "Fácil");
        assert_eq!(Difficulty::from_code(2).unwrap().label(), "Moderado");
        assert_eq!(Difficulty::from_code(3).unwrap().label(), "Difícil");
        assert_eq!(Difficulty::default(), Difficulty::Moderate);
    }

    #[test]
    fn test_unknown_difficulty_rejected() {
        assert!(Difficulty::from_code(0).is_err());
        assert!(Difficulty::from_code(4).is_err());
    }

    #[test]
    fn test_status_codes() {
        for status in [
            TrailStatus::Open,
            TrailStatus::Closed,
            TrailStatus::UnderMaintenance,
        ] {
            assert_eq!(status.code().parse::<TrailStatus>().unwrap(), status);
        }
        assert_eq!(TrailStatus::default(), TrailStatus::Open);
        assert!("ABERTO".parse::<TrailStatus>().is_err());
    }

    #[test]
    fn test_length_parsing() {
        assert_eq!("5.50".parse::<LengthKm>().unwrap().hundredths(), 550);
        assert_eq!("5.5".parse::<LengthKm>().unwrap().hundredths(), 550);
        assert_eq!("12".parse::<LengthKm>().unwrap().hundredths(), 1200);
        assert_eq!("0.05".parse::<LengthKm>().unwrap().hundredths(), 5);
        assert_eq!("999.99".parse::<LengthKm>().unwrap().hundredths(), 99_999);

        for bad in ["", ".5", "5.555", "1000", "-1", "abc", "5,5"] {
            assert!(bad.parse::<LengthKm>().is_err(), "{bad}");
        }
    }

    #[test]
    fn test_length_display_and_serialize() {
        let length = LengthKm::from_hundredths(550);
        assert_eq!(length.to_string(), "5.50");
        assert_eq!(LengthKm::from_hundredths(7).to_string(), "0.07");
        assert_eq!(serde_json::to_string(&length).unwrap(), "\"5.50\"");
    }
}

//! Event model

use chrono::NaiveDate;

use super::Park;

/// Dated happening, optionally held in a park.
///
/// The park reference is cleared when the park is deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: i64,
    pub park_id: Option<i64>,
    pub title: String,
    pub date: NaiveDate,
    /// Where it happens (up to 255 characters)
    pub location: String,
    pub description: String,
    /// May be empty
    pub image_url: String,
}

/// Event joined with its park, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventWithPark {
    pub event: Event,
    pub park: Option<Park>,
}

impl std::fmt::Display for EventWithPark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.park {
            Some(park) => write!(f, "{} ({})", self.event.title, park.name),
            None => f.write_str(&self.event.title),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(park: Option<Park>) -> EventWithPark {
        EventWithPark {
            event: Event {
                id: 1,
                park_id: park.as_ref().map(|p| p.id),
                title: "Mutirão de limpeza".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
                location: "Portaria".to_string(),
                description: String::new(),
                image_url: String::new(),
            },
            park,
        }
    }

    #[test]
    fn test_event_label_with_park() {
        let park = Park {
            id: 3,
            name: "Serra Verde".to_string(),
            description: String::new(),
            location: String::new(),
        };

        assert_eq!(event(Some(park)).to_string(), "Mutirão de limpeza (Serra Verde)");
    }

    #[test]
    fn test_event_label_without_park() {
        assert_eq!(event(None).to_string(), "Mutirão de limpeza");
    }
}

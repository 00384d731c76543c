//! API response types
//!
//! One payload type per relationship shape. Nested parks are summaries
//! (`ParkSummary`) everywhere except the park resource itself, while news
//! items embed the full trail payload.
//!
//! Field names are the public wire format and stay in Portuguese.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{
    DayOfWeek, EventWithPark, LengthKm, NewsWithRelations, OpeningHours, Park, ParkWithHours,
    TrailStatus, TrailWithPark,
};

// ============================================================================
// Park
// ============================================================================

/// Opening hours of a park
#[derive(Debug, Serialize, ToSchema)]
pub struct OpeningHoursPayload {
    pub dia: DayOfWeek,
    #[schema(value_type = String, example = "08:00:00")]
    pub hora_abertura: NaiveTime,
    #[schema(value_type = String, example = "17:00:00")]
    pub hora_fechamento: NaiveTime,
    /// Full name of the day, e.g. "Segunda-feira"
    pub dia_extenso: String,
}

impl From<&OpeningHours> for OpeningHoursPayload {
    fn from(hours: &OpeningHours) -> Self {
        Self {
            dia: hours.day,
            hora_abertura: hours.opens_at,
            hora_fechamento: hours.closes_at,
            dia_extenso: hours.day.label().to_string(),
        }
    }
}

/// Park with its opening hours
#[derive(Debug, Serialize, ToSchema)]
pub struct ParkPayload {
    pub id: i64,
    pub nome: String,
    pub descricao: String,
    pub localizacao: String,
    /// Monday first
    pub horarios: Vec<OpeningHoursPayload>,
}

impl From<ParkWithHours> for ParkPayload {
    fn from(value: ParkWithHours) -> Self {
        let horarios = value.opening_hours.iter().map(Into::into).collect();
        Self {
            id: value.park.id,
            nome: value.park.name,
            descricao: value.park.description,
            localizacao: value.park.location,
            horarios,
        }
    }
}

/// Park reference embedded in other resources
#[derive(Debug, Serialize, ToSchema)]
pub struct ParkSummary {
    pub id: i64,
    pub nome: String,
    pub localizacao: String,
}

impl From<Park> for ParkSummary {
    fn from(park: Park) -> Self {
        Self {
            id: park.id,
            nome: park.name,
            localizacao: park.location,
        }
    }
}

// ============================================================================
// Trail
// ============================================================================

#[derive(Debug, Serialize, ToSchema)]
pub struct TrailPayload {
    pub id: i64,
    pub parque: ParkSummary,
    pub nome: String,
    pub descricao: String,
    /// Length in kilometres, always with two decimals
    #[schema(value_type = String, example = "5.50")]
    pub extensao_km: LengthKm,
    /// 1 = Fácil, 2 = Moderado, 3 = Difícil
    #[schema(minimum = 1, maximum = 3, example = 2)]
    pub dificuldade: u8,
    #[schema(example = "Moderado")]
    pub dificuldade_nome: String,
    pub status: TrailStatus,
}

impl From<TrailWithPark> for TrailPayload {
    fn from(value: TrailWithPark) -> Self {
        let TrailWithPark { trail, park } = value;
        Self {
            id: trail.id,
            parque: park.into(),
            nome: trail.name,
            descricao: trail.description,
            extensao_km: trail.length_km,
            dificuldade: trail.difficulty.code(),
            dificuldade_nome: trail.difficulty.label().to_string(),
            status: trail.status,
        }
    }
}

// ============================================================================
// Event
// ============================================================================

#[derive(Debug, Serialize, ToSchema)]
pub struct EventPayload {
    pub id: i64,
    /// Null once the park is deleted
    pub parque: Option<ParkSummary>,
    pub titulo: String,
    pub data: NaiveDate,
    pub local: String,
    pub descricao: String,
    /// May be an empty string
    pub imagem_url: String,
}

impl From<EventWithPark> for EventPayload {
    fn from(value: EventWithPark) -> Self {
        let EventWithPark { event, park } = value;
        Self {
            id: event.id,
            parque: park.map(Into::into),
            titulo: event.title,
            data: event.date,
            local: event.location,
            descricao: event.description,
            imagem_url: event.image_url,
        }
    }
}

// ============================================================================
// News
// ============================================================================

#[derive(Debug, Serialize, ToSchema)]
pub struct NewsPayload {
    pub id: i64,
    pub parque: Option<ParkSummary>,
    pub trilha: Option<TrailPayload>,
    pub titulo: String,
    pub conteudo: String,
    pub data_publicacao: NaiveDate,
}

impl From<NewsWithRelations> for NewsPayload {
    fn from(value: NewsWithRelations) -> Self {
        let NewsWithRelations { news, park, trail } = value;
        Self {
            id: news.id,
            parque: park.map(Into::into),
            trilha: trail.map(Into::into),
            titulo: news.title,
            conteudo: news.content,
            data_publicacao: news.published_on,
        }
    }
}

// src/models/appointment.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::FromRow;
use std::{fmt, str::FromStr};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::common::{
    error::AppError,
    validation::{
        parse_enum, required, validate_closed_set, validate_money, validate_payload,
    },
};
use crate::models::{artist::Artist, client::Client};

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "appointment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 6] = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::Confirmed,
        AppointmentStatus::InProgress,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::NoShow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::InProgress => "in_progress",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::NoShow => "no_show",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AppointmentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or(())
    }
}

fn validate_status(value: &str) -> Result<(), ValidationError> {
    validate_closed_set::<AppointmentStatus>(value, "invalid_status")
}

// --- Structs ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    pub client_id: Uuid,
    pub artist_id: Uuid,
    pub scheduled_date: DateTime<Utc>,
    /// Duração em minutos
    #[schema(example = 120)]
    pub duration: i32,
    #[schema(example = "forearm")]
    pub body_part: Option<String>,
    pub description: Option<String>,
    #[schema(example = json!(["/uploads/3f1c.png"]))]
    pub reference_images: Vec<String>,
    pub status: AppointmentStatus,
    #[schema(value_type = Option<f64>, example = 450.0)]
    pub estimated_price: Option<Decimal>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Agendamento com os registros completos de cliente e artista.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDetail {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub client: Client,
    pub artist: Artist,
}

#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub client_id: Uuid,
    pub artist_id: Uuid,
    pub scheduled_date: DateTime<Utc>,
    pub duration: i32,
    pub body_part: Option<String>,
    pub description: Option<String>,
    pub reference_images: Vec<String>,
    pub status: AppointmentStatus,
    pub estimated_price: Option<Decimal>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AppointmentChanges {
    pub client_id: Option<Uuid>,
    pub artist_id: Option<Uuid>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub duration: Option<i32>,
    pub body_part: Option<String>,
    pub description: Option<String>,
    pub reference_images: Option<Vec<String>>,
    pub status: Option<AppointmentStatus>,
    pub estimated_price: Option<Decimal>,
    pub notes: Option<String>,
}

/// Filtros da listagem. Datas no formato RFC 3339.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AppointmentFilter {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub client_id: Option<Uuid>,
    pub artist_id: Option<Uuid>,
    pub status: Option<AppointmentStatus>,
}

// --- Payloads ---

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentPayload {
    #[validate(required(message = "required"))]
    pub client_id: Option<Uuid>,

    #[validate(required(message = "required"))]
    pub artist_id: Option<Uuid>,

    #[validate(required(message = "required"))]
    #[schema(value_type = String, format = DateTime, example = "2025-03-15T14:00:00Z")]
    pub scheduled_date: Option<DateTime<Utc>>,

    #[validate(required(message = "required"), range(min = 1, message = "must_be_positive"))]
    #[schema(example = 120)]
    pub duration: Option<i32>,

    #[validate(length(max = 100, message = "too_long"))]
    pub body_part: Option<String>,

    pub description: Option<String>,

    #[serde(default)]
    pub reference_images: Vec<String>,

    #[validate(custom(function = "validate_status"))]
    #[schema(example = "scheduled")]
    pub status: Option<String>,

    #[validate(custom(function = "validate_money"))]
    #[schema(value_type = Option<f64>)]
    pub estimated_price: Option<Decimal>,

    pub notes: Option<String>,
}

impl CreateAppointmentPayload {
    pub fn into_new(self) -> Result<NewAppointment, AppError> {
        validate_payload(&self)?;

        let status = match self.status.as_deref() {
            Some(raw) => parse_enum(raw, "status", "invalid_status")?,
            None => AppointmentStatus::Scheduled,
        };

        Ok(NewAppointment {
            client_id: required(self.client_id, "client_id")?,
            artist_id: required(self.artist_id, "artist_id")?,
            scheduled_date: required(self.scheduled_date, "scheduled_date")?,
            duration: required(self.duration, "duration")?,
            body_part: self.body_part,
            description: self.description,
            reference_images: self.reference_images,
            status,
            estimated_price: self.estimated_price,
            notes: self.notes,
        })
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentPayload {
    pub client_id: Option<Uuid>,
    pub artist_id: Option<Uuid>,

    #[schema(value_type = Option<String>, format = DateTime)]
    pub scheduled_date: Option<DateTime<Utc>>,

    #[validate(range(min = 1, message = "must_be_positive"))]
    pub duration: Option<i32>,

    #[validate(length(max = 100, message = "too_long"))]
    pub body_part: Option<String>,

    pub description: Option<String>,

    /// Substitui a lista inteira, na ordem enviada.
    pub reference_images: Option<Vec<String>>,

    #[validate(custom(function = "validate_status"))]
    pub status: Option<String>,

    #[validate(custom(function = "validate_money"))]
    #[schema(value_type = Option<f64>)]
    pub estimated_price: Option<Decimal>,

    pub notes: Option<String>,
}

impl UpdateAppointmentPayload {
    pub fn into_changes(self) -> Result<AppointmentChanges, AppError> {
        validate_payload(&self)?;

        let status = self
            .status
            .as_deref()
            .map(|raw| parse_enum(raw, "status", "invalid_status"))
            .transpose()?;

        Ok(AppointmentChanges {
            client_id: self.client_id,
            artist_id: self.artist_id,
            scheduled_date: self.scheduled_date,
            duration: self.duration,
            body_part: self.body_part,
            description: self.description,
            reference_images: self.reference_images,
            status,
            estimated_price: self.estimated_price,
            notes: self.notes,
        })
    }
}

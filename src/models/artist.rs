// src/models/artist.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::{
    error::AppError,
    validation::{validate_not_blank, validate_money, validate_payload},
};
use crate::models::blank_to_none;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub id: Uuid,
    #[schema(example = "João Traço")]
    pub name: String,
    /// Identidade do usuário no provedor de login, quando vinculada.
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    // Ordem de inserção preservada (TEXT[])
    #[schema(example = json!(["fineline", "blackwork"]))]
    pub specialties: Vec<String>,
    #[schema(example = "Ter a Sáb, 10h-19h")]
    pub schedule: Option<String>,
    #[schema(value_type = Option<f64>, example = 150.0)]
    pub hourly_rate: Option<Decimal>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewArtist {
    pub name: String,
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialties: Vec<String>,
    pub schedule: Option<String>,
    pub hourly_rate: Option<Decimal>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ArtistChanges {
    pub name: Option<String>,
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialties: Option<Vec<String>>,
    pub schedule: Option<String>,
    pub hourly_rate: Option<Decimal>,
    pub is_active: Option<bool>,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateArtistPayload {
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"), length(max = 150, message = "too_long"))]
    #[schema(example = "João Traço")]
    pub name: String,

    pub user_id: Option<String>,

    #[validate(email(message = "invalid_email"))]
    pub email: Option<String>,

    #[validate(length(max = 30, message = "too_long"))]
    pub phone: Option<String>,

    #[serde(default)]
    pub specialties: Vec<String>,

    pub schedule: Option<String>,

    #[validate(custom(function = "validate_money"))]
    #[schema(value_type = Option<f64>, example = 150.0)]
    pub hourly_rate: Option<Decimal>,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl CreateArtistPayload {
    pub fn into_new(mut self) -> Result<NewArtist, AppError> {
        blank_to_none(&mut self.email);
        blank_to_none(&mut self.user_id);
        validate_payload(&self)?;

        Ok(NewArtist {
            name: self.name.trim().to_string(),
            user_id: self.user_id,
            email: self.email.map(|e| e.trim().to_lowercase()),
            phone: self.phone,
            specialties: self.specialties,
            schedule: self.schedule,
            hourly_rate: self.hourly_rate,
            is_active: self.is_active,
        })
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArtistPayload {
    #[validate(custom(function = "validate_not_blank"), length(max = 150, message = "too_long"))]
    pub name: Option<String>,

    pub user_id: Option<String>,

    #[validate(email(message = "invalid_email"))]
    pub email: Option<String>,

    #[validate(length(max = 30, message = "too_long"))]
    pub phone: Option<String>,

    /// Substitui a lista inteira, na ordem enviada.
    pub specialties: Option<Vec<String>>,

    pub schedule: Option<String>,

    #[validate(custom(function = "validate_money"))]
    #[schema(value_type = Option<f64>)]
    pub hourly_rate: Option<Decimal>,

    pub is_active: Option<bool>,
}

impl UpdateArtistPayload {
    pub fn into_changes(mut self) -> Result<ArtistChanges, AppError> {
        blank_to_none(&mut self.email);
        validate_payload(&self)?;

        Ok(ArtistChanges {
            name: self.name.map(|v| v.trim().to_string()),
            user_id: self.user_id,
            email: self.email.map(|e| e.trim().to_lowercase()),
            phone: self.phone,
            specialties: self.specialties,
            schedule: self.schedule,
            hourly_rate: self.hourly_rate,
            is_active: self.is_active,
        })
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ArtistQuery {
    pub active: Option<bool>,
}

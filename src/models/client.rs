// src/models/client.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::{
    error::AppError,
    validation::{validate_not_blank, validate_payload},
};
use crate::models::blank_to_none;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: Uuid,
    #[schema(example = "Maria")]
    pub first_name: String,
    #[schema(example = "da Silva")]
    pub last_name: String,
    #[schema(example = "maria@email.com")]
    pub email: Option<String>,
    pub phone: Option<String>,
    #[schema(value_type = Option<String>, format = Date, example = "1990-05-20")]
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub medical_notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

// --- Escrita (já validada) ---

#[derive(Debug, Clone)]
pub struct NewClient {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub medical_notes: Option<String>,
}

/// Atualização parcial: `None` mantém o valor atual.
#[derive(Debug, Clone, Default)]
pub struct ClientChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub medical_notes: Option<String>,
}

// --- Payloads (entrada HTTP) ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientPayload {
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"), length(max = 100, message = "too_long"))]
    #[schema(example = "Maria")]
    pub first_name: String,

    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"), length(max = 100, message = "too_long"))]
    #[schema(example = "da Silva")]
    pub last_name: String,

    #[validate(email(message = "invalid_email"))]
    #[schema(example = "maria@email.com")]
    pub email: Option<String>,

    #[validate(length(max = 30, message = "too_long"))]
    pub phone: Option<String>,

    #[schema(value_type = Option<String>, format = Date, example = "1990-05-20")]
    pub date_of_birth: Option<NaiveDate>,

    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub medical_notes: Option<String>,
}

impl CreateClientPayload {
    pub fn into_new(mut self) -> Result<NewClient, AppError> {
        blank_to_none(&mut self.email);
        blank_to_none(&mut self.phone);
        validate_payload(&self)?;

        Ok(NewClient {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.map(|e| e.trim().to_lowercase()),
            phone: self.phone,
            date_of_birth: self.date_of_birth,
            address: self.address,
            emergency_contact: self.emergency_contact,
            medical_notes: self.medical_notes,
        })
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientPayload {
    #[validate(custom(function = "validate_not_blank"), length(max = 100, message = "too_long"))]
    pub first_name: Option<String>,

    #[validate(custom(function = "validate_not_blank"), length(max = 100, message = "too_long"))]
    pub last_name: Option<String>,

    #[validate(email(message = "invalid_email"))]
    pub email: Option<String>,

    #[validate(length(max = 30, message = "too_long"))]
    pub phone: Option<String>,

    #[schema(value_type = Option<String>, format = Date)]
    pub date_of_birth: Option<NaiveDate>,

    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub medical_notes: Option<String>,
}

impl UpdateClientPayload {
    pub fn into_changes(mut self) -> Result<ClientChanges, AppError> {
        blank_to_none(&mut self.email);
        blank_to_none(&mut self.phone);
        validate_payload(&self)?;

        Ok(ClientChanges {
            first_name: self.first_name.map(|v| v.trim().to_string()),
            last_name: self.last_name.map(|v| v.trim().to_string()),
            email: self.email.map(|e| e.trim().to_lowercase()),
            phone: self.phone,
            date_of_birth: self.date_of_birth,
            address: self.address,
            emergency_contact: self.emergency_contact,
            medical_notes: self.medical_notes,
        })
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ClientQuery {
    /// Trecho do nome, sobrenome ou email
    pub search: Option<String>,
}

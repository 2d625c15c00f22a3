// src/models/sale.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::{
    error::AppError,
    validation::{required, validate_money, validate_payload},
};
use crate::models::{appointment::Appointment, artist::Artist, client::Client};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,   // Nada pago
    Partial,   // Pago Parcialmente
    Completed, // Quitado
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: Uuid,
    pub appointment_id: Option<Uuid>,
    pub client_id: Uuid,
    pub artist_id: Uuid,
    #[schema(value_type = f64, example = 500.0)]
    pub total_amount: Decimal,
    #[schema(value_type = f64, example = 150.0)]
    pub deposit: Decimal,
    // Campos derivados: sempre recalculados no servidor
    #[schema(value_type = f64, example = 350.0)]
    pub remaining_balance: Decimal,
    pub payment_status: PaymentStatus,
    #[schema(example = "pix")]
    pub payment_method: Option<String>,
    pub sale_date: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Venda com cliente, artista e (se houver) o agendamento de origem.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleDetail {
    #[serde(flatten)]
    pub sale: Sale,
    pub client: Client,
    pub artist: Artist,
    pub appointment: Option<Appointment>,
}

/// Dados de entrada de uma venda, sem os campos derivados.
#[derive(Debug, Clone)]
pub struct NewSale {
    pub appointment_id: Option<Uuid>,
    pub client_id: Uuid,
    pub artist_id: Uuid,
    pub total_amount: Decimal,
    pub deposit: Decimal,
    pub payment_method: Option<String>,
    pub sale_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Linha completa a ser gravada, já com saldo e status calculados.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleRecord {
    pub appointment_id: Option<Uuid>,
    pub client_id: Uuid,
    pub artist_id: Uuid,
    pub total_amount: Decimal,
    pub deposit: Decimal,
    pub remaining_balance: Decimal,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<String>,
    pub sale_date: DateTime<Utc>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SaleChanges {
    pub appointment_id: Option<Uuid>,
    pub client_id: Option<Uuid>,
    pub artist_id: Option<Uuid>,
    pub total_amount: Option<Decimal>,
    pub deposit: Option<Decimal>,
    pub payment_method: Option<String>,
    pub sale_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SaleFilter {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub client_id: Option<Uuid>,
    pub artist_id: Option<Uuid>,
}

// --- Payloads ---
// `remainingBalance` e `paymentStatus` não fazem parte da entrada: se vierem,
// o serde simplesmente ignora.

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSalePayload {
    pub appointment_id: Option<Uuid>,

    #[validate(required(message = "required"))]
    pub client_id: Option<Uuid>,

    #[validate(required(message = "required"))]
    pub artist_id: Option<Uuid>,

    #[validate(required(message = "required"), custom(function = "validate_money"))]
    #[schema(value_type = f64, example = 500.0)]
    pub total_amount: Option<Decimal>,

    #[validate(custom(function = "validate_money"))]
    #[schema(value_type = Option<f64>, example = 150.0)]
    pub deposit: Option<Decimal>,

    #[validate(length(max = 50, message = "too_long"))]
    pub payment_method: Option<String>,

    #[schema(value_type = Option<String>, format = DateTime)]
    pub sale_date: Option<DateTime<Utc>>,

    pub notes: Option<String>,
}

impl CreateSalePayload {
    pub fn into_new(self) -> Result<NewSale, AppError> {
        validate_payload(&self)?;

        Ok(NewSale {
            appointment_id: self.appointment_id,
            client_id: required(self.client_id, "client_id")?,
            artist_id: required(self.artist_id, "artist_id")?,
            total_amount: required(self.total_amount, "total_amount")?,
            deposit: self.deposit.unwrap_or(Decimal::ZERO),
            payment_method: self.payment_method,
            sale_date: self.sale_date,
            notes: self.notes,
        })
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSalePayload {
    pub appointment_id: Option<Uuid>,
    pub client_id: Option<Uuid>,
    pub artist_id: Option<Uuid>,

    #[validate(custom(function = "validate_money"))]
    #[schema(value_type = Option<f64>)]
    pub total_amount: Option<Decimal>,

    #[validate(custom(function = "validate_money"))]
    #[schema(value_type = Option<f64>)]
    pub deposit: Option<Decimal>,

    #[validate(length(max = 50, message = "too_long"))]
    pub payment_method: Option<String>,

    #[schema(value_type = Option<String>, format = DateTime)]
    pub sale_date: Option<DateTime<Utc>>,

    pub notes: Option<String>,
}

impl UpdateSalePayload {
    pub fn into_changes(self) -> Result<SaleChanges, AppError> {
        validate_payload(&self)?;

        Ok(SaleChanges {
            appointment_id: self.appointment_id,
            client_id: self.client_id,
            artist_id: self.artist_id,
            total_amount: self.total_amount,
            deposit: self.deposit,
            payment_method: self.payment_method,
            sale_date: self.sale_date,
            notes: self.notes,
        })
    }
}

use axum::{
    Json,
    extract::{Path, Query},
};
use axum_extra::extract::WithRejection;
use uuid::Uuid;

use crate::common::error::ApiError;

pub mod appointments;
pub mod artists;
pub mod clients;
pub mod dashboard;
pub mod inventory;
pub mod sales;
pub mod upload;


// Extratores com rejeição no mesmo formato de `ApiError`
pub type JsonBody<T> = WithRejection<Json<T>, ApiError>;
pub type QueryParams<T> = WithRejection<Query<T>, ApiError>;
pub type IdPath = WithRejection<Path<Uuid>, ApiError>;

pub async fn health() -> &'static str {
    "OK"
}

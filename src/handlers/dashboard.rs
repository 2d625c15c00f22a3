// src/handlers/dashboard.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::WithRejection;
use chrono::Utc;

use crate::{
    common::error::ApiError,
    config::AppState,
    handlers::QueryParams,
    models::dashboard::{DashboardQuery, DashboardStats},
};

// GET /api/dashboard/stats
#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    tag = "Dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Indicadores do dia e do mês", body = DashboardStats),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_stats(
    State(app_state): State<AppState>,
    WithRejection(query, _): QueryParams<DashboardQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let as_of = query.as_of.unwrap_or_else(Utc::now);
    let stats = app_state.dashboard_service.compute_dashboard_stats(as_of).await?;
    Ok((StatusCode::OK, Json(stats)))
}

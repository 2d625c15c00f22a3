// src/handlers/appointments.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::WithRejection;

use crate::{
    common::error::ApiError,
    config::AppState,
    handlers::{IdPath, JsonBody, QueryParams},
    middleware::auth::AuthenticatedUser,
    models::appointment::{
        AppointmentDetail, AppointmentFilter, CreateAppointmentPayload, UpdateAppointmentPayload,
    },
};

// POST /api/appointments
#[utoipa::path(
    post,
    path = "/api/appointments",
    tag = "Appointments",
    request_body = CreateAppointmentPayload,
    responses(
        (status = 201, description = "Agendamento criado", body = AppointmentDetail),
        (status = 400, description = "Campos inválidos"),
        (status = 404, description = "Cliente ou artista não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_appointment(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    WithRejection(Json(payload), _): JsonBody<CreateAppointmentPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let detail = app_state.appointment_service.create_appointment(&actor, payload).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

// GET /api/appointments
#[utoipa::path(
    get,
    path = "/api/appointments",
    tag = "Appointments",
    params(AppointmentFilter),
    responses(
        (status = 200, description = "Agendamentos com cliente e artista", body = Vec<AppointmentDetail>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_appointments(
    State(app_state): State<AppState>,
    WithRejection(filter, _): QueryParams<AppointmentFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let appointments = app_state.appointment_service.list_appointments(&filter).await?;
    Ok((StatusCode::OK, Json(appointments)))
}

// GET /api/appointments/{id}
#[utoipa::path(
    get,
    path = "/api/appointments/{id}",
    tag = "Appointments",
    params(("id" = Uuid, Path, description = "ID do agendamento")),
    responses(
        (status = 200, description = "Agendamento", body = AppointmentDetail),
        (status = 404, description = "Agendamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_appointment(
    State(app_state): State<AppState>,
    WithRejection(id, _): IdPath,
) -> Result<impl IntoResponse, ApiError> {
    let detail = app_state.appointment_service.get_appointment(id.0).await?;
    Ok((StatusCode::OK, Json(detail)))
}

// PUT /api/appointments/{id}
#[utoipa::path(
    put,
    path = "/api/appointments/{id}",
    tag = "Appointments",
    params(("id" = Uuid, Path, description = "ID do agendamento")),
    request_body = UpdateAppointmentPayload,
    responses(
        (status = 200, description = "Agendamento atualizado", body = AppointmentDetail),
        (status = 400, description = "Campos inválidos"),
        (status = 404, description = "Agendamento, cliente ou artista não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_appointment(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    WithRejection(id, _): IdPath,
    WithRejection(Json(payload), _): JsonBody<UpdateAppointmentPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let detail = app_state.appointment_service.update_appointment(&actor, id.0, payload).await?;
    Ok((StatusCode::OK, Json(detail)))
}

// DELETE /api/appointments/{id}
#[utoipa::path(
    delete,
    path = "/api/appointments/{id}",
    tag = "Appointments",
    params(("id" = Uuid, Path, description = "ID do agendamento")),
    responses(
        (status = 204, description = "Agendamento removido; vendas ligadas perdem o vínculo"),
        (status = 404, description = "Agendamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_appointment(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    WithRejection(id, _): IdPath,
) -> Result<impl IntoResponse, ApiError> {
    app_state.appointment_service.delete_appointment(&actor, id.0).await?;
    Ok(StatusCode::NO_CONTENT)
}

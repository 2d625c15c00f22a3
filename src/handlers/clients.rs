// src/handlers/clients.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::WithRejection;

use crate::{
    common::error::ApiError,
    config::AppState,
    handlers::{IdPath, JsonBody, QueryParams},
    middleware::auth::AuthenticatedUser,
    models::client::{Client, ClientQuery, CreateClientPayload, UpdateClientPayload},
};

// POST /api/clients
#[utoipa::path(
    post,
    path = "/api/clients",
    tag = "Clients",
    request_body = CreateClientPayload,
    responses(
        (status = 201, description = "Cliente cadastrado", body = Client),
        (status = 400, description = "Campos inválidos"),
        (status = 409, description = "Email já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_client(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    WithRejection(Json(payload), _): JsonBody<CreateClientPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let client = app_state.client_service.create_client(&actor, payload).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

// GET /api/clients
#[utoipa::path(
    get,
    path = "/api/clients",
    tag = "Clients",
    params(ClientQuery),
    responses(
        (status = 200, description = "Lista de clientes", body = Vec<Client>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_clients(
    State(app_state): State<AppState>,
    WithRejection(query, _): QueryParams<ClientQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let clients = app_state.client_service.list_clients(query.search.as_deref()).await?;
    Ok((StatusCode::OK, Json(clients)))
}

// GET /api/clients/{id}
#[utoipa::path(
    get,
    path = "/api/clients/{id}",
    tag = "Clients",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente", body = Client),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_client(
    State(app_state): State<AppState>,
    WithRejection(id, _): IdPath,
) -> Result<impl IntoResponse, ApiError> {
    let client = app_state.client_service.get_client(id.0).await?;
    Ok((StatusCode::OK, Json(client)))
}

// PUT /api/clients/{id}
#[utoipa::path(
    put,
    path = "/api/clients/{id}",
    tag = "Clients",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    request_body = UpdateClientPayload,
    responses(
        (status = 200, description = "Cliente atualizado", body = Client),
        (status = 400, description = "Campos inválidos"),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_client(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    WithRejection(id, _): IdPath,
    WithRejection(Json(payload), _): JsonBody<UpdateClientPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let client = app_state.client_service.update_client(&actor, id.0, payload).await?;
    Ok((StatusCode::OK, Json(client)))
}

// DELETE /api/clients/{id}
#[utoipa::path(
    delete,
    path = "/api/clients/{id}",
    tag = "Clients",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 204, description = "Cliente removido"),
        (status = 404, description = "Cliente não encontrado"),
        (status = 409, description = "Cliente possui agendamentos ou vendas")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_client(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    WithRejection(id, _): IdPath,
) -> Result<impl IntoResponse, ApiError> {
    app_state.client_service.delete_client(&actor, id.0).await?;
    Ok(StatusCode::NO_CONTENT)
}

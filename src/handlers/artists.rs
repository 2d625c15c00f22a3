// src/handlers/artists.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::WithRejection;

use crate::{
    common::error::ApiError,
    config::AppState,
    handlers::{IdPath, JsonBody, QueryParams},
    middleware::auth::AuthenticatedUser,
    models::artist::{Artist, ArtistQuery, CreateArtistPayload, UpdateArtistPayload},
};

// POST /api/artists
#[utoipa::path(
    post,
    path = "/api/artists",
    tag = "Artists",
    request_body = CreateArtistPayload,
    responses(
        (status = 201, description = "Artista cadastrado", body = Artist),
        (status = 400, description = "Campos inválidos"),
        (status = 409, description = "Email já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_artist(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    WithRejection(Json(payload), _): JsonBody<CreateArtistPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let artist = app_state.artist_service.create_artist(&actor, payload).await?;
    Ok((StatusCode::CREATED, Json(artist)))
}

// GET /api/artists
#[utoipa::path(
    get,
    path = "/api/artists",
    tag = "Artists",
    params(ArtistQuery),
    responses(
        (status = 200, description = "Lista de artistas", body = Vec<Artist>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_artists(
    State(app_state): State<AppState>,
    WithRejection(query, _): QueryParams<ArtistQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let artists = app_state.artist_service.list_artists(query.active).await?;
    Ok((StatusCode::OK, Json(artists)))
}

// GET /api/artists/{id}
#[utoipa::path(
    get,
    path = "/api/artists/{id}",
    tag = "Artists",
    params(("id" = Uuid, Path, description = "ID do artista")),
    responses(
        (status = 200, description = "Artista", body = Artist),
        (status = 404, description = "Artista não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_artist(
    State(app_state): State<AppState>,
    WithRejection(id, _): IdPath,
) -> Result<impl IntoResponse, ApiError> {
    let artist = app_state.artist_service.get_artist(id.0).await?;
    Ok((StatusCode::OK, Json(artist)))
}

// PUT /api/artists/{id}
#[utoipa::path(
    put,
    path = "/api/artists/{id}",
    tag = "Artists",
    params(("id" = Uuid, Path, description = "ID do artista")),
    request_body = UpdateArtistPayload,
    responses(
        (status = 200, description = "Artista atualizado", body = Artist),
        (status = 400, description = "Campos inválidos"),
        (status = 404, description = "Artista não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_artist(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    WithRejection(id, _): IdPath,
    WithRejection(Json(payload), _): JsonBody<UpdateArtistPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let artist = app_state.artist_service.update_artist(&actor, id.0, payload).await?;
    Ok((StatusCode::OK, Json(artist)))
}

// DELETE /api/artists/{id}
#[utoipa::path(
    delete,
    path = "/api/artists/{id}",
    tag = "Artists",
    params(("id" = Uuid, Path, description = "ID do artista")),
    responses(
        (status = 204, description = "Artista removido"),
        (status = 404, description = "Artista não encontrado"),
        (status = 409, description = "Artista possui agendamentos ou vendas")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_artist(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    WithRejection(id, _): IdPath,
) -> Result<impl IntoResponse, ApiError> {
    app_state.artist_service.delete_artist(&actor, id.0).await?;
    Ok(StatusCode::NO_CONTENT)
}

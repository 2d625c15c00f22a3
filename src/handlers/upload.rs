// src/handlers/upload.rs

use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    common::{error::ApiError, validation::field_error},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    storage::{IncomingFile, MAX_FILES_PER_UPLOAD, check_upload},
};

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    /// URLs para usar em `referenceImages`, na ordem de envio
    #[schema(example = json!(["/uploads/8c1f0d2e.png"]))]
    pub urls: Vec<String>,
}

// POST /api/upload
#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "Upload",
    request_body(content_type = "multipart/form-data", description = "Campo `images` (até 5 imagens, 10 MB cada)"),
    responses(
        (status = 201, description = "Arquivos salvos", body = UploadResponse),
        (status = 400, description = "Arquivo inválido, grande demais ou em excesso")
    ),
    security(("api_jwt" = []))
)]
pub async fn upload_images(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, e.body_text()))?
    {
        if field.name() != Some("images") {
            continue;
        }
        if files.len() == MAX_FILES_PER_UPLOAD {
            return Err(field_error("images", "too_many_files").into());
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, e.body_text()))?;

        files.push(IncomingFile { file_name, content_type, bytes: bytes.to_vec() });
    }

    check_upload(&files)?;

    let mut urls = Vec::with_capacity(files.len());
    for file in &files {
        urls.push(app_state.file_store.store(file).await?);
    }

    tracing::info!("🖼️ {} imagens enviadas por {}", urls.len(), actor.user_id);
    Ok((StatusCode::CREATED, Json(UploadResponse { urls })))
}

// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::{Claims, Identity},
};

/// Verifica um JWT HS256 emitido pelo serviço de identidade.
pub fn verify_token(token: &str, secret: &str) -> Result<Identity, AppError> {
    let validation = Validation::new(Algorithm::HS256);
    let token_data = decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map_err(|e| {
            tracing::debug!("Token recusado: {}", e);
            AppError::InvalidToken
        })?;
    Ok(token_data.claims.into())
}

// O middleware em si: sem token válido a requisição nem chega no handler
pub async fn auth_guard(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AppError::InvalidToken)?;

    let identity = verify_token(token.trim(), &app_state.config.jwt_secret)?;

    // Insere a identidade nos "extensions" da requisição
    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

// Extrator para obter a identidade autenticada diretamente nos handlers
pub struct AuthenticatedUser(pub Identity);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(AppError::InvalidToken)
    }
}

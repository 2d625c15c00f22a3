// src/common/error.rs

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use thiserror::Error;
use uuid::Uuid;

use crate::common::validation::to_camel_case;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Entidade referenciada (ou pedida) não existe. Carrega o nome da entidade.
    #[error("{0} não encontrado")]
    NotFound(&'static str),

    /// Tentativa de remover algo que ainda é referenciado.
    #[error("Integridade referencial: {0}")]
    ReferentialIntegrity(String),

    #[error("Violação de unicidade: {0}")]
    UniqueConstraintViolation(String),

    #[error("Token inválido")]
    InvalidToken,

    /// Um registro gravado aponta para algo que não existe mais.
    /// Não é erro do usuário: indica dado inconsistente no banco.
    #[error("Referência quebrada: {entity} {id}")]
    BrokenReference { entity: &'static str, id: Uuid },

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

/// Resposta de erro entregue ao cliente HTTP.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self { status, error: error.into(), details: None }
    }
}

/// Achata `ValidationErrors` em `{ campoCamelCase: [códigos] }`.
pub fn field_error_map(errors: &validator::ValidationErrors) -> BTreeMap<String, Vec<String>> {
    let mut details = BTreeMap::new();
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        details.insert(to_camel_case(&field.to_string()), messages);
    }
    details
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::ValidationError(errors) => ApiError {
                status: StatusCode::BAD_REQUEST,
                error: "Um ou mais campos são inválidos.".to_string(),
                details: Some(json!(field_error_map(&errors))),
            },
            AppError::NotFound(entity) => {
                ApiError::new(StatusCode::NOT_FOUND, format!("{} não encontrado.", entity))
            }
            AppError::ReferentialIntegrity(message) => {
                tracing::warn!("Remoção bloqueada: {}", message);
                ApiError::new(StatusCode::CONFLICT, message)
            }
            AppError::UniqueConstraintViolation(message) => {
                ApiError::new(StatusCode::CONFLICT, message)
            }
            AppError::InvalidToken => ApiError::new(
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.",
            ),
            // Todo o resto vira 500. O detalhe vai pro log, nunca pro corpo.
            ref e => {
                tracing::error!("🔥 Erro Interno do Servidor: {:?}", e);
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError {
            status: StatusCode::BAD_REQUEST,
            error: "Corpo da requisição inválido.".to_string(),
            details: Some(json!({ "body": [rejection.body_text()] })),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError {
            status: StatusCode::BAD_REQUEST,
            error: "Parâmetros de consulta inválidos.".to_string(),
            details: Some(json!({ "query": [rejection.body_text()] })),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError {
            status: StatusCode::BAD_REQUEST,
            error: "Identificador inválido.".to_string(),
            details: Some(json!({ "id": [rejection.body_text()] })),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

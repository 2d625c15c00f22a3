// src/common/db_utils.rs

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::str::FromStr;

use crate::{common::error::AppError, config::Config};

// ---
// Pool: os timeouts ficam na fronteira com o banco, não na lógica de domínio
// ---
pub async fn connect_pool(config: &Config) -> anyhow::Result<PgPool> {
    let statement_timeout = format!("{}", config.db_statement_timeout.as_millis());

    let options = PgConnectOptions::from_str(&config.database_url)?
        .options([("statement_timeout", statement_timeout.as_str())]);

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(config.db_acquire_timeout)
        .connect_with(options)
        .await?;

    Ok(pool)
}

// ---
// Tradução de erros do sqlx
// ---

/// Erros de escrita (INSERT/UPDATE). FK quebrada significa que a referência
/// sumiu entre a checagem e a gravação.
pub(crate) fn map_write_error(e: sqlx::Error, unique_message: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::UniqueConstraintViolation(unique_message.to_string());
        }
        if db_err.is_foreign_key_violation() {
            return AppError::NotFound(referenced_entity(db_err.constraint()));
        }
    }
    e.into()
}

/// Erros de DELETE. FK aqui é o `ON DELETE RESTRICT` barrando a remoção.
pub(crate) fn map_delete_error(e: sqlx::Error, entity: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_foreign_key_violation() {
            return AppError::ReferentialIntegrity(format!(
                "{} ainda possui agendamentos ou vendas vinculados.",
                entity
            ));
        }
    }
    e.into()
}

/// Texto de busca -> padrão `ILIKE` de substring, com curingas escapados.
pub(crate) fn like_pattern(search: &str) -> String {
    let escaped = search
        .trim()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

fn referenced_entity(constraint: Option<&str>) -> &'static str {
    match constraint.unwrap_or_default() {
        c if c.contains("client") => "Cliente",
        c if c.contains("artist") => "Artista",
        c if c.contains("appointment") => "Agendamento",
        _ => "Registro",
    }
}

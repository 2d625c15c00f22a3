//src/main.rs

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod router;
mod services;
mod storage;

use crate::{
    common::db_utils::connect_pool,
    config::{AppState, Config},
    db::Repositories,
    storage::LocalFileStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG controla o nível; padrão "info"
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;

    let pool = connect_pool(&config)
        .await
        .context("Falha ao conectar no banco de dados")?;

    // Faz o app rodar as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Falha ao rodar as migrações do banco de dados")?;
    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let bind_address = config.bind_address.clone();
    let file_store = Arc::new(LocalFileStore::new(config.upload_dir.clone()));
    let app_state = AppState::new(config, Repositories::postgres(pool), file_store);

    let app = router::build_router(app_state);

    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Falha ao iniciar o listener TCP em {}", bind_address))?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("Erro no servidor Axum")?;
    Ok(())
}

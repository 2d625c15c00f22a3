// src/config.rs

use anyhow::Context;
use chrono::FixedOffset;
use std::{env, path::PathBuf, sync::Arc, time::Duration};

use crate::{
    db::Repositories,
    services::{
        AppointmentService, ArtistService, ClientService, DashboardService, InventoryService,
        SaleService,
    },
    storage::FileStore,
};

/// Configuração lida do ambiente (`.env` é carregado se existir).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_address: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
    pub db_statement_timeout: Duration,
    pub request_timeout: Duration,
    /// Fuso do estúdio, usado nas janelas de "hoje" e "este mês".
    pub utc_offset: FixedOffset,
    pub upload_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        let utc_offset = env_or("STUDIO_UTC_OFFSET", "+00:00")
            .parse::<FixedOffset>()
            .map_err(|e| anyhow::anyhow!("STUDIO_UTC_OFFSET inválido: {}", e))?;

        Ok(Self {
            database_url,
            jwt_secret,
            bind_address: env_or("BIND_ADDRESS", "0.0.0.0:3000"),
            db_max_connections: parse_env("DATABASE_MAX_CONNECTIONS", 5)?,
            db_acquire_timeout: Duration::from_secs(parse_env("DATABASE_ACQUIRE_TIMEOUT_SECS", 3)?),
            db_statement_timeout: Duration::from_millis(parse_env(
                "DATABASE_STATEMENT_TIMEOUT_MS",
                5000,
            )?),
            request_timeout: Duration::from_secs(parse_env("REQUEST_TIMEOUT_SECS", 15)?),
            utc_offset,
            upload_dir: PathBuf::from(env_or("UPLOAD_DIR", "./uploads")),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw.parse::<T>().with_context(|| format!("{} inválido: {}", key, raw)),
        Err(_) => Ok(default),
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub file_store: Arc<dyn FileStore>,
    pub client_service: ClientService,
    pub artist_service: ArtistService,
    pub appointment_service: AppointmentService,
    pub inventory_service: InventoryService,
    pub sale_service: SaleService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    /// Monta o gráfico de dependências a partir dos repositórios.
    pub fn new(config: Config, repos: Repositories, file_store: Arc<dyn FileStore>) -> Self {
        let utc_offset = config.utc_offset;

        Self {
            config: Arc::new(config),
            file_store,
            client_service: ClientService::new(repos.clients.clone()),
            artist_service: ArtistService::new(repos.artists.clone()),
            appointment_service: AppointmentService::new(
                repos.appointments.clone(),
                repos.clients.clone(),
                repos.artists.clone(),
            ),
            inventory_service: InventoryService::new(repos.inventory.clone()),
            sale_service: SaleService::new(
                repos.sales.clone(),
                repos.appointments.clone(),
                repos.clients.clone(),
                repos.artists.clone(),
            ),
            dashboard_service: DashboardService::new(repos.dashboard, utc_offset),
        }
    }
}

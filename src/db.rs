// src/db.rs
//
// Contratos do banco de dados. Os serviços só conhecem estes traits;
// a implementação Postgres fica em `db/*_repo.rs`.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        appointment::{Appointment, AppointmentChanges, AppointmentFilter, NewAppointment},
        artist::{Artist, ArtistChanges, NewArtist},
        client::{Client, ClientChanges, NewClient},
        dashboard::DateWindow,
        inventory::{InventoryChanges, InventoryItem, NewInventoryItem},
        sale::{Sale, SaleFilter, SaleRecord},
    },
};

pub mod appointment_repo;
pub mod artist_repo;
pub mod client_repo;
pub mod dashboard_repo;
pub mod inventory_repo;
pub mod sale_repo;

#[cfg(test)]
pub mod memory;

pub use appointment_repo::PgAppointmentRepository;
pub use artist_repo::PgArtistRepository;
pub use client_repo::PgClientRepository;
pub use dashboard_repo::PgDashboardRepository;
pub use inventory_repo::PgInventoryRepository;
pub use sale_repo::PgSaleRepository;

/// Quantos agendamentos e vendas apontam para um cliente ou artista.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReferenceCount {
    pub appointments: i64,
    pub sales: i64,
}

impl ReferenceCount {
    pub fn is_referenced(&self) -> bool {
        self.appointments > 0 || self.sales > 0
    }
}

/// Plano de atualização de uma venda: recebe a linha atual (já travada)
/// e devolve a linha completa a ser gravada.
pub type SalePlan<'a> = &'a (dyn Fn(&Sale) -> Result<SaleRecord, AppError> + Send + Sync);

#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn create_client(&self, new: &NewClient) -> Result<Client, AppError>;
    async fn find_client(&self, id: Uuid) -> Result<Option<Client>, AppError>;
    async fn find_clients(&self, ids: &[Uuid]) -> Result<Vec<Client>, AppError>;
    async fn list_clients(&self, search: Option<&str>) -> Result<Vec<Client>, AppError>;
    async fn update_client(
        &self,
        id: Uuid,
        changes: &ClientChanges,
    ) -> Result<Option<Client>, AppError>;
    async fn delete_client(&self, id: Uuid) -> Result<bool, AppError>;
    async fn count_client_references(&self, id: Uuid) -> Result<ReferenceCount, AppError>;
}

#[async_trait]
pub trait ArtistRepository: Send + Sync {
    async fn create_artist(&self, new: &NewArtist) -> Result<Artist, AppError>;
    async fn find_artist(&self, id: Uuid) -> Result<Option<Artist>, AppError>;
    async fn find_artists(&self, ids: &[Uuid]) -> Result<Vec<Artist>, AppError>;
    async fn list_artists(&self, active: Option<bool>) -> Result<Vec<Artist>, AppError>;
    async fn update_artist(
        &self,
        id: Uuid,
        changes: &ArtistChanges,
    ) -> Result<Option<Artist>, AppError>;
    async fn delete_artist(&self, id: Uuid) -> Result<bool, AppError>;
    async fn count_artist_references(&self, id: Uuid) -> Result<ReferenceCount, AppError>;
}

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn create_appointment(&self, new: &NewAppointment) -> Result<Appointment, AppError>;
    async fn find_appointment(&self, id: Uuid) -> Result<Option<Appointment>, AppError>;
    async fn find_appointments(&self, ids: &[Uuid]) -> Result<Vec<Appointment>, AppError>;
    async fn list_appointments(
        &self,
        filter: &AppointmentFilter,
    ) -> Result<Vec<Appointment>, AppError>;
    async fn update_appointment(
        &self,
        id: Uuid,
        changes: &AppointmentChanges,
    ) -> Result<Option<Appointment>, AppError>;
    async fn delete_appointment(&self, id: Uuid) -> Result<bool, AppError>;
}

#[async_trait]
pub trait InventoryRepository: Send + Sync {
    async fn create_item(&self, new: &NewInventoryItem) -> Result<InventoryItem, AppError>;
    async fn find_item(&self, id: Uuid) -> Result<Option<InventoryItem>, AppError>;
    async fn list_items(&self) -> Result<Vec<InventoryItem>, AppError>;
    /// Itens com `current_stock <= min_level`, do menor estoque para o maior.
    async fn list_low_stock(&self) -> Result<Vec<InventoryItem>, AppError>;
    async fn update_item(
        &self,
        id: Uuid,
        changes: &InventoryChanges,
    ) -> Result<Option<InventoryItem>, AppError>;
    async fn delete_item(&self, id: Uuid) -> Result<bool, AppError>;
    /// Soma `delta` ao estoque numa única escrita.
    /// `Ok(None)` = item não existe; saldo negativo vira erro de campo.
    async fn adjust_stock(&self, id: Uuid, delta: i32) -> Result<Option<InventoryItem>, AppError>;
}

#[async_trait]
pub trait SaleRepository: Send + Sync {
    async fn create_sale(&self, record: &SaleRecord) -> Result<Sale, AppError>;
    async fn find_sale(&self, id: Uuid) -> Result<Option<Sale>, AppError>;
    async fn list_sales(&self, filter: &SaleFilter) -> Result<Vec<Sale>, AppError>;
    /// Lê-trava-calcula-grava numa transação. `Ok(None)` = venda não existe.
    async fn update_sale_with(
        &self,
        id: Uuid,
        plan: SalePlan<'_>,
    ) -> Result<Option<Sale>, AppError>;
    async fn delete_sale(&self, id: Uuid) -> Result<bool, AppError>;
}

#[async_trait]
pub trait DashboardRepository: Send + Sync {
    async fn count_appointments_between(&self, window: DateWindow) -> Result<i64, AppError>;
    async fn sum_sales_between(&self, window: DateWindow) -> Result<Decimal, AppError>;
    async fn count_active_artists(&self) -> Result<i64, AppError>;
    async fn count_low_stock_items(&self) -> Result<i64, AppError>;
}

/// Conjunto de repositórios injetado no `AppState`.
#[derive(Clone)]
pub struct Repositories {
    pub clients: Arc<dyn ClientRepository>,
    pub artists: Arc<dyn ArtistRepository>,
    pub appointments: Arc<dyn AppointmentRepository>,
    pub inventory: Arc<dyn InventoryRepository>,
    pub sales: Arc<dyn SaleRepository>,
    pub dashboard: Arc<dyn DashboardRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            clients: Arc::new(PgClientRepository::new(pool.clone())),
            artists: Arc::new(PgArtistRepository::new(pool.clone())),
            appointments: Arc::new(PgAppointmentRepository::new(pool.clone())),
            inventory: Arc::new(PgInventoryRepository::new(pool.clone())),
            sales: Arc::new(PgSaleRepository::new(pool.clone())),
            dashboard: Arc::new(PgDashboardRepository::new(pool)),
        }
    }

    #[cfg(test)]
    pub fn in_memory(store: Arc<memory::MemoryStore>) -> Self {
        Self {
            clients: store.clone(),
            artists: store.clone(),
            appointments: store.clone(),
            inventory: store.clone(),
            sales: store.clone(),
            dashboard: store,
        }
    }
}

// src/services/client_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ClientRepository,
    models::{
        auth::Identity,
        client::{Client, CreateClientPayload, UpdateClientPayload},
    },
};

#[derive(Clone)]
pub struct ClientService {
    repo: Arc<dyn ClientRepository>,
}

impl ClientService {
    pub fn new(repo: Arc<dyn ClientRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_client(
        &self,
        actor: &Identity,
        payload: CreateClientPayload,
    ) -> Result<Client, AppError> {
        let new = payload.into_new()?;
        let client = self.repo.create_client(&new).await?;
        tracing::info!("👤 Cliente {} cadastrado por {}", client.id, actor.user_id);
        Ok(client)
    }

    pub async fn get_client(&self, id: Uuid) -> Result<Client, AppError> {
        self.repo.find_client(id).await?.ok_or(AppError::NotFound("Cliente"))
    }

    pub async fn list_clients(&self, search: Option<&str>) -> Result<Vec<Client>, AppError> {
        let search = search.map(str::trim).filter(|s| !s.is_empty());
        self.repo.list_clients(search).await
    }

    pub async fn update_client(
        &self,
        actor: &Identity,
        id: Uuid,
        payload: UpdateClientPayload,
    ) -> Result<Client, AppError> {
        let changes = payload.into_changes()?;
        let client = self
            .repo
            .update_client(id, &changes)
            .await?
            .ok_or(AppError::NotFound("Cliente"))?;
        tracing::info!("👤 Cliente {} atualizado por {}", id, actor.user_id);
        Ok(client)
    }

    /// Cliente com agendamentos ou vendas não pode ser removido.
    pub async fn delete_client(&self, actor: &Identity, id: Uuid) -> Result<(), AppError> {
        if self.repo.find_client(id).await?.is_none() {
            return Err(AppError::NotFound("Cliente"));
        }

        let refs = self.repo.count_client_references(id).await?;
        if refs.is_referenced() {
            tracing::warn!(
                "⚠️ Remoção do cliente {} recusada ({} agendamentos, {} vendas), pedida por {}",
                id,
                refs.appointments,
                refs.sales,
                actor.user_id
            );
            return Err(AppError::ReferentialIntegrity(
                "Cliente ainda possui agendamentos ou vendas vinculados.".to_string(),
            ));
        }

        if !self.repo.delete_client(id).await? {
            return Err(AppError::NotFound("Cliente"));
        }
        tracing::info!("🗑️ Cliente {} removido por {}", id, actor.user_id);
        Ok(())
    }
}

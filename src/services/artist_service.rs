// src/services/artist_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ArtistRepository,
    models::{
        artist::{Artist, CreateArtistPayload, UpdateArtistPayload},
        auth::Identity,
    },
};

#[derive(Clone)]
pub struct ArtistService {
    repo: Arc<dyn ArtistRepository>,
}

impl ArtistService {
    pub fn new(repo: Arc<dyn ArtistRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_artist(
        &self,
        actor: &Identity,
        payload: CreateArtistPayload,
    ) -> Result<Artist, AppError> {
        let new = payload.into_new()?;
        let artist = self.repo.create_artist(&new).await?;
        tracing::info!("🎨 Artista {} cadastrado por {}", artist.id, actor.user_id);
        Ok(artist)
    }

    pub async fn get_artist(&self, id: Uuid) -> Result<Artist, AppError> {
        self.repo.find_artist(id).await?.ok_or(AppError::NotFound("Artista"))
    }

    pub async fn list_artists(&self, active: Option<bool>) -> Result<Vec<Artist>, AppError> {
        self.repo.list_artists(active).await
    }

    pub async fn update_artist(
        &self,
        actor: &Identity,
        id: Uuid,
        payload: UpdateArtistPayload,
    ) -> Result<Artist, AppError> {
        let changes = payload.into_changes()?;
        let artist = self
            .repo
            .update_artist(id, &changes)
            .await?
            .ok_or(AppError::NotFound("Artista"))?;
        tracing::info!("🎨 Artista {} atualizado por {}", id, actor.user_id);
        Ok(artist)
    }

    /// Artista com agendamentos ou vendas não pode ser removido.
    /// Para tirá-lo da agenda, use `isActive = false`.
    pub async fn delete_artist(&self, actor: &Identity, id: Uuid) -> Result<(), AppError> {
        if self.repo.find_artist(id).await?.is_none() {
            return Err(AppError::NotFound("Artista"));
        }

        let refs = self.repo.count_artist_references(id).await?;
        if refs.is_referenced() {
            tracing::warn!(
                "⚠️ Remoção do artista {} recusada ({} agendamentos, {} vendas), pedida por {}",
                id,
                refs.appointments,
                refs.sales,
                actor.user_id
            );
            return Err(AppError::ReferentialIntegrity(
                "Artista ainda possui agendamentos ou vendas vinculados.".to_string(),
            ));
        }

        if !self.repo.delete_artist(id).await? {
            return Err(AppError::NotFound("Artista"));
        }
        tracing::info!("🗑️ Artista {} removido por {}", id, actor.user_id);
        Ok(())
    }
}

// src/services/appointment_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AppointmentRepository, ArtistRepository, ClientRepository},
    models::{
        appointment::{
            AppointmentDetail, AppointmentFilter, CreateAppointmentPayload,
            UpdateAppointmentPayload,
        },
        artist::Artist,
        auth::Identity,
        client::Client,
    },
    services::relationship_service::Directory,
};

#[derive(Clone)]
pub struct AppointmentService {
    repo: Arc<dyn AppointmentRepository>,
    clients: Arc<dyn ClientRepository>,
    artists: Arc<dyn ArtistRepository>,
}

impl AppointmentService {
    pub fn new(
        repo: Arc<dyn AppointmentRepository>,
        clients: Arc<dyn ClientRepository>,
        artists: Arc<dyn ArtistRepository>,
    ) -> Self {
        Self { repo, clients, artists }
    }

    /// Cliente e artista precisam existir antes de qualquer escrita.
    async fn load_parties(
        &self,
        client_id: Uuid,
        artist_id: Uuid,
    ) -> Result<(Client, Artist), AppError> {
        let (client, artist) = tokio::try_join!(
            self.clients.find_client(client_id),
            self.artists.find_artist(artist_id),
        )?;
        let client = client.ok_or(AppError::NotFound("Cliente"))?;
        let artist = artist.ok_or(AppError::NotFound("Artista"))?;
        Ok((client, artist))
    }

    pub async fn create_appointment(
        &self,
        actor: &Identity,
        payload: CreateAppointmentPayload,
    ) -> Result<AppointmentDetail, AppError> {
        let new = payload.into_new()?;
        let (client, artist) = self.load_parties(new.client_id, new.artist_id).await?;

        let appointment = self.repo.create_appointment(&new).await?;
        tracing::info!(
            "📅 Agendamento {} criado por {} ({} com {})",
            appointment.id,
            actor.user_id,
            client.id,
            artist.id
        );

        Ok(AppointmentDetail { appointment, client, artist })
    }

    pub async fn get_appointment(&self, id: Uuid) -> Result<AppointmentDetail, AppError> {
        let appointment = self
            .repo
            .find_appointment(id)
            .await?
            .ok_or(AppError::NotFound("Agendamento"))?;

        let directory = Directory::for_appointments(
            std::slice::from_ref(&appointment),
            self.clients.as_ref(),
            self.artists.as_ref(),
        )
        .await?;
        directory.resolve_appointment(appointment)
    }

    pub async fn list_appointments(
        &self,
        filter: &AppointmentFilter,
    ) -> Result<Vec<AppointmentDetail>, AppError> {
        let appointments = self.repo.list_appointments(filter).await?;
        let directory =
            Directory::for_appointments(&appointments, self.clients.as_ref(), self.artists.as_ref())
                .await?;
        directory.resolve_appointments(appointments)
    }

    pub async fn update_appointment(
        &self,
        actor: &Identity,
        id: Uuid,
        payload: UpdateAppointmentPayload,
    ) -> Result<AppointmentDetail, AppError> {
        let changes = payload.into_changes()?;

        let current = self
            .repo
            .find_appointment(id)
            .await?
            .ok_or(AppError::NotFound("Agendamento"))?;

        let (client, artist) = self
            .load_parties(
                changes.client_id.unwrap_or(current.client_id),
                changes.artist_id.unwrap_or(current.artist_id),
            )
            .await?;

        let appointment = self
            .repo
            .update_appointment(id, &changes)
            .await?
            .ok_or(AppError::NotFound("Agendamento"))?;
        tracing::info!("📅 Agendamento {} atualizado por {}", id, actor.user_id);

        Ok(AppointmentDetail { appointment, client, artist })
    }

    /// Vendas originadas deste agendamento continuam existindo, sem o vínculo.
    pub async fn delete_appointment(&self, actor: &Identity, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete_appointment(id).await? {
            return Err(AppError::NotFound("Agendamento"));
        }
        tracing::info!("🗑️ Agendamento {} removido por {}", id, actor.user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::memory::MemoryStore,
        models::{
            appointment::AppointmentStatus, artist::NewArtist, client::NewClient,
        },
    };
    use chrono::{DateTime, Utc};
    use serde_json::json;

    fn actor() -> Identity {
        Identity { user_id: Uuid::new_v4(), role: None }
    }

    struct Fixture {
        store: Arc<MemoryStore>,
        service: AppointmentService,
        client: Client,
        artist: Artist,
    }

    async fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let client = store
            .create_client(&NewClient {
                first_name: "Maria".into(),
                last_name: "Souza".into(),
                email: None,
                phone: None,
                date_of_birth: None,
                address: None,
                emergency_contact: None,
                medical_notes: None,
            })
            .await
            .unwrap();
        let artist = store
            .create_artist(&NewArtist {
                name: "Rafa".into(),
                user_id: None,
                email: None,
                phone: None,
                specialties: Vec::new(),
                schedule: None,
                hourly_rate: None,
                is_active: true,
            })
            .await
            .unwrap();
        let service = AppointmentService::new(store.clone(), store.clone(), store.clone());
        Fixture { store, service, client, artist }
    }

    fn create_payload(client_id: Uuid, artist_id: Uuid, date: &str) -> CreateAppointmentPayload {
        serde_json::from_value(json!({
            "clientId": client_id,
            "artistId": artist_id,
            "scheduledDate": date,
            "duration": 120,
            "bodyPart": "antebraço"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn created_appointment_is_enriched() {
        let f = fixture().await;
        let detail = f
            .service
            .create_appointment(&actor(), create_payload(f.client.id, f.artist.id, "2025-03-15T14:00:00Z"))
            .await
            .unwrap();

        assert_eq!(detail.client, f.client);
        assert_eq!(detail.artist, f.artist);
        assert_eq!(detail.appointment.status, AppointmentStatus::Scheduled);

        let fetched = f.service.get_appointment(detail.appointment.id).await.unwrap();
        assert_eq!(fetched.appointment, detail.appointment);
    }

    #[tokio::test]
    async fn unknown_client_creates_nothing() {
        let f = fixture().await;
        let err = f
            .service
            .create_appointment(&actor(), create_payload(Uuid::new_v4(), f.artist.id, "2025-03-15T14:00:00Z"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound("Cliente")));
        let all = f.service.list_appointments(&AppointmentFilter::default()).await.unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn update_to_unknown_artist_is_rejected() {
        let f = fixture().await;
        let detail = f
            .service
            .create_appointment(&actor(), create_payload(f.client.id, f.artist.id, "2025-03-15T14:00:00Z"))
            .await
            .unwrap();

        let changes: UpdateAppointmentPayload =
            serde_json::from_value(json!({ "artistId": Uuid::new_v4() })).unwrap();
        let err = f
            .service
            .update_appointment(&actor(), detail.appointment.id, changes)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound("Artista")));

        let unchanged = f.store.find_appointment(detail.appointment.id).await.unwrap().unwrap();
        assert_eq!(unchanged.artist_id, f.artist.id);
    }

    #[tokio::test]
    async fn list_filters_by_window_and_status() {
        let f = fixture().await;
        for date in ["2025-03-14T10:00:00Z", "2025-03-15T10:00:00Z", "2025-03-16T10:00:00Z"] {
            f.service
                .create_appointment(&actor(), create_payload(f.client.id, f.artist.id, date))
                .await
                .unwrap();
        }

        let from: DateTime<Utc> = "2025-03-15T00:00:00Z".parse().unwrap();
        let to: DateTime<Utc> = "2025-03-16T00:00:00Z".parse().unwrap();
        let filter = AppointmentFilter { from: Some(from), to: Some(to), ..Default::default() };
        assert_eq!(f.service.list_appointments(&filter).await.unwrap().len(), 1);

        let cancelled = AppointmentFilter {
            status: Some(AppointmentStatus::Cancelled),
            ..Default::default()
        };
        assert!(f.service.list_appointments(&cancelled).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn listing_with_orphaned_artist_is_a_broken_reference() {
        let f = fixture().await;
        f.service
            .create_appointment(&actor(), create_payload(f.client.id, f.artist.id, "2025-03-15T14:00:00Z"))
            .await
            .unwrap();
        f.store.force_remove_artist(f.artist.id).await;

        let err = f.service.list_appointments(&AppointmentFilter::default()).await.unwrap_err();
        assert!(matches!(err, AppError::BrokenReference { entity: "artist", .. }));
    }
}

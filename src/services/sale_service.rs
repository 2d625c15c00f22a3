// src/services/sale_service.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AppointmentRepository, ArtistRepository, ClientRepository, SaleRepository},
    models::{
        auth::Identity,
        sale::{
            CreateSalePayload, Sale, SaleChanges, SaleDetail, SaleFilter, SaleRecord,
            UpdateSalePayload,
        },
    },
    services::{finance_service::compute_payment, relationship_service::Directory},
};

#[derive(Clone)]
pub struct SaleService {
    repo: Arc<dyn SaleRepository>,
    appointments: Arc<dyn AppointmentRepository>,
    clients: Arc<dyn ClientRepository>,
    artists: Arc<dyn ArtistRepository>,
}

/// Aplica as alterações sobre a linha atual e recalcula os campos derivados.
fn merge_sale(current: &Sale, changes: &SaleChanges) -> SaleRecord {
    let total_amount = changes.total_amount.unwrap_or(current.total_amount);
    let deposit = changes.deposit.unwrap_or(current.deposit);
    let payment = compute_payment(total_amount, deposit);

    SaleRecord {
        appointment_id: changes.appointment_id.or(current.appointment_id),
        client_id: changes.client_id.unwrap_or(current.client_id),
        artist_id: changes.artist_id.unwrap_or(current.artist_id),
        total_amount,
        deposit,
        remaining_balance: payment.remaining_balance,
        payment_status: payment.payment_status,
        payment_method: changes.payment_method.clone().or_else(|| current.payment_method.clone()),
        sale_date: changes.sale_date.unwrap_or(current.sale_date),
        notes: changes.notes.clone().or_else(|| current.notes.clone()),
    }
}

impl SaleService {
    pub fn new(
        repo: Arc<dyn SaleRepository>,
        appointments: Arc<dyn AppointmentRepository>,
        clients: Arc<dyn ClientRepository>,
        artists: Arc<dyn ArtistRepository>,
    ) -> Self {
        Self { repo, appointments, clients, artists }
    }

    /// Confere as referências informadas. `None` = não mudou, nada a checar.
    async fn check_references(
        &self,
        client_id: Option<Uuid>,
        artist_id: Option<Uuid>,
        appointment_id: Option<Uuid>,
    ) -> Result<(), AppError> {
        if let Some(id) = client_id {
            self.clients.find_client(id).await?.ok_or(AppError::NotFound("Cliente"))?;
        }
        if let Some(id) = artist_id {
            self.artists.find_artist(id).await?.ok_or(AppError::NotFound("Artista"))?;
        }
        if let Some(id) = appointment_id {
            self.appointments
                .find_appointment(id)
                .await?
                .ok_or(AppError::NotFound("Agendamento"))?;
        }
        Ok(())
    }

    async fn resolve(&self, sale: Sale) -> Result<SaleDetail, AppError> {
        let directory = Directory::for_sales(
            std::slice::from_ref(&sale),
            self.clients.as_ref(),
            self.artists.as_ref(),
            self.appointments.as_ref(),
        )
        .await?;
        directory.resolve_sale(sale)
    }

    pub async fn create_sale(
        &self,
        actor: &Identity,
        payload: CreateSalePayload,
    ) -> Result<SaleDetail, AppError> {
        let new = payload.into_new()?;
        self.check_references(Some(new.client_id), Some(new.artist_id), new.appointment_id)
            .await?;

        let payment = compute_payment(new.total_amount, new.deposit);
        let record = SaleRecord {
            appointment_id: new.appointment_id,
            client_id: new.client_id,
            artist_id: new.artist_id,
            total_amount: new.total_amount,
            deposit: new.deposit,
            remaining_balance: payment.remaining_balance,
            payment_status: payment.payment_status,
            payment_method: new.payment_method,
            sale_date: new.sale_date.unwrap_or_else(Utc::now),
            notes: new.notes,
        };

        let sale = self.repo.create_sale(&record).await?;
        tracing::info!(
            "💰 Venda {} registrada por {} (total {}, saldo {})",
            sale.id,
            actor.user_id,
            sale.total_amount,
            sale.remaining_balance
        );
        self.resolve(sale).await
    }

    pub async fn get_sale(&self, id: Uuid) -> Result<SaleDetail, AppError> {
        let sale = self.repo.find_sale(id).await?.ok_or(AppError::NotFound("Venda"))?;
        self.resolve(sale).await
    }

    pub async fn list_sales(&self, filter: &SaleFilter) -> Result<Vec<SaleDetail>, AppError> {
        let sales = self.repo.list_sales(filter).await?;
        let directory = Directory::for_sales(
            &sales,
            self.clients.as_ref(),
            self.artists.as_ref(),
            self.appointments.as_ref(),
        )
        .await?;
        directory.resolve_sales(sales)
    }

    /// Saldo e status são recalculados a partir da linha travada no banco,
    /// nunca a partir do que o cliente enviou.
    pub async fn update_sale(
        &self,
        actor: &Identity,
        id: Uuid,
        payload: UpdateSalePayload,
    ) -> Result<SaleDetail, AppError> {
        let changes = payload.into_changes()?;
        self.check_references(changes.client_id, changes.artist_id, changes.appointment_id)
            .await?;

        let plan = |current: &Sale| -> Result<SaleRecord, AppError> {
            Ok(merge_sale(current, &changes))
        };
        let sale = self
            .repo
            .update_sale_with(id, &plan)
            .await?
            .ok_or(AppError::NotFound("Venda"))?;

        tracing::info!(
            "💰 Venda {} atualizada por {} (saldo {}, {:?})",
            id,
            actor.user_id,
            sale.remaining_balance,
            sale.payment_status
        );
        self.resolve(sale).await
    }

    pub async fn delete_sale(&self, actor: &Identity, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete_sale(id).await? {
            return Err(AppError::NotFound("Venda"));
        }
        tracing::info!("🗑️ Venda {} removida por {}", id, actor.user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::memory::MemoryStore,
        models::{
            appointment::{AppointmentStatus, NewAppointment},
            artist::NewArtist,
            client::NewClient,
            sale::PaymentStatus,
        },
    };
    use rust_decimal::Decimal;
    use serde_json::json;

    fn actor() -> Identity {
        Identity { user_id: Uuid::new_v4(), role: None }
    }

    struct Fixture {
        store: Arc<MemoryStore>,
        service: SaleService,
        client_id: Uuid,
        artist_id: Uuid,
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
        let service = SaleService::new(store.clone(), store.clone(), store.clone(), store.clone());
        Fixture { store, service, client_id: client.id, artist_id: artist.id }
    }

    fn create_payload(f: &Fixture, extra: serde_json::Value) -> CreateSalePayload {
        let mut body = json!({ "clientId": f.client_id, "artistId": f.artist_id });
        if let (Some(body), Some(extra)) = (body.as_object_mut(), extra.as_object()) {
            body.extend(extra.clone());
        }
        serde_json::from_value(body).unwrap()
    }

    #[tokio::test]
    async fn create_computes_derived_fields() {
        let f = fixture().await;
        let detail = f
            .service
            .create_sale(&actor(), create_payload(&f, json!({ "totalAmount": 500, "deposit": 150 })))
            .await
            .unwrap();

        assert_eq!(detail.sale.remaining_balance, Decimal::new(350, 0));
        assert_eq!(detail.sale.payment_status, PaymentStatus::Partial);
        assert_eq!(detail.client.id, f.client_id);
        assert!(detail.appointment.is_none());
    }

    #[tokio::test]
    async fn client_supplied_balance_is_ignored() {
        let f = fixture().await;
        let detail = f
            .service
            .create_sale(
                &actor(),
                create_payload(
                    &f,
                    json!({
                        "totalAmount": 200,
                        "deposit": 200,
                        "remainingBalance": 50,
                        "paymentStatus": "pending"
                    }),
                ),
            )
            .await
            .unwrap();

        assert_eq!(detail.sale.remaining_balance, Decimal::ZERO);
        assert_eq!(detail.sale.payment_status, PaymentStatus::Completed);
    }

    #[tokio::test]
    async fn update_recomputes_from_stored_total() {
        let f = fixture().await;
        let created = f
            .service
            .create_sale(&actor(), create_payload(&f, json!({ "totalAmount": 500 })))
            .await
            .unwrap();
        assert_eq!(created.sale.payment_status, PaymentStatus::Pending);

        let changes: UpdateSalePayload =
            serde_json::from_value(json!({ "deposit": 500, "notes": "quitado no pix" })).unwrap();
        let updated = f.service.update_sale(&actor(), created.sale.id, changes).await.unwrap();

        assert_eq!(updated.sale.total_amount, Decimal::new(500, 0));
        assert_eq!(updated.sale.remaining_balance, Decimal::ZERO);
        assert_eq!(updated.sale.payment_status, PaymentStatus::Completed);
        assert_eq!(updated.sale.notes.as_deref(), Some("quitado no pix"));
    }

    #[tokio::test]
    async fn unknown_references_are_rejected() {
        let f = fixture().await;
        let err = f
            .service
            .create_sale(
                &actor(),
                create_payload(&f, json!({ "totalAmount": 10, "appointmentId": Uuid::new_v4() })),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound("Agendamento")));

        let body = json!({ "clientId": Uuid::new_v4(), "artistId": f.artist_id, "totalAmount": 10 });
        let err = f
            .service
            .create_sale(&actor(), serde_json::from_value(body).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound("Cliente")));
        assert!(f.service.list_sales(&SaleFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleting_origin_appointment_keeps_sale() {
        let f = fixture().await;
        let appointment = f
            .store
            .create_appointment(&NewAppointment {
                client_id: f.client_id,
                artist_id: f.artist_id,
                scheduled_date: Utc::now(),
                duration: 60,
                body_part: None,
                description: None,
                reference_images: Vec::new(),
                status: AppointmentStatus::Completed,
                estimated_price: None,
                notes: None,
            })
            .await
            .unwrap();
        let created = f
            .service
            .create_sale(
                &actor(),
                create_payload(&f, json!({ "totalAmount": 300, "appointmentId": appointment.id })),
            )
            .await
            .unwrap();
        assert_eq!(created.appointment.as_ref().map(|a| a.id), Some(appointment.id));

        f.store.delete_appointment(appointment.id).await.unwrap();

        let after = f.service.get_sale(created.sale.id).await.unwrap();
        assert!(after.sale.appointment_id.is_none());
        assert!(after.appointment.is_none());
    }

    #[tokio::test]
    async fn referenced_client_cannot_be_deleted() {
        let f = fixture().await;
        f.service
            .create_sale(&actor(), create_payload(&f, json!({ "totalAmount": 90 })))
            .await
            .unwrap();

        let clients = crate::services::ClientService::new(f.store.clone());
        let err = clients.delete_client(&actor(), f.client_id).await.unwrap_err();
        assert!(matches!(err, AppError::ReferentialIntegrity(_)));
        assert!(f.store.find_client(f.client_id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn dangling_appointment_on_stored_sale_is_internal_error() {
        let f = fixture().await;
        f.store
            .insert_raw_sale(Sale {
                id: Uuid::new_v4(),
                appointment_id: Some(Uuid::new_v4()),
                client_id: f.client_id,
                artist_id: f.artist_id,
                total_amount: Decimal::new(100, 0),
                deposit: Decimal::ZERO,
                remaining_balance: Decimal::new(100, 0),
                payment_status: PaymentStatus::Pending,
                payment_method: None,
                sale_date: Utc::now(),
                notes: None,
                created_at: Utc::now(),
            })
            .await;

        let err = f.service.list_sales(&SaleFilter::default()).await.unwrap_err();
        assert!(matches!(err, AppError::BrokenReference { entity: "appointment", .. }));
    }
}

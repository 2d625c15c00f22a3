// src/db/memory.rs
//
// Repositório em memória para os testes de serviço e de rotas.
// Reproduz as regras do esquema que importam para o domínio: email único,
// FKs com RESTRICT, SET NULL em vendas ao apagar agendamento.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    common::{error::AppError, validation::field_error},
    db::{
        AppointmentRepository, ArtistRepository, ClientRepository, DashboardRepository,
        InventoryRepository, ReferenceCount, SalePlan, SaleRepository,
    },
    models::{
        appointment::{Appointment, AppointmentChanges, AppointmentFilter, NewAppointment},
        artist::{Artist, ArtistChanges, NewArtist},
        client::{Client, ClientChanges, NewClient},
        dashboard::DateWindow,
        inventory::{InventoryChanges, InventoryItem, NewInventoryItem},
        sale::{Sale, SaleFilter, SaleRecord},
    },
};

#[derive(Default)]
struct Tables {
    clients: Vec<Client>,
    artists: Vec<Artist>,
    appointments: Vec<Appointment>,
    inventory: Vec<InventoryItem>,
    sales: Vec<Sale>,
}

impl Tables {
    fn client_refs(&self, id: Uuid) -> ReferenceCount {
        ReferenceCount {
            appointments: self.appointments.iter().filter(|a| a.client_id == id).count() as i64,
            sales: self.sales.iter().filter(|s| s.client_id == id).count() as i64,
        }
    }

    fn artist_refs(&self, id: Uuid) -> ReferenceCount {
        ReferenceCount {
            appointments: self.appointments.iter().filter(|a| a.artist_id == id).count() as i64,
            sales: self.sales.iter().filter(|s| s.artist_id == id).count() as i64,
        }
    }

    fn check_people(&self, client_id: Uuid, artist_id: Uuid) -> Result<(), AppError> {
        if !self.clients.iter().any(|c| c.id == client_id) {
            return Err(AppError::NotFound("Cliente"));
        }
        if !self.artists.iter().any(|a| a.id == artist_id) {
            return Err(AppError::NotFound("Artista"));
        }
        Ok(())
    }

    fn check_sale_refs(&self, record: &SaleRecord) -> Result<(), AppError> {
        self.check_people(record.client_id, record.artist_id)?;
        if let Some(appointment_id) = record.appointment_id {
            if !self.appointments.iter().any(|a| a.id == appointment_id) {
                return Err(AppError::NotFound("Agendamento"));
            }
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grava uma venda sem checar referências, para simular dado inconsistente.
    pub async fn insert_raw_sale(&self, sale: Sale) {
        self.tables.write().await.sales.push(sale);
    }

    /// Remove um artista ignorando as FKs, deixando referências órfãs.
    pub async fn force_remove_artist(&self, id: Uuid) {
        self.tables.write().await.artists.retain(|a| a.id != id);
    }
}

fn email_taken<'a>(
    mut emails: impl Iterator<Item = (Uuid, Option<&'a str>)>,
    email: Option<&str>,
    except: Option<Uuid>,
) -> bool {
    let Some(email) = email else { return false };
    emails.any(|(id, other)| Some(id) != except && other == Some(email))
}

fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(needle))
}

fn in_window<T: PartialOrd>(value: &T, from: Option<&T>, to: Option<&T>) -> bool {
    from.is_none_or(|f| value >= f) && to.is_none_or(|t| value < t)
}

#[async_trait]
impl ClientRepository for MemoryStore {
    async fn create_client(&self, new: &NewClient) -> Result<Client, AppError> {
        let mut tables = self.tables.write().await;
        let emails = tables.clients.iter().map(|c| (c.id, c.email.as_deref()));
        if email_taken(emails, new.email.as_deref(), None) {
            return Err(AppError::UniqueConstraintViolation(
                "Já existe um cliente com este email.".into(),
            ));
        }
        let client = Client {
            id: Uuid::new_v4(),
            first_name: new.first_name.clone(),
            last_name: new.last_name.clone(),
            email: new.email.clone(),
            phone: new.phone.clone(),
            date_of_birth: new.date_of_birth,
            address: new.address.clone(),
            emergency_contact: new.emergency_contact.clone(),
            medical_notes: new.medical_notes.clone(),
            created_at: Utc::now(),
        };
        tables.clients.push(client.clone());
        Ok(client)
    }

    async fn find_client(&self, id: Uuid) -> Result<Option<Client>, AppError> {
        Ok(self.tables.read().await.clients.iter().find(|c| c.id == id).cloned())
    }

    async fn find_clients(&self, ids: &[Uuid]) -> Result<Vec<Client>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.clients.iter().filter(|c| ids.contains(&c.id)).cloned().collect())
    }

    async fn list_clients(&self, search: Option<&str>) -> Result<Vec<Client>, AppError> {
        let tables = self.tables.read().await;
        let needle = search.map(|s| s.trim().to_lowercase());
        let mut clients: Vec<Client> = tables
            .clients
            .iter()
            .filter(|c| match &needle {
                None => true,
                Some(n) => {
                    contains_ci(Some(&c.first_name), n)
                        || contains_ci(Some(&c.last_name), n)
                        || contains_ci(c.email.as_deref(), n)
                }
            })
            .cloned()
            .collect();
        clients.sort_by(|a, b| (&a.first_name, &a.last_name).cmp(&(&b.first_name, &b.last_name)));
        Ok(clients)
    }

    async fn update_client(
        &self,
        id: Uuid,
        changes: &ClientChanges,
    ) -> Result<Option<Client>, AppError> {
        let mut tables = self.tables.write().await;
        let emails = tables.clients.iter().map(|c| (c.id, c.email.as_deref()));
        if email_taken(emails, changes.email.as_deref(), Some(id)) {
            return Err(AppError::UniqueConstraintViolation(
                "Já existe um cliente com este email.".into(),
            ));
        }
        let Some(client) = tables.clients.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        if let Some(v) = &changes.first_name {
            client.first_name = v.clone();
        }
        if let Some(v) = &changes.last_name {
            client.last_name = v.clone();
        }
        if changes.email.is_some() {
            client.email = changes.email.clone();
        }
        if changes.phone.is_some() {
            client.phone = changes.phone.clone();
        }
        if changes.date_of_birth.is_some() {
            client.date_of_birth = changes.date_of_birth;
        }
        if changes.address.is_some() {
            client.address = changes.address.clone();
        }
        if changes.emergency_contact.is_some() {
            client.emergency_contact = changes.emergency_contact.clone();
        }
        if changes.medical_notes.is_some() {
            client.medical_notes = changes.medical_notes.clone();
        }
        Ok(Some(client.clone()))
    }

    async fn delete_client(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        if tables.client_refs(id).is_referenced() {
            return Err(AppError::ReferentialIntegrity(
                "Cliente ainda possui agendamentos ou vendas vinculados.".into(),
            ));
        }
        let before = tables.clients.len();
        tables.clients.retain(|c| c.id != id);
        Ok(tables.clients.len() < before)
    }

    async fn count_client_references(&self, id: Uuid) -> Result<ReferenceCount, AppError> {
        Ok(self.tables.read().await.client_refs(id))
    }
}

#[async_trait]
impl ArtistRepository for MemoryStore {
    async fn create_artist(&self, new: &NewArtist) -> Result<Artist, AppError> {
        let mut tables = self.tables.write().await;
        let emails = tables.artists.iter().map(|a| (a.id, a.email.as_deref()));
        if email_taken(emails, new.email.as_deref(), None) {
            return Err(AppError::UniqueConstraintViolation(
                "Já existe um artista com este email.".into(),
            ));
        }
        let artist = Artist {
            id: Uuid::new_v4(),
            name: new.name.clone(),
            user_id: new.user_id.clone(),
            email: new.email.clone(),
            phone: new.phone.clone(),
            specialties: new.specialties.clone(),
            schedule: new.schedule.clone(),
            hourly_rate: new.hourly_rate,
            is_active: new.is_active,
            created_at: Utc::now(),
        };
        tables.artists.push(artist.clone());
        Ok(artist)
    }

    async fn find_artist(&self, id: Uuid) -> Result<Option<Artist>, AppError> {
        Ok(self.tables.read().await.artists.iter().find(|a| a.id == id).cloned())
    }

    async fn find_artists(&self, ids: &[Uuid]) -> Result<Vec<Artist>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.artists.iter().filter(|a| ids.contains(&a.id)).cloned().collect())
    }

    async fn list_artists(&self, active: Option<bool>) -> Result<Vec<Artist>, AppError> {
        let tables = self.tables.read().await;
        let mut artists: Vec<Artist> = tables
            .artists
            .iter()
            .filter(|a| active.is_none_or(|flag| a.is_active == flag))
            .cloned()
            .collect();
        artists.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(artists)
    }

    async fn update_artist(
        &self,
        id: Uuid,
        changes: &ArtistChanges,
    ) -> Result<Option<Artist>, AppError> {
        let mut tables = self.tables.write().await;
        let emails = tables.artists.iter().map(|a| (a.id, a.email.as_deref()));
        if email_taken(emails, changes.email.as_deref(), Some(id)) {
            return Err(AppError::UniqueConstraintViolation(
                "Já existe um artista com este email.".into(),
            ));
        }
        let Some(artist) = tables.artists.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        if let Some(v) = &changes.name {
            artist.name = v.clone();
        }
        if changes.user_id.is_some() {
            artist.user_id = changes.user_id.clone();
        }
        if changes.email.is_some() {
            artist.email = changes.email.clone();
        }
        if changes.phone.is_some() {
            artist.phone = changes.phone.clone();
        }
        if let Some(v) = &changes.specialties {
            artist.specialties = v.clone();
        }
        if changes.schedule.is_some() {
            artist.schedule = changes.schedule.clone();
        }
        if changes.hourly_rate.is_some() {
            artist.hourly_rate = changes.hourly_rate;
        }
        if let Some(v) = changes.is_active {
            artist.is_active = v;
        }
        Ok(Some(artist.clone()))
    }

    async fn delete_artist(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        if tables.artist_refs(id).is_referenced() {
            return Err(AppError::ReferentialIntegrity(
                "Artista ainda possui agendamentos ou vendas vinculados.".into(),
            ));
        }
        let before = tables.artists.len();
        tables.artists.retain(|a| a.id != id);
        Ok(tables.artists.len() < before)
    }

    async fn count_artist_references(&self, id: Uuid) -> Result<ReferenceCount, AppError> {
        Ok(self.tables.read().await.artist_refs(id))
    }
}

#[async_trait]
impl AppointmentRepository for MemoryStore {
    async fn create_appointment(&self, new: &NewAppointment) -> Result<Appointment, AppError> {
        let mut tables = self.tables.write().await;
        tables.check_people(new.client_id, new.artist_id)?;
        let appointment = Appointment {
            id: Uuid::new_v4(),
            client_id: new.client_id,
            artist_id: new.artist_id,
            scheduled_date: new.scheduled_date,
            duration: new.duration,
            body_part: new.body_part.clone(),
            description: new.description.clone(),
            reference_images: new.reference_images.clone(),
            status: new.status,
            estimated_price: new.estimated_price,
            notes: new.notes.clone(),
            created_at: Utc::now(),
        };
        tables.appointments.push(appointment.clone());
        Ok(appointment)
    }

    async fn find_appointment(&self, id: Uuid) -> Result<Option<Appointment>, AppError> {
        Ok(self.tables.read().await.appointments.iter().find(|a| a.id == id).cloned())
    }

    async fn find_appointments(&self, ids: &[Uuid]) -> Result<Vec<Appointment>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.appointments.iter().filter(|a| ids.contains(&a.id)).cloned().collect())
    }

    async fn list_appointments(
        &self,
        filter: &AppointmentFilter,
    ) -> Result<Vec<Appointment>, AppError> {
        let tables = self.tables.read().await;
        let mut appointments: Vec<Appointment> = tables
            .appointments
            .iter()
            .filter(|a| in_window(&a.scheduled_date, filter.from.as_ref(), filter.to.as_ref()))
            .filter(|a| filter.client_id.is_none_or(|id| a.client_id == id))
            .filter(|a| filter.artist_id.is_none_or(|id| a.artist_id == id))
            .filter(|a| filter.status.is_none_or(|s| a.status == s))
            .cloned()
            .collect();
        appointments.sort_by_key(|a| a.scheduled_date);
        Ok(appointments)
    }

    async fn update_appointment(
        &self,
        id: Uuid,
        changes: &AppointmentChanges,
    ) -> Result<Option<Appointment>, AppError> {
        let mut tables = self.tables.write().await;
        let Some(current) = tables.appointments.iter().find(|a| a.id == id).cloned() else {
            return Ok(None);
        };
        tables.check_people(
            changes.client_id.unwrap_or(current.client_id),
            changes.artist_id.unwrap_or(current.artist_id),
        )?;
        let Some(appointment) = tables.appointments.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        if let Some(v) = changes.client_id {
            appointment.client_id = v;
        }
        if let Some(v) = changes.artist_id {
            appointment.artist_id = v;
        }
        if let Some(v) = changes.scheduled_date {
            appointment.scheduled_date = v;
        }
        if let Some(v) = changes.duration {
            appointment.duration = v;
        }
        if changes.body_part.is_some() {
            appointment.body_part = changes.body_part.clone();
        }
        if changes.description.is_some() {
            appointment.description = changes.description.clone();
        }
        if let Some(v) = &changes.reference_images {
            appointment.reference_images = v.clone();
        }
        if let Some(v) = changes.status {
            appointment.status = v;
        }
        if changes.estimated_price.is_some() {
            appointment.estimated_price = changes.estimated_price;
        }
        if changes.notes.is_some() {
            appointment.notes = changes.notes.clone();
        }
        Ok(Some(appointment.clone()))
    }

    async fn delete_appointment(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        let before = tables.appointments.len();
        tables.appointments.retain(|a| a.id != id);
        if tables.appointments.len() == before {
            return Ok(false);
        }
        for sale in tables.sales.iter_mut().filter(|s| s.appointment_id == Some(id)) {
            sale.appointment_id = None;
        }
        Ok(true)
    }
}

#[async_trait]
impl InventoryRepository for MemoryStore {
    async fn create_item(&self, new: &NewInventoryItem) -> Result<InventoryItem, AppError> {
        let item = InventoryItem {
            id: Uuid::new_v4(),
            name: new.name.clone(),
            brand: new.brand.clone(),
            category: new.category,
            current_stock: new.current_stock,
            min_level: new.min_level,
            unit_price: new.unit_price,
            supplier: new.supplier.clone(),
            description: new.description.clone(),
            created_at: Utc::now(),
        };
        self.tables.write().await.inventory.push(item.clone());
        Ok(item)
    }

    async fn find_item(&self, id: Uuid) -> Result<Option<InventoryItem>, AppError> {
        Ok(self.tables.read().await.inventory.iter().find(|i| i.id == id).cloned())
    }

    async fn list_items(&self) -> Result<Vec<InventoryItem>, AppError> {
        let mut items = self.tables.read().await.inventory.clone();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    async fn list_low_stock(&self) -> Result<Vec<InventoryItem>, AppError> {
        let tables = self.tables.read().await;
        let mut items: Vec<InventoryItem> = tables
            .inventory
            .iter()
            .filter(|i| i.current_stock <= i.min_level)
            .cloned()
            .collect();
        items.sort_by(|a, b| (a.current_stock, &a.name).cmp(&(b.current_stock, &b.name)));
        Ok(items)
    }

    async fn update_item(
        &self,
        id: Uuid,
        changes: &InventoryChanges,
    ) -> Result<Option<InventoryItem>, AppError> {
        let mut tables = self.tables.write().await;
        let Some(item) = tables.inventory.iter_mut().find(|i| i.id == id) else {
            return Ok(None);
        };
        if let Some(v) = &changes.name {
            item.name = v.clone();
        }
        if changes.brand.is_some() {
            item.brand = changes.brand.clone();
        }
        if let Some(v) = changes.category {
            item.category = v;
        }
        if let Some(v) = changes.current_stock {
            item.current_stock = v;
        }
        if let Some(v) = changes.min_level {
            item.min_level = v;
        }
        if let Some(v) = changes.unit_price {
            item.unit_price = v;
        }
        if changes.supplier.is_some() {
            item.supplier = changes.supplier.clone();
        }
        if changes.description.is_some() {
            item.description = changes.description.clone();
        }
        Ok(Some(item.clone()))
    }

    async fn delete_item(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        let before = tables.inventory.len();
        tables.inventory.retain(|i| i.id != id);
        Ok(tables.inventory.len() < before)
    }

    async fn adjust_stock(&self, id: Uuid, delta: i32) -> Result<Option<InventoryItem>, AppError> {
        let mut tables = self.tables.write().await;
        let Some(item) = tables.inventory.iter_mut().find(|i| i.id == id) else {
            return Ok(None);
        };
        match item.current_stock.checked_add(delta) {
            Some(next) if next >= 0 => {
                item.current_stock = next;
                Ok(Some(item.clone()))
            }
            _ => Err(field_error("delta", "insufficient_stock")),
        }
    }
}

#[async_trait]
impl SaleRepository for MemoryStore {
    async fn create_sale(&self, record: &SaleRecord) -> Result<Sale, AppError> {
        let mut tables = self.tables.write().await;
        tables.check_sale_refs(record)?;
        let sale = Sale {
            id: Uuid::new_v4(),
            appointment_id: record.appointment_id,
            client_id: record.client_id,
            artist_id: record.artist_id,
            total_amount: record.total_amount,
            deposit: record.deposit,
            remaining_balance: record.remaining_balance,
            payment_status: record.payment_status,
            payment_method: record.payment_method.clone(),
            sale_date: record.sale_date,
            notes: record.notes.clone(),
            created_at: Utc::now(),
        };
        tables.sales.push(sale.clone());
        Ok(sale)
    }

    async fn find_sale(&self, id: Uuid) -> Result<Option<Sale>, AppError> {
        Ok(self.tables.read().await.sales.iter().find(|s| s.id == id).cloned())
    }

    async fn list_sales(&self, filter: &SaleFilter) -> Result<Vec<Sale>, AppError> {
        let tables = self.tables.read().await;
        let mut sales: Vec<Sale> = tables
            .sales
            .iter()
            .filter(|s| in_window(&s.sale_date, filter.from.as_ref(), filter.to.as_ref()))
            .filter(|s| filter.client_id.is_none_or(|id| s.client_id == id))
            .filter(|s| filter.artist_id.is_none_or(|id| s.artist_id == id))
            .cloned()
            .collect();
        sales.sort_by(|a, b| b.sale_date.cmp(&a.sale_date));
        Ok(sales)
    }

    async fn update_sale_with(
        &self,
        id: Uuid,
        plan: SalePlan<'_>,
    ) -> Result<Option<Sale>, AppError> {
        // O write lock faz o papel do `FOR UPDATE`
        let mut tables = self.tables.write().await;
        let Some(current) = tables.sales.iter().find(|s| s.id == id).cloned() else {
            return Ok(None);
        };
        let record = plan(&current)?;
        tables.check_sale_refs(&record)?;

        let Some(sale) = tables.sales.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        sale.appointment_id = record.appointment_id;
        sale.client_id = record.client_id;
        sale.artist_id = record.artist_id;
        sale.total_amount = record.total_amount;
        sale.deposit = record.deposit;
        sale.remaining_balance = record.remaining_balance;
        sale.payment_status = record.payment_status;
        sale.payment_method = record.payment_method;
        sale.sale_date = record.sale_date;
        sale.notes = record.notes;
        Ok(Some(sale.clone()))
    }

    async fn delete_sale(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        let before = tables.sales.len();
        tables.sales.retain(|s| s.id != id);
        Ok(tables.sales.len() < before)
    }
}

#[async_trait]
impl DashboardRepository for MemoryStore {
    async fn count_appointments_between(&self, window: DateWindow) -> Result<i64, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.appointments.iter().filter(|a| window.contains(a.scheduled_date)).count() as i64)
    }

    async fn sum_sales_between(&self, window: DateWindow) -> Result<Decimal, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .sales
            .iter()
            .filter(|s| window.contains(s.sale_date))
            .map(|s| s.total_amount)
            .sum())
    }

    async fn count_active_artists(&self) -> Result<i64, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.artists.iter().filter(|a| a.is_active).count() as i64)
    }

    async fn count_low_stock_items(&self) -> Result<i64, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.inventory.iter().filter(|i| i.current_stock <= i.min_level).count() as i64)
    }
}

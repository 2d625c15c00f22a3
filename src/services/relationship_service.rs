// src/services/relationship_service.rs

use std::collections::{BTreeSet, HashMap};

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AppointmentRepository, ArtistRepository, ClientRepository},
    models::{
        appointment::{Appointment, AppointmentDetail},
        artist::Artist,
        client::Client,
        sale::{Sale, SaleDetail},
    },
};

/// Índice em memória dos registros referenciados por uma listagem.
/// Montado com uma consulta por tabela, nunca uma por linha.
#[derive(Debug, Default)]
pub struct Directory {
    clients: HashMap<Uuid, Client>,
    artists: HashMap<Uuid, Artist>,
    appointments: HashMap<Uuid, Appointment>,
}

impl Directory {
    pub fn new(
        clients: Vec<Client>,
        artists: Vec<Artist>,
        appointments: Vec<Appointment>,
    ) -> Self {
        Self {
            clients: clients.into_iter().map(|c| (c.id, c)).collect(),
            artists: artists.into_iter().map(|a| (a.id, a)).collect(),
            appointments: appointments.into_iter().map(|a| (a.id, a)).collect(),
        }
    }

    /// Carrega clientes e artistas citados pelos agendamentos.
    pub async fn for_appointments(
        appointments: &[Appointment],
        clients: &dyn ClientRepository,
        artists: &dyn ArtistRepository,
    ) -> Result<Self, AppError> {
        let client_ids = distinct(appointments.iter().map(|a| a.client_id));
        let artist_ids = distinct(appointments.iter().map(|a| a.artist_id));

        let (clients, artists) = tokio::try_join!(
            clients.find_clients(&client_ids),
            artists.find_artists(&artist_ids),
        )?;

        Ok(Self::new(clients, artists, Vec::new()))
    }

    /// Carrega clientes, artistas e agendamentos de origem citados pelas vendas.
    pub async fn for_sales(
        sales: &[Sale],
        clients: &dyn ClientRepository,
        artists: &dyn ArtistRepository,
        appointments: &dyn AppointmentRepository,
    ) -> Result<Self, AppError> {
        let client_ids = distinct(sales.iter().map(|s| s.client_id));
        let artist_ids = distinct(sales.iter().map(|s| s.artist_id));
        let appointment_ids = distinct(sales.iter().filter_map(|s| s.appointment_id));

        let (clients, artists, appointments) = tokio::try_join!(
            clients.find_clients(&client_ids),
            artists.find_artists(&artist_ids),
            appointments.find_appointments(&appointment_ids),
        )?;

        Ok(Self::new(clients, artists, appointments))
    }

    fn client(&self, id: Uuid) -> Result<Client, AppError> {
        self.clients
            .get(&id)
            .cloned()
            .ok_or(AppError::BrokenReference { entity: "client", id })
    }

    fn artist(&self, id: Uuid) -> Result<Artist, AppError> {
        self.artists
            .get(&id)
            .cloned()
            .ok_or(AppError::BrokenReference { entity: "artist", id })
    }

    pub fn resolve_appointment(&self, appointment: Appointment) -> Result<AppointmentDetail, AppError> {
        Ok(AppointmentDetail {
            client: self.client(appointment.client_id)?,
            artist: self.artist(appointment.artist_id)?,
            appointment,
        })
    }

    /// Venda sem agendamento é válida; um `appointment_id` sem registro não é.
    pub fn resolve_sale(&self, sale: Sale) -> Result<SaleDetail, AppError> {
        let appointment = match sale.appointment_id {
            Some(id) => Some(
                self.appointments
                    .get(&id)
                    .cloned()
                    .ok_or(AppError::BrokenReference { entity: "appointment", id })?,
            ),
            None => None,
        };

        Ok(SaleDetail {
            client: self.client(sale.client_id)?,
            artist: self.artist(sale.artist_id)?,
            appointment,
            sale,
        })
    }

    pub fn resolve_appointments(
        &self,
        appointments: Vec<Appointment>,
    ) -> Result<Vec<AppointmentDetail>, AppError> {
        appointments.into_iter().map(|a| self.resolve_appointment(a)).collect()
    }

    pub fn resolve_sales(&self, sales: Vec<Sale>) -> Result<Vec<SaleDetail>, AppError> {
        sales.into_iter().map(|s| self.resolve_sale(s)).collect()
    }
}

fn distinct(ids: impl Iterator<Item = Uuid>) -> Vec<Uuid> {
    ids.collect::<BTreeSet<_>>().into_iter().collect()
}

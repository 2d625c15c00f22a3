// src/db/appointment_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{db_utils::map_write_error, error::AppError},
    db::AppointmentRepository,
    models::appointment::{Appointment, AppointmentChanges, AppointmentFilter, NewAppointment},
};

#[derive(Clone)]
pub struct PgAppointmentRepository {
    pool: PgPool,
}

impl PgAppointmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppointmentRepository for PgAppointmentRepository {
    async fn create_appointment(&self, new: &NewAppointment) -> Result<Appointment, AppError> {
        sqlx::query_as::<_, Appointment>(
            r#"
            INSERT INTO appointments
                (client_id, artist_id, scheduled_date, duration, body_part, description,
                 reference_images, status, estimated_price, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(new.client_id)
        .bind(new.artist_id)
        .bind(new.scheduled_date)
        .bind(new.duration)
        .bind(&new.body_part)
        .bind(&new.description)
        .bind(&new.reference_images)
        .bind(new.status)
        .bind(new.estimated_price)
        .bind(&new.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Agendamento duplicado."))
    }

    async fn find_appointment(&self, id: Uuid) -> Result<Option<Appointment>, AppError> {
        let appointment =
            sqlx::query_as::<_, Appointment>("SELECT * FROM appointments WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(appointment)
    }

    async fn find_appointments(&self, ids: &[Uuid]) -> Result<Vec<Appointment>, AppError> {
        let appointments =
            sqlx::query_as::<_, Appointment>("SELECT * FROM appointments WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(&self.pool)
                .await?;
        Ok(appointments)
    }

    async fn list_appointments(
        &self,
        filter: &AppointmentFilter,
    ) -> Result<Vec<Appointment>, AppError> {
        // `from` inclusivo, `to` exclusivo
        let appointments = sqlx::query_as::<_, Appointment>(
            r#"
            SELECT * FROM appointments
            WHERE ($1::timestamptz IS NULL OR scheduled_date >= $1)
              AND ($2::timestamptz IS NULL OR scheduled_date < $2)
              AND ($3::uuid IS NULL OR client_id = $3)
              AND ($4::uuid IS NULL OR artist_id = $4)
              AND ($5::appointment_status IS NULL OR status = $5)
            ORDER BY scheduled_date ASC
            "#,
        )
        .bind(filter.from)
        .bind(filter.to)
        .bind(filter.client_id)
        .bind(filter.artist_id)
        .bind(filter.status)
        .fetch_all(&self.pool)
        .await?;
        Ok(appointments)
    }

    async fn update_appointment(
        &self,
        id: Uuid,
        changes: &AppointmentChanges,
    ) -> Result<Option<Appointment>, AppError> {
        sqlx::query_as::<_, Appointment>(
            r#"
            UPDATE appointments SET
                client_id = COALESCE($2, client_id),
                artist_id = COALESCE($3, artist_id),
                scheduled_date = COALESCE($4, scheduled_date),
                duration = COALESCE($5, duration),
                body_part = COALESCE($6, body_part),
                description = COALESCE($7, description),
                reference_images = COALESCE($8, reference_images),
                status = COALESCE($9, status),
                estimated_price = COALESCE($10, estimated_price),
                notes = COALESCE($11, notes)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.client_id)
        .bind(changes.artist_id)
        .bind(changes.scheduled_date)
        .bind(changes.duration)
        .bind(&changes.body_part)
        .bind(&changes.description)
        .bind(&changes.reference_images)
        .bind(changes.status)
        .bind(changes.estimated_price)
        .bind(&changes.notes)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Agendamento duplicado."))
    }

    /// Vendas ligadas ficam com `appointment_id = NULL` (ON DELETE SET NULL).
    async fn delete_appointment(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

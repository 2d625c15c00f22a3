// src/db/client_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{
        db_utils::{like_pattern, map_delete_error, map_write_error},
        error::AppError,
    },
    db::{ClientRepository, ReferenceCount},
    models::client::{Client, ClientChanges, NewClient},
};

const EMAIL_TAKEN: &str = "Já existe um cliente com este email.";

#[derive(Clone)]
pub struct PgClientRepository {
    pool: PgPool,
}

impl PgClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientRepository for PgClientRepository {
    async fn create_client(&self, new: &NewClient) -> Result<Client, AppError> {
        sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients
                (first_name, last_name, email, phone, date_of_birth, address,
                 emergency_contact, medical_notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.email)
        .bind(&new.phone)
        .bind(new.date_of_birth)
        .bind(&new.address)
        .bind(&new.emergency_contact)
        .bind(&new.medical_notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, EMAIL_TAKEN))
    }

    async fn find_client(&self, id: Uuid) -> Result<Option<Client>, AppError> {
        let client = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(client)
    }

    async fn find_clients(&self, ids: &[Uuid]) -> Result<Vec<Client>, AppError> {
        let clients = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(clients)
    }

    async fn list_clients(&self, search: Option<&str>) -> Result<Vec<Client>, AppError> {
        let pattern = search.map(like_pattern);

        let clients = sqlx::query_as::<_, Client>(
            r#"
            SELECT * FROM clients
            WHERE $1::text IS NULL
               OR first_name ILIKE $1
               OR last_name ILIKE $1
               OR email ILIKE $1
            ORDER BY first_name ASC, last_name ASC
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(clients)
    }

    async fn update_client(
        &self,
        id: Uuid,
        changes: &ClientChanges,
    ) -> Result<Option<Client>, AppError> {
        sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone),
                date_of_birth = COALESCE($6, date_of_birth),
                address = COALESCE($7, address),
                emergency_contact = COALESCE($8, emergency_contact),
                medical_notes = COALESCE($9, medical_notes)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&changes.first_name)
        .bind(&changes.last_name)
        .bind(&changes.email)
        .bind(&changes.phone)
        .bind(changes.date_of_birth)
        .bind(&changes.address)
        .bind(&changes.emergency_contact)
        .bind(&changes.medical_notes)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, EMAIL_TAKEN))
    }

    async fn delete_client(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_delete_error(e, "Cliente"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_client_references(&self, id: Uuid) -> Result<ReferenceCount, AppError> {
        let (appointments, sales) = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM appointments WHERE client_id = $1),
                (SELECT COUNT(*) FROM sales WHERE client_id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(ReferenceCount { appointments, sales })
    }
}

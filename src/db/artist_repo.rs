// src/db/artist_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{
        db_utils::{map_delete_error, map_write_error},
        error::AppError,
    },
    db::{ArtistRepository, ReferenceCount},
    models::artist::{Artist, ArtistChanges, NewArtist},
};

const EMAIL_TAKEN: &str = "Já existe um artista com este email.";

#[derive(Clone)]
pub struct PgArtistRepository {
    pool: PgPool,
}

impl PgArtistRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArtistRepository for PgArtistRepository {
    async fn create_artist(&self, new: &NewArtist) -> Result<Artist, AppError> {
        sqlx::query_as::<_, Artist>(
            r#"
            INSERT INTO artists
                (name, user_id, email, phone, specialties, schedule, hourly_rate, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&new.name)
        .bind(&new.user_id)
        .bind(&new.email)
        .bind(&new.phone)
        .bind(&new.specialties)
        .bind(&new.schedule)
        .bind(new.hourly_rate)
        .bind(new.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, EMAIL_TAKEN))
    }

    async fn find_artist(&self, id: Uuid) -> Result<Option<Artist>, AppError> {
        let artist = sqlx::query_as::<_, Artist>("SELECT * FROM artists WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(artist)
    }

    async fn find_artists(&self, ids: &[Uuid]) -> Result<Vec<Artist>, AppError> {
        let artists = sqlx::query_as::<_, Artist>("SELECT * FROM artists WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(artists)
    }

    async fn list_artists(&self, active: Option<bool>) -> Result<Vec<Artist>, AppError> {
        let artists = sqlx::query_as::<_, Artist>(
            r#"
            SELECT * FROM artists
            WHERE ($1::boolean IS NULL OR is_active = $1)
            ORDER BY name ASC
            "#,
        )
        .bind(active)
        .fetch_all(&self.pool)
        .await?;
        Ok(artists)
    }

    async fn update_artist(
        &self,
        id: Uuid,
        changes: &ArtistChanges,
    ) -> Result<Option<Artist>, AppError> {
        sqlx::query_as::<_, Artist>(
            r#"
            UPDATE artists SET
                name = COALESCE($2, name),
                user_id = COALESCE($3, user_id),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone),
                specialties = COALESCE($6, specialties),
                schedule = COALESCE($7, schedule),
                hourly_rate = COALESCE($8, hourly_rate),
                is_active = COALESCE($9, is_active)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.user_id)
        .bind(&changes.email)
        .bind(&changes.phone)
        .bind(&changes.specialties)
        .bind(&changes.schedule)
        .bind(changes.hourly_rate)
        .bind(changes.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, EMAIL_TAKEN))
    }

    async fn delete_artist(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM artists WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_delete_error(e, "Artista"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_artist_references(&self, id: Uuid) -> Result<ReferenceCount, AppError> {
        let (appointments, sales) = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM appointments WHERE artist_id = $1),
                (SELECT COUNT(*) FROM sales WHERE artist_id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(ReferenceCount { appointments, sales })
    }
}

// src/db/inventory_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{db_utils::map_write_error, error::AppError, validation::field_error},
    db::InventoryRepository,
    models::inventory::{InventoryChanges, InventoryItem, NewInventoryItem},
};

#[derive(Clone)]
pub struct PgInventoryRepository {
    pool: PgPool,
}

impl PgInventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InventoryRepository for PgInventoryRepository {
    async fn create_item(&self, new: &NewInventoryItem) -> Result<InventoryItem, AppError> {
        sqlx::query_as::<_, InventoryItem>(
            r#"
            INSERT INTO inventory_items
                (name, brand, category, current_stock, min_level, unit_price, supplier, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&new.name)
        .bind(&new.brand)
        .bind(new.category)
        .bind(new.current_stock)
        .bind(new.min_level)
        .bind(new.unit_price)
        .bind(&new.supplier)
        .bind(&new.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Item de estoque duplicado."))
    }

    async fn find_item(&self, id: Uuid) -> Result<Option<InventoryItem>, AppError> {
        let item = sqlx::query_as::<_, InventoryItem>("SELECT * FROM inventory_items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(item)
    }

    async fn list_items(&self) -> Result<Vec<InventoryItem>, AppError> {
        let items =
            sqlx::query_as::<_, InventoryItem>("SELECT * FROM inventory_items ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(items)
    }

    async fn list_low_stock(&self) -> Result<Vec<InventoryItem>, AppError> {
        let items = sqlx::query_as::<_, InventoryItem>(
            r#"
            SELECT * FROM inventory_items
            WHERE current_stock <= min_level
            ORDER BY current_stock ASC, name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn update_item(
        &self,
        id: Uuid,
        changes: &InventoryChanges,
    ) -> Result<Option<InventoryItem>, AppError> {
        sqlx::query_as::<_, InventoryItem>(
            r#"
            UPDATE inventory_items SET
                name = COALESCE($2, name),
                brand = COALESCE($3, brand),
                category = COALESCE($4, category),
                current_stock = COALESCE($5, current_stock),
                min_level = COALESCE($6, min_level),
                unit_price = COALESCE($7, unit_price),
                supplier = COALESCE($8, supplier),
                description = COALESCE($9, description)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.brand)
        .bind(changes.category)
        .bind(changes.current_stock)
        .bind(changes.min_level)
        .bind(changes.unit_price)
        .bind(&changes.supplier)
        .bind(&changes.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Item de estoque duplicado."))
    }

    async fn delete_item(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM inventory_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn adjust_stock(&self, id: Uuid, delta: i32) -> Result<Option<InventoryItem>, AppError> {
        // Condição no próprio UPDATE: duas baixas simultâneas não passam do zero.
        // A conta em bigint não estoura o INTEGER da coluna.
        let updated = sqlx::query_as::<_, InventoryItem>(
            r#"
            UPDATE inventory_items
            SET current_stock = current_stock + $2
            WHERE id = $1 AND current_stock::bigint + $2 BETWEEN 0 AND 2147483647
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(delta)
        .fetch_optional(&self.pool)
        .await?;

        if updated.is_some() {
            return Ok(updated);
        }

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM inventory_items WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        if exists {
            Err(field_error("delta", "insufficient_stock"))
        } else {
            Ok(None)
        }
    }
}

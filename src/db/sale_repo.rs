// src/db/sale_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{db_utils::map_write_error, error::AppError},
    db::{SalePlan, SaleRepository},
    models::sale::{Sale, SaleFilter, SaleRecord},
};

#[derive(Clone)]
pub struct PgSaleRepository {
    pool: PgPool,
}

impl PgSaleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SaleRepository for PgSaleRepository {
    async fn create_sale(&self, record: &SaleRecord) -> Result<Sale, AppError> {
        sqlx::query_as::<_, Sale>(
            r#"
            INSERT INTO sales
                (appointment_id, client_id, artist_id, total_amount, deposit,
                 remaining_balance, payment_status, payment_method, sale_date, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(record.appointment_id)
        .bind(record.client_id)
        .bind(record.artist_id)
        .bind(record.total_amount)
        .bind(record.deposit)
        .bind(record.remaining_balance)
        .bind(record.payment_status)
        .bind(&record.payment_method)
        .bind(record.sale_date)
        .bind(&record.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Venda duplicada."))
    }

    async fn find_sale(&self, id: Uuid) -> Result<Option<Sale>, AppError> {
        let sale = sqlx::query_as::<_, Sale>("SELECT * FROM sales WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(sale)
    }

    async fn list_sales(&self, filter: &SaleFilter) -> Result<Vec<Sale>, AppError> {
        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT * FROM sales
            WHERE ($1::timestamptz IS NULL OR sale_date >= $1)
              AND ($2::timestamptz IS NULL OR sale_date < $2)
              AND ($3::uuid IS NULL OR client_id = $3)
              AND ($4::uuid IS NULL OR artist_id = $4)
            ORDER BY sale_date DESC
            "#,
        )
        .bind(filter.from)
        .bind(filter.to)
        .bind(filter.client_id)
        .bind(filter.artist_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(sales)
    }

    async fn update_sale_with(
        &self,
        id: Uuid,
        plan: SalePlan<'_>,
    ) -> Result<Option<Sale>, AppError> {
        let mut tx = self.pool.begin().await?;

        // Trava a linha até o commit: outra atualização concorrente espera aqui
        let current =
            sqlx::query_as::<_, Sale>("SELECT * FROM sales WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some(current) = current else {
            return Ok(None);
        };

        // Erro no plano: o `tx` cai fora de escopo e faz rollback
        let record = plan(&current)?;

        let updated = sqlx::query_as::<_, Sale>(
            r#"
            UPDATE sales SET
                appointment_id = $2,
                client_id = $3,
                artist_id = $4,
                total_amount = $5,
                deposit = $6,
                remaining_balance = $7,
                payment_status = $8,
                payment_method = $9,
                sale_date = $10,
                notes = $11
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(record.appointment_id)
        .bind(record.client_id)
        .bind(record.artist_id)
        .bind(record.total_amount)
        .bind(record.deposit)
        .bind(record.remaining_balance)
        .bind(record.payment_status)
        .bind(&record.payment_method)
        .bind(record.sale_date)
        .bind(&record.notes)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, "Venda duplicada."))?;

        tx.commit().await?;
        Ok(Some(updated))
    }

    async fn delete_sale(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM sales WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// src/db/dashboard_repo.rs

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{common::error::AppError, db::DashboardRepository, models::dashboard::DateWindow};

#[derive(Clone)]
pub struct PgDashboardRepository {
    pool: PgPool,
}

impl PgDashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Cada contagem pega sua própria conexão da pool, então o serviço
// pode disparar as quatro ao mesmo tempo.
#[async_trait]
impl DashboardRepository for PgDashboardRepository {
    async fn count_appointments_between(&self, window: DateWindow) -> Result<i64, AppError> {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM appointments
            WHERE scheduled_date >= $1 AND scheduled_date < $2
            "#,
        )
        .bind(window.start)
        .bind(window.end)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    async fn sum_sales_between(&self, window: DateWindow) -> Result<Decimal, AppError> {
        let total: Option<Decimal> = sqlx::query_scalar(
            r#"
            SELECT SUM(total_amount) FROM sales
            WHERE sale_date >= $1 AND sale_date < $2
            "#,
        )
        .bind(window.start)
        .bind(window.end)
        .fetch_one(&self.pool)
        .await?;
        Ok(total.unwrap_or(Decimal::ZERO))
    }

    async fn count_active_artists(&self) -> Result<i64, AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM artists WHERE is_active = TRUE")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn count_low_stock_items(&self) -> Result<i64, AppError> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM inventory_items WHERE current_stock <= min_level")
                .fetch_one(&self.pool)
                .await?;
        Ok(total)
    }
}

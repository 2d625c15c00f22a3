// src/services/dashboard_service.rs

use std::sync::Arc;

use anyhow::anyhow;
use chrono::{DateTime, FixedOffset, Utc};

use crate::{
    common::error::AppError,
    db::DashboardRepository,
    models::dashboard::{DashboardStats, DateWindow},
};

#[derive(Clone)]
pub struct DashboardService {
    repo: Arc<dyn DashboardRepository>,
    utc_offset: FixedOffset,
}

impl DashboardService {
    pub fn new(repo: Arc<dyn DashboardRepository>, utc_offset: FixedOffset) -> Self {
        Self { repo, utc_offset }
    }

    /// Números do painel em `as_of`. "Hoje" e "este mês" são calculados no
    /// fuso do estúdio. As quatro consultas rodam em paralelo, sem snapshot.
    pub async fn compute_dashboard_stats(
        &self,
        as_of: DateTime<Utc>,
    ) -> Result<DashboardStats, AppError> {
        let today = DateWindow::day_of(as_of, self.utc_offset)
            .ok_or_else(|| anyhow!("data fora do intervalo suportado: {}", as_of))?;
        let month = DateWindow::month_of(as_of, self.utc_offset)
            .ok_or_else(|| anyhow!("data fora do intervalo suportado: {}", as_of))?;

        let (today_appointments, monthly_revenue, active_artists, low_stock_items) = tokio::try_join!(
            self.repo.count_appointments_between(today),
            self.repo.sum_sales_between(month),
            self.repo.count_active_artists(),
            self.repo.count_low_stock_items(),
        )?;

        Ok(DashboardStats { today_appointments, monthly_revenue, active_artists, low_stock_items })
    }
}

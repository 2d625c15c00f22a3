// src/models/dashboard.rs

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// Os cards do topo do painel
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[schema(example = 4)]
    pub today_appointments: i64,
    #[schema(value_type = f64, example = 350.5)]
    pub monthly_revenue: Decimal,
    #[schema(example = 3)]
    pub active_artists: i64,
    #[schema(example = 2)]
    pub low_stock_items: i64,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DashboardQuery {
    /// Instante de referência (RFC 3339). Padrão: agora.
    pub as_of: Option<DateTime<Utc>>,
}

/// Intervalo semiaberto `[start, end)` em UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateWindow {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Dia civil de `as_of` no fuso do estúdio.
    pub fn day_of(as_of: DateTime<Utc>, offset: FixedOffset) -> Option<Self> {
        let today = as_of.with_timezone(&offset).date_naive();
        let tomorrow = today.succ_opt()?;
        Some(Self {
            start: local_midnight(today, offset),
            end: local_midnight(tomorrow, offset),
        })
    }

    /// Mês civil de `as_of` no fuso do estúdio.
    pub fn month_of(as_of: DateTime<Utc>, offset: FixedOffset) -> Option<Self> {
        let local = as_of.with_timezone(&offset).date_naive();
        let first = NaiveDate::from_ymd_opt(local.year(), local.month(), 1)?;
        let next_first = if local.month() == 12 {
            NaiveDate::from_ymd_opt(local.year() + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(local.year(), local.month() + 1, 1)?
        };
        Some(Self {
            start: local_midnight(first, offset),
            end: local_midnight(next_first, offset),
        })
    }
}

fn local_midnight(date: NaiveDate, offset: FixedOffset) -> DateTime<Utc> {
    let naive_utc =
        date.and_time(NaiveTime::MIN) - Duration::seconds(i64::from(offset.local_minus_utc()));
    Utc.from_utc_datetime(&naive_utc)
}

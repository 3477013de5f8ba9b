//! HTTP DTOs for the admin dashboard.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::booking::{BookingStatistics, ProviderActivity};

/// Dashboard figures keyed for direct display. Revenue is minor units per
/// currency code.
#[derive(Debug, Clone, Serialize)]
pub struct StatisticsResponse {
    pub total_bookings: usize,
    pub by_status: BTreeMap<&'static str, usize>,
    pub completed_revenue: BTreeMap<&'static str, i64>,
    pub top_providers: Vec<ProviderActivity>,
}

impl From<BookingStatistics> for StatisticsResponse {
    fn from(stats: BookingStatistics) -> Self {
        Self {
            total_bookings: stats.total_bookings,
            by_status: stats
                .by_status
                .iter()
                .map(|(status, count)| (status.as_str(), *count))
                .collect(),
            completed_revenue: stats
                .completed_revenue
                .iter()
                .map(|(currency, amount)| (currency.code(), amount.cents()))
                .collect(),
            top_providers: stats.top_providers,
        }
    }
}

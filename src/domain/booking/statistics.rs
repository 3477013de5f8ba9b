//! Dashboard figures derived from a set of bookings.

use serde::Serialize;
use std::collections::HashMap;

use super::{Booking, BookingStatus};
use crate::domain::foundation::{Currency, Money, ProviderId};

/// Booking count for one assigned provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderActivity {
    pub provider_id: ProviderId,
    pub bookings: usize,
}

/// Aggregates shown on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingStatistics {
    pub total_bookings: usize,
    pub by_status: Vec<(BookingStatus, usize)>,
    /// Revenue from completed bookings, per currency.
    pub completed_revenue: Vec<(Currency, Money)>,
    pub top_providers: Vec<ProviderActivity>,
}

impl BookingStatistics {
    /// Computes counts per status (every status listed, zero included),
    /// completed revenue per currency and the `top_n` busiest providers.
    pub fn from_bookings(bookings: &[Booking], top_n: usize) -> Self {
        let by_status = BookingStatus::ALL
            .iter()
            .map(|status| (*status, bookings.iter().filter(|b| b.status() == *status).count()))
            .collect();

        let completed_revenue = [Currency::Usd, Currency::Lrd]
            .iter()
            .map(|currency| {
                let total: Money = bookings
                    .iter()
                    .filter(|b| b.status() == BookingStatus::Completed)
                    .filter(|b| b.preferred_currency() == *currency)
                    .map(|b| b.total_amount())
                    .sum();
                (*currency, total)
            })
            .collect();

        let mut per_provider: HashMap<ProviderId, usize> = HashMap::new();
        for provider_id in bookings.iter().filter_map(|b| b.provider_id()) {
            *per_provider.entry(provider_id).or_default() += 1;
        }
        let mut top_providers: Vec<ProviderActivity> = per_provider
            .into_iter()
            .map(|(provider_id, bookings)| ProviderActivity { provider_id, bookings })
            .collect();
        top_providers.sort_by(|a, b| {
            b.bookings
                .cmp(&a.bookings)
                .then_with(|| a.provider_id.cmp(&b.provider_id))
        });
        top_providers.truncate(top_n);

        Self {
            total_bookings: bookings.len(),
            by_status,
            completed_revenue,
            top_providers,
        }
    }

    pub fn count(&self, status: BookingStatus) -> usize {
        self.by_status
            .iter()
            .find(|(s, _)| *s == status)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    pub fn revenue(&self, currency: Currency) -> Money {
        self.completed_revenue
            .iter()
            .find(|(c, _)| *c == currency)
            .map(|(_, m)| *m)
            .unwrap_or(Money::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::aggregate::test_support::{booking_in, pending_booking};

    #[test]
    fn counts_revenue_and_top_providers() {
        let (busy, quiet) = (ProviderId::new(), ProviderId::new());
        let bookings = vec![
            pending_booking(busy, &[500]),
            booking_in(BookingStatus::Completed, busy),
            booking_in(BookingStatus::Completed, busy),
            booking_in(BookingStatus::Confirmed, quiet),
        ];

        let stats = BookingStatistics::from_bookings(&bookings, 5);
        assert_eq!(stats.total_bookings, 4);
        assert_eq!(stats.count(BookingStatus::Pending), 1);
        assert_eq!(stats.count(BookingStatus::Completed), 2);
        assert_eq!(stats.count(BookingStatus::Cancelled), 0);
        assert_eq!(stats.revenue(Currency::Usd).cents(), 2000);
        assert!(stats.revenue(Currency::Lrd).is_zero());
        assert_eq!(stats.top_providers[0], ProviderActivity { provider_id: busy, bookings: 2 });
        assert_eq!(stats.top_providers.len(), 2);
    }

    #[test]
    fn empty_input_gives_zeroes() {
        let stats = BookingStatistics::from_bookings(&[], 5);
        assert_eq!(stats.total_bookings, 0);
        assert_eq!(stats.by_status.len(), BookingStatus::ALL.len());
        assert!(stats.top_providers.is_empty());
    }
}

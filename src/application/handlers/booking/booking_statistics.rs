//! BookingStatisticsHandler - admin dashboard figures.

use std::sync::Arc;

use crate::domain::access::{Action, Actor, RolePermissionGate};
use crate::domain::booking::{BookingError, BookingStatistics};
use crate::ports::{BookingFilter, BookingRepository};

const TOP_PROVIDERS: usize = 5;

pub struct BookingStatisticsHandler {
    repo: Arc<dyn BookingRepository>,
    gate: RolePermissionGate,
}

impl BookingStatisticsHandler {
    pub fn new(repo: Arc<dyn BookingRepository>, gate: RolePermissionGate) -> Self {
        Self { repo, gate }
    }

    pub async fn handle(&self, actor: &Actor) -> Result<BookingStatistics, BookingError> {
        self.gate.require(actor, Action::ViewStatistics)?;
        let bookings = self.repo.list(&BookingFilter::all()).await?;
        Ok(BookingStatistics::from_bookings(&bookings, TOP_PROVIDERS))
    }
}

//! Shared fixture for booking handler tests: demo catalog, in-memory
//! repositories and one actor per role.

use std::sync::Arc;

use crate::adapters::events::InMemoryEventBus;
use crate::adapters::memory::{InMemoryBookingRepository, InMemoryPricingCatalog, InMemoryResultStorage};
use crate::domain::access::{Actor, Role};
use crate::domain::booking::{Booking, BookingDraft, DeliveryMethod, DraftGroup};
use crate::domain::foundation::{Currency, ProviderId, TestId, UserId};
use crate::ports::PricingCatalog;

use super::{CreateBookingsCommand, CreateBookingsHandler};

pub struct Fixture {
    pub catalog: InMemoryPricingCatalog,
    pub repo: InMemoryBookingRepository,
    pub storage: InMemoryResultStorage,
    pub bus: Arc<InMemoryEventBus>,
    pub tests: Vec<TestId>,
    pub providers: Vec<ProviderId>,
}

impl Fixture {
    pub async fn new() -> Self {
        let catalog = InMemoryPricingCatalog::demo();
        let tests = catalog.list_tests().await.unwrap().iter().map(|t| t.id).collect();
        let providers = catalog.list_providers().await.unwrap().iter().map(|p| p.id).collect();
        Self {
            catalog,
            repo: InMemoryBookingRepository::new(),
            storage: InMemoryResultStorage::new(),
            bus: Arc::new(InMemoryEventBus::new()),
            tests,
            providers,
        }
    }

    pub fn draft(&self, groups: Vec<DraftGroup>) -> BookingDraft {
        BookingDraft {
            patient_name: "Ada Doe".into(),
            patient_phone: "+231770000001".into(),
            patient_location: "Sinkor".into(),
            patient_email: None,
            groups,
            preferred_currency: Currency::Usd,
            delivery_method: DeliveryMethod::Whatsapp,
            delivery_charge_cents: 0,
            notes: None,
        }
    }

    pub fn create_handler(&self) -> CreateBookingsHandler {
        CreateBookingsHandler::new(
            Arc::new(self.catalog.clone()),
            Arc::new(self.repo.clone()),
            self.bus.clone(),
            "CHK",
        )
    }

    /// One pending booking requesting the first two tests at provider 0.
    pub async fn pending_booking(&self) -> Booking {
        let draft = self.draft(vec![DraftGroup {
            provider_id: self.providers[0],
            test_ids: vec![self.tests[0], self.tests[1]],
        }]);
        let mut created = self
            .create_handler()
            .handle(CreateBookingsCommand { draft }, &Actor::anonymous())
            .await
            .unwrap();
        created.remove(0)
    }

    pub fn admin(&self) -> Actor {
        Actor::admin(UserId::new("admin-1").unwrap())
    }

    pub fn sub_admin(&self) -> Actor {
        Actor::sub_admin(UserId::new("sub-1").unwrap())
    }

    pub fn clinic(&self, provider: ProviderId) -> Actor {
        Actor::provider_staff(Role::Clinic, UserId::new("clinic-1").unwrap(), provider)
    }

    pub fn lab(&self, provider: ProviderId) -> Actor {
        Actor::provider_staff(Role::LabTechnician, UserId::new("lab-1").unwrap(), provider)
    }
}

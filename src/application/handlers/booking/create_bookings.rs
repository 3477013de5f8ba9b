//! CreateBookingsHandler - checkout.
//!
//! Turns a draft into one pending booking per provider group. Prices come
//! from the catalog at this moment, never from the client. All bookings of a
//! checkout are written together or not at all.

use std::sync::Arc;

use crate::application::handlers::catalog::load_price_book;
use crate::application::handlers::events::publish_after_commit;
use crate::domain::access::Actor;
use crate::domain::booking::{Booking, BookingCreated, BookingDraft, BookingError, BookingFactory};
use crate::domain::foundation::{EventId, SerializableDomainEvent};
use crate::ports::{BookingRepository, EventPublisher, PricingCatalog};

#[derive(Debug, Clone)]
pub struct CreateBookingsCommand {
    pub draft: BookingDraft,
}

pub struct CreateBookingsHandler {
    catalog: Arc<dyn PricingCatalog>,
    repo: Arc<dyn BookingRepository>,
    publisher: Arc<dyn EventPublisher>,
    factory: BookingFactory,
}

impl CreateBookingsHandler {
    pub fn new(
        catalog: Arc<dyn PricingCatalog>,
        repo: Arc<dyn BookingRepository>,
        publisher: Arc<dyn EventPublisher>,
        booking_number_prefix: impl Into<String>,
    ) -> Self {
        Self {
            catalog,
            repo,
            publisher,
            factory: BookingFactory::new(booking_number_prefix),
        }
    }

    /// Anyone may check out, including anonymous patients.
    pub async fn handle(&self, cmd: CreateBookingsCommand, actor: &Actor) -> Result<Vec<Booking>, BookingError> {
        let selections: Vec<_> = cmd
            .draft
            .groups
            .iter()
            .map(|g| (g.provider_id, g.test_ids.clone()))
            .collect();
        let prices = load_price_book(self.catalog.as_ref(), &selections).await?;

        let bookings = self.factory.build(cmd.draft, &prices).map_err(|e| {
            tracing::debug!(error = %e, "booking draft rejected");
            e
        })?;

        if let Err(e) = self.repo.create_all(&bookings).await {
            tracing::error!(error = %e, count = bookings.len(), "failed to persist bookings");
            return Err(e.into());
        }

        for booking in &bookings {
            tracing::info!(
                booking_number = %booking.booking_number(),
                requested_provider_id = %booking.requested_provider_id(),
                total_cents = booking.total_amount().cents(),
                currency = %booking.preferred_currency(),
                role = %actor.role,
                "booking created"
            );
        }

        // Bookings from one checkout share a correlation id.
        let checkout_id = EventId::new();
        let events = bookings
            .iter()
            .map(|booking| {
                BookingCreated {
                    event_id: EventId::new(),
                    booking_id: booking.id(),
                    booking_number: booking.booking_number().clone(),
                    requested_provider_id: booking.requested_provider_id(),
                    test_ids: booking.test_ids(),
                    currency: booking.preferred_currency(),
                    total_amount: booking.total_amount(),
                    patient_phone: booking.patient().phone().to_string(),
                    created_at: booking.created_at(),
                }
                .to_envelope()
                .with_user_id(actor.audit_id())
                .with_correlation_id(checkout_id.as_str())
            })
            .collect();
        publish_after_commit(self.publisher.as_ref(), events).await;

        Ok(bookings)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Fixture;
    use super::*;
    use crate::domain::booking::{BookingStatus, DeliveryMethod, DraftGroup};
    use crate::domain::foundation::{Currency, ProviderId};

    #[tokio::test]
    async fn one_booking_per_provider_group_with_catalog_prices() {
        let fx = Fixture::new().await;
        let draft = fx.draft(vec![
            DraftGroup {
                provider_id: fx.providers[0],
                test_ids: vec![fx.tests[0], fx.tests[1]],
            },
            DraftGroup {
                provider_id: fx.providers[2],
                test_ids: vec![fx.tests[3]],
            },
        ]);

        let bookings = fx
            .create_handler()
            .handle(CreateBookingsCommand { draft }, &Actor::anonymous())
            .await
            .unwrap();

        assert_eq!(bookings.len(), 2);
        assert_ne!(bookings[0].booking_number(), bookings[1].booking_number());
        for booking in &bookings {
            assert_eq!(booking.status(), BookingStatus::Pending);
            assert_eq!(booking.provider_id(), None);
            let mut expected = 0;
            for line in booking.lines() {
                let entry = fx
                    .catalog
                    .get_pricing(&line.test_id, &booking.requested_provider_id())
                    .await
                    .unwrap()
                    .unwrap();
                expected += entry.price_usd.cents();
            }
            assert_eq!(booking.total_amount().cents(), expected);
        }
        assert_eq!(fx.repo.len().await, 2);
        let created = fx.bus.events_of_type("booking.created.v1");
        assert_eq!(created.len(), 2);
        assert!(created[0].metadata.correlation_id.is_some());
        assert_eq!(created[0].metadata.correlation_id, created[1].metadata.correlation_id);
    }

    #[tokio::test]
    async fn lrd_checkout_uses_lrd_prices_and_delivery_charge() {
        let fx = Fixture::new().await;
        let mut draft = fx.draft(vec![DraftGroup {
            provider_id: fx.providers[1],
            test_ids: vec![fx.tests[2]],
        }]);
        draft.preferred_currency = Currency::Lrd;
        draft.delivery_method = DeliveryMethod::InPerson;
        draft.delivery_charge_cents = 50_000;

        let bookings = fx
            .create_handler()
            .handle(CreateBookingsCommand { draft }, &Actor::anonymous())
            .await
            .unwrap();

        let entry = fx
            .catalog
            .get_pricing(&fx.tests[2], &fx.providers[1])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            bookings[0].total_amount().cents(),
            entry.price_lrd.cents() + 50_000
        );
    }

    #[tokio::test]
    async fn unknown_provider_persists_nothing() {
        let fx = Fixture::new().await;
        let draft = fx.draft(vec![
            DraftGroup {
                provider_id: fx.providers[0],
                test_ids: vec![fx.tests[0]],
            },
            DraftGroup {
                provider_id: ProviderId::new(),
                test_ids: vec![fx.tests[0]],
            },
        ]);

        let err = fx
            .create_handler()
            .handle(CreateBookingsCommand { draft }, &Actor::anonymous())
            .await
            .unwrap_err();

        assert!(matches!(err, BookingError::Validation { ref field, .. } if field == "groups[1].provider_id"));
        assert!(fx.repo.is_empty().await);
        assert_eq!(fx.bus.event_count(), 0);
    }

    #[tokio::test]
    async fn missing_patient_phone_is_a_validation_error() {
        let fx = Fixture::new().await;
        let mut draft = fx.draft(vec![DraftGroup {
            provider_id: fx.providers[0],
            test_ids: vec![fx.tests[0]],
        }]);
        draft.patient_phone = "   ".into();

        let err = fx
            .create_handler()
            .handle(CreateBookingsCommand { draft }, &Actor::anonymous())
            .await
            .unwrap_err();

        assert!(matches!(err, BookingError::Validation { ref field, .. } if field == "patient_phone"));
    }
}

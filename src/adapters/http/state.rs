//! Shared application state for every HTTP module.

use std::sync::Arc;

use crate::application::handlers::{
    AssignProviderHandler, BookingStatisticsHandler, BrowseCatalogHandler, ChangeStatusHandler,
    CreateBookingsHandler, DeleteBookingHandler, GetBookingHandler, ListBookingsHandler,
    ManageInquiriesHandler, QuoteCartHandler, SubmitInquiryHandler, UnassignProviderHandler,
    UploadResultsHandler,
};
use crate::config::BookingConfig;
use crate::domain::access::RolePermissionGate;
use crate::domain::booking::{AssignmentCoordinator, BookingStateMachine};
use crate::ports::{
    BookingRepository, EventPublisher, InquiryRepository, PricingCatalog, ResultStorage,
};

/// Ports plus booking settings. Cheap to clone; handlers are built per
/// request from these.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn PricingCatalog>,
    pub bookings: Arc<dyn BookingRepository>,
    pub inquiries: Arc<dyn InquiryRepository>,
    pub results: Arc<dyn ResultStorage>,
    pub events: Arc<dyn EventPublisher>,
    pub settings: BookingConfig,
}

impl AppState {
    fn gate(&self) -> RolePermissionGate {
        RolePermissionGate::new()
    }

    fn state_machine(&self) -> BookingStateMachine {
        BookingStateMachine::new(self.gate())
    }

    // === Catalog and cart ===

    pub fn browse_catalog_handler(&self) -> BrowseCatalogHandler {
        BrowseCatalogHandler::new(self.catalog.clone())
    }

    pub fn quote_cart_handler(&self) -> QuoteCartHandler {
        QuoteCartHandler::new(self.catalog.clone(), self.settings.max_cart_items)
    }

    // === Bookings ===

    pub fn create_bookings_handler(&self) -> CreateBookingsHandler {
        CreateBookingsHandler::new(
            self.catalog.clone(),
            self.bookings.clone(),
            self.events.clone(),
            self.settings.booking_number_prefix.clone(),
        )
    }

    pub fn change_status_handler(&self) -> ChangeStatusHandler {
        ChangeStatusHandler::new(self.bookings.clone(), self.events.clone(), self.state_machine())
    }

    pub fn assign_provider_handler(&self) -> AssignProviderHandler {
        AssignProviderHandler::new(
            self.catalog.clone(),
            self.bookings.clone(),
            self.events.clone(),
            AssignmentCoordinator::new(self.state_machine()),
        )
    }

    pub fn unassign_provider_handler(&self) -> UnassignProviderHandler {
        UnassignProviderHandler::new(
            self.bookings.clone(),
            self.events.clone(),
            AssignmentCoordinator::new(self.state_machine()),
        )
    }

    pub fn upload_results_handler(&self) -> UploadResultsHandler {
        UploadResultsHandler::new(
            self.bookings.clone(),
            self.results.clone(),
            self.events.clone(),
            self.state_machine(),
            self.settings.max_result_files,
        )
    }

    pub fn delete_booking_handler(&self) -> DeleteBookingHandler {
        DeleteBookingHandler::new(self.bookings.clone(), self.gate())
    }

    pub fn get_booking_handler(&self) -> GetBookingHandler {
        GetBookingHandler::new(self.bookings.clone(), self.gate())
    }

    pub fn list_bookings_handler(&self) -> ListBookingsHandler {
        ListBookingsHandler::new(self.bookings.clone(), self.gate())
    }

    pub fn booking_statistics_handler(&self) -> BookingStatisticsHandler {
        BookingStatisticsHandler::new(self.bookings.clone(), self.gate())
    }

    // === Surgery inquiries ===

    pub fn submit_inquiry_handler(&self) -> SubmitInquiryHandler {
        SubmitInquiryHandler::new(
            self.inquiries.clone(),
            self.events.clone(),
            self.settings.inquiry_number_prefix.clone(),
        )
    }

    pub fn manage_inquiries_handler(&self) -> ManageInquiriesHandler {
        ManageInquiriesHandler::new(self.inquiries.clone(), self.gate())
    }
}

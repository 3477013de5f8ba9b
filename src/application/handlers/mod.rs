//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations over the
//! ports. Every handler takes the acting `Actor` explicitly; authorization
//! decisions are made by the domain before any port is written to.

pub mod booking;
pub mod catalog;
pub mod inquiry;

mod events;

pub use booking::{
    AssignProviderCommand, AssignProviderHandler, BookingStatisticsHandler, ChangeStatusCommand,
    ChangeStatusHandler, CreateBookingsCommand, CreateBookingsHandler, DeleteBookingHandler,
    GetBookingHandler, ListBookingsHandler, ListBookingsQuery, UnassignProviderHandler,
    UploadResultsCommand, UploadResultsHandler,
};
pub use catalog::{load_price_book, BrowseCatalogHandler, CartQuote, QuoteCartCommand, QuoteCartHandler};
pub use inquiry::{ManageInquiriesHandler, SubmitInquiryHandler};

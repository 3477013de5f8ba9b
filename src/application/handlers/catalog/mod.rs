//! Catalog queries and cart pricing.

mod browse_catalog;
mod price_book;
mod quote_cart;

pub use browse_catalog::BrowseCatalogHandler;
pub use price_book::load_price_book;
pub use quote_cart::{CartQuote, QuoteCartCommand, QuoteCartHandler};

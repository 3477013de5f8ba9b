//! Authentication adapters implementing the `SessionValidator` port.

mod static_tokens;

pub use static_tokens::StaticTokenValidator;

//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `CHEKUP` prefix and
//! `__` between nested keys.
//!
//! # Example
//!
//! ```no_run
//! use chekup::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod booking;
mod database;
mod error;
mod server;

pub use auth::{AuthConfig, StaticTokenEntry};
pub use booking::BookingConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, LogFormat, ServerConfig};

use serde::Deserialize;

/// Root application configuration. Every section has defaults, so an empty
/// environment yields a runnable in-memory service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub booking: BookingConfig,

    #[serde(default)]
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` if present
    /// 2. Reads `CHEKUP__*` variables, `__` separating nested keys
    ///
    /// - `CHEKUP__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `CHEKUP__DATABASE__URL=...` -> `database.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("CHEKUP")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Semantic validation of every section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.booking.validate()?;
        self.auth.validate(&self.server.environment)?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "CHEKUP__SERVER__PORT",
        "CHEKUP__SERVER__ENVIRONMENT",
        "CHEKUP__SERVER__LOG_FORMAT",
        "CHEKUP__DATABASE__URL",
        "CHEKUP__BOOKING__MAX_CART_ITEMS",
        "CHEKUP__AUTH__STATIC_TOKENS",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_empty_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.server.port, 8080);
        assert!(config.database.url().is_none());
        assert_eq!(config.booking.booking_number_prefix, "CHK");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nested_values_are_read() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CHEKUP__SERVER__PORT", "3000");
        env::set_var("CHEKUP__SERVER__LOG_FORMAT", "json");
        env::set_var("CHEKUP__DATABASE__URL", "postgres://chekup@localhost/chekup");
        env::set_var("CHEKUP__BOOKING__MAX_CART_ITEMS", "5");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.log_format, LogFormat::Json);
        assert_eq!(config.database.url(), Some("postgres://chekup@localhost/chekup"));
        assert_eq!(config.booking.max_cart_items, 5);
    }

    #[test]
    fn test_production_rejects_weak_tokens() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CHEKUP__SERVER__ENVIRONMENT", "production");
        env::set_var("CHEKUP__AUTH__STATIC_TOKENS", "abc:admin:u-1");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
        assert_eq!(config.validate(), Err(ValidationError::WeakTokenInProduction));
    }
}

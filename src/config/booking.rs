//! Booking configuration: reference prefixes and cart/upload limits.

use serde::Deserialize;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct BookingConfig {
    /// Prefix for booking numbers, e.g. `CHK-1A2B3C4D`
    #[serde(default = "default_booking_prefix")]
    pub booking_number_prefix: String,

    /// Prefix for surgery inquiry numbers
    #[serde(default = "default_inquiry_prefix")]
    pub inquiry_number_prefix: String,

    /// Most items a quoted cart may hold
    #[serde(default = "default_max_cart_items")]
    pub max_cart_items: usize,

    /// Most result documents per upload
    #[serde(default = "default_max_result_files")]
    pub max_result_files: usize,

    /// Directory for uploaded result documents. Unset keeps them in memory.
    #[serde(default)]
    pub results_dir: Option<String>,
}

impl BookingConfig {
    /// The results directory, if one was configured and is not blank.
    pub fn results_dir(&self) -> Option<&str> {
        self.results_dir.as_deref().map(str::trim).filter(|d| !d.is_empty())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        for prefix in [&self.booking_number_prefix, &self.inquiry_number_prefix] {
            let well_formed = (2..=6).contains(&prefix.len())
                && prefix.chars().all(|c| c.is_ascii_uppercase());
            if !well_formed {
                return Err(ValidationError::InvalidReferencePrefix(prefix.clone()));
            }
        }
        if self.max_cart_items == 0 {
            return Err(ValidationError::ZeroLimit("max_cart_items"));
        }
        if self.max_result_files == 0 {
            return Err(ValidationError::ZeroLimit("max_result_files"));
        }
        Ok(())
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            booking_number_prefix: default_booking_prefix(),
            inquiry_number_prefix: default_inquiry_prefix(),
            max_cart_items: default_max_cart_items(),
            max_result_files: default_max_result_files(),
            results_dir: None,
        }
    }
}

fn default_booking_prefix() -> String {
    "CHK".to_string()
}

fn default_inquiry_prefix() -> String {
    "SRG".to_string()
}

fn default_max_cart_items() -> usize {
    50
}

fn default_max_result_files() -> usize {
    10
}

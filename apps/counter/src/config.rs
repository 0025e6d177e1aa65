//! # Configuration
//!
//! Application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`KIRANA_*`), optionally via a `.env` file
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;

/// Application configuration.
///
/// Most fields have sensible defaults for development; a deployed counter
/// sets the collaborator URL and store name explicitly.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the remote catalog/sales collaborator.
    pub api_url: String,

    /// Store name printed in the bill header.
    pub store_name: String,

    /// Directory the exported `Bill_<number>.pdf` files are written to.
    pub receipt_dir: PathBuf,

    /// Currency symbol for display.
    pub currency_symbol: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            api_url: kirana_api::DEFAULT_BASE_URL.to_string(),
            store_name: "Kirana Retail".to_string(),
            receipt_dir: PathBuf::from("."),
            currency_symbol: "₹".to_string(),
        }
    }
}

impl AppConfig {
    /// Creates a config from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `KIRANA_API_URL`: collaborator base URL
    /// - `KIRANA_STORE_NAME`: store name on the bill header
    /// - `KIRANA_RECEIPT_DIR`: where bill PDFs are written
    pub fn from_env() -> Self {
        let mut config = AppConfig::default();

        if let Ok(api_url) = std::env::var("KIRANA_API_URL") {
            config.api_url = api_url;
        }

        if let Ok(store_name) = std::env::var("KIRANA_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Ok(receipt_dir) = std::env::var("KIRANA_RECEIPT_DIR") {
            config.receipt_dir = PathBuf::from(receipt_dir);
        }

        config
    }

    /// Formats a monetary amount for display.
    ///
    /// Two decimal places, matching how the bill has always been shown.
    pub fn format_amount(&self, amount: f64) -> String {
        format!("{}{:.2}", self.currency_symbol, amount)
    }
}

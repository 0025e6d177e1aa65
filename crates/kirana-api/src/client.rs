//! # API Client
//!
//! Connection handle for the remote catalog/sales collaborator.
//!
//! ## Usage
//! ```rust,no_run
//! # async fn demo() -> Result<(), kirana_api::ClientError> {
//! use kirana_api::{ApiClient, ApiConfig};
//!
//! let client = ApiClient::new(ApiConfig::from_env())?;
//!
//! // Use endpoint groups
//! let products = client.products().list().await?;
//! let history = client.sales().history_all().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Design
//! One `ApiClient` per process, cheap to share (reqwest's client is an
//! `Arc` internally). Endpoint groups are borrowed views, mirroring how a
//! database layer hands out repositories.

use serde::de::DeserializeOwned;

use crate::error::{error_detail, ClientError};
use crate::products::ProductsApi;
use crate::sales::SalesApi;

/// Base URL used when `KIRANA_API_URL` is not set (local dev server).
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

// =============================================================================
// Configuration
// =============================================================================

/// Collaborator connection configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the remote HTTP API, without a trailing slash.
    pub base_url: String,
}

impl ApiConfig {
    /// Creates a config pointing at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        ApiConfig { base_url }
    }

    /// Reads the base URL from `KIRANA_API_URL`, falling back to the
    /// local development default.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("KIRANA_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        ApiConfig::new(base_url)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig::new(DEFAULT_BASE_URL)
    }
}

// =============================================================================
// Client
// =============================================================================

/// HTTP client for the remote collaborator.
///
/// All persistence and business-rule enforcement happen on the other side
/// of this client; it only moves JSON and classifies failures.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Builds a client from the given configuration.
    pub fn new(config: ApiConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().build()?;
        Ok(ApiClient {
            http,
            base_url: config.base_url,
        })
    }

    /// Product catalog endpoints.
    pub fn products(&self) -> ProductsApi<'_> {
        ProductsApi::new(self)
    }

    /// Sale creation and history endpoints.
    pub fn sales(&self) -> SalesApi<'_> {
        SalesApi::new(self)
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Turns a response into a decoded body or a typed error.
    ///
    /// Non-2xx responses are read as text so the server's own detail
    /// message survives into [`ClientError::Status`].
    pub(crate) async fn decode<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json::<T>().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ClientError::Status {
                status: status.as_u16(),
                detail: error_detail(&body),
            })
        }
    }

    /// Like [`decode`](Self::decode) for endpoints whose success body is
    /// irrelevant (e.g. DELETE).
    pub(crate) async fn expect_success(
        &self,
        response: reqwest::Response,
    ) -> Result<(), ClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ClientError::Status {
                status: status.as_u16(),
                detail: error_detail(&body),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_strips_trailing_slashes() {
        let config = ApiConfig::new("http://localhost:8000///");
        assert_eq!(config.base_url, "http://localhost:8000");
    }

    #[test]
    fn test_url_joining() {
        let client = ApiClient::new(ApiConfig::new("http://shop.example:8000/")).unwrap();
        assert_eq!(
            client.url("/products"),
            "http://shop.example:8000/products"
        );
        assert_eq!(client.url("/sales/history/all"),
            "http://shop.example:8000/sales/history/all"
        );
    }

    #[test]
    fn test_default_config() {
        assert_eq!(ApiConfig::default().base_url, DEFAULT_BASE_URL);
    }
}

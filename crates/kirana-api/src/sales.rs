//! # Sale Endpoints
//!
//! Sale submission and history retrieval.
//!
//! ## Endpoints
//! ```text
//! POST /sales                             → SaleConfirmation
//! GET  /sales/history?start_date&end_date → SalesHistory
//! GET  /sales/history/all                 → SalesHistory
//! ```
//!
//! ## Trust Boundary
//! The request body for a sale is the minimal
//! `[{product_code, qty, discount_percent, price}]`; everything financial
//! the server adds back (cost, GST, profit, its own sale id) is trusted
//! and displayed, never recomputed client-side.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use kirana_core::SaleLinePayload;

use crate::client::ApiClient;
use crate::error::ClientError;

/// Date format the collaborator expects for history ranges.
const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// DTOs
// =============================================================================

/// Confirmation returned by `POST /sales`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleConfirmation {
    /// Server-assigned sale id. Unrelated to the client-local bill number.
    pub sale_id: i64,
    pub subtotal: f64,
    pub discount_total: f64,
    pub total_gst: f64,
    pub grand_total: f64,
    pub items: Vec<ConfirmedLine>,
}

/// One recorded line of a confirmed sale, with the server's own
/// financial breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmedLine {
    pub product_code: String,
    pub product_name: String,
    pub qty: i64,
    pub unit_price: f64,
    pub discount_percent: f64,
    pub gst_percent: f64,
    pub line_total: f64,
    pub cost_price: f64,
    pub profit_loss_per_unit: f64,
    pub profit_loss_total: f64,
}

/// One row of the sales history report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    /// Formatted sale timestamp (server-local, "YYYY-MM-DD HH:MM").
    pub date: String,
    pub sale_id: i64,
    /// Product name at time of sale.
    pub product: String,
    pub qty: i64,
    pub cost_price: f64,
    pub sell_price: f64,
    pub discount_percent: f64,
    pub gst_percent: f64,
    pub line_total: f64,
    /// Server-computed profit for the line; displayed as-is.
    pub profit: f64,
}

/// Report summary totals, precomputed by the server and trusted.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HistorySummary {
    pub total_cost: f64,
    pub total_revenue: f64,
    pub total_gst: f64,
    pub total_profit: f64,
}

/// Full history response: rows plus summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesHistory {
    pub sales: Vec<SaleRecord>,
    pub summary: HistorySummary,
}

// =============================================================================
// Endpoint Group
// =============================================================================

/// Sale endpoint group, borrowed from an [`ApiClient`].
#[derive(Debug)]
pub struct SalesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> SalesApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        SalesApi { client }
    }

    /// Submits a finalized sale.
    ///
    /// The server performs the authoritative stock check and decrement; a
    /// stale client snapshot shows up here as a 400 rejection.
    pub async fn create(&self, items: &[SaleLinePayload]) -> Result<SaleConfirmation, ClientError> {
        debug!(lines = items.len(), "POST /sales");
        let response = self
            .client
            .http()
            .post(self.client.url("/sales"))
            .json(items)
            .send()
            .await?;
        self.client.decode(response).await
    }

    /// Fetches sales recorded within `[start, end]`, inclusive of both days.
    pub async fn history(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<SalesHistory, ClientError> {
        debug!(%start, %end, "GET /sales/history");
        let response = self
            .client
            .http()
            .get(self.client.url("/sales/history"))
            .query(&[
                ("start_date", start.format(DATE_FORMAT).to_string()),
                ("end_date", end.format(DATE_FORMAT).to_string()),
            ])
            .send()
            .await?;
        self.client.decode(response).await
    }

    /// Fetches the unbounded sales history.
    pub async fn history_all(&self) -> Result<SalesHistory, ClientError> {
        debug!("GET /sales/history/all");
        let response = self
            .client
            .http()
            .get(self.client.url("/sales/history/all"))
            .send()
            .await?;
        self.client.decode(response).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # History Commands
//!
//! Read-only sales report over the collaborator's history endpoints.
//! The summary figures come precomputed from the server and are shown
//! as-is, never recomputed client-side.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use kirana_api::{ApiClient, HistorySummary, SaleRecord, SalesHistory};

use crate::error::ApiError;

/// What the history screen shows.
///
/// `NotLoaded` is the initial state before any query; an executed query
/// that matched nothing is `Empty` with the (all-zero) server summary.
/// The distinction keeps "no results" from reading as "not searched yet".
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum HistoryView {
    NotLoaded,
    Empty { summary: HistorySummary },
    Loaded {
        sales: Vec<SaleRecord>,
        summary: HistorySummary,
    },
}

impl HistoryView {
    fn from_history(history: SalesHistory) -> Self {
        if history.sales.is_empty() {
            HistoryView::Empty {
                summary: history.summary,
            }
        } else {
            HistoryView::Loaded {
                sales: history.sales,
                summary: history.summary,
            }
        }
    }
}

/// Validates a raw date range before any network traffic.
///
/// Blank or unparseable dates are operator errors; the collaborator is
/// never bothered with them.
pub fn validate_range(start_raw: &str, end_raw: &str) -> Result<(NaiveDate, NaiveDate), ApiError> {
    let start = parse_date(start_raw, "start date")?;
    let end = parse_date(end_raw, "end date")?;
    Ok((start, end))
}

fn parse_date(raw: &str, label: &str) -> Result<NaiveDate, ApiError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ApiError::validation(format!(
            "Please select both dates: {label} is missing"
        )));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ApiError::validation(format!("Invalid {label} '{raw}': expected YYYY-MM-DD")))
}

/// Loads the history for an inclusive date range.
pub async fn load_range(
    client: &ApiClient,
    start_raw: &str,
    end_raw: &str,
) -> Result<HistoryView, ApiError> {
    let (start, end) = validate_range(start_raw, end_raw)?;
    let history = client.sales().history(start, end).await?;
    info!(%start, %end, rows = history.sales.len(), "history range loaded");
    Ok(HistoryView::from_history(history))
}

/// Loads the unbounded history.
pub async fn load_all(client: &ApiClient) -> Result<HistoryView, ApiError> {
    let history = client.sales().history_all().await?;
    info!(rows = history.sales.len(), "full history loaded");
    Ok(HistoryView::from_history(history))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_validate_range_accepts_iso_dates() {
        let (start, end) = validate_range("2025-03-01", "2025-03-14").unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
    }

    #[test]
    fn test_validate_range_rejects_blank_dates() {
        // Both blanks fail locally; no request would be made.
        let err = validate_range("", "2025-03-14").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("start date"));

        let err = validate_range("2025-03-01", "   ").unwrap_err();
        assert!(err.message.contains("end date"));
    }

    #[test]
    fn test_validate_range_rejects_malformed_dates() {
        let err = validate_range("14-03-2025", "2025-03-14").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(validate_range("2025-03-01", "2025-13-40").is_err());
    }

    #[test]
    fn test_view_distinguishes_empty_from_loaded() {
        let empty = HistoryView::from_history(SalesHistory {
            sales: Vec::new(),
            summary: HistorySummary::default(),
        });
        assert!(matches!(empty, HistoryView::Empty { .. }));

        let loaded = HistoryView::from_history(SalesHistory {
            sales: vec![SaleRecord {
                date: "2025-03-14 18:05".to_string(),
                sale_id: 9,
                product: "Sugar 1kg".to_string(),
                qty: 2,
                cost_price: 38.0,
                sell_price: 45.0,
                discount_percent: 0.0,
                gst_percent: 5.0,
                line_total: 94.5,
                profit: 14.0,
            }],
            summary: HistorySummary::default(),
        });
        assert!(matches!(loaded, HistoryView::Loaded { .. }));
    }
}

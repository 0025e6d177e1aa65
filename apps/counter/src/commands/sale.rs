//! # Sale Commands
//!
//! Cart entry and sale submission.
//!
//! ## Submission Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        submit_sale                                      │
//! │                                                                         │
//! │  guard taken? ──no──► SubmissionInFlight (no network)                   │
//! │       │yes                                                              │
//! │       ▼                                                                 │
//! │  finalize(cart, customer) ──err──► release guard, cart intact           │
//! │       │ok                                                               │
//! │       ▼                                                                 │
//! │  POST /sales ──rejected──► release guard, cart intact, NetworkError     │
//! │       │accepted                                                         │
//! │       ▼                                                                 │
//! │  clear bill ► release guard ► reload catalog ► render receipt           │
//! │                                               (failure logged only:     │
//! │                                                the sale already stands) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use serde::Serialize;
use tracing::{error, info};

use kirana_api::{ApiClient, SaleConfirmation};
use kirana_core::{BillTotals, Cart, CartLine};

use crate::config::AppConfig;
use crate::error::{ApiError, ErrorCode};
use crate::receipt;
use crate::state::{CatalogState, SessionState};

/// Snapshot of the cart for display after any mutation.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub totals: BillTotals,
}

impl CartView {
    fn from_cart(cart: &Cart) -> Self {
        CartView {
            lines: cart.lines().to_vec(),
            totals: cart.totals(),
        }
    }
}

/// The rendered bill: everything the printed receipt shows.
///
/// Captured at submission time, before the session is cleared, so the
/// receipt survives the post-sale reset.
#[derive(Debug, Clone, Serialize)]
pub struct BillView {
    /// Client-local display number, unrelated to the server's sale id.
    pub bill_number: u16,
    pub customer_name: String,
    pub phone_number: String,
    pub store_name: String,
    /// Local wall-clock time, "YYYY-MM-DD HH:MM:SS".
    pub timestamp: String,
    pub lines: Vec<CartLine>,
    pub totals: BillTotals,
}

/// Result of an accepted sale.
#[derive(Debug)]
pub struct SaleOutcome {
    /// The server's confirmation, displayed as-is.
    pub confirmation: SaleConfirmation,

    /// The bill as it stood at submission, for printing.
    pub bill: BillView,

    /// Where the PDF landed, or `None` if rendering failed.
    pub receipt_path: Option<PathBuf>,
}

/// The bill as it would print, without submitting or drawing a number.
///
/// The display number only exists once the bill is finalized, so the
/// preview carries the customer fields, lines and totals only.
#[derive(Debug, Clone, Serialize)]
pub struct BillPreview {
    pub customer_name: String,
    pub phone_number: String,
    pub lines: Vec<CartLine>,
    pub totals: BillTotals,
}

/// Adds a line to the in-progress bill.
///
/// On success the staged entry form resets; on failure both the cart
/// and the form stay as they were so the operator can correct and retry.
pub fn add_to_cart(
    catalog: &CatalogState,
    session: &SessionState,
    code: &str,
    qty: i64,
    discount_percent: f64,
    rate_override: Option<f64>,
) -> Result<CartView, ApiError> {
    let snapshot = catalog.snapshot();
    session.with_session_mut(|s| {
        let next = s
            .cart()
            .add_line(&snapshot, code, qty, discount_percent, rate_override)?;
        s.set_cart(next);
        s.reset_staged();
        Ok(CartView::from_cart(s.cart()))
    })
}

/// Shows the current bill without submitting it.
///
/// Valid at any point, including on an empty cart; submission rules
/// (non-empty cart, customer present) are only enforced by `submit_sale`.
pub fn bill_preview(session: &SessionState) -> BillPreview {
    session.with_session(|s| BillPreview {
        customer_name: s.customer_name().to_string(),
        phone_number: s.phone_number().to_string(),
        lines: s.cart().lines().to_vec(),
        totals: s.cart().totals(),
    })
}

/// Submits the current bill to the collaborator.
///
/// See the module docs for the full flow. The one subtlety: receipt
/// rendering happens after the sale is accepted, so its failure cannot
/// and must not undo the sale.
pub async fn submit_sale(
    client: &ApiClient,
    catalog: &CatalogState,
    session: &SessionState,
    config: &AppConfig,
) -> Result<SaleOutcome, ApiError> {
    if !session.with_session_mut(|s| s.try_begin_submission()) {
        return Err(ApiError::submission_in_flight());
    }

    // Finalize under the lock, capturing the bill before anything clears.
    let finalized = session.with_session(|s| {
        let payload = s.cart().finalize(s.customer_name())?;
        let bill = BillView {
            bill_number: payload.bill_number.value(),
            customer_name: payload.customer_name.clone(),
            phone_number: s.phone_number().to_string(),
            store_name: config.store_name.clone(),
            timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            lines: s.cart().lines().to_vec(),
            totals: s.cart().totals(),
        };
        Ok::<_, ApiError>((payload, bill))
    });

    let (payload, bill) = match finalized {
        Ok(parts) => parts,
        Err(err) => {
            session.with_session_mut(|s| s.end_submission());
            return Err(err);
        }
    };

    let confirmation = match client.sales().create(&payload.items).await {
        Ok(confirmation) => confirmation,
        Err(err) => {
            // Rejected or unreachable: the bill stays on screen untouched.
            session.with_session_mut(|s| s.end_submission());
            return Err(err.into());
        }
    };

    info!(
        sale_id = confirmation.sale_id,
        bill_number = bill.bill_number,
        grand_total = confirmation.grand_total,
        "sale accepted"
    );

    session.with_session_mut(|s| {
        s.clear_bill();
        s.end_submission();
    });

    // Stock changed server-side; refresh the snapshot (non-fatal).
    catalog.reload(client).await;

    let receipt_path = match receipt::render_receipt(&bill, &config.receipt_dir) {
        Ok(path) => Some(path),
        Err(err) => {
            error!(error = %err, "receipt rendering failed; sale is already recorded");
            None
        }
    };

    Ok(SaleOutcome {
        confirmation,
        bill,
        receipt_path,
    })
}

/// Discards the in-progress bill without submitting.
pub fn clear_session(session: &SessionState) -> CartView {
    session.with_session_mut(|s| {
        s.clear_bill();
        CartView::from_cart(s.cart())
    })
}

/// Parses a CLI line spec of the form `CODE:QTY[:DISCOUNT[:RATE]]`.
///
/// Examples: `SUG-1:2`, `SUG-1:2:10`, `SUG-1:2:10:95.5`.
pub fn parse_line_spec(spec: &str) -> Result<(String, i64, f64, Option<f64>), ApiError> {
    let mut parts = spec.split(':');

    let code = parts
        .next()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| bad_spec(spec))?
        .to_string();

    let qty = parts
        .next()
        .and_then(|p| p.trim().parse::<i64>().ok())
        .ok_or_else(|| bad_spec(spec))?;

    let discount_percent = match parts.next() {
        Some(p) => p.trim().parse::<f64>().map_err(|_| bad_spec(spec))?,
        None => 0.0,
    };

    let rate_override = match parts.next() {
        Some(p) => Some(p.trim().parse::<f64>().map_err(|_| bad_spec(spec))?),
        None => None,
    };

    if parts.next().is_some() {
        return Err(bad_spec(spec));
    }

    Ok((code, qty, discount_percent, rate_override))
}

fn bad_spec(spec: &str) -> ApiError {
    ApiError::new(
        ErrorCode::ValidationError,
        format!("Invalid line spec '{spec}': expected CODE:QTY[:DISCOUNT[:RATE]]"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use kirana_core::Product;

    fn seeded_catalog() -> CatalogState {
        let state = CatalogState::new();
        state.with_catalog_mut(|c| {
            c.replace(vec![Product {
                id: 1,
                code: "SUG-1".to_string(),
                name: "Sugar 1kg".to_string(),
                cost_price: 38.0,
                sell_price: 45.0,
                gst_percent: 5.0,
                stock: 20,
            }])
        });
        state
    }

    #[test]
    fn test_add_to_cart_updates_session_and_resets_staged() {
        let catalog = seeded_catalog();
        let session = SessionState::new();
        session.with_session_mut(|s| s.staged_mut().qty = 9);

        let view = add_to_cart(&catalog, &session, "SUG-1", 2, 0.0, None).unwrap();
        assert_eq!(view.lines.len(), 1);
        assert_eq!(view.lines[0].qty, 2);

        session.with_session(|s| {
            assert_eq!(s.cart().line_count(), 1);
            assert_eq!(s.staged().qty, 1);
        });
    }

    #[test]
    fn test_add_to_cart_failure_leaves_session_untouched() {
        let catalog = seeded_catalog();
        let session = SessionState::new();

        let err = add_to_cart(&catalog, &session, "SUG-1", 999, 0.0, None).unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        session.with_session(|s| assert!(s.cart().is_empty()));
    }

    #[test]
    fn test_bill_preview_reflects_session_without_submitting() {
        let catalog = seeded_catalog();
        let session = SessionState::new();
        session.with_session_mut(|s| {
            s.set_customer_name("Asha");
            s.set_phone_number("9876543210");
        });
        add_to_cart(&catalog, &session, "SUG-1", 2, 0.0, None).unwrap();

        let preview = bill_preview(&session);
        assert_eq!(preview.customer_name, "Asha");
        assert_eq!(preview.lines.len(), 1);
        assert!(preview.totals.grand_total > 0.0);

        // Previewing never consumes the bill.
        session.with_session(|s| assert_eq!(s.cart().line_count(), 1));
    }

    #[test]
    fn test_clear_session_empties_cart() {
        let catalog = seeded_catalog();
        let session = SessionState::new();
        add_to_cart(&catalog, &session, "SUG-1", 2, 0.0, None).unwrap();

        let view = clear_session(&session);
        assert!(view.lines.is_empty());
        assert_eq!(view.totals.grand_total, 0.0);
    }

    #[test]
    fn test_parse_line_spec_variants() {
        assert_eq!(
            parse_line_spec("SUG-1:2").unwrap(),
            ("SUG-1".to_string(), 2, 0.0, None)
        );
        assert_eq!(
            parse_line_spec("SUG-1:2:10").unwrap(),
            ("SUG-1".to_string(), 2, 10.0, None)
        );
        assert_eq!(
            parse_line_spec("SUG-1:2:10:95.5").unwrap(),
            ("SUG-1".to_string(), 2, 10.0, Some(95.5))
        );
    }

    #[test]
    fn test_parse_line_spec_rejects_malformed() {
        assert!(parse_line_spec("").is_err());
        assert!(parse_line_spec("SUG-1").is_err());
        assert!(parse_line_spec("SUG-1:two").is_err());
        assert!(parse_line_spec("SUG-1:2:x").is_err());
        assert!(parse_line_spec("SUG-1:2:10:95:extra").is_err());
    }
}

//! # Command Layer
//!
//! Operator-facing entry points. Each command follows the same pattern:
//!
//! 1. Validate input locally (no network for bad input)
//! 2. Drive the billing engine and/or the collaborator client
//! 3. Update shared state
//! 4. Return a serializable view or an [`ApiError`](crate::error::ApiError)

pub mod history;
pub mod product;
pub mod sale;

pub use history::{load_all, load_range, HistoryView};
pub use product::{add_product, delete_product, list_products, update_product};
pub use sale::{
    add_to_cart, bill_preview, clear_session, parse_line_spec, submit_sale, BillPreview, BillView,
    CartView, SaleOutcome,
};

//! # Domain Types
//!
//! Core domain types used throughout Kirana POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartLine     │   │ SaleLinePayload │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (server)    │   │  product_code   │   │  product_code   │       │
//! │  │  code (unique)  │──►│  qty, price     │──►│  qty            │       │
//! │  │  sell_price     │   │  discount %     │   │  discount %     │       │
//! │  │  gst_percent    │   │  line_total     │   │  price          │       │
//! │  │  stock          │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                   │
//! │                                                                         │
//! │  Product is owned by the remote catalog service; the client only       │
//! │  holds a read-only, possibly-stale snapshot refreshed on demand.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Money Representation
//! All monetary values are `f64`, matching the collaborator's JSON floats.
//! The server is the financial authority; the client-side computation is
//! checked to 1e-6 relative tolerance, never to exact equality.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog snapshot.
///
/// Read-mostly: the remote catalog service owns this record. Edits go
/// through `POST/PUT /products` and trigger a fresh snapshot load; the
/// engine never mutates a `Product`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Server-assigned identifier.
    pub id: i64,

    /// Business identifier, unique per catalog. Cart lines key on this.
    pub code: String,

    /// Display name shown to cashier and on the bill.
    pub name: String,

    /// Purchase cost per unit (used server-side for profit reporting).
    pub cost_price: f64,

    /// Default selling rate per unit. The operator may override it per line.
    pub sell_price: f64,

    /// GST percent applied to the discounted price.
    ///
    /// The catalog listing endpoint does not always carry this field, so a
    /// missing value deserializes to 0 (no tax), matching how the billing
    /// screen has always treated it.
    #[serde(default)]
    pub gst_percent: f64,

    /// Units on hand according to the snapshot. May be stale.
    pub stock: i64,
}

impl Product {
    /// Checks whether `quantity` units can be sold from the snapshot stock.
    pub fn can_sell(&self, quantity: i64) -> bool {
        quantity > 0 && quantity <= self.stock
    }
}

/// Payload for creating or updating a product via the collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    pub code: String,
    pub name: String,
    pub cost_price: f64,
    pub sell_price: f64,
    /// Defaults to 5% GST, the collaborator's own default.
    #[serde(default = "default_gst_percent")]
    pub gst_percent: f64,
    pub stock: i64,
}

fn default_gst_percent() -> f64 {
    5.0
}

// =============================================================================
// Cart Line
// =============================================================================

/// One line of the in-progress bill.
///
/// Exactly one line exists per distinct product code; adding an
/// already-present product merges quantities instead of duplicating the
/// line (see `Cart::add_line`).
///
/// ## Invariant
/// `line_total = price × qty × (1 − discount_percent/100) × (1 + gst_percent/100)`
/// recomputed on every mutation of the line, never cached stale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product code this line refers to.
    pub product_code: String,

    /// Product name at time of adding (for display).
    pub name: String,

    /// Quantity, always > 0.
    pub qty: i64,

    /// Effective unit rate. May be an operator override and need not equal
    /// the product's `sell_price`.
    pub price: f64,

    /// Discount percent, 0–100, applied before GST.
    pub discount_percent: f64,

    /// GST percent frozen from the product when the line was created.
    pub gst_percent: f64,

    /// Fully discounted, tax-inclusive amount for this line.
    pub line_total: f64,
}

impl CartLine {
    /// Computes the line total per the billing invariant.
    pub fn compute_total(price: f64, qty: i64, discount_percent: f64, gst_percent: f64) -> f64 {
        price * qty as f64 * (1.0 - discount_percent / 100.0) * (1.0 + gst_percent / 100.0)
    }

    /// Recomputes `line_total` from the current line state.
    pub(crate) fn recompute(&mut self) {
        self.line_total =
            Self::compute_total(self.price, self.qty, self.discount_percent, self.gst_percent);
    }
}

// =============================================================================
// Bill Totals
// =============================================================================

/// Aggregate totals of the in-progress bill.
///
/// Derived on demand, never stored independently. For any cart it holds
/// (within floating-point tolerance) that
/// `grand_total = subtotal − discount_total + gst_total = Σ line_total`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BillTotals {
    /// Σ price × qty, before discount and tax.
    pub subtotal: f64,

    /// Σ discount amount across lines.
    pub discount_total: f64,

    /// Σ GST amount across lines (computed on the discounted price).
    pub gst_total: f64,

    /// subtotal − discount_total + gst_total.
    pub grand_total: f64,
}

// =============================================================================
// Sale Payload
// =============================================================================

/// One line of the `POST /sales` request body.
///
/// Intentionally minimal: cost price, GST and profit are NOT sent. The
/// server is the authority for recomputing and recording those.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleLinePayload {
    pub product_code: String,
    pub qty: i64,
    pub discount_percent: f64,
    pub price: f64,
}

/// A finalized bill, ready for submission.
///
/// Only `items` travels over the wire; `bill_number` and `customer_name`
/// exist for the human-readable receipt of the current session.
#[derive(Debug, Clone, PartialEq)]
pub struct SalePayload {
    /// Client-local display id. Cosmetic, see [`BillNumber`].
    pub bill_number: BillNumber,

    /// Customer name printed on the bill (trimmed, non-blank).
    pub customer_name: String,

    /// The wire payload for `POST /sales`.
    pub items: Vec<SaleLinePayload>,
}

// =============================================================================
// Bill Number
// =============================================================================

/// Client-local display id for a bill, in the range 1000–9999.
///
/// This number is NOT sent to or reconciled with the server's own sale id
/// and is not guaranteed unique. It exists only as a cosmetic
/// disambiguator on the rendered receipt for the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillNumber(u16);

impl BillNumber {
    /// Draws a random 4-digit display number.
    pub fn random() -> Self {
        BillNumber(rand::thread_rng().gen_range(1000..=9999))
    }

    /// Returns the numeric value (always within 1000–9999).
    pub const fn value(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for BillNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_gst_defaults_to_zero_when_absent() {
        // The /products listing omits gst_percent; treat missing as 0.
        let json = r#"{
            "id": 1,
            "code": "A1",
            "name": "Sugar 1kg",
            "cost_price": 38.0,
            "sell_price": 45.0,
            "stock": 12,
            "profit_loss_per_unit": 7.0,
            "profit_loss_total": 84.0
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.gst_percent, 0.0);
        assert_eq!(product.stock, 12);
    }

    #[test]
    fn test_product_can_sell() {
        let product = Product {
            id: 1,
            code: "A1".into(),
            name: "Sugar".into(),
            cost_price: 38.0,
            sell_price: 45.0,
            gst_percent: 5.0,
            stock: 10,
        };
        assert!(product.can_sell(1));
        assert!(product.can_sell(10));
        assert!(!product.can_sell(11));
        assert!(!product.can_sell(0));
    }

    #[test]
    fn test_sale_line_payload_wire_shape() {
        // Exactly four fields go over the wire; cost/GST/profit are the
        // server's business.
        let line = SaleLinePayload {
            product_code: "A1".into(),
            qty: 2,
            discount_percent: 10.0,
            price: 100.0,
        };
        let value = serde_json::to_value(&line).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 4);
        assert!(obj.contains_key("product_code"));
        assert!(obj.contains_key("qty"));
        assert!(obj.contains_key("discount_percent"));
        assert!(obj.contains_key("price"));
    }

    #[test]
    fn test_line_total_formula() {
        // 100 × 2 × 0.9 × 1.05 = 189.00
        let total = CartLine::compute_total(100.0, 2, 10.0, 5.0);
        assert!((total - 189.0).abs() < 1e-9);
    }

    #[test]
    fn test_bill_number_range() {
        for _ in 0..200 {
            let n = BillNumber::random();
            assert!((1000..=9999).contains(&n.value()));
        }
    }

    #[test]
    fn test_bill_number_display() {
        let n = BillNumber::random();
        assert_eq!(format!("{}", n), n.value().to_string());
    }
}

//! # Cart / Bill Engine
//!
//! The working bill of the current session: a list of cart lines plus the
//! per-line and aggregate billing computation (discount, GST, totals).
//!
//! ## Engine Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Cart / Bill Engine                                  │
//! │                                                                         │
//! │  Operator input              Engine (pure, no I/O)                      │
//! │  ──────────────              ─────────────────────                      │
//! │                                                                         │
//! │  Add Item ─────────────────► add_line(catalog, code, qty, disc, rate)   │
//! │                                │ ProductNotFound / InvalidQuantity /    │
//! │                                │ InsufficientStock / InvalidRate        │
//! │                                ▼                                        │
//! │  Bill display ◄──────────── totals()                                    │
//! │                                                                         │
//! │  Generate Bill ────────────► finalize(customer_name)                    │
//! │                                │ EmptyCart / MissingCustomer            │
//! │                                ▼                                        │
//! │                             SalePayload ──► POST /sales (app layer)     │
//! │                                                                         │
//! │  Clear ────────────────────► clear()                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Immutable Updates
//! The cart is a value object: `add_line` returns a new `Cart` and leaves
//! the receiver untouched on failure. This keeps the engine deterministic
//! and unit-testable without any UI harness.
//!
//! ## Staleness
//! Stock and rate checks read the in-memory catalog snapshot, which may be
//! stale relative to the server. That race is accepted; the authoritative
//! stock check happens server-side on submission.

use crate::error::{CartError, CartResult};
use crate::types::{BillNumber, BillTotals, CartLine, Product, SaleLinePayload, SalePayload};

/// The in-progress bill.
///
/// ## Invariants
/// - Exactly one line per distinct product code
/// - Every line's `qty` is > 0 and `price` is > 0
/// - Every `line_total` satisfies the billing formula at all times
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Returns the cart lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Checks if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the number of distinct product lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Adds a product to the bill, returning the updated cart.
    ///
    /// ## Preconditions (checked in order, first failure wins)
    /// 1. `code` resolves in the catalog snapshot, else [`CartError::ProductNotFound`]
    /// 2. `qty` is positive, else [`CartError::InvalidQuantity`]
    /// 3. `qty` does not exceed snapshot stock, else [`CartError::InsufficientStock`]
    /// 4. the effective unit rate is positive, else [`CartError::InvalidRate`]
    ///
    /// The effective rate is the operator override when one is given and
    /// positive, otherwise the product's `sell_price`.
    ///
    /// ## Merge Semantics
    /// If a line for this product code already exists, quantities are ADDED
    /// while price and discount are OVERWRITTEN with the just-submitted
    /// values (not merged or averaged), and the line total is recomputed
    /// from the merged state. The stock check applies to the incoming
    /// quantity only. Both behaviors are load-bearing; do not "fix" them.
    pub fn add_line(
        &self,
        catalog: &[Product],
        code: &str,
        qty: i64,
        discount_percent: f64,
        rate_override: Option<f64>,
    ) -> CartResult<Cart> {
        let product = catalog
            .iter()
            .find(|p| p.code == code)
            .ok_or_else(|| CartError::ProductNotFound(code.to_string()))?;

        if qty <= 0 {
            return Err(CartError::InvalidQuantity { qty });
        }

        if qty > product.stock {
            return Err(CartError::InsufficientStock {
                code: product.code.clone(),
                available: product.stock,
                requested: qty,
            });
        }

        let price = match rate_override {
            Some(rate) if rate > 0.0 => rate,
            _ => product.sell_price,
        };
        if price <= 0.0 {
            return Err(CartError::InvalidRate { rate: price });
        }

        let mut next = self.clone();
        if let Some(line) = next.lines.iter_mut().find(|l| l.product_code == product.code) {
            line.qty += qty;
            line.discount_percent = discount_percent;
            line.price = price;
            line.recompute();
        } else {
            next.lines.push(CartLine {
                product_code: product.code.clone(),
                name: product.name.clone(),
                qty,
                price,
                discount_percent,
                gst_percent: product.gst_percent,
                line_total: CartLine::compute_total(
                    price,
                    qty,
                    discount_percent,
                    product.gst_percent,
                ),
            });
        }

        Ok(next)
    }

    /// Computes the aggregate bill totals.
    ///
    /// Pure fold over the lines; an empty cart yields all-zero totals.
    pub fn totals(&self) -> BillTotals {
        let mut totals = BillTotals::default();
        for line in &self.lines {
            let gross = line.price * line.qty as f64;
            let discount = gross * line.discount_percent / 100.0;
            let gst = (gross - discount) * line.gst_percent / 100.0;
            totals.subtotal += gross;
            totals.discount_total += discount;
            totals.gst_total += gst;
        }
        totals.grand_total = totals.subtotal - totals.discount_total + totals.gst_total;
        totals
    }

    /// Finalizes the bill into a sale payload.
    ///
    /// ## Preconditions
    /// - cart is non-empty, else [`CartError::EmptyCart`]
    /// - `customer_name` is non-blank after trimming, else
    ///   [`CartError::MissingCustomer`]
    ///
    /// The payload carries one minimal line per cart line
    /// (`{product_code, qty, discount_percent, price}`); cost price, GST
    /// and profit are intentionally not sent — the server recomputes and
    /// records those. A cosmetic [`BillNumber`] is drawn for the receipt.
    pub fn finalize(&self, customer_name: &str) -> CartResult<SalePayload> {
        if self.lines.is_empty() {
            return Err(CartError::EmptyCart);
        }

        let customer_name = customer_name.trim();
        if customer_name.is_empty() {
            return Err(CartError::MissingCustomer);
        }

        let items = self
            .lines
            .iter()
            .map(|l| SaleLinePayload {
                product_code: l.product_code.clone(),
                qty: l.qty,
                discount_percent: l.discount_percent,
                price: l.price,
            })
            .collect();

        Ok(SalePayload {
            bill_number: BillNumber::random(),
            customer_name: customer_name.to_string(),
            items,
        })
    }

    /// Returns the empty cart. The caller is responsible for resetting any
    /// staged operator input alongside it.
    pub fn clear(&self) -> Cart {
        Cart::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const REL_TOLERANCE: f64 = 1e-6;

    fn assert_close(actual: f64, expected: f64) {
        let scale = expected.abs().max(1.0);
        assert!(
            (actual - expected).abs() <= REL_TOLERANCE * scale,
            "expected {expected}, got {actual}"
        );
    }

    fn product(code: &str, sell_price: f64, gst_percent: f64, stock: i64) -> Product {
        Product {
            id: 1,
            code: code.to_string(),
            name: format!("Product {}", code),
            cost_price: sell_price * 0.8,
            sell_price,
            gst_percent,
            stock,
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product("A1", 100.0, 5.0, 10),
            product("B2", 49.5, 12.0, 3),
            product("C3", 7.25, 0.0, 500),
        ]
    }

    #[test]
    fn test_add_line_computes_line_total() {
        // 100 × 2 × (1 − 0.10) × (1 + 0.05) = 189.00
        let cart = Cart::new()
            .add_line(&catalog(), "A1", 2, 10.0, Some(100.0))
            .unwrap();

        assert_eq!(cart.line_count(), 1);
        let line = &cart.lines()[0];
        assert_eq!(line.qty, 2);
        assert_close(line.line_total, 189.0);
    }

    #[test]
    fn test_add_line_uses_sell_price_without_override() {
        let cart = Cart::new()
            .add_line(&catalog(), "A1", 1, 0.0, None)
            .unwrap();
        assert_close(cart.lines()[0].price, 100.0);
    }

    #[test]
    fn test_add_line_falls_back_when_override_not_positive() {
        // An override of 0 means "no override", not a free item.
        let cart = Cart::new()
            .add_line(&catalog(), "A1", 1, 0.0, Some(0.0))
            .unwrap();
        assert_close(cart.lines()[0].price, 100.0);
    }

    #[test]
    fn test_merge_adds_quantity_and_overwrites_rate_and_discount() {
        // First add: qty 2, 10% discount at rate 100.
        // Second add of the same product: qty 3, 0% discount at rate 90.
        // Merged: qty 5, discount 0, price 90 — the overwrite is deliberate.
        // 90 × 5 × 1 × 1.05 = 472.50
        let cat = catalog();
        let cart = Cart::new()
            .add_line(&cat, "A1", 2, 10.0, Some(100.0))
            .unwrap()
            .add_line(&cat, "A1", 3, 0.0, Some(90.0))
            .unwrap();

        assert_eq!(cart.line_count(), 1);
        let line = &cart.lines()[0];
        assert_eq!(line.qty, 5);
        assert_close(line.discount_percent, 0.0);
        assert_close(line.price, 90.0);
        assert_close(line.line_total, 472.5);
    }

    #[test]
    fn test_merge_checks_only_incoming_quantity_against_stock() {
        // Stock is 10; two adds of 6 are each within stock even though the
        // merged quantity is 12. The server remains the authority.
        let cat = catalog();
        let cart = Cart::new()
            .add_line(&cat, "A1", 6, 0.0, None)
            .unwrap()
            .add_line(&cat, "A1", 6, 0.0, None)
            .unwrap();
        assert_eq!(cart.lines()[0].qty, 12);
    }

    #[test]
    fn test_add_line_rejects_unknown_product() {
        let err = Cart::new()
            .add_line(&catalog(), "NOPE", 1, 0.0, None)
            .unwrap_err();
        assert_eq!(err, CartError::ProductNotFound("NOPE".to_string()));
    }

    #[test]
    fn test_add_line_rejects_non_positive_quantity() {
        let cat = catalog();
        assert_eq!(
            Cart::new().add_line(&cat, "A1", 0, 0.0, None).unwrap_err(),
            CartError::InvalidQuantity { qty: 0 }
        );
        assert_eq!(
            Cart::new().add_line(&cat, "A1", -3, 0.0, None).unwrap_err(),
            CartError::InvalidQuantity { qty: -3 }
        );
    }

    #[test]
    fn test_add_line_rejects_quantity_over_stock() {
        let err = Cart::new()
            .add_line(&catalog(), "B2", 4, 0.0, None)
            .unwrap_err();
        assert_eq!(
            err,
            CartError::InsufficientStock {
                code: "B2".to_string(),
                available: 3,
                requested: 4,
            }
        );
    }

    #[test]
    fn test_add_line_rejects_non_positive_rate() {
        // sell_price 0 and no usable override leaves no positive rate.
        let cat = vec![product("Z0", 0.0, 5.0, 10)];
        let err = Cart::new().add_line(&cat, "Z0", 1, 0.0, None).unwrap_err();
        assert!(matches!(err, CartError::InvalidRate { .. }));

        let err = Cart::new()
            .add_line(&cat, "Z0", 1, 0.0, Some(-10.0))
            .unwrap_err();
        assert!(matches!(err, CartError::InvalidRate { .. }));
    }

    #[test]
    fn test_add_line_precondition_order() {
        // Unknown product wins over bad quantity.
        let err = Cart::new()
            .add_line(&catalog(), "NOPE", 0, 0.0, None)
            .unwrap_err();
        assert!(matches!(err, CartError::ProductNotFound(_)));

        // Bad quantity wins over insufficient stock.
        let err = Cart::new()
            .add_line(&catalog(), "B2", -5, 0.0, None)
            .unwrap_err();
        assert!(matches!(err, CartError::InvalidQuantity { .. }));
    }

    #[test]
    fn test_failed_add_leaves_cart_unchanged() {
        let cat = catalog();
        let cart = Cart::new().add_line(&cat, "A1", 1, 0.0, None).unwrap();
        let before = cart.clone();
        assert!(cart.add_line(&cat, "B2", 99, 0.0, None).is_err());
        assert_eq!(cart, before);
    }

    #[test]
    fn test_empty_cart_totals_are_zero() {
        let totals = Cart::new().totals();
        assert_eq!(totals.subtotal, 0.0);
        assert_eq!(totals.discount_total, 0.0);
        assert_eq!(totals.gst_total, 0.0);
        assert_eq!(totals.grand_total, 0.0);
    }

    #[test]
    fn test_totals_single_line() {
        let cart = Cart::new()
            .add_line(&catalog(), "A1", 2, 10.0, Some(100.0))
            .unwrap();
        let totals = cart.totals();
        assert_close(totals.subtotal, 200.0);
        assert_close(totals.discount_total, 20.0);
        assert_close(totals.gst_total, 9.0); // (200 − 20) × 5%
        assert_close(totals.grand_total, 189.0);
    }

    #[test]
    fn test_grand_total_equals_sum_of_line_totals() {
        // Aggregate consistency across lines with awkward rates and
        // fractional discounts.
        let cat = catalog();
        let cart = Cart::new()
            .add_line(&cat, "A1", 3, 12.5, Some(99.99))
            .unwrap()
            .add_line(&cat, "B2", 2, 0.0, None)
            .unwrap()
            .add_line(&cat, "C3", 117, 7.3, Some(7.25))
            .unwrap();

        let totals = cart.totals();
        let line_sum: f64 = cart.lines().iter().map(|l| l.line_total).sum();
        assert_close(totals.grand_total, line_sum);
        assert_close(
            totals.grand_total,
            totals.subtotal - totals.discount_total + totals.gst_total,
        );
    }

    #[test]
    fn test_finalize_rejects_empty_cart() {
        assert_eq!(
            Cart::new().finalize("Asha").unwrap_err(),
            CartError::EmptyCart
        );
    }

    #[test]
    fn test_finalize_rejects_blank_customer() {
        let cart = Cart::new()
            .add_line(&catalog(), "A1", 1, 0.0, None)
            .unwrap();
        assert_eq!(cart.finalize("").unwrap_err(), CartError::MissingCustomer);
        assert_eq!(
            cart.finalize("   \t").unwrap_err(),
            CartError::MissingCustomer
        );
    }

    #[test]
    fn test_finalize_builds_minimal_payload() {
        let cat = catalog();
        let cart = Cart::new()
            .add_line(&cat, "A1", 2, 10.0, Some(100.0))
            .unwrap()
            .add_line(&cat, "B2", 1, 0.0, None)
            .unwrap();

        let payload = cart.finalize("  Asha Patel ").unwrap();
        assert_eq!(payload.customer_name, "Asha Patel");
        assert!((1000..=9999).contains(&payload.bill_number.value()));
        assert_eq!(payload.items.len(), 2);

        let first = &payload.items[0];
        assert_eq!(first.product_code, "A1");
        assert_eq!(first.qty, 2);
        assert_close(first.discount_percent, 10.0);
        assert_close(first.price, 100.0);
    }

    #[test]
    fn test_clear_returns_empty_cart() {
        let cart = Cart::new()
            .add_line(&catalog(), "A1", 1, 0.0, None)
            .unwrap();
        assert!(cart.clear().is_empty());
        // The original cart value is untouched.
        assert_eq!(cart.line_count(), 1);
    }
}

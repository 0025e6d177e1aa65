//! # kirana-core: Pure Billing Logic for Kirana POS
//!
//! This crate is the **heart** of the Kirana POS client. It contains the
//! bill/cart computation engine as pure functions with zero I/O
//! dependencies — the one piece of domain logic that decides money totals
//! shown to a cashier and customer.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Kirana POS Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Counter App (apps/counter)                     │   │
//! │  │    catalog snapshot ──► bill session ──► receipt PDF            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kirana-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   types   │  │   cart    │  │   error   │  │ validation│   │   │
//! │  │   │  Product  │  │   Cart    │  │ CartError │  │   rules   │   │   │
//! │  │   │ CartLine  │  │  totals   │  │           │  │   checks  │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              kirana-api (HTTP collaborator client)              │   │
//! │  │        GET /products • POST /sales • GET /sales/history         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CartLine, BillTotals, SalePayload)
//! - [`cart`] - The cart/bill engine (pure, synchronous, no I/O)
//! - [`error`] - Domain error types
//! - [`validation`] - Product form validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: the engine is deterministic - same input = same
//!    output (the cosmetic bill number drawn at finalize is the one
//!    documented exception)
//! 2. **Immutable Updates**: `Cart` is a value object; operations return a
//!    new cart and never mutate the receiver on failure
//! 3. **Float Money**: monetary values are `f64` to match the
//!    collaborator's wire format; properties hold to 1e-6 relative
//!    tolerance and the server stays the financial authority
//! 4. **Explicit Errors**: all failures are typed variants, never strings
//!    or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use kirana_core::{Cart, Product};
//!
//! let catalog = vec![Product {
//!     id: 1,
//!     code: "A1".into(),
//!     name: "Sugar 1kg".into(),
//!     cost_price: 38.0,
//!     sell_price: 100.0,
//!     gst_percent: 5.0,
//!     stock: 10,
//! }];
//!
//! // 100 × 2 × 0.9 × 1.05 = 189.00
//! let cart = Cart::new()
//!     .add_line(&catalog, "A1", 2, 10.0, Some(100.0))
//!     .unwrap();
//! assert!((cart.totals().grand_total - 189.0).abs() < 1e-6);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use kirana_core::Cart` instead of
// `use kirana_core::cart::Cart`

pub use cart::Cart;
pub use error::{CartError, CartResult, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Relative tolerance for monetary comparisons.
///
/// Totals are f64 sums of per-line products; two renderings of the same
/// bill agree to this tolerance, never bit-for-bit.
pub const MONEY_REL_TOLERANCE: f64 = 1e-6;

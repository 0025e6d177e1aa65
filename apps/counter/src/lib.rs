//! # kirana-counter: Operator-Facing POS Counter
//!
//! The billing screen, wired together: configuration, shared state,
//! commands, and the PDF receipt exporter.
//!
//! ## Module Organization
//!
//! - [`config`] - Environment-driven application configuration
//! - [`error`] - Unified command error (`code` + `message`)
//! - [`state`] - Catalog snapshot and bill session state
//! - [`commands`] - Operator entry points (products, sale, history)
//! - [`receipt`] - PDF bill export
//!
//! ## Design Notes
//!
//! The counter is deliberately thin. Billing arithmetic lives in
//! `kirana-core`, network access in `kirana-api`; this crate only
//! sequences them and holds the mutable state in between.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod commands;
pub mod config;
pub mod error;
pub mod receipt;
pub mod state;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::AppConfig;
pub use error::{ApiError, ErrorCode};
pub use state::{CatalogState, SessionState};

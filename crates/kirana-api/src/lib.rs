//! # kirana-api: HTTP Collaborator Client for Kirana POS
//!
//! This crate provides access to the remote catalog/sales collaborator.
//! The collaborator owns all persistence and business-rule enforcement;
//! this client only moves JSON and classifies failures.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Kirana POS Data Flow                               │
//! │                                                                         │
//! │  Counter app command (submit_sale, reload catalog, ...)                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   kirana-api (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐    │   │
//! │  │   │   ApiClient   │    │ Endpoint APIs │    │    error     │    │   │
//! │  │   │  (client.rs)  │◄───│ ProductsApi   │    │ ClientError  │    │   │
//! │  │   │  reqwest +    │    │ SalesApi      │    │ detail parse │    │   │
//! │  │   │  base URL     │    │               │    │              │    │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Remote HTTP API (external)                      │   │
//! │  │   /products • /sales • /sales/history • /sales/history/all     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`client`] - Connection handle and configuration
//! - [`error`] - Client error types and detail extraction
//! - [`products`] - Catalog CRUD endpoints
//! - [`sales`] - Sale submission and history endpoints
//!
//! ## Failure Semantics
//!
//! Transport failures and non-2xx responses surface synchronously as
//! [`ClientError`]; nothing is retried and no backoff exists. The operator
//! decides whether to try again.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod client;
pub mod error;
pub mod products;
pub mod sales;

// =============================================================================
// Re-exports
// =============================================================================

pub use client::{ApiClient, ApiConfig, DEFAULT_BASE_URL};
pub use error::ClientError;
pub use products::ProductsApi;
pub use sales::{
    ConfirmedLine, HistorySummary, SaleConfirmation, SaleRecord, SalesApi, SalesHistory,
};

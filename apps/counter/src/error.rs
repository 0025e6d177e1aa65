//! # API Error Type
//!
//! Unified error type for the counter command layer.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Kirana POS                             │
//! │                                                                         │
//! │  Operator action                 Command layer                          │
//! │  ───────────────                 ─────────────                          │
//! │                                                                         │
//! │  Add item to bill                                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function: Result<T, ApiError>                           │  │
//! │  │         │                                                        │  │
//! │  │  Engine error?  ── CartError::InsufficientStock ──┐              │  │
//! │  │         │                                         ▼              │  │
//! │  │  Collaborator?  ── ClientError::Transport ───── ApiError ──────► │  │
//! │  │         │                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────► │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  No category is fatal: the operator always gets back to an              │
//! │  interactive state with a code + message pair.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use kirana_api::ClientError;
use kirana_core::{CartError, ValidationError};

/// Error returned from counter commands.
///
/// Carries a machine-readable `code` for programmatic handling and a
/// human-readable `message` for display.
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// Machine-readable error code.
    pub code: ErrorCode,

    /// Human-readable error message for the operator.
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Referential failure: product code unknown in the snapshot.
    NotFound,

    /// Operator input failed validation; never sent over the network.
    ValidationError,

    /// Requested quantity exceeds snapshot stock.
    InsufficientStock,

    /// Cart engine rejected the operation.
    CartError,

    /// Transport failure or collaborator rejection; retryable.
    NetworkError,

    /// A submission is already outstanding for this session.
    SubmissionInFlight,

    /// Anything else.
    Internal,
}

impl ApiError {
    /// Creates a new error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates the duplicate-submission guard error.
    pub fn submission_in_flight() -> Self {
        ApiError::new(
            ErrorCode::SubmissionInFlight,
            "A sale submission is already in progress",
        )
    }
}

/// Converts billing engine errors to command errors.
impl From<CartError> for ApiError {
    fn from(err: CartError) -> Self {
        let code = match &err {
            CartError::ProductNotFound(_) => ErrorCode::NotFound,
            CartError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
            CartError::InvalidQuantity { .. }
            | CartError::InvalidRate { .. }
            | CartError::EmptyCart
            | CartError::MissingCustomer => ErrorCode::ValidationError,
        };
        ApiError::new(code, err.to_string())
    }
}

/// Converts product form validation errors to command errors.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts collaborator errors to command errors.
///
/// Both transport failures and non-2xx rejections come through as
/// NetworkError: the operator's recourse is the same (check, retry by
/// hand), and the message keeps the server's detail when there is one.
impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        ApiError::new(ErrorCode::NetworkError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

//! # Client Error Types
//!
//! Error types for collaborator calls.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Transport failure (reqwest::Error)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ClientError (this module) ← adds status + server detail when present   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (counter app) ← categorized for the operator                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Operator sees a retryable failure; nothing is retried automatically    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Collaborator call errors.
///
/// Every network or non-2xx failure surfaces as one of these. No variant
/// triggers an automatic retry; the operator decides whether to try again.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced an HTTP response (connection refused,
    /// DNS failure, timeout) or the response body failed to decode.
    #[error("request to collaborator failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The collaborator answered with a non-2xx status.
    ///
    /// `detail` carries the server's own explanation when the body is the
    /// usual `{"detail": "..."}` shape, otherwise the raw body.
    #[error("collaborator returned {status}: {detail}")]
    Status { status: u16, detail: String },
}

impl ClientError {
    /// True when the failure came from the server rejecting the request
    /// (as opposed to the request never arriving).
    pub fn is_rejection(&self) -> bool {
        matches!(self, ClientError::Status { .. })
    }
}

/// Extracts the human-readable detail from an error response body.
///
/// The collaborator reports failures as `{"detail": "..."}`; anything else
/// is passed through verbatim so the operator still sees something useful.
pub(crate) fn error_detail(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(detail) = value.get("detail").and_then(|d| d.as_str()) {
            return detail.to_string();
        }
    }

    let body = body.trim();
    if body.is_empty() {
        "no detail provided".to_string()
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_detail_extracts_server_detail() {
        assert_eq!(
            error_detail(r#"{"detail": "Product A1 not found"}"#),
            "Product A1 not found"
        );
        assert_eq!(
            error_detail(r#"{"detail": "Not enough stock for A1"}"#),
            "Not enough stock for A1"
        );
    }

    #[test]
    fn test_error_detail_passes_through_other_bodies() {
        assert_eq!(error_detail("Internal Server Error"), "Internal Server Error");
        assert_eq!(error_detail(r#"{"error": "boom"}"#), r#"{"error": "boom"}"#);
        assert_eq!(error_detail(""), "no detail provided");
        assert_eq!(error_detail("   "), "no detail provided");
    }

    #[test]
    fn test_status_error_message() {
        let err = ClientError::Status {
            status: 400,
            detail: "Not enough stock for A1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "collaborator returned 400: Not enough stock for A1"
        );
        assert!(err.is_rejection());
    }
}

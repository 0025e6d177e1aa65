//! # Validation Module
//!
//! Product form validation for Kirana POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Operator input (counter app)                                  │
//! │  ├── THIS MODULE: field checks before any collaborator call             │
//! │  └── Immediate operator feedback, nothing sent over the network         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Remote collaborator (HTTP API)                                │
//! │  ├── Uniqueness of product codes                                        │
//! │  └── Authoritative stock and persistence rules                          │
//! │                                                                         │
//! │  The client never enforces what only the server can know.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::ProductInput;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a product code.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Only alphanumeric characters, hyphens and underscores
pub fn validate_product_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: 50,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a GST percentage.
///
/// Must be between 0 and 100 inclusive.
pub fn validate_gst_percent(gst_percent: f64) -> ValidationResult<()> {
    if !(0.0..=100.0).contains(&gst_percent) {
        return Err(ValidationError::OutOfRange {
            field: "gst_percent".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

/// Validates the stock level of a product form.
///
/// Zero is allowed (out of stock); negative is not.
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "stock".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Form Validator
// =============================================================================

/// Validates a complete product create/update form.
///
/// ## Rules
/// - code and name per the field validators above
/// - cost price must not be negative (free samples are legal)
/// - sell price must be positive
/// - GST percent within 0–100, stock not negative
///
/// Code uniqueness is the collaborator's job; a duplicate comes back as a
/// 400 with a detail message and is surfaced as-is.
pub fn validate_product_input(input: &ProductInput) -> ValidationResult<()> {
    validate_product_code(&input.code)?;
    validate_product_name(&input.name)?;

    if input.cost_price < 0.0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "cost_price".to_string(),
        });
    }

    if input.sell_price <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "sell_price".to_string(),
        });
    }

    validate_gst_percent(input.gst_percent)?;
    validate_stock(input.stock)?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> ProductInput {
        ProductInput {
            code: "SUGAR-1KG".to_string(),
            name: "Sugar 1kg".to_string(),
            cost_price: 38.0,
            sell_price: 45.0,
            gst_percent: 5.0,
            stock: 20,
        }
    }

    #[test]
    fn test_validate_product_code() {
        assert!(validate_product_code("SUGAR-1KG").is_ok());
        assert!(validate_product_code("a1_b2").is_ok());

        assert!(validate_product_code("").is_err());
        assert!(validate_product_code("   ").is_err());
        assert!(validate_product_code("has space").is_err());
        assert!(validate_product_code(&"A".repeat(60)).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Sugar 1kg").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_gst_percent() {
        assert!(validate_gst_percent(0.0).is_ok());
        assert!(validate_gst_percent(5.0).is_ok());
        assert!(validate_gst_percent(100.0).is_ok());
        assert!(validate_gst_percent(-1.0).is_err());
        assert!(validate_gst_percent(100.5).is_err());
    }

    #[test]
    fn test_validate_stock() {
        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(500).is_ok());
        assert!(validate_stock(-1).is_err());
    }

    #[test]
    fn test_validate_product_input_accepts_valid_form() {
        assert!(validate_product_input(&input()).is_ok());
    }

    #[test]
    fn test_validate_product_input_rejects_bad_prices() {
        let mut bad = input();
        bad.cost_price = -1.0;
        assert!(matches!(
            validate_product_input(&bad),
            Err(ValidationError::MustNotBeNegative { .. })
        ));

        let mut bad = input();
        bad.sell_price = 0.0;
        assert!(matches!(
            validate_product_input(&bad),
            Err(ValidationError::MustBePositive { .. })
        ));
    }

    #[test]
    fn test_validate_product_input_first_failure_wins() {
        let mut bad = input();
        bad.code = "".to_string();
        bad.sell_price = 0.0;
        // Code failure is reported before the price failure.
        assert!(matches!(
            validate_product_input(&bad),
            Err(ValidationError::Required { .. })
        ));
    }
}

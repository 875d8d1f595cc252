//! # Validation Module
//!
//! Input validation utilities for Almacen.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: GUI forms                                                     │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (engine boundary)                                │
//! │  └── Business rule validation before any write is attempted            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / UNIQUE / CHECK constraints                             │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::SaleLine;
use crate::{MAX_LINE_QUANTITY, MAX_MARGIN_BPS, MAX_PRICE_CENTS, MAX_SALE_LINES};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an internal product code.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 50 characters
/// - Only alphanumeric characters, hyphens, underscores
///
/// ## Example
/// ```rust
/// use almacen_core::validation::validate_code;
///
/// assert!(validate_code("HAM-200").is_ok());
/// assert!(validate_code("").is_err());
/// ```
pub fn validate_code(code: &str) -> ValidationResult<()> {
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
/// - Must be at most 200 characters
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

/// Normalizes a raw barcode input.
///
/// Blank or whitespace-only input becomes `None`, so the UNIQUE constraint
/// on the barcode column only ever applies to real codes. Surrounding
/// whitespace is stripped from real codes.
///
/// ## Example
/// ```rust
/// use almacen_core::validation::normalize_barcode;
///
/// assert_eq!(normalize_barcode(Some("  779123456 ")), Some("779123456".to_string()));
/// assert_eq!(normalize_barcode(Some("   ")), None);
/// assert_eq!(normalize_barcode(None), None);
/// ```
pub fn normalize_barcode(barcode: Option<&str>) -> Option<String> {
    let trimmed = barcode?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a sale line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_LINE_QUANTITY
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a stock count (edits and upserts).
///
/// ## Rules
/// - Must be non-negative (stock never goes below zero)
pub fn validate_stock_count(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a price or cost in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (unpriced / giveaway items)
/// - Must not exceed MAX_PRICE_CENTS. Besides catching scanner garbage,
///   the ceiling keeps quantity × price within i64 for every valid line.
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates a sector margin in basis points.
///
/// ## Rules
/// - Must not exceed MAX_MARGIN_BPS (margins above 100% are legal, but a
///   cap guards against fat-fingered percentages)
pub fn validate_margin_bps(bps: u32) -> ValidationResult<()> {
    if bps > MAX_MARGIN_BPS {
        return Err(ValidationError::OutOfRange {
            field: "margin".to_string(),
            min: 0,
            max: MAX_MARGIN_BPS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Cart Validators
// =============================================================================

/// Validates a full set of sale lines before registration.
///
/// ## Rules
/// - Cart must not be empty
/// - At most MAX_SALE_LINES lines
/// - Every line: positive quantity within range, non-negative unit price
pub fn validate_sale_lines(lines: &[SaleLine]) -> ValidationResult<()> {
    if lines.is_empty() {
        return Err(ValidationError::Required {
            field: "line items".to_string(),
        });
    }

    if lines.len() > MAX_SALE_LINES {
        return Err(ValidationError::OutOfRange {
            field: "line items".to_string(),
            min: 1,
            max: MAX_SALE_LINES as i64,
        });
    }

    for line in lines {
        validate_quantity(line.quantity)?;
        validate_price_cents(line.unit_price_cents)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_code() {
        // Valid codes
        assert!(validate_code("HAM-200").is_ok());
        assert!(validate_code("ABC123").is_ok());
        assert!(validate_code("product_1").is_ok());

        // Invalid codes
        assert!(validate_code("").is_err());
        assert!(validate_code("   ").is_err());
        assert!(validate_code("has space").is_err());
        assert!(validate_code(&"A".repeat(100)).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Sliced Ham 200g").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_normalize_barcode() {
        assert_eq!(
            normalize_barcode(Some("7791234567890")),
            Some("7791234567890".to_string())
        );
        assert_eq!(
            normalize_barcode(Some("  779 ")),
            Some("779".to_string())
        );
        assert_eq!(normalize_barcode(Some("")), None);
        assert_eq!(normalize_barcode(Some("   ")), None);
        assert_eq!(normalize_barcode(None), None);
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(100).is_ok());
        assert!(validate_quantity(10_000).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(10_001).is_err());
    }

    #[test]
    fn test_validate_stock_count() {
        assert!(validate_stock_count(0).is_ok());
        assert!(validate_stock_count(500).is_ok());
        assert!(validate_stock_count(-1).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(1099).is_ok());
        assert!(validate_price_cents(MAX_PRICE_CENTS).is_ok());

        assert!(validate_price_cents(-100).is_err());
        assert!(validate_price_cents(MAX_PRICE_CENTS + 1).is_err());
        assert!(validate_price_cents(i64::MAX).is_err());
    }

    #[test]
    fn test_validate_margin_bps() {
        assert!(validate_margin_bps(0).is_ok());
        assert!(validate_margin_bps(6000).is_ok());
        assert!(validate_margin_bps(100_000).is_ok());
        assert!(validate_margin_bps(100_001).is_err());
    }

    #[test]
    fn test_validate_sale_lines() {
        let good = vec![SaleLine {
            product_id: 1,
            quantity: 2,
            unit_price_cents: 500,
        }];
        assert!(validate_sale_lines(&good).is_ok());

        // Empty cart
        assert!(validate_sale_lines(&[]).is_err());

        // Bad quantity inside
        let bad = vec![SaleLine {
            product_id: 1,
            quantity: 0,
            unit_price_cents: 500,
        }];
        assert!(validate_sale_lines(&bad).is_err());

        // Negative price inside
        let bad = vec![SaleLine {
            product_id: 1,
            quantity: 1,
            unit_price_cents: -500,
        }];
        assert!(validate_sale_lines(&bad).is_err());
    }

    #[test]
    fn test_largest_valid_line_cannot_overflow_subtotal() {
        // The two caps together bound quantity × price well inside i64,
        // so the biggest line that passes validation multiplies safely.
        let max_line = SaleLine {
            product_id: 1,
            quantity: MAX_LINE_QUANTITY,
            unit_price_cents: MAX_PRICE_CENTS,
        };
        assert!(validate_sale_lines(&[max_line.clone()]).is_ok());
        assert_eq!(max_line.subtotal_cents(), MAX_LINE_QUANTITY * MAX_PRICE_CENTS);

        // An absurd price is rejected here, before any subtotal math runs.
        let garbage = SaleLine {
            product_id: 1,
            quantity: MAX_LINE_QUANTITY,
            unit_price_cents: i64::MAX / 2,
        };
        assert!(validate_sale_lines(&[garbage]).is_err());
    }
}

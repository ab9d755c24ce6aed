//! Validation utilities for the Wood Workshop Management system
//!
//! Boundary validation for request inputs. All rules here are pure so the
//! error taxonomy can be tested without a database.

use rust_decimal::Decimal;

// ============================================================================
// Stock Ledger Validations
// ============================================================================

/// Validate a stock transaction quantity (must be strictly positive)
pub fn validate_transaction_quantity(quantity: Decimal) -> Result<(), &'static str> {
    if quantity <= Decimal::ZERO {
        return Err("Quantity must be positive");
    }
    Ok(())
}

/// Validate a minimum stock threshold (must be non-negative)
pub fn validate_min_stock(min_stock: Decimal) -> Result<(), &'static str> {
    if min_stock < Decimal::ZERO {
        return Err("Minimum stock cannot be negative");
    }
    Ok(())
}

/// Validate an initial material quantity (must be non-negative)
pub fn validate_initial_quantity(quantity: Decimal) -> Result<(), &'static str> {
    if quantity < Decimal::ZERO {
        return Err("Initial quantity cannot be negative");
    }
    Ok(())
}

// ============================================================================
// Order Validations
// ============================================================================

/// Validate an order item quantity (whole units, at least one)
pub fn validate_item_quantity(quantity: i32) -> Result<(), &'static str> {
    if quantity <= 0 {
        return Err("Item quantity must be at least 1");
    }
    Ok(())
}

/// Validate a product price (must be non-negative)
pub fn validate_price(price: Decimal) -> Result<(), &'static str> {
    if price < Decimal::ZERO {
        return Err("Price cannot be negative");
    }
    Ok(())
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate a short document/entity code (non-empty after trimming)
pub fn validate_code(code: &str) -> Result<(), &'static str> {
    if code.trim().is_empty() {
        return Err("Code cannot be empty");
    }
    Ok(())
}

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    Ok(())
}

/// Validate a worker's completed-product counter (must be non-negative)
pub fn validate_completed_products(count: i32) -> Result<(), &'static str> {
    if count < 0 {
        return Err("Completed products cannot be negative");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn zero_quantity_is_rejected() {
        assert!(validate_transaction_quantity(Decimal::ZERO).is_err());
    }

    #[test]
    fn negative_quantity_is_rejected() {
        assert!(validate_transaction_quantity(dec("-3")).is_err());
    }

    #[test]
    fn fractional_positive_quantity_is_accepted() {
        assert!(validate_transaction_quantity(dec("0.01")).is_ok());
    }

    #[test]
    fn item_quantity_must_be_at_least_one() {
        assert!(validate_item_quantity(0).is_err());
        assert!(validate_item_quantity(-2).is_err());
        assert!(validate_item_quantity(1).is_ok());
    }

    #[test]
    fn email_basic_rules() {
        assert!(validate_email("admin@example.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
    }
}

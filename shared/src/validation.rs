//! Validation utilities for inventory requests
//!
//! The backend runs these before touching the ledger. The client does not:
//! it forwards what the caller gave it and reports the backend's verdict.

use rust_decimal::Decimal;

// ============================================================================
// Transfer Validations
// ============================================================================

/// Validate a transfer quantity (zero is allowed)
pub fn validate_quantity(quantity: i64) -> Result<(), &'static str> {
    if quantity < 0 {
        return Err("Quantity cannot be negative");
    }
    Ok(())
}

/// Check whether `available` units cover a request for `requested`
pub fn has_sufficient_stock(available: i64, requested: i64) -> bool {
    available >= requested
}

// ============================================================================
// Catalog Validations
// ============================================================================

/// Validate an item title
pub fn validate_title(title: &str) -> Result<(), &'static str> {
    if title.trim().is_empty() {
        return Err("Title cannot be empty");
    }
    if title.chars().count() > 255 {
        return Err("Title must be at most 255 characters");
    }
    Ok(())
}

/// Validate a warehouse or store name
pub fn validate_location_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Name cannot be empty");
    }
    if name.chars().count() > 255 {
        return Err("Name must be at most 255 characters");
    }
    Ok(())
}

/// Validate a wholesale or retail price
pub fn validate_price(price: Decimal) -> Result<(), &'static str> {
    if price < Decimal::ZERO {
        return Err("Price cannot be negative");
    }
    Ok(())
}

// ============================================================================
// Account Validations
// ============================================================================

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

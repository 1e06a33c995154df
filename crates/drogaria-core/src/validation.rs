//! # Validation Module
//!
//! Input validation utilities for Drogaria POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI shell                                                    │
//! │  ├── Prompts, menu choices, price text → Money                         │
//! │  └── Immediate operator feedback                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Domain constructors (Customer::new, Drug::new, ...)          │
//! │  └── THIS MODULE: field rules                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Registries (drogaria-store)                                  │
//! │  └── Duplicate natural keys, per the configured policy                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted CPF text (formatted CPF is 14 characters).
pub const MAX_CPF_LEN: usize = 32;

/// Longest accepted name for any entity.
pub const MAX_NAME_LEN: usize = 200;

/// Highest accepted unit price: R$1,000,000.00.
///
/// Keeps every cart subtotal and daily revenue sum far inside `i64`
/// centavos.
pub const MAX_PRICE: Money = Money::from_cents(100_000_000);

/// Validates a customer taxpayer ID (CPF).
///
/// ## Rules
/// - Must not be empty
/// - At most 32 characters
///
/// The check digits are NOT verified; the counter accepts any
/// identifier the customer presents.
///
/// ## Example
/// ```rust
/// use drogaria_core::validation::validate_cpf;
///
/// assert!(validate_cpf("123.456.789-09").is_ok());
/// assert!(validate_cpf("").is_err());
/// ```
pub fn validate_cpf(cpf: &str) -> ValidationResult<()> {
    let cpf = cpf.trim();

    if cpf.is_empty() {
        return Err(ValidationError::required("customer id"));
    }

    if cpf.chars().count() > MAX_CPF_LEN {
        return Err(ValidationError::TooLong {
            field: "customer id".to_string(),
            max: MAX_CPF_LEN,
        });
    }

    Ok(())
}

/// Validates a display name (customer, drug or laboratory).
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required(field));
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free samples)
/// - At most [`MAX_PRICE`]
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() || price > MAX_PRICE {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE.cents(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_cpf() {
        assert!(validate_cpf("123.456.789-09").is_ok());
        assert!(validate_cpf("1").is_ok());
        assert!(validate_cpf("").is_err());
        assert!(validate_cpf("   ").is_err());
        assert!(validate_cpf(&"9".repeat(40)).is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("drug name", "Dipirona 500mg").is_ok());
        assert!(validate_name("drug name", "").is_err());
        assert!(validate_name("drug name", &"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_cents(1099)).is_ok());
        assert!(validate_price(Money::from_cents(-100)).is_err());
        assert!(validate_price(MAX_PRICE).is_ok());
    }

    #[test]
    fn test_validate_price_rejects_above_cap() {
        let over = Money::from_cents(MAX_PRICE.cents() + 1);
        assert!(matches!(
            validate_price(over),
            Err(ValidationError::OutOfRange { max: 100_000_000, .. })
        ));

        let huge: Money = "92233720368547758.07".parse().unwrap();
        assert!(validate_price(huge).is_err());
    }
}

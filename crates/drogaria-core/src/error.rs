//! # Error Types
//!
//! Domain-specific error types for drogaria-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  drogaria-core errors (this file)                                      │
//! │  ├── CoreError        - Lookup failures, rule violations               │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  drogaria-store errors (separate crate)                                │
//! │  └── StoreError       - Lock and export failures, wraps CoreError      │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the operator sees (code + message)        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → CliError → Console   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error here is local and recoverable: the caller re-prompts or
//! aborts the current operation, the session keeps running.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No registered customer carries this identifier.
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// No registered drug carries this name (exact, case-sensitive).
    #[error("Drug not found: {0}")]
    DrugNotFound(String),

    /// No registered laboratory carries this name.
    #[error("Laboratory not found: {0}")]
    LaboratoryNotFound(String),

    /// Drug category outside `chemotherapy` / `herbal`.
    ///
    /// ## When This Occurs
    /// - Registering a drug with a free-text category nobody recognises
    ///
    /// Registration is rejected before anything is stored.
    #[error("Invalid drug category '{0}': expected chemotherapy or herbal")]
    InvalidCategory(String),

    /// Birth date text does not match `dd/mm/yyyy`.
    ///
    /// ## When This Occurs
    /// ```text
    /// register_customer("123", "Ana", "1990-05-17")
    ///      │
    ///      ▼
    /// parse "%d/%m/%Y" fails
    ///      │
    ///      ▼
    /// DateParse { input: "1990-05-17" }  (nothing registered)
    /// ```
    #[error("Invalid birth date '{input}': use the format dd/mm/yyyy")]
    DateParse { input: String },

    /// Tried to record a sale with no items.
    #[error("Cart is empty, nothing to sell")]
    EmptyCart,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when input doesn't meet requirements.
/// Used for early validation before anything reaches a registry.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. malformed price text).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate natural key (e.g. a customer ID already registered).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::Required`].
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Shorthand for [`ValidationError::Duplicate`].
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        ValidationError::Duplicate {
            field: field.into(),
            value: value.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

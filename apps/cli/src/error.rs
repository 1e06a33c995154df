//! # CLI Error Types
//!
//! What the operator sees when something goes wrong.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Shell                              │
//! │                                                                         │
//! │  Menu action                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Pharmacy call ─── CoreError::DrugNotFound("Dipirona") ──┐            │
//! │       │                                                   │            │
//! │       ▼                                                   ▼            │
//! │  Export ─────────── StoreError::ExportIo { .. } ──────► CliError      │
//! │                                                           │            │
//! │                                                           ▼            │
//! │                            "[NOT_FOUND] Drug not found: Dipirona"      │
//! │                            printed, shell re-prompts                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every CliError is recoverable inside the shell loop. Only config and
//! stdout failures end the process.

use std::fmt;

use drogaria_core::{CoreError, ValidationError};
use drogaria_store::StoreError;
use thiserror::Error;

/// Error shown to the operator: a code plus a human message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("[{code}] {message}")]
pub struct CliError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for operator-facing failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Customer, drug or laboratory not registered
    NotFound,

    /// Field failed validation
    ValidationError,

    /// Duplicate business key
    Duplicate,

    /// Birth date not dd/mm/yyyy
    InvalidDate,

    /// Drug category not chemotherapy/herbal
    InvalidCategory,

    /// Menu choice out of range
    InvalidMenuSelection,

    /// Business rule refused the operation
    BusinessLogic,

    /// Export file could not be written
    ExportFailed,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::Duplicate => "DUPLICATE",
            ErrorCode::InvalidDate => "INVALID_DATE",
            ErrorCode::InvalidCategory => "INVALID_CATEGORY",
            ErrorCode::InvalidMenuSelection => "INVALID_MENU_SELECTION",
            ErrorCode::BusinessLogic => "BUSINESS_LOGIC",
            ErrorCode::ExportFailed => "EXPORT_FAILED",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CliError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    /// Creates an invalid-menu-selection error for `input`.
    pub fn invalid_selection(input: &str) -> Self {
        CliError::new(
            ErrorCode::InvalidMenuSelection,
            format!("Invalid option '{}'", input.trim()),
        )
    }
}

/// Converts core errors to operator errors.
impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::CustomerNotFound(_)
            | CoreError::DrugNotFound(_)
            | CoreError::LaboratoryNotFound(_) => ErrorCode::NotFound,
            CoreError::InvalidCategory(_) => ErrorCode::InvalidCategory,
            CoreError::DateParse { .. } => ErrorCode::InvalidDate,
            CoreError::EmptyCart => ErrorCode::BusinessLogic,
            CoreError::Validation(ValidationError::Duplicate { .. }) => ErrorCode::Duplicate,
            CoreError::Validation(_) => ErrorCode::ValidationError,
        };
        CliError::new(code, err.to_string())
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::from(CoreError::from(err))
    }
}

/// Converts store errors to operator errors.
impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Core(e) => e.into(),
            StoreError::ExportIo { .. } | StoreError::Csv(_) => {
                tracing::error!(error = %err, "Customer export failed");
                CliError::new(ErrorCode::ExportFailed, err.to_string())
            }
        }
    }
}

/// Result type for shell actions.
pub type CliResult<T> = Result<T, CliError>;

// =============================================================================
// Configuration errors
// =============================================================================

/// Failures loading `drogaria.toml`. These end the process before the
/// shell starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to write config file: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_mapping() {
        let err: CliError = CoreError::DrugNotFound("Dipirona".into()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.to_string(), "[NOT_FOUND] Drug not found: Dipirona");
    }

    #[test]
    fn test_duplicate_gets_its_own_code() {
        let err: CliError = ValidationError::duplicate("cpf", "123").into();
        assert_eq!(err.code, ErrorCode::Duplicate);
    }

    #[test]
    fn test_date_and_category_codes() {
        let date: CliError = CoreError::DateParse {
            input: "1990-01-01".into(),
        }
        .into();
        assert_eq!(date.code, ErrorCode::InvalidDate);

        let category: CliError = CoreError::InvalidCategory("genérico".into()).into();
        assert_eq!(category.code, ErrorCode::InvalidCategory);
    }

    #[test]
    fn test_export_failure_mapping() {
        let err: CliError = StoreError::export_io(
            "/x/clientes.csv",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        )
        .into();
        assert_eq!(err.code, ErrorCode::ExportFailed);
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(
            ErrorCode::InvalidMenuSelection.to_string(),
            "INVALID_MENU_SELECTION"
        );
        assert_eq!(
            CliError::invalid_selection(" 9 ").to_string(),
            "[INVALID_MENU_SELECTION] Invalid option '9'"
        );
    }
}

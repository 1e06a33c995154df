//! # Store Error Types
//!
//! Error types for registry and export operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  CoreError (lookup, validation, duplicate key)                         │
//! │  io::Error / csv::Error (export)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the path being written                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CliError (in app) ← Code + message for the operator                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use drogaria_core::CoreError;
use thiserror::Error;

/// Store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Domain error bubbling up from a registry operation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Export file could not be created or written.
    ///
    /// ## When This Occurs
    /// - Parent directory missing or read-only
    /// - Disk full
    #[error("Failed to write export file {path}: {source}")]
    ExportIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV serialization failed.
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),
}

impl StoreError {
    /// Creates an ExportIo error for `path`.
    pub fn export_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::ExportIo {
            path: path.into(),
            source,
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_pass_through_unchanged() {
        let err: StoreError = CoreError::CustomerNotFound("42".into()).into();
        assert_eq!(err.to_string(), "Customer not found: 42");
    }

    #[test]
    fn test_export_io_message_names_the_path() {
        let err = StoreError::export_io(
            "/nope/clientes.csv",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory"),
        );
        assert_eq!(
            err.to_string(),
            "Failed to write export file /nope/clientes.csv: no such directory"
        );
    }
}

//! # Drogaria POS Console Application
//!
//! Wires configuration, logging, the [`Pharmacy`] facade and the menu
//! [`Shell`](shell::Shell) together.
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        drogaria (binary)                                │
//! │                                                                         │
//! │  main.rs ────► parses flags, installs tracing, loads AppConfig         │
//! │                                                                         │
//! │  lib.rs ─────► run_session: Pharmacy + Shell over stdin/stdout,        │
//! │                then the customer export                                 │
//! │                                                                         │
//! │  shell.rs ───► menus, prompts, printing                                │
//! │                                                                         │
//! │  config.rs ──► drogaria.toml + DROGARIA_* overrides                    │
//! │                                                                         │
//! │  error.rs ───► CliError { code, message } for the operator             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Session Sequence
//! 1. Initialize tracing (stderr)
//! 2. Load configuration
//! 3. Open an empty Pharmacy with the configured policies
//! 4. Run the shell until Exit or end of input
//! 5. Export customers to CSV (unless disabled)

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod shell;

use std::io::{self, BufRead, Write};

use drogaria_store::Pharmacy;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::error::CliResult;
use crate::shell::Shell;

/// Default filter when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "info,drogaria=debug";

/// Result of one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub customers: usize,
    pub sales: usize,
    /// Rows written to the customer CSV, if the export ran.
    pub exported: Option<usize>,
}

/// Runs a full session over `input`/`output` and exports customers at the end.
///
/// A failed export does not lose the session: it is reported as `Err`
/// after the shell has finished cleanly.
pub fn run_session<R: BufRead, W: Write>(
    config: &AppConfig,
    input: R,
    output: W,
) -> io::Result<(Pharmacy, CliResult<SessionSummary>)> {
    let pharmacy = Pharmacy::new(config.pharmacy_config());
    Shell::new(&pharmacy, config, input, output).run()?;

    let summary = export_at_exit(&pharmacy, config);
    Ok((pharmacy, summary))
}

/// Writes the customer CSV if export is enabled.
pub fn export_at_exit(pharmacy: &Pharmacy, config: &AppConfig) -> CliResult<SessionSummary> {
    let exported = if config.export.enabled {
        Some(pharmacy.export_customers(&config.export.path)?)
    } else {
        info!("Customer export disabled");
        None
    };

    Ok(SessionSummary {
        customers: pharmacy.customers().len(),
        sales: pharmacy.total_sales_count(),
        exported,
    })
}

/// Initializes the tracing subscriber, writing to stderr.
///
/// ## Log Levels
/// - `RUST_LOG` wins when set
/// - otherwise `info,drogaria=debug`, or everything at debug/trace with `-v`/`-vv`
pub fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbosity {
        0 => EnvFilter::new(DEFAULT_LOG_FILTER),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

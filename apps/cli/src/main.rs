//! # drogaria
//!
//! Console point-of-sale for a small pharmacy.
//!
//! ```text
//! drogaria [--config drogaria.toml] [--export clientes.csv | --no-export] [-v]
//! ```

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use drogaria_cli::config::AppConfig;
use drogaria_cli::{init_tracing, run_session};

#[derive(Debug, Parser)]
#[command(name = "drogaria", version, about = "Pharmacy point-of-sale console")]
struct Args {
    /// Config file (default: drogaria.toml in the platform config dir)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Where to write the customer CSV at exit
    #[arg(long, value_name = "FILE", conflicts_with = "no_export")]
    export: Option<PathBuf>,

    /// Skip the customer CSV at exit
    #[arg(long)]
    no_export: bool,

    /// More logging on stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = AppConfig::load(args.config.as_deref()).context("loading configuration")?;
    if let Some(path) = args.export {
        config.export.path = path;
    }
    if args.no_export {
        config.export.enabled = false;
    }
    info!(store = %config.store.name, "Starting session");

    let stdin = io::stdin();
    let (_, summary) = run_session(&config, stdin.lock(), io::stdout().lock())
        .context("terminal I/O failed")?;

    match summary {
        Ok(summary) => {
            info!(
                customers = summary.customers,
                sales = summary.sales,
                exported = ?summary.exported,
                "Session closed"
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!(code = %e.code, "Session closed with errors");
            eprintln!("{}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

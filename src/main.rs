use anyhow::Result;
use clap::Parser;
use log::{error, info};
use std::path::PathBuf;

use expense_tracker::cli;
use expense_tracker::domain::ExpenseService;
use expense_tracker::storage::csv::connection::DEFAULT_LEDGER_FILE;
use expense_tracker::storage::CsvConnection;

/// Personal expense tracker with CSV persistence.
#[derive(Parser)]
#[command(name = "expense-tracker", version, about)]
struct Args {
    /// Path of the ledger file.
    #[arg(short, long, default_value = DEFAULT_LEDGER_FILE)]
    file: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    info!("starting expense tracker with ledger '{}'", args.file.display());

    let connection = CsvConnection::new(&args.file);
    let mut service = ExpenseService::new(&connection)?;

    let result = cli::menu::run(&mut service);

    // Final save on every exit path, normal or not. Every mutation already
    // persisted, so this only matters if a save failed mid-session.
    if let Err(err) = service.flush() {
        error!("could not save ledger on exit: {err:#}");
    }
    result
}

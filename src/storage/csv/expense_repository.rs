//! CSV-based expense repository.
//!
//! The ledger is always handled whole: loads read every line, saves
//! truncate and rewrite the entire file. A malformed line never aborts a
//! load; it is recorded as a diagnostic and the loop moves on.

use anyhow::Result;
use log::{debug, info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use super::codec;
use super::connection::CsvConnection;
use crate::domain::models::Expense;
use crate::storage::traits::{ExpenseStorage, LineDiagnostic, LoadOutcome};

/// CSV-backed implementation of [`ExpenseStorage`].
#[derive(Clone)]
pub struct ExpenseRepository {
    connection: CsvConnection,
}

impl ExpenseRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Line-by-line lenient read shared by the primary load and the
    /// merge-import path.
    fn read_lines(path: &Path) -> Result<LoadOutcome> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut outcome = LoadOutcome::default();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_number = index + 1;

            // Some producers omit the header; only a first line that
            // actually matches it is discarded.
            if line_number == 1 && codec::is_ledger_header(&line) {
                debug!("found ledger header in '{}'", path.display());
                continue;
            }
            if line.trim().is_empty() {
                continue;
            }

            match codec::parse_ledger_line(&line) {
                Ok(row) if row.amount <= 0.0 => {
                    debug!(
                        "dropping non-positive amount on line {} of '{}'",
                        line_number,
                        path.display()
                    );
                    outcome.skipped += 1;
                }
                Ok(row) => outcome.rows.push(row),
                Err(err) => {
                    warn!(
                        "skipping line {} of '{}': {} ({})",
                        line_number,
                        path.display(),
                        err,
                        line
                    );
                    outcome.diagnostics.push(LineDiagnostic {
                        line_number,
                        message: err.to_string(),
                        content: line,
                    });
                    outcome.skipped += 1;
                }
            }
        }

        Ok(outcome)
    }
}

impl ExpenseStorage for ExpenseRepository {
    fn load_ledger(&self) -> Result<LoadOutcome> {
        let path = self.connection.ledger_path();
        if !path.exists() {
            info!(
                "ledger '{}' not found, starting with an empty expense list",
                path.display()
            );
            return Ok(LoadOutcome::default());
        }
        Self::read_lines(path)
    }

    fn save_ledger(&self, expenses: &[Expense]) -> Result<()> {
        let path = self.connection.ledger_path();
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "{}", codec::LEDGER_HEADER)?;
        for expense in expenses {
            writeln!(writer, "{}", codec::format_ledger_line(expense))?;
        }
        writer.flush()?;

        debug!("saved {} expenses to '{}'", expenses.len(), path.display());
        Ok(())
    }

    fn read_file(&self, path: &Path) -> Result<LoadOutcome> {
        Self::read_lines(path)
    }

    fn ledger_path(&self) -> &Path {
        self.connection.ledger_path()
    }
}

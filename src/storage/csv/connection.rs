//! Ledger file location management.

use std::path::{Path, PathBuf};

use crate::storage::csv::expense_repository::ExpenseRepository;
use crate::storage::traits::Connection;

/// Default ledger file, relative to the working directory.
pub const DEFAULT_LEDGER_FILE: &str = "expenses.csv";

/// CsvConnection holds the path of the primary ledger file.
///
/// No file handle is kept open: every load and save opens and closes the
/// file on its own, so the connection is just a cheap, cloneable path.
#[derive(Debug, Clone)]
pub struct CsvConnection {
    ledger_path: PathBuf,
}

impl CsvConnection {
    /// Create a connection for the given ledger path. The file itself may
    /// not exist yet; the first save creates it.
    pub fn new<P: AsRef<Path>>(ledger_path: P) -> Self {
        Self {
            ledger_path: ledger_path.as_ref().to_path_buf(),
        }
    }

    /// Create a connection for the default ledger file in the working
    /// directory.
    pub fn new_default() -> Self {
        Self::new(DEFAULT_LEDGER_FILE)
    }

    pub fn ledger_path(&self) -> &Path {
        &self.ledger_path
    }
}

impl Connection for CsvConnection {
    type ExpenseRepository = ExpenseRepository;

    fn create_expense_repository(&self) -> Self::ExpenseRepository {
        ExpenseRepository::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_connection_points_at_expenses_csv() {
        let connection = CsvConnection::new_default();
        assert_eq!(connection.ledger_path(), Path::new("expenses.csv"));
    }
}

//! Test utilities for the CSV storage layer.
//!
//! Provides RAII-based cleanup: the temporary directory holding the test
//! ledger is removed when the environment is dropped, even if a test
//! panics.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::connection::CsvConnection;

/// Test environment with a ledger path inside a temporary directory.
pub struct TestEnvironment {
    pub connection: CsvConnection,
    pub ledger_path: PathBuf,
    _temp_dir: TempDir, // keep alive until drop
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let ledger_path = temp_dir.path().join("expenses.csv");
        let connection = CsvConnection::new(&ledger_path);
        Ok(Self {
            connection,
            ledger_path,
            _temp_dir: temp_dir,
        })
    }

    /// Seed the primary ledger with raw file content.
    pub fn write_ledger(&self, content: &str) -> Result<()> {
        fs::write(&self.ledger_path, content)?;
        Ok(())
    }

    /// Read the primary ledger back as raw text.
    pub fn read_ledger(&self) -> Result<String> {
        Ok(fs::read_to_string(&self.ledger_path)?)
    }

    /// Create a secondary file next to the ledger, for import tests.
    pub fn write_side_file(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.dir().join(name);
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Directory containing the test ledger.
    pub fn dir(&self) -> &Path {
        self._temp_dir.path()
    }
}

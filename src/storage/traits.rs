//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use anyhow::Result;
use std::path::Path;

use crate::domain::models::{Expense, NewExpense};

/// Outcome of reading a ledger file with the lenient line-by-line parser.
#[derive(Debug, Clone, Default)]
pub struct LoadOutcome {
    /// Rows that parsed cleanly and carry a positive amount, in file order.
    /// The file format does not store identifiers; the store assigns them.
    pub rows: Vec<NewExpense>,
    /// Lines dropped for malformed content or a non-positive amount.
    pub skipped: usize,
    /// One entry per malformed line. Non-positive amounts are dropped
    /// without a diagnostic.
    pub diagnostics: Vec<LineDiagnostic>,
}

/// A single line that failed to parse, with enough context for the
/// operator to find it in the file.
#[derive(Debug, Clone)]
pub struct LineDiagnostic {
    pub line_number: usize,
    pub message: String,
    pub content: String,
}

/// Trait defining the interface for expense persistence.
///
/// This abstracts away the storage implementation details, allowing the
/// domain layer to work with different backends (CSV files, databases,
/// in-memory fakes) without modification.
pub trait ExpenseStorage {
    /// Read the primary ledger. A missing file is a normal first run and
    /// yields an empty outcome, not an error.
    fn load_ledger(&self) -> Result<LoadOutcome>;

    /// Overwrite the primary ledger with the full record sequence.
    fn save_ledger(&self, expenses: &[Expense]) -> Result<()>;

    /// Read an arbitrary file with the same lenient parser. Unlike
    /// [`ExpenseStorage::load_ledger`], a missing file here is an error.
    fn read_file(&self, path: &Path) -> Result<LoadOutcome>;

    /// Path of the primary ledger file.
    fn ledger_path(&self) -> &Path;
}

/// Trait defining the interface for storage connections.
///
/// Provides factory methods for creating repositories, so the domain layer
/// can be constructed against any backend.
pub trait Connection: Clone {
    /// The type of [`ExpenseStorage`] this connection creates.
    type ExpenseRepository: ExpenseStorage;

    /// Create a new expense repository for this connection.
    fn create_expense_repository(&self) -> Self::ExpenseRepository;
}

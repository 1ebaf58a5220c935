//! Domain-level command and query types.
//!
//! These structs are used by the services inside the domain layer. The CLI
//! layer maps interactive input to these types; nothing here knows about
//! prompts or rendering.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::domain::models::{Expense, ExpenseDate};
use crate::storage::traits::LineDiagnostic;

/// Input for recording a new expense.
#[derive(Debug, Clone)]
pub struct AddExpenseCommand {
    pub amount: f64,
    pub category: String,
    pub description: String,
    /// Defaults to today when not given.
    pub date: Option<ExpenseDate>,
}

/// Input for editing an existing expense in place. The date is immutable
/// once a record exists; only these three fields can change.
#[derive(Debug, Clone)]
pub struct EditExpenseCommand {
    pub id: u64,
    pub amount: f64,
    pub category: String,
    pub description: String,
}

/// Query parameters for the monthly report.
#[derive(Debug, Clone, Copy)]
pub struct MonthlyReportQuery {
    pub month: u32,
    pub year: i32,
}

/// Result of a monthly report query.
#[derive(Debug, Clone)]
pub struct MonthlyReport {
    pub month: u32,
    pub year: i32,
    pub expenses: Vec<Expense>,
    pub total: f64,
    pub by_category: BTreeMap<String, f64>,
    /// Distinct (month, year) pairs present in the store; populated only
    /// when the query matched nothing, as a hint to the operator.
    pub available_months: Vec<(u32, i32)>,
}

/// Result of loading the primary ledger at startup.
#[derive(Debug, Clone, Default)]
pub struct LoadSummary {
    pub loaded: usize,
    pub skipped: usize,
    pub diagnostics: Vec<LineDiagnostic>,
}

/// Result of a merge-import.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub path: PathBuf,
    /// True when the requested path was the primary ledger itself and the
    /// store was reloaded from disk instead of merged.
    pub reloaded: bool,
    pub imported: usize,
    pub skipped: usize,
    pub diagnostics: Vec<LineDiagnostic>,
    /// Store size after the operation.
    pub total: usize,
}

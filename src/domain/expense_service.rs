//! Expense store: the in-memory record sequence and its persistence policy.
//!
//! The sequence is loaded once at construction and every successful
//! mutation immediately rewrites the whole ledger file, so store and file
//! are observably consistent at the end of each command. A failed save is
//! reported and the in-memory state remains the authoritative copy.

use anyhow::Result;
use log::{error, info};
use std::collections::BTreeMap;
use std::path::Path;

use crate::domain::commands::{
    AddExpenseCommand, EditExpenseCommand, ImportOutcome, LoadSummary, MonthlyReport,
    MonthlyReportQuery,
};
use crate::domain::models::{Expense, ExpenseDate, IdAllocator, NewExpense};
use crate::domain::reports;
use crate::storage::traits::{Connection, ExpenseStorage};

pub struct ExpenseService<C: Connection> {
    repository: C::ExpenseRepository,
    expenses: Vec<Expense>,
    allocator: IdAllocator,
    load_summary: LoadSummary,
}

impl<C: Connection> ExpenseService<C> {
    /// Build the store by loading the primary ledger. A missing ledger
    /// file starts an empty store; an unreadable one is an error.
    pub fn new(connection: &C) -> Result<Self> {
        let repository = connection.create_expense_repository();
        let outcome = repository.load_ledger()?;

        let mut service = Self {
            repository,
            expenses: Vec::new(),
            allocator: IdAllocator::new(),
            load_summary: LoadSummary {
                loaded: outcome.rows.len(),
                skipped: outcome.skipped,
                diagnostics: outcome.diagnostics,
            },
        };
        service.absorb(outcome.rows);

        info!(
            "loaded {} expenses from '{}' ({} lines skipped)",
            service.expenses.len(),
            service.repository.ledger_path().display(),
            service.load_summary.skipped
        );
        Ok(service)
    }

    /// What happened during the startup load, for operator reporting.
    pub fn load_summary(&self) -> &LoadSummary {
        &self.load_summary
    }

    pub fn ledger_path(&self) -> &Path {
        self.repository.ledger_path()
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn get(&self, id: u64) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    /// Append a new record with a freshly allocated id and rewrite the
    /// ledger. Always succeeds; a save failure is reported, not returned.
    pub fn add(&mut self, command: AddExpenseCommand) -> Expense {
        let expense = Expense {
            id: self.allocator.allocate(),
            amount: command.amount,
            category: command.category,
            description: command.description,
            date: command.date.unwrap_or_else(ExpenseDate::today),
        };
        self.expenses.push(expense.clone());
        self.persist();
        expense
    }

    /// Remove the record with the given id. Returns false when no record
    /// matches; the id is never handed out again either way.
    pub fn remove_by_id(&mut self, id: u64) -> bool {
        match self.expenses.iter().position(|e| e.id == id) {
            Some(index) => {
                self.expenses.remove(index);
                self.persist();
                true
            }
            None => false,
        }
    }

    /// Replace amount, category and description of the record with the
    /// given id, keeping its date. Returns the updated record, or None
    /// when the id is unknown.
    pub fn edit(&mut self, command: EditExpenseCommand) -> Option<Expense> {
        let expense = self.expenses.iter_mut().find(|e| e.id == command.id)?;
        expense.amount = command.amount;
        expense.category = command.category;
        expense.description = command.description;
        let updated = expense.clone();
        self.persist();
        Some(updated)
    }

    /// Merge records from another ledger file into the store.
    ///
    /// Imported rows get fresh ids; existing records are untouched. The
    /// primary ledger is rewritten once if anything was imported. Asking
    /// to import the primary ledger itself instead discards the in-memory
    /// sequence and reloads it from disk (reloaded rows also get fresh
    /// ids — identifiers only ever move forward).
    pub fn import_merge(&mut self, path: &Path) -> Result<ImportOutcome> {
        if path == self.repository.ledger_path() {
            let outcome = self.repository.load_ledger()?;
            self.expenses.clear();
            let row_count = self.absorb(outcome.rows);
            return Ok(ImportOutcome {
                path: path.to_path_buf(),
                reloaded: true,
                imported: row_count,
                skipped: outcome.skipped,
                diagnostics: outcome.diagnostics,
                total: self.expenses.len(),
            });
        }

        let outcome = self.repository.read_file(path)?;
        let imported = self.absorb(outcome.rows);
        if imported > 0 {
            self.persist();
        }
        info!(
            "imported {} expenses from '{}' ({} lines skipped)",
            imported,
            path.display(),
            outcome.skipped
        );
        Ok(ImportOutcome {
            path: path.to_path_buf(),
            reloaded: false,
            imported,
            skipped: outcome.skipped,
            diagnostics: outcome.diagnostics,
            total: self.expenses.len(),
        })
    }

    /// Write the current sequence out, reporting any failure to the
    /// caller. The CLI invokes this on every exit path.
    pub fn flush(&self) -> Result<()> {
        self.repository.save_ledger(&self.expenses)
    }

    // Query surface: thin delegation to the report folds.

    pub fn total(&self) -> f64 {
        reports::total(&self.expenses)
    }

    pub fn category_totals(&self) -> BTreeMap<String, f64> {
        reports::category_totals(&self.expenses)
    }

    pub fn search(&self, keyword: &str) -> Vec<&Expense> {
        reports::search(&self.expenses, keyword)
    }

    pub fn top_categories(&self, limit: usize) -> Vec<(String, f64)> {
        reports::top_categories(&self.expenses, limit)
    }

    pub fn categories(&self) -> Vec<String> {
        reports::categories(&self.expenses)
    }

    pub fn recent(&self, limit: usize) -> Vec<&Expense> {
        reports::recent(&self.expenses, limit)
    }

    pub fn monthly_report(&self, query: MonthlyReportQuery) -> MonthlyReport {
        let matched: Vec<Expense> =
            reports::monthly_expenses(&self.expenses, query.month, query.year)
                .into_iter()
                .cloned()
                .collect();
        let total = reports::total(&matched);
        let by_category = reports::category_totals(&matched);
        let available_months = if matched.is_empty() {
            reports::available_months(&self.expenses)
        } else {
            Vec::new()
        };
        MonthlyReport {
            month: query.month,
            year: query.year,
            expenses: matched,
            total,
            by_category,
            available_months,
        }
    }

    /// Give every row a fresh id and append it, preserving file order.
    /// Returns how many rows were absorbed.
    fn absorb(&mut self, rows: Vec<NewExpense>) -> usize {
        let count = rows.len();
        for row in rows {
            let id = self.allocator.allocate();
            self.expenses.push(Expense::from_new(id, row));
        }
        count
    }

    fn persist(&self) {
        if let Err(err) = self.repository.save_ledger(&self.expenses) {
            error!(
                "could not save ledger '{}': {:#}",
                self.repository.ledger_path().display(),
                err
            );
        }
    }
}

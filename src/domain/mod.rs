//! # Domain Module
//!
//! Contains all business logic for the expense tracker.
//!
//! This module encapsulates the core rules, entities, and services that
//! define how expenses are modeled, stored, and aggregated. It operates
//! independently of the CLI and of any specific storage mechanism.
//!
//! ## Module Organization
//!
//! - **expense_service**: the record store — id allocation, mutations,
//!   the rewrite-on-every-mutation persistence policy, merge-import
//! - **reports**: pure aggregate folds (totals, monthly views, search,
//!   top categories)
//! - **export_service**: spreadsheet-facing CSV export
//! - **commands**: command/query structs exchanged with the CLI layer
//! - **models**: the expense record, its date, and the id allocator
//!
//! ## Business Rules
//!
//! - Identifiers start at 1, are unique per store, and are never reused,
//!   even after removing the highest one
//! - Every successful mutation immediately rewrites the backing file
//! - Records with non-positive amounts are dropped at load time
//! - A record's date is fixed at creation; edits touch amount, category
//!   and description only

pub mod commands;
pub mod expense_service;
pub mod export_service;
pub mod models;
pub mod reports;

pub use commands::{
    AddExpenseCommand, EditExpenseCommand, ImportOutcome, LoadSummary, MonthlyReport,
    MonthlyReportQuery,
};
pub use expense_service::ExpenseService;
pub use export_service::{ExportOutcome, ExportRequest, ExportService};

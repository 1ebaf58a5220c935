//! Domain models for the expense tracker.

pub mod date;
pub mod expense;

pub use date::ExpenseDate;
pub use expense::{Expense, IdAllocator, NewExpense};

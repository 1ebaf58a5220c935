//! # CSV Storage Module
//!
//! File-based implementation of the storage traits: the ledger lives in a
//! single delimited text file that is read whole at startup and rewritten
//! whole after every mutation.
//!
//! ## File Format
//!
//! ```csv
//! Date,Category,Description,Amount
//! 03-07-2024,Food,Lunch,12.50
//! 04-07-2024,Transport,"Bus, return",3.20
//! ```
//!
//! The header is optional on read and matched case-insensitively; dates are
//! day-month-year; fields may be double-quoted to protect embedded commas.
//! Files produced by other tools are accepted line by line, with malformed
//! lines skipped rather than failing the whole load.

pub mod codec;
pub mod connection;
pub mod expense_repository;

#[cfg(test)]
pub mod test_utils;

pub use codec::FormatError;
pub use connection::CsvConnection;
pub use expense_repository::ExpenseRepository;

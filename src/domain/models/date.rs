//! Calendar date value attached to every expense.
//!
//! A date is a plain (day, month, year) triple. No calendar validity is
//! enforced: a hand-edited `31-02-2024` in the ledger loads and round-trips
//! unchanged. Ordering compares (year, month, day).

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExpenseDate {
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

impl ExpenseDate {
    pub fn new(day: u32, month: u32, year: i32) -> Self {
        Self { day, month, year }
    }

    /// Today's date in the local timezone, the default for new expenses.
    pub fn today() -> Self {
        let now = chrono::Local::now().date_naive();
        Self {
            day: now.day(),
            month: now.month(),
            year: now.year(),
        }
    }
}

impl Ord for ExpenseDate {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.year, self.month, self.day).cmp(&(other.year, other.month, other.day))
    }
}

impl PartialOrd for ExpenseDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ExpenseDate {
    /// Console rendering, `3/7/2024`. File serializations live in the CSV
    /// codec, not here.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.day, self.month, self.year)
    }
}

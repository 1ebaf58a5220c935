//! Domain model for an expense record.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::date::ExpenseDate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: u64,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub date: ExpenseDate,
}

/// Expense data that has not been assigned an identifier yet: user input,
/// or a row parsed from a ledger file (the file format carries no ids).
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub date: ExpenseDate,
}

impl Expense {
    pub fn from_new(id: u64, new: NewExpense) -> Self {
        Self {
            id,
            amount: new.amount,
            category: new.category,
            description: new.description,
            date: new.date,
        }
    }
}

impl fmt::Display for Expense {
    /// One-line console rendering used by every listing screen.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {} | Amount: {:.2} | Category: {} | Description: {} | Date: {}",
            self.id, self.amount, self.category, self.description, self.date
        )
    }
}

/// Allocates record identifiers for one store.
///
/// Identifiers start at 1 and only ever move forward: observing ids loaded
/// from disk advances the sequence past them, so freshly created records
/// never collide with loaded ones, and removing the record with the highest
/// id does not roll the sequence back.
#[derive(Debug, Clone, PartialEq)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Hand out the next identifier.
    pub fn allocate(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Account for an identifier that already exists in the store.
    pub fn observe(&mut self, id: u64) {
        if id >= self.next {
            self.next = id + 1;
        }
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocator_starts_at_one_and_is_monotonic() {
        let mut allocator = IdAllocator::new();
        assert_eq!(allocator.allocate(), 1);
        assert_eq!(allocator.allocate(), 2);
        assert_eq!(allocator.allocate(), 3);
    }

    #[test]
    fn observing_an_existing_id_advances_past_it() {
        let mut allocator = IdAllocator::new();
        allocator.observe(41);
        assert_eq!(allocator.allocate(), 42);

        // Observing a lower id never moves the sequence backwards.
        allocator.observe(7);
        assert_eq!(allocator.allocate(), 43);
    }

    #[test]
    fn display_line_matches_listing_format() {
        let expense = Expense {
            id: 3,
            amount: 12.5,
            category: "Food".to_string(),
            description: "Lunch".to_string(),
            date: ExpenseDate::new(3, 7, 2024),
        };
        assert_eq!(
            expense.to_string(),
            "ID: 3 | Amount: 12.50 | Category: Food | Description: Lunch | Date: 3/7/2024"
        );
    }
}

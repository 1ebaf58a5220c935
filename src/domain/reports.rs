//! Read-only aggregate views over the expense sequence.
//!
//! Everything here is a pure fold; no function mutates the store or
//! touches the filesystem.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::models::Expense;

/// Grand total across all records.
pub fn total(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|e| e.amount).sum()
}

/// Sum of amounts per category, ordered by category name.
pub fn category_totals(expenses: &[Expense]) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for expense in expenses {
        *totals.entry(expense.category.clone()).or_insert(0.0) += expense.amount;
    }
    totals
}

/// Records falling in the given month and year, in store order.
pub fn monthly_expenses(expenses: &[Expense], month: u32, year: i32) -> Vec<&Expense> {
    expenses
        .iter()
        .filter(|e| e.date.month == month && e.date.year == year)
        .collect()
}

/// Distinct (month, year) pairs present in the store, sorted.
pub fn available_months(expenses: &[Expense]) -> Vec<(u32, i32)> {
    let months: BTreeSet<(u32, i32)> = expenses
        .iter()
        .map(|e| (e.date.month, e.date.year))
        .collect();
    months.into_iter().collect()
}

/// Records whose category or description contains the keyword.
pub fn search<'a>(expenses: &'a [Expense], keyword: &str) -> Vec<&'a Expense> {
    expenses
        .iter()
        .filter(|e| e.category.contains(keyword) || e.description.contains(keyword))
        .collect()
}

/// Top `limit` categories by total spend, descending. Ties are broken by
/// category name ascending so the ranking is stable across runs.
pub fn top_categories(expenses: &[Expense], limit: usize) -> Vec<(String, f64)> {
    let mut ranked: Vec<(String, f64)> = category_totals(expenses).into_iter().collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    ranked.truncate(limit);
    ranked
}

/// Distinct category names, sorted.
pub fn categories(expenses: &[Expense]) -> Vec<String> {
    let names: BTreeSet<String> = expenses.iter().map(|e| e.category.clone()).collect();
    names.into_iter().collect()
}

/// The `limit` most recently created records (highest ids first).
pub fn recent(expenses: &[Expense], limit: usize) -> Vec<&Expense> {
    let mut by_id: Vec<&Expense> = expenses.iter().collect();
    by_id.sort_by(|a, b| b.id.cmp(&a.id));
    by_id.truncate(limit);
    by_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ExpenseDate;

    fn expense(id: u64, amount: f64, category: &str, description: &str, date: ExpenseDate) -> Expense {
        Expense {
            id,
            amount,
            category: category.to_string(),
            description: description.to_string(),
            date,
        }
    }

    fn sample() -> Vec<Expense> {
        vec![
            expense(1, 30.0, "Food", "Groceries", ExpenseDate::new(3, 7, 2024)),
            expense(2, 50.0, "Transport", "Fuel", ExpenseDate::new(10, 7, 2024)),
            expense(3, 10.0, "Other", "Stamps", ExpenseDate::new(2, 8, 2024)),
        ]
    }

    #[test]
    fn total_sums_all_amounts() {
        assert_eq!(total(&sample()), 90.0);
    }

    #[test]
    fn category_totals_accumulate_per_name() {
        let mut expenses = sample();
        expenses.push(expense(4, 5.0, "Food", "Snack", ExpenseDate::new(4, 7, 2024)));

        let totals = category_totals(&expenses);
        assert_eq!(totals["Food"], 35.0);
        assert_eq!(totals["Transport"], 50.0);
        assert_eq!(totals["Other"], 10.0);
    }

    #[test]
    fn monthly_filter_matches_month_and_year() {
        let expenses = sample();
        let july = monthly_expenses(&expenses, 7, 2024);
        assert_eq!(july.len(), 2);
        assert!(july.iter().all(|e| e.date.month == 7));

        assert!(monthly_expenses(&expenses, 1, 2020).is_empty());
    }

    #[test]
    fn available_months_are_distinct_and_sorted() {
        let expenses = sample();
        assert_eq!(available_months(&expenses), vec![(7, 2024), (8, 2024)]);
    }

    #[test]
    fn search_matches_category_or_description() {
        let expenses = sample();
        assert_eq!(search(&expenses, "Food").len(), 1);
        assert_eq!(search(&expenses, "Stamps").len(), 1);
        assert!(search(&expenses, "missing").is_empty());
    }

    #[test]
    fn top_categories_rank_descending() {
        let ranked = top_categories(&sample(), 2);
        assert_eq!(
            ranked,
            vec![("Transport".to_string(), 50.0), ("Food".to_string(), 30.0)]
        );
    }

    #[test]
    fn top_category_ties_break_by_name() {
        let expenses = vec![
            expense(1, 20.0, "Zoo", "Tickets", ExpenseDate::new(1, 1, 2024)),
            expense(2, 20.0, "Aquarium", "Tickets", ExpenseDate::new(2, 1, 2024)),
        ];
        let ranked = top_categories(&expenses, 2);
        assert_eq!(ranked[0].0, "Aquarium");
        assert_eq!(ranked[1].0, "Zoo");
    }

    #[test]
    fn recent_returns_highest_ids_first() {
        let expenses = sample();
        let recent_two = recent(&expenses, 2);
        assert_eq!(recent_two[0].id, 3);
        assert_eq!(recent_two[1].id, 2);
    }
}

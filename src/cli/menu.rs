//! Interactive menu loop.
//!
//! One command per iteration; every screen reads its own input through the
//! prompt helpers and renders with plain `println!`. All state changes go
//! through the domain service, which persists after each mutation, so the
//! loop itself holds no data.

use anyhow::Result;
use std::io;
use std::path::Path;

use crate::cli::prompts;
use crate::domain::commands::{AddExpenseCommand, EditExpenseCommand, MonthlyReportQuery};
use crate::domain::models::Expense;
use crate::domain::{ExpenseService, ExportRequest, ExportService};
use crate::storage::traits::Connection;

const RECENT_LIMIT: usize = 10;
const DEFAULT_TOP_CATEGORIES: usize = 5;

/// Run the menu until the operator exits or input ends.
pub fn run<C: Connection>(service: &mut ExpenseService<C>) -> Result<()> {
    println!("Welcome to Personal Expense Tracker!");
    report_startup(service);

    loop {
        print_menu();
        let choice = match prompts::read_line("Choose an option: ") {
            Ok(line) => line,
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(err) => return Err(err.into()),
        };
        let choice: u32 = match choice.parse() {
            Ok(value) => value,
            Err(_) => {
                println!("Invalid input. Please enter a number.");
                continue;
            }
        };

        match choice {
            1 => add_expense(service)?,
            2 => view_all(service),
            3 => view_by_category(service),
            4 => edit_interactive(service)?,
            5 => remove_interactive(service)?,
            6 => search(service)?,
            7 => monthly_report(service)?,
            8 => top_categories(service)?,
            9 => import(service)?,
            10 => export(service)?,
            11 => {
                println!("Thank you for using Personal Expense Tracker!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
    Ok(())
}

fn report_startup<C: Connection>(service: &ExpenseService<C>) {
    let summary = service.load_summary();
    for diagnostic in &summary.diagnostics {
        println!(
            "Error parsing line {}: {} ({})",
            diagnostic.line_number, diagnostic.message, diagnostic.content
        );
    }
    println!(
        "Loaded {} expenses from '{}'",
        summary.loaded,
        service.ledger_path().display()
    );
}

fn print_menu() {
    println!("\n=== PERSONAL EXPENSE TRACKER ===");
    println!("1. Add Expense");
    println!("2. View All Expenses");
    println!("3. View Expenses by Category");
    println!("4. Edit Expense (Smart Search)");
    println!("5. Remove Expense (Smart Search)");
    println!("6. Search Expenses");
    println!("7. Monthly Report");
    println!("8. Top Spending Categories");
    println!("9. Import from Another CSV");
    println!("10. Export to CSV");
    println!("11. Exit");
}

fn add_expense<C: Connection>(service: &mut ExpenseService<C>) -> Result<()> {
    let amount = prompts::prompt_parse::<f64>("Enter amount: ")?;
    let category = prompts::read_line("Enter category: ")?;
    let description = prompts::read_line("Enter description: ")?;

    service.add(AddExpenseCommand {
        amount,
        category,
        description,
        date: None, // today
    });
    println!("Expense added successfully!");
    Ok(())
}

fn view_all<C: Connection>(service: &ExpenseService<C>) {
    if service.is_empty() {
        println!("No expenses recorded.");
        return;
    }

    println!("\n=== ALL EXPENSES ===");
    for expense in service.expenses() {
        println!("{expense}");
    }
    println!("\nTotal Expenses: {:.2}", service.total());
}

fn view_by_category<C: Connection>(service: &ExpenseService<C>) {
    if service.is_empty() {
        println!("No expenses recorded.");
        return;
    }

    println!("\n=== EXPENSES BY CATEGORY ===");
    for (category, total) in service.category_totals() {
        println!("{category}: {total:.2}");
    }
}

fn search<C: Connection>(service: &ExpenseService<C>) -> Result<()> {
    let keyword = prompts::read_line("Enter search keyword: ")?;
    let results = service.search(&keyword);

    if results.is_empty() {
        println!("No expenses found containing '{keyword}'");
        return Ok(());
    }

    println!("\n=== SEARCH RESULTS for '{keyword}' ===");
    for expense in results {
        println!("{expense}");
    }
    Ok(())
}

fn monthly_report<C: Connection>(service: &ExpenseService<C>) -> Result<()> {
    let month = prompts::prompt_parse::<u32>("Enter month (1-12): ")?;
    let year = prompts::prompt_parse::<i32>("Enter year: ")?;

    let report = service.monthly_report(MonthlyReportQuery { month, year });
    if report.expenses.is_empty() {
        println!("No expenses found for {month}/{year}");
        println!("Available months/years in data:");
        for (m, y) in report.available_months {
            println!("  {m}/{y}");
        }
        return Ok(());
    }

    println!("\n=== MONTHLY REPORT ({month}/{year}) ===");
    for expense in &report.expenses {
        println!("{expense}");
    }
    println!("\nTotal for {month}/{year}: {:.2}", report.total);
    println!("\nCategory Breakdown:");
    for (category, total) in &report.by_category {
        println!("  {category}: {total:.2}");
    }
    Ok(())
}

fn top_categories<C: Connection>(service: &ExpenseService<C>) -> Result<()> {
    let limit = prompts::prompt_parse_or::<usize>(
        "How many top categories to show (default 5): ",
        DEFAULT_TOP_CATEGORIES,
    )?;
    let limit = if limit == 0 { DEFAULT_TOP_CATEGORIES } else { limit };

    println!("\n=== TOP {limit} SPENDING CATEGORIES ===");
    for (rank, (category, total)) in service.top_categories(limit).iter().enumerate() {
        println!("{}. {category}: {total:.2}", rank + 1);
    }
    Ok(())
}

fn import<C: Connection>(service: &mut ExpenseService<C>) -> Result<()> {
    let filename = prompts::read_line("Enter CSV filename to import (e.g., expenses.csv): ")?;

    match service.import_merge(Path::new(&filename)) {
        Ok(outcome) if outcome.reloaded => {
            println!("Reloaded {} expenses from '{}'", outcome.total, filename);
        }
        Ok(outcome) => {
            for diagnostic in &outcome.diagnostics {
                println!(
                    "Error parsing line {}: {} ({})",
                    diagnostic.line_number, diagnostic.message, diagnostic.content
                );
            }
            println!(
                "Successfully imported {} additional expenses from '{}'",
                outcome.imported, filename
            );
            if outcome.imported > 0 {
                println!("Updated main CSV file with {} total expenses", outcome.total);
            }
        }
        Err(err) => println!("Error: Could not open file '{filename}' ({err})"),
    }
    Ok(())
}

fn export<C: Connection>(service: &ExpenseService<C>) -> Result<()> {
    let path = prompts::read_line("Enter export directory (empty for Documents): ")?;
    let request = ExportRequest {
        custom_path: if path.is_empty() { None } else { Some(path) },
    };

    match ExportService::new().export_to_path(request, service.expenses(), service.ledger_path()) {
        Ok(outcome) => println!(
            "Successfully exported {} expenses to '{}'",
            outcome.exported,
            outcome.file_path.display()
        ),
        Err(err) => println!("Error: export failed ({err})"),
    }
    Ok(())
}

// Edit and remove share the same four discovery modes: keyword search,
// recent browse, category browse, direct id.

fn edit_interactive<C: Connection>(service: &mut ExpenseService<C>) -> Result<()> {
    if service.is_empty() {
        println!("No expenses recorded.");
        return Ok(());
    }

    println!("\n=== FIND EXPENSE TO EDIT ===");
    match find_expense(service, "edit")? {
        Some(id) => edit_by_id(service, id),
        None => Ok(()),
    }
}

fn remove_interactive<C: Connection>(service: &mut ExpenseService<C>) -> Result<()> {
    if service.is_empty() {
        println!("No expenses recorded.");
        return Ok(());
    }

    println!("\n=== FIND EXPENSE TO REMOVE ===");
    match find_expense(service, "remove")? {
        Some(id) => {
            if prompts::confirm("\nAre you sure you want to remove this expense? (y/n): ")? {
                remove_by_id(service, id);
            } else {
                println!("Removal cancelled.");
            }
            Ok(())
        }
        None => Ok(()),
    }
}

/// Run one discovery mode and return the chosen record id, if any.
fn find_expense<C: Connection>(service: &ExpenseService<C>, action: &str) -> Result<Option<u64>> {
    println!("1. Search by keyword and select");
    println!("2. Browse recent expenses");
    println!("3. Browse by category");
    println!("4. Enter expense ID directly");
    let choice = prompts::prompt_parse::<u32>("Choose search method: ")?;

    match choice {
        1 => {
            let keyword = prompts::read_line("Enter search keyword (category or description): ")?;
            let matches = service.search(&keyword);
            if matches.is_empty() {
                println!("No expenses found containing '{keyword}'");
                return Ok(None);
            }
            select_from_list(&matches, action)
        }
        2 => {
            println!("\n=== RECENT EXPENSES ===");
            let recent = service.recent(RECENT_LIMIT);
            select_from_list(&recent, action)
        }
        3 => {
            let categories = service.categories();
            if categories.is_empty() {
                println!("No categories found.");
                return Ok(None);
            }

            println!("\n=== SELECT CATEGORY ===");
            for (index, category) in categories.iter().enumerate() {
                println!("{}. {category}", index + 1);
            }
            let choice = prompts::prompt_parse::<usize>("Choose category: ")?;
            if choice < 1 || choice > categories.len() {
                println!("Invalid choice.");
                return Ok(None);
            }

            let selected = &categories[choice - 1];
            let matches: Vec<_> = service
                .expenses()
                .iter()
                .filter(|e| &e.category == selected)
                .collect();
            select_from_list(&matches, action)
        }
        4 => {
            let id = prompts::prompt_parse::<u64>("Enter expense ID: ")?;
            Ok(Some(id))
        }
        _ => {
            println!("Invalid choice.");
            Ok(None)
        }
    }
}

/// Number a candidate list and let the operator pick one entry.
fn select_from_list(expenses: &[&Expense], action: &str) -> Result<Option<u64>> {
    if expenses.is_empty() {
        println!("No expenses to display.");
        return Ok(None);
    }

    println!("\n=== SELECT EXPENSE TO {} ===", action.to_uppercase());
    for (index, expense) in expenses.iter().enumerate() {
        println!("{}. {expense}", index + 1);
    }

    let prompt = format!("\nChoose expense to {} (1-{}): ", action, expenses.len());
    let choice = prompts::prompt_parse::<usize>(&prompt)?;
    if choice < 1 || choice > expenses.len() {
        println!("Invalid choice.");
        return Ok(None);
    }
    Ok(Some(expenses[choice - 1].id))
}

fn edit_by_id<C: Connection>(service: &mut ExpenseService<C>, id: u64) -> Result<()> {
    let current = match service.get(id) {
        Some(expense) => expense.clone(),
        None => {
            println!("Expense with ID {id} not found!");
            return Ok(());
        }
    };
    println!("\nCurrent expense: {current}\n");

    let amount = prompts::prompt_parse::<f64>(&format!(
        "Enter new amount (current: {:.2}): ",
        current.amount
    ))?;
    let category = prompts::read_line(&format!("Enter new category (current: {}): ", current.category))?;
    let description = prompts::read_line(&format!(
        "Enter new description (current: {}): ",
        current.description
    ))?;

    match service.edit(EditExpenseCommand {
        id,
        amount,
        category,
        description,
    }) {
        Some(_) => println!("Expense updated successfully!"),
        None => println!("Expense with ID {id} not found!"),
    }
    Ok(())
}

fn remove_by_id<C: Connection>(service: &mut ExpenseService<C>, id: u64) {
    if service.remove_by_id(id) {
        println!("Expense removed successfully!");
    } else {
        println!("Expense with ID {id} not found!");
    }
}

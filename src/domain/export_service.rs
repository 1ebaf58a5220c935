//! Export service domain logic for the expense tracker.
//!
//! Exports the full ledger as a spreadsheet-friendly CSV file, including
//! the record ids the ledger format itself does not carry. Export targets
//! third-party tools, so the output is written with standard CSV quoting;
//! it is not meant to be fed back through the lenient import path.

use anyhow::{anyhow, Result};
use log::{error, info};
use std::path::{Path, PathBuf};

use crate::domain::models::Expense;
use crate::storage::csv::codec;

/// Where an export should land.
#[derive(Debug, Clone, Default)]
pub struct ExportRequest {
    /// Target directory. Defaults to the user's Documents folder (or home
    /// directory) when empty.
    pub custom_path: Option<String>,
}

/// Result of a completed export.
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub file_path: PathBuf,
    pub exported: usize,
}

#[derive(Clone, Default)]
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    /// Write every record to a dated CSV file in the requested directory.
    ///
    /// Refuses to write over the primary ledger; that file has its own
    /// format and is managed by the store.
    pub fn export_to_path(
        &self,
        request: ExportRequest,
        expenses: &[Expense],
        ledger_path: &Path,
    ) -> Result<ExportOutcome> {
        let export_dir = match request.custom_path {
            Some(ref custom) if !custom.trim().is_empty() => {
                PathBuf::from(self.sanitize_path(custom))
            }
            _ => dirs::document_dir()
                .or_else(dirs::home_dir)
                .ok_or_else(|| anyhow!("could not determine a default export directory"))?,
        };

        let filename = format!(
            "expenses_export_{}.csv",
            chrono::Local::now().format("%Y%m%d")
        );
        let file_path = export_dir.join(&filename);

        if file_path == ledger_path {
            error!("refusing to export over the primary ledger '{}'", ledger_path.display());
            return Err(anyhow!(
                "'{}' is the primary ledger; choose another directory",
                ledger_path.display()
            ));
        }

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = csv::Writer::from_path(&file_path)?;
        writer.write_record(["id", "date", "category", "description", "amount"])?;
        for expense in expenses {
            writer.write_record([
                expense.id.to_string(),
                codec::format_ledger_date(&expense.date),
                expense.category.clone(),
                expense.description.clone(),
                format!("{:.2}", expense.amount),
            ])?;
        }
        writer.flush()?;

        info!(
            "exported {} expenses to '{}'",
            expenses.len(),
            file_path.display()
        );
        Ok(ExportOutcome {
            file_path,
            exported: expenses.len(),
        })
    }

    /// Basic cleanup of operator-typed paths: quotes, stray whitespace,
    /// escaped spaces, trailing separators, tilde expansion.
    fn sanitize_path(&self, path: &str) -> String {
        let mut cleaned = path.trim().to_string();

        if (cleaned.starts_with('"') && cleaned.ends_with('"') && cleaned.len() >= 2)
            || (cleaned.starts_with('\'') && cleaned.ends_with('\'') && cleaned.len() >= 2)
        {
            cleaned = cleaned[1..cleaned.len() - 1].to_string();
        }
        cleaned = cleaned.trim().replace("\\ ", " ");

        while cleaned.ends_with('/') || cleaned.ends_with('\\') {
            cleaned.pop();
        }

        if cleaned.starts_with('~') {
            if let Some(home) = dirs::home_dir() {
                if cleaned == "~" {
                    cleaned = home.to_string_lossy().to_string();
                } else if cleaned.starts_with("~/") {
                    cleaned = home.join(&cleaned[2..]).to_string_lossy().to_string();
                }
            }
        }

        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ExpenseDate;
    use tempfile::TempDir;

    fn expense(id: u64, amount: f64, category: &str, description: &str) -> Expense {
        Expense {
            id,
            amount,
            category: category.to_string(),
            description: description.to_string(),
            date: ExpenseDate::new(3, 7, 2024),
        }
    }

    #[test]
    fn sanitize_path_strips_quotes_and_trailing_separators() {
        let service = ExportService::new();
        assert_eq!(service.sanitize_path("  /tmp/exports/  "), "/tmp/exports");
        assert_eq!(service.sanitize_path("\"/tmp/exports\""), "/tmp/exports");
        assert_eq!(service.sanitize_path("/tmp/my\\ exports"), "/tmp/my exports");
    }

    #[test]
    fn export_writes_quoted_csv_with_ids() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let service = ExportService::new();

        let expenses = vec![
            expense(1, 12.5, "Food", "Lunch"),
            expense(2, 9.8, "Food", "Bread, milk"),
        ];
        let outcome = service.export_to_path(
            ExportRequest {
                custom_path: Some(temp_dir.path().to_string_lossy().to_string()),
            },
            &expenses,
            Path::new("expenses.csv"),
        )?;

        assert_eq!(outcome.exported, 2);
        let content = std::fs::read_to_string(&outcome.file_path)?;
        assert!(content.starts_with("id,date,category,description,amount\n"));
        assert!(content.contains("1,03-07-2024,Food,Lunch,12.50"));
        // The csv writer protects the embedded comma.
        assert!(content.contains("\"Bread, milk\""));
        Ok(())
    }

    #[test]
    fn export_refuses_the_primary_ledger_path() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let service = ExportService::new();

        let today = chrono::Local::now().format("%Y%m%d");
        let ledger = temp_dir.path().join(format!("expenses_export_{}.csv", today));
        let result = service.export_to_path(
            ExportRequest {
                custom_path: Some(temp_dir.path().to_string_lossy().to_string()),
            },
            &[],
            &ledger,
        );
        assert!(result.is_err());
        Ok(())
    }
}

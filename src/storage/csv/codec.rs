//! Line-level codecs for the two ledger formats.
//!
//! The tracker speaks two delimited formats:
//!
//! - **Ledger format** (what the tracker writes and re-reads, and what
//!   third-party files are expected to resemble): a
//!   `Date,Category,Description,Amount` header followed by
//!   `DD-MM-YYYY,<category>,<description>,<amount>` rows. Fields may be
//!   double-quoted; ids are not stored.
//! - **Record format** (full-fidelity single-line form of a record,
//!   including its id): `id,amount,category,description,day,month,year` —
//!   seven comma-separated tokens, since the date contributes three.
//!
//! Parsing here is the CSV layer's responsibility; domain models stay free
//! of any file-format knowledge. All parse failures surface as
//! [`FormatError`] so callers can skip a bad line and keep going.

use thiserror::Error;

use crate::domain::models::{Expense, ExpenseDate, NewExpense};

/// Header line written at the top of every ledger file. Matched
/// case-insensitively on read; some producers omit it entirely.
pub const LEDGER_HEADER: &str = "Date,Category,Description,Amount";

/// A single line or field that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("expected at least {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },
    #[error("invalid number '{0}'")]
    Number(String),
    #[error("invalid date '{0}'")]
    Date(String),
}

/// Does this line carry the ledger header?
pub fn is_ledger_header(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case(LEDGER_HEADER)
}

/// Split a line on commas that fall outside double-quote spans.
///
/// A `"` toggles quoted mode and is dropped from the field. There is no
/// escaped-quote handling: a doubled quote inside a quoted field toggles
/// twice and contributes nothing. Existing ledger files depend on this
/// exact acceptance behavior, so it must not grow RFC 4180 semantics.
pub fn split_quoted(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}

/// Format a date for a ledger row: zero-padded day and month, `03-07-2024`.
pub fn format_ledger_date(date: &ExpenseDate) -> String {
    format!("{:02}-{:02}-{}", date.day, date.month, date.year)
}

/// Parse a dash-separated ledger date.
///
/// Exactly three numeric tokens, taken as (day, month, year) no matter what
/// the file's header claims. No zero-padding requirement, no range check:
/// `3-7-2024` and `31-02-2024` both parse.
pub fn parse_ledger_date(text: &str) -> Result<ExpenseDate, FormatError> {
    let parts: Vec<&str> = text.split('-').collect();
    if parts.len() != 3 {
        return Err(FormatError::Date(text.to_string()));
    }
    date_from_tokens(&parts).ok_or_else(|| FormatError::Date(text.to_string()))
}

/// Format a date for the record format: unpadded, comma-joined, `3,7,2024`.
pub fn format_record_date(date: &ExpenseDate) -> String {
    format!("{},{},{}", date.day, date.month, date.year)
}

/// Parse a comma-separated record-format date: exactly three numeric
/// tokens in (day, month, year) order.
pub fn parse_record_date(text: &str) -> Result<ExpenseDate, FormatError> {
    let parts: Vec<&str> = text.split(',').collect();
    if parts.len() != 3 {
        return Err(FormatError::Date(text.to_string()));
    }
    date_from_tokens(&parts).ok_or_else(|| FormatError::Date(text.to_string()))
}

fn date_from_tokens(parts: &[&str]) -> Option<ExpenseDate> {
    let day = parts[0].trim().parse().ok()?;
    let month = parts[1].trim().parse().ok()?;
    let year = parts[2].trim().parse().ok()?;
    Some(ExpenseDate { day, month, year })
}

/// Format one ledger data row. Fields are written verbatim, amount with two
/// decimals.
pub fn format_ledger_line(expense: &Expense) -> String {
    format!(
        "{},{},{},{:.2}",
        format_ledger_date(&expense.date),
        expense.category,
        expense.description,
        expense.amount
    )
}

/// Parse one ledger data row with the quote-aware splitter.
///
/// Requires at least four fields: date, category, description, amount.
/// Extra fields are ignored. The returned row carries no id; the store
/// allocates one.
pub fn parse_ledger_line(line: &str) -> Result<NewExpense, FormatError> {
    let fields = split_quoted(line);
    if fields.len() < 4 {
        return Err(FormatError::FieldCount {
            expected: 4,
            found: fields.len(),
        });
    }

    let date = parse_ledger_date(&fields[0])?;
    let amount = fields[3]
        .trim()
        .parse::<f64>()
        .map_err(|_| FormatError::Number(fields[3].clone()))?;

    Ok(NewExpense {
        amount,
        category: fields[1].clone(),
        description: fields[2].clone(),
        date,
    })
}

/// Format a record in the full-fidelity record format.
pub fn format_record_line(expense: &Expense) -> String {
    format!(
        "{},{:.2},{},{},{}",
        expense.id,
        expense.amount,
        expense.category,
        expense.description,
        format_record_date(&expense.date)
    )
}

/// Parse a record-format line back into an [`Expense`].
///
/// Requires at least seven comma-separated tokens. The last three are the
/// date; everything between the category and the date is the description,
/// so descriptions containing commas survive a round trip. A short line is
/// a [`FormatError`], never a placeholder record.
pub fn parse_record_line(line: &str) -> Result<Expense, FormatError> {
    let tokens: Vec<&str> = line.split(',').collect();
    if tokens.len() < 7 {
        return Err(FormatError::FieldCount {
            expected: 7,
            found: tokens.len(),
        });
    }

    let id = tokens[0]
        .trim()
        .parse::<u64>()
        .map_err(|_| FormatError::Number(tokens[0].to_string()))?;
    let amount = tokens[1]
        .trim()
        .parse::<f64>()
        .map_err(|_| FormatError::Number(tokens[1].to_string()))?;

    let date_start = tokens.len() - 3;
    let date = date_from_tokens(&tokens[date_start..])
        .ok_or_else(|| FormatError::Date(tokens[date_start..].join(",")))?;

    Ok(Expense {
        id,
        amount,
        category: tokens[2].to_string(),
        description: tokens[3..date_start].join(","),
        date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(id: u64, amount: f64, category: &str, description: &str, date: ExpenseDate) -> Expense {
        Expense {
            id,
            amount,
            category: category.to_string(),
            description: description.to_string(),
            date,
        }
    }

    #[test]
    fn header_is_matched_case_insensitively() {
        assert!(is_ledger_header("Date,Category,Description,Amount"));
        assert!(is_ledger_header("date,category,description,amount"));
        assert!(is_ledger_header("  DATE,CATEGORY,DESCRIPTION,AMOUNT  "));
        assert!(!is_ledger_header("03-07-2024,Food,Lunch,12.50"));
    }

    #[test]
    fn ledger_date_round_trips_through_zero_padding() {
        let date = ExpenseDate::new(3, 7, 2024);
        let text = format_ledger_date(&date);
        assert_eq!(text, "03-07-2024");
        assert_eq!(parse_ledger_date(&text).unwrap(), date);
    }

    #[test]
    fn ledger_date_accepts_unpadded_and_invalid_calendar_values() {
        assert_eq!(parse_ledger_date("3-7-2024").unwrap(), ExpenseDate::new(3, 7, 2024));
        // No range validation on any field.
        assert_eq!(parse_ledger_date("31-02-2024").unwrap(), ExpenseDate::new(31, 2, 2024));
    }

    #[test]
    fn ledger_date_rejects_wrong_token_counts() {
        assert_eq!(parse_ledger_date("3-7").unwrap_err(), FormatError::Date("3-7".to_string()));
        assert!(parse_ledger_date("2024-07-03-extra").is_err());
        assert!(parse_ledger_date("a-b-c").is_err());
    }

    #[test]
    fn record_date_round_trips() {
        let date = ExpenseDate::new(3, 7, 2024);
        let text = format_record_date(&date);
        assert_eq!(text, "3,7,2024");
        assert_eq!(parse_record_date(&text).unwrap(), date);
    }

    #[test]
    fn record_date_with_missing_tokens_is_an_error() {
        assert!(parse_record_date("3,7").is_err());
        assert!(parse_record_date("").is_err());
    }

    #[test]
    fn splitter_respects_quoted_commas() {
        assert_eq!(
            split_quoted(r#"03-07-2024,"Food, drink",Lunch,12.50"#),
            vec!["03-07-2024", "Food, drink", "Lunch", "12.50"]
        );
    }

    #[test]
    fn splitter_has_no_escaped_quote_handling() {
        // A doubled quote toggles quoted mode twice and contributes no
        // characters: RFC 4180 would read `say "hi"`, this splitter reads
        // `say hi`. Frozen acceptance behavior.
        let fields = split_quoted(r#""say ""hi""",b"#);
        assert_eq!(fields, vec!["say hi", "b"]);
    }

    #[test]
    fn splitter_keeps_trailing_empty_field() {
        assert_eq!(split_quoted("a,b,"), vec!["a", "b", ""]);
        assert_eq!(split_quoted(""), vec![""]);
    }

    #[test]
    fn ledger_line_round_trips() {
        let original = expense(1, 12.5, "Food", "Lunch", ExpenseDate::new(3, 7, 2024));
        let line = format_ledger_line(&original);
        assert_eq!(line, "03-07-2024,Food,Lunch,12.50");

        let parsed = parse_ledger_line(&line).unwrap();
        assert_eq!(parsed.amount, 12.5);
        assert_eq!(parsed.category, "Food");
        assert_eq!(parsed.description, "Lunch");
        assert_eq!(parsed.date, ExpenseDate::new(3, 7, 2024));
    }

    #[test]
    fn ledger_line_with_too_few_fields_is_an_error() {
        assert_eq!(
            parse_ledger_line("03-07-2024,Food,Lunch").unwrap_err(),
            FormatError::FieldCount { expected: 4, found: 3 }
        );
    }

    #[test]
    fn ledger_line_with_bad_amount_is_an_error() {
        assert_eq!(
            parse_ledger_line("03-07-2024,Food,Lunch,abc").unwrap_err(),
            FormatError::Number("abc".to_string())
        );
    }

    #[test]
    fn ledger_line_with_bad_date_is_an_error() {
        assert!(matches!(
            parse_ledger_line("July 3rd,Food,Lunch,12.50"),
            Err(FormatError::Date(_))
        ));
    }

    #[test]
    fn record_line_round_trips() {
        let original = expense(17, 99.99, "Transport", "Taxi home", ExpenseDate::new(28, 11, 2023));
        let line = format_record_line(&original);
        assert_eq!(line, "17,99.99,Transport,Taxi home,28,11,2023");
        assert_eq!(parse_record_line(&line).unwrap(), original);
    }

    #[test]
    fn record_line_preserves_commas_in_description() {
        let original = expense(4, 20.0, "Food", "Bread, milk, eggs", ExpenseDate::new(1, 2, 2024));
        let line = format_record_line(&original);
        assert_eq!(parse_record_line(&line).unwrap(), original);
    }

    #[test]
    fn short_record_line_is_an_error_not_a_placeholder() {
        assert_eq!(
            parse_record_line("1,12.50,Food,Lunch").unwrap_err(),
            FormatError::FieldCount { expected: 7, found: 4 }
        );
    }

    #[test]
    fn record_line_with_bad_id_is_an_error() {
        assert!(matches!(
            parse_record_line("x,12.50,Food,Lunch,3,7,2024"),
            Err(FormatError::Number(_))
        ));
    }
}

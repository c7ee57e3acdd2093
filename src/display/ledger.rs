//! Ledger display formatting
//!
//! Register view of the ledger, confirmation lines for accepted mutations,
//! and terminal rendering of every command output.

use crate::models::{BudgetState, Currency, ExpenseRecord};
use crate::reports::narration_text;
use crate::services::{Change, CommandOutput};

const CATEGORY_WIDTH: usize = 24;

/// Format a single expense for display (register row)
pub fn format_expense_row(record: &ExpenseRecord, currency: Currency) -> String {
    format!(
        "{} {:<width$} {:>14}",
        record.date.format("%Y-%m-%d"),
        truncate(&record.category, CATEGORY_WIDTH),
        record.amount.format_labeled(currency),
        width = CATEGORY_WIDTH
    )
}

/// Format the ledger as a register with a closing balance line
pub fn format_ledger_register(state: &BudgetState) -> String {
    if state.ledger.is_empty() {
        return "No expenses recorded.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:10} {:<width$} {:>14}\n",
        "Date",
        "Category",
        "Amount",
        width = CATEGORY_WIDTH
    ));
    output.push_str(&"-".repeat(50));
    output.push('\n');

    for record in &state.ledger {
        output.push_str(&format_expense_row(record, state.currency));
        output.push('\n');
    }

    output.push_str(&"-".repeat(50));
    output.push('\n');
    output.push_str(&format!(
        "{:10} {:<width$} {:>14}\n",
        "",
        "Total",
        state.ledger.total().format_labeled(state.currency),
        width = CATEGORY_WIDTH
    ));

    output
}

/// One-line confirmation for an accepted mutation
pub fn format_change(change: &Change, currency: Currency) -> String {
    match change {
        Change::Created(record) => format!(
            "Added {} on {}: {}",
            record.category,
            record.date.format("%Y-%m-%d"),
            record.amount.format_labeled(currency)
        ),
        Change::Updated { before, after } => format!(
            "Updated {} on {}: {} -> {}",
            after.category,
            after.date.format("%Y-%m-%d"),
            before.amount.format_labeled(currency),
            after.amount.format_labeled(currency)
        ),
        Change::Deleted(record) => format!(
            "Deleted {} on {} ({})",
            record.category,
            record.date.format("%Y-%m-%d"),
            record.amount.format_labeled(currency)
        ),
    }
}

/// Render a command's output for the terminal
///
/// Byte outputs (exports) are summarized, not dumped.
pub fn format_output(output: &CommandOutput, currency: Currency) -> String {
    match output {
        CommandOutput::IncomeSet(income) => {
            format!("Income set to {}", income.format_labeled(currency))
        }
        CommandOutput::CurrencySet(label) => format!("Currency set to {}", label),
        CommandOutput::Recorded(change) => format_change(change, currency),
        CommandOutput::Exported { format, bytes } => {
            format!("Exported {} bytes as {}", bytes.len(), format.mime_type())
        }
        CommandOutput::Summary(report) => report.format_terminal(),
        CommandOutput::Spending(report) => report.format_terminal(),
        CommandOutput::Trend(report) => report.format_terminal(),
        CommandOutput::Narrative(lines) => narration_text(lines),
        CommandOutput::Document(report) => report.render_text(),
    }
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

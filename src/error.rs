//! Custom error types for Spendbook
//!
//! This module defines the error hierarchy for the ledger engine using
//! thiserror. The first group of variants are validation failures: they are
//! recoverable, leave the budget state untouched, and their `Display` output
//! is the warning shown to the user.

use thiserror::Error;

use crate::models::Money;

/// The main error type for Spendbook operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Income or expense amount below zero
    #[error("{field} cannot be negative (got {value})")]
    NegativeValue { field: &'static str, value: Money },

    /// Expense would push the balance below zero
    #[error("Expense amount cannot exceed total balance: {amount} requested, {available} available")]
    ExceedsBalance { amount: Money, available: Money },

    /// A required text field was blank
    #[error("{0} is required")]
    EmptyField(&'static str),

    /// Update/delete target did not match exactly one record
    #[error("No unique expense matches {selector} ({matches} matching records)")]
    AmbiguousOrMissingKey { selector: String, matches: usize },

    /// Income lowered below what has already been spent
    #[error("Income {income} is lower than recorded expenses {expenses}")]
    IncomeBelowExpenses { income: Money, expenses: Money },

    /// Internal invariant violation
    #[error("Ledger is inconsistent: {0}")]
    Inconsistent(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Input that could not be parsed (amounts, dates, currencies)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),
}

impl LedgerError {
    /// Build a missing/ambiguous key error for a selector description
    pub fn no_unique_match(selector: impl Into<String>, matches: usize) -> Self {
        Self::AmbiguousOrMissingKey {
            selector: selector.into(),
            matches,
        }
    }

    /// Check if this is a recoverable validation failure
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::NegativeValue { .. }
                | Self::ExceedsBalance { .. }
                | Self::EmptyField(_)
                | Self::AmbiguousOrMissingKey { .. }
                | Self::IncomeBelowExpenses { .. }
        )
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Spendbook operations
pub type LedgerResult<T> = Result<T, LedgerError>;

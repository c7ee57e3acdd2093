//! Expense record model
//!
//! A record is identified by its (category, date) pair. Two records with the
//! same category on different dates are distinct entries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// A single dated expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Spending category (non-blank, stored trimmed)
    pub category: String,

    /// Amount spent (never negative once accepted into a ledger)
    pub amount: Money,

    /// Calendar date of the expense
    pub date: NaiveDate,
}

impl ExpenseRecord {
    /// Create a new record, trimming the category
    pub fn new(category: impl Into<String>, amount: Money, date: NaiveDate) -> Self {
        Self {
            category: category.into().trim().to_string(),
            amount,
            date,
        }
    }

    /// The identity key of this record
    pub fn key(&self) -> ExpenseKey {
        ExpenseKey {
            category: self.category.clone(),
            date: self.date,
        }
    }
}

impl fmt::Display for ExpenseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.category,
            self.amount
        )
    }
}

/// Unique identity of a record in the ledger
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExpenseKey {
    pub category: String,
    pub date: NaiveDate,
}

impl fmt::Display for ExpenseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.category, self.date.format("%Y-%m-%d"))
    }
}

/// Target of an update or delete
///
/// Always the full (category, date) key. A category can span many dates, so
/// it never addresses a record on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseSelector {
    pub category: String,
    pub date: NaiveDate,
}

impl ExpenseSelector {
    /// Select by the full (category, date) key
    pub fn key(category: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            category: category.into().trim().to_string(),
            date,
        }
    }

    /// Check whether a record is addressed by this selector
    pub fn matches(&self, record: &ExpenseRecord) -> bool {
        record.category == self.category && record.date == self.date
    }
}

impl From<ExpenseKey> for ExpenseSelector {
    fn from(key: ExpenseKey) -> Self {
        Self {
            category: key.category,
            date: key.date,
        }
    }
}

impl fmt::Display for ExpenseSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.category, self.date.format("%Y-%m-%d"))
    }
}

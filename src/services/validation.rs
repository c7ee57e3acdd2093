//! Input validation for income and expense entries
//!
//! Pure predicates. They never touch a ledger; callers decide whether a
//! failure is surfaced or discarded.

use crate::error::{LedgerError, LedgerResult};
use crate::models::Money;

/// Income must not be negative
pub fn validate_income(income: Money) -> LedgerResult<()> {
    if income.is_negative() {
        return Err(LedgerError::NegativeValue {
            field: "Income",
            value: income,
        });
    }
    Ok(())
}

/// An expense must be non-negative and fit in the balance it is checked against
pub fn validate_expense_amount(amount: Money, current_balance: Money) -> LedgerResult<()> {
    if amount.is_negative() {
        return Err(LedgerError::NegativeValue {
            field: "Expense amount",
            value: amount,
        });
    }
    if amount > current_balance {
        return Err(LedgerError::ExceedsBalance {
            amount,
            available: current_balance,
        });
    }
    Ok(())
}

/// Category must contain something other than whitespace
pub fn validate_category(category: &str) -> LedgerResult<()> {
    if category.trim().is_empty() {
        return Err(LedgerError::EmptyField("Expense category"));
    }
    Ok(())
}

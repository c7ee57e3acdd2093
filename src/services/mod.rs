//! Service layer for Spendbook
//!
//! Validation predicates, ledger mutations, derived aggregates, and the
//! session that dispatches user commands onto them.

pub mod ledger;
pub mod session;
pub mod summary;
pub mod validation;

pub use ledger::{add_or_upsert, delete, set_income, update_amount, Applied, Change};
pub use session::{Command, CommandOutput, ReportKind, Session};
pub use summary::{
    balance, category_totals, checked_balance, time_series, total_expenses, BudgetSummary,
    TrendPoint,
};
pub use validation::{validate_category, validate_expense_amount, validate_income};

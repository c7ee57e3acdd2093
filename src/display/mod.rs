//! Display formatting for terminal output
//!
//! Provides utilities for formatting the ledger and command results for
//! terminal display.

pub mod ledger;

pub use ledger::{format_change, format_expense_row, format_ledger_register, format_output};

//! Core data models for Spendbook
//!
//! This module contains the data structures the ledger engine works on:
//! money amounts, currency labels, expense records, the ledger itself and
//! the per-session budget state.

pub mod budget;
pub mod currency;
pub mod expense;
pub mod ledger;
pub mod money;

pub use budget::BudgetState;
pub use currency::{Currency, UnknownCurrency};
pub use expense::{ExpenseKey, ExpenseRecord, ExpenseSelector};
pub use ledger::Ledger;
pub use money::{Money, MoneyParseError};

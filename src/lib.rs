//! Spendbook - personal expense ledger
//!
//! This library provides the expense ledger engine behind the `spendbook`
//! command line tool: a validated, date-ordered ledger of expenses checked
//! against a session income, the aggregates derived from it, and the exports
//! and reports built on top.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Money, currency labels, expense records, the ledger
//! - `services`: Validation, ledger mutations, aggregates, session commands
//! - `reports`: Summary, spending, trend, narration, charts, document report
//! - `export`: CSV / XLSX / JSON / YAML export and re-import
//! - `audit`: Audit logging of accepted mutations
//! - `display`: Terminal formatting
//! - `cli`: Interactive shell and script runner
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use spendbook::models::Money;
//! use spendbook::services::{Command, Session};
//!
//! let mut session = Session::default();
//! session.execute(Command::SetIncome(Money::from_cents(100_000))).unwrap();
//! session
//!     .execute(Command::Add {
//!         category: "Food".into(),
//!         amount: Money::from_cents(20_000),
//!         date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
//!     })
//!     .unwrap();
//!
//! assert_eq!(session.state().ledger.total(), Money::from_cents(20_000));
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;

pub use error::{LedgerError, LedgerResult};

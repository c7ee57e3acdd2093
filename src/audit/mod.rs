//! Audit logging for Spendbook
//!
//! Records every accepted income change and ledger mutation with
//! before/after values in an append-only, line-delimited JSON log. The log is
//! a journal for the user to inspect; sessions never load it back.
//!
//! # Example
//!
//! ```rust,ignore
//! use spendbook::audit::{AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! let applied = add_or_upsert(&ledger, income, "Food", amount, date)?;
//! logger.log(&AuditEntry::from_change(&applied.change))?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;

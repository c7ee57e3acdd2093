//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Money;
use crate::services::ledger::Change;

use super::diff::generate_diff;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// What the audited operation touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Income,
    Expense,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Income => write!(f, "Income"),
            EntityType::Expense => write!(f, "Expense"),
        }
    }
}

/// A single audit log entry
///
/// `entity_key` is the expense's `category@date` key, or `income` for income
/// changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub entity_type: EntityType,

    pub entity_key: String,

    /// Entity before the operation (updates and deletes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// Entity after the operation (creates and updates)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// Human-readable diff summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    fn new(
        operation: Operation,
        entity_type: EntityType,
        entity_key: String,
        before: Option<serde_json::Value>,
        after: Option<serde_json::Value>,
    ) -> Self {
        let diff_summary = match (&before, &after) {
            (Some(b), Some(a)) => generate_diff(b, a),
            _ => None,
        };
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_key,
            before,
            after,
            diff_summary,
        }
    }

    /// Entry for an accepted ledger mutation
    pub fn from_change(change: &Change) -> Self {
        let key = change.record().key().to_string();
        match change {
            Change::Created(record) => Self::new(
                Operation::Create,
                EntityType::Expense,
                key,
                None,
                serde_json::to_value(record).ok(),
            ),
            Change::Updated { before, after } => Self::new(
                Operation::Update,
                EntityType::Expense,
                key,
                serde_json::to_value(before).ok(),
                serde_json::to_value(after).ok(),
            ),
            Change::Deleted(record) => Self::new(
                Operation::Delete,
                EntityType::Expense,
                key,
                serde_json::to_value(record).ok(),
                None,
            ),
        }
    }

    /// Entry for an income change
    pub fn income_changed(before: Money, after: Money) -> Self {
        Self::new(
            Operation::Update,
            EntityType::Income,
            "income".to_string(),
            serde_json::to_value(before).ok(),
            serde_json::to_value(after).ok(),
        )
    }
}

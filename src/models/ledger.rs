//! Ledger model
//!
//! An ordered collection of expense records, kept sorted ascending by date.
//! Sorting is stable, so records sharing a date stay in insertion order.
//! Mutations go through [`crate::services::ledger`]; this type only exposes
//! read access publicly.

use serde::{Deserialize, Serialize};

use super::expense::{ExpenseRecord, ExpenseSelector};
use super::money::Money;

/// Ordered sequence of expense records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    records: Vec<ExpenseRecord>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from records, sorting them by date
    ///
    /// No balance validation happens here; use the ledger service to add
    /// records against an income.
    pub fn from_records(records: Vec<ExpenseRecord>) -> Self {
        let mut ledger = Self { records };
        ledger.sort();
        ledger
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExpenseRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of every amount in the ledger
    pub fn total(&self) -> Money {
        self.records.iter().map(|r| r.amount).sum()
    }

    /// Positions of every record addressed by a selector
    pub fn positions(&self, selector: &ExpenseSelector) -> Vec<usize> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, r)| selector.matches(r))
            .map(|(i, _)| i)
            .collect()
    }

    pub(crate) fn push(&mut self, record: ExpenseRecord) {
        self.records.push(record);
    }

    pub(crate) fn set_amount(&mut self, index: usize, amount: Money) {
        if let Some(record) = self.records.get_mut(index) {
            record.amount = amount;
        }
    }

    pub(crate) fn remove(&mut self, index: usize) -> ExpenseRecord {
        self.records.remove(index)
    }

    pub(crate) fn sort(&mut self) {
        self.records.sort_by_key(|r| r.date);
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a ExpenseRecord;
    type IntoIter = std::slice::Iter<'a, ExpenseRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

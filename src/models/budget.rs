//! Budget state model
//!
//! The income, currency label and ledger owned by one session. The engine
//! never holds on to a state; every operation receives one and hands back a
//! new one.

use serde::{Deserialize, Serialize};

use super::currency::Currency;
use super::ledger::Ledger;
use super::money::Money;

/// Everything the ledger engine needs to know about a session's budget
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetState {
    /// Income for the session (never negative)
    pub income: Money,

    /// Display label for amounts
    #[serde(default)]
    pub currency: Currency,

    /// Recorded expenses
    #[serde(default)]
    pub ledger: Ledger,
}

impl BudgetState {
    /// Create an empty state: zero income, empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty state with the given currency label
    pub fn with_currency(currency: Currency) -> Self {
        Self {
            currency,
            ..Self::default()
        }
    }

    /// Copy of this state with a different ledger
    pub fn with_ledger(&self, ledger: Ledger) -> Self {
        Self {
            income: self.income,
            currency: self.currency,
            ledger,
        }
    }
}

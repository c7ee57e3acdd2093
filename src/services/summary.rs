//! Derived aggregates over a ledger
//!
//! Nothing here is stored. Every figure is recomputed from the ledger on
//! demand, which keeps the aggregates consistent with whatever state the
//! caller hands in.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{BudgetState, Ledger, Money};

/// One point of the spending time series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub total: Money,
}

/// Headline figures for a budget state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BudgetSummary {
    pub income: Money,
    pub total_expenses: Money,
    pub balance: Money,
}

impl BudgetSummary {
    /// Compute the summary for a state
    pub fn from_state(state: &BudgetState) -> Self {
        let total_expenses = total_expenses(&state.ledger);
        Self {
            income: state.income,
            total_expenses,
            balance: balance(state.income, &state.ledger),
        }
    }
}

/// Sum of all amounts; zero for an empty ledger
pub fn total_expenses(ledger: &Ledger) -> Money {
    ledger.total()
}

/// Income minus total expenses
///
/// A negative result means the ledger invariant was broken somewhere. It is
/// logged and returned as-is so reporting can still run; use
/// [`checked_balance`] where the caller must refuse to continue.
pub fn balance(income: Money, ledger: &Ledger) -> Money {
    let balance = income - total_expenses(ledger);
    if balance.is_negative() {
        tracing::error!(
            %income,
            %balance,
            records = ledger.len(),
            "computed balance is negative"
        );
    }
    balance
}

/// Income minus total expenses, failing if the result is negative
pub fn checked_balance(income: Money, ledger: &Ledger) -> LedgerResult<Money> {
    let balance = balance(income, ledger);
    if balance.is_negative() {
        return Err(LedgerError::Inconsistent(format!(
            "balance {} is negative for income {}",
            balance, income
        )));
    }
    Ok(balance)
}

/// Group-and-sum by category
///
/// Returned sorted by category name so that every report built from it is
/// deterministic.
pub fn category_totals(ledger: &Ledger) -> BTreeMap<String, Money> {
    let mut totals: BTreeMap<String, Money> = BTreeMap::new();
    for record in ledger {
        *totals.entry(record.category.clone()).or_default() += record.amount;
    }
    totals
}

/// Group-and-sum by date, ascending, one point per distinct date
pub fn time_series(ledger: &Ledger) -> Vec<TrendPoint> {
    let mut totals: BTreeMap<NaiveDate, Money> = BTreeMap::new();
    for record in ledger {
        *totals.entry(record.date).or_default() += record.amount;
    }
    totals
        .into_iter()
        .map(|(date, total)| TrendPoint { date, total })
        .collect()
}

/// Share of the total for each category, as a percentage
pub fn category_shares(ledger: &Ledger) -> Vec<(String, Money, f64)> {
    let total = total_expenses(ledger);
    category_totals(ledger)
        .into_iter()
        .map(|(category, amount)| {
            let share = if total.is_zero() {
                0.0
            } else {
                (amount.cents() as f64 / total.cents() as f64) * 100.0
            };
            (category, amount, share)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseRecord;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_ledger() -> Ledger {
        Ledger::from_records(vec![
            ExpenseRecord::new("Food", Money::from_cents(2000), date(2024, 1, 5)),
            ExpenseRecord::new("Rent", Money::from_cents(50000), date(2024, 1, 1)),
            ExpenseRecord::new("Food", Money::from_cents(1500), date(2024, 1, 7)),
            ExpenseRecord::new("Fuel", Money::from_cents(3000), date(2024, 1, 5)),
        ])
    }

    #[test]
    fn test_empty_ledger_reports_zero() {
        let ledger = Ledger::new();
        assert_eq!(total_expenses(&ledger), Money::zero());
        assert_eq!(balance(Money::from_cents(100), &ledger), Money::from_cents(100));
        assert!(category_totals(&ledger).is_empty());
        assert!(time_series(&ledger).is_empty());
    }

    #[test]
    fn test_totals_and_balance() {
        let ledger = sample_ledger();
        assert_eq!(total_expenses(&ledger), Money::from_cents(56500));
        assert_eq!(
            balance(Money::from_cents(100000), &ledger),
            Money::from_cents(43500)
        );
    }

    #[test]
    fn test_checked_balance_flags_negative() {
        let ledger = sample_ledger();
        let err = checked_balance(Money::from_cents(100), &ledger).unwrap_err();
        assert!(matches!(err, LedgerError::Inconsistent(_)));
    }

    #[test]
    fn test_category_totals() {
        let totals = category_totals(&sample_ledger());
        assert_eq!(totals.len(), 3);
        assert_eq!(totals["Food"], Money::from_cents(3500));
        assert_eq!(totals["Rent"], Money::from_cents(50000));
        assert_eq!(totals["Fuel"], Money::from_cents(3000));
    }

    #[test]
    fn test_time_series_distinct_dates_ascending() {
        let series = time_series(&sample_ledger());
        let dates: Vec<_> = series.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![date(2024, 1, 1), date(2024, 1, 5), date(2024, 1, 7)]);
        assert_eq!(series[1].total, Money::from_cents(5000));
        assert!(series.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_category_shares() {
        let ledger = Ledger::from_records(vec![
            ExpenseRecord::new("A", Money::from_cents(250), date(2024, 1, 1)),
            ExpenseRecord::new("B", Money::from_cents(750), date(2024, 1, 1)),
        ]);
        let shares = category_shares(&ledger);
        assert_eq!(shares[0].0, "A");
        assert!((shares[0].2 - 25.0).abs() < f64::EPSILON);
        assert!((shares[1].2 - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_summary_from_state() {
        let state = BudgetState {
            income: Money::from_cents(100000),
            ledger: sample_ledger(),
            ..BudgetState::default()
        };
        let summary = BudgetSummary::from_state(&state);
        assert_eq!(summary.total_expenses, Money::from_cents(56500));
        assert_eq!(summary.balance, Money::from_cents(43500));
    }
}

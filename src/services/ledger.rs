//! Ledger mutations
//!
//! Every operation takes the current ledger (and the income it is checked
//! against) by reference and returns a new ledger. On failure nothing is
//! returned, so the caller's state is never partially modified.
//!
//! Balance checks always use the net change: replacing a record's amount
//! frees that record's old amount before the new one is checked.

use chrono::NaiveDate;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{BudgetState, ExpenseRecord, ExpenseSelector, Ledger, Money};

use super::summary::{checked_balance, total_expenses};
use super::validation::{validate_category, validate_expense_amount, validate_income};

/// What an accepted mutation did to the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Created(ExpenseRecord),
    Updated {
        before: ExpenseRecord,
        after: ExpenseRecord,
    },
    Deleted(ExpenseRecord),
}

impl Change {
    /// The record as it exists after the change (or as it was, for deletes)
    pub fn record(&self) -> &ExpenseRecord {
        match self {
            Change::Created(record) | Change::Deleted(record) => record,
            Change::Updated { after, .. } => after,
        }
    }
}

/// Result of an accepted mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub ledger: Ledger,
    pub change: Change,
}

/// Set the session income
///
/// Income may not drop below what the ledger already records, otherwise the
/// balance would go negative.
pub fn set_income(state: &BudgetState, income: Money) -> LedgerResult<BudgetState> {
    validate_income(income)?;

    let expenses = total_expenses(&state.ledger);
    if income < expenses {
        return Err(LedgerError::IncomeBelowExpenses { income, expenses });
    }

    Ok(BudgetState {
        income,
        currency: state.currency,
        ledger: state.ledger.clone(),
    })
}

/// Add an expense, or replace the amount of the record with the same
/// (category, date) key
pub fn add_or_upsert(
    ledger: &Ledger,
    income: Money,
    category: &str,
    amount: Money,
    date: NaiveDate,
) -> LedgerResult<Applied> {
    let category = category.trim();
    let existing = ledger
        .positions(&ExpenseSelector::key(category, date))
        .first()
        .copied();

    let freed = existing
        .and_then(|i| ledger.records().get(i))
        .map(|r| r.amount)
        .unwrap_or_default();
    let available = checked_balance(income, ledger)? + freed;

    validate_expense_amount(amount, available)?;
    validate_category(category)?;

    let mut next = ledger.clone();
    let change = match existing {
        Some(index) => {
            let before = ledger.records()[index].clone();
            next.set_amount(index, amount);
            let after = ExpenseRecord {
                amount,
                ..before.clone()
            };
            Change::Updated { before, after }
        }
        None => {
            let record = ExpenseRecord::new(category, amount, date);
            next.push(record.clone());
            Change::Created(record)
        }
    };
    next.sort();

    tracing::debug!(key = %change.record().key(), %amount, "expense recorded");
    Ok(Applied { ledger: next, change })
}

/// Change the amount of exactly one selected record
pub fn update_amount(
    ledger: &Ledger,
    income: Money,
    selector: &ExpenseSelector,
    new_amount: Money,
) -> LedgerResult<Applied> {
    let index = unique_position(ledger, selector)?;
    let before = ledger.records()[index].clone();

    let available = checked_balance(income, ledger)? + before.amount;
    validate_expense_amount(new_amount, available)?;

    let mut next = ledger.clone();
    next.set_amount(index, new_amount);
    let after = ExpenseRecord {
        amount: new_amount,
        ..before.clone()
    };

    tracing::debug!(key = %after.key(), from = %before.amount, to = %new_amount, "expense updated");
    Ok(Applied {
        ledger: next,
        change: Change::Updated { before, after },
    })
}

/// Remove exactly one selected record
///
/// Removing only lowers total expenses, so no balance check is needed.
pub fn delete(ledger: &Ledger, selector: &ExpenseSelector) -> LedgerResult<Applied> {
    let index = unique_position(ledger, selector)?;

    let mut next = ledger.clone();
    let removed = next.remove(index);

    tracing::debug!(key = %removed.key(), "expense deleted");
    Ok(Applied {
        ledger: next,
        change: Change::Deleted(removed),
    })
}

fn unique_position(ledger: &Ledger, selector: &ExpenseSelector) -> LedgerResult<usize> {
    match ledger.positions(selector).as_slice() {
        [index] => Ok(*index),
        matches => Err(LedgerError::no_unique_match(
            selector.to_string(),
            matches.len(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn units(n: i64) -> Money {
        Money::from_cents(n * 100)
    }

    fn add(ledger: &Ledger, income: Money, category: &str, amount: Money, d: NaiveDate) -> Ledger {
        add_or_upsert(ledger, income, category, amount, d)
            .unwrap()
            .ledger
    }

    #[test]
    fn test_add_sorts_by_date() {
        let income = units(1000);
        let ledger = add(&Ledger::new(), income, "Food", units(200), date(2024, 1, 5));
        let ledger = add(&ledger, income, "Rent", units(500), date(2024, 1, 1));

        let categories: Vec<_> = ledger.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(categories, vec!["Rent", "Food"]);
        assert_eq!(total_expenses(&ledger), units(700));
        assert_eq!(crate::services::summary::balance(income, &ledger), units(300));
    }

    #[test]
    fn test_add_rejects_over_balance() {
        let ledger = Ledger::new();
        let err = add_or_upsert(&ledger, units(100), "Food", units(150), date(2024, 1, 5))
            .unwrap_err();

        assert!(matches!(err, LedgerError::ExceedsBalance { .. }));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_add_rejects_negative_and_blank() {
        let ledger = Ledger::new();
        let d = date(2024, 1, 5);

        assert!(matches!(
            add_or_upsert(&ledger, units(100), "Food", Money::from_cents(-1), d),
            Err(LedgerError::NegativeValue { .. })
        ));
        assert!(matches!(
            add_or_upsert(&ledger, units(100), "   ", units(10), d),
            Err(LedgerError::EmptyField(_))
        ));
    }

    #[test]
    fn test_same_key_replaces_amount() {
        let income = units(1000);
        let d = date(2024, 1, 5);
        let ledger = add(&Ledger::new(), income, "Food", units(50), d);

        let applied = add_or_upsert(&ledger, income, "Food", units(80), d).unwrap();

        assert_eq!(applied.ledger.len(), 1);
        assert_eq!(applied.ledger.records()[0].amount, units(80));
        assert!(matches!(applied.change, Change::Updated { .. }));
    }

    #[test]
    fn test_upsert_checks_net_change() {
        // 90 of 100 spent on one key; raising that key to 100 only needs 10 more
        let income = units(100);
        let d = date(2024, 1, 5);
        let ledger = add(&Ledger::new(), income, "Food", units(90), d);

        let applied = add_or_upsert(&ledger, income, "Food", units(100), d).unwrap();
        assert_eq!(total_expenses(&applied.ledger), units(100));

        assert!(matches!(
            add_or_upsert(&ledger, income, "Food", units(101), d),
            Err(LedgerError::ExceedsBalance { .. })
        ));
    }

    #[test]
    fn test_upsert_keeps_position_among_same_date() {
        let income = units(1000);
        let d = date(2024, 1, 5);
        let ledger = add(&Ledger::new(), income, "Food", units(10), d);
        let ledger = add(&ledger, income, "Fuel", units(20), d);
        let ledger = add(&ledger, income, "Food", units(30), d);

        let categories: Vec<_> = ledger.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(categories, vec!["Food", "Fuel"]);
    }

    #[test]
    fn test_update_amount() {
        let income = units(100);
        let d = date(2024, 1, 5);
        let ledger = add(&Ledger::new(), income, "Food", units(60), d);
        let ledger = add(&ledger, income, "Rent", units(30), date(2024, 1, 1));

        // Remaining balance is 10, plus Food's own 60
        let applied = update_amount(&ledger, income, &ExpenseSelector::key("Food", d), units(70))
            .unwrap();
        assert_eq!(total_expenses(&applied.ledger), units(100));

        assert!(matches!(
            update_amount(&ledger, income, &ExpenseSelector::key("Food", d), units(71)),
            Err(LedgerError::ExceedsBalance { .. })
        ));
        assert!(matches!(
            update_amount(&ledger, income, &ExpenseSelector::key("Food", d), Money::from_cents(-5)),
            Err(LedgerError::NegativeValue { .. })
        ));
    }

    #[test]
    fn test_update_picks_date_within_category() {
        let income = units(100);
        let ledger = add(&Ledger::new(), income, "Food", units(10), date(2024, 1, 5));
        let ledger = add(&ledger, income, "Food", units(10), date(2024, 1, 6));

        let applied = update_amount(
            &ledger,
            income,
            &ExpenseSelector::key("Food", date(2024, 1, 6)),
            units(20),
        )
        .unwrap();
        assert_eq!(applied.ledger.records()[0].amount, units(10));
        assert_eq!(applied.ledger.records()[1].amount, units(20));
    }

    #[test]
    fn test_update_duplicate_key() {
        let income = units(100);
        let d = date(2024, 1, 5);
        let ledger = Ledger::from_records(vec![
            ExpenseRecord::new("Food", units(10), d),
            ExpenseRecord::new("Food", units(15), d),
        ]);

        let err = update_amount(&ledger, income, &ExpenseSelector::key("Food", d), units(5))
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::AmbiguousOrMissingKey { matches: 2, .. }
        ));
    }

    #[test]
    fn test_update_missing_key() {
        let err = update_amount(
            &Ledger::new(),
            units(100),
            &ExpenseSelector::key("Food", date(2024, 1, 5)),
            units(5),
        )
        .unwrap_err();
        assert!(matches!(err, LedgerError::AmbiguousOrMissingKey { matches: 0, .. }));
    }

    #[test]
    fn test_delete() {
        let income = units(100);
        let d = date(2024, 1, 5);
        let ledger = add(&Ledger::new(), income, "Food", units(10), d);
        let ledger = add(&ledger, income, "Rent", units(20), d);

        let applied = delete(&ledger, &ExpenseSelector::key("Food", d)).unwrap();
        assert_eq!(applied.ledger.len(), 1);
        assert_eq!(applied.ledger.records()[0].category, "Rent");
        assert!(matches!(applied.change, Change::Deleted(_)));
    }

    #[test]
    fn test_delete_missing_leaves_ledger() {
        let income = units(100);
        let ledger = add(&Ledger::new(), income, "Food", units(10), date(2024, 1, 5));

        let err = delete(&ledger, &ExpenseSelector::key("Food", date(2024, 2, 1))).unwrap_err();
        assert!(matches!(err, LedgerError::AmbiguousOrMissingKey { matches: 0, .. }));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_set_income() {
        let state = BudgetState::new();
        let state = set_income(&state, units(100)).unwrap();
        assert_eq!(state.income, units(100));

        assert!(matches!(
            set_income(&state, Money::from_cents(-1)),
            Err(LedgerError::NegativeValue { .. })
        ));

        let ledger = add(&state.ledger, state.income, "Food", units(80), date(2024, 1, 5));
        let state = state.with_ledger(ledger);
        assert!(matches!(
            set_income(&state, units(50)),
            Err(LedgerError::IncomeBelowExpenses { .. })
        ));
        assert!(set_income(&state, units(80)).is_ok());
    }

    #[test]
    fn test_total_never_exceeds_income() {
        let income = units(500);
        let mut ledger = Ledger::new();
        let amounts = [120, 300, 90, 45, 200, 10, 60, 5];

        for (i, amount) in amounts.iter().enumerate() {
            let d = date(2024, 1, (i % 3) as u32 + 1);
            let category = if i % 2 == 0 { "Food" } else { "Fuel" };
            if let Ok(applied) = add_or_upsert(&ledger, income, category, units(*amount), d) {
                ledger = applied.ledger;
            }
            assert!(total_expenses(&ledger) <= income);
        }
    }

    #[test]
    fn test_total_never_exceeds_income_across_adds_and_updates() {
        let income = units(500);
        let mut ledger = Ledger::new();
        let steps = [
            ("add", "Food", 1, 200),
            ("update", "Food", 1, 450),
            ("add", "Rent", 2, 250),
            ("update", "Food", 1, 260),
            ("add", "Rent", 2, 240),
            ("update", "Rent", 2, 300),
            ("add", "Fuel", 3, 20),
            ("update", "Fuel", 3, 0),
            ("add", "Fuel", 3, 500),
            ("update", "Missing", 4, 1),
        ];

        for (op, category, day, amount) in steps {
            let d = date(2024, 1, day);
            let result = match op {
                "add" => add_or_upsert(&ledger, income, category, units(amount), d),
                _ => update_amount(
                    &ledger,
                    income,
                    &ExpenseSelector::key(category, d),
                    units(amount),
                ),
            };
            if let Ok(applied) = result {
                ledger = applied.ledger;
            }
            assert!(total_expenses(&ledger) <= income);
        }

        assert_eq!(total_expenses(&ledger), units(500));
    }

    #[test]
    fn test_retried_update_and_delete_are_idempotent() {
        let income = units(1000);
        let ledger = add(&Ledger::new(), income, "Food", units(50), date(2024, 1, 5));
        let ledger = add(&ledger, income, "Rent", units(300), date(2024, 1, 1));
        let food = ExpenseSelector::key("Food", date(2024, 1, 5));

        let once = update_amount(&ledger, income, &food, units(80)).unwrap().ledger;
        let twice = update_amount(&once, income, &food, units(80)).unwrap().ledger;
        assert_eq!(once, twice);

        let removed = delete(&twice, &food).unwrap().ledger;
        let err = delete(&removed, &food).unwrap_err();
        assert!(matches!(err, LedgerError::AmbiguousOrMissingKey { matches: 0, .. }));
        assert_eq!(removed.len(), 1);
        assert_eq!(removed.records()[0].category, "Rent");
    }
}

//! Finance summary
//!
//! The three headline metrics shown on the summary view and in the metrics
//! table of the document report.

use serde::Serialize;

use crate::models::{BudgetState, Currency, Money};
use crate::services::summary::BudgetSummary;

/// Headline metrics with the currency label they are shown in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FinanceSummaryReport {
    pub currency: Currency,
    pub income: Money,
    pub total_expenses: Money,
    pub balance: Money,
}

impl FinanceSummaryReport {
    /// Generate the summary for a state
    pub fn generate(state: &BudgetState) -> Self {
        let BudgetSummary {
            income,
            total_expenses,
            balance,
        } = BudgetSummary::from_state(state);

        Self {
            currency: state.currency,
            income,
            total_expenses,
            balance,
        }
    }

    /// Metric label and "<LABEL> amount" value, in display order
    pub fn metric_rows(&self) -> [(&'static str, String); 3] {
        [
            ("Total Income", self.income.format_labeled(self.currency)),
            (
                "Total Expenses",
                self.total_expenses.format_labeled(self.currency),
            ),
            ("Total Balance", self.balance.format_labeled(self.currency)),
        ]
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Finance Summary\n");
        output.push_str(&"=".repeat(40));
        output.push('\n');

        for (label, value) in self.metric_rows() {
            output.push_str(&format!("{:<20} {:>19}\n", label, value));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseRecord, Ledger};
    use chrono::NaiveDate;

    fn state() -> BudgetState {
        let ledger = Ledger::from_records(vec![
            ExpenseRecord::new(
                "Food",
                Money::from_cents(20000),
                NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            ),
            ExpenseRecord::new(
                "Rent",
                Money::from_cents(50000),
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            ),
        ]);
        BudgetState {
            income: Money::from_cents(100000),
            currency: Currency::Usd,
            ledger,
        }
    }

    #[test]
    fn test_metric_rows() {
        let report = FinanceSummaryReport::generate(&state());
        let rows = report.metric_rows();

        assert_eq!(rows[0], ("Total Income", "USD 1000.00".to_string()));
        assert_eq!(rows[1], ("Total Expenses", "USD 700.00".to_string()));
        assert_eq!(rows[2], ("Total Balance", "USD 300.00".to_string()));
    }

    #[test]
    fn test_empty_state_is_all_zero() {
        let report = FinanceSummaryReport::generate(&BudgetState::with_currency(Currency::Eur));

        assert!(report.total_expenses.is_zero());
        assert!(report.balance.is_zero());
        assert!(report.format_terminal().contains("EUR 0.00"));
    }
}

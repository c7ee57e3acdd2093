//! Expense trend over time

use serde::Serialize;

use crate::models::{BudgetState, Currency, Money};
use crate::services::summary::{time_series, TrendPoint};

/// Daily expense totals, ascending by date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendReport {
    pub currency: Currency,
    pub points: Vec<TrendPoint>,
}

impl TrendReport {
    pub fn generate(state: &BudgetState) -> Self {
        Self {
            currency: state.currency,
            points: time_series(&state.ledger),
        }
    }

    /// Largest single-day total
    pub fn peak(&self) -> Option<&TrendPoint> {
        self.points.iter().max_by_key(|p| p.total)
    }

    /// Format the report for terminal display, with a proportional bar per day
    pub fn format_terminal(&self) -> String {
        const BAR_WIDTH: i128 = 30;

        let mut output = String::new();
        output.push_str("Expense Trend\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');

        let Some(peak) = self.peak().map(|p| p.total).filter(|t| t.is_positive()) else {
            output.push_str("No expenses recorded.\n");
            return output;
        };

        for point in &self.points {
            let scaled = i128::from(point.total.cents()) * BAR_WIDTH / i128::from(peak.cents());
            let width = scaled.clamp(0, BAR_WIDTH) as usize;
            output.push_str(&format!(
                "{}  {:>14}  {}\n",
                point.date.format("%Y-%m-%d"),
                point.total.format_labeled(self.currency),
                "#".repeat(width)
            ));
        }

        output
    }

    /// Sum of every point
    pub fn total(&self) -> Money {
        self.points.iter().map(|p| p.total).sum()
    }
}

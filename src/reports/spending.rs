//! Spending Report
//!
//! Per-category breakdown of the ledger with record counts and each
//! category's share of total expenses.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{BudgetState, Currency, Money};
use crate::services::summary::{category_totals, total_expenses};

/// Spending for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingByCategory {
    /// Category name
    pub category: String,
    /// Summed amount
    pub total: Money,
    /// Number of ledger records
    pub record_count: usize,
    /// Percentage of total expenses
    pub percentage: f64,
}

/// Spending Report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingReport {
    /// Label amounts are shown in
    pub currency: Currency,
    /// Categories, most spending first
    pub categories: Vec<SpendingByCategory>,
    /// Total expenses across all categories
    pub total_spending: Money,
    /// Total record count
    pub total_records: usize,
}

impl SpendingReport {
    /// Generate the report for a state
    pub fn generate(state: &BudgetState) -> Self {
        let ledger = &state.ledger;
        let total_spending = total_expenses(ledger);

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for record in ledger {
            *counts.entry(record.category.as_str()).or_default() += 1;
        }

        let mut categories: Vec<SpendingByCategory> = category_totals(ledger)
            .into_iter()
            .map(|(category, total)| {
                let percentage = if total_spending.is_zero() {
                    0.0
                } else {
                    (total.cents() as f64 / total_spending.cents() as f64) * 100.0
                };
                let record_count = counts.get(category.as_str()).copied().unwrap_or(0);

                SpendingByCategory {
                    category,
                    total,
                    record_count,
                    percentage,
                }
            })
            .collect();

        // Stable sort keeps name order among equal totals
        categories.sort_by(|a, b| b.total.cmp(&a.total));

        Self {
            currency: state.currency,
            categories,
            total_spending,
            total_records: ledger.len(),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Spending by Category\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if self.categories.is_empty() {
            output.push_str("No expenses recorded.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<28} {:>16} {:>6} {:>7}\n",
            "Category", "Amount", "Count", "%"
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for category in &self.categories {
            output.push_str(&format!(
                "{:<28} {:>16} {:>6} {:>6.1}%\n",
                category.category,
                category.total.format_labeled(self.currency),
                category.record_count,
                category.percentage
            ));
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<28} {:>16} {:>6}\n",
            "TOTAL",
            self.total_spending.format_labeled(self.currency),
            self.total_records
        ));

        output
    }
}

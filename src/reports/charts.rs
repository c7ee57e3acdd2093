//! Chart data for an external renderer
//!
//! The engine never draws. Each function returns the labelled series a
//! plotting collaborator needs, or `None` when the ledger is empty and the
//! chart should be left out.

use serde::Serialize;

use crate::models::{BudgetState, Money};
use crate::services::summary::{category_shares, time_series, BudgetSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Horizontal bars
    Bar,
    Pie,
    Line,
}

/// One labelled value of a series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: Money,
    /// Percentage of the series total, for pie slices
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub kind: ChartKind,
    pub title: String,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    fn new(kind: ChartKind, title: &str, points: Vec<ChartPoint>) -> Self {
        Self {
            kind,
            title: title.to_string(),
            points,
        }
    }
}

fn point(label: impl Into<String>, value: Money) -> ChartPoint {
    ChartPoint {
        label: label.into(),
        value,
        share: None,
    }
}

/// Bar chart of Total Income, Total Expenses and Total Balance
pub fn finance_summary_chart(state: &BudgetState) -> Option<ChartSeries> {
    if state.ledger.is_empty() {
        return None;
    }

    let summary = BudgetSummary::from_state(state);
    Some(ChartSeries::new(
        ChartKind::Bar,
        "Finance Summary",
        vec![
            point("Total Income", summary.income),
            point("Total Expenses", summary.total_expenses),
            point("Total Balance", summary.balance),
        ],
    ))
}

/// Pie chart of category totals with percentage shares
pub fn expense_breakdown_chart(state: &BudgetState) -> Option<ChartSeries> {
    if state.ledger.is_empty() {
        return None;
    }

    let points = category_shares(&state.ledger)
        .into_iter()
        .map(|(category, amount, share)| ChartPoint {
            label: category,
            value: amount,
            share: Some(share),
        })
        .collect();

    Some(ChartSeries::new(ChartKind::Pie, "Expenses Breakdown", points))
}

/// Line chart of daily expense totals
pub fn expense_trend_chart(state: &BudgetState) -> Option<ChartSeries> {
    if state.ledger.is_empty() {
        return None;
    }

    let points = time_series(&state.ledger)
        .into_iter()
        .map(|p| point(p.date.format("%Y-%m-%d").to_string(), p.total))
        .collect();

    Some(ChartSeries::new(ChartKind::Line, "Expense Trends Over Time", points))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseRecord, Ledger};
    use chrono::NaiveDate;

    fn state() -> BudgetState {
        let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        BudgetState {
            income: Money::from_cents(100000),
            ledger: Ledger::from_records(vec![
                ExpenseRecord::new("Food", Money::from_cents(25000), d(5)),
                ExpenseRecord::new("Rent", Money::from_cents(75000), d(1)),
            ]),
            ..BudgetState::default()
        }
    }

    #[test]
    fn test_empty_ledger_has_no_charts() {
        let empty = BudgetState::new();
        assert!(finance_summary_chart(&empty).is_none());
        assert!(expense_breakdown_chart(&empty).is_none());
        assert!(expense_trend_chart(&empty).is_none());
    }

    #[test]
    fn test_summary_chart() {
        let chart = finance_summary_chart(&state()).unwrap();
        assert_eq!(chart.kind, ChartKind::Bar);

        let labels: Vec<_> = chart.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["Total Income", "Total Expenses", "Total Balance"]);
        assert!(chart.points[2].value.is_zero());
    }

    #[test]
    fn test_breakdown_shares() {
        let chart = expense_breakdown_chart(&state()).unwrap();
        assert_eq!(chart.points[0].label, "Food");
        assert_eq!(chart.points[0].share, Some(25.0));
        assert_eq!(chart.points[1].share, Some(75.0));
    }

    #[test]
    fn test_trend_chart_ascending() {
        let chart = expense_trend_chart(&state()).unwrap();
        assert_eq!(chart.points[0].label, "2024-01-01");
        assert_eq!(chart.points[1].label, "2024-01-05");
    }
}

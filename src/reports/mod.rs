//! Reports module for Spendbook
//!
//! Everything here is a pure function of a budget state: headline metrics,
//! per-category spending, the daily trend, the narrated breakdown, chart
//! series for an external renderer, and the paginated document report.

pub mod charts;
pub mod document;
pub mod narrative;
pub mod spending;
pub mod summary;
pub mod trend;

use serde::{Deserialize, Serialize};

pub use charts::{
    expense_breakdown_chart, expense_trend_chart, finance_summary_chart, ChartKind, ChartPoint,
    ChartSeries,
};
pub use document::{Block, ChartImage, ChartImages, DocumentReport, Page};
pub use narrative::{narrate, narration_text};
pub use spending::{SpendingByCategory, SpendingReport};
pub use summary::FinanceSummaryReport;
pub use trend::TrendReport;

/// Pagination of the document report's ledger table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLayout {
    /// Ledger rows that fit on page 1 below the metrics and charts
    #[serde(default = "default_first_page_rows")]
    pub first_page_rows: usize,

    /// Ledger rows on every following page
    #[serde(default = "default_rows_per_page")]
    pub rows_per_page: usize,
}

fn default_first_page_rows() -> usize {
    12
}

fn default_rows_per_page() -> usize {
    40
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self {
            first_page_rows: default_first_page_rows(),
            rows_per_page: default_rows_per_page(),
        }
    }
}

impl ReportLayout {
    /// Layout with both counts at least one row
    pub fn normalized(self) -> Self {
        Self {
            first_page_rows: self.first_page_rows.max(1),
            rows_per_page: self.rows_per_page.max(1),
        }
    }
}

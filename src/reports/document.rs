//! Paginated finance report
//!
//! Page 1 carries the title, the metrics table, the two chart images and
//! the start of the ledger table. Remaining ledger rows continue on further
//! pages, each repeating the header row. Chart images are rendered by an
//! external collaborator and handed in as bytes.
//!
//! Two renderers are provided: plain text with form-feed page breaks, and
//! JSON with image bytes base64-encoded.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Serialize, Serializer};

use super::summary::FinanceSummaryReport;
use super::ReportLayout;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{BudgetState, ExpenseRecord};

pub const REPORT_TITLE: &str = "Finance Report";

/// Ledger table header, in column order
pub const LEDGER_HEADER: [&str; 3] = ["Category", "Date", "Amount"];

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// A pre-rendered chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartImage {
    pub title: String,
    pub mime: String,
    pub width: u32,
    pub height: u32,
    #[serde(serialize_with = "encode_base64")]
    pub bytes: Vec<u8>,
}

impl ChartImage {
    pub fn new(
        title: impl Into<String>,
        mime: impl Into<String>,
        width: u32,
        height: u32,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            title: title.into(),
            mime: mime.into(),
            width,
            height,
            bytes,
        }
    }

    /// Wrap PNG bytes, reading the dimensions from the IHDR chunk
    pub fn png(title: impl Into<String>, bytes: Vec<u8>) -> LedgerResult<Self> {
        if bytes.len() < 24 || bytes[..8] != PNG_SIGNATURE || &bytes[12..16] != b"IHDR" {
            return Err(LedgerError::Parse("Chart image is not a PNG file".into()));
        }

        let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
        let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);

        Ok(Self::new(title, "image/png", width, height, bytes))
    }
}

fn encode_base64<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(bytes))
}

/// The two charts placed on page 1
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartImages {
    /// Bar chart of the three summary metrics
    pub summary: Option<ChartImage>,
    /// Pie chart of category totals
    pub breakdown: Option<ChartImage>,
}

/// One row of the metrics table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricRow {
    pub label: String,
    pub value: String,
}

/// One row of the ledger table, already formatted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerRow {
    pub category: String,
    pub date: String,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Title {
        text: String,
    },
    MetricsTable {
        rows: Vec<MetricRow>,
    },
    Image {
        #[serde(flatten)]
        image: ChartImage,
    },
    LedgerTable {
        header: [String; 3],
        rows: Vec<LedgerRow>,
        /// True on pages after the table started
        continued: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub number: usize,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentReport {
    pub title: String,
    pub pages: Vec<Page>,
}

impl DocumentReport {
    /// Compose the report for a state
    ///
    /// An empty ledger drops the chart images and leaves the ledger table
    /// with its header only.
    pub fn compose(state: &BudgetState, images: &ChartImages, layout: ReportLayout) -> Self {
        let layout = layout.normalized();
        let summary = FinanceSummaryReport::generate(state);

        let mut first = vec![
            Block::Title {
                text: REPORT_TITLE.to_string(),
            },
            Block::MetricsTable {
                rows: summary
                    .metric_rows()
                    .into_iter()
                    .map(|(label, value)| MetricRow {
                        label: label.to_string(),
                        value,
                    })
                    .collect(),
            },
        ];

        if !state.ledger.is_empty() {
            for image in [&images.summary, &images.breakdown].into_iter().flatten() {
                first.push(Block::Image {
                    image: image.clone(),
                });
            }
        }

        let rows: Vec<LedgerRow> = state
            .ledger
            .iter()
            .map(|record| ledger_row(record, state))
            .collect();
        let split = layout.first_page_rows.min(rows.len());
        let (head, rest) = rows.split_at(split);

        first.push(ledger_table(head.to_vec(), false));

        let mut pages = vec![Page {
            number: 1,
            blocks: first,
        }];

        for chunk in rest.chunks(layout.rows_per_page) {
            pages.push(Page {
                number: pages.len() + 1,
                blocks: vec![ledger_table(chunk.to_vec(), true)],
            });
        }

        Self {
            title: REPORT_TITLE.to_string(),
            pages,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Render as plain text, one form feed between pages
    pub fn render_text(&self) -> String {
        let total = self.pages.len();
        self.pages
            .iter()
            .map(|page| render_page(page, total))
            .collect::<Vec<_>>()
            .join("\x0c")
    }

    /// Render as pretty-printed JSON
    pub fn to_json(&self) -> LedgerResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| LedgerError::Export(e.to_string()))
    }
}

fn ledger_row(record: &ExpenseRecord, state: &BudgetState) -> LedgerRow {
    LedgerRow {
        category: record.category.clone(),
        date: record.date.format("%Y-%m-%d").to_string(),
        amount: record.amount.format_prefixed(state.currency),
    }
}

fn ledger_table(rows: Vec<LedgerRow>, continued: bool) -> Block {
    Block::LedgerTable {
        header: LEDGER_HEADER.map(String::from),
        rows,
        continued,
    }
}

fn render_page(page: &Page, total: usize) -> String {
    let mut output = String::new();

    for block in &page.blocks {
        match block {
            Block::Title { text } => {
                output.push_str(text);
                output.push('\n');
                output.push_str(&"=".repeat(text.chars().count()));
                output.push_str("\n\n");
            }
            Block::MetricsTable { rows } => {
                for row in rows {
                    output.push_str(&format!("{:<16} {:>18}\n", row.label, row.value));
                }
                output.push('\n');
            }
            Block::Image { image } => {
                output.push_str(&format!(
                    "[{}: {} {}x{}, {} bytes]\n\n",
                    image.title,
                    image.mime,
                    image.width,
                    image.height,
                    image.bytes.len()
                ));
            }
            Block::LedgerTable { header, rows, .. } => {
                output.push_str(&format!(
                    "{:<24} {:<10} {:>14}\n",
                    header[0], header[1], header[2]
                ));
                output.push_str(&"-".repeat(50));
                output.push('\n');
                for row in rows {
                    output.push_str(&format!(
                        "{:<24} {:<10} {:>14}\n",
                        row.category, row.date, row.amount
                    ));
                }
            }
        }
    }

    output.push_str(&format!("\nPage {} of {}\n", page.number, total));
    output
}

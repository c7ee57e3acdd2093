//! Export module for Spendbook
//!
//! Serializes the ledger as rows of `Category, Amount, Date` in ledger order:
//! - CSV: delimited text
//! - XLSX: single-sheet spreadsheet
//! - JSON / YAML: arrays of structured records
//!
//! Every format has a matching reader so an export can be parsed back into
//! records.

pub mod csv;
pub mod file;
pub mod json;
pub mod xlsx;
pub mod yaml;

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{ExpenseRecord, Ledger, Money};

pub use file::{write_atomic, write_export};

/// Column headers, in export order
pub const COLUMNS: [&str; 3] = ["Category", "Amount", "Date"];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Output format for a tabular export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Csv,
    Xlsx,
    Json,
    Yaml,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Csv,
        ExportFormat::Xlsx,
        ExportFormat::Json,
        ExportFormat::Yaml,
    ];

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::Json => "application/json",
            Self::Yaml => "application/yaml",
        }
    }

    /// File name used when the caller gives none
    pub fn default_file_name(&self) -> String {
        format!("expenses.{}", self.extension())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" | "excel" => Ok(Self::Xlsx),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(LedgerError::Parse(format!(
                "Unknown export format '{}' (expected csv, xlsx, json or yaml)",
                other
            ))),
        }
    }
}

/// One exported row as seen by the structured-record formats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    #[serde(rename = "Category")]
    pub category: String,

    #[serde(rename = "Amount")]
    pub amount: f64,

    #[serde(rename = "Date")]
    pub date: String,
}

impl ExportRow {
    pub fn from_record(record: &ExpenseRecord) -> Self {
        Self {
            category: record.category.clone(),
            amount: record.amount.to_f64(),
            date: format_date(record.date),
        }
    }

    pub fn into_record(self) -> LedgerResult<ExpenseRecord> {
        let amount = Money::from_f64(self.amount).map_err(|e| {
            LedgerError::Import(format!("Invalid amount {}: {}", self.amount, e))
        })?;
        let date = parse_date(&self.date)?;
        Ok(ExpenseRecord::new(self.category, amount, date))
    }
}

/// Serialize the ledger in the given format
pub fn export_ledger<W: Write>(
    ledger: &Ledger,
    format: ExportFormat,
    writer: &mut W,
) -> LedgerResult<()> {
    match format {
        ExportFormat::Csv => csv::export_csv(ledger, writer),
        ExportFormat::Xlsx => xlsx::export_xlsx(ledger, writer),
        ExportFormat::Json => json::export_json(ledger, writer),
        ExportFormat::Yaml => yaml::export_yaml(ledger, writer),
    }
}

/// Serialize the ledger into an in-memory buffer
pub fn export_to_bytes(ledger: &Ledger, format: ExportFormat) -> LedgerResult<Vec<u8>> {
    let mut buffer = Vec::new();
    export_ledger(ledger, format, &mut buffer)?;
    Ok(buffer)
}

/// Parse an export back into records, keeping row order
pub fn import_records(bytes: &[u8], format: ExportFormat) -> LedgerResult<Vec<ExpenseRecord>> {
    match format {
        ExportFormat::Csv => csv::import_csv(bytes),
        ExportFormat::Xlsx => xlsx::import_xlsx(bytes),
        ExportFormat::Json => json::import_json(bytes),
        ExportFormat::Yaml => yaml::import_yaml(bytes),
    }
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn parse_date(s: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|e| LedgerError::Import(format!("Invalid date '{}': {}", s, e)))
}

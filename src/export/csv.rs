//! CSV export and re-import
//!
//! The header row is always `Category,Amount,Date`. On import the columns are
//! located by header name, so files reordered in a spreadsheet still load.

use std::io::Write;

use csv::{Reader, StringRecord, Writer};

use super::{format_date, parse_date, COLUMNS};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{ExpenseRecord, Ledger, Money};

/// Export the ledger to CSV
pub fn export_csv<W: Write>(ledger: &Ledger, writer: &mut W) -> LedgerResult<()> {
    let mut csv_writer = Writer::from_writer(writer);

    csv_writer
        .write_record(COLUMNS)
        .map_err(|e| LedgerError::Export(e.to_string()))?;

    for record in ledger {
        csv_writer
            .write_record([
                record.category.as_str(),
                record.amount.to_string().as_str(),
                format_date(record.date).as_str(),
            ])
            .map_err(|e| LedgerError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| LedgerError::Export(e.to_string()))
}

/// Column positions resolved from a header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnMapping {
    category: usize,
    amount: usize,
    date: usize,
}

impl ColumnMapping {
    fn from_headers(headers: &StringRecord) -> LedgerResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| LedgerError::Import(format!("Missing '{}' column", name)))
        };

        Ok(Self {
            category: find(COLUMNS[0])?,
            amount: find(COLUMNS[1])?,
            date: find(COLUMNS[2])?,
        })
    }

    fn parse_row(&self, row: &StringRecord, line: usize) -> LedgerResult<ExpenseRecord> {
        let field = |idx: usize| {
            row.get(idx)
                .ok_or_else(|| LedgerError::Import(format!("Row {}: missing column {}", line, idx + 1)))
        };

        let category = field(self.category)?;
        let amount = Money::parse(field(self.amount)?)
            .map_err(|e| LedgerError::Import(format!("Row {}: {}", line, e)))?;
        let date = parse_date(field(self.date)?)?;

        Ok(ExpenseRecord::new(category, amount, date))
    }
}

/// Parse a CSV export back into records
pub fn import_csv(bytes: &[u8]) -> LedgerResult<Vec<ExpenseRecord>> {
    let mut reader = Reader::from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| LedgerError::Import(e.to_string()))?
        .clone();
    let mapping = ColumnMapping::from_headers(&headers)?;

    let mut records = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        let row = row.map_err(|e| LedgerError::Import(e.to_string()))?;
        // Header is line 1
        records.push(mapping.parse_row(&row, idx + 2)?);
    }

    Ok(records)
}

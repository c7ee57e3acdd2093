//! JSON export functionality
//!
//! The ledger is written as a pretty-printed array of
//! `{"Category", "Amount", "Date"}` records.

use std::io::Write;

use super::ExportRow;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{ExpenseRecord, Ledger};

/// Export the ledger as a JSON array of records
pub fn export_json<W: Write>(ledger: &Ledger, writer: &mut W) -> LedgerResult<()> {
    let rows: Vec<ExportRow> = ledger.iter().map(ExportRow::from_record).collect();

    serde_json::to_writer_pretty(&mut *writer, &rows)
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| LedgerError::Export(e.to_string()))?;

    Ok(())
}

/// Parse a JSON export back into records
pub fn import_json(bytes: &[u8]) -> LedgerResult<Vec<ExpenseRecord>> {
    let rows: Vec<ExportRow> =
        serde_json::from_slice(bytes).map_err(|e| LedgerError::Import(e.to_string()))?;

    rows.into_iter().map(ExportRow::into_record).collect()
}

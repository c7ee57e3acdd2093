//! Spreadsheet export and re-import
//!
//! Writes a single `Expenses` worksheet with a bold header row. Amounts are
//! numeric cells with a two-decimal number format; dates are ISO text so
//! they survive spreadsheet locale settings unchanged.

use std::io::{Cursor, Write};

use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use rust_xlsxwriter::{Format, Workbook};

use super::{format_date, parse_date, COLUMNS};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{ExpenseRecord, Ledger, Money};

/// Name of the worksheet holding the ledger
pub const SHEET_NAME: &str = "Expenses";

/// Export the ledger to an XLSX workbook
pub fn export_xlsx<W: Write>(ledger: &Ledger, writer: &mut W) -> LedgerResult<()> {
    let bytes = build_workbook(ledger).map_err(|e| LedgerError::Export(e.to_string()))?;

    writer
        .write_all(&bytes)
        .map_err(|e| LedgerError::Export(e.to_string()))
}

fn build_workbook(ledger: &Ledger) -> Result<Vec<u8>, rust_xlsxwriter::XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let amount_format = Format::new().set_num_format("0.00");

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;
        sheet.set_column_width(0, 24)?;
        sheet.set_column_width(1, 12)?;
        sheet.set_column_width(2, 12)?;

        for (col, title) in COLUMNS.iter().enumerate() {
            sheet.write_string_with_format(0, col as u16, *title, &header_format)?;
        }

        for (idx, record) in ledger.iter().enumerate() {
            let row = idx as u32 + 1;
            sheet.write_string(row, 0, record.category.as_str())?;
            sheet.write_number_with_format(row, 1, record.amount.to_f64(), &amount_format)?;
            sheet.write_string(row, 2, format_date(record.date))?;
        }
    }

    workbook.save_to_buffer()
}

/// Parse an XLSX export back into records
pub fn import_xlsx(bytes: &[u8]) -> LedgerResult<Vec<ExpenseRecord>> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))
        .map_err(|e| LedgerError::Import(format!("Not a readable workbook: {}", e)))?;

    let range = workbook
        .worksheet_range(SHEET_NAME)
        .map_err(|e| LedgerError::Import(format!("Missing '{}' sheet: {}", SHEET_NAME, e)))?;

    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| LedgerError::Import("Worksheet has no header row".into()))?;
    let columns = locate_columns(header)?;

    let mut records = Vec::new();
    for (idx, row) in rows.enumerate() {
        // Header is row 1
        let line = idx + 2;
        let cell = |col: usize| {
            row.get(col)
                .ok_or_else(|| LedgerError::Import(format!("Row {}: missing column {}", line, col + 1)))
        };

        let category = cell_text(cell(columns[0])?);
        let amount = cell_amount(cell(columns[1])?)
            .map_err(|e| LedgerError::Import(format!("Row {}: {}", line, e)))?;
        let date = parse_date(&cell_text(cell(columns[2])?))?;

        records.push(ExpenseRecord::new(category, amount, date));
    }

    Ok(records)
}

fn locate_columns(header: &[Data]) -> LedgerResult<[usize; 3]> {
    let mut positions = [0usize; 3];
    for (slot, name) in positions.iter_mut().zip(COLUMNS) {
        *slot = header
            .iter()
            .position(|cell| cell_text(cell).trim().eq_ignore_ascii_case(name))
            .ok_or_else(|| LedgerError::Import(format!("Missing '{}' column", name)))?;
    }
    Ok(positions)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn cell_amount(cell: &Data) -> LedgerResult<Money> {
    match cell {
        Data::Float(value) => Ok(Money::from_f64(*value)?),
        Data::Int(value) => Ok(Money::checked_from_units(*value)?),
        Data::String(text) => Ok(Money::parse(text)?),
        other => Err(LedgerError::Import(format!("'{}' is not an amount", other))),
    }
}

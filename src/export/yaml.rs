//! YAML export functionality
//!
//! Same record shape as the JSON export, preceded by a comment header.

use std::io::Write;

use super::ExportRow;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{ExpenseRecord, Ledger};

/// Export the ledger as a YAML sequence of records
pub fn export_yaml<W: Write>(ledger: &Ledger, writer: &mut W) -> LedgerResult<()> {
    let rows: Vec<ExportRow> = ledger.iter().map(ExportRow::from_record).collect();

    writeln!(writer, "# Spendbook expense export")
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    writeln!(writer, "# {} records", rows.len())
        .map_err(|e| LedgerError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &rows).map_err(|e| LedgerError::Export(e.to_string()))?;

    Ok(())
}

/// Parse a YAML export back into records
pub fn import_yaml(bytes: &[u8]) -> LedgerResult<Vec<ExpenseRecord>> {
    let rows: Vec<ExportRow> =
        serde_yaml::from_slice(bytes).map_err(|e| LedgerError::Import(e.to_string()))?;

    rows.into_iter().map(ExportRow::into_record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;

    #[test]
    fn test_yaml_export() {
        let ledger = Ledger::from_records(vec![ExpenseRecord::new(
            "Rent",
            Money::from_cents(50000),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )]);

        let mut buffer = Vec::new();
        export_yaml(&ledger, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.starts_with("# Spendbook expense export"));
        assert!(text.contains("Category: Rent"));
        assert!(text.contains("2024-01-01"));
    }

    #[test]
    fn test_import_hand_written_yaml() {
        let yaml = "- Category: Food\n  Amount: 12\n  Date: 2024-01-05\n";
        let records = import_yaml(yaml.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].amount.cents(), 1200);
    }
}

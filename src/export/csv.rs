//! CSV export
//!
//! Operations and budgets go to two separate spreadsheets. CSV is an
//! export-only format; nothing reads these files back.

use std::io::Write;

use crate::error::{WalletError, WalletResult};
use crate::ledger::Ledger;

pub const OPERATIONS_HEADER: [&str; 5] = ["Type", "Category", "Amount", "Date", "Description"];
pub const BUDGETS_HEADER: [&str; 5] = ["Category", "Limit", "Spent", "Remaining", "UsagePercentage"];

fn csv_err(e: csv::Error) -> WalletError {
    WalletError::Export(e.to_string())
}

/// Export every operation in log order
pub fn export_operations_csv<W: Write>(ledger: &Ledger, writer: W) -> WalletResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(OPERATIONS_HEADER)
        .map_err(csv_err)?;

    for op in ledger.operations() {
        csv_writer
            .write_record([
                op.kind().label().to_string(),
                op.category().name().to_string(),
                format!("{:.2}", op.amount()),
                op.timestamp().format("%Y-%m-%dT%H:%M:%S").to_string(),
                op.description().to_string(),
            ])
            .map_err(csv_err)?;
    }

    csv_writer
        .flush()
        .map_err(|e| WalletError::Export(e.to_string()))?;
    Ok(())
}

/// Export every budget ordered by category key
pub fn export_budgets_csv<W: Write>(ledger: &Ledger, writer: W) -> WalletResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(BUDGETS_HEADER).map_err(csv_err)?;

    for budget in ledger.budgets() {
        csv_writer
            .write_record([
                budget.category().name().to_string(),
                format!("{:.2}", budget.limit()),
                format!("{:.2}", budget.spent()),
                format!("{:.2}", budget.remaining()),
                format!("{:.1}%", budget.usage_percentage()),
            ])
            .map_err(csv_err)?;
    }

    csv_writer
        .flush()
        .map_err(|e| WalletError::Export(e.to_string()))?;
    Ok(())
}

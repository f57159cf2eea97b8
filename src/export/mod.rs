//! Export module for the wallet ledger
//!
//! Three persistence formats for a single ledger:
//! - Binary: the native snapshot, round-trips every field
//! - CSV: operations and budgets for spreadsheets (export only)
//! - JSON: machine-readable, two-way

pub mod csv;
pub mod json;

use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use tracing::debug;

use crate::error::{WalletError, WalletResult};
use crate::ledger::Ledger;
use crate::storage::{
    read_json_required, resolve_export_path, resolve_import_path, snapshot, write_atomic,
    SnapshotKind,
};

pub use self::csv::{export_budgets_csv, export_operations_csv};
pub use self::json::{export_ledger_json, import_ledger_json, parse_document, LedgerDocument};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Native binary snapshot
    Binary,
    /// CSV (operations plus a budgets file, export only)
    Csv,
    /// JSON (full ledger)
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Binary => "dat",
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Binary => "binary",
            Self::Csv => "csv",
            Self::Json => "json",
        };
        write!(f, "{}", name)
    }
}

/// `<dir>/<stem>_budgets.csv` next to the operations file
fn budgets_path(operations_path: &Path) -> PathBuf {
    let stem = operations_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    operations_path.with_file_name(format!("{}_budgets.csv", stem))
}

/// Write `ledger` under `name`, returning every file written
pub fn export_ledger(
    ledger: &Ledger,
    name: &str,
    format: ExportFormat,
    exports_dir: &Path,
) -> WalletResult<Vec<PathBuf>> {
    let path = resolve_export_path(name, format.extension(), exports_dir)?;

    let written = match format {
        ExportFormat::Binary => {
            snapshot::save(&path, SnapshotKind::Ledger, ledger)?;
            vec![path]
        }
        ExportFormat::Csv => {
            write_atomic(&path, |w| export_operations_csv(ledger, w))?;
            let budgets = budgets_path(&path);
            write_atomic(&budgets, |w| export_budgets_csv(ledger, w))?;
            vec![path, budgets]
        }
        ExportFormat::Json => {
            write_atomic(&path, |w| export_ledger_json(ledger, w))?;
            vec![path]
        }
    };

    debug!(format = %format, files = written.len(), "ledger exported");
    Ok(written)
}

fn export_only() -> WalletError {
    WalletError::InvalidArgument("CSV is export-only; import from binary or json".into())
}

/// Read a ledger previously exported under `name`
///
/// CSV is export-only and fails with `InvalidArgument`.
pub fn import_ledger(
    name: &str,
    format: ExportFormat,
    exports_dir: &Path,
) -> WalletResult<(Ledger, PathBuf)> {
    if format == ExportFormat::Csv {
        return Err(export_only());
    }

    let path = resolve_import_path(name, format.extension(), exports_dir)?;

    let ledger = match format {
        ExportFormat::Binary => snapshot::load(&path, SnapshotKind::Ledger)?,
        ExportFormat::Json => {
            let value: serde_json::Value = read_json_required(&path)?;
            parse_document(value)?.into_ledger()?
        }
        ExportFormat::Csv => return Err(export_only()),
    };

    debug!(format = %format, path = %path.display(), "ledger imported");
    Ok((ledger, path))
}

//! JSON export and import
//!
//! The only two-way interchange format. Import rebuilds a fresh ledger from
//! the document: categories first, then operations replayed in file order
//! with the balance recomputed, then budgets taken verbatim from their
//! `limit`/`spent` fields.

use std::io::{Read, Write};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{WalletError, WalletResult};
use crate::ledger::Ledger;
use crate::models::{Budget, Category, Operation, OperationKind};

const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const DATE_TIME_FALLBACK: &str = "%Y-%m-%dT%H:%M";

/// Whole-ledger JSON document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerDocument {
    /// Informational; import recomputes the balance
    #[serde(default)]
    pub balance: f64,
    #[serde(default)]
    pub total_income: f64,
    #[serde(default)]
    pub total_expense: f64,
    pub operations: Vec<OperationRecord>,
    pub categories: Vec<CategoryRecord>,
    pub budgets: Vec<BudgetRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationRecord {
    #[serde(rename = "type")]
    pub kind: OperationKind,
    pub category: String,
    pub amount: f64,
    pub date_time: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// `remaining`, `usagePercentage` and `exceeded` are derived and ignored on
/// import
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRecord {
    pub category: String,
    pub limit: f64,
    pub spent: f64,
    #[serde(default)]
    pub remaining: f64,
    #[serde(default)]
    pub usage_percentage: f64,
    #[serde(default)]
    pub exceeded: bool,
}

impl LedgerDocument {
    pub fn from_ledger(ledger: &Ledger) -> Self {
        Self {
            balance: ledger.balance(),
            total_income: ledger.total_income(),
            total_expense: ledger.total_expense(),
            operations: ledger
                .operations()
                .iter()
                .map(|op| OperationRecord {
                    kind: op.kind(),
                    category: op.category().name().to_string(),
                    amount: op.amount(),
                    date_time: op.timestamp().format(DATE_TIME_FORMAT).to_string(),
                    description: op.description().to_string(),
                })
                .collect(),
            categories: ledger
                .categories()
                .map(|c| CategoryRecord {
                    name: c.name().to_string(),
                    description: c.description().to_string(),
                })
                .collect(),
            budgets: ledger
                .budgets()
                .map(|b| BudgetRecord {
                    category: b.category().name().to_string(),
                    limit: b.limit(),
                    spent: b.spent(),
                    remaining: b.remaining(),
                    usage_percentage: b.usage_percentage(),
                    exceeded: b.is_exceeded(),
                })
                .collect(),
        }
    }

    /// Rebuild a ledger from this document
    pub fn into_ledger(self) -> WalletResult<Ledger> {
        let mut ledger = Ledger::new();

        for record in self.categories {
            if record.name.trim().is_empty() {
                continue;
            }
            ledger.add_category(Category::new(record.name, record.description)?);
        }

        for (index, record) in self.operations.into_iter().enumerate() {
            let category = resolve_category(&mut ledger, &record.category)?;
            let timestamp = parse_date_time(&record.date_time).ok_or_else(|| {
                WalletError::ImportParseError(format!(
                    "operation {}: invalid dateTime '{}'",
                    index + 1,
                    record.date_time
                ))
            })?;

            let operation = Operation::new(
                record.kind,
                record.amount,
                Some(category),
                Some(timestamp),
                record.description,
            )
            .map_err(|e| WalletError::ImportParseError(format!("operation {}: {}", index + 1, e)))?;

            ledger.replay_operation(operation);
        }

        for record in self.budgets {
            if record.category.trim().is_empty() {
                return Err(WalletError::ImportParseError(
                    "budget without a category".into(),
                ));
            }
            let category = resolve_category(&mut ledger, &record.category)?;
            ledger.insert_budget(Budget::with_spent(category, record.limit, record.spent));
        }

        Ok(ledger)
    }
}

/// The ledger's category for `name`, created with an empty description if
/// missing. A blank name maps to the unnamed placeholder.
fn resolve_category(ledger: &mut Ledger, name: &str) -> WalletResult<Category> {
    if name.trim().is_empty() {
        return Ok(Category::default());
    }
    if let Some(existing) = ledger.get_category(name) {
        return Ok(existing.clone());
    }
    let created = Category::new(name, "")?;
    ledger.add_category(created.clone());
    Ok(created)
}

fn parse_date_time(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, DATE_TIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, DATE_TIME_FALLBACK))
        .ok()
}

/// Write a ledger as pretty-printed JSON
pub fn export_ledger_json<W: Write>(ledger: &Ledger, writer: &mut W) -> WalletResult<()> {
    let document = LedgerDocument::from_ledger(ledger);
    serde_json::to_writer_pretty(&mut *writer, &document)
        .map_err(|e| WalletError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| WalletError::Export(e.to_string()))?;
    Ok(())
}

/// Decode a document, which must be a JSON object
pub fn parse_document(value: serde_json::Value) -> WalletResult<LedgerDocument> {
    if !value.is_object() {
        return Err(WalletError::ImportParseError(
            "expected a JSON object at the top level".into(),
        ));
    }
    serde_json::from_value(value).map_err(|e| WalletError::ImportParseError(e.to_string()))
}

/// Read a ledger from JSON
pub fn import_ledger_json<R: Read>(reader: R) -> WalletResult<Ledger> {
    let value: serde_json::Value = serde_json::from_reader(reader)
        .map_err(|e| WalletError::ImportParseError(e.to_string()))?;
    parse_document(value)?.into_ledger()
}

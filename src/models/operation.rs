//! Operation model
//!
//! A single timestamped income or expense. The stored amount is always
//! strictly positive; the [`OperationKind`] decides the sign it contributes
//! to a ledger balance.

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::money::format_amount;
use crate::error::{WalletError, WalletResult};

/// Whether an operation adds to or subtracts from the balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OperationKind {
    Income,
    Expense,
}

impl OperationKind {
    /// Human-readable label used in reports and CSV files
    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }

    /// +1 for income, -1 for expense
    pub fn sign(&self) -> f64 {
        match self {
            Self::Income => 1.0,
            Self::Expense => -1.0,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A monetary event in a ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    kind: OperationKind,
    amount: f64,
    category: Category,
    timestamp: NaiveDateTime,
    #[serde(default)]
    description: String,
}

impl Operation {
    /// Create an operation
    ///
    /// `category` falls back to the unnamed placeholder and `timestamp` to the
    /// current local time when omitted. Fails with `InvalidArgument` unless
    /// `amount` is finite and greater than zero.
    pub fn new(
        kind: OperationKind,
        amount: f64,
        category: Option<Category>,
        timestamp: Option<NaiveDateTime>,
        description: impl Into<String>,
    ) -> WalletResult<Self> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(WalletError::InvalidArgument(format!(
                "Amount must be positive, got {}",
                amount
            )));
        }

        Ok(Self {
            kind,
            amount,
            category: category.unwrap_or_default(),
            timestamp: timestamp.unwrap_or_else(|| Local::now().naive_local()),
            description: description.into(),
        })
    }

    /// Income in `category`, stamped now
    pub fn income(
        amount: f64,
        category: Category,
        description: impl Into<String>,
    ) -> WalletResult<Self> {
        Self::new(OperationKind::Income, amount, Some(category), None, description)
    }

    /// Expense in `category`, stamped now
    pub fn expense(
        amount: f64,
        category: Category,
        description: impl Into<String>,
    ) -> WalletResult<Self> {
        Self::new(OperationKind::Expense, amount, Some(category), None, description)
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn is_income(&self) -> bool {
        self.kind == OperationKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == OperationKind::Expense
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Contribution to the balance
    pub fn signed_amount(&self) -> f64 {
        self.kind.sign() * self.amount
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Re-point this operation at another category
    pub fn set_category(&mut self, category: Category) {
        self.category = category;
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.kind {
            OperationKind::Income => "+",
            OperationKind::Expense => "-",
        };
        write!(
            f,
            "{} | {:<7} | {}{} | {}",
            self.timestamp.format("%d.%m.%Y %H:%M"),
            self.kind.label(),
            sign,
            format_amount(self.amount),
            self.category.name()
        )?;
        if !self.description.is_empty() {
            write!(f, " | {}", self.description)?;
        }
        Ok(())
    }
}

//! Ledger notifications
//!
//! Budget and financial-health notices derived while operations are appended.
//! They are queued on the ledger and handed out at most once by
//! [`NotificationQueue::drain`]; the queue is never persisted.

use std::fmt;

use crate::models::money::format_amount;

/// Expense/income ratio above which a high-expense notice fires
pub const HIGH_EXPENSE_RATIO: f64 = 90.0;

/// Balance below this share of total income counts as a low reserve
pub const LOW_RESERVE_SHARE: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    BudgetExceeded {
        category: String,
        spent: f64,
        limit: f64,
    },
    BudgetNearLimit {
        category: String,
        spent: f64,
        limit: f64,
        percentage: f64,
    },
    NegativeBalance {
        balance: f64,
    },
    /// Expenses above [`HIGH_EXPENSE_RATIO`] percent of income
    HighExpenseRatio {
        percentage: f64,
    },
    LowReserve {
        balance: f64,
        total_income: f64,
    },
}

impl Notification {
    /// Balance-level notices, as opposed to per-budget ones
    pub fn is_financial_health(&self) -> bool {
        matches!(
            self,
            Self::NegativeBalance { .. } | Self::HighExpenseRatio { .. } | Self::LowReserve { .. }
        )
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BudgetExceeded {
                category,
                spent,
                limit,
            } => write!(
                f,
                "WARNING: budget exceeded for '{}': spent {}, limit {}",
                category,
                format_amount(*spent),
                format_amount(*limit)
            ),
            Self::BudgetNearLimit {
                category,
                spent,
                limit,
                percentage,
            } => write!(
                f,
                "INFO: budget for '{}' is almost used up: {} of {} ({:.1}%)",
                category,
                format_amount(*spent),
                format_amount(*limit),
                percentage
            ),
            Self::NegativeBalance { balance } => write!(
                f,
                "CRITICAL: negative balance, expenses exceed income. Current balance: {}",
                format_amount(*balance)
            ),
            Self::HighExpenseRatio { percentage } => write!(
                f,
                "WARNING: expenses are {:.1}% of income",
                percentage
            ),
            Self::LowReserve {
                balance,
                total_income,
            } => write!(
                f,
                "INFO: balance {} is below 10% of total income {}",
                format_amount(*balance),
                format_amount(*total_income)
            ),
        }
    }
}

/// FIFO of notifications awaiting delivery
#[derive(Debug, Clone, Default)]
pub struct NotificationQueue {
    pending: Vec<Notification>,
}

impl NotificationQueue {
    pub fn push(&mut self, notification: Notification) {
        self.pending.push(notification);
    }

    /// Everything queued since the previous drain, in emission order
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }

    /// Keep only the notices matching `keep`, preserving order
    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&Notification) -> bool,
    {
        self.pending.retain(keep);
    }

    pub fn pending(&self) -> &[Notification] {
        &self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

//! Budget model
//!
//! A spending cap for one category together with the running total spent
//! against it.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;

/// Usage at or above this share of the limit counts as near the limit
pub const NEAR_LIMIT_THRESHOLD: f64 = 0.8;

/// Derived state of a budget, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    Exceeded,
    NearLimit,
    Normal,
}

impl BudgetStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Exceeded => "EXCEEDED",
            Self::NearLimit => "NEAR LIMIT",
            Self::Normal => "OK",
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    category: Category,
    limit: f64,
    spent: f64,
}

impl Budget {
    /// A budget with nothing spent yet
    pub fn new(category: Category, limit: f64) -> Self {
        Self::with_spent(category, limit, 0.0)
    }

    /// A budget carrying spending accumulated elsewhere
    pub fn with_spent(category: Category, limit: f64, spent: f64) -> Self {
        Self {
            category,
            limit,
            spent,
        }
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn limit(&self) -> f64 {
        self.limit
    }

    pub fn spent(&self) -> f64 {
        self.spent
    }

    /// Overwrite the limit, keeping `spent`
    pub fn set_limit(&mut self, limit: f64) {
        self.limit = limit;
    }

    /// Record an expense against this budget
    pub fn add_expense(&mut self, amount: f64) {
        self.spent += amount;
    }

    pub(crate) fn set_category(&mut self, category: Category) {
        self.category = category;
    }

    /// May be negative once exceeded
    pub fn remaining(&self) -> f64 {
        self.limit - self.spent
    }

    pub fn is_exceeded(&self) -> bool {
        self.spent > self.limit
    }

    /// `spent` within `[80%, 100%)` of the limit
    pub fn is_near_limit(&self) -> bool {
        self.spent >= NEAR_LIMIT_THRESHOLD * self.limit && self.spent < self.limit
    }

    /// Spent as a percentage of the limit, 0 for a zero limit
    pub fn usage_percentage(&self) -> f64 {
        if self.limit == 0.0 {
            0.0
        } else {
            self.spent / self.limit * 100.0
        }
    }

    pub fn status(&self) -> BudgetStatus {
        if self.is_exceeded() {
            BudgetStatus::Exceeded
        } else if self.is_near_limit() {
            BudgetStatus::NearLimit
        } else {
            BudgetStatus::Normal
        }
    }
}

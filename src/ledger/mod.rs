//! The ledger: one owner's balance, categories, budgets and operation log
//!
//! Every mutation goes through the methods here. Appending an operation keeps
//! the balance in step with the log, charges the matching budget and queues
//! any budget or financial-health notices. Aggregate queries live in
//! [`queries`].

pub mod notifications;
pub mod queries;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{WalletError, WalletResult};
use crate::models::{category_key, Budget, Category, DefaultCategory, Operation};

pub use notifications::{Notification, NotificationQueue};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    balance: f64,
    /// Keyed by lowercased name
    categories: BTreeMap<String, Category>,
    /// Keyed by lowercased category name
    budgets: BTreeMap<String, Budget>,
    /// Append order
    operations: Vec<Operation>,
    #[serde(skip)]
    notifications: NotificationQueue,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// An empty ledger seeded with the default categories
    pub fn new() -> Self {
        let mut ledger = Self {
            balance: 0.0,
            categories: BTreeMap::new(),
            budgets: BTreeMap::new(),
            operations: Vec::new(),
            notifications: NotificationQueue::default(),
        };
        for default in DefaultCategory::all() {
            ledger.add_category(default.to_category());
        }
        ledger
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    // --- categories -------------------------------------------------------

    /// Insert or overwrite the category stored under the same key
    pub fn add_category(&mut self, category: Category) {
        self.categories.insert(category.key(), category);
    }

    pub fn remove_category(&mut self, name: &str) -> Option<Category> {
        self.categories.remove(&category_key(name))
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.categories.contains_key(&category_key(name))
    }

    pub fn get_category(&self, name: &str) -> Option<&Category> {
        self.categories.get(&category_key(name))
    }

    /// All categories ordered by key
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.values()
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    // --- operations -------------------------------------------------------

    /// Append an operation, applying its balance and budget effects
    pub fn append_operation(&mut self, operation: Operation) {
        self.balance += operation.signed_amount();

        if operation.is_expense() {
            if let Some(budget) = self.budgets.get_mut(&operation.category().key()) {
                budget.add_expense(operation.amount());

                if budget.is_exceeded() {
                    self.notifications.push(Notification::BudgetExceeded {
                        category: budget.category().name().to_string(),
                        spent: budget.spent(),
                        limit: budget.limit(),
                    });
                } else if budget.is_near_limit() {
                    self.notifications.push(Notification::BudgetNearLimit {
                        category: budget.category().name().to_string(),
                        spent: budget.spent(),
                        limit: budget.limit(),
                        percentage: budget.usage_percentage(),
                    });
                }
            }
        }

        self.operations.push(operation);
        self.check_financial_health();
    }

    /// Append without budget charges or notices, for rebuilding from a file
    pub(crate) fn replay_operation(&mut self, operation: Operation) {
        self.balance += operation.signed_amount();
        self.operations.push(operation);
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Mutable access for re-pointing categories and descriptions
    ///
    /// Amounts and kinds are immutable on [`Operation`], so the balance stays
    /// consistent with the log.
    pub fn operations_mut(&mut self) -> impl Iterator<Item = &mut Operation> {
        self.operations.iter_mut()
    }

    /// Rebuild the balance from the full log
    pub fn recompute_balance(&mut self) -> f64 {
        self.balance = self
            .operations
            .iter()
            .map(Operation::signed_amount)
            .fold(0.0, |acc, amount| acc + amount);
        self.balance
    }

    // --- budgets ----------------------------------------------------------

    /// Create or replace the budget for a known category
    ///
    /// `spent` starts from the expenses already logged in that category.
    pub fn set_budget(&mut self, category_name: &str, limit: f64) -> WalletResult<&Budget> {
        let category = self
            .get_category(category_name)
            .cloned()
            .ok_or_else(|| WalletError::CategoryNotFound(category_name.to_string()))?;

        let spent = self.expense_by_category(category.name());
        let key = category.key();
        self.budgets
            .insert(key.clone(), Budget::with_spent(category, limit, spent));

        self.budgets
            .get(&key)
            .ok_or_else(|| WalletError::BudgetNotFound(category_name.to_string()))
    }

    /// Change the limit of an existing budget, keeping `spent`
    pub fn edit_budget(&mut self, category_name: &str, limit: f64) -> WalletResult<&Budget> {
        let budget = self
            .budgets
            .get_mut(&category_key(category_name))
            .ok_or_else(|| WalletError::BudgetNotFound(category_name.to_string()))?;

        budget.set_limit(limit);
        Ok(&*budget)
    }

    /// Idempotent
    pub fn remove_budget(&mut self, category_name: &str) -> Option<Budget> {
        self.budgets.remove(&category_key(category_name))
    }

    /// Store a budget as-is under its category's key
    pub fn insert_budget(&mut self, budget: Budget) {
        self.budgets.insert(budget.category().key(), budget);
    }

    pub fn budget(&self, category_name: &str) -> Option<&Budget> {
        self.budgets.get(&category_key(category_name))
    }

    pub fn has_budget(&self, category_name: &str) -> bool {
        self.budgets.contains_key(&category_key(category_name))
    }

    /// All budgets ordered by key
    pub fn budgets(&self) -> impl Iterator<Item = &Budget> {
        self.budgets.values()
    }

    pub(crate) fn budgets_mut(&mut self) -> impl Iterator<Item = &mut Budget> {
        self.budgets.values_mut()
    }

    // --- notifications ----------------------------------------------------

    /// Queue notices about a negative balance, a high expense ratio or a low
    /// reserve
    pub fn check_financial_health(&mut self) {
        if self.balance < 0.0 {
            self.notifications.push(Notification::NegativeBalance {
                balance: self.balance,
            });
        }

        let total_income = self.total_income();
        if total_income > 0.0 {
            let percentage = self.total_expense() / total_income * 100.0;
            if percentage > notifications::HIGH_EXPENSE_RATIO {
                self.notifications
                    .push(Notification::HighExpenseRatio { percentage });
            }
            if self.balance < notifications::LOW_RESERVE_SHARE * total_income {
                self.notifications.push(Notification::LowReserve {
                    balance: self.balance,
                    total_income,
                });
            }
        }
    }

    /// Replace queued health notices with one check of the current state
    ///
    /// Budget notices stay queued untouched.
    pub fn refresh_financial_health(&mut self) {
        self.notifications.retain(|n| !n.is_financial_health());
        self.check_financial_health();
    }

    pub fn pending_notifications(&self) -> &[Notification] {
        self.notifications.pending()
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }
}

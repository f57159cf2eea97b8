//! Aggregate queries over a ledger's operation log
//!
//! Totals, per-category sums and date-range filters. Ranges compare the
//! operation's calendar date only; time of day is ignored.

use std::collections::BTreeMap;

use super::Ledger;
use crate::models::{DateRange, Operation, OperationKind};

impl Ledger {
    fn sum_where<F>(&self, mut keep: F) -> f64
    where
        F: FnMut(&Operation) -> bool,
    {
        self.operations()
            .iter()
            .filter(|op| keep(*op))
            .map(Operation::amount)
            // an empty f64 sum is -0.0
            .fold(0.0, |acc, amount| acc + amount)
    }

    /// Sums keyed by category display name
    fn group_where<F>(&self, mut keep: F) -> BTreeMap<String, f64>
    where
        F: FnMut(&Operation) -> bool,
    {
        let mut grouped = BTreeMap::new();
        for op in self.operations().iter().filter(|op| keep(*op)) {
            *grouped
                .entry(op.category().name().to_string())
                .or_insert(0.0) += op.amount();
        }
        grouped
    }

    pub fn total_income(&self) -> f64 {
        self.sum_where(Operation::is_income)
    }

    pub fn total_expense(&self) -> f64 {
        self.sum_where(Operation::is_expense)
    }

    pub fn income_by_category(&self, name: &str) -> f64 {
        self.sum_where(|op| op.is_income() && op.category().matches(name))
    }

    pub fn expense_by_category(&self, name: &str) -> f64 {
        self.sum_where(|op| op.is_expense() && op.category().matches(name))
    }

    pub fn income_grouped(&self) -> BTreeMap<String, f64> {
        self.group_where(Operation::is_income)
    }

    pub fn expense_grouped(&self) -> BTreeMap<String, f64> {
        self.group_where(Operation::is_expense)
    }

    /// Operations dated within `range`, in log order
    pub fn operations_in(&self, range: &DateRange) -> Vec<&Operation> {
        self.operations()
            .iter()
            .filter(|op| range.contains(op.date()))
            .collect()
    }

    pub fn total_in(&self, kind: OperationKind, range: &DateRange) -> f64 {
        self.sum_where(|op| op.kind() == kind && range.contains(op.date()))
    }

    pub fn total_income_in(&self, range: &DateRange) -> f64 {
        self.total_in(OperationKind::Income, range)
    }

    pub fn total_expense_in(&self, range: &DateRange) -> f64 {
        self.total_in(OperationKind::Expense, range)
    }

    pub fn grouped_in(&self, kind: OperationKind, range: &DateRange) -> BTreeMap<String, f64> {
        self.group_where(|op| op.kind() == kind && range.contains(op.date()))
    }

    /// Sum of one kind for one category, all time when `range` is `None`
    pub fn category_total(
        &self,
        kind: OperationKind,
        name: &str,
        range: Option<&DateRange>,
    ) -> f64 {
        self.sum_where(|op| {
            op.kind() == kind
                && op.category().matches(name)
                && range.map_or(true, |r| r.contains(op.date()))
        })
    }
}

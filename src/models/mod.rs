//! Core data models for the wallet ledger
//!
//! This module contains the leaf types the ledger is built from: categories,
//! operations, budgets, date ranges, owners and transfer records.

pub mod budget;
pub mod category;
pub mod money;
pub mod operation;
pub mod owner;
pub mod period;
pub mod transfer;

pub use budget::{Budget, BudgetStatus};
pub use category::{category_key, Category, DefaultCategory};
pub use money::{format_amount, parse_amount};
pub use operation::{Operation, OperationKind};
pub use owner::Owner;
pub use period::{parse_date, DateRange};
pub use transfer::Transfer;

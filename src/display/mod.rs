//! Display formatting for terminal output
//!
//! Renders ledgers, budgets and transfers as plain text for the shell.

pub mod layout;
pub mod operations;
pub mod report;

pub use operations::{format_operations, format_transfers};
pub use report::{
    format_balance, format_budgets, format_category_stats, format_detailed_report,
    format_statistics, format_summary,
};

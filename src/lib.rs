//! Wallet ledger - terminal personal-finance ledger
//!
//! A multi-user ledger of income and expenses with per-category budgets,
//! budget and balance notifications, peer transfers between users, and
//! binary, CSV and JSON persistence.
//!
//! # Architecture
//!
//! - `config`: data-directory paths and settings
//! - `error`: the error taxonomy
//! - `models`: categories, operations, budgets, owners, transfers, dates, money
//! - `ledger`: the per-owner ledger, its queries and notification queue
//! - `auth`: credential policy and password hashing
//! - `storage`: atomic writes, the binary snapshot codec, the owner registry
//! - `export`: CSV and JSON export, ledger import
//! - `audit`: append-only audit trail
//! - `services`: the session orchestrator
//! - `display`: text reports
//! - `cli`: the line-command shell
//!
//! # Example
//!
//! ```rust,ignore
//! use wallet_ledger::config::WalletPaths;
//! use wallet_ledger::services::FinanceManager;
//!
//! let mut manager = FinanceManager::open(WalletPaths::new()?)?;
//! manager.register("alice", "secret")?;
//! manager.login("alice", "secret")?;
//! manager.add_income(1000.0, "Salary", "")?;
//! ```

pub mod audit;
pub mod auth;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{WalletError, WalletResult};

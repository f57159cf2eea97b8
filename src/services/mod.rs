//! Service layer for the wallet ledger
//!
//! The finance manager sits between the command interpreter and the ledgers:
//! it owns the owner registry, gates every ledger operation behind a login
//! session and keeps persistence and the audit trail in step.

pub mod manager;

pub use manager::FinanceManager;

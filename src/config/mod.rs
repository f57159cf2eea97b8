//! Configuration module for the wallet ledger
//!
//! This module provides configuration management including:
//! - Data-directory path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::WalletPaths;
pub use settings::Settings;

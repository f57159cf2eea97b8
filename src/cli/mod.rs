//! Line-command interpreter
//!
//! `commands` holds the clap grammar for one shell line and `shell` runs the
//! read-dispatch-print loop against a [`crate::services::FinanceManager`].

pub mod commands;
pub mod shell;

pub use commands::{ShellCommand, ShellLine};
pub use shell::{Flow, Shell};

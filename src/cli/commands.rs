//! Shell command grammar
//!
//! Every line typed into the shell is split into words and parsed as one of
//! these subcommands. Names use underscores; the kebab-case spelling is
//! accepted as an alias.

use clap::{Parser, Subcommand};

use crate::export::ExportFormat;

/// One parsed shell line
#[derive(Parser, Debug)]
#[command(
    name = "wallet",
    no_binary_name = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

/// Shell subcommands
#[derive(Subcommand, Debug, PartialEq)]
pub enum ShellCommand {
    /// Create a new user
    Register { login: String, password: String },

    /// Start a session
    Login { login: String, password: String },

    /// End the current session
    Logout,

    /// Record income, e.g. `add_income 20000 Salary "first half"`
    #[command(name = "add_income", alias = "add-income")]
    AddIncome {
        #[arg(allow_hyphen_values = true)]
        amount: String,
        category: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        description: Vec<String>,
    },

    /// Record an expense
    #[command(name = "add_expense", alias = "add-expense")]
    AddExpense {
        #[arg(allow_hyphen_values = true)]
        amount: String,
        category: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        description: Vec<String>,
    },

    /// Set a spending limit for a category
    #[command(name = "set_budget", alias = "set-budget")]
    SetBudget {
        category: String,
        #[arg(allow_hyphen_values = true)]
        limit: String,
    },

    /// Change an existing budget's limit
    #[command(name = "edit_budget", alias = "edit-budget")]
    EditBudget {
        category: String,
        #[arg(allow_hyphen_values = true)]
        limit: String,
    },

    /// Delete a budget
    #[command(name = "remove_budget", alias = "remove-budget")]
    RemoveBudget { category: String },

    /// Send money to another user
    Transfer {
        to: String,
        #[arg(allow_hyphen_values = true)]
        amount: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        description: Vec<String>,
    },

    /// Create a category
    #[command(name = "add_category", alias = "add-category")]
    AddCategory {
        name: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        description: Vec<String>,
    },

    /// Rename a category or change its description
    #[command(name = "edit_category", alias = "edit-category")]
    EditCategory {
        old: String,
        new: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        description: Vec<String>,
    },

    /// Show the balance and totals
    Balance,

    /// Statistics, optionally for some categories or a date range
    Stats {
        /// Restrict to these categories
        categories: Vec<String>,
        /// Date range, dd.mm.yyyy-dd.mm.yyyy
        #[arg(short, long)]
        period: Option<String>,
    },

    /// List budgets with their status
    Budgets,

    /// List operations, newest first
    Operations {
        /// Date range, dd.mm.yyyy-dd.mm.yyyy
        #[arg(short, long)]
        period: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Detailed financial report
    Report,

    /// Short summary of income, expenses and budgets
    Summary,

    /// Load sample data into the current ledger
    Demo,

    /// Write the ledger to a file
    Export {
        name: String,
        #[arg(value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
    },

    /// Replace the ledger with one read from a file
    Import {
        name: String,
        #[arg(value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// List transfers sent or received
    Transfers,

    /// Show available commands
    Help,

    /// Clear the screen
    Clear,

    /// Save and leave the shell
    #[command(alias = "quit")]
    Exit,
}

/// Join trailing words back into one description
pub fn join_words(words: &[String]) -> String {
    words.join(" ")
}

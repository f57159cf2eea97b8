//! Custom error types for the wallet ledger
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for wallet operations
#[derive(Error, Debug)]
pub enum WalletError {
    /// Bad amount, empty category name, out-of-range limit
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A user with this login is already registered
    #[error("User already exists: {0}")]
    DuplicateUser(String),

    /// Credentials failed the policy or the password did not match
    #[error("Invalid credentials: {0}")]
    CredentialsInvalid(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Category already exists: {0}")]
    CategoryAlreadyExists(String),

    #[error("Budget not found for category: {0}")]
    BudgetNotFound(String),

    #[error("Cannot transfer money to yourself")]
    SelfTransfer,

    /// Sender balance does not cover the transfer
    #[error("Insufficient funds: need {needed:.2}, have {available:.2}")]
    InsufficientFunds { needed: f64, available: f64 },

    #[error("Recipient not found: {0}")]
    RecipientNotFound(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    /// An import file exists but could not be decoded into a ledger
    #[error("Import error: {0}")]
    ImportParseError(String),

    #[error("Invalid date '{0}': expected dd.mm.yyyy")]
    InvalidDate(String),

    #[error("Authentication required: use 'login' first")]
    Unauthenticated,

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors (snapshot encode/decode, atomic writes)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl WalletError {
    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::CategoryNotFound(_)
                | Self::BudgetNotFound(_)
                | Self::RecipientNotFound(_)
                | Self::FileNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument(_) | Self::CredentialsInvalid(_) | Self::InvalidDate(_)
        )
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for WalletError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for WalletError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for wallet operations
pub type WalletResult<T> = Result<T, WalletError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WalletError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = WalletError::CategoryNotFound("Food".into());
        assert_eq!(err.to_string(), "Category not found: Food");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_insufficient_funds_error() {
        let err = WalletError::InsufficientFunds {
            needed: 5000.0,
            available: 3000.5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient funds: need 5000.00, have 3000.50"
        );
    }

    #[test]
    fn test_validation_kinds() {
        assert!(WalletError::InvalidDate("2023-10-01".into()).is_validation());
        assert!(WalletError::InvalidArgument("amount".into()).is_validation());
        assert!(!WalletError::SelfTransfer.is_validation());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let wallet_err: WalletError = io_err.into();
        assert!(matches!(wallet_err, WalletError::Io(_)));
    }
}

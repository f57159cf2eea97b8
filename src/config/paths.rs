//! Path management for the wallet ledger
//!
//! Resolves where settings, the owner registry, the audit trail and exports live.
//!
//! ## Path Resolution Order
//!
//! 1. `WALLET_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory joined with `wallet-ledger`
//!    (`~/.config/wallet-ledger` on Linux, `%APPDATA%\wallet-ledger` on Windows)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::WalletError;

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "WALLET_DATA_DIR";

/// Manages all paths used by the wallet ledger
#[derive(Debug, Clone)]
pub struct WalletPaths {
    /// Base directory for all wallet data
    base_dir: PathBuf,
}

impl WalletPaths {
    /// Create a new WalletPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and the
    /// override variable is not set.
    pub fn new() -> Result<Self, WalletError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create WalletPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the persisted owner registry
    pub fn registry_file(&self) -> PathBuf {
        self.base_dir.join("users_data.dat")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Directory that bare export file names resolve into
    pub fn exports_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Ensure the base directory exists
    ///
    /// The exports directory is created on demand by the first export.
    pub fn ensure_directories(&self) -> Result<(), WalletError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| WalletError::Io(format!("Failed to create base directory: {}", e)))?;

        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, WalletError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| WalletError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("wallet-ledger"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = WalletPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.exports_dir(), temp_dir.path().join("exports"));
        assert_eq!(paths.registry_file(), temp_dir.path().join("users_data.dat"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("nested").join("wallet");
        let paths = WalletPaths::with_base_dir(nested.clone());

        paths.ensure_directories().unwrap();

        assert!(nested.exists());
        assert!(!paths.exports_dir().exists());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = WalletPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.audit_log(), temp_dir.path().join("audit.log"));
    }
}

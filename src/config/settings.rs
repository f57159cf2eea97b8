//! User settings for the wallet ledger
//!
//! Manages persistence behaviour, report sizing, the credential policy and
//! password hashing costs.

use serde::{Deserialize, Serialize};

use super::paths::WalletPaths;
use crate::auth::{CredentialPolicy, HashParams};
use crate::error::WalletError;
use crate::storage::write_json_atomic;

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Save the registry after every ledger mutation
    #[serde(default = "default_autosave")]
    pub autosave: bool,

    /// How many expense categories the detailed report lists
    #[serde(default = "default_top_expense_categories")]
    pub top_expense_categories: usize,

    /// Minimum login/password lengths enforced at registration
    #[serde(default)]
    pub credentials: CredentialPolicy,

    /// Argon2 cost parameters for new password hashes
    #[serde(default)]
    pub password_hashing: HashParams,
}

fn default_schema_version() -> u32 {
    1
}

fn default_autosave() -> bool {
    true
}

fn default_top_expense_categories() -> usize {
    5
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            autosave: default_autosave(),
            top_expense_categories: default_top_expense_categories(),
            credentials: CredentialPolicy::default(),
            password_hashing: HashParams::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &WalletPaths) -> Result<Self, WalletError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| WalletError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                WalletError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &WalletPaths) -> Result<(), WalletError> {
        paths.ensure_directories()?;

        write_json_atomic(paths.settings_file(), self)
    }
}

//! Persisted owner registry
//!
//! The map from login to [`Owner`], stored as one binary snapshot. A missing
//! file is an empty registry.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::{debug, info};

use super::snapshot::{self, SnapshotKind};
use crate::error::{WalletError, WalletResult};
use crate::models::Owner;

pub type Registry = BTreeMap<String, Owner>;

/// Loads and saves the registry file
#[derive(Debug, Clone)]
pub struct RegistryStore {
    path: PathBuf,
}

impl RegistryStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn load(&self) -> WalletResult<Registry> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "no registry file, starting empty");
            return Ok(Registry::new());
        }

        let registry: Registry =
            snapshot::load(&self.path, SnapshotKind::Registry).map_err(|e| match e {
                WalletError::ImportParseError(msg) => WalletError::Storage(format!(
                    "Registry {} is unreadable: {}",
                    self.path.display(),
                    msg
                )),
                other => other,
            })?;

        debug!(owners = registry.len(), "registry loaded");
        Ok(registry)
    }

    pub fn save(&self, registry: &Registry) -> WalletResult<()> {
        snapshot::save(&self.path, SnapshotKind::Registry, registry)?;
        debug!(owners = registry.len(), "registry saved");
        Ok(())
    }
}

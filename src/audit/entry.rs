//! Audit entry data structures
//!
//! Registry-level events worth keeping after the session ends: who registered,
//! which transfers moved money, which files were imported or exported, which
//! categories were renamed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::PathBuf;

use crate::models::Transfer;

/// Kinds of audited events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Register,
    Transfer,
    Import,
    Export,
    CategoryRename,
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditAction::Register => write!(f, "REGISTER"),
            AuditAction::Transfer => write!(f, "TRANSFER"),
            AuditAction::Import => write!(f, "IMPORT"),
            AuditAction::Export => write!(f, "EXPORT"),
            AuditAction::CategoryRename => write!(f, "CATEGORY_RENAME"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the event occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub action: AuditAction,

    /// Login of the owner who triggered the event
    pub actor: String,

    /// What the event touched: a recipient, a file, a category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AuditEntry {
    fn new(action: AuditAction, actor: &str, subject: Option<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            action,
            actor: actor.to_string(),
            subject,
            details: None,
        }
    }

    pub fn register(login: &str) -> Self {
        Self::new(AuditAction::Register, login, None)
    }

    /// Carries the full transfer record in `details`
    pub fn transfer(transfer: &Transfer) -> Self {
        let mut entry = Self::new(AuditAction::Transfer, &transfer.from, Some(transfer.to.clone()));
        entry.details = serde_json::to_value(transfer).ok();
        entry
    }

    pub fn import(actor: &str, path: &std::path::Path, format: &str) -> Self {
        let mut entry = Self::new(AuditAction::Import, actor, Some(path.display().to_string()));
        entry.details = Some(json!({ "format": format }));
        entry
    }

    pub fn export(actor: &str, paths: &[PathBuf], format: &str) -> Self {
        let files: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
        let mut entry = Self::new(AuditAction::Export, actor, files.first().cloned());
        entry.details = Some(json!({ "format": format, "files": files }));
        entry
    }

    pub fn category_rename(actor: &str, old: &str, new: &str) -> Self {
        let mut entry = Self::new(AuditAction::CategoryRename, actor, Some(new.to_string()));
        entry.details = Some(json!({ "from": old, "to": new }));
        entry
    }

    /// The transfer record of a transfer entry
    pub fn transfer_record(&self) -> Option<Transfer> {
        if self.action != AuditAction::Transfer {
            return None;
        }
        self.details
            .as_ref()
            .and_then(|d| serde_json::from_value(d.clone()).ok())
    }
}

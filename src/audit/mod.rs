//! Audit trail for the wallet ledger
//!
//! An append-only JSONL log of registry-level events.
//!
//! - `AuditEntry`: one event with timestamp, action, actor and optional
//!   subject and details. Transfer entries carry the full transfer record.
//! - `AuditLogger`: appends entries and reads them back, including the
//!   transfer history of one owner.

mod entry;
mod logger;

pub use entry::{AuditAction, AuditEntry};
pub use logger::AuditLogger;

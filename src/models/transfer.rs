//! Transfer record
//!
//! The immutable trace of a completed transfer between two owners. The ledger
//! effects themselves are ordinary operations; this record exists for the
//! audit trail and the transfer history listing.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::money::format_amount;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub id: Uuid,
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub timestamp: NaiveDateTime,
    #[serde(default)]
    pub description: String,
}

impl Transfer {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        amount: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            from: from.into(),
            to: to.into(),
            amount,
            timestamp: Local::now().naive_local(),
            description: description.into(),
        }
    }

    /// Whether `login` sent or received this transfer
    pub fn involves(&self, login: &str) -> bool {
        self.from == login || self.to == login
    }
}

impl fmt::Display for Transfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} -> {} | {}",
            self.timestamp.format("%d.%m.%Y %H:%M"),
            self.from,
            self.to,
            format_amount(self.amount)
        )?;
        if !self.description.is_empty() {
            write!(f, " | {}", self.description)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_involves() {
        let transfer = Transfer::new("alice", "bob", 1500.0, "Rent share");
        assert!(transfer.involves("alice"));
        assert!(transfer.involves("bob"));
        assert!(!transfer.involves("carol"));
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Transfer::new("alice", "bob", 1.0, "");
        let b = Transfer::new("alice", "bob", 1.0, "");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_display() {
        let transfer = Transfer::new("alice", "bob", 1500.0, "Rent share");
        let text = transfer.to_string();
        assert!(text.contains("alice -> bob | 1,500.0 | Rent share"));
    }
}
